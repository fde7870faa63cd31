pub mod fsm;

pub use fsm::{Invocation, InvocationEvent, InvocationState};

use crate::{
    Error, ErrorKind, Result,
    api::{CalcClient, CalcRequest, HttpCalcClient},
    config::ApiConfig,
    operand::parse_operand,
    ui::{INPUT_A, INPUT_B, Notifier, Page, RESULT_ELEMENT},
};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Typed replacement for a globally exposed click handler. Hosts register it
/// on their controls and call it with the operator token.
pub type OperatorCallback = Arc<dyn Fn(String) -> BoxFuture<'static, Result<Outcome>> + Send + Sync>;

/// How one call ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `text` was written to the result element.
    Resolved { text: String },
    /// `message` was delivered to the notifier.
    Failed { kind: ErrorKind, message: String },
}

impl Outcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }
}

/// Reads the operand fields, asks the server, and renders the answer.
///
/// Cloning is cheap. Clones share the client, page and notifier, and calls
/// made through them run independently: whichever response lands last owns
/// the result element.
#[derive(Clone)]
pub struct CalculatorHandler {
    client: Arc<dyn CalcClient>,
    page: Arc<dyn Page>,
    notifier: Arc<dyn Notifier>,
}

impl CalculatorHandler {
    pub fn new(
        client: Arc<dyn CalcClient>,
        page: Arc<dyn Page>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            page,
            notifier,
        }
    }

    pub fn from_config(
        config: &ApiConfig,
        page: Arc<dyn Page>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self> {
        let client = HttpCalcClient::new(config)?;
        info!("Calculator handler targeting {}", client.url());
        Ok(Self::new(Arc::new(client), page, notifier))
    }

    /// Runs one calculation for `op`.
    ///
    /// Server and transport failures are reported through the notifier and
    /// come back as [`Outcome::Failed`]. `Err` is returned only when an
    /// operand input is missing from the page, before anything is sent.
    pub async fn calculate(&self, op: &str) -> Result<Outcome> {
        let a = self.read_operand(INPUT_A)?;
        let b = self.read_operand(INPUT_B)?;
        let request = CalcRequest::new(a, b, op);

        let mut invocation = Invocation::new(op);

        match self.exchange(&request).await {
            Ok(text) => {
                invocation.transition(InvocationEvent::ResultRendered)?;
                info!("Invocation {} resolved: {}", invocation.id(), text);
                Ok(Outcome::Resolved { text })
            }
            Err(e) => {
                let kind = e.kind();
                let message = e.user_message();
                warn!("Invocation {} failed: {}", invocation.id(), e);
                self.notifier.notify(&message);
                invocation.transition(InvocationEvent::FailureNotified)?;
                Ok(Outcome::Failed { kind, message })
            }
        }
    }

    pub fn into_callback(self) -> OperatorCallback {
        Arc::new(move |op: String| -> BoxFuture<'static, Result<Outcome>> {
            let handler = self.clone();
            Box::pin(async move { handler.calculate(&op).await })
        })
    }

    fn read_operand(&self, id: &str) -> Result<f64> {
        let raw = self
            .page
            .input_value(id)
            .ok_or_else(|| Error::missing_element(id))?;
        let value = parse_operand(&raw);
        if value.is_nan() {
            debug!("Operand {} ({:?}) is not numeric, sending as-is", id, raw);
        }
        Ok(value)
    }

    async fn exchange(&self, request: &CalcRequest) -> Result<String> {
        let response = self.client.calculate(request).await?;
        let text = response.result.to_string();
        self.page.set_text_content(RESULT_ELEMENT, &text)?;
        Ok(text)
    }
}
