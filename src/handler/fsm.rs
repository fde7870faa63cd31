use crate::{Error, Result};
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationState {
    /// Request built and in flight.
    Pending,
    /// Result written to the page.
    Resolved,
    /// User notified of a failure.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationEvent {
    ResultRendered,
    FailureNotified,
}

/// Lifecycle of a single handler call. Never shared between calls.
#[derive(Debug)]
pub struct Invocation {
    id: Uuid,
    op: String,
    state: InvocationState,
}

impl Invocation {
    pub fn new(op: impl Into<String>) -> Self {
        let invocation = Self {
            id: Uuid::new_v4(),
            op: op.into(),
            state: InvocationState::Pending,
        };
        debug!(
            "Invocation {} started for op {:?}",
            invocation.id, invocation.op
        );
        invocation
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn current_state(&self) -> InvocationState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            InvocationState::Resolved | InvocationState::Failed
        )
    }

    pub fn transition(&mut self, event: InvocationEvent) -> Result<()> {
        let new_state = match (self.state, event) {
            (InvocationState::Pending, InvocationEvent::ResultRendered) => {
                InvocationState::Resolved
            }
            (InvocationState::Pending, InvocationEvent::FailureNotified) => {
                InvocationState::Failed
            }
            (current, event) => {
                warn!(
                    "Invalid transition for invocation {} from {:?} with event {:?}",
                    self.id, current, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", current),
                    requested: format!("{:?}", event),
                });
            }
        };

        debug!(
            "Invocation {}: {:?} -> {:?} (event: {:?})",
            self.id, self.state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }
}
