#![allow(dead_code)]

use calc_client::{
    CalculatorHandler,
    config::ApiConfig,
    ui::{MemoryPage, RecordingNotifier},
};
use std::sync::Arc;
use wiremock::MockServer;

pub const CALC_PATH: &str = "/api/calc";

/// API config pointing at a mock server.
pub fn api_config(server: &MockServer) -> ApiConfig {
    ApiConfig {
        base_url: server.uri(),
        ..ApiConfig::default()
    }
}

/// API config pointing at a local port nothing listens on.
pub fn unreachable_config() -> ApiConfig {
    let listener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind ephemeral port");
    let port = listener
        .local_addr()
        .expect("Failed to read local address")
        .port();
    drop(listener);

    ApiConfig {
        base_url: format!("http://127.0.0.1:{}", port),
        ..ApiConfig::default()
    }
}

/// Calculator page with `a` and `b` filled in and `result` set to `initial`.
pub fn filled_page(a: &str, b: &str, initial: &str) -> Arc<MemoryPage> {
    Arc::new(
        MemoryPage::calculator()
            .with_input("a", a)
            .with_input("b", b)
            .with_element("result", initial),
    )
}

pub struct Harness {
    pub handler: CalculatorHandler,
    pub page: Arc<MemoryPage>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(config: &ApiConfig, page: Arc<MemoryPage>) -> Harness {
    let notifier = Arc::new(RecordingNotifier::new());
    let handler = CalculatorHandler::from_config(config, page.clone(), notifier.clone())
        .expect("Failed to build handler");
    Harness {
        handler,
        page,
        notifier,
    }
}
