pub mod api;
pub mod config;
pub mod error;
pub mod handler;
pub mod host;
pub mod operand;
pub mod ui;

pub use error::{Error, ErrorKind, Result};
pub use handler::{CalculatorHandler, OperatorCallback, Outcome};
