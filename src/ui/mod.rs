//! Host-page contract.
//!
//! The handler never touches a concrete UI. It reads inputs and writes the
//! result through [`Page`], and reports failures through [`Notifier`].

mod memory;

pub use memory::{MemoryPage, RecordingNotifier};

use crate::Result;

pub const INPUT_A: &str = "a";
pub const INPUT_B: &str = "b";
pub const RESULT_ELEMENT: &str = "result";

pub trait Page: Send + Sync {
    /// Current value of the input with `id`, or `None` if no such input exists.
    fn input_value(&self, id: &str) -> Option<String>;

    /// Replaces the text content of element `id`.
    fn set_text_content(&self, id: &str, text: &str) -> Result<()>;
}

/// User-visible, non-fatal notification. Must not block on user acknowledgement.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
