use super::{INPUT_A, INPUT_B, Notifier, Page, RESULT_ELEMENT};
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process page holding input values and text elements by id.
#[derive(Debug, Default)]
pub struct MemoryPage {
    inputs: Mutex<HashMap<String, String>>,
    elements: Mutex<HashMap<String, String>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page with empty `a` and `b` inputs and an empty `result` element.
    pub fn calculator() -> Self {
        Self::new()
            .with_input(INPUT_A, "")
            .with_input(INPUT_B, "")
            .with_element(RESULT_ELEMENT, "")
    }

    pub fn with_input(self, id: impl Into<String>, value: impl Into<String>) -> Self {
        lock(&self.inputs).insert(id.into(), value.into());
        self
    }

    pub fn with_element(self, id: impl Into<String>, text: impl Into<String>) -> Self {
        lock(&self.elements).insert(id.into(), text.into());
        self
    }

    /// Overwrites an input value, creating the input if needed.
    pub fn set_input(&self, id: &str, value: &str) {
        lock(&self.inputs).insert(id.to_string(), value.to_string());
    }

    pub fn text_content(&self, id: &str) -> Option<String> {
        lock(&self.elements).get(id).cloned()
    }
}

impl Page for MemoryPage {
    fn input_value(&self, id: &str) -> Option<String> {
        lock(&self.inputs).get(id).cloned()
    }

    fn set_text_content(&self, id: &str, text: &str) -> Result<()> {
        let mut elements = lock(&self.elements);
        match elements.get_mut(id) {
            Some(slot) => {
                *slot = text.to_string();
                Ok(())
            }
            None => Err(Error::missing_element(id)),
        }
    }
}

/// Notifier that keeps every message, in delivery order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        lock(&self.messages).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        lock(&self.messages).push(message.to_string());
    }
}
