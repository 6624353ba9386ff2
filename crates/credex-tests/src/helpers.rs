//! Test helper functions and utilities.

use credex_core::{PipelineHost, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// A single interaction with the runner, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Mask(String),
    Export(String, String),
    Output(String, String),
    State(String, String),
    Info(String),
    Warning(String),
}

/// In-memory [`PipelineHost`] recording every call.
#[derive(Debug, Default)]
pub struct RecordingHost {
    events: RefCell<Vec<HostEvent>>,
    state: HashMap<String, String>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host whose saved state already holds `name = value`.
    pub fn with_state(name: &str, value: &str) -> Self {
        Self {
            events: RefCell::default(),
            state: HashMap::from([(name.to_string(), value.to_string())]),
        }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }

    pub fn masked(&self) -> Vec<String> {
        self.filter(|e| match e {
            HostEvent::Mask(v) => Some(v.clone()),
            _ => None,
        })
    }

    pub fn exports(&self) -> Vec<(String, String)> {
        self.filter(|e| match e {
            HostEvent::Export(k, v) => Some((k.clone(), v.clone())),
            _ => None,
        })
    }

    pub fn outputs(&self) -> Vec<(String, String)> {
        self.filter(|e| match e {
            HostEvent::Output(k, v) => Some((k.clone(), v.clone())),
            _ => None,
        })
    }

    pub fn saved_state(&self) -> Vec<(String, String)> {
        self.filter(|e| match e {
            HostEvent::State(k, v) => Some((k.clone(), v.clone())),
            _ => None,
        })
    }

    pub fn infos(&self) -> Vec<String> {
        self.filter(|e| match e {
            HostEvent::Info(m) => Some(m.clone()),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.filter(|e| match e {
            HostEvent::Warning(m) => Some(m.clone()),
            _ => None,
        })
    }

    /// Position of the first event matching `pred`.
    pub fn position(&self, pred: impl Fn(&HostEvent) -> bool) -> Option<usize> {
        self.events.borrow().iter().position(pred)
    }

    fn filter<T>(&self, f: impl Fn(&HostEvent) -> Option<T>) -> Vec<T> {
        self.events.borrow().iter().filter_map(f).collect()
    }

    fn record(&self, event: HostEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl PipelineHost for RecordingHost {
    fn mask_secret(&self, value: &str) {
        self.record(HostEvent::Mask(value.to_string()));
    }

    fn export_variable(&self, name: &str, value: &str) -> Result<()> {
        self.record(HostEvent::Export(name.to_string(), value.to_string()));
        Ok(())
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.record(HostEvent::Output(name.to_string(), value.to_string()));
        Ok(())
    }

    fn save_state(&self, name: &str, value: &str) -> Result<()> {
        self.record(HostEvent::State(name.to_string(), value.to_string()));
        Ok(())
    }

    fn get_state(&self, name: &str) -> Option<String> {
        self.state.get(name).cloned()
    }

    fn info(&self, message: &str) {
        self.record(HostEvent::Info(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.record(HostEvent::Warning(message.to_string()));
    }
}

/// Create an HTTP client for testing.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create test client")
}
