#![allow(dead_code)]
use herald::{Channel, ChannelError};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

/// A mock Channel that records every delivery into a shared, ordered journal.
#[derive(Clone, Debug)]
pub struct RecordingChannel {
    pub name: String,
    pub journal: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingChannel {
    pub fn new(name: &str, journal: Arc<Mutex<Vec<(String, String)>>>) -> Self {
        Self {
            name: name.to_string(),
            journal,
        }
    }
}

impl Channel for RecordingChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn target(&self) -> Option<&str> {
        None
    }

    fn deliver(&self, content: &str) -> Result<(), ChannelError> {
        self.journal
            .lock()
            .unwrap()
            .push((self.name.clone(), content.to_string()));
        Ok(())
    }
}

/// A mock Channel that can be switched between failing and succeeding.
#[derive(Debug)]
pub struct FailableMockChannel {
    pub calls: AtomicUsize,
    pub delivered: Mutex<Vec<String>>,
    fail_on_send: AtomicBool,
}

impl FailableMockChannel {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delivered: Mutex::new(Vec::new()),
            fail_on_send: AtomicBool::new(false),
        }
    }

    pub fn set_fail_on_send(&self, fail: bool) {
        self.fail_on_send.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Channel for FailableMockChannel {
    fn name(&self) -> &str {
        "failable_mock"
    }

    fn target(&self) -> Option<&str> {
        Some("nowhere")
    }

    fn deliver(&self, content: &str) -> Result<(), ChannelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on_send.load(Ordering::SeqCst) {
            return Err(ChannelError::Unavailable {
                channel: "failable_mock".to_string(),
                reason: "mock configured to fail".to_string(),
            });
        }
        self.delivered.lock().unwrap().push(content.to_string());
        Ok(())
    }
}
