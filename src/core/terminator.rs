//! Termination strategies used by the fatal and panic paths
//!
//! The logger emits first and then hands control to its terminator, so the
//! triggering record is written before the process exits or unwinds.

use parking_lot::Mutex;

pub trait Terminator: Send + Sync {
    /// Called after a fatal record has been emitted and flushed
    fn exit(&self, code: i32);

    /// Called after a panic record has been emitted and flushed
    fn panic(&self, message: &str);
}

/// Exits the process on fatal and unwinds on panic
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTerminator;

impl Terminator for ProcessTerminator {
    fn exit(&self, code: i32) {
        std::process::exit(code);
    }

    fn panic(&self, message: &str) {
        panic!("{}", message);
    }
}

/// Records termination requests instead of acting on them
///
/// Lets tests observe fatal and panic records without ending the test process.
#[derive(Debug, Default)]
pub struct RecordingTerminator {
    exits: Mutex<Vec<i32>>,
    panics: Mutex<Vec<String>>,
}

impl RecordingTerminator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exits(&self) -> Vec<i32> {
        self.exits.lock().clone()
    }

    pub fn panics(&self) -> Vec<String> {
        self.panics.lock().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn exit(&self, code: i32) {
        self.exits.lock().push(code);
    }

    fn panic(&self, message: &str) {
        self.panics.lock().push(message.to_string());
    }
}
