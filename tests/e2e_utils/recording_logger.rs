#![cfg(test)]
#![allow(dead_code)]

use std::fmt;
use std::sync::Mutex;

use websockify::LoggerPort;

/// Logger capability that captures every line for assertions.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().unwrap().iter().any(|line| line.contains(needle))
    }
}

impl LoggerPort for RecordingLogger {
    fn event(&self, message: fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push(message.to_string());
    }

    fn line(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}
