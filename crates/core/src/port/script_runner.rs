// Script Runner Port
// Abstraction for one-shot interpreter execution under a watchdog deadline

use async_trait::async_trait;
use thiserror::Error;

/// Interpreter execution errors
///
/// The variants are mutually exclusive per call. `NonZeroExit` always
/// carries both captured streams; the error stream is never dropped from
/// the message.
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("invalid timeout: {0}s (must be positive)")]
    InvalidTimeout(i64),

    #[error("failed to launch interpreter for `{command}`: {source}")]
    LaunchFailure {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` timed out after {timeout_secs}s")]
    TimedOut { command: String, timeout_secs: i64 },

    #[error("command exited with code {code}; stderr: {stderr}; stdout: {stdout}")]
    NonZeroExit {
        code: i32,
        stdout: String,
        stderr: String,
    },

    #[error("interpreter session closed: {0}")]
    SessionClosed(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Script Runner trait
///
/// Implementations:
/// - ShellRunner: spawns the configured interpreter per call (infra-shell)
///
/// The command text is passed to the interpreter as one opaque argument;
/// no tokenizing, validation, or escaping happens on this side of the
/// process boundary.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Run one command under a wall-clock deadline and return its captured
    /// stdout verbatim (trailing newline included, if the interpreter
    /// emitted one)
    ///
    /// # Errors
    /// - ScriptError::InvalidTimeout if timeout_secs <= 0 (nothing is spawned)
    /// - ScriptError::LaunchFailure if the interpreter cannot be started
    /// - ScriptError::TimedOut if the watchdog killed the process
    /// - ScriptError::NonZeroExit if the process exited with failure
    async fn run(&self, command: &str, timeout_secs: i64) -> Result<String, ScriptError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock runner behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Return this payload as captured stdout
        Output(String),
        /// Fail with NonZeroExit carrying this stderr
        FailExit(String),
        /// Fail with TimedOut
        Timeout,
    }

    /// Mock Script Runner for testing
    pub struct MockScriptRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        calls: Arc<Mutex<Vec<(String, i64)>>>,
    }

    impl MockScriptRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn with_output(payload: impl Into<String>) -> Self {
            Self::new(MockBehavior::Output(payload.into()))
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        /// Last (command, timeout_secs) pair this runner saw
        pub fn last_call(&self) -> Option<(String, i64)> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl ScriptRunner for MockScriptRunner {
        async fn run(&self, command: &str, timeout_secs: i64) -> Result<String, ScriptError> {
            if timeout_secs <= 0 {
                return Err(ScriptError::InvalidTimeout(timeout_secs));
            }
            self.calls
                .lock()
                .unwrap()
                .push((command.to_string(), timeout_secs));

            let behavior = self.behavior.lock().unwrap().clone();
            match behavior {
                MockBehavior::Output(payload) => Ok(payload),
                MockBehavior::FailExit(stderr) => Err(ScriptError::NonZeroExit {
                    code: 1,
                    stdout: String::new(),
                    stderr,
                }),
                MockBehavior::Timeout => Err(ScriptError::TimedOut {
                    command: command.to_string(),
                    timeout_secs,
                }),
            }
        }
    }
}
