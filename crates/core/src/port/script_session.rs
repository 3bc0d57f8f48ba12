// Script Session Port
// A caller-owned persistent interpreter, reused across queries

use async_trait::async_trait;

use super::script_runner::ScriptError;

/// Script Session trait
///
/// A session keeps one interpreter process alive across queries so callers
/// can amortize per-spawn startup cost. Exclusive ownership is part of the
/// contract: `run` takes `&mut self`, so two queries can never interleave
/// on one session — the borrow checker enforces the serialization the
/// shared process requires.
#[async_trait]
pub trait ScriptSession: Send {
    /// Run one command in the live interpreter and return its stdout
    ///
    /// # Errors
    /// - ScriptError::SessionClosed if the interpreter died or its pipes broke
    /// - ScriptError::NonZeroExit if the command reported failure
    async fn run(&mut self, command: &str) -> Result<String, ScriptError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::VecDeque;

    /// Mock session replaying scripted replies in order
    pub struct MockScriptSession {
        replies: VecDeque<Result<String, ScriptError>>,
        commands: Vec<String>,
    }

    impl MockScriptSession {
        pub fn new(replies: Vec<Result<String, ScriptError>>) -> Self {
            Self {
                replies: replies.into(),
                commands: Vec::new(),
            }
        }

        /// Commands issued against this session, in order
        pub fn commands(&self) -> &[String] {
            &self.commands
        }
    }

    #[async_trait]
    impl ScriptSession for MockScriptSession {
        async fn run(&mut self, command: &str) -> Result<String, ScriptError> {
            self.commands.push(command.to_string());
            self.replies.pop_front().unwrap_or_else(|| {
                Err(ScriptError::SessionClosed(
                    "mock replies exhausted".to_string(),
                ))
            })
        }
    }
}
