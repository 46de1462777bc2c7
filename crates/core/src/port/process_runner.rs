// Process Runner Port
// Abstraction over spawning the configured executable

use crate::domain::CapturedOutput;
use async_trait::async_trait;
use thiserror::Error;

/// Launch or execution failures.
///
/// A run that starts and exits (with any status) is not a failure; these
/// variants only cover the child never starting or its streams being lost.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Executable not found: {command}")]
    NotFound { command: String },

    #[error("Spawn failed for {command}: {reason}")]
    Spawn { command: String, reason: String },

    #[error("IO failure while capturing output: {reason}")]
    Io { reason: String },
}

/// Process Runner trait
///
/// Implementations:
/// - SubprocessRunner: spawns the configured external executable
/// - mocks::MockProcessRunner: canned outcomes for tests
///
/// The runner never raises across this boundary: every outcome, including
/// failure to launch, comes back as data.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run the configured executable once, to completion, and collect its
    /// stdout and stderr independently.
    ///
    /// # Errors
    /// - RunError::NotFound if the executable does not exist
    /// - RunError::Spawn if the OS refuses to create the process
    /// - RunError::Io if capturing output or waiting for exit fails
    async fn run(&self) -> Result<CapturedOutput, RunError>;
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
        /// Return the given streams
        Output(CapturedOutput),
        /// Fail as a missing executable
        NotFound(String),
        /// Fail with an arbitrary run error
        Fail(RunError),
    }

    /// Mock Process Runner for testing
    pub struct MockProcessRunner {
        behavior: Arc<Mutex<MockBehavior>>,
        call_count: Arc<Mutex<usize>>,
    }

    impl MockProcessRunner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                call_count: Arc::new(Mutex::new(0)),
            }
        }

        pub fn new_output(stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
            Self::new(MockBehavior::Output(CapturedOutput::new(stdout, stderr)))
        }

        pub fn new_not_found(command: impl Into<String>) -> Self {
            Self::new(MockBehavior::NotFound(command.into()))
        }

        pub fn new_fail(error: RunError) -> Self {
            Self::new(MockBehavior::Fail(error))
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl ProcessRunner for MockProcessRunner {
        async fn run(&self) -> Result<CapturedOutput, RunError> {
            *self.call_count.lock().unwrap() += 1;

            let behavior = self.behavior.lock().unwrap().clone();

            match behavior {
                MockBehavior::Output(output) => Ok(output),
                MockBehavior::NotFound(command) => Err(RunError::NotFound { command }),
                MockBehavior::Fail(error) => Err(error),
            }
        }
    }
}
