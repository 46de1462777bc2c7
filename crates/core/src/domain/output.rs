// Captured Output - payload of one completed process run

/// Raw output streams of one completed child process.
///
/// Both streams are captured independently and may be empty. The exit
/// status is deliberately not carried: clients only ever see the streams,
/// and a non-zero exit is not an error at this layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedOutput {
    pub fn new(stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// True if the run produced no bytes on either stream
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty() && self.stderr.is_empty()
    }
}
