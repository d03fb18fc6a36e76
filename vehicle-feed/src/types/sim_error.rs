use std::fmt;

/// Represents errors that can occur in the vehicle feed simulator.
#[derive(Debug)]
pub enum SimError {
    TimerStartError(String), // Failure spawning the tick thread
    TimerLockError(String),  // Shared vehicle state could not be locked
    ReportError(String),     // Fleet report could not be written
    Other(String),           // Generic error case with a custom message
}

/// Implement the Display trait for user-friendly error messages
impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::TimerStartError(msg) => write!(f, "Timer start error: {}", msg),
            SimError::TimerLockError(msg) => write!(f, "Timer lock error: {}", msg),
            SimError::ReportError(msg) => write!(f, "Report error: {}", msg),
            SimError::Other(ref message) => write!(f, "Error: {}", message),
        }
    }
}

impl std::error::Error for SimError {}
