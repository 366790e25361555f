use thiserror::Error;

/// Failures surfaced by the action client.
///
/// Neither variant is fatal: the session simply does not advance and the last
/// rendered snapshot stays on screen.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request could not be sent or the engine answered with a non-success status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The engine answered, but the body is not a valid snapshot.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

impl ClientError {
    #[cfg(test)]
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
