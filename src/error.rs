use std::fmt;

#[derive(Debug)]
pub enum AbotError {
    /// The chat endpoint answered with a non-2xx status.
    Http {
        status: u16,
        detail: String,
    },
    /// The request never produced a response (connect failure, timeout, ...).
    NoResponse(String),
    /// A 2xx response whose body is not a non-empty reply array.
    MalformedReply(String),
    /// A reply is already in flight for this session.
    ReplyPending,
    ConfigError(String),
    IoError(std::io::Error),
    Other(String),
}

impl fmt::Display for AbotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbotError::Http { status, detail } => {
                write!(f, "HTTP error (status {}): {}", status, detail)
            }
            AbotError::NoResponse(msg) => write!(f, "No response received: {}", msg),
            AbotError::MalformedReply(msg) => write!(f, "Malformed reply: {}", msg),
            AbotError::ReplyPending => write!(f, "A reply is already pending"),
            AbotError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AbotError::IoError(e) => write!(f, "IO error: {}", e),
            AbotError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AbotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AbotError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AbotError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AbotError::MalformedReply(err.to_string())
        } else {
            AbotError::NoResponse(err.to_string())
        }
    }
}

impl From<std::io::Error> for AbotError {
    fn from(err: std::io::Error) -> Self {
        AbotError::IoError(err)
    }
}

pub type Result<T> = std::result::Result<T, AbotError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_io_error_keeps_its_source() {
        let err: AbotError = io::Error::new(io::ErrorKind::Other, "no threads").into();
        assert!(matches!(err, AbotError::IoError(_)));
        assert_eq!(err.to_string(), "IO error: no threads");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_of_reply_errors() {
        let http = AbotError::Http {
            status: 503,
            detail: "down".to_string(),
        };
        assert_eq!(http.to_string(), "HTTP error (status 503): down");
        assert!(http.source().is_none());
        assert_eq!(AbotError::ReplyPending.to_string(), "A reply is already pending");
    }
}
