/// Ways a send can fail, one per protocol stage.
///
/// Each variant keeps a description of the underlying cause for logging.
/// `Display` only yields the message that is reported back to the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// TCP connect, greeting or STARTTLS failed
    Connection(String),
    /// Server refused the credentials
    Auth(String),
    /// Server (or the message builder) refused the message
    Send(String),
}

impl Error {
    pub fn detail(&self) -> &str {
        match *self {
            Error::Connection(ref detail) => detail,
            Error::Auth(ref detail) => detail,
            Error::Send(ref detail) => detail,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Connection(_) => write!(f, "could not connect"),
            Error::Auth(_) => write!(f, "could not secure connection"),
            Error::Send(_) => write!(f, "could not send message"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hides_detail() {
        let err = Error::Auth("535 5.7.8 Username and Password not accepted".to_string());

        assert_eq!(err.to_string(), "could not secure connection");
        assert_eq!(
            err.detail(),
            "535 5.7.8 Username and Password not accepted"
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::Connection(String::new()).to_string(),
            "could not connect"
        );
        assert_eq!(
            Error::Send(String::new()).to_string(),
            "could not send message"
        );
    }
}
