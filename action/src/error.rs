/// Problems with the action's input, raised before any send is attempted.
#[derive(Debug)]
pub enum Error {
    Stdin(std::io::Error),
    InvalidParams(serde_json::Error),
}

impl Error {
    /// Result record reported to the caller
    pub fn to_json(&self) -> String {
        serde_json::json!({ "error": "invalid parameters" }).to_string()
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Stdin(ref e) => write!(f, "could not read parameters from stdin: {}", e),
            Error::InvalidParams(ref e) => write!(f, "invalid parameters: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Stdin(err)
    }
}

impl From<serde_json::error::Error> for Error {
    fn from(err: serde_json::error::Error) -> Self {
        Self::InvalidParams(err)
    }
}
