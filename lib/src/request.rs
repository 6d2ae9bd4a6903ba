use std::fmt;

use serde::Deserialize;

/// Recipient parameter as passed in by the caller.
///
/// Either a single address or an ordered list of addresses.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Recipient {
    One(String),
    Many(Vec<String>),
}

impl Recipient {
    /// Flattens the recipient into an ordered list of addresses.
    pub fn into_addresses(self) -> Vec<String> {
        match self {
            Self::One(address) => vec![address],
            Self::Many(addresses) => addresses,
        }
    }
}

impl From<&str> for Recipient {
    fn from(s: &str) -> Self {
        Self::One(s.to_string())
    }
}

impl From<Vec<String>> for Recipient {
    fn from(addresses: Vec<String>) -> Self {
        Self::Many(addresses)
    }
}

/// Parameters of a single send.
#[derive(Clone, Deserialize)]
pub struct MailRequest {
    pub gmail_user: String,
    pub gmail_password: String,
    pub from: String,
    pub recipient: Recipient,
    pub subject: String,
    pub text: String,
}

impl MailRequest {
    pub fn from_json(params: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(params)
    }

    /// Recipient addresses in the order they were given
    pub fn recipients(&self) -> Vec<String> {
        self.recipient.clone().into_addresses()
    }
}

// Keep the password out of logs
impl fmt::Debug for MailRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MailRequest")
            .field("gmail_user", &self.gmail_user)
            .field("gmail_password", &"<redacted>")
            .field("from", &self.from)
            .field("recipient", &self.recipient)
            .field("subject", &self.subject)
            .field("text", &self.text)
            .finish()
    }
}
