/// Result record handed back to whoever invoked the action.
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::Error;

/// Outcome of a single send.
///
/// Serializes to `{"result": "done"}` or `{"error": "<message>"}`.
#[derive(Clone, Debug, PartialEq)]
pub enum MailResult {
    Success,
    Failure(Error),
}

impl MailResult {
    pub fn is_success(&self) -> bool {
        *self == MailResult::Success
    }

    pub fn to_json(&self) -> String {
        // Serializing a single string entry cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl From<Result<(), Error>> for MailResult {
    fn from(result: Result<(), Error>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(err) => Self::Failure(err),
        }
    }
}

impl Serialize for MailResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;

        match self {
            MailResult::Success => map.serialize_entry("result", "done")?,
            MailResult::Failure(err) => map.serialize_entry("error", &err.to_string())?,
        }

        map.end()
    }
}
