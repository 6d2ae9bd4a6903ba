use crate::request::MailRequest;

/// A single outgoing HTML email.
///
/// Addresses are kept as the caller passed them in. They are only parsed when
/// the message is handed to the transport.
#[derive(Clone, Debug, PartialEq)]
pub struct MailMessage {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    pub fn from_request(request: &MailRequest) -> Self {
        Self {
            sender: request.from.clone(),
            recipients: request.recipients(),
            subject: request.subject.clone(),
            body: request.text.clone(),
        }
    }

    /// Value of the `To` header
    pub fn to_header(&self) -> String {
        self.recipients.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Recipient;

    fn request(recipient: Recipient) -> MailRequest {
        MailRequest {
            gmail_user: "bot@gmail.com".to_string(),
            gmail_password: "hunter2".to_string(),
            from: "a@x.com".to_string(),
            recipient,
            subject: "Hi".to_string(),
            text: "<b>hello</b>".to_string(),
        }
    }

    #[test]
    fn test_from_request() {
        let mail = MailMessage::from_request(&request(Recipient::from("b@y.com")));

        assert_eq!(mail.sender, "a@x.com");
        assert_eq!(mail.recipients, vec!["b@y.com".to_string()]);
        assert_eq!(mail.subject, "Hi");
        assert_eq!(mail.body, "<b>hello</b>");
        assert_eq!(mail.to_header(), "b@y.com");
    }

    #[test]
    fn test_to_header_joins_in_order() {
        let recipients = vec!["b@y.com".to_string(), "c@z.com".to_string()];
        let mail = MailMessage::from_request(&request(Recipient::from(recipients)));

        assert_eq!(mail.to_header(), "b@y.com, c@z.com");
    }
}
