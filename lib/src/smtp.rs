use std::time::Duration;

use lettre::address::AddressError;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::transport::smtp::client::{SmtpConnection, TlsParameters};
use lettre::transport::smtp::extension::ClientId;
use lettre::Message;

use crate::config::SmtpSettings;
use crate::email::MailMessage;

/// Mechanisms offered to the server, in order of preference
const AUTH_MECHANISMS: &[Mechanism] = &[Mechanism::Plain, Mechanism::Login];

/// Anything that went wrong while talking to the SMTP server or while
/// preparing the message for it.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportError(pub String);

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TransportError {}

impl From<lettre::transport::smtp::Error> for TransportError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        Self(err.to_string())
    }
}

impl From<lettre::error::Error> for TransportError {
    fn from(err: lettre::error::Error) -> Self {
        Self(format!("invalid message: {}", err))
    }
}

impl From<AddressError> for TransportError {
    fn from(err: AddressError) -> Self {
        Self(format!("invalid address: {}", err))
    }
}

/// An open SMTP session, driven one protocol stage at a time.
pub trait Session {
    /// Upgrade to TLS and greet the server again
    fn starttls(&mut self) -> Result<(), TransportError>;

    fn login(&mut self, user: &str, password: &str) -> Result<(), TransportError>;

    /// Send the envelope and the full MIME payload
    fn submit(&mut self, mail: &MailMessage) -> Result<(), TransportError>;

    /// Gracefully end the session
    fn quit(&mut self) -> Result<(), TransportError>;

    /// Close the session after a failure. Never fails.
    fn abort(&mut self);
}

/// Opens sessions against a fixed endpoint.
pub trait Connector {
    type Session: Session;

    /// Connect and perform the initial greeting
    fn connect(&self) -> Result<Self::Session, TransportError>;
}

/// Connects to a real SMTP server using lettre.
#[derive(Clone, Debug)]
pub struct SmtpConnector {
    host: String,
    port: u16,
    timeout: Option<Duration>,
    hello_name: ClientId,
}

impl SmtpConnector {
    pub fn new(settings: &SmtpSettings) -> Self {
        let hello_name = match settings.hello_name {
            Some(ref name) => ClientId::Domain(name.clone()),
            None => ClientId::default(),
        };

        Self {
            host: settings.host.clone(),
            port: settings.port,
            timeout: settings.timeout(),
            hello_name,
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for SmtpConnector {
    fn default() -> Self {
        Self::new(&SmtpSettings::default())
    }
}

impl Connector for SmtpConnector {
    type Session = SmtpSession;

    fn connect(&self) -> Result<SmtpSession, TransportError> {
        // Plain connection; TLS is negotiated afterwards with STARTTLS
        let connection = SmtpConnection::connect(
            (self.host.as_str(), self.port),
            self.timeout,
            &self.hello_name,
            None,
            None,
        )?;

        log::debug!("Server info: {:?}", connection.server_info());

        Ok(SmtpSession {
            connection,
            host: self.host.clone(),
            hello_name: self.hello_name.clone(),
            stream_lost: false,
        })
    }
}

pub struct SmtpSession {
    connection: SmtpConnection,
    host: String,
    hello_name: ClientId,
    /// Set when a TLS upgrade failed half way and took the stream with it
    stream_lost: bool,
}

impl Session for SmtpSession {
    fn starttls(&mut self) -> Result<(), TransportError> {
        let tls_parameters = TlsParameters::new(self.host.clone())?;

        if let Err(err) = self.connection.starttls(&tls_parameters, &self.hello_name) {
            // Refusals leave the plain stream intact, anything else does not
            self.stream_lost = !(err.is_client() || err.is_transient() || err.is_permanent());
            return Err(err.into());
        }

        Ok(())
    }

    fn login(&mut self, user: &str, password: &str) -> Result<(), TransportError> {
        let credentials = Credentials::new(user.to_string(), password.to_string());
        let response = self.connection.auth(AUTH_MECHANISMS, &credentials)?;
        log::debug!("AUTH response: {:?}", response);
        Ok(())
    }

    fn submit(&mut self, mail: &MailMessage) -> Result<(), TransportError> {
        let message = build_message(mail)?;
        let response = self
            .connection
            .send(message.envelope(), &message.formatted())?;
        log::debug!("DATA response: {:?}", response);
        Ok(())
    }

    fn quit(&mut self) -> Result<(), TransportError> {
        self.connection.quit()?;
        Ok(())
    }

    fn abort(&mut self) {
        if self.stream_lost {
            // Nothing left to QUIT on; the socket closes on drop
            return;
        }

        // Sends QUIT if the connection is still usable, then shuts it down
        self.connection.abort();
    }
}

/// Turn a `MailMessage` into a lettre `Message`.
///
/// This is where addresses get parsed, so a malformed address fails here
/// rather than when the `MailMessage` is built.
pub fn build_message(mail: &MailMessage) -> Result<Message, TransportError> {
    let mut builder = Message::builder()
        .from(mail.sender.parse::<Mailbox>()?)
        .subject(mail.subject.as_str())
        .header(ContentType::TEXT_HTML);

    for recipient in &mail.recipients {
        builder = builder.to(recipient.parse::<Mailbox>()?);
    }

    Ok(builder.body(mail.body.clone())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mail(recipients: &[&str]) -> MailMessage {
        MailMessage {
            sender: "a@x.com".to_string(),
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            subject: "Hi".to_string(),
            body: "<b>hello</b>".to_string(),
        }
    }

    #[test]
    fn test_build_message_headers() {
        let message = build_message(&mail(&["b@y.com", "c@z.com"])).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("From: a@x.com\r\n"));
        assert!(formatted.contains("To: b@y.com, c@z.com\r\n"));
        assert!(formatted.contains("Subject: Hi\r\n"));
        assert!(formatted.contains("Content-Type: text/html; charset=utf-8\r\n"));
        assert!(formatted.contains("\r\n\r\n<b>hello</b>"));
    }

    #[test]
    fn test_build_message_envelope() {
        let message = build_message(&mail(&["c@z.com", "b@y.com"])).unwrap();
        let envelope = message.envelope();

        assert_eq!(envelope.from().map(|a| a.to_string()), Some("a@x.com".to_string()));

        let to: Vec<String> = envelope.to().iter().map(|a| a.to_string()).collect();
        assert_eq!(to, vec!["c@z.com".to_string(), "b@y.com".to_string()]);
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let result = build_message(&mail(&["b@y.com", "not an address"]));

        assert!(result.is_err());
        assert!(result.unwrap_err().0.starts_with("invalid address"));
    }

    #[test]
    fn test_build_message_no_recipients() {
        let result = build_message(&mail(&[]));

        assert!(result.is_err());
    }

    #[test]
    fn test_connector_endpoint() {
        assert_eq!(SmtpConnector::default().endpoint(), "smtp.gmail.com:587");
    }
}
