use crate::api::MailResult;
use crate::config::SmtpSettings;
use crate::email::MailMessage;
use crate::error::Error;
use crate::request::MailRequest;
use crate::smtp::{Connector, Session, SmtpConnector};

/// Sends a single email per call.
///
/// The protocol is walked in a fixed order (connect, STARTTLS, AUTH,
/// submit, QUIT) and each stage only runs if the previous one succeeded.
/// Nothing is retried.
pub struct MailSender<C> {
    connector: C,
}

impl MailSender<SmtpConnector> {
    pub fn from_settings(settings: &SmtpSettings) -> Self {
        Self::new(SmtpConnector::new(settings))
    }
}

impl<C: Connector> MailSender<C> {
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    pub fn send(&self, request: &MailRequest) -> MailResult {
        self.try_send(request).into()
    }

    pub fn try_send(&self, request: &MailRequest) -> Result<(), Error> {
        let mail = MailMessage::from_request(request);

        log::info!("Connecting to email host...");

        let mut session = self.connector.connect().map_err(|e| {
            log::error!("Could not connect to email host: {}", e);
            Error::Connection(e.to_string())
        })?;

        // The session is released on every path from here on
        if let Err(err) = Self::deliver(&mut session, request, &mail) {
            session.abort();
            return Err(err);
        }

        if let Err(e) = session.quit() {
            // The server already accepted the message
            log::warn!("QUIT failed after successful send: {}", e);
        }

        log::info!("Successfully sent the mail to {}", mail.to_header());

        Ok(())
    }

    fn deliver(
        session: &mut C::Session,
        request: &MailRequest,
        mail: &MailMessage,
    ) -> Result<(), Error> {
        session.starttls().map_err(|e| {
            log::error!("Could not negotiate STARTTLS with email host: {}", e);
            Error::Connection(e.to_string())
        })?;

        log::info!("Connected to email host, attempting secure login...");

        session
            .login(&request.gmail_user, &request.gmail_password)
            .map_err(|e| {
                log::error!("Could not log in as {}: {}", request.gmail_user, e);
                Error::Auth(e.to_string())
            })?;

        log::info!("Login succeeded, attempting to send message...");

        session.submit(mail).map_err(|e| {
            log::error!("Could not send message: {}", e);
            Error::Send(e.to_string())
        })
    }
}
