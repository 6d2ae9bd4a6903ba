pub mod api;
pub mod config;
pub mod email;
pub mod error;
pub mod request;
pub mod sender;
pub mod smtp;

pub use api::MailResult;
pub use error::Error;
pub use request::{MailRequest, Recipient};
pub use sender::MailSender;
