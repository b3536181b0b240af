//! Mail delivery boundary

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use crate::domain::rendering::Part;

pub mod dispatcher;
pub mod email_address;
pub mod errors;

pub use dispatcher::{DispatchError, MailDispatcher};
pub use email_address::{EmailAddress, EmailAddressError};
pub use errors::MailerError;

/// Outbound mail transport
#[async_trait]
pub trait Mailer: Clone + Send + Sync + 'static {
    /// Send a rendered mail
    ///
    /// # Arguments
    /// * `to` - The [`EmailAddress`] to send the mail to.
    /// * `subject` - The subject of the mail.
    /// * `parts` - The alternative bodies, plain text first.
    ///
    /// # Returns
    /// A [`Result`] indicating success or failure.
    async fn send_email(
        &self,
        to: &EmailAddress,
        subject: &str,
        parts: &[Part],
    ) -> Result<(), MailerError>;
}

#[cfg(test)]
mock! {
    pub Mailer {}

    impl Clone for Mailer {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl Mailer for Mailer {
        async fn send_email(&self, to: &EmailAddress, subject: &str, parts: &[Part]) -> Result<(), MailerError>;
    }
}
