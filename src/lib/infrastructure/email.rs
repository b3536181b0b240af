//! Mail transports

pub mod smtp;

pub use smtp::{SMTPConfig, SMTPMailer};
