//! Domain logic and collaborator boundaries

pub mod mailer;
pub mod rendering;
