pub mod confirmation;
pub mod mailer;
