//! In-app notification fan-out with optional email delivery.
//!
//! [`Notifier`] writes notification rows for recipients and, when SMTP is
//! configured, mirrors each one as a plain-text email. Email delivery is
//! best-effort and never blocks or fails the triggering request.

pub mod email;
pub mod notifier;

pub use email::{EmailConfig, EmailDelivery, EmailError};
pub use notifier::Notifier;
