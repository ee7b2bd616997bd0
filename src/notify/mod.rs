//! Form notifications through an external e-mail relay
//!
//! The relay is an HTTP endpoint (typically a hosted script) that accepts a
//! JSON payload and sends the actual e-mail. This module builds those
//! payloads and runs the three website form flows on top of them:
//!
//! - contact: admin notification, then an auto-reply when an e-mail was given
//! - demo request: admin notification, auto-reply, demo credentials
//! - subscribe: admin notification (as a contact), auto-reply
//!
//! Delivery failures never fail a form: they are logged and reported back
//! as `email_sent = false`.
//!
//! # Example
//!
//! ```rust,ignore
//! use contentdesk::notify::{submit_contact, ContactForm, RelayClient};
//!
//! let relay = RelayClient::from_config(&config.notify);
//! let outcome = submit_contact(&relay, &config.notify, form)?;
//! ```

mod client;
mod forms;
mod payload;

pub use client::RelayClient;
pub use forms::{
    submit_contact, submit_demo_request, submit_subscription, BusinessType, ContactForm,
    DemoRequest, FormOutcome, Subscription, DEFAULT_SUBSCRIBER_NAME,
};
pub use payload::{auto_reply, contact_notification, demo_notification, RelayPayload};

use thiserror::Error;

/// Errors from the notification relay
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("e-mail relay is not configured (set notify.relay_url or CONTENTDESK_RELAY_URL)")]
    NotConfigured,

    #[error("relay request failed: {0}")]
    Request(String),

    #[error("relay returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("{0}")]
    Validation(String),
}

pub type NotifyResult<T> = Result<T, NotifyError>;

/// Something that can deliver a relay payload
pub trait Relay: Send + Sync {
    fn send(&self, payload: &RelayPayload) -> NotifyResult<()>;
}
