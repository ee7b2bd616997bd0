//! Website form flows

use super::payload::{auto_reply, contact_notification, demo_notification};
use super::{NotifyError, NotifyResult, Relay, RelayPayload};
use crate::config::{DemoCredentials, NotifyConfig};
use chrono::Local;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Name used for newsletter subscribers who leave it blank
pub const DEFAULT_SUBSCRIBER_NAME: &str = "Customer";

const SUBSCRIPTION_PHONE: &str = "N/A";
const SUBSCRIPTION_SOURCE: &str = "Newsletter subscription";

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid regex"))
}

/// Where the prospect is with their shop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusinessType {
    HasLocation,
    NoLocation,
    Existing,
}

impl BusinessType {
    pub fn label(&self) -> &'static str {
        match self {
            BusinessType::HasLocation => "Has premises",
            BusinessType::NoLocation => "No premises yet",
            BusinessType::Existing => "Already trading",
        }
    }
}

impl FromStr for BusinessType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "has-location" => Ok(BusinessType::HasLocation),
            "no-location" => Ok(BusinessType::NoLocation),
            "existing" => Ok(BusinessType::Existing),
            other => Err(format!("unknown business type: {other}")),
        }
    }
}

/// Contact / consultation form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Package the prospect is interested in
    #[serde(default, rename = "package")]
    pub package_choice: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// `has-location`, `no-location` or `existing`
    #[serde(default)]
    pub business_type: Option<String>,
}

impl ContactForm {
    pub fn validate(&self) -> NotifyResult<()> {
        if self.name.trim().is_empty() || self.phone.trim().is_empty() {
            return Err(NotifyError::Validation(
                "name and phone number are required".into(),
            ));
        }
        Ok(())
    }

    fn reply_address(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

/// Demo account request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DemoRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
}

impl DemoRequest {
    pub fn validate(&self) -> NotifyResult<()> {
        if [&self.name, &self.email, &self.company]
            .iter()
            .any(|f| f.trim().is_empty())
        {
            return Err(NotifyError::Validation(
                "name, email and company are required".into(),
            ));
        }
        Ok(())
    }
}

/// Newsletter subscription
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl Subscription {
    pub fn validate(&self) -> NotifyResult<()> {
        if !email_pattern().is_match(self.email.trim()) {
            return Err(NotifyError::Validation(
                "a valid email address is required".into(),
            ));
        }
        Ok(())
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_SUBSCRIBER_NAME)
    }
}

/// Result of a submitted form
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormOutcome {
    pub success: bool,
    pub message: String,
    /// Whether the admin notification reached the relay
    pub email_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_credentials: Option<DemoCredentials>,
}

impl FormOutcome {
    fn ok(message: &str, email_sent: bool) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            email_sent,
            demo_credentials: None,
        }
    }
}

/// Send one payload, logging instead of failing
fn deliver(relay: &dyn Relay, payload: &RelayPayload, what: &str) -> bool {
    match relay.send(payload) {
        Ok(()) => {
            info!("{} sent to relay", what);
            true
        }
        Err(e) => {
            warn!("{} not sent: {}", what, e);
            false
        }
    }
}

/// Build and send the admin notification; false when there is no admin address
fn notify_admin<F>(relay: &dyn Relay, config: &NotifyConfig, what: &str, build: F) -> bool
where
    F: FnOnce(&str) -> RelayPayload,
{
    match config.admin_email.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
        Some(admin) => deliver(relay, &build(admin), what),
        None => {
            warn!("{} not sent: notify.admin_email is not configured", what);
            false
        }
    }
}

/// Contact form: notify the admin, auto-reply when an e-mail was given
pub fn submit_contact(
    relay: &dyn Relay,
    config: &NotifyConfig,
    form: ContactForm,
) -> NotifyResult<FormOutcome> {
    form.validate()?;
    let now = Local::now().naive_local();

    let email_sent = notify_admin(relay, config, "Contact notification", |admin| {
        contact_notification(&form, admin, now)
    });

    if let Some(to) = form.reply_address() {
        deliver(relay, &auto_reply(to, form.name.trim(), config), "Contact auto-reply");
    }

    Ok(FormOutcome::ok("Your contact details were sent successfully", email_sent))
}

/// Demo request: notify the admin, auto-reply, hand out demo credentials
pub fn submit_demo_request(
    relay: &dyn Relay,
    config: &NotifyConfig,
    request: DemoRequest,
) -> NotifyResult<FormOutcome> {
    request.validate()?;
    let now = Local::now().naive_local();

    let email_sent = notify_admin(relay, config, "Demo request notification", |admin| {
        demo_notification(&request, admin, now)
    });
    deliver(
        relay,
        &auto_reply(&request.email, request.name.trim(), config),
        "Demo auto-reply",
    );

    let mut outcome = FormOutcome::ok("Your demo account request was sent successfully", email_sent);
    outcome.demo_credentials = config.demo.clone();
    Ok(outcome)
}

/// Newsletter subscription: notify the admin as a contact, auto-reply
pub fn submit_subscription(
    relay: &dyn Relay,
    config: &NotifyConfig,
    subscription: Subscription,
) -> NotifyResult<FormOutcome> {
    subscription.validate()?;
    let now = Local::now().naive_local();
    let name = subscription.display_name().to_string();
    let email = subscription.email.trim().to_string();

    let as_contact = ContactForm {
        name: name.clone(),
        phone: SUBSCRIPTION_PHONE.into(),
        email: Some(email.clone()),
        source: Some(SUBSCRIPTION_SOURCE.into()),
        ..Default::default()
    };
    let email_sent = notify_admin(relay, config, "Subscription notification", |admin| {
        contact_notification(&as_contact, admin, now)
    });
    deliver(relay, &auto_reply(&email, &name, config), "Subscription auto-reply");

    Ok(FormOutcome::ok("Subscribed to the newsletter", email_sent))
}
