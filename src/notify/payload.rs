//! Relay payloads
//!
//! Wire shape: `{"type", "to", "subject", "data": {...}}`. Dates are
//! rendered `dd/mm/YYYY` and times `HH:MM:SS`.

use super::forms::{BusinessType, ContactForm, DemoRequest};
use crate::config::NotifyConfig;
use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::{json, Value};

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// One message for the relay
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RelayPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub to: String,
    pub subject: String,
    pub data: Value,
}

/// Admin notification for a contact form
pub fn contact_notification(form: &ContactForm, admin: &str, now: NaiveDateTime) -> RelayPayload {
    let email = form
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .unwrap_or("Not provided");
    let business_type = form
        .business_type
        .as_deref()
        .map(|b| match b.parse::<BusinessType>() {
            Ok(t) => t.label().to_string(),
            Err(_) => b.to_string(),
        })
        .unwrap_or_default();

    RelayPayload {
        kind: "contact".into(),
        to: admin.to_string(),
        subject: "New contact request from the website".into(),
        data: json!({
            "date": now.format(DATE_FORMAT).to_string(),
            "time": now.format(TIME_FORMAT).to_string(),
            "name": form.name.trim(),
            "phone": form.phone.trim(),
            "email": email,
            "address": form.address.as_deref().unwrap_or(""),
            "businessType": business_type,
            "message": form.message.as_deref().unwrap_or(""),
            "source": form.source.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or("website"),
        }),
    }
}

/// Admin notification for a demo account request
pub fn demo_notification(request: &DemoRequest, admin: &str, now: NaiveDateTime) -> RelayPayload {
    RelayPayload {
        kind: "demo".into(),
        to: admin.to_string(),
        subject: "New demo account request from the website".into(),
        data: json!({
            "date": now.format(DATE_FORMAT).to_string(),
            "time": now.format(TIME_FORMAT).to_string(),
            "name": request.name.trim(),
            "email": request.email.trim(),
            "company": request.company.trim(),
        }),
    }
}

/// Thank-you e-mail to the person who filled in a form
pub fn auto_reply(to: &str, name: &str, config: &NotifyConfig) -> RelayPayload {
    let mut footer = String::new();
    if let Some(hotline) = &config.hotline {
        footer.push_str(&format!("<p>Hotline: {}</p>", escape_html(hotline)));
    }
    if let Some(website) = &config.website {
        let site = escape_html(website);
        let label = site.trim_start_matches("https://").trim_start_matches("http://");
        footer.push_str(&format!("<p>Website: <a href=\"{site}\">{label}</a></p>"));
    }

    let name_html = escape_html(name);
    let brand = escape_html(&config.brand);
    let message = format!(
        "<h2>Hello {name_html},</h2>\
         <p>Thank you for contacting {brand}!</p>\
         <p>We have received your request. Our team will get back to you as soon as possible (within 24 hours).</p>\
         <p>Best regards,</p>\
         <p><strong>{brand}</strong></p>\
         {footer}"
    );

    RelayPayload {
        kind: "autoReply".into(),
        to: to.trim().to_string(),
        subject: format!("Thank you for contacting {}", config.brand),
        data: json!({
            "name": name,
            "message": message,
        }),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
