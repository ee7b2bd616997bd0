//! contentdesk - SEO scoring and blog back-office
//!
//! - [`rules`]: on-page SEO rules and the engine that runs them
//! - [`scoring`]: the 0-100 score over a scorecard
//! - [`blog`]: embedded blog post store and bulk audit
//! - [`notify`]: website form flows over an e-mail relay
//! - [`server`]: HTTP API
//! - [`cli`]: the `contentdesk` binary's commands

pub mod blog;
pub mod cli;
pub mod config;
pub mod models;
pub mod notify;
pub mod reporters;
pub mod rules;
pub mod scoring;
pub mod server;
