//! Notify commands - submit a website form from the terminal

use crate::config::load_project_config;
use crate::notify::{
    submit_contact, submit_demo_request, submit_subscription, ContactForm, DemoRequest,
    FormOutcome, RelayClient, Subscription,
};
use anyhow::Result;
use clap::Subcommand;
use console::style;
use std::path::Path;

#[derive(Subcommand, Debug)]
pub enum NotifyCommand {
    /// Contact / consultation request
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        phone: String,

        /// Send an auto-reply to this address
        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        address: Option<String>,

        /// has-location, no-location or existing
        #[arg(long)]
        business_type: Option<String>,

        #[arg(long)]
        message: Option<String>,

        #[arg(long, default_value = "cli")]
        source: String,
    },

    /// Demo account request
    Demo {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        company: String,
    },

    /// Newsletter subscription
    Subscribe {
        #[arg(long)]
        email: String,

        #[arg(long)]
        name: Option<String>,
    },
}

/// Run a notify subcommand
pub fn run(dir: &Path, command: NotifyCommand) -> Result<()> {
    let config = load_project_config(dir);
    let relay = RelayClient::from_config(&config.notify);
    if !relay.is_configured() {
        eprintln!(
            "{} No relay URL configured; nothing will be e-mailed",
            style("!").yellow()
        );
    }

    let outcome = match command {
        NotifyCommand::Contact {
            name,
            phone,
            email,
            address,
            business_type,
            message,
            source,
        } => submit_contact(
            &relay,
            &config.notify,
            ContactForm {
                name,
                phone,
                email,
                address,
                business_type,
                message,
                source: Some(source),
                ..Default::default()
            },
        )?,
        NotifyCommand::Demo {
            name,
            email,
            company,
        } => submit_demo_request(&relay, &config.notify, DemoRequest { name, email, company })?,
        NotifyCommand::Subscribe { email, name } => {
            submit_subscription(&relay, &config.notify, Subscription { email, name })?
        }
    };

    print_outcome(&outcome);
    Ok(())
}

fn print_outcome(outcome: &FormOutcome) {
    println!("{} {}", style("✓").green(), outcome.message);
    if outcome.email_sent {
        println!("  Admin notification sent");
    } else {
        println!("  {} Admin notification was not delivered", style("!").yellow());
    }
    if let Some(demo) = &outcome.demo_credentials {
        println!(
            "  Demo: {}  user {}  password {}",
            style(&demo.url).cyan(),
            demo.username,
            demo.password
        );
    }
}
