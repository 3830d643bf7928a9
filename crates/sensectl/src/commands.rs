//! Command execution for sensectl

use crate::cli::{Cli, Commands};
use crate::client::SensedClient;
use crate::output;
use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use sense_shared::{classify, estimate_priority, TicketPatch};
use serde::Serialize;

/// Run the parsed command
pub async fn run(cli: Cli) -> Result<()> {
    let json = cli.json;

    match cli.command {
        Commands::Classify { text } => classify_offline(&text, json),
        command => run_remote(&cli.url, command, json).await,
    }
}

async fn run_remote(url: &str, command: Commands, json: bool) -> Result<()> {
    let client = SensedClient::new(url)?;

    match command {
        Commands::Status => {
            let health = client.health().await?;
            if json {
                return print_json(&health);
            }
            println!("sensed at {}: {}", client.base_url(), health.status.green());
        }

        Commands::List => {
            let tickets = client.list().await?;
            if json {
                return print_json(&tickets);
            }
            print!("{}", output::ticket_table(&tickets));
            if !tickets.is_empty() {
                println!();
            }
        }

        Commands::Create { text, source } => {
            let created = client.create(&text, source.as_deref()).await?;
            if json {
                return print_json(&created);
            }
            output::display_success(&format!(
                "Created ticket #{} ({}, {})",
                created.id,
                created.priority.as_str(),
                created.category.as_str()
            ));
        }

        Commands::Update {
            id,
            status,
            assigned_to,
            rating,
        } => {
            let patch = build_patch(status, assigned_to, rating);
            let updated = client.update(id, &patch).await?;
            if json {
                return print_json(&updated);
            }
            output::display_success(&updated.message);
            println!("{}", output::ticket_detail(&updated.ticket));
        }

        Commands::Suggest { text } => {
            let reply = client.suggest(&text).await?;
            if json {
                return print_json(&reply);
            }
            println!("{}", reply.suggestion);
        }

        Commands::Analyze { text } => {
            let estimate = client.analyze(&text).await?;
            if json {
                return print_json(&estimate);
            }
            println!(
                "{}  {}",
                output::priority_label(estimate.priority),
                estimate.reason
            );
        }

        Commands::Classify { .. } => bail!("classify runs locally"),
    }

    Ok(())
}

/// Assemble a patch from the optional update flags
pub fn build_patch(
    status: Option<String>,
    assigned_to: Option<String>,
    rating: Option<i64>,
) -> TicketPatch {
    TicketPatch {
        status,
        assigned_to,
        customer_rating: rating,
    }
}

fn classify_offline(text: &str, json: bool) -> Result<()> {
    let classification = classify(text);
    let estimate = estimate_priority(text);

    if json {
        return print_json(&serde_json::json!({
            "classification": classification,
            "analysis": estimate,
        }));
    }

    println!(
        "on creation:  {}  {}",
        output::priority_label(classification.priority),
        classification.category.as_str()
    );
    println!(
        "analysis:     {}  {}",
        output::priority_label(estimate.priority),
        estimate.reason
    );
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_patch_keeps_only_given_fields() {
        let patch = build_patch(None, Some("Sarah".into()), Some(-1));
        assert_eq!(patch.status, None);
        assert_eq!(patch.assigned_to.as_deref(), Some("Sarah"));
        assert_eq!(patch.customer_rating, Some(-1));
        assert!(build_patch(None, None, None).is_empty());
    }
}
