//! `dsmesh init` - Create a new node configuration.

use anyhow::Result;
use colored::Colorize;
use dsmesh::{InitOptions, Initializer, JsonFileStore};

use super::Context;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<()> {
    let store = JsonFileStore::new(&ctx.config_path);
    let mut initializer = Initializer::new(store, InitOptions::default())?;
    let outcome = initializer.run().await?;
    let config = &outcome.config;

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "path": outcome.location,
                    "network": config.network,
                    "network6": config.network6,
                    "ip": config.ip,
                    "ip6": config.ip6,
                    "external_ip": config.external_ip,
                    "external_ip6": config.external_ip6,
                    "public_key": config.private_key.public_key().to_string(),
                })
            );
        }
        OutputFormat::Pretty => {
            if ctx.verbose {
                println!("  {} {}", "network:".bold(), config.network);
                println!("  {} {}", "network6:".bold(), config.network6);
                println!("  {} {}", "external:".bold(), config.external());
                println!(
                    "  {} {}",
                    "public key:".bold(),
                    config.private_key.public_key()
                );
            }
            println!("{}", outcome.notice());
        }
    }

    Ok(())
}
