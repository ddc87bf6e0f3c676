use std::env;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rift_overlay::api::{LiveClientGateway, Resource};
use rift_overlay::config::Config;
use rift_overlay::transform::{transform, validate_snapshot};

const DEFAULT_RESOURCE: &str = "allgamedata";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (stderr, so stdout stays pure JSON)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snapshot=info,rift_overlay=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse arguments
    let args: Vec<String> = env::args().skip(1).collect();
    let raw_only = args.iter().any(|a| a == "--raw");
    let summoner = parse_summoner(&args);
    let name = args
        .iter()
        .enumerate()
        .find(|(i, a)| !a.starts_with('-') && !is_flag_value(&args, *i))
        .map(|(_, a)| a.as_str())
        .unwrap_or(DEFAULT_RESOURCE);

    let resource = Resource::from_name(name, summoner.as_deref()).with_context(|| {
        format!(
            "Unknown resource '{}' (per-player resources need --summoner <name>)",
            name
        )
    })?;

    let config = Config::from_env()?;
    let gateway = LiveClientGateway::new(&config.live_client_url, config.request_timeout)?;

    info!("Fetching {}{}", gateway.base_url(), resource.path());
    let value = gateway
        .fetch(&resource)
        .await
        .context("Live client request failed")?;

    let output = if resource == Resource::AllGameData && !raw_only {
        let snapshot = validate_snapshot(&value).context("Live client returned invalid data")?;
        let view = transform(&snapshot);
        info!(
            "{} players, {} events",
            view.all_players.len(),
            view.events.events.len()
        );
        serde_json::to_string_pretty(&view)?
    } else {
        serde_json::to_string_pretty(&value)?
    };

    println!("{}", output);
    Ok(())
}

/// Parse --summoner argument
fn parse_summoner(args: &[String]) -> Option<String> {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--summoner" || arg == "-s" {
            return args.get(i + 1).cloned();
        }
    }
    None
}

/// Whether the argument at `index` is the value of a preceding `--summoner`
fn is_flag_value(args: &[String], index: usize) -> bool {
    index > 0 && matches!(args[index - 1].as_str(), "--summoner" | "-s")
}
