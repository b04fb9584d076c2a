// ultiscore entry point.
//
// 1. Initialize tracing (stderr; stdout carries the result)
// 2. Load config
// 3. Load every team's game log
// 4. Score the teams and price the batch
// 5. Print team → player → record as JSON

use std::io::Write;

use anyhow::Context;
use tracing::{info, warn};
use ultiscore_cli::{config, gamelog};
use ultiscore_core::pipeline::{self, PipelineError};
use ultiscore_core::pricing::PriceOutcome;

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("ultiscore starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: {} teams, degenerate pricing policy {:?}",
        config.teams.len(),
        config.pricing.degenerate
    );

    let base_dir = std::env::current_dir().context("failed to resolve working directory")?;
    let inputs =
        gamelog::load_team_inputs(&config, &base_dir).context("failed to load game logs")?;

    let league = match pipeline::score_league(&inputs, config.pricing.degenerate) {
        Ok(report) => {
            if !report.skipped.is_empty() {
                warn!("skipped teams: {}", report.skipped.join(", "));
            }
            if let PriceOutcome::Fallback { price, cause } = report.pricing {
                warn!("prices not scaled ({cause}); every player priced at {price}");
            }
            report.league
        }
        Err(PipelineError::Pricing { source, league }) => {
            // Scores are still worth emitting; prices stay at zero.
            warn!("pricing failed: {source}; prices left unset");
            *league
        }
        Err(e) => return Err(e).context("failed to score teams"),
    };

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &league).context("failed to write results")?;
    writeln!(stdout)?;

    info!("ultiscore finished");
    Ok(())
}

/// Initialize tracing to stderr so stdout stays machine-readable.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("ultiscore=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
