mod corpus;
mod error;
mod extract;
mod input;
mod pipeline;
mod rank;
mod report;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use settings::Settings;

#[derive(Parser)]
#[command(
    name = "persona_ranker",
    about = "Rank PDF pages and passages by relevance to a persona and job to be done"
)]
struct Cli {
    /// Directory holding persona.json and documents/
    #[arg(long, alias = "input_dir", default_value = "./input")]
    input_dir: PathBuf,
    /// Directory to write challenge1b_output.json into
    #[arg(long, alias = "output_dir", default_value = "./output")]
    output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::from_env()?;

    let summary = pipeline::run(&cli.input_dir, &cli.output_dir, &settings)?;
    summary.print();

    info!("Total processing time: {}", format_duration(t0.elapsed()));
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.2}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
