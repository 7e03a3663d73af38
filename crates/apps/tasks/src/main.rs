use app_state::load_app_settings;
use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use street_imagery::StreetImageSelector;
use tasks::task_runner::{BatchOptions, run_batch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Runs the street image selection for a city and prints one URL per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[clap(long, default_value = "Paris")]
    city: String,
    /// Ranked pool size, defaults to the configured limit.
    #[clap(long)]
    limit: Option<usize>,
    /// How many selections to run.
    #[clap(long, short, default_value_t = 1)]
    count: usize,
    /// Minimal composite score, defaults to the configured threshold.
    #[clap(long)]
    threshold: Option<f64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let settings = load_app_settings()?;

    let level = &settings.logging.level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("tasks={level},street_imagery={level},app_state={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    settings.report_problems();

    let selector =
        StreetImageSelector::connect(&settings.secrets.imagery_token, settings.imagery)?;
    let options = BatchOptions {
        limit: args.limit,
        quality_threshold: args.threshold,
        count: args.count,
    };
    let urls = run_batch(&selector, &args.city, &options).await;
    if urls.is_empty() {
        return Err(eyre!("No street image found for {:?}", args.city));
    }
    for url in urls {
        println!("{url}");
    }

    Ok(())
}
