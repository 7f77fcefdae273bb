//! WanderLens binary: run the API server or try the travel helpers from a terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use wanderlens::actions::{
    ItineraryForm, TranslateForm, generate_itinerary_action, translate_caption_action,
};
use wanderlens::{
    AppState, Currency, ExpenseCategory, ExpenseTracker, GeminiModel, GenerativeModel,
    WanderLensConfig, logging, web,
};

#[derive(Parser, Debug)]
#[command(name = "wanderlens")]
#[command(version, about = "WanderLens travel photo sharing backend")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Config file; defaults to the platform config dir
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Debug logging for WanderLens itself
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the JSON API
    Serve {
        /// Overrides server.port
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },
    /// Generate a day-by-day itinerary and print its sections
    Itinerary {
        #[arg(short, long)]
        destination: String,
        #[arg(short, long)]
        preferences: String,
    },
    /// Translate a caption and its optional details
    Translate {
        #[arg(short, long)]
        language: String,
        #[arg(short, long)]
        caption: String,
        #[arg(long)]
        transport: Option<String>,
        #[arg(long)]
        food: Option<String>,
    },
    /// Total trip expenses given as category=amount pairs
    Expenses {
        #[arg(long, default_value = "USD")]
        currency: String,
        /// e.g. food=120.5 transport=40
        #[arg(value_name = "CATEGORY=AMOUNT")]
        entries: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = WanderLensConfig::load_from_path(args.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, args.verbose)?;

    match args.cmd {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let state = AppState::from_config(config)?;
            web::run(state).await
        }
        Command::Itinerary {
            destination,
            preferences,
        } => {
            let model = model(&config)?;
            let state = generate_itinerary_action(
                model.as_ref(),
                ItineraryForm {
                    destination,
                    preferences,
                },
            )
            .await;
            let view = state
                .data
                .ok_or_else(|| anyhow!(state.error.unwrap_or_default()))?;

            if let Some(intro) = &view.parsed.intro {
                println!("{intro}\n");
            }
            for section in &view.parsed.sections {
                println!("== {} ==", section.title);
                println!("{}\n", section.plain_body());
            }
            Ok(())
        }
        Command::Translate {
            language,
            caption,
            transport,
            food,
        } => {
            let model = model(&config)?;
            let state = translate_caption_action(
                model.as_ref(),
                TranslateForm {
                    target_language: language,
                    caption,
                    transport_details: transport,
                    food_details: food,
                },
            )
            .await;
            let output = state
                .data
                .ok_or_else(|| anyhow!(state.error.unwrap_or_default()))?;
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Command::Expenses { currency, entries } => {
            let currency: Currency = currency.parse()?;
            let mut tracker = ExpenseTracker::new(currency);
            for entry in &entries {
                let Some((id, raw)) = entry.split_once('=') else {
                    bail!("Expected CATEGORY=AMOUNT, got '{entry}'");
                };
                let category: ExpenseCategory = id.parse()?;
                tracker.set_amount(category, raw);
            }

            let summary = tracker.summary();
            for line in &summary.lines {
                println!("{:<20} {:>12}", line.label, line.formatted);
            }
            println!("{:<20} {:>12}", "Total", summary.formatted_total);
            Ok(())
        }
    }
}

fn model(config: &WanderLensConfig) -> Result<Arc<dyn GenerativeModel>> {
    let model = GeminiModel::from_config(&config.model)?;
    Ok(Arc::new(model))
}
