use clap::{Parser, Subcommand};
use incident_quiz::{
    config::{ArtifactsConfig, Config},
    models::Cause,
    quiz::QuizEngine,
};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "incident-quiz-cli")]
#[command(about = "Incident Quiz artifact tooling", long_about = None)]
struct Cli {
    /// Dataset artifact (defaults to the configured path)
    #[arg(short, long, env = "INCIDENT_QUIZ_DATASET")]
    dataset: Option<PathBuf>,

    /// Classifier artifact (defaults to the configured path)
    #[arg(short, long, env = "INCIDENT_QUIZ_MODEL")]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load both artifacts and summarise them
    Inspect,

    /// Print one random incident as the quiz page shows it
    Sample,

    /// Run the classifier on a specific incident
    Predict {
        #[arg(short, long)]
        event_id: String,

        #[arg(short, long)]
        aircraft_key: String,

        /// Score this guess as well ("Human error" or "Just bad luck")
        #[arg(short, long)]
        guess: Option<String>,
    },
}

fn artifacts(cli: &Cli) -> ArtifactsConfig {
    let mut artifacts = Config::load()
        .map(|c| c.artifacts)
        .unwrap_or_default();
    if let Some(path) = &cli.dataset {
        artifacts.dataset_path = path.clone();
    }
    if let Some(path) = &cli.model {
        artifacts.model_path = path.clone();
    }
    artifacts
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "incident_quiz=warn".into()),
        )
        .init();

    let artifacts = artifacts(&cli);
    let engine = QuizEngine::load(&artifacts)?;

    match cli.command {
        Commands::Inspect => {
            let model = engine.model();
            let summary = json!({
                "dataset": {
                    "path": artifacts.dataset_path,
                    "records": engine.dataset().len(),
                },
                "model": {
                    "path": artifacts.model_path,
                    "name": model.name,
                    "type": model.model_type.to_string(),
                    "trained_at": model.trained_at,
                    "n_features": model.n_features,
                    "format_version": model.format_version,
                },
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }

        Commands::Sample => {
            let (record, display) = engine.draw()?;
            println!("Incident {}", record.key);
            for feature in &display.features {
                println!("  {:<32} {}", feature.label, feature.value);
            }
        }

        Commands::Predict {
            event_id,
            aircraft_key,
            guess,
        } => {
            let record = engine
                .dataset()
                .find(&event_id, &aircraft_key)
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "no incident with event id {} and aircraft key {}",
                        event_id,
                        aircraft_key
                    )
                })?;
            let guess = guess.as_deref().map(Cause::parse_guess).transpose()?;

            let outcome = engine.evaluate(record, guess.unwrap_or(Cause::HumanError))?;
            let mut body = json!({
                "incident": record.key.to_string(),
                "prediction": outcome.prediction.to_string(),
                "confidence": outcome.confidence.to_string(),
                "reality": outcome.reality.to_string(),
                "model_correct": outcome.model_correct(),
                "report_url": &outcome.report_url,
            });
            if let (Some(_), Some(map)) = (guess, body.as_object_mut()) {
                map.insert("guess".to_string(), json!(outcome.guess.to_string()));
                map.insert("guess_correct".to_string(), json!(outcome.guess_correct()));
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }

    Ok(())
}
