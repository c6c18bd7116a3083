use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deck_common::{DeckConfig, ThemeName};
use deck_core::{list_themes, save_plan, suggest_theme, GenerateRequest, PresentationGenerator};
use deck_pptx::PptxRenderer;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deckgen")]
#[command(about = "Generate themed PowerPoint decks from a topic with a language model")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Override model (e.g., gemini-2.0-flash, gpt-4o-mini)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Model provider: gemini | openai | stub
    #[arg(long, global = true)]
    pub provider: Option<String>,

    /// Directory generated decks are written to
    #[arg(long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Explicit config file (.toml or .json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a presentation for a topic
    Generate {
        /// Presentation topic
        topic: String,
        /// Extra guidance for the outline
        #[arg(short, long, default_value = "")]
        description: String,
        /// Theme name or a loose preference such as "corporate"
        #[arg(short, long)]
        theme: Option<String>,
        /// Approximate number of slides, e.g. 6 or 5-8
        #[arg(short, long)]
        slides: Option<String>,
        /// Print a JSON report instead of the path
        #[arg(long)]
        json: bool,
        /// Also write the deck plan as JSON next to the deck
        #[arg(long)]
        save_plan: bool,
    },
    /// List the available themes
    Themes {
        #[arg(long)]
        json: bool,
    },
    /// Suggest a theme for a topic
    SuggestTheme {
        topic: String,
        #[arg(long)]
        json: bool,
    },
    /// Page through a saved deck plan
    Preview {
        /// Path to a plan JSON written with --save-plan
        file: PathBuf,
    },
}

#[derive(Debug, Serialize)]
struct GenerateReport {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    download_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    theme: Option<ThemeName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    slide_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl GenerateReport {
    fn failure(error: &anyhow::Error) -> Self {
        Self {
            success: false,
            file_path: None,
            download_path: None,
            theme: None,
            slide_count: None,
            plan_path: None,
            error: Some(format!("{error:#}")),
        }
    }
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        std::env::set_var("RUST_LOG", "debug");
    }
    init_tracing();

    if let Some(model) = &cli.model {
        std::env::set_var("DECKGEN_MODEL", model);
    }

    if let Some(provider) = &cli.provider {
        std::env::set_var("DECKGEN_PROVIDER", provider);
    }

    if let Some(dir) = &cli.output_dir {
        std::env::set_var("DECKGEN_OUTPUT_DIR", dir);
    }

    match cli.command {
        Commands::Generate {
            topic,
            description,
            theme,
            slides,
            json,
            save_plan,
        } => {
            let request = GenerateRequest {
                topic,
                description,
                theme,
                slide_count: slides,
            };
            let outcome = generate(cli.config.as_deref(), &request, save_plan).await;
            if json {
                let rendered = match &outcome {
                    Ok(report) => serde_json::to_string_pretty(report)?,
                    Err(e) => serde_json::to_string_pretty(&GenerateReport::failure(e))?,
                };
                println!("{rendered}");
            }
            let report = outcome?;
            if !json {
                if let Some(path) = &report.file_path {
                    println!("{path}");
                }
                if let Some(plan) = &report.plan_path {
                    println!("{plan}");
                }
            }
        }
        Commands::Themes { json } => {
            let themes = list_themes();
            if json {
                println!("{}", serde_json::to_string_pretty(&themes)?);
            } else {
                for theme in themes {
                    println!("{:<13} {}", theme.key.as_ref(), theme.description);
                }
            }
        }
        Commands::SuggestTheme { topic, json } => {
            let config = load_config(cli.config.as_deref())?;
            let model = deck_llm::model_from_config(&config)?;
            let suggestion = suggest_theme(model.as_ref(), &topic).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&suggestion)?);
            } else {
                println!(
                    "{}: {}",
                    suggestion.suggested_theme, suggestion.theme_description
                );
            }
        }
        Commands::Preview { file } => {
            tokio::task::spawn_blocking(move || deck_tui::run_preview(&file)).await??;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<DeckConfig> {
    DeckConfig::load(explicit).context("failed to load configuration")
}

async fn generate(
    config_path: Option<&std::path::Path>,
    request: &GenerateRequest,
    with_plan: bool,
) -> Result<GenerateReport> {
    let config = load_config(config_path)?;
    tracing::debug!(provider = %config.provider, model = config.effective_model(), "using model");
    let model = deck_llm::model_from_config(&config)?;
    let generator = PresentationGenerator::from_config(&config, model, Arc::new(PptxRenderer::new()));

    let plan = generator.plan(request).await?;
    let deck = generator.render(&plan)?;
    let plan_path = if with_plan {
        Some(save_plan(&plan, generator.output_dir())?)
    } else {
        None
    };

    let download_path = std::fs::canonicalize(&deck.path).unwrap_or_else(|_| deck.path.clone());
    Ok(GenerateReport {
        success: true,
        file_path: Some(deck.path.display().to_string()),
        download_path: Some(download_path.display().to_string()),
        theme: Some(deck.theme),
        slide_count: Some(deck.slide_count),
        plan_path: plan_path.map(|p| p.display().to_string()),
        error: None,
    })
}
