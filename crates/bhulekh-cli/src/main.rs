//! Bhulekh CLI - RoR document extraction
//!
//! Usage:
//!   bhulekh extract <path>
//!   bhulekh extract --raw-text <path>
//!   bhulekh translit <text>

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use bhulekh_core::{AppConfig, Translator};
use bhulekh_extractor::{record, FieldExtractor};
use bhulekh_ocr::{TesseractConfig, TesseractEngine};
use bhulekh_translate::{GoogleTranslator, NoTranslation};
use bhulekh_translit::Transliterator;

#[derive(Parser)]
#[command(name = "bhulekh")]
#[command(about = "Extract structured fields from Odia Record of Rights documents")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract record fields from a scanned document
    Extract {
        /// PDF or image file (or recognized text with --raw-text)
        path: PathBuf,

        /// Treat the input as already-recognized text, skipping OCR
        #[arg(long)]
        raw_text: bool,

        /// Emit the record as JSON instead of key: value lines
        #[arg(long)]
        json: bool,

        /// Skip the translation call for the land-type field
        #[arg(long)]
        no_translate: bool,
    },
    /// Transliterate an Odia string to its Latin phonetic form
    Translit {
        /// Text in Odia script
        text: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    match cli.command {
        Commands::Extract {
            path,
            raw_text,
            json,
            no_translate,
        } => {
            let text = if raw_text {
                std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?
            } else {
                let engine = TesseractEngine::with_config(TesseractConfig::from(&config.ocr));
                bhulekh_ocr::recognize_document(&engine, &path, config.ocr.dpi)
                    .with_context(|| format!("recognizing {}", path.display()))?
            };
            tracing::info!(chars = text.chars().count(), "recognized text ready");

            let extractor = FieldExtractor::with_config(&config.extraction);
            let translit = Transliterator::new();
            let translator: Box<dyn Translator> = if no_translate || !config.translation.enabled {
                Box::new(NoTranslation)
            } else {
                Box::new(GoogleTranslator::from_config(&config.translation)?)
            };

            let record =
                record::extract_record(&text, &extractor, &translit, translator.as_ref()).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                for (key, value) in record.rows() {
                    println!("{key}: {value}");
                }
            }
        }
        Commands::Translit { text } => {
            println!("{}", Transliterator::new().transliterate(&text));
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}
