//! Avatar - Gravatar URL generator
//!
//! Usage:
//!   avatar url foo@bar.com --size 80          # Print an avatar URL
//!   avatar url '{"login":"ada"}' --json --field login
//!   avatar hash foo@bar.com                   # Print the digest only

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use avatar_core::config::{self, AvatarConfig};
use avatar_core::gravatar::{self, DEFAULT_FIELD, GravatarSource, ResolvedOptions};
use avatar_core::options::AvatarOptions;
use avatar_core::person::Person;

#[derive(Parser)]
#[command(name = "avatar")]
#[command(about = "Gravatar URL generator", long_about = None)]
struct Cli {
    /// Path to avatar.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the Gravatar URL for a person
    Url(Box<UrlArgs>),

    /// Print the normalized MD5 digest of a value
    Hash {
        /// Value to hash (usually an email address)
        value: String,
    },
}

#[derive(Args)]
struct UrlArgs {
    /// Field value (an email address by default), or a JSON object with --json
    value: String,

    /// Treat VALUE as a JSON person record
    #[arg(long)]
    json: bool,

    /// Person field to hash
    #[arg(long)]
    field: Option<String>,

    /// Image size in pixels
    #[arg(long, short)]
    size: Option<String>,

    /// Maximum rating (G, PG, R, X, any)
    #[arg(long, short)]
    rating: Option<String>,

    /// Default image: an http(s) URL or one of 404, mm, identicon, monsterid, wavatar, retro
    #[arg(long, short)]
    default: Option<String>,

    /// Default source URL, overriding the configured one
    #[arg(long)]
    default_source: Option<String>,

    /// Raw request option (KEY=VALUE), e.g. gravatar_size=120
    #[arg(long = "opt", value_name = "KEY=VALUE")]
    opts: Vec<String>,

    /// Output format
    #[arg(short = 'o', long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable text
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

/// Result of a `url` lookup, before formatting.
#[derive(Debug)]
struct UrlOutput {
    url: Option<String>,
    options: ResolvedOptions,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "avatar=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Url(args) => run_url(cli.config, *args),
        Commands::Hash { value } => run_hash(&value),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<AvatarConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let default_path = config::config_path()?;
            if !default_path.exists() {
                tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                return Ok(AvatarConfig::default());
            }
            default_path
        }
    };

    tracing::debug!(path = %path.display(), "loading config");
    config::parse_config(&path)
}

fn run_url(config_path: Option<PathBuf>, args: UrlArgs) -> Result<()> {
    let config = load_config(config_path)?;
    let output = resolve_url(&config, &args)?;
    println!("{}", render_url(&args, &output)?);
    Ok(())
}

fn request_options(config: &AvatarConfig, args: &UrlArgs) -> Result<AvatarOptions> {
    let mut request = AvatarOptions::from_pairs(&args.opts)?;
    if let Some(field) = &args.field {
        request.field = Some(field.clone());
    }
    if let Some(size) = &args.size {
        request = request.with_size(size.as_str());
    }
    if let Some(rating) = &args.rating {
        request = request.with_rating(rating.as_str());
    }
    if let Some(default) = &args.default {
        request = request.with_default(default.as_str());
    }
    Ok(config.options_for(&request))
}

fn resolve_url(config: &AvatarConfig, args: &UrlArgs) -> Result<UrlOutput> {
    let mut source = config.build_source()?;
    if let Some(default_source) = &args.default_source {
        source.set_default_source(default_source.as_str());
    }
    let options = request_options(config, args)?;

    let person: Box<dyn Person> = if args.json {
        let value: serde_json::Value =
            serde_json::from_str(&args.value).context("VALUE is not valid JSON")?;
        Box::new(value)
    } else {
        Box::new(single_field_person(&source, &options, &args.value))
    };

    let url = source.avatar_url_for(Some(person.as_ref()), &options)?;
    let options = source.resolve_options(Some(person.as_ref()), &options)?;
    Ok(UrlOutput { url, options })
}

/// A person holding only `value`, under whichever field will be hashed.
fn single_field_person(
    source: &GravatarSource,
    options: &AvatarOptions,
    value: &str,
) -> BTreeMap<String, String> {
    let field = options
        .field
        .as_deref()
        .or(source.default_field())
        .unwrap_or(DEFAULT_FIELD);

    let mut person = BTreeMap::new();
    person.insert(field.to_string(), value.to_string());
    person
}

fn render_url(args: &UrlArgs, output: &UrlOutput) -> Result<String> {
    match args.format {
        OutputFormat::Table => Ok(output
            .url
            .clone()
            .unwrap_or_else(|| "(no avatar)".to_string())),
        OutputFormat::Json => {
            let json = serde_json::json!({
                "input": args.value,
                "url": output.url,
                "options": output.options,
            });
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

fn run_hash(value: &str) -> Result<()> {
    let digest = gravatar::hash_value(value)
        .ok_or_else(|| anyhow::anyhow!("Cannot hash a blank value"))?;
    println!("{}", digest);
    Ok(())
}
