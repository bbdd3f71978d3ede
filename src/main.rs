use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use signin_scout::{default_registry, render_detect_script, Detector, HtmlDocument, Registry};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "signin-scout")]
#[command(about = "Detects third-party OAuth sign-in options on login pages")]
#[command(version)]
struct Args {
    /// JSON provider registry to use instead of the built-in one
    #[arg(long, global = true)]
    registry: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the detection script for a browser console or automation tool
    Script,

    /// List supported providers and their domains
    Providers {
        /// Print the full registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect providers in a saved HTML page ("-" reads stdin)
    Scan {
        file: PathBuf,

        /// Page URL to record in the report
        #[arg(long)]
        url: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries command output, logs go to stderr
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    let custom_registry;
    let registry = match &args.registry {
        Some(path) => {
            custom_registry = Registry::load(path)?;
            info!("Loaded {} providers from {}", custom_registry.len(), path.display());
            &custom_registry
        }
        None => default_registry(),
    };

    match args.command {
        None => print_console_help(registry)?,
        Some(Command::Script) => println!("{}", render_detect_script(registry)?),
        Some(Command::Providers { json }) => print_providers(registry, json)?,
        Some(Command::Scan { file, url, format }) => scan(registry, &file, url, format)?,
    }

    Ok(())
}

fn print_console_help(registry: &Registry) -> Result<()> {
    println!("OAuth Provider Detection Script");
    println!("Usage: Execute this in browser console or via automation tool");
    println!();
    println!("Browser console code:");
    println!("{}", render_detect_script(registry)?);
    Ok(())
}

fn print_providers(registry: &Registry, json: bool) -> Result<()> {
    if json {
        println!("{}", registry.to_json_pretty()?);
        return Ok(());
    }
    println!("Supported providers:");
    for provider in registry {
        println!("• {}: {}", provider.name, provider.domains.join(", "));
    }
    Ok(())
}

fn scan(registry: &Registry, file: &Path, url: Option<String>, format: OutputFormat) -> Result<()> {
    let (markup, default_url) = read_page(file)?;
    let document = HtmlDocument::parse(url.unwrap_or(default_url), &markup);

    let report = Detector::new(registry).detect(&document);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print!("{}", report.format_text()),
    }
    Ok(())
}

/// Page markup plus the URL to report when none is given
fn read_page(file: &Path) -> Result<(String, String)> {
    if file.as_os_str() == "-" {
        let mut markup = String::new();
        std::io::stdin()
            .read_to_string(&mut markup)
            .context("Failed to read HTML from stdin")?;
        return Ok((markup, "stdin".to_string()));
    }

    let markup = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read HTML file: {}", file.display()))?;
    let absolute = file
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: {}", file.display()))?;
    Ok((markup, format!("file://{}", absolute.display())))
}
