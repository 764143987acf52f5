//! Converts lines read from stdin into a target language variant.

use std::io::{
    BufRead,
    Write,
};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use language_conversion::config::ConfigManager;
use language_conversion::{
    ConversionRegistry,
    LanguageFactory,
};
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Language variant to write (e.g. `zh-tw`).
    target: String,

    /// Language variant the input is written in (e.g. `zh-cn`).
    #[arg(long)]
    source: Option<String>,

    /// Directory holding `.language-conversion.json`.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config_manager = ConfigManager::new();
    config_manager.load_settings(args.config).context("Failed to load conversion settings")?;

    let factory = LanguageFactory::new(config_manager.get_settings());
    let registry = ConversionRegistry::new();
    let source = args.source.as_deref().map(|code| factory.language(code));
    let language = registry.resolve(&factory.language(&args.target), source.as_ref())?;

    let lines = std::io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?;
    for line in &lines {
        language.prepare_for_translate(line)?;
    }

    let mut stdout = std::io::stdout().lock();
    for line in &lines {
        writeln!(stdout, "{}", language.translate(line)?)?;
    }

    Ok(())
}
