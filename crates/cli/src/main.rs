use anyhow::{bail, Context as AnyhowContext, Result};
use chisel_directive::{Extractor, ExtractorConfig, Language};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

mod output;

#[derive(Parser)]
#[command(name = "chisel")]
#[command(about = "Find @ai directives and the functions they annotate", long_about = None)]
#[command(version)]
struct Cli {
    /// Source file to scan
    file: PathBuf,

    /// Grammar to parse with (detected from the file extension by default)
    #[arg(short, long)]
    language: Option<Language>,

    /// Token that marks a comment as a directive
    #[arg(long)]
    sentinel: Option<String>,

    /// TOML file with extractor settings; flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fail when the file has syntax errors
    #[arg(long)]
    strict: bool,

    /// Print directives as a JSON array
    #[arg(long)]
    json: bool,

    /// Show the instruction text instead of the raw comment block
    #[arg(long)]
    prompt: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.json {
        cli.quiet = true;
    }
    init_logging(&cli);

    let config = resolve_config(&cli)?;
    let sentinel = config.sentinel.clone();
    let extractor = Extractor::new(config).context("configuring extractor")?;

    let directives = extractor
        .extract_file(&cli.file)
        .with_context(|| format!("extracting directives from {}", cli.file.display()))?;
    log::info!("{}", Extractor::get_stats(&directives));

    let rendered = if cli.json {
        output::render_json(&extractor, &directives, cli.prompt)?
    } else if directives.is_empty() {
        format!("No {sentinel} directives found.")
    } else {
        output::render_text(&extractor, &cli.file, &directives, cli.prompt)
    };

    output::print_stdout(&rendered)
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn resolve_config(cli: &Cli) -> Result<ExtractorConfig> {
    let (mut config, config_sets_language) = match &cli.config {
        Some(path) => load_config(path)?,
        None => (ExtractorConfig::default(), false),
    };

    match cli.language {
        Some(language) => config.language = language,
        None if !config_sets_language => config.language = detect_language(&cli.file)?,
        None => {}
    }
    if let Some(sentinel) = &cli.sentinel {
        config.sentinel.clone_from(sentinel);
    }
    if cli.strict {
        config.reject_syntax_errors = true;
    }

    Ok(config)
}

/// Load a TOML config and report whether it names a language
fn load_config(path: &Path) -> Result<(ExtractorConfig, bool)> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let table: toml::Table =
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
    let sets_language = table.contains_key("language");
    let config: ExtractorConfig = toml::Value::Table(table)
        .try_into()
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok((config, sets_language))
}

fn detect_language(file: &Path) -> Result<Language> {
    let language = Language::from_path(file);
    if !language.is_supported() {
        bail!(
            "cannot detect language of {}; pass --language",
            file.display()
        );
    }
    Ok(language)
}
