//! Command-line interface for tokenweave.
//!
//! Usage:
//!   tokenweave build [--css <path>] [--docs <path>] [--w3c-dir <dir>]  - Write every artifact
//!   tokenweave css                                                    - Print the stylesheet
//!   tokenweave docs [--format json|yaml]                              - Print the documentation tables
//!   tokenweave resolve <token> [--mode <mode>]                        - Show how a token resolves

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use miette::{bail, Result};
use tokenweave::config::PipelineConfig;
use tokenweave::source::FileSource;
use tokenweave::{analyze, Analysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DocsFormat {
    Json,
    Yaml,
}

/// Design-token pipeline: layered variables in, CSS and token documentation out.
#[derive(Parser)]
#[command(name = "tokenweave", version, about)]
struct Cli {
    /// Configuration file (defaults to ./tokenweave.toml when present)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the stylesheet, documentation JSON and W3C token files
    Build {
        /// Override the stylesheet path
        #[arg(long)]
        css: Option<PathBuf>,
        /// Override the documentation JSON path
        #[arg(long)]
        docs: Option<PathBuf>,
        /// Override the W3C output directory
        #[arg(long)]
        w3c_dir: Option<PathBuf>,
    },

    /// Print the stylesheet
    Css,

    /// Print the documentation tables
    Docs {
        #[arg(long, value_enum, default_value = "json")]
        format: DocsFormat,
    },

    /// Show how a token resolves, hop by hop
    Resolve {
        /// Short id, variable id, flat id or custom-property name
        token: String,
        /// Mode id or mode name; defaults to the token's default mode
        #[arg(long)]
        mode: Option<String>,
    },
}

fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let mut config = PipelineConfig::load(cli.config.as_deref())?;
    let analysis = analyze(&FileSource::new(&config.layers))?;

    match cli.command {
        Commands::Build { css, docs, w3c_dir } => {
            if let Some(css) = css {
                config.output.css = css;
            }
            if let Some(docs) = docs {
                config.output.docs = docs;
            }
            if let Some(w3c_dir) = w3c_dir {
                config.output.w3c_dir = w3c_dir;
            }
            analysis.write_artifacts(&config.output)?;
        }
        Commands::Css => print!("{}", analysis.to_css()),
        Commands::Docs { format } => match format {
            DocsFormat::Json => println!("{}", analysis.to_json()?),
            DocsFormat::Yaml => print!("{}", analysis.to_yaml()?),
        },
        Commands::Resolve { token, mode } => print_resolution(&analysis, &token, mode.as_deref())?,
    }
    Ok(())
}

fn print_resolution(analysis: &Analysis, token: &str, mode: Option<&str>) -> Result<()> {
    let Some(resolution) = analysis.resolve(token, mode) else {
        bail!("no token matches '{token}'");
    };
    println!("{} ({:?})", resolution.value, resolution.outcome);
    for (step, hop) in resolution.chain.iter().enumerate() {
        let path = if hop.path.is_empty() {
            hop.name.clone()
        } else {
            format!("{}/{}", hop.path, hop.name)
        };
        println!("  {}. [{}] {} ({})", step + 1, hop.layer, hop.flat_id.css_property(), path);
    }
    Ok(())
}
