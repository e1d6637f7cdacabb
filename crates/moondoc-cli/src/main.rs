//! moondoc: CLI tool to build a static API site from Lua doc comment extractor output

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{debug, info};

use config::{CONFIG_FILE_NAME, Config};
use moondoc_core::{SymbolTable, render_signature};
use moondoc_hast::node_to_html;
use moondoc_site::{ApiContent, SiteBuilder};

/// Output directory when neither the flag nor the config names one
const DEFAULT_OUTPUT: &str = "build";

#[derive(Parser, Debug)]
#[command(name = "moondoc")]
#[command(about = "Build a static API site from Lua doc comment extractor output")]
#[command(version)]
#[command(after_help = "Examples:
  moondoc build api.json                   # Build the site into build/
  moondoc build api.json -o public -j4     # Custom output, 4 parallel jobs
  moondoc symbols api.json                 # List every linkable type name
  moondoc render-type '(number) -> string' # Render one signature
  moondoc init                             # Create moondoc.toml")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the API site
    Build {
        /// Extractor JSON files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to ./moondoc.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of parallel jobs (defaults to number of CPUs)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Print the symbol table
    Symbols {
        /// Extractor JSON files
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// URL prefix for documented classes
        #[arg(long, default_value = "/")]
        base_url: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render a single type signature
    RenderType {
        /// Signature text, e.g. "(number, string) -> boolean"
        signature: String,

        /// Extractor JSON files whose classes should be linked
        #[arg(short, long)]
        input: Vec<PathBuf>,

        /// Print the canonical text form instead of HTML
        #[arg(long)]
        text: bool,
    },

    /// Create a sample configuration file
    Init {
        /// Directory to write moondoc.toml into
        dir: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the JSON schema of the configuration file
    Schema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Build {
            inputs,
            output,
            config,
            jobs,
        } => build_site(&inputs, output, config.as_deref(), jobs),
        Commands::Symbols {
            inputs,
            base_url,
            json,
        } => print_symbols(&inputs, &base_url, json),
        Commands::RenderType {
            signature,
            input,
            text,
        } => render_type(&signature, &input, text),
        Commands::Init { dir, force } => init_config(dir.as_deref(), force),
        Commands::Schema => {
            println!("{}", Config::json_schema_string()?);
            Ok(())
        }
    }
}

/// Install the stderr log subscriber
fn init_logging(verbose: bool, quiet: bool) -> Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::ERROR
    } else {
        tracing::Level::INFO
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Build the site
///
/// Command-line flags override the configuration file.
fn build_site(
    inputs: &[PathBuf],
    output: Option<PathBuf>,
    config_path: Option<&Path>,
    jobs: Option<usize>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::load_from_dir(Path::new("."))?.unwrap_or_default(),
    };

    let mut options = config.site_options();
    if jobs.is_some() {
        options.parallel_jobs = jobs;
    }

    let out_dir = output
        .or_else(|| config.build.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let content = load_content(inputs)?;
    let result = SiteBuilder::new(content, options)
        .build(&out_dir)
        .context("Failed to build site")?;

    for file in &result.output_files {
        debug!(file = %file.display(), "Output");
    }
    info!(
        pages = result.pages.len(),
        files = result.output_files.len(),
        "Wrote site to {}",
        out_dir.display()
    );

    Ok(())
}

/// Print every linkable name with its URL
fn print_symbols(inputs: &[PathBuf], base_url: &str, json: bool) -> Result<()> {
    let content = load_content(inputs)?;
    let symbols = SymbolTable::build(&content.classes, base_url);

    if json {
        println!("{}", symbols.to_json()?);
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Name", "URL", "Link"]);
    for (name, dest) in symbols.iter() {
        let link = if dest.is_external() {
            "external"
        } else {
            "internal"
        };
        builder.push_record([name, dest.url(), link]);
    }

    let mut table = builder.build();
    table.with(Style::markdown());
    println!("{}", table);

    Ok(())
}

/// Render one signature to HTML or canonical text
fn render_type(signature: &str, inputs: &[PathBuf], text: bool) -> Result<()> {
    if text {
        let parsed = lua_type::parse(signature)
            .with_context(|| format!("Malformed type signature `{}`", signature))?;
        println!("{}", parsed);
        return Ok(());
    }

    let content = if inputs.is_empty() {
        ApiContent::default()
    } else {
        load_content(inputs)?
    };
    let symbols = SymbolTable::build(&content.classes, "/");
    let node = render_signature(signature, &symbols)?;
    println!("{}", node_to_html(&node));

    Ok(())
}

/// Write a sample moondoc.toml
fn init_config(dir: Option<&Path>, force: bool) -> Result<()> {
    let dir = dir.unwrap_or_else(|| Path::new("."));
    let path = dir.join(CONFIG_FILE_NAME);

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    fs::write(&path, Config::sample().to_toml_with_schema()?)
        .with_context(|| format!("Failed to write: {}", path.display()))?;

    info!("Created {}", path.display());
    Ok(())
}

fn load_content(inputs: &[PathBuf]) -> Result<ApiContent> {
    ApiContent::load(inputs).context("Failed to load API content")
}
