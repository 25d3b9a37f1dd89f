//! company-typeahead CLI
//!
//! Query the company directory from the command line, validate directory
//! files, or run the interactive terminal form.

use clap::{Parser, Subcommand};
use company_typeahead::{logging, tui, CompanyDirectory, Config};
use console::style;
use std::path::{Path, PathBuf};

/// Company-name typeahead over a fixed directory
///
/// Case-insensitive substring search, with an optional manual-entry escape
/// hatch for companies that are not listed.
#[derive(Parser)]
#[command(name = "company-typeahead")]
#[command(version)]
#[command(about = "Company-name typeahead over a fixed directory", long_about = None)]
struct Cli {
    /// Configuration file (default: <config dir>/company-typeahead/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the companies whose name contains the query
    Search {
        /// Search text (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Directory JSON file (default: configured or builtin)
        #[arg(short, long)]
        directory: Option<PathBuf>,

        /// Print matches as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the whole directory
    List {
        /// Directory JSON file (default: configured or builtin)
        #[arg(short, long)]
        directory: Option<PathBuf>,
    },

    /// Load and validate a directory file
    Check {
        /// Directory JSON file
        path: PathBuf,
    },

    /// Run the interactive terminal form
    Form {
        /// Offer manual entry for unlisted companies
        #[arg(long)]
        free_text: bool,

        /// Directory JSON file (default: configured or builtin)
        #[arg(short, long)]
        directory: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Write the default configuration file if it does not exist
        #[arg(long)]
        init: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> company_typeahead::Result<()> {
    let config = match (&cli.command, cli.config.as_deref()) {
        // `config --init` may name a file that does not exist yet
        (Commands::Config { init: true }, Some(p)) if !p.exists() => Config::default(),
        (_, path) => Config::load(path)?,
    };

    if let Err(e) = logging::init(&config.logging) {
        eprintln!("{} logging disabled: {}", style("Warning:").yellow().bold(), e);
    }

    match cli.command {
        Commands::Search {
            query,
            directory,
            json,
        } => cmd_search(&config, directory.as_deref(), &query, json),

        Commands::List { directory } => cmd_list(&config, directory.as_deref()),

        Commands::Check { path } => cmd_check(&path),

        Commands::Form {
            free_text,
            directory,
        } => cmd_form(&config, directory.as_deref(), free_text),

        Commands::Config { init } => cmd_config(&config, cli.config.as_deref(), init),
    }
}

/// Directory from the command line, else the configured file, else builtin
fn load_directory(config: &Config, path: Option<&Path>) -> company_typeahead::Result<CompanyDirectory> {
    CompanyDirectory::load(path.or(config.directory.path.as_deref()))
}

fn cmd_search(
    config: &Config,
    directory: Option<&Path>,
    query: &str,
    json: bool,
) -> company_typeahead::Result<()> {
    let directory = load_directory(config, directory)?;
    let matches: Vec<_> = directory
        .filter(query)
        .into_iter()
        .filter_map(|i| directory.get(i))
        .collect();

    tracing::info!(query, matches = matches.len(), "search");

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("{} No companies match {:?}", style("!").yellow().bold(), query.trim());
        return Ok(());
    }

    for record in &matches {
        print_record(record);
    }
    println!();
    println!(
        "{} {} of {} companies",
        style("→").cyan().bold(),
        style(matches.len()).green(),
        directory.len()
    );
    Ok(())
}

fn cmd_list(config: &Config, directory: Option<&Path>) -> company_typeahead::Result<()> {
    let directory = load_directory(config, directory)?;
    for record in &directory {
        print_record(record);
    }
    println!();
    println!("{} {} companies", style("→").cyan().bold(), style(directory.len()).green());
    Ok(())
}

fn cmd_check(path: &Path) -> company_typeahead::Result<()> {
    let directory = CompanyDirectory::from_json_file(path)?;
    println!(
        "{} {}: {} companies",
        style("✓").green().bold(),
        path.display(),
        directory.len()
    );
    Ok(())
}

fn cmd_form(config: &Config, directory: Option<&Path>, free_text: bool) -> company_typeahead::Result<()> {
    let directory = load_directory(config, directory)?;
    let typeahead = config.typeahead_config(free_text.then_some(true));

    match tui::run(directory, typeahead)? {
        Some(submission) => println!("{}", serde_json::to_string_pretty(&submission)?),
        None => println!("{} Form abandoned", style("!").yellow().bold()),
    }
    Ok(())
}

fn cmd_config(config: &Config, explicit: Option<&Path>, init: bool) -> company_typeahead::Result<()> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::default_path);

    if init {
        if path.exists() {
            println!("{} {} already exists", style("!").yellow().bold(), path.display());
        } else {
            Config::default().save(&path)?;
            println!("{} Wrote {}", style("✓").green().bold(), path.display());
        }
    }

    println!("{} {}", style("#").dim(), style(path.display()).dim());
    println!("{} {}", style("# log file:").dim(), style(logging::log_path(&config.logging).display()).dim());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn print_record(record: &company_typeahead::CompanyRecord) {
    let region = record.region_label();
    if region.is_empty() {
        println!("  {:<8} {}", style(record.id.as_str()).dim(), style(&record.name).bold());
    } else {
        println!(
            "  {:<8} {}  {}",
            style(record.id.as_str()).dim(),
            style(&record.name).bold(),
            style(region).cyan()
        );
    }
}
