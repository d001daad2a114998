use clap::{Parser, Subcommand};
use colored::Colorize;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cdcsink_core::{Config, Dialect, TableDescriptor, TypeRegistry};
use cdcsink_sql::{SqlSynthesizer, SqlVerifier};

/// Default config file looked up in the working directory
const DEFAULT_CONFIG: &str = "cdcsink.toml";

/// cdcsink - SQL synthesis for CDC replication sinks
#[derive(Parser)]
#[command(name = "cdcsink")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: cdcsink.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Target dialect: mysql, postgresql or oracle (overrides config)
    #[arg(short, long, global = true)]
    dialect: Option<Dialect>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print CREATE TABLE statements and auxiliary scripts
    Ddl {
        #[command(flatten)]
        source: TableSource,
    },

    /// Print sink DML statements with their bind order
    Dml {
        #[command(flatten)]
        source: TableSource,
    },

    /// Synthesize every table, verify syntax and summarize
    Check {
        #[command(flatten)]
        source: TableSource,
    },
}

#[derive(clap::Args)]
struct TableSource {
    /// Path to the schema dictionary (default: from config)
    #[arg(short = 'f', long)]
    dictionary: Option<PathBuf>,

    /// Only process this table
    #[arg(short, long)]
    table: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new(DEFAULT_CONFIG).exists() {
        Config::from_file(Path::new(DEFAULT_CONFIG))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    if let Some(dialect) = cli.dialect {
        config.dialect = dialect;
    }

    if cli.verbose {
        eprintln!("{} dialect: {}", "Using".cyan(), config.dialect);
    }
    tracing::debug!(dialect = %config.dialect, root = %config.project_root.display(), "configuration loaded");

    let registry = config
        .registry()
        .map_err(|e| anyhow::anyhow!("Invalid type mapping in config: {}", e))?;

    match cli.command {
        Commands::Ddl { source } => ddl_command(&config, &registry, &source),
        Commands::Dml { source } => dml_command(&config, &registry, &source),
        Commands::Check { source } => check_command(&config, &registry, &source, cli.verbose),
    }
}

/// Load the dictionary named on the command line or in the config, keeping
/// only the requested table
fn load_tables(config: &Config, source: &TableSource) -> Result<BTreeMap<u64, TableDescriptor>> {
    let path = source
        .dictionary
        .clone()
        .or_else(|| config.dictionary_path())
        .ok_or_else(|| {
            anyhow::anyhow!("No dictionary given. Pass --dictionary or set 'dictionary' in {}", DEFAULT_CONFIG)
        })?;

    let mut tables = cdcsink_dictionary::load(&path)
        .map_err(|e| anyhow::anyhow!("Failed to load dictionary: {}", e))?;

    tracing::info!(path = %path.display(), tables = tables.len(), "dictionary loaded");

    if let Some(name) = &source.table {
        tables.retain(|_, table| table.name().eq_ignore_ascii_case(name));
        if tables.is_empty() {
            return Err(anyhow::anyhow!(
                "Table '{}' not found in {}",
                name,
                path.display()
            ));
        }
    }

    Ok(tables)
}

/// Ddl command - print DDL for each table
fn ddl_command(config: &Config, registry: &TypeRegistry, source: &TableSource) -> Result<()> {
    let tables = load_tables(config, source)?;
    let synthesizer = SqlSynthesizer::new(registry);

    for (id, table) in &tables {
        let ddl = synthesizer.create_table(table, config.dialect)?;

        println!("{}", format!("-- {} (id {})", table.name(), id).dimmed());
        for statement in ddl.statements() {
            println!("{};", statement);
        }
        println!();
    }

    Ok(())
}

/// Dml command - print each statement with its tag and bind order
fn dml_command(config: &Config, registry: &TypeRegistry, source: &TableSource) -> Result<()> {
    let tables = load_tables(config, source)?;
    let synthesizer = SqlSynthesizer::new(registry);

    for (id, table) in &tables {
        let dml = synthesizer.generate_sink_sql(table, config.dialect)?;

        println!("{}", format!("-- {} (id {})", table.name(), id).dimmed());
        for (key, statement) in dml.iter() {
            println!("{}", format!("[{}]", key).bold());
            println!("{}", statement.sql);
            println!(
                "{} {}",
                "binds:".cyan(),
                statement.bind_columns().join(", ")
            );
        }
        println!();
    }

    Ok(())
}

/// Check command - synthesize and verify all tables
fn check_command(
    config: &Config,
    registry: &TypeRegistry,
    source: &TableSource,
    verbose: bool,
) -> Result<()> {
    let tables = load_tables(config, source)?;
    let synthesizer = SqlSynthesizer::new(registry);
    let verifier = SqlVerifier::for_dialect(config.dialect);

    let mut failed = 0;
    let mut warnings = 0;

    for table in tables.values() {
        let sql = match synthesizer.synthesize(table, config.dialect) {
            Ok(sql) => sql,
            Err(e) => {
                tracing::warn!(table = table.name(), error = %e, "synthesis failed");
                failed += 1;
                println!("{} {}", "✗".red(), e);
                continue;
            }
        };

        // The parser misses some vendor syntax, so rejections are only warnings
        let mut rejected = verifier.verify_ddl(&sql.ddl);
        rejected.extend(verifier.verify_dml(&sql.dml));

        if rejected.is_empty() {
            println!("{} {}", "✓".green(), table.name());
        } else {
            warnings += rejected.len();
            println!("{} {}", "⚠".yellow(), table.name());
            for error in &rejected {
                println!("    {}", error.to_string().yellow());
                if verbose {
                    eprintln!("{}", error.sql.dimmed());
                }
            }
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
    println!(
        "{} {} tables, {} failed, {} parser warnings ({})",
        "Summary:".bold(),
        tables.len(),
        failed,
        warnings,
        config.dialect
    );

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
