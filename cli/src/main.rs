mod config;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use manpage_core::{ManPage, validate_page};
use manpage_parser::batch::{collect_page_paths, parse_all};
use manpage_parser::output::{OutputFormat, format_pages};
use manpage_sqlite::{Migration, PageQuery, UpsertOutcome};

use crate::config::{Config, DEFAULT_PREFIX};

#[derive(Debug, Parser)]
#[command(name = "manpage-extract")]
#[command(about = "Extract name, synopsis and options from gzip-compressed man pages")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse man pages and print their metadata.
    Parse(ParseArgs),
    /// Print pages stored in the database under a program name.
    Show(ShowArgs),
    /// Parse man pages and report fields the heuristics could not fill.
    Check(CheckArgs),
    /// SQLite database migration operations.
    Migrate(MigrateArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Man page files (.gz) and/or directories containing them.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output format (default: text).
    #[arg(long)]
    format: Option<OutputFormat>,
    /// Store parsed pages in the database.
    #[arg(long)]
    persist: bool,
    /// Do not store pages, even if the config file enables it.
    #[arg(long, conflicts_with = "persist")]
    no_persist: bool,
    /// Database file path.
    #[arg(long)]
    db: Option<PathBuf>,
    /// Table prefix (default: mp_).
    #[arg(long)]
    prefix: Option<String>,
    /// Number of parallel parse jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// YAML config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Program name as extracted from the NAME section.
    name: String,
    /// Database file path.
    #[arg(long)]
    db: PathBuf,
    /// Table prefix.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Man page files (.gz) and/or directories containing them.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Number of parallel parse jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct MigrateArgs {
    #[command(subcommand)]
    operation: MigrateOperation,
}

#[derive(Debug, Subcommand)]
enum MigrateOperation {
    /// Create page tables in the database.
    Up(DatabaseArgs),
    /// Drop page tables from the database.
    Down(DatabaseArgs),
    /// Show table status and row counts.
    Status(DatabaseArgs),
}

#[derive(Debug, Args)]
struct DatabaseArgs {
    /// Database file path.
    #[arg(long)]
    db: PathBuf,
    /// Table prefix.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Show(args) => run_show(args),
        Command::Check(args) => run_check(args),
        Command::Migrate(args) => run_migrate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_parse(args: ParseArgs) -> Result<(), String> {
    let file_config = match &args.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    let config = file_config.merge(Config {
        database: args.db,
        prefix: args.prefix,
        format: args.format,
        jobs: args.jobs,
        persist: persist_override(args.persist, args.no_persist),
    });

    let (pages, failed) = parse_inputs(&args.inputs, config.jobs)?;

    let rendered = format_pages(&pages, config.format())?;
    if !rendered.is_empty() {
        println!("{}", rendered.trim_end());
    }

    if config.persist() {
        let db = config.database.as_deref().ok_or_else(|| {
            "--persist requires --db or 'database' in the config file".to_string()
        })?;
        persist_pages(db, config.prefix(), &pages)?;
    }

    if failed > 0 {
        return Err(format!(
            "{failed} of {} man page(s) failed to load",
            pages.len() + failed
        ));
    }

    Ok(())
}

fn run_show(args: ShowArgs) -> Result<(), String> {
    if !args.db.exists() {
        return Err(format!("Database '{}' does not exist", args.db.display()));
    }
    let conn = open_database(&args.db)?;
    let query = PageQuery::new(&conn, &args.prefix)
        .map_err(|e| format!("Failed to initialize query: {e}"))?;
    let pages = query
        .find_by_name(&args.name)
        .map_err(|e| format!("Failed to look up '{}': {e}", args.name))?;

    if pages.is_empty() {
        return Err(format!("No stored man page named '{}'", args.name));
    }

    println!("{}", format_pages(&pages, args.format)?.trim_end());
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let (pages, failed) = parse_inputs(&args.inputs, args.jobs)?;

    let mut flagged = 0usize;
    for page in &pages {
        let issues = validate_page(page);
        if issues.is_empty() {
            continue;
        }
        flagged += 1;
        for issue in issues {
            println!("{}: {issue}", page.path.display());
        }
    }

    println!(
        "Checked {} man page(s): {} clean, {flagged} with issues.",
        pages.len(),
        pages.len() - flagged
    );

    if failed > 0 || flagged > 0 {
        return Err(format!(
            "{flagged} page(s) with issues, {failed} page(s) failed to load"
        ));
    }
    Ok(())
}

fn run_migrate(args: MigrateArgs) -> Result<(), String> {
    match args.operation {
        MigrateOperation::Up(a) => run_migrate_up(a),
        MigrateOperation::Down(a) => run_migrate_down(a),
        MigrateOperation::Status(a) => run_migrate_status(a),
    }
}

fn run_migrate_up(args: DatabaseArgs) -> Result<(), String> {
    let mut migration = open_migration(&args.db, &args.prefix)?;
    migration
        .up()
        .map_err(|e| format!("Migration up failed: {e}"))?;
    println!(
        "Migration up complete. Tables created with prefix '{}' in '{}'.",
        args.prefix,
        args.db.display()
    );
    Ok(())
}

fn run_migrate_down(args: DatabaseArgs) -> Result<(), String> {
    let mut migration = open_migration(&args.db, &args.prefix)?;
    migration
        .down()
        .map_err(|e| format!("Migration down failed: {e}"))?;
    println!(
        "Migration down complete. Tables with prefix '{}' dropped from '{}'.",
        args.prefix,
        args.db.display()
    );
    Ok(())
}

fn run_migrate_status(args: DatabaseArgs) -> Result<(), String> {
    let migration = open_migration(&args.db, &args.prefix)?;
    let status = migration
        .status()
        .map_err(|e| format!("Failed to get migration status: {e}"))?;
    println!("Migration Status:");
    println!(
        "  Tables exist: {}",
        if status.tables_exist { "yes" } else { "no" }
    );
    println!("  Page count: {}", status.page_count);
    println!("  Option count: {}", status.option_count);
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parses every page under `inputs`, reporting load failures on stderr.
///
/// Returns the parsed pages in path order and the number of failures.
fn parse_inputs(inputs: &[PathBuf], jobs: Option<usize>) -> Result<(Vec<ManPage>, usize), String> {
    let paths = collect_page_paths(inputs).map_err(|e| e.to_string())?;
    let results = parse_all(&paths, jobs).map_err(|e| e.to_string())?;

    let mut pages = Vec::with_capacity(results.len());
    let mut failed = 0usize;
    for entry in results {
        match entry.result {
            Ok(page) => pages.push(page),
            Err(err) => {
                eprintln!("warning: {err}");
                failed += 1;
            }
        }
    }

    Ok((pages, failed))
}

/// Maps the `--persist`/`--no-persist` pair to a config override.
fn persist_override(persist: bool, no_persist: bool) -> Option<bool> {
    if no_persist {
        Some(false)
    } else {
        persist.then_some(true)
    }
}

fn persist_pages(db: &Path, prefix: &str, pages: &[ManPage]) -> Result<(), String> {
    let mut migration = open_migration(db, prefix)?;
    migration
        .up()
        .map_err(|e| format!("Migration up failed: {e}"))?;
    let conn = migration.into_connection();
    let query =
        PageQuery::new(&conn, prefix).map_err(|e| format!("Failed to initialize query: {e}"))?;

    let (mut inserted, mut updated, mut unchanged) = (0usize, 0usize, 0usize);
    for page in pages {
        let outcome = query.upsert_page(page).map_err(|e| {
            format!("Failed to store '{}': {e}", page.path.display())
        })?;
        match outcome {
            UpsertOutcome::Inserted { .. } => inserted += 1,
            UpsertOutcome::Updated { .. } => updated += 1,
            UpsertOutcome::Unchanged { .. } => unchanged += 1,
        }
    }

    eprintln!(
        "Stored {} page(s) in '{}': {inserted} inserted, {updated} updated, {unchanged} unchanged.",
        pages.len(),
        db.display()
    );
    Ok(())
}

fn open_database(db: &Path) -> Result<rusqlite::Connection, String> {
    rusqlite::Connection::open(db)
        .map_err(|e| format!("Failed to open database '{}': {e}", db.display()))
}

fn open_migration(db: &Path, prefix: &str) -> Result<Migration, String> {
    let conn = open_database(db)?;
    Migration::new(conn, prefix).map_err(|e| format!("Failed to initialize migration: {e}"))
}
