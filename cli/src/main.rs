use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use sps_sqlite::{DATASTORE_ENV, Datastore, resolve_datastore_path};
use tracing_subscriber::EnvFilter;

mod output;

use output::{OutputFormat, format_shops};

#[derive(Debug, Parser)]
#[command(name = "sps")]
#[command(version, about = "Simple Products Search CLI")]
struct Cli {
    /// Path to the SQLite datastore file (overrides $DATASTORE and the default).
    #[arg(long, global = true)]
    datastore: Option<PathBuf>,
    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Suppress all logging.
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Manage shops.
    Shop(ShopArgs),
    /// Show datastore location and table status.
    Status,
}

#[derive(Debug, Args)]
struct ShopArgs {
    #[command(subcommand)]
    operation: ShopOperation,
}

#[derive(Debug, Subcommand)]
enum ShopOperation {
    /// List all shops.
    Ls(ListArgs),
    /// Create a new shop from a URL or hostname.
    Create(CreateArgs),
    /// Get details of a specific shop.
    Get(GetArgs),
    /// Delete a shop.
    Delete(DeleteArgs),
    /// Import shops from CSV or JSON files matching a glob pattern.
    Import(ImportArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct CreateArgs {
    /// URL or hostname of the shop.
    identifier: String,
    /// Custom slug for the shop (must already be lowercase kebab-case).
    #[arg(long)]
    slug: Option<String>,
    /// Display name of the shop.
    #[arg(long)]
    name: Option<String>,
}

#[derive(Debug, Args)]
struct GetArgs {
    /// Slug of the shop.
    slug: String,
    /// Output format.
    #[arg(long, default_value = "table")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct DeleteArgs {
    /// Slug of the shop.
    slug: String,
}

#[derive(Debug, Args)]
struct ImportArgs {
    /// File or glob pattern (e.g. 'exports/*.csv').
    pattern: String,
    /// Drop and recreate the shop table (without constraints) before loading.
    #[arg(long)]
    rebuild: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over flags.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if std::env::var_os("RUST_LOG").is_some() {
        EnvFilter::from_default_env()
    } else if quiet {
        EnvFilter::new("off")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("error")
    };

    // Only fails if a global subscriber is already set.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

fn run(cli: Cli) -> Result<(), String> {
    let env_value = std::env::var_os(DATASTORE_ENV);
    let path = resolve_datastore_path(cli.datastore.as_deref(), env_value.as_deref())
        .map_err(|e| format!("Failed to resolve datastore path: {e}"))?;
    let mut store = open_datastore(&path)?;

    match cli.command {
        Command::Shop(args) => run_shop(&mut store, args.operation),
        Command::Status => run_status(&store, &path),
    }
}

fn open_datastore(path: &Path) -> Result<Datastore, String> {
    Datastore::open(path)
        .map_err(|e| format!("Failed to open datastore '{}': {e}", path.display()))
}

// ---------------------------------------------------------------------------
// shop command
// ---------------------------------------------------------------------------

fn run_shop(store: &mut Datastore, operation: ShopOperation) -> Result<(), String> {
    match operation {
        ShopOperation::Ls(a) => run_shop_ls(store, a),
        ShopOperation::Create(a) => run_shop_create(store, a),
        ShopOperation::Get(a) => run_shop_get(store, a),
        ShopOperation::Delete(a) => run_shop_delete(store, a),
        ShopOperation::Import(a) => run_shop_import(store, a),
    }
}

fn run_shop_ls(store: &Datastore, args: ListArgs) -> Result<(), String> {
    let shops = store.registry().list().map_err(|e| e.to_string())?;
    if shops.is_empty() && args.format == OutputFormat::Table {
        println!("No shops found.");
        return Ok(());
    }
    print!("{}", with_trailing_newline(format_shops(&shops, args.format)?));
    Ok(())
}

fn run_shop_create(store: &Datastore, args: CreateArgs) -> Result<(), String> {
    let shop = store
        .registry()
        .create(&args.identifier, args.slug.as_deref(), args.name.as_deref())
        .map_err(|e| e.to_string())?;
    println!(
        "Shop with hostname '{}' has been created with slug '{}'.",
        shop.hostname, shop.slug
    );
    Ok(())
}

fn run_shop_get(store: &Datastore, args: GetArgs) -> Result<(), String> {
    let shop = store.registry().get(&args.slug).map_err(|e| e.to_string())?;
    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&shop).map_err(|e| e.to_string())?,
        OutputFormat::Table => format_shops(std::slice::from_ref(&shop), args.format)?,
    };
    print!("{}", with_trailing_newline(rendered));
    Ok(())
}

fn run_shop_delete(store: &Datastore, args: DeleteArgs) -> Result<(), String> {
    let deleted = store
        .registry()
        .delete(&args.slug)
        .map_err(|e| e.to_string())?;
    if deleted {
        println!("Shop with slug '{}' has been deleted.", args.slug);
    } else {
        println!("No shop found with slug '{}'.", args.slug);
    }
    Ok(())
}

fn run_shop_import(store: &mut Datastore, args: ImportArgs) -> Result<(), String> {
    let report = store
        .import(&args.pattern, args.rebuild)
        .map_err(|e| format!("Import failed: {e}"))?;
    for warning in &report.warnings {
        println!("{warning}");
    }
    println!("Imported data from {} file(s)", report.files_matched);
    Ok(())
}

// ---------------------------------------------------------------------------
// status command
// ---------------------------------------------------------------------------

fn run_status(store: &Datastore, path: &Path) -> Result<(), String> {
    let status = store
        .status()
        .map_err(|e| format!("Failed to get datastore status: {e}"))?;
    let yes_no = |flag: bool| if flag { "yes" } else { "no" };
    println!("Datastore: {}", path.display());
    println!("  Table exists: {}", yes_no(status.table_exists));
    println!("  Shop count: {}", status.shop_count);
    println!("  Constraints: {}", yes_no(status.constrained));
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
