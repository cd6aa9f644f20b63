//! sysmeta describe tool
//! ---------------------
//! Builds the system catalog from configuration and prints its tables or
//! the columns of one table.

use anyhow::{Context, Result};
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sysmeta::config::CatalogConfig;
use sysmeta::system_catalog::registry::{self, SystemCatalog};

const USAGE: &str = "sysmeta\n\nUSAGE:\n  sysmeta [--definitions-dir PATH] [--no-builtin] [--keys] [TABLE]\n\nOPTIONS:\n  --definitions-dir PATH  Extra table definitions (env: SYSMETA_DEFINITIONS_DIR)\n  --no-builtin            Skip the built-in information_schema tables (env: SYSMETA_BUILTIN)\n  --keys                  Print only the key columns of TABLE, in key order\n";

fn table_arg(args: &[String]) -> Option<&str> {
    let mut i = 1;
    while i < args.len() {
        let a = args[i].as_str();
        if a == "--definitions-dir" { i += 2; continue; }
        if !a.starts_with("--") { return Some(a); }
        i += 1;
    }
    None
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{}", USAGE);
        return Ok(());
    }

    let config = CatalogConfig::from_args(&args);
    info!(target: "sysmeta", "building catalog: builtin={}, definitions_dir={:?}", config.include_builtin, config.definitions_dir);
    let catalog = SystemCatalog::from_config(&config).context("building system catalog")?;
    registry::install(catalog);
    let catalog = registry::current();

    let Some(name) = table_arg(&args) else {
        for t in catalog.tables() {
            println!("{}\t{} columns", t.ident(), t.len());
        }
        return Ok(());
    };

    let table = catalog.lookup(name).with_context(|| format!("looking up {}", name))?;
    if args.iter().any(|a| a == "--keys") {
        for c in table.key_columns() {
            println!("{}\t{}", c.path().to_sql_string(), c.data_type());
        }
        return Ok(());
    }
    for row in table.describe() {
        let marker = if row.is_key { "\tkey" } else { "" };
        println!("{}\t{}\t{}{}", row.ordinal_position, row.column_name, row.data_type, marker);
    }
    Ok(())
}
