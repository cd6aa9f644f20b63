//! Catalog bootstrap configuration.
//!
//! Resolution order is CLI flag, then environment variable, then default.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::{CatalogError, CatalogResult};

pub const ENV_BUILTIN: &str = "SYSMETA_BUILTIN";
pub const ENV_DEFINITIONS_DIR: &str = "SYSMETA_DEFINITIONS_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Register the built-in information_schema tables.
    pub include_builtin: bool,
    /// Directory of `*.json` table definitions, loaded in file-name order.
    pub definitions_dir: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self { include_builtin: true, definitions_dir: None }
    }
}

pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn parse_bool_env(name: &str) -> Option<bool> {
    env::var(name).ok().and_then(|v| parse_bool(&v))
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1)).cloned()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self::resolve(&[], parse_bool_env(ENV_BUILTIN), env::var(ENV_DEFINITIONS_DIR).ok())
    }

    /// Apply `--definitions-dir PATH` / `--no-builtin` on top of the environment.
    pub fn from_args(args: &[String]) -> Self {
        Self::resolve(args, parse_bool_env(ENV_BUILTIN), env::var(ENV_DEFINITIONS_DIR).ok())
    }

    fn resolve(args: &[String], env_builtin: Option<bool>, env_dir: Option<String>) -> Self {
        let defaults = Self::default();
        let arg_builtin = if has_flag(args, "--no-builtin") { Some(false) } else { None };
        let dir = arg_value(args, "--definitions-dir").or(env_dir).filter(|d| !d.trim().is_empty());
        Self {
            include_builtin: arg_builtin.or(env_builtin).unwrap_or(defaults.include_builtin),
            definitions_dir: dir.map(PathBuf::from).or(defaults.definitions_dir),
        }
    }

    /// `*.json` files under `definitions_dir`, sorted by file name.
    pub fn definition_files(&self) -> CatalogResult<Vec<PathBuf>> {
        let Some(dir) = &self.definitions_dir else { return Ok(Vec::new()) };
        list_json_files(dir)
    }
}

fn list_json_files(dir: &Path) -> CatalogResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| CatalogError::invalid_definition(dir.display().to_string(), e.to_string()))?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| p.extension().and_then(|s| s.to_str()).map(|e| e.eq_ignore_ascii_case("json")).unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}
