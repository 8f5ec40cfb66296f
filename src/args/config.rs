//! Config subcommands: init, get, set and recipe.

use std::path::Path;

use satchel::config::ConfigStore;
use satchel::paths;

use super::CliResult;

fn open(data_dir: &Path) -> ConfigStore {
    ConfigStore::open_or_exit(paths::config_path(data_dir))
}

/// What: Create or heal the config document and print where it lives.
///
/// # Errors
/// - None in practice; persistence failures exit the process
pub fn handle_init(data_dir: &Path) -> CliResult {
    let store = open(data_dir);
    tracing::info!(path = %store.path().display(), "[Cli] Config ready");
    println!("{}", store.path().display());
    Ok(())
}

/// What: Print the YAML value at `key_path`.
///
/// # Errors
/// - When nothing is stored at `key_path` or the value cannot be rendered
pub fn handle_get(data_dir: &Path, key_path: &str) -> CliResult {
    let store = open(data_dir);
    let value = store
        .get(key_path)
        .ok_or_else(|| format!("no value at '{key_path}'"))?;
    print!("{}", serde_norway::to_string(value)?);
    Ok(())
}

/// What: Parse `raw` as YAML and store it at `key_path`.
///
/// # Errors
/// - When `raw` is not valid YAML or `key_path` is malformed
pub fn handle_set(data_dir: &Path, key_path: &str, raw: &str) -> CliResult {
    let value: serde_norway::Value = serde_norway::from_str(raw)?;
    let mut store = open(data_dir);
    store.set_or_exit(key_path, value)?;
    println!("{key_path} updated");
    Ok(())
}

/// What: Print the recipe shape followed by the ingredient legend.
///
/// # Errors
/// - None in practice; persistence failures exit the process
pub fn handle_recipe(data_dir: &Path) -> CliResult {
    let recipe = open(data_dir).recipe();
    for row in &recipe.shape {
        println!("{row}");
    }
    for (symbol, kind) in &recipe.ingredients {
        println!("{symbol} = {kind}");
    }
    Ok(())
}
