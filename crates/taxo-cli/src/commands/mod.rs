//! CLI command implementations
//!
//! Each subcommand group has its own module with `run`-style functions.

pub mod build;
pub mod info;
pub mod lineage;
pub mod lookup;
pub mod subset;
pub mod traverse;

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::progress::create_spinner;
use taxo_core::{TableStore, Taxonomy};
use tracing::debug;

/// Load the taxonomy tables on a blocking worker
pub async fn load_taxonomy(config: &Config) -> Result<Taxonomy> {
    let store = TableStore::new(config.resource_dir()).with_verification(config.verify_checksums);
    if !store.exists() {
        return Err(CliError::ResourcesMissing(store.dir().to_path_buf()));
    }

    debug!(dir = %store.dir().display(), verify = config.verify_checksums, "Loading tables");
    let spinner = create_spinner("Loading taxonomy tables");
    let loaded = tokio::task::spawn_blocking(move || store.load()).await;
    spinner.finish_and_clear();

    Ok(Taxonomy::new(loaded??))
}
