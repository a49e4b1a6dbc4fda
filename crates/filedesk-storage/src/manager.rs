//! Store selection from configuration.

use std::sync::Arc;

use tracing::info;

use filedesk_core::config::StorageConfig;
use filedesk_core::error::AppError;
use filedesk_core::result::AppResult;
use filedesk_entity::LocationTable;

use crate::seed::default_snapshot;
use crate::store::EntityStore;

/// Open the store named by `config.provider`.
///
/// Seed data, when enabled, has its paths derived with the configured
/// location table so seeded files obey the same rule as uploaded ones.
pub fn open_store(config: &StorageConfig) -> AppResult<Arc<dyn EntityStore>> {
    let seed = config
        .seed_defaults
        .then(|| default_snapshot(&LocationTable::from_rules(&config.locations)));

    let store: Arc<dyn EntityStore> = match config.provider.as_str() {
        "memory" => {
            info!("Initializing in-memory entity store");
            match seed {
                Some(seed) => Arc::new(crate::providers::MemoryStore::with_seed(seed)),
                None => Arc::new(crate::providers::MemoryStore::new()),
            }
        }
        #[cfg(feature = "json")]
        "json" => {
            info!(
                data_root = %config.data_root,
                namespace = %config.namespace,
                "Initializing JSON document entity store"
            );
            Arc::new(crate::providers::JsonFileStore::new(
                &config.data_root,
                &config.namespace,
                seed,
            ))
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown storage provider: '{other}'. Supported: memory, json"
            )));
        }
    };

    Ok(store)
}
