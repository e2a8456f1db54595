//! Builds the identity stack from configuration and runs commands against it.

use crate::{CliResult, Commands, output};

use pi_config::{Config, RemoteBackend};
use pi_remote::{HttpDirectory, RemoteDirectory, SqliteDirectory};
use pi_store::{FileIdentityStore, IdentityStore};
use pi_sync::{ProfileCache, Reconciler, ReconcilerSettings, ScopeController};

use std::sync::Arc;
use std::time::Duration;

use log::info;
use serde_json::{Value, json};

/// How often `watch` samples the snapshot for changes.
const WATCH_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub async fn open_directory(config: &Config) -> CliResult<Arc<dyn RemoteDirectory>> {
    let directory: Arc<dyn RemoteDirectory> = match config.remote.backend {
        RemoteBackend::Http => Arc::new(HttpDirectory::new(
            &config.remote.base_url,
            &config.remote.table,
            config.remote.api_key.as_deref(),
            config.remote.timeout(),
        )?),
        RemoteBackend::Sqlite => Arc::new(SqliteDirectory::connect(&config.database_path()).await?),
    };
    Ok(directory)
}

pub async fn build_reconciler(config: &Config) -> CliResult<Reconciler> {
    let settings = ReconcilerSettings::from_config(config)?;
    let store = Arc::new(FileIdentityStore::new(config.storage_dir()));
    let directory = open_directory(config).await?;
    let cache = ProfileCache::new(
        Arc::clone(&directory),
        config.retry.clone(),
        config.cache.refresh_interval(),
    );

    Ok(Reconciler::new(store, directory, cache, settings))
}

/// Run a one-shot command and return its JSON result.
///
/// `Watch` runs until interrupted and is handled by [`watch`].
pub async fn execute(command: &Commands, config: &Config) -> CliResult<Value> {
    match command {
        Commands::Status => status(config).await,
        Commands::Bootstrap => {
            let reconciler = build_reconciler(config).await?;
            Ok(output::snapshot_json(&reconciler.bootstrap().await))
        }
        Commands::Refetch => {
            let reconciler = build_reconciler(config).await?;
            reconciler.bootstrap().await;
            Ok(output::snapshot_json(&reconciler.refetch().await?))
        }
        Commands::Override { id } => {
            let reconciler = build_reconciler(config).await?;
            reconciler.bootstrap().await;
            Ok(output::snapshot_json(
                &reconciler.override_identity(*id).await?,
            ))
        }
        Commands::Watch => {
            let reconciler = build_reconciler(config).await?;
            Ok(output::snapshot_json(&reconciler.bootstrap().await))
        }
    }
}

async fn status(config: &Config) -> CliResult<Value> {
    let store = FileIdentityStore::new(config.storage_dir());
    let stored = store.get(&config.storage.identity_key).await?;

    Ok(json!({
        "identity_key": config.storage.identity_key,
        "stored": stored,
        "path": store.path().display().to_string(),
    }))
}

/// Bootstrap, keep the profile fresh and print each distinct snapshot until
/// Ctrl-C closes the scope.
pub async fn watch(config: &Config, pretty: bool) -> CliResult<()> {
    let reconciler = build_reconciler(config).await?;
    reconciler.bootstrap().await;

    let scope = ScopeController::new();
    let _refresh = reconciler.start_refresh(&scope);

    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    let mut ticker = tokio::time::interval(WATCH_POLL_INTERVAL);
    let mut last: Option<String> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let rendered = output::render(&output::snapshot_json(&reconciler.snapshot()), pretty)?;
                if last.as_deref() != Some(rendered.as_str()) {
                    println!("{rendered}");
                    last = Some(rendered);
                }
            }
            signal = &mut interrupt => {
                signal?;
                info!("Interrupted, closing scope");
                scope.close();
                break;
            }
        }
    }

    Ok(())
}
