//! Concurrent filesystem fan-out: every location is dispatched at once and the
//! call resolves only after all of them settle.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
};

use {
    futures::future::join_all,
    tracing::{debug, warn},
};

use crate::{
    error::{Context, Result},
    types::{ContentMap, ContentRecord, WriteOutcome},
};

/// Read every location as UTF-8 text.
///
/// Never fails as a whole: a missing or unreadable file yields a record with
/// no content. Duplicate locations collapse into one record.
pub async fn batch_read<I, P>(locations: I) -> ContentMap
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let unique: BTreeSet<PathBuf> = locations.into_iter().map(Into::into).collect();
    let tasks = unique.into_iter().map(|location| async move {
        match tokio::fs::read_to_string(&location).await {
            Ok(content) => {
                debug!(path = %location.display(), bytes = content.len(), "read config");
                ContentRecord::loaded(location, content)
            },
            Err(e) => {
                warn!(path = %location.display(), error = %e, "failed to read config");
                ContentRecord::failed(location, e.to_string())
            },
        }
    });

    join_all(tasks)
        .await
        .into_iter()
        .map(|record| (record.location.clone(), record))
        .collect()
}

/// Write each entry, creating parent directories and overwriting existing files.
///
/// Returns one outcome per entry; a failed write never aborts its siblings.
pub async fn batch_write(entries: BTreeMap<PathBuf, String>) -> Vec<WriteOutcome> {
    let tasks = entries.into_iter().map(|(location, content)| async move {
        match write_one(&location, &content).await {
            Ok(()) => {
                debug!(path = %location.display(), bytes = content.len(), "wrote document");
                WriteOutcome::written(location)
            },
            Err(e) => {
                warn!(path = %location.display(), error = %e, "failed to write document");
                WriteOutcome::failed(location, e.to_string())
            },
        }
    });

    join_all(tasks).await
}

/// Probe each location for existence. Probe errors count as missing.
pub async fn batch_exists<I, P>(locations: I) -> BTreeMap<PathBuf, bool>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let unique: BTreeSet<PathBuf> = locations.into_iter().map(Into::into).collect();
    let tasks = unique.into_iter().map(|location| async move {
        let exists = tokio::fs::try_exists(&location).await.unwrap_or(false);
        (location, exists)
    });

    join_all(tasks).await.into_iter().collect()
}

async fn write_one(location: &Path, content: &str) -> Result<()> {
    if let Some(parent) = location.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tokio::fs::write(location, content)
        .await
        .with_context(|| format!("failed to write {}", location.display()))
}
