//! End-to-end batch run: read → validate → generate → (optionally) write.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Component, Path, PathBuf},
};

use {
    skilldoc_config::SkilldocConfig,
    tracing::{info, warn},
};

use crate::{
    docgen::batch_generate_docs,
    error::{Error, Result},
    io::{batch_read, batch_write},
    types::{ContentMap, GeneratedDocument, ValidationVerdict, WriteOutcome},
    validate::batch_validate,
};

/// Everything a batch run produced, one entry per input location at each stage.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub records: ContentMap,
    pub verdicts: Vec<ValidationVerdict>,
    pub documents: BTreeMap<PathBuf, GeneratedDocument>,
    /// Empty when no output directory was configured.
    pub writes: Vec<WriteOutcome>,
}

impl PipelineReport {
    pub fn total(&self) -> usize {
        self.records.len()
    }

    pub fn read_count(&self) -> usize {
        self.records.values().filter(|r| r.is_loaded()).count()
    }

    pub fn valid_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_valid()).count()
    }

    pub fn failed_writes(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.writes.iter().filter(|w| !w.success())
    }
}

/// Output path for one input: `<output_dir>/<file stem>.md`.
pub fn destination_for(output_dir: &Path, location: &Path) -> PathBuf {
    let stem = location
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{stem}.md"))
}

/// Map every input location to its output path.
///
/// Fails when two inputs resolve to the same output, since the batch writer
/// requires distinct targets, or when an output would replace one of the inputs.
pub fn plan_destinations<'a, I>(
    output_dir: &Path,
    locations: I,
) -> Result<BTreeMap<PathBuf, PathBuf>>
where
    I: IntoIterator<Item = &'a Path>,
{
    let locations: Vec<&Path> = locations.into_iter().collect();
    let inputs: BTreeSet<PathBuf> = locations.iter().copied().map(lexical).collect();

    let mut claimed: BTreeMap<PathBuf, PathBuf> = BTreeMap::new();
    let mut plan = BTreeMap::new();
    for location in locations {
        let destination = destination_for(output_dir, location);
        if inputs.contains(&lexical(&destination)) {
            return Err(Error::DestinationIsInput {
                destination,
                location: location.to_path_buf(),
            });
        }
        if let Some(first) = claimed.get(&destination)
            && first != location
        {
            return Err(Error::DestinationCollision {
                destination,
                first: first.clone(),
                second: location.to_path_buf(),
            });
        }
        claimed.insert(destination.clone(), location.to_path_buf());
        plan.insert(location.to_path_buf(), destination);
    }
    Ok(plan)
}

/// `./a/./b.md` and `a/b.md` name the same file.
fn lexical(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Run the whole pipeline over `config.inputs`.
///
/// Per-file failures are reported inside the returned [`PipelineReport`]; only
/// a bad destination plan fails the call, and it does so before any I/O.
pub async fn run(config: &SkilldocConfig) -> Result<PipelineReport> {
    let plan = match &config.output_dir {
        Some(dir) => Some(plan_destinations(
            dir,
            config.inputs.iter().map(PathBuf::as_path),
        )?),
        None => None,
    };

    let records = batch_read(config.inputs.iter().cloned()).await;
    let verdicts = batch_validate(&records);
    let documents = batch_generate_docs(&verdicts);

    let writes = match plan {
        Some(plan) => {
            let entries = documents
                .values()
                .filter_map(|doc| {
                    plan.get(&doc.location)
                        .map(|dest| (dest.clone(), doc.text.clone()))
                })
                .collect();
            batch_write(entries).await
        },
        None => Vec::new(),
    };

    let report = PipelineReport {
        records,
        verdicts,
        documents,
        writes,
    };

    let failed_writes = report.failed_writes().count();
    if failed_writes > 0 {
        warn!(failed = failed_writes, "some documents could not be written");
    }
    info!(
        total = report.total(),
        read = report.read_count(),
        valid = report.valid_count(),
        documents = report.documents.len(),
        written = report.writes.len() - failed_writes,
        "batch complete"
    );

    Ok(report)
}
