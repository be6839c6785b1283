//! Batch pipeline for skill configuration files.
//!
//! Locations are read concurrently ([`io::batch_read`]), each record is checked
//! against the skill config schema ([`validate::batch_validate`]), and every
//! verdict is rendered into a markdown document ([`docgen::batch_generate_docs`]).
//! Per-file failures are carried as data so one bad file never stops the batch.

pub mod docgen;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod types;
pub mod validate;

pub use {
    error::{Error, Result},
    pipeline::{PipelineReport, run},
    types::{
        ConfigMetadata, ContentMap, ContentRecord, DocumentKind, GeneratedDocument, SkillConfig,
        ValidationVerdict, Verdict, WriteOutcome,
    },
};
