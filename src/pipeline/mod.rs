//! Importer pipeline for fetched documents
//!
//! This module contains:
//! - `PipelineContext`, the per-document state handed to each stage
//! - `ImporterStage` and `ImporterPipeline`, the stage abstraction and runner
//! - `FetchStage`, which retrieves and classifies the document
//! - `process_references`, a concurrent driver running one pipeline per URL
//! - `run_fetch`, which wires the HTTP collaborators from a `Config`

mod context;
mod driver;
mod fetch_stage;
mod run;
mod stage;

pub use context::{Collaborators, PipelineContext};
pub use driver::{process_references, ProcessedReference};
pub use fetch_stage::{FetchOutcome, FetchStage};
pub use run::{run_fetch, RunReport};
pub use stage::{ImporterPipeline, ImporterStage};
