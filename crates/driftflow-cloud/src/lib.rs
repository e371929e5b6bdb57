//! driftflow drift detection core
//!
//! This crate holds the provider-independent half of driftflow: the
//! [`DriftProvider`] trait, stack enumeration and selection, the drift
//! detection orchestrator, and the JSON-lines output files.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 driftflow CLI                    │
//! │             (driftflow detect/list)              │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               driftflow-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │           DriftDetector                   │   │
//! │  │  select → trigger → write → poll → write  │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │     trait DriftProvider { ... }           │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼────────┐
//!           │ cloudformation │
//!           │    provider    │
//!           └────────────────┘
//! ```

pub mod detector;
pub mod error;
pub mod model;
pub mod output;
pub mod provider;
pub mod stacks;

// Re-exports
pub use detector::{DriftDetector, TriggerOutcome, TriggerPhase};
pub use error::{CloudError, Result};
pub use model::{
    DetectionRequests, DetectionResult, DetectionStatus, DetectionStatusReport, RunSummary,
    StackDriftStatus, StackPage, StackSummary,
};
pub use output::{OutputPaths, write_json_line};
pub use provider::{DriftProvider, PollConfig};
pub use stacks::{
    StackSelection, fetch_all_stacks, filter_stack_names, list_all_stacks, parse_stack_lines,
    read_stack_file, resolve_stack_names,
};
