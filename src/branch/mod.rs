//! Branch layer: loading package lists and comparing them
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌─────────────┐
//! │    Source    │────▶│ PackageCollection │────▶│    Diff     │
//! │   (fetch)    │     │   (per branch)    │     │  (compare)  │
//! └──────────────┘     └───────────────────┘     └─────────────┘
//!        │                                              │
//!        ▼                                              ▼
//! ┌──────────────┐                               ┌─────────────┐
//! │   Sources    │                               │    Sink     │
//! │(rdb,snapshot)│                               │  (report)   │
//! └──────────────┘                               └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`diff`]: left-only, right-only and upgraded package reports
//! - [`error`]: Error types for sources, sinks and configuration
//! - [`sink`]: Report sink trait and JSON file implementation
//! - [`source`]: Source trait for fetching branch exports
//! - [`sources`]: Concrete sources (rdb HTTP API, snapshot files)
//! - [`types`]: `Package`, `BranchExport` and `PackageCollection`

pub mod diff;
pub mod error;
pub mod sink;
pub mod source;
pub mod sources;
pub mod types;
