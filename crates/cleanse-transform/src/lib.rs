//! Contact table cleansing.
//!
//! This crate provides the cleanse stages and the pipeline that runs them:
//!
//! - **normalize**: header and cell whitespace normalization
//! - **resolve**: alias-based column resolution
//! - **correct**: misplaced-value correction by swap
//! - **email**: primary/additional email splitting
//! - **address**: street address merging
//! - **parent**: parent duplicate removal
//! - **country**: country names to ISO alpha-3
//! - **postcode**: country-aware postcode checks
//! - **annotate**: per-field error columns
//! - **pipeline**: ordered step execution

pub mod address;
pub mod annotate;
pub mod context;
pub mod correct;
pub mod country;
pub mod email;
pub mod normalize;
pub mod parent;
pub mod pipeline;
pub mod postcode;
pub mod resolve;

pub use context::CleanseContext;
pub use correct::{Swap, correct_misplaced};
pub use pipeline::{
    CleansePipeline, CleanseStep, PipelineState, build_default_pipeline, cleanse,
};
pub use resolve::{resolve_column, resolve_field};
