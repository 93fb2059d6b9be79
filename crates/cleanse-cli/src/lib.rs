//! CLI library components for the contact table cleanser.

pub mod logging;
pub mod pipeline;
