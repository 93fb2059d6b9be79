//! Runtime context shared by all pipeline steps.

use std::sync::Arc;

use cleanse_model::CleanseOptions;
use cleanse_validate::{CountryLookup, IsoCountryLookup, PostcodeMatcher};

/// Placeholder logged instead of cell values unless data logging is enabled.
pub const REDACTED: &str = "[REDACTED]";

/// Options and lookup services for one cleanse run.
#[derive(Clone)]
pub struct CleanseContext {
    pub options: CleanseOptions,
    pub countries: Arc<dyn CountryLookup>,
    pub postcodes: PostcodeMatcher,
}

impl Default for CleanseContext {
    fn default() -> Self {
        Self::new(CleanseOptions::default())
    }
}

impl CleanseContext {
    pub fn new(options: CleanseOptions) -> Self {
        Self {
            options,
            countries: Arc::new(IsoCountryLookup::new()),
            postcodes: PostcodeMatcher::new(),
        }
    }

    pub fn with_country_lookup(mut self, lookup: Arc<dyn CountryLookup>) -> Self {
        self.countries = lookup;
        self
    }

    /// `value` when data logging is enabled, [`REDACTED`] otherwise.
    pub fn loggable<'a>(&self, value: &'a str) -> &'a str {
        if self.options.log_data { value } else { REDACTED }
    }
}
