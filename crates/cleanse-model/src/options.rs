//! Configuration options for a cleanse run.

use serde::{Deserialize, Serialize};

/// Options controlling which optional passes the pipeline runs.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanseOptions {
    /// Re-run phone correction after the address merge.
    pub second_phone_pass: bool,

    /// Pull a valid email from another column before splitting the email column.
    pub correct_misplaced_emails: bool,

    /// Upper-case the postcode column after correction.
    pub uppercase_postcodes: bool,

    /// Check postcodes against per-country patterns after country normalization.
    pub country_postcode_check: bool,

    /// Allow cell values in log output.
    pub log_data: bool,
}

impl Default for CleanseOptions {
    fn default() -> Self {
        Self {
            second_phone_pass: true,
            correct_misplaced_emails: false,
            uppercase_postcodes: true,
            country_postcode_check: false,
            log_data: false,
        }
    }
}

impl CleanseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_second_phone_pass(mut self, enable: bool) -> Self {
        self.second_phone_pass = enable;
        self
    }

    pub fn with_email_correction(mut self, enable: bool) -> Self {
        self.correct_misplaced_emails = enable;
        self
    }

    pub fn with_uppercase_postcodes(mut self, enable: bool) -> Self {
        self.uppercase_postcodes = enable;
        self
    }

    pub fn with_country_postcode_check(mut self, enable: bool) -> Self {
        self.country_postcode_check = enable;
        self
    }

    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}
