//! Semantic field kinds and the column-name aliases that resolve to them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Suffix appended to a field name to form its error column.
pub const ERROR_COLUMN_SUFFIX: &str = " Errors";

/// Column created for extra addresses split out of the email column.
pub const ADDITIONAL_EMAILS_COLUMN: &str = "Additional Emails";

/// Semantic category of a column, independent of its literal name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Identifier,
    Phone,
    Landline,
    Postcode,
    Email,
    AdditionalEmail,
    Address,
    Country,
    Parent,
}

impl FieldKind {
    pub const ALL: [FieldKind; 9] = [
        FieldKind::Identifier,
        FieldKind::Phone,
        FieldKind::Landline,
        FieldKind::Postcode,
        FieldKind::Email,
        FieldKind::AdditionalEmail,
        FieldKind::Address,
        FieldKind::Country,
        FieldKind::Parent,
    ];

    /// Lowercase column names that resolve to this kind.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Identifier => &["id", "usr_id", "user_id"],
            Self::Phone => &["phone", "phone number"],
            Self::Landline => &["landline"],
            Self::Postcode => &["post_code", "postcode", "postal_code", "zip_code", "pc"],
            Self::Email => &["email", "email address"],
            Self::AdditionalEmail => &["emails (additional)", "additional emails"],
            Self::Address => &["street address 1", "street address 2", "address", "address 2"],
            Self::Country => &["country"],
            Self::Parent => &["parent"],
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Identifier => "Identifier",
            Self::Phone => "Phone",
            Self::Landline => "Landline",
            Self::Postcode => "Postcode",
            Self::Email => "Email",
            Self::AdditionalEmail => "Additional Emails",
            Self::Address => "Address",
            Self::Country => "Country",
            Self::Parent => "Parent",
        }
    }

    /// Whether the kind has a validity predicate (and therefore an error column).
    pub fn is_validated(self) -> bool {
        matches!(
            self,
            Self::Phone | Self::Landline | Self::Postcode | Self::Email | Self::AdditionalEmail
        )
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// `"<field> Errors"`.
pub fn error_column_name(field: &str) -> String {
    format!("{field}{ERROR_COLUMN_SUFFIX}")
}

pub fn is_error_column(name: &str) -> bool {
    name.ends_with(ERROR_COLUMN_SUFFIX)
}
