//! Validation rules for contact fields.
//!
//! Rules are fixed per [`cleanse_model::FieldKind`]; [`validator_for`] is the
//! single mapping from kind to predicate.

mod country;
mod fields;
mod postcode;
mod sanitize;

pub use country::{CountryLookup, IsoCountryLookup};
pub use fields::{
    PhoneRegion, email_tokens, invalid_email_tokens, valid_email, valid_email_list,
    valid_email_strict, valid_landline, valid_phone, valid_phone_for_region, valid_postcode,
    validator_for,
};
pub use postcode::PostcodeMatcher;
pub use sanitize::{sanitize_identifier, sanitize_number, strip_alphabetic};
