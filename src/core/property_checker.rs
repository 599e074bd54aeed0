//! Field-selection checks run before shaping

use crate::core::shape::Shape;

/// Whether every name in a comma-separated field list is declared on `T`
///
/// Blank input means "no restriction" and is always valid. Matching is
/// case-insensitive and ignores whitespace around each name; an empty entry
/// (as in `"name,,age"`) never matches.
pub fn type_has_properties<T: Shape>(fields: Option<&str>) -> bool {
    unknown_properties::<T>(fields).is_empty()
}

/// The entries of a field list that `T` does not declare, in request order
pub fn unknown_properties<T: Shape>(fields: Option<&str>) -> Vec<String> {
    let Some(fields) = fields.map(str::trim).filter(|f| !f.is_empty()) else {
        return Vec::new();
    };

    fields
        .split(',')
        .map(str::trim)
        .filter(|field| !T::has_field(field))
        .map(str::to_string)
        .collect()
}
