//! Per-type field registries
//!
//! Every resource that can be shaped, sorted or field-checked declares its fields
//! once, in declaration order, as a static list of named accessors. Lookups by
//! name are case-insensitive. Use [`impl_shape!`](crate::impl_shape) to generate
//! the registry.

use crate::core::field::FieldValue;

/// A named, typed reader for one field of `T`
pub struct FieldAccessor<T> {
    name: &'static str,
    read: fn(&T) -> FieldValue,
}

impl<T> FieldAccessor<T> {
    /// Create an accessor; usable in `const` contexts
    pub const fn new(name: &'static str, read: fn(&T) -> FieldValue) -> Self {
        Self { name, read }
    }

    /// The canonical (declared) field name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Read the field off a source value
    pub fn read(&self, source: &T) -> FieldValue {
        (self.read)(source)
    }

    /// Case-insensitive name match, ignoring surrounding whitespace
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

/// A type with an explicit field registry
pub trait Shape: Sized + 'static {
    /// Human-readable shape name used in logs and errors
    const SHAPE_NAME: &'static str;

    /// Declared fields, in declaration order
    const FIELDS: &'static [FieldAccessor<Self>];

    /// Canonical names of all declared fields
    fn field_names() -> Vec<&'static str> {
        Self::FIELDS.iter().map(FieldAccessor::name).collect()
    }

    /// Find a field by case-insensitive name
    fn find_field(name: &str) -> Option<&'static FieldAccessor<Self>> {
        Self::FIELDS.iter().find(|field| field.matches(name))
    }

    /// Whether `name` is a declared field
    fn has_field(name: &str) -> bool {
        Self::find_field(name).is_some()
    }

    /// Read a field by case-insensitive name
    fn field_value(&self, name: &str) -> Option<FieldValue> {
        Self::find_field(name).map(|field| field.read(self))
    }
}
