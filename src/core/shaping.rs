//! Data shaping: projecting resources down to the fields a client asked for

use crate::core::field::FieldValue;
use crate::core::shape::{FieldAccessor, Shape};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A resource projected onto a subset of its fields
///
/// Keys are canonical field names; iteration order is the order the fields
/// were requested in (or declaration order when none were requested).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapedEntity(IndexMap<String, FieldValue>);

impl ShapedEntity {
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Append (or replace) an entry, e.g. the `links` of a resource
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> IndexMap<String, FieldValue> {
        self.0
    }
}

impl From<ShapedEntity> for FieldValue {
    fn from(entity: ShapedEntity) -> Self {
        FieldValue::Object(entity.0)
    }
}

/// Resolve a comma-separated field list against `T`'s registry
///
/// Blank input selects every declared field. Names that match nothing are
/// skipped; callers validate the list with
/// [`type_has_properties`](crate::core::property_checker::type_has_properties)
/// before shaping. A field listed twice keeps its first position.
fn selected_fields<T: Shape>(fields: Option<&str>) -> Vec<&'static FieldAccessor<T>> {
    let Some(fields) = fields.map(str::trim).filter(|f| !f.is_empty()) else {
        return T::FIELDS.iter().collect();
    };

    let mut selected: Vec<&'static FieldAccessor<T>> = Vec::new();
    for accessor in fields.split(',').filter_map(T::find_field) {
        if !selected.iter().any(|s| s.name() == accessor.name()) {
            selected.push(accessor);
        }
    }
    selected
}

fn project<T: Shape>(source: &T, accessors: &[&'static FieldAccessor<T>]) -> ShapedEntity {
    ShapedEntity(
        accessors
            .iter()
            .map(|accessor| (accessor.name().to_string(), accessor.read(source)))
            .collect(),
    )
}

/// Shape a single resource
pub fn shape_data<T: Shape>(source: &T, fields: Option<&str>) -> ShapedEntity {
    project(source, &selected_fields::<T>(fields))
}

/// Shape every resource of a collection, preserving order
///
/// The field list is resolved once for the whole collection.
pub fn shape_collection<'a, T, I>(sources: I, fields: Option<&str>) -> Vec<ShapedEntity>
where
    T: Shape,
    I: IntoIterator<Item = &'a T>,
{
    let accessors = selected_fields::<T>(fields);
    sources
        .into_iter()
        .map(|source| project(source, &accessors))
        .collect()
}
