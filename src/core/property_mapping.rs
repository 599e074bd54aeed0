//! Sortable-property mapping between output shapes and backing entities
//!
//! Clients sort by the fields of the shape they see (e.g. `AuthorDto.age`),
//! while storage sorts by entity fields (e.g. `Author.dateOfBirth`). A
//! [`PropertyMapping`] translates one into the other; a single client field can
//! map to several backing fields, and `revert` flips the direction for fields
//! whose natural orders are opposite (ascending age is descending birth date).
//!
//! All mappings live in a [`PropertyMappingService`] that is built once at
//! startup, validated against both shapes' field registries, and then shared
//! read-only.

use crate::core::shape::Shape;
use std::any::TypeId;
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while registering or using property mappings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// No mapping was registered for the shape pair (configuration defect)
    #[error("no property mapping registered from '{source_shape}' to '{destination_shape}'")]
    NotFound {
        source_shape: &'static str,
        destination_shape: &'static str,
    },

    /// A mapping names a destination field the destination shape lacks
    #[error("property mapping '{source_shape}.{field}' targets unknown field '{destination_shape}.{destination_field}'")]
    UnknownDestinationField {
        source_shape: &'static str,
        destination_shape: &'static str,
        field: String,
        destination_field: String,
    },

    /// A mapping key is not a field of the source shape
    #[error("property mapping key '{field}' is not a field of '{source_shape}'")]
    UnknownSourceField {
        source_shape: &'static str,
        field: String,
    },

    /// A mapping value has no destination fields
    #[error("property mapping value has no destination fields")]
    EmptyDestination,

    /// The ordering clause names an unknown field or direction
    #[error("invalid orderBy clause '{clause}': {reason}")]
    InvalidOrderBy { clause: String, reason: String },
}

impl MappingError {
    /// Whether the error is a defect in the mapping table rather than in a request
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, MappingError::InvalidOrderBy { .. })
    }
}

/// The backing fields one client-facing field sorts by
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMappingValue {
    destination_properties: Vec<String>,
    revert: bool,
}

impl PropertyMappingValue {
    /// Create a mapping value; the destination list must not be empty
    pub fn new<I, S>(destination_properties: I, revert: bool) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let destination_properties: Vec<String> =
            destination_properties.into_iter().map(Into::into).collect();
        if destination_properties.is_empty() {
            return Err(MappingError::EmptyDestination);
        }
        Ok(Self {
            destination_properties,
            revert,
        })
    }

    pub fn destination_properties(&self) -> &[String] {
        &self.destination_properties
    }

    pub fn revert(&self) -> bool {
        self.revert
    }
}

/// One resolved sort column on the destination shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortColumn {
    pub field: String,
    pub descending: bool,
}

impl SortColumn {
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// Stable sort of `items` by resolved columns, left to right
///
/// Columns naming a field `T` does not declare are ignored.
pub fn sort_by_columns<T: Shape>(items: &mut [T], columns: &[SortColumn]) {
    if columns.is_empty() {
        return;
    }
    items.sort_by(|a, b| {
        for column in columns {
            let (Some(left), Some(right)) = (a.field_value(&column.field), b.field_value(&column.field))
            else {
                continue;
            };
            let ordering = left.compare(&right);
            let ordering = if column.descending { ordering.reverse() } else { ordering };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
}

/// A registered mapping from one shape's fields to another's
#[derive(Debug, Clone)]
pub struct PropertyMapping {
    source_shape: &'static str,
    destination_shape: &'static str,
    /// Keyed by lowercase source field name
    mappings: HashMap<String, PropertyMappingValue>,
}

impl PropertyMapping {
    pub fn source_shape(&self) -> &'static str {
        self.source_shape
    }

    pub fn destination_shape(&self) -> &'static str {
        self.destination_shape
    }

    /// Look up a source field, case-insensitively
    pub fn get(&self, source_field: &str) -> Option<&PropertyMappingValue> {
        self.mappings.get(&source_field.trim().to_lowercase())
    }

    pub fn contains(&self, source_field: &str) -> bool {
        self.get(source_field).is_some()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Resolve an ordering clause such as `"name, age desc"` into sort columns
    ///
    /// Each entry is `field` optionally followed by `asc` or `desc`. Every
    /// destination field of the matched mapping becomes one column whose
    /// direction is the requested direction flipped when the mapping reverts.
    /// A blank clause resolves to no columns.
    pub fn resolve(&self, order_by: Option<&str>) -> Result<Vec<SortColumn>, MappingError> {
        let Some(clause) = order_by.map(str::trim).filter(|c| !c.is_empty()) else {
            return Ok(Vec::new());
        };

        let mut columns = Vec::new();
        for entry in clause.split(',') {
            let (field, descending) = parse_order_entry(clause, entry)?;
            let value = self.get(field).ok_or_else(|| MappingError::InvalidOrderBy {
                clause: clause.to_string(),
                reason: format!("'{}' is not a sortable field of {}", field, self.source_shape),
            })?;

            columns.extend(value.destination_properties().iter().map(|destination| {
                SortColumn {
                    field: destination.clone(),
                    descending: descending ^ value.revert(),
                }
            }));
        }
        Ok(columns)
    }
}

fn parse_order_entry<'a>(clause: &str, entry: &'a str) -> Result<(&'a str, bool), MappingError> {
    let invalid = |reason: String| MappingError::InvalidOrderBy {
        clause: clause.to_string(),
        reason,
    };

    let mut segments = entry.split_whitespace();
    let field = segments
        .next()
        .ok_or_else(|| invalid("empty ordering entry".to_string()))?;

    let descending = match segments.next() {
        None => false,
        Some(direction) if direction.eq_ignore_ascii_case("desc") => true,
        Some(direction) if direction.eq_ignore_ascii_case("asc") => false,
        Some(direction) => {
            return Err(invalid(format!("unknown sort direction '{}'", direction)));
        }
    };

    if let Some(extra) = segments.next() {
        return Err(invalid(format!("unexpected '{}' after '{}'", extra, field)));
    }

    Ok((field, descending))
}

/// Immutable registry of all property mappings, one per shape pair
#[derive(Debug, Default)]
pub struct PropertyMappingService {
    mappings: HashMap<(TypeId, TypeId), PropertyMapping>,
}

impl PropertyMappingService {
    pub fn builder() -> PropertyMappingServiceBuilder {
        PropertyMappingServiceBuilder::default()
    }

    /// Get the mapping registered for `S -> D`
    pub fn get_property_mapping<S: Shape, D: Shape>(
        &self,
    ) -> Result<&PropertyMapping, MappingError> {
        self.mappings
            .get(&(TypeId::of::<S>(), TypeId::of::<D>()))
            .ok_or(MappingError::NotFound {
                source_shape: S::SHAPE_NAME,
                destination_shape: D::SHAPE_NAME,
            })
    }

    /// Whether every field of an ordering clause is sortable for `S -> D`
    ///
    /// A blank clause is valid. Fails only when the pair was never registered.
    pub fn valid_mapping_exists_for<S: Shape, D: Shape>(
        &self,
        order_by: Option<&str>,
    ) -> Result<bool, MappingError> {
        let mapping = self.get_property_mapping::<S, D>()?;
        match mapping.resolve(order_by) {
            Ok(_) => Ok(true),
            Err(MappingError::InvalidOrderBy { .. }) => Ok(false),
            Err(other) => Err(other),
        }
    }

    /// Resolve an ordering clause on `S` into sort columns on `D`
    pub fn resolve_order_by<S: Shape, D: Shape>(
        &self,
        order_by: Option<&str>,
    ) -> Result<Vec<SortColumn>, MappingError> {
        self.get_property_mapping::<S, D>()?.resolve(order_by)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Builder validating each mapping against the field registries
#[derive(Debug, Default)]
pub struct PropertyMappingServiceBuilder {
    mappings: HashMap<(TypeId, TypeId), PropertyMapping>,
}

impl PropertyMappingServiceBuilder {
    /// Register the mapping for `S -> D`
    ///
    /// Every key must be a field of `S` and every destination a field of `D`.
    /// Destination names are stored in their canonical spelling. Registering the
    /// same pair twice replaces the earlier mapping.
    pub fn register<S: Shape, D: Shape>(
        mut self,
        entries: impl IntoIterator<Item = (&'static str, PropertyMappingValue)>,
    ) -> Result<Self, MappingError> {
        let mut mappings = HashMap::new();

        for (field, value) in entries {
            let source = S::find_field(field).ok_or_else(|| MappingError::UnknownSourceField {
                source_shape: S::SHAPE_NAME,
                field: field.to_string(),
            })?;

            let mut destinations = Vec::with_capacity(value.destination_properties.len());
            for destination in &value.destination_properties {
                let accessor = D::find_field(destination).ok_or_else(|| {
                    MappingError::UnknownDestinationField {
                        source_shape: S::SHAPE_NAME,
                        destination_shape: D::SHAPE_NAME,
                        field: field.to_string(),
                        destination_field: destination.clone(),
                    }
                })?;
                destinations.push(accessor.name().to_string());
            }

            mappings.insert(
                source.name().to_lowercase(),
                PropertyMappingValue {
                    destination_properties: destinations,
                    revert: value.revert,
                },
            );
        }

        tracing::debug!(
            source = S::SHAPE_NAME,
            destination = D::SHAPE_NAME,
            fields = mappings.len(),
            "registered property mapping"
        );

        self.mappings.insert(
            (TypeId::of::<S>(), TypeId::of::<D>()),
            PropertyMapping {
                source_shape: S::SHAPE_NAME,
                destination_shape: D::SHAPE_NAME,
                mappings,
            },
        );
        Ok(self)
    }

    pub fn build(self) -> PropertyMappingService {
        PropertyMappingService {
            mappings: self.mappings,
        }
    }
}
