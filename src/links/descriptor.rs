//! Hypermedia link types

use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One hypermedia control attached to a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDescriptor {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl LinkDescriptor {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}

impl From<LinkDescriptor> for FieldValue {
    fn from(link: LinkDescriptor) -> Self {
        let mut object = IndexMap::with_capacity(3);
        object.insert("href".to_string(), FieldValue::String(link.href));
        object.insert("rel".to_string(), FieldValue::String(link.rel));
        object.insert("method".to_string(), FieldValue::String(link.method));
        FieldValue::Object(object)
    }
}

/// Collection body: the items plus links about the collection itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedCollection<T> {
    pub value: Vec<T>,
    pub links: Vec<LinkDescriptor>,
}

/// Which page of a collection a link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceUriType {
    PreviousPage,
    NextPage,
    Current,
}

impl ResourceUriType {
    /// Page number this link targets, relative to `current`
    pub fn page_number(self, current: usize) -> usize {
        match self {
            ResourceUriType::PreviousPage => current.saturating_sub(1).max(1),
            ResourceUriType::NextPage => current + 1,
            ResourceUriType::Current => current,
        }
    }
}
