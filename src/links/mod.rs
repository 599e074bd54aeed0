//! Link management module
//!
//! Named routes, absolute URL generation and the link sets attached to each
//! resource (HATEOAS).

pub mod descriptor;
pub mod resources;
pub mod routes;

pub use descriptor::{LinkDescriptor, LinkedCollection, ResourceUriType};
pub use routes::{RouteTable, paths, route_names};
