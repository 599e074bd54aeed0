//! Shared application state

use crate::config::AppConfig;
use crate::core::property_mapping::PropertyMappingService;
use crate::core::repository::CourseLibraryRepository;
use crate::links::RouteTable;
use std::sync::Arc;

/// Application state shared across handlers
///
/// Everything except the repository is immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub repository: Arc<dyn CourseLibraryRepository>,
    pub property_mappings: Arc<PropertyMappingService>,
    pub routes: Arc<RouteTable>,
}
