#![deny(missing_docs)]

//! # Parameter Generation Module
//!
//! - **context**: Shared read-only inputs and navigation sources.
//! - **catalog**: Reusable `$top`/`$skip`/`$count`/`$filter`/`$search`.
//! - **references**: Capability-aware references into the catalog.
//! - **query_options**: `$orderby`, `$select`, `$expand`.
//! - **keys**: Key segment path parameters.
//! - **functions**: Function and function import parameters.
//! - **operation**: Ordered query option sets for GET operations.

pub mod catalog;
pub mod context;
pub mod functions;
pub mod keys;
pub mod operation;
pub mod query_options;
pub mod references;

pub use catalog::{ParameterCatalog, QueryOption};
pub use context::{NavigationSource, ODataContext};
pub use functions::{create_function_import_parameters, create_function_parameters};
pub use keys::{create_key_parameters, KeyProperty, KeySegment, KEY_TYPE_EXTENSION};
pub use operation::{collection_query_parameters, entity_query_parameters};
pub use query_options::{
    create_expand, create_order_by, create_select, expand, order_by, select,
};
pub use references::{
    create_count, create_filter, create_reference, create_search, create_skip, create_top,
};
