#![deny(missing_docs)]

//! # OData OpenAPI Core
//!
//! Turns an OData metadata model and its capability annotations into reusable
//! OpenAPI parameter descriptors.

/// Shared error types.
pub mod error;

/// Generation settings.
pub mod settings;

/// Metadata model, type references, and capability annotations.
pub mod edm;

/// Type mapping logic (EDM -> OpenAPI schema).
pub mod type_mapping;

/// Parameter builders.
pub mod parameters;

pub use edm::{AnnotatableTarget, CapabilityKind, CapabilityRecord, CapabilityResolver, EdmModel};
pub use error::{AppError, AppResult};
pub use parameters::{
    collection_query_parameters, create_function_import_parameters, create_function_parameters,
    create_key_parameters, entity_query_parameters, KeySegment, NavigationSource, ODataContext,
    ParameterCatalog, QueryOption,
};
pub use settings::GenerationSettings;
pub use type_mapping::{EdmSchemaMapper, PrimitiveSchemaMapper};
