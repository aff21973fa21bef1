//! # EDM Module
//!
//! - **types**: CSDL type references.
//! - **model**: Entity types, container elements, and lookups.
//! - **annotations**: Capability records and the `CapabilityResolver` seam.

pub mod annotations;
pub mod model;
pub mod types;

pub use annotations::{
    CapabilityKind, CapabilityRecord, CapabilityResolver, CountRestrictions, ExpandRestrictions,
    FilterRestrictions, NavigationPropertyRestriction, NavigationRestrictions, NavigationType,
    SearchRestrictions, SortRestrictions, TargetAnnotations,
};
pub use model::{
    AnnotatableTarget, ComplexType, EdmModel, EntityContainer, EntitySet, EntityType, EnumType,
    Function, FunctionImport, FunctionParameter, NavigationProperty, Singleton,
    StructuralProperty, TypeKind,
};
pub use types::{EdmPrimitive, EdmTypeRef, SpatialKind};
