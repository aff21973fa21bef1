//! # Generation Context
//!
//! Bundles the model, its annotation resolver, the settings, and the schema
//! mapper handed to every builder.

use crate::edm::{
    AnnotatableTarget, CapabilityResolver, EdmModel, EntitySet, EntityType, NavigationProperty,
    Singleton,
};
use crate::error::AppResult;
use crate::settings::GenerationSettings;
use crate::type_mapping::{EdmSchemaMapper, PrimitiveSchemaMapper};

static DEFAULT_MAPPER: EdmSchemaMapper = EdmSchemaMapper;

/// Read-only inputs shared by the parameter builders.
#[derive(Clone, Copy)]
pub struct ODataContext<'a> {
    model: &'a EdmModel,
    resolver: &'a dyn CapabilityResolver,
    settings: &'a GenerationSettings,
    mapper: &'a dyn PrimitiveSchemaMapper,
}

impl<'a> ODataContext<'a> {
    /// Creates a context that resolves annotations from `model` itself and
    /// maps types with `EdmSchemaMapper`.
    pub fn new(model: &'a EdmModel, settings: &'a GenerationSettings) -> Self {
        Self {
            model,
            resolver: model,
            settings,
            mapper: &DEFAULT_MAPPER,
        }
    }

    /// Replaces the annotation resolver.
    pub fn with_resolver(mut self, resolver: &'a dyn CapabilityResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replaces the schema mapper.
    pub fn with_mapper(mut self, mapper: &'a dyn PrimitiveSchemaMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// The metadata model.
    pub fn model(&self) -> &'a EdmModel {
        self.model
    }

    /// The annotation resolver.
    pub fn resolver(&self) -> &'a dyn CapabilityResolver {
        self.resolver
    }

    /// The generation settings.
    pub fn settings(&self) -> &'a GenerationSettings {
        self.settings
    }

    /// The schema mapper.
    pub fn mapper(&self) -> &'a dyn PrimitiveSchemaMapper {
        self.mapper
    }
}

/// A model element that yields entities: the shared input of `$orderby`,
/// `$select` and `$expand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationSource<'a> {
    /// An entity set.
    EntitySet(&'a EntitySet),
    /// A singleton.
    Singleton(&'a Singleton),
    /// A navigation property declared on `owner`.
    NavigationProperty {
        /// The declaring entity type.
        owner: &'a EntityType,
        /// The navigation property.
        property: &'a NavigationProperty,
    },
}

impl<'a> NavigationSource<'a> {
    /// Projects the source to its annotation target and the entity type it yields.
    pub fn resolve(
        &self,
        model: &'a EdmModel,
    ) -> AppResult<(AnnotatableTarget<'a>, &'a EntityType)> {
        match *self {
            Self::EntitySet(set) => Ok((
                AnnotatableTarget::EntitySet(set),
                model.entity_type(&set.entity_type)?,
            )),
            Self::Singleton(singleton) => Ok((
                AnnotatableTarget::Singleton(singleton),
                model.entity_type(&singleton.entity_type)?,
            )),
            Self::NavigationProperty { owner, property } => Ok((
                AnnotatableTarget::NavigationProperty { owner, property },
                model.entity_type(&property.target_type)?,
            )),
        }
    }
}
