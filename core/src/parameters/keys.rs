//! # Key Parameters
//!
//! Path parameters for a key segment such as `/People/{UserName1}` or
//! `/Orders(Id={Id1},Partition={Partition1})`.

use super::context::ODataContext;
use crate::edm::{EdmModel, EdmTypeRef};
use crate::error::{AppError, AppResult};
use utoipa::openapi::extensions::ExtensionsBuilder;
use utoipa::openapi::path::{Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::Required;

/// Vendor extension naming the entity type a key parameter belongs to.
pub const KEY_TYPE_EXTENSION: &str = "x-ms-docs-key-type";

/// One property of an entity key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyProperty {
    /// Property name.
    pub name: String,
    /// Property type.
    pub ty: EdmTypeRef,
}

/// A key segment of a resource path.
///
/// `key_index` distinguishes repeated key segments along one path (the first
/// key segment is typically `0`, the next `1`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySegment {
    /// Unqualified name of the keyed entity type.
    pub entity_type: String,
    /// Position of this key segment within the path.
    pub key_index: usize,
    /// Key properties in declared key order.
    pub key_properties: Vec<KeyProperty>,
}

impl KeySegment {
    /// Builds the key segment of `entity_type` (qualified or not) from the model,
    /// following inherited keys.
    pub fn resolve(model: &EdmModel, entity_type: &str, key_index: usize) -> AppResult<Self> {
        let ty = model.entity_type(entity_type)?;
        let key_properties = model
            .key_properties(ty)?
            .into_iter()
            .map(|p| KeyProperty {
                name: p.name.clone(),
                ty: p.ty.clone(),
            })
            .collect();
        Ok(Self {
            entity_type: ty.name.clone(),
            key_index,
            key_properties,
        })
    }

    /// Whether the key spans more than one property.
    pub fn is_composite(&self) -> bool {
        self.key_properties.len() > 1
    }

    /// The path parameter name of `property` within this segment.
    pub fn parameter_name(&self, property: &KeyProperty, prefix_entity_type: bool) -> String {
        let name = format!("{}{}", property.name, self.key_index);
        if prefix_entity_type {
            format!("{}-{}", self.entity_type, name)
        } else {
            name
        }
    }
}

/// Builds one required path parameter per key property, in key order.
pub fn create_key_parameters(
    ctx: &ODataContext<'_>,
    segment: &KeySegment,
) -> AppResult<Vec<Parameter>> {
    if segment.key_properties.is_empty() {
        return Err(AppError::InvalidArgument(format!(
            "key segment of '{}' has no key properties",
            segment.entity_type
        )));
    }

    let prefix = ctx.settings().prefix_entity_type_name_before_key;
    segment
        .key_properties
        .iter()
        .map(|property| {
            let name = segment.parameter_name(property, prefix);
            let schema = ctx.mapper().map(ctx.model(), &property.ty)?;
            let extensions = ExtensionsBuilder::new()
                .add(KEY_TYPE_EXTENSION, segment.entity_type.clone())
                .build();

            Ok(ParameterBuilder::new()
                .description(Some(format!("key: {}", name)))
                .name(name)
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .schema(Some(schema))
                .extensions(Some(extensions))
                .build())
        })
        .collect()
}
