//! # EDM Model
//!
//! The read-only metadata model the builders operate on: entity/complex/enum
//! types, functions, the entity container, and the annotation map.

use super::annotations::{CapabilityKind, CapabilityRecord, CapabilityResolver, TargetAnnotations};
use super::types::EdmTypeRef;
use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A structural (non-navigation) property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralProperty {
    /// Property name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: EdmTypeRef,
}

/// A navigation property between entity types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationProperty {
    /// Property name.
    pub name: String,
    /// Qualified name of the target entity type.
    #[serde(rename = "type")]
    pub target_type: String,
    /// Whether the property is collection-valued.
    #[serde(default)]
    pub collection: bool,
    /// Whether the related entities are contained in the source.
    #[serde(default)]
    pub contains_target: bool,
}

/// An entity type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    /// Unqualified name.
    pub name: String,
    /// Qualified name of the base type.
    #[serde(default)]
    pub base_type: Option<String>,
    /// Declared key property names, in key order.
    #[serde(default)]
    pub key: Vec<String>,
    /// Declared structural properties.
    #[serde(default)]
    pub properties: Vec<StructuralProperty>,
    /// Declared navigation properties.
    #[serde(default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

/// A complex type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexType {
    /// Unqualified name.
    pub name: String,
    /// Declared structural properties.
    #[serde(default)]
    pub properties: Vec<StructuralProperty>,
}

/// An enum type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumType {
    /// Unqualified name.
    pub name: String,
    /// Member names in declared order.
    #[serde(default)]
    pub members: Vec<String>,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParameter {
    /// Parameter name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub ty: EdmTypeRef,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Function {
    /// Unqualified name.
    pub name: String,
    /// Whether the first parameter is a binding parameter.
    #[serde(default)]
    pub is_bound: bool,
    /// Parameters in declared order, binding parameter first when bound.
    #[serde(default)]
    pub parameters: Vec<FunctionParameter>,
    /// Declared return type.
    #[serde(default)]
    pub return_type: Option<EdmTypeRef>,
}

/// An entity set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySet {
    /// Name of the set.
    pub name: String,
    /// Qualified name of the element entity type.
    pub entity_type: String,
}

/// A singleton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Singleton {
    /// Name of the singleton.
    pub name: String,
    /// Qualified name of the entity type.
    #[serde(rename = "type")]
    pub entity_type: String,
}

/// A function import exposing an unbound function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionImport {
    /// Name of the import.
    pub name: String,
    /// Qualified name of the imported function.
    pub function: String,
}

/// The entity container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityContainer {
    /// Container name.
    pub name: String,
    /// Entity sets.
    #[serde(default)]
    pub entity_sets: Vec<EntitySet>,
    /// Singletons.
    #[serde(default)]
    pub singletons: Vec<Singleton>,
    /// Function imports.
    #[serde(default)]
    pub function_imports: Vec<FunctionImport>,
}

/// Any model element that can carry capability annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotatableTarget<'a> {
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
    /// The entity container.
    EntityContainer(&'a EntityContainer),
    /// A function import.
    FunctionImport(&'a FunctionImport),
}

/// What a named type reference resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind<'a> {
    /// A built-in primitive.
    Primitive,
    /// A user-defined enum type.
    Enum(&'a EnumType),
    /// A complex type.
    Complex(&'a ComplexType),
    /// An entity type.
    Entity(&'a EntityType),
    /// `Collection(...)` of anything.
    Collection,
}

impl TypeKind<'_> {
    /// Complex and entity types are structured.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Complex(_) | Self::Entity(_))
    }
}

/// The full service description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdmModel {
    /// Schema namespace qualifying every declared type.
    pub namespace: String,
    /// Entity types.
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    /// Complex types.
    #[serde(default)]
    pub complex_types: Vec<ComplexType>,
    /// Enum types.
    #[serde(default)]
    pub enum_types: Vec<EnumType>,
    /// Functions.
    #[serde(default)]
    pub functions: Vec<Function>,
    /// The entity container.
    #[serde(default)]
    pub container: EntityContainer,
    /// Annotations keyed by target path.
    #[serde(default)]
    pub annotations: IndexMap<String, TargetAnnotations>,
}

impl EdmModel {
    /// Parses a model from YAML.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| AppError::General(format!("Failed to parse metadata YAML: {}", e)))
    }

    /// Parses a model from JSON.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| AppError::General(format!("Failed to parse metadata JSON: {}", e)))
    }

    /// Qualifies `name` with the model namespace.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.namespace, name)
    }

    /// Strips the model namespace from a qualified name, if present.
    fn unqualify<'n>(&self, name: &'n str) -> &'n str {
        name.strip_prefix(self.namespace.as_str())
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(name)
    }

    /// Finds an entity type by qualified or unqualified name.
    pub fn entity_type(&self, name: &str) -> AppResult<&EntityType> {
        let short = self.unqualify(name);
        self.entity_types
            .iter()
            .find(|t| t.name == short)
            .ok_or_else(|| AppError::InvalidArgument(format!("entity type '{}' not found", name)))
    }

    /// Finds a function by qualified or unqualified name.
    pub fn function(&self, name: &str) -> AppResult<&Function> {
        let short = self.unqualify(name);
        self.functions
            .iter()
            .find(|f| f.name == short)
            .ok_or_else(|| AppError::InvalidArgument(format!("function '{}' not found", name)))
    }

    /// Finds an entity set by name.
    pub fn entity_set(&self, name: &str) -> AppResult<&EntitySet> {
        self.container
            .entity_sets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AppError::InvalidArgument(format!("entity set '{}' not found", name)))
    }

    /// Finds a singleton by name.
    pub fn singleton(&self, name: &str) -> AppResult<&Singleton> {
        self.container
            .singletons
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| AppError::InvalidArgument(format!("singleton '{}' not found", name)))
    }

    /// Finds a function import by name.
    pub fn function_import(&self, name: &str) -> AppResult<&FunctionImport> {
        self.container
            .function_imports
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| {
                AppError::InvalidArgument(format!("function import '{}' not found", name))
            })
    }

    /// Resolves the kind of a type reference.
    pub fn type_kind(&self, ty: &EdmTypeRef) -> AppResult<TypeKind<'_>> {
        match ty {
            EdmTypeRef::Primitive(_) => Ok(TypeKind::Primitive),
            EdmTypeRef::Collection(_) => Ok(TypeKind::Collection),
            EdmTypeRef::Named(name) => {
                let short = self.unqualify(name);
                if let Some(e) = self.enum_types.iter().find(|t| t.name == short) {
                    return Ok(TypeKind::Enum(e));
                }
                if let Some(c) = self.complex_types.iter().find(|t| t.name == short) {
                    return Ok(TypeKind::Complex(c));
                }
                if let Some(e) = self.entity_types.iter().find(|t| t.name == short) {
                    return Ok(TypeKind::Entity(e));
                }
                Err(AppError::InvalidArgument(format!(
                    "type '{}' not found",
                    name
                )))
            }
        }
    }

    /// The base type chain of `entity_type`, root first, ending with the type itself.
    ///
    /// A cyclic or dangling base type ends the chain.
    pub fn type_hierarchy<'a>(&'a self, entity_type: &'a EntityType) -> Vec<&'a EntityType> {
        let mut chain = vec![entity_type];
        let mut seen = HashSet::from([entity_type.name.as_str()]);
        let mut current = entity_type;
        while let Some(base) = current.base_type.as_deref() {
            match self.entity_type(base) {
                Ok(parent) if seen.insert(parent.name.as_str()) => {
                    chain.push(parent);
                    current = parent;
                }
                _ => break,
            }
        }
        chain.reverse();
        chain
    }

    /// Structural properties including inherited ones, base type first.
    pub fn structural_properties<'a>(
        &'a self,
        entity_type: &'a EntityType,
    ) -> impl Iterator<Item = &'a StructuralProperty> + 'a {
        self.type_hierarchy(entity_type)
            .into_iter()
            .flat_map(|t| t.properties.iter())
    }

    /// Navigation properties including inherited ones, base type first.
    pub fn navigation_properties<'a>(
        &'a self,
        entity_type: &'a EntityType,
    ) -> impl Iterator<Item = &'a NavigationProperty> + 'a {
        self.type_hierarchy(entity_type)
            .into_iter()
            .flat_map(|t| t.navigation_properties.iter())
    }

    /// The effective key: the key declared closest to the root of the hierarchy,
    /// resolved to its properties in key order.
    pub fn key_properties<'a>(
        &'a self,
        entity_type: &'a EntityType,
    ) -> AppResult<Vec<&'a StructuralProperty>> {
        let hierarchy = self.type_hierarchy(entity_type);
        let key = hierarchy
            .iter()
            .map(|t| &t.key)
            .find(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::InvalidArgument(format!(
                    "entity type '{}' declares no key",
                    entity_type.name
                ))
            })?;

        key.iter()
            .map(|name| {
                hierarchy
                    .iter()
                    .copied()
                    .flat_map(|t| t.properties.iter())
                    .find(|p| &p.name == name)
                    .ok_or_else(|| {
                        AppError::InvalidArgument(format!(
                            "key property '{}' not found on '{}'",
                            name, entity_type.name
                        ))
                    })
            })
            .collect()
    }

    /// The annotation path of `target`.
    pub fn target_path(&self, target: &AnnotatableTarget<'_>) -> String {
        let container = self.qualify(&self.container.name);
        match target {
            AnnotatableTarget::EntitySet(s) => format!("{}/{}", container, s.name),
            AnnotatableTarget::Singleton(s) => format!("{}/{}", container, s.name),
            AnnotatableTarget::FunctionImport(f) => format!("{}/{}", container, f.name),
            AnnotatableTarget::EntityContainer(_) => container,
            AnnotatableTarget::NavigationProperty { owner, property } => {
                format!("{}/{}", self.qualify(&owner.name), property.name)
            }
        }
    }

    /// The annotation path of a function parameter.
    pub fn parameter_path(&self, function: &Function, parameter: &FunctionParameter) -> String {
        format!("{}/{}", self.qualify(&function.name), parameter.name)
    }
}

impl CapabilityResolver for EdmModel {
    fn capability(
        &self,
        target: &AnnotatableTarget<'_>,
        kind: CapabilityKind,
    ) -> Option<CapabilityRecord<'_>> {
        self.annotations
            .get(&self.target_path(target))
            .and_then(|a| a.record(kind))
    }

    fn description_annotation(&self, target_path: &str) -> Option<&str> {
        self.annotations
            .get(target_path)
            .and_then(|a| a.description.as_deref())
    }
}
