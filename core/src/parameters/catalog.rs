//! # Parameter Catalog
//!
//! The five query options shared across every operation of a document. They
//! are emitted once under `components.parameters` and referenced by id.

use crate::edm::CapabilityKind;
use crate::error::{AppError, AppResult};
use crate::settings::GenerationSettings;
use indexmap::IndexMap;
use serde_json::json;
use utoipa::openapi::path::{Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::{Ref, RefOr};

/// JSON pointer prefix of reusable parameters.
pub const PARAMETERS_POINTER: &str = "#/components/parameters/";

/// A query option whose descriptor lives in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOption {
    /// `$top`.
    Top,
    /// `$skip`.
    Skip,
    /// `$count`.
    Count,
    /// `$filter`.
    Filter,
    /// `$search`.
    Search,
}

impl QueryOption {
    /// All catalog options, in catalog order.
    pub const ALL: [QueryOption; 5] = [
        QueryOption::Top,
        QueryOption::Skip,
        QueryOption::Count,
        QueryOption::Filter,
        QueryOption::Search,
    ];

    /// Stable catalog id.
    pub fn id(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Skip => "skip",
            Self::Count => "count",
            Self::Filter => "filter",
            Self::Search => "search",
        }
    }

    /// Query string name of the option.
    pub fn query_name(self) -> &'static str {
        match self {
            Self::Top => "$top",
            Self::Skip => "$skip",
            Self::Count => "$count",
            Self::Filter => "$filter",
            Self::Search => "$search",
        }
    }

    /// The capability term governing the option.
    pub fn capability(self) -> CapabilityKind {
        match self {
            Self::Top => CapabilityKind::Top,
            Self::Skip => CapabilityKind::Skip,
            Self::Count => CapabilityKind::Count,
            Self::Filter => CapabilityKind::Filter,
            Self::Search => CapabilityKind::Search,
        }
    }

    /// A reference to the option's catalog entry.
    pub fn reference(self) -> RefOr<Parameter> {
        RefOr::Ref(Ref::new(format!("{}{}", PARAMETERS_POINTER, self.id())))
    }

    fn descriptor(self, settings: &GenerationSettings) -> Parameter {
        let builder = ParameterBuilder::new()
            .name(self.query_name())
            .parameter_in(ParameterIn::Query);

        match self {
            Self::Top => builder
                .description(Some("Show only the first n items"))
                .schema(Some(non_negative_integer()))
                .example(Some(json!(settings.top_example))),
            Self::Skip => builder
                .description(Some("Skip the first n items"))
                .schema(Some(non_negative_integer())),
            Self::Count => builder
                .description(Some("Include count of items"))
                .schema(Some(typed(Type::Boolean))),
            Self::Filter => builder
                .description(Some("Filter items by property values"))
                .schema(Some(typed(Type::String))),
            Self::Search => builder
                .description(Some("Search items by search phrases"))
                .schema(Some(typed(Type::String))),
        }
        .build()
    }
}

fn typed(t: Type) -> RefOr<Schema> {
    RefOr::T(Schema::Object(ObjectBuilder::new().schema_type(t).build()))
}

fn non_negative_integer() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(Type::Integer)
            .minimum(Some(0))
            .build(),
    ))
}

/// The reusable query-option parameters of one generation run, keyed by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterCatalog {
    parameters: IndexMap<String, Parameter>,
}

impl ParameterCatalog {
    /// Builds `$top`, `$skip`, `$count`, `$filter` and `$search`.
    ///
    /// Only `$top` depends on `settings` (its example value).
    pub fn build(settings: &GenerationSettings) -> Self {
        let parameters = QueryOption::ALL
            .into_iter()
            .map(|option| (option.id().to_string(), option.descriptor(settings)))
            .collect();
        Self { parameters }
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&Parameter> {
        self.parameters.get(id)
    }

    /// Iterates `(id, descriptor)` in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Parameter)> {
        self.parameters.iter().map(|(id, p)| (id.as_str(), p))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Renders the catalog as the value of `components.parameters`.
    pub fn to_components_json(&self) -> AppResult<serde_json::Value> {
        serde_json::to_value(&self.parameters)
            .map_err(|e| AppError::General(format!("Failed to serialize parameters: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_catalog_ids_are_stable() {
        let catalog = ParameterCatalog::build(&GenerationSettings::default());
        let ids: Vec<_> = catalog.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["top", "skip", "count", "filter", "search"]);
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_top_shape() {
        let settings = GenerationSettings::default().with_top_example(42);
        let catalog = ParameterCatalog::build(&settings);
        let top = serde_json::to_value(catalog.get("top").unwrap()).unwrap();
        assert_eq!(top["name"], "$top");
        assert_eq!(top["in"], "query");
        assert_eq!(top["description"], "Show only the first n items");
        assert_eq!(top["schema"]["type"], "integer");
        assert_eq!(top["schema"]["minimum"].as_f64(), Some(0.0));
        assert_eq!(top["example"], 42);
    }

    #[test]
    fn test_remaining_shapes() {
        let catalog = ParameterCatalog::build(&GenerationSettings::default());
        let json = catalog.to_components_json().unwrap();
        assert_eq!(json["skip"]["schema"]["type"], "integer");
        assert_eq!(json["skip"]["schema"]["minimum"].as_f64(), Some(0.0));
        assert_eq!(json["skip"]["in"], "query");
        assert_eq!(json["count"]["schema"], json!({"type": "boolean"}));
        assert_eq!(json["filter"]["schema"], json!({"type": "string"}));
        assert_eq!(json["search"]["name"], "$search");
        assert_eq!(json["search"]["schema"], json!({"type": "string"}));
        assert!(json["skip"].get("example").is_none());
    }

    #[test]
    fn test_build_is_idempotent() {
        let settings = GenerationSettings::default().with_top_example(7);
        assert_eq!(
            ParameterCatalog::build(&settings),
            ParameterCatalog::build(&settings)
        );
    }

    #[test]
    fn test_reference_points_into_components() {
        match QueryOption::Filter.reference() {
            RefOr::Ref(r) => assert_eq!(r.ref_location, "#/components/parameters/filter"),
            RefOr::T(_) => panic!("Expected a reference"),
        }
    }
}
