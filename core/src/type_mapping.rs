#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts EDM primitive and enum types into OpenAPI schemas.
//! Structured and collection types have no literal path encoding and are rejected.
//! Spatial primitives reference a shared GeoJSON schema named after the type
//! (`#/components/schemas/Edm.GeographyPoint`); `Edm.Untyped` and
//! `Edm.PrimitiveType` accept any value.

use crate::edm::{EdmModel, EdmPrimitive, EdmTypeRef, TypeKind};
use crate::error::{AppError, AppResult};
use utoipa::openapi::schema::{
    KnownFormat, ObjectBuilder, Schema, SchemaFormat, SchemaType, Type,
};
use utoipa::openapi::{Ref, RefOr};

const GUID_PATTERN: &str =
    "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$";

/// Trait for converting EDM type references to OpenAPI schemas.
pub trait PrimitiveSchemaMapper: Send + Sync {
    /// Maps a primitive or enum type reference to a schema.
    fn map(&self, model: &EdmModel, ty: &EdmTypeRef) -> AppResult<RefOr<Schema>>;
}

/// A standard implementation of `PrimitiveSchemaMapper`.
///
/// Enum and spatial types become references into `#/components/schemas`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdmSchemaMapper;

impl PrimitiveSchemaMapper for EdmSchemaMapper {
    fn map(&self, model: &EdmModel, ty: &EdmTypeRef) -> AppResult<RefOr<Schema>> {
        match ty {
            EdmTypeRef::Primitive(p) if p.is_spatial() => {
                Ok(RefOr::Ref(Ref::from_schema_name(ty.to_string())))
            }
            EdmTypeRef::Primitive(p) => Ok(RefOr::T(Schema::Object(primitive(*p).build()))),
            EdmTypeRef::Named(name) => match model.type_kind(ty)? {
                TypeKind::Enum(e) => Ok(RefOr::Ref(Ref::from_schema_name(model.qualify(&e.name)))),
                _ => Err(AppError::InvalidArgument(format!(
                    "'{}' is not a primitive or enum type",
                    name
                ))),
            },
            EdmTypeRef::Collection(_) => Err(AppError::InvalidArgument(format!(
                "collection type '{}' has no primitive schema",
                ty
            ))),
        }
    }
}

fn primitive(p: EdmPrimitive) -> ObjectBuilder {
    match p {
        EdmPrimitive::Boolean => simple(Type::Boolean),
        EdmPrimitive::String => simple(Type::String),
        EdmPrimitive::Int32 => known(Type::Integer, KnownFormat::Int32),
        EdmPrimitive::Int64 => known(Type::Integer, KnownFormat::Int64),
        EdmPrimitive::Int16 => custom(Type::Integer, "int16"),
        EdmPrimitive::SByte => custom(Type::Integer, "int8"),
        EdmPrimitive::Byte => custom(Type::Integer, "uint8"),
        EdmPrimitive::Single => known(Type::Number, KnownFormat::Float),
        EdmPrimitive::Double => known(Type::Number, KnownFormat::Double),
        EdmPrimitive::Decimal => custom(Type::Number, "decimal"),
        EdmPrimitive::Date => known(Type::String, KnownFormat::Date),
        EdmPrimitive::DateTimeOffset => known(Type::String, KnownFormat::DateTime),
        EdmPrimitive::TimeOfDay => custom(Type::String, "time"),
        EdmPrimitive::Duration => custom(Type::String, "duration"),
        EdmPrimitive::Binary => custom(Type::String, "base64url"),
        EdmPrimitive::Stream => known(Type::String, KnownFormat::Binary),
        EdmPrimitive::Guid => custom(Type::String, "uuid").pattern(Some(GUID_PATTERN)),
        EdmPrimitive::Untyped
        | EdmPrimitive::PrimitiveType
        | EdmPrimitive::Geography(_)
        | EdmPrimitive::Geometry(_) => ObjectBuilder::new().schema_type(SchemaType::AnyValue),
    }
}

// Helpers for cleaner construction
fn simple(t: Type) -> ObjectBuilder {
    ObjectBuilder::new().schema_type(t)
}

fn known(t: Type, format: KnownFormat) -> ObjectBuilder {
    simple(t).format(Some(SchemaFormat::KnownFormat(format)))
}

fn custom(t: Type, format: &str) -> ObjectBuilder {
    simple(t).format(Some(SchemaFormat::Custom(format.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> EdmModel {
        EdmModel::from_yaml_str(
            r#"
namespace: NS
enumTypes:
  - name: Color
    members: [Red]
complexTypes:
  - name: Address
"#,
        )
        .unwrap()
    }

    fn map_json(ty: &str) -> serde_json::Value {
        let schema = EdmSchemaMapper
            .map(&model(), &ty.parse().unwrap())
            .expect(ty);
        serde_json::to_value(schema).unwrap()
    }

    #[test]
    fn test_primitive_mapping() {
        let cases = vec![
            ("Edm.Int32", json!({"type": "integer", "format": "int32"})),
            ("Edm.Boolean", json!({"type": "boolean"})),
            ("Edm.String", json!({"type": "string"})),
            ("Edm.Double", json!({"type": "number", "format": "double"})),
            ("Edm.Date", json!({"type": "string", "format": "date"})),
        ];

        for (input, expected) in cases {
            assert_eq!(map_json(input), expected, "{}", input);
        }
    }

    #[test]
    fn test_guid_carries_pattern() {
        let schema = map_json("Edm.Guid");
        assert_eq!(schema["format"], "uuid");
        assert_eq!(schema["pattern"], GUID_PATTERN);
    }

    #[test]
    fn test_spatial_references_shared_schema() {
        assert_eq!(
            map_json("Edm.GeographyPoint"),
            json!({"$ref": "#/components/schemas/Edm.GeographyPoint"})
        );
        assert_eq!(
            map_json("Edm.Geometry"),
            json!({"$ref": "#/components/schemas/Edm.Geometry"})
        );
    }

    #[test]
    fn test_abstract_types_accept_anything() {
        assert_eq!(map_json("Edm.Untyped"), json!({}));
        assert_eq!(map_json("Edm.PrimitiveType"), json!({}));
    }

    #[test]
    fn test_enum_becomes_reference() {
        assert_eq!(
            map_json("NS.Color"),
            json!({"$ref": "#/components/schemas/NS.Color"})
        );
    }

    #[test]
    fn test_structured_and_collection_are_rejected() {
        let model = model();
        for ty in ["NS.Address", "Collection(Edm.Int32)", "NS.Unknown"] {
            let err = EdmSchemaMapper
                .map(&model, &ty.parse().unwrap())
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidArgument(_)), "{}", ty);
        }
    }
}
