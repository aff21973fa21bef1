//! # Function Parameters
//!
//! Parameters of functions and function imports. Primitive and enum values have
//! a literal path encoding; structured and collection values are passed as a
//! URL-encoded JSON alias in the query string.

use super::context::ODataContext;
use crate::edm::{Function, FunctionImport, FunctionParameter, TypeKind};
use crate::error::AppResult;
use indexmap::IndexMap;
use utoipa::openapi::path::{Parameter, ParameterBuilder, ParameterIn};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::{RefOr, Required};

/// Builds the parameters of `function`, skipping the binding parameter of a
/// bound function.
///
/// `name_mapping` renames parameters (original name → emitted name); unmapped
/// names are emitted unchanged.
pub fn create_function_parameters(
    ctx: &ODataContext<'_>,
    function: &Function,
    name_mapping: Option<&IndexMap<String, String>>,
) -> AppResult<Vec<Parameter>> {
    let skip = usize::from(function.is_bound);
    function
        .parameters
        .iter()
        .skip(skip)
        .map(|parameter| {
            let name = name_mapping
                .and_then(|m| m.get(&parameter.name))
                .unwrap_or(&parameter.name);
            create_function_parameter(ctx, function, parameter, name)
        })
        .collect()
}

/// Builds the parameters of the function behind `import`.
pub fn create_function_import_parameters(
    ctx: &ODataContext<'_>,
    import: &FunctionImport,
) -> AppResult<Vec<Parameter>> {
    let function = ctx.model().function(&import.function)?;
    create_function_parameters(ctx, function, None)
}

fn create_function_parameter(
    ctx: &ODataContext<'_>,
    function: &Function,
    parameter: &FunctionParameter,
    name: &str,
) -> AppResult<Parameter> {
    let model = ctx.model();
    let alias_kind = match model.type_kind(&parameter.ty)? {
        TypeKind::Collection => Some("array"),
        kind if kind.is_structured() => Some("object"),
        _ => None,
    };

    let builder = ParameterBuilder::new().name(name).required(Required::True);

    let built = match alias_kind {
        Some(kind) => {
            let description = ctx
                .resolver()
                .description_annotation(&model.parameter_path(function, parameter));
            let schema = ObjectBuilder::new()
                .schema_type(Type::String)
                .description(description)
                .build();
            builder
                .parameter_in(ParameterIn::Query)
                .description(Some(format!("The URL-encoded JSON {}", kind)))
                .schema(Some(RefOr::T(Schema::Object(schema))))
        }
        None => builder
            .parameter_in(ParameterIn::Path)
            .schema(Some(ctx.mapper().map(model, &parameter.ty)?)),
    };

    Ok(built.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edm::EdmModel;
    use crate::error::AppError;
    use crate::settings::GenerationSettings;
    use pretty_assertions::assert_eq;

    const MODEL: &str = r#"
namespace: NS
entityTypes:
  - name: Person
    key: [UserName]
    properties:
      - { name: UserName, type: Edm.String }
complexTypes:
  - name: Location
enumTypes:
  - name: Feature
    members: [Feature1]
functions:
  - name: GetNearestAirport
    parameters:
      - { name: lat, type: Edm.Double }
      - { name: lon, type: Edm.Double }
  - name: GetFriendsTrips
    isBound: true
    parameters:
      - { name: person, type: NS.Person }
      - { name: userNames, type: Collection(Edm.String) }
      - { name: near, type: NS.Location }
      - { name: feature, type: NS.Feature }
  - name: Broken
    parameters:
      - { name: what, type: NS.Nowhere }
container:
  name: Default
  functionImports:
    - { name: GetNearestAirport, function: NS.GetNearestAirport }
    - { name: Dangling, function: NS.Missing }
annotations:
  NS.GetFriendsTrips/userNames:
    Description: User names to look up
"#;

    #[test]
    fn test_function_import_primitives_are_path_parameters() {
        let model = EdmModel::from_yaml_str(MODEL).unwrap();
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let import = model.function_import("GetNearestAirport").unwrap();

        let params = create_function_import_parameters(&ctx, import).unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json[0]["name"], "lat");
        assert_eq!(json[0]["in"], "path");
        assert_eq!(json[0]["required"], true);
        assert_eq!(json[0]["schema"]["format"], "double");
        assert_eq!(json[1]["name"], "lon");
    }

    #[test]
    fn test_bound_function_skips_binding_and_aliases_structured() {
        let model = EdmModel::from_yaml_str(MODEL).unwrap();
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let function = model.function("GetFriendsTrips").unwrap();

        let params = create_function_parameters(&ctx, function, None).unwrap();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(params.len(), 3);

        assert_eq!(json[0]["name"], "userNames");
        assert_eq!(json[0]["in"], "query");
        assert_eq!(json[0]["description"], "The URL-encoded JSON array");
        assert_eq!(json[0]["schema"]["type"], "string");
        assert_eq!(json[0]["schema"]["description"], "User names to look up");

        assert_eq!(json[1]["name"], "near");
        assert_eq!(json[1]["in"], "query");
        assert_eq!(json[1]["description"], "The URL-encoded JSON object");
        assert!(json[1]["schema"].get("description").is_none());

        assert_eq!(json[2]["name"], "feature");
        assert_eq!(json[2]["in"], "path");
        assert_eq!(json[2]["schema"]["$ref"], "#/components/schemas/NS.Feature");
    }

    #[test]
    fn test_collection_is_query_alias_even_when_unbound() {
        let mut model = EdmModel::from_yaml_str(MODEL).unwrap();
        model.functions[1].is_bound = false;
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let function = model.function("GetFriendsTrips").unwrap();

        let params = create_function_parameters(&ctx, function, None).unwrap();
        let user_names = params.iter().find(|p| p.name == "userNames").unwrap();
        let json = serde_json::to_value(user_names).unwrap();
        assert_eq!(json["in"], "query");
    }

    #[test]
    fn test_name_mapping_renames_parameters() {
        let model = EdmModel::from_yaml_str(MODEL).unwrap();
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let function = model.function("GetNearestAirport").unwrap();
        let mapping = IndexMap::from([("lat".to_string(), "latitude".to_string())]);

        let params = create_function_parameters(&ctx, function, Some(&mapping)).unwrap();
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["latitude", "lon"]);
    }

    #[test]
    fn test_missing_elements_are_invalid_arguments() {
        let model = EdmModel::from_yaml_str(MODEL).unwrap();
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);

        let dangling = model.function_import("Dangling").unwrap();
        assert!(matches!(
            create_function_import_parameters(&ctx, dangling),
            Err(AppError::InvalidArgument(_))
        ));

        let broken = model.function("Broken").unwrap();
        assert!(matches!(
            create_function_parameters(&ctx, broken, None),
            Err(AppError::InvalidArgument(_))
        ));
    }
}
