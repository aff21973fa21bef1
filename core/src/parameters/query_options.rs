//! # Target-Specific Query Options
//!
//! Builds `$orderby`, `$select` and `$expand`. Their permitted values depend on
//! the target's entity type and restriction annotations, so they are always
//! inlined rather than shared through the catalog.
//!
//! Values are published as a string schema with an `enum` and `style: simple`
//! instead of a typed array; several low-code consumers cannot bind typed
//! array query parameters.

use super::context::{NavigationSource, ODataContext};
use crate::edm::{AnnotatableTarget, EntityType};
use crate::error::AppResult;
use utoipa::openapi::path::{Parameter, ParameterBuilder, ParameterIn, ParameterStyle};
use utoipa::openapi::schema::{ObjectBuilder, Schema, Type};
use utoipa::openapi::RefOr;

/// The wildcard that expands every navigation property.
pub const EXPAND_ALL: &str = "*";

/// Builds `$orderby` for `source`.
pub fn order_by(
    ctx: &ODataContext<'_>,
    source: &NavigationSource<'_>,
) -> AppResult<Option<Parameter>> {
    let (target, entity_type) = source.resolve(ctx.model())?;
    Ok(create_order_by(ctx, &target, entity_type))
}

/// Builds `$orderby` for `target` over the properties of `entity_type`.
///
/// Returns `None` when the target is annotated as not sortable.
pub fn create_order_by(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
    entity_type: &EntityType,
) -> Option<Parameter> {
    let sort = ctx.resolver().sort_restrictions(target);
    if sort.is_some_and(|s| !s.sortable) {
        tracing::debug!(path = %ctx.model().target_path(target), "$orderby disabled");
        return None;
    }

    let mut items = Vec::new();
    for property in ctx.model().structural_properties(entity_type) {
        let name = property.name.as_str();
        match sort {
            Some(s) if s.is_non_sortable_property(name) => {}
            // Ascending-only takes precedence when both lists name the property.
            Some(s) if s.is_ascending_only_property(name) => items.push(name.to_string()),
            Some(s) if s.is_descending_only_property(name) => items.push(format!("{} desc", name)),
            _ => {
                items.push(name.to_string());
                items.push(format!("{} desc", name));
            }
        }
    }

    Some(enum_parameter(
        "$orderby",
        "Order items by property values",
        items,
    ))
}

/// Builds `$select` for `source`.
pub fn select(
    ctx: &ODataContext<'_>,
    source: &NavigationSource<'_>,
) -> AppResult<Option<Parameter>> {
    let (target, entity_type) = source.resolve(ctx.model())?;
    Ok(create_select(ctx, &target, entity_type))
}

/// Builds `$select` for `target`: every structural property, then every
/// navigation property not restricted by `NavigationRestrictions`.
///
/// Returns `None` when the target is not navigable.
pub fn create_select(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
    entity_type: &EntityType,
) -> Option<Parameter> {
    let navigation = ctx.resolver().navigation_restrictions(target);
    if navigation.is_some_and(|n| !n.is_navigable()) {
        tracing::debug!(path = %ctx.model().target_path(target), "$select disabled");
        return None;
    }

    let model = ctx.model();
    let structural = model
        .structural_properties(entity_type)
        .map(|p| p.name.clone());
    let navigable = model
        .navigation_properties(entity_type)
        .filter(|p| !navigation.is_some_and(|n| n.is_restricted_property(&p.name)))
        .map(|p| p.name.clone());

    Some(enum_parameter(
        "$select",
        "Select properties to be returned",
        structural.chain(navigable).collect(),
    ))
}

/// Builds `$expand` for `source`.
pub fn expand(
    ctx: &ODataContext<'_>,
    source: &NavigationSource<'_>,
) -> AppResult<Option<Parameter>> {
    let (target, entity_type) = source.resolve(ctx.model())?;
    Ok(create_expand(ctx, &target, entity_type))
}

/// Builds `$expand` for `target`: `*` followed by every expandable
/// navigation property.
///
/// Returns `None` when the target is not expandable.
pub fn create_expand(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
    entity_type: &EntityType,
) -> Option<Parameter> {
    let restrictions = ctx.resolver().expand_restrictions(target);
    if restrictions.is_some_and(|r| !r.expandable) {
        tracing::debug!(path = %ctx.model().target_path(target), "$expand disabled");
        return None;
    }

    let items = std::iter::once(EXPAND_ALL.to_string())
        .chain(
            ctx.model()
                .navigation_properties(entity_type)
                .filter(|p| !restrictions.is_some_and(|r| r.is_non_expandable_property(&p.name)))
                .map(|p| p.name.clone()),
        )
        .collect();

    Some(enum_parameter("$expand", "Expand related entities", items))
}

fn enum_parameter(name: &str, description: &str, items: Vec<String>) -> Parameter {
    let schema = ObjectBuilder::new()
        .schema_type(Type::String)
        .enum_values(Some(items))
        .build();

    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .description(Some(description))
        .schema(Some(RefOr::T(Schema::Object(schema))))
        .style(Some(ParameterStyle::Simple))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edm::EdmModel;
    use crate::settings::GenerationSettings;
    use pretty_assertions::assert_eq;

    const MODEL: &str = r#"
namespace: NS
entityTypes:
  - name: Person
    key: [Id]
    properties:
      - { name: Id, type: Edm.Int32 }
      - { name: Name, type: Edm.String }
    navigationProperties:
      - { name: Friends, type: NS.Person, collection: true }
      - { name: Manager, type: NS.Person }
container:
  name: Default
  entitySets:
    - { name: People, entityType: NS.Person }
    - { name: Restricted, entityType: NS.Person }
    - { name: Locked, entityType: NS.Person }
annotations:
  NS.Default/Restricted:
    SortRestrictions:
      DescendingOnlyProperties: [Name]
      AscendingOnlyProperties: [Id]
    NavigationRestrictions:
      RestrictedProperties:
        - { NavigationProperty: Friends, Navigability: None }
    ExpandRestrictions:
      NonExpandableProperties: [Manager]
  NS.Default/Locked:
    SortRestrictions:
      Sortable: false
    NavigationRestrictions:
      Navigability: None
    ExpandRestrictions:
      Expandable: false
"#;

    fn enum_of(param: &Parameter) -> Vec<String> {
        let json = serde_json::to_value(param).unwrap();
        assert_eq!(json["schema"]["type"], "string");
        assert_eq!(json["style"], "simple");
        assert_eq!(json["in"], "query");
        serde_json::from_value(json["schema"]["enum"].clone()).unwrap()
    }

    fn with_set<F>(set: &str, check: F)
    where
        F: FnOnce(&ODataContext<'_>, &NavigationSource<'_>),
    {
        let model = EdmModel::from_yaml_str(MODEL).unwrap();
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let source = NavigationSource::EntitySet(model.entity_set(set).unwrap());
        check(&ctx, &source);
    }

    #[test]
    fn test_order_by_unrestricted() {
        with_set("People", |ctx, source| {
            let param = order_by(ctx, source).unwrap().unwrap();
            assert_eq!(param.name, "$orderby");
            assert_eq!(enum_of(&param), vec!["Id", "Id desc", "Name", "Name desc"]);
        });
    }

    #[test]
    fn test_order_by_direction_restrictions() {
        with_set("Restricted", |ctx, source| {
            let param = order_by(ctx, source).unwrap().unwrap();
            assert_eq!(enum_of(&param), vec!["Id", "Name desc"]);
        });
    }

    #[test]
    fn test_ascending_only_wins_over_descending_only() {
        let mut model = EdmModel::from_yaml_str(MODEL).unwrap();
        let sort = model
            .annotations
            .get_mut("NS.Default/Restricted")
            .and_then(|a| a.sort_restrictions.as_mut())
            .unwrap();
        sort.descending_only_properties.push("Id".into());
        sort.non_sortable_properties.push("Name".into());

        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let source = NavigationSource::EntitySet(model.entity_set("Restricted").unwrap());
        let param = order_by(&ctx, &source).unwrap().unwrap();
        assert_eq!(enum_of(&param), vec!["Id"]);
    }

    #[test]
    fn test_select_lists_structural_then_navigation() {
        with_set("People", |ctx, source| {
            let param = select(ctx, source).unwrap().unwrap();
            assert_eq!(param.name, "$select");
            assert_eq!(enum_of(&param), vec!["Id", "Name", "Friends", "Manager"]);
        });
        with_set("Restricted", |ctx, source| {
            let param = select(ctx, source).unwrap().unwrap();
            assert_eq!(enum_of(&param), vec!["Id", "Name", "Manager"]);
        });
    }

    #[test]
    fn test_expand_starts_with_wildcard() {
        with_set("People", |ctx, source| {
            let param = expand(ctx, source).unwrap().unwrap();
            assert_eq!(param.name, "$expand");
            assert_eq!(enum_of(&param), vec!["*", "Friends", "Manager"]);
        });
        with_set("Restricted", |ctx, source| {
            let param = expand(ctx, source).unwrap().unwrap();
            assert_eq!(enum_of(&param), vec!["*", "Friends"]);
        });
    }

    #[test]
    fn test_disabled_targets_yield_nothing() {
        with_set("Locked", |ctx, source| {
            assert!(order_by(ctx, source).unwrap().is_none());
            assert!(select(ctx, source).unwrap().is_none());
            assert!(expand(ctx, source).unwrap().is_none());
        });
    }

    #[test]
    fn test_navigation_property_source_uses_its_own_annotations() {
        let mut model = EdmModel::from_yaml_str(MODEL).unwrap();
        model.annotations.insert(
            "NS.Person/Friends".into(),
            serde_yaml::from_str("ExpandRestrictions: { Expandable: false }").unwrap(),
        );
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let person = model.entity_type("Person").unwrap();
        let friends = NavigationSource::NavigationProperty {
            owner: person,
            property: &person.navigation_properties[0],
        };
        assert!(expand(&ctx, &friends).unwrap().is_none());
        assert!(order_by(&ctx, &friends).unwrap().is_some());
    }
}
