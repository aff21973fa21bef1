//! # Catalog References
//!
//! Decides, per target, whether a catalog option applies. The answer is either
//! a reference to the catalog entry or nothing; never an inline copy.

use super::catalog::QueryOption;
use super::context::ODataContext;
use crate::edm::AnnotatableTarget;
use utoipa::openapi::path::Parameter;
use utoipa::openapi::RefOr;

/// Returns a reference to `option` unless `target` disables it.
///
/// An unannotated target permits every option.
pub fn create_reference(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
    option: QueryOption,
) -> Option<RefOr<Parameter>> {
    match ctx.resolver().capability(target, option.capability()) {
        Some(record) if !record.is_permitted() => {
            tracing::debug!(
                path = %ctx.model().target_path(target),
                option = option.query_name(),
                "query option disabled by capability annotation"
            );
            None
        }
        _ => Some(option.reference()),
    }
}

/// `$top` reference, unless `TopSupported` is false.
pub fn create_top(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
) -> Option<RefOr<Parameter>> {
    create_reference(ctx, target, QueryOption::Top)
}

/// `$skip` reference, unless `SkipSupported` is false.
pub fn create_skip(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
) -> Option<RefOr<Parameter>> {
    create_reference(ctx, target, QueryOption::Skip)
}

/// `$count` reference, unless the target is not countable.
pub fn create_count(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
) -> Option<RefOr<Parameter>> {
    create_reference(ctx, target, QueryOption::Count)
}

/// `$filter` reference, unless the target is not filterable.
pub fn create_filter(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
) -> Option<RefOr<Parameter>> {
    create_reference(ctx, target, QueryOption::Filter)
}

/// `$search` reference, unless the target is not searchable.
pub fn create_search(
    ctx: &ODataContext<'_>,
    target: &AnnotatableTarget<'_>,
) -> Option<RefOr<Parameter>> {
    create_reference(ctx, target, QueryOption::Search)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edm::EdmModel;
    use crate::settings::GenerationSettings;

    const MODEL: &str = r#"
namespace: NS
entityTypes:
  - name: Airline
    key: [Code]
    properties:
      - { name: Code, type: Edm.String }
container:
  name: Default
  entitySets:
    - { name: Airlines, entityType: NS.Airline }
    - { name: Airports, entityType: NS.Airline }
annotations:
  NS.Default/Airlines:
    TopSupported: false
    SkipSupported: true
    CountRestrictions:
      Countable: false
    FilterRestrictions:
      Filterable: true
    SearchRestrictions:
      Searchable: false
"#;

    fn ref_location(param: Option<RefOr<Parameter>>) -> Option<String> {
        param.map(|p| match p {
            RefOr::Ref(r) => r.ref_location,
            RefOr::T(_) => panic!("Catalog options must never be inlined"),
        })
    }

    #[test]
    fn test_unannotated_target_gets_references() {
        let model = EdmModel::from_yaml_str(MODEL).unwrap();
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let target = AnnotatableTarget::EntitySet(model.entity_set("Airports").unwrap());

        for option in QueryOption::ALL {
            assert_eq!(
                ref_location(create_reference(&ctx, &target, option)),
                Some(format!("#/components/parameters/{}", option.id()))
            );
        }
    }

    #[test]
    fn test_annotation_flags_decide() {
        let model = EdmModel::from_yaml_str(MODEL).unwrap();
        let settings = GenerationSettings::default();
        let ctx = ODataContext::new(&model, &settings);
        let target = AnnotatableTarget::EntitySet(model.entity_set("Airlines").unwrap());

        assert_eq!(ref_location(create_top(&ctx, &target)), None);
        assert_eq!(
            ref_location(create_skip(&ctx, &target)).as_deref(),
            Some("#/components/parameters/skip")
        );
        assert_eq!(ref_location(create_count(&ctx, &target)), None);
        assert_eq!(
            ref_location(create_filter(&ctx, &target)).as_deref(),
            Some("#/components/parameters/filter")
        );
        assert_eq!(ref_location(create_search(&ctx, &target)), None);
    }
}
