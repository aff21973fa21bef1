//! # Capability Annotations
//!
//! Typed records for the `Org.OData.Capabilities.V1` terms that restrict query
//! options, plus the lookup seam (`CapabilityResolver`) the parameter builders
//! consume. A target without a record is fully permissive.

use super::model::AnnotatableTarget;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// The annotations attached to a single annotation target.
///
/// Keys in serialized documents use the unqualified term names
/// (`SortRestrictions`, `TopSupported`, `Description`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TargetAnnotations {
    /// `Core.Description`.
    pub description: Option<String>,
    /// `Capabilities.TopSupported`.
    pub top_supported: Option<bool>,
    /// `Capabilities.SkipSupported`.
    pub skip_supported: Option<bool>,
    /// `Capabilities.CountRestrictions`.
    pub count_restrictions: Option<CountRestrictions>,
    /// `Capabilities.FilterRestrictions`.
    pub filter_restrictions: Option<FilterRestrictions>,
    /// `Capabilities.SearchRestrictions`.
    pub search_restrictions: Option<SearchRestrictions>,
    /// `Capabilities.SortRestrictions`.
    pub sort_restrictions: Option<SortRestrictions>,
    /// `Capabilities.NavigationRestrictions`.
    pub navigation_restrictions: Option<NavigationRestrictions>,
    /// `Capabilities.ExpandRestrictions`.
    pub expand_restrictions: Option<ExpandRestrictions>,
}

/// Restrictions on `$count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CountRestrictions {
    /// Whether the whole target can be counted.
    pub countable: bool,
    /// Collection-valued properties that cannot be counted.
    pub non_countable_properties: Vec<String>,
    /// Navigation properties that cannot be counted.
    pub non_countable_navigation_properties: Vec<String>,
}

impl Default for CountRestrictions {
    fn default() -> Self {
        Self {
            countable: true,
            non_countable_properties: Vec::new(),
            non_countable_navigation_properties: Vec::new(),
        }
    }
}

/// Restrictions on `$filter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FilterRestrictions {
    /// Whether `$filter` is supported.
    pub filterable: bool,
    /// Whether `$filter` must be specified.
    pub requires_filter: bool,
    /// Properties that must appear in every filter expression.
    pub required_properties: Vec<String>,
    /// Properties that cannot be used in filter expressions.
    pub non_filterable_properties: Vec<String>,
}

impl Default for FilterRestrictions {
    fn default() -> Self {
        Self {
            filterable: true,
            requires_filter: false,
            required_properties: Vec::new(),
            non_filterable_properties: Vec::new(),
        }
    }
}

/// Restrictions on `$search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SearchRestrictions {
    /// Whether `$search` is supported.
    pub searchable: bool,
}

impl Default for SearchRestrictions {
    fn default() -> Self {
        Self { searchable: true }
    }
}

/// Restrictions on `$orderby`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SortRestrictions {
    /// Whether `$orderby` is supported at all.
    pub sortable: bool,
    /// Properties that can only be sorted ascending.
    pub ascending_only_properties: Vec<String>,
    /// Properties that can only be sorted descending.
    pub descending_only_properties: Vec<String>,
    /// Properties that cannot be sorted.
    pub non_sortable_properties: Vec<String>,
}

impl Default for SortRestrictions {
    fn default() -> Self {
        Self {
            sortable: true,
            ascending_only_properties: Vec::new(),
            descending_only_properties: Vec::new(),
            non_sortable_properties: Vec::new(),
        }
    }
}

impl SortRestrictions {
    /// Whether `property` is listed as non-sortable.
    pub fn is_non_sortable_property(&self, property: &str) -> bool {
        self.non_sortable_properties.iter().any(|p| p == property)
    }

    /// Whether `property` is listed as ascending-only.
    pub fn is_ascending_only_property(&self, property: &str) -> bool {
        self.ascending_only_properties.iter().any(|p| p == property)
    }

    /// Whether `property` is listed as descending-only.
    pub fn is_descending_only_property(&self, property: &str) -> bool {
        self.descending_only_properties.iter().any(|p| p == property)
    }
}

/// Navigability of a target or a navigation property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationType {
    /// Navigation is supported to any depth.
    Recursive,
    /// Only a single level of navigation is supported.
    Single,
    /// Navigation is not supported.
    None,
}

/// A per-property entry of `NavigationRestrictions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NavigationPropertyRestriction {
    /// Path of the navigation property, relative to the annotated target.
    pub navigation_property: String,
    /// Navigability of this particular property.
    #[serde(default)]
    pub navigability: Option<NavigationType>,
}

/// Restrictions on navigating (and therefore selecting navigation properties).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NavigationRestrictions {
    /// Default navigability of the target.
    pub navigability: Option<NavigationType>,
    /// Property-specific overrides.
    pub restricted_properties: Vec<NavigationPropertyRestriction>,
}

impl NavigationRestrictions {
    /// A target is navigable unless its navigability is explicitly `None`.
    pub fn is_navigable(&self) -> bool {
        self.navigability != Some(NavigationType::None)
    }

    /// Whether `property` is explicitly marked non-navigable.
    pub fn is_restricted_property(&self, property: &str) -> bool {
        self.restricted_properties.iter().any(|r| {
            r.navigation_property == property && r.navigability == Some(NavigationType::None)
        })
    }
}

/// Restrictions on `$expand`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ExpandRestrictions {
    /// Whether `$expand` is supported.
    pub expandable: bool,
    /// Navigation properties that cannot be expanded.
    pub non_expandable_properties: Vec<String>,
    /// Maximum expand depth, if limited.
    pub max_levels: Option<u32>,
}

impl Default for ExpandRestrictions {
    fn default() -> Self {
        Self {
            expandable: true,
            non_expandable_properties: Vec::new(),
            max_levels: None,
        }
    }
}

impl ExpandRestrictions {
    /// Whether `property` is listed as non-expandable.
    pub fn is_non_expandable_property(&self, property: &str) -> bool {
        self.non_expandable_properties.iter().any(|p| p == property)
    }
}

/// The capability terms the builders look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// `TopSupported`.
    Top,
    /// `SkipSupported`.
    Skip,
    /// `CountRestrictions`.
    Count,
    /// `FilterRestrictions`.
    Filter,
    /// `SearchRestrictions`.
    Search,
    /// `SortRestrictions`.
    Sort,
    /// `NavigationRestrictions`.
    Navigation,
    /// `ExpandRestrictions`.
    Expand,
}

/// A borrowed view of one capability annotation present on a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CapabilityRecord<'a> {
    /// `TopSupported`.
    TopSupported(bool),
    /// `SkipSupported`.
    SkipSupported(bool),
    /// `CountRestrictions`.
    Count(&'a CountRestrictions),
    /// `FilterRestrictions`.
    Filter(&'a FilterRestrictions),
    /// `SearchRestrictions`.
    Search(&'a SearchRestrictions),
    /// `SortRestrictions`.
    Sort(&'a SortRestrictions),
    /// `NavigationRestrictions`.
    Navigation(&'a NavigationRestrictions),
    /// `ExpandRestrictions`.
    Expand(&'a ExpandRestrictions),
}

impl CapabilityRecord<'_> {
    /// The record's top-level permission flag.
    pub fn is_permitted(&self) -> bool {
        match self {
            Self::TopSupported(supported) | Self::SkipSupported(supported) => *supported,
            Self::Count(r) => r.countable,
            Self::Filter(r) => r.filterable,
            Self::Search(r) => r.searchable,
            Self::Sort(r) => r.sortable,
            Self::Navigation(r) => r.is_navigable(),
            Self::Expand(r) => r.expandable,
        }
    }
}

impl TargetAnnotations {
    /// Projects the record for `kind`, if annotated.
    pub fn record(&self, kind: CapabilityKind) -> Option<CapabilityRecord<'_>> {
        match kind {
            CapabilityKind::Top => self.top_supported.map(CapabilityRecord::TopSupported),
            CapabilityKind::Skip => self.skip_supported.map(CapabilityRecord::SkipSupported),
            CapabilityKind::Count => self.count_restrictions.as_ref().map(CapabilityRecord::Count),
            CapabilityKind::Filter => self
                .filter_restrictions
                .as_ref()
                .map(CapabilityRecord::Filter),
            CapabilityKind::Search => self
                .search_restrictions
                .as_ref()
                .map(CapabilityRecord::Search),
            CapabilityKind::Sort => self.sort_restrictions.as_ref().map(CapabilityRecord::Sort),
            CapabilityKind::Navigation => self
                .navigation_restrictions
                .as_ref()
                .map(CapabilityRecord::Navigation),
            CapabilityKind::Expand => self
                .expand_restrictions
                .as_ref()
                .map(CapabilityRecord::Expand),
        }
    }
}

/// Resolves vocabulary annotations for model elements.
///
/// `None` means the target carries no such annotation, which every builder
/// treats as "fully permissive".
pub trait CapabilityResolver: Send + Sync {
    /// Returns the capability record of `kind` declared on `target`.
    fn capability(
        &self,
        target: &AnnotatableTarget<'_>,
        kind: CapabilityKind,
    ) -> Option<CapabilityRecord<'_>>;

    /// Returns the `Core.Description` annotation declared on the element at
    /// `target_path`.
    fn description_annotation(&self, target_path: &str) -> Option<&str>;

    /// Typed lookup of `SortRestrictions`.
    fn sort_restrictions(&self, target: &AnnotatableTarget<'_>) -> Option<&SortRestrictions> {
        match self.capability(target, CapabilityKind::Sort) {
            Some(CapabilityRecord::Sort(r)) => Some(r),
            _ => None,
        }
    }

    /// Typed lookup of `NavigationRestrictions`.
    fn navigation_restrictions(
        &self,
        target: &AnnotatableTarget<'_>,
    ) -> Option<&NavigationRestrictions> {
        match self.capability(target, CapabilityKind::Navigation) {
            Some(CapabilityRecord::Navigation(r)) => Some(r),
            _ => None,
        }
    }

    /// Typed lookup of `ExpandRestrictions`.
    fn expand_restrictions(&self, target: &AnnotatableTarget<'_>) -> Option<&ExpandRestrictions> {
        match self.capability(target, CapabilityKind::Expand) {
            Some(CapabilityRecord::Expand(r)) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_fields_default_to_permissive() {
        let annotations: TargetAnnotations = serde_yaml::from_str(
            r#"
SortRestrictions:
  NonSortableProperties: [Photo]
"#,
        )
        .unwrap();
        let sort = annotations.sort_restrictions.as_ref().unwrap();
        assert!(sort.sortable);
        assert!(sort.is_non_sortable_property("Photo"));
        assert!(annotations.record(CapabilityKind::Top).is_none());
    }

    #[test]
    fn test_record_permission_flags() {
        let annotations = TargetAnnotations {
            top_supported: Some(false),
            search_restrictions: Some(SearchRestrictions { searchable: true }),
            navigation_restrictions: Some(NavigationRestrictions {
                navigability: Some(NavigationType::None),
                restricted_properties: Vec::new(),
            }),
            ..Default::default()
        };
        assert!(!annotations
            .record(CapabilityKind::Top)
            .unwrap()
            .is_permitted());
        assert!(annotations
            .record(CapabilityKind::Search)
            .unwrap()
            .is_permitted());
        assert!(!annotations
            .record(CapabilityKind::Navigation)
            .unwrap()
            .is_permitted());
    }

    #[test]
    fn test_restricted_property_requires_none_navigability() {
        let restrictions = NavigationRestrictions {
            navigability: Some(NavigationType::Recursive),
            restricted_properties: vec![
                NavigationPropertyRestriction {
                    navigation_property: "Friends".into(),
                    navigability: Some(NavigationType::None),
                },
                NavigationPropertyRestriction {
                    navigation_property: "Trips".into(),
                    navigability: Some(NavigationType::Single),
                },
            ],
        };
        assert!(restrictions.is_navigable());
        assert!(restrictions.is_restricted_property("Friends"));
        assert!(!restrictions.is_restricted_property("Trips"));
        assert!(!restrictions.is_restricted_property("Photo"));
    }
}
