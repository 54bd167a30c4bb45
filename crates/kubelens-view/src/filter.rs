use std::collections::BTreeSet;
use std::fmt;

use kube::core::DynamicObject;

/// Sentinel selecting every namespace
pub const ALL_NAMESPACES: &str = "all";

/// Namespace chosen in the filter drop-down
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum NamespaceSelection {
    #[default]
    All,
    Named(String),
}

impl NamespaceSelection {
    /// Parse user input; `all` (any case) or an empty string select everything
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL_NAMESPACES) {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether an object passes this selection
    pub fn matches(&self, object: &DynamicObject) -> bool {
        match self {
            Self::All => true,
            Self::Named(ns) => object.metadata.namespace.as_deref() == Some(ns.as_str()),
        }
    }

    /// Keep the selection if `filter` still offers it, else fall back to all
    ///
    /// Returns whether the selection was kept.
    pub fn refresh(&mut self, filter: &NamespaceFilter) -> bool {
        if filter.contains(self) {
            return true;
        }
        tracing::debug!(selection = %self, "namespace no longer present, showing all");
        *self = Self::All;
        false
    }
}

impl fmt::Display for NamespaceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_NAMESPACES),
            Self::Named(ns) => f.write_str(ns),
        }
    }
}

/// Distinct namespaces observed in one fetched batch, plus the `all` sentinel
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NamespaceFilter {
    namespaces: BTreeSet<String>,
}

impl NamespaceFilter {
    pub fn contains(&self, selection: &NamespaceSelection) -> bool {
        match selection {
            NamespaceSelection::All => true,
            NamespaceSelection::Named(ns) => self.namespaces.contains(ns),
        }
    }

    /// Observed namespaces, lexically sorted, without the sentinel
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(String::as_str)
    }

    /// Drop-down options: `all` first, then each namespace
    pub fn options(&self) -> Vec<NamespaceSelection> {
        std::iter::once(NamespaceSelection::All)
            .chain(self.namespaces.iter().cloned().map(NamespaceSelection::Named))
            .collect()
    }
}

/// Collect the distinct non-empty namespaces of a batch
pub fn derive_namespaces(items: &[DynamicObject]) -> NamespaceFilter {
    NamespaceFilter {
        namespaces: items
            .iter()
            .filter_map(|o| o.metadata.namespace.as_deref())
            .filter(|ns| !ns.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Objects passing `selection`; `All` passes everything
pub fn filter_by_namespace<'a>(
    items: &'a [DynamicObject],
    selection: &'a NamespaceSelection,
) -> impl Iterator<Item = &'a DynamicObject> {
    items.iter().filter(move |o| selection.matches(o))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::core::{ApiResource, GroupVersionKind};

    fn pod(name: &str, namespace: Option<&str>) -> DynamicObject {
        let resource = ApiResource::from_gvk(&GroupVersionKind::gvk("", "v1", "Pod"));
        let obj = DynamicObject::new(name, &resource);
        match namespace {
            Some(ns) => obj.within(ns),
            None => obj,
        }
    }

    #[test]
    fn test_empty_batch_yields_only_all() {
        let filter = derive_namespaces(&[]);
        assert_eq!(filter.options(), vec![NamespaceSelection::All]);
        assert_eq!(filter.namespaces().count(), 0);
    }

    #[test]
    fn test_derive_distinct_sorted() {
        let items = vec![
            pod("a", Some("web")),
            pod("b", Some("batch")),
            pod("c", Some("web")),
            pod("d", None),
            pod("e", Some("")),
        ];
        let filter = derive_namespaces(&items);
        assert_eq!(filter.namespaces().collect::<Vec<_>>(), vec!["batch", "web"]);
        assert_eq!(
            filter.options(),
            vec![
                NamespaceSelection::All,
                NamespaceSelection::Named("batch".into()),
                NamespaceSelection::Named("web".into()),
            ]
        );
    }

    #[test]
    fn test_filter_by_namespace() {
        let items = vec![pod("a", Some("web")), pod("b", Some("batch")), pod("c", Some("web"))];

        let web = NamespaceSelection::parse("web");
        let names: Vec<_> = filter_by_namespace(&items, &web)
            .map(|o| o.metadata.name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "c"]);

        let all = NamespaceSelection::parse("ALL");
        assert_eq!(filter_by_namespace(&items, &all).count(), 3);
    }

    #[test]
    fn test_selection_preserved_or_reset() {
        let items = vec![pod("a", Some("web")), pod("b", Some("batch"))];
        let filter = derive_namespaces(&items);

        let mut selection = NamespaceSelection::parse("web");
        assert!(selection.refresh(&filter));
        assert_eq!(selection, NamespaceSelection::Named("web".into()));

        let mut selection = NamespaceSelection::parse("gone");
        assert!(!selection.refresh(&filter));
        assert!(selection.is_all());
    }
}
