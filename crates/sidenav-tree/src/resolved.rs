//! Resolved, render-ready navigation trees.
//!
//! A resolved tree mirrors its declarative source node for node, with every
//! document id replaced by the catalog metadata it points at. It is built
//! once by the resolver and never mutated.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use sidenav_catalog::{CatalogIndex, DocumentMetadata};

use crate::model::{Category, DocRef, NavNode, NavTree};

/// Document leaf with catalog metadata attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedDoc {
    /// Catalog metadata (id, title, output path).
    #[serde(flatten)]
    pub metadata: DocumentMetadata,
    /// Label override from the sidebar declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ResolvedDoc {
    /// Label to render: the override if declared, otherwise the catalog title.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.metadata.title)
    }
}

/// Category with resolved children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedCategory {
    /// Display label.
    pub label: String,
    /// Rendering hint from the declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Children in sidebar order.
    pub items: Vec<ResolvedNode>,
}

/// One entry in a resolved tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedNode {
    /// Resolved document.
    Doc(ResolvedDoc),
    /// Category with resolved children.
    Category(ResolvedCategory),
}

impl ResolvedNode {
    fn to_declarative(&self) -> NavNode {
        match self {
            Self::Doc(doc) => NavNode::Doc(DocRef {
                id: doc.metadata.id.clone(),
                label: doc.label.clone(),
            }),
            Self::Category(category) => NavNode::Category(Category {
                label: category.label.clone(),
                items: category.items.iter().map(Self::to_declarative).collect(),
                collapsed: category.collapsed,
            }),
        }
    }
}

/// A validated sidebar ready for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedTree {
    /// Sidebar name.
    pub name: String,
    /// Top-level entries in sidebar order.
    pub items: Vec<ResolvedNode>,
}

impl ResolvedTree {
    /// Discard catalog metadata and rebuild the declarative tree.
    ///
    /// The result equals the tree this one was resolved from.
    #[must_use]
    pub fn to_declarative(&self) -> NavTree {
        NavTree::new(
            self.items
                .iter()
                .map(ResolvedNode::to_declarative)
                .collect(),
        )
    }

    /// All documents in sidebar order (depth-first).
    #[must_use]
    pub fn documents(&self) -> Vec<&ResolvedDoc> {
        let mut docs = Vec::new();
        collect_documents(&self.items, &mut docs);
        docs
    }

    /// Previous and next documents around `id` in sidebar order.
    ///
    /// Returns `None` if the document is not in this tree.
    #[must_use]
    pub fn adjacent(&self, id: &str) -> Option<(Option<&ResolvedDoc>, Option<&ResolvedDoc>)> {
        let docs = self.documents();
        let pos = docs.iter().position(|d| d.metadata.id == id)?;
        let prev = pos.checked_sub(1).map(|i| docs[i]);
        let next = docs.get(pos + 1).copied();
        Some((prev, next))
    }

    /// Labels of the categories enclosing `id`, outermost first.
    ///
    /// Returns `None` if the document is not in this tree.
    #[must_use]
    pub fn breadcrumbs(&self, id: &str) -> Option<Vec<&str>> {
        let mut trail = Vec::new();
        find_trail(&self.items, id, &mut trail).then_some(trail)
    }
}

fn collect_documents<'a>(items: &'a [ResolvedNode], docs: &mut Vec<&'a ResolvedDoc>) {
    for item in items {
        match item {
            ResolvedNode::Doc(doc) => docs.push(doc),
            ResolvedNode::Category(category) => collect_documents(&category.items, docs),
        }
    }
}

fn find_trail<'a>(items: &'a [ResolvedNode], id: &str, trail: &mut Vec<&'a str>) -> bool {
    for item in items {
        match item {
            ResolvedNode::Doc(doc) if doc.metadata.id == id => return true,
            ResolvedNode::Doc(_) => {}
            ResolvedNode::Category(category) => {
                trail.push(&category.label);
                if find_trail(&category.items, id, trail) {
                    return true;
                }
                trail.pop();
            }
        }
    }
    false
}

/// Every sidebar of a sidebars file, resolved, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedSidebars {
    trees: Vec<ResolvedTree>,
}

impl ResolvedSidebars {
    pub(crate) fn new(trees: Vec<ResolvedTree>) -> Self {
        Self { trees }
    }

    /// Get a resolved sidebar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedTree> {
        self.trees.iter().find(|t| t.name == name)
    }

    /// Iterate over resolved sidebars in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedTree> {
        self.trees.iter()
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    /// Whether there are no sidebars.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Catalog ids that no sidebar references, sorted.
    #[must_use]
    pub fn unreferenced<'c>(&self, catalog: &'c CatalogIndex) -> Vec<&'c str> {
        let referenced: std::collections::HashSet<&str> = self
            .trees
            .iter()
            .flat_map(ResolvedTree::documents)
            .map(|doc| doc.metadata.id.as_str())
            .collect();
        catalog
            .ids()
            .into_iter()
            .filter(|id| !referenced.contains(*id))
            .collect()
    }
}

impl Serialize for ResolvedSidebars {
    /// Serializes as a map of sidebar name to entries, mirroring the input file.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.trees.len()))?;
        for tree in &self.trees {
            map.serialize_entry(&tree.name, &tree.items)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(id: &str, title: &str) -> ResolvedNode {
        ResolvedNode::Doc(ResolvedDoc {
            metadata: DocumentMetadata::from_id(id, title),
            label: None,
        })
    }

    fn category(label: &str, items: Vec<ResolvedNode>) -> ResolvedNode {
        ResolvedNode::Category(ResolvedCategory {
            label: label.to_owned(),
            collapsed: None,
            items,
        })
    }

    fn sample_tree() -> ResolvedTree {
        ResolvedTree {
            name: "docs".to_owned(),
            items: vec![
                doc("index", "Home"),
                category(
                    "Getting Started",
                    vec![doc("install", "Install"), doc("quick-start", "Quick Start")],
                ),
                category(
                    "Guides",
                    vec![category("Advanced", vec![doc("guides/ecs", "ECS")])],
                ),
            ],
        }
    }

    #[test]
    fn test_documents_in_sidebar_order() {
        let tree = sample_tree();

        let ids: Vec<_> = tree
            .documents()
            .iter()
            .map(|d| d.metadata.id.as_str())
            .collect();

        assert_eq!(ids, vec!["index", "install", "quick-start", "guides/ecs"]);
    }

    #[test]
    fn test_adjacent_crosses_categories() {
        let tree = sample_tree();

        let (prev, next) = tree.adjacent("quick-start").unwrap();

        assert_eq!(prev.unwrap().metadata.id, "install");
        assert_eq!(next.unwrap().metadata.id, "guides/ecs");
    }

    #[test]
    fn test_adjacent_at_edges() {
        let tree = sample_tree();

        let (prev, next) = tree.adjacent("index").unwrap();
        assert!(prev.is_none());
        assert_eq!(next.unwrap().metadata.id, "install");

        let (prev, next) = tree.adjacent("guides/ecs").unwrap();
        assert_eq!(prev.unwrap().metadata.id, "quick-start");
        assert!(next.is_none());

        assert!(tree.adjacent("missing").is_none());
    }

    #[test]
    fn test_breadcrumbs() {
        let tree = sample_tree();

        assert_eq!(tree.breadcrumbs("index"), Some(vec![]));
        assert_eq!(tree.breadcrumbs("install"), Some(vec!["Getting Started"]));
        assert_eq!(
            tree.breadcrumbs("guides/ecs"),
            Some(vec!["Guides", "Advanced"])
        );
        assert_eq!(tree.breadcrumbs("missing"), None);
    }

    #[test]
    fn test_display_label() {
        let plain = ResolvedDoc {
            metadata: DocumentMetadata::from_id("index", "Home"),
            label: None,
        };
        let overridden = ResolvedDoc {
            label: Some("Start Here".to_owned()),
            ..plain.clone()
        };

        assert_eq!(plain.display_label(), "Home");
        assert_eq!(overridden.display_label(), "Start Here");
    }

    #[test]
    fn test_serialization() {
        let tree = ResolvedTree {
            name: "docs".to_owned(),
            items: vec![category("Getting Started", vec![doc("install", "Install")])],
        };

        let json = serde_json::to_value(&tree).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "docs",
                "items": [{
                    "type": "category",
                    "label": "Getting Started",
                    "items": [{
                        "type": "doc",
                        "id": "install",
                        "title": "Install",
                        "path": "/install"
                    }]
                }]
            })
        );
    }

    #[test]
    fn test_unreferenced() {
        let sidebars = ResolvedSidebars::new(vec![sample_tree()]);
        let catalog = CatalogIndex::from_documents([
            DocumentMetadata::from_id("index", "Home"),
            DocumentMetadata::from_id("install", "Install"),
            DocumentMetadata::from_id("quick-start", "Quick Start"),
            DocumentMetadata::from_id("guides/ecs", "ECS"),
            DocumentMetadata::from_id("changelog", "Changelog"),
            DocumentMetadata::from_id("api/core", "Core"),
        ]);

        assert_eq!(sidebars.unreferenced(&catalog), vec!["api/core", "changelog"]);
    }
}
