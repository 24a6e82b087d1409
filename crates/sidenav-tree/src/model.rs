//! Declarative navigation model.
//!
//! This is the surface authors edit. Each entry is either a bare document id
//! (shorthand for a doc reference) or a tagged object:
//!
//! ```json
//! {
//!   "docs": [
//!     "index",
//!     {"type": "doc", "id": "architecture", "label": "How it works"},
//!     {"type": "category", "label": "Guides", "items": ["guides/ecs"]}
//!   ]
//! }
//! ```

use std::fmt;

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Leaf node referencing one document by catalog id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocRef {
    /// Catalog identifier.
    pub id: String,
    /// Display label override. Falls back to the catalog title when absent.
    pub label: Option<String>,
}

/// Interior node grouping an ordered sequence of children under a label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    /// Display label. Not an identifier: siblings may share it.
    pub label: String,
    /// Children in sidebar order. Must be non-empty.
    pub items: Vec<NavNode>,
    /// Rendering hint passed through verbatim.
    pub collapsed: Option<bool>,
}

/// One entry in a navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavNode {
    /// Document reference.
    Doc(DocRef),
    /// Category with children.
    Category(Category),
}

impl NavNode {
    /// Create a doc reference without a label override.
    #[must_use]
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(DocRef {
            id: id.into(),
            label: None,
        })
    }

    /// Create a category without a collapse hint.
    #[must_use]
    pub fn category(label: impl Into<String>, items: Vec<NavNode>) -> Self {
        Self::Category(Category {
            label: label.into(),
            items,
            collapsed: None,
        })
    }
}

/// Object form of a node as written by authors.
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
enum TaggedNode {
    Doc {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },
    Category {
        label: String,
        items: Vec<NavNode>,
        #[serde(default)]
        collapsed: Option<bool>,
    },
}

impl From<TaggedNode> for NavNode {
    fn from(node: TaggedNode) -> Self {
        match node {
            TaggedNode::Doc { id, label } => Self::Doc(DocRef { id, label }),
            TaggedNode::Category {
                label,
                items,
                collapsed,
            } => Self::Category(Category {
                label,
                items,
                collapsed,
            }),
        }
    }
}

impl<'de> Deserialize<'de> for NavNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = NavNode;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a document id or an object with a `type` of \"doc\" or \"category\"")
            }

            fn visit_str<E: de::Error>(self, id: &str) -> Result<NavNode, E> {
                Ok(NavNode::doc(id))
            }

            fn visit_string<E: de::Error>(self, id: String) -> Result<NavNode, E> {
                Ok(NavNode::doc(id))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<NavNode, A::Error> {
                TaggedNode::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(NavNode::from)
            }
        }

        deserializer.deserialize_any(NodeVisitor)
    }
}

/// Borrowed object form used for serialization.
#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum TaggedNodeRef<'a> {
    Doc {
        id: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<&'a str>,
    },
    Category {
        label: &'a str,
        items: &'a [NavNode],
        #[serde(skip_serializing_if = "Option::is_none")]
        collapsed: Option<bool>,
    },
}

impl Serialize for NavNode {
    /// Always serializes the object form, so output is normalized.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let tagged = match self {
            Self::Doc(doc) => TaggedNodeRef::Doc {
                id: &doc.id,
                label: doc.label.as_deref(),
            },
            Self::Category(category) => TaggedNodeRef::Category {
                label: &category.label,
                items: &category.items,
                collapsed: category.collapsed,
            },
        };
        tagged.serialize(serializer)
    }
}

/// Ordered sequence of nodes forming one sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavTree {
    /// Top-level entries in sidebar order.
    pub items: Vec<NavNode>,
}

impl NavTree {
    /// Create a tree from top-level entries.
    #[must_use]
    pub fn new(items: Vec<NavNode>) -> Self {
        Self { items }
    }
}

/// Error returned when a sidebar name is registered twice.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("Duplicate sidebar name: {0}")]
pub struct DuplicateSidebar(pub String);

/// Named sidebars in declaration order.
///
/// Names are unique; a document declaring the same name twice fails to
/// deserialize rather than silently keeping one of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sidebars {
    entries: Vec<(String, NavTree)>,
}

impl Sidebars {
    /// Create an empty set of sidebars.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sidebar.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateSidebar`] if the name is already registered.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        tree: NavTree,
    ) -> Result<(), DuplicateSidebar> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(DuplicateSidebar(name));
        }
        self.entries.push((name, tree));
        Ok(())
    }

    /// Get a sidebar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&NavTree> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, tree)| tree)
    }

    /// Sidebar names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Iterate over `(name, tree)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NavTree)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no sidebar is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn entries(&self) -> &[(String, NavTree)] {
        &self.entries
    }
}

impl<'de> Deserialize<'de> for Sidebars {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SidebarsVisitor;

        impl<'de> Visitor<'de> for SidebarsVisitor {
            type Value = Sidebars;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of sidebar names to entry lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Sidebars, A::Error> {
                let mut sidebars = Sidebars::new();
                while let Some((name, tree)) = map.next_entry::<String, NavTree>()? {
                    sidebars.insert(name, tree).map_err(de::Error::custom)?;
                }
                Ok(sidebars)
            }
        }

        deserializer.deserialize_map(SidebarsVisitor)
    }
}

impl Serialize for Sidebars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, tree) in &self.entries {
            map.serialize_entry(name, tree)?;
        }
        map.end()
    }
}
