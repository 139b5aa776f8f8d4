use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::error::DrawerError;

/// Identifier of a node, unique within its forest
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Closed set of teaching material categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialCategory {
    #[serde(rename = "PPT")]
    Ppt,
    Word,
    TestPaper,
    Homework,
    Video,
    Audio,
    Image,
    #[default]
    Other,
}

/// Folder nodes own an ordered list of child ids; files carry a category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Folder { children: Vec<NodeId> },
    File { category: MaterialCategory },
}

/// A single element of a forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub size: Option<String>,
    pub date: NaiveDate,
}

impl Node {
    /// Create an empty folder node
    pub fn new_folder(id: NodeId, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Folder {
                children: Vec::new(),
            },
            size: None,
            date,
        }
    }

    /// Create a file node
    pub fn new_file(
        id: NodeId,
        name: impl Into<String>,
        category: MaterialCategory,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: NodeKind::File { category },
            size: None,
            date,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    /// Child ids in rendering order; empty for files
    pub fn child_ids(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Folder { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    pub fn category(&self) -> Option<MaterialCategory> {
        match self.kind {
            NodeKind::File { category } => Some(category),
            NodeKind::Folder { .. } => None,
        }
    }
}

/// Nested representation used for seeding and JSON files.
///
/// Converted into the arena-backed [`Forest`] on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NestedNode {
    Folder {
        id: NodeId,
        name: String,
        date: NaiveDate,
        #[serde(default)]
        children: Vec<NestedNode>,
    },
    File {
        id: NodeId,
        name: String,
        #[serde(rename = "fileType", default)]
        file_type: MaterialCategory,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        size: Option<String>,
        date: NaiveDate,
    },
}

/// An ordered sequence of root nodes stored as an arena keyed by id.
///
/// Nodes are shared between snapshots through `Rc`; inserting a folder
/// rebuilds only the parent that gains a child.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<NestedNode>", into = "Vec<NestedNode>")]
pub struct Forest {
    roots: Vec<NodeId>,
    nodes: HashMap<NodeId, Rc<Node>>,
}

impl Forest {
    /// Create an empty forest
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from its nested form, rejecting duplicate ids
    pub fn from_nested(nested: Vec<NestedNode>) -> Result<Self, DrawerError> {
        let mut forest = Self::new();
        for node in nested {
            let id = forest.absorb(node)?;
            forest.roots.push(id);
        }
        Ok(forest)
    }

    fn absorb(&mut self, nested: NestedNode) -> Result<NodeId, DrawerError> {
        let node = match nested {
            NestedNode::Folder {
                id,
                name,
                date,
                children,
            } => {
                let mut child_ids = Vec::with_capacity(children.len());
                for child in children {
                    child_ids.push(self.absorb(child)?);
                }
                Node {
                    id,
                    name,
                    kind: NodeKind::Folder {
                        children: child_ids,
                    },
                    size: None,
                    date,
                }
            }
            NestedNode::File {
                id,
                name,
                file_type,
                size,
                date,
            } => Node {
                id,
                name,
                kind: NodeKind::File {
                    category: file_type,
                },
                size,
                date,
            },
        };

        if self.nodes.contains_key(&node.id) {
            return Err(DrawerError::InvalidLibrary(format!(
                "duplicate node id '{}'",
                node.id
            )));
        }
        let id = node.id.clone();
        self.nodes.insert(id.clone(), Rc::new(node));
        Ok(id)
    }

    /// Convert back into the nested form, preserving order
    pub fn to_nested(&self) -> Vec<NestedNode> {
        self.roots
            .iter()
            .filter_map(|id| self.nest(id))
            .collect()
    }

    fn nest(&self, id: &NodeId) -> Option<NestedNode> {
        let node = self.nodes.get(id)?;
        Some(match &node.kind {
            NodeKind::Folder { children } => NestedNode::Folder {
                id: node.id.clone(),
                name: node.name.clone(),
                date: node.date,
                children: children.iter().filter_map(|c| self.nest(c)).collect(),
            },
            NodeKind::File { category } => NestedNode::File {
                id: node.id.clone(),
                name: node.name.clone(),
                file_type: *category,
                size: node.size.clone(),
                date: node.date,
            },
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Root nodes in order
    pub fn roots(&self) -> Vec<&Node> {
        self.resolve_all(&self.roots)
    }

    fn resolve_all(&self, ids: &[NodeId]) -> Vec<&Node> {
        ids.iter()
            .filter_map(|id| self.nodes.get(id).map(Rc::as_ref))
            .collect()
    }

    /// Look up a node by id
    pub fn find(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id).map(Rc::as_ref)
    }

    /// Contents of the folder `current`, or the roots when `current` is `None`.
    ///
    /// A stale or non-folder id yields an empty listing.
    pub fn children_of(&self, current: Option<&NodeId>) -> Vec<&Node> {
        match current {
            None => self.roots(),
            Some(id) => match self.find(id) {
                Some(node) => self.resolve_all(node.child_ids()),
                None => {
                    log::debug!("children_of: '{}' not found, showing empty folder", id);
                    Vec::new()
                }
            },
        }
    }

    /// Append a new empty folder under `parent` (or at the root level).
    ///
    /// Returns the new snapshot and the generated id, or `None` when the
    /// parent does not resolve to a folder in this snapshot.
    pub fn insert_folder(
        &self,
        parent: Option<&NodeId>,
        name: &str,
        date: NaiveDate,
    ) -> Option<(Forest, NodeId)> {
        let id = self.fresh_id();
        let folder = Node::new_folder(id.clone(), name, date);

        let mut next = self.clone();
        match parent {
            None => next.roots.push(id.clone()),
            Some(parent_id) => {
                let parent = self.find(parent_id)?;
                let NodeKind::Folder { children } = &parent.kind else {
                    log::warn!("insert_folder: '{}' is not a folder", parent_id);
                    return None;
                };
                let mut children = children.clone();
                children.push(id.clone());
                let rebuilt = Node {
                    kind: NodeKind::Folder { children },
                    ..parent.clone()
                };
                next.nodes.insert(parent_id.clone(), Rc::new(rebuilt));
            }
        }
        next.nodes.insert(id.clone(), Rc::new(folder));

        log::debug!(
            "insert_folder: '{}' ({}) under {:?}",
            name,
            id,
            parent.map(NodeId::as_str)
        );
        Some((next, id))
    }

    /// Generate an id of the form `new-<millis>` not present in this forest
    fn fresh_id(&self) -> NodeId {
        let mut stamp = Utc::now().timestamp_millis();
        loop {
            let candidate = NodeId(format!("new-{}", stamp));
            if !self.contains(&candidate) {
                return candidate;
            }
            stamp += 1;
        }
    }

    /// Depth-first walk in rendering order, paired with depth
    pub fn walk(&self) -> Vec<(&Node, usize)> {
        let mut visited = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(&NodeId, usize)> = self.roots.iter().rev().map(|id| (id, 0)).collect();
        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.find(id) else {
                continue;
            };
            visited.push((node, depth));
            for child in node.child_ids().iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        visited
    }

    /// Ids of every node reachable from the roots
    pub fn ids(&self) -> HashSet<&NodeId> {
        self.walk().into_iter().map(|(node, _)| &node.id).collect()
    }

    /// Get tree statistics
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        for (node, depth) in self.walk() {
            if node.is_folder() {
                stats.folders += 1;
            } else {
                stats.files += 1;
            }
            stats.total_nodes += 1;
            stats.max_depth = stats.max_depth.max(depth);
        }
        stats
    }
}

impl TryFrom<Vec<NestedNode>> for Forest {
    type Error = DrawerError;

    fn try_from(nested: Vec<NestedNode>) -> Result<Self, Self::Error> {
        Forest::from_nested(nested)
    }
}

impl From<Forest> for Vec<NestedNode> {
    fn from(forest: Forest) -> Self {
        forest.to_nested()
    }
}

/// Statistics about a forest
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub files: usize,
    pub folders: usize,
    pub max_depth: usize,
}

/// Case-insensitive substring match over node names
pub fn filter_nodes<'a>(nodes: &[&'a Node], query: &str) -> Vec<&'a Node> {
    let lower_query = query.to_lowercase();
    nodes
        .iter()
        .copied()
        .filter(|node| node.name.to_lowercase().contains(&lower_query))
        .collect()
}
