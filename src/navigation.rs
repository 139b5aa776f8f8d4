//! Breadcrumb path over one forest
//!
//! A `NavigationPath` is the chain of folders from a root of its forest down
//! to the folder currently shown. An empty path means the forest root.

use serde::{Deserialize, Serialize};

use crate::tree::{Node, NodeId};

/// One folder on the path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub id: NodeId,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationPath {
    crumbs: Vec<Crumb>,
}

impl NavigationPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crumbs.is_empty()
    }

    pub fn crumbs(&self) -> &[Crumb] {
        &self.crumbs
    }

    /// Id of the folder currently shown, `None` at the forest root
    pub fn current(&self) -> Option<&NodeId> {
        self.crumbs.last().map(|crumb| &crumb.id)
    }

    /// Descend into `node`.
    ///
    /// Files and re-entering the current folder are ignored.
    pub fn enter(&mut self, node: &Node) -> bool {
        if !node.is_folder() {
            log::debug!("enter: '{}' is a file, ignoring", node.id);
            return false;
        }
        if self.current() == Some(&node.id) {
            return false;
        }
        self.crumbs.push(Crumb {
            id: node.id.clone(),
            name: node.name.clone(),
        });
        true
    }

    /// Truncate the path so that `index` becomes the last entry.
    ///
    /// Any negative index means the root. Indices past the end are ignored.
    pub fn jump_to(&mut self, index: isize) -> bool {
        if index < 0 {
            let changed = !self.crumbs.is_empty();
            self.crumbs.clear();
            return changed;
        }
        let keep = index as usize + 1;
        if keep > self.crumbs.len() {
            log::debug!(
                "jump_to: index {} out of range for path of length {}",
                index,
                self.crumbs.len()
            );
            return false;
        }
        let changed = keep < self.crumbs.len();
        self.crumbs.truncate(keep);
        changed
    }

    /// Folder names from the root down; the last one is the current folder
    pub fn breadcrumb_labels(&self) -> Vec<&str> {
        self.crumbs.iter().map(|crumb| crumb.name.as_str()).collect()
    }

    pub fn reset(&mut self) {
        self.crumbs.clear();
    }
}
