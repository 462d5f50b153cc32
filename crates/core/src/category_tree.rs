//! Category hierarchy helpers.
//!
//! Categories are stored as a flat arena of rows keyed by id, each with an
//! optional parent id. The child index and descendant sets are derived on
//! demand from that flat list; no pointer graph is kept between requests.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// A row that participates in a parent/child hierarchy.
pub trait TreeItem {
    fn id(&self) -> DbId;
    fn parent_id(&self) -> Option<DbId>;
}

/// A row together with its nested children.
#[derive(Debug, Clone, Serialize)]
pub struct TreeNode<T: Serialize> {
    #[serde(flatten)]
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

/// Assemble a flat list into a forest.
///
/// Roots are rows without a parent, or whose parent is not in `items`.
/// Siblings keep their relative order from the input.
pub fn build_forest<T: TreeItem + Serialize>(items: Vec<T>) -> Vec<TreeNode<T>> {
    let ids: HashSet<DbId> = items.iter().map(TreeItem::id).collect();

    let mut roots = Vec::new();
    let mut children_of: HashMap<DbId, Vec<T>> = HashMap::new();
    for item in items {
        match item.parent_id() {
            Some(parent) if ids.contains(&parent) && parent != item.id() => {
                children_of.entry(parent).or_default().push(item);
            }
            _ => roots.push(item),
        }
    }

    roots
        .into_iter()
        .map(|root| attach_children(root, &mut children_of))
        .collect()
}

fn attach_children<T: TreeItem + Serialize>(
    item: T,
    children_of: &mut HashMap<DbId, Vec<T>>,
) -> TreeNode<T> {
    // Removing the entry guarantees each row is placed once even if the
    // stored data somehow contains a cycle.
    let children = children_of
        .remove(&item.id())
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach_children(child, children_of))
        .collect();
    TreeNode { item, children }
}

/// Every id reachable from `root` by following child links, `root` included.
///
/// `edges` are `(id, parent_id)` pairs for the whole table.
pub fn descendants(root: DbId, edges: &[(DbId, Option<DbId>)]) -> HashSet<DbId> {
    let mut child_index: HashMap<DbId, Vec<DbId>> = HashMap::new();
    for &(id, parent) in edges {
        if let Some(parent) = parent {
            child_index.entry(parent).or_default().push(id);
        }
    }

    let mut seen = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        if let Some(children) = child_index.get(&current) {
            for &child in children {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }
    }
    seen
}

/// Reject moving category `id` under `new_parent` when that would form a cycle.
///
/// Self-parenting is the one-node case of the same rule.
pub fn check_reparent(
    id: DbId,
    new_parent: Option<DbId>,
    edges: &[(DbId, Option<DbId>)],
) -> Result<(), CoreError> {
    let Some(parent) = new_parent else {
        return Ok(());
    };
    if parent == id {
        return Err(CoreError::Cycle(
            "A category cannot be its own parent".to_string(),
        ));
    }
    if descendants(id, edges).contains(&parent) {
        return Err(CoreError::Cycle(format!(
            "Category {parent} is a descendant of category {id} and cannot become its parent"
        )));
    }
    Ok(())
}
