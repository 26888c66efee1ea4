//! Forest builder for flat, parent-referencing record lists.
//!
//! The folder table stores rows with an `id` and a `pid`; the UI wants a
//! rooted tree. [`build_forest`] does the conversion in two passes without
//! sorting, so sibling order at every level is the input order.

use std::collections::HashMap;

use thiserror::Error;

/// Parent id marking a record as a forest root.
pub const ROOT_PARENT_ID: &str = "0";

/// A flat record that can be linked into a forest.
pub trait TreeRecord {
    /// Unique id of the record within the input list.
    fn id(&self) -> &str;
    /// Id of the parent record, or [`ROOT_PARENT_ID`] for roots.
    fn parent_id(&self) -> &str;
}

/// A record together with its resolved children.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode<R> {
    pub record: R,
    pub children: Vec<TreeNode<R>>,
}

/// Errors reported for records that cannot be linked.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A non-root record references a parent id absent from the input.
    #[error("record {id} references missing parent {parent_id}")]
    DanglingParent { id: String, parent_id: String },
}

/// Link flat records into a forest, preserving input order at every level.
///
/// Records whose parent id is missing from the input are reported in the
/// error list; the forest built from the resolvable records is returned
/// alongside them rather than being discarded. A dangling record and its
/// descendants do not appear in the forest.
pub fn build_forest<R>(records: &[R]) -> (Vec<TreeNode<R>>, Vec<TreeError>)
where
    R: TreeRecord + Clone,
{
    let index: HashMap<&str, usize> = records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.id(), position))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    let mut errors = Vec::new();
    for (position, record) in records.iter().enumerate() {
        if record.parent_id() == ROOT_PARENT_ID {
            roots.push(position);
        } else if let Some(&parent) = index.get(record.parent_id()) {
            children[parent].push(position);
        } else {
            errors.push(TreeError::DanglingParent {
                id: record.id().to_string(),
                parent_id: record.parent_id().to_string(),
            });
        }
    }

    let forest = roots
        .into_iter()
        .map(|root| assemble(root, records, &children))
        .collect();
    (forest, errors)
}

fn assemble<R: Clone>(position: usize, records: &[R], children: &[Vec<usize>]) -> TreeNode<R> {
    TreeNode {
        record: records[position].clone(),
        children: children[position]
            .iter()
            .map(|&child| assemble(child, records, children))
            .collect(),
    }
}
