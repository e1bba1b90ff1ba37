//! Chained lookup: first match, ancestor chain and depth

use std::slice;

use crate::model::Predicate;
use crate::model::Record;
use crate::model::Value;

/// Returns the first node matching `predicate` in depth-first pre-order.
///
/// Not finding anything is a normal outcome and yields `None`.
pub fn find<'a>(
    forest: &'a [Record],
    predicate: &Predicate,
    children_key: &str,
) -> Option<&'a Record> {
    chain(forest, predicate, children_key).pop()
}

/// Returns the path from the top-level ancestor down to the first node
/// matching `predicate`, root first.
///
/// The chain is empty when nothing matches. The last element is the match
/// itself.
///
/// # Example
///
/// ```
/// use angelica_lib::model::{Predicate, Record};
/// use angelica_lib::tree::chain;
///
/// let forest = vec![Record::new()
///     .set("id", 1)
///     .set("children", vec![Record::new().set("id", 2)])];
///
/// let path = chain(&forest, &Predicate::eq("id", 2), "children");
/// let ids: Vec<_> = path.iter().map(|n| n.get_int("id").unwrap().unwrap()).collect();
/// assert_eq!(ids, [1, 2]);
/// ```
pub fn chain<'a>(
    forest: &'a [Record],
    predicate: &Predicate,
    children_key: &str,
) -> Vec<&'a Record> {
    // Frames pair the remaining siblings with the node that owns them, so
    // the owners on the stack are exactly the ancestors of the next node.
    let mut stack: Vec<(slice::Iter<'a, Record>, Option<&'a Record>)> =
        vec![(forest.iter(), None)];

    while let Some((siblings, _)) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };
        if predicate.matches(node) {
            let mut path: Vec<&Record> = stack.iter().filter_map(|(_, owner)| *owner).collect();
            path.push(node);
            return path;
        }
        if let Some(children) = node.children(children_key)
            && !children.is_empty()
        {
            stack.push((children.iter(), Some(node)));
        }
    }

    Vec::new()
}

/// Returns the nesting level of the first node whose `key` field equals
/// `value`, where top-level nodes are at depth 0.
///
/// `None` means no node matched.
pub fn depth(
    forest: &[Record],
    key: &str,
    value: impl Into<Value>,
    children_key: &str,
) -> Option<usize> {
    let path = chain(forest, &Predicate::eq(key, value), children_key);
    path.len().checked_sub(1)
}

/// Returns a mutable reference to the first node matching `predicate`.
///
/// Uses the same depth-first pre-order as [`find`].
pub fn find_mut<'a>(
    forest: &'a mut [Record],
    predicate: &Predicate,
    children_key: &str,
) -> Option<&'a mut Record> {
    let route = index_path(forest, predicate, children_key)?;
    let (first, rest) = route.split_first()?;
    let mut node = forest.get_mut(*first)?;
    for index in rest {
        node = node.children_mut(children_key)?.get_mut(*index)?;
    }
    Some(node)
}

/// Sibling positions leading from the top level to the first match.
fn index_path(forest: &[Record], predicate: &Predicate, children_key: &str) -> Option<Vec<usize>> {
    let mut stack: Vec<(slice::Iter<'_, Record>, usize)> = vec![(forest.iter(), 0)];

    while let Some((siblings, next_index)) = stack.last_mut() {
        let Some(node) = siblings.next() else {
            stack.pop();
            continue;
        };
        *next_index += 1;
        if predicate.matches(node) {
            // Every frame's counter has moved one past the node taken from it.
            return Some(stack.iter().map(|(_, next)| next - 1).collect());
        }
        if let Some(children) = node.children(children_key)
            && !children.is_empty()
        {
            stack.push((children.iter(), 0));
        }
    }

    None
}
