//! Depth-first traversal over a forest of records

use std::ops::ControlFlow;
use std::slice;

use crate::model::Record;

/// When a node is visited relative to its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    /// Visit a node before descending into its children.
    #[default]
    Pre,
    /// Visit a node after all of its children.
    Post,
}

/// Visits every node of `forest` depth-first, left to right.
///
/// Always returns `true`: the traversal cannot be interrupted. Use
/// [`try_walk`] to stop early.
///
/// # Example
///
/// ```
/// use angelica_lib::model::Record;
/// use angelica_lib::tree::{walk, Order, DEFAULT_CHILDREN_KEY};
///
/// let forest = vec![Record::new()
///     .set("id", 1)
///     .set("children", vec![Record::new().set("id", 2), Record::new().set("id", 3)])];
///
/// let mut ids = Vec::new();
/// walk(&forest, Order::Post, DEFAULT_CHILDREN_KEY, |node| {
///     ids.push(node.get_int("id").unwrap().unwrap());
/// });
/// assert_eq!(ids, [2, 3, 1]);
/// ```
pub fn walk<F>(forest: &[Record], order: Order, children_key: &str, mut visit: F) -> bool
where
    F: FnMut(&Record),
{
    try_walk(forest, order, children_key, |node| {
        visit(node);
        ControlFlow::Continue(())
    })
}

/// Visits nodes depth-first until `visit` breaks.
///
/// Returns `true` if every node was visited, `false` if the visitor stopped
/// the traversal.
///
/// The walk keeps its own stack, so forest height is not limited by the
/// thread's call stack.
pub fn try_walk<F>(forest: &[Record], order: Order, children_key: &str, mut visit: F) -> bool
where
    F: FnMut(&Record) -> ControlFlow<()>,
{
    // Each frame is the remaining siblings at one level plus the node that
    // owns them (None for the top level).
    let mut stack: Vec<(slice::Iter<'_, Record>, Option<&Record>)> = vec![(forest.iter(), None)];

    while let Some((siblings, _)) = stack.last_mut() {
        match siblings.next() {
            Some(node) => {
                if order == Order::Pre && visit(node).is_break() {
                    return false;
                }
                match node.children(children_key) {
                    Some(children) if !children.is_empty() => {
                        stack.push((children.iter(), Some(node)));
                    }
                    _ => {
                        if order == Order::Post && visit(node).is_break() {
                            return false;
                        }
                    }
                }
            }
            None => {
                if let Some((_, Some(owner))) = stack.pop()
                    && order == Order::Post
                    && visit(owner).is_break()
                {
                    return false;
                }
            }
        }
    }

    true
}

/// Visits every node depth-first with mutable access.
///
/// In pre-order the visitor may replace a node's children before they are
/// descended into; in post-order children are final by the time their
/// parent is visited.
///
/// Like [`try_walk`] this keeps its own stack. Each level's children are
/// detached while their subtree is visited and put back afterwards, so a
/// visitor never sees an ancestor mid-walk.
pub fn walk_mut<F>(forest: &mut [Record], order: Order, children_key: &str, mut visit: F)
where
    F: FnMut(&mut Record),
{
    for root in forest {
        walk_mut_tree(root, order, children_key, &mut visit);
    }
}

fn walk_mut_tree<F>(root: &mut Record, order: Order, children_key: &str, visit: &mut F)
where
    F: FnMut(&mut Record),
{
    if order == Order::Pre {
        visit(root);
    }

    // Each frame is one level's detached children plus the position of the
    // node currently being visited in it.
    let mut stack: Vec<(Vec<Record>, usize)> = Vec::new();
    if let Some(children) = take_children(root, children_key) {
        stack.push((children, 0));
    }

    while let Some((nodes, next)) = stack.last_mut() {
        if let Some(node) = nodes.get_mut(*next) {
            if order == Order::Pre {
                visit(node);
            }
            match take_children(node, children_key) {
                Some(children) => stack.push((children, 0)),
                None => {
                    if order == Order::Post {
                        visit(node);
                    }
                    *next += 1;
                }
            }
            continue;
        }

        let Some((done, _)) = stack.pop() else {
            break;
        };
        let owner = match stack.last_mut() {
            Some((nodes, next)) => {
                let position = *next;
                *next += 1;
                match nodes.get_mut(position) {
                    Some(owner) => owner,
                    None => continue,
                }
            }
            None => &mut *root,
        };
        if let Some(slot) = owner.children_mut(children_key) {
            *slot = done;
        }
        if order == Order::Post {
            visit(owner);
        }
    }
}

fn take_children(node: &mut Record, children_key: &str) -> Option<Vec<Record>> {
    node.children_mut(children_key).map(std::mem::take)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Value;

    fn node(id: i64, children: Vec<Record>) -> Record {
        let record = Record::new().set("id", id);
        if children.is_empty() {
            record
        } else {
            record.set("children", children)
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            node(1, vec![node(2, vec![node(4, vec![])]), node(3, vec![])]),
            node(5, vec![]),
        ]
    }

    fn ids(forest: &[Record], order: Order) -> Vec<i64> {
        let mut out = Vec::new();
        walk(forest, order, "children", |n| {
            out.push(n.get_int("id").unwrap().unwrap())
        });
        out
    }

    #[test]
    fn test_pre_order() {
        assert_eq!(ids(&sample(), Order::Pre), [1, 2, 4, 3, 5]);
    }

    #[test]
    fn test_post_order() {
        assert_eq!(ids(&sample(), Order::Post), [4, 2, 3, 1, 5]);
    }

    #[test]
    fn test_empty_forest() {
        assert!(walk(&[], Order::Pre, "children", |_| panic!("no nodes")));
    }

    #[test]
    fn test_custom_children_key() {
        let forest = vec![
            Record::new()
                .set("id", 1)
                .set("items", vec![Record::new().set("id", 2)])
                .set("children", vec![Record::new().set("id", 99)]),
        ];
        let mut seen = Vec::new();
        walk(&forest, Order::Pre, "items", |n| {
            seen.push(n.get_int("id").unwrap().unwrap())
        });
        assert_eq!(seen, [1, 2]);
    }

    #[test]
    fn test_try_walk_stops() {
        let mut seen = Vec::new();
        let completed = try_walk(&sample(), Order::Pre, "children", |n| {
            let id = n.get_int("id").unwrap().unwrap();
            seen.push(id);
            if id == 4 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(!completed);
        assert_eq!(seen, [1, 2, 4]);
    }

    #[test]
    fn test_try_walk_post_order_stops_on_parent() {
        let mut seen = Vec::new();
        let completed = try_walk(&sample(), Order::Post, "children", |n| {
            let id = n.get_int("id").unwrap().unwrap();
            seen.push(id);
            if id == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert!(!completed);
        assert_eq!(seen, [4, 2]);
    }

    #[test]
    fn test_deep_forest_does_not_overflow() {
        let mut current = Record::new().set("id", 0);
        for id in 1..20_000 {
            current = Record::new().set("id", id).set("children", vec![current]);
        }
        let forest = vec![current];

        let mut count = 0usize;
        assert!(walk(&forest, Order::Post, "children", |_| count += 1));
        assert_eq!(count, 20_000);

        // Tear the chain down iteratively; the derived Drop would recurse.
        let mut pending = forest;
        while let Some(mut record) = pending.pop() {
            if let Some(Value::Records(children)) = record.remove("children") {
                pending.extend(children);
            }
        }
    }

    #[test]
    fn test_walk_mut_deep_forest_does_not_overflow() {
        let mut current = Record::new().set("id", 0);
        for id in 1..20_000 {
            current = Record::new().set("id", id).set("children", vec![current]);
        }
        let mut forest = vec![current];

        let mut count = 0usize;
        walk_mut(&mut forest, Order::Post, "children", |n| {
            count += 1;
            n.insert("seen", true);
        });
        assert_eq!(count, 20_000);

        // children were reattached along the whole chain
        let mut depth = 0;
        let mut cursor = &forest[0];
        while let Some([child]) = cursor.children("children") {
            assert_eq!(child.get_bool("seen").unwrap(), Some(true));
            cursor = child;
            depth += 1;
        }
        assert_eq!(depth, 19_999);

        let mut pending = forest;
        while let Some(mut record) = pending.pop() {
            if let Some(Value::Records(children)) = record.remove("children") {
                pending.extend(children);
            }
        }
    }

    #[test]
    fn test_walk_mut_pre_order_replaces_children() {
        let mut forest = sample();
        let mut seen = Vec::new();
        walk_mut(&mut forest, Order::Pre, "children", |n| {
            let id = n.get_int("id").unwrap().unwrap();
            seen.push(id);
            if id == 2 {
                n.insert("children", vec![node(7, vec![]), node(8, vec![])]);
            }
        });
        assert_eq!(seen, [1, 2, 7, 8, 3, 5]);
        assert_eq!(ids(&forest, Order::Pre), [1, 2, 7, 8, 3, 5]);
    }

    #[test]
    fn test_walk_mut_rewrites_nodes() {
        let mut forest = sample();
        walk_mut(&mut forest, Order::Pre, "children", |n| {
            let id = n.get_int("id").unwrap().unwrap();
            n.insert("id", id * 10);
        });
        assert_eq!(ids(&forest, Order::Pre), [10, 20, 40, 30, 50]);
    }

    #[test]
    fn test_walk_mut_post_order_sees_final_children() {
        let mut forest = sample();
        walk_mut(&mut forest, Order::Post, "children", |n| {
            let size = 1 + n
                .children("children")
                .map(|c| c.iter().map(|c| c.get_int("size").unwrap().unwrap()).sum::<i64>())
                .unwrap_or(0);
            n.insert("size", size);
        });
        assert_eq!(forest[0].get_int("size").unwrap(), Some(4));
        assert_eq!(forest[1].get_int("size").unwrap(), Some(1));
    }
}
