//! Flat record list to nested forest

use std::collections::HashMap;

use log::debug;
use log::trace;
use log::warn;

use super::DuplicatePolicy;
use super::ToTreeOptions;
use crate::error::TreeError;
use crate::model::Record;
use crate::model::Value;

/// Where a record hangs once all keys are indexed.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Parent(usize),
    /// The parent value is set but no record owns it.
    Missing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    Unknown,
    Visiting,
    Rooted,
    Detached,
}

/// Converts a flat list of records into a nested forest.
///
/// Each record is linked under the record whose `unique_key` value equals
/// its `parent_key` value; records with a missing or falsy parent value are
/// roots. The input order of roots and of siblings is preserved, and a child
/// may appear before its parent.
///
/// The input is only borrowed: every placed record is a copy.
///
/// When records share a unique key (under [`DuplicatePolicy::Overwrite`]),
/// each child links to the last record holding the key at or before its own
/// position, so children listed between two duplicates stay with the
/// earlier one. A child listed before every holder links to the first.
///
/// # Errors
///
/// - [`TreeError::InvalidConfiguration`] if the options fail validation.
/// - [`TreeError::DuplicateKey`] under [`DuplicatePolicy::Reject`].
/// - [`TreeError::CyclicStructure`] if parent links loop.
///
/// # Example
///
/// ```
/// use angelica_lib::model::Record;
/// use angelica_lib::tree::{to_tree, ToTreeOptions};
///
/// let flat = vec![
///     Record::new().set("id", 2).set("parent", 1),
///     Record::new().set("id", 1).set("parent", 0),
///     Record::new().set("id", 3).set("parent", 0),
/// ];
///
/// let forest = to_tree(&flat, &ToTreeOptions::new("id", "parent")).unwrap();
/// assert_eq!(forest.len(), 2);
/// assert_eq!(forest[0].children("children").map(|c| c.len()), Some(1));
/// ```
pub fn to_tree(records: &[Record], options: &ToTreeOptions) -> Result<Vec<Record>, TreeError> {
    options.validate()?;

    // Single pass: index unique keys and remember each record's parent key.
    // Holders of a key are kept in input order.
    let mut owners: HashMap<String, Vec<usize>> = HashMap::with_capacity(records.len());
    let mut keys: Vec<Option<String>> = Vec::with_capacity(records.len());
    let mut parent_keys: Vec<Option<Option<String>>> = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let key = record.get(&options.unique_key).and_then(Value::as_key);
        match &key {
            Some(key) => {
                if let Some(&first) = owners.get(key).and_then(|holders| holders.first()) {
                    match options.duplicates {
                        DuplicatePolicy::Reject => {
                            return Err(TreeError::DuplicateKey {
                                key: key.clone(),
                                first,
                                second: index,
                            });
                        }
                        DuplicatePolicy::Overwrite => {
                            warn!(
                                "[tree] unique key '{}' repeated at record {} (first at {}), later children attach to it",
                                key, index, first
                            );
                        }
                    }
                }
                owners.entry(key.clone()).or_default().push(index);
            }
            None => {
                debug!(
                    "[tree] record {} has no usable '{}' value and cannot own children",
                    index, options.unique_key
                );
            }
        }
        keys.push(key);

        // None: root. Some(None): parent set but not usable as a key.
        let parent = record
            .get(&options.parent_key)
            .filter(|value| !value.is_falsy())
            .map(Value::as_key);
        parent_keys.push(parent);
    }

    let links: Vec<Link> = parent_keys
        .iter()
        .enumerate()
        .map(|(index, parent)| match parent {
            None => Link::Root,
            Some(Some(key)) => owners
                .get(key)
                .and_then(|holders| holder_for(holders, index))
                .map_or(Link::Missing, Link::Parent),
            Some(None) => Link::Missing,
        })
        .collect();

    let reach = classify(&links).map_err(|index| {
        let key = keys[index]
            .clone()
            .unwrap_or_else(|| format!("#{index}"));
        TreeError::cyclic(key)
    })?;

    let mut roots: Vec<usize> = Vec::new();
    let mut kids: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut orphans: Vec<usize> = Vec::new();
    for (index, link) in links.iter().enumerate() {
        match *link {
            Link::Root => roots.push(index),
            Link::Parent(parent) => kids[parent].push(index),
            Link::Missing => orphans.push(index),
        }
    }

    if options.promote_orphans {
        roots.extend(orphans.iter().copied());
    } else if !orphans.is_empty() {
        let dropped = reach.iter().filter(|r| **r == Reach::Detached).count();
        debug!(
            "[tree] dropping {} record(s) under {} missing parent(s)",
            dropped,
            orphans.len()
        );
    }

    // Assemble bottom-up with an explicit stack so deep chains cannot
    // exhaust the call stack.
    let mut built: Vec<Option<Record>> = vec![None; records.len()];
    for &root in &roots {
        let mut stack = vec![(root, false)];
        while let Some((index, expanded)) = stack.pop() {
            if expanded {
                let node = assemble(&records[index], &kids[index], &mut built, options);
                built[index] = Some(node);
            } else {
                stack.push((index, true));
                stack.extend(kids[index].iter().rev().map(|&child| (child, false)));
            }
        }
    }

    let forest: Vec<Record> = roots
        .iter()
        .filter_map(|&root| built[root].take())
        .collect();
    trace!(
        "[tree] built {} root(s) from {} record(s)",
        forest.len(),
        records.len()
    );
    Ok(forest)
}

/// Picks which holder of a key the record at `index` links to: the last one
/// at or before it, else the first one after it.
fn holder_for(holders: &[usize], index: usize) -> Option<usize> {
    let before = holders.partition_point(|&holder| holder <= index);
    match before {
        0 => holders.first().copied(),
        n => holders.get(n - 1).copied(),
    }
}

/// Copies `record` and hangs its already-built children under it.
fn assemble(
    record: &Record,
    kids: &[usize],
    built: &mut [Option<Record>],
    options: &ToTreeOptions,
) -> Record {
    let mut node = record.clone();
    let children: Vec<Record> = kids.iter().filter_map(|&kid| built[kid].take()).collect();
    let key = options.children_key.as_str();

    if !children.is_empty() {
        match node.children_mut(key) {
            Some(existing) => existing.extend(children),
            None => {
                node.insert(key, Value::Records(children));
            }
        }
    } else if options.retain_children_key
        && node.get(key).is_none_or(|value| value.is_falsy())
    {
        node.insert(key, Value::Records(Vec::new()));
    }
    node
}

/// Resolves, for every record, whether following parents reaches a root.
///
/// Returns the index of a record on a parent loop if one exists.
fn classify(links: &[Link]) -> Result<Vec<Reach>, usize> {
    let mut reach = vec![Reach::Unknown; links.len()];

    for start in 0..links.len() {
        if reach[start] != Reach::Unknown {
            continue;
        }
        let mut path = Vec::new();
        let mut current = start;
        let outcome = loop {
            match reach[current] {
                Reach::Rooted => break Reach::Rooted,
                Reach::Detached => break Reach::Detached,
                Reach::Visiting => return Err(current),
                Reach::Unknown => {}
            }
            reach[current] = Reach::Visiting;
            path.push(current);
            match links[current] {
                Link::Root => break Reach::Rooted,
                Link::Missing => break Reach::Detached,
                Link::Parent(parent) => current = parent,
            }
        };
        for index in path {
            reach[index] = outcome;
        }
    }

    Ok(reach)
}
