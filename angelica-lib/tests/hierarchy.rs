//! Integration tests for the hierarchy utilities, driven by JSON fixtures
//! shaped like the payloads list widgets receive.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use angelica_lib::cache::Memoize;
use angelica_lib::error::TreeError;
use angelica_lib::model::Predicate;
use angelica_lib::model::Record;
use angelica_lib::model::Value;
use angelica_lib::tree::{
    DEFAULT_CHILDREN_KEY, DuplicatePolicy, Order, ToTreeOptions, chain, depth, find, to_tree,
    walk,
};
use simplelog::{Config, LevelFilter, TestLogger};

fn init_logging() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

fn records(json: &str) -> Vec<Record> {
    serde_json::from_str(json).expect("fixture must be a JSON array of objects")
}

fn id(record: &Record) -> i64 {
    record.get_int("id").unwrap().unwrap()
}

fn forest() -> Vec<Record> {
    records(r#"[{"id": 1, "children": [{"id": 2}, {"id": 3}]}]"#)
}

// =============================================================================
// Walker
// =============================================================================

#[test]
fn test_walk_orders() {
    let forest = forest();

    let mut pre = Vec::new();
    assert!(walk(&forest, Order::Pre, DEFAULT_CHILDREN_KEY, |n| pre.push(id(n))));
    assert_eq!(pre, [1, 2, 3]);

    let mut post = Vec::new();
    assert!(walk(&forest, Order::Post, DEFAULT_CHILDREN_KEY, |n| post.push(id(n))));
    assert_eq!(post, [2, 3, 1]);
}

// =============================================================================
// Chained path finder
// =============================================================================

#[test]
fn test_find_and_chain() {
    let forest = forest();

    let found = find(&forest, &Predicate::eq("id", 2), DEFAULT_CHILDREN_KEY).unwrap();
    assert_eq!(found, &Record::new().set("id", 2));
    assert!(find(&forest, &Predicate::eq("id", 99), DEFAULT_CHILDREN_KEY).is_none());

    let path = chain(&forest, &Predicate::eq("id", 2), DEFAULT_CHILDREN_KEY);
    assert_eq!(path.iter().map(|n| id(n)).collect::<Vec<_>>(), [1, 2]);
    assert_eq!(path[0], &forest[0]);
    assert!(chain(&forest, &Predicate::eq("id", 99), DEFAULT_CHILDREN_KEY).is_empty());
}

#[test]
fn test_depth() {
    let forest = forest();
    assert_eq!(depth(&forest, "id", 2, DEFAULT_CHILDREN_KEY), Some(1));
    assert_eq!(depth(&forest, "id", 1, DEFAULT_CHILDREN_KEY), Some(0));
    assert_eq!(depth(&forest, "id", 99, DEFAULT_CHILDREN_KEY), None);
}

#[test]
fn test_menu_lookup_by_path() {
    // A route menu: locate the entry for a path and derive its breadcrumb.
    let menus = records(
        r#"[
            {"name": "System", "path": "/system", "children": [
                {"name": "Users", "path": "/system/users", "children": [
                    {"name": "Roles", "path": "/system/users/roles"}
                ]},
                {"name": "Logs", "path": "/system/logs"}
            ]},
            {"name": "Reports", "path": "/reports"}
        ]"#,
    );

    let crumbs: Vec<&str> = chain(
        &menus,
        &Predicate::eq("path", "/system/users/roles"),
        DEFAULT_CHILDREN_KEY,
    )
    .iter()
    .map(|n| n.get_string("name").unwrap().unwrap())
    .collect();
    assert_eq!(crumbs, ["System", "Users", "Roles"]);
}

// =============================================================================
// Flat-to-tree builder
// =============================================================================

#[test]
fn test_to_tree_any_order() {
    init_logging();
    let options = ToTreeOptions::new("id", "parent");

    let ordered = records(r#"[{"id":1,"parent":0},{"id":2,"parent":1},{"id":3,"parent":0}]"#);
    let reversed = records(r#"[{"id":3,"parent":0},{"id":2,"parent":1},{"id":1,"parent":0}]"#);

    for flat in [ordered, reversed] {
        let forest = to_tree(&flat, &options).unwrap();
        assert_eq!(forest.len(), 2);

        let one = find(&forest, &Predicate::eq("id", 1), DEFAULT_CHILDREN_KEY).unwrap();
        let kids = one.children(DEFAULT_CHILDREN_KEY).unwrap();
        assert_eq!(kids.iter().map(id).collect::<Vec<_>>(), [2]);

        let three = forest.iter().find(|r| id(r) == 3).unwrap();
        assert!(!three.has_children(DEFAULT_CHILDREN_KEY));
    }
}

#[test]
fn test_to_tree_leaves_input_unchanged() {
    let flat = records(r#"[{"id":2,"parent":1},{"id":1,"parent":0}]"#);
    let snapshot = flat.clone();
    let first_before: *const Record = &flat[0];

    let forest = to_tree(&flat, &ToTreeOptions::new("id", "parent")).unwrap();

    assert_eq!(flat, snapshot);
    assert!(std::ptr::eq(first_before, &flat[0]));
    assert_eq!(forest.len(), 1);
}

#[test]
fn test_to_tree_then_walk_round_trip() {
    let flat = records(
        r#"[
            {"id": 1, "pid": null},
            {"id": 2, "pid": 1},
            {"id": 3, "pid": 2},
            {"id": 4, "pid": 1},
            {"id": 5, "pid": null}
        ]"#,
    );
    let forest = to_tree(&flat, &ToTreeOptions::new("id", "pid").retain_children_key(true)).unwrap();

    // pre-order of the built forest reproduces the parent-first input
    let mut seen = Vec::new();
    walk(&forest, Order::Pre, DEFAULT_CHILDREN_KEY, |n| seen.push(id(n)));
    assert_eq!(seen, [1, 2, 3, 4, 5]);

    let mut leaves = 0;
    walk(&forest, Order::Pre, DEFAULT_CHILDREN_KEY, |n| {
        if n.children(DEFAULT_CHILDREN_KEY) == Some(&[][..]) {
            leaves += 1;
        }
    });
    assert_eq!(leaves, 3);
}

#[test]
fn test_built_forest_survives_json() {
    let flat = records(r#"[{"id": 1}, {"id": 2, "pid": 1}, {"id": 3}]"#);
    let forest = to_tree(&flat, &ToTreeOptions::new("id", "pid").retain_children_key(true)).unwrap();

    let json = serde_json::to_string(&forest).unwrap();
    let back: Vec<Record> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, forest);
    assert_eq!(
        back[1].get(DEFAULT_CHILDREN_KEY).map(Value::type_name),
        Some("records")
    );
}

#[test]
fn test_inline_record_children_are_searched() {
    let forest = vec![
        Record::new()
            .set("id", 1)
            .set("children", vec![Value::from(Record::new().set("id", 2))]),
    ];

    let found = find(&forest, &Predicate::eq("id", 2), DEFAULT_CHILDREN_KEY);
    assert_eq!(found.map(id), Some(2));
    assert_eq!(depth(&forest, "id", 2, DEFAULT_CHILDREN_KEY), Some(1));
}

#[test]
fn test_duplicate_keys_split_children_by_position() {
    init_logging();

    let flat = records(
        r#"[
            {"id": 1, "v": "a"},
            {"id": 2, "parent": 1},
            {"id": 1, "v": "b"},
            {"id": 3, "parent": 1}
        ]"#,
    );
    let forest = to_tree(&flat, &ToTreeOptions::new("id", "parent")).unwrap();

    assert_eq!(forest.len(), 2);
    let kids = |n: &Record| -> Vec<i64> {
        n.children(DEFAULT_CHILDREN_KEY)
            .map(|c| c.iter().map(id).collect())
            .unwrap_or_default()
    };
    assert_eq!(forest[0].get_string("v").unwrap(), Some("a"));
    assert_eq!(kids(&forest[0]), [2]);
    assert_eq!(forest[1].get_string("v").unwrap(), Some("b"));
    assert_eq!(kids(&forest[1]), [3]);
}

#[test]
fn test_to_tree_errors() {
    init_logging();

    let cyclic = records(r#"[{"id":1,"parent":3},{"id":2,"parent":1},{"id":3,"parent":2}]"#);
    let err = to_tree(&cyclic, &ToTreeOptions::new("id", "parent")).unwrap_err();
    assert!(matches!(err, TreeError::CyclicStructure { .. }));

    let dupes = records(r#"[{"id":1},{"id":1}]"#);
    let err = to_tree(
        &dupes,
        &ToTreeOptions::new("id", "parent").on_duplicate(DuplicatePolicy::Reject),
    )
    .unwrap_err();
    assert!(matches!(err, TreeError::DuplicateKey { .. }));

    let err = to_tree(&dupes, &ToTreeOptions::new("id", "id")).unwrap_err();
    assert!(matches!(err, TreeError::InvalidConfiguration(_)));
}

// =============================================================================
// Memoizing cache wrapper
// =============================================================================

#[test]
fn test_memoize_over_forest_lookups() {
    init_logging();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    // depth lookups keyed by id, the forest is only needed on a miss
    let depth_of = Memoize::new(move |key: &i64, forest: Arc<Vec<Record>>| {
        counter.fetch_add(1, Ordering::SeqCst);
        depth(&forest, "id", *key, DEFAULT_CHILDREN_KEY)
    });

    let forest = Arc::new(forest());
    assert_eq!(depth_of.call(3, Arc::clone(&forest)), Some(1));
    assert_eq!(depth_of.call(3, Arc::new(Vec::new())), Some(1));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // not found is never cached
    assert_eq!(depth_of.call(99, Arc::clone(&forest)), None);
    assert_eq!(depth_of.call(99, Arc::clone(&forest)), None);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn test_value_type_names() {
    let record = records(r#"[{"a": null, "b": true, "c": 1, "d": 1.5, "e": "x", "f": [1], "g": {}, "h": [{}]}]"#)
        .remove(0);
    let name = |field: &str| record.get(field).map(Value::type_name);
    assert_eq!(name("a"), Some("null"));
    assert_eq!(name("b"), Some("bool"));
    assert_eq!(name("c"), Some("int"));
    assert_eq!(name("d"), Some("float"));
    assert_eq!(name("e"), Some("string"));
    assert_eq!(name("f"), Some("list"));
    assert_eq!(name("g"), Some("record"));
    assert_eq!(name("h"), Some("records"));
}
