//! Builds a menu tree from a flat permission list and prints it.
//!
//! Run with: `cargo run -p angelica-lib --example menu_tree`

use angelica_lib::format::pad_start;
use angelica_lib::model::{Predicate, Record};
use angelica_lib::tree::{DEFAULT_CHILDREN_KEY, Order, ToTreeOptions, chain, depth, to_tree, walk};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

const MENUS: &str = r#"[
    {"menuId": 3, "parentId": 1, "menuName": "Roles", "path": "/system/roles"},
    {"menuId": 1, "parentId": 0, "menuName": "System", "path": "/system"},
    {"menuId": 2, "parentId": 1, "menuName": "Users", "path": "/system/users"},
    {"menuId": 4, "parentId": 2, "menuName": "Export", "path": "/system/users/export"},
    {"menuId": 5, "parentId": 0, "menuName": "Reports", "path": "/reports"},
    {"menuId": 6, "parentId": 42, "menuName": "Stale", "path": "/stale"}
]"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Debug level shows the builder dropping the stale entry
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let flat: Vec<Record> = serde_json::from_str(MENUS)?;
    let options = ToTreeOptions::new("menuId", "parentId");
    let menus = to_tree(&flat, &options)?;

    let mut lines = Vec::new();
    walk(&menus, Order::Pre, DEFAULT_CHILDREN_KEY, |menu| {
        let path = menu.get_string("path").ok().flatten().unwrap_or_default();
        let level = depth(&menus, "path", path, DEFAULT_CHILDREN_KEY).unwrap_or(0);
        let name = menu.get_string("menuName").ok().flatten().unwrap_or("?");
        lines.push(pad_start(name, name.chars().count() + level * 2, ' '));
    });
    for line in &lines {
        println!("{line}");
    }

    let crumbs: Vec<&str> = chain(&menus, &Predicate::eq("menuId", 4), DEFAULT_CHILDREN_KEY)
        .iter()
        .filter_map(|menu| menu.get_string("menuName").ok().flatten())
        .collect();
    println!("breadcrumb: {}", crumbs.join(" / "));

    Ok(())
}
