// Filter/sort pipeline scenarios run against real package trees.
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use meco_application::{ParentApplication, Query, Scanner, query};
use serde_json::json;

use common::{PackageTree, names, renamer_viewer_tree};

#[test]
fn defaults_list_active_applications_only() -> Result<()> {
    let tree = renamer_viewer_tree()?;
    let scanner = Scanner::with_manifests([tree.root()])?;

    let found = query(&scanner, &Query::new());
    assert_eq!(names(&found), vec!["Renamer"]);

    let found = query(&scanner, &Query::new().include_inactive(true));
    assert_eq!(names(&found), vec!["Renamer", "Viewer"]);
    Ok(())
}

#[test]
fn keyword_falls_back_to_name_substring() -> Result<()> {
    let tree = renamer_viewer_tree()?;
    let scanner = Scanner::with_manifests([tree.root()])?;
    let found = Query::new()
        .keyword("view")
        .include_inactive(true)
        .run(&scanner);
    assert_eq!(names(&found), vec!["Viewer"]);
    Ok(())
}

#[test]
fn package_name_filter_matches_any_case() -> Result<()> {
    let tree = renamer_viewer_tree()?;
    let other = tree.add_package("mOther", "mOther")?;
    tree.add_manifest(&other, "otherApp", json!([{"name": "Another"}]))?;
    let scanner = Scanner::with_manifests([tree.root()])?;

    let found = Query::new().package_name("MTOOLS").run(&scanner);
    assert_eq!(names(&found), vec!["Renamer"]);

    let found = Query::new().package_name("unknown").run(&scanner);
    assert!(found.is_empty());
    Ok(())
}

#[test]
fn parent_and_keyword_filters_compose() -> Result<()> {
    let tree = PackageTree::new()?;
    let paint = tree.add_package("mPaint", "mPaint")?;
    tree.add_manifest(
        &paint,
        "paintApp",
        json!([
            {"name": "TexturePainter", "parent_applications": ["maya", "mari"]},
            {"name": "Brushes", "parent_applications": ["maya"], "keywords": ["paint"]},
            {"name": "Brushes Nuke", "parent_applications": ["nuke"], "keywords": ["paint"]},
            {"name": "Painter Anywhere", "parent_applications": ["all"]},
            {"name": "Sculpt", "parent_applications": ["maya"], "keywords": ["painting"]}
        ]),
    )?;
    let scanner = Scanner::with_manifests([tree.root()])?;

    let found = Query::new()
        .parent_application(ParentApplication::Maya)
        .keyword("paint")
        .run(&scanner);
    assert_eq!(names(&found), vec!["Brushes", "TexturePainter"]);

    for desc in &found {
        assert!(desc.parent_applications().contains(&ParentApplication::Maya));
        let keyword_hit = desc.keywords().iter().any(|k| k == "paint");
        assert!(keyword_hit || desc.name().to_lowercase().contains("paint"));
    }
    Ok(())
}

#[test]
fn parent_all_disables_the_parent_filter() -> Result<()> {
    let tree = renamer_viewer_tree()?;
    let scanner = Scanner::with_manifests([tree.root()])?;
    let found = Query::new()
        .parent_application(ParentApplication::All)
        .include_inactive(true)
        .run(&scanner);
    assert_eq!(names(&found), vec!["Renamer", "Viewer"]);

    let found = Query::new()
        .parent_application(ParentApplication::Nuke)
        .include_inactive(true)
        .run(&scanner);
    assert!(found.is_empty(), "declared `all` does not satisfy a concrete host");
    Ok(())
}

#[test]
fn repeated_queries_are_identical() -> Result<()> {
    let tree = renamer_viewer_tree()?;
    let scanner = Scanner::with_manifests([tree.root()])?;
    let q = Query::new().include_inactive(true);
    assert_eq!(q.run(&scanner), q.run(&scanner));
    Ok(())
}

#[test]
fn results_sort_by_name_across_packages() -> Result<()> {
    let tree = PackageTree::new()?;
    let b = tree.add_package("b", "b")?;
    tree.add_manifest(&b, "bApp", json!([{"name": "beta"}, {"name": "Alpha"}]))?;
    let a = tree.add_package("a", "a")?;
    tree.add_manifest(&a, "aApp", json!([{"name": "Gamma"}]))?;
    let scanner = Scanner::with_manifests([tree.root()])?;

    let found = Query::new().run(&scanner);
    assert_eq!(names(&found), vec!["Alpha", "Gamma", "beta"]);
    Ok(())
}

#[test]
fn manifest_defaults_flow_into_descriptors() -> Result<()> {
    let tree = PackageTree::new()?;
    let pkg = tree.add_package("mMenu", "mMenu")?;
    common::write_json(
        &pkg.join("menuApp.json"),
        &json!({
            "schema_version": "application_info_v1",
            "defaults": {"is_gui": true, "menu_path": "Utils"},
            "applications": [
                {"name": "Tool", "version_major": 2, "version_minor": 1, "version_fix": 0,
                 "menu_path": "Utils/Rename"},
                {"name": "Shell", "is_gui": false}
            ]
        }),
    )?;
    let scanner = Scanner::with_manifests([tree.root()])?;
    let found = Query::new().run(&scanner);
    assert_eq!(names(&found), vec!["Shell", "Tool"]);
    assert_eq!(found[0].full_menu_path(), "Meco/Utils/Shell - 1.0.0");
    assert_eq!(found[1].window_title(), "Tool - 2.1.0");
    assert_eq!(found[1].full_menu_path(), "Meco/Utils/Rename/Tool - 2.1.0...");
    Ok(())
}
