#![cfg(feature = "rusqlite")]

mod common;

use canopy::prelude::*;
use common::{
    Location, insert_location, locations, locations_config, names, set_parent, setup_db,
    setup_seeded,
};

#[test]
fn find_forest_returns_top_level_records_in_order() {
    let (mut conn, _) = setup_seeded();

    let forest = locations().find_forest(&mut conn, &Scope::all()).unwrap();

    assert_eq!(forest.len(), 6);
    assert_eq!(names(forest.roots()), ["Canada", "USA"]);
}

#[test]
fn find_forest_links_every_edge() {
    let (mut conn, places) = setup_seeded();

    let forest = locations().find_forest(&mut conn, &Scope::all()).unwrap();

    for node in &forest {
        match node.parent() {
            Some(parent) => {
                assert_eq!(node.parent_id, Some(parent.id));
                let occurrences = parent.children().filter(|c| *c == node).count();
                assert_eq!(occurrences, 1, "{} linked once", node.name);
            }
            None => assert!(node.is_root(), "{} has no parent", node.name),
        }
    }

    let usa = forest.find(&places.usa).unwrap();
    assert_eq!(names(usa.children()), ["Illinois", "Indiana"]);
    let canada = forest.find(&places.canada).unwrap();
    assert_eq!(names(canada.children()), ["British Columbia"]);
}

#[test]
fn children_follow_configured_order() {
    let (mut conn, places) = setup_seeded();
    insert_location(&conn, "Alabama", Some(places.usa));

    let forest = locations().find_forest(&mut conn, &Scope::all()).unwrap();
    let usa = forest.find(&places.usa).unwrap();

    assert_eq!(names(usa.children()), ["Alabama", "Illinois", "Indiana"]);
}

#[test]
fn node_accessors() {
    let (mut conn, places) = setup_seeded();

    let forest = locations().find_forest(&mut conn, &Scope::all()).unwrap();
    let usa = forest.find(&places.usa).unwrap();
    let illinois = forest.find(&places.illinois).unwrap();
    let chicago = forest.find(&places.chicago).unwrap();

    assert!(usa.is_root());
    assert!(!chicago.is_root());
    assert_eq!(chicago.root(), usa);
    assert_eq!(usa.root(), usa);
    assert_eq!(names(chicago.ancestors()), ["Illinois", "USA"]);
    assert_eq!(names(usa.descendants()), ["Illinois", "Chicago", "Indiana"]);
    assert_eq!(names(illinois.siblings()), ["Indiana"]);
    assert!(usa.siblings().is_empty());
    assert_eq!(chicago.depth(), 2);
}

#[test]
fn cyclic_data_terminates() {
    let (mut conn, places) = setup_seeded();
    set_parent(&conn, places.usa, Some(places.chicago));

    let table = locations();
    let forest = table.find_forest(&mut conn, &Scope::all()).unwrap();

    assert_eq!(forest.len(), 6);
    assert_eq!(names(forest.roots()), ["Canada"]);

    let usa = forest.find(&places.usa).unwrap();
    assert!(!usa.is_top_level());
    assert_eq!(usa.descendants().len(), 3);
    assert_eq!(names(usa.ancestors()), ["Chicago", "Illinois"]);

    assert!(matches!(
        table.find_tree(&mut conn, places.usa),
        Err(CanopyError::NotFound)
    ));
}

#[test]
fn two_node_cycle_terminates() {
    let mut conn = setup_db();
    let a = insert_location(&conn, "A", None);
    let b = insert_location(&conn, "B", Some(a));
    set_parent(&conn, a, Some(b));

    let scope = Scope::all().filter(eq(col("id"), a));
    let forest = locations().find_forest(&mut conn, &scope).unwrap();

    assert_eq!(forest.len(), 2);
    assert_eq!(forest.roots().len(), 0);
    assert_eq!(names(forest.find(&a).unwrap().descendants()), ["B"]);
}

#[test]
fn find_tree_by_id() {
    let (mut conn, places) = setup_seeded();
    let table = locations();

    let tree = table.find_tree(&mut conn, places.usa).unwrap();
    assert_eq!(tree.name, "USA");
    assert_eq!(names(tree.root().children()), ["Illinois", "Indiana"]);
    assert_eq!(tree.forest().len(), 4);

    let illinois = table.find_tree(&mut conn, places.illinois).unwrap();
    assert!(illinois.root().is_top_level());
    assert!(!illinois.root().is_root());
    assert_eq!(names(illinois.root().children()), ["Chicago"]);

    assert!(matches!(
        table.find_tree(&mut conn, -1),
        Err(CanopyError::NotFound)
    ));
}

#[test]
fn find_trees_is_all_or_nothing() {
    let (mut conn, places) = setup_seeded();
    let table = locations();

    let forest = table
        .find_trees(&mut conn, [places.indiana, places.illinois])
        .unwrap();
    assert_eq!(names(forest.roots()), ["Illinois", "Indiana"]);
    assert_eq!(forest.len(), 3);

    assert!(matches!(
        table.find_trees(&mut conn, [places.indiana, -1]),
        Err(CanopyError::NotFound)
    ));

    // Chicago is inside Illinois' tree, so it never comes back as a root
    assert!(matches!(
        table.find_trees(&mut conn, [places.illinois, places.chicago]),
        Err(CanopyError::NotFound)
    ));

    assert!(table.find_trees(&mut conn, Vec::new()).unwrap().is_empty());
}

#[test]
fn with_descendants_extends_the_scope() {
    let (mut conn, places) = setup_seeded();
    let table = locations();

    let scope = table.with_descendants(Scope::all().filter(eq(col("id"), places.canada)));
    let records = table.load(&mut conn, &scope).unwrap();
    assert_eq!(
        records.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ["British Columbia", "Canada"]
    );

    let scope = table.with_descendants(Scope::all().filter(eq(col("id"), places.usa)));
    let records = table.load(&mut conn, &scope).unwrap();
    assert_eq!(
        common::sorted_names(&records),
        ["Chicago", "Illinois", "Indiana", "USA"]
    );
}

#[test]
fn filters_after_with_descendants_narrow_the_closure() {
    let (mut conn, places) = setup_seeded();
    let table = locations();

    let scope = table
        .with_descendants(Scope::all().filter(eq(col("id"), places.canada)))
        .filter(eq(col("id"), places.canada));
    let records = table.load(&mut conn, &scope).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, places.canada);
}

#[test]
fn with_descendants_can_be_nested() {
    let (mut conn, places) = setup_seeded();
    let table = locations();

    // close over USA, keep Illinois, close again
    let scope = table
        .with_descendants(Scope::all().filter(eq(col("id"), places.usa)))
        .filter(eq(col("name"), "Illinois"));
    let scope = table.with_descendants(scope);
    assert_eq!(scope.closure_depth(), 2);

    let records = table.load(&mut conn, &scope).unwrap();
    assert_eq!(common::sorted_names(&records), ["Chicago", "Illinois"]);

    let forest = table.find_forest(&mut conn, &scope).unwrap();
    assert_eq!(names(forest.roots()), ["Illinois"]);
}

#[test]
fn find_forest_over_a_closed_scope() {
    let (mut conn, places) = setup_seeded();
    let table = locations();

    let scope = table.with_descendants(Scope::all().filter(eq(col("id"), places.canada)));
    let forest = table.find_forest(&mut conn, &scope).unwrap();

    assert_eq!(names(forest.roots()), ["Canada"]);
    assert_eq!(names(forest.find(&places.canada).unwrap().children()), ["British Columbia"]);
}

#[test]
fn roots_scope_selects_parentless_rows() {
    let (mut conn, _) = setup_seeded();
    let table = locations();

    let roots = table.load(&mut conn, &table.roots()).unwrap();
    assert_eq!(
        roots.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ["Canada", "USA"]
    );
}

#[test]
fn two_configurations_over_one_table() {
    let (mut conn, places) = setup_seeded();

    let by_name = locations();
    let by_id_desc: ForestTable<Location> = ForestTable::new(
        ForestConfig::builder("locations")
            .order("id DESC")
            .columns(["id", "parent_id", "name"])
            .build()
            .unwrap(),
    );

    let first = by_name.find_forest(&mut conn, &Scope::all()).unwrap();
    let second = by_id_desc.find_forest(&mut conn, &Scope::all()).unwrap();

    assert_eq!(names(first.roots()), ["Canada", "USA"]);
    assert_eq!(names(second.roots()), ["Canada", "USA"]);
    assert_eq!(
        names(second.find(&places.usa).unwrap().children()),
        ["Indiana", "Illinois"]
    );
}

#[test]
fn queries_run_inside_a_transaction() {
    let (mut conn, places) = setup_seeded();
    let table = locations();

    let mut tx = conn.transaction().unwrap();
    let tree = table.find_tree(&mut tx, places.canada).unwrap();
    assert_eq!(names(tree.root().children()), ["British Columbia"]);
    tx.commit().unwrap();
}

#[test]
fn every_call_reloads_fresh_records() {
    let (mut conn, places) = setup_seeded();
    let table = locations();

    let before = table.find_tree(&mut conn, places.canada).unwrap();
    insert_location(&conn, "Alberta", Some(places.canada));
    let after = table.find_tree(&mut conn, places.canada).unwrap();

    assert_eq!(names(before.root().children()), ["British Columbia"]);
    assert_eq!(names(after.root().children()), ["Alberta", "British Columbia"]);
}

#[test]
fn configuration_from_toml() {
    let (mut conn, places) = setup_seeded();

    let config = ForestConfig::from_toml(
        "locations",
        r#"
            foreign_key = "parent_id"
            order = "name DESC"
        "#,
    )
    .unwrap();
    let table: ForestTable<Location> = ForestTable::new(config);

    let tree = table.find_tree(&mut conn, places.usa).unwrap();
    assert_eq!(names(tree.root().children()), ["Indiana", "Illinois"]);

    let err = ForestConfig::from_toml("locations", "parent_column = \"up\"").unwrap_err();
    assert!(matches!(err, CanopyError::InvalidConfiguration(_)));
    assert_eq!(locations_config().foreign_key().as_str(), "parent_id");
}

#[test]
fn store_errors_reach_the_caller() {
    let mut conn = ::rusqlite::Connection::open_in_memory().unwrap();

    let err = locations()
        .find_forest(&mut conn, &Scope::all())
        .unwrap_err();

    match err {
        CanopyError::Rusqlite(inner) => {
            assert!(inner.to_string().contains("no such table"), "{inner}")
        }
        other => panic!("expected a rusqlite error, got {other:?}"),
    }
}
