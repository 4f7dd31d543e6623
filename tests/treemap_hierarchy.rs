use crypto_graph_wasm::domain::errors::AppError;
use crypto_graph_wasm::domain::treemap::Hierarchy;

type Row = (&'static str, &'static str, f64);

fn stratify(rows: Vec<Row>) -> Result<Hierarchy<Row>, AppError> {
    Hierarchy::stratify(rows, |r| r.0.to_string(), |r| r.1.to_string())
}

fn ids(hierarchy: &Hierarchy<Row>, order: Vec<usize>) -> Vec<&'static str> {
    order.into_iter().map(|i| hierarchy.node(i).data.0).collect()
}

#[test]
fn builds_tree_from_parent_ids() {
    let hierarchy = stratify(vec![
        ("a", "root", 1.0),
        ("root", "", 0.0),
        ("b", "root", 2.0),
        ("a1", "a", 3.0),
    ])
    .expect("valid tree");

    assert_eq!(hierarchy.len(), 4);
    assert_eq!(hierarchy.node(hierarchy.root()).id, "root");
    assert_eq!(ids(&hierarchy, hierarchy.pre_order()), vec!["root", "a", "a1", "b"]);

    let a1 = hierarchy.pre_order()[2];
    assert_eq!(hierarchy.node(a1).depth, 2);
    assert!(hierarchy.node(a1).children.is_empty());
}

#[test]
fn sum_rolls_weights_up() {
    let mut hierarchy =
        stratify(vec![("root", "", 0.0), ("a", "root", 1.0), ("a1", "a", 3.0), ("b", "root", 2.0)])
            .expect("valid tree");
    hierarchy.sum(|r| r.2);

    assert_eq!(hierarchy.node(hierarchy.root()).value, 6.0);
    let a = hierarchy.pre_order()[1];
    assert_eq!(hierarchy.node(a).value, 4.0);
}

#[test]
fn sort_reorders_siblings_and_leaves() {
    let mut hierarchy =
        stratify(vec![("root", "", 0.0), ("small", "root", 1.0), ("big", "root", 5.0), ("mid", "root", 3.0)])
            .expect("valid tree");
    hierarchy.sum(|r| r.2).sort_by(|a, b| b.value.total_cmp(&a.value));

    let leaves: Vec<&str> = hierarchy.leaves().into_iter().map(|n| n.data.0).collect();
    assert_eq!(leaves, vec!["big", "mid", "small"]);
}

#[test]
fn lone_root_is_a_leaf() {
    let hierarchy = stratify(vec![("root", "", 0.0)]).expect("valid tree");
    assert_eq!(hierarchy.leaves().len(), 1);
}

#[test]
fn rejects_malformed_input() {
    assert_eq!(
        stratify(vec![("root", "", 0.0), ("a", "root", 1.0), ("a", "root", 1.0)]).err(),
        Some(AppError::Layout("duplicate: a".to_string()))
    );
    assert_eq!(
        stratify(vec![("r1", "", 0.0), ("r2", "", 0.0)]).err(),
        Some(AppError::Layout("multiple roots".to_string()))
    );
    assert_eq!(
        stratify(vec![("root", "", 0.0), ("a", "ghost", 1.0)]).err(),
        Some(AppError::Layout("missing: ghost".to_string()))
    );
    assert_eq!(
        stratify(vec![("a", "b", 1.0), ("b", "a", 1.0)]).err(),
        Some(AppError::Layout("no root".to_string()))
    );
    assert_eq!(
        stratify(vec![("root", "", 0.0), ("a", "b", 1.0), ("b", "a", 1.0)]).err(),
        Some(AppError::Layout("cycle".to_string()))
    );
    assert_eq!(stratify(Vec::new()).err(), Some(AppError::Layout("no root".to_string())));
}
