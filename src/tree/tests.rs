use super::*;

/// ((A:0.102,B:0.23)AB:0.06,C:0.4)root
fn felsenstein_tree() -> (RootedTree<&'static str>, [NodeIndex; 5]) {
    let mut tree = RootedTree::new();
    let root = tree.add_node("root");
    tree.set_root(root).unwrap();
    let ab = tree.add_node("AB");
    tree.add_edge(root, ab, Some(0.06)).unwrap();
    let a = tree.add_node("A");
    tree.add_edge(ab, a, Some(0.102)).unwrap();
    let b = tree.add_node("B");
    tree.add_edge(ab, b, Some(0.23)).unwrap();
    let c = tree.add_node("C");
    tree.add_edge(root, c, Some(0.4)).unwrap();
    (tree, [root, ab, a, b, c])
}

#[test]
fn test_children_in_insertion_order() {
    let (tree, [root, ab, a, b, c]) = felsenstein_tree();
    assert_eq!(tree.children(ab).collect::<Vec<_>>(), vec![a, b]);
    assert_eq!(tree.children(root).collect::<Vec<_>>(), vec![ab, c]);
    assert!(tree.is_leaf(c));
    assert!(!tree.is_leaf(ab));
}

#[test]
fn test_sorted_children_keep_the_same_set() {
    let (tree, [_, ab, a, b, _]) = felsenstein_tree();
    let descending = tree.children_sorted_by(ab, |x, y| y.cmp(x));
    assert_eq!(descending, vec![b, a]);

    let mut names: Vec<_> = descending.iter().map(|&i| tree[i]).collect();
    names.sort();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_total_distance() {
    let (tree, _) = felsenstein_tree();
    assert!((tree.total_distance() - 0.792).abs() < 1e-9);
}

#[test]
fn test_traversals() {
    let (tree, [root, ab, a, b, c]) = felsenstein_tree();
    assert_eq!(tree.preorder(), vec![root, ab, a, b, c]);
    assert_eq!(tree.leaves(), vec![a, b, c]);
    assert_eq!(tree.descendants(ab), vec![a, b]);
    assert_eq!(tree.ancestors(b), vec![ab, root]);
    assert_eq!(tree.depth(a), 2);
    assert_eq!(tree.depth(root), 0);
}

#[test]
fn test_distances() {
    let (tree, [root, ab, a, b, c]) = felsenstein_tree();
    assert_eq!(tree.lowest_common_ancestor(a, b), Some(ab));
    assert_eq!(tree.lowest_common_ancestor(a, c), Some(root));
    assert!((tree.distance(a, b).unwrap() - 0.332).abs() < 1e-9);
    assert!((tree.distance(a, c).unwrap() - 0.562).abs() < 1e-9);
    assert!((tree.distance_to_root(b) - 0.29).abs() < 1e-9);
}

#[test]
fn test_parent_and_edges() {
    let (tree, [root, ab, a, _, _]) = felsenstein_tree();
    assert_eq!(tree.parent(a), Some(ab));
    assert_eq!(tree.parent(root), None);
    assert_eq!(tree.edge_between(ab, a).and_then(|e| e.distance), Some(0.102));
    assert!(tree.edge_between(root, a).is_none());
    assert_eq!(tree.find(|&name| name == "C"), Some(4));
}

#[test]
fn test_rejects_second_parent() {
    let (mut tree, [root, ab, a, _, _]) = felsenstein_tree();
    assert_eq!(
        tree.add_edge(root, a, None),
        Err(TreeError::AlreadyHasParent(a))
    );
    assert_eq!(tree.add_edge(ab, root, None), Err(TreeError::RootAsChild(root)));
    assert_eq!(tree.add_edge(root, 99, None), Err(TreeError::NodeOutOfRange(99)));
}

#[test]
fn test_rejects_cycles() {
    let mut tree = RootedTree::new();
    let a = tree.add_node("a");
    let b = tree.add_node("b");
    let c = tree.add_node("c");
    tree.add_edge(a, b, None).unwrap();
    tree.add_edge(b, c, Some(1.0)).unwrap();

    assert_eq!(
        tree.add_edge(c, a, None),
        Err(TreeError::WouldCreateCycle { parent: c, child: a })
    );
    assert_eq!(
        tree.add_edge(b, b, None),
        Err(TreeError::WouldCreateCycle { parent: b, child: b })
    );
    assert_eq!(tree.edge_count(), 2);

    tree.set_root(a).unwrap();
    assert_eq!(tree.ancestors(c), vec![b, a]);
    assert_eq!(tree.depth(c), 2);
}

#[test]
fn test_single_root() {
    let mut tree = RootedTree::new();
    let first = tree.add_node(1);
    let second = tree.add_node(2);
    tree.set_root(first).unwrap();
    assert_eq!(tree.set_root(second), Err(TreeError::RootAlreadySet(first)));
    assert_eq!(tree.root_node(), Some(&1));
}

#[test]
fn test_empty_tree() {
    let tree: RootedTree<()> = RootedTree::default();
    assert!(tree.is_empty());
    assert!(tree.preorder().is_empty());
    assert_eq!(tree.total_distance(), 0.0);
}
