use chrono::NaiveDate;
use materials_drawer::navigation::NavigationPath;
use materials_drawer::tree::{Forest, MaterialCategory, NestedNode, Node, NodeId};
use proptest::prelude::*;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 1).unwrap()
}

/// Nested forest with ids assigned in walk order so they are always unique
fn arb_forest() -> impl Strategy<Value = Vec<NestedNode>> {
    let leaf = prop_oneof![
        Just(NestedNode::File {
            id: NodeId::new(""),
            name: "file.pdf".to_string(),
            file_type: MaterialCategory::TestPaper,
            size: None,
            date: date(),
        }),
        Just(NestedNode::Folder {
            id: NodeId::new(""),
            name: "empty".to_string(),
            date: date(),
            children: vec![],
        }),
    ];
    let tree = leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|children| NestedNode::Folder {
            id: NodeId::new(""),
            name: "folder".to_string(),
            date: date(),
            children,
        })
    });
    prop::collection::vec(tree, 0..5).prop_map(|mut roots| {
        let mut next = 0;
        for root in &mut roots {
            number(root, &mut next);
        }
        roots
    })
}

fn number(node: &mut NestedNode, next: &mut usize) {
    *next += 1;
    match node {
        NestedNode::File { id, .. } => *id = NodeId::new(format!("n{}", next)),
        NestedNode::Folder { id, children, .. } => {
            *id = NodeId::new(format!("n{}", next));
            for child in children {
                number(child, next);
            }
        }
    }
}

/// Follow `choices` down through folders, building a valid path
fn descend(forest: &Forest, choices: &[usize]) -> NavigationPath {
    let mut path = NavigationPath::new();
    for choice in choices {
        let folders: Vec<&Node> = forest
            .children_of(path.current())
            .into_iter()
            .filter(|node| node.is_folder())
            .collect();
        if folders.is_empty() {
            break;
        }
        let node = folders[choice % folders.len()];
        path.enter(node);
    }
    path
}

fn folder(id: usize) -> Node {
    Node::new_folder(NodeId::new(format!("f{}", id)), format!("F{}", id), date())
}

proptest! {
    #[test]
    fn children_of_matches_find(
        nested in arb_forest(),
        choices in prop::collection::vec(0usize..8, 0..5),
    ) {
        let forest = Forest::from_nested(nested).unwrap();
        let path = descend(&forest, &choices);
        let listed: Vec<&NodeId> =
            forest.children_of(path.current()).iter().map(|n| &n.id).collect();

        match path.current() {
            None => {
                let roots: Vec<&NodeId> = forest.roots().iter().map(|n| &n.id).collect();
                prop_assert_eq!(listed, roots);
            }
            Some(id) => {
                let expected: Vec<&NodeId> = forest.find(id).unwrap().child_ids().iter().collect();
                prop_assert_eq!(listed, expected);
            }
        }
    }

    #[test]
    fn insert_folder_preserves_ids_and_order(
        nested in arb_forest(),
        choices in prop::collection::vec(0usize..8, 0..5),
    ) {
        let forest = Forest::from_nested(nested).unwrap();
        let path = descend(&forest, &choices);
        let before: Vec<NodeId> =
            forest.children_of(path.current()).iter().map(|n| n.id.clone()).collect();

        let (next, id) = forest.insert_folder(path.current(), "新建文件夹", date()).unwrap();

        prop_assert!(!forest.contains(&id));
        for old in forest.ids() {
            prop_assert!(next.contains(old));
        }
        let after: Vec<NodeId> =
            next.children_of(path.current()).iter().map(|n| n.id.clone()).collect();
        prop_assert_eq!(&after[..before.len()], &before[..]);
        prop_assert_eq!(after.last(), Some(&id));
        prop_assert_eq!(next.len(), forest.len() + 1);
    }

    #[test]
    fn jump_to_yields_prefix(depth in 0usize..8, raw_index in -1isize..8) {
        let mut path = NavigationPath::new();
        for i in 0..depth {
            path.enter(&folder(i));
        }
        let index = raw_index.min(depth as isize - 1);
        let before = path.clone();

        path.jump_to(index);
        let expected_len = (index + 1) as usize;
        prop_assert_eq!(path.len(), expected_len);
        prop_assert_eq!(path.crumbs(), &before.crumbs()[..expected_len]);
    }

    #[test]
    fn enter_then_jump_back_restores(depth in 0usize..8) {
        let mut path = NavigationPath::new();
        for i in 0..depth {
            path.enter(&folder(i));
        }
        let before = path.clone();

        path.enter(&folder(100));
        path.jump_to(before.len() as isize - 1);
        prop_assert_eq!(path, before);
    }
}
