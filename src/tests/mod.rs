#[cfg(test)]
mod traversal_tests {
    use crate::{
        render, ArenaBuilder, MaxDepth, NodeId, RenderInstruction, TraversalOptions, TreeArena,
        TreeError, TreeState,
    };

    fn arena(edges: &[(&str, &[&str])], root: &str) -> TreeArena {
        let mut builder = ArenaBuilder::default();
        for (id, _) in edges {
            builder.push(NodeId::from(*id), format!("node {}", id), None).unwrap();
        }
        for (id, children) in edges {
            let parent = builder.index_of(&NodeId::from(*id)).unwrap();
            for child in *children {
                let child = builder.index_of(&NodeId::from(*child)).unwrap();
                builder.link(parent, child);
            }
        }
        builder.finish(&NodeId::from(root)).unwrap()
    }

    // {1: [2, 3: [4]]}
    fn sample() -> TreeArena {
        arena(&[("1", &["2", "3"]), ("2", &[]), ("3", &["4"]), ("4", &[])], "1")
    }

    fn ids(instructions: &[RenderInstruction]) -> Vec<&str> {
        instructions.iter().map(|i| i.node_id.as_str()).collect()
    }

    fn unbounded() -> TraversalOptions {
        TraversalOptions::default()
    }

    fn bounded(max: usize) -> TraversalOptions {
        TraversalOptions {
            max_depth: MaxDepth::Bounded(max),
            ..TraversalOptions::default()
        }
    }

    #[test]
    fn expanded_tree_is_emitted_in_pre_order() {
        let out = render(&sample(), &TreeState::new(true), &unbounded()).unwrap();
        assert_eq!(ids(&out), ["1", "2", "3", "4"]);
        assert_eq!(
            out.iter().map(|i| i.depth).collect::<Vec<_>>(),
            [0, 1, 1, 2]
        );
    }

    #[test]
    fn collapsing_a_node_hides_its_subtree() {
        let arena = sample();
        let mut state = TreeState::new(true);
        assert!(!state.toggle(&"3".into()));

        let out = render(&arena, &state, &unbounded()).unwrap();
        assert_eq!(ids(&out), ["1", "2", "3"]);
        let three = &out[2];
        assert!(three.has_children);
        assert!(!three.is_expanded);
        assert!(!three.truncated);
    }

    #[test]
    fn default_collapsed_view_shows_only_the_root() {
        let out = render(&sample(), &TreeState::new(false), &unbounded()).unwrap();
        assert_eq!(ids(&out), ["1"]);
        assert!(out[0].has_children && !out[0].is_expanded);
    }

    #[test]
    fn single_node_tree_emits_one_leaf() {
        let arena = arena(&[("only", &[])], "only");
        let out = render(&arena, &TreeState::new(true), &bounded(0)).unwrap();
        assert_eq!(
            out,
            [RenderInstruction {
                node_id: "only".into(),
                label: "node only".to_string(),
                detail: None,
                depth: 0,
                has_children: false,
                is_expanded: true,
                truncated: false,
            }]
        );
    }

    #[test]
    fn reexpanding_a_parent_restores_descendant_state() {
        let arena = sample();
        let mut state = TreeState::new(false);
        state.toggle(&"1".into());
        state.toggle(&"3".into());
        let before = render(&arena, &state, &unbounded()).unwrap();
        assert_eq!(ids(&before), ["1", "2", "3", "4"]);

        state.toggle(&"1".into());
        assert_eq!(ids(&render(&arena, &state, &unbounded()).unwrap()), ["1"]);
        assert_eq!(state.recorded(&"3".into()), Some(true));

        state.toggle(&"1".into());
        assert_eq!(render(&arena, &state, &unbounded()).unwrap(), before);
    }

    fn deep_thread() -> TreeArena {
        // 0 -> 1 -> 2 -> 3 -> 4, plus a leaf sibling at depth 3
        arena(
            &[
                ("0", &["1"]),
                ("1", &["2"]),
                ("2", &["3", "3b"]),
                ("3", &["4"]),
                ("3b", &[]),
                ("4", &[]),
            ],
            "0",
        )
    }

    #[test]
    fn depth_budget_truncates_the_boundary_node() {
        let out = render(&deep_thread(), &TreeState::new(true), &bounded(3)).unwrap();

        assert_eq!(ids(&out), ["0", "1", "2", "3", "3b"]);
        assert!(out.iter().all(|i| i.depth <= 3));

        let three = &out[3];
        assert!(three.truncated);
        assert!(three.has_children && three.is_expanded);

        // leaves at the boundary have nothing to cut off
        assert!(!out[4].truncated);
        assert!(out[..3].iter().all(|i| !i.truncated));
    }

    #[test]
    fn collapsed_boundary_node_is_not_truncated() {
        let mut state = TreeState::new(true);
        state.toggle(&"3".into());

        let out = render(&deep_thread(), &state, &bounded(3)).unwrap();
        let three = out.iter().find(|i| i.node_id.as_str() == "3").unwrap();
        assert!(!three.truncated);
        assert!(!three.is_expanded);
    }

    #[test]
    fn zero_budget_truncates_the_root() {
        let out = render(&sample(), &TreeState::new(true), &bounded(0)).unwrap();
        assert_eq!(ids(&out), ["1"]);
        assert!(out[0].truncated);
    }

    fn hidden_root_menu() -> (TreeArena, TreeState) {
        // synthetic root -> File -> New -> Recent
        let arena = arena(
            &[("@menu", &["1"]), ("1", &["2"]), ("2", &["3"]), ("3", &[])],
            "@menu",
        );
        let mut state = TreeState::new(false);
        state.toggle(&"1".into());
        state.toggle(&"2".into());
        (arena, state)
    }

    #[test]
    fn hidden_root_budget_counts_emitted_depth() {
        let (arena, state) = hidden_root_menu();

        for max in 0..4 {
            let options = TraversalOptions {
                hide_root: true,
                ..bounded(max)
            };
            let out = render(&arena, &state, &options).unwrap();

            assert!(!out.is_empty(), "max_depth {} emitted nothing", max);
            for instruction in &out {
                assert!(instruction.depth <= max);
                if instruction.truncated {
                    assert!(instruction.depth + 1 > max);
                } else if instruction.has_children && instruction.is_expanded {
                    assert!(instruction.depth + 1 <= max);
                }
            }
        }
    }

    #[test]
    fn hidden_root_is_never_truncated() {
        let (arena, state) = hidden_root_menu();
        let options = TraversalOptions {
            hide_root: true,
            ..bounded(0)
        };

        let out = render(&arena, &state, &options).unwrap();
        assert_eq!(ids(&out), ["1"]);
        assert_eq!(out[0].depth, 0);
        assert!(out[0].truncated);

        let options = TraversalOptions {
            hide_root: true,
            ..bounded(1)
        };
        let out = render(&arena, &state, &options).unwrap();
        assert_eq!(ids(&out), ["1", "2"]);
        assert!(!out[0].truncated);
        assert!(out[1].truncated);
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let arena = arena(&[("a", &["a"])], "a");
        let err = render(&arena, &TreeState::new(true), &unbounded()).unwrap_err();
        assert_eq!(err, TreeError::Cycle { id: "a".into() });
    }

    #[test]
    fn back_edge_to_an_ancestor_is_a_cycle() {
        let arena = arena(&[("a", &["b"]), ("b", &["c"]), ("c", &["a"])], "a");
        let err = render(&arena, &TreeState::new(true), &unbounded()).unwrap_err();
        assert_eq!(err, TreeError::Cycle { id: "a".into() });
    }

    #[test]
    fn node_with_two_parents_is_rejected() {
        let arena = arena(
            &[("r", &["a", "b"]), ("a", &["c"]), ("b", &["c"]), ("c", &[])],
            "r",
        );
        let err = render(&arena, &TreeState::new(true), &unbounded()).unwrap_err();
        assert_eq!(err, TreeError::SharedNode { id: "c".into() });
    }

    #[test]
    fn cycles_behind_collapsed_nodes_are_never_reached() {
        let arena = arena(&[("a", &["b"]), ("b", &["a"])], "a");
        let mut state = TreeState::new(true);
        state.toggle(&"b".into());

        let out = render(&arena, &state, &unbounded()).unwrap();
        assert_eq!(ids(&out), ["a", "b"]);
    }

    #[test]
    fn rendering_does_not_touch_state() {
        let arena = sample();
        let state = TreeState::new(true);
        render(&arena, &state, &unbounded()).unwrap();
        assert!(state.is_empty());
    }
}

#[cfg(test)]
mod session_tests {
    use crate::{
        DocumentParser, DocumentRenderer, MockThreadNavigator, NodeId, RenderSession, TreeError,
        ViewConfig, ViewKind,
    };
    use serde_json::json;

    fn thread_session() -> RenderSession {
        let doc = DocumentParser::new(ViewKind::Thread)
            .parse_value(json!({
                "id": "1", "author": "Ann", "content": "Top",
                "replies": [{
                    "id": "2", "author": "Ben", "content": "Re",
                    "replies": [{
                        "id": "3", "author": "Cat", "content": "Re re",
                        "replies": [{
                            "id": "4", "author": "Dan", "content": "Deep",
                            "replies": [{ "id": "5", "author": "Eve", "content": "Deeper" }]
                        }]
                    }]
                }]
            }))
            .unwrap();
        RenderSession::new(doc.arena, ViewConfig::preset(ViewKind::Thread))
    }

    #[test]
    fn thread_preset_truncates_at_depth_three() {
        let session = thread_session();
        let out = session.render().unwrap();

        assert_eq!(out.len(), 4);
        let dan = &out[3];
        assert_eq!(dan.node_id.as_str(), "4");
        assert_eq!(dan.depth, 3);
        assert!(dan.truncated);
        assert!(!out.iter().any(|i| i.node_id.as_str() == "5"));
    }

    #[test]
    fn thread_text_shows_authors_bodies_and_continuation() {
        let session = thread_session();
        let out = session.render().unwrap();
        let text = DocumentRenderer
            .render(&out, &session.config().render_context())
            .unwrap();

        insta::assert_snapshot!(text, @r"
        v Ann
          Top
          v Ben
            Re
            v Cat
              Re re
              v Dan
                Deep
                Continue thread →
        ");
    }

    #[test]
    fn continue_thread_calls_the_navigator() {
        let session = thread_session();
        let mut navigator = MockThreadNavigator::new();
        navigator
            .expect_navigate_to_thread()
            .withf(|id, label| id.as_str() == "4" && label == "Dan")
            .times(1)
            .return_const(());

        session
            .continue_thread(&NodeId::from("4"), &mut navigator)
            .unwrap();
    }

    #[test]
    fn continue_thread_rejects_nodes_that_are_not_truncated() {
        let mut session = thread_session();
        let mut navigator = MockThreadNavigator::new();
        navigator.expect_navigate_to_thread().never();

        let err = session
            .continue_thread(&NodeId::from("2"), &mut navigator)
            .unwrap_err();
        assert_eq!(err, TreeError::NotTruncated { id: "2".into() });

        session.toggle(&NodeId::from("4"));
        let err = session
            .continue_thread(&NodeId::from("4"), &mut navigator)
            .unwrap_err();
        assert_eq!(err, TreeError::NotTruncated { id: "4".into() });

        let err = session
            .continue_thread(&NodeId::from("nope"), &mut navigator)
            .unwrap_err();
        assert_eq!(err, TreeError::UnknownNode { id: "nope".into() });
    }

    #[test]
    fn menu_list_renders_without_its_synthetic_root() {
        let doc = DocumentParser::new(ViewKind::Menu)
            .parse_value(json!([
                { "id": 1, "label": "File", "children": [
                    { "id": 2, "label": "New" },
                    { "id": 3, "label": "Open", "children": [{ "id": 4, "label": "Recent Files" }] }
                ]},
                { "id": 5, "label": "Edit", "children": [
                    { "id": 6, "label": "Copy" },
                    { "id": 7, "label": "Paste" }
                ]}
            ]))
            .unwrap();

        let mut config = ViewConfig::preset(ViewKind::Menu);
        config.hide_root = doc.synthetic_root;
        let mut session = RenderSession::new(doc.arena, config);
        session.toggle(&NodeId::from("1"));
        session.toggle(&NodeId::from("3"));

        let text = DocumentRenderer
            .render(&session.render().unwrap(), &session.config().render_context())
            .unwrap();
        insta::assert_snapshot!(text, @r"
        v File
          - New
          v Open
            - Recent Files
        + Edit
        ");
    }

    #[test]
    fn unknown_ids_can_be_toggled() {
        let mut session = thread_session();
        assert!(!session.toggle(&NodeId::from("ghost")));
        assert_eq!(session.render().unwrap().len(), 4);
    }
}

#[cfg(test)]
mod property_tests {
    use crate::{render, ArenaBuilder, NodeId, TraversalOptions, TreeArena, TreeState};
    use proptest::prelude::*;

    /// Node `i` hangs under node `parents[i - 1] % i`, so any input is a tree.
    fn random_tree(parents: &[usize]) -> TreeArena {
        let mut builder = ArenaBuilder::default();
        builder.push(NodeId::from(0i64), "n0", None).unwrap();
        for (offset, choice) in parents.iter().enumerate() {
            let i = offset + 1;
            let index = builder
                .push(NodeId::from(i as i64), format!("n{}", i), None)
                .unwrap();
            builder.link(choice % i, index);
        }
        builder.finish(&NodeId::from(0i64)).unwrap()
    }

    fn full_pre_order(arena: &TreeArena, index: usize, out: &mut Vec<NodeId>) {
        let node = arena.node(index);
        out.push(node.id.clone());
        for &child in &node.children {
            full_pre_order(arena, child, out);
        }
    }

    fn apply_toggles(state: &mut TreeState, toggles: &[usize], len: usize) {
        for choice in toggles {
            state.toggle(&NodeId::from((choice % len) as i64));
        }
    }

    proptest! {
        #[test]
        fn emitted_order_follows_pre_order(
            parents in prop::collection::vec(any::<usize>(), 0..40),
            toggles in prop::collection::vec(any::<usize>(), 0..20),
            default_expanded in any::<bool>(),
        ) {
            let arena = random_tree(&parents);
            let mut reference = Vec::new();
            full_pre_order(&arena, arena.root(), &mut reference);

            let mut state = TreeState::new(default_expanded);
            apply_toggles(&mut state, &toggles, arena.len());
            let out = render(&arena, &state, &TraversalOptions::default()).unwrap();

            let positions: Vec<usize> = out
                .iter()
                .map(|i| reference.iter().position(|id| *id == i.node_id).unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

            for instruction in &out {
                let node = arena.get(&instruction.node_id).unwrap();
                prop_assert_eq!(instruction.has_children, node.has_children());
            }
        }

        #[test]
        fn double_toggle_is_invisible(
            parents in prop::collection::vec(any::<usize>(), 0..40),
            toggles in prop::collection::vec(any::<usize>(), 0..20),
            target in any::<usize>(),
        ) {
            let arena = random_tree(&parents);
            let mut state = TreeState::new(true);
            apply_toggles(&mut state, &toggles, arena.len());
            let before = render(&arena, &state, &TraversalOptions::default()).unwrap();

            let target = NodeId::from((target % arena.len()) as i64);
            state.toggle(&target);
            state.toggle(&target);
            let after = render(&arena, &state, &TraversalOptions::default()).unwrap();

            prop_assert_eq!(before, after);
        }

        #[test]
        fn collapsing_removes_exactly_the_subtree(
            parents in prop::collection::vec(any::<usize>(), 0..40),
            toggles in prop::collection::vec(any::<usize>(), 0..20),
            pick in any::<usize>(),
        ) {
            let arena = random_tree(&parents);
            let mut state = TreeState::new(true);
            apply_toggles(&mut state, &toggles, arena.len());
            let before = render(&arena, &state, &TraversalOptions::default()).unwrap();

            let position = pick % before.len();
            let target = before[position].clone();
            prop_assume!(target.has_children && target.is_expanded);

            let subtree_end = before[position + 1..]
                .iter()
                .position(|i| i.depth <= target.depth)
                .map_or(before.len(), |offset| position + 1 + offset);

            state.toggle(&target.node_id);
            let after = render(&arena, &state, &TraversalOptions::default()).unwrap();

            let mut expected = before.clone();
            expected.drain(position + 1..subtree_end);
            expected[position].is_expanded = false;
            prop_assert_eq!(after, expected);
        }

        #[test]
        fn toggles_are_independent(
            toggles in prop::collection::vec(0usize..10, 0..30),
            a in 0usize..10,
        ) {
            let mut state = TreeState::new(false);
            for t in &toggles {
                state.toggle(&NodeId::from(*t as i64));
            }
            let snapshot: Vec<Option<bool>> =
                (0..10).map(|b| state.recorded(&NodeId::from(b as i64))).collect();

            state.toggle(&NodeId::from(a as i64));
            for b in (0..10).filter(|b| *b != a) {
                prop_assert_eq!(state.recorded(&NodeId::from(b as i64)), snapshot[b]);
            }
        }
    }
}
