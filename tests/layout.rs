//! Tests for the layered layout engine.
mod common;
use common::*;
use callflow::prelude::*;
use proptest::prelude::*;

const RANK_PITCH: f64 = 120.0 + 80.0;

fn assert_no_overlaps(graph: &Graph, result: &LayoutResult) {
    let boxes: Vec<(&str, &NodeBox)> = graph
        .nodes()
        .iter()
        .map(|n| (n.id.as_str(), result.node_box(&n.id).expect("every node is placed")))
        .collect();
    for (i, (a_id, a)) in boxes.iter().enumerate() {
        for (b_id, b) in &boxes[i + 1..] {
            assert!(!a.overlaps(b), "'{}' overlaps '{}'", a_id, b_id);
        }
    }
}

#[test]
fn test_homeowner_ranks() {
    let graph = graph_of(homeowner_flow());
    let result = layout(&graph);

    assert_eq!(result.rank_of("start"), Some(0));
    assert_eq!(result.rank_of("homeowner"), Some(1));
    assert_eq!(result.rank_of("book"), Some(2));
    assert_eq!(result.rank_of("booked"), Some(3));
    assert_eq!(result.rank_of("declined"), Some(2));
    assert_eq!(result.rank_count, 4);
    assert!(result.back_edges.is_empty());
    assert!(result.diagnostics().is_empty());
}

#[test]
fn test_homeowner_boxes_do_not_overlap() {
    let graph = graph_of(homeowner_flow());
    let result = layout(&graph);
    assert_no_overlaps(&graph, &result);

    let book = result.node_box("book").unwrap();
    let declined = result.node_box("declined").unwrap();
    let distance = (book.center().x - declined.center().x).abs();
    assert!(distance >= (book.width + declined.width) / 2.0 + result.horizontal_spacing - 1e-9);
}

#[test]
fn test_nominal_sizes_and_rank_centres() {
    let graph = graph_of(homeowner_flow());
    let result = layout(&graph);
    let sizes = NodeSizes::default();

    for node in graph.nodes() {
        let node_box = result.node_box(&node.id).unwrap();
        let expected = sizes.get(node.kind);
        assert_eq!((node_box.width, node_box.height), (expected.width, expected.height));
        assert_eq!(node_box.center().y, node_box.rank as f64 * RANK_PITCH);
    }
    // Rank 0 holds only the start node, centred on x = 0.
    assert_eq!(result.node_box("start").unwrap().center().x, 0.0);
}

#[test]
fn test_edge_routes() {
    let graph = graph_of(homeowner_flow());
    let result = layout(&graph);
    assert_eq!(result.edge_routes.len(), graph.edges().len());

    let yes = result.edge_route("e1-homeowner-book").unwrap();
    assert_eq!(
        yes.source_anchor,
        result.node_box("homeowner").unwrap().bottom_center()
    );
    assert_eq!(yes.target_anchor, result.node_box("book").unwrap().top_center());
    assert_eq!(
        yes.label_position,
        Some(yes.source_anchor.midpoint(yes.target_anchor))
    );
    assert_eq!(yes.category, Category::Positive);
    assert_eq!(yes.stroke, Category::Positive.stroke());

    let no = result.edge_route("e3-homeowner-declined").unwrap();
    assert_eq!(no.category, Category::Negative);
    assert!(no.stroke.dashed);

    let unlabeled = result.edge_route("e0-start-homeowner").unwrap();
    assert_eq!(unlabeled.label_position, None);
    assert_eq!(unlabeled.category, Category::Neutral);
}

#[test]
fn test_bounds_cover_all_boxes() {
    let graph = graph_of(homeowner_flow());
    let result = layout(&graph);
    for node_box in result.node_boxes.values() {
        assert!(node_box.x >= result.bounds.min_x);
        assert!(node_box.y >= result.bounds.min_y);
        assert!(node_box.x + node_box.width <= result.bounds.max_x);
        assert!(node_box.y + node_box.height <= result.bounds.max_y);
    }
    assert!(result.bounds.height() >= 3.0 * RANK_PITCH);
}

#[test]
fn test_layout_is_idempotent() {
    let graph = graph_of(homeowner_flow());
    let engine = LayoutEngine::default();
    assert_eq!(engine.layout(&graph), engine.layout(&graph));

    let looped = graph_of(retry_loop_flow());
    assert_eq!(layout(&looped), layout(&looped));
}

#[test]
fn test_cycle_is_broken_and_reported() {
    let graph = graph_of(retry_loop_flow());
    let result = layout(&graph);

    assert_eq!(result.back_edges, vec!["e3-retry-ask".to_string()]);
    assert!(result.edge_route("e3-retry-ask").unwrap().back_edge);
    assert!(!result.edge_route("e1-ask-done").unwrap().back_edge);
    assert_eq!(
        result.diagnostics(),
        vec![Diagnostic::CycleBroken {
            edge_id: "e3-retry-ask".to_string()
        }]
    );

    assert_eq!(result.rank_of("start"), Some(0));
    assert_eq!(result.rank_of("ask"), Some(1));
    assert_eq!(result.rank_of("done"), Some(2));
    assert_eq!(result.rank_of("retry"), Some(2));
    assert_no_overlaps(&graph, &result);
}

#[test]
fn test_edge_back_into_start_does_not_move_it() {
    let mut flow = homeowner_flow();
    flow.edges.push(raw_edge("declined", "start", Some("Call again")));
    let graph = graph_of(flow);
    let result = layout(&graph);

    assert_eq!(result.rank_of("start"), Some(0));
    assert_eq!(result.rank_of("declined"), Some(2));
    assert_eq!(result.back_edges, vec!["e4-declined-start".to_string()]);
}

#[test]
fn test_unreachable_nodes_are_still_placed() {
    let mut flow = homeowner_flow();
    flow.nodes.push(raw_node("stray", "message", "Voicemail"));
    flow.edges.push(raw_edge("stray", "booked", None));
    let graph = graph_of(flow);
    let result = layout(&graph);

    assert_eq!(result.node_boxes.len(), 6);
    assert_eq!(result.rank_of("booked"), Some(3));
    for node in graph.nodes() {
        assert!(result.rank_of(&node.id).unwrap() >= result.rank_of("start").unwrap());
    }
    assert_no_overlaps(&graph, &result);
}

#[test]
fn test_long_chain_does_not_overflow() {
    let graph = graph_of(chain_flow(5_000));
    let result = layout(&graph);
    assert_eq!(result.rank_of("end"), Some(5_001));
    assert_eq!(result.rank_count, 5_002);
}

#[test]
fn test_horizontal_spacing_shrinks_with_decisions() {
    let config = LayoutConfig::default();
    assert_eq!(config.horizontal_spacing(0), 150.0);
    assert_eq!(config.horizontal_spacing(3), 100.0);
    assert_eq!(config.horizontal_spacing(7), 50.0);
    assert_eq!(config.horizontal_spacing(50), 40.0);

    let spacings: Vec<f64> = (0..30).map(|d| config.horizontal_spacing(d)).collect();
    for pair in spacings.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    assert!(spacings.iter().all(|s| (40.0..=150.0).contains(s)));
}

#[test]
fn test_builder_settings_are_used() {
    let engine = LayoutEngine::builder()
        .with_vertical_spacing(20.0)
        .with_horizontal_spacing_bounds(10.0, 10.0)
        .build();
    let graph = graph_of(homeowner_flow());
    let result = engine.layout(&graph);

    assert_eq!(result.horizontal_spacing, 10.0);
    let booked = result.node_box("booked").unwrap();
    assert_eq!(booked.center().y, 3.0 * (120.0 + 20.0));
}

#[test]
fn test_config_from_partial_json() {
    let config = LayoutConfig::from_json(
        r#"{ "vertical_spacing": 40, "node_sizes": { "decision": { "width": 300, "height": 140 } } }"#,
    )
    .unwrap();
    assert_eq!(config.vertical_spacing, 40.0);
    assert_eq!(config.node_sizes.decision, NodeSize::new(300.0, 140.0));
    assert_eq!(config.node_sizes.start, NodeSizes::default().start);
    assert_eq!(config.ordering_passes, 8);
    assert_eq!(config.node_sizes.tallest(), 140.0);
}

#[test]
fn test_config_is_sanitized() {
    let config = LayoutConfig::from_json(
        r#"{ "vertical_spacing": -5, "min_horizontal_spacing": 200, "max_horizontal_spacing": 50 }"#,
    )
    .unwrap();
    assert_eq!(config.vertical_spacing, 80.0);
    assert_eq!(config.min_horizontal_spacing, 50.0);
    assert_eq!(config.max_horizontal_spacing, 200.0);

    let engine = LayoutEngine::new(LayoutConfig {
        vertical_spacing: f64::NAN,
        ..Default::default()
    });
    assert_eq!(engine.config().vertical_spacing, 80.0);
}

/// A random flow whose edges only point from lower to higher node numbers,
/// with every node reachable from the start node `n0`.
fn dag_strategy() -> impl Strategy<Value = RawFlow> {
    (2usize..14)
        .prop_flat_map(|n| {
            (
                Just(n),
                prop::collection::vec(any::<usize>(), n - 1),
                prop::collection::vec((any::<usize>(), any::<usize>()), 0..20),
            )
        })
        .prop_map(|(n, parents, extra)| {
            let kinds = ["message", "decision", "action", "end"];
            let nodes = (0..n)
                .map(|i| {
                    let kind = if i == 0 { "start" } else { kinds[i % kinds.len()] };
                    raw_node(&format!("n{}", i), kind, "Step")
                })
                .collect();
            let mut edges: Vec<RawEdge> = parents
                .iter()
                .enumerate()
                .map(|(j, p)| {
                    let child = j + 1;
                    raw_edge(&format!("n{}", p % child), &format!("n{}", child), None)
                })
                .collect();
            for (a, b) in extra {
                let (a, b) = (a % n, b % n);
                if a < b {
                    edges.push(raw_edge(&format!("n{}", a), &format!("n{}", b), Some("Yes")));
                }
            }
            RawFlow {
                title: "Random".to_string(),
                nodes,
                edges,
            }
        })
}

fn longest_paths(graph: &Graph) -> Vec<usize> {
    let n = graph.nodes().len();
    let index = |id: &str| id[1..].parse::<usize>().unwrap();
    let mut ranks = vec![0usize; n];
    // Node numbers are a topological order.
    for target in 1..n {
        ranks[target] = graph
            .incoming(&format!("n{}", target))
            .map(|e| ranks[index(&e.source)] + 1)
            .max()
            .unwrap_or(0);
    }
    ranks
}

proptest! {
    #[test]
    fn prop_ranks_are_longest_paths(flow in dag_strategy()) {
        let graph = graph_of(flow);
        let result = layout(&graph);
        let expected = longest_paths(&graph);

        prop_assert_eq!(result.rank_of("n0"), Some(0));
        prop_assert!(result.back_edges.is_empty());
        for (i, rank) in expected.iter().enumerate() {
            prop_assert_eq!(result.rank_of(&format!("n{}", i)), Some(*rank));
        }
    }

    #[test]
    fn prop_boxes_never_overlap(flow in dag_strategy()) {
        let graph = graph_of(flow);
        let result = layout(&graph);
        let boxes: Vec<&NodeBox> = result.node_boxes.values().collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                prop_assert!(!a.overlaps(b));
            }
        }
    }
}
