//! Pipeline-level graph tests: aggregation → graph → top-N → centrality

use super::*;

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// P1:[a,b,c], P2:[a,b], P3:[c,d]
fn worked_example() -> TagRecords {
    vec![
        ("P1", tags(&["a", "b", "c"])),
        ("P2", tags(&["a", "b"])),
        ("P3", tags(&["c", "d"])),
    ]
    .into_iter()
    .collect()
}

#[test]
fn worked_example_counts() {
    let records = worked_example();
    let counts = aggregate(&records, DuplicateTagPolicy::Collapse);

    assert_eq!(counts.len(), 4);
    assert_eq!(counts.get("a", "b"), Some(2));
    assert_eq!(counts.get("a", "c"), Some(1));
    assert_eq!(counts.get("b", "c"), Some(1));
    assert_eq!(counts.get("c", "d"), Some(1));
    assert_eq!(counts.get("a", "d"), None);
}

#[test]
fn worked_example_frequencies_and_top3() {
    let records = worked_example();
    let ranked = frequencies(&records, DuplicateTagPolicy::Collapse);
    let pairs: Vec<(&str, u32)> = ranked.iter().map(|e| (e.name.as_str(), e.count)).collect();
    assert_eq!(pairs, vec![("a", 2), ("b", 2), ("c", 2), ("d", 1)]);

    let graph = CooccurrenceGraph::from_edge_counts(&aggregate(&records, DuplicateTagPolicy::Collapse));
    let (top, sub) = select_top(&graph, &records, DuplicateTagPolicy::Collapse, 3);

    assert_eq!(top.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(sub.node_count(), 3);
    assert!(!sub.contains("d"));
    // (c,d) dropped, the rest kept with original weights
    assert_eq!(sub.edge_count(), 3);
    assert_eq!(sub.weight("a", "b"), Some(2));
    assert_eq!(sub.node("c").unwrap().frequency, Some(2));
    assert_eq!(sub.node("a").unwrap().frequency, Some(2));
}

#[test]
fn induced_subgraph_is_closed_over_top_set() {
    let records: TagRecords = vec![
        ("e1", tags(&["ergonomics", "comfort", "seating", "posture"])),
        ("e2", tags(&["ergonomics", "comfort"])),
        ("e3", tags(&["ergonomics", "lighting", "perception"])),
        ("e4", tags(&["comfort", "posture", "lighting"])),
        ("e5", tags(&["hci", "perception"])),
    ]
    .into_iter()
    .collect();
    let policy = DuplicateTagPolicy::Collapse;
    let graph = CooccurrenceGraph::from_edge_counts(&aggregate(&records, policy));

    for n in 1..=8 {
        let (top, sub) = select_top(&graph, &records, policy, n);
        assert!(top.len() <= n);
        for node in sub.nodes() {
            assert!(top.contains(&node.name), "{} not in top {}", node.name, n);
            assert_eq!(node.frequency, top.count_of(&node.name));
        }
        for (pair, count) in sub.edges() {
            assert!(top.contains(pair.first()) && top.contains(pair.second()));
            assert_eq!(graph.weight(pair.first(), pair.second()), Some(count));
        }
    }
}

#[test]
fn count_equals_entities_sharing_both_tags() {
    let records: TagRecords = vec![
        ("p1", tags(&["a", "b", "c", "a"])),
        ("p2", tags(&["b", "a"])),
        ("p3", tags(&["c", "b"])),
        ("p4", tags(&["a", "c", "b"])),
    ]
    .into_iter()
    .collect();
    let counts = aggregate(&records, DuplicateTagPolicy::Collapse);

    for (pair, count) in counts.iter() {
        let sharing = records
            .iter()
            .filter(|(_, t)| {
                t.iter().any(|x| x == pair.first()) && t.iter().any(|x| x == pair.second())
            })
            .count() as u32;
        assert_eq!(count, sharing, "pair {}", pair);
    }
}

#[test]
fn graph_round_trips_edge_counts() {
    let records: TagRecords = vec![
        ("p1", tags(&["usability", "scanning", "comfort"])),
        ("p2", tags(&["usability", "comfort"])),
        ("p3", tags(&["biomechanics", "orthopedics", "comfort"])),
        ("p4", tags(&["orthopedics", "biomechanics"])),
    ]
    .into_iter()
    .collect();
    let counts = aggregate(&records, DuplicateTagPolicy::Collapse);
    let graph = CooccurrenceGraph::from_edge_counts(&counts);

    assert_eq!(graph.edge_counts(), counts);
    assert_eq!(graph.edge_count(), counts.len());
}

#[test]
fn centrality_is_degree_over_n_minus_one() {
    let records = worked_example();
    let policy = DuplicateTagPolicy::Collapse;
    let graph = CooccurrenceGraph::from_edge_counts(&aggregate(&records, policy));
    let scores = degree_centrality(&graph);
    let n = graph.node_count() as f64;

    assert_eq!(scores.len(), 4);
    for score in &scores {
        assert!((0.0..=1.0).contains(&score.value));
        let degree = graph.degree(&score.name).unwrap() as f64;
        assert!((score.value - degree / (n - 1.0)).abs() < 1e-12);
    }
    // ascending order
    assert!(scores.windows(2).all(|w| w[0].value <= w[1].value));
    assert_eq!(scores.last().unwrap().name, "c");
}

#[test]
fn single_node_subgraph_scores_one() {
    let records = worked_example();
    let policy = DuplicateTagPolicy::Collapse;
    let graph = CooccurrenceGraph::from_edge_counts(&aggregate(&records, policy));
    let (_, sub) = select_top(&graph, &records, policy, 1);

    assert_eq!(sub.node_count(), 1);
    assert_eq!(sub.edge_count(), 0);
    let scores = degree_centrality(&sub);
    assert_eq!(scores, vec![NodeScore { name: "a".to_string(), value: 1.0 }]);
}

#[test]
fn inverted_records_rank_entities() {
    let records: TagRecords = vec![
        ("ann", tags(&["comfort", "usability", "scanning"])),
        ("bob", tags(&["comfort", "usability"])),
        ("cas", tags(&["scanning", "lighting"])),
    ]
    .into_iter()
    .collect();
    let policy = DuplicateTagPolicy::Collapse;
    let top_tags = TopList::from_records(&records, policy, 3);
    let people = records.invert(top_tags.names(), policy);

    let counts = aggregate(&people, policy);
    // ann and bob share comfort and usability
    assert_eq!(counts.get("ann", "bob"), Some(2));
    assert_eq!(counts.get("ann", "cas"), Some(1));
    assert_eq!(counts.get("bob", "cas"), None);

    let ranked = frequencies(&people, policy);
    assert_eq!(ranked[0], RankEntry { name: "ann".to_string(), count: 3 });
}
