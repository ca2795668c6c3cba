//! End-to-end chart scenarios, from a legacy to DOT text.

use std::fs;

use relchart::graph::{Arrow, Direction, Label};
use relchart::{
    build_chart, load_legacy, ChartError, ChartOptions, ChartRenderer, DotFileWriter, FilterParams, Gender,
    HeroClass, Legacy, RelationshipStatus,
};
use tempfile::TempDir;

fn gomez_and_lurch() -> Legacy {
    Legacy::builder()
        .hero("g-1", "Gomez", Gender::Male, HeroClass::Warrior)
        .hero("l-1", "Lurch", Gender::Male, HeroClass::Mystic)
        .bond("g-1", "l-1", RelationshipStatus::Locked, None)
        .build()
}

fn strings(items: &[&str]) -> Option<Vec<String>> {
    Some(items.iter().map(|s| s.to_string()).collect())
}

fn with_filter(filter: FilterParams) -> ChartOptions {
    ChartOptions {
        filter,
        ..Default::default()
    }
}

#[test]
fn scenario_a_single_locked_bond() {
    let chart = build_chart(&gomez_and_lurch(), &ChartOptions::default()).unwrap();
    let model = chart.model();

    assert_eq!(model.nodes().len(), 2);
    assert_eq!(model.edges().len(), 1);
    assert!(model.clusters().is_empty());
    assert!(model.legend().is_none());

    let edge = &model.edges()[0];
    assert_eq!((edge.source.as_str(), edge.target.as_str()), ("g-1", "l-1"));
    assert_eq!(edge.style.dir, Direction::Both);
    assert_eq!(edge.style.arrowhead, Some(Arrow::HalfOpen));
    assert_eq!(edge.style.arrowtail, Some(Arrow::HalfOpen));
    assert!(!edge.constraint);

    let dot = chart.to_dot();
    assert!(dot.contains(
        "\"g-1\" -> \"l-1\" [dir=\"both\", arrowhead=\"halfopen\", arrowtail=\"halfopen\", constraint=\"false\"];"
    ));
    assert!(!dot.contains("subgraph"));
}

#[test]
fn scenario_b_non_restrictive_filters_change_nothing() {
    let legacy = gomez_and_lurch();
    let plain = build_chart(&legacy, &ChartOptions::default()).unwrap();
    let filtered = build_chart(
        &legacy,
        &with_filter(FilterParams {
            include_relationships: strings(&["locked"]),
            include_heroes: strings(&["Gomez", "Lurch"]),
            ..Default::default()
        }),
    )
    .unwrap();

    assert_eq!(plain.to_dot(), filtered.to_dot());
    assert!(filtered.warnings().is_empty());
}

#[test]
fn scenario_c_excluded_endpoint_drops_relationship() {
    let chart = build_chart(
        &gomez_and_lurch(),
        &with_filter(FilterParams {
            exclude_heroes: strings(&["Lurch"]),
            ..Default::default()
        }),
    )
    .unwrap();

    let model = chart.model();
    assert_eq!(model.nodes().len(), 1);
    assert_eq!(model.nodes()[0].label, Label::Plain("Gomez".to_string()));
    assert!(model.edges().is_empty());
}

#[test]
fn scenario_d_unresolved_parent_becomes_phantom() {
    let legacy = Legacy::builder()
        .hero("w-1", "Wednesday", Gender::Female, HeroClass::Hunter)
        .parent("grandmama-0", "w-1")
        .build();
    let chart = build_chart(&legacy, &ChartOptions::default()).unwrap();
    let model = chart.model();

    let phantoms: Vec<_> = model
        .nodes()
        .iter()
        .filter(|n| matches!(n.label, Label::Italic(_)))
        .collect();
    assert_eq!(phantoms.len(), 1);
    assert_eq!(model.edges().len(), 1);
    assert_eq!(model.edges()[0].source, phantoms[0].id);
    assert_eq!(model.edges()[0].target, "w-1");
    assert!(chart.to_dot().contains("[label=<<i>unknown parent</i>>"));
}

#[test]
fn scenario_d_hidden_phantoms() {
    let legacy = Legacy::builder()
        .hero("w-1", "Wednesday", Gender::Female, HeroClass::Hunter)
        .parent("grandmama-0", "w-1")
        .build();
    let options = ChartOptions {
        hide_phantoms: true,
        ..Default::default()
    };
    let chart = build_chart(&legacy, &options).unwrap();
    assert_eq!(chart.model().nodes().len(), 1);
    assert!(chart.model().edges().is_empty());
}

#[test]
fn scenario_e_one_cluster_per_family() {
    let legacy = Legacy::builder()
        .hero("g-1", "Gomez", Gender::Male, HeroClass::Warrior)
        .hero("m-1", "Morticia", Gender::Female, HeroClass::Mystic)
        .hero("w-1", "Wednesday", Gender::Female, HeroClass::Hunter)
        .hero("h-1", "Herman", Gender::Male, HeroClass::Warrior)
        .hero("l-1", "Lily", Gender::Female, HeroClass::Mystic)
        .bond("g-1", "m-1", RelationshipStatus::Locked, Some("lover"))
        .parent("g-1", "w-1")
        .bond("h-1", "l-1", RelationshipStatus::Locked, Some("lover"))
        .build();
    let options = ChartOptions {
        pack_by_subgraphs: true,
        ..Default::default()
    };
    let chart = build_chart(&legacy, &options).unwrap();
    let clusters = chart.model().clusters();

    assert_eq!(clusters.len(), 2);
    assert_eq!(clusters[0].node_ids, vec!["g-1", "m-1", "w-1"]);
    assert_eq!(clusters[1].node_ids, vec!["h-1", "l-1"]);
    assert!(clusters.iter().all(|c| c.keep_close));

    let dot = chart.to_dot();
    assert!(dot.contains("pack=\"true\", packmode=\"graph\""));
    assert!(dot.contains("subgraph \"cluster_family_1\""));
    assert!(dot.contains("subgraph \"cluster_family_2\""));
}

#[test]
fn shared_missing_parent_uses_one_phantom() {
    let legacy = Legacy::builder()
        .hero("w-1", "Wednesday", Gender::Female, HeroClass::Hunter)
        .hero("p-1", "Pugsley", Gender::Male, HeroClass::Warrior)
        .parent("grandmama-0", "w-1")
        .parent("grandmama-0", "p-1")
        .build();
    let chart = build_chart(&legacy, &ChartOptions::default()).unwrap();
    let model = chart.model();
    assert_eq!(model.nodes().len(), 3);
    assert_eq!(model.edges().len(), 2);
    assert!(model.edges().iter().all(|e| e.source == "phantom_grandmama-0"));
}

#[test]
fn dot_output_is_stable() {
    let legacy = gomez_and_lurch();
    let options = ChartOptions {
        include_legend: true,
        pack: true,
        ..Default::default()
    };
    let first = build_chart(&legacy, &options).unwrap().to_dot();
    let second = build_chart(&legacy, &options).unwrap().to_dot();
    assert_eq!(first, second);
    assert!(first.contains("subgraph \"cluster_legend\""));
}

#[test]
fn ambiguous_filter_fails_the_chart() {
    let legacy = Legacy::builder()
        .hero("a-1", "Thing", Gender::Unknown, HeroClass::Unknown)
        .hero("b-1", "Thing", Gender::Unknown, HeroClass::Unknown)
        .build();
    let result = build_chart(
        &legacy,
        &with_filter(FilterParams {
            include_heroes: strings(&["Thing"]),
            ..Default::default()
        }),
    );
    match result {
        Err(ChartError::FilterAmbiguity { entry, candidates }) => {
            assert_eq!(entry, "Thing");
            assert_eq!(candidates, vec!["a-1", "b-1"]);
        }
        other => panic!("expected FilterAmbiguity, got {:?}", other.map(|c| c.to_dot())),
    }
}

#[test]
fn legacy_file_to_dot_file() {
    let temp_dir = TempDir::new().unwrap();
    let legacy_path = temp_dir.path().join("legacy.json");
    let content = r#"{"entries": [
        {"id": {"value": "g-1"}, "type": "INDIVIDUAL", "snapshots": [
            {"date": 1, "entities": [[{"value": "g-1"}, "individual", {}, "status", {"name": "Gomez", "aspects": {"entries": [
                ["male"], ["warrior"], ["lockedRelationship|lover|m-1"], ["parentOf|w-1"]
            ]}}]]}
        ]},
        {"id": {"value": "m-1"}, "type": "INDIVIDUAL", "snapshots": [
            {"date": 1, "entities": [[{"value": "m-1"}, "individual", {}, "status", {"name": "Morticia", "aspects": {"entries": [
                ["female"], ["mystic"], ["lockedRelationship|lover|g-1"]
            ]}}]]}
        ]},
        {"id": {"value": "w-1"}, "type": "INDIVIDUAL", "snapshots": [
            {"date": 1, "entities": [[{"value": "w-1"}, "individual", {}, "status", {"name": "Wednesday", "aspects": {"entries": [
                ["female"], ["hunter"], ["childOf|g-1"], ["childOf|ghost-3"]
            ]}}]]}
        ]}
    ]}"#;
    fs::write(&legacy_path, content).unwrap();

    let legacy = load_legacy(&legacy_path).unwrap();
    assert_eq!(legacy.heroes().len(), 3);
    // Mutual soulmate aspects and parentOf/childOf pairs collapse
    assert_eq!(legacy.relationships().len(), 3);

    let chart = build_chart(&legacy, &ChartOptions::default()).unwrap();
    assert_eq!(chart.model().nodes().len(), 4);

    let written = DotFileWriter
        .render(&chart.to_dot(), &temp_dir.path().join("family.png"))
        .unwrap();
    assert_eq!(written, temp_dir.path().join("family.gv"));
    let dot = fs::read_to_string(written).unwrap();
    assert!(dot.starts_with("digraph \"chart_graph\" {"));
    assert!(dot.contains("\"g-1\" [label=\"Gomez\", shape=\"box\", color=\"darkred\", fontcolor=\"darkred\"];"));
    assert!(dot.contains("\"phantom_ghost-3\" -> \"w-1\""));
}
