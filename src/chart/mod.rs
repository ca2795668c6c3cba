//! Chart pipeline: filter, phantom resolution, styling and layout, assembled
//! into one validated [`GraphModel`].

pub mod layout;
pub mod phantom;
pub mod style;

use serde::Deserialize;

use crate::error::{ChartError, Result};
use crate::filter::{filter_legacy, FilterParams};
use crate::graph::{EdgeDescriptor, GraphBuilder, GraphModel};
use crate::record::Legacy;
use layout::{component_clusters, plan_layout, LayoutOptions};
use phantom::{resolve_phantoms, LinkKind, NodeRef, ResolvedGraph};
use style::{bond_style, hero_node, parent_edge_style, phantom_node, StyleOptions, PARENT_EDGE_WEIGHT};

pub const DEFAULT_GRAPH_NAME: &str = "chart_graph";

/// Every switch that shapes a chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// DOT graph name
    pub name: String,
    pub filter: FilterParams,
    pub no_gender_shapes: bool,
    pub no_class_colors: bool,
    pub include_legend: bool,
    pub prioritize_relationships: bool,
    pub hide_phantoms: bool,
    pub pack: bool,
    pub pack_by_subgraphs: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_GRAPH_NAME.to_string(),
            filter: FilterParams::default(),
            no_gender_shapes: false,
            no_class_colors: false,
            include_legend: false,
            prioritize_relationships: false,
            hide_phantoms: false,
            pack: false,
            pack_by_subgraphs: false,
        }
    }
}

impl ChartOptions {
    fn style(&self) -> StyleOptions {
        StyleOptions {
            no_gender_shapes: self.no_gender_shapes,
            no_class_colors: self.no_class_colors,
        }
    }

    fn layout(&self) -> LayoutOptions {
        LayoutOptions {
            prioritize_relationships: self.prioritize_relationships,
            pack: self.pack,
            pack_by_subgraphs: self.pack_by_subgraphs,
        }
    }
}

/// A built chart and the filter warnings collected on the way.
#[derive(Debug)]
pub struct Chart {
    model: GraphModel,
    warnings: Vec<ChartError>,
}

impl Chart {
    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    /// `UnknownFilterTarget` entries
    pub fn warnings(&self) -> &[ChartError] {
        &self.warnings
    }

    pub fn to_dot(&self) -> String {
        self.model.to_dot()
    }
}

/// Run the whole pipeline over a legacy.
pub fn build_chart(legacy: &Legacy, options: &ChartOptions) -> Result<Chart> {
    let filtered = filter_legacy(legacy, &options.filter)?;
    let resolved = resolve_phantoms(legacy, &filtered, options.hide_phantoms);
    let style_options = options.style();
    let plan = plan_layout(options.layout());

    let mut builder = GraphBuilder::new(options.name.as_str());
    for (key, value) in &plan.graph_attrs {
        builder.graph_attr(*key, *value);
    }
    builder.order(plan.order);

    let heroes = legacy.heroes();
    for &pos in &resolved.heroes {
        builder.node(hero_node(&heroes[pos], style_options));
    }
    for phantom in &resolved.phantoms {
        builder.node(phantom_node(&phantom.id));
    }

    for link in &resolved.links {
        let source = node_id(legacy, &resolved, link.source).to_string();
        let target = node_id(legacy, &resolved, link.target).to_string();
        let edge = match &link.kind {
            LinkKind::Parent => EdgeDescriptor {
                source,
                target,
                style: parent_edge_style(),
                constraint: true,
                weight: Some(PARENT_EDGE_WEIGHT),
            },
            LinkKind::Bond(bond) => EdgeDescriptor {
                source,
                target,
                style: bond_style(bond).edge,
                constraint: plan.bond_constraint,
                weight: plan.bond_weight,
            },
        };
        builder.edge(edge);
    }

    if plan.component_clusters {
        let node_ids: Vec<String> = resolved
            .heroes
            .iter()
            .map(|&pos| heroes[pos].id.clone())
            .chain(resolved.phantoms.iter().map(|p| p.id.clone()))
            .collect();
        let pairs = resolved
            .links
            .iter()
            .map(|l| (node_id(legacy, &resolved, l.source), node_id(legacy, &resolved, l.target)));
        for cluster in component_clusters(&node_ids, pairs) {
            builder.cluster(cluster);
        }
    }

    if options.include_legend {
        let shown = resolved.heroes.iter().map(|&pos| &heroes[pos]);
        let bonds = resolved.links.iter().filter_map(|l| match &l.kind {
            LinkKind::Bond(bond) => Some(bond),
            LinkKind::Parent => None,
        });
        builder.legend(style::legend(shown, bonds, style_options));
    }

    let model = builder.build()?;
    log::info!(
        "Built chart {}: {} nodes ({} phantom), {} edges, {} clusters",
        model.name(),
        model.nodes().len(),
        resolved.phantoms.len(),
        model.edges().len(),
        model.clusters().len()
    );

    Ok(Chart {
        model,
        warnings: filtered.warnings,
    })
}

fn node_id<'a>(legacy: &'a Legacy, resolved: &'a ResolvedGraph, node: NodeRef) -> &'a str {
    match node {
        NodeRef::Hero(pos) => &legacy.heroes()[pos].id,
        NodeRef::Phantom(idx) => &resolved.phantoms[idx].id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Arrow, Direction, EmissionOrder, Label};
    use crate::record::{Gender, HeroClass, RelationshipStatus};

    fn family() -> Legacy {
        Legacy::builder()
            .hero("g-1", "Gomez", Gender::Male, HeroClass::Warrior)
            .hero("m-1", "Morticia", Gender::Female, HeroClass::Mystic)
            .hero("w-1", "Wednesday", Gender::Female, HeroClass::Hunter)
            .bond("g-1", "m-1", RelationshipStatus::Locked, Some("lover"))
            .parent("g-1", "w-1")
            .parent("m-1", "w-1")
            .parent("grandmama", "g-1")
            .build()
    }

    #[test]
    fn test_default_chart() {
        let chart = build_chart(&family(), &ChartOptions::default()).unwrap();
        let model = chart.model();
        assert_eq!(model.name(), DEFAULT_GRAPH_NAME);
        assert_eq!(model.nodes().len(), 4);
        assert_eq!(model.edges().len(), 4);
        assert!(model.clusters().is_empty());
        assert!(model.legend().is_none());

        let phantom = model.node("phantom_grandmama").unwrap();
        assert!(matches!(phantom.label, Label::Italic(_)));

        let bond = model
            .edges()
            .iter()
            .find(|e| e.style.dir == Direction::Both)
            .unwrap();
        assert!(!bond.constraint);
        assert_eq!(bond.style.arrowhead, Some(Arrow::Inv));

        let parent = model.edges().iter().find(|e| e.target == "w-1").unwrap();
        assert_eq!(parent.weight, Some(PARENT_EDGE_WEIGHT));
        assert_eq!(parent.style.tailport, Some("s"));
    }

    #[test]
    fn test_hero_named_like_phantom_builds() {
        let legacy = Legacy::builder()
            .hero("phantom_grandmama", "Impostor", Gender::Unknown, HeroClass::Unknown)
            .hero("g-1", "Gomez", Gender::Male, HeroClass::Warrior)
            .parent("grandmama", "g-1")
            .build();
        let chart = build_chart(&legacy, &ChartOptions::default()).unwrap();
        let model = chart.model();
        assert_eq!(model.nodes().len(), 3);
        assert!(matches!(
            model.node("phantom_grandmama_2").unwrap().label,
            Label::Italic(_)
        ));
        assert!(model.edges().iter().any(|e| e.source == "phantom_grandmama_2" && e.target == "g-1"));
    }

    #[test]
    fn test_prioritized_chart() {
        let options = ChartOptions {
            prioritize_relationships: true,
            ..Default::default()
        };
        let chart = build_chart(&family(), &options).unwrap();
        assert_eq!(chart.model().order(), EmissionOrder::EdgesFirst);
        let bond = chart
            .model()
            .edges()
            .iter()
            .find(|e| e.style.dir == Direction::Both)
            .unwrap();
        assert!(bond.constraint);
        assert_eq!(bond.weight, Some(layout::PRIORITY_BOND_WEIGHT));
    }

    #[test]
    fn test_legend_chart() {
        let options = ChartOptions {
            include_legend: true,
            ..Default::default()
        };
        let chart = build_chart(&family(), &options).unwrap();
        let legend = chart.model().legend().unwrap();
        assert_eq!(legend.edges.len(), 1);
        assert!(chart.to_dot().contains("\"legend_locked_lover_from\" [label=\"soulmates\""));
    }

    #[test]
    fn test_one_cluster_for_connected_family() {
        let options = ChartOptions {
            pack_by_subgraphs: true,
            ..Default::default()
        };
        let chart = build_chart(&family(), &options).unwrap();
        let clusters = chart.model().clusters();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].node_ids.len(), 4);
        assert_eq!(chart.model().graph_attr("packmode"), Some("graph"));
    }

    #[test]
    fn test_warnings_surface() {
        let mut options = ChartOptions::default();
        options.filter.exclude_heroes = Some(vec!["Pugsley".to_string()]);
        let chart = build_chart(&family(), &options).unwrap();
        assert_eq!(chart.warnings().len(), 1);
        assert_eq!(chart.model().nodes().len(), 4);
    }
}
