//! Layout hints handed to the rendering engine.

use crate::graph::{connected_components, ClusterDescriptor, EmissionOrder};

const BASE_ATTRS: &[(&str, &str)] = &[
    ("rankdir", "TB"),
    ("overlap", "false"),
    ("outputorder", "nodesfirst"),
];

/// Bond weight when relationships drive the layout; above lineage weight.
pub const PRIORITY_BOND_WEIGHT: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutOptions {
    pub prioritize_relationships: bool,
    pub pack: bool,
    /// Implies `pack`
    pub pack_by_subgraphs: bool,
}

/// Graph-level attributes plus how bond edges take part in ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub graph_attrs: Vec<(&'static str, &'static str)>,
    pub order: EmissionOrder,
    pub bond_constraint: bool,
    pub bond_weight: Option<u32>,
    pub component_clusters: bool,
}

pub fn plan_layout(options: LayoutOptions) -> LayoutPlan {
    let mut graph_attrs = BASE_ATTRS.to_vec();
    if options.pack || options.pack_by_subgraphs {
        graph_attrs.push(("pack", "true"));
        graph_attrs.push((
            "packmode",
            if options.pack_by_subgraphs { "graph" } else { "node" },
        ));
    }

    let (order, bond_constraint, bond_weight) = if options.prioritize_relationships {
        (EmissionOrder::EdgesFirst, true, Some(PRIORITY_BOND_WEIGHT))
    } else {
        (EmissionOrder::NodesFirst, false, None)
    };

    LayoutPlan {
        graph_attrs,
        order,
        bond_constraint,
        bond_weight,
        component_clusters: options.pack_by_subgraphs,
    }
}

/// One keep-close cluster per weakly connected component, named `family_<n>`
/// from 1, in order of each component's first node.
pub fn component_clusters<'a, I>(node_ids: &[String], links: I) -> Vec<ClusterDescriptor>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    connected_components(node_ids, links)
        .into_iter()
        .enumerate()
        .map(|(i, members)| ClusterDescriptor {
            name: format!("family_{}", i + 1),
            label: None,
            node_ids: members,
            keep_close: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr<'a>(plan: &'a LayoutPlan, key: &str) -> Option<&'a str> {
        plan.graph_attrs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    #[test]
    fn test_default_layout() {
        let plan = plan_layout(LayoutOptions::default());
        assert_eq!(attr(&plan, "rankdir"), Some("TB"));
        assert_eq!(attr(&plan, "overlap"), Some("false"));
        assert_eq!(attr(&plan, "pack"), None);
        assert_eq!(plan.order, EmissionOrder::NodesFirst);
        assert!(!plan.bond_constraint);
        assert!(!plan.component_clusters);
    }

    #[test]
    fn test_pack_modes() {
        let plan = plan_layout(LayoutOptions {
            pack: true,
            ..Default::default()
        });
        assert_eq!(attr(&plan, "pack"), Some("true"));
        assert_eq!(attr(&plan, "packmode"), Some("node"));

        let plan = plan_layout(LayoutOptions {
            pack_by_subgraphs: true,
            ..Default::default()
        });
        assert_eq!(attr(&plan, "pack"), Some("true"));
        assert_eq!(attr(&plan, "packmode"), Some("graph"));
        assert!(plan.component_clusters);
    }

    #[test]
    fn test_prioritize_relationships() {
        let plan = plan_layout(LayoutOptions {
            prioritize_relationships: true,
            ..Default::default()
        });
        assert_eq!(plan.order, EmissionOrder::EdgesFirst);
        assert!(plan.bond_constraint);
        assert_eq!(plan.bond_weight, Some(PRIORITY_BOND_WEIGHT));
    }

    #[test]
    fn test_component_clusters() {
        let nodes: Vec<String> = ["g-1", "m-1", "x-1", "y-1"].iter().map(|s| s.to_string()).collect();
        let clusters = component_clusters(&nodes, [("g-1", "m-1"), ("y-1", "x-1")]);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].name, "family_1");
        assert_eq!(clusters[0].node_ids, vec!["g-1", "m-1"]);
        assert_eq!(clusters[1].node_ids, vec!["x-1", "y-1"]);
        assert!(clusters.iter().all(|c| c.keep_close));
    }
}
