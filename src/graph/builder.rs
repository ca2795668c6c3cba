use std::collections::HashSet;

use super::{
    ClusterDescriptor, EdgeDescriptor, EmissionOrder, GraphModel, Legend, NodeDescriptor,
};
use crate::error::{ChartError, Result};

/// Accumulates descriptors and validates them into an immutable [`GraphModel`].
pub struct GraphBuilder {
    name: String,
    graph_attrs: Vec<(String, String)>,
    nodes: Vec<NodeDescriptor>,
    edges: Vec<EdgeDescriptor>,
    clusters: Vec<ClusterDescriptor>,
    legend: Option<Legend>,
    order: EmissionOrder,
}

impl GraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph_attrs: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
            clusters: Vec::new(),
            legend: None,
            order: EmissionOrder::default(),
        }
    }

    pub fn graph_attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.graph_attrs.push((key.into(), value.into()));
        self
    }

    pub fn node(&mut self, node: NodeDescriptor) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn edge(&mut self, edge: EdgeDescriptor) -> &mut Self {
        self.edges.push(edge);
        self
    }

    pub fn cluster(&mut self, cluster: ClusterDescriptor) -> &mut Self {
        self.clusters.push(cluster);
        self
    }

    pub fn legend(&mut self, legend: Legend) -> &mut Self {
        self.legend = Some(legend);
        self
    }

    pub fn order(&mut self, order: EmissionOrder) -> &mut Self {
        self.order = order;
        self
    }

    /// Validate and freeze the model.
    ///
    /// Fails with `InconsistentModel` on duplicate node ids (across the main
    /// graph and the legend), on edges whose endpoints are not declared in the
    /// same scope, and on clusters naming unknown nodes or sharing a node.
    pub fn build(self) -> Result<GraphModel> {
        self.validate()?;

        log::debug!(
            "Graph model {}: {} nodes, {} edges, {} clusters",
            self.name,
            self.nodes.len(),
            self.edges.len(),
            self.clusters.len()
        );

        Ok(GraphModel {
            name: self.name,
            graph_attrs: self.graph_attrs,
            nodes: self.nodes,
            edges: self.edges,
            clusters: self.clusters,
            legend: self.legend.filter(|l| !l.is_empty()),
            order: self.order,
        })
    }

    fn validate(&self) -> Result<()> {
        let mut all_ids: HashSet<&str> = HashSet::new();
        for node in self.nodes.iter().chain(self.legend.iter().flat_map(|l| &l.nodes)) {
            if !all_ids.insert(node.id.as_str()) {
                return Err(ChartError::InconsistentModel(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
        }

        let main_ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        check_edges(&self.edges, &main_ids, "graph")?;
        if let Some(legend) = &self.legend {
            let legend_ids: HashSet<&str> = legend.nodes.iter().map(|n| n.id.as_str()).collect();
            check_edges(&legend.edges, &legend_ids, "legend")?;
        }

        let mut clustered: HashSet<&str> = HashSet::new();
        for cluster in &self.clusters {
            for id in &cluster.node_ids {
                if !main_ids.contains(id.as_str()) {
                    return Err(ChartError::InconsistentModel(format!(
                        "cluster {} references missing node {}",
                        cluster.name, id
                    )));
                }
                if !clustered.insert(id.as_str()) {
                    return Err(ChartError::InconsistentModel(format!(
                        "node {} belongs to more than one cluster",
                        id
                    )));
                }
            }
        }
        Ok(())
    }
}

fn check_edges(edges: &[EdgeDescriptor], ids: &HashSet<&str>, scope: &str) -> Result<()> {
    for edge in edges {
        for endpoint in [&edge.source, &edge.target] {
            if !ids.contains(endpoint.as_str()) {
                return Err(ChartError::InconsistentModel(format!(
                    "{} edge {} -> {} references missing node {}",
                    scope, edge.source, edge.target, endpoint
                )));
            }
        }
    }
    Ok(())
}
