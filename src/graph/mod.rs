//! Renderer-agnostic graph model, its builder, and the DOT serializer.
//!
//! A [`GraphModel`] can only be obtained from [`GraphBuilder::build`], which
//! checks that node ids are unique and that no edge or cluster points at a
//! missing node.

mod builder;
mod dot;
mod traversal;

pub use builder::GraphBuilder;
pub use dot::{escape_html, escape_quoted, to_dot};
pub use traversal::connected_components;

/// Node outline shapes used by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Box,
    Ellipse,
    Diamond,
    Octagon,
    Plaintext,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Ellipse => "ellipse",
            Self::Diamond => "diamond",
            Self::Octagon => "octagon",
            Self::Plaintext => "plaintext",
        }
    }
}

/// Stroke style for nodes and edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl LineStyle {
    /// `None` for the engine default.
    pub fn as_attr(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("dashed"),
            Self::Dotted => Some("dotted"),
            Self::Bold => Some("bold"),
        }
    }
}

/// Node label text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Plain(String),
    Italic(String),
}

impl Label {
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Italic(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Both,
    None,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Both => "both",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    Normal,
    Inv,
    Open,
    HalfOpen,
    None,
}

impl Arrow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Inv => "inv",
            Self::Open => "open",
            Self::HalfOpen => "halfopen",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeDescriptor {
    pub id: String,
    pub label: Label,
    pub shape: Shape,
    /// Outline and font color
    pub color: Option<&'static str>,
    pub style: LineStyle,
}

/// Visual attributes of an edge, shared by every edge of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeStyle {
    pub dir: Direction,
    pub arrowhead: Option<Arrow>,
    pub arrowtail: Option<Arrow>,
    pub line: LineStyle,
    pub color: Option<&'static str>,
    pub tailport: Option<&'static str>,
    pub headport: Option<&'static str>,
}

impl EdgeStyle {
    pub const fn plain(dir: Direction) -> Self {
        Self {
            dir,
            arrowhead: None,
            arrowtail: None,
            line: LineStyle::Solid,
            color: None,
            tailport: None,
            headport: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeDescriptor {
    pub source: String,
    pub target: String,
    pub style: EdgeStyle,
    /// `false` keeps the edge out of rank assignment
    pub constraint: bool,
    pub weight: Option<u32>,
}

/// A named group of nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterDescriptor {
    pub name: String,
    pub label: Option<String>,
    pub node_ids: Vec<String>,
    /// Emit as a `cluster_` subgraph so the engine keeps members together
    pub keep_close: bool,
}

/// Auxiliary key drawn next to the chart; owns its own nodes and edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    pub nodes: Vec<NodeDescriptor>,
    pub edges: Vec<EdgeDescriptor>,
}

impl Legend {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Whether node statements precede edge statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmissionOrder {
    #[default]
    NodesFirst,
    EdgesFirst,
}

/// The assembled chart, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphModel {
    name: String,
    graph_attrs: Vec<(String, String)>,
    nodes: Vec<NodeDescriptor>,
    edges: Vec<EdgeDescriptor>,
    clusters: Vec<ClusterDescriptor>,
    legend: Option<Legend>,
    order: EmissionOrder,
}

impl GraphModel {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph_attrs(&self) -> &[(String, String)] {
        &self.graph_attrs
    }

    pub fn nodes(&self) -> &[NodeDescriptor] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeDescriptor] {
        &self.edges
    }

    pub fn clusters(&self) -> &[ClusterDescriptor] {
        &self.clusters
    }

    pub fn legend(&self) -> Option<&Legend> {
        self.legend.as_ref()
    }

    pub fn order(&self) -> EmissionOrder {
        self.order
    }

    pub fn node(&self, id: &str) -> Option<&NodeDescriptor> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn graph_attr(&self, key: &str) -> Option<&str> {
        self.graph_attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_dot(&self) -> String {
        to_dot(self)
    }
}
