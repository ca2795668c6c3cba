//! Graphviz DOT serialization of a [`GraphModel`].
//!
//! Output is a pure function of the model: statements follow insertion
//! order, every id and attribute value is quoted, and nothing depends on hash
//! iteration order.

use std::fmt::Write;

use super::{ClusterDescriptor, EdgeDescriptor, EmissionOrder, GraphModel, Label, Legend, NodeDescriptor};

const INDENT: &str = "    ";

/// Render the model as a DOT `digraph`.
pub fn to_dot(model: &GraphModel) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph {} {{", quote(model.name()));

    if !model.graph_attrs().is_empty() {
        let attrs: Vec<(&str, String)> = model
            .graph_attrs()
            .iter()
            .map(|(k, v)| (k.as_str(), quote(v)))
            .collect();
        let _ = writeln!(out, "{}graph{};", INDENT, attr_list(&attrs));
    }

    match model.order() {
        EmissionOrder::NodesFirst => {
            write_nodes(&mut out, model.nodes(), INDENT);
            write_edges(&mut out, model.edges(), INDENT);
        }
        EmissionOrder::EdgesFirst => {
            write_edges(&mut out, model.edges(), INDENT);
            write_nodes(&mut out, model.nodes(), INDENT);
        }
    }

    for cluster in model.clusters() {
        write_cluster(&mut out, cluster);
    }

    if let Some(legend) = model.legend() {
        write_legend(&mut out, legend);
    }

    out.push_str("}\n");
    out
}

fn write_nodes(out: &mut String, nodes: &[NodeDescriptor], indent: &str) {
    for node in nodes {
        let mut attrs = vec![("label", label_value(&node.label)), ("shape", quote(node.shape.as_str()))];
        if let Some(color) = node.color {
            attrs.push(("color", quote(color)));
            attrs.push(("fontcolor", quote(color)));
        }
        if let Some(style) = node.style.as_attr() {
            attrs.push(("style", quote(style)));
        }
        let _ = writeln!(out, "{}{}{};", indent, quote(&node.id), attr_list(&attrs));
    }
}

fn write_edges(out: &mut String, edges: &[EdgeDescriptor], indent: &str) {
    for edge in edges {
        let style = &edge.style;
        let mut attrs = vec![("dir", quote(style.dir.as_str()))];
        if let Some(head) = style.arrowhead {
            attrs.push(("arrowhead", quote(head.as_str())));
        }
        if let Some(tail) = style.arrowtail {
            attrs.push(("arrowtail", quote(tail.as_str())));
        }
        if let Some(line) = style.line.as_attr() {
            attrs.push(("style", quote(line)));
        }
        if let Some(color) = style.color {
            attrs.push(("color", quote(color)));
        }
        if let Some(port) = style.tailport {
            attrs.push(("tailport", quote(port)));
        }
        if let Some(port) = style.headport {
            attrs.push(("headport", quote(port)));
        }
        if !edge.constraint {
            attrs.push(("constraint", quote("false")));
        }
        if let Some(weight) = edge.weight {
            attrs.push(("weight", quote(&weight.to_string())));
        }
        let _ = writeln!(
            out,
            "{}{} -> {}{};",
            indent,
            quote(&edge.source),
            quote(&edge.target),
            attr_list(&attrs)
        );
    }
}

fn write_cluster(out: &mut String, cluster: &ClusterDescriptor) {
    let name = if cluster.keep_close {
        format!("cluster_{}", cluster.name)
    } else {
        cluster.name.clone()
    };
    let _ = writeln!(out, "{}subgraph {} {{", INDENT, quote(&name));
    let inner = format!("{}{}", INDENT, INDENT);
    if let Some(label) = &cluster.label {
        let _ = writeln!(out, "{}label={};", inner, quote(label));
    }
    for id in &cluster.node_ids {
        let _ = writeln!(out, "{}{};", inner, quote(id));
    }
    let _ = writeln!(out, "{}}}", INDENT);
}

fn write_legend(out: &mut String, legend: &Legend) {
    let inner = format!("{}{}", INDENT, INDENT);
    let _ = writeln!(out, "{}subgraph {} {{", INDENT, quote("cluster_legend"));
    let _ = writeln!(out, "{}label={};", inner, quote("Legend"));
    let _ = writeln!(out, "{}style={};", inner, quote("bold"));
    write_nodes(out, &legend.nodes, &inner);
    write_edges(out, &legend.edges, &inner);
    let _ = writeln!(out, "{}}}", INDENT);
}

fn attr_list(attrs: &[(&str, String)]) -> String {
    if attrs.is_empty() {
        return String::new();
    }
    let body = attrs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(", ");
    format!(" [{}]", body)
}

fn label_value(label: &Label) -> String {
    match label {
        Label::Plain(text) => quote(text),
        Label::Italic(text) => format!("<<i>{}</i>>", escape_html(text)),
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", escape_quoted(value))
}

/// Escape a string for use inside a double-quoted DOT string.
pub fn escape_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for an HTML-like DOT label.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<br/>"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}
