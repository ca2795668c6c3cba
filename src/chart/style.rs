//! Visual mapping from hero and relationship attributes.

use std::collections::BTreeSet;

use crate::graph::{
    Arrow, Direction, EdgeDescriptor, EdgeStyle, Label, Legend, LineStyle, NodeDescriptor, Shape,
};
use crate::record::{Bond, Gender, Hero, HeroClass, RelationshipStatus};

pub const PHANTOM_LABEL: &str = "unknown parent";

/// Node styling switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleOptions {
    pub no_gender_shapes: bool,
    pub no_class_colors: bool,
}

/// Resolved style of one bond kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BondStyle {
    /// Stable key, also the legend sort key
    pub key: &'static str,
    pub legend: &'static str,
    pub edge: EdgeStyle,
}

const BOTH_WAYS: EdgeStyle = EdgeStyle::plain(Direction::Both);

const UNDIRECTED: EdgeStyle = EdgeStyle {
    arrowhead: Some(Arrow::None),
    arrowtail: Some(Arrow::None),
    line: LineStyle::Dashed,
    ..EdgeStyle::plain(Direction::None)
};

const BOND_STYLES: &[BondStyle] = &[
    BondStyle {
        key: "locked_lover",
        legend: "soulmates",
        edge: EdgeStyle {
            arrowhead: Some(Arrow::Inv),
            arrowtail: Some(Arrow::Inv),
            color: Some("red"),
            ..BOTH_WAYS
        },
    },
    BondStyle {
        key: "locked_rival",
        legend: "rivals",
        edge: EdgeStyle {
            arrowhead: Some(Arrow::Open),
            arrowtail: Some(Arrow::Open),
            color: Some("blue"),
            ..BOTH_WAYS
        },
    },
    BondStyle {
        key: "past_lover",
        legend: "past lovers",
        edge: EdgeStyle {
            color: Some("red"),
            ..UNDIRECTED
        },
    },
    BondStyle {
        key: "past_rival",
        legend: "past rivals",
        edge: EdgeStyle {
            color: Some("blue"),
            ..UNDIRECTED
        },
    },
    BondStyle {
        key: "past_friend",
        legend: "past friends",
        edge: EdgeStyle {
            color: Some("green"),
            ..UNDIRECTED
        },
    },
];

const UNKNOWN_LOCKED: BondStyle = BondStyle {
    key: "unknown_locked",
    legend: "other locked",
    edge: EdgeStyle {
        arrowhead: Some(Arrow::HalfOpen),
        arrowtail: Some(Arrow::HalfOpen),
        ..BOTH_WAYS
    },
};

const UNKNOWN_PAST: BondStyle = BondStyle {
    key: "unknown_past",
    legend: "other past",
    edge: UNDIRECTED,
};

const OTHER_STATUS: BondStyle = BondStyle {
    key: "unknown_status",
    legend: "other",
    edge: EdgeStyle {
        line: LineStyle::Dotted,
        color: Some("gray"),
        ..EdgeStyle::plain(Direction::None)
    },
};

/// Edge style for a bond; depends on status and type only.
pub fn bond_style(bond: &Bond) -> BondStyle {
    let key = bond.key();
    if let Some(style) = BOND_STYLES.iter().find(|s| s.key == key) {
        return *style;
    }
    match bond.status {
        RelationshipStatus::Locked => UNKNOWN_LOCKED,
        RelationshipStatus::Past => UNKNOWN_PAST,
        RelationshipStatus::Other(_) => OTHER_STATUS,
    }
}

pub fn parent_edge_style() -> EdgeStyle {
    EdgeStyle {
        tailport: Some("s"),
        headport: Some("n"),
        ..EdgeStyle::plain(Direction::Forward)
    }
}

pub const PARENT_EDGE_WEIGHT: u32 = 5;

pub fn gender_shape(gender: Gender) -> Shape {
    match gender {
        Gender::Male => Shape::Box,
        Gender::Female => Shape::Ellipse,
        Gender::Nonbinary => Shape::Diamond,
        Gender::Unknown => Shape::Octagon,
    }
}

pub fn class_color(class: HeroClass) -> &'static str {
    match class {
        HeroClass::Warrior => "darkred",
        HeroClass::Hunter => "darkgreen",
        HeroClass::Mystic => "blue",
        HeroClass::Unknown => "dimgray",
    }
}

pub fn hero_node(hero: &Hero, options: StyleOptions) -> NodeDescriptor {
    let shape = if options.no_gender_shapes {
        Shape::Ellipse
    } else {
        gender_shape(hero.gender)
    };
    let color = if options.no_class_colors {
        "black"
    } else {
        class_color(hero.class)
    };
    NodeDescriptor {
        id: hero.id.clone(),
        label: Label::Plain(hero.name.clone()),
        shape,
        color: Some(color),
        style: LineStyle::Solid,
    }
}

/// Phantoms look the same whatever the hero switches say.
pub fn phantom_node(id: &str) -> NodeDescriptor {
    NodeDescriptor {
        id: id.to_string(),
        label: Label::Italic(PHANTOM_LABEL.to_string()),
        shape: Shape::Ellipse,
        color: Some("gray"),
        style: LineStyle::Dotted,
    }
}

/// Build the legend for what the chart actually shows.
///
/// Genders and classes are listed only while their switch is on. Entries come
/// out in a fixed order: genders, classes, then bond styles by key.
pub fn legend<'a>(
    heroes: impl IntoIterator<Item = &'a Hero>,
    bonds: impl IntoIterator<Item = &'a Bond>,
    options: StyleOptions,
) -> Legend {
    let mut genders = BTreeSet::new();
    let mut classes = BTreeSet::new();
    for hero in heroes {
        genders.insert(hero.gender);
        classes.insert(hero.class);
    }

    let mut legend = Legend::default();

    if !options.no_gender_shapes {
        for gender in genders {
            legend.nodes.push(NodeDescriptor {
                id: format!("legend_gender_{}", gender.as_str()),
                label: Label::Plain(gender.as_str().to_string()),
                shape: gender_shape(gender),
                color: None,
                style: LineStyle::Solid,
            });
        }
    }

    if !options.no_class_colors {
        for class in classes {
            let color = class_color(class);
            legend.nodes.push(NodeDescriptor {
                id: format!("legend_class_{}", class.as_str()),
                label: Label::Plain(class.as_str().to_string()),
                shape: Shape::Plaintext,
                color: Some(color),
                style: LineStyle::Solid,
            });
        }
    }

    let mut styles: Vec<BondStyle> = bonds.into_iter().map(bond_style).collect();
    styles.sort_by_key(|s| s.key);
    styles.dedup_by_key(|s| s.key);
    for style in styles {
        let from = format!("legend_{}_from", style.key);
        let to = format!("legend_{}_to", style.key);
        legend.nodes.push(NodeDescriptor {
            id: from.clone(),
            label: Label::Plain(style.legend.to_string()),
            shape: Shape::Plaintext,
            color: None,
            style: LineStyle::Solid,
        });
        legend.nodes.push(NodeDescriptor {
            id: to.clone(),
            label: Label::Plain(" ".to_string()),
            shape: Shape::Plaintext,
            color: None,
            style: LineStyle::Solid,
        });
        legend.edges.push(EdgeDescriptor {
            source: from,
            target: to,
            style: style.edge,
            constraint: true,
            weight: None,
        });
    }

    legend
}
