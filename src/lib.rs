pub mod chart;
pub mod config;
pub mod error;
pub mod filter;
pub mod graph;
pub mod legacy;
pub mod record;
pub mod render;

pub use chart::{build_chart, Chart, ChartOptions};
pub use config::Config;
pub use error::{ChartError, Result};
pub use filter::{filter_legacy, FilterParams, FilteredSet};
pub use graph::{GraphBuilder, GraphModel};
pub use legacy::{load_legacy, parse_legacy};
pub use record::{Bond, Gender, Hero, HeroClass, Legacy, Relationship, RelationshipKind, RelationshipStatus};
pub use render::{ChartRenderer, DotFileWriter, GraphvizRenderer};
