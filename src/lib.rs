//! A flexbox layout engine over a mutable styled node tree.
//!
//! Build a tree of [`Node`]s, attach a [`Style`] to each, then call
//! [`Node::calculate_layout`]. Afterwards every node exposes a computed
//! position (relative to its parent), measured dimensions, and resolved
//! per-edge margin/border/padding.
//!
//! Text-like leaves are sized through a host-provided measure callback; a
//! per-node measurement cache makes repeated layouts cheap.
//!
//! # Example
//!
//! ```
//! use flexlayout::{Direction, FlexDirection, Node, Style, Value};
//!
//! let mut style = Style::default();
//! style.flex_direction = FlexDirection::Row;
//! style.dimensions.width = Value::point(300.0);
//! style.dimensions.height = Value::point(50.0);
//! let root = Node::new();
//! root.set_style(style);
//!
//! let mut child_style = Style::default();
//! child_style.flex_grow = 1.0;
//! let child = Node::new();
//! child.set_style(child_style);
//! root.insert_child(&child, 0);
//!
//! root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
//! assert_eq!(child.layout_width(), 300.0);
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod style;
pub mod tree;

pub use config::{ClonedFunc, Config, ConfigRef, ExperimentalFeature, LogLevel, Logger};
pub use error::{Result, TreeError};
pub use geometry::Size;
pub use style::edges::Edges;
pub use style::types::{
  Align, Dimension, Direction, Display, Edge, FlexDirection, Justify, MeasureMode, NodeType,
  Overflow, PositionType, Unit, Wrap,
};
pub use style::values::Value;
pub use style::{Dimensions, Style};
pub use tree::node::{BaselineFunc, DirtiedFunc, MeasureFunc, Node};
