//! Node styling
//!
//! A [`Style`] holds every input the layout algorithm reads: enum choices,
//! flex factors, per-edge values, and dimensional bounds. Styles are plain
//! data; attach one to a node with [`crate::Node::set_style`], which marks
//! the tree dirty only when the style actually changed.

pub mod edges;
pub mod types;
pub mod values;

use edges::Edges;
use types::{
  Align, Dimension, Direction, Display, FlexDirection, Justify, Overflow, PositionType, Wrap,
};
use values::{Value, UNDEFINED};

/// Width/height pair of style values
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dimensions {
  pub width: Value,
  pub height: Value,
}

impl Dimensions {
  /// Both dimensions `auto`
  pub const AUTO: Self = Self {
    width: Value::AUTO,
    height: Value::AUTO,
  };

  /// Both dimensions undefined
  pub const UNDEFINED: Self = Self {
    width: Value::UNDEFINED,
    height: Value::UNDEFINED,
  };

  /// Creates a pair of point dimensions
  pub const fn points(width: f32, height: f32) -> Self {
    Self {
      width: Value::point(width),
      height: Value::point(height),
    }
  }

  /// Value for one dimension
  pub fn get(&self, dimension: Dimension) -> Value {
    match dimension {
      Dimension::Width => self.width,
      Dimension::Height => self.height,
    }
  }

  /// Sets one dimension
  pub fn set(&mut self, dimension: Dimension, value: Value) {
    match dimension {
      Dimension::Width => self.width = value,
      Dimension::Height => self.height = value,
    }
  }
}

impl Default for Dimensions {
  fn default() -> Self {
    Self::UNDEFINED
  }
}

/// The style inputs of one node
///
/// Scalar fields use `NAN` for "unset". `flex` is the shorthand that feeds
/// `flex_grow`/`flex_shrink`/`flex_basis` resolution when those are unset.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Style {
  pub direction: Direction,
  pub flex_direction: FlexDirection,
  pub justify_content: Justify,
  pub align_content: Align,
  pub align_items: Align,
  pub align_self: Align,
  pub position_type: PositionType,
  pub flex_wrap: Wrap,
  pub overflow: Overflow,
  pub display: Display,
  pub flex: f32,
  pub flex_grow: f32,
  pub flex_shrink: f32,
  pub flex_basis: Value,
  pub margin: Edges,
  pub position: Edges,
  pub padding: Edges,
  pub border: Edges,
  pub dimensions: Dimensions,
  pub min_dimensions: Dimensions,
  pub max_dimensions: Dimensions,
  pub aspect_ratio: f32,
}

impl Default for Style {
  fn default() -> Self {
    Self {
      direction: Direction::Inherit,
      flex_direction: FlexDirection::Column,
      justify_content: Justify::FlexStart,
      align_content: Align::FlexStart,
      align_items: Align::Stretch,
      align_self: Align::Auto,
      position_type: PositionType::Relative,
      flex_wrap: Wrap::NoWrap,
      overflow: Overflow::Visible,
      display: Display::Flex,
      flex: UNDEFINED,
      flex_grow: UNDEFINED,
      flex_shrink: UNDEFINED,
      flex_basis: Value::AUTO,
      margin: Edges::default(),
      position: Edges::default(),
      padding: Edges::default(),
      border: Edges::default(),
      dimensions: Dimensions::AUTO,
      min_dimensions: Dimensions::UNDEFINED,
      max_dimensions: Dimensions::UNDEFINED,
      aspect_ratio: UNDEFINED,
    }
  }
}

impl Style {
  /// The defaults browsers use: row direction, stretched content lines.
  /// The web flex-shrink default of 1 is applied at resolution time from
  /// the config.
  pub fn web_default() -> Self {
    Self {
      flex_direction: FlexDirection::Row,
      align_content: Align::Stretch,
      ..Self::default()
    }
  }
}

fn scalar_equal(a: f32, b: f32) -> bool {
  (a.is_nan() && b.is_nan()) || a == b
}

/// Value-based equality; unset scalars (`NAN`) compare equal to each other
impl PartialEq for Style {
  fn eq(&self, other: &Self) -> bool {
    self.direction == other.direction
      && self.flex_direction == other.flex_direction
      && self.justify_content == other.justify_content
      && self.align_content == other.align_content
      && self.align_items == other.align_items
      && self.align_self == other.align_self
      && self.position_type == other.position_type
      && self.flex_wrap == other.flex_wrap
      && self.overflow == other.overflow
      && self.display == other.display
      && self.flex_basis == other.flex_basis
      && self.margin == other.margin
      && self.position == other.position
      && self.padding == other.padding
      && self.border == other.border
      && self.dimensions == other.dimensions
      && self.min_dimensions == other.min_dimensions
      && self.max_dimensions == other.max_dimensions
      && scalar_equal(self.flex, other.flex)
      && scalar_equal(self.flex_grow, other.flex_grow)
      && scalar_equal(self.flex_shrink, other.flex_shrink)
      && scalar_equal(self.aspect_ratio, other.aspect_ratio)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_match_engine_defaults() {
    let style = Style::default();
    assert_eq!(style.direction, Direction::Inherit);
    assert_eq!(style.flex_direction, FlexDirection::Column);
    assert_eq!(style.justify_content, Justify::FlexStart);
    assert_eq!(style.align_content, Align::FlexStart);
    assert_eq!(style.align_items, Align::Stretch);
    assert_eq!(style.align_self, Align::Auto);
    assert_eq!(style.flex_basis, Value::AUTO);
    assert!(style.flex_grow.is_nan());
    assert_eq!(style.dimensions, Dimensions::AUTO);
    assert_eq!(style.min_dimensions, Dimensions::UNDEFINED);
  }

  #[test]
  fn web_defaults_override_direction_and_content_alignment() {
    let style = Style::web_default();
    assert_eq!(style.flex_direction, FlexDirection::Row);
    assert_eq!(style.align_content, Align::Stretch);
    assert_eq!(style.align_items, Align::Stretch);
  }

  #[test]
  fn equality_is_value_based() {
    let a = Style::default();
    let b = Style::default();
    assert_eq!(a, b);

    let mut c = Style::default();
    c.flex_grow = 1.0;
    assert_ne!(a, c);

    let mut d = Style::default();
    d.margin[types::Edge::Left] = Value::point(4.0);
    assert_ne!(a, d);
  }
}
