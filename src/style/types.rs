//! Style enumerations and axis helpers
//!
//! Every enum here mirrors one style property choice. [`FlexDirection`]
//! additionally carries the axis machinery the layout passes lean on:
//! resolving a writing direction into physical axes and mapping an axis to
//! its leading/trailing physical edges and its dimension.

/// Writing direction of a subtree
///
/// `Inherit` resolves to the parent's resolved direction; the root defaults
/// to left-to-right when it has no parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
  #[default]
  Inherit,
  Ltr,
  Rtl,
}

/// Main-axis choice for a flex container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlexDirection {
  #[default]
  Column,
  ColumnReverse,
  Row,
  RowReverse,
}

impl FlexDirection {
  /// True for `Row` and `RowReverse`
  pub fn is_row(self) -> bool {
    matches!(self, Self::Row | Self::RowReverse)
  }

  /// True for `Column` and `ColumnReverse`
  pub fn is_column(self) -> bool {
    matches!(self, Self::Column | Self::ColumnReverse)
  }

  /// True for the reverse axes, whose leading edge is the physical trailing
  /// one
  pub fn is_reverse(self) -> bool {
    matches!(self, Self::ColumnReverse | Self::RowReverse)
  }

  /// Applies the writing direction: row axes swap with their reverse under
  /// RTL, column axes are unaffected
  pub fn resolve(self, direction: Direction) -> Self {
    if direction == Direction::Rtl {
      match self {
        Self::Row => Self::RowReverse,
        Self::RowReverse => Self::Row,
        other => other,
      }
    } else {
      self
    }
  }

  /// The axis perpendicular to `self`, resolved against the writing
  /// direction
  pub fn cross(self, direction: Direction) -> Self {
    if self.is_column() {
      Self::Row.resolve(direction)
    } else {
      Self::Column
    }
  }

  /// Physical edge where items start along this axis
  pub fn leading_edge(self) -> Edge {
    match self {
      Self::Column => Edge::Top,
      Self::ColumnReverse => Edge::Bottom,
      Self::Row => Edge::Left,
      Self::RowReverse => Edge::Right,
    }
  }

  /// Physical edge where items end along this axis
  pub fn trailing_edge(self) -> Edge {
    match self {
      Self::Column => Edge::Bottom,
      Self::ColumnReverse => Edge::Top,
      Self::Row => Edge::Right,
      Self::RowReverse => Edge::Left,
    }
  }

  /// The dimension measured along this axis
  pub fn dimension(self) -> Dimension {
    if self.is_row() {
      Dimension::Width
    } else {
      Dimension::Height
    }
  }
}

/// Main-axis distribution of free space within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Justify {
  #[default]
  FlexStart,
  Center,
  FlexEnd,
  SpaceBetween,
  SpaceAround,
  SpaceEvenly,
}

/// Cross-axis alignment of items and lines
///
/// Used for `align_items`, `align_self` (where `Auto` defers to the
/// parent's `align_items`), and `align_content` (where the `Space*`
/// variants apply).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
  Auto,
  FlexStart,
  Center,
  FlexEnd,
  Stretch,
  Baseline,
  SpaceBetween,
  SpaceAround,
}

/// In-flow versus out-of-flow positioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionType {
  #[default]
  Relative,
  Absolute,
}

/// Line wrapping behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wrap {
  #[default]
  NoWrap,
  Wrap,
  WrapReverse,
}

/// Overflow handling; `Scroll` changes how at-most sizing pins final
/// dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overflow {
  #[default]
  Visible,
  Hidden,
  Scroll,
}

/// Whether a node participates in layout at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Display {
  #[default]
  Flex,
  None,
}

/// Unit of a style [`Value`](crate::Value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
  #[default]
  Undefined,
  Point,
  Percent,
  Auto,
}

/// Sizing instruction passed from parent to child, per axis
///
/// - `Undefined`: size yourself to content; the available size is undefined
/// - `Exactly`: your outer size must equal `available - margin`
/// - `AtMost`: your outer size must not exceed `available - margin`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureMode {
  #[default]
  Undefined,
  Exactly,
  AtMost,
}

/// Box edges, including the bidi-aware and shorthand slots
///
/// The first six variants index resolved layout edges; all nine index the
/// style edge arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
  Left = 0,
  Top = 1,
  Right = 2,
  Bottom = 3,
  Start = 4,
  End = 5,
  Horizontal = 6,
  Vertical = 7,
  All = 8,
}

impl Edge {
  /// Number of edge slots in a style edge array
  pub const COUNT: usize = 9;
}

/// Width or height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
  Width = 0,
  Height = 1,
}

/// Distinguishes text leaves for pixel-grid rounding
///
/// Text nodes never round their size down (truncation risk); instead the
/// rounder forces ceiling/floor based on the fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeType {
  #[default]
  Default,
  Text,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn row_axes_swap_under_rtl() {
    assert_eq!(
      FlexDirection::Row.resolve(Direction::Rtl),
      FlexDirection::RowReverse
    );
    assert_eq!(
      FlexDirection::RowReverse.resolve(Direction::Rtl),
      FlexDirection::Row
    );
    assert_eq!(
      FlexDirection::Column.resolve(Direction::Rtl),
      FlexDirection::Column
    );
    assert_eq!(
      FlexDirection::Row.resolve(Direction::Ltr),
      FlexDirection::Row
    );
  }

  #[test]
  fn cross_axis_is_perpendicular() {
    assert_eq!(
      FlexDirection::Column.cross(Direction::Ltr),
      FlexDirection::Row
    );
    assert_eq!(
      FlexDirection::Column.cross(Direction::Rtl),
      FlexDirection::RowReverse
    );
    assert_eq!(
      FlexDirection::Row.cross(Direction::Ltr),
      FlexDirection::Column
    );
    assert_eq!(
      FlexDirection::RowReverse.cross(Direction::Rtl),
      FlexDirection::Column
    );
  }

  #[test]
  fn leading_and_trailing_edges_per_axis() {
    assert_eq!(FlexDirection::Column.leading_edge(), Edge::Top);
    assert_eq!(FlexDirection::Column.trailing_edge(), Edge::Bottom);
    assert_eq!(FlexDirection::ColumnReverse.leading_edge(), Edge::Bottom);
    assert_eq!(FlexDirection::ColumnReverse.trailing_edge(), Edge::Top);
    assert_eq!(FlexDirection::Row.leading_edge(), Edge::Left);
    assert_eq!(FlexDirection::Row.trailing_edge(), Edge::Right);
    assert_eq!(FlexDirection::RowReverse.leading_edge(), Edge::Right);
    assert_eq!(FlexDirection::RowReverse.trailing_edge(), Edge::Left);
  }

  #[test]
  fn axis_dimension() {
    assert_eq!(FlexDirection::Row.dimension(), Dimension::Width);
    assert_eq!(FlexDirection::RowReverse.dimension(), Dimension::Width);
    assert_eq!(FlexDirection::Column.dimension(), Dimension::Height);
  }
}
