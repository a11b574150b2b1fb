//! Shared layout helpers
//!
//! Small per-node computations used by several passes: min/max bounding,
//! effective item alignment, baselines, and the max-size constraint applied
//! before recursive measurement.

use crate::style::types::{Align, Dimension, Edge, FlexDirection, MeasureMode, PositionType};
use crate::style::values::is_undefined;
use crate::tree::node::Node;

/// Clamps `value` to the node's resolved min/max dimension along `axis`.
/// The max bound applies first, then the min bound, so min wins when they
/// conflict.
pub(crate) fn bound_axis_within_min_max(
  node: &Node,
  axis: FlexDirection,
  value: f32,
  axis_size: f32,
) -> f32 {
  let style = node.style();
  let (min, max) = if axis.is_column() {
    (
      style.min_dimensions.height.resolve(axis_size),
      style.max_dimensions.height.resolve(axis_size),
    )
  } else {
    (
      style.min_dimensions.width.resolve(axis_size),
      style.max_dimensions.width.resolve(axis_size),
    )
  };

  let mut bound = value;
  if !is_undefined(max) && max >= 0.0 && bound > max {
    bound = max;
  }
  if !is_undefined(min) && min >= 0.0 && bound < min {
    bound = min;
  }
  bound
}

/// Like [`bound_axis_within_min_max`] but also floors the value at the
/// node's padding plus border along the axis
pub(crate) fn bound_axis(
  node: &Node,
  axis: FlexDirection,
  value: f32,
  axis_size: f32,
  width_size: f32,
) -> f32 {
  bound_axis_within_min_max(node, axis, value, axis_size)
    .max(node.padding_and_border_for_axis(axis, width_size))
}

/// The alignment that applies to `child` inside `node`: the child's
/// `align_self` unless auto, else the parent's `align_items`. Baseline
/// degrades to flex-start in column containers.
pub(crate) fn align_item(node: &Node, child: &Node) -> Align {
  let child_align = child.style().align_self;
  let align = if child_align == Align::Auto {
    node.style().align_items
  } else {
    child_align
  };
  if align == Align::Baseline && node.style().flex_direction.is_column() {
    return Align::FlexStart;
  }
  align
}

/// Ascent of a node in points
///
/// A baseline callback wins (NaN from it is fatal). Otherwise the first
/// baseline-aligned in-flow child on the first line is used, falling back
/// to the first in-flow child, then to the node's own measured height.
pub(crate) fn baseline(node: &Node) -> f32 {
  if let Some(func) = node.baseline_func() {
    let ascent = func(
      node,
      node.measured_dimension(Dimension::Width),
      node.measured_dimension(Dimension::Height),
    );
    if is_undefined(ascent) {
      node.fatal_msg("Expect custom baseline function to not return NaN");
    }
    return ascent;
  }

  let mut baseline_child: Option<Node> = None;
  for child in node.children() {
    if child.line_index() > 0 {
      break;
    }
    if child.style().position_type == PositionType::Absolute {
      continue;
    }
    if align_item(node, &child) == Align::Baseline {
      baseline_child = Some(child);
      break;
    }
    if baseline_child.is_none() {
      baseline_child = Some(child);
    }
  }

  match baseline_child {
    None => node.measured_dimension(Dimension::Height),
    Some(child) => {
      let child_baseline = baseline(&child);
      child_baseline + child.layout().position[Edge::Top as usize]
    }
  }
}

/// True when cross-axis alignment of this row container involves baselines
pub(crate) fn is_baseline_layout(node: &Node) -> bool {
  if node.style().flex_direction.is_column() {
    return false;
  }
  if node.style().align_items == Align::Baseline {
    return true;
  }
  node.children().iter().any(|child| {
    let style = child.style();
    style.position_type == PositionType::Relative && style.align_self == Align::Baseline
  })
}

/// Caps `size`/`mode` by the node's max dimension (plus margin) along
/// `axis` before a recursive measurement
pub(crate) fn constrain_max_size_for_mode(
  node: &Node,
  axis: FlexDirection,
  parent_axis_size: f32,
  parent_width: f32,
  mode: &mut MeasureMode,
  size: &mut f32,
) {
  let max_size = node
    .style()
    .max_dimensions
    .get(axis.dimension())
    .resolve(parent_axis_size)
    + node.margin_for_axis(axis, parent_width);
  match *mode {
    MeasureMode::Exactly | MeasureMode::AtMost => {
      if !(is_undefined(max_size) || *size < max_size) {
        *size = max_size;
      }
    }
    MeasureMode::Undefined => {
      if !is_undefined(max_size) {
        *mode = MeasureMode::AtMost;
        *size = max_size;
      }
    }
  }
}

/// Mirrors a child's leading position into its trailing edge so reverse
/// axes read correctly
pub(crate) fn set_child_trailing_position(node: &Node, child: &Node, axis: FlexDirection) {
  let size = child.measured_dimension(axis.dimension());
  let container_size = node.measured_dimension(axis.dimension());
  let leading = child.layout().position[axis.leading_edge() as usize];
  child.layout_mut().position[axis.trailing_edge() as usize] = container_size - size - leading;
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::values::{Value, UNDEFINED};

  #[test]
  fn bound_axis_min_wins_over_max() {
    let node = Node::new();
    let mut style = node.style();
    style.min_dimensions.width = Value::point(50.0);
    style.max_dimensions.width = Value::point(40.0);
    node.set_style(style);
    assert_eq!(
      bound_axis_within_min_max(&node, FlexDirection::Row, 45.0, UNDEFINED),
      50.0
    );
  }

  #[test]
  fn bound_axis_floors_at_padding_and_border() {
    let node = Node::new();
    let mut style = node.style();
    style.padding[Edge::Left] = Value::point(10.0);
    style.padding[Edge::Right] = Value::point(10.0);
    node.set_style(style);
    assert_eq!(bound_axis(&node, FlexDirection::Row, 5.0, UNDEFINED, UNDEFINED), 20.0);
  }

  #[test]
  fn align_item_prefers_align_self() {
    let parent = Node::new();
    let child = Node::new();
    let mut style = parent.style();
    style.align_items = Align::Center;
    parent.set_style(style);
    assert_eq!(align_item(&parent, &child), Align::Center);

    let mut style = child.style();
    style.align_self = Align::FlexEnd;
    child.set_style(style);
    assert_eq!(align_item(&parent, &child), Align::FlexEnd);
  }

  #[test]
  fn baseline_degrades_to_flex_start_in_columns() {
    let parent = Node::new();
    let child = Node::new();
    let mut style = child.style();
    style.align_self = Align::Baseline;
    child.set_style(style);
    assert_eq!(align_item(&parent, &child), Align::FlexStart);
  }

  #[test]
  fn constrain_max_size_turns_undefined_into_at_most() {
    let node = Node::new();
    let mut style = node.style();
    style.max_dimensions.width = Value::point(120.0);
    node.set_style(style);

    let mut mode = MeasureMode::Undefined;
    let mut size = UNDEFINED;
    constrain_max_size_for_mode(&node, FlexDirection::Row, 500.0, 500.0, &mut mode, &mut size);
    assert_eq!(mode, MeasureMode::AtMost);
    assert_eq!(size, 120.0);

    let mut mode = MeasureMode::Exactly;
    let mut size = 200.0;
    constrain_max_size_for_mode(&node, FlexDirection::Row, 500.0, 500.0, &mut mode, &mut size);
    assert_eq!(mode, MeasureMode::Exactly);
    assert_eq!(size, 120.0);
  }
}
