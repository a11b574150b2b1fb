//! Absolute child layout
//!
//! Absolutely positioned children are sized and placed after the in-flow
//! pass: their dimensions come from explicit sizes, from the span between
//! defined leading/trailing offsets, from aspect-ratio inference, or from a
//! content measurement; their position honors the offsets and falls back to
//! the container's justify/align rules.

use crate::config::ConfigRef;
use crate::layout::layout_node_internal;
use crate::layout::utils::{align_item, bound_axis};
use crate::style::types::{Align, Dimension, FlexDirection, Justify, MeasureMode, Wrap};
use crate::style::values::is_undefined;
use crate::tree::node::Node;

pub(crate) fn absolute_layout_child(
  node: &Node,
  child: &Node,
  width: f32,
  width_mode: MeasureMode,
  height: f32,
  direction: crate::style::types::Direction,
  config: &ConfigRef,
) {
  let main_axis = node.style().flex_direction.resolve(direction);
  let cross_axis = main_axis.cross(direction);
  let is_main_axis_row = main_axis.is_row();

  let mut child_width = f32::NAN;
  let mut child_height = f32::NAN;
  let mut child_width_measure_mode = MeasureMode::Undefined;
  let mut child_height_measure_mode = MeasureMode::Undefined;

  let margin_row = child.margin_for_axis(FlexDirection::Row, width);
  let margin_column = child.margin_for_axis(FlexDirection::Column, width);

  if child.is_style_dim_defined(FlexDirection::Row, width) {
    child_width = child
      .resolved_dimension(Dimension::Width)
      .resolve(width)
      + margin_row;
  } else {
    // No explicit width; span the left/right offsets when both are set.
    if child.is_leading_position_defined(FlexDirection::Row)
      && child.is_trailing_position_defined(FlexDirection::Row)
    {
      child_width = node.measured_dimension(Dimension::Width)
        - (node.leading_border(FlexDirection::Row) + node.trailing_border(FlexDirection::Row))
        - (child.leading_position(FlexDirection::Row, width)
          + child.trailing_position(FlexDirection::Row, width));
      child_width = bound_axis(child, FlexDirection::Row, child_width, width, width);
    }
  }

  if child.is_style_dim_defined(FlexDirection::Column, height) {
    child_height = child
      .resolved_dimension(Dimension::Height)
      .resolve(height)
      + margin_column;
  } else {
    // No explicit height; span the top/bottom offsets when both are set.
    if child.is_leading_position_defined(FlexDirection::Column)
      && child.is_trailing_position_defined(FlexDirection::Column)
    {
      child_height = node.measured_dimension(Dimension::Height)
        - (node.leading_border(FlexDirection::Column)
          + node.trailing_border(FlexDirection::Column))
        - (child.leading_position(FlexDirection::Column, height)
          + child.trailing_position(FlexDirection::Column, height));
      child_height = bound_axis(child, FlexDirection::Column, child_height, height, width);
    }
  }

  // Aspect ratio needs exactly one defined dimension to anchor on.
  if is_undefined(child_width) ^ is_undefined(child_height) {
    let aspect_ratio = child.style().aspect_ratio;
    if !is_undefined(aspect_ratio) {
      if is_undefined(child_width) {
        child_width = margin_row + (child_height - margin_column) * aspect_ratio;
      } else if is_undefined(child_height) {
        child_height = margin_column + (child_width - margin_row) / aspect_ratio;
      }
    }
  }

  // Still missing a dimension: measure the content.
  if is_undefined(child_width) || is_undefined(child_height) {
    child_width_measure_mode = if is_undefined(child_width) {
      MeasureMode::Undefined
    } else {
      MeasureMode::Exactly
    };
    child_height_measure_mode = if is_undefined(child_height) {
      MeasureMode::Undefined
    } else {
      MeasureMode::Exactly
    };

    // If the parent width is known, constrain the child to it so text can
    // wrap the way browsers wrap absolute children.
    if !is_main_axis_row
      && is_undefined(child_width)
      && width_mode != MeasureMode::Undefined
      && width > 0.0
    {
      child_width = width;
      child_width_measure_mode = MeasureMode::AtMost;
    }

    layout_node_internal(
      child,
      child_width,
      child_height,
      direction,
      child_width_measure_mode,
      child_height_measure_mode,
      child_width,
      child_height,
      false,
      "abs-measure",
      config,
    );
    child_width = child.measured_dimension(Dimension::Width)
      + child.margin_for_axis(FlexDirection::Row, width);
    child_height = child.measured_dimension(Dimension::Height)
      + child.margin_for_axis(FlexDirection::Column, width);
  }

  layout_node_internal(
    child,
    child_width,
    child_height,
    direction,
    MeasureMode::Exactly,
    MeasureMode::Exactly,
    child_width,
    child_height,
    true,
    "abs-layout",
    config,
  );

  if child.is_trailing_position_defined(main_axis) && !child.is_leading_position_defined(main_axis)
  {
    let position = node.measured_dimension(main_axis.dimension())
      - child.measured_dimension(main_axis.dimension())
      - node.trailing_border(main_axis)
      - child.trailing_margin(main_axis, width)
      - child.trailing_position(main_axis, if is_main_axis_row { width } else { height });
    child.layout_mut().position[main_axis.leading_edge() as usize] = position;
  } else if !child.is_leading_position_defined(main_axis)
    && node.style().justify_content == Justify::Center
  {
    let position = (node.measured_dimension(main_axis.dimension())
      - child.measured_dimension(main_axis.dimension()))
      / 2.0;
    child.layout_mut().position[main_axis.leading_edge() as usize] = position;
  } else if !child.is_leading_position_defined(main_axis)
    && node.style().justify_content == Justify::FlexEnd
  {
    let position = node.measured_dimension(main_axis.dimension())
      - child.measured_dimension(main_axis.dimension());
    child.layout_mut().position[main_axis.leading_edge() as usize] = position;
  }

  if child.is_trailing_position_defined(cross_axis)
    && !child.is_leading_position_defined(cross_axis)
  {
    let position = node.measured_dimension(cross_axis.dimension())
      - child.measured_dimension(cross_axis.dimension())
      - node.trailing_border(cross_axis)
      - child.trailing_margin(cross_axis, width)
      - child.trailing_position(cross_axis, if is_main_axis_row { height } else { width });
    child.layout_mut().position[cross_axis.leading_edge() as usize] = position;
  } else if !child.is_leading_position_defined(cross_axis)
    && align_item(node, child) == Align::Center
  {
    let position = (node.measured_dimension(cross_axis.dimension())
      - child.measured_dimension(cross_axis.dimension()))
      / 2.0;
    child.layout_mut().position[cross_axis.leading_edge() as usize] = position;
  } else if !child.is_leading_position_defined(cross_axis)
    && ((align_item(node, child) == Align::FlexEnd)
      ^ (node.style().flex_wrap == Wrap::WrapReverse))
  {
    let position = node.measured_dimension(cross_axis.dimension())
      - child.measured_dimension(cross_axis.dimension());
    child.layout_mut().position[cross_axis.leading_edge() as usize] = position;
  }
}
