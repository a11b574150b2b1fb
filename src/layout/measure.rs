//! Leaf sizing fast paths
//!
//! Three node shapes can be sized without running the flex algorithm: a
//! leaf with a measure callback, a childless container, and (when only a
//! measurement was requested) a node whose size is already forced by its
//! constraints.

use crate::layout::utils::bound_axis;
use crate::style::types::{Dimension, FlexDirection, MeasureMode};
use crate::style::values::is_undefined;
use crate::tree::node::Node;

/// Sizes a node through its measure callback
///
/// The callback sees content-box inner sizes (available minus margin minus
/// padding and border, floored at zero) and its answer is padded back out
/// on any axis that was not `exactly`. When both axes are `exactly` the
/// callback is skipped entirely.
pub(crate) fn set_measured_dimensions_for_measure_func(
  node: &Node,
  available_width: f32,
  available_height: f32,
  width_measure_mode: MeasureMode,
  height_measure_mode: MeasureMode,
  parent_width: f32,
  parent_height: f32,
) {
  let measure = node
    .measure_func()
    .unwrap_or_else(|| node.fatal_msg("Expected node to have custom measure function"));

  let padding_and_border_axis_row =
    node.padding_and_border_for_axis(FlexDirection::Row, available_width);
  let padding_and_border_axis_column =
    node.padding_and_border_for_axis(FlexDirection::Column, available_width);
  let margin_axis_row = node.margin_for_axis(FlexDirection::Row, available_width);
  let margin_axis_column = node.margin_for_axis(FlexDirection::Column, available_width);

  // Never call measure with a negative size.
  let inner_width = if is_undefined(available_width) {
    available_width
  } else {
    (available_width - margin_axis_row - padding_and_border_axis_row).max(0.0)
  };
  let inner_height = if is_undefined(available_height) {
    available_height
  } else {
    (available_height - margin_axis_column - padding_and_border_axis_column).max(0.0)
  };

  if width_measure_mode == MeasureMode::Exactly && height_measure_mode == MeasureMode::Exactly {
    // Both dimensions already decided; no need to invoke the callback.
    node.set_measured_dimension(
      Dimension::Width,
      bound_axis(
        node,
        FlexDirection::Row,
        available_width - margin_axis_row,
        parent_width,
        parent_width,
      ),
    );
    node.set_measured_dimension(
      Dimension::Height,
      bound_axis(
        node,
        FlexDirection::Column,
        available_height - margin_axis_column,
        parent_height,
        parent_width,
      ),
    );
    return;
  }

  let measured = measure(
    node,
    inner_width,
    width_measure_mode,
    inner_height,
    height_measure_mode,
  );
  if is_undefined(measured.width) || is_undefined(measured.height) {
    node.fatal_msg("Expect custom measure function to not return NaN");
  }

  node.set_measured_dimension(
    Dimension::Width,
    bound_axis(
      node,
      FlexDirection::Row,
      if width_measure_mode == MeasureMode::Undefined
        || width_measure_mode == MeasureMode::AtMost
      {
        measured.width + padding_and_border_axis_row
      } else {
        available_width - margin_axis_row
      },
      parent_width,
      parent_width,
    ),
  );
  node.set_measured_dimension(
    Dimension::Height,
    bound_axis(
      node,
      FlexDirection::Column,
      if height_measure_mode == MeasureMode::Undefined
        || height_measure_mode == MeasureMode::AtMost
      {
        measured.height + padding_and_border_axis_column
      } else {
        available_height - margin_axis_column
      },
      parent_height,
      parent_width,
    ),
  );
}

/// Sizes a childless container: the available size on `exactly` axes,
/// otherwise just its padding and border
pub(crate) fn set_measured_dimensions_for_empty_container(
  node: &Node,
  available_width: f32,
  available_height: f32,
  width_measure_mode: MeasureMode,
  height_measure_mode: MeasureMode,
  parent_width: f32,
  parent_height: f32,
) {
  let padding_and_border_axis_row =
    node.padding_and_border_for_axis(FlexDirection::Row, parent_width);
  let padding_and_border_axis_column =
    node.padding_and_border_for_axis(FlexDirection::Column, parent_width);
  let margin_axis_row = node.margin_for_axis(FlexDirection::Row, parent_width);
  let margin_axis_column = node.margin_for_axis(FlexDirection::Column, parent_width);

  node.set_measured_dimension(
    Dimension::Width,
    bound_axis(
      node,
      FlexDirection::Row,
      if width_measure_mode == MeasureMode::Undefined
        || width_measure_mode == MeasureMode::AtMost
      {
        padding_and_border_axis_row
      } else {
        available_width - margin_axis_row
      },
      parent_width,
      parent_width,
    ),
  );
  node.set_measured_dimension(
    Dimension::Height,
    bound_axis(
      node,
      FlexDirection::Column,
      if height_measure_mode == MeasureMode::Undefined
        || height_measure_mode == MeasureMode::AtMost
      {
        padding_and_border_axis_column
      } else {
        available_height - margin_axis_column
      },
      parent_height,
      parent_width,
    ),
  );
}

/// When only a measurement is needed, a node whose constraints force its
/// size can skip the algorithm. Returns whether it did.
pub(crate) fn try_set_measured_dimensions_for_fixed_size(
  node: &Node,
  available_width: f32,
  available_height: f32,
  width_measure_mode: MeasureMode,
  height_measure_mode: MeasureMode,
  parent_width: f32,
  parent_height: f32,
) -> bool {
  let forced = (width_measure_mode == MeasureMode::AtMost && available_width <= 0.0)
    || (height_measure_mode == MeasureMode::AtMost && available_height <= 0.0)
    || (width_measure_mode == MeasureMode::Exactly && height_measure_mode == MeasureMode::Exactly);
  if !forced {
    return false;
  }

  let margin_axis_row = node.margin_for_axis(FlexDirection::Row, parent_width);
  let margin_axis_column = node.margin_for_axis(FlexDirection::Column, parent_width);

  node.set_measured_dimension(
    Dimension::Width,
    bound_axis(
      node,
      FlexDirection::Row,
      if is_undefined(available_width)
        || (width_measure_mode == MeasureMode::AtMost && available_width < 0.0)
      {
        0.0
      } else {
        available_width - margin_axis_row
      },
      parent_width,
      parent_width,
    ),
  );
  node.set_measured_dimension(
    Dimension::Height,
    bound_axis(
      node,
      FlexDirection::Column,
      if is_undefined(available_height)
        || (height_measure_mode == MeasureMode::AtMost && available_height < 0.0)
      {
        0.0
      } else {
        available_height - margin_axis_column
      },
      parent_height,
      parent_width,
    ),
  );
  true
}
