//! Pixel-grid rounding
//!
//! After layout, absolute coordinates and dimensions are snapped to the
//! nearest multiple of `1 / point_scale_factor` so boxes land on device
//! pixels. Dimensions are rounded as the difference of rounded absolute
//! edges, which keeps adjacent boxes gap-free. Text nodes never have their
//! size rounded down, as that could truncate glyphs.

use crate::style::types::{Dimension, Edge, NodeType};
use crate::style::values::floats_equal_with_precision;
use crate::tree::node::Node;

/// Rounds `value` to the pixel grid defined by `point_scale_factor`
///
/// Values already on the grid (within an error proportional to the scale)
/// snap in place; otherwise `force_ceil`/`force_floor` take precedence and
/// the default rounds half-up. A zero scale factor disables rounding.
pub(crate) fn round_value_to_pixel_grid(
  value: f32,
  point_scale_factor: f32,
  force_ceil: bool,
  force_floor: bool,
) -> f32 {
  if point_scale_factor == 0.0 {
    return value;
  }

  let rounding_error = (0.01 * point_scale_factor).max(0.0001);
  let mut scaled_value = value * point_scale_factor;
  let fractial = scaled_value % 1.0;
  if floats_equal_with_precision(fractial, 0.0, rounding_error) {
    // Already rounded.
    scaled_value -= fractial;
  } else if floats_equal_with_precision(fractial, 1.0, rounding_error) {
    scaled_value = scaled_value - fractial + 1.0;
  } else if force_ceil {
    scaled_value = scaled_value - fractial + 1.0;
  } else if force_floor {
    scaled_value -= fractial;
  } else {
    scaled_value = scaled_value - fractial
      + if fractial > 0.5 || floats_equal_with_precision(fractial, 0.5, rounding_error) {
        1.0
      } else {
        0.0
      };
  }
  scaled_value / point_scale_factor
}

/// Walks the tree rounding every node's position and dimensions against
/// its absolute coordinates
pub(crate) fn round_to_pixel_grid(
  node: &Node,
  point_scale_factor: f32,
  absolute_left: f32,
  absolute_top: f32,
) {
  if point_scale_factor == 0.0 {
    return;
  }

  let (node_left, node_top, node_width, node_height) = {
    let layout = node.layout();
    (
      layout.position[Edge::Left as usize],
      layout.position[Edge::Top as usize],
      layout.dimensions[Dimension::Width as usize],
      layout.dimensions[Dimension::Height as usize],
    )
  };

  let absolute_node_left = absolute_left + node_left;
  let absolute_node_top = absolute_top + node_top;
  let absolute_node_right = absolute_node_left + node_width;
  let absolute_node_bottom = absolute_node_top + node_height;

  let text_rounding = node.node_type() == NodeType::Text;

  // Checking both the floor and ceil remainder tells us whether the scaled
  // dimension has a real fractional component.
  let has_fractional_width = !floats_equal_with_precision(
    (node_width * point_scale_factor) % 1.0,
    0.0,
    0.0001,
  ) && !floats_equal_with_precision((node_width * point_scale_factor) % 1.0, 1.0, 0.0001);
  let has_fractional_height = !floats_equal_with_precision(
    (node_height * point_scale_factor) % 1.0,
    0.0,
    0.0001,
  ) && !floats_equal_with_precision((node_height * point_scale_factor) % 1.0, 1.0, 0.0001);

  {
    let mut layout = node.layout_mut();
    layout.position[Edge::Left as usize] =
      round_value_to_pixel_grid(node_left, point_scale_factor, false, text_rounding);
    layout.position[Edge::Top as usize] =
      round_value_to_pixel_grid(node_top, point_scale_factor, false, text_rounding);

    layout.dimensions[Dimension::Width as usize] = round_value_to_pixel_grid(
      absolute_node_right,
      point_scale_factor,
      text_rounding && has_fractional_width,
      text_rounding && !has_fractional_width,
    ) - round_value_to_pixel_grid(absolute_node_left, point_scale_factor, false, text_rounding);

    layout.dimensions[Dimension::Height as usize] = round_value_to_pixel_grid(
      absolute_node_bottom,
      point_scale_factor,
      text_rounding && has_fractional_height,
      text_rounding && !has_fractional_height,
    ) - round_value_to_pixel_grid(absolute_node_top, point_scale_factor, false, text_rounding);
  }

  for child in node.children() {
    round_to_pixel_grid(&child, point_scale_factor, absolute_node_left, absolute_node_top);
  }
}
