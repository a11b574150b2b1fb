//! The flexbox layout algorithm
//!
//! [`layout_impl`] is the per-node routine: it resolves edges and axes,
//! computes every child's flex basis, collects children into lines,
//! resolves flexible lengths with a two-pass free-space distribution,
//! justifies the main axis, aligns the cross axis, distributes multi-line
//! free space, computes final dimensions, and hands absolute children to
//! the absolute pass. All recursion goes through
//! [`crate::layout::layout_node_internal`], which owns the caching.
//!
//! Known deviations from the W3C flexbox algorithm: min/max main-axis
//! bounds are enforced by freezing violators in a first pass rather than
//! the iterative resolve-flexible-lengths loop, and flex items have no
//! automatic minimum content size (it is treated as zero).

use crate::config::ConfigRef;
use crate::layout::absolute::absolute_layout_child;
use crate::layout::measure::{
  set_measured_dimensions_for_empty_container, set_measured_dimensions_for_measure_func,
  try_set_measured_dimensions_for_fixed_size,
};
use crate::layout::utils::{
  align_item, baseline, bound_axis, bound_axis_within_min_max, constrain_max_size_for_mode,
  is_baseline_layout, set_child_trailing_position,
};
use crate::layout::{current_generation, layout_node_internal};
use crate::style::types::{
  Align, Dimension, Direction, Display, Edge, FlexDirection, Justify, MeasureMode, Overflow,
  PositionType, Unit, Wrap,
};
use crate::style::values::{floats_equal, is_undefined, UNDEFINED};
use crate::tree::node::Node;

/// One collected flex line and the running values the passes share
pub(crate) struct FlexLine {
  /// In-flow children on this line, in document order
  pub items: Vec<Node>,
  /// Sum of bounded flex bases plus main-axis margins
  pub size_consumed: f32,
  pub items_on_line: usize,
  pub total_flex_grow_factors: f32,
  /// Shrink factors scale with the item's flex basis
  pub total_flex_shrink_scaled_factors: f32,
  /// Index of the first child after this line
  pub end_of_line_index: usize,
  pub remaining_free_space: f32,
  pub main_dim: f32,
  pub cross_dim: f32,
}

/// Computes `computed_flex_basis` for one child: explicit flex basis first,
/// then an explicit main-axis dimension, else a content measurement with
/// aspect-ratio and stretch constraints applied
#[allow(clippy::too_many_arguments)]
pub(crate) fn compute_flex_basis_for_child(
  node: &Node,
  child: &Node,
  width: f32,
  width_mode: MeasureMode,
  height: f32,
  parent_width: f32,
  parent_height: f32,
  height_mode: MeasureMode,
  direction: Direction,
  config: &ConfigRef,
) {
  let main_axis = node.style().flex_direction.resolve(direction);
  let is_main_axis_row = main_axis.is_row();
  let main_axis_size = if is_main_axis_row { width } else { height };
  let main_axis_parent_size = if is_main_axis_row {
    parent_width
  } else {
    parent_height
  };

  let resolved_flex_basis = child.resolve_flex_basis().resolve(main_axis_parent_size);
  let is_row_style_dim_defined = child.is_style_dim_defined(FlexDirection::Row, parent_width);
  let is_column_style_dim_defined =
    child.is_style_dim_defined(FlexDirection::Column, parent_height);

  if !is_undefined(resolved_flex_basis) && !is_undefined(main_axis_size) {
    let needs_compute = {
      let layout = child.layout();
      is_undefined(layout.computed_flex_basis)
        || (child
          .config()
          .is_experimental_feature_enabled(crate::config::ExperimentalFeature::WebFlexBasis)
          && layout.computed_flex_basis_generation != current_generation())
    };
    if needs_compute {
      let floor = child.padding_and_border_for_axis(main_axis, parent_width);
      child.layout_mut().computed_flex_basis = resolved_flex_basis.max(floor);
    }
  } else if is_main_axis_row && is_row_style_dim_defined {
    // The width is definite, so use that as the flex basis.
    let floor = child.padding_and_border_for_axis(FlexDirection::Row, parent_width);
    let resolved = child
      .resolved_dimension(Dimension::Width)
      .resolve(parent_width);
    child.layout_mut().computed_flex_basis = resolved.max(floor);
  } else if !is_main_axis_row && is_column_style_dim_defined {
    // The height is definite, so use that as the flex basis.
    let floor = child.padding_and_border_for_axis(FlexDirection::Column, parent_width);
    let resolved = child
      .resolved_dimension(Dimension::Height)
      .resolve(parent_height);
    child.layout_mut().computed_flex_basis = resolved.max(floor);
  } else {
    // Measure the child to find its hypothetical main size.
    let mut child_width = UNDEFINED;
    let mut child_height = UNDEFINED;
    let mut child_width_measure_mode = MeasureMode::Undefined;
    let mut child_height_measure_mode = MeasureMode::Undefined;

    let margin_row = child.margin_for_axis(FlexDirection::Row, parent_width);
    let margin_column = child.margin_for_axis(FlexDirection::Column, parent_width);

    if is_row_style_dim_defined {
      child_width = child
        .resolved_dimension(Dimension::Width)
        .resolve(parent_width)
        + margin_row;
      child_width_measure_mode = MeasureMode::Exactly;
    }
    if is_column_style_dim_defined {
      child_height = child
        .resolved_dimension(Dimension::Height)
        .resolve(parent_height)
        + margin_column;
      child_height_measure_mode = MeasureMode::Exactly;
    }

    // Browsers size scroll containers to content along the scroll axis only;
    // in every other case the child is capped at the available size.
    let overflow = node.style().overflow;
    if (!is_main_axis_row && overflow == Overflow::Scroll) || overflow != Overflow::Scroll {
      if is_undefined(child_width) && !is_undefined(width) {
        child_width = width;
        child_width_measure_mode = MeasureMode::AtMost;
      }
    }
    if (is_main_axis_row && overflow == Overflow::Scroll) || overflow != Overflow::Scroll {
      if is_undefined(child_height) && !is_undefined(height) {
        child_height = height;
        child_height_measure_mode = MeasureMode::AtMost;
      }
    }

    let aspect_ratio = child.style().aspect_ratio;
    if !is_undefined(aspect_ratio) {
      if !is_main_axis_row && child_width_measure_mode == MeasureMode::Exactly {
        child_height = margin_column + (child_width - margin_row) / aspect_ratio;
        child_height_measure_mode = MeasureMode::Exactly;
      } else if is_main_axis_row && child_height_measure_mode == MeasureMode::Exactly {
        child_width = margin_row + (child_height - margin_column) * aspect_ratio;
        child_width_measure_mode = MeasureMode::Exactly;
      }
    }

    // A stretch-aligned child without a definite cross size is measured
    // against the exact available cross size.
    let has_exact_width = !is_undefined(width) && width_mode == MeasureMode::Exactly;
    let child_width_stretch = align_item(node, child) == Align::Stretch
      && child_width_measure_mode != MeasureMode::Exactly;
    if !is_main_axis_row && !is_row_style_dim_defined && has_exact_width && child_width_stretch {
      child_width = width;
      child_width_measure_mode = MeasureMode::Exactly;
      if !is_undefined(aspect_ratio) {
        child_height = (child_width - margin_row) / aspect_ratio;
        child_height_measure_mode = MeasureMode::Exactly;
      }
    }

    let has_exact_height = !is_undefined(height) && height_mode == MeasureMode::Exactly;
    let child_height_stretch = align_item(node, child) == Align::Stretch
      && child_height_measure_mode != MeasureMode::Exactly;
    if is_main_axis_row && !is_column_style_dim_defined && has_exact_height && child_height_stretch
    {
      child_height = height;
      child_height_measure_mode = MeasureMode::Exactly;
      if !is_undefined(aspect_ratio) {
        child_width = (child_height - margin_column) * aspect_ratio;
        child_width_measure_mode = MeasureMode::Exactly;
      }
    }

    constrain_max_size_for_mode(
      child,
      FlexDirection::Row,
      parent_width,
      parent_width,
      &mut child_width_measure_mode,
      &mut child_width,
    );
    constrain_max_size_for_mode(
      child,
      FlexDirection::Column,
      parent_height,
      parent_width,
      &mut child_height_measure_mode,
      &mut child_height,
    );

    layout_node_internal(
      child,
      child_width,
      child_height,
      direction,
      child_width_measure_mode,
      child_height_measure_mode,
      parent_width,
      parent_height,
      false,
      "measure",
      config,
    );

    let measured = child.measured_dimension(main_axis.dimension());
    let floor = child.padding_and_border_for_axis(main_axis, parent_width);
    child.layout_mut().computed_flex_basis = measured.max(floor);
  }
  child.layout_mut().computed_flex_basis_generation = current_generation();
}

/// Zeroes the layout of a `display: none` subtree
pub(crate) fn zero_out_layout_recursively(node: &Node) {
  node.layout_mut().zero_out();
  node.set_has_new_layout(true);
  node.clone_children_if_needed();
  for child in node.children() {
    zero_out_layout_recursively(&child);
  }
}

/// Available space inside the node along one physical axis: available size
/// minus margin, padding, and border, clamped to the node's inner min/max
fn calculate_available_inner_dim(
  node: &Node,
  axis: FlexDirection,
  available_dim: f32,
  parent_dim: f32,
) -> f32 {
  let direction = if axis.is_row() {
    FlexDirection::Row
  } else {
    FlexDirection::Column
  };
  let dimension = direction.dimension();

  let margin = node.margin_for_axis(direction, parent_dim);
  let padding_and_border = node.padding_and_border_for_axis(direction, parent_dim);

  let mut available_inner_dim = available_dim - margin - padding_and_border;
  if !is_undefined(available_inner_dim) {
    let style = node.style();
    let min_inner_dim = style.min_dimensions.get(dimension).resolve(parent_dim)
      - padding_and_border;
    let max_inner_dim = style.max_dimensions.get(dimension).resolve(parent_dim)
      - padding_and_border;
    available_inner_dim = available_inner_dim.min(max_inner_dim).max(min_inner_dim);
  }
  available_inner_dim
}

/// Computes the flex basis of every in-flow child and returns the total
/// outer flex basis (bases plus main-axis margins)
///
/// Under an exact main size, a sole grow+shrink child can skip measurement:
/// it will be flexed to the remaining space regardless of its basis.
#[allow(clippy::too_many_arguments)]
fn compute_flex_basis_for_children(
  node: &Node,
  available_inner_width: f32,
  available_inner_height: f32,
  width_measure_mode: MeasureMode,
  height_measure_mode: MeasureMode,
  direction: Direction,
  main_axis: FlexDirection,
  config: &ConfigRef,
  perform_layout: bool,
) -> f32 {
  let mut total_outer_flex_basis = 0.0;
  let children = node.children();

  let mut single_flex_child: Option<Node> = None;
  let measure_mode_main_dim = if main_axis.is_row() {
    width_measure_mode
  } else {
    height_measure_mode
  };
  if measure_mode_main_dim == MeasureMode::Exactly {
    for child in &children {
      if single_flex_child.is_some() {
        if child.is_node_flexible() {
          single_flex_child = None;
          break;
        }
      } else if child.resolve_flex_grow() > 0.0 && child.resolve_flex_shrink() > 0.0 {
        single_flex_child = Some(child.clone());
      }
    }
  }

  for child in &children {
    child.resolve_dimension();
    if child.style().display == Display::None {
      zero_out_layout_recursively(child);
      child.set_has_new_layout(true);
      child.set_dirty(false);
      continue;
    }
    if perform_layout {
      // Seed each child's position relative to the parent.
      let child_direction = child.resolve_direction(direction);
      let main_dim = if main_axis.is_row() {
        available_inner_width
      } else {
        available_inner_height
      };
      let cross_dim = if main_axis.is_row() {
        available_inner_height
      } else {
        available_inner_width
      };
      child.set_position(child_direction, main_dim, cross_dim, available_inner_width);
    }

    if child.style().position_type == PositionType::Absolute {
      continue;
    }
    if single_flex_child.as_ref() == Some(child) {
      child.layout_mut().computed_flex_basis_generation = current_generation();
      child.layout_mut().computed_flex_basis = 0.0;
    } else {
      compute_flex_basis_for_child(
        node,
        child,
        available_inner_width,
        width_measure_mode,
        available_inner_height,
        available_inner_width,
        available_inner_height,
        height_measure_mode,
        direction,
        config,
      );
    }

    total_outer_flex_basis += child.layout().computed_flex_basis
      + child.margin_for_axis(main_axis, available_inner_width);
  }

  total_outer_flex_basis
}

/// Collects children into one flex line starting at `start_of_line_index`
///
/// Assumes every child's `computed_flex_basis` is fresh. Skips hidden and
/// absolute children; breaks before a child that would overflow the
/// available main size when wrapping is on. Total flex factors are floored
/// to 1 when positive but fractional.
#[allow(clippy::too_many_arguments)]
pub(crate) fn collect_flex_line(
  node: &Node,
  parent_direction: Direction,
  main_axis_parent_size: f32,
  available_inner_width: f32,
  available_inner_main_dim: f32,
  start_of_line_index: usize,
  line_count: usize,
) -> FlexLine {
  let children = node.children();
  let mut line = FlexLine {
    items: Vec::with_capacity(children.len()),
    size_consumed: 0.0,
    items_on_line: 0,
    total_flex_grow_factors: 0.0,
    total_flex_shrink_scaled_factors: 0.0,
    end_of_line_index: start_of_line_index,
    remaining_free_space: 0.0,
    main_dim: 0.0,
    cross_dim: 0.0,
  };

  let main_axis = node
    .style()
    .flex_direction
    .resolve(node.resolve_direction(parent_direction));
  let is_node_flex_wrap = node.style().flex_wrap != Wrap::NoWrap;

  let mut end_of_line_index = start_of_line_index;
  while end_of_line_index < children.len() {
    let child = &children[end_of_line_index];
    if child.style().display == Display::None
      || child.style().position_type == PositionType::Absolute
    {
      end_of_line_index += 1;
      continue;
    }
    child.set_line_index(line_count);

    let child_margin_main_axis = child.margin_for_axis(main_axis, available_inner_width);
    let flex_basis_with_min_and_max_constraints = bound_axis_within_min_max(
      child,
      main_axis,
      child.layout().computed_flex_basis,
      main_axis_parent_size,
    );

    // Line is full: lay out what we have and start the next line there.
    if line.size_consumed + flex_basis_with_min_and_max_constraints + child_margin_main_axis
      > available_inner_main_dim
      && is_node_flex_wrap
      && line.items_on_line > 0
    {
      break;
    }

    line.size_consumed += flex_basis_with_min_and_max_constraints + child_margin_main_axis;
    line.items_on_line += 1;

    if child.is_node_flexible() {
      line.total_flex_grow_factors += child.resolve_flex_grow();
      // Unlike the grow factor, the shrink factor scales with the child's
      // base size.
      line.total_flex_shrink_scaled_factors +=
        -child.resolve_flex_shrink() * child.layout().computed_flex_basis;
    }

    line.items.push(child.clone());
    end_of_line_index += 1;
  }

  if line.total_flex_grow_factors > 0.0 && line.total_flex_grow_factors < 1.0 {
    line.total_flex_grow_factors = 1.0;
  }
  if line.total_flex_shrink_scaled_factors > 0.0 && line.total_flex_shrink_scaled_factors < 1.0 {
    line.total_flex_shrink_scaled_factors = 1.0;
  }

  line.end_of_line_index = end_of_line_index;
  line
}

/// First distribution pass: find items whose min/max bounds trigger,
/// freeze them at the bound, and take their size and factor out of the
/// running totals so the second pass distributes only what is really left
fn distribute_free_space_first_pass(
  line: &mut FlexLine,
  main_axis: FlexDirection,
  main_axis_parent_size: f32,
  available_inner_main_dim: f32,
  available_inner_width: f32,
) {
  let mut delta_free_space = 0.0;

  for child in &line.items {
    let child_flex_basis = bound_axis_within_min_max(
      child,
      main_axis,
      child.layout().computed_flex_basis,
      main_axis_parent_size,
    );

    if line.remaining_free_space < 0.0 {
      let flex_shrink_scaled_factor = -child.resolve_flex_shrink() * child_flex_basis;
      if flex_shrink_scaled_factor != 0.0 {
        let base_main_size = child_flex_basis
          + line.remaining_free_space / line.total_flex_shrink_scaled_factors
            * flex_shrink_scaled_factor;
        let bound_main_size = bound_axis(
          child,
          main_axis,
          base_main_size,
          available_inner_main_dim,
          available_inner_width,
        );
        if base_main_size != bound_main_size {
          // Frozen: the same clamp will trigger again in the second pass,
          // so the item sizes identically in both.
          delta_free_space += bound_main_size - child_flex_basis;
          line.total_flex_shrink_scaled_factors -= flex_shrink_scaled_factor;
        }
      }
    } else if line.remaining_free_space > 0.0 {
      let flex_grow_factor = child.resolve_flex_grow();
      if flex_grow_factor != 0.0 {
        let base_main_size = child_flex_basis
          + line.remaining_free_space / line.total_flex_grow_factors * flex_grow_factor;
        let bound_main_size = bound_axis(
          child,
          main_axis,
          base_main_size,
          available_inner_main_dim,
          available_inner_width,
        );
        if base_main_size != bound_main_size {
          delta_free_space += bound_main_size - child_flex_basis;
          line.total_flex_grow_factors -= flex_grow_factor;
        }
      }
    }
  }

  line.remaining_free_space -= delta_free_space;
}

/// Second distribution pass: size every flex item from the adjusted free
/// space and recursively lay it out, choosing its cross-axis constraint
/// from aspect ratio, stretch, or its own style. Returns the total
/// distributed space.
#[allow(clippy::too_many_arguments)]
fn distribute_free_space_second_pass(
  line: &mut FlexLine,
  node: &Node,
  main_axis: FlexDirection,
  cross_axis: FlexDirection,
  main_axis_parent_size: f32,
  available_inner_main_dim: f32,
  available_inner_cross_dim: f32,
  available_inner_width: f32,
  available_inner_height: f32,
  flex_basis_overflows: bool,
  measure_mode_cross_dim: MeasureMode,
  perform_layout: bool,
  config: &ConfigRef,
) -> f32 {
  let mut delta_free_space = 0.0;
  let is_main_axis_row = main_axis.is_row();
  let is_node_flex_wrap = node.style().flex_wrap != Wrap::NoWrap;

  for child in &line.items {
    let child_flex_basis = bound_axis_within_min_max(
      child,
      main_axis,
      child.layout().computed_flex_basis,
      main_axis_parent_size,
    );
    let mut updated_main_size = child_flex_basis;

    if line.remaining_free_space < 0.0 {
      let flex_shrink_scaled_factor = -child.resolve_flex_shrink() * child_flex_basis;
      if flex_shrink_scaled_factor != 0.0 {
        let child_size = if line.total_flex_shrink_scaled_factors == 0.0 {
          child_flex_basis + flex_shrink_scaled_factor
        } else {
          child_flex_basis
            + (line.remaining_free_space / line.total_flex_shrink_scaled_factors)
              * flex_shrink_scaled_factor
        };
        updated_main_size = bound_axis(
          child,
          main_axis,
          child_size,
          available_inner_main_dim,
          available_inner_width,
        );
      }
    } else if line.remaining_free_space > 0.0 {
      let flex_grow_factor = child.resolve_flex_grow();
      if flex_grow_factor != 0.0 {
        updated_main_size = bound_axis(
          child,
          main_axis,
          child_flex_basis
            + line.remaining_free_space / line.total_flex_grow_factors * flex_grow_factor,
          available_inner_main_dim,
          available_inner_width,
        );
      }
    }

    delta_free_space += updated_main_size - child_flex_basis;

    let margin_main = child.margin_for_axis(main_axis, available_inner_width);
    let margin_cross = child.margin_for_axis(cross_axis, available_inner_width);

    let mut child_main_size = updated_main_size + margin_main;
    let mut child_main_measure_mode = MeasureMode::Exactly;
    let mut child_cross_size;
    let mut child_cross_measure_mode;

    let aspect_ratio = child.style().aspect_ratio;
    if !is_undefined(aspect_ratio) {
      child_cross_size = if is_main_axis_row {
        (child_main_size - margin_main) / aspect_ratio
      } else {
        (child_main_size - margin_main) * aspect_ratio
      } + margin_cross;
      child_cross_measure_mode = MeasureMode::Exactly;
    } else if !is_undefined(available_inner_cross_dim)
      && !child.is_style_dim_defined(cross_axis, available_inner_cross_dim)
      && measure_mode_cross_dim == MeasureMode::Exactly
      && !(is_node_flex_wrap && flex_basis_overflows)
      && align_item(node, child) == Align::Stretch
      && child.margin_leading_value(cross_axis).unit != Unit::Auto
      && child.margin_trailing_value(cross_axis).unit != Unit::Auto
    {
      child_cross_size = available_inner_cross_dim;
      child_cross_measure_mode = MeasureMode::Exactly;
    } else if !child.is_style_dim_defined(cross_axis, available_inner_cross_dim) {
      child_cross_size = available_inner_cross_dim;
      child_cross_measure_mode = if is_undefined(child_cross_size) {
        MeasureMode::Undefined
      } else {
        MeasureMode::AtMost
      };
    } else {
      let resolved = child.resolved_dimension(cross_axis.dimension());
      child_cross_size = resolved.resolve(available_inner_cross_dim) + margin_cross;
      let is_loose_percentage_measurement =
        resolved.unit == Unit::Percent && measure_mode_cross_dim != MeasureMode::Exactly;
      child_cross_measure_mode =
        if is_undefined(child_cross_size) || is_loose_percentage_measurement {
          MeasureMode::Undefined
        } else {
          MeasureMode::Exactly
        };
    }

    constrain_max_size_for_mode(
      child,
      main_axis,
      available_inner_main_dim,
      available_inner_width,
      &mut child_main_measure_mode,
      &mut child_main_size,
    );
    constrain_max_size_for_mode(
      child,
      cross_axis,
      available_inner_cross_dim,
      available_inner_width,
      &mut child_cross_measure_mode,
      &mut child_cross_size,
    );

    let requires_stretch_layout = !child.is_style_dim_defined(cross_axis, available_inner_cross_dim)
      && align_item(node, child) == Align::Stretch
      && child.margin_leading_value(cross_axis).unit != Unit::Auto
      && child.margin_trailing_value(cross_axis).unit != Unit::Auto;

    let child_width = if is_main_axis_row {
      child_main_size
    } else {
      child_cross_size
    };
    let child_height = if !is_main_axis_row {
      child_main_size
    } else {
      child_cross_size
    };
    let child_width_measure_mode = if is_main_axis_row {
      child_main_measure_mode
    } else {
      child_cross_measure_mode
    };
    let child_height_measure_mode = if !is_main_axis_row {
      child_main_measure_mode
    } else {
      child_cross_measure_mode
    };

    // Lay the child out with its final main size. Stretch children defer
    // their real layout to the cross-alignment pass.
    let parent_layout_direction = node.layout().direction;
    layout_node_internal(
      child,
      child_width,
      child_height,
      parent_layout_direction,
      child_width_measure_mode,
      child_height_measure_mode,
      available_inner_width,
      available_inner_height,
      perform_layout && !requires_stretch_layout,
      "flex",
      config,
    );
    let child_overflowed = child.layout().had_overflow;
    {
      let mut layout = node.layout_mut();
      layout.had_overflow |= child_overflowed;
    }
  }

  delta_free_space
}

/// Two-pass flexible-length resolution for one line
///
/// Pass one freezes items whose min/max constraints trigger and removes
/// them from the pool; pass two distributes the remainder and performs the
/// recursive child layouts. This fixed two-pass scheme deviates from the
/// spec's open-ended loop but sizes the frozen items identically.
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_flexible_length(
  node: &Node,
  line: &mut FlexLine,
  main_axis: FlexDirection,
  cross_axis: FlexDirection,
  main_axis_parent_size: f32,
  available_inner_main_dim: f32,
  available_inner_cross_dim: f32,
  available_inner_width: f32,
  available_inner_height: f32,
  flex_basis_overflows: bool,
  measure_mode_cross_dim: MeasureMode,
  perform_layout: bool,
  config: &ConfigRef,
) {
  let original_free_space = line.remaining_free_space;
  distribute_free_space_first_pass(
    line,
    main_axis,
    main_axis_parent_size,
    available_inner_main_dim,
    available_inner_width,
  );
  let distributed_free_space = distribute_free_space_second_pass(
    line,
    node,
    main_axis,
    cross_axis,
    main_axis_parent_size,
    available_inner_main_dim,
    available_inner_cross_dim,
    available_inner_width,
    available_inner_height,
    flex_basis_overflows,
    measure_mode_cross_dim,
    perform_layout,
    config,
  );
  line.remaining_free_space = original_free_space - distributed_free_space;
}

/// Positions a line's children along the main axis per `justify_content`
/// and auto margins, accumulating the line's main and cross dimensions
#[allow(clippy::too_many_arguments)]
pub(crate) fn justify_main_axis(
  node: &Node,
  line: &mut FlexLine,
  start_of_line_index: usize,
  main_axis: FlexDirection,
  cross_axis: FlexDirection,
  measure_mode_main_dim: MeasureMode,
  measure_mode_cross_dim: MeasureMode,
  main_axis_parent_size: f32,
  parent_width: f32,
  available_inner_main_dim: f32,
  available_inner_cross_dim: f32,
  available_inner_width: f32,
  perform_layout: bool,
) {
  let style = node.style();

  // Under at-most sizing, leftover space only counts up to the main-axis
  // min size.
  if measure_mode_main_dim == MeasureMode::AtMost && line.remaining_free_space > 0.0 {
    let min_main = style.min_dimensions.get(main_axis.dimension());
    if min_main.unit != Unit::Undefined && min_main.resolve(main_axis_parent_size) >= 0.0 {
      line.remaining_free_space = (min_main.resolve(main_axis_parent_size)
        - (available_inner_main_dim - line.remaining_free_space))
        .max(0.0);
    } else {
      line.remaining_free_space = 0.0;
    }
  }

  let mut number_of_auto_margins_on_line = 0;
  for i in start_of_line_index..line.end_of_line_index {
    let child = node.child(i).expect("line child index in range");
    if child.style().position_type == PositionType::Relative {
      if child.margin_leading_value(main_axis).unit == Unit::Auto {
        number_of_auto_margins_on_line += 1;
      }
      if child.margin_trailing_value(main_axis).unit == Unit::Auto {
        number_of_auto_margins_on_line += 1;
      }
    }
  }

  // Two controls position the line: space before the first item and space
  // between items.
  let mut leading_main_dim = 0.0;
  let mut between_main_dim = 0.0;

  if number_of_auto_margins_on_line == 0 {
    match style.justify_content {
      Justify::Center => leading_main_dim = line.remaining_free_space / 2.0,
      Justify::FlexEnd => leading_main_dim = line.remaining_free_space,
      Justify::SpaceBetween => {
        if line.items_on_line > 1 {
          between_main_dim =
            line.remaining_free_space.max(0.0) / (line.items_on_line - 1) as f32;
        }
      }
      Justify::SpaceEvenly => {
        between_main_dim = line.remaining_free_space / (line.items_on_line + 1) as f32;
        leading_main_dim = between_main_dim;
      }
      Justify::SpaceAround => {
        between_main_dim = line.remaining_free_space / line.items_on_line as f32;
        leading_main_dim = between_main_dim / 2.0;
      }
      Justify::FlexStart => {}
    }
  }

  let leading_padding_and_border_main = node.leading_padding_and_border(main_axis, parent_width);
  line.main_dim = leading_padding_and_border_main + leading_main_dim;
  line.cross_dim = 0.0;

  for i in start_of_line_index..line.end_of_line_index {
    let child = node.child(i).expect("line child index in range");
    let child_style = child.style();
    if child_style.display == Display::None {
      continue;
    }

    if child_style.position_type == PositionType::Absolute
      && child.is_leading_position_defined(main_axis)
    {
      if perform_layout {
        // Absolute children with an explicit leading offset sit exactly
        // there (plus border and margin).
        let position = child.leading_position(main_axis, available_inner_main_dim)
          + node.leading_border(main_axis)
          + child.leading_margin(main_axis, available_inner_width);
        child.layout_mut().position[main_axis.leading_edge() as usize] = position;
      }
    } else if child_style.position_type == PositionType::Relative {
      if child.margin_leading_value(main_axis).unit == Unit::Auto {
        line.main_dim += line.remaining_free_space / number_of_auto_margins_on_line as f32;
      }

      if perform_layout {
        let current = child.layout().position[main_axis.leading_edge() as usize];
        child.layout_mut().position[main_axis.leading_edge() as usize] =
          current + line.main_dim;
      }

      if child.margin_trailing_value(main_axis).unit == Unit::Auto {
        line.main_dim += line.remaining_free_space / number_of_auto_margins_on_line as f32;
      }

      let can_skip_flex = !perform_layout && measure_mode_cross_dim == MeasureMode::Exactly;
      if can_skip_flex {
        // The flex step was skipped, so measured dimensions are stale;
        // estimate from the flex basis instead.
        line.main_dim += between_main_dim
          + child.margin_for_axis(main_axis, available_inner_width)
          + child.layout().computed_flex_basis;
        line.cross_dim = available_inner_cross_dim;
      } else {
        line.main_dim += between_main_dim + child.dim_with_margin(main_axis, available_inner_width);
        // Only one item can occupy the line's cross extent at a time.
        line.cross_dim = line
          .cross_dim
          .max(child.dim_with_margin(cross_axis, available_inner_width));
      }
    } else if perform_layout {
      let current = child.layout().position[main_axis.leading_edge() as usize];
      child.layout_mut().position[main_axis.leading_edge() as usize] =
        current + node.leading_border(main_axis) + leading_main_dim;
    }
  }

  line.main_dim += node.trailing_padding_and_border(main_axis, parent_width);
}

/// The per-node layout routine; see the module docs for the pass structure.
/// `measured_dimensions` is set for the node itself and `position` for its
/// children; everything recursive goes through the caching wrapper.
#[allow(clippy::too_many_arguments)]
pub(crate) fn layout_impl(
  node: &Node,
  available_width: f32,
  available_height: f32,
  parent_direction: Direction,
  width_measure_mode: MeasureMode,
  height_measure_mode: MeasureMode,
  parent_width: f32,
  parent_height: f32,
  perform_layout: bool,
  config: &ConfigRef,
) {
  if is_undefined(available_width) && width_measure_mode != MeasureMode::Undefined {
    node.fatal_msg(
      "availableWidth is indefinite so widthMeasureMode must be MeasureMode::Undefined",
    );
  }
  if is_undefined(available_height) && height_measure_mode != MeasureMode::Undefined {
    node.fatal_msg(
      "availableHeight is indefinite so heightMeasureMode must be MeasureMode::Undefined",
    );
  }

  let direction = node.resolve_direction(parent_direction);

  let flex_row_direction = FlexDirection::Row.resolve(direction);
  let flex_column_direction = FlexDirection::Column.resolve(direction);

  // Resolve the node's own margin, border, and padding into layout fields.
  let margin_start = node.leading_margin(flex_row_direction, parent_width);
  let margin_end = node.trailing_margin(flex_row_direction, parent_width);
  let margin_top = node.leading_margin(flex_column_direction, parent_width);
  let margin_bottom = node.trailing_margin(flex_column_direction, parent_width);
  let border_start = node.leading_border(flex_row_direction);
  let border_end = node.trailing_border(flex_row_direction);
  let border_top = node.leading_border(flex_column_direction);
  let border_bottom = node.trailing_border(flex_column_direction);
  let padding_start = node.leading_padding(flex_row_direction, parent_width);
  let padding_end = node.trailing_padding(flex_row_direction, parent_width);
  let padding_top = node.leading_padding(flex_column_direction, parent_width);
  let padding_bottom = node.trailing_padding(flex_column_direction, parent_width);
  {
    let mut layout = node.layout_mut();
    layout.direction = direction;
    layout.margin[Edge::Start as usize] = margin_start;
    layout.margin[Edge::End as usize] = margin_end;
    layout.margin[Edge::Top as usize] = margin_top;
    layout.margin[Edge::Bottom as usize] = margin_bottom;
    layout.border[Edge::Start as usize] = border_start;
    layout.border[Edge::End as usize] = border_end;
    layout.border[Edge::Top as usize] = border_top;
    layout.border[Edge::Bottom as usize] = border_bottom;
    layout.padding[Edge::Start as usize] = padding_start;
    layout.padding[Edge::End as usize] = padding_end;
    layout.padding[Edge::Top as usize] = padding_top;
    layout.padding[Edge::Bottom as usize] = padding_bottom;
  }

  if node.has_measure_func() {
    set_measured_dimensions_for_measure_func(
      node,
      available_width,
      available_height,
      width_measure_mode,
      height_measure_mode,
      parent_width,
      parent_height,
    );
    return;
  }

  let child_count = node.child_count();
  if child_count == 0 {
    set_measured_dimensions_for_empty_container(
      node,
      available_width,
      available_height,
      width_measure_mode,
      height_measure_mode,
      parent_width,
      parent_height,
    );
    return;
  }

  // For pure measurements a fully constrained node needs no algorithm.
  if !perform_layout
    && try_set_measured_dimensions_for_fixed_size(
      node,
      available_width,
      available_height,
      width_measure_mode,
      height_measure_mode,
      parent_width,
      parent_height,
    )
  {
    return;
  }

  // Real work from here on: children must be mutable.
  node.clone_children_if_needed();
  node.layout_mut().had_overflow = false;

  // STEP 1: CALCULATE VALUES FOR REMAINDER OF ALGORITHM
  let main_axis = node.style().flex_direction.resolve(direction);
  let cross_axis = main_axis.cross(direction);
  let is_main_axis_row = main_axis.is_row();
  let is_node_flex_wrap = node.style().flex_wrap != Wrap::NoWrap;

  let main_axis_parent_size = if is_main_axis_row {
    parent_width
  } else {
    parent_height
  };
  let cross_axis_parent_size = if is_main_axis_row {
    parent_height
  } else {
    parent_width
  };

  let leading_padding_and_border_cross =
    node.leading_padding_and_border(cross_axis, parent_width);
  let padding_and_border_axis_main = node.padding_and_border_for_axis(main_axis, parent_width);
  let padding_and_border_axis_cross = node.padding_and_border_for_axis(cross_axis, parent_width);

  let mut measure_mode_main_dim = if is_main_axis_row {
    width_measure_mode
  } else {
    height_measure_mode
  };
  let measure_mode_cross_dim = if is_main_axis_row {
    height_measure_mode
  } else {
    width_measure_mode
  };

  let padding_and_border_axis_row = if is_main_axis_row {
    padding_and_border_axis_main
  } else {
    padding_and_border_axis_cross
  };
  let padding_and_border_axis_column = if is_main_axis_row {
    padding_and_border_axis_cross
  } else {
    padding_and_border_axis_main
  };

  let margin_axis_row = node.margin_for_axis(FlexDirection::Row, parent_width);
  let margin_axis_column = node.margin_for_axis(FlexDirection::Column, parent_width);

  let style = node.style();
  let min_inner_width =
    style.min_dimensions.width.resolve(parent_width) - padding_and_border_axis_row;
  let max_inner_width =
    style.max_dimensions.width.resolve(parent_width) - padding_and_border_axis_row;
  let min_inner_height =
    style.min_dimensions.height.resolve(parent_height) - padding_and_border_axis_column;
  let max_inner_height =
    style.max_dimensions.height.resolve(parent_height) - padding_and_border_axis_column;

  let min_inner_main_dim = if is_main_axis_row {
    min_inner_width
  } else {
    min_inner_height
  };
  let max_inner_main_dim = if is_main_axis_row {
    max_inner_width
  } else {
    max_inner_height
  };

  // STEP 2: DETERMINE AVAILABLE SIZE IN MAIN AND CROSS DIRECTIONS
  let available_inner_width =
    calculate_available_inner_dim(node, FlexDirection::Row, available_width, parent_width);
  let available_inner_height =
    calculate_available_inner_dim(node, FlexDirection::Column, available_height, parent_height);

  let mut available_inner_main_dim = if is_main_axis_row {
    available_inner_width
  } else {
    available_inner_height
  };
  let available_inner_cross_dim = if is_main_axis_row {
    available_inner_height
  } else {
    available_inner_width
  };

  // STEP 3: DETERMINE FLEX BASIS FOR EACH ITEM
  let total_outer_flex_basis = compute_flex_basis_for_children(
    node,
    available_inner_width,
    available_inner_height,
    width_measure_mode,
    height_measure_mode,
    direction,
    main_axis,
    config,
    perform_layout,
  );

  let flex_basis_overflows = if measure_mode_main_dim == MeasureMode::Undefined {
    false
  } else {
    total_outer_flex_basis > available_inner_main_dim
  };
  if is_node_flex_wrap && flex_basis_overflows && measure_mode_main_dim == MeasureMode::AtMost {
    measure_mode_main_dim = MeasureMode::Exactly;
  }

  // STEP 4: COLLECT FLEX ITEMS INTO FLEX LINES
  let mut start_of_line_index = 0;
  let mut end_of_line_index = 0;
  let mut line_count = 0;
  let mut total_line_cross_dim = 0.0;
  let mut max_line_main_dim: f32 = 0.0;

  while end_of_line_index < child_count {
    let mut line = collect_flex_line(
      node,
      parent_direction,
      main_axis_parent_size,
      available_inner_width,
      available_inner_main_dim,
      start_of_line_index,
      line_count,
    );
    end_of_line_index = line.end_of_line_index;

    // If the cross axis is already exact, a pure measurement can skip
    // resolving flexible lengths entirely.
    let can_skip_flex = !perform_layout && measure_mode_cross_dim == MeasureMode::Exactly;

    // STEP 5: RESOLVING FLEXIBLE LENGTHS ON MAIN AXIS
    let mut size_based_on_content = false;
    if measure_mode_main_dim != MeasureMode::Exactly {
      if !is_undefined(min_inner_main_dim) && line.size_consumed < min_inner_main_dim {
        available_inner_main_dim = min_inner_main_dim;
      } else if !is_undefined(max_inner_main_dim) && line.size_consumed > max_inner_main_dim {
        available_inner_main_dim = max_inner_main_dim;
      } else {
        let use_legacy_stretch = node.config().use_legacy_stretch_behaviour();
        if !use_legacy_stretch
          && (line.total_flex_grow_factors == 0.0 || node.resolve_flex_grow() == 0.0)
        {
          // Nothing can flex here, so the space the line consumed is all
          // the space it gets.
          available_inner_main_dim = line.size_consumed;
        }
        if use_legacy_stretch {
          node.layout_mut().did_use_legacy_flag = true;
        }
        size_based_on_content = !use_legacy_stretch;
      }
    }

    if !size_based_on_content && !is_undefined(available_inner_main_dim) {
      line.remaining_free_space = available_inner_main_dim - line.size_consumed;
    } else if line.size_consumed < 0.0 {
      // The node is sized by its content, which consumed a negative size;
      // free space is the distance back to zero.
      line.remaining_free_space = -line.size_consumed;
    }

    if !can_skip_flex {
      resolve_flexible_length(
        node,
        &mut line,
        main_axis,
        cross_axis,
        main_axis_parent_size,
        available_inner_main_dim,
        available_inner_cross_dim,
        available_inner_width,
        available_inner_height,
        flex_basis_overflows,
        measure_mode_cross_dim,
        perform_layout,
        config,
      );
    }

    {
      let overflowed = line.remaining_free_space < 0.0;
      let mut layout = node.layout_mut();
      layout.had_overflow |= overflowed;
    }

    // STEP 6: MAIN-AXIS JUSTIFICATION & CROSS-AXIS SIZE DETERMINATION
    justify_main_axis(
      node,
      &mut line,
      start_of_line_index,
      main_axis,
      cross_axis,
      measure_mode_main_dim,
      measure_mode_cross_dim,
      main_axis_parent_size,
      parent_width,
      available_inner_main_dim,
      available_inner_cross_dim,
      available_inner_width,
      perform_layout,
    );

    let mut container_cross_axis = available_inner_cross_dim;
    if measure_mode_cross_dim == MeasureMode::Undefined
      || measure_mode_cross_dim == MeasureMode::AtMost
    {
      container_cross_axis = bound_axis(
        node,
        cross_axis,
        line.cross_dim + padding_and_border_axis_cross,
        cross_axis_parent_size,
        parent_width,
      ) - padding_and_border_axis_cross;
    }

    // Without wrapping, the container defines the line's cross size.
    if !is_node_flex_wrap && measure_mode_cross_dim == MeasureMode::Exactly {
      line.cross_dim = available_inner_cross_dim;
    }

    line.cross_dim = bound_axis(
      node,
      cross_axis,
      line.cross_dim + padding_and_border_axis_cross,
      cross_axis_parent_size,
      parent_width,
    ) - padding_and_border_axis_cross;

    // STEP 7: CROSS-AXIS ALIGNMENT
    if perform_layout {
      for i in start_of_line_index..end_of_line_index {
        let child = node.child(i).expect("line child index in range");
        let child_style = child.style();
        if child_style.display == Display::None {
          continue;
        }
        if child_style.position_type == PositionType::Absolute {
          // Absolute children with explicit offsets override whatever the
          // earlier passes wrote.
          let is_child_leading_pos_defined = child.is_leading_position_defined(cross_axis);
          if is_child_leading_pos_defined {
            let position = child.leading_position(cross_axis, available_inner_cross_dim)
              + node.leading_border(cross_axis)
              + child.leading_margin(cross_axis, available_inner_width);
            child.layout_mut().position[cross_axis.leading_edge() as usize] = position;
          }
          let wrote_undefined = is_undefined(
            child.layout().position[cross_axis.leading_edge() as usize],
          );
          if !is_child_leading_pos_defined || wrote_undefined {
            let position = node.leading_border(cross_axis)
              + child.leading_margin(cross_axis, available_inner_width);
            child.layout_mut().position[cross_axis.leading_edge() as usize] = position;
          }
        } else {
          let mut leading_cross_dim = leading_padding_and_border_cross;
          let align = align_item(node, &child);

          if align == Align::Stretch
            && child.margin_leading_value(cross_axis).unit != Unit::Auto
            && child.margin_trailing_value(cross_axis).unit != Unit::Auto
          {
            // A definite cross size means there is nothing to stretch.
            if !child.is_style_dim_defined(cross_axis, available_inner_cross_dim) {
              let mut child_main_size = child.measured_dimension(main_axis.dimension());
              let aspect_ratio = child_style.aspect_ratio;
              let mut child_cross_size = if !is_undefined(aspect_ratio) {
                child.margin_for_axis(cross_axis, available_inner_width)
                  + if is_main_axis_row {
                    child_main_size / aspect_ratio
                  } else {
                    child_main_size * aspect_ratio
                  }
              } else {
                line.cross_dim
              };

              child_main_size += child.margin_for_axis(main_axis, available_inner_width);

              let mut child_main_measure_mode = MeasureMode::Exactly;
              let mut child_cross_measure_mode = MeasureMode::Exactly;
              constrain_max_size_for_mode(
                &child,
                main_axis,
                available_inner_main_dim,
                available_inner_width,
                &mut child_main_measure_mode,
                &mut child_main_size,
              );
              constrain_max_size_for_mode(
                &child,
                cross_axis,
                available_inner_cross_dim,
                available_inner_width,
                &mut child_cross_measure_mode,
                &mut child_cross_size,
              );

              let child_width = if is_main_axis_row {
                child_main_size
              } else {
                child_cross_size
              };
              let child_height = if !is_main_axis_row {
                child_main_size
              } else {
                child_cross_size
              };
              let child_width_measure_mode = if is_undefined(child_width) {
                MeasureMode::Undefined
              } else {
                MeasureMode::Exactly
              };
              let child_height_measure_mode = if is_undefined(child_height) {
                MeasureMode::Undefined
              } else {
                MeasureMode::Exactly
              };

              layout_node_internal(
                &child,
                child_width,
                child_height,
                direction,
                child_width_measure_mode,
                child_height_measure_mode,
                available_inner_width,
                available_inner_height,
                true,
                "stretch",
                config,
              );
            }
          } else {
            let remaining_cross_dim =
              container_cross_axis - child.dim_with_margin(cross_axis, available_inner_width);

            let leading_auto = child.margin_leading_value(cross_axis).unit == Unit::Auto;
            let trailing_auto = child.margin_trailing_value(cross_axis).unit == Unit::Auto;
            if leading_auto && trailing_auto {
              leading_cross_dim += (remaining_cross_dim / 2.0).max(0.0);
            } else if trailing_auto {
              // Free space goes after the child.
            } else if leading_auto {
              leading_cross_dim += remaining_cross_dim.max(0.0);
            } else if align == Align::FlexStart {
              // Already at the line's cross start.
            } else if align == Align::Center {
              leading_cross_dim += remaining_cross_dim / 2.0;
            } else {
              leading_cross_dim += remaining_cross_dim;
            }
          }
          let current = child.layout().position[cross_axis.leading_edge() as usize];
          child.layout_mut().position[cross_axis.leading_edge() as usize] =
            current + total_line_cross_dim + leading_cross_dim;
        }
      }
    }

    total_line_cross_dim += line.cross_dim;
    max_line_main_dim = max_line_main_dim.max(line.main_dim);

    line_count += 1;
    start_of_line_index = end_of_line_index;
  }

  // STEP 8: MULTI-LINE CONTENT ALIGNMENT
  if perform_layout
    && (line_count > 1 || is_baseline_layout(node))
    && !is_undefined(available_inner_cross_dim)
  {
    let remaining_align_content_dim = available_inner_cross_dim - total_line_cross_dim;

    let mut cross_dim_lead = 0.0;
    let mut current_lead = leading_padding_and_border_cross;

    match node.style().align_content {
      Align::FlexEnd => current_lead += remaining_align_content_dim,
      Align::Center => current_lead += remaining_align_content_dim / 2.0,
      Align::Stretch => {
        if available_inner_cross_dim > total_line_cross_dim {
          cross_dim_lead = remaining_align_content_dim / line_count as f32;
        }
      }
      Align::SpaceAround => {
        if available_inner_cross_dim > total_line_cross_dim {
          current_lead += remaining_align_content_dim / (2.0 * line_count as f32);
          if line_count > 1 {
            cross_dim_lead = remaining_align_content_dim / line_count as f32;
          }
        } else {
          current_lead += remaining_align_content_dim / 2.0;
        }
      }
      Align::SpaceBetween => {
        if available_inner_cross_dim > total_line_cross_dim && line_count > 1 {
          cross_dim_lead = remaining_align_content_dim / (line_count - 1) as f32;
        }
      }
      Align::Auto | Align::FlexStart | Align::Baseline => {}
    }

    let mut end_index = 0;
    for i in 0..line_count {
      let start_index = end_index;

      // Find the line's extent and height, tracking baseline metrics.
      let mut line_height: f32 = 0.0;
      let mut max_ascent_for_current_line: f32 = 0.0;
      let mut max_descent_for_current_line: f32 = 0.0;
      let mut ii = start_index;
      while ii < child_count {
        let child = node.child(ii).expect("child index in range");
        let child_style = child.style();
        if child_style.display == Display::None {
          ii += 1;
          continue;
        }
        if child_style.position_type == PositionType::Relative {
          if child.line_index() != i {
            break;
          }
          if child.is_layout_dim_defined(cross_axis) {
            line_height = line_height.max(
              child.measured_dimension(cross_axis.dimension())
                + child.margin_for_axis(cross_axis, available_inner_width),
            );
          }
          if align_item(node, &child) == Align::Baseline {
            let ascent = baseline(&child)
              + child.leading_margin(FlexDirection::Column, available_inner_width);
            let descent = child.measured_dimension(Dimension::Height)
              + child.margin_for_axis(FlexDirection::Column, available_inner_width)
              - ascent;
            max_ascent_for_current_line = max_ascent_for_current_line.max(ascent);
            max_descent_for_current_line = max_descent_for_current_line.max(descent);
            line_height =
              line_height.max(max_ascent_for_current_line + max_descent_for_current_line);
          }
        }
        ii += 1;
      }
      end_index = ii;
      line_height += cross_dim_lead;

      for ii in start_index..end_index {
        let child = node.child(ii).expect("child index in range");
        let child_style = child.style();
        if child_style.display == Display::None {
          continue;
        }
        if child_style.position_type != PositionType::Relative {
          continue;
        }
        match align_item(node, &child) {
          Align::FlexStart => {
            let position =
              current_lead + child.leading_margin(cross_axis, available_inner_width);
            child.layout_mut().position[cross_axis.leading_edge() as usize] = position;
          }
          Align::FlexEnd => {
            let position = current_lead + line_height
              - child.trailing_margin(cross_axis, available_inner_width)
              - child.measured_dimension(cross_axis.dimension());
            child.layout_mut().position[cross_axis.leading_edge() as usize] = position;
          }
          Align::Center => {
            let child_height = child.measured_dimension(cross_axis.dimension());
            let position = current_lead + (line_height - child_height) / 2.0;
            child.layout_mut().position[cross_axis.leading_edge() as usize] = position;
          }
          Align::Stretch => {
            let position =
              current_lead + child.leading_margin(cross_axis, available_inner_width);
            child.layout_mut().position[cross_axis.leading_edge() as usize] = position;

            // The child was measured against the parent's cross size, not
            // the line's; remeasure when they differ.
            if !child.is_style_dim_defined(cross_axis, available_inner_cross_dim) {
              let child_width = if is_main_axis_row {
                child.measured_dimension(Dimension::Width)
                  + child.margin_for_axis(main_axis, available_inner_width)
              } else {
                line_height
              };
              let child_height = if !is_main_axis_row {
                child.measured_dimension(Dimension::Height)
                  + child.margin_for_axis(cross_axis, available_inner_width)
              } else {
                line_height
              };

              let already_sized = floats_equal(
                child_width,
                child.measured_dimension(Dimension::Width),
              ) && floats_equal(
                child_height,
                child.measured_dimension(Dimension::Height),
              );
              if !already_sized {
                layout_node_internal(
                  &child,
                  child_width,
                  child_height,
                  direction,
                  MeasureMode::Exactly,
                  MeasureMode::Exactly,
                  available_inner_width,
                  available_inner_height,
                  true,
                  "multiline-stretch",
                  config,
                );
              }
            }
          }
          Align::Baseline => {
            let position = current_lead + max_ascent_for_current_line - baseline(&child)
              + child.leading_position(FlexDirection::Column, available_inner_cross_dim);
            child.layout_mut().position[Edge::Top as usize] = position;
          }
          Align::Auto | Align::SpaceBetween | Align::SpaceAround => {}
        }
      }

      current_lead += line_height;
    }
  }

  // STEP 9: COMPUTING FINAL DIMENSIONS
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

  // Content-sized axes take their extent from the lines laid out above.
  let overflow = node.style().overflow;
  if measure_mode_main_dim == MeasureMode::Undefined
    || (overflow != Overflow::Scroll && measure_mode_main_dim == MeasureMode::AtMost)
  {
    node.set_measured_dimension(
      main_axis.dimension(),
      bound_axis(
        node,
        main_axis,
        max_line_main_dim,
        main_axis_parent_size,
        parent_width,
      ),
    );
  } else if measure_mode_main_dim == MeasureMode::AtMost && overflow == Overflow::Scroll {
    node.set_measured_dimension(
      main_axis.dimension(),
      (available_inner_main_dim + padding_and_border_axis_main)
        .min(bound_axis_within_min_max(
          node,
          main_axis,
          max_line_main_dim,
          main_axis_parent_size,
        ))
        .max(padding_and_border_axis_main),
    );
  }

  if measure_mode_cross_dim == MeasureMode::Undefined
    || (overflow != Overflow::Scroll && measure_mode_cross_dim == MeasureMode::AtMost)
  {
    node.set_measured_dimension(
      cross_axis.dimension(),
      bound_axis(
        node,
        cross_axis,
        total_line_cross_dim + padding_and_border_axis_cross,
        cross_axis_parent_size,
        parent_width,
      ),
    );
  } else if measure_mode_cross_dim == MeasureMode::AtMost && overflow == Overflow::Scroll {
    node.set_measured_dimension(
      cross_axis.dimension(),
      (available_inner_cross_dim + padding_and_border_axis_cross)
        .min(bound_axis_within_min_max(
          node,
          cross_axis,
          total_line_cross_dim + padding_and_border_axis_cross,
          cross_axis_parent_size,
        ))
        .max(padding_and_border_axis_cross),
    );
  }

  // Lines were stacked in normal order; wrap-reverse flips them now.
  if perform_layout && node.style().flex_wrap == Wrap::WrapReverse {
    for child in node.children() {
      if child.style().position_type == PositionType::Relative {
        let container_cross = node.measured_dimension(cross_axis.dimension());
        let child_cross = child.measured_dimension(cross_axis.dimension());
        let current = child.layout().position[cross_axis.leading_edge() as usize];
        child.layout_mut().position[cross_axis.leading_edge() as usize] =
          container_cross - current - child_cross;
      }
    }
  }

  if perform_layout {
    // STEP 10: SIZING AND POSITIONING ABSOLUTE CHILDREN
    for child in node.children() {
      if child.style().position_type != PositionType::Absolute {
        continue;
      }
      absolute_layout_child(
        node,
        &child,
        available_inner_width,
        if is_main_axis_row {
          measure_mode_main_dim
        } else {
          measure_mode_cross_dim
        },
        available_inner_height,
        direction,
        config,
      );
    }

    // STEP 11: SETTING TRAILING POSITIONS FOR CHILDREN
    let needs_main_trailing_pos = main_axis.is_reverse();
    let needs_cross_trailing_pos = cross_axis.is_reverse();
    if needs_main_trailing_pos || needs_cross_trailing_pos {
      for child in node.children() {
        if child.style().display == Display::None {
          continue;
        }
        if needs_main_trailing_pos {
          set_child_trailing_position(node, &child, main_axis);
        }
        if needs_cross_trailing_pos {
          set_child_trailing_position(node, &child, cross_axis);
        }
      }
    }
  }
}
