//! Layout driver
//!
//! [`calculate_layout`] is the top-level entry: it bumps the generation,
//! derives the root constraints from its style, runs the recursive
//! cache-aware [`layout_node_internal`], and rounds the result to the
//! pixel grid. Every recursive sizing call in the engine goes through
//! [`layout_node_internal`], which consults the per-node measurement cache
//! before falling back to the real algorithm in [`flex`].
//!
//! # Module Organization
//!
//! - `flex` - the flexbox algorithm (flex basis, lines, flexible lengths,
//!   justification, alignment)
//! - `absolute` - sizing and positioning of absolute children
//! - `measure` - leaf fast paths (measure callbacks, empty containers)
//! - `cache` - measurement cache reuse predicates
//! - `rounding` - pixel-grid rounding
//! - `utils` - shared per-node helpers

pub mod absolute;
pub mod cache;
pub mod flex;
pub mod measure;
pub mod rounding;
pub mod utils;

use crate::config::ConfigRef;
use crate::layout::cache::can_use_cached_measurement;
use crate::layout::flex::layout_impl;
use crate::layout::rounding::round_to_pixel_grid;
use crate::style::types::{Dimension, Direction, FlexDirection, MeasureMode};
use crate::style::values::{floats_equal, is_undefined};
use crate::tree::layout::{CachedMeasurement, MAX_CACHED_RESULTS};
use crate::tree::node::Node;
use std::sync::atomic::{AtomicU32, Ordering};

// Bumped at the start of every top-level layout; gates cache invalidation
// and flex-basis freshness.
static CURRENT_GENERATION: AtomicU32 = AtomicU32::new(0);

pub(crate) fn current_generation() -> u32 {
  CURRENT_GENERATION.load(Ordering::Relaxed)
}

fn bump_generation() -> u32 {
  CURRENT_GENERATION.fetch_add(1, Ordering::Relaxed) + 1
}

/// Cache-aware wrapper around the per-node layout routine
///
/// Decides whether the request can be answered from the node's cached
/// measurements; otherwise runs [`flex::layout_impl`] and stores the
/// result. Layout results go to the dedicated layout slot, measurements to
/// the ring (which wraps when full). Returns true when the node was
/// actually (re)computed rather than served from cache.
#[allow(clippy::too_many_arguments)]
pub(crate) fn layout_node_internal(
  node: &Node,
  available_width: f32,
  available_height: f32,
  parent_direction: Direction,
  width_measure_mode: MeasureMode,
  height_measure_mode: MeasureMode,
  parent_width: f32,
  parent_height: f32,
  perform_layout: bool,
  reason: &str,
  config: &ConfigRef,
) -> bool {
  let generation = current_generation();

  let need_to_visit_node = {
    let layout = node.layout();
    (node.is_dirty() && layout.generation_count != generation)
      || layout.last_parent_direction != Some(parent_direction)
  };
  if need_to_visit_node {
    node.layout_mut().invalidate_cache();
  }

  // Layouts are assumed to happen at most once per node and generation,
  // but several measurements may be needed to settle the flex dimensions;
  // measure-callback nodes get the widest reuse rules because their
  // measurements are the expensive ones.
  let mut cached_results: Option<CachedMeasurement> = None;
  if node.has_measure_func() {
    let margin_axis_row = node.margin_for_axis(FlexDirection::Row, parent_width);
    let margin_axis_column = node.margin_for_axis(FlexDirection::Column, parent_width);
    let node_config = node.config();

    let cached_layout = node.layout().cached_layout;
    if can_use_cached_measurement(
      width_measure_mode,
      available_width,
      height_measure_mode,
      available_height,
      &cached_layout,
      margin_axis_row,
      margin_axis_column,
      &node_config,
    ) {
      cached_results = Some(cached_layout);
    } else {
      let entry_count = node.layout().next_cached_measurements_index;
      for i in 0..entry_count {
        let entry = node.layout().cached_measurements[i];
        if can_use_cached_measurement(
          width_measure_mode,
          available_width,
          height_measure_mode,
          available_height,
          &entry,
          margin_axis_row,
          margin_axis_column,
          &node_config,
        ) {
          cached_results = Some(entry);
          break;
        }
      }
    }
  } else if perform_layout {
    let cached_layout = node.layout().cached_layout;
    if floats_equal(cached_layout.available_width, available_width)
      && floats_equal(cached_layout.available_height, available_height)
      && cached_layout.width_measure_mode == Some(width_measure_mode)
      && cached_layout.height_measure_mode == Some(height_measure_mode)
    {
      cached_results = Some(cached_layout);
    }
  } else {
    let entry_count = node.layout().next_cached_measurements_index;
    for i in 0..entry_count {
      let entry = node.layout().cached_measurements[i];
      if floats_equal(entry.available_width, available_width)
        && floats_equal(entry.available_height, available_height)
        && entry.width_measure_mode == Some(width_measure_mode)
        && entry.height_measure_mode == Some(height_measure_mode)
      {
        cached_results = Some(entry);
        break;
      }
    }
  }

  if !need_to_visit_node && cached_results.is_some() {
    let cached = cached_results.expect("checked above");
    node.set_measured_dimension(Dimension::Width, cached.computed_width);
    node.set_measured_dimension(Dimension::Height, cached.computed_height);
    tracing::trace!(
      reason,
      perform_layout,
      ?width_measure_mode,
      ?height_measure_mode,
      available_width,
      available_height,
      computed_width = cached.computed_width,
      computed_height = cached.computed_height,
      "layout skipped, cache hit"
    );
  } else {
    tracing::trace!(
      reason,
      perform_layout,
      dirty = need_to_visit_node,
      ?width_measure_mode,
      ?height_measure_mode,
      available_width,
      available_height,
      "computing layout"
    );

    layout_impl(
      node,
      available_width,
      available_height,
      parent_direction,
      width_measure_mode,
      height_measure_mode,
      parent_width,
      parent_height,
      perform_layout,
      config,
    );

    node.layout_mut().last_parent_direction = Some(parent_direction);

    if cached_results.is_none() {
      let mut layout = node.layout_mut();
      if layout.next_cached_measurements_index == MAX_CACHED_RESULTS {
        tracing::trace!("measurement cache full, wrapping");
        layout.next_cached_measurements_index = 0;
      }

      let new_entry = CachedMeasurement {
        available_width,
        available_height,
        width_measure_mode: Some(width_measure_mode),
        height_measure_mode: Some(height_measure_mode),
        computed_width: layout.measured_dimensions[Dimension::Width as usize],
        computed_height: layout.measured_dimensions[Dimension::Height as usize],
      };
      if perform_layout {
        layout.cached_layout = new_entry;
      } else {
        let index = layout.next_cached_measurements_index;
        layout.cached_measurements[index] = new_entry;
        layout.next_cached_measurements_index += 1;
      }
    }
  }

  if perform_layout {
    let width = node.measured_dimension(Dimension::Width);
    let height = node.measured_dimension(Dimension::Height);
    {
      let mut layout = node.layout_mut();
      layout.dimensions[Dimension::Width as usize] = width;
      layout.dimensions[Dimension::Height as usize] = height;
    }
    node.set_has_new_layout(true);
    node.set_dirty(false);
  }

  node.layout_mut().generation_count = generation;
  need_to_visit_node || cached_results.is_none()
}

/// Computes the layout of the tree rooted at `node`
///
/// The root's constraint per axis: an explicit style dimension is laid out
/// `exactly` (plus margins), else a non-negative max dimension gives
/// `at-most`, else the parent size is used (`exactly` when defined).
/// Afterwards the tree is rounded to the pixel grid, and, when the config
/// asks for it, the legacy-stretch diff rerun is performed.
pub fn calculate_layout(
  node: &Node,
  parent_width: f32,
  parent_height: f32,
  parent_direction: Direction,
) {
  // Force the recursive routine to visit every dirty node at least once.
  bump_generation();
  node.resolve_dimension();

  let width;
  let width_measure_mode;
  if node.is_style_dim_defined(FlexDirection::Row, parent_width) {
    width = node
      .resolved_dimension(Dimension::Width)
      .resolve(parent_width)
      + node.margin_for_axis(FlexDirection::Row, parent_width);
    width_measure_mode = MeasureMode::Exactly;
  } else if node.style().max_dimensions.width.resolve(parent_width) >= 0.0 {
    width = node.style().max_dimensions.width.resolve(parent_width);
    width_measure_mode = MeasureMode::AtMost;
  } else {
    width = parent_width;
    width_measure_mode = if is_undefined(width) {
      MeasureMode::Undefined
    } else {
      MeasureMode::Exactly
    };
  }

  let height;
  let height_measure_mode;
  if node.is_style_dim_defined(FlexDirection::Column, parent_height) {
    height = node
      .resolved_dimension(Dimension::Height)
      .resolve(parent_height)
      + node.margin_for_axis(FlexDirection::Column, parent_width);
    height_measure_mode = MeasureMode::Exactly;
  } else if node.style().max_dimensions.height.resolve(parent_height) >= 0.0 {
    height = node.style().max_dimensions.height.resolve(parent_height);
    height_measure_mode = MeasureMode::AtMost;
  } else {
    height = parent_height;
    height_measure_mode = if is_undefined(height) {
      MeasureMode::Undefined
    } else {
      MeasureMode::Exactly
    };
  }

  let config = node.config();
  if layout_node_internal(
    node,
    width,
    height,
    parent_direction,
    width_measure_mode,
    height_measure_mode,
    parent_width,
    parent_height,
    true,
    "initial",
    &config,
  ) {
    let direction = node.layout().direction;
    node.set_position(direction, parent_width, parent_height, parent_width);
    round_to_pixel_grid(node, config.point_scale_factor(), 0.0, 0.0);
  }

  // Migration aid: rerun the layout on a clone with the legacy stretch
  // branch disabled and record whether the results differ.
  if config.should_diff_layout_without_legacy_stretch_behaviour()
    && node.layout_did_use_legacy_flag()
  {
    let original = node.deep_clone();
    original.resolve_dimension();
    original.mark_dirty_propagate_downwards();
    bump_generation();
    original.set_and_propagate_use_legacy_flag(false);
    let original_config = original.config();
    if layout_node_internal(
      &original,
      width,
      height,
      parent_direction,
      width_measure_mode,
      height_measure_mode,
      parent_width,
      parent_height,
      true,
      "initial",
      &original_config,
    ) {
      let direction = original.layout().direction;
      original.set_position(direction, parent_width, parent_height, parent_width);
      round_to_pixel_grid(&original, original_config.point_scale_factor(), 0.0, 0.0);
      let differs = !original.is_layout_tree_equal_to(node);
      node.layout_mut().does_legacy_stretch_flag_affects_layout = differs;
    }
  }
}
