//! Measurement cache reuse predicates
//!
//! A cached `(mode, available size) -> computed size` entry can satisfy a
//! new sizing request in more cases than an exact match: an exact request
//! that happens to equal the previous answer, a fit-content request roomier
//! than a previous unconstrained answer, or a stricter fit-content request
//! the previous answer still fits. Width and height must both be
//! compatible for a hit.

use crate::config::Config;
use crate::layout::rounding::round_value_to_pixel_grid;
use crate::style::types::MeasureMode;
use crate::style::values::floats_equal;
use crate::tree::layout::CachedMeasurement;

fn size_is_exact_and_matches_old_measured(
  mode: MeasureMode,
  size: f32,
  last_computed_size: f32,
) -> bool {
  mode == MeasureMode::Exactly && floats_equal(size, last_computed_size)
}

fn old_size_is_unspecified_and_still_fits(
  mode: MeasureMode,
  size: f32,
  last_mode: MeasureMode,
  last_computed_size: f32,
) -> bool {
  mode == MeasureMode::AtMost
    && last_mode == MeasureMode::Undefined
    && (size >= last_computed_size || floats_equal(size, last_computed_size))
}

fn new_size_is_stricter_and_still_valid(
  mode: MeasureMode,
  size: f32,
  last_mode: MeasureMode,
  last_size: f32,
  last_computed_size: f32,
) -> bool {
  last_mode == MeasureMode::AtMost
    && mode == MeasureMode::AtMost
    && last_size > size
    && (last_computed_size <= size || floats_equal(size, last_computed_size))
}

/// Whether `cached` answers a request of `(width_mode, width)` x
/// `(height_mode, height)`. Sizes are compared on the pixel grid when the
/// config has a non-zero scale factor.
pub(crate) fn can_use_cached_measurement(
  width_mode: MeasureMode,
  width: f32,
  height_mode: MeasureMode,
  height: f32,
  cached: &CachedMeasurement,
  margin_row: f32,
  margin_column: f32,
  config: &Config,
) -> bool {
  if cached.computed_width < 0.0 || cached.computed_height < 0.0 {
    return false;
  }
  let (Some(last_width_mode), Some(last_height_mode)) =
    (cached.width_measure_mode, cached.height_measure_mode)
  else {
    return false;
  };

  let scale = config.point_scale_factor();
  let use_rounded_comparison = scale != 0.0;
  let on_grid = |value: f32| {
    if use_rounded_comparison {
      round_value_to_pixel_grid(value, scale, false, false)
    } else {
      value
    }
  };

  let effective_width = on_grid(width);
  let effective_height = on_grid(height);
  let effective_last_width = on_grid(cached.available_width);
  let effective_last_height = on_grid(cached.available_height);

  let has_same_width_spec =
    last_width_mode == width_mode && floats_equal(effective_last_width, effective_width);
  let has_same_height_spec =
    last_height_mode == height_mode && floats_equal(effective_last_height, effective_height);

  let width_is_compatible = has_same_width_spec
    || size_is_exact_and_matches_old_measured(width_mode, width - margin_row, cached.computed_width)
    || old_size_is_unspecified_and_still_fits(
      width_mode,
      width - margin_row,
      last_width_mode,
      cached.computed_width,
    )
    || new_size_is_stricter_and_still_valid(
      width_mode,
      width - margin_row,
      last_width_mode,
      cached.available_width,
      cached.computed_width,
    );

  let height_is_compatible = has_same_height_spec
    || size_is_exact_and_matches_old_measured(
      height_mode,
      height - margin_column,
      cached.computed_height,
    )
    || old_size_is_unspecified_and_still_fits(
      height_mode,
      height - margin_column,
      last_height_mode,
      cached.computed_height,
    )
    || new_size_is_stricter_and_still_valid(
      height_mode,
      height - margin_column,
      last_height_mode,
      cached.available_height,
      cached.computed_height,
    );

  width_is_compatible && height_is_compatible
}
