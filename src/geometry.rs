//! Core geometry types
//!
//! The engine works in abstract points; hosts decide what a point means
//! (typically CSS pixels scaled by the configured point scale factor).
//! The coordinate system has its origin at the top-left corner: positive X
//! extends to the right, positive Y extends downward.

use std::fmt;

/// A 2D size in points
///
/// Returned by measure callbacks and used for measured dimensions.
/// Either component may be `NAN` to mean "undefined" while a measurement is
/// still being negotiated, but a measure callback must return finite,
/// non-negative components.
///
/// # Examples
///
/// ```
/// use flexlayout::Size;
///
/// let size = Size::new(100.0, 50.0);
/// assert_eq!(size.width, 100.0);
/// assert_eq!(size.height, 50.0);
/// assert_eq!(Size::ZERO, Size::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
  /// Horizontal extent
  pub width: f32,
  /// Vertical extent
  pub height: f32,
}

impl Size {
  /// The zero size
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}x{}", self.width, self.height)
  }
}
