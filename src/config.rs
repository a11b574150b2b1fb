//! Layout configuration
//!
//! A [`Config`] is shared between nodes via [`ConfigRef`] and carries the
//! knobs that change engine behavior globally: the pixel scale factor used
//! by rounding, web-style defaults, the legacy stretch flag and its diff
//! aid, experimental features, the copy-on-write cloned callback, and an
//! optional host logger.
//!
//! Knobs are interior-mutable so a config already attached to a tree can
//! still be adjusted between layouts.

use crate::tree::node::Node;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Shared handle to a [`Config`]
pub type ConfigRef = Rc<Config>;

/// Invoked once per child copied by the copy-on-write path:
/// `(old_child, new_child, parent, child_index)`
pub type ClonedFunc = Rc<dyn Fn(&Node, &Node, &Node, usize)>;

/// Host log sink; receives every message the engine emits
pub type Logger = Rc<dyn Fn(LogLevel, &str)>;

/// Severity of an engine log message
///
/// `Fatal` messages are followed by a panic: they report violated
/// structural preconditions the engine cannot continue past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
  Error,
  Warn,
  Info,
  Debug,
  Verbose,
  Fatal,
}

/// Opt-in behaviors that deviate from the engine's defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExperimentalFeature {
  /// Re-measure flex basis once per generation, matching web engines
  WebFlexBasis = 0,
}

const EXPERIMENTAL_FEATURE_COUNT: usize = 1;

/// Engine-wide configuration shared by the nodes of a tree
pub struct Config {
  experimental_features: [Cell<bool>; EXPERIMENTAL_FEATURE_COUNT],
  use_web_defaults: Cell<bool>,
  use_legacy_stretch_behaviour: Cell<bool>,
  should_diff_layout_without_legacy_stretch_behaviour: Cell<bool>,
  point_scale_factor: Cell<f32>,
  cloned: RefCell<Option<ClonedFunc>>,
  logger: RefCell<Option<Logger>>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      experimental_features: [Cell::new(false)],
      use_web_defaults: Cell::new(false),
      use_legacy_stretch_behaviour: Cell::new(false),
      should_diff_layout_without_legacy_stretch_behaviour: Cell::new(false),
      point_scale_factor: Cell::new(1.0),
      cloned: RefCell::new(None),
      logger: RefCell::new(None),
    }
  }
}

thread_local! {
  static DEFAULT_CONFIG: ConfigRef = Rc::new(Config::default());
}

impl Config {
  /// Creates a fresh config with default settings
  pub fn new() -> ConfigRef {
    Rc::new(Self::default())
  }

  /// The shared default config used by [`Node::new`]
  pub fn shared_default() -> ConfigRef {
    DEFAULT_CONFIG.with(Rc::clone)
  }

  /// Copies the current settings into a new, unshared config
  pub fn duplicate(&self) -> ConfigRef {
    let copy = Config::default();
    for (dst, src) in copy
      .experimental_features
      .iter()
      .zip(self.experimental_features.iter())
    {
      dst.set(src.get());
    }
    copy.use_web_defaults.set(self.use_web_defaults.get());
    copy
      .use_legacy_stretch_behaviour
      .set(self.use_legacy_stretch_behaviour.get());
    copy
      .should_diff_layout_without_legacy_stretch_behaviour
      .set(self.should_diff_layout_without_legacy_stretch_behaviour.get());
    copy.point_scale_factor.set(self.point_scale_factor.get());
    *copy.cloned.borrow_mut() = self.cloned.borrow().clone();
    *copy.logger.borrow_mut() = self.logger.borrow().clone();
    Rc::new(copy)
  }

  pub fn set_experimental_feature_enabled(&self, feature: ExperimentalFeature, enabled: bool) {
    self.experimental_features[feature as usize].set(enabled);
  }

  pub fn is_experimental_feature_enabled(&self, feature: ExperimentalFeature) -> bool {
    self.experimental_features[feature as usize].get()
  }

  /// Web defaults flip the flex direction to row, stretch content lines,
  /// and default flex-shrink to 1
  pub fn set_use_web_defaults(&self, enabled: bool) {
    self.use_web_defaults.set(enabled);
  }

  pub fn use_web_defaults(&self) -> bool {
    self.use_web_defaults.get()
  }

  pub fn set_use_legacy_stretch_behaviour(&self, enabled: bool) {
    self.use_legacy_stretch_behaviour.set(enabled);
  }

  pub fn use_legacy_stretch_behaviour(&self) -> bool {
    self.use_legacy_stretch_behaviour.get()
  }

  /// When set, every layout that touched the legacy stretch branch is rerun
  /// on a deep clone with the flag off and the difference recorded; a
  /// testing aid for migrating off the legacy behavior
  pub fn set_should_diff_layout_without_legacy_stretch_behaviour(&self, enabled: bool) {
    self
      .should_diff_layout_without_legacy_stretch_behaviour
      .set(enabled);
  }

  pub fn should_diff_layout_without_legacy_stretch_behaviour(&self) -> bool {
    self.should_diff_layout_without_legacy_stretch_behaviour.get()
  }

  /// Sets how many pixels one point maps to; rounding snaps layout to
  /// multiples of `1 / factor`. Zero disables rounding. Negative factors
  /// are a fatal precondition violation.
  pub fn set_point_scale_factor(&self, pixels_in_point: f32) {
    if pixels_in_point < 0.0 {
      self.fatal("Scale factor should not be less than zero");
    }
    self.point_scale_factor.set(pixels_in_point);
  }

  pub fn point_scale_factor(&self) -> f32 {
    self.point_scale_factor.get()
  }

  pub fn set_cloned_func(&self, cloned: Option<ClonedFunc>) {
    *self.cloned.borrow_mut() = cloned;
  }

  pub(crate) fn cloned_func(&self) -> Option<ClonedFunc> {
    self.cloned.borrow().clone()
  }

  /// Installs a host logger; `None` restores the default `tracing` sink
  pub fn set_logger(&self, logger: Option<Logger>) {
    *self.logger.borrow_mut() = logger;
  }

  /// Emits a log message through the host logger when present, else the
  /// matching `tracing` level
  pub(crate) fn log(&self, level: LogLevel, message: &str) {
    if let Some(logger) = self.logger.borrow().as_ref() {
      logger(level, message);
      return;
    }
    match level {
      LogLevel::Fatal | LogLevel::Error => tracing::error!("{message}"),
      LogLevel::Warn => tracing::warn!("{message}"),
      LogLevel::Info => tracing::info!("{message}"),
      LogLevel::Debug => tracing::debug!("{message}"),
      LogLevel::Verbose => tracing::trace!("{message}"),
    }
  }

  /// Reports a fatal precondition violation and aborts the layout by
  /// panicking
  pub(crate) fn fatal(&self, message: &str) -> ! {
    self.log(LogLevel::Fatal, message);
    panic!("{message}");
  }
}

impl std::fmt::Debug for Config {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Config")
      .field("use_web_defaults", &self.use_web_defaults.get())
      .field(
        "use_legacy_stretch_behaviour",
        &self.use_legacy_stretch_behaviour.get(),
      )
      .field("point_scale_factor", &self.point_scale_factor.get())
      .finish_non_exhaustive()
  }
}
