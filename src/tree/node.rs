//! Tree nodes
//!
//! A [`Node`] is a cheap-to-clone handle (`Rc`-backed) to one node of the
//! layout tree. Children own forward references; the parent link is a
//! non-owning `Weak` and doubles as the ownership signal for the
//! copy-on-write idiom: a parent owns its children exactly when their
//! parent pointers point back at it. A tree sharing children with an older
//! snapshot clones them on first mutation
//! ([`Node::clone_children_if_needed`]).
//!
//! Style mutation marks the node and every ancestor dirty; the layout
//! driver is the only thing that clears dirtiness.

use crate::config::{Config, ConfigRef, LogLevel};
use crate::error::{Result, TreeError};
use crate::geometry::Size;
use crate::style::types::{
  Dimension, Direction, Edge, FlexDirection, MeasureMode, NodeType, PositionType, Unit,
};
use crate::style::values::{is_undefined, Value, UNDEFINED};
use crate::style::Style;
use crate::tree::layout::Layout;
use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

/// Sizes a leaf with external content:
/// `(node, width, width_mode, height, height_mode) -> size`.
/// Called with content-box inner sizes; must return finite, non-negative
/// numbers.
pub type MeasureFunc = Rc<dyn Fn(&Node, f32, MeasureMode, f32, MeasureMode) -> Size>;

/// Returns the ascent in points of a node given its measured size
pub type BaselineFunc = Rc<dyn Fn(&Node, f32, f32) -> f32>;

/// Observes the clean-to-dirty transition of a node
pub type DirtiedFunc = Rc<dyn Fn(&Node)>;

const DEFAULT_FLEX_GROW: f32 = 0.0;
const DEFAULT_FLEX_SHRINK: f32 = 0.0;
const WEB_DEFAULT_FLEX_SHRINK: f32 = 1.0;

pub(crate) struct NodeData {
  pub(crate) style: Style,
  pub(crate) layout: Layout,
  pub(crate) line_index: usize,
  pub(crate) parent: Weak<RefCell<NodeData>>,
  pub(crate) children: Vec<Node>,
  pub(crate) config: ConfigRef,
  pub(crate) measure: Option<MeasureFunc>,
  pub(crate) baseline: Option<BaselineFunc>,
  pub(crate) dirtied: Option<DirtiedFunc>,
  pub(crate) is_dirty: bool,
  pub(crate) has_new_layout: bool,
  pub(crate) node_type: NodeType,
  pub(crate) resolved_dimensions: [Value; 2],
}

impl NodeData {
  fn new(config: ConfigRef) -> Self {
    let style = if config.use_web_defaults() {
      Style::web_default()
    } else {
      Style::default()
    };
    Self {
      style,
      layout: Layout::default(),
      line_index: 0,
      parent: Weak::new(),
      children: Vec::new(),
      config,
      measure: None,
      baseline: None,
      dirtied: None,
      is_dirty: false,
      has_new_layout: true,
      node_type: NodeType::Default,
      resolved_dimensions: [Value::UNDEFINED, Value::UNDEFINED],
    }
  }
}

/// A handle to one node of the layout tree
///
/// Cloning the handle does not clone the node; equality is identity.
#[derive(Clone)]
pub struct Node(pub(crate) Rc<RefCell<NodeData>>);

impl PartialEq for Node {
  fn eq(&self, other: &Self) -> bool {
    Rc::ptr_eq(&self.0, &other.0)
  }
}

impl std::fmt::Debug for Node {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let data = self.0.borrow();
    f.debug_struct("Node")
      .field("children", &data.children.len())
      .field("is_dirty", &data.is_dirty)
      .field("node_type", &data.node_type)
      .finish_non_exhaustive()
  }
}

impl Default for Node {
  fn default() -> Self {
    Self::new()
  }
}

impl Node {
  /// Creates a detached node using the shared default config
  pub fn new() -> Self {
    Self::with_config(Config::shared_default())
  }

  /// Creates a detached node sharing `config`
  pub fn with_config(config: ConfigRef) -> Self {
    Node(Rc::new(RefCell::new(NodeData::new(config))))
  }

  pub fn config(&self) -> ConfigRef {
    Rc::clone(&self.0.borrow().config)
  }

  pub fn set_config(&self, config: ConfigRef) {
    self.0.borrow_mut().config = config;
  }

  // --- style ---

  /// A copy of the node's style
  pub fn style(&self) -> Style {
    self.0.borrow().style.clone()
  }

  /// Replaces the style, dirtying the tree when it changed by value
  pub fn set_style(&self, style: Style) {
    let changed = self.0.borrow().style != style;
    if changed {
      self.0.borrow_mut().style = style;
      self.mark_dirty_and_propagate();
    }
  }

  /// Copies another node's style onto this one (dirtying only on change)
  pub fn copy_style(&self, source: &Node) {
    let style = source.style();
    self.set_style(style);
  }

  // --- callbacks ---

  /// Installs or clears the measure callback. Fallible variant of
  /// [`Node::set_measure_func`].
  pub fn try_set_measure_func(&self, measure: Option<MeasureFunc>) -> Result<()> {
    match measure {
      None => {
        let mut data = self.0.borrow_mut();
        data.measure = None;
        data.node_type = NodeType::Default;
      }
      Some(func) => {
        {
          let data = self.0.borrow();
          if !data.children.is_empty() {
            return Err(TreeError::MeasureFuncOnNonLeaf);
          }
        }
        let mut data = self.0.borrow_mut();
        data.measure = Some(func);
        data.node_type = NodeType::Text;
      }
    }
    Ok(())
  }

  /// Installs or clears the measure callback; a node with one is a text
  /// leaf and can never take children. Panics if the node has children.
  pub fn set_measure_func(&self, measure: Option<MeasureFunc>) {
    if let Err(err) = self.try_set_measure_func(measure) {
      self.fatal(&err);
    }
  }

  pub fn has_measure_func(&self) -> bool {
    self.0.borrow().measure.is_some()
  }

  pub(crate) fn measure_func(&self) -> Option<MeasureFunc> {
    self.0.borrow().measure.clone()
  }

  pub fn set_baseline_func(&self, baseline: Option<BaselineFunc>) {
    self.0.borrow_mut().baseline = baseline;
  }

  pub fn has_baseline_func(&self) -> bool {
    self.0.borrow().baseline.is_some()
  }

  pub(crate) fn baseline_func(&self) -> Option<BaselineFunc> {
    self.0.borrow().baseline.clone()
  }

  /// Installs the dirtied observer, invoked once per clean-to-dirty
  /// transition
  pub fn set_dirtied_func(&self, dirtied: Option<DirtiedFunc>) {
    self.0.borrow_mut().dirtied = dirtied;
  }

  pub fn node_type(&self) -> NodeType {
    self.0.borrow().node_type
  }

  pub fn set_node_type(&self, node_type: NodeType) {
    self.0.borrow_mut().node_type = node_type;
  }

  // --- tree structure ---

  /// Attaches `child` at `index`. Fallible variant of
  /// [`Node::insert_child`].
  pub fn try_insert_child(&self, child: &Node, index: usize) -> Result<()> {
    if child.parent().is_some() {
      return Err(TreeError::ChildAlreadyAttached);
    }
    if self.has_measure_func() {
      return Err(TreeError::ChildUnderMeasureNode);
    }

    self.clone_children_if_needed();
    self.0.borrow_mut().children.insert(index, child.clone());
    child.0.borrow_mut().parent = Rc::downgrade(&self.0);
    self.mark_dirty_and_propagate();
    Ok(())
  }

  /// Attaches `child` at `index`; the child must be detached and this node
  /// must not have a measure callback. Panics otherwise.
  pub fn insert_child(&self, child: &Node, index: usize) {
    if let Err(err) = self.try_insert_child(child, index) {
      self.fatal(&err);
    }
  }

  /// Detaches `child`.
  ///
  /// When this node owns its children the child is removed in place and its
  /// layout invalidated. When the children are shared with an older
  /// snapshot, every child but the excluded one is cloned into a fresh
  /// owned list (the excluded child stays valid in the other tree).
  pub fn remove_child(&self, excluded: &Node) {
    let child_count = self.child_count();
    if child_count == 0 {
      return;
    }

    let owns_children = {
      let data = self.0.borrow();
      data.children[0].is_child_of(self)
    };

    if owns_children {
      let removed = {
        let mut data = self.0.borrow_mut();
        let before = data.children.len();
        data.children.retain(|c| c != excluded);
        data.children.len() != before
      };
      if removed {
        {
          let mut child_data = excluded.0.borrow_mut();
          child_data.layout = Layout::default();
          child_data.parent = Weak::new();
        }
        self.mark_dirty_and_propagate();
      }
      return;
    }

    // Shared child list: clone all children except the excluded one rather
    // than cloning the full list and deleting from the copy.
    let cloned_func = self.config().cloned_func();
    let old_children = self.children();
    let mut new_children = Vec::with_capacity(child_count.saturating_sub(1));
    for old_child in &old_children {
      if old_child == excluded {
        // Still valid in the snapshot tree; this parent just no longer
        // lists it.
        self.mark_dirty_and_propagate();
        continue;
      }
      let new_child = old_child.clone_node();
      new_child.0.borrow_mut().parent = Rc::downgrade(&self.0);
      if let Some(func) = &cloned_func {
        func(old_child, &new_child, self, new_children.len());
      }
      new_children.push(new_child);
    }
    self.0.borrow_mut().children = new_children;
  }

  /// Detaches every child. Owned children have their layout invalidated;
  /// a shared child list is simply dropped.
  pub fn remove_all_children(&self) {
    let child_count = self.child_count();
    if child_count == 0 {
      return;
    }

    let owns_children = {
      let data = self.0.borrow();
      data.children[0].is_child_of(self)
    };

    if owns_children {
      for child in self.children() {
        let mut child_data = child.0.borrow_mut();
        child_data.layout = Layout::default();
        child_data.parent = Weak::new();
      }
    }
    self.0.borrow_mut().children.clear();
    self.mark_dirty_and_propagate();
  }

  pub fn child(&self, index: usize) -> Option<Node> {
    self.0.borrow().children.get(index).cloned()
  }

  pub fn child_count(&self) -> usize {
    self.0.borrow().children.len()
  }

  /// Snapshot of the child handles
  pub fn children(&self) -> Vec<Node> {
    self.0.borrow().children.clone()
  }

  pub fn parent(&self) -> Option<Node> {
    self.0.borrow().parent.upgrade().map(Node)
  }

  fn is_child_of(&self, candidate: &Node) -> bool {
    self
      .0
      .borrow()
      .parent
      .upgrade()
      .map_or(false, |p| Rc::ptr_eq(&p, &candidate.0))
  }

  /// Restores default state, keeping the config. Fallible variant of
  /// [`Node::reset`].
  pub fn try_reset(&self) -> Result<()> {
    {
      let data = self.0.borrow();
      if !data.children.is_empty() {
        return Err(TreeError::ResetNodeWithChildren);
      }
      if data.parent.upgrade().is_some() {
        return Err(TreeError::ResetAttachedNode);
      }
    }
    let config = self.config();
    *self.0.borrow_mut() = NodeData::new(config);
    Ok(())
  }

  /// Restores default state, keeping the config. Panics when the node still
  /// has children or a parent.
  pub fn reset(&self) {
    if let Err(err) = self.try_reset() {
      self.fatal(&err);
    }
  }

  // --- dirtiness ---

  pub fn is_dirty(&self) -> bool {
    self.0.borrow().is_dirty
  }

  /// Marks a measured leaf dirty because its external content changed.
  /// Fallible variant of [`Node::mark_dirty`].
  pub fn try_mark_dirty(&self) -> Result<()> {
    if !self.has_measure_func() {
      return Err(TreeError::DirtyNonMeasuredNode);
    }
    self.mark_dirty_and_propagate();
    Ok(())
  }

  /// Marks a measured leaf dirty because its external content changed.
  /// Panics on nodes without a measure callback; everything else is dirtied
  /// automatically by style and tree mutation.
  pub fn mark_dirty(&self) {
    if let Err(err) = self.try_mark_dirty() {
      self.fatal(&err);
    }
  }

  /// Force-dirties this node and every descendant
  pub fn mark_dirty_propagate_downwards(&self) {
    self.0.borrow_mut().is_dirty = true;
    for child in self.children() {
      child.mark_dirty_propagate_downwards();
    }
  }

  pub(crate) fn set_dirty(&self, dirty: bool) {
    let dirtied = {
      let mut data = self.0.borrow_mut();
      if data.is_dirty == dirty {
        return;
      }
      data.is_dirty = dirty;
      if dirty {
        data.dirtied.clone()
      } else {
        None
      }
    };
    if let Some(func) = dirtied {
      func(self);
    }
  }

  pub(crate) fn mark_dirty_and_propagate(&self) {
    if !self.is_dirty() {
      self.set_dirty(true);
      self.0.borrow_mut().layout.computed_flex_basis = UNDEFINED;
      if let Some(parent) = self.parent() {
        parent.mark_dirty_and_propagate();
      }
    }
  }

  /// True after the engine recomputed this node's layout; cleared by the
  /// host once it consumed the new values
  pub fn has_new_layout(&self) -> bool {
    self.0.borrow().has_new_layout
  }

  pub fn set_has_new_layout(&self, has_new_layout: bool) {
    self.0.borrow_mut().has_new_layout = has_new_layout;
  }

  // --- cloning ---

  /// Copies the node's data into a detached clone that shares the child
  /// handles; the children still claim the original as parent, so the
  /// clone's first mutation (or layout) copies them on write. This is the
  /// snapshot half of the snapshot-and-layout-diff idiom.
  pub fn clone_node(&self) -> Node {
    let data = self.0.borrow();
    Node(Rc::new(RefCell::new(NodeData {
      style: data.style.clone(),
      layout: data.layout.clone(),
      line_index: data.line_index,
      parent: Weak::new(),
      children: data.children.clone(),
      config: Rc::clone(&data.config),
      measure: data.measure.clone(),
      baseline: data.baseline.clone(),
      dirtied: data.dirtied.clone(),
      is_dirty: data.is_dirty,
      has_new_layout: data.has_new_layout,
      node_type: data.node_type,
      resolved_dimensions: data.resolved_dimensions,
    })))
  }

  /// Recursively clones the subtree, duplicating configs so the clone can
  /// be reconfigured independently (used by the legacy-stretch diff)
  pub(crate) fn deep_clone(&self) -> Node {
    let clone = self.clone_node();
    clone.set_config(self.config().duplicate());
    let children: Vec<Node> = self
      .children()
      .iter()
      .map(|child| {
        let child_clone = child.deep_clone();
        child_clone.0.borrow_mut().parent = Rc::downgrade(&clone.0);
        child_clone
      })
      .collect();
    clone.0.borrow_mut().children = children;
    clone
  }

  /// Replaces a shared child list with owned clones. A child list is shared
  /// when the first child's parent pointer targets another node (the
  /// snapshot that originally built it); all siblings are assumed to share
  /// that state.
  pub(crate) fn clone_children_if_needed(&self) {
    let needs_clone = {
      let data = self.0.borrow();
      match data.children.first() {
        None => false,
        Some(first) => !first.is_child_of(self),
      }
    };
    if !needs_clone {
      return;
    }

    let cloned_func = self.config().cloned_func();
    let old_children = self.children();
    let mut new_children = Vec::with_capacity(old_children.len());
    for (index, old_child) in old_children.iter().enumerate() {
      let new_child = old_child.clone_node();
      new_child.0.borrow_mut().parent = Rc::downgrade(&self.0);
      if let Some(func) = &cloned_func {
        func(old_child, &new_child, self, index);
      }
      new_children.push(new_child);
    }
    self.0.borrow_mut().children = new_children;
  }

  // --- resolved style accessors used by the layout passes ---

  pub(crate) fn line_index(&self) -> usize {
    self.0.borrow().line_index
  }

  pub(crate) fn set_line_index(&self, line_index: usize) {
    self.0.borrow_mut().line_index = line_index;
  }

  pub(crate) fn leading_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
    let data = self.0.borrow();
    if axis.is_row() {
      let position = data.style.position.computed(Edge::Start, Value::UNDEFINED);
      if position.is_defined() {
        return position.resolve(axis_size);
      }
    }
    let position = data
      .style
      .position
      .computed(axis.leading_edge(), Value::UNDEFINED);
    if position.is_defined() {
      position.resolve(axis_size)
    } else {
      0.0
    }
  }

  pub(crate) fn trailing_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
    let data = self.0.borrow();
    if axis.is_row() {
      let position = data.style.position.computed(Edge::End, Value::UNDEFINED);
      if position.is_defined() {
        return position.resolve(axis_size);
      }
    }
    let position = data
      .style
      .position
      .computed(axis.trailing_edge(), Value::UNDEFINED);
    if position.is_defined() {
      position.resolve(axis_size)
    } else {
      0.0
    }
  }

  pub(crate) fn is_leading_position_defined(&self, axis: FlexDirection) -> bool {
    let data = self.0.borrow();
    (axis.is_row()
      && data
        .style
        .position
        .computed(Edge::Start, Value::UNDEFINED)
        .is_defined())
      || data
        .style
        .position
        .computed(axis.leading_edge(), Value::UNDEFINED)
        .is_defined()
  }

  pub(crate) fn is_trailing_position_defined(&self, axis: FlexDirection) -> bool {
    let data = self.0.borrow();
    (axis.is_row()
      && data
        .style
        .position
        .computed(Edge::End, Value::UNDEFINED)
        .is_defined())
      || data
        .style
        .position
        .computed(axis.trailing_edge(), Value::UNDEFINED)
        .is_defined()
  }

  pub(crate) fn leading_margin(&self, axis: FlexDirection, width_size: f32) -> f32 {
    let data = self.0.borrow();
    if axis.is_row() && data.style.margin[Edge::Start].is_defined() {
      return data.style.margin[Edge::Start].resolve_margin(width_size);
    }
    data
      .style
      .margin
      .computed(axis.leading_edge(), Value::ZERO)
      .resolve_margin(width_size)
  }

  pub(crate) fn trailing_margin(&self, axis: FlexDirection, width_size: f32) -> f32 {
    let data = self.0.borrow();
    if axis.is_row() && data.style.margin[Edge::End].is_defined() {
      return data.style.margin[Edge::End].resolve_margin(width_size);
    }
    data
      .style
      .margin
      .computed(axis.trailing_edge(), Value::ZERO)
      .resolve_margin(width_size)
  }

  pub(crate) fn margin_for_axis(&self, axis: FlexDirection, width_size: f32) -> f32 {
    self.leading_margin(axis, width_size) + self.trailing_margin(axis, width_size)
  }

  /// Raw style value of the leading margin, for auto-margin detection
  pub(crate) fn margin_leading_value(&self, axis: FlexDirection) -> Value {
    let data = self.0.borrow();
    if axis.is_row() && data.style.margin[Edge::Start].is_defined() {
      data.style.margin[Edge::Start]
    } else {
      data.style.margin[axis.leading_edge()]
    }
  }

  pub(crate) fn margin_trailing_value(&self, axis: FlexDirection) -> Value {
    let data = self.0.borrow();
    if axis.is_row() && data.style.margin[Edge::End].is_defined() {
      data.style.margin[Edge::End]
    } else {
      data.style.margin[axis.trailing_edge()]
    }
  }

  pub(crate) fn leading_border(&self, axis: FlexDirection) -> f32 {
    let data = self.0.borrow();
    if axis.is_row()
      && data.style.border[Edge::Start].is_defined()
      && data.style.border[Edge::Start].value >= 0.0
    {
      return data.style.border[Edge::Start].value;
    }
    data
      .style
      .border
      .computed(axis.leading_edge(), Value::ZERO)
      .value
      .max(0.0)
  }

  pub(crate) fn trailing_border(&self, axis: FlexDirection) -> f32 {
    let data = self.0.borrow();
    if axis.is_row()
      && data.style.border[Edge::End].is_defined()
      && data.style.border[Edge::End].value >= 0.0
    {
      return data.style.border[Edge::End].value;
    }
    data
      .style
      .border
      .computed(axis.trailing_edge(), Value::ZERO)
      .value
      .max(0.0)
  }

  pub(crate) fn leading_padding(&self, axis: FlexDirection, width_size: f32) -> f32 {
    let data = self.0.borrow();
    if axis.is_row() && data.style.padding[Edge::Start].is_defined() {
      let resolved = data.style.padding[Edge::Start].resolve(width_size);
      if resolved >= 0.0 {
        return resolved;
      }
    }
    data
      .style
      .padding
      .computed(axis.leading_edge(), Value::ZERO)
      .resolve(width_size)
      .max(0.0)
  }

  pub(crate) fn trailing_padding(&self, axis: FlexDirection, width_size: f32) -> f32 {
    let data = self.0.borrow();
    if axis.is_row() && data.style.padding[Edge::End].is_defined() {
      let resolved = data.style.padding[Edge::End].resolve(width_size);
      if resolved >= 0.0 {
        return resolved;
      }
    }
    data
      .style
      .padding
      .computed(axis.trailing_edge(), Value::ZERO)
      .resolve(width_size)
      .max(0.0)
  }

  pub(crate) fn leading_padding_and_border(&self, axis: FlexDirection, width_size: f32) -> f32 {
    self.leading_padding(axis, width_size) + self.leading_border(axis)
  }

  pub(crate) fn trailing_padding_and_border(&self, axis: FlexDirection, width_size: f32) -> f32 {
    self.trailing_padding(axis, width_size) + self.trailing_border(axis)
  }

  pub(crate) fn padding_and_border_for_axis(&self, axis: FlexDirection, width_size: f32) -> f32 {
    self.leading_padding_and_border(axis, width_size)
      + self.trailing_padding_and_border(axis, width_size)
  }

  // --- flex factor resolution ---

  pub(crate) fn resolve_flex_grow(&self) -> f32 {
    // The root can never flex.
    if self.parent().is_none() {
      return 0.0;
    }
    let data = self.0.borrow();
    if !is_undefined(data.style.flex_grow) {
      return data.style.flex_grow;
    }
    if !is_undefined(data.style.flex) && data.style.flex > 0.0 {
      return data.style.flex;
    }
    DEFAULT_FLEX_GROW
  }

  pub(crate) fn resolve_flex_shrink(&self) -> f32 {
    if self.parent().is_none() {
      return 0.0;
    }
    let data = self.0.borrow();
    if !is_undefined(data.style.flex_shrink) {
      return data.style.flex_shrink;
    }
    let web_defaults = data.config.use_web_defaults();
    if !web_defaults && !is_undefined(data.style.flex) && data.style.flex < 0.0 {
      return -data.style.flex;
    }
    if web_defaults {
      WEB_DEFAULT_FLEX_SHRINK
    } else {
      DEFAULT_FLEX_SHRINK
    }
  }

  pub(crate) fn resolve_flex_basis(&self) -> Value {
    let data = self.0.borrow();
    let flex_basis = data.style.flex_basis;
    if flex_basis.unit != Unit::Auto && flex_basis.unit != Unit::Undefined {
      return flex_basis;
    }
    if !is_undefined(data.style.flex) && data.style.flex > 0.0 {
      return if data.config.use_web_defaults() {
        Value::AUTO
      } else {
        Value::ZERO
      };
    }
    Value::AUTO
  }

  /// The node's effective direction: its own unless `Inherit`, else the
  /// parent's resolved direction, defaulting to LTR at the root
  pub(crate) fn resolve_direction(&self, parent_direction: Direction) -> Direction {
    let style_direction = self.0.borrow().style.direction;
    if style_direction == Direction::Inherit {
      if parent_direction != Direction::Inherit {
        parent_direction
      } else {
        Direction::Ltr
      }
    } else {
      style_direction
    }
  }

  pub(crate) fn is_node_flexible(&self) -> bool {
    self.0.borrow().style.position_type == PositionType::Relative
      && (self.resolve_flex_grow() != 0.0 || self.resolve_flex_shrink() != 0.0)
  }

  // --- resolved dimensions ---

  /// Refreshes `resolved_dimensions`: equal min/max bounds win over the
  /// styled dimension
  pub(crate) fn resolve_dimension(&self) {
    let mut data = self.0.borrow_mut();
    for dim in [Dimension::Width, Dimension::Height] {
      let max = data.style.max_dimensions.get(dim);
      let min = data.style.min_dimensions.get(dim);
      let resolved = if max.is_defined() && max == min {
        max
      } else {
        data.style.dimensions.get(dim)
      };
      data.resolved_dimensions[dim as usize] = resolved;
    }
  }

  pub(crate) fn resolved_dimension(&self, dimension: Dimension) -> Value {
    self.0.borrow().resolved_dimensions[dimension as usize]
  }

  /// A style dimension is definite when it resolves to a usable
  /// non-negative number under the given parent size
  pub(crate) fn is_style_dim_defined(&self, axis: FlexDirection, parent_size: f32) -> bool {
    let resolved = self.resolved_dimension(axis.dimension());
    !(resolved.unit == Unit::Auto
      || resolved.unit == Unit::Undefined
      || (resolved.unit == Unit::Point && resolved.value < 0.0)
      || (resolved.unit == Unit::Percent
        && (resolved.value < 0.0 || is_undefined(parent_size))))
  }

  pub(crate) fn is_layout_dim_defined(&self, axis: FlexDirection) -> bool {
    let value = self.measured_dimension(axis.dimension());
    !is_undefined(value) && value >= 0.0
  }

  // --- positions ---

  /// Offset of a relatively positioned node: leading position wins, else
  /// the negated trailing position
  pub(crate) fn relative_position(&self, axis: FlexDirection, axis_size: f32) -> f32 {
    if self.is_leading_position_defined(axis) {
      self.leading_position(axis, axis_size)
    } else {
      -self.trailing_position(axis, axis_size)
    }
  }

  /// Writes the initial leading/trailing positions (margin plus relative
  /// offset) for both axes
  pub(crate) fn set_position(
    &self,
    direction: Direction,
    main_size: f32,
    cross_size: f32,
    parent_width: f32,
  ) {
    // Root nodes are always laid out LTR so positions stay non-negative.
    let direction_respecting_root = if self.parent().is_some() {
      direction
    } else {
      Direction::Ltr
    };
    let flex_direction = self.0.borrow().style.flex_direction;
    let main_axis = flex_direction.resolve(direction_respecting_root);
    let cross_axis = main_axis.cross(direction_respecting_root);

    let relative_main = self.relative_position(main_axis, main_size);
    let relative_cross = self.relative_position(cross_axis, cross_size);

    let leading_main = self.leading_margin(main_axis, parent_width) + relative_main;
    let trailing_main = self.trailing_margin(main_axis, parent_width) + relative_main;
    let leading_cross = self.leading_margin(cross_axis, parent_width) + relative_cross;
    let trailing_cross = self.trailing_margin(cross_axis, parent_width) + relative_cross;

    let mut data = self.0.borrow_mut();
    data.layout.position[main_axis.leading_edge() as usize] = leading_main;
    data.layout.position[main_axis.trailing_edge() as usize] = trailing_main;
    data.layout.position[cross_axis.leading_edge() as usize] = leading_cross;
    data.layout.position[cross_axis.trailing_edge() as usize] = trailing_cross;
  }

  // --- layout data access ---

  pub(crate) fn layout(&self) -> Ref<'_, Layout> {
    Ref::map(self.0.borrow(), |data| &data.layout)
  }

  pub(crate) fn layout_mut(&self) -> RefMut<'_, Layout> {
    RefMut::map(self.0.borrow_mut(), |data| &mut data.layout)
  }

  pub(crate) fn measured_dimension(&self, dimension: Dimension) -> f32 {
    self.0.borrow().layout.measured_dimensions[dimension as usize]
  }

  pub(crate) fn set_measured_dimension(&self, dimension: Dimension, value: f32) {
    self.0.borrow_mut().layout.measured_dimensions[dimension as usize] = value;
  }

  /// Measured size plus both margins along an axis
  pub(crate) fn dim_with_margin(&self, axis: FlexDirection, width_size: f32) -> f32 {
    self.measured_dimension(axis.dimension())
      + self.leading_margin(axis, width_size)
      + self.trailing_margin(axis, width_size)
  }

  // --- public layout results ---

  /// Computes the layout of this tree. Positions, dimensions, and resolved
  /// edges are readable from every node afterwards.
  pub fn calculate_layout(&self, parent_width: f32, parent_height: f32, direction: Direction) {
    crate::layout::calculate_layout(self, parent_width, parent_height, direction);
  }

  pub fn layout_left(&self) -> f32 {
    self.0.borrow().layout.position[Edge::Left as usize]
  }

  pub fn layout_top(&self) -> f32 {
    self.0.borrow().layout.position[Edge::Top as usize]
  }

  pub fn layout_right(&self) -> f32 {
    self.0.borrow().layout.position[Edge::Right as usize]
  }

  pub fn layout_bottom(&self) -> f32 {
    self.0.borrow().layout.position[Edge::Bottom as usize]
  }

  pub fn layout_width(&self) -> f32 {
    self.0.borrow().layout.dimensions[Dimension::Width as usize]
  }

  pub fn layout_height(&self) -> f32 {
    self.0.borrow().layout.dimensions[Dimension::Height as usize]
  }

  pub fn layout_direction(&self) -> Direction {
    self.0.borrow().layout.direction
  }

  pub fn layout_had_overflow(&self) -> bool {
    self.0.borrow().layout.had_overflow
  }

  /// Resolved margin for a physical edge; `start`/`end` map through the
  /// resolved direction
  pub fn layout_margin(&self, edge: Edge) -> f32 {
    self.resolved_layout_edge(edge, |layout| &layout.margin)
  }

  /// Resolved border for a physical edge
  pub fn layout_border(&self, edge: Edge) -> f32 {
    self.resolved_layout_edge(edge, |layout| &layout.border)
  }

  /// Resolved padding for a physical edge
  pub fn layout_padding(&self, edge: Edge) -> f32 {
    self.resolved_layout_edge(edge, |layout| &layout.padding)
  }

  fn resolved_layout_edge(&self, edge: Edge, select: fn(&Layout) -> &[f32; 6]) -> f32 {
    if (edge as usize) > Edge::End as usize {
      self.fatal_msg("Cannot get layout properties of multi-edge shorthands");
    }
    let data = self.0.borrow();
    let values = select(&data.layout);
    let rtl = data.layout.direction == Direction::Rtl;
    match edge {
      Edge::Left => {
        if rtl {
          values[Edge::End as usize]
        } else {
          values[Edge::Start as usize]
        }
      }
      Edge::Right => {
        if rtl {
          values[Edge::Start as usize]
        } else {
          values[Edge::End as usize]
        }
      }
      other => values[other as usize],
    }
  }

  /// Whether the last layout took the legacy stretch branch anywhere in
  /// this subtree
  pub fn layout_did_use_legacy_flag(&self) -> bool {
    if self.0.borrow().layout.did_use_legacy_flag {
      return true;
    }
    self
      .children()
      .iter()
      .any(|child| child.0.borrow().layout.did_use_legacy_flag)
  }

  /// Result of the legacy-stretch diff rerun: true when the legacy flag
  /// changed this tree's layout
  pub fn layout_does_legacy_stretch_flag_affect_layout(&self) -> bool {
    self.0.borrow().layout.does_legacy_stretch_flag_affects_layout
  }

  // --- legacy-stretch diff support ---

  pub(crate) fn set_and_propagate_use_legacy_flag(&self, use_legacy: bool) {
    self.config().set_use_legacy_stretch_behaviour(use_legacy);
    for child in self.children() {
      child.config().set_use_legacy_stretch_behaviour(use_legacy);
    }
  }

  pub(crate) fn is_layout_tree_equal_to(&self, other: &Node) -> bool {
    if self.child_count() != other.child_count() {
      return false;
    }
    if *self.layout() != *other.layout() {
      return false;
    }
    self
      .children()
      .iter()
      .zip(other.children().iter())
      .all(|(a, b)| a.is_layout_tree_equal_to(b))
  }

  // --- fatal reporting ---

  fn fatal(&self, err: &TreeError) -> ! {
    self.fatal_msg(&err.to_string());
  }

  pub(crate) fn fatal_msg(&self, message: &str) -> ! {
    let config = self.config();
    config.log(LogLevel::Fatal, message);
    panic!("{message}");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::style::types::Align;

  #[test]
  fn insert_and_remove_child() {
    let parent = Node::new();
    let child = Node::new();
    parent.insert_child(&child, 0);
    assert_eq!(parent.child_count(), 1);
    assert_eq!(child.parent(), Some(parent.clone()));

    parent.remove_child(&child);
    assert_eq!(parent.child_count(), 0);
    assert!(child.parent().is_none());
  }

  #[test]
  fn insert_attached_child_errors() {
    let a = Node::new();
    let b = Node::new();
    let child = Node::new();
    a.insert_child(&child, 0);
    assert_eq!(
      b.try_insert_child(&child, 0),
      Err(TreeError::ChildAlreadyAttached)
    );
  }

  #[test]
  fn measure_nodes_refuse_children() {
    let leaf = Node::new();
    leaf.set_measure_func(Some(Rc::new(|_, _, _, _, _| Size::new(10.0, 10.0))));
    assert_eq!(leaf.node_type(), NodeType::Text);
    let child = Node::new();
    assert_eq!(
      leaf.try_insert_child(&child, 0),
      Err(TreeError::ChildUnderMeasureNode)
    );

    let parent = Node::new();
    parent.insert_child(&Node::new(), 0);
    assert_eq!(
      parent.try_set_measure_func(Some(Rc::new(|_, _, _, _, _| Size::ZERO))),
      Err(TreeError::MeasureFuncOnNonLeaf)
    );
  }

  #[test]
  fn clearing_measure_func_resets_node_type() {
    let leaf = Node::new();
    leaf.set_measure_func(Some(Rc::new(|_, _, _, _, _| Size::ZERO)));
    leaf.set_measure_func(None);
    assert_eq!(leaf.node_type(), NodeType::Default);
  }

  #[test]
  fn style_mutation_dirties_ancestors() {
    let root = Node::new();
    let middle = Node::new();
    let leaf = Node::new();
    root.insert_child(&middle, 0);
    middle.insert_child(&leaf, 0);
    root.calculate_layout(100.0, 100.0, Direction::Ltr);
    assert!(!root.is_dirty());

    let mut style = leaf.style();
    style.flex_grow = 1.0;
    leaf.set_style(style);
    assert!(leaf.is_dirty());
    assert!(middle.is_dirty());
    assert!(root.is_dirty());
  }

  #[test]
  fn setting_identical_style_does_not_dirty() {
    let root = Node::new();
    root.calculate_layout(100.0, 100.0, Direction::Ltr);
    let style = root.style();
    root.set_style(style);
    assert!(!root.is_dirty());
  }

  #[test]
  fn dirtied_callback_fires_once_per_transition() {
    use std::cell::Cell;
    let count = Rc::new(Cell::new(0));
    let root = Node::new();
    let counter = Rc::clone(&count);
    root.set_dirtied_func(Some(Rc::new(move |_| {
      counter.set(counter.get() + 1);
    })));
    root.calculate_layout(100.0, 100.0, Direction::Ltr);

    let mut style = root.style();
    style.align_items = Align::Center;
    root.set_style(style);
    let mut style = root.style();
    style.align_items = Align::FlexEnd;
    root.set_style(style);
    // Second mutation happens while already dirty.
    assert_eq!(count.get(), 1);
  }

  #[test]
  fn reset_requires_detached_leaf() {
    let parent = Node::new();
    let child = Node::new();
    parent.insert_child(&child, 0);
    assert_eq!(parent.try_reset(), Err(TreeError::ResetNodeWithChildren));
    assert_eq!(child.try_reset(), Err(TreeError::ResetAttachedNode));

    parent.remove_child(&child);
    assert!(child.try_reset().is_ok());
  }

  #[test]
  fn mark_dirty_requires_measure_func() {
    let node = Node::new();
    assert_eq!(node.try_mark_dirty(), Err(TreeError::DirtyNonMeasuredNode));
    node.set_measure_func(Some(Rc::new(|_, _, _, _, _| Size::ZERO)));
    assert!(node.try_mark_dirty().is_ok());
  }

  #[test]
  fn shared_children_are_cloned_on_mutation() {
    use std::cell::Cell;
    let cloned_calls = Rc::new(Cell::new(0));
    let config = Config::new();
    let calls = Rc::clone(&cloned_calls);
    config.set_cloned_func(Some(Rc::new(move |_, _, _, _| {
      calls.set(calls.get() + 1);
    })));

    let original = Node::with_config(Rc::clone(&config));
    let a = Node::with_config(Rc::clone(&config));
    let b = Node::with_config(Rc::clone(&config));
    original.insert_child(&a, 0);
    original.insert_child(&b, 1);

    // Snapshot shares the children; it does not own them.
    let snapshot = original.clone_node();
    assert_eq!(snapshot.child_count(), 2);
    assert_eq!(snapshot.child(0), Some(a.clone()));

    snapshot.clone_children_if_needed();
    assert_eq!(cloned_calls.get(), 2);
    assert_ne!(snapshot.child(0), Some(a.clone()));
    assert_eq!(snapshot.child(0).unwrap().parent(), Some(snapshot.clone()));
    // The original still owns the untouched children.
    assert_eq!(original.child(0), Some(a));
  }

  #[test]
  fn remove_child_from_shared_list_clones_remaining() {
    let original = Node::new();
    let a = Node::new();
    let b = Node::new();
    original.insert_child(&a, 0);
    original.insert_child(&b, 1);

    let snapshot = original.clone_node();
    snapshot.remove_child(&a);
    assert_eq!(snapshot.child_count(), 1);
    // The remaining child was cloned and re-parented; b is untouched.
    assert_ne!(snapshot.child(0), Some(b.clone()));
    assert_eq!(b.parent(), Some(original.clone()));
    assert_eq!(a.parent(), Some(original));
  }

  #[test]
  fn resolve_dimension_prefers_equal_min_max() {
    let node = Node::new();
    let mut style = node.style();
    style.dimensions.width = Value::point(50.0);
    style.min_dimensions.width = Value::point(80.0);
    style.max_dimensions.width = Value::point(80.0);
    node.set_style(style);
    node.resolve_dimension();
    assert_eq!(node.resolved_dimension(Dimension::Width), Value::point(80.0));
    assert_eq!(node.resolved_dimension(Dimension::Height), Value::AUTO);
  }

  #[test]
  fn flex_factor_resolution_uses_flex_shorthand() {
    let parent = Node::new();
    let child = Node::new();
    parent.insert_child(&child, 0);

    let mut style = child.style();
    style.flex = 2.0;
    child.set_style(style);
    assert_eq!(child.resolve_flex_grow(), 2.0);
    assert_eq!(child.resolve_flex_shrink(), 0.0);

    let mut style = child.style();
    style.flex = -3.0;
    child.set_style(style);
    assert_eq!(child.resolve_flex_grow(), 0.0);
    assert_eq!(child.resolve_flex_shrink(), 3.0);

    // The root never flexes.
    let mut style = parent.style();
    style.flex_grow = 1.0;
    parent.set_style(style);
    assert_eq!(parent.resolve_flex_grow(), 0.0);
  }
}
