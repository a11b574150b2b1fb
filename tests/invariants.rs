//! Engine-wide invariants: idempotence, dirtiness bookkeeping, containment,
//! and pixel-grid rounding.

use flexlayout::{Config, Direction, Edge, FlexDirection, Node, Style, Value, Wrap};
use std::rc::Rc;

fn build_sample_tree() -> (Node, Vec<Node>) {
  let root = Node::new();
  let mut style = Style::default();
  style.flex_direction = FlexDirection::Row;
  style.flex_wrap = Wrap::Wrap;
  style.dimensions.width = Value::point(240.0);
  style.dimensions.height = Value::point(120.0);
  style.padding[Edge::All] = Value::point(4.0);
  root.set_style(style);

  let mut all = vec![root.clone()];
  for i in 0..4 {
    let child = Node::new();
    let mut child_style = Style::default();
    child_style.flex_grow = (i % 2) as f32;
    child_style.dimensions.width = Value::point(50.0 + 10.0 * i as f32);
    child_style.margin[Edge::All] = Value::point(2.0);
    child.set_style(child_style);
    root.insert_child(&child, i);
    all.push(child);
  }
  (root, all)
}

fn snapshot(nodes: &[Node]) -> Vec<(f32, f32, f32, f32)> {
  nodes
    .iter()
    .map(|n| {
      (
        n.layout_left(),
        n.layout_top(),
        n.layout_width(),
        n.layout_height(),
      )
    })
    .collect()
}

#[test]
fn relayout_of_an_unchanged_tree_is_identical() {
  let (root, all) = build_sample_tree();
  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  let first = snapshot(&all);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  let second = snapshot(&all);

  assert_eq!(first, second);
}

#[test]
fn no_node_is_dirty_after_layout() {
  let (root, all) = build_sample_tree();
  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  for node in &all {
    assert!(!node.is_dirty());
  }

  // Dirty the deepest child and confirm layout cleans the whole tree again.
  let mut style = all[2].style();
  style.flex_grow = 3.0;
  all[2].set_style(style);
  assert!(root.is_dirty());

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  for node in &all {
    assert!(!node.is_dirty());
  }
}

#[test]
fn has_new_layout_is_set_by_the_engine_and_cleared_by_the_host() {
  let (root, all) = build_sample_tree();
  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert!(root.has_new_layout());
  for node in &all {
    node.set_has_new_layout(false);
  }
  assert!(!root.has_new_layout());
}

#[test]
fn in_flow_children_stay_inside_the_parent_when_nothing_overflows() {
  let (root, all) = build_sample_tree();
  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert!(!root.layout_had_overflow());

  let parent_width = root.layout_width();
  let parent_height = root.layout_height();
  for child in &all[1..] {
    assert!(child.layout_left() >= 0.0);
    assert!(child.layout_top() >= 0.0);
    assert!(child.layout_left() + child.layout_width() <= parent_width + 0.0001);
    assert!(child.layout_top() + child.layout_height() <= parent_height + 0.0001);
  }
}

#[test]
fn line_positions_accumulate_child_sizes_and_margins() {
  let root = Node::new();
  let mut style = Style::default();
  style.flex_direction = FlexDirection::Row;
  style.dimensions.width = Value::point(300.0);
  style.dimensions.height = Value::point(50.0);
  root.set_style(style);

  let widths = [30.0, 50.0, 20.0];
  let margin = 5.0;
  let children: Vec<Node> = widths
    .iter()
    .enumerate()
    .map(|(i, width)| {
      let child = Node::new();
      let mut child_style = Style::default();
      child_style.dimensions.width = Value::point(*width);
      child_style.margin[Edge::Horizontal] = Value::point(margin);
      child.set_style(child_style);
      root.insert_child(&child, i);
      child
    })
    .collect();

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  let mut expected_left = margin;
  for (child, width) in children.iter().zip(widths) {
    assert_eq!(child.layout_left(), expected_left);
    expected_left += width + 2.0 * margin;
  }
}

#[test]
fn rounding_snaps_every_edge_to_the_pixel_grid() {
  let scale = 2.0;
  let config = Config::new();
  config.set_point_scale_factor(scale);

  let root = Node::with_config(Rc::clone(&config));
  let mut style = Style::default();
  style.flex_direction = FlexDirection::Row;
  style.dimensions.width = Value::point(100.0);
  style.dimensions.height = Value::point(20.3);
  root.set_style(style);

  // Three equal-grow children over 100 points cannot split evenly.
  let children: Vec<Node> = (0..3)
    .map(|i| {
      let child = Node::with_config(Rc::clone(&config));
      let mut child_style = Style::default();
      child_style.flex_grow = 1.0;
      child.set_style(child_style);
      root.insert_child(&child, i);
      child
    })
    .collect();

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  let assert_on_grid = |value: f32| {
    let scaled = value * scale;
    assert!(
      (scaled - scaled.round()).abs() < 0.0001,
      "{value} is off the 1/{scale} grid"
    );
  };

  for node in std::iter::once(&root).chain(children.iter()) {
    assert_on_grid(node.layout_left());
    assert_on_grid(node.layout_top());
    assert_on_grid(node.layout_left() + node.layout_width());
    assert_on_grid(node.layout_top() + node.layout_height());
  }

  // Rounded child widths still tile the full container.
  let total: f32 = children.iter().map(|c| c.layout_width()).sum();
  assert_eq!(total, 100.0);
}

#[test]
fn zero_scale_factor_disables_rounding() {
  let config = Config::new();
  config.set_point_scale_factor(0.0);

  let root = Node::with_config(Rc::clone(&config));
  let mut style = Style::default();
  style.flex_direction = FlexDirection::Row;
  style.dimensions.width = Value::point(100.0);
  style.dimensions.height = Value::point(30.0);
  root.set_style(style);

  let children: Vec<Node> = (0..3)
    .map(|i| {
      let child = Node::with_config(Rc::clone(&config));
      let mut child_style = Style::default();
      child_style.flex_grow = 1.0;
      child.set_style(child_style);
      root.insert_child(&child, i);
      child
    })
    .collect();

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  // 100/3 stays fractional.
  let width = children[0].layout_width();
  assert!((width - 100.0 / 3.0).abs() < 0.001);
}
