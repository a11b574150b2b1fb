//! Min/max bounds interacting with flexible-length resolution.

use flexlayout::{Direction, FlexDirection, Node, Style, Value};

fn approx(a: f32, b: f32) -> bool {
  (a - b).abs() < 0.001
}

fn row_root(width: f32, height: f32) -> Node {
  let node = Node::new();
  let mut style = Style::default();
  style.flex_direction = FlexDirection::Row;
  style.dimensions.width = Value::point(width);
  style.dimensions.height = Value::point(height);
  node.set_style(style);
  node
}

#[test]
fn max_width_freezes_a_grower_and_redistributes() {
  let root = row_root(200.0, 50.0);
  let capped = Node::new();
  let mut style = Style::default();
  style.flex_grow = 1.0;
  style.max_dimensions.width = Value::point(50.0);
  capped.set_style(style);

  let free = Node::new();
  let mut style = Style::default();
  style.flex_grow = 1.0;
  free.set_style(style);

  root.insert_child(&capped, 0);
  root.insert_child(&free, 1);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  assert_eq!(capped.layout_width(), 50.0);
  assert_eq!(free.layout_width(), 150.0);
  assert_eq!(free.layout_left(), 50.0);
}

#[test]
fn min_width_holds_a_shrinker_and_squeezes_the_rest() {
  let root = row_root(100.0, 50.0);
  let held = Node::new();
  let mut style = Style::default();
  style.dimensions.width = Value::point(80.0);
  style.min_dimensions.width = Value::point(70.0);
  style.flex_shrink = 1.0;
  held.set_style(style);

  let squeezed = Node::new();
  let mut style = Style::default();
  style.dimensions.width = Value::point(80.0);
  style.flex_shrink = 1.0;
  squeezed.set_style(style);

  root.insert_child(&held, 0);
  root.insert_child(&squeezed, 1);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  assert_eq!(held.layout_width(), 70.0);
  assert!(approx(squeezed.layout_width(), 30.0));
}

#[test]
fn shrink_factors_scale_with_the_flex_basis() {
  let root = row_root(100.0, 50.0);
  let wide = Node::new();
  let mut style = Style::default();
  style.dimensions.width = Value::point(80.0);
  style.flex_shrink = 1.0;
  wide.set_style(style);

  let narrow = Node::new();
  let mut style = Style::default();
  style.dimensions.width = Value::point(40.0);
  style.flex_shrink = 1.0;
  narrow.set_style(style);

  root.insert_child(&wide, 0);
  root.insert_child(&narrow, 1);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  // 20 of overflow split 2:1 by basis.
  assert!(approx(wide.layout_width(), 80.0 - 20.0 * 2.0 / 3.0));
  assert!(approx(narrow.layout_width(), 40.0 - 20.0 / 3.0));
  assert!(approx(
    wide.layout_width() + narrow.layout_width(),
    100.0
  ));
}

#[test]
fn container_min_and_max_bound_the_measured_size() {
  // Content-sized column with a max-height shorter than its content.
  let root = Node::new();
  let mut style = Style::default();
  style.dimensions.width = Value::point(100.0);
  style.max_dimensions.height = Value::point(60.0);
  root.set_style(style);

  let child = Node::new();
  let mut style = Style::default();
  style.dimensions.height = Value::point(100.0);
  child.set_style(style);
  root.insert_child(&child, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert_eq!(root.layout_height(), 60.0);

  // And a min-height taller than its content.
  let root = Node::new();
  let mut style = Style::default();
  style.dimensions.width = Value::point(100.0);
  style.min_dimensions.height = Value::point(80.0);
  root.set_style(style);

  let child = Node::new();
  let mut style = Style::default();
  style.dimensions.height = Value::point(10.0);
  child.set_style(style);
  root.insert_child(&child, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert_eq!(root.layout_height(), 80.0);
}

#[test]
fn flex_basis_is_floored_by_padding_and_border() {
  let root = row_root(200.0, 50.0);
  let child = Node::new();
  let mut style = Style::default();
  style.flex_basis = Value::point(4.0);
  style.padding[flexlayout::Edge::Left] = Value::point(10.0);
  style.padding[flexlayout::Edge::Right] = Value::point(10.0);
  child.set_style(style);
  root.insert_child(&child, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert_eq!(child.layout_width(), 20.0);
}

#[test]
fn aspect_ratio_ties_the_cross_size_to_the_flexed_main_size() {
  let root = Node::new();
  let mut style = Style::default();
  style.dimensions.width = Value::point(100.0);
  style.dimensions.height = Value::point(200.0);
  root.set_style(style);

  // Grows from a 50-point basis to the full 200-point column; the width
  // follows the final main size through the aspect ratio, not the basis.
  let child = Node::new();
  let mut style = Style::default();
  style.flex_basis = Value::point(50.0);
  style.flex_grow = 1.0;
  style.aspect_ratio = 0.5;
  child.set_style(style);
  root.insert_child(&child, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  assert_eq!(child.layout_height(), 200.0);
  assert_eq!(child.layout_width(), 100.0);
}
