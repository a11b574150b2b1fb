//! Right-to-left layout: reversed row axes and bidi-aware edges.

use flexlayout::{Direction, Edge, FlexDirection, Node, Style, Value};

fn row_root(width: f32, height: f32) -> Node {
  let node = Node::new();
  let mut style = Style::default();
  style.flex_direction = FlexDirection::Row;
  style.dimensions.width = Value::point(width);
  style.dimensions.height = Value::point(height);
  node.set_style(style);
  node
}

fn fixed_child(width: f32) -> Node {
  let node = Node::new();
  let mut style = Style::default();
  style.dimensions.width = Value::point(width);
  node.set_style(style);
  node
}

#[test]
fn rtl_row_starts_at_the_right_edge() {
  let root = row_root(100.0, 50.0);
  let first = fixed_child(30.0);
  let second = fixed_child(30.0);
  root.insert_child(&first, 0);
  root.insert_child(&second, 1);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Rtl);

  assert_eq!(root.layout_direction(), Direction::Rtl);
  assert_eq!(first.layout_left(), 70.0);
  assert_eq!(second.layout_left(), 40.0);
}

#[test]
fn direction_is_inherited_and_overridable() {
  let root = row_root(100.0, 50.0);
  let inheriting = fixed_child(30.0);
  let overriding = fixed_child(30.0);
  let mut style = overriding.style();
  style.direction = Direction::Ltr;
  overriding.set_style(style);
  root.insert_child(&inheriting, 0);
  root.insert_child(&overriding, 1);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Rtl);

  assert_eq!(inheriting.layout_direction(), Direction::Rtl);
  assert_eq!(overriding.layout_direction(), Direction::Ltr);
}

#[test]
fn start_edge_margin_follows_the_writing_direction() {
  for (direction, expected_left) in [(Direction::Ltr, 10.0), (Direction::Rtl, 60.0)] {
    let root = row_root(100.0, 50.0);
    let child = fixed_child(30.0);
    let mut style = child.style();
    style.margin[Edge::Start] = Value::point(10.0);
    child.set_style(style);
    root.insert_child(&child, 0);

    root.calculate_layout(f32::NAN, f32::NAN, direction);
    assert_eq!(child.layout_left(), expected_left, "{direction:?}");
  }
}

#[test]
fn start_position_overrides_physical_left_in_rows() {
  let root = row_root(100.0, 50.0);
  let child = fixed_child(30.0);
  let mut style = child.style();
  style.position[Edge::Left] = Value::point(5.0);
  style.position[Edge::Start] = Value::point(20.0);
  child.set_style(style);
  root.insert_child(&child, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert_eq!(child.layout_left(), 20.0);
}

#[test]
fn layout_margin_getter_resolves_start_end_under_rtl() {
  let root = row_root(100.0, 50.0);
  let mut style = root.style();
  style.margin[Edge::Start] = Value::point(7.0);
  style.margin[Edge::End] = Value::point(3.0);
  root.set_style(style);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Rtl);

  assert_eq!(root.layout_margin(Edge::Right), 7.0);
  assert_eq!(root.layout_margin(Edge::Left), 3.0);
}
