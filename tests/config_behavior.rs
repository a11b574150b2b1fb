//! Config-driven behavior: web defaults, the legacy stretch flag and its
//! diff aid, and the copy-on-write cloned callback during layout.

use flexlayout::{Config, Direction, FlexDirection, Node, Style, Value};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn web_defaults_flip_direction_and_shrink() {
  let config = Config::new();
  config.set_use_web_defaults(true);

  let root = Node::with_config(Rc::clone(&config));
  let mut style = root.style();
  assert_eq!(style.flex_direction, FlexDirection::Row);
  style.dimensions.width = Value::point(100.0);
  style.dimensions.height = Value::point(50.0);
  root.set_style(style);

  // Two 80-wide children shrink (default shrink 1 on the web) to fit.
  for i in 0..2 {
    let child = Node::with_config(Rc::clone(&config));
    let mut child_style = child.style();
    child_style.dimensions.width = Value::point(80.0);
    child.set_style(child_style);
    root.insert_child(&child, i);
  }

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  let first = root.child(0).unwrap();
  let second = root.child(1).unwrap();
  assert_eq!(first.layout_width(), 50.0);
  assert_eq!(second.layout_width(), 50.0);
  assert_eq!(second.layout_left(), 50.0);
}

#[test]
fn legacy_stretch_behaviour_lets_content_sized_lines_keep_free_space() {
  // An at-most-sized column (max-height only) whose child wants to grow:
  // with the legacy flag the line keeps the full available space and the
  // child grows into it; without it the line is pinned to its consumed
  // size because the container itself cannot grow.
  let build = |use_legacy: bool| {
    let config = Config::new();
    config.set_use_legacy_stretch_behaviour(use_legacy);

    let root = Node::with_config(Rc::clone(&config));
    let mut style = root.style();
    style.dimensions.width = Value::point(100.0);
    style.max_dimensions.height = Value::point(200.0);
    root.set_style(style);

    let child = Node::with_config(Rc::clone(&config));
    let mut child_style = child.style();
    child_style.flex_grow = 1.0;
    child_style.dimensions.height = Value::point(20.0);
    child.set_style(child_style);
    root.insert_child(&child, 0);

    root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
    (root, child)
  };

  let (root, child) = build(false);
  assert_eq!(child.layout_height(), 20.0);
  assert_eq!(root.layout_height(), 20.0);
  assert!(!root.layout_did_use_legacy_flag());

  let (root, child) = build(true);
  assert_eq!(child.layout_height(), 200.0);
  assert_eq!(root.layout_height(), 200.0);
  assert!(root.layout_did_use_legacy_flag());
}

#[test]
fn legacy_diff_records_whether_the_flag_matters() {
  let config = Config::new();
  config.set_use_legacy_stretch_behaviour(true);
  config.set_should_diff_layout_without_legacy_stretch_behaviour(true);

  let root = Node::with_config(Rc::clone(&config));
  let mut style = root.style();
  style.dimensions.width = Value::point(100.0);
  style.max_dimensions.height = Value::point(200.0);
  root.set_style(style);

  let child = Node::with_config(Rc::clone(&config));
  let mut child_style = child.style();
  child_style.flex_grow = 1.0;
  child_style.dimensions.height = Value::point(20.0);
  child.set_style(child_style);
  root.insert_child(&child, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  assert!(root.layout_did_use_legacy_flag());
  assert!(root.layout_does_legacy_stretch_flag_affect_layout());
}

#[test]
fn cloned_callback_fires_when_a_shared_tree_is_laid_out() {
  let cloned_count = Rc::new(Cell::new(0));
  let config = Config::new();
  let counter = Rc::clone(&cloned_count);
  config.set_cloned_func(Some(Rc::new(move |_, _, _, _| {
    counter.set(counter.get() + 1);
  })));

  let root = Node::with_config(Rc::clone(&config));
  let mut style = root.style();
  style.dimensions.width = Value::point(100.0);
  style.dimensions.height = Value::point(100.0);
  root.set_style(style);
  for i in 0..2 {
    let child = Node::with_config(Rc::clone(&config));
    root.insert_child(&child, i);
  }
  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert_eq!(cloned_count.get(), 0);

  // A snapshot shares the children; laying it out forces the copy.
  let snapshot = root.clone_node();
  snapshot.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert_eq!(cloned_count.get(), 2);
}
