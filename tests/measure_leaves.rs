//! Measure-callback leaves and the per-node measurement cache.

use flexlayout::{
  Align, Direction, FlexDirection, MeasureMode, Node, Size, Style, Value, Wrap,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn row_root(width: f32, height: f32) -> Node {
  let node = Node::new();
  let mut style = Style::default();
  style.flex_direction = FlexDirection::Row;
  style.align_items = Align::FlexStart;
  style.dimensions.width = Value::point(width);
  style.dimensions.height = Value::point(height);
  node.set_style(style);
  node
}

/// A text-like measure: fills the given width, wrapping onto 10-point rows
/// of 100 points of content.
fn wrapping_text_measure(calls: Rc<Cell<usize>>) -> flexlayout::MeasureFunc {
  Rc::new(move |_, width, width_mode, _, _| {
    calls.set(calls.get() + 1);
    let content_width = 100.0;
    let line_height = 10.0;
    let width = match width_mode {
      MeasureMode::Undefined => content_width,
      MeasureMode::Exactly => width,
      MeasureMode::AtMost => width.min(content_width),
    };
    let lines = (content_width / width).ceil().max(1.0);
    Size::new(width, lines * line_height)
  })
}

#[test]
fn measure_leaf_sizes_to_its_content() {
  let calls = Rc::new(Cell::new(0));
  let root = row_root(200.0, 100.0);
  let text = Node::new();
  text.set_measure_func(Some(wrapping_text_measure(Rc::clone(&calls))));
  root.insert_child(&text, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  assert_eq!(text.layout_width(), 100.0);
  assert_eq!(text.layout_height(), 10.0);
  assert!(calls.get() >= 1);
}

#[test]
fn narrow_container_wraps_the_measured_text() {
  let calls = Rc::new(Cell::new(0));
  let root = row_root(50.0, 100.0);
  let text = Node::new();
  text.set_measure_func(Some(wrapping_text_measure(Rc::clone(&calls))));
  root.insert_child(&text, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  assert_eq!(text.layout_width(), 50.0);
  assert_eq!(text.layout_height(), 20.0);
}

#[test]
fn unchanged_tree_reuses_cached_measurements() {
  let calls = Rc::new(Cell::new(0));
  let root = row_root(200.0, 100.0);
  let text = Node::new();
  text.set_measure_func(Some(wrapping_text_measure(Rc::clone(&calls))));
  root.insert_child(&text, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  let calls_after_first = calls.get();

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert_eq!(calls.get(), calls_after_first, "second layout re-measured");
}

#[test]
fn mark_dirty_forces_a_remeasure() {
  let calls = Rc::new(Cell::new(0));
  let root = row_root(200.0, 100.0);
  let text = Node::new();
  text.set_measure_func(Some(wrapping_text_measure(Rc::clone(&calls))));
  root.insert_child(&text, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  let calls_after_first = calls.get();

  text.mark_dirty();
  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  assert!(calls.get() > calls_after_first);
}

#[test]
fn measure_modes_reflect_the_constraints() {
  let seen = Rc::new(RefCell::new(Vec::new()));
  let root = row_root(200.0, 100.0);
  let text = Node::new();
  let log = Rc::clone(&seen);
  text.set_measure_func(Some(Rc::new(move |_, w, wm, h, hm| {
    log.borrow_mut().push((w, wm, h, hm));
    Size::new(40.0, 10.0)
  })));
  root.insert_child(&text, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  let calls = seen.borrow();
  assert!(!calls.is_empty());
  let (w, wm, _, hm) = calls[0];
  // The row offers its inner width as an upper bound; the height is
  // unconstrained at the flex-basis stage.
  assert_eq!(wm, MeasureMode::AtMost);
  assert_eq!(w, 200.0);
  assert_eq!(hm, MeasureMode::AtMost);
}

#[test]
fn growing_text_leaf_is_measured_with_exact_final_size() {
  let root = row_root(300.0, 100.0);
  let text = Node::new();
  let mut style = text.style();
  style.flex_grow = 1.0;
  text.set_style(style);
  let final_widths = Rc::new(RefCell::new(Vec::new()));
  let log = Rc::clone(&final_widths);
  text.set_measure_func(Some(Rc::new(move |_, w, wm, _, _| {
    if wm == MeasureMode::Exactly {
      log.borrow_mut().push(w);
    }
    Size::new(if w.is_nan() { 20.0 } else { w }, 10.0)
  })));
  root.insert_child(&text, 0);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  assert_eq!(text.layout_width(), 300.0);
}

#[test]
fn deeper_trees_only_remeasure_what_changed() {
  let stable_calls = Rc::new(Cell::new(0));
  let dirty_calls = Rc::new(Cell::new(0));

  let root = row_root(300.0, 100.0);
  let mut style = root.style();
  style.flex_wrap = Wrap::NoWrap;
  root.set_style(style);

  let stable = Node::new();
  stable.set_measure_func(Some(wrapping_text_measure(Rc::clone(&stable_calls))));
  let dirty = Node::new();
  dirty.set_measure_func(Some(wrapping_text_measure(Rc::clone(&dirty_calls))));
  root.insert_child(&stable, 0);
  root.insert_child(&dirty, 1);

  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);
  let stable_after_first = stable_calls.get();

  dirty.mark_dirty();
  root.calculate_layout(f32::NAN, f32::NAN, Direction::Ltr);

  assert_eq!(stable_calls.get(), stable_after_first);
}
