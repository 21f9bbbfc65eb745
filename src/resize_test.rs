use uuid::Uuid;

use super::*;
use crate::factory::create_element;
use crate::input::Tool;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn make(tool: Tool, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
    create_element(tool, Uuid::new_v4(), x1, y1, x2, y2, None).unwrap()
}

fn pencil(points: &[(f64, f64)]) -> Element {
    let mut e = make(Tool::Pencil, points[0].0, points[0].1, points[0].0, points[0].1);
    e.set_points(points.iter().map(|&(x, y)| Point::new(x, y)).collect());
    e
}

fn anchors(e: &Element) -> (f64, f64, f64, f64) {
    (e.x1, e.y1, e.x2, e.y2)
}

// =============================================================
// Move
// =============================================================

#[test]
fn move_keeps_grab_offset() {
    let r = make(Tool::Rectangle, 10.0, 10.0, 50.0, 30.0);
    let offsets = MoveOffsets::capture(&r, Point::new(20.0, 15.0));
    let moved = offsets.apply(&r, Point::new(120.0, 115.0));
    assert_eq!(anchors(&moved), (110.0, 110.0, 150.0, 130.0));
}

#[test]
fn move_to_grab_point_is_identity() {
    let r = make(Tool::Line, 0.0, 0.0, 30.0, 40.0);
    let offsets = MoveOffsets::capture(&r, Point::new(15.0, 20.0));
    assert_eq!(offsets.apply(&r, Point::new(15.0, 20.0)), r);
}

#[test]
fn move_pencil_shifts_every_point() {
    let p = pencil(&[(0.0, 0.0), (10.0, 5.0), (20.0, 0.0)]);
    let offsets = MoveOffsets::capture(&p, Point::new(10.0, 5.0));
    let moved = offsets.apply(&p, Point::new(15.0, 10.0));
    assert_eq!(
        moved.points().unwrap(),
        [Point::new(5.0, 5.0), Point::new(15.0, 10.0), Point::new(25.0, 5.0)]
    );
    assert_eq!(anchors(&moved), (5.0, 5.0, 25.0, 10.0));
}

// =============================================================
// Rectangle / Ellipse / Diamond
// =============================================================

#[test]
fn bottom_right_drag_sets_second_anchor() {
    let r = make(Tool::Rectangle, 10.0, 20.0, 100.0, 100.0);
    let out = resize(&r, Position::Corner(Corner::BottomRight), Point::new(150.0, 130.0)).unwrap();
    assert_eq!(anchors(&out), (10.0, 20.0, 150.0, 130.0));
}

#[test]
fn top_left_drag_clamps_at_opposite_corner() {
    let r = make(Tool::Ellipse, 0.0, 0.0, 100.0, 100.0);
    let out = resize(&r, Position::Corner(Corner::TopLeft), Point::new(150.0, 20.0)).unwrap();
    assert_eq!(anchors(&out), (100.0, 20.0, 100.0, 100.0));
}

#[test]
fn top_right_and_bottom_left_keep_opposite_corner() {
    let d = make(Tool::Diamond, 0.0, 0.0, 100.0, 100.0);
    let tr = resize(&d, Position::Corner(Corner::TopRight), Point::new(120.0, -10.0)).unwrap();
    assert_eq!(anchors(&tr), (0.0, -10.0, 120.0, 100.0));
    let bl = resize(&d, Position::Corner(Corner::BottomLeft), Point::new(-5.0, 130.0)).unwrap();
    assert_eq!(anchors(&bl), (-5.0, 0.0, 100.0, 130.0));
}

#[test]
fn reversed_anchors_are_normalized_before_resize() {
    let r = make(Tool::Rectangle, 100.0, 100.0, 0.0, 0.0);
    let out = resize(&r, Position::Corner(Corner::BottomRight), Point::new(150.0, 150.0)).unwrap();
    assert_eq!(anchors(&out), (0.0, 0.0, 150.0, 150.0));
}

#[test]
fn inside_is_not_a_resize_handle() {
    let r = make(Tool::Rectangle, 0.0, 0.0, 10.0, 10.0);
    let err = resize(&r, Position::Inside, Point::new(5.0, 5.0)).unwrap_err();
    assert_eq!(err, ContractError::InvalidCorner("inside".into()));
}

// =============================================================
// Line / Arrow
// =============================================================

#[test]
fn line_corners_map_to_endpoint_coordinates() {
    let l = make(Tool::Line, 0.0, 0.0, 100.0, 50.0);
    let c = Point::new(7.0, 9.0);
    assert_eq!(anchors(&resize(&l, Position::Corner(Corner::TopLeft), c).unwrap()), (7.0, 9.0, 100.0, 50.0));
    assert_eq!(anchors(&resize(&l, Position::Corner(Corner::BottomRight), c).unwrap()), (0.0, 0.0, 7.0, 9.0));
    assert_eq!(anchors(&resize(&l, Position::Corner(Corner::TopRight), c).unwrap()), (0.0, 9.0, 7.0, 50.0));
    assert_eq!(anchors(&resize(&l, Position::Corner(Corner::BottomLeft), c).unwrap()), (7.0, 0.0, 100.0, 9.0));
}

#[test]
fn arrow_head_follows_resized_tip() {
    let a = make(Tool::Arrow, 0.0, 0.0, 100.0, 0.0);
    let out = resize(&a, Position::Corner(Corner::BottomRight), Point::new(0.0, 100.0)).unwrap();
    let [tip, ..] = out.head_points().unwrap();
    assert_eq!(tip, Point::new(0.0, 100.0));
}

// =============================================================
// Pencil
// =============================================================

#[test]
fn pencil_scales_non_uniformly_from_anchor() {
    let p = pencil(&[(0.0, 0.0), (10.0, 10.0)]);
    let out = resize(&p, Position::Corner(Corner::BottomRight), Point::new(20.0, 10.0)).unwrap();
    assert_eq!(out.points().unwrap(), [Point::new(0.0, 0.0), Point::new(20.0, 10.0)]);
    assert_eq!(anchors(&out), (0.0, 0.0, 20.0, 10.0));
}

#[test]
fn scale_points_remaps_around_anchor() {
    let pts = [Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
    assert_eq!(scale_points(&pts, Point::new(0.0, 0.0), 2.0, 1.0), vec![Point::new(0.0, 0.0), Point::new(20.0, 10.0)]);
}

#[test]
fn pencil_top_left_anchors_bottom_right() {
    let p = pencil(&[(10.0, 10.0), (20.0, 20.0)]);
    let out = resize(&p, Position::Corner(Corner::TopLeft), Point::new(0.0, 0.0)).unwrap();
    assert_eq!(out.points().unwrap(), [Point::new(0.0, 0.0), Point::new(20.0, 20.0)]);
}

#[test]
fn flat_pencil_keeps_collapsed_axis() {
    let p = pencil(&[(0.0, 5.0), (10.0, 5.0)]);
    let out = resize(&p, Position::Corner(Corner::BottomRight), Point::new(30.0, 50.0)).unwrap();
    assert_eq!(out.points().unwrap(), [Point::new(0.0, 5.0), Point::new(30.0, 5.0)]);
}

#[test]
fn pencil_rejects_inside() {
    let p = pencil(&[(0.0, 0.0), (10.0, 10.0)]);
    assert!(resize(&p, Position::Inside, Point::new(1.0, 1.0)).is_err());
}

// =============================================================
// Text
// =============================================================

#[test]
fn text_width_drag_scales_font() {
    let mut t = create_element(Tool::Text, Uuid::new_v4(), 0.0, 0.0, 48.0, 16.0, Some("hello\nworld")).unwrap();
    t.x2 = 48.0;
    let out = resize(&t, Position::Corner(Corner::BottomRight), Point::new(96.0, 0.0)).unwrap();
    let size = out.text_data().unwrap().font_size;
    assert!(approx_eq(size, 32.0));
    assert!(approx_eq(out.x2, 96.0));
    assert!(approx_eq(out.y2, 64.0));
}

#[test]
fn text_font_never_collapses() {
    let t = create_element(Tool::Text, Uuid::new_v4(), 0.0, 0.0, 48.0, 16.0, Some("hello")).unwrap();
    let out = resize(&t, Position::Corner(Corner::BottomRight), Point::new(-20.0, 0.0)).unwrap();
    assert!(approx_eq(out.text_data().unwrap().font_size, MIN_FONT_SIZE));
}

#[test]
fn zero_width_text_keeps_font_size() {
    let t = create_element(Tool::Text, Uuid::new_v4(), 5.0, 5.0, 5.0, 5.0, Some("x")).unwrap();
    let out = resize(&t, Position::Corner(Corner::BottomRight), Point::new(50.0, 0.0)).unwrap();
    assert!(approx_eq(out.text_data().unwrap().font_size, 16.0));
    assert!(approx_eq(out.x2, 50.0));
}
