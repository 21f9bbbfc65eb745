use uuid::Uuid;

use super::*;
use crate::element::TextData;
use crate::text::MonospaceMeasure;

// =============================================================
// Helpers
// =============================================================

fn make(shape: Shape, x1: f64, y1: f64, x2: f64, y2: f64) -> Element {
    Element { id: Uuid::new_v4(), x1, y1, x2, y2, shape }
}

fn pencil(points: &[(f64, f64)]) -> Element {
    let pts: Vec<Point> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    let mut e = make(Shape::Pencil { points: vec![pts[0]] }, pts[0].x, pts[0].y, pts[0].x, pts[0].y);
    e.set_points(pts);
    e
}

fn test_at(p: (f64, f64), e: &Element, selected: bool) -> Option<Position> {
    let stroke = StrokeOptions::default();
    let ctx = HitContext { selected: selected.then_some(e.id), measure: &MonospaceMeasure, stroke: &stroke };
    position_for_element(Point::new(p.0, p.1), e, &ctx)
}

// =============================================================
// Corner / Position
// =============================================================

#[test]
fn corner_names_match_handle_labels() {
    assert_eq!(Corner::TopLeft.to_string(), "top-left");
    assert_eq!(Corner::BottomRight.to_string(), "bottom-right");
    assert_eq!(Position::Inside.to_string(), "inside");
    assert_eq!(Position::Corner(Corner::TopRight).to_string(), "top-right");
}

#[test]
fn cursors_for_positions() {
    assert_eq!(Position::Inside.cursor(), "move");
    assert_eq!(Position::Corner(Corner::TopLeft).cursor(), "nwse-resize");
    assert_eq!(Position::Corner(Corner::BottomLeft).cursor(), "nesw-resize");
}

// =============================================================
// Rectangle / Diamond / Ellipse
// =============================================================

#[test]
fn rectangle_hits_on_stroke_only_when_unselected() {
    let r = make(Shape::Rectangle, 0.0, 0.0, 100.0, 100.0);
    assert_eq!(test_at((0.0, 50.0), &r, false), Some(Position::Inside));
    assert_eq!(test_at((103.0, 50.0), &r, false), Some(Position::Inside));
    assert_eq!(test_at((50.0, 50.0), &r, false), None);
}

#[test]
fn selected_rectangle_hits_body() {
    let r = make(Shape::Rectangle, 0.0, 0.0, 100.0, 100.0);
    assert_eq!(test_at((50.0, 50.0), &r, true), Some(Position::Inside));
    assert_eq!(test_at((108.0, 50.0), &r, true), Some(Position::Inside));
}

#[test]
fn far_point_misses_every_closed_shape() {
    for shape in [Shape::Rectangle, Shape::Ellipse, Shape::Diamond] {
        let e = make(shape, 0.0, 0.0, 100.0, 100.0);
        assert_eq!(test_at((500.0, 500.0), &e, true), None);
        assert_eq!(test_at((500.0, 500.0), &e, false), None);
    }
}

#[test]
fn rectangle_with_reversed_anchors() {
    let r = make(Shape::Rectangle, 100.0, 100.0, 0.0, 0.0);
    assert_eq!(test_at((100.0, 50.0), &r, false), Some(Position::Inside));
}

#[test]
fn selected_corners_report_handles() {
    let r = make(Shape::Rectangle, 0.0, 0.0, 100.0, 80.0);
    assert_eq!(test_at((-10.0, -10.0), &r, true), Some(Position::Corner(Corner::TopLeft)));
    assert_eq!(test_at((112.0, -8.0), &r, true), Some(Position::Corner(Corner::TopRight)));
    assert_eq!(test_at((-10.0, 90.0), &r, true), Some(Position::Corner(Corner::BottomLeft)));
    assert_eq!(test_at((110.0, 90.0), &r, true), Some(Position::Corner(Corner::BottomRight)));
}

#[test]
fn unselected_element_never_reports_corner() {
    let r = make(Shape::Rectangle, 0.0, 0.0, 100.0, 80.0);
    assert_eq!(test_at((-10.0, -10.0), &r, false), None);
    assert_eq!(test_at((0.0, 0.0), &r, false), Some(Position::Inside));
}

#[test]
fn ellipse_hits_on_its_curve_not_its_box_corner() {
    let e = make(Shape::Ellipse, 0.0, 0.0, 100.0, 50.0);
    assert_eq!(test_at((100.0, 25.0), &e, false), Some(Position::Inside));
    assert_eq!(test_at((50.0, 0.0), &e, false), Some(Position::Inside));
    assert_eq!(test_at((2.0, 2.0), &e, false), None);
}

#[test]
fn diamond_hits_on_its_edges() {
    let d = make(Shape::Diamond, 0.0, 0.0, 100.0, 100.0);
    assert_eq!(test_at((25.0, 25.0), &d, false), Some(Position::Inside));
    assert_eq!(test_at((50.0, 0.0), &d, false), Some(Position::Inside));
    assert_eq!(test_at((2.0, 2.0), &d, false), None);
}

#[test]
fn zero_size_shape_hits_near_its_point() {
    let r = make(Shape::Rectangle, 10.0, 10.0, 10.0, 10.0);
    assert_eq!(test_at((12.0, 12.0), &r, false), Some(Position::Inside));
    assert_eq!(test_at((30.0, 30.0), &r, false), None);
}

// =============================================================
// Line / Arrow
// =============================================================

#[test]
fn line_hits_within_one_unit_slack() {
    let l = make(Shape::Line, 0.0, 0.0, 100.0, 0.0);
    assert_eq!(test_at((50.0, 0.0), &l, false), Some(Position::Inside));
    assert_eq!(test_at((50.0, 5.0), &l, false), Some(Position::Inside));
    assert_eq!(test_at((50.0, 15.0), &l, false), None);
    assert_eq!(test_at((120.0, 0.0), &l, false), None);
}

#[test]
fn arrow_shaft_is_tight() {
    let a = make(Shape::Arrow, 0.0, 0.0, 100.0, 0.0);
    assert_eq!(test_at((50.0, 0.0), &a, false), Some(Position::Inside));
    assert_eq!(test_at((50.0, 5.0), &a, false), None);
}

#[test]
fn arrow_head_counts_as_inside() {
    let a = make(Shape::Arrow, 0.0, 0.0, 100.0, 0.0);
    assert_eq!(test_at((95.0, 1.5), &a, false), Some(Position::Inside));
}

#[test]
fn selected_line_reports_endpoint_handles() {
    let l = make(Shape::Line, 0.0, 0.0, 100.0, 50.0);
    assert_eq!(test_at((-10.0, -10.0), &l, true), Some(Position::Corner(Corner::TopLeft)));
    assert_eq!(test_at((110.0, 60.0), &l, true), Some(Position::Corner(Corner::BottomRight)));
}

// =============================================================
// Pencil
// =============================================================

#[test]
fn pencil_hits_on_its_ribbon() {
    let p = pencil(&[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0)]);
    assert_eq!(test_at((50.0, 3.0), &p, false), Some(Position::Inside));
    assert_eq!(test_at((50.0, 20.0), &p, false), None);
}

#[test]
fn selected_pencil_handles_use_point_cloud_box() {
    let p = pencil(&[(0.0, 0.0), (40.0, 30.0)]);
    assert_eq!(test_at((50.0, 40.0), &p, true), Some(Position::Corner(Corner::BottomRight)));
    assert_eq!(test_at((50.0, 40.0), &p, false), None);
}

#[test]
fn selected_pencil_body_is_not_grabbable_off_stroke() {
    let p = pencil(&[(0.0, 0.0), (100.0, 100.0)]);
    assert_eq!(test_at((90.0, 10.0), &p, true), None);
}

// =============================================================
// Text
// =============================================================

#[test]
fn text_hits_inside_measured_box() {
    // "hello" at 16px monospace: 5 * 9.6 = 48 wide, 16 tall.
    let t = make(Shape::Text(TextData::new("hello")), 0.0, 0.0, 48.0, 16.0);
    assert_eq!(test_at((24.0, 8.0), &t, false), Some(Position::Inside));
    assert_eq!(test_at((-5.0, -5.0), &t, false), Some(Position::Inside));
    assert_eq!(test_at((70.0, 8.0), &t, false), None);
}

#[test]
fn text_has_single_bottom_right_handle() {
    let t = make(Shape::Text(TextData::new("hello")), 0.0, 0.0, 48.0, 16.0);
    assert_eq!(test_at((58.0, 26.0), &t, true), Some(Position::Corner(Corner::BottomRight)));
    assert_eq!(test_at((-9.0, -9.0), &t, true), Some(Position::Inside));
}

#[test]
fn multi_line_text_height_is_line_count() {
    let t = make(Shape::Text(TextData::new("a\nb\nc")), 0.0, 0.0, 0.0, 0.0);
    assert_eq!(test_at((3.0, 50.0), &t, false), Some(Position::Inside));
    assert_eq!(test_at((3.0, 60.0), &t, false), None);
}

// =============================================================
// Outline
// =============================================================

#[test]
fn outline_vertex_counts() {
    assert_eq!(outline(&make(Shape::Rectangle, 0.0, 0.0, 1.0, 1.0)).len(), 4);
    assert_eq!(outline(&make(Shape::Diamond, 0.0, 0.0, 1.0, 1.0)).len(), 4);
    assert_eq!(outline(&make(Shape::Ellipse, 0.0, 0.0, 1.0, 1.0)).len(), ELLIPSE_SEGMENTS);
    assert!(outline(&make(Shape::Line, 0.0, 0.0, 1.0, 1.0)).is_empty());
}
