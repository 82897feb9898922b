#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    let a = Point::new(1.0, 2.0);
    let b = Point::new(1.0, 2.0);
    assert_eq!(a, b);
}

// --- Viewport defaults ---

#[test]
fn default_offset_is_zero() {
    let vp = Viewport::default();
    assert_eq!(vp.offset_x, 0.0);
    assert_eq!(vp.offset_y, 0.0);
}

#[test]
fn default_zoom_is_one() {
    let vp = Viewport::default();
    assert_eq!(vp.zoom, 1.0);
}

// --- screen_to_canvas ---

#[test]
fn screen_to_canvas_identity() {
    let vp = Viewport::default();
    let canvas = vp.screen_to_canvas(Point::new(35.0, 70.0));
    assert!(point_approx_eq(canvas, Point::new(35.0, 70.0)));
}

#[test]
fn screen_to_canvas_with_zoom() {
    let vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 2.0 };
    let canvas = vp.screen_to_canvas(Point::new(40.0, 80.0));
    assert!(approx_eq(canvas.x, 20.0));
    assert!(approx_eq(canvas.y, 40.0));
}

#[test]
fn screen_to_canvas_with_offset() {
    let vp = Viewport { offset_x: 100.0, offset_y: 50.0, zoom: 1.0 };
    let canvas = vp.screen_to_canvas(Point::new(100.0, 50.0));
    assert!(point_approx_eq(canvas, Point::new(0.0, 0.0)));
}

#[test]
fn screen_to_canvas_with_offset_and_zoom() {
    let vp = Viewport { offset_x: 20.0, offset_y: 10.0, zoom: 2.0 };
    // (60-20)/2 = 20, (30-10)/2 = 10
    let canvas = vp.screen_to_canvas(Point::new(60.0, 30.0));
    assert!(point_approx_eq(canvas, Point::new(20.0, 10.0)));
}

#[test]
fn screen_to_canvas_negative_coords() {
    let vp = Viewport::default();
    let canvas = vp.screen_to_canvas(Point::new(-10.0, -20.0));
    assert!(point_approx_eq(canvas, Point::new(-10.0, -20.0)));
}

// --- canvas_to_screen ---

#[test]
fn canvas_to_screen_identity() {
    let vp = Viewport::default();
    let screen = vp.canvas_to_screen(Point::new(50.0, 75.0));
    assert!(point_approx_eq(screen, Point::new(50.0, 75.0)));
}

#[test]
fn canvas_to_screen_with_zoom() {
    let vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 2.0 };
    let screen = vp.canvas_to_screen(Point::new(10.0, 20.0));
    assert!(approx_eq(screen.x, 20.0));
    assert!(approx_eq(screen.y, 40.0));
}

#[test]
fn canvas_to_screen_with_offset_and_zoom() {
    let vp = Viewport { offset_x: 20.0, offset_y: 10.0, zoom: 3.0 };
    // 5*3 + 20 = 35, 5*3 + 10 = 25
    let screen = vp.canvas_to_screen(Point::new(5.0, 5.0));
    assert!(approx_eq(screen.x, 35.0));
    assert!(approx_eq(screen.y, 25.0));
}

// --- Round trips ---

#[test]
fn round_trip_identity() {
    let vp = Viewport::default();
    let canvas = Point::new(100.0, 200.0);
    let back = vp.screen_to_canvas(vp.canvas_to_screen(canvas));
    assert!(point_approx_eq(canvas, back));
}

#[test]
fn round_trip_with_offset_and_zoom() {
    let vp = Viewport { offset_x: 50.0, offset_y: -30.0, zoom: 2.0 };
    let canvas = Point::new(100.0, 200.0);
    let back = vp.screen_to_canvas(vp.canvas_to_screen(canvas));
    assert!(point_approx_eq(canvas, back));
}

#[test]
fn round_trip_fractional_zoom() {
    let vp = Viewport { offset_x: 13.7, offset_y: -42.3, zoom: 0.75 };
    let canvas = Point::new(333.3, -999.9);
    let back = vp.screen_to_canvas(vp.canvas_to_screen(canvas));
    assert!(point_approx_eq(canvas, back));
}

#[test]
fn round_trip_screen_first() {
    let vp = Viewport { offset_x: 10.0, offset_y: 20.0, zoom: 1.5 };
    let screen = Point::new(400.0, 300.0);
    let back = vp.canvas_to_screen(vp.screen_to_canvas(screen));
    assert!(point_approx_eq(screen, back));
}

// --- apply_wheel ---

#[test]
fn wheel_down_zooms_out_one_step() {
    let mut vp = Viewport::default();
    assert!(vp.apply_wheel(53.0));
    assert!(approx_eq(vp.zoom, 0.9));
}

#[test]
fn wheel_up_zooms_in_one_step() {
    let mut vp = Viewport::default();
    assert!(vp.apply_wheel(-53.0));
    assert!(approx_eq(vp.zoom, 1.1));
}

#[test]
fn wheel_zero_delta_zooms_in() {
    let mut vp = Viewport::default();
    assert!(vp.apply_wheel(0.0));
    assert!(approx_eq(vp.zoom, 1.1));
}

#[test]
fn wheel_delta_magnitude_is_ignored() {
    let mut a = Viewport::default();
    let mut b = Viewport::default();
    a.apply_wheel(1.0);
    b.apply_wheel(500.0);
    assert!(approx_eq(a.zoom, b.zoom));
}

#[test]
fn six_notches_down_reach_point_four() {
    let mut vp = Viewport::default();
    for _ in 0..6 {
        vp.apply_wheel(1.0);
    }
    assert!(approx_eq(vp.zoom, 0.4));
}

#[test]
fn one_notch_back_in_after_six_down_reads_point_five() {
    let mut vp = Viewport::default();
    for _ in 0..6 {
        vp.apply_wheel(1.0);
    }
    vp.apply_wheel(-1.0);
    assert!(approx_eq(vp.zoom, 0.5));
}

#[test]
fn floor_holds_under_repeated_zoom_out() {
    let mut vp = Viewport::default();
    for _ in 0..40 {
        vp.apply_wheel(1.0);
    }
    assert!(approx_eq(vp.zoom, 0.25));
}

#[test]
fn zoom_out_clamps_at_floor() {
    let mut vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 0.3 };
    // 0.3 - 0.1 = 0.2 would undershoot; the step truncates at 0.25.
    assert!(vp.apply_wheel(1.0));
    assert!(approx_eq(vp.zoom, 0.25));
}

#[test]
fn wheel_down_at_floor_is_a_no_op() {
    let mut vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 0.25 };
    assert!(!vp.apply_wheel(1.0));
    assert!(approx_eq(vp.zoom, 0.25));
}

#[test]
fn zoom_in_from_floor_steps_up() {
    let mut vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 0.25 };
    assert!(vp.apply_wheel(-1.0));
    assert!(approx_eq(vp.zoom, 0.35));
}

#[test]
fn zoom_in_clamps_at_ceiling() {
    let mut vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 1.95 };
    assert!(vp.apply_wheel(-1.0));
    assert!(approx_eq(vp.zoom, 2.0));
}

#[test]
fn wheel_up_at_ceiling_is_a_no_op() {
    let mut vp = Viewport { offset_x: 0.0, offset_y: 0.0, zoom: 2.0 };
    assert!(!vp.apply_wheel(-1.0));
    assert!(approx_eq(vp.zoom, 2.0));
}

#[test]
fn wheel_leaves_offset_alone() {
    let mut vp = Viewport { offset_x: 77.0, offset_y: -33.0, zoom: 1.0 };
    vp.apply_wheel(1.0);
    assert_eq!(vp.offset_x, 77.0);
    assert_eq!(vp.offset_y, -33.0);
}

// --- reset ---

#[test]
fn reset_restores_home_view() {
    let mut vp = Viewport { offset_x: 120.0, offset_y: -45.0, zoom: 0.55 };
    vp.reset();
    assert_eq!(vp.offset_x, 0.0);
    assert_eq!(vp.offset_y, 0.0);
    assert_eq!(vp.zoom, 1.0);
}
