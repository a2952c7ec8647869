use approx::assert_abs_diff_eq;
use chrono::{NaiveDate, NaiveDateTime};
use time_ruler::api::{RulerOptions, TimeRuler};
use time_ruler::interaction::{CursorState, MotionMode};
use time_ruler::render::RecordingSurface;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid fixture")
}

fn ready_ruler(surface: RecordingSurface) -> TimeRuler<RecordingSurface> {
    let options = RulerOptions::new().with_end_time(at(1, 12));
    let mut ruler = TimeRuler::new(surface, options).expect("ruler init");
    assert!(ruler.poll_ready());
    ruler
}

#[test]
fn pointer_down_must_hit_the_cursor() {
    let mut ruler = ready_ruler(RecordingSurface::new());

    assert!(!ruler.pointer_down(700.0));
    assert!(!ruler.pointer_down(489.0));
    assert_eq!(ruler.motion_mode(), MotionMode::Idle);

    assert!(ruler.pointer_down(509.0));
    assert_eq!(ruler.motion_mode(), MotionMode::Dragging);
    assert_eq!(ruler.cursor_state(), CursorState::Normal);
}

#[test]
fn dragging_moves_cursor_and_republishes_time() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    assert!(ruler.pointer_down(500.0));

    ruler.pointer_move(536.0);
    assert_eq!(ruler.cursor_x(), Some(536.0));
    assert_eq!(
        ruler.cursor_time(),
        Some(at(1, 13)),
        "half a cell is one hour"
    );

    ruler.pointer_up();
    assert_eq!(ruler.motion_mode(), MotionMode::Idle);
    assert_eq!(ruler.cursor_x(), Some(536.0));
}

#[test]
fn leaving_left_edge_enters_back_and_returning_restores_normal() {
    let mut ruler = ready_ruler(RecordingSurface::new().with_viewport_left(100.0));
    assert!(ruler.pointer_down(600.0));

    ruler.pointer_move(50.0);
    assert_eq!(ruler.cursor_state(), CursorState::Back);
    assert_eq!(ruler.cursor_x(), Some(0.0));
    assert!(ruler.needs_frame());

    ruler.pointer_move(600.0);
    assert_eq!(ruler.cursor_state(), CursorState::Normal);
    assert_eq!(ruler.cursor_x(), Some(500.0));
    assert!(!ruler.needs_frame());
}

#[test]
fn back_scroll_reveals_earlier_time_at_half_pixel_per_ms() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(-50.0);
    let before = ruler.cursor_time().expect("cursor time");

    ruler.advance_frame(1000.0);
    assert_eq!(ruler.total_shift(), Some(0.0), "first frame only anchors");

    ruler.advance_frame(1016.0);
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), 8.0, epsilon = 1e-12);
    ruler.advance_frame(1040.0);
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), 20.0, epsilon = 1e-12);

    let after = ruler.cursor_time().expect("cursor time");
    assert!(after < before);
    assert_eq!(ruler.cursor_x(), Some(0.0));
}

#[test]
fn forward_scroll_moves_background_left() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(1100.0);
    assert_eq!(ruler.cursor_state(), CursorState::Forward);
    assert_eq!(ruler.cursor_x(), Some(1000.0));

    ruler.advance_frame(0.0);
    ruler.advance_frame(20.0);
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), -10.0, epsilon = 1e-12);
}

#[test]
fn reentering_restarts_the_frame_anchor() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(-10.0);
    ruler.advance_frame(0.0);
    ruler.advance_frame(10.0);
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), 5.0, epsilon = 1e-12);

    ruler.pointer_move(300.0);
    ruler.advance_frame(500.0);
    ruler.pointer_move(-10.0);
    ruler.advance_frame(5000.0);
    assert_abs_diff_eq!(
        ruler.total_shift().expect("shift"),
        5.0,
        epsilon = 1e-12
    );
    ruler.advance_frame(5010.0);
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), 10.0, epsilon = 1e-12);
}

#[test]
fn pointer_up_stops_auto_scroll() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(-50.0);
    ruler.advance_frame(0.0);
    ruler.pointer_up();

    assert_eq!(ruler.motion_mode(), MotionMode::Idle);
    assert_eq!(ruler.cursor_state(), CursorState::Normal);
    assert!(!ruler.needs_frame());

    ruler.advance_frame(100.0);
    assert_eq!(ruler.total_shift(), Some(0.0));
}

#[test]
fn visible_start_bound_blocks_back_scroll_and_clamps_cursor() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    ruler.set_start_time(at(1, 11));
    let start_x = ruler.start_x().expect("start bound on screen");
    assert_abs_diff_eq!(start_x, 464.0, epsilon = 1e-6);

    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(-50.0);
    assert_eq!(ruler.cursor_state(), CursorState::Normal);
    assert!(!ruler.needs_frame());
    assert_eq!(ruler.cursor_x(), Some(start_x));
    assert!(ruler.time_at(start_x).expect("cursor time") >= at(1, 11));
    assert_eq!(ruler.cursor_time(), Some(at(1, 11)));
}

fn previous_day(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 12, 31)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid fixture")
}

#[test]
fn back_scroll_stops_with_start_bound_at_the_edge() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    // 2023-12-31 18:00 sits 148 px left of the viewport.
    let start = previous_day(18);
    ruler.set_start_time(start);
    assert_eq!(ruler.start_x(), None);

    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(-50.0);
    assert_eq!(ruler.cursor_state(), CursorState::Back);

    ruler.advance_frame(0.0);
    ruler.advance_frame(200.0);
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), 100.0, epsilon = 1e-12);
    assert_eq!(ruler.cursor_state(), CursorState::Back);

    ruler.advance_frame(400.0);
    assert_eq!(ruler.cursor_state(), CursorState::Normal);
    assert_eq!(ruler.motion_mode(), MotionMode::Dragging);
    assert!(!ruler.needs_frame());
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), 148.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ruler.start_x().expect("start on the edge"), 0.0, epsilon = 1e-6);
    assert_eq!(ruler.cursor_x(), Some(0.0));
    assert_eq!(ruler.cursor_time(), Some(start));
}

#[test]
fn long_frame_gap_cannot_carry_start_bound_across_the_viewport() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    // 2023-12-31 16:00 sits 220 px left of the viewport.
    let start = previous_day(16);
    ruler.set_start_time(start);

    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(-50.0);
    ruler.advance_frame(0.0);
    ruler.advance_frame(3000.0);

    assert_eq!(ruler.cursor_state(), CursorState::Normal);
    assert!(!ruler.needs_frame());
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), 220.0, epsilon = 1e-9);
    assert_eq!(ruler.cursor_time(), Some(start));

    for frame in 0..100 {
        ruler.advance_frame(3016.0 + f64::from(frame) * 16.0);
    }
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), 220.0, epsilon = 1e-9);

    // Holding past the edge again does not restart a run.
    ruler.pointer_move(-80.0);
    assert_eq!(ruler.cursor_state(), CursorState::Normal);
    assert!(!ruler.needs_frame());
    assert_eq!(ruler.cursor_time(), Some(start));
}

#[test]
fn forward_scroll_stops_with_end_bound_at_the_edge() {
    let mut ruler = ready_ruler(RecordingSurface::new());
    // 2024-01-02 02:00 sits 4 px right of the viewport.
    ruler.set_end_time(at(2, 2));
    assert_eq!(ruler.end_x(), None);

    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(1100.0);
    assert_eq!(ruler.cursor_state(), CursorState::Forward);
    ruler.advance_frame(0.0);
    ruler.advance_frame(2500.0);

    assert_eq!(ruler.cursor_state(), CursorState::Normal);
    assert!(!ruler.needs_frame());
    assert_abs_diff_eq!(ruler.total_shift().expect("shift"), -4.0, epsilon = 1e-9);
    assert_eq!(ruler.cursor_x(), Some(1000.0));
    assert_eq!(ruler.cursor_time(), Some(at(2, 2)));
}

#[test]
fn pointer_down_at_checks_the_cursor_handle_height() {
    let mut ruler = ready_ruler(
        RecordingSurface::new()
            .with_viewport_left(100.0)
            .with_viewport_top(50.0),
    );

    assert!(!ruler.pointer_down_at(600.0, 40.0), "above the viewport");
    assert!(!ruler.pointer_down_at(600.0, 83.0), "below the 32 px handle");
    assert!(!ruler.pointer_down_at(620.0, 60.0), "beside the handle");
    assert!(!ruler.pointer_down_at(600.0, f64::NAN));
    assert_eq!(ruler.motion_mode(), MotionMode::Idle);

    assert!(ruler.pointer_down_at(600.0, 82.0));
    assert_eq!(ruler.motion_mode(), MotionMode::Dragging);
}
