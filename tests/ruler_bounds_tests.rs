use approx::assert_abs_diff_eq;
use chrono::{NaiveDate, NaiveDateTime};
use time_ruler::api::{RulerOptions, TimeRuler};
use time_ruler::core::PARKED_MARKER_X;
use time_ruler::interaction::MotionMode;
use time_ruler::motion::CompletionState;
use time_ruler::render::{MarkerKind, RecordingSurface};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid fixture")
}

fn ready_ruler() -> TimeRuler<RecordingSurface> {
    let options = RulerOptions::new().with_end_time(at(1, 12));
    let mut ruler = TimeRuler::new(RecordingSurface::new(), options).expect("ruler init");
    assert!(ruler.poll_ready());
    ruler
}

fn marker_x(ruler: &TimeRuler<RecordingSurface>, kind: MarkerKind) -> Option<f64> {
    ruler.surface().marker(kind).map(|element| element.x())
}

#[test]
fn tightening_end_bound_reseeks_cursor_exactly() {
    let mut ruler = ready_ruler();
    assert_eq!(ruler.cursor_time(), Some(at(1, 12)));

    ruler.set_end_time(at(1, 10));

    assert_eq!(ruler.end_time(), Some(at(1, 10)));
    assert_eq!(ruler.cursor_time(), Some(at(1, 10)));
    assert_eq!(ruler.cursor_x(), Some(500.0));
    assert_eq!(ruler.total_shift(), Some(72.0));
    assert_eq!(ruler.motion_mode(), MotionMode::Idle);

    let end_x = ruler.end_x().expect("end bound on screen");
    assert_abs_diff_eq!(end_x, 500.0, epsilon = 1e-6);
    assert_eq!(marker_x(&ruler, MarkerKind::EndBound), Some(end_x));
}

#[test]
fn tightening_start_bound_reseeks_forward() {
    let mut ruler = ready_ruler();
    ruler.set_start_time(at(1, 18));
    assert_eq!(ruler.cursor_time(), Some(at(1, 18)));
    assert_eq!(ruler.total_shift(), Some(-216.0));
}

#[test]
fn bound_behind_cursor_does_not_move_anything() {
    let mut ruler = ready_ruler();
    ruler.set_end_time(at(1, 16));
    assert_eq!(ruler.cursor_time(), Some(at(1, 12)));
    assert_eq!(ruler.total_shift(), Some(0.0));

    let end_x = ruler.end_x().expect("end bound on screen");
    assert_abs_diff_eq!(end_x, 644.0, epsilon = 1e-6);
}

#[test]
fn bound_reseek_cancels_running_animation() {
    let mut ruler = ready_ruler();
    let seek = ruler.set_time(at(2, 6), 1000.0);
    ruler.advance_frame(0.0);
    ruler.advance_frame(100.0);

    ruler.set_end_time(at(1, 13));
    assert_eq!(seek.state(), CompletionState::Cancelled);
    assert_eq!(ruler.motion_mode(), MotionMode::Idle);
    assert_eq!(ruler.cursor_time(), Some(at(1, 13)));
}

#[test]
fn invalid_and_inverted_bounds_are_ignored() {
    let mut ruler = ready_ruler();
    ruler.set_end_time("13:00 tomorrow-ish");
    assert_eq!(ruler.end_time(), None);

    ruler.set_end_time(at(1, 20));
    ruler.set_start_time(at(1, 21));
    assert_eq!(ruler.start_time(), None);
    assert_eq!(ruler.end_time(), Some(at(1, 20)));
    assert_eq!(marker_x(&ruler, MarkerKind::StartBound), None);
}

#[test]
fn off_screen_bounds_park_their_marker() {
    let mut ruler = ready_ruler();
    ruler.set_start_time(at(1, 0) - chrono::Duration::days(30));
    assert_eq!(ruler.start_x(), None);
    assert_eq!(
        marker_x(&ruler, MarkerKind::StartBound),
        Some(PARKED_MARKER_X)
    );
}

#[test]
fn markers_follow_the_strip() {
    let mut ruler = ready_ruler();
    ruler.set_end_time(at(1, 16));
    let before = ruler.end_x().expect("visible");

    let shift = ruler.set_offset_animate(-100.0, 0.0);
    assert!(shift.is_finished());
    let after = ruler.end_x().expect("still visible");
    assert_abs_diff_eq!(after, before - 100.0, epsilon = 1e-6);
    assert_eq!(marker_x(&ruler, MarkerKind::EndBound), Some(after));

    ruler.set_offset_animate(1000.0, 0.0);
    assert_eq!(ruler.end_x(), None);
    assert_eq!(marker_x(&ruler, MarkerKind::EndBound), Some(PARKED_MARKER_X));
}

#[test]
fn clearing_a_bound_parks_its_marker() {
    let mut ruler = ready_ruler();
    ruler.set_end_time(at(1, 16));
    ruler.clear_end_time();

    assert_eq!(ruler.end_time(), None);
    assert_eq!(ruler.end_x(), None);
    assert_eq!(marker_x(&ruler, MarkerKind::EndBound), Some(PARKED_MARKER_X));

    ruler.set_end_time(at(1, 16));
    assert_eq!(
        ruler.surface().element_count(),
        ruler.surface().cells().count() + 2,
        "cursor plus a single reused end marker"
    );
}

#[test]
fn drag_cursor_is_held_at_visible_end_bound() {
    let mut ruler = ready_ruler();
    ruler.set_end_time(at(1, 14));
    let end_x = ruler.end_x().expect("visible");

    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(900.0);
    assert_eq!(ruler.cursor_x(), Some(end_x));
    ruler.pointer_move(1200.0);
    assert!(!ruler.needs_frame(), "visible end bound blocks forward scroll");
    ruler.pointer_up();
    let cursor_x = ruler.cursor_x().expect("cursor");
    assert!(ruler.time_at(cursor_x).expect("time") <= at(1, 14));
}

#[test]
fn instant_offset_past_visible_end_holds_cursor_on_marker() {
    let mut ruler = ready_ruler();
    ruler.set_end_time(at(1, 14));

    assert!(ruler.set_offset_animate(-150.0, 0.0).is_finished());

    let end_x = ruler.end_x().expect("end bound still on screen");
    assert_abs_diff_eq!(end_x, 422.0, epsilon = 1e-6);
    assert_eq!(ruler.cursor_x(), Some(end_x));
    assert_eq!(ruler.time_at(end_x), Some(at(1, 14)));
    assert_eq!(ruler.cursor_time(), Some(at(1, 14)));
}

#[test]
fn animated_offset_cannot_carry_cursor_past_end() {
    let mut ruler = ready_ruler();
    ruler.set_end_time(at(1, 14));

    let shift = ruler.set_offset_animate(-1500.0, 500.0);
    let mut clock = 0.0;
    while !shift.is_settled() && clock < 2_000.0 {
        ruler.advance_frame(clock);
        clock += 16.0;
        let cursor_x = ruler.cursor_x().expect("cursor");
        assert!(ruler.time_at(cursor_x).expect("time") <= at(1, 14));
    }

    assert!(shift.is_finished());
    assert_eq!(ruler.cursor_time(), Some(at(1, 14)));
    let end_x = ruler.end_x().expect("end bound held under the cursor");
    assert_abs_diff_eq!(
        end_x,
        ruler.cursor_x().expect("cursor"),
        epsilon = 1e-6
    );
}

#[test]
fn bound_set_during_drag_holds_cursor_without_recentring() {
    let mut ruler = ready_ruler();
    ruler.set_end_time(at(1, 16));
    assert!(ruler.pointer_down(500.0));
    ruler.pointer_move(600.0);

    ruler.set_end_time(at(1, 14));

    assert_eq!(ruler.motion_mode(), MotionMode::Dragging);
    assert_eq!(ruler.total_shift(), Some(0.0));
    assert_abs_diff_eq!(ruler.cursor_x().expect("cursor"), 572.0, epsilon = 1e-6);
    assert_eq!(ruler.cursor_time(), Some(at(1, 14)));

    ruler.pointer_move(700.0);
    assert_eq!(ruler.cursor_time(), Some(at(1, 14)));
    ruler.pointer_up();
    assert_eq!(ruler.motion_mode(), MotionMode::Idle);
}
