use std::time::{Duration, Instant};

use side_shooter::timing::*;

fn clock(max_skip: u32) -> FrameSync {
    FrameSync::new(60, max_skip)
}

#[test]
fn sixty_fps_period() {
    assert_eq!(clock(4).period(), Duration::from_nanos(16_666_666));
}

#[test]
fn zero_fps_is_treated_as_one() {
    assert_eq!(FrameSync::new(0, 4).period(), Duration::from_secs(1));
}

#[test]
fn first_frame_is_never_late() {
    let mut c = clock(4);
    let t = c.end_frame_at(Instant::now());
    assert!(!t.late);
    assert_eq!(t.wait, Duration::ZERO);
}

#[test]
fn early_frame_waits_for_deadline() {
    let mut c = clock(4);
    let t0 = Instant::now();
    c.end_frame_at(t0);
    let t = c.end_frame_at(t0 + Duration::from_millis(5));
    assert!(!t.late);
    assert_eq!(t.wait, c.period() - Duration::from_millis(5));
}

#[test]
fn overrun_frame_is_late_and_does_not_wait() {
    let mut c = clock(4);
    let t0 = Instant::now();
    c.end_frame_at(t0);
    let t = c.end_frame_at(t0 + c.period() + Duration::from_millis(1));
    assert!(t.late);
    assert_eq!(t.wait, Duration::ZERO);
}

#[test]
fn one_late_frame_costs_one_skip() {
    let mut c = clock(4);
    let p = c.period();
    let t0 = Instant::now();
    c.end_frame_at(t0);
    assert!(c.end_frame_at(t0 + p + Duration::from_millis(1)).late);
    // Back on schedule for the following deadline
    let t = c.end_frame_at(t0 + 2 * p - Duration::from_millis(1));
    assert!(!t.late);
    assert_eq!(t.wait, Duration::from_millis(1));
}

#[test]
fn skip_cap_resyncs_schedule() {
    let mut c = clock(2);
    let p = c.period();
    let t0 = Instant::now();
    let behind = t0 + 10 * p;

    c.end_frame_at(t0);
    assert!(c.end_frame_at(behind).late);
    assert!(c.end_frame_at(behind).late);
    // Cap reached: draw anyway and restart the schedule from here
    assert!(!c.end_frame_at(behind).late);

    let half = p / 2;
    let t = c.end_frame_at(behind + half);
    assert!(!t.late);
    assert_eq!(t.wait, p - half);
}

#[test]
fn zero_skip_cap_never_reports_late() {
    let mut c = clock(0);
    let p = c.period();
    let t0 = Instant::now();
    c.end_frame_at(t0);
    assert!(!c.end_frame_at(t0 + 5 * p).late);
}
