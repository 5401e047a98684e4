/// Fixed-rate frame clock with frame skipping.

use std::time::{Duration, Instant};

/// Result of ending one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTiming {
    /// How long to block before the next frame starts.
    pub wait: Duration,
    /// The frame overran its deadline; the next draw should be skipped.
    pub late: bool,
}

#[derive(Clone, Debug)]
pub struct FrameSync {
    period: Duration,
    max_skip: u32,
    deadline: Option<Instant>,
    skipped: u32,
}

impl FrameSync {
    pub fn new(frames_per_second: u32, max_skip: u32) -> Self {
        let fps = frames_per_second.max(1);
        Self {
            period: Duration::from_secs(1) / fps,
            max_skip,
            deadline: None,
            skipped: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Close the frame that ends at `now`.
    ///
    /// A frame that finishes after its deadline is late, and each late frame
    /// costs exactly one skipped draw. Once `max_skip` draws in a row have
    /// been skipped the schedule restarts from `now` and the backlog is
    /// dropped.
    pub fn end_frame_at(&mut self, now: Instant) -> FrameTiming {
        let deadline = match self.deadline {
            Some(d) => d,
            None => {
                self.deadline = Some(now + self.period);
                return FrameTiming {
                    wait: Duration::ZERO,
                    late: false,
                };
            }
        };

        if now <= deadline {
            self.skipped = 0;
            self.deadline = Some(deadline + self.period);
            return FrameTiming {
                wait: deadline - now,
                late: false,
            };
        }

        if self.skipped < self.max_skip {
            self.skipped += 1;
            self.deadline = Some(deadline + self.period);
            FrameTiming {
                wait: Duration::ZERO,
                late: true,
            }
        } else {
            log::debug!(
                "frame clock {:?} behind after {} skips, resyncing",
                now - deadline,
                self.skipped
            );
            self.skipped = 0;
            self.deadline = Some(now + self.period);
            FrameTiming {
                wait: Duration::ZERO,
                late: false,
            }
        }
    }

    /// Close the current frame, sleep until the next one is due and report
    /// whether this frame was late.
    pub fn sync(&mut self) -> bool {
        let timing = self.end_frame_at(Instant::now());
        if !timing.wait.is_zero() {
            std::thread::sleep(timing.wait);
        }
        timing.late
    }
}
