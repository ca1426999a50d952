// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Frame timing.

use std::time::{Duration, Instant};

/// Measures the time elapsed since it was started.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Starts a new stopwatch.
    #[inline]
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Time since the stopwatch was started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Time since the stopwatch was started, in milliseconds.
    #[inline]
    pub fn elapsed_ms_f64(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }

    /// Returns the elapsed time and starts over.
    pub fn restart(&mut self) -> Duration {
        let elapsed = self.elapsed();
        self.start = Instant::now();
        elapsed
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame counters kept by the run-loop.
///
/// A summary is logged at `info` level every reporting interval; frames in
/// between are only traced.
#[derive(Debug)]
pub struct FrameStats {
    interval: Option<Duration>,
    since_report: Stopwatch,
    frame: Stopwatch,
    total_frames: u64,
    window_frames: u64,
    window_frame_time: Duration,
    last_frame_time: Duration,
}

impl FrameStats {
    /// Creates the counters. `None` disables the periodic summary.
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval,
            since_report: Stopwatch::new(),
            frame: Stopwatch::new(),
            total_frames: 0,
            window_frames: 0,
            window_frame_time: Duration::ZERO,
            last_frame_time: Duration::ZERO,
        }
    }

    /// Marks the beginning of a frame.
    pub fn begin_frame(&mut self) {
        self.frame.restart();
    }

    /// Marks the end of a frame. Returns `true` when a summary was logged.
    pub fn end_frame(&mut self) -> bool {
        self.last_frame_time = self.frame.elapsed();
        self.total_frames += 1;
        self.window_frames += 1;
        self.window_frame_time += self.last_frame_time;

        log::trace!(
            "Frame {} took {:.3} ms",
            self.total_frames,
            self.last_frame_time.as_secs_f64() * 1000.0
        );

        match self.interval {
            Some(interval) if self.since_report.elapsed() >= interval => {
                self.report();
                true
            }
            _ => false,
        }
    }

    fn report(&mut self) {
        let window = self.since_report.restart();
        let average_ms = self.window_frame_time.as_secs_f64() * 1000.0 / self.window_frames as f64;
        let fps = self.window_frames as f64 / window.as_secs_f64().max(f64::EPSILON);
        log::info!(
            "{} frames in {:.1}s (avg {:.3} ms/frame, {:.1} fps), {} frames total",
            self.window_frames,
            window.as_secs_f64(),
            average_ms,
            fps,
            self.total_frames
        );
        self.window_frames = 0;
        self.window_frame_time = Duration::ZERO;
    }

    /// Number of completed frames.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Duration of the last completed frame.
    pub fn last_frame_time(&self) -> Duration {
        self.last_frame_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn restart_resets_the_origin() {
        let mut watch = Stopwatch::new();
        thread::sleep(Duration::from_millis(10));
        assert!(watch.restart() >= Duration::from_millis(10));
        assert!(watch.elapsed() < Duration::from_millis(10));
    }

    #[test]
    fn frames_are_counted() {
        let mut stats = FrameStats::new(None);
        for _ in 0..3 {
            stats.begin_frame();
            assert!(!stats.end_frame());
        }
        assert_eq!(stats.total_frames(), 3);
    }

    #[test]
    fn summary_is_due_after_the_interval() {
        let mut stats = FrameStats::new(Some(Duration::from_millis(5)));
        stats.begin_frame();
        thread::sleep(Duration::from_millis(10));
        assert!(stats.end_frame());
        assert!(stats.last_frame_time() >= Duration::from_millis(10));

        stats.begin_frame();
        assert!(!stats.end_frame());
    }
}
