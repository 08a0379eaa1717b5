//! The set of clocks recovered from one frame.

/// Number of clock slots the overlay can carry.
pub const CLOCK_SLOTS: usize = 6;

/// Names of the clock slots, in encoding order, top to bottom.
pub const CLOCK_NAMES: [&str; CLOCK_SLOTS] = [
    "buffer_time",
    "stream_time",
    "running_time",
    "clock_time",
    "render_time",
    "render_realtime",
];

/// Clock values recovered from one frame, plus the derived latency.
///
/// The clocks are nanosecond counters from different pipeline stages.
/// `latency` is `clock_time - render_realtime`, the elapsed time between
/// the frame leaving the sending pipeline's clock and it being rendered;
/// [`ClockSet::latency_vs_render_time`] measures against the scheduled
/// render stamp instead. Both are wrapping differences reinterpreted as
/// signed, so a stamp from slightly ahead of the reference clock yields
/// a small negative value rather than garbage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockSet {
    /// Presentation timestamp of the buffer.
    pub buffer_time: u64,
    /// Buffer time mapped into stream time.
    pub stream_time: u64,
    /// Buffer time mapped into running time.
    pub running_time: u64,
    /// Running time plus the pipeline's base time.
    pub clock_time: u64,
    /// Scheduled render time (clock time plus reported sink latency).
    pub render_time: u64,
    /// Wall-clock time at the render stage.
    pub render_realtime: u64,
    /// `clock_time - render_realtime`, as a signed nanosecond count.
    pub latency: i64,
}

impl ClockSet {
    /// Builds a clock set from the six slot values in encoding order.
    pub(super) fn from_slots(slots: [u64; CLOCK_SLOTS]) -> Self {
        let [buffer_time, stream_time, running_time, clock_time, render_time, render_realtime] =
            slots;
        Self {
            buffer_time,
            stream_time,
            running_time,
            clock_time,
            render_time,
            render_realtime,
            latency: clock_time.wrapping_sub(render_realtime) as i64,
        }
    }

    /// Latency measured against `render_time` instead of `render_realtime`.
    #[inline]
    pub fn latency_vs_render_time(&self) -> i64 {
        self.clock_time.wrapping_sub(self.render_time) as i64
    }

    /// Slot values in encoding order, parallel to [`CLOCK_NAMES`].
    pub fn slots(&self) -> [u64; CLOCK_SLOTS] {
        [
            self.buffer_time,
            self.stream_time,
            self.running_time,
            self.clock_time,
            self.render_time,
            self.render_realtime,
        ]
    }
}
