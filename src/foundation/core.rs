/// Millisecond offset from event start at which an action becomes eligible.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimeOffset(pub u64);

impl TimeOffset {
    /// Offset at the very start of an event.
    pub const ZERO: Self = Self(0);

    /// Build an offset from milliseconds.
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    /// Offset in milliseconds.
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Whether an action at this offset is eligible at `elapsed_ms`.
    pub fn is_due(self, elapsed_ms: u64) -> bool {
        self.0 <= elapsed_ms
    }
}

impl From<u64> for TimeOffset {
    fn from(ms: u64) -> Self {
        Self(ms)
    }
}

/// Per-tick timing snapshot published by an [`crate::Animation`] to its layers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameInfo {
    /// Milliseconds since the animation clock was last reset.
    pub elapsed_ms: u64,
    /// Scale factor of the owning animation.
    pub scale_factor: f32,
    /// Wall (or driven) time of the last clock read.
    pub last_frame_time_ms: u64,
    /// Milliseconds between the last two clock reads.
    pub last_frame_delta_ms: u64,
}

impl Default for FrameInfo {
    fn default() -> Self {
        Self {
            elapsed_ms: 0,
            scale_factor: 1.0,
            last_frame_time_ms: 0,
            last_frame_delta_ms: 0,
        }
    }
}
