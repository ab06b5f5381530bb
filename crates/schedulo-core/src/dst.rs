//! DST transition policies for wall-clock times that do not map cleanly to an instant.

use serde::{Deserialize, Serialize};

/// Policy for resolving a local time that falls in a DST gap.
///
/// Ambiguous local times (the repeated hour when clocks fall back) always
/// resolve to the earliest instant; the policy only matters for gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DstPolicy {
    /// Treat the nonexistent time as unavailable (e.g., 2:30 AM during spring forward)
    Skip,
    /// Shift to the first valid instant after the gap
    ShiftForward,
    /// Keep the offset in force before the gap, so 02:30 becomes 03:30
    #[default]
    WallClock,
}
