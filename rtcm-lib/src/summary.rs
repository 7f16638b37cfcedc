use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::catalog::MsgType;
use crate::frame::Frame;

/// Per message type statistics.
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct TypeSummary {
    pub count: usize,
    /// Total size of each observed frame, in scan order.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub sizes: Vec<usize>,
}

impl TypeSummary {
    /// Mean total frame size, or 0 if no frames were observed.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_size(&self) -> f64 {
        if self.sizes.is_empty() {
            return 0.0;
        }
        self.sizes.iter().sum::<usize>() as f64 / self.sizes.len() as f64
    }
}

/// Tracks stats on frame iteration.
///
/// # Example
/// ```
/// use rtcm::{scan, ScanOpts, Summary};
/// let dat: &[u8] = &[0xd3, 0x00, 0x02, 0x43, 0x50, 0x00, 0x00, 0x00];
///
/// let mut summary = Summary::default();
/// for frame in scan(dat, ScanOpts::default()) {
///     summary.add(&frame);
/// }
/// assert_eq!(summary.count_of(1077), 1);
/// ```
#[derive(Debug, Default, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Summary {
    /// Accepted frames.
    pub count: usize,
    /// Sum of accepted frame sizes.
    pub bytes: usize,
    pub types: BTreeMap<MsgType, TypeSummary>,
}

impl Summary {
    pub fn from_frames<I>(frames: I) -> Self
    where
        I: IntoIterator<Item = Frame>,
    {
        let mut summary = Summary::default();
        for frame in frames {
            summary.add(&frame);
        }
        summary
    }

    pub fn add(&mut self, frame: &Frame) {
        self.count += 1;
        self.bytes += frame.total_size;

        let stats = self.types.entry(frame.msg_type).or_default();
        stats.count += 1;
        stats.sizes.push(frame.total_size);
    }

    /// Number of frames seen for `msg_type`.
    #[must_use]
    pub fn count_of(&self, msg_type: MsgType) -> usize {
        self.types.get(&msg_type).map_or(0, |s| s.count)
    }

    /// True if at least one frame of any of `msg_types` was seen.
    #[must_use]
    pub fn has_any(&self, msg_types: &[MsgType]) -> bool {
        msg_types.iter().any(|t| self.types.contains_key(t))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
