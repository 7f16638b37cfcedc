//! RTK readiness diagnosis of a scanned capture.
//!
//! A [Report] holds everything needed to render findings, but no text. RTK
//! needs the reference station's coordinates (1005/1006) and its satellite
//! observables (MSM); a capture lacking the former is the usual reason an RTK
//! engine never converges.
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::debug;

use crate::capture::Capture;
use crate::catalog::{self, MsgType, MSM_OBSERVABLES, STATION_COORDINATES};
use crate::frame::{ScanOpts, Scanner};
use crate::summary::Summary;

/// Message type used to estimate the observable update rate.
pub const RATE_MSG_TYPE: MsgType = 1077;

/// Capture duration assumed by the update rate estimate. Captures carry no
/// timestamps the scanner can use, so this is a fixed approximation.
pub const ASSUMED_WINDOW_SECS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Readiness {
    /// At least one 1005 or 1006 frame.
    pub station_coordinates: bool,
    /// At least one MSM4-7 frame for GPS, GLONASS, Galileo or BeiDou.
    pub observables: bool,
}

impl Readiness {
    #[must_use]
    pub fn from_summary(summary: &Summary) -> Self {
        Self {
            station_coordinates: summary.has_any(&STATION_COORDINATES),
            observables: summary.has_any(&MSM_OBSERVABLES),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Annotation {
    StationCoordinates,
    HighPrecisionObservables,
}

impl Annotation {
    #[must_use]
    pub fn for_type(msg_type: MsgType) -> Option<Self> {
        if catalog::is_station_coordinates(msg_type) {
            Some(Self::StationCoordinates)
        } else if catalog::is_high_precision(msg_type) {
            Some(Self::HighPrecisionObservables)
        } else {
            None
        }
    }
}

/// One line of the message type table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Row {
    pub msg_type: MsgType,
    pub count: usize,
    pub description: &'static str,
    pub mean_size: f64,
    pub annotation: Option<Annotation>,
}

/// Update rate estimate under [ASSUMED_WINDOW_SECS].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct UpdateRate {
    pub msg_type: MsgType,
    pub count: usize,
    pub window_secs: u32,
    pub hz: f64,
}

impl UpdateRate {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimate(summary: &Summary) -> Option<Self> {
        let count = summary.count_of(RATE_MSG_TYPE);
        if count == 0 {
            return None;
        }
        Some(Self {
            msg_type: RATE_MSG_TYPE,
            count,
            window_secs: ASSUMED_WINDOW_SECS,
            hz: count as f64 / f64::from(ASSUMED_WINDOW_SECS),
        })
    }
}

/// What the operator should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Remediation {
    /// No station coordinates; the correction source must change.
    SwitchSource,
    /// Station coordinates present, but no MSM observables.
    Adequate,
    /// Everything RTK needs is present; check operational conditions.
    Ready,
}

impl From<Readiness> for Remediation {
    fn from(readiness: Readiness) -> Self {
        match (readiness.station_coordinates, readiness.observables) {
            (false, _) => Self::SwitchSource,
            (true, false) => Self::Adequate,
            (true, true) => Self::Ready,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Analysis {
    pub readiness: Readiness,
    /// Sorted by message type.
    pub rows: Vec<Row>,
    pub update_rate: Option<UpdateRate>,
    pub remediation: Remediation,
}

impl Analysis {
    #[must_use]
    pub fn new(summary: &Summary) -> Self {
        let readiness = Readiness::from_summary(summary);
        let rows = summary
            .types
            .iter()
            .map(|(msg_type, stats)| Row {
                msg_type: *msg_type,
                count: stats.count,
                description: catalog::describe(*msg_type),
                mean_size: stats.mean_size(),
                annotation: Annotation::for_type(*msg_type),
            })
            .collect();
        Self {
            readiness,
            rows,
            update_rate: UpdateRate::estimate(summary),
            remediation: Remediation::from(readiness),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    /// Source identity, usually a file name.
    pub source: String,
    /// Size of the source in bytes.
    pub size: usize,
    /// Accepted frames.
    pub total: usize,
    /// `None` if no frames were found, in which case there is nothing to analyze.
    pub analysis: Option<Analysis>,
}

impl Report {
    #[must_use]
    pub fn new<S: Into<String>>(source: S, size: usize, summary: &Summary) -> Self {
        let analysis = if summary.is_empty() {
            None
        } else {
            Some(Analysis::new(summary))
        };
        Self {
            source: source.into(),
            size,
            total: summary.count,
            analysis,
        }
    }

    /// True if no frames were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.analysis.is_none()
    }
}

/// Scan, aggregate and diagnose `capture`.
#[must_use]
pub fn analyze(capture: &Capture, opts: ScanOpts) -> Report {
    let mut scanner = Scanner::new(capture.data(), opts);
    let summary = Summary::from_frames(scanner.by_ref());
    debug!(
        frames = summary.count,
        skipped = scanner.skipped(),
        crc_failures = scanner.crc_failures(),
        "scanned {}",
        capture.name()
    );
    Report::new(capture.name(), capture.len(), &summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Frame;
    use test_case::test_case;

    fn summary_of(types: &[(MsgType, usize)]) -> Summary {
        let mut summary = Summary::default();
        for (msg_type, size) in types {
            summary.add(&Frame {
                offset: 0,
                msg_type: *msg_type,
                payload_len: u16::try_from(size - 6).unwrap(),
                total_size: *size,
            });
        }
        summary
    }

    #[test_case(&[1005], true, false)]
    #[test_case(&[1006, 1230], true, false)]
    #[test_case(&[1124], false, true)]
    #[test_case(&[1006, 1097], true, true)]
    #[test_case(&[1004, 1019, 1073], false, false)]
    fn readiness(types: &[MsgType], station_coordinates: bool, observables: bool) {
        let summary = summary_of(&types.iter().map(|t| (*t, 30)).collect::<Vec<_>>());
        assert_eq!(
            Readiness::from_summary(&summary),
            Readiness {
                station_coordinates,
                observables
            }
        );
    }

    #[test_case(false, false, Remediation::SwitchSource)]
    #[test_case(false, true, Remediation::SwitchSource)]
    #[test_case(true, false, Remediation::Adequate)]
    #[test_case(true, true, Remediation::Ready)]
    fn remediation(station_coordinates: bool, observables: bool, expected: Remediation) {
        let readiness = Readiness {
            station_coordinates,
            observables,
        };
        assert_eq!(Remediation::from(readiness), expected);
    }

    #[test]
    fn rows_are_sorted_and_annotated() {
        let summary = summary_of(&[(1077, 200), (1005, 25), (1077, 220), (1074, 90), (9, 8)]);
        let analysis = Analysis::new(&summary);

        let types: Vec<MsgType> = analysis.rows.iter().map(|r| r.msg_type).collect();
        assert_eq!(types, vec![9, 1005, 1074, 1077]);

        assert_eq!(analysis.rows[0].description, catalog::UNKNOWN);
        assert_eq!(analysis.rows[0].annotation, None);
        assert_eq!(
            analysis.rows[1].annotation,
            Some(Annotation::StationCoordinates)
        );
        assert_eq!(analysis.rows[2].annotation, None);
        assert_eq!(
            analysis.rows[3].annotation,
            Some(Annotation::HighPrecisionObservables)
        );
        assert_eq!(analysis.rows[3].count, 2);
        assert!((analysis.rows[3].mean_size - 210.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_rate() {
        let summary = summary_of(&[(1077, 100); 25]);
        let rate = UpdateRate::estimate(&summary).unwrap();
        assert_eq!(rate.count, 25);
        assert_eq!(rate.window_secs, ASSUMED_WINDOW_SECS);
        assert!((rate.hz - 2.5).abs() < f64::EPSILON);

        let summary = summary_of(&[(1087, 100)]);
        assert_eq!(UpdateRate::estimate(&summary), None);
    }

    #[test]
    fn empty_report() {
        let report = Report::new("noise.bin", 4096, &Summary::default());
        assert!(report.is_empty());
        assert_eq!(report.total, 0);
        assert_eq!(report.size, 4096);
    }
}
