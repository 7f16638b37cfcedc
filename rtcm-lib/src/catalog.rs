//! Static catalog of the RTCM3 message numbers that matter for RTK.
//!
//! The catalog is intentionally partial. Anything not listed describes as
//! [UNKNOWN]; lookups never fail.
#[cfg(feature = "serde")]
use serde::Serialize;

/// 12-bit RTCM3 message number.
pub type MsgType = u16;

/// Description returned for message types not in the catalog.
pub const UNKNOWN: &str = "Unknown";

/// Largest value representable by the 12-bit message type field.
pub const MAX_MSG_TYPE: MsgType = 0x0fff;

/// Reference station antenna reference point messages.
pub const STATION_COORDINATES: [MsgType; 2] = [1005, 1006];

/// MSM4 through MSM7 for GPS, GLONASS, Galileo and BeiDou.
pub const MSM_OBSERVABLES: [MsgType; 16] = [
    1074, 1075, 1076, 1077, // GPS
    1084, 1085, 1086, 1087, // GLONASS
    1094, 1095, 1096, 1097, // Galileo
    1124, 1125, 1126, 1127, // BeiDou
];

const CATALOG: &[(MsgType, &str)] = &[
    (1001, "GPS L1-Only RTK Observables"),
    (1002, "GPS Extended L1-Only RTK Observables"),
    (1003, "GPS L1/L2 RTK Observables"),
    (1004, "GPS Extended L1/L2 RTK Observables"),
    (1005, "Stationary RTK Reference Station ARP"),
    (1006, "Stationary RTK Reference Station ARP with Height"),
    (1007, "Antenna Descriptor"),
    (1008, "Antenna Descriptor & Serial Number"),
    (1009, "GLONASS L1-Only RTK Observables"),
    (1010, "GLONASS Extended L1-Only RTK Observables"),
    (1011, "GLONASS L1/L2 RTK Observables"),
    (1012, "GLONASS Extended L1/L2 RTK Observables"),
    (1013, "System Parameters"),
    (1019, "GPS Ephemerides"),
    (1020, "GLONASS Ephemerides"),
    (1033, "Receiver and Antenna Descriptors"),
    (1042, "BDS Ephemeris Data"),
    (1044, "QZSS Ephemerides"),
    (1045, "Galileo F/NAV Satellite Ephemeris Data"),
    (1046, "Galileo I/NAV Satellite Ephemeris Data"),
    (1074, "GPS MSM4 (Multiple Signal Messages)"),
    (1075, "GPS MSM5"),
    (1076, "GPS MSM6"),
    (1077, "GPS MSM7 (High precision)"),
    (1084, "GLONASS MSM4"),
    (1085, "GLONASS MSM5"),
    (1086, "GLONASS MSM6"),
    (1087, "GLONASS MSM7 (High precision)"),
    (1094, "Galileo MSM4"),
    (1095, "Galileo MSM5"),
    (1096, "Galileo MSM6"),
    (1097, "Galileo MSM7 (High precision)"),
    (1124, "BeiDou MSM4"),
    (1125, "BeiDou MSM5"),
    (1126, "BeiDou MSM6"),
    (1127, "BeiDou MSM7 (High precision)"),
    (1230, "GLONASS Code-Phase Biases"),
];

/// Describe a message type, or [UNKNOWN] if it is not cataloged.
///
/// # Example
/// ```
/// use rtcm::catalog::{describe, UNKNOWN};
///
/// assert_eq!(describe(1006), "Stationary RTK Reference Station ARP with Height");
/// assert_eq!(describe(4095), UNKNOWN);
/// ```
#[must_use]
pub fn describe(msg_type: MsgType) -> &'static str {
    CATALOG
        .iter()
        .find(|(t, _)| *t == msg_type)
        .map_or(UNKNOWN, |(_, desc)| *desc)
}

/// All cataloged `(type, description)` pairs in ascending type order.
pub fn entries() -> impl Iterator<Item = (MsgType, &'static str)> {
    CATALOG.iter().copied()
}

#[must_use]
pub fn is_station_coordinates(msg_type: MsgType) -> bool {
    STATION_COORDINATES.contains(&msg_type)
}

#[must_use]
pub fn is_observable(msg_type: MsgType) -> bool {
    msm(msg_type).is_some()
}

/// True for the MSM7 (full resolution) observable messages.
#[must_use]
pub fn is_high_precision(msg_type: MsgType) -> bool {
    msm(msg_type).is_some_and(|m| m.level == 7)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Constellation {
    Gps,
    Glonass,
    Galileo,
    Beidou,
}

impl Constellation {
    /// Message number of MSM level 0 for this constellation, e.g., 1070 for GPS.
    fn msm_base(self) -> MsgType {
        match self {
            Self::Gps => 1070,
            Self::Glonass => 1080,
            Self::Galileo => 1090,
            Self::Beidou => 1120,
        }
    }
}

/// Multiple Signal Message classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Msm {
    pub constellation: Constellation,
    /// MSM level, 4 through 7.
    pub level: u8,
}

/// Classify `msg_type` as an MSM4-7 observable message.
#[must_use]
pub fn msm(msg_type: MsgType) -> Option<Msm> {
    [
        Constellation::Gps,
        Constellation::Glonass,
        Constellation::Galileo,
        Constellation::Beidou,
    ]
    .into_iter()
    .find_map(|constellation| {
        let level = msg_type.checked_sub(constellation.msm_base())?;
        if (4..=7).contains(&level) {
            Some(Msm {
                constellation,
                level: u8::try_from(level).ok()?,
            })
        } else {
            None
        }
    })
}
