//! CRC-24Q frame integrity.
//!
//! RTCM3 protects the header and payload with CRC-24Q (poly 0x1864CFB, zero
//! init, no reflection, no xorout). Those are the CRC-24/LTE-A catalog
//! parameters.
use crc::{Crc, CRC_24_LTE_A};

use crate::frame::CRC_LEN;

const CRC24Q: Crc<u32> = Crc::<u32>::new(&CRC_24_LTE_A);

/// Compute the CRC-24Q of `dat`.
#[must_use]
pub fn crc24q(dat: &[u8]) -> u32 {
    CRC24Q.checksum(dat)
}

/// Verify a complete frame, i.e., header, payload and the trailing 3 CRC bytes.
///
/// Returns false if `frame` is too short to hold a CRC.
#[must_use]
pub fn verify(frame: &[u8]) -> bool {
    if frame.len() < CRC_LEN {
        return false;
    }
    let (dat, tail) = frame.split_at(frame.len() - CRC_LEN);
    let expected = u32::from_be_bytes([0, tail[0], tail[1], tail[2]]);
    crc24q(dat) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const MSG_1005: [u8; 25] = [
        0xd3, 0x00, 0x13,
        0x3e, 0xd7, 0xd3, 0x02, 0x02, 0x98, 0x0e, 0xde, 0xef, 0x34, 0xb4, 0xbd, 0x62,
        0xac, 0x09, 0x41, 0x98, 0x6f, 0x33,
        0x36, 0x0b, 0x98,
    ];

    #[test]
    fn check_value() {
        assert_eq!(crc24q(b"123456789"), 0x00cd_e703);
    }

    #[test]
    fn verify_known_frame() {
        assert!(verify(&MSG_1005));
    }

    #[test]
    fn verify_corrupted_frame() {
        let mut dat = MSG_1005;
        dat[10] ^= 0x01;
        assert!(!verify(&dat));
    }

    #[test]
    fn verify_short_input() {
        assert!(!verify(&[0x36, 0x0b]));
    }
}
