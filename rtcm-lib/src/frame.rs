//! Locate RTCM3 frames in an unstructured byte buffer.
//!
//! An RTCM3 frame is laid out as:
//!
//! ```text
//! +----------+------------+--------------+---------------------+----------+
//! | preamble | reserved   | length       | payload             | CRC-24Q  |
//! | 8 bits   | 6 bits     | 10 bits      | length bytes, the   | 24 bits  |
//! | 0xD3     |            |              | first 12 bits are   |          |
//! |          |            |              | the message type    |          |
//! +----------+------------+--------------+---------------------+----------+
//! ```
//!
//! The [Scanner] walks the buffer byte by byte until it finds a preamble whose
//! declared frame fits in the remaining bytes, yields it, and jumps past it. A
//! candidate that does not fit (or fails the CRC in strict mode) costs exactly
//! one byte before scanning resumes, so noise and truncated tails are tolerated.
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::trace;

use crate::catalog::MsgType;
use crate::integrity;

/// Frame start marker.
pub const PREAMBLE: u8 = 0xd3;
/// Preamble plus the 2 bytes holding the reserved bits and payload length.
pub const HEADER_LEN: usize = 3;
pub const CRC_LEN: usize = 3;
/// Size of a frame with an empty payload.
pub const MIN_FRAME_LEN: usize = HEADER_LEN + CRC_LEN;
/// Largest value representable by the 10-bit length field.
pub const MAX_PAYLOAD_LEN: usize = 0x03ff;

/// Frame header fields, including the message type from the start of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Header {
    pub payload_len: u16,
    pub msg_type: MsgType,
}

impl Header {
    /// Bytes required to decode a ``Header``; the message type lives in the first
    /// 12 bits of the payload.
    pub const LEN: usize = HEADER_LEN + 2;

    /// Decode from bytes. Returns `None` if `buf` does not start with [PREAMBLE] or
    /// there are not enough bytes to construct the header.
    ///
    /// The reserved bits are not checked.
    #[must_use]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::LEN || buf[0] != PREAMBLE {
            return None;
        }
        Some(Header {
            payload_len: (u16::from(buf[1] & 0x03) << 8) | u16::from(buf[2]),
            msg_type: (u16::from(buf[3]) << 4) | u16::from(buf[4] >> 4),
        })
    }

    /// Total frame size for this header: header, payload and CRC.
    #[must_use]
    pub fn frame_len(&self) -> usize {
        HEADER_LEN + self.payload_len as usize + CRC_LEN
    }
}

/// An accepted frame. Frames do not own their bytes; see [Frame::bytes].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Frame {
    /// Offset of the preamble in the scanned buffer.
    pub offset: usize,
    pub msg_type: MsgType,
    pub payload_len: u16,
    /// `payload_len` plus header and CRC.
    pub total_size: usize,
}

impl Frame {
    /// The frame's bytes in `buf`, which must be the buffer this frame was scanned from.
    /// Returns `None` if `buf` is too short.
    #[must_use]
    pub fn bytes<'b>(&self, buf: &'b [u8]) -> Option<&'b [u8]> {
        buf.get(self.offset..self.offset + self.total_size)
    }
}

/// Scanner options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOpts {
    /// Reject candidates whose CRC-24Q does not match.
    pub verify_crc: bool,
}

impl ScanOpts {
    #[must_use]
    pub fn with_crc(mut self, enabled: bool) -> Self {
        self.verify_crc = enabled;
        self
    }
}

/// Iterates over the frames in a buffer in offset order.
///
/// Scanning never fails. Any preamble followed by a header whose declared
/// length fits in the buffer is accepted, unless [ScanOpts::verify_crc] is set.
pub struct Scanner<'a> {
    buf: &'a [u8],
    opts: ScanOpts,
    cursor: usize,
    skipped: usize,
    crc_failures: usize,
}

impl<'a> Scanner<'a> {
    #[must_use]
    pub fn new(buf: &'a [u8], opts: ScanOpts) -> Self {
        Scanner {
            buf,
            opts,
            cursor: 0,
            skipped: 0,
            crc_failures: 0,
        }
    }

    /// Current position in the buffer.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of bytes stepped over without producing a frame.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of candidates that fit in the buffer but failed CRC verification.
    #[must_use]
    pub fn crc_failures(&self) -> usize {
        self.crc_failures
    }

    fn candidate(&mut self) -> Option<Frame> {
        let offset = self.cursor;
        let header = Header::decode(&self.buf[offset..])?;
        let total_size = header.frame_len();
        if offset + total_size > self.buf.len() {
            trace!(offset, total_size, "frame exceeds buffer; resyncing");
            return None;
        }
        let frame = Frame {
            offset,
            msg_type: header.msg_type,
            payload_len: header.payload_len,
            total_size,
        };
        if self.opts.verify_crc && !frame.bytes(self.buf).is_some_and(integrity::verify) {
            trace!(offset, msg_type = frame.msg_type, "crc mismatch; resyncing");
            self.crc_failures += 1;
            return None;
        }
        Some(frame)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor + MIN_FRAME_LEN <= self.buf.len() {
            if let Some(frame) = self.candidate() {
                self.cursor += frame.total_size;
                return Some(frame);
            }
            self.cursor += 1;
            self.skipped += 1;
        }
        None
    }
}

/// Creates an iterator over the RTCM3 frames in `buf`.
///
/// # Example
/// ```
/// use rtcm::{scan, ScanOpts};
///
/// // leading noise, then a frame with a 2 byte payload carrying type 1077
/// let dat: &[u8] = &[0x00, 0xff, 0xd3, 0x00, 0x02, 0x43, 0x50, 0x00, 0x00, 0x00];
/// let frames: Vec<_> = scan(dat, ScanOpts::default()).collect();
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].offset, 2);
/// assert_eq!(frames[0].msg_type, 1077);
/// assert_eq!(frames[0].total_size, 8);
/// ```
#[must_use]
pub fn scan(buf: &[u8], opts: ScanOpts) -> Scanner<'_> {
    Scanner::new(buf, opts)
}
