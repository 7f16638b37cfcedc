#![allow(dead_code)]
use rand::{rngs::StdRng, Rng, SeedableRng};
use rtcm::frame::PREAMBLE;
use rtcm::integrity::crc24q;

/// Build a frame for `msg_type` with `payload_len` bytes of payload.
///
/// The payload after the message type is zero filled. The CRC is valid unless
/// `trailer` is given, in which case it is used verbatim.
pub fn build_frame(msg_type: u16, payload_len: usize, trailer: Option<[u8; 3]>) -> Vec<u8> {
    assert!((2..=1023).contains(&payload_len));
    let mut dat = vec![
        PREAMBLE,
        ((payload_len >> 8) & 0x03) as u8,
        (payload_len & 0xff) as u8,
        (msg_type >> 4) as u8,
        ((msg_type & 0x0f) << 4) as u8,
    ];
    dat.resize(3 + payload_len, 0);
    let crc = trailer.unwrap_or_else(|| {
        let crc = crc24q(&dat).to_be_bytes();
        [crc[1], crc[2], crc[3]]
    });
    dat.extend_from_slice(&crc);
    dat
}

/// Random bytes that never contain the preamble.
pub fn noise(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len)
        .map(|_| loop {
            let b: u8 = rng.gen();
            if b != PREAMBLE {
                break b;
            }
        })
        .collect()
}

/// Random bytes, preamble included.
pub fn random_bytes(seed: u64, len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen()).collect()
}
