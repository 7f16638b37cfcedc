mod common;

use rtcm::frame::{Frame, MAX_PAYLOAD_LEN, MIN_FRAME_LEN};
use rtcm::{scan, ScanOpts, Summary};
use test_case::test_case;

use common::{build_frame, noise, random_bytes};

#[test_case(1; "seed 1")]
#[test_case(2; "seed 2")]
#[test_case(3; "seed 3")]
#[test_case(4; "seed 4")]
fn accepted_frames_hold_invariants(seed: u64) {
    // Random data is dense with false preambles, which is the worst case for
    // resynchronization.
    let dat = random_bytes(seed, 64 * 1024);
    let mut scanner = scan(&dat, ScanOpts::default());
    let mut last_end = 0;

    while let Some(frame) = scanner.next() {
        assert!(frame.offset >= last_end, "overlapping frame {frame:?}");
        assert_eq!(frame.total_size, frame.payload_len as usize + MIN_FRAME_LEN);
        assert!(frame.payload_len as usize <= MAX_PAYLOAD_LEN);
        assert!(frame.msg_type <= 0x0fff);
        assert!(frame.offset + frame.total_size <= dat.len());
        assert_eq!(scanner.cursor(), frame.offset + frame.total_size);
        last_end = scanner.cursor();
    }
}

#[test]
fn scanning_is_idempotent() {
    let mut dat = random_bytes(42, 16 * 1024);
    dat.extend(build_frame(1006, 21, None));
    dat.extend(random_bytes(43, 512));

    let first: Vec<Frame> = scan(&dat, ScanOpts::default()).collect();
    let second: Vec<Frame> = scan(&dat, ScanOpts::default()).collect();
    assert_eq!(first, second);

    let a = Summary::from_frames(first);
    let b = Summary::from_frames(second);
    assert_eq!(a.count, b.count);
    assert_eq!(a.bytes, b.bytes);
    let a_types: Vec<(u16, usize, Vec<usize>)> = a
        .types
        .iter()
        .map(|(t, s)| (*t, s.count, s.sizes.clone()))
        .collect();
    let b_types: Vec<(u16, usize, Vec<usize>)> = b
        .types
        .iter()
        .map(|(t, s)| (*t, s.count, s.sizes.clone()))
        .collect();
    assert_eq!(a_types, b_types);
}

#[test]
fn noise_without_preamble_has_no_frames() {
    let dat = noise(7, 8192);
    let mut scanner = scan(&dat, ScanOpts::default());
    assert_eq!(scanner.by_ref().count(), 0);
    assert_eq!(scanner.skipped(), dat.len() - MIN_FRAME_LEN + 1);
}

#[test]
fn frames_interleaved_with_noise() {
    let types = [1005, 1074, 1084, 1094, 1124, 1077, 1019, 1230];
    let mut dat = Vec::new();
    let mut expected_offsets = Vec::new();
    for (i, msg_type) in types.iter().enumerate() {
        dat.extend(noise(i as u64, 17 * i));
        expected_offsets.push(dat.len());
        dat.extend(build_frame(*msg_type, 10 + 40 * i, None));
    }

    for opts in [ScanOpts::default(), ScanOpts::default().with_crc(true)] {
        let frames: Vec<Frame> = scan(&dat, opts).collect();
        let got_types: Vec<u16> = frames.iter().map(|f| f.msg_type).collect();
        let got_offsets: Vec<usize> = frames.iter().map(|f| f.offset).collect();
        assert_eq!(got_types, types, "{opts:?}");
        assert_eq!(got_offsets, expected_offsets, "{opts:?}");
    }
}

#[test]
fn strict_mode_drops_random_matches() {
    // A lax scan of random data accepts false frames; CRC verification should
    // reject all of them while still finding the real one.
    let mut dat = random_bytes(99, 32 * 1024);
    let real_offset = dat.len();
    dat.extend(build_frame(1006, 21, None));

    let mut scanner = scan(&dat, ScanOpts::default().with_crc(true));
    let frames: Vec<Frame> = scanner.by_ref().collect();
    assert!(scanner.crc_failures() > 0);
    assert!(frames.iter().any(|f| f.offset == real_offset && f.msg_type == 1006));
    assert!(frames.len() < scan(&dat, ScanOpts::default()).count());
}

#[test]
fn final_frame_longer_than_buffer() {
    let mut dat = build_frame(1005, 19, None);
    let first_len = dat.len();
    // declares 200 bytes of payload, only 100 follow
    let mut tail = build_frame(1077, 200, None);
    tail.truncate(100);
    dat.extend(&tail);

    let mut scanner = scan(&dat, ScanOpts::default());
    assert_eq!(scanner.next().map(|f| f.msg_type), Some(1005));
    assert_eq!(scanner.cursor(), first_len);
    assert_eq!(scanner.next(), None);
    assert_eq!(scanner.skipped(), tail.len() - MIN_FRAME_LEN + 1);
}
