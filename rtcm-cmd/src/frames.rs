use anyhow::{Context, Result};
use rtcm::{catalog, Capture, Frame, ScanOpts, Scanner};
use serde::Serialize;
use std::{
    io::{stdout, Write},
    path::Path,
};
use tracing::debug;

use crate::render::setup_handlebars;
use crate::Format;

#[derive(Debug, Serialize)]
struct FrameInfo {
    #[serde(flatten)]
    frame: Frame,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct Listing {
    source: String,
    frames: Vec<FrameInfo>,
    count: usize,
    skipped: usize,
    strict: bool,
    crc_failures: usize,
}

fn list(capture: &Capture, opts: ScanOpts) -> Listing {
    let mut scanner = Scanner::new(capture.data(), opts);
    let frames: Vec<FrameInfo> = scanner
        .by_ref()
        .map(|frame| FrameInfo {
            frame,
            description: catalog::describe(frame.msg_type),
        })
        .collect();
    Listing {
        source: capture.name().to_string(),
        count: frames.len(),
        frames,
        skipped: scanner.skipped(),
        strict: opts.verify_crc,
        crc_failures: scanner.crc_failures(),
    }
}

/// List every frame accepted from `input`.
pub fn frames(input: &Path, format: &Format, opts: ScanOpts) -> Result<()> {
    let capture = Capture::open(input).with_context(|| format!("reading {input:?}"))?;
    let listing = list(&capture, opts);
    debug!(
        frames = listing.count,
        skipped = listing.skipped,
        "listed {}",
        listing.source
    );

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(stdout(), &listing).context("serializing to json")
        }
        Format::Text => {
            let mut hb = setup_handlebars();
            hb.register_template_string("frames", TEXT_TEMPLATE)
                .context("registering template")?;
            let data = hb.render("frames", &listing).context("rendering text")?;
            stdout()
                .write_all(str::as_bytes(&data))
                .context("writing to stdout")
        }
    }
}

const TEXT_TEMPLATE: &str = r"{{ source }}
-------------------------------------------------------------------------------
    Offset  Type  Length  Size  Description
-------------------------------------------------------------------------------
{{ #each frames }}{{ lpad 10 offset }}  {{ lpad 4 msg_type }}  {{ lpad 6 payload_len }}  {{ lpad 4 total_size }}  {{ description }}
{{ /each }}-------------------------------------------------------------------------------
Frames:  {{ count }}
Skipped: {{ skipped }} bytes
{{ #if strict }}CRC failures: {{ crc_failures }}
{{ /if }}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_frames() {
        // noise, a 1077 frame with a 2 byte payload, a truncated candidate
        let dat = vec![
            0x01, 0xd3, 0x00, 0x02, 0x43, 0x50, 0x00, 0x00, 0x00, 0xd3, 0x00, 0x40, 0x00, 0x00,
            0x00, 0x00,
        ];
        let listing = list(&Capture::from_bytes("test.bin", dat), ScanOpts::default());

        assert_eq!(listing.source, "test.bin");
        assert_eq!(listing.frames.len(), 1);
        assert_eq!(listing.frames[0].frame.offset, 1);
        assert_eq!(listing.frames[0].description, "GPS MSM7 (High precision)");
        assert_eq!(listing.skipped, 3);
        assert_eq!(listing.count, 1);
        assert!(!listing.strict);

        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["frames"][0]["msg_type"], 1077);
        assert_eq!(json["frames"][0]["total_size"], 8);
    }
}
