use anyhow::{Context, Result};
use rtcm::{Capture, Report, ScanOpts};
use serde::Serialize;
use std::{
    io::{stdout, Write},
    path::Path,
};
use tracing::info;

use crate::render::setup_handlebars;
use crate::Format;

/// Where the capture came from; named in the remediation text.
#[derive(Debug, Clone, Serialize)]
pub struct Source {
    pub caster: String,
    pub mount_point: Option<String>,
}

#[derive(Serialize)]
struct RenderData<'a> {
    report: &'a Report,
    size_kb: f64,
    caster: &'a str,
    mount_point: Option<&'a str>,
}

pub fn analyze(input: &Path, format: &Format, opts: ScanOpts, source: &Source) -> Result<()> {
    let capture = Capture::open(input).with_context(|| format!("reading {input:?}"))?;
    let report = rtcm::analyze(&capture, opts);
    info!(
        "{} frames in {} bytes from {:?}",
        report.total,
        report.size,
        capture.name()
    );

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(stdout(), &report).context("serializing to json")
        }
        Format::Text => {
            let data = render_text(&report, source).context("serializing report")?;
            stdout()
                .write_all(str::as_bytes(&data))
                .context("writing to stdout")
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn render_text(report: &Report, source: &Source) -> Result<String> {
    let mut hb = setup_handlebars();
    hb.register_template_string("report", TEXT_TEMPLATE)
        .context("registering template")?;

    let data = RenderData {
        report,
        size_kb: report.size as f64 / 1024.0,
        caster: &source.caster,
        mount_point: source.mount_point.as_deref(),
    };
    hb.render("report", &data).context("rendering text")
}

const TEXT_TEMPLATE: &str = r#"================================================================================
RTCM3 capture analysis
================================================================================
File: {{ report.source }}
Size: {{ report.size }} bytes ({{ fixed 1 size_kb }} KB)
================================================================================

{{#if report.analysis}}
Parsed {{ report.total }} RTCM3 messages

RTK key message check:
  [{{#if report.analysis.readiness.station_coordinates}}x{{else}} {{/if}}] Station coordinates (1005/1006): {{#if report.analysis.readiness.station_coordinates}}present{{else}}MISSING - this is the problem!{{/if}}
  [{{#if report.analysis.readiness.observables}}x{{else}} {{/if}}] Observables (MSM): {{#if report.analysis.readiness.observables}}present{{else}}missing{{/if}}

{{#unless report.analysis.readiness.station_coordinates}}
WARNING: no RTCM 1005/1006 station coordinate messages.
   This is the root cause of RTK not working. Without the reference
   station position the receiver cannot compute an RTK solution.

{{/unless}}
RTCM message types:
--------------------------------------------------------------------------------
Type     Count    Description                                   Mean size
--------------------------------------------------------------------------------
{{#each report.analysis.rows}}
{{ rpad 8 msg_type }} {{ rpad 8 count }} {{ rpad 45 description }} {{ fixed 0 mean_size }}B{{#if (eq annotation "station_coordinates")}}  * station coordinates{{/if}}{{#if (eq annotation "high_precision_observables")}}  * high precision observables{{/if}}
{{/each}}
--------------------------------------------------------------------------------
{{#with report.analysis.update_rate}}

GPS observables ({{ msg_type }}): {{ count }} messages
  Estimated update rate: ~{{ fixed 1 hz }} Hz (assuming the capture holds {{ window_secs }} seconds of data)
{{/with}}

Recommendations:
{{#if (eq report.analysis.remediation "switch_source")}}
  [!] Change the NTRIP mount point or caster.
      {{#if mount_point}}Mount point '{{ mount_point }}'{{else}}The current mount point{{/if}} does not send station coordinates.
      RTK requires message 1005 or 1006.

  Resolution:
      1. Open the caster source table at {{ caster }}
      2. Review the available mount points
      3. Choose a mount point that broadcasts 1005/1006
      4. Update the mountPoint setting in the receiver configuration
{{else}}
  [ok] RTCM message configuration is correct
{{#if (eq report.analysis.remediation "ready")}}
  [ok] All messages required for RTK are present
       If RTK still does not converge, check:
       - baseline distance to the station (should be < 50 km)
       - convergence time (may take 10-20 minutes)
       - receiver firmware version
{{/if}}
{{/if}}
{{else}}
WARNING: no valid RTCM3 messages found!
Likely causes:
  - the file is not in the expected format
  - the file is corrupted
  - the data is not RTCM3
{{/if}}
"#;
