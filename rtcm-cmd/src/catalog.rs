use anyhow::{Context, Result};
use rtcm::catalog::{self, MsgType};
use serde::Serialize;
use std::io::{stdout, Write};

use crate::render::setup_handlebars;

#[derive(Debug, Serialize)]
struct Entry {
    msg_type: MsgType,
    description: &'static str,
    station_coordinates: bool,
    msm: Option<catalog::Msm>,
}

impl Entry {
    fn new(msg_type: MsgType) -> Self {
        Self {
            msg_type,
            description: catalog::describe(msg_type),
            station_coordinates: catalog::is_station_coordinates(msg_type),
            msm: catalog::msm(msg_type),
        }
    }
}

#[derive(Debug, Serialize)]
struct CatalogRenderData {
    entries: Vec<Entry>,
}

/// Show the message catalog, or a single message type.
pub fn catalog_info(msg_type: Option<MsgType>) -> Result<()> {
    let entries = match msg_type {
        Some(msg_type) => vec![Entry::new(msg_type)],
        None => catalog::entries().map(|(t, _)| Entry::new(t)).collect(),
    };

    let mut hb = setup_handlebars();
    hb.register_template_string("catalog", TEXT_TEMPLATE)
        .context("registering template")?;
    let output = hb
        .render("catalog", &CatalogRenderData { entries })
        .context("rendering")?;
    stdout()
        .write_all(str::as_bytes(&output))
        .context("writing to stdout")
}

const TEXT_TEMPLATE: &str = r"Type  Description                                       RTK role
-------------------------------------------------------------------------------
{{ #each entries }}{{ lpad 4 msg_type }}  {{ rpad 48 description }}  {{ #if station_coordinates }}station coordinates{{ /if }}{{ #if msm }}{{ msm.constellation }} MSM{{ msm.level }} observables{{ /if }}
{{ /each }}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_roles() {
        let entry = Entry::new(1097);
        assert!(!entry.station_coordinates);
        assert_eq!(entry.msm.map(|m| m.level), Some(7));

        let entry = Entry::new(1006);
        assert!(entry.station_coordinates);
        assert!(entry.msm.is_none());

        let entry = Entry::new(2000);
        assert_eq!(entry.description, catalog::UNKNOWN);
    }

    #[test]
    fn render_entry() {
        let mut hb = setup_handlebars();
        hb.register_template_string("catalog", TEXT_TEMPLATE)
            .unwrap();
        let out = hb
            .render(
                "catalog",
                &CatalogRenderData {
                    entries: vec![Entry::new(1127)],
                },
            )
            .unwrap();
        assert!(out.contains("1127  BeiDou MSM7 (High precision)"));
        assert!(out.contains("Beidou MSM7 observables"));
    }
}
