//! Reading incident JSON from a file or stdin.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, bail};
use pm_core::RawIncident;
use serde_json::Value;

/// Read a [`RawIncident`] from `file`, or stdin when `None` or `-`.
pub fn read_incident(file: Option<&Path>) -> anyhow::Result<RawIncident> {
    let text = match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read incident file {}", path.display()))?,
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read incident from stdin")?;
            text
        }
    };
    parse_incident(&text)
}

/// Parse a bare incident object or an `{"incident": {...}}` envelope.
pub fn parse_incident(text: &str) -> anyhow::Result<RawIncident> {
    let value: Value = serde_json::from_str(text).context("incident input is not valid JSON")?;

    let incident = match value {
        Value::Object(mut object) => match object.remove("incident") {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                object.insert("incident".into(), other);
                Value::Object(object)
            }
            None => Value::Object(object),
        },
        _ => bail!("incident input must be a JSON object"),
    };

    Ok(serde_json::from_value(incident)?)
}
