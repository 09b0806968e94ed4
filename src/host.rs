//! Inbound message contract with the host platform.
//!
//! The host pushes structured messages over an opaque channel; only
//! `propertiesChange` is acted upon. `vizData` and `settings` are
//! independently optional slices: a message carrying one of the two updates
//! only that slice of state. Anything malformed is dropped silently, the
//! widget just waits for the next message.

use crate::cards::VizData;
use serde::Deserialize;
use tracing::debug;

/// The only message type the widget reacts to.
pub const PROPERTIES_CHANGE: &str = "propertiesChange";

/// Default column count when the host has not supplied one.
pub const DEFAULT_COLUMNS: u16 = 4;
/// Default grid gap in host pixel units.
pub const DEFAULT_GAP: u16 = 16;

/// Host settings surface. Only the layout keys are recognized; unknown keys
/// are ignored by deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub layout: Option<LayoutSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LayoutSettings {
    #[serde(default)]
    pub columns: Option<u16>,
    #[serde(default)]
    pub gap: Option<u16>,
}

impl Settings {
    pub fn columns(&self) -> u16 {
        self.layout
            .as_ref()
            .and_then(|l| l.columns)
            .unwrap_or(DEFAULT_COLUMNS)
            .max(1)
    }

    /// Gap in host pixel units.
    pub fn gap(&self) -> u16 {
        self.layout.as_ref().and_then(|l| l.gap).unwrap_or(DEFAULT_GAP)
    }
}

/// The `data` payload of a host message.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageData {
    #[serde(default)]
    pub viz_data: Option<VizData>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

/// A host message envelope: `type` plus an optional `data` payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub data: Option<MessageData>,
}

impl Envelope {
    pub fn is_properties_change(&self) -> bool {
        self.kind == PROPERTIES_CHANGE
    }
}

/// Parse one raw message. Non-JSON input, non-object payloads and
/// wrong-shaped slices all yield `None`; the caller drops them.
pub fn parse_message(raw: &str) -> Option<Envelope> {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            debug!("dropping non-JSON host message: {e}");
            return None;
        }
    };
    if !value.is_object() {
        debug!("dropping non-object host message");
        return None;
    }
    match serde_json::from_value(value) {
        Ok(envelope) => Some(envelope),
        Err(e) => {
            debug!("dropping malformed host message: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_non_json_and_non_object_are_dropped() {
        assert_eq!(parse_message("not json"), None);
        assert_eq!(parse_message("[1, 2, 3]"), None);
        assert_eq!(parse_message("\"propertiesChange\""), None);
        assert_eq!(parse_message(""), None);
    }

    #[test]
    fn test_unrecognized_type_parses_but_is_not_properties_change() {
        let envelope = parse_message(r#"{"type": "resize", "data": {}}"#).unwrap();
        assert!(!envelope.is_properties_change());
    }

    #[test]
    fn test_settings_only_slice() {
        let envelope = parse_message(
            r#"{"type": "propertiesChange", "data": {"settings": {"layout": {"columns": 6}}}}"#,
        )
        .unwrap();
        assert!(envelope.is_properties_change());
        let data = envelope.data.unwrap();
        assert!(data.viz_data.is_none());
        let settings = data.settings.unwrap();
        assert_eq!(settings.columns(), 6);
        // Gap was not supplied: default applies.
        assert_eq!(settings.gap(), DEFAULT_GAP);
    }

    #[test]
    fn test_viz_data_only_slice() {
        let envelope = parse_message(
            r#"{
                "type": "propertiesChange",
                "data": {
                    "vizData": {
                        "datasets": [{"f": "https://a.com/x.png"}],
                        "fieldMap": {"f": {"alias": "Photo"}},
                        "locationMap": {"dimensions": ["f"]}
                    }
                }
            }"#,
        )
        .unwrap();
        let data = envelope.data.unwrap();
        assert!(data.settings.is_none());
        let viz = data.viz_data.unwrap();
        assert_eq!(viz.datasets.as_ref().map(|d| d.len()), Some(1));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.columns(), DEFAULT_COLUMNS);
        assert_eq!(settings.gap(), DEFAULT_GAP);
    }

    #[test]
    fn test_zero_columns_clamped() {
        let settings: Settings =
            serde_json::from_str(r#"{"layout": {"columns": 0}}"#).unwrap();
        assert_eq!(settings.columns(), 1);
    }
}
