use serde::{Deserialize, Serialize};
use tracing::error;

const DEFAULT_FORMAT: &str = "dd-MM-yyyy";
const DEFAULT_WIDTH: u32 = 250;
const DEFAULT_COMMIT_LABEL: &str = "Set";
const DEFAULT_CANCEL_LABEL: &str = "Cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Per-field picker options, as attached to the host field.
///
/// Every field has a default, so hosts may supply any subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickerConfig {
    #[serde(rename = "mode", default)]
    pub theme: Theme,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(rename = "time", default)]
    pub show_time: bool,
    #[serde(rename = "second", default)]
    pub show_seconds: bool,
    /// Dialog width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(rename = "saveLabel", default = "default_commit_label")]
    pub commit_label: String,
    #[serde(rename = "cancelLabel", default = "default_cancel_label")]
    pub cancel_label: String,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_commit_label() -> String {
    DEFAULT_COMMIT_LABEL.to_string()
}

fn default_cancel_label() -> String {
    DEFAULT_CANCEL_LABEL.to_string()
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            format: default_format(),
            show_time: false,
            show_seconds: false,
            width: default_width(),
            commit_label: default_commit_label(),
            cancel_label: default_cancel_label(),
        }
    }
}

impl PickerConfig {
    /// Decodes the host's serialized configuration.
    ///
    /// A malformed blob never prevents the picker from opening: the error is
    /// logged and the default configuration is used instead.
    pub fn from_json(blob: &str) -> Self {
        if blob.trim().is_empty() {
            return Self::default();
        }

        match serde_json::from_str(blob) {
            Ok(config) => config,
            Err(err) => {
                error!("malformed date picker config, using defaults: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_blob_is_default() {
        assert_eq!(PickerConfig::from_json(""), PickerConfig::default());
        assert_eq!(PickerConfig::from_json("{}"), PickerConfig::default());
    }

    #[test]
    fn reads_wire_names() {
        let config = PickerConfig::from_json(
            r#"{"mode":"dark","format":"yyyy/MM/dd HH:mm","time":true,"second":true,
                "width":320,"saveLabel":"OK","cancelLabel":"Close"}"#,
        );

        assert_eq!(
            config,
            PickerConfig {
                theme: Theme::Dark,
                format: "yyyy/MM/dd HH:mm".to_string(),
                show_time: true,
                show_seconds: true,
                width: 320,
                commit_label: "OK".to_string(),
                cancel_label: "Close".to_string(),
            }
        );
    }

    #[test]
    fn partial_blob_keeps_other_defaults() {
        let config = PickerConfig::from_json(r#"{"format":"MM/dd/yyyy"}"#);
        assert_eq!(config.format, "MM/dd/yyyy");
        assert_eq!(config.width, 250);
        assert_eq!(config.commit_label, "Set");
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn malformed_blob_falls_back_to_defaults() {
        assert_eq!(
            PickerConfig::from_json("{mode: dark"),
            PickerConfig::default()
        );
        assert_eq!(
            PickerConfig::from_json(r#"{"mode":"sepia"}"#),
            PickerConfig::default()
        );
    }
}
