//! User-entered package settings
//!
//! Field names follow the publish form (`appName`, `packageId`, ...) so a
//! submitted form can be deserialized directly. Empty strings mean "not
//! filled in" and let the builder fall back to manifest or context values.

use serde::{Deserialize, Serialize};

/// Values read from the Windows publish form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WindowsPackageForm {
    pub app_name: String,
    pub package_id: String,
    pub url: String,
    pub app_version: String,
    pub publisher_display_name: String,
    pub publisher_id: String,
    pub manifest_url: String,
    pub icon_url: String,
}

/// The field's value when filled in
pub(crate) fn field(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_partial_form() {
        let form: WindowsPackageForm =
            serde_json::from_str(r#"{"appName":"Demo","appVersion":""}"#).unwrap();
        assert_eq!(form.app_name, "Demo");
        assert!(form.app_version.is_empty());
        assert!(form.icon_url.is_empty());
    }

    #[test]
    fn test_field_trims() {
        assert_eq!(field("  2.0.0 "), Some("2.0.0"));
        assert_eq!(field("   "), None);
        assert_eq!(field(""), None);
    }
}
