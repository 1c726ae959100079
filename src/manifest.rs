//! Web app manifest model
//!
//! Only the members the Windows packager reads are typed, and they are
//! read-only. The parsed JSON document is kept as-is, so the copy embedded in
//! the package request matches what the site published, nulls included.
//!
//! ```json
//! {
//!   "name": "My Progressive App",
//!   "short_name": "MyApp",
//!   "start_url": "/",
//!   "icons": [
//!     { "src": "/icons/512.png", "sizes": "512x512", "type": "image/png" },
//!     { "src": "/icons/mask.png", "sizes": "512x512", "purpose": "maskable" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{PublishError, PublishResult};

/// Name used when the manifest declares neither `short_name` nor `name`
pub const DEFAULT_APP_NAME: &str = "My PWA";

// ============================================================================
// Root Manifest Structure
// ============================================================================

/// Parsed web app manifest
///
/// Serializes back to exactly the document it was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct WebManifest {
    members: ManifestMembers,
    document: Value,
}

/// Typed view of the members the packager reads
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct ManifestMembers {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    short_name: Option<String>,
    #[serde(default)]
    start_url: Option<String>,
    #[serde(default)]
    display: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    theme_color: Option<String>,
    /// `null` is treated like an absent member
    #[serde(default, deserialize_with = "null_as_empty")]
    icons: Vec<ManifestIcon>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<ManifestIcon>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<ManifestIcon>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for WebManifest {
    fn default() -> Self {
        Self {
            members: ManifestMembers::default(),
            document: Value::Object(Map::new()),
        }
    }
}

impl Serialize for WebManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WebManifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let document = Value::deserialize(deserializer)?;
        Self::from_value(document).map_err(<D::Error as serde::de::Error>::custom)
    }
}

impl WebManifest {
    /// Load manifest from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> PublishResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PublishError::InvalidManifest(format!(
                "Failed to read manifest file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Parse manifest from a JSON string
    pub fn parse(content: &str) -> PublishResult<Self> {
        let document: Value = serde_json::from_str(content)
            .map_err(|e| PublishError::InvalidManifest(format!("Failed to parse manifest: {}", e)))?;
        Self::from_value(document)
    }

    /// Build a manifest from an already parsed JSON document
    pub fn from_value(document: Value) -> PublishResult<Self> {
        if !document.is_object() {
            return Err(PublishError::InvalidManifest(
                "Manifest must be a JSON object".to_string(),
            ));
        }
        let members = ManifestMembers::deserialize(&document)
            .map_err(|e| PublishError::InvalidManifest(format!("Failed to parse manifest: {}", e)))?;
        Ok(Self { members, document })
    }

    /// Full application name
    pub fn name(&self) -> Option<&str> {
        self.members.name.as_deref()
    }

    /// Short application name (preferred for package display name)
    pub fn short_name(&self) -> Option<&str> {
        self.members.short_name.as_deref()
    }

    /// Start URL, possibly relative to the manifest
    pub fn start_url(&self) -> Option<&str> {
        self.members.start_url.as_deref()
    }

    /// Display mode (standalone, fullscreen, ...)
    pub fn display(&self) -> Option<&str> {
        self.members.display.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.members.description.as_deref()
    }

    pub fn background_color(&self) -> Option<&str> {
        self.members.background_color.as_deref()
    }

    pub fn theme_color(&self) -> Option<&str> {
        self.members.theme_color.as_deref()
    }

    /// Declared icons, in manifest order
    pub fn icons(&self) -> &[ManifestIcon] {
        &self.members.icons
    }

    /// Any member of the document, typed or not
    pub fn get(&self, member: &str) -> Option<&Value> {
        self.document.get(member)
    }

    /// The document as published
    pub fn as_value(&self) -> &Value {
        &self.document
    }

    /// Display name: `short_name`, then `name`, then [`DEFAULT_APP_NAME`]
    pub fn display_name(&self) -> &str {
        non_empty(self.short_name())
            .or_else(|| non_empty(self.name()))
            .unwrap_or(DEFAULT_APP_NAME)
    }
}

// ============================================================================
// Icons
// ============================================================================

/// Icon declared in the manifest's `icons` member
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManifestIcon {
    /// Image URL, possibly relative to the manifest
    pub src: String,

    /// Space-separated `WxH` list, or `any` for scalable images
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,

    /// MIME type (e.g. "image/png")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Space-separated purposes; absent means `any`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

/// A single entry of an icon's `sizes` list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    /// Fixed pixel dimensions
    Fixed { width: u32, height: u32 },
    /// Scalable image (`sizes: "any"`)
    Any,
}

impl IconSize {
    /// Parse one `sizes` token such as `192x192` or `any`
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.eq_ignore_ascii_case("any") {
            return Some(Self::Any);
        }
        let lower = token.to_ascii_lowercase();
        let (w, h) = lower.split_once('x')?;
        Some(Self::Fixed {
            width: w.parse().ok()?,
            height: h.parse().ok()?,
        })
    }

    /// Whether this size can be used for a `width`x`height` image without upscaling
    pub fn covers(&self, width: u32, height: u32) -> bool {
        match *self {
            Self::Any => true,
            Self::Fixed {
                width: w,
                height: h,
            } => w >= width && h >= height,
        }
    }
}

impl ManifestIcon {
    /// Create an icon with the given source, sizes and type
    pub fn new(src: impl Into<String>, sizes: &str, mime_type: Option<&str>) -> Self {
        Self {
            src: src.into(),
            sizes: Some(sizes.to_string()),
            mime_type: mime_type.map(str::to_string),
            purpose: None,
        }
    }

    /// Parsed `sizes` entries; unparsable tokens are skipped
    pub fn parsed_sizes(&self) -> Vec<IconSize> {
        self.sizes
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .filter_map(IconSize::parse)
            .collect()
    }

    /// Whether the icon declares exactly `width`x`height`
    pub fn has_size(&self, width: u32, height: u32) -> bool {
        self.parsed_sizes()
            .contains(&IconSize::Fixed { width, height })
    }

    /// Whether the icon's purpose list includes `purpose` (absent means `any`)
    pub fn has_purpose(&self, purpose: &str) -> bool {
        match non_empty(self.purpose.as_deref()) {
            None => purpose == "any",
            Some(p) => p.split_whitespace().any(|p| p.eq_ignore_ascii_case(purpose)),
        }
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
