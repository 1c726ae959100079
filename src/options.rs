//! Windows package request options
//!
//! [`WindowsPackageOptions`] is the JSON document the package generator
//! accepts. It is built either from a site's manifest
//! ([`WindowsPackageOptions::from_manifest`]) or from the publish form
//! ([`WindowsPackageOptions::from_form`]), and is not modified afterwards.
//!
//! ```json
//! {
//!   "name": "MyApp",
//!   "packageId": "com.example",
//!   "url": "https://example.com/",
//!   "version": "1.0.1",
//!   "allowSigning": true,
//!   "publisher": { "displayName": "Contoso, Inc.", "commonName": "CN=..." },
//!   "generateModernPackage": true,
//!   "classicPackage": { "generate": true, "version": "1.0.0", "url": "https://example.com/" },
//!   "edgeHtmlPackage": { "generate": false },
//!   "manifestUrl": "https://example.com/manifest.json",
//!   "manifest": { ... },
//!   "images": { "baseImage": "/icons/512.png", "backgroundColor": "transparent", "padding": 0.3 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::context::PublishContext;
use crate::error::{PublishError, PublishResult};
use crate::form::{field, WindowsPackageForm};
use crate::icon::select_base_icon;
use crate::manifest::WebManifest;
use crate::validation::MAX_PACKAGE_ID_LEN;

/// Package version used when none is supplied
pub const DEFAULT_VERSION: &str = "1.0.1";

/// Version of the classic (Windows 10 pre-2004) package
pub const DEFAULT_CLASSIC_VERSION: &str = "1.0.0";

/// Placeholder publisher display name for test packages
pub const DEFAULT_PUBLISHER_DISPLAY_NAME: &str = "Contoso, Inc.";

/// Placeholder publisher identity for test packages
pub const DEFAULT_PUBLISHER_COMMON_NAME: &str = "CN=3a54a224-05dd-42aa-85bd-3f3c1478fdca";

/// Background behind generated tile images
pub const DEFAULT_BACKGROUND_COLOR: &str = "transparent";

/// Padding around the base image in generated tiles
pub const DEFAULT_IMAGE_PADDING: f64 = 0.3;

// ============================================================================
// Options Structure
// ============================================================================

/// Request body for the Windows package generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowsPackageOptions {
    /// Display name of the app
    pub name: String,
    /// Package identity name (e.g. "com.example")
    pub package_id: String,
    /// URL of the web app
    pub url: String,
    /// Package version ("major.minor.build")
    pub version: String,
    /// Whether the service may sign the package
    pub allow_signing: bool,
    pub publisher: PublisherIdentity,
    /// Generate the modern (Chromium, Windows 10 2004+) package
    pub generate_modern_package: bool,
    pub classic_package: ClassicPackageOptions,
    pub edge_html_package: EdgeHtmlPackageOptions,
    /// URL the manifest was served from
    pub manifest_url: String,
    /// Copy of the manifest
    pub manifest: WebManifest,
    pub images: PackageImages,
}

/// Publisher identity from Partner Center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherIdentity {
    pub display_name: String,
    /// Distinguished name, e.g. "CN=..."
    pub common_name: String,
}

impl Default for PublisherIdentity {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_PUBLISHER_DISPLAY_NAME.to_string(),
            common_name: DEFAULT_PUBLISHER_COMMON_NAME.to_string(),
        }
    }
}

/// Classic package settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassicPackageOptions {
    pub generate: bool,
    /// Must be lower than the main package version
    pub version: String,
    pub url: String,
}

/// Legacy EdgeHTML package settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeHtmlPackageOptions {
    pub generate: bool,
}

/// Image generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageImages {
    /// Source image for all generated tiles; empty when none was found
    pub base_image: String,
    pub background_color: String,
    /// Fraction of the tile left as padding (0.0 - 1.0)
    pub padding: f64,
}

impl PackageImages {
    fn with_base_image(base_image: impl Into<String>) -> Self {
        Self {
            base_image: base_image.into(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            padding: DEFAULT_IMAGE_PADDING,
        }
    }
}

// ============================================================================
// Builders
// ============================================================================

impl WindowsPackageOptions {
    /// Build options from a manifest
    ///
    /// Uses `manifest` when given, otherwise the context's manifest. The app
    /// URL and manifest URL must both be known; the package ID is derived
    /// from the app URL's host.
    pub fn from_manifest(
        manifest: Option<&WebManifest>,
        ctx: &PublishContext,
    ) -> PublishResult<Self> {
        let manifest = manifest
            .or(ctx.manifest.as_ref())
            .ok_or(PublishError::MissingManifest)?;
        let app_url = ctx.app_url().ok_or(PublishError::MissingUrl)?;
        let manifest_url = ctx.manifest_url().ok_or(PublishError::MissingManifestUrl)?;

        let host = host_of(app_url)?;
        let package_id = generate_windows_package_id(&host);
        let base_image = select_base_icon(manifest.icons())
            .map(|icon| icon.src.clone())
            .unwrap_or_default();

        tracing::debug!(
            name = %manifest.display_name(),
            package_id = %package_id,
            url = %app_url,
            "Built Windows package options from manifest"
        );

        Ok(Self {
            name: manifest.display_name().to_string(),
            package_id,
            url: app_url.to_string(),
            version: DEFAULT_VERSION.to_string(),
            allow_signing: true,
            publisher: PublisherIdentity::default(),
            generate_modern_package: true,
            classic_package: ClassicPackageOptions {
                generate: true,
                version: DEFAULT_CLASSIC_VERSION.to_string(),
                url: app_url.to_string(),
            },
            edge_html_package: EdgeHtmlPackageOptions::default(),
            manifest_url: manifest_url.to_string(),
            manifest: manifest.clone(),
            images: PackageImages::with_base_image(base_image),
        })
    }

    /// Build options from the publish form
    ///
    /// Every filled-in field wins over the manifest or context value. Fields
    /// without a fallback (package ID, publisher) stay empty when left blank
    /// and are caught by validation.
    pub fn from_form(form: &WindowsPackageForm, ctx: &PublishContext) -> PublishResult<Self> {
        let manifest = ctx.manifest.as_ref().ok_or(PublishError::MissingManifest)?;

        let name = field(&form.app_name).unwrap_or_else(|| manifest.display_name());
        let url = field(&form.url).or(ctx.app_url()).unwrap_or_default();
        let manifest_url = field(&form.manifest_url)
            .or(ctx.manifest_url())
            .unwrap_or_default();
        let base_image = match field(&form.icon_url) {
            Some(icon_url) => icon_url.to_string(),
            None => select_base_icon(manifest.icons())
                .map(|icon| icon.src.clone())
                .unwrap_or_default(),
        };

        Ok(Self {
            name: name.to_string(),
            package_id: form.package_id.trim().to_string(),
            url: url.to_string(),
            version: field(&form.app_version)
                .unwrap_or(DEFAULT_VERSION)
                .to_string(),
            allow_signing: true,
            publisher: PublisherIdentity {
                display_name: form.publisher_display_name.trim().to_string(),
                common_name: form.publisher_id.trim().to_string(),
            },
            generate_modern_package: true,
            classic_package: ClassicPackageOptions {
                generate: true,
                version: DEFAULT_CLASSIC_VERSION.to_string(),
                url: url.to_string(),
            },
            edge_html_package: EdgeHtmlPackageOptions::default(),
            manifest_url: manifest_url.to_string(),
            manifest: manifest.clone(),
            images: PackageImages::with_base_image(base_image),
        })
    }
}

/// Host name of an absolute URL
fn host_of(url: &str) -> PublishResult<String> {
    let parsed =
        url::Url::parse(url).map_err(|e| PublishError::InvalidUrl(format!("{}: {}", url, e)))?;
    parsed
        .host_str()
        .map(str::to_string)
        .ok_or_else(|| PublishError::InvalidUrl(format!("{}: URL has no host", url)))
}

/// Derive a package identity name from a host name
///
/// `www.example.com` becomes `com.example`: labels are lower-cased and
/// reversed, a leading `www` is dropped, and characters Windows rejects in
/// identity names are removed. Identity names are capped at 50 characters,
/// so the most general labels are dropped first until the ID fits.
pub fn generate_windows_package_id(host: &str) -> String {
    let lower = host.trim().to_ascii_lowercase();
    let host = lower.strip_prefix("www.").unwrap_or(lower.as_str());

    let mut labels: Vec<String> = host
        .split('.')
        .rev()
        .map(|label| {
            label
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
                .trim_matches('-')
                .to_string()
        })
        .filter(|label| !label.is_empty())
        .collect();

    let joined_len = |labels: &[String]| {
        labels.iter().map(String::len).sum::<usize>() + labels.len().saturating_sub(1)
    };
    while labels.len() > 1 && joined_len(&labels) > MAX_PACKAGE_ID_LEN {
        labels.remove(0);
    }

    let mut id = labels.join(".");
    if id.len() > MAX_PACKAGE_ID_LEN {
        // Single oversized label; only ASCII remains so byte truncation is safe
        id.truncate(MAX_PACKAGE_ID_LEN);
        id.truncate(id.trim_end_matches('-').len());
    }
    id
}
