//! PWA Windows Pack - Windows package requests for progressive web apps
//!
//! This crate turns a web app's manifest into the options document a remote
//! Windows package generator expects, validates it, and submits it. The
//! generator answers with a zip archive holding the MSIX packages.
//!
//! # Flow
//!
//! 1. Describe the site with a [`PublishContext`] (manifest, manifest URL, app URL)
//! 2. Build [`WindowsPackageOptions`] from the manifest, or from the publish form
//! 3. Call [`generate_windows_package`] to validate and submit them
//!
//! # Quick Start
//!
//! ```no_run
//! use pwa_windows_pack::{
//!     generate_windows_package, PublishContext, PublisherConfig, WebManifest, WindowsPackage,
//!     WindowsPackageOptions,
//! };
//!
//! # fn main() -> pwa_windows_pack::PublishResult<()> {
//! let manifest = WebManifest::from_file("manifest.json")?;
//! let ctx = PublishContext::new()
//!     .with_manifest(manifest)
//!     .with_app_url("https://example.com/")
//!     .with_manifest_url("https://example.com/manifest.json");
//!
//! let options = WindowsPackageOptions::from_manifest(None, &ctx)?;
//! let config = PublisherConfig::load()?;
//! let package = generate_windows_package(Some(&options), &config)?;
//! package.save(WindowsPackage::suggested_file_name(&options))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Base Image Selection
//!
//! The icon used for tile generation is chosen by walking
//! [`ICON_FALLBACK_CHAIN`]: 512x512 PNG, 192x192 PNG, the same sizes as JPEG,
//! the same sizes of any type, then any PNG, any JPEG, and finally any icon.

mod config;
mod context;
mod error;
mod form;
pub mod icon;
mod manifest;
mod options;
mod package;
mod publisher;
mod validation;

// Re-export public API
pub use config::{PublisherConfig, DEFAULT_GENERATOR_URL, GENERATOR_URL_ENV};
pub use context::PublishContext;
pub use error::{PublishError, PublishResult};
pub use form::WindowsPackageForm;
pub use icon::{find_suitable_icon, select_base_icon, IconCriteria, ICON_FALLBACK_CHAIN};
pub use manifest::{IconSize, ManifestIcon, WebManifest, DEFAULT_APP_NAME};
pub use options::{
    generate_windows_package_id, ClassicPackageOptions, EdgeHtmlPackageOptions, PackageImages,
    PublisherIdentity, WindowsPackageOptions, DEFAULT_CLASSIC_VERSION, DEFAULT_VERSION,
};
pub use package::WindowsPackage;
pub use publisher::{
    generate_windows_package, generate_windows_package_with, GeneratorResponse, HttpGenerator,
    PackageGenerator,
};
pub use validation::{validate_windows_options, PackageVersion, ValidationError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
