//! Explicit inputs for option builders
//!
//! The builders never consult process-wide state. Whatever the caller knows
//! about the site under test (its manifest, where the manifest was served
//! from, and the app URL) is passed in through [`PublishContext`].

use crate::manifest::{non_empty, WebManifest};

/// Site information available to the option builders
#[derive(Debug, Clone, Default)]
pub struct PublishContext {
    /// Manifest fetched for the site
    pub manifest: Option<WebManifest>,
    /// URL the manifest was served from
    pub manifest_url: Option<String>,
    /// URL of the web application
    pub app_url: Option<String>,
}

impl PublishContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the manifest
    pub fn with_manifest(mut self, manifest: WebManifest) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// Set the manifest URL
    pub fn with_manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = Some(url.into());
        self
    }

    /// Set the application URL
    pub fn with_app_url(mut self, url: impl Into<String>) -> Self {
        self.app_url = Some(url.into());
        self
    }

    /// Application URL, trimmed, if set and non-empty
    pub fn app_url(&self) -> Option<&str> {
        non_empty(self.app_url.as_deref()).map(str::trim)
    }

    /// Manifest URL, trimmed, if set and non-empty
    pub fn manifest_url(&self) -> Option<&str> {
        non_empty(self.manifest_url.as_deref()).map(str::trim)
    }
}
