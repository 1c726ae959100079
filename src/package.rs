//! Generated package artifact
//!
//! The generator answers with a zip archive holding the MSIX packages and
//! install instructions. This crate treats it as opaque bytes, with a few
//! helpers for saving and inspecting it.

use sha2::{Digest, Sha256};
use std::io::{Cursor, Write};
use std::path::Path;

use crate::error::{PublishError, PublishResult};
use crate::options::WindowsPackageOptions;

/// Package archive returned by the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowsPackage {
    bytes: Vec<u8>,
}

impl WindowsPackage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Raw archive bytes, exactly as received
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lower-case hex SHA256 of the archive
    pub fn sha256(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.bytes);
        format!("{:x}", hasher.finalize())
    }

    /// File names inside the archive
    pub fn entries(&self) -> PublishResult<Vec<String>> {
        let archive = zip::ZipArchive::new(Cursor::new(&self.bytes))
            .map_err(|e| PublishError::Package(format!("Failed to read zip: {}", e)))?;
        Ok(archive.file_names().map(str::to_string).collect())
    }

    /// Write the archive to `path`, replacing any existing file atomically
    pub fn save(&self, path: impl AsRef<Path>) -> PublishResult<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(&self.bytes)?;
        temp.persist(path).map_err(|e| e.error)?;

        tracing::info!(
            path = %path.display(),
            bytes = self.bytes.len(),
            "Saved Windows package"
        );
        Ok(())
    }

    /// File name for saving the package of `options`, e.g. "My App.zip"
    pub fn suggested_file_name(options: &WindowsPackageOptions) -> String {
        let stem: String = options
            .name
            .trim()
            .chars()
            .map(|c| match c {
                '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect();
        let stem = stem.trim_end_matches(['.', ' ']);
        if stem.is_empty() {
            "package.zip".to_string()
        } else {
            format!("{}.zip", stem)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn zip_with(names: &[&str]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for name in names {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"content").unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_sha256() {
        let package = WindowsPackage::new(b"hello world".to_vec());
        assert_eq!(
            package.sha256(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn test_entries() {
        let package = WindowsPackage::new(zip_with(&["app.msixbundle", "readme.html"]));
        let mut entries = package.entries().unwrap();
        entries.sort();
        assert_eq!(entries, vec!["app.msixbundle", "readme.html"]);
    }

    #[test]
    fn test_entries_not_a_zip() {
        let package = WindowsPackage::new(b"not a zip".to_vec());
        assert!(matches!(package.entries(), Err(PublishError::Package(_))));
    }

    #[test]
    fn test_suggested_file_name() {
        let ctx = crate::context::PublishContext::new()
            .with_app_url("https://example.com/")
            .with_manifest_url("https://example.com/manifest.json");
        let mut options = WindowsPackageOptions::from_manifest(
            Some(&crate::manifest::WebManifest::default()),
            &ctx,
        )
        .unwrap();
        assert_eq!(WindowsPackage::suggested_file_name(&options), "My PWA.zip");

        options.name = "Notes: A/B?".to_string();
        assert_eq!(
            WindowsPackage::suggested_file_name(&options),
            "Notes_ A_B_.zip"
        );

        options.name = " ..".to_string();
        assert_eq!(WindowsPackage::suggested_file_name(&options), "package.zip");
    }

    #[test]
    fn test_save_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("out").join("app.zip");

        WindowsPackage::new(b"first".to_vec()).save(&path).unwrap();
        WindowsPackage::new(b"second".to_vec()).save(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
    }
}
