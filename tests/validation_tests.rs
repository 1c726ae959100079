//! Tests for pwa-windows-pack option validation

use pwa_windows_pack::{
    validate_windows_options, PublishContext, WebManifest, WindowsPackageOptions,
};

fn valid_options() -> WindowsPackageOptions {
    let ctx = PublishContext::new()
        .with_app_url("https://example.com/")
        .with_manifest_url("https://example.com/manifest.json");
    WindowsPackageOptions::from_manifest(Some(&WebManifest::default()), &ctx).unwrap()
}

fn messages(options: &WindowsPackageOptions) -> Vec<String> {
    validate_windows_options(options)
        .into_iter()
        .map(|e| e.error)
        .collect()
}

#[test]
fn test_valid_options() {
    assert!(messages(&valid_options()).is_empty());
}

#[test]
fn test_all_errors_reported() {
    let mut options = valid_options();
    options.name = " ".to_string();
    options.manifest_url = "manifest.json".to_string();
    options.version = "1.0".to_string();

    assert_eq!(
        messages(&options),
        vec![
            "Name is required.",
            "Manifest URL must be an absolute http or https URL.",
            "Version must be in the form major.minor.build, e.g. 1.0.1.",
        ]
    );
}

#[test]
fn test_version_must_not_start_with_zero() {
    let mut options = valid_options();
    options.version = "0.9.0".to_string();
    assert_eq!(messages(&options), vec!["Version must not start with 0."]);
}

#[test]
fn test_classic_version_must_be_lower() {
    let mut options = valid_options();
    options.version = "1.0.0".to_string();
    assert_eq!(
        messages(&options),
        vec!["Classic package version must be lower than the app version."]
    );

    options.classic_package.generate = false;
    assert!(messages(&options).is_empty());
}

#[test]
fn test_four_part_version() {
    let mut options = valid_options();
    options.version = "1.0.0.5".to_string();
    assert!(messages(&options).is_empty());
}

#[test]
fn test_publisher_common_name() {
    let mut options = valid_options();
    options.publisher.common_name = "Contoso".to_string();
    assert_eq!(messages(&options), vec!["Publisher ID must start with CN=."]);
}

#[test]
fn test_padding_range() {
    let mut options = valid_options();
    options.images.padding = 1.5;
    assert_eq!(
        messages(&options),
        vec!["Image padding must be between 0 and 1."]
    );
}

#[test]
fn test_package_id_too_long() {
    let mut options = valid_options();
    options.package_id = "a".repeat(51);
    assert_eq!(
        messages(&options),
        vec!["Package ID must be between 3 and 50 characters."]
    );
}

#[test]
fn test_at_least_one_package() {
    let mut options = valid_options();
    options.generate_modern_package = false;
    options.classic_package.generate = false;
    assert_eq!(
        messages(&options),
        vec!["At least one package type must be generated."]
    );
}

#[test]
fn test_base_image_relative_to_manifest() {
    let mut options = valid_options();
    options.images.base_image = "icons/512.png".to_string();
    assert!(messages(&options).is_empty());

    options.images.base_image = "file:///C:/icon.png".to_string();
    assert_eq!(
        messages(&options),
        vec!["Base image must be an absolute URL or a path relative to the manifest."]
    );
}
