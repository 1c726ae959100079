//! Submission of package requests to the Windows package generator
//!
//! One call, one POST. The options are validated locally first; nothing is
//! sent when validation fails. A 200 response carries the package archive,
//! any other status carries a plain-text explanation.

use std::io::Read;

use crate::config::PublisherConfig;
use crate::error::{PublishError, PublishResult};
use crate::options::WindowsPackageOptions;
use crate::package::WindowsPackage;
use crate::validation::validate_windows_options;

/// Raw answer from the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

/// Transport used to reach the generator
///
/// Implementations return any HTTP status as `Ok`; only failures to get a
/// response at all are errors, reported as [`PublishError::Submission`].
pub trait PackageGenerator {
    /// POST `body` as JSON to `url`
    fn post_json(&self, url: &str, body: &str) -> PublishResult<GeneratorResponse>;
}

/// Blocking HTTP transport
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    agent: ureq::Agent,
}

impl Default for HttpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpGenerator {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl PackageGenerator for HttpGenerator {
    fn post_json(&self, url: &str, body: &str) -> PublishResult<GeneratorResponse> {
        let response = match self
            .agent
            .post(url)
            .set("content-type", "application/json")
            .send_string(body)
        {
            Ok(response) => response,
            // ureq reports 4xx/5xx as errors; the caller wants the response
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => return Err(PublishError::Submission(e.to_string())),
        };

        let status = response.status();
        let status_text = response.status_text().to_string();
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| PublishError::Submission(format!("Failed to read response: {}", e)))?;

        tracing::debug!(
            target: "pwa_windows_pack::publish",
            status,
            bytes = body.len(),
            "Received generator response"
        );

        Ok(GeneratorResponse {
            status,
            status_text,
            body,
        })
    }
}

/// Validate `options` and request a package from the configured generator
pub fn generate_windows_package(
    options: Option<&WindowsPackageOptions>,
    config: &PublisherConfig,
) -> PublishResult<WindowsPackage> {
    generate_windows_package_with(&HttpGenerator::new(), options, config)
}

/// Same as [`generate_windows_package`] over a caller-supplied transport
pub fn generate_windows_package_with(
    generator: &impl PackageGenerator,
    options: Option<&WindowsPackageOptions>,
    config: &PublisherConfig,
) -> PublishResult<WindowsPackage> {
    let options = options.ok_or(PublishError::MissingOptions)?;

    let errors = validate_windows_options(options);
    if !errors.is_empty() {
        tracing::warn!(
            target: "pwa_windows_pack::publish",
            package_id = %options.package_id,
            errors = errors.len(),
            "Options failed validation - not submitting"
        );
        return Err(PublishError::InvalidOptions(errors));
    }

    let body =
        serde_json::to_string(options).map_err(|e| PublishError::Submission(e.to_string()))?;

    tracing::info!(
        target: "pwa_windows_pack::publish",
        name = %options.name,
        package_id = %options.package_id,
        url = %config.generator_url,
        "Requesting Windows package"
    );

    let response = generator.post_json(&config.generator_url, &body)?;

    if response.status != 200 {
        let details = String::from_utf8_lossy(&response.body).into_owned();
        tracing::warn!(
            target: "pwa_windows_pack::publish",
            status = response.status,
            status_text = %response.status_text,
            "Generator rejected package request"
        );
        return Err(PublishError::Service {
            status: response.status,
            status_text: response.status_text,
            details,
        });
    }

    let package = WindowsPackage::new(response.body);
    tracing::info!(
        target: "pwa_windows_pack::publish",
        package_id = %options.package_id,
        bytes = package.len(),
        sha256 = %package.sha256(),
        "Windows package generated"
    );
    Ok(package)
}
