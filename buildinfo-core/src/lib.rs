pub mod build_version;
pub mod config;
pub mod error;
pub mod identity;
pub mod properties;
#[cfg(test)]
mod provision;

use std::collections::BTreeMap;

use serde::Serialize;

pub use build_version::{get_build_compile_date, get_source_revision_date, get_source_revision_id};
pub use config::{CliOverrides, OutputFormat, ReportConfig};
pub use identity::BuildIdentity;

/// Everything a version command reports about one build.
///
/// Build one from a [`ReportConfig`] and render it as text with
/// [`VersionReport::summary`], or serialize it as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct VersionReport {
    pub program: String,
    pub version: String,
    pub identity: BuildIdentity,
    pub properties: BTreeMap<String, String>,
    pub provisioned: bool,
    #[serde(skip)]
    verbose: bool,
}

impl VersionReport {
    /// Report on the running build.
    pub fn new(config: &ReportConfig) -> Self {
        Self::for_identity(config, BuildIdentity::CURRENT)
    }

    /// Report on an arbitrary identity.
    pub fn for_identity(config: &ReportConfig, identity: BuildIdentity) -> Self {
        Self {
            program: config.program.clone(),
            version: properties::version_string(true),
            identity,
            properties: properties::properties_of(&identity),
            provisioned: identity.is_provisioned(),
            verbose: config.verbose,
        }
    }

    /// Text rendering, honoring the configured verbosity.
    pub fn summary(&self) -> String {
        properties::format_build_info(&self.identity, &self.program, self.verbose)
    }
}
