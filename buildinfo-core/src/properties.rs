use std::collections::BTreeMap;

use crate::error::{BuildInfoError, Result};
use crate::identity::BuildIdentity;

/// Property name the compile date is reported under.
pub const COMPILE_DATE_PROPERTY: &str = "rocksdb_build_date";

/// Split a labeled provenance string of the form `<name>:<value>`.
///
/// Returns `None` when there is no colon, either side is empty, or the value
/// is a template placeholder (starts with `@`) left behind by a failed
/// substitution.
pub fn parse_property(raw: &str) -> Option<(&str, &str)> {
    let (name, value) = raw.split_once(':')?;
    if name.is_empty() || value.is_empty() || value.starts_with('@') {
        return None;
    }
    Some((name, value))
}

/// Build properties of `identity`, keyed by property name.
///
/// The revision id and date carry their own labels. The compile date has no
/// label (it may itself contain colons) and is reported under
/// [`COMPILE_DATE_PROPERTY`].
pub fn properties_of(identity: &BuildIdentity) -> BTreeMap<String, String> {
    let mut props = BTreeMap::new();
    for raw in [identity.source_revision_id, identity.source_revision_date] {
        if let Some((name, value)) = parse_property(raw) {
            props.insert(name.to_string(), value.to_string());
        }
    }

    let compile_date = identity.build_compile_date;
    if !compile_date.is_empty() && !compile_date.starts_with('@') {
        props.insert(COMPILE_DATE_PROPERTY.to_string(), compile_date.to_string());
    }
    props
}

/// Build properties of the running build.
pub fn build_properties() -> BTreeMap<String, String> {
    properties_of(&BuildIdentity::CURRENT)
}

/// Look up a single build property of the running build.
pub fn property(name: &str) -> Result<String> {
    lookup(&build_properties(), name)
}

fn lookup(props: &BTreeMap<String, String>, name: &str) -> Result<String> {
    props
        .get(name)
        .cloned()
        .ok_or_else(|| BuildInfoError::UnknownProperty {
            name: name.to_string(),
            available: props.keys().cloned().collect::<Vec<_>>().join(", "),
        })
}

/// Crate version as `MAJOR.MINOR.PATCH`, or `MAJOR.MINOR` without the patch.
pub fn version_string(with_patch: bool) -> String {
    let major = env!("CARGO_PKG_VERSION_MAJOR");
    let minor = env!("CARGO_PKG_VERSION_MINOR");
    if with_patch {
        format!("{}.{}.{}", major, minor, env!("CARGO_PKG_VERSION_PATCH"))
    } else {
        format!("{}.{}", major, minor)
    }
}

/// Human-readable build information for `identity`.
///
/// The first line is `<program> version <ver>`. With `verbose`, each build
/// property follows on its own indented line.
pub fn format_build_info(identity: &BuildIdentity, program: &str, verbose: bool) -> String {
    let mut info = format!("{} version {}", program, version_string(true));
    if verbose {
        for (key, value) in properties_of(identity) {
            info.push_str(&format!("\n    {}: {}", key, value));
        }
    }
    info
}

/// Human-readable build information for the running build.
pub fn build_info_string(program: &str, verbose: bool) -> String {
    format_build_info(&BuildIdentity::CURRENT, program, verbose)
}
