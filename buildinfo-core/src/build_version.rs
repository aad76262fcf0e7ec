//! Process-wide build provenance.
//!
//! All three values are `const` items fixed when this crate is compiled. The
//! build script may provision real values through the `ROCKSDB_BUILD_GIT_SHA`,
//! `ROCKSDB_BUILD_GIT_DATE` and `ROCKSDB_BUILD_COMPILE_DATE` variables; when it
//! does not, the sentinels below are compiled in verbatim.

/// Revision id reported when no commit hash was provisioned.
pub const SOURCE_REVISION_ID_SENTINEL: &str = "rocksdb_build_git_sha:None";

/// Revision date reported when no commit date was provisioned.
pub const SOURCE_REVISION_DATE_SENTINEL: &str = "rocksdb_build_git_date:None";

/// Compile date reported when no compile date was provisioned.
pub const BUILD_COMPILE_DATE_SENTINEL: &str = "None";

/// Version-control commit this binary was built from.
pub const SOURCE_REVISION_ID: &str = resolve(
    option_env!("ROCKSDB_BUILD_GIT_SHA"),
    SOURCE_REVISION_ID_SENTINEL,
);

/// Commit date of [`SOURCE_REVISION_ID`].
pub const SOURCE_REVISION_DATE: &str = resolve(
    option_env!("ROCKSDB_BUILD_GIT_DATE"),
    SOURCE_REVISION_DATE_SENTINEL,
);

/// Wall-clock date this binary was compiled.
pub const BUILD_COMPILE_DATE: &str = resolve(
    option_env!("ROCKSDB_BUILD_COMPILE_DATE"),
    BUILD_COMPILE_DATE_SENTINEL,
);

/// Pick a provisioned value, falling back to `sentinel` when the value is
/// absent or empty.
pub const fn resolve(provisioned: Option<&'static str>, sentinel: &'static str) -> &'static str {
    match provisioned {
        Some(value) if !value.is_empty() => value,
        _ => sentinel,
    }
}

/// Returns the source revision id, e.g. `rocksdb_build_git_sha:<sha>`.
#[must_use]
pub const fn get_source_revision_id() -> &'static str {
    SOURCE_REVISION_ID
}

/// Returns the commit date of the source revision.
#[must_use]
pub const fn get_source_revision_date() -> &'static str {
    SOURCE_REVISION_DATE
}

/// Returns the date this binary was compiled.
#[must_use]
pub const fn get_build_compile_date() -> &'static str {
    BUILD_COMPILE_DATE
}
