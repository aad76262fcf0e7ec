//! Provisioning rules applied by the build script.
//!
//! Compiled into `build.rs` through `#[path]`, and into the library only for
//! its unit tests. Everything here is a pure function of the build
//! environment, git output and the current time.

use chrono::{DateTime, Utc};

pub const DISABLE_VAR: &str = "ROCKSDB_DISABLE_BUILD_PROVENANCE";
pub const GIT_SHA_VAR: &str = "ROCKSDB_BUILD_GIT_SHA";
pub const GIT_DATE_VAR: &str = "ROCKSDB_BUILD_GIT_DATE";
pub const COMPILE_DATE_VAR: &str = "ROCKSDB_BUILD_COMPILE_DATE";
pub const SOURCE_DATE_EPOCH_VAR: &str = "SOURCE_DATE_EPOCH";

pub const GIT_SHA_LABEL: &str = "rocksdb_build_git_sha";
pub const GIT_DATE_LABEL: &str = "rocksdb_build_git_date";

/// Environment variables whose change must re-run the build script.
pub const WATCHED_VARS: [&str; 5] = [
    DISABLE_VAR,
    GIT_SHA_VAR,
    GIT_DATE_VAR,
    COMPILE_DATE_VAR,
    SOURCE_DATE_EPOCH_VAR,
];

/// Prefix `value` with `<label>:` unless it already carries that label.
pub fn labeled(label: &str, value: &str) -> String {
    match value.strip_prefix(label) {
        Some(rest) if rest.starts_with(':') => value.to_string(),
        _ => format!("{}:{}", label, value),
    }
}

/// Compile timestamp as `YYYY-MM-DD HH:MM:SS` UTC.
///
/// A set `SOURCE_DATE_EPOCH` replaces `now`; if it does not parse as whole
/// seconds, there is no compile date at all.
pub fn compile_date(source_date_epoch: Option<&str>, now: DateTime<Utc>) -> Option<String> {
    let when = match source_date_epoch {
        Some(epoch) => {
            let secs = epoch.trim().parse::<i64>().ok()?;
            DateTime::from_timestamp(secs, 0)?
        }
        None => now,
    };
    Some(when.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// The `rustc-env` assignments the build script emits.
///
/// Values already present in the build environment win over git. With
/// provenance disabled every key is assigned an empty value, which the
/// provider reads as "not provisioned" even if the key is also set in the
/// inherited environment.
pub fn plan<E, G>(env: E, git: G, now: DateTime<Utc>) -> Vec<(&'static str, String)>
where
    E: Fn(&str) -> Option<String>,
    G: Fn(&[&str]) -> Option<String>,
{
    let env = |key: &str| non_empty(env(key));

    if env(DISABLE_VAR).is_some() {
        return vec![
            (GIT_SHA_VAR, String::new()),
            (GIT_DATE_VAR, String::new()),
            (COMPILE_DATE_VAR, String::new()),
        ];
    }

    let mut out = Vec::new();

    let sha = env(GIT_SHA_VAR).or_else(|| non_empty(git(&["rev-parse", "HEAD"])));
    if let Some(sha) = sha {
        out.push((GIT_SHA_VAR, labeled(GIT_SHA_LABEL, &sha)));
    }

    let date = env(GIT_DATE_VAR).or_else(|| non_empty(git(&["log", "-1", "--format=%cI"])));
    if let Some(date) = date {
        out.push((GIT_DATE_VAR, labeled(GIT_DATE_LABEL, &date)));
    }

    let compiled = env(COMPILE_DATE_VAR)
        .or_else(|| compile_date(env(SOURCE_DATE_EPOCH_VAR).as_deref(), now));
    if let Some(compiled) = compiled {
        out.push((COMPILE_DATE_VAR, compiled));
    }

    out
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_714_557_600, 0).unwrap()
    }

    fn env_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn fake_git(args: &[&str]) -> Option<String> {
        match args {
            ["rev-parse", "HEAD"] => Some("9b1e4f7c0d\n".to_string()),
            ["log", "-1", "--format=%cI"] => Some("2024-05-01T10:00:00+02:00\n".to_string()),
            _ => None,
        }
    }

    fn no_git(_: &[&str]) -> Option<String> {
        None
    }

    fn run(pairs: &[(&str, &str)], with_git: bool) -> HashMap<&'static str, String> {
        let vars = env_of(pairs);
        let git = if with_git { fake_git } else { no_git };
        plan(|k: &str| vars.get(k).cloned(), git, now())
            .into_iter()
            .collect()
    }

    #[test]
    fn test_labeled_adds_missing_label() {
        assert_eq!(labeled(GIT_SHA_LABEL, "abc123"), "rocksdb_build_git_sha:abc123");
    }

    #[test]
    fn test_labeled_keeps_existing_label() {
        assert_eq!(
            labeled(GIT_SHA_LABEL, "rocksdb_build_git_sha:abc123"),
            "rocksdb_build_git_sha:abc123"
        );
        // A different label is treated as part of the value.
        assert_eq!(
            labeled(GIT_SHA_LABEL, "rocksdb_build_git_shadow:1"),
            "rocksdb_build_git_sha:rocksdb_build_git_shadow:1"
        );
    }

    #[test]
    fn test_compile_date_uses_now() {
        assert_eq!(
            compile_date(None, now()).as_deref(),
            Some("2024-05-01 10:00:00")
        );
    }

    #[test]
    fn test_compile_date_source_date_epoch() {
        assert_eq!(
            compile_date(Some(" 0 "), now()).as_deref(),
            Some("1970-01-01 00:00:00")
        );
    }

    #[test]
    fn test_compile_date_unparseable_epoch() {
        assert_eq!(compile_date(Some("yesterday"), now()), None);
    }

    #[test]
    fn test_plan_from_git() {
        let out = run(&[], true);
        assert_eq!(out[GIT_SHA_VAR], "rocksdb_build_git_sha:9b1e4f7c0d");
        assert_eq!(out[GIT_DATE_VAR], "rocksdb_build_git_date:2024-05-01T10:00:00+02:00");
        assert_eq!(out[COMPILE_DATE_VAR], "2024-05-01 10:00:00");
    }

    #[test]
    fn test_plan_without_git() {
        let out = run(&[], false);
        assert!(!out.contains_key(GIT_SHA_VAR));
        assert!(!out.contains_key(GIT_DATE_VAR));
        assert_eq!(out[COMPILE_DATE_VAR], "2024-05-01 10:00:00");
    }

    #[test]
    fn test_plan_injected_values_win() {
        let out = run(
            &[
                (GIT_SHA_VAR, "abc123"),
                (GIT_DATE_VAR, "rocksdb_build_git_date:2023-01-01"),
                (COMPILE_DATE_VAR, "2023-01-02 03:04:05"),
            ],
            true,
        );
        assert_eq!(out[GIT_SHA_VAR], "rocksdb_build_git_sha:abc123");
        assert_eq!(out[GIT_DATE_VAR], "rocksdb_build_git_date:2023-01-01");
        assert_eq!(out[COMPILE_DATE_VAR], "2023-01-02 03:04:05");
    }

    #[test]
    fn test_plan_empty_injection_falls_back_to_git() {
        let out = run(&[(GIT_SHA_VAR, "  ")], true);
        assert_eq!(out[GIT_SHA_VAR], "rocksdb_build_git_sha:9b1e4f7c0d");
    }

    #[test]
    fn test_plan_source_date_epoch() {
        let out = run(&[(SOURCE_DATE_EPOCH_VAR, "86400")], false);
        assert_eq!(out[COMPILE_DATE_VAR], "1970-01-02 00:00:00");

        let out = run(&[(SOURCE_DATE_EPOCH_VAR, "not-a-number")], false);
        assert!(!out.contains_key(COMPILE_DATE_VAR));
    }

    #[test]
    fn test_plan_disabled_blanks_every_key() {
        let out = run(&[(DISABLE_VAR, "1"), (GIT_SHA_VAR, "abc123")], true);
        assert_eq!(out.len(), 3);
        assert!(out.values().all(|v| v.is_empty()));
    }

    #[test]
    fn test_plan_injected_sha_parses_as_property() {
        let out = run(&[(GIT_SHA_VAR, "abc123")], false);
        assert_eq!(
            crate::properties::parse_property(&out[GIT_SHA_VAR]),
            Some(("rocksdb_build_git_sha", "abc123"))
        );
    }

    #[test]
    fn test_disable_empty_value_is_ignored() {
        let out = run(&[(DISABLE_VAR, "")], true);
        assert_eq!(out[GIT_SHA_VAR], "rocksdb_build_git_sha:9b1e4f7c0d");
    }

    #[test]
    fn test_watched_vars() {
        assert!(WATCHED_VARS.contains(&DISABLE_VAR));
        assert!(WATCHED_VARS.contains(&SOURCE_DATE_EPOCH_VAR));
    }
}
