//! Build metadata embedded by `build.rs`.
//!
//! `GET /` reports only [`PKG_VERSION`]; `psychoguardd` logs the full
//! [`BUILD`] line at startup so deployed binaries can be traced to a commit.

use std::fmt;

/// Package version from Cargo.toml.
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

const fn or_unknown(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) => value,
        None => "unknown",
    }
}

/// Where and when this binary was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    pub branch: &'static str,
    pub commit: &'static str,
    pub built_at: &'static str,
    dirty: Option<&'static str>,
}

/// Metadata of the running build. Missing git data reads as "unknown".
pub const BUILD: BuildInfo = BuildInfo {
    version: PKG_VERSION,
    branch: or_unknown(option_env!("VERGEN_GIT_BRANCH")),
    commit: or_unknown(option_env!("VERGEN_GIT_SHA")),
    built_at: or_unknown(option_env!("VERGEN_BUILD_TIMESTAMP")),
    dirty: option_env!("VERGEN_GIT_DIRTY"),
};

impl BuildInfo {
    /// First seven characters of the commit SHA.
    pub fn short_commit(&self) -> &'static str {
        self.commit.get(..7).unwrap_or(self.commit)
    }

    /// Whether the working tree had uncommitted changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty == Some("true")
    }
}

impl fmt::Display for BuildInfo {
    /// `{version}+{branch}.{sha}`, with `.dirty` appended for dirty trees.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}.{}", self.version, self.branch, self.short_commit())?;
        if self.is_dirty() {
            f.write_str(".dirty")?;
        }
        Ok(())
    }
}

/// Full version line of the running build.
pub fn version_string() -> String {
    BUILD.to_string()
}
