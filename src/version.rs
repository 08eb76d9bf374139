//! Build metadata baked in by the build script.

use std::fmt;

/// Version, commit, and toolchain details shown by `--version`.
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    pub commit: Option<&'static str>,
    pub build_date: Option<&'static str>,
    pub rustc_version: Option<&'static str>,
}

impl BuildInfo {
    /// Metadata for the running binary. Commit, date, and toolchain are
    /// absent when the build script could not determine them.
    pub fn current() -> Self {
        BuildInfo {
            version: env!("CARGO_PKG_VERSION"),
            commit: option_env!("OLMO_EVAL_GIT_HASH"),
            build_date: option_env!("OLMO_EVAL_BUILD_DATE"),
            rustc_version: option_env!("OLMO_EVAL_RUSTC_VERSION"),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)?;
        if let Some(commit) = self.commit {
            write!(f, " ({})", commit)?;
        }
        if let Some(date) = self.build_date {
            write!(f, "\nbuilt: {}", date)?;
        }
        if let Some(rustc) = self.rustc_version {
            write!(f, "\nrustc: {}", rustc)?;
        }
        Ok(())
    }
}

/// Long version string for the CLI's `--version` flag.
pub fn long_version() -> String {
    BuildInfo::current().to_string()
}
