//! Runtime settings.
//!
//! Everything that depends on the machine rather than on the request: where
//! "home" is, which external programs to run and how long to wait on the
//! network. The binary fills this in from flags and environment variables.

use std::path::PathBuf;
use std::time::Duration;

/// Default program used to clone repositories.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Default program used to convert documents and sites to markdown.
pub const DEFAULT_CONVERTER_PROGRAM: &str = "markitdown";

/// Default timeout for each fast-path probe request.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Overrides the user's home directory.
    pub home: Option<PathBuf>,
    pub git_program: String,
    pub converter_program: String,
    pub probe_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            home: None,
            git_program: DEFAULT_GIT_PROGRAM.to_string(),
            converter_program: DEFAULT_CONVERTER_PROGRAM.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl Settings {
    /// The home directory: the override, the platform's, or `.` as a last resort.
    pub fn home_dir(&self) -> PathBuf {
        self.home
            .clone()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_override_wins() {
        let settings = Settings {
            home: Some(PathBuf::from("/srv/forge")),
            ..Settings::default()
        };
        assert_eq!(settings.home_dir(), PathBuf::from("/srv/forge"));
    }

    #[test]
    fn defaults_name_standard_tools() {
        let settings = Settings::default();
        assert_eq!(settings.git_program, "git");
        assert_eq!(settings.converter_program, "markitdown");
        assert_eq!(settings.probe_timeout, Duration::from_secs(5));
    }
}
