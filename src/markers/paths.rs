//! Path aliasing at the serialization boundary
//!
//! Persisted and client-facing documents carry portable, home-relative paths
//! (`~/project/a.R`). In memory every path is absolute.

use std::path::{Path, PathBuf};

/// Converts between absolute paths and their portable aliased form
pub trait PathAliaser {
    /// Returns the aliased form of an absolute path
    fn alias(&self, path: &Path) -> String;

    /// Resolves an aliased path back to an absolute one
    fn resolve(&self, aliased: &str) -> PathBuf;
}

/// Aliases paths under the user's home directory as `~/...`
#[derive(Debug, Clone)]
pub struct HomeAliaser {
    home: Option<PathBuf>,
}

impl HomeAliaser {
    pub fn new() -> Self {
        Self::with_home(dirs::home_dir())
    }

    pub fn with_home(home: Option<PathBuf>) -> Self {
        Self { home }
    }
}

impl Default for HomeAliaser {
    fn default() -> Self {
        Self::new()
    }
}

impl PathAliaser for HomeAliaser {
    fn alias(&self, path: &Path) -> String {
        let Some(home) = &self.home else {
            return path.to_string_lossy().into_owned();
        };

        match path.strip_prefix(home) {
            Ok(rest) if rest.as_os_str().is_empty() => "~".to_string(),
            Ok(rest) => format!("~/{}", rest.to_string_lossy()),
            Err(_) => path.to_string_lossy().into_owned(),
        }
    }

    fn resolve(&self, aliased: &str) -> PathBuf {
        let Some(home) = &self.home else {
            return PathBuf::from(aliased);
        };

        if aliased == "~" {
            home.clone()
        } else if let Some(rest) = aliased.strip_prefix("~/") {
            home.join(rest)
        } else {
            PathBuf::from(aliased)
        }
    }
}

/// Leaves paths untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityAliaser;

impl PathAliaser for IdentityAliaser {
    fn alias(&self, path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    fn resolve(&self, aliased: &str) -> PathBuf {
        PathBuf::from(aliased)
    }
}
