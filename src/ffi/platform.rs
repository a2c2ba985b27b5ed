//! Platform Resolver
//!
//! Maps a logical library name onto the file name the host's dynamic
//! loader expects. Resolution is pure: nothing here touches the filesystem.

use std::fmt;
use std::path::{Path, PathBuf};

use super::{FfiError, FfiResult};

/// Platforms with a known shared-library naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `<name>.dll`
    Windows,
    /// `lib<name>.so`
    Linux,
    /// `lib<name>.dylib`
    MacOs,
}

impl Platform {
    /// Parse a runtime platform identifier.
    ///
    /// Accepts both the short identifiers reported by scripting runtimes
    /// (`win32`, `linux`, `darwin`) and Rust's `target_os` names
    /// (`windows`, `macos`).
    pub fn from_identifier(id: &str) -> FfiResult<Self> {
        match id {
            "win32" | "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "darwin" | "macos" => Ok(Platform::MacOs),
            other => Err(FfiError::UnsupportedPlatform(other.to_string())),
        }
    }

    /// The platform this binary was compiled for
    pub fn current() -> FfiResult<Self> {
        Self::from_identifier(std::env::consts::OS)
    }

    /// Canonical identifier
    pub fn identifier(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
        }
    }

    /// Construct the platform-specific library filename
    pub fn library_filename(&self, name: &str) -> String {
        match self {
            Platform::Windows => format!("{}.dll", name),
            Platform::Linux => format!("lib{}.so", name),
            Platform::MacOs => format!("lib{}.dylib", name),
        }
    }

    /// Join the library filename onto `dir`
    pub fn library_path(&self, dir: impl AsRef<Path>, name: &str) -> PathBuf {
        dir.as_ref().join(self.library_filename(name))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Resolve `name` inside `dir` for the platform named by `platform_id`.
pub fn resolve_library_path(
    platform_id: &str,
    dir: impl AsRef<Path>,
    name: &str,
) -> FfiResult<PathBuf> {
    let platform = Platform::from_identifier(platform_id)?;
    Ok(platform.library_path(dir, name))
}
