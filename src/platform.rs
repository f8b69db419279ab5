//! Host platform detection and vendor token translation

use crate::error::{Error, Result};
use std::fmt;

/// A plugin-supplied translation table from canonical tokens to vendor tokens.
pub type TokenMap = &'static [(&'static str, &'static str)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Darwin,
    Linux,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Darwin => "darwin",
            Self::Linux => "linux",
        }
    }

    /// Canonicalize an operating system name (`uname -s` style or Rust's `OS` constant).
    pub fn canonicalize(os: &str) -> Result<Self> {
        match os.to_lowercase().as_str() {
            "darwin" | "macos" => Ok(Self::Darwin),
            "linux" => Ok(Self::Linux),
            _ => Err(Error::UnsupportedPlatform(os.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
        }
    }

    /// Canonicalize a machine name, accepting the common aliases.
    pub fn canonicalize(machine: &str) -> Result<Self> {
        match machine.to_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Self::X86_64),
            "aarch64" | "arm64" => Ok(Self::Aarch64),
            _ => Err(Error::UnsupportedArch(machine.to_string())),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the host platform and architecture.
pub fn detect() -> Result<(Platform, Arch)> {
    detect_from(std::env::consts::OS, std::env::consts::ARCH)
}

/// Canonicalize an explicit (os, machine) pair.
pub fn detect_from(os: &str, machine: &str) -> Result<(Platform, Arch)> {
    Ok((Platform::canonicalize(os)?, Arch::canonicalize(machine)?))
}

/// Translate a canonical token through an optional vendor map.
///
/// Tokens missing from the map, or an absent map, pass through unchanged.
pub fn translate(token: &str, map: Option<TokenMap>) -> String {
    map.and_then(|m| m.iter().find(|(from, _)| *from == token))
        .map(|(_, to)| to.to_string())
        .unwrap_or_else(|| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_with_map() {
        let map: TokenMap = &[("aarch64", "arm64"), ("x86_64", "amd64")];
        assert_eq!(translate("aarch64", Some(map)), "arm64");
        assert_eq!(translate("x86_64", Some(map)), "amd64");
    }

    #[test]
    fn test_translate_identity_fallback() {
        assert_eq!(translate("aarch64", None), "aarch64");
        let map: TokenMap = &[("darwin", "macos")];
        assert_eq!(translate("linux", Some(map)), "linux");
    }

    #[test]
    fn test_arch_aliases() {
        assert_eq!(Arch::canonicalize("amd64").unwrap(), Arch::X86_64);
        assert_eq!(Arch::canonicalize("x86_64").unwrap(), Arch::X86_64);
        assert_eq!(Arch::canonicalize("arm64").unwrap(), Arch::Aarch64);
        assert_eq!(Arch::canonicalize("AARCH64").unwrap(), Arch::Aarch64);
    }

    #[test]
    fn test_unsupported_arch() {
        let err = Arch::canonicalize("riscv64").unwrap_err();
        assert!(matches!(err, Error::UnsupportedArch(ref m) if m == "riscv64"));
    }

    #[test]
    fn test_platform_canonicalize() {
        assert_eq!(Platform::canonicalize("Darwin").unwrap(), Platform::Darwin);
        assert_eq!(Platform::canonicalize("macos").unwrap(), Platform::Darwin);
        assert_eq!(Platform::canonicalize("Linux").unwrap(), Platform::Linux);
        assert!(matches!(
            Platform::canonicalize("windows"),
            Err(Error::UnsupportedPlatform(_))
        ));
    }

    #[test]
    fn test_detect_from() {
        let (p, a) = detect_from("linux", "amd64").unwrap();
        assert_eq!((p.as_str(), a.as_str()), ("linux", "x86_64"));
    }
}
