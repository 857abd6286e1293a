//! Reverse-domain identifier validation.
//!
//! Bundle identifiers (`CFBundleIdentifier`) and exported type identifiers
//! (`UTTypeIdentifier`) must be registrable with Launch Services. Rather than
//! implementing full RFC 1035 label rules, the bundler applies a small fixed
//! rule set that rejects every identifier macOS is known to refuse.

use crate::bundler::error::{Error, Result};
use std::fmt;

/// Maximum total length of a domain name.
pub const MAX_DOMAIN_LEN: usize = 253;

/// Prefix of every generated identifier: `org.<namespace>.<suffix>`.
const IDENTIFIER_ROOT: &str = "org";

/// Returns whether `domain` is an acceptable reverse-domain identifier.
///
/// All of the following must hold:
/// - every character, lowercased, is one of `a-z`, `0-9`, `.`, `-`
/// - the length is at most [`MAX_DOMAIN_LEN`]
/// - it contains neither `--` nor `..`
///
/// ```
/// use kodegen_bundler_script::bundler::is_valid_domain;
///
/// assert!(is_valid_domain("org.kodegen.MyApp"));
/// assert!(!is_valid_domain("org.kodegen.my_app"));
/// assert!(!is_valid_domain("org..kodegen"));
/// ```
pub fn is_valid_domain(domain: &str) -> bool {
    let allowed = |c: char| {
        let c = c.to_ascii_lowercase();
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-'
    };

    domain.chars().all(allowed)
        && domain.len() <= MAX_DOMAIN_LEN
        && !domain.contains("--")
        && !domain.contains("..")
}

/// A validated bundle identifier of the form `org.<namespace>.<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleIdentifier(String);

impl BundleIdentifier {
    /// Builds `org.<namespace>.<suffix>` and validates it.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidIdentifier`] carrying the full rejected string.
    pub fn new(namespace: &str, suffix: &str) -> Result<Self> {
        Self::parse(format!("{IDENTIFIER_ROOT}.{namespace}.{suffix}"))
    }

    /// Validates an already assembled identifier.
    pub fn parse(identifier: impl Into<String>) -> Result<Self> {
        let identifier = identifier.into();
        if !is_valid_domain(&identifier) {
            return Err(Error::InvalidIdentifier { identifier });
        }
        Ok(Self(identifier))
    }

    /// Identifier of the exported data file type owned by this bundle.
    pub fn datafile(&self) -> Result<Self> {
        Self::parse(format!("{}.datafile", self.0))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BundleIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<BundleIdentifier> for String {
    fn from(id: BundleIdentifier) -> Self {
        id.0
    }
}
