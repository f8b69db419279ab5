//! Filename templates and the per-install format context
//!
//! A [`Template`] is either a literal pattern such as
//! `"fd-{version}-{arch}-{platform}.tar.gz"` or a function of the
//! [`FormatContext`]. Literal patterns use `{key}` placeholders; `{{` and
//! `}}` produce literal braces.
//!
//! Available keys: `name`, `repo_name`, `version`, `normalize_version`,
//! `platform`, `arch`, `filename`, `checksum_filename`.

use crate::error::{Error, Result};
use std::borrow::Cow;

/// Signature of a computed template.
pub type TemplateFn = fn(&FormatContext) -> String;

/// Values available to templates during one install attempt.
///
/// `filename` and `checksum_filename` start empty and are filled in by the
/// install pipeline as soon as each one is resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatContext {
    pub name: String,
    pub repo_name: String,
    /// Vendor release tag, e.g. `v14.1.0`
    pub version: String,
    /// Canonical version, e.g. `14.1.0`
    pub normalize_version: String,
    pub platform: String,
    pub arch: String,
    pub filename: String,
    pub checksum_filename: String,
}

impl FormatContext {
    /// Look up a placeholder value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "repo_name" => &self.repo_name,
            "version" => &self.version,
            "normalize_version" => &self.normalize_version,
            "platform" => &self.platform,
            "arch" => &self.arch,
            "filename" => &self.filename,
            "checksum_filename" => &self.checksum_filename,
            _ => return None,
        };
        Some(value.as_str())
    }
}

/// A string that is either a literal pattern or computed from the context.
#[derive(Debug, Clone)]
pub enum Template {
    Literal(Cow<'static, str>),
    Computed(TemplateFn),
}

impl Template {
    /// Resolve the template against a context.
    pub fn format(&self, ctx: &FormatContext) -> Result<String> {
        match self {
            Self::Literal(pattern) => substitute(pattern, ctx),
            Self::Computed(f) => Ok(f(ctx)),
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::Literal(Cow::Borrowed(""))
    }
}

impl From<&'static str> for Template {
    fn from(pattern: &'static str) -> Self {
        Self::Literal(Cow::Borrowed(pattern))
    }
}

impl From<String> for Template {
    fn from(pattern: String) -> Self {
        Self::Literal(Cow::Owned(pattern))
    }
}

impl From<TemplateFn> for Template {
    fn from(f: TemplateFn) -> Self {
        Self::Computed(f)
    }
}

/// Resolve `template` against `ctx`.
pub fn format(template: &Template, ctx: &FormatContext) -> Result<String> {
    template.format(ctx)
}

fn substitute(pattern: &str, ctx: &FormatContext) -> Result<String> {
    let fail = |message: String| Error::Template {
        template: pattern.to_string(),
        message,
    };

    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut key = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(k) => key.push(k),
                        None => return Err(fail("unclosed '{'".to_string())),
                    }
                }
                let value = ctx
                    .get(&key)
                    .ok_or_else(|| fail(format!("unknown placeholder '{{{}}}'", key)))?;
                out.push_str(value);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(fail("single '}' encountered".to_string())),
            c => out.push(c),
        }
    }

    Ok(out)
}

/// Strip a known archive suffix from a filename.
///
/// Release archives usually unpack into a directory named after the archive,
/// so plugins use this to derive in-archive paths.
pub fn archive_stem(filename: &str) -> &str {
    const SUFFIXES: &[&str] = &[".tar.gz", ".tar.xz", ".zip", ".gz"];
    SUFFIXES
        .iter()
        .find_map(|suffix| filename.strip_suffix(suffix))
        .unwrap_or(filename)
}
