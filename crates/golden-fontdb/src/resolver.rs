//! Family name to font file, via the host's font-matching utility

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

use golden_core::{
    error::{ResolutionError, Result},
    traits::FontResolver,
    types::FontReference,
};

/// Logical family used for every monospace golden
pub const MONOSPACE: &str = "monospace";

/// Logical family used for every serif golden
pub const SERIF: &str = "serif";

/// Default font-matching program
pub const FC_MATCH: &str = "fc-match";

/// Resolves families by running `fc-match <family> --format=%{file}`
///
/// The query blocks until the process exits; there is no timeout.
#[derive(Debug, Clone)]
pub struct FcMatchResolver {
    program: String,
}

impl FcMatchResolver {
    pub fn new() -> Self {
        Self::with_program(FC_MATCH)
    }

    /// Uses another program with the same calling convention
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn query(&self, family: &str) -> std::result::Result<String, ResolutionError> {
        log::debug!("{} {} --format=%{{file}}", self.program, family);

        let output = Command::new(&self.program)
            .arg(family)
            .arg("--format=%{file}")
            .output()
            .map_err(|source| ResolutionError::Spawn {
                program: self.program.clone(),
                family: family.to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(ResolutionError::QueryFailed {
                program: self.program.clone(),
                family: family.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for FcMatchResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FontResolver for FcMatchResolver {
    fn name(&self) -> &'static str {
        "fc-match"
    }

    fn resolve(&self, family: &str) -> Result<FontReference> {
        let stdout = self.query(family)?;
        let path = parse_match_output(&stdout)
            .ok_or_else(|| ResolutionError::EmptyMatch(family.to_string()))?;

        let font = FontReference::new(family, path);
        warn_if_missing(&self.program, &font);
        Ok(font)
    }
}

/// First non-blank line of the query output, trimmed
pub fn parse_match_output(stdout: &str) -> Option<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(PathBuf::from)
}

/// The advisory half of resolution: report, then carry on
fn warn_if_missing(source: &str, font: &FontReference) {
    if !font.exists() {
        log::warn!(
            "{} returned {} for {:?} but the file doesn't exist",
            source,
            font.path.display(),
            font.family
        );
    }
}

/// Resolver with a fixed family table, for tests and pinned setups
#[derive(Debug, Clone, Default)]
pub struct FixedResolver {
    fonts: HashMap<String, PathBuf>,
}

impl FixedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `family` as resolving to `path`
    pub fn with(mut self, family: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.fonts.insert(family.into(), path.into());
        self
    }
}

impl FontResolver for FixedResolver {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn resolve(&self, family: &str) -> Result<FontReference> {
        let path = self
            .fonts
            .get(family)
            .ok_or_else(|| ResolutionError::UnknownFamily(family.to_string()))?;

        let font = FontReference::new(family, path.clone());
        warn_if_missing(self.name(), &font);
        Ok(font)
    }
}

/// The two fonts every spec table draws from, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFonts {
    pub mono: FontReference,
    pub serif: FontReference,
}

impl ResolvedFonts {
    /// Resolves "monospace" and "serif"
    pub fn resolve(resolver: &dyn FontResolver) -> Result<Self> {
        Self::resolve_families(resolver, MONOSPACE, SERIF)
    }

    /// Resolves two explicit families, mono first; the first failure aborts
    pub fn resolve_families(resolver: &dyn FontResolver, mono: &str, serif: &str) -> Result<Self> {
        let mono = resolver.resolve(mono)?;
        let serif = resolver.resolve(serif)?;

        log::info!(
            "Resolved fonts via {}: mono={}, serif={}",
            resolver.name(),
            mono.path.display(),
            serif.path.display()
        );

        Ok(Self { mono, serif })
    }
}
