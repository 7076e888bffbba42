// SPDX-License-Identifier: MIT OR Apache-2.0
//! Camera name conventions.
//!
//! Reconstruction tools export one camera per frame named like `cam.001`,
//! `shot_0042` or `frame12.abc`: a prefix, a run of digits and an optional
//! extension-like tail.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Name given to a merged camera when no usable name is configured
pub const DEFAULT_CAMERA_NAME: &str = "MergedCamera";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)(\d+)(\.\w+)?$").expect("valid name pattern"));

static ORDINAL_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(\.\w+)?$").expect("valid suffix pattern"));

static DIGIT_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// A camera name split into prefix, ordinal and tail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePattern {
    /// Everything before the ordinal digits
    pub prefix: String,
    /// Numeric value of the ordinal digits
    pub ordinal: u64,
    /// Trailing `.ext` part, if any
    pub tail: Option<String>,
}

impl NamePattern {
    /// Split a name; `None` when it carries no ordinal
    pub fn parse(name: &str) -> Option<Self> {
        let caps = NAME_PATTERN.captures(name)?;
        let ordinal = caps.get(2)?.as_str().parse().ok()?;
        Some(Self {
            prefix: caps.get(1).map_or("", |m| m.as_str()).to_string(),
            ordinal,
            tail: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }

    /// Ordinal of `name` if it is this prefix followed by digits and an optional tail
    pub fn ordinal_with_prefix(&self, name: &str) -> Option<u64> {
        let rest = name.strip_prefix(self.prefix.as_str())?;
        let caps = ORDINAL_SUFFIX.captures(rest)?;
        caps.get(1)?.as_str().parse().ok()
    }

    /// Prefix with trailing separators removed, `None` if nothing is left
    pub fn base_name(&self) -> Option<String> {
        let cleaned = self.prefix.trim_end_matches([' ', '_', '.', '-']);
        if cleaned.trim().is_empty() {
            None
        } else {
            Some(cleaned.to_string())
        }
    }
}

/// One chunk of a natural sort key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum NaturalChunk {
    Number(u64),
    Text(String),
}

/// Sort key comparing digit runs numerically and text case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct NaturalKey(Vec<NaturalChunk>);

impl NaturalKey {
    /// Build the key for a name
    pub fn new(name: &str) -> Self {
        let mut chunks = Vec::new();
        let mut last = 0;
        for digits in DIGIT_RUNS.find_iter(name) {
            chunks.push(NaturalChunk::Text(name[last..digits.start()].to_lowercase()));
            chunks.push(NaturalChunk::Number(digits.as_str().parse().unwrap_or(u64::MAX)));
            last = digits.end();
        }
        chunks.push(NaturalChunk::Text(name[last..].to_lowercase()));
        Self(chunks)
    }
}

/// Compare two names in natural order
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    NaturalKey::new(a).cmp(&NaturalKey::new(b))
}
