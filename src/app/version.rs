//! Kernel version parsing and ordering
//!
//! Folder names in the mainline archive look like `v5.10.4`, `v5.11-rc1` or
//! `v6.1`. After the caller strips the `v`, the remainder is split on `.` and
//! `-` into tagged segments that order numerically where they can and place
//! release-candidate style markers below the matching final release.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::constants::{host, selection};
use crate::errors::{VersionError, VersionResult};

/// One piece of a version string between separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// All-digit piece, compared by value
    Numeric(u64),
    /// Anything else, e.g. `rc1`
    Marker(String),
}

impl Segment {
    fn parse(piece: &str) -> Self {
        if piece.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(value) = piece.parse::<u64>() {
                return Segment::Numeric(value);
            }
        }
        Segment::Marker(piece.to_string())
    }

    /// Split a marker into its alphabetic head and trailing number so that
    /// `rc2` sorts before `rc10`
    fn marker_key(marker: &str) -> (&str, Option<u64>) {
        let head_len = marker
            .trim_end_matches(|c: char| c.is_ascii_digit())
            .len();
        let (head, digits) = marker.split_at(head_len);
        (head, digits.parse().ok())
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
            (Segment::Numeric(_), Segment::Marker(_)) => Ordering::Greater,
            (Segment::Marker(_), Segment::Numeric(_)) => Ordering::Less,
            (Segment::Marker(a), Segment::Marker(b)) => Self::marker_key(a)
                .cmp(&Self::marker_key(b))
                .then_with(|| a.cmp(b)),
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Numeric(value) => write!(f, "{}", value),
            Segment::Marker(marker) => f.write_str(marker),
        }
    }
}

/// A parsed kernel version
///
/// Equality and ordering only look at the segments, so `5.10.04` and
/// `5.10.4` are the same version; `Display` keeps the text as scraped.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    segments: Vec<Segment>,
}

impl Version {
    /// Parse a version string such as `5.10.4` or `5.11-rc1`
    ///
    /// A leading `v` is not stripped here; callers working on folder names
    /// remove it first.
    ///
    /// # Errors
    ///
    /// Returns `VersionError` if the input is empty or contains an empty
    /// segment (e.g. `5..1`).
    pub fn parse(input: &str) -> VersionResult<Self> {
        if input.is_empty() {
            return Err(VersionError::Empty);
        }

        let mut segments = Vec::new();
        for piece in input.split(['.', '-']) {
            if piece.is_empty() {
                return Err(VersionError::EmptySegment {
                    input: input.to_string(),
                });
            }
            segments.push(Segment::parse(piece));
        }

        Ok(Self {
            raw: input.to_string(),
            segments,
        })
    }

    /// The parsed segments in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The text this version was parsed from
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether any segment carries a release-candidate marker
    pub fn is_release_candidate(&self) -> bool {
        self.segments.iter().any(|segment| match segment {
            Segment::Marker(marker) => marker.contains(selection::RELEASE_CANDIDATE_MARKER),
            Segment::Numeric(_) => false,
        })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        for (ours, theirs) in self.segments.iter().zip(&other.segments) {
            match ours.cmp(theirs) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }

        // End of a version sorts above any marker and below any number:
        // 5.11-rc1 < 5.11 < 5.11.1
        let shorter = self.segments.len().min(other.segments.len());
        match (self.segments.get(shorter), other.segments.get(shorter)) {
            (None, None) => Ordering::Equal,
            (Some(Segment::Numeric(_)), None) => Ordering::Greater,
            (Some(Segment::Marker(_)), None) => Ordering::Less,
            (None, Some(Segment::Numeric(_))) => Ordering::Less,
            (None, Some(Segment::Marker(_))) => Ordering::Greater,
            // zip stopped early only because one side ran out
            (Some(_), Some(_)) => Ordering::Equal,
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Version of the running kernel, reduced to `major.minor.patch`
///
/// Returns `None` on hosts without `/proc/sys/kernel/osrelease` or when the
/// release string does not start with numeric fields.
pub fn host_kernel_version() -> Option<String> {
    match std::fs::read_to_string(host::OS_RELEASE_PATH) {
        Ok(release) => parse_host_release(&release),
        Err(e) => {
            debug!("Could not read {}: {}", host::OS_RELEASE_PATH, e);
            None
        }
    }
}

/// Reduce a kernel release string like `6.8.0-45-generic` to `6.8.0`
pub fn parse_host_release(release: &str) -> Option<String> {
    let fields: Vec<&str> = release
        .trim()
        .split('.')
        .take(selection::HOST_VERSION_FIELDS)
        .map(|field| {
            let digits = field
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(field.len());
            &field[..digits]
        })
        .collect();

    if fields.is_empty() || fields.iter().any(|field| field.is_empty()) {
        return None;
    }

    let version = fields.join(".");
    Version::parse(&version).ok().map(|_| version)
}
