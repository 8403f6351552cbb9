//! Domain Value Objects
//!
//! Immutable value types for the results domain.

use std::fmt;

/// Longest accepted roll number
pub const ROLL_NO_MAX_LENGTH: usize = 32;

/// Roll number, trimmed and uppercased, ASCII letters and digits only
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RollNo(String);

impl RollNo {
    /// Canonical form used for storage and lookups
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_uppercase()
    }

    /// Validate a raw roll number; the error is the user-facing reason
    pub fn parse(raw: &str) -> Result<Self, &'static str> {
        let normalized = Self::normalize(raw);
        if normalized.is_empty() {
            return Err("is required");
        }
        if normalized.len() > ROLL_NO_MAX_LENGTH {
            return Err("must be at most 32 characters");
        }
        if !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err("must contain only letters and digits");
        }
        Ok(Self(normalized))
    }

    /// Wrap a normalized value without validation (lookups, database rows)
    pub fn from_normalized(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RollNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Semester number (1-8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Semester(u8);

impl Semester {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;

    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl From<Semester> for i16 {
    fn from(s: Semester) -> Self {
        i16::from(s.0)
    }
}

/// Internal or external marks for one subject (0-50)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Marks(u8);

impl Marks {
    pub const MAX: u8 = 50;

    pub fn new(value: i64) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

/// SHA-256 of a rendered document, 64 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentHash(String);

impl DocumentHash {
    /// Digest of the document bytes
    pub fn of(document: &[u8]) -> Self {
        Self(platform::crypto::sha256_hex(document))
    }

    /// Accept a stored digest if it is well formed
    pub fn from_hex(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let well_formed = value.len() == 64
            && value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c));
        well_formed.then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
