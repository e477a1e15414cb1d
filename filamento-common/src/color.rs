//! Color hex code normalization
//!
//! Filament colors are stored as `#RRGGBB` with upper-case digits. Input is
//! accepted with or without the leading `#`, and the 3-digit CSS shorthand
//! (`#F00`) is expanded. The hex code is descriptive only; it never takes part
//! in filament uniqueness.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A normalized `#RRGGBB` color
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Parse and normalize a user-supplied hex color
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidInput(format!(
                "Color hex code '{}' contains non-hex characters",
                input
            )));
        }

        let expanded = match digits.len() {
            6 => digits.to_ascii_uppercase(),
            3 => digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
            n => {
                return Err(Error::InvalidInput(format!(
                    "Color hex code '{}' must have 3 or 6 hex digits, got {}",
                    input, n
                )))
            }
        };

        Ok(Self(format!("#{}", expanded)))
    }

    /// Normalized representation including the leading `#`
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HexColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
