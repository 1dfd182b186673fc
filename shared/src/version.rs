use std::{fmt, str::FromStr};

use thiserror::Error;

/// Errors that can occur while parsing a version string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionParseError {
    /// Wrong number of dot-separated components
    #[error("Malformed version string {input:?}: expected major.minor or major.minor.patch")]
    ComponentCount { input: String },

    /// A component is not a non-negative integer in canonical form
    #[error("Malformed version string {input:?}: component {component:?} is not a number without leading zeros")]
    InvalidComponent { input: String, component: String },
}

/// A semantic version. Ordering compares major, then minor, then patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Accepts `major.minor` or `major.minor.patch` with canonical decimal
    /// components, so every three-component string reads back the way
    /// `Display` writes it.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let components: Vec<&str> = input.split('.').collect();
        if components.len() < 2 || components.len() > 3 {
            return Err(VersionParseError::ComponentCount {
                input: input.to_string(),
            });
        }

        let mut numbers = [0_u32; 3];
        for (number, component) in numbers.iter_mut().zip(components.iter()) {
            // u32::from_str accepts a leading '+' and leading zeros
            let canonical = !component.is_empty()
                && component.bytes().all(|b| b.is_ascii_digit())
                && (component.len() == 1 || !component.starts_with('0'));
            if !canonical {
                return Err(VersionParseError::InvalidComponent {
                    input: input.to_string(),
                    component: component.to_string(),
                });
            }
            *number = component
                .parse()
                .map_err(|_| VersionParseError::InvalidComponent {
                    input: input.to_string(),
                    component: component.to_string(),
                })?;
        }

        Ok(Self::new(numbers[0], numbers[1], numbers[2]))
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
