use crate::error::{ReleaseError, Result};

/// Represents a release version with major, minor, and patch components.
///
/// Versions carried by the metadata files are always plain dotted numerics
/// (major.minor.patch) with no prefix or prerelease suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Creates a new Version with the specified major, minor, and patch components.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parses a version from a dotted numeric string.
    ///
    /// Expects exactly three dot-separated integer components; anything else
    /// (missing components, extra components, prefixes, prerelease suffixes)
    /// is rejected.
    ///
    /// # Arguments
    /// * `s` - Version string to parse (e.g., "1.2.3")
    ///
    /// # Returns
    /// * `Ok(Version)` - Successfully parsed version
    /// * `Err` - If the string is not a three-component numeric version
    pub fn parse(s: &str) -> Result<Version> {
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::version(format!(
                "'{}' is not a three-component version",
                s
            )));
        }

        let component = |part: &str| {
            part.parse::<u32>().map_err(|_| {
                ReleaseError::version(format!("'{}' has a non-numeric component '{}'", s, part))
            })
        };

        Ok(Version::new(
            component(parts[0])?,
            component(parts[1])?,
            component(parts[2])?,
        ))
    }

    /// Computes the next release version: minor + 1, patch reset to 0.
    ///
    /// The increment is purely numeric; there is no carry into major
    /// ("2.9.0" becomes "2.10.0").
    pub fn next_minor(&self) -> Version {
        Version::new(self.major, self.minor + 1, 0)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_version() {
        assert_eq!(Version::parse("1.2.3").unwrap(), Version::new(1, 2, 3));
        assert_eq!(Version::parse("0.1.0").unwrap(), Version::new(0, 1, 0));
        assert_eq!(Version::parse("10.20.30").unwrap(), Version::new(10, 20, 30));
    }

    #[test]
    fn test_parse_rejects_wrong_component_count() {
        assert!(Version::parse("1.2").is_err());
        assert!(Version::parse("1.2.3.4").is_err());
        assert!(Version::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(Version::parse("v1.2.3").is_err());
        assert!(Version::parse("1.2.x").is_err());
        assert!(Version::parse("1.2.3-rc1").is_err());
    }

    #[test]
    fn test_next_minor() {
        assert_eq!(
            Version::parse("1.4.0").unwrap().next_minor(),
            Version::new(1, 5, 0)
        );
        assert_eq!(
            Version::parse("1.1.7").unwrap().next_minor(),
            Version::new(1, 2, 0)
        );
    }

    #[test]
    fn test_next_minor_no_carry() {
        // Numeric increment only, "9" does not roll over into major
        assert_eq!(
            Version::parse("2.9.0").unwrap().next_minor(),
            Version::new(2, 10, 0)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 5, 0).to_string(), "1.5.0");
        assert_eq!(Version::new(2, 10, 0).to_string(), "2.10.0");
    }
}
