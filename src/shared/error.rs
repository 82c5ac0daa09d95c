use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts and CI systems to distinguish between
/// "no license found" and real failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - at least one license was identified
    Success = 0,
    /// The pipeline completed but no license could be identified
    NoLicenseFound = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unsupported input, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::NoLicenseFound => write!(f, "No License Found (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Fatal input errors for license resolution.
///
/// Everything recoverable (download failures, markup payloads, missing
/// metadata, provider gaps) flows into the provenance trail of the result
/// instead of becoming an error. The variants below indicate a usage
/// error by the caller and abort the current request.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Invalid package coordinate: {coordinate}\nReason: {reason}\n\n💡 Hint: expected a purl such as pkg:pypi/requests@2.31.0")]
    InvalidCoordinate { coordinate: String, reason: String },

    #[error("Ecosystem \"{ecosystem}\" is not supported\n\n💡 Hint: supported ecosystems are pypi, gem, maven, swift, gitrepo and url")]
    UnsupportedEcosystem { ecosystem: String },

    #[error("No raw-content rewrite rule for host of {url}\n\n💡 Hint: supported hosts are github.com, gitlab instances and freedesktop.org cgit")]
    UnsupportedHost { url: String },

    #[error("Cache store unavailable: {details}\n\n💡 Hint: check that the cache directory is writable, or run with --cache-mode disabled")]
    CacheUnavailable { details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::NoLicenseFound.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::NoLicenseFound), "No License Found (1)");
    }

    #[test]
    fn test_unsupported_host_display() {
        let error = LookupError::UnsupportedHost {
            url: "https://example.org/repo".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("No raw-content rewrite rule"));
        assert!(display.contains("https://example.org/repo"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_invalid_coordinate_display() {
        let error = LookupError::InvalidCoordinate {
            coordinate: "pkg:".to_string(),
            reason: "missing package type".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid package coordinate"));
        assert!(display.contains("missing package type"));
    }

    #[test]
    fn test_unsupported_ecosystem_display() {
        let error = LookupError::UnsupportedEcosystem {
            ecosystem: "cran".to_string(),
        };
        assert!(format!("{}", error).contains("\"cran\""));
    }
}
