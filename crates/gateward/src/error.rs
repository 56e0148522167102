//! Unified error type for the Gateward facade.

use gateward_config::ConfigError;
use gateward_policy::PolicyError;

/// Top-level error that wraps the crate-specific errors.
///
/// Callers of the `gateward` facade deal with this single type; the
/// `#[from]` impls let `?` convert sub-crate errors automatically.
/// Note what is NOT here: routine persistence trouble. The decision
/// path logs and recovers from that; a [`ConfigError`] only surfaces
/// through [`Whitelist::flush`](crate::Whitelist::flush), where the
/// caller explicitly asked to know.
#[derive(Debug, thiserror::Error)]
pub enum GatewardError {
    /// A rejected mutation request (bad name, bad duration, duplicate,
    /// missing target).
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// An explicitly-requested persistence operation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_policy_error() {
        let err = PolicyError::InvalidName("x".into());
        let gateward_err: GatewardError = err.into();
        assert!(matches!(gateward_err, GatewardError::Policy(_)));
        assert!(gateward_err.to_string().contains("invalid username"));
    }

    #[test]
    fn test_from_config_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let gateward_err: GatewardError = GatewardError::from(ConfigError::Io(io));
        assert!(matches!(gateward_err, GatewardError::Config(_)));
        assert!(gateward_err.to_string().contains("nope"));
    }
}
