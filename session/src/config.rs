//! Session flow configuration.

/// Policy knobs for the authentication flows.
///
/// Defaults match the server contract; embedders override them only in
/// test rigs or staging environments with relaxed rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Minimum password length accepted at sign-up.
    ///
    /// Default: 8
    pub min_password_length: usize,

    /// Exact digit count of the emailed verification code.
    ///
    /// Default: 6
    pub verification_code_length: usize,
}

impl SessionConfig {
    /// Create a configuration with the default policy.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_password_length: 8,
            verification_code_length: 6,
        }
    }

    /// Set the minimum sign-up password length.
    #[must_use]
    pub const fn with_min_password_length(mut self, length: usize) -> Self {
        self.min_password_length = length;
        self
    }

    /// Set the expected verification code length.
    #[must_use]
    pub const fn with_verification_code_length(mut self, length: usize) -> Self {
        self.verification_code_length = length;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_builder() {
        let config = SessionConfig::new()
            .with_min_password_length(12)
            .with_verification_code_length(4);

        assert_eq!(config.min_password_length, 12);
        assert_eq!(config.verification_code_length, 4);
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.min_password_length, 8);
        assert_eq!(config.verification_code_length, 6);
    }
}
