//! Operator access configuration loaded from environment variables.
//!
//! The console has a single shared passcode, read from `CONSOLE_PASSCODE` in the
//! `.env` file. Without one, nobody can sign in.

/// Gets the configured console passcode, if any.
#[must_use]
pub fn get_console_passcode() -> Option<String> {
    std::env::var("CONSOLE_PASSCODE")
        .ok()
        .filter(|code| !code.is_empty())
}

/// Checks an entered passcode against the configured one.
#[must_use]
pub fn passcode_matches(configured: Option<&str>, entered: &str) -> bool {
    configured.is_some_and(|code| code == entered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passcode_matches() {
        assert!(passcode_matches(Some("s3cret"), "s3cret"));
        assert!(!passcode_matches(Some("s3cret"), "guess"));
    }

    #[test]
    fn test_no_passcode_rejects_everything() {
        assert!(!passcode_matches(None, ""));
        assert!(!passcode_matches(None, "anything"));
    }
}
