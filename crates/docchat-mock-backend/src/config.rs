//! Mock backend configuration.

/// Runtime switches of the mock backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockConfig {
    /// Port to listen on (default `8000`, the client's default base URL).
    pub port: u16,
    /// Answer every upload with a 500.
    pub fail_uploads: bool,
    /// Answer every chat turn with a 500.
    pub fail_chat: bool,
}

impl MockConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable            | Default | Description                     |
    /// |---------------------|---------|---------------------------------|
    /// | `MOCK_BACKEND_PORT` | `8000`  | HTTP listen port                |
    /// | `MOCK_FAIL_UPLOADS` | unset   | Truthy: every upload fails      |
    /// | `MOCK_FAIL_CHAT`    | unset   | Truthy: every chat turn fails   |
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset switches are off.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("MOCK_BACKEND_PORT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(8000);

        Self {
            port,
            fail_uploads: lookup("MOCK_FAIL_UPLOADS").is_some_and(|v| is_truthy(&v)),
            fail_chat: lookup("MOCK_FAIL_CHAT").is_some_and(|v| is_truthy(&v)),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> MockConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        MockConfig::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        assert_eq!(
            config(&[]),
            MockConfig {
                port: 8000,
                fail_uploads: false,
                fail_chat: false,
            }
        );
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("MOCK_BACKEND_PORT", "9001"),
            ("MOCK_FAIL_UPLOADS", "TRUE"),
            ("MOCK_FAIL_CHAT", "0"),
        ]);
        assert_eq!(cfg.port, 9001);
        assert!(cfg.fail_uploads);
        assert!(!cfg.fail_chat);
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(config(&[("MOCK_BACKEND_PORT", "http")]).port, 8000);
    }
}
