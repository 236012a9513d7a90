use std::path::PathBuf;

/// Server configuration parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server listen port.
    pub port: u16,
    /// Server bind host.
    pub host: String,
    /// Directory holding lesson catalog files (`*.json`).
    pub lessons_dir: PathBuf,
    /// Upper bound on live board instances.
    pub max_boards: usize,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = AppConfig::default();
        AppConfig {
            port: lookup("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            host: lookup("HOST").unwrap_or(defaults.host),
            lessons_dir: lookup("CHESSNOTES_LESSONS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.lessons_dir),
            max_boards: lookup("CHESSNOTES_MAX_BOARDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_boards),
        }
    }

    /// Socket address string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: 8082,
            host: "0.0.0.0".to_string(),
            lessons_dir: PathBuf::from("lessons"),
            max_boards: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = AppConfig::default();
        assert_eq!(config.port, 8082);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.lessons_dir, PathBuf::from("lessons"));
        assert_eq!(config.max_boards, 1000);
        assert_eq!(config.bind_addr(), "0.0.0.0:8082");
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "9000"),
            ("HOST", "127.0.0.1"),
            ("CHESSNOTES_LESSONS_DIR", "/srv/lessons"),
            ("CHESSNOTES_MAX_BOARDS", "5"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.lessons_dir, PathBuf::from("/srv/lessons"));
        assert_eq!(config.max_boards, 5);
    }

    #[test]
    fn unparsable_values_fall_back() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "eighty"),
            ("CHESSNOTES_MAX_BOARDS", "-1"),
        ]));
        assert_eq!(config.port, 8082);
        assert_eq!(config.max_boards, 1000);
    }

    #[test]
    fn empty_lookup_is_default() {
        let config = AppConfig::from_lookup(|_| None);
        assert_eq!(config.bind_addr(), AppConfig::default().bind_addr());
    }
}
