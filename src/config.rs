use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    /// JSON seed replacing the built-in activity set.
    pub activities_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".into(),
            port: 8000,
            static_dir: PathBuf::from("static"),
            activities_file: None,
            log_filter: "info,tower_http=debug".into(),
        }
    }
}

impl Config {
    /// Reads HOST, PORT, STATIC_DIR, ACTIVITIES_FILE and RUST_LOG. Anything
    /// missing or unparsable keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_empty("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|e| {
                // Logging is configured from this struct, so stderr it is.
                eprintln!("Warning: invalid PORT {:?} ({}), using {}", raw, e, defaults.port);
                defaults.port
            }),
            None => defaults.port,
        };

        Config {
            host: non_empty("HOST").unwrap_or(defaults.host),
            port,
            static_dir: non_empty("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            activities_file: non_empty("ACTIVITIES_FILE").map(PathBuf::from),
            log_filter: non_empty("RUST_LOG").unwrap_or(defaults.log_filter),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Next port to try when the configured one is taken.
    pub fn fallback_bind_addr(&self) -> Option<String> {
        self.port
            .checked_add(1)
            .map(|port| format!("{}:{}", self.host, port))
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert!(config.activities_file.is_none());
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9090"),
            ("STATIC_DIR", "/srv/www"),
            ("ACTIVITIES_FILE", "seed.json"),
            ("RUST_LOG", "debug"),
        ]));
        assert_eq!(config.bind_addr(), "0.0.0.0:9090");
        assert_eq!(config.fallback_bind_addr().as_deref(), Some("0.0.0.0:9091"));
        assert_eq!(config.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(config.activities_file, Some(PathBuf::from("seed.json")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_bad_port_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "eighty"), ("HOST", "  ")]));
        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[test]
    fn test_no_fallback_past_max_port() {
        let config = Config::from_lookup(lookup_from(&[("PORT", "65535")]));
        assert!(config.fallback_bind_addr().is_none());
    }
}
