use std::env;
use std::fmt;

use tracing::{info, warn};
use url::Url;

use crate::error::ConfigError;

// Replace with your Sourcegraph instance URL, or set SOURCEGRAPH_URL
pub const DEFAULT_API_URL: &str = "https://sourcegraph.com/.api";

pub const DEFAULT_TARGET_FILE: &str = ".gitpod.yml";

pub const TOKEN_ENV: &str = "SOURCEGRAPH_TOKEN";
pub const API_URL_ENV: &str = "SOURCEGRAPH_URL";

/// Values supplied on the command line. Anything left `None` falls back to
/// the environment and then to the compiled-in defaults.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub target_file: Option<String>,
}

/// Everything a scan needs, resolved once at start-up.
#[derive(Clone)]
pub struct Config {
    endpoint: Url,
    token: String,
    target_file: String,
}

impl Config {
    /// Resolve against the process environment.
    pub fn load(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve(overrides, |key| env::var(key).ok())
    }

    /// Resolve with an explicit variable lookup, so tests never touch the
    /// real environment.
    pub fn resolve<F>(overrides: ConfigOverrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let raw_url = overrides
            .base_url
            .or_else(|| lookup(API_URL_ENV))
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
        let base_url = parse_base_url(&raw_url)?;
        let endpoint = graphql_endpoint(&base_url)?;

        let token = match overrides.token.or_else(|| lookup(TOKEN_ENV)) {
            Some(token) => token,
            None => {
                warn!(
                    "no token found in {}, requests will be sent unauthenticated",
                    TOKEN_ENV
                );
                String::new()
            }
        };

        let target_file = overrides
            .target_file
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| DEFAULT_TARGET_FILE.to_owned());

        let config = Config {
            endpoint,
            token,
            target_file,
        };
        info!("using GraphQL endpoint {}", config.endpoint);
        Ok(config)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn target_file(&self) -> &str {
        &self.target_file
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint.as_str())
            .field("token", &mask_token(&self.token))
            .field("target_file", &self.target_file)
            .finish()
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
        url: raw.to_owned(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_owned())),
    }
}

// `Url::join` would drop the last path segment (".api"), so append instead.
fn graphql_endpoint(base: &Url) -> Result<Url, ConfigError> {
    let joined = format!("{}/graphql", base.as_str().trim_end_matches('/'));
    Url::parse(&joined).map_err(|source| ConfigError::InvalidBaseUrl {
        url: joined,
        source,
    })
}

/// Keep a short prefix and suffix of the token for log output.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 8 {
        "*".repeat(len)
    } else {
        let start: String = chars[..4].iter().collect();
        let end: String = chars[len - 4..].iter().collect();
        format!("{}{}{}", start, "*".repeat(len - 8), end)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(ConfigOverrides::default(), env_of(&[])).unwrap();
        assert_eq!(
            config.endpoint().as_str(),
            "https://sourcegraph.com/.api/graphql"
        );
        assert_eq!(config.token(), "");
        assert_eq!(config.target_file(), ".gitpod.yml");
    }

    #[test]
    fn test_env_then_cli_precedence() {
        let env = env_of(&[
            (TOKEN_ENV, "env-token"),
            (API_URL_ENV, "https://sg.example.com/.api/"),
        ]);
        let config = Config::resolve(ConfigOverrides::default(), &env).unwrap();
        assert_eq!(config.token(), "env-token");
        assert_eq!(
            config.endpoint().as_str(),
            "https://sg.example.com/.api/graphql"
        );

        let overrides = ConfigOverrides {
            base_url: Some("http://localhost:7080".to_owned()),
            token: Some("cli-token".to_owned()),
            target_file: Some("devcontainer.json".to_owned()),
        };
        let config = Config::resolve(overrides, &env).unwrap();
        assert_eq!(config.token(), "cli-token");
        assert_eq!(config.endpoint().as_str(), "http://localhost:7080/graphql");
        assert_eq!(config.target_file(), "devcontainer.json");
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let env = env_of(&[(API_URL_ENV, "")]);
        let config = Config::resolve(ConfigOverrides::default(), env).unwrap();
        assert_eq!(
            config.endpoint().as_str(),
            "https://sourcegraph.com/.api/graphql"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let overrides = ConfigOverrides {
            base_url: Some("not a url".to_owned()),
            ..Default::default()
        };
        let err = Config::resolve(overrides, env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

        let overrides = ConfigOverrides {
            base_url: Some("ftp://example.com".to_owned()),
            ..Default::default()
        };
        let err = Config::resolve(overrides, env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[test]
    fn test_debug_masks_token() {
        let env = env_of(&[(TOKEN_ENV, "sgp_0123456789abcdef")]);
        let config = Config::resolve(ConfigOverrides::default(), env).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("0123456789abcdef"));
        assert!(printed.contains("sgp_"));
        assert_eq!(mask_token("short"), "*****");
    }
}
