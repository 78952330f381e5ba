//! Configuration Management
//!
//! Loads the `denvr.toml` file holding API defaults and login credentials.
//!
//! ```toml
//! [defaults]
//! server = "https://api.cloud.denvrdata.com"
//! api = "v1"
//! cluster = "Hou1"
//! tenant = "denvr"
//! vpcid = "denvr"
//! rpool = "reserved-denvr"
//! retries = 5
//!
//! [credentials]
//! username = "alice@denvrdata.com"
//! password = "..."
//! ```
//!
//! `DENVR_CONFIG` overrides the file location, `DENVR_USERNAME` and
//! `DENVR_PASSWORD` override the stored credentials.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERVER: &str = "https://api.cloud.denvrdata.com";
pub const DEFAULT_API: &str = "v1";
pub const DEFAULT_CLUSTER: &str = "Msc1";
pub const DEFAULT_RPOOL: &str = "on-demand";
pub const DEFAULT_RETRIES: u32 = 3;

pub const ENV_CONFIG: &str = "DENVR_CONFIG";
pub const ENV_USERNAME: &str = "DENVR_USERNAME";
pub const ENV_PASSWORD: &str = "DENVR_PASSWORD";

/// Values from the `[defaults]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub api: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub tenant: Option<String>,
    #[serde(default)]
    pub vpcid: Option<String>,
    #[serde(default)]
    pub rpool: Option<String>,
    #[serde(default)]
    pub retries: Option<u32>,
    /// Any other per-field defaults (e.g. `namespace`)
    #[serde(flatten)]
    pub extra: toml::Table,
}

/// Login credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    defaults: Defaults,
    #[serde(default)]
    credentials: FileCredentials,
}

#[derive(Debug, Default, Deserialize)]
struct FileCredentials {
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Client configuration, passed explicitly to the session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    defaults: Defaults,
}

impl Config {
    pub fn new(defaults: Defaults) -> Self {
        Self { defaults }
    }

    /// Parse configuration from TOML text, ignoring any credentials
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| Error::Config(format!("Invalid config: {e}")))?;
        Ok(Self::new(file.defaults))
    }

    /// Load configuration and credentials from disk and the environment
    pub fn load(path: Option<&Path>) -> Result<(Self, Credentials)> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with an injectable environment lookup
    pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<(Self, Credentials)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => env(ENV_CONFIG)
                .map(PathBuf::from)
                .or_else(default_config_path)
                .ok_or_else(|| Error::Config("Could not determine config file location".into()))?,
        };

        tracing::debug!("Loading config from {:?}", config_path);

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {e}", config_path.display()))
        })?;

        Self::parse_with_env(&contents, &config_path, env)
    }

    fn parse_with_env<F>(contents: &str, source: &Path, env: F) -> Result<(Self, Credentials)>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| Error::Config(format!("Invalid config {}: {e}", source.display())))?;

        let username = env(ENV_USERNAME)
            .or(file.credentials.username)
            .ok_or(Error::MissingCredential { field: "username" })?;

        let password = match env(ENV_PASSWORD) {
            Some(password) => password,
            None => file.credentials.password.ok_or_else(|| {
                tracing::error!(
                    "No password in {} or {}",
                    ENV_PASSWORD,
                    source.display()
                );
                Error::MissingCredential { field: "password" }
            })?,
        };

        Ok((Self::new(file.defaults), Credentials::new(username, password)))
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn server(&self) -> &str {
        self.defaults.server.as_deref().unwrap_or(DEFAULT_SERVER)
    }

    pub fn api(&self) -> &str {
        self.defaults.api.as_deref().unwrap_or(DEFAULT_API)
    }

    pub fn cluster(&self) -> &str {
        self.defaults.cluster.as_deref().unwrap_or(DEFAULT_CLUSTER)
    }

    pub fn tenant(&self) -> Option<&str> {
        self.defaults.tenant.as_deref()
    }

    /// Falls back to the tenant name
    pub fn vpcid(&self) -> Option<&str> {
        self.defaults.vpcid.as_deref().or(self.tenant())
    }

    pub fn rpool(&self) -> &str {
        self.defaults.rpool.as_deref().unwrap_or(DEFAULT_RPOOL)
    }

    pub fn retries(&self) -> u32 {
        self.defaults.retries.unwrap_or(DEFAULT_RETRIES)
    }

    /// Configured default for a snake_case field name
    pub fn lookup(&self, field: &str) -> Option<Value> {
        match field {
            "server" => Some(self.server().into()),
            "api" => Some(self.api().into()),
            "cluster" => Some(self.cluster().into()),
            "tenant" => self.tenant().map(Value::from),
            "vpcid" => self.vpcid().map(Value::from),
            "rpool" => Some(self.rpool().into()),
            "retries" => Some(self.retries().into()),
            other => self
                .defaults
                .extra
                .get(other)
                .and_then(|v| serde_json::to_value(v).ok()),
        }
    }

    /// An explicit argument wins; otherwise fall back to the configured default
    pub fn resolve<T: Into<Value>>(&self, field: &str, explicit: Option<T>) -> Option<Value> {
        match explicit {
            Some(value) => Some(value.into()),
            None => self.lookup(field),
        }
    }
}

/// Default config file location: `~/.config/denvr.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("denvr.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CONFIG: &str = r#"
        [defaults]
        server = "https://api.cloud.denvrdata.com"
        api = "v2"
        cluster = "Hou1"
        tenant = "denvr"
        rpool = "reserved-denvr"
        retries = 5
        namespace = "denvr-ns"

        [credentials]
        username = "test@foobar.com"
        password = "test.foo.bar.baz"
    "#;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_config() {
        let (config, creds) =
            Config::parse_with_env(CONFIG, Path::new("denvr.toml"), no_env).unwrap();

        assert_eq!(config.server(), "https://api.cloud.denvrdata.com");
        assert_eq!(config.api(), "v2");
        assert_eq!(config.cluster(), "Hou1");
        assert_eq!(config.tenant(), Some("denvr"));
        assert_eq!(config.vpcid(), Some("denvr"));
        assert_eq!(config.rpool(), "reserved-denvr");
        assert_eq!(config.retries(), 5);
        assert_eq!(creds.username, "test@foobar.com");
        assert_eq!(creds.password, "test.foo.bar.baz");
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = Config::default();
        assert_eq!(config.server(), DEFAULT_SERVER);
        assert_eq!(config.api(), "v1");
        assert_eq!(config.cluster(), "Msc1");
        assert_eq!(config.tenant(), None);
        assert_eq!(config.vpcid(), None);
        assert_eq!(config.rpool(), "on-demand");
        assert_eq!(config.retries(), 3);
    }

    #[test]
    fn test_env_overrides_credentials() {
        let env = |key: &str| match key {
            ENV_USERNAME => Some("env-user".to_string()),
            ENV_PASSWORD => Some("env-pass".to_string()),
            _ => None,
        };
        let (_, creds) = Config::parse_with_env(CONFIG, Path::new("denvr.toml"), env).unwrap();
        assert_eq!(creds.username, "env-user");
        assert_eq!(creds.password, "env-pass");
    }

    #[test]
    fn test_missing_password_fails() {
        let contents = "[defaults]\n[credentials]\nusername = \"alice\"\n";
        let err = Config::parse_with_env(contents, Path::new("denvr.toml"), no_env).unwrap_err();
        assert!(matches!(err, Error::MissingCredential { field: "password" }));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::from_toml_str("[defaults\nserver = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_lookup_and_resolve() {
        let config = Config::from_toml_str(CONFIG).unwrap();

        assert_eq!(config.lookup("cluster"), Some(json!("Hou1")));
        assert_eq!(config.lookup("namespace"), Some(json!("denvr-ns")));
        assert_eq!(config.lookup("retries"), Some(json!(5)));
        assert_eq!(config.lookup("vpc_id"), None);

        assert_eq!(config.resolve("cluster", Some("Msc1")), Some(json!("Msc1")));
        assert_eq!(config.resolve::<&str>("cluster", None), Some(json!("Hou1")));
        assert_eq!(config.resolve::<bool>("persist_storage", None), None);
        // An explicit falsy value is still explicit
        assert_eq!(config.resolve("persist_storage", Some(false)), Some(json!(false)));
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice", "secret");
        let debug = format!("{creds:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("secret"));
    }
}
