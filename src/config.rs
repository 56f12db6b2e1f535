//! Server configuration.
//!
//! Defaults reproduce the stock behavior of the server: serve the working
//! directory, `home.html` for directory URIs, `cgi-bin` marks programs.
//! A YAML file can override any field; the port always comes from the CLI.

use anyhow::Context;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Listening port, filled in from the command line
    #[serde(skip)]
    pub port: u16,
    /// Value of the `Server:` response field
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Prefix glued in front of every request URI
    pub doc_root: String,
    /// Appended to URIs ending in `/`
    pub default_document: String,
    /// Substring that marks a URI as a program to run
    pub cgi_marker: String,
    /// Refuse resolved paths that escape `doc_root`.
    ///
    /// Off by default: `..` segments in a URI are followed as written.
    pub strict_root: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Longest request or header line read in one piece, terminator included
    pub max_line_length: usize,
    /// Cap on a generated error page body
    pub max_body_length: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 0,
            name: "Tiny Web Server".to_string(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            doc_root: ".".to_string(),
            default_document: "home.html".to_string(),
            cgi_marker: "cgi-bin".to_string(),
            strict_root: false,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_length: 8192,
            max_body_length: 1024 * 1024,
        }
    }
}

impl Config {
    /// Builds the effective configuration for `port`, layering an optional
    /// YAML file over the defaults.
    pub async fn load(port: u16, file: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg = match file {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        cfg.server.port = port;
        Ok(cfg)
    }

    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
