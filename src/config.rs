use crate::storage::{BackendLocal, StorageManager};
use anyhow::{bail, Context, Result};
use homedir::my_home;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.yaml";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_USER_AGENT: &str = concat!("bcve/", env!("CARGO_PKG_VERSION"));
const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Where resolved thumbnail urls are kept between renders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Process memory, lost on restart
    #[default]
    Memory,
    /// One json file per entry under `<base_path>/cache`
    File,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Transport timeout for the maxres check and metadata requests
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub cache: CacheBackend,

    /// Address the daemon binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(skip_serializing, skip_deserializing)]
    base_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            cache: CacheBackend::default(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            base_path: String::new(),
        }
    }
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_listen_addr() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

/// `BCVE_BASE_PATH`, or `~/.local/share/bcve`.
pub fn base_path() -> Result<String> {
    if let Ok(base_path) = std::env::var("BCVE_BASE_PATH") {
        return Ok(base_path);
    }

    let home = my_home()
        .context("Could not determine home directory")?
        .context("Home directory path is empty")?;

    Ok(format!("{}/.local/share/bcve", home.to_string_lossy()))
}

impl Config {
    fn validate(&self) -> Result<()> {
        if self.http_timeout_secs == 0 {
            bail!("http_timeout_secs must be greater than 0");
        }

        if self.user_agent.trim().is_empty() {
            bail!("user_agent must not be empty");
        }

        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            bail!(
                "listen_addr must be a socket address like 127.0.0.1:8080, got '{}'",
                self.listen_addr
            );
        }

        Ok(())
    }

    pub fn load() -> Result<Self> {
        Self::load_with(&base_path()?)
    }

    pub fn load_with(base_path: &str) -> Result<Self> {
        let store = BackendLocal::new(base_path)
            .with_context(|| format!("failed to create base directory {base_path}"))?;

        // create new if does not exist
        if !store.exists(CONFIG_FILE) {
            store.write(
                CONFIG_FILE,
                serde_yml::to_string(&Self::default())?.as_bytes(),
            )?;
        }

        let config_str =
            String::from_utf8(store.read(CONFIG_FILE)?).context("config file is not valid utf8")?;
        let mut config: Self = serde_yml::from_str(&config_str).context("config is malformed")?;

        config.base_path = base_path.to_string();

        config.validate()?;

        // resave in case config version needs an upgrade
        if config_str != serde_yml::to_string(&config)? {
            config.save()?;
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let store = BackendLocal::new(&self.base_path)?;

        let config_str = serde_yml::to_string(&self)?;
        store.write(CONFIG_FILE, config_str.as_bytes())?;

        Ok(())
    }

    pub fn cache_dir(&self) -> String {
        format!("{}/cache", self.base_path)
    }
}
