use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::client::Session;

const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// Persisted CLI state: which server to talk to and the last login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    pub server_url: String,
    #[serde(default)]
    pub session: Option<StoredSession>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub username: String,
    pub token: String,
    pub logged_in_at: DateTime<Utc>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            session: None,
        }
    }
}

impl From<Session> for StoredSession {
    fn from(session: Session) -> Self {
        Self {
            username: session.username,
            token: session.token,
            logged_in_at: Utc::now(),
        }
    }
}

impl StoredSession {
    pub fn to_session(&self) -> Session {
        Session {
            username: self.username.clone(),
            token: self.token.clone(),
        }
    }
}

impl CliConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&get_config_dir()?)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&get_config_dir()?)
    }

    pub fn load_from(dir: &Path) -> anyhow::Result<Self> {
        let config_file = dir.join(CONFIG_FILE);

        if !config_file.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_file)?;
        let config: CliConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to(&self, dir: &Path) -> anyhow::Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        let config_file = dir.join(CONFIG_FILE);

        let content = serde_json::to_string_pretty(self)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // token file readable by the owner only, from the moment it exists
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&config_file)?;

        // a file created by an older version keeps its mode; tighten it
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        file.write_all(content.as_bytes())?;
        Ok(())
    }

    /// The explicit session for protected calls, or an error telling the user to log in
    pub fn require_session(&self) -> anyhow::Result<Session> {
        self.session
            .as_ref()
            .map(StoredSession::to_session)
            .ok_or_else(|| anyhow::anyhow!("Not logged in; run `notes auth login <username>` first"))
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("NOTES_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("notes").join("cli")
    };

    Ok(config_dir)
}
