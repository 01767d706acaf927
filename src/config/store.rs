use super::{Config, ConfigError, ConfigResult};
use directories::ProjectDirs;
use std::{fs, io, path::Path, path::PathBuf};
use tracing::debug;

const CONFIG_FILE: &str = "config.yml";

/// Where the configuration comes from and, for files, where it goes back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// A YAML document given on the command line. Never written back.
    Inline(String),
}

impl ConfigSource {
    /// Interprets a `--config` value: YAML documents start with `{` or `---`,
    /// anything else is a path.
    pub fn from_arg(value: &str) -> Self {
        let trimmed = value.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with("---") {
            ConfigSource::Inline(value.to_owned())
        } else {
            ConfigSource::File(PathBuf::from(value))
        }
    }

    pub fn default_file() -> ConfigResult<Self> {
        ProjectDirs::from("org", "authctl", "authctl")
            .map(|dirs| ConfigSource::File(dirs.config_dir().join(CONFIG_FILE)))
            .ok_or(ConfigError::MissingConfigDir)
    }

    pub fn load(&self) -> ConfigResult<Config> {
        let contents = match self {
            ConfigSource::Inline(doc) => doc.clone(),
            ConfigSource::File(path) => match fs::read_to_string(path) {
                Ok(contents) => contents,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "no configuration file yet");
                    String::new()
                }
                Err(err) => return Err(err.into()),
            },
        };

        if contents.trim().is_empty() {
            return Ok(Config::default());
        }

        let mut config: Config = serde_yaml::from_str(&contents)?;
        config.repair_markers();
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        let ConfigSource::File(path) = self else {
            debug!("inline configuration is not persisted");
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_yaml::to_string(config)?;
        fs::write(path, data)?;
        restrict_permissions(path)?;

        debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
