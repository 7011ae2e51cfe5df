//! Layered configuration for swatch.
//!
//! Sources are merged in increasing order of precedence:
//!
//! 1. built-in defaults,
//! 2. the user configuration file (`config.toml` in the platform config
//!    directory, e.g. `~/.config/swatch/config.toml`),
//! 3. an explicitly given file (TOML, YAML or JSON, chosen by extension),
//! 4. environment variables prefixed with `SWATCH_`, nested with `__`
//!    (e.g. `SWATCH_EXTRACTION__POLICY=mean`).

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use swatch_color::{DEFAULT_TOLERANCE, Extractor, Policy};
use tracing::instrument;

use crate::error::{ErrorKind, Result};

pub const ENV_PREFIX: &str = "SWATCH_";
const DEFAULT_ARCHIVE: &str = "items.zip";
const SNAPSHOT_EXTENSION: &str = "colors.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Archive of texture images named `<id>-<meta>.png`.
    pub archive: PathBuf,
    /// Where the color snapshot is kept; derived from `archive` if unset.
    pub cache: Option<PathBuf>,
    pub extraction: Extraction,
    /// World save directory, for region listing.
    pub world: Option<PathBuf>,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            archive: PathBuf::from(DEFAULT_ARCHIVE),
            cache: None,
            extraction: Extraction::default(),
            world: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extraction {
    pub policy: Policy,
    pub tolerance: u8,
}
impl Default for Extraction {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}
impl Extraction {
    pub fn extractor(&self) -> Extractor {
        Extractor::new(self.policy, self.tolerance)
    }
}

impl Config {
    /// Load configuration from the user config file, an optional explicit
    /// file and the environment.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(Self::user_config_path().as_deref(), explicit)
    }

    /// Same as [`load`](Self::load) with the user config file location
    /// given explicitly.
    #[instrument]
    pub fn load_from(user: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(user) = user {
            // A missing user config file is simply empty.
            figment = figment.merge(Toml::file(user));
        }
        if let Some(path) = explicit {
            if !path.is_file() {
                exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
            }
            let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_lowercase);
            figment = match extension.as_deref() {
                Some("toml") => figment.merge(Toml::file_exact(path)),
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
            };
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        let config: Config = figment.extract().or_raise(|| ErrorKind::Invalid)?;
        tracing::debug!(archive = %config.archive.display(), "configuration loaded");
        Ok(config)
    }

    /// Location of the per-user configuration file, if the platform has a
    /// configuration directory.
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "swatch").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Snapshot location: `cache` if configured, otherwise the archive path
    /// with its extension replaced (`items.zip` → `items.colors.json`).
    pub fn cache_path(&self) -> PathBuf {
        self.cache.clone().unwrap_or_else(|| self.archive.with_extension(SNAPSHOT_EXTENSION))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(None, None).unwrap();
            assert_eq!(config, Config::default());
            assert_eq!(config.cache_path(), PathBuf::from("items.colors.json"));
            assert_eq!(config.extraction.extractor(), Extractor::default());
            Ok(())
        });
    }

    #[rstest]
    #[case("swatch.toml", "archive = \"textures.zip\"\n[extraction]\npolicy = \"mean\"\ntolerance = 8\n")]
    #[case("swatch.yaml", "archive: textures.zip\nextraction:\n  policy: mean\n  tolerance: 8\n")]
    #[case("swatch.json", r#"{"archive": "textures.zip", "extraction": {"policy": "mean", "tolerance": 8}}"#)]
    fn test_explicit_file(#[case] name: &str, #[case] contents: &str) {
        Jail::expect_with(|jail| {
            jail.create_file(name, contents)?;
            let config = Config::load_from(None, Some(Path::new(name))).unwrap();
            assert_eq!(config.archive, PathBuf::from("textures.zip"));
            assert_eq!(config.extraction, Extraction { policy: Policy::Mean, tolerance: 8 });
            assert_eq!(config.cache_path(), PathBuf::from("textures.colors.json"));
            Ok(())
        });
    }

    #[test]
    fn test_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file("user.toml", "archive = \"user.zip\"\ncache = \"user.json\"\n")?;
            jail.create_file("explicit.toml", "archive = \"explicit.zip\"\n")?;
            jail.set_env("SWATCH_EXTRACTION__TOLERANCE", "30");
            let config = Config::load_from(Some(Path::new("user.toml")), Some(Path::new("explicit.toml"))).unwrap();
            assert_eq!(config.archive, PathBuf::from("explicit.zip"));
            assert_eq!(config.cache_path(), PathBuf::from("user.json"));
            assert_eq!(config.extraction.tolerance, 30);
            assert_eq!(config.extraction.policy, Policy::Mode);

            jail.set_env("SWATCH_ARCHIVE", "env.zip");
            let config = Config::load_from(Some(Path::new("user.toml")), Some(Path::new("explicit.toml"))).unwrap();
            assert_eq!(config.archive, PathBuf::from("env.zip"));
            Ok(())
        });
    }

    #[rstest]
    #[case::relative(false)]
    #[case::absolute(true)]
    fn test_missing_user_file_is_ignored(#[case] absolute: bool) {
        Jail::expect_with(|jail| {
            let user = PathBuf::from("swatch/config.toml");
            let user = if absolute { jail.directory().join(user) } else { user };
            let config = Config::load_from(Some(&user), None).unwrap();
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_missing_user_file_keeps_explicit_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file("swatch.yaml", "archive: textures.zip\n")?;
            jail.set_env("SWATCH_EXTRACTION__TOLERANCE", "12");
            let user = jail.directory().join("absent").join("config.toml");
            let config = Config::load_from(Some(&user), Some(Path::new("swatch.yaml"))).unwrap();
            assert_eq!(config.archive, PathBuf::from("textures.zip"));
            assert_eq!(config.extraction.tolerance, 12);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file() {
        Jail::expect_with(|_jail| {
            let err = Config::load_from(None, Some(Path::new("nope.toml"))).unwrap_err();
            assert_eq!(*err, ErrorKind::NotFound(PathBuf::from("nope.toml")));
            Ok(())
        });
    }

    #[test]
    fn test_unsupported_format() {
        Jail::expect_with(|jail| {
            jail.create_file("swatch.ini", "archive=x")?;
            let err = Config::load_from(None, Some(Path::new("swatch.ini"))).unwrap_err();
            assert_eq!(*err, ErrorKind::UnsupportedFormat(PathBuf::from("swatch.ini")));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_values() {
        Jail::expect_with(|jail| {
            jail.set_env("SWATCH_EXTRACTION__POLICY", "median");
            let err = Config::load_from(None, None).unwrap_err();
            assert_eq!(*err, ErrorKind::Invalid);
            Ok(())
        });
    }
}
