//! Configuration management for the Omniport admin server
//!
//! Sources, lowest precedence first: `conf/application.yml`, environment
//! variables prefixed with `omniport`, command line arguments.

use clap::Parser;
use config::{Config, Environment};
use serde::{Deserialize, Serialize};

use omniport_admin::{Nomenclature, OMNIPOTENCE_SITE_NAME, SiteSettings};
use omniport_auth::model::{
    DEFAULT_TOKEN_EXPIRE_SECONDS, OMNIPORT_AUTH_TOKEN_EXPIRE_SECONDS,
    OMNIPORT_AUTH_TOKEN_SECRET_KEY, RoleAssignment, User,
};
use omniport_common::OmniportError;

use crate::startup::logging::LoggingConfig;

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";
pub const DEFAULT_SERVER_PORT: u16 = 8000;

pub const SERVER_ADDRESS: &str = "server.address";
pub const SERVER_PORT: &str = "server.port";
pub const SITE_NOMENCLATURE_NAME: &str = "site.nomenclature.name";
pub const SITE_NOMENCLATURE_VERBOSE_NAME: &str = "site.nomenclature.verbose_name";
pub const ADMIN_SITE_NAME: &str = "omniport.admin.name";
pub const SEED_USERS: &str = "omniport.users";
pub const LOGS_PATH: &str = "omniport.logs.path";
pub const LOGS_LEVEL: &str = "omniport.logs.level";
pub const LOGS_CONSOLE: &str = "omniport.logs.console";
pub const LOGS_FILE: &str = "omniport.logs.file";
pub const LOGS_ROTATION: &str = "omniport.logs.rotation";

/// Minimum decoded length of the session token secret, in bytes
const MIN_SECRET_KEY_BYTES: usize = 32;

/// Command line arguments for the server
#[derive(Debug, Default, Parser)]
#[command(name = "omniport-server", about = "Omniport omnipotence admin server")]
pub struct Cli {
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,
    #[arg(short = 'p', long = "port", env = "OMNIPORT_PORT")]
    pub port: Option<u16>,
    #[arg(long = "verbose-name")]
    pub verbose_name: Option<String>,
}

/// A user seeded into the in-memory store at startup
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserSeed {
    pub username: String,
    /// bcrypt hash
    pub password: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub roles: Vec<RoleAssignment>,
}

fn default_true() -> bool {
    true
}

impl From<UserSeed> for User {
    fn from(value: UserSeed) -> Self {
        User {
            id: 0,
            username: value.username,
            password: value.password,
            is_active: value.is_active,
            is_staff: value.is_staff,
            is_superuser: value.is_superuser,
            roles: value.roles,
        }
    }
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(args: Cli) -> anyhow::Result<Self> {
        let mut config_builder = Config::builder()
            .add_source(config::File::with_name(&args.config).required(false))
            .add_source(
                Environment::with_prefix("omniport")
                    .separator(".")
                    .try_parsing(true),
            );

        if let Some(v) = args.port {
            config_builder = config_builder.set_override(SERVER_PORT, i64::from(v))?;
        }
        if let Some(v) = args.verbose_name {
            config_builder = config_builder.set_override(SITE_NOMENCLATURE_VERBOSE_NAME, v)?;
        }

        Ok(Self::from_config(config_builder.build()?))
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<(), OmniportError> {
        let secret = self.token_secret_key();
        if secret.is_empty() {
            return Err(OmniportError::ConfigError(format!(
                "'{}' must be set",
                OMNIPORT_AUTH_TOKEN_SECRET_KEY
            )));
        }
        // base64 encodes 3 bytes in 4 characters
        if secret.len() / 4 * 3 < MIN_SECRET_KEY_BYTES {
            return Err(OmniportError::ConfigError(format!(
                "'{}' must decode to at least {} bytes",
                OMNIPORT_AUTH_TOKEN_SECRET_KEY, MIN_SECRET_KEY_BYTES
            )));
        }
        if self.admin_site_name().is_empty() || self.admin_site_name().contains('/') {
            return Err(OmniportError::ConfigError(format!(
                "'{}' must be a single path segment",
                ADMIN_SITE_NAME
            )));
        }
        if let Ok(port) = self.config.get_int(SERVER_PORT)
            && u16::try_from(port).is_err()
        {
            return Err(OmniportError::ConfigError(format!(
                "'{}' must be between 0 and {}, got {}",
                SERVER_PORT,
                u16::MAX,
                port
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS)
            .unwrap_or("0.0.0.0".to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT)
            .ok()
            .and_then(|port| u16::try_from(port).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    // ========================================================================
    // Site Configuration
    // ========================================================================

    pub fn site_settings(&self) -> SiteSettings {
        let defaults = SiteSettings::default();
        SiteSettings {
            nomenclature: Nomenclature {
                name: self
                    .config
                    .get_string(SITE_NOMENCLATURE_NAME)
                    .unwrap_or(defaults.nomenclature.name),
                verbose_name: self
                    .config
                    .get_string(SITE_NOMENCLATURE_VERBOSE_NAME)
                    .unwrap_or(defaults.nomenclature.verbose_name),
            },
        }
    }

    pub fn admin_site_name(&self) -> String {
        self.config
            .get_string(ADMIN_SITE_NAME)
            .unwrap_or(OMNIPOTENCE_SITE_NAME.to_string())
    }

    // ========================================================================
    // Auth Configuration
    // ========================================================================

    pub fn token_secret_key(&self) -> String {
        self.config
            .get_string(OMNIPORT_AUTH_TOKEN_SECRET_KEY)
            .unwrap_or_default()
    }

    pub fn token_expire_seconds(&self) -> i64 {
        self.config
            .get_int(OMNIPORT_AUTH_TOKEN_EXPIRE_SECONDS)
            .unwrap_or(DEFAULT_TOKEN_EXPIRE_SECONDS)
    }

    pub fn seed_users(&self) -> Vec<User> {
        match self.config.get::<Vec<UserSeed>>(SEED_USERS) {
            Ok(seeds) => seeds.into_iter().map(User::from).collect(),
            Err(config::ConfigError::NotFound(_)) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed '{}'", SEED_USERS);
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.config.get_string(LOGS_PATH).ok(),
            self.config.get_bool(LOGS_CONSOLE).unwrap_or(true),
            self.config.get_bool(LOGS_FILE).unwrap_or(true),
            self.config
                .get_string(LOGS_LEVEL)
                .unwrap_or("info".to_string()),
            self.config.get_string(LOGS_ROTATION).ok(),
        )
    }
}
