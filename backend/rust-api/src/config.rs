use serde::Deserialize;
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_DATA_PATH: &str = "data/db.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_path: PathBuf,
    pub seed_on_start: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            seed_on_start: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // Build configuration from config/*.toml + ENV overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables (prefix: APP_)
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();

        let host = settings
            .get_string("server.host")
            .or_else(|_| env::var("HOST"))
            .unwrap_or(defaults.host);

        let port = match settings.get_int("server.port") {
            Ok(port) => u16::try_from(port)
                .map_err(|_| config::ConfigError::Message(format!("invalid port: {}", port)))?,
            Err(_) => match env::var("PORT") {
                Ok(raw) => raw
                    .parse::<u16>()
                    .map_err(|_| config::ConfigError::Message(format!("invalid PORT: {}", raw)))?,
                Err(_) => defaults.port,
            },
        };

        let data_path = settings
            .get_string("storage.data_path")
            .or_else(|_| env::var("QUIZROOM_DATA_PATH"))
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        let seed_on_start = settings
            .get_bool("storage.seed_on_start")
            .ok()
            .or_else(|| {
                env::var("QUIZROOM_SEED")
                    .ok()
                    .map(|v| !matches!(v.as_str(), "0" | "false" | "no"))
            })
            .unwrap_or(defaults.seed_on_start);

        Ok(Config {
            host,
            port,
            data_path,
            seed_on_start,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
