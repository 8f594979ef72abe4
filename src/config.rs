use eyre::{eyre, Result, WrapErr};
use once_cell::sync::OnceCell;
use std::{env, str::FromStr, time::Duration};

static CONFIG: OnceCell<BotConfig> = OnceCell::new();

const DEFAULT_METRICS_PORT: u16 = 5000;
const DEFAULT_PAGINATOR_TIMEOUT: u64 = 60;

#[derive(Debug)]
pub struct BotConfig {
    pub token: String,
    pub metrics_port: u16,
    pub paginator_timeout: Duration,
}

fn env_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .parse()
            .wrap_err_with(|| format!("{name} env variable is invalid")),
        Err(_) => Ok(default),
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let token = env::var("DISCORD_TOKEN")
            .wrap_err("DISCORD_TOKEN env variable is not found")?;

        let timeout = env_or("PAGINATOR_TIMEOUT_SECS", DEFAULT_PAGINATOR_TIMEOUT)?;

        Ok(BotConfig {
            token,
            metrics_port: env_or("METRICS_PORT", DEFAULT_METRICS_PORT)?,
            paginator_timeout: Duration::from_secs(timeout),
        })
    }

    pub fn init() -> Result<()> {
        let cfg = BotConfig::from_env()?;

        CONFIG
            .set(cfg)
            .map_err(|_| eyre!("config is already initialized"))
    }

    pub fn get() -> &'static BotConfig {
        CONFIG.get().expect("config is not initialized")
    }
}
