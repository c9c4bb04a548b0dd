use std::collections::HashMap;

use cached::proc_macro::cached;
use config::{Config, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Beacon.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("Beacon.toml").exists() {
            builder = builder.add_source(File::new("Beacon.toml", FileFormat::Toml));
        }

        builder.build().unwrap()
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Thresholds {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RoutePolicy {
    pub min_level: u32,
    pub channels: Vec<String>,
    pub priority: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Dispatch {
    pub channel_timeout_seconds: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub thresholds: Thresholds,
    pub policy: HashMap<String, RoutePolicy>,
    pub dispatch: Dispatch,
}

pub async fn init() {
    println!(
        ":: Beacon Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read().await.try_deserialize::<Settings>().unwrap()
}

#[cfg(feature = "test")]
#[cfg(test)]
mod tests {
    use crate::init;

    #[async_std::test]
    async fn it_works() {
        init().await;
    }
}
