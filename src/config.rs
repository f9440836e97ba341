use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Longest accepted request or header line, terminator included.
    pub max_line_length: usize,
    /// Hard ceiling for a declared `Content-Length`.
    pub max_body_size: u64,

    pub server_name: String,

    // Only used by the `--listen` accept loop.
    pub address: IpAddr,
    pub port: u16,

    #[serde(deserialize_with = "deserialize_duration")]
    pub read_timeout: Duration,

    #[serde(deserialize_with = "deserialize_duration")]
    pub write_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_line_length: 4096,
            max_body_size: 1024 * 1024, // 1 MB

            server_name: "minihttpd/0.1".to_string(),

            address: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 8080,

            read_timeout: Duration::from_secs(5),
            write_timeout: Duration::from_secs(5),
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Fail to read {}: {err}", path.display());
                tracing::warn!("Fall back to default config");
                return ServerConfig::default();
            }
        };

        Self::from_toml(&content).unwrap_or_else(|err| {
            tracing::warn!("Fail to deserialize config file {}: {err}", path.display());
            tracing::warn!("Fall back to default config");
            ServerConfig::default()
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<ServerConfig>(content)
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(serde::de::Error::custom("duration must be a non-negative number of seconds"));
    }
    Ok(Duration::from_secs_f64(secs))
}
