use natnet_proto::Version;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct DumpConfig {
    pub capture: CaptureSection,
    #[serde(default)]
    pub protocol: ProtocolSection,
    #[serde(default)]
    pub logging: LoggingSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Deserialize)]
pub struct CaptureSection {
    /// File holding back-to-back NatNet messages, headers included.
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ProtocolSection {
    /// Negotiated protocol version used to decode the capture.
    #[serde(default = "default_version")]
    pub version: Version,
}

fn default_version() -> Version {
    Version::LATEST
}

impl Default for ProtocolSection {
    fn default() -> Self {
        Self {
            version: default_version(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputSection {
    /// Pretty-print each JSON record instead of one per line.
    #[serde(default)]
    pub pretty: bool,
    /// Also print messages that had no decoder.
    #[serde(default = "default_skipped")]
    pub skipped: bool,
}

fn default_skipped() -> bool {
    true
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            pretty: false,
            skipped: default_skipped(),
        }
    }
}

impl DumpConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
