use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use attitude::DEFAULT_INDICATOR_RADIUS;
use serde::Deserialize;

use crate::display::DisplayFormat;
use crate::error::{config_error, TrackerError, TrackerResult};

pub const DEFAULT_BAUD_RATE: u32 = 115_200;
/// Read timeout of a live port, which also paces live updates
pub const DEFAULT_SERIAL_TIMEOUT: Duration = Duration::from_millis(1000);
/// Delay between replayed lines
pub const DEFAULT_REPLAY_INTERVAL: Duration = Duration::from_millis(100);

/// Where samples come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceKind {
    /// Replay a recorded text file, one sample per line
    File { path: PathBuf },
    /// Poll a serial device
    Serial { port: String, baud_rate: u32 },
}

/// Which source a tracker reads and how fast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    kind: SourceKind,
    interval: Duration,
}

impl SourceConfig {
    /// Replay `path` with the default 100 ms between lines
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: SourceKind::File { path: path.into() },
            interval: DEFAULT_REPLAY_INTERVAL,
        }
    }

    /// Read `port` at 115200 baud with a 1 s timeout
    pub fn serial(port: impl Into<String>) -> Self {
        Self {
            kind: SourceKind::Serial {
                port: port.into(),
                baud_rate: DEFAULT_BAUD_RATE,
            },
            interval: DEFAULT_SERIAL_TIMEOUT,
        }
    }

    /// Override the pacing interval (also the serial read timeout)
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Override the baud rate. Has no effect on a file source.
    pub fn with_baud_rate(mut self, baud: u32) -> Self {
        if let SourceKind::Serial { baud_rate, .. } = &mut self.kind {
            *baud_rate = baud;
        }
        self
    }

    pub fn kind(&self) -> &SourceKind {
        &self.kind
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn validate(&self) -> TrackerResult<()> {
        match &self.kind {
            SourceKind::File { path } if path.as_os_str().is_empty() => {
                Err(config_error("replay file path is empty", Some("path")))
            }
            SourceKind::Serial { port, .. } if port.trim().is_empty() => {
                Err(config_error("serial port name is empty", Some("port")))
            }
            SourceKind::Serial { baud_rate: 0, .. } => {
                Err(config_error("baud rate must be positive", Some("baud_rate")))
            }
            _ => Ok(()),
        }
    }
}

/// Everything a tracker needs apart from its renderer
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    pub source: SourceConfig,
    pub display: DisplayFormat,
    /// Radius of the roll, pitch and compass glyphs
    pub indicator_radius: f64,
}

impl TrackerConfig {
    pub fn new(source: SourceConfig) -> Self {
        Self {
            source,
            display: DisplayFormat::default(),
            indicator_radius: DEFAULT_INDICATOR_RADIUS,
        }
    }

    pub fn with_display(mut self, display: DisplayFormat) -> Self {
        self.display = display;
        self
    }

    pub fn with_indicator_radius(mut self, radius: f64) -> Self {
        self.indicator_radius = radius;
        self
    }

    pub fn validate(&self) -> TrackerResult<()> {
        self.source.validate()?;
        if !self.indicator_radius.is_finite() || self.indicator_radius <= 0.0 {
            return Err(config_error(
                format!("indicator radius must be positive, got {}", self.indicator_radius),
                Some("indicator_radius"),
            ));
        }
        Ok(())
    }

    /// Load a TOML config file
    pub fn load(path: impl AsRef<Path>) -> TrackerResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| TrackerError::ConfigFile {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&contents).map_err(|e| match e {
            TrackerError::ConfigFile { message, .. } => TrackerError::ConfigFile {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document
    pub fn from_toml(contents: &str) -> TrackerResult<Self> {
        let file: ConfigFile = toml::from_str(contents).map_err(|e| TrackerError::ConfigFile {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        let config = file.into_config()?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    source: SourceSection,
    #[serde(default)]
    display: DisplayFormat,
    #[serde(default = "default_indicator_radius")]
    indicator_radius: f64,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum SourceSection {
    File {
        path: PathBuf,
        interval_secs: Option<f64>,
    },
    Serial {
        port: String,
        baud_rate: Option<u32>,
        interval_secs: Option<f64>,
    },
}

fn default_indicator_radius() -> f64 {
    DEFAULT_INDICATOR_RADIUS
}

fn interval_from_secs(secs: f64) -> TrackerResult<Duration> {
    Duration::try_from_secs_f64(secs).map_err(|_| {
        config_error(
            format!("interval must be a non-negative number of seconds, got {}", secs),
            Some("interval_secs"),
        )
    })
}

impl ConfigFile {
    fn into_config(self) -> TrackerResult<TrackerConfig> {
        let source = match self.source {
            SourceSection::File {
                path,
                interval_secs,
            } => {
                let mut source = SourceConfig::file(path);
                if let Some(secs) = interval_secs {
                    source = source.with_interval(interval_from_secs(secs)?);
                }
                source
            }
            SourceSection::Serial {
                port,
                baud_rate,
                interval_secs,
            } => {
                let mut source =
                    SourceConfig::serial(port).with_baud_rate(baud_rate.unwrap_or(DEFAULT_BAUD_RATE));
                if let Some(secs) = interval_secs {
                    source = source.with_interval(interval_from_secs(secs)?);
                }
                source
            }
        };

        Ok(TrackerConfig {
            source,
            display: self.display,
            indicator_radius: self.indicator_radius,
        })
    }
}
