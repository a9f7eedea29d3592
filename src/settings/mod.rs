use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::pan::ParamValues;

const SETTINGS_FILENAME: &str = "settings.json";

impl std::fmt::Display for JackSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Client Name: {}", self.client_name)?;
        writeln!(f, "Input Left Port: {}", self.input_left_port)?;
        writeln!(f, "Input Right Port: {}", self.input_right_port)?;
        writeln!(f, "Output Left Port: {}", self.output_left_port)?;
        writeln!(f, "Output Right Port: {}", self.output_right_port)?;
        writeln!(f, "Auto Connect: {}", self.auto_connect)?;
        writeln!(f, "Buffer Size: {}", self.buffer_size)?;
        writeln!(f, "Sample Rate: {}", self.sample_rate)?;
        Ok(())
    }
}

/// Connections used by the live JACK client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JackSettings {
    pub client_name: String,
    pub input_left_port: String,
    pub input_right_port: String,
    pub output_left_port: String,
    pub output_right_port: String,
    pub auto_connect: bool,
    /// Only used as a PipeWire latency hint.
    pub buffer_size: u32,
    /// Only used as a PipeWire latency hint.
    pub sample_rate: u32,
}

impl Default for JackSettings {
    fn default() -> Self {
        Self {
            client_name: "stereopan".to_string(),
            input_left_port: "system:capture_1".to_string(),
            input_right_port: "system:capture_2".to_string(),
            output_left_port: "system:playback_1".to_string(),
            output_right_port: "system:playback_2".to_string(),
            auto_connect: true,
            buffer_size: 128,
            sample_rate: 48000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Frames per `process` call when rendering files.
    pub block_size: usize,
    /// Control values at activation.
    pub initial: ParamValues,
    /// Control values set after activation; the first block ramps towards them.
    pub target: ParamValues,
    pub jack: JackSettings,
}

impl std::fmt::Display for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "------------------------------")?;
        writeln!(f, "Block Size: {}", self.block_size)?;
        writeln!(f, "Initial: {}", self.initial)?;
        writeln!(f, "Target: {}", self.target)?;
        writeln!(f, "JACK Settings:")?;
        write!(f, "{}", self.jack)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            block_size: 256,
            initial: ParamValues::default(),
            target: ParamValues::default(),
            jack: JackSettings::default(),
        }
    }
}

impl Settings {
    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings_path = path.map_or_else(Self::default_path, Path::to_path_buf);

        if settings_path.exists() {
            let contents = fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read settings file {settings_path:?}"))?;
            let settings: Self =
                serde_json::from_str(&contents).context("Failed to parse settings")?;
            debug!("Loaded settings from {settings_path:?}");
            Ok(settings)
        } else {
            info!("No settings file found at {settings_path:?}, using defaults");
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).context("Failed to write settings file")?;

        debug!("Saved settings to {path:?}");
        Ok(())
    }

    pub fn default_path() -> PathBuf {
        if let Ok(config_dir) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(config_dir)
                .join("stereopan")
                .join(SETTINGS_FILENAME)
        } else if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("stereopan")
                .join(SETTINGS_FILENAME)
        } else {
            PathBuf::from(".").join(SETTINGS_FILENAME)
        }
    }

    /// PipeWire's JACK shim picks its quantum from these variables.
    pub fn apply_to_environment(&self) {
        unsafe {
            std::env::set_var("PIPEWIRE_LATENCY", self.pipewire_latency());
            if std::env::var("JACK_PROMISCUOUS_SERVER").is_err() {
                std::env::set_var("JACK_PROMISCUOUS_SERVER", "pipewire");
            }
        }
    }

    fn pipewire_latency(&self) -> String {
        format!("{}/{}", self.jack.buffer_size, self.jack.sample_rate)
    }
}
