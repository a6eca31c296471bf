use serde::Deserialize;
use std::path::Path;

use crate::layout::interaction::DEFAULT_HIT_MARGIN;
use crate::layout::resize::ResizeStrategy;
use crate::layout::SplitRatios;

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub window: WindowConfig,
    pub layout: LayoutConfig,
    pub interaction: InteractionConfig,
}

/// Initial window configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub width: f64,
    pub height: f64,
    pub title: String,
    pub resizable: bool,
}

/// Crosshair placement and resize behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub initial_horizontal_ratio: f32,
    pub initial_vertical_ratio: f32,
    pub resize_strategy: ResizeStrategy,
}

/// Pointer interaction configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionConfig {
    pub hit_margin: f32,
}

/// Which config sections changed between two configs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigDelta {
    pub window_changed: bool,
    pub layout_changed: bool,
    pub interaction_changed: bool,
}

impl ConfigDelta {
    pub fn is_empty(&self) -> bool {
        !self.window_changed && !self.layout_changed && !self.interaction_changed
    }
}

/// Errors that can occur during config loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("validation error: {0}")]
    Validation(String),
}

// ── Serde intermediate structs (unknown keys are ignored) ───────────────

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawConfig {
    window: RawWindowConfig,
    layout: RawLayoutConfig,
    interaction: RawInteractionConfig,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawWindowConfig {
    width: f64,
    height: f64,
    title: String,
    resizable: bool,
}

impl Default for RawWindowConfig {
    fn default() -> Self {
        let defaults = WindowConfig::default();
        Self {
            width: defaults.width,
            height: defaults.height,
            title: defaults.title,
            resizable: defaults.resizable,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawLayoutConfig {
    initial_horizontal_ratio: f32,
    initial_vertical_ratio: f32,
    resize_strategy: String,
}

impl Default for RawLayoutConfig {
    fn default() -> Self {
        Self {
            initial_horizontal_ratio: 0.5,
            initial_vertical_ratio: 0.5,
            resize_strategy: ResizeStrategy::default().name().to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
struct RawInteractionConfig {
    hit_margin: f32,
}

impl Default for RawInteractionConfig {
    fn default() -> Self {
        Self {
            hit_margin: DEFAULT_HIT_MARGIN,
        }
    }
}

// ── Default impls ───────────────────────────────────────────────────────

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "QuadView".to_string(),
            resizable: true,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            initial_horizontal_ratio: 0.5,
            initial_vertical_ratio: 0.5,
            resize_strategy: ResizeStrategy::default(),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_margin: DEFAULT_HIT_MARGIN,
        }
    }
}

impl LayoutConfig {
    /// Initial split ratios for a fresh crosshair.
    pub fn initial_ratios(&self) -> SplitRatios {
        SplitRatios {
            horizontal: self.initial_horizontal_ratio,
            vertical: self.initial_vertical_ratio,
        }
    }
}

// ── Config implementation ───────────────────────────────────────────────

impl Config {
    /// Load config from a TOML file path. Returns defaults if file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Parse a TOML string into a Config.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig =
            toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))?;

        let resize_strategy = ResizeStrategy::from_name(&raw.layout.resize_strategy)
            .ok_or_else(|| {
                let names: Vec<&str> = ResizeStrategy::all().iter().map(|s| s.name()).collect();
                ConfigError::Validation(format!(
                    "unknown resize strategy '{}', valid strategies: {}",
                    raw.layout.resize_strategy,
                    names.join(", ")
                ))
            })?;

        let config = Self {
            window: WindowConfig {
                width: raw.window.width,
                height: raw.window.height,
                title: raw.window.title,
                resizable: raw.window.resizable,
            },
            layout: LayoutConfig {
                initial_horizontal_ratio: raw.layout.initial_horizontal_ratio,
                initial_vertical_ratio: raw.layout.initial_vertical_ratio,
                resize_strategy,
            },
            interaction: InteractionConfig {
                hit_margin: raw.interaction.hit_margin,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the config, returning an error if any values are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size_ok = |v: f64| v.is_finite() && v > 0.0;
        if !size_ok(self.window.width) || !size_ok(self.window.height) {
            return Err(ConfigError::Validation(
                "window width and height must be finite and > 0".to_string(),
            ));
        }

        for (name, ratio) in [
            ("initial_horizontal_ratio", self.layout.initial_horizontal_ratio),
            ("initial_vertical_ratio", self.layout.initial_vertical_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be between 0 and 1, got {ratio}"
                )));
            }
        }

        let margin = self.interaction.hit_margin;
        if !margin.is_finite() || margin < 0.0 {
            return Err(ConfigError::Validation(format!(
                "hit_margin must be finite and >= 0, got {margin}"
            )));
        }

        Ok(())
    }

    /// Compare against a newer config and report which sections changed.
    pub fn diff(&self, other: &Config) -> ConfigDelta {
        ConfigDelta {
            window_changed: self.window != other.window,
            layout_changed: self.layout != other.layout,
            interaction_changed: self.interaction != other.interaction,
        }
    }

    /// Render the default configuration as a commented TOML document.
    pub fn print_default() -> String {
        let d = Config::default();
        format!(
            "# QuadView configuration\n\
             \n\
             [window]\n\
             width = {:.1}\n\
             height = {:.1}\n\
             title = \"{}\"\n\
             resizable = {}\n\
             \n\
             [layout]\n\
             initial_horizontal_ratio = {:.2}\n\
             initial_vertical_ratio = {:.2}\n\
             # proportional | fixed_offset | fixed_pixel\n\
             resize_strategy = \"{}\"\n\
             \n\
             [interaction]\n\
             hit_margin = {:.1}\n",
            d.window.width,
            d.window.height,
            d.window.title,
            d.window.resizable,
            d.layout.initial_horizontal_ratio,
            d.layout.initial_vertical_ratio,
            d.layout.resize_strategy.name(),
            d.interaction.hit_margin,
        )
    }
}
