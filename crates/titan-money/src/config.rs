//! # Money Configuration
//!
//! Rendering preferences for tools built on titan-money.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TITAN_MONEY_DECIMAL_SEPARATOR=,                                    │
//! │     TITAN_MONEY_SUFFIX_SEPARATOR=" "                                   │
//! │     TITAN_MONEY_STYLE=integer_with_suffix   (or f / n / d)             │
//! │     TITAN_MONEY_PRECISION=2                 (or "full")                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/money/money.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.titan.money/money.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "." separator, " " before the code, full precision                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # money.toml
//! [format]
//! decimal_separator = ","
//! suffix_separator = " "
//! style = "plain_with_suffix"   # plain_with_suffix | plain_without_suffix | integer_with_suffix
//! precision = 2                 # omit for full precision
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::currency::Currency;
use crate::error::{ConfigError, ConfigResult, MoneyResult};
use crate::format::{FormatOptions, RenderStyle};
use crate::money::Money;
use crate::rounding::{Rounding, MAX_DECIMAL_PLACES};

// =============================================================================
// Format Settings
// =============================================================================

/// How amounts are rendered by tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSettings {
    /// Separator between whole units and the fraction.
    #[serde(default = "default_decimal_separator")]
    pub decimal_separator: char,

    /// Text placed between the digits and the currency code.
    #[serde(default = "default_suffix_separator")]
    pub suffix_separator: String,

    /// Output style.
    #[serde(default)]
    pub style: RenderStyle,

    /// Fraction digits to print. `None` prints every decimal place.
    #[serde(default)]
    pub precision: Option<u32>,
}

fn default_decimal_separator() -> char {
    '.'
}

fn default_suffix_separator() -> String {
    " ".to_string()
}

impl Default for FormatSettings {
    fn default() -> Self {
        FormatSettings {
            decimal_separator: default_decimal_separator(),
            suffix_separator: default_suffix_separator(),
            style: RenderStyle::default(),
            precision: None,
        }
    }
}

impl FormatSettings {
    /// Separators in the shape the renderer takes.
    pub fn options(&self) -> FormatOptions {
        FormatOptions {
            decimal_separator: self.decimal_separator,
            suffix_separator: self.suffix_separator.clone(),
        }
    }

    /// Renders `amount` with these settings.
    ///
    /// ## Example
    /// ```rust
    /// use titan_money::config::FormatSettings;
    /// use titan_money::{Money, RenderStyle, Usd};
    ///
    /// let settings = FormatSettings {
    ///     precision: Some(1),
    ///     style: RenderStyle::PlainWithoutSuffix,
    ///     ..FormatSettings::default()
    /// };
    /// let amount = Money::<Usd, 2>::from_scaled(1099);
    /// assert_eq!(settings.render(&amount).unwrap(), "11.0");
    /// ```
    pub fn render<C: Currency, const D: u32, R: Rounding>(
        &self,
        amount: &Money<C, D, R>,
    ) -> MoneyResult<String> {
        amount.render_with(&self.options(), self.precision.unwrap_or(D), self.style)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete titan-money configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyConfig {
    /// Rendering settings.
    #[serde(default)]
    pub format: FormatSettings,
}

impl MoneyConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (money.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading money config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load money config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Decodes a TOML document.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let separator = self.format.decimal_separator;
        if separator.is_ascii_digit() || separator.is_whitespace() || matches!(separator, '-' | '+')
        {
            return Err(ConfigError::Invalid(format!(
                "decimal_separator cannot be '{}'",
                separator
            )));
        }

        if let Some(precision) = self.format.precision {
            if precision > MAX_DECIMAL_PLACES {
                return Err(ConfigError::Invalid(format!(
                    "precision must be at most {}, got {}",
                    MAX_DECIMAL_PLACES, precision
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("TITAN_MONEY_DECIMAL_SEPARATOR") {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(separator), None) => {
                    debug!(%separator, "Overriding decimal separator from environment");
                    self.format.decimal_separator = separator;
                }
                _ => warn!(value = %value, "Decimal separator must be a single character"),
            }
        }

        if let Some(value) = lookup("TITAN_MONEY_SUFFIX_SEPARATOR") {
            self.format.suffix_separator = value;
        }

        if let Some(value) = lookup("TITAN_MONEY_STYLE") {
            match value.parse::<RenderStyle>() {
                Ok(style) => {
                    debug!(%style, "Overriding render style from environment");
                    self.format.style = style;
                }
                Err(_) => warn!(style = %value, "Unknown render style in environment"),
            }
        }

        if let Some(value) = lookup("TITAN_MONEY_PRECISION") {
            match value.trim() {
                "" | "full" => self.format.precision = None,
                digits => match digits.parse::<u32>() {
                    Ok(p) => self.format.precision = Some(p),
                    Err(_) => warn!(precision = %value, "Invalid precision in environment"),
                },
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "titan", "money")
            .map(|dirs| dirs.config_dir().join("money.toml"))
    }
}
