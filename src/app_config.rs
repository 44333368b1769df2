use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::layout::engine::{LINE_HEIGHT_FACTOR, LayoutConfig};
use crate::translation::{PartsOfSpeech, SessionSettings, TranslationPolicy};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language name or ISO 639 code of the input text
    #[serde(default = "default_language")]
    pub language: String,

    /// JSON lexicon mapping words to symbol file names
    #[serde(default = "default_lexicon_path")]
    pub lexicon_path: PathBuf,

    /// Directory holding the symbol images
    #[serde(default = "default_symbol_dir")]
    pub symbol_dir: PathBuf,

    /// Optional JSON synsets used for synonym fallback
    #[serde(default)]
    pub thesaurus_path: Option<PathBuf>,

    /// Optional JSON word→lexeme table used instead of rule-based morphology
    #[serde(default)]
    pub inflection_path: Option<PathBuf>,

    /// Page geometry
    #[serde(default)]
    pub layout: LayoutSettings,

    /// Substitution behaviour
    #[serde(default)]
    pub translation: TranslationSettings,

    /// Output settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Page geometry in pixels
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSettings {
    #[serde(default = "default_page_width")]
    pub page_width: u32,

    #[serde(default = "default_page_height")]
    pub page_height: u32,

    /// Text height; symbols, line height and spacing scale with it
    #[serde(default = "default_font_size")]
    pub font_size: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            page_width: default_page_width(),
            page_height: default_page_height(),
            font_size: default_font_size(),
        }
    }
}

impl From<LayoutSettings> for LayoutConfig {
    fn from(settings: LayoutSettings) -> Self {
        LayoutConfig::new(settings.page_width, settings.page_height, settings.font_size)
    }
}

/// Which parts of speech may be replaced by symbols
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PartsOfSpeechConfig {
    #[serde(default = "default_true")]
    pub nouns: bool,

    #[serde(default = "default_true")]
    pub verbs: bool,

    #[serde(default = "default_true")]
    pub adjectives: bool,

    /// Every remaining tag (adverbs, pronouns, ...)
    #[serde(default)]
    pub other: bool,
}

impl Default for PartsOfSpeechConfig {
    fn default() -> Self {
        Self {
            nouns: true,
            verbs: true,
            adjectives: true,
            other: false,
        }
    }
}

impl From<PartsOfSpeechConfig> for PartsOfSpeech {
    fn from(config: PartsOfSpeechConfig) -> Self {
        PartsOfSpeech::from_toggles(config.nouns, config.verbs, config.adjectives, config.other)
    }
}

/// Substitution settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationSettings {
    /// Substitute symbols from the first occurrence
    #[serde(default)]
    pub fast_translate: bool,

    /// Subtitle every symbol, not just the first one per word
    #[serde(default)]
    pub sub_all: bool,

    #[serde(default)]
    pub parts_of_speech: PartsOfSpeechConfig,

    /// Ask on the console which symbol an ambiguous word should use
    #[serde(default)]
    pub choose_definitions: bool,

    /// Symbol appended to plural nouns; empty disables it
    #[serde(default = "default_plural_indicator")]
    pub plural_indicator: String,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            fast_translate: false,
            sub_all: false,
            parts_of_speech: PartsOfSpeechConfig::default(),
            choose_definitions: false,
            plural_indicator: default_plural_indicator(),
        }
    }
}

impl TranslationSettings {
    pub fn policy(&self) -> TranslationPolicy {
        TranslationPolicy {
            fast_translate: self.fast_translate,
            sub_all: self.sub_all,
            parts_of_speech: self.parts_of_speech.into(),
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputSettings {
    /// Number pages after the title page
    #[serde(default = "default_true")]
    pub page_numbers: bool,

    /// Directory name for rendered pages, relative to the input file
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            page_numbers: true,
            output_dir: default_output_dir(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::LevelFilter {
    fn from(level: &LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "English".to_string()
}

fn default_lexicon_path() -> PathBuf {
    PathBuf::from("symbols/lexicon.json")
}

fn default_symbol_dir() -> PathBuf {
    PathBuf::from("symbols")
}

fn default_page_width() -> u32 {
    816 // Letter width at 96 dpi
}

fn default_page_height() -> u32 {
    1056
}

fn default_font_size() -> u32 {
    30
}

fn default_plural_indicator() -> String {
    crate::translation::session::DEFAULT_PLURAL_INDICATOR.to_string()
}

fn default_output_dir() -> String {
    "pictoscribe_pages".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::resolve_language(&self.language)?;

        let layout = &self.layout;
        if layout.page_width == 0 || layout.page_height == 0 {
            return Err(anyhow!(
                "Page dimensions must be positive, got {}x{}",
                layout.page_width,
                layout.page_height
            ));
        }
        if layout.font_size == 0 {
            return Err(anyhow!("Font size must be positive"));
        }
        let line_height = layout.font_size.checked_mul(LINE_HEIGHT_FACTOR);
        if line_height.is_none_or(|height| height > layout.page_height) {
            return Err(anyhow!(
                "A page {} px high cannot hold one line at font size {}",
                layout.page_height,
                layout.font_size
            ));
        }
        if self.output.output_dir.trim().is_empty() {
            return Err(anyhow!("Output directory name must not be empty"));
        }

        Ok(())
    }

    /// Load the configuration at `path`, writing the defaults there first
    /// when no file exists
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            return serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {}", path.display()));
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", path.display()))?;
        Ok(config)
    }

    /// Session settings for the configured language and layout
    pub fn session_settings(&self) -> SessionSettings {
        let plural = self.translation.plural_indicator.trim();
        SessionSettings {
            language: crate::language_utils::resolve_language_or_default(&self.language),
            layout: self.layout.into(),
            policy: self.translation.policy(),
            plural_indicator: (!plural.is_empty()).then(|| plural.to_string()),
            page_numbers: self.output.page_numbers,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            lexicon_path: default_lexicon_path(),
            symbol_dir: default_symbol_dir(),
            thesaurus_path: None,
            inflection_path: None,
            layout: LayoutSettings::default(),
            translation: TranslationSettings::default(),
            output: OutputSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}
