/*!
 * Common test utilities for the pictoscribe test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use image::{GrayImage, Luma};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use pictoscribe::gateways::mock::{BoxRenderer, FixedTagger};
use pictoscribe::gateways::{Gateways, GlyphRenderer};
use pictoscribe::layout::LayoutConfig;
use pictoscribe::lexicon::Lexicon;
use pictoscribe::translation::{PartsOfSpeech, SessionSettings, TranslationPolicy, TranslationSession};

/// Routes library logs to the test harness; set RUST_LOG to see them
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes a black square PNG symbol
pub fn create_symbol(dir: &Path, id: &str, size: u32) -> Result<PathBuf> {
    let path = dir.join(id);
    GrayImage::from_pixel(size, size, Luma([0])).save(&path)?;
    Ok(path)
}

/// Writes a lexicon JSON file
pub fn create_lexicon_file(dir: &Path, json: &str) -> Result<PathBuf> {
    create_test_file(dir, "lexicon.json", json)
}

/// Small lexicon shared by most scenarios
pub fn animal_lexicon() -> Lexicon {
    Lexicon::from_pairs([
        ("cat", "cat.png"),
        ("dog", "dog.png"),
        ("run", "run.png"),
        ("car", "car.png"),
        ("happy", "happy.png"),
    ])
}

/// Policy that substitutes from the first occurrence
pub fn fast_policy(parts_of_speech: PartsOfSpeech) -> TranslationPolicy {
    TranslationPolicy {
        fast_translate: true,
        sub_all: false,
        parts_of_speech,
    }
}

/// Box renderer gateways with a table-driven tagger
pub fn box_gateways(tagger: FixedTagger) -> Gateways {
    Gateways::builtin(Arc::new(BoxRenderer::new())).with_tagger(Arc::new(tagger))
}

/// Gateways with an explicit renderer
pub fn gateways_with_renderer(renderer: impl GlyphRenderer + 'static) -> Gateways {
    Gateways::builtin(Arc::new(renderer))
}

/// Session on a 400x400 page at font size 20
pub fn small_session(lexicon: Lexicon, gateways: Gateways, policy: TranslationPolicy) -> TranslationSession {
    let settings = SessionSettings {
        layout: LayoutConfig::new(400, 400, 20),
        policy,
        ..SessionSettings::default()
    };
    TranslationSession::new(Arc::new(lexicon), gateways, settings).expect("valid test geometry")
}
