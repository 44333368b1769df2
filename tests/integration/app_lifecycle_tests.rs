/*!
 * Integration tests for the application controller on real files
 */

use anyhow::Result;
use std::path::Path;
use tempfile::TempDir;

use pictoscribe::app_config::Config;
use pictoscribe::app_controller::{Controller, FolderSummary};
use pictoscribe::gateways::Morphology;

use crate::common;

/// Temp workspace with symbols, a lexicon and a config pointing at them
fn workspace() -> Result<(TempDir, Config)> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let symbols = temp_dir.path().join("symbols");
    std::fs::create_dir_all(&symbols)?;
    for id in ["cat.png", "dog.png", "indicator_(plural).png"] {
        common::create_symbol(&symbols, id, 64)?;
    }
    let lexicon = common::create_lexicon_file(temp_dir.path(), r#"{"cat": "cat.png", "dog": "dog.png"}"#)?;

    let mut config = Config::default();
    config.lexicon_path = lexicon;
    config.symbol_dir = symbols;
    config.translation.fast_translate = true;
    config.layout.page_width = 400;
    config.layout.page_height = 300;
    config.layout.font_size = 20;
    Ok((temp_dir, config))
}

fn page_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[test]
fn test_controller_withMissingLexicon_shouldFailToInitialize() {
    let config = Config {
        lexicon_path: "/no/such/lexicon.json".into(),
        ..Config::default()
    };
    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_translateText_withConfiguredResources_shouldRenderSymbols() -> Result<()> {
    let (_temp_dir, config) = workspace()?;
    let controller = Controller::with_config(config)?;

    let document = controller.translate_text("The cat and the dogs.", None)?;

    assert_eq!(document.title, "The cat and the dogs");
    assert_eq!(document.page_count(), 2);
    assert!(!document.pages[1].is_empty());
    Ok(())
}

#[tokio::test]
async fn test_run_withTextFile_shouldWriteNumberedPngPages() -> Result<()> {
    let (temp_dir, config) = workspace()?;
    let input = common::create_test_file(temp_dir.path(), "story.txt", "A cat met a dog.\nThe dog ran.")?;
    let controller = Controller::with_config(config)?;

    let handle = controller.run(input.clone(), false).await?.expect("pages written");

    let out_dir = temp_dir.path().join("pictoscribe_pages").join("story");
    assert_eq!(handle.location, out_dir);
    assert_eq!(page_files(&out_dir), vec!["story_001.png", "story_002.png"]);
    let page = image::open(out_dir.join("story_002.png"))?;
    assert_eq!((page.width(), page.height()), (400, 300));

    // A second run without force leaves the pages alone
    assert!(controller.run(input.clone(), false).await?.is_none());
    assert!(controller.run(input, true).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_run_withForceAfterLongerDocument_shouldLeaveOnlyNewPages() -> Result<()> {
    let (temp_dir, config) = workspace()?;
    let input = common::create_test_file(temp_dir.path(), "story.txt", &"The dog ran.\n".repeat(40))?;
    let controller = Controller::with_config(config)?;
    let out_dir = temp_dir.path().join("pictoscribe_pages").join("story");

    let first = controller.run(input.clone(), false).await?.expect("pages written");
    assert!(first.page_count() > 2);

    std::fs::write(&input, "cat")?;
    let second = controller.run(input, true).await?.expect("pages written");

    assert_eq!(second.page_count(), 2);
    assert_eq!(page_files(&out_dir), vec!["story_001.png", "story_002.png"]);
    Ok(())
}

#[test]
fn test_translate_withSpanishInflectionTable_shouldSubstituteSymbols() -> Result<()> {
    let (temp_dir, mut config) = workspace()?;
    common::create_symbol(&config.symbol_dir, "gato.png", 64)?;
    config.lexicon_path = common::create_lexicon_file(temp_dir.path(), r#"{"gato": "gato.png"}"#)?;
    config.inflection_path = Some(common::create_test_file(
        temp_dir.path(),
        "inflections.json",
        r#"{"plurals": {"gatos": "gato"}}"#,
    )?);
    config.language = "Spanish".to_string();
    config.validate()?;
    let controller = Controller::with_config(config)?;

    let mut session = controller.session()?;
    let tokens = session.tokenize("el gato y los gatos");
    let rendition = session.render_tokens(&tokens);

    let symbols: Vec<&str> = rendition
        .outcomes
        .iter()
        .filter(|o| o.choice.is_symbol())
        .map(|o| o.token.text.as_str())
        .collect();
    assert_eq!(symbols, vec!["gato", "gatos"]);
    Ok(())
}

#[test]
fn test_buildGateways_withSpanishAndNoTable_shouldLookUpWordsAsWritten() -> Result<()> {
    let (_temp_dir, mut config) = workspace()?;
    config.language = "es".to_string();
    let gateways = Controller::build_gateways(&config)?;
    assert_eq!(gateways.morphology.singularize("cats", "spa")?, "cats");
    Ok(())
}

#[tokio::test]
async fn test_run_withMissingFile_shouldFail() -> Result<()> {
    let (temp_dir, config) = workspace()?;
    let controller = Controller::with_config(config)?;
    let result = controller.run(temp_dir.path().join("absent.txt"), false).await;
    assert!(result.is_err());
    Ok(())
}

#[tokio::test]
async fn test_runFolder_shouldTranslateEachFileAndSkipDoneOnes() -> Result<()> {
    let (temp_dir, config) = workspace()?;
    let books = temp_dir.path().join("books");
    common::create_test_file(&books, "one.txt", "cat cat cat")?;
    common::create_test_file(&books, "nested/two.txt", "dog and cat")?;
    common::create_test_file(&books, "notes.md", "ignored")?;
    let controller = Controller::with_config(config)?;

    let summary = controller.run_folder(books.clone(), false).await?;
    assert_eq!(
        summary,
        FolderSummary {
            processed: 2,
            skipped: 0,
            failed: 0
        }
    );
    assert!(books.join("pictoscribe_pages/one/one_001.png").exists());
    assert!(books.join("nested/pictoscribe_pages/two/two_002.png").exists());

    let again = controller.run_folder(books, false).await?;
    assert_eq!(again.skipped, 2);
    assert_eq!(again.processed, 0);
    Ok(())
}

#[tokio::test]
async fn test_runFolder_withNoTextFiles_shouldFail() -> Result<()> {
    let (temp_dir, config) = workspace()?;
    let empty = temp_dir.path().join("empty");
    std::fs::create_dir_all(&empty)?;
    let controller = Controller::with_config(config)?;
    assert!(controller.run_folder(empty, false).await.is_err());
    Ok(())
}

#[test]
fn test_writeAlphabet_shouldWriteGridOfCells() -> Result<()> {
    let (temp_dir, config) = workspace()?;
    let cell = config.layout.font_size * 5;
    let controller = Controller::with_config(config)?;
    let output = temp_dir.path().join("legend").join("alphabet.png");

    let words = vec!["cat".to_string(), "dog".to_string(), "zebra".to_string()];
    controller.write_alphabet(&words, 2, &output)?;

    let sheet = image::open(&output)?;
    assert_eq!((sheet.width(), sheet.height()), (2 * cell, 2 * cell));
    assert!(controller.write_alphabet(&[], 2, &output).is_err());
    Ok(())
}
