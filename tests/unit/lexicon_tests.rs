/*!
 * Tests for lexicon loading and symbol entries
 */

use anyhow::Result;
use pictoscribe::errors::LexiconError;
use pictoscribe::lexicon::{Lexicon, SymbolEntry, symbol_label};

use crate::common;

#[test]
fn test_load_withJsonFile_shouldReadAllEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_lexicon_file(
        temp_dir.path(),
        r#"{"cat": "cat.png", "bat": ["bat_(animal).png", "bat_(club).png"]}"#,
    )?;

    let lexicon = Lexicon::load(&path)?;

    assert_eq!(lexicon.len(), 2);
    assert!(lexicon.contains("cat"));
    assert!(!lexicon.contains("Cat"));
    let bat = lexicon.lookup("bat").unwrap();
    assert_eq!(bat.candidate_labels(), vec!["bat_(animal)", "bat_(club)"]);
    Ok(())
}

#[test]
fn test_load_withMissingFile_shouldReturnIoError() {
    let result = Lexicon::load("/definitely/not/here/lexicon.json");
    assert!(matches!(result, Err(LexiconError::Io(_))));
}

#[test]
fn test_load_withMalformedJson_shouldReturnParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_lexicon_file(temp_dir.path(), r#"{"cat": 3}"#)?;
    assert!(matches!(Lexicon::load(&path), Err(LexiconError::Parse(_))));
    Ok(())
}

#[test]
fn test_symbolEntry_candidate_withOutOfRangeIndex_shouldUseFirst() {
    let entry = SymbolEntry::Ambiguous(vec!["a.png".into(), "b.png".into()]);
    assert_eq!(entry.candidate(1).map(String::as_str), Some("b.png"));
    assert_eq!(entry.candidate(7).map(String::as_str), Some("a.png"));
    assert!(!SymbolEntry::Single("a.png".into()).is_ambiguous());
}

#[test]
fn test_symbolLabel_shouldStripExtensionOnly() {
    assert_eq!(symbol_label("indicator_(plural).png"), "indicator_(plural)");
    assert_eq!(symbol_label("no_extension"), "no_extension");
}
