/*!
 * Tests for the built-in collaborators working together
 */

use anyhow::Result;
use pictoscribe::gateways::{
    EnglishMorphology, HeuristicTagger, InflectionTable, NoSynonyms, PosTag, RuleTokenizer,
    Tagger, Thesaurus, Tokenizer,
};
use pictoscribe::lexicon::Lexicon;
use pictoscribe::translation::{LexemeResolver, ResolvedLexeme};

use crate::common;

fn tagged(text: &str) -> Vec<(String, PosTag)> {
    let tokens = RuleTokenizer::new().tokenize(text, "eng");
    let tags = HeuristicTagger::new().tag(&tokens, "eng").unwrap();
    tokens.into_iter().zip(tags).collect()
}

#[test]
fn test_builtinPipeline_withSentence_shouldTokenizeAndTagInOrder() {
    let result = tagged("The cats ran happily.");
    let words: Vec<&str> = result.iter().map(|(w, _)| w.as_str()).collect();
    let tags: Vec<&str> = result.iter().map(|(_, t)| t.as_str()).collect();

    assert_eq!(words, vec!["The", "cats", "ran", "happily", ".", "\n"]);
    assert_eq!(&tags[..5], &["DT", "NNS", "VBD", "RB", "."]);
}

#[test]
fn test_builtinPipeline_withInflectedForms_shouldResolveToLexemes() {
    let lexicon = common::animal_lexicon();
    let resolver = LexemeResolver::new(&lexicon, &EnglishMorphology, &NoSynonyms, "eng");

    let resolved: Vec<ResolvedLexeme> = tagged("Cats ran , happier dogs")
        .iter()
        .map(|(word, tag)| resolver.resolve(&word.to_lowercase(), tag))
        .collect();

    assert_eq!(resolved[0], ResolvedLexeme::Direct("cat".to_string()));
    assert_eq!(resolved[1], ResolvedLexeme::Direct("run".to_string()));
    assert_eq!(resolved[2], ResolvedLexeme::None);
    assert_eq!(resolved[3], ResolvedLexeme::Direct("happy".to_string()));
    assert_eq!(resolved[4], ResolvedLexeme::Direct("dog".to_string()));
}

#[test]
fn test_inflectionTable_loadedFromFile_shouldStandInForMorphology() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "inflections.json",
        r#"{"plurals": {"gatos": "gato"}, "verbs": {"corre": "correr"}}"#,
    )?;
    let table = InflectionTable::load(&path)?;
    let lexicon = Lexicon::from_pairs([("gato", "cat.png"), ("correr", "run.png")]);
    let resolver = LexemeResolver::new(&lexicon, &table, &NoSynonyms, "spa");

    assert_eq!(
        resolver.resolve("gatos", &PosTag::new("NNS")),
        ResolvedLexeme::Direct("gato".to_string())
    );
    assert_eq!(
        resolver.resolve("corre", &PosTag::new("VB")),
        ResolvedLexeme::Direct("correr".to_string())
    );
    Ok(())
}

#[test]
fn test_thesaurus_withUntaggedSynset_shouldMatchAnyPos() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "thesaurus.json",
        r#"{"glad": [{"lemmas": ["joyful", "happy"]}]}"#,
    )?;
    let thesaurus = Thesaurus::load(&path)?;
    let lexicon = common::animal_lexicon();
    let resolver = LexemeResolver::new(&lexicon, &EnglishMorphology, &thesaurus, "eng");

    assert_eq!(
        resolver.resolve("glad", &PosTag::new("JJ")),
        ResolvedLexeme::Synonym("happy".to_string())
    );
    Ok(())
}

#[test]
fn test_englishGateways_withOtherLanguage_shouldDegradeToNoMatch() {
    let lexicon = common::animal_lexicon();
    let resolver = LexemeResolver::new(&lexicon, &EnglishMorphology, &NoSynonyms, "fra");

    // Direct hits need no gateway; normalization is unsupported for French
    assert_eq!(
        resolver.resolve("cat", &PosTag::new("NN")),
        ResolvedLexeme::Direct("cat".to_string())
    );
    assert_eq!(resolver.resolve("cats", &PosTag::new("NNS")), ResolvedLexeme::None);
    assert!(HeuristicTagger::new().tag(&["chat".to_string()], "fra").is_err());
}
