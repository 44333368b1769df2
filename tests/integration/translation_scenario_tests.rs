/*!
 * End-to-end substitution scenarios through a translation session
 */

use std::sync::Arc;

use pictoscribe::gateways::mock::{BoxRenderer, FailingGateway, FixedTagger, ScriptedChooser};
use pictoscribe::gateways::synonyms::Synset;
use pictoscribe::gateways::{CoarsePos, Thesaurus};
use pictoscribe::layout::{Glyph, LayoutConfig, LayoutEngine, LayoutItem};
use pictoscribe::lexicon::{Lexicon, SymbolEntry};
use pictoscribe::translation::{
    DefinitionChoices, GlyphChoice, PartsOfSpeech, ResolvedLexeme, SessionSettings, Token,
    TranslationPolicy, TranslationSession,
};

use crate::common;

fn symbol(id: &str, subtitle: bool) -> GlyphChoice {
    GlyphChoice::Symbol {
        id: id.to_string(),
        subtitle,
        plural: false,
    }
}

fn choices(session: &mut TranslationSession, tokens: &[(&str, &str)]) -> Vec<GlyphChoice> {
    session
        .render_tokens(&Token::sequence(tokens))
        .outcomes
        .into_iter()
        .map(|o| o.choice)
        .collect()
}

#[test]
fn test_scenarioA_withNounsOnly_shouldSubstituteOnlyTheNoun() {
    let lexicon = Lexicon::from_pairs([("cat", "cat.png")]);
    let policy = common::fast_policy(PartsOfSpeech::nouns_only());
    let mut session = common::small_session(lexicon, common::box_gateways(FixedTagger::new("NN")), policy);

    let rendition = session.render_tokens(&Token::sequence(&[("the", "DT"), ("cat", "NN"), ("sat", "VBD")]));

    assert_eq!(rendition.outcomes[1].resolved, ResolvedLexeme::Direct("cat".to_string()));
    let got: Vec<GlyphChoice> = rendition.outcomes.into_iter().map(|o| o.choice).collect();
    assert_eq!(got, vec![GlyphChoice::Text, symbol("cat.png", true), GlyphChoice::Text]);
}

#[test]
fn test_scenarioB_withRepeatedWord_shouldDropSubtitleSecondTime() {
    let lexicon = Lexicon::from_pairs([("cat", "cat.png")]);
    let policy = common::fast_policy(PartsOfSpeech::default());
    let mut session = common::small_session(lexicon, common::box_gateways(FixedTagger::new("NN")), policy);

    let got = choices(&mut session, &[("cat", "NN"), ("cat", "NN")]);

    assert_eq!(got, vec![symbol("cat.png", true), symbol("cat.png", false)]);
    assert!(session.memory().is_changed("cat"));
}

#[test]
fn test_scenarioC_withInflectedVerb_shouldResolveLemma() {
    let lexicon = Lexicon::from_pairs([("run", "run.png")]);
    let session = common::small_session(
        lexicon,
        common::box_gateways(FixedTagger::new("VBG")),
        TranslationPolicy::default(),
    );
    let token = Token::new("running", "VBG", 0);
    assert_eq!(session.resolve(&token), ResolvedLexeme::Direct("run".to_string()));
}

#[test]
fn test_scenarioD_withSynonymInLexicon_shouldResolveSynonym() {
    let lexicon = Lexicon::from_pairs([("car", "car.png")]);
    let thesaurus = Thesaurus::from_synsets([(
        "automobile".to_string(),
        vec![Synset {
            pos: Some(CoarsePos::Noun),
            lemmas: vec!["car".to_string(), "auto".to_string()],
        }],
    )]);
    let gateways = common::box_gateways(FixedTagger::new("NN")).with_synonyms(Arc::new(thesaurus));
    let mut session = common::small_session(lexicon, gateways, common::fast_policy(PartsOfSpeech::default()));

    let rendition = session.render_tokens(&Token::sequence(&[("automobile", "NN")]));

    assert_eq!(rendition.outcomes[0].resolved, ResolvedLexeme::Synonym("car".to_string()));
    assert_eq!(rendition.outcomes[0].choice, symbol("car.png", true));
}

#[test]
fn test_scenarioE_withOverflowAtIndent_shouldWrapToLineStart() {
    let cfg = LayoutConfig::new(100, 200, 20);
    let engine = LayoutEngine::new(cfg).unwrap();
    let pages = engine.layout(&[LayoutItem::new("wide", Glyph::filled(90, 20, 0))]);

    let placement = pages[0].placements()[0];
    assert_eq!((placement.x, placement.y), (0, cfg.line_height()));
}

#[test]
fn test_progressiveDisclosure_withoutFastMode_shouldGoTextThenSubtitleThenBare() {
    let policy = TranslationPolicy::default();
    let mut session = common::small_session(
        common::animal_lexicon(),
        common::box_gateways(FixedTagger::new("NN")),
        policy,
    );

    let got = choices(&mut session, &[("cat", "NN"), ("dog", "NN"), ("cat", "NN"), ("cat", "NN"), ("dog", "NN")]);

    assert_eq!(
        got,
        vec![
            GlyphChoice::Text,
            GlyphChoice::Text,
            symbol("cat.png", true),
            symbol("cat.png", false),
            symbol("dog.png", true),
        ]
    );
}

#[test]
fn test_subAll_shouldSubtitleEveryOccurrence() {
    let policy = TranslationPolicy {
        sub_all: true,
        ..common::fast_policy(PartsOfSpeech::default())
    };
    let mut session = common::small_session(
        common::animal_lexicon(),
        common::box_gateways(FixedTagger::new("NN")),
        policy,
    );

    let got = choices(&mut session, &[("cat", "NN"), ("cat", "NN"), ("cat", "NN")]);
    assert!(got.iter().all(|c| *c == symbol("cat.png", true)));
}

#[test]
fn test_render_withNewDocument_shouldResetSeenButNotChoices() {
    let lexicon = Lexicon::from_entries([(
        "bat",
        SymbolEntry::Ambiguous(vec!["bat_(animal).png".into(), "bat_(club).png".into()]),
    )]);
    let chooser = ScriptedChooser::new(vec![1]);
    let gateways = common::box_gateways(FixedTagger::new("NN")).with_chooser(Arc::new(chooser.clone()));
    let mut session = common::small_session(lexicon, gateways, TranslationPolicy::default());

    let first = choices(&mut session, &[("bat", "NN"), ("bat", "NN")]);
    let second = choices(&mut session, &[("bat", "NN"), ("bat", "NN")]);

    // Each document starts over with plain text
    assert_eq!(first, second);
    assert_eq!(first[1], symbol("bat_(club).png", true));
    assert_eq!(chooser.calls(), 1);
}

#[test]
fn test_stickyChoice_acrossSessionsSharingChoices_shouldAskOnce() {
    let lexicon = Arc::new(Lexicon::from_entries([(
        "bank",
        SymbolEntry::Ambiguous(vec!["bank_(money).png".into(), "bank_(river).png".into()]),
    )]));
    let chooser = ScriptedChooser::new(vec![1, 0]);
    let gateways = common::box_gateways(FixedTagger::new("NN")).with_chooser(Arc::new(chooser.clone()));
    let shared = DefinitionChoices::new();
    let settings = SessionSettings {
        policy: common::fast_policy(PartsOfSpeech::default()),
        ..SessionSettings::default()
    };

    for _ in 0..3 {
        let mut session = TranslationSession::new(Arc::clone(&lexicon), gateways.clone(), settings.clone())
            .unwrap()
            .with_choices(shared.clone());
        let got = choices(&mut session, &[("bank", "NN")]);
        assert_eq!(got[0], symbol("bank_(river).png", true));
    }
    assert_eq!(chooser.calls(), 1);
    assert_eq!(shared.get("bank"), Some(1));
}

#[test]
fn test_chooser_withOutOfRangeAnswer_shouldUseFirstCandidate() {
    let lexicon = Lexicon::from_entries([(
        "bank",
        SymbolEntry::Ambiguous(vec!["bank_(money).png".into(), "bank_(river).png".into()]),
    )]);
    let gateways = common::box_gateways(FixedTagger::new("NN"))
        .with_chooser(Arc::new(ScriptedChooser::new(vec![9])));
    let mut session = common::small_session(lexicon, gateways, common::fast_policy(PartsOfSpeech::default()));

    let got = choices(&mut session, &[("bank", "NN")]);
    assert_eq!(got[0], symbol("bank_(money).png", true));
}

#[test]
fn test_resolve_calledTwice_shouldBeIdempotent() {
    let session = common::small_session(
        common::animal_lexicon(),
        common::box_gateways(FixedTagger::new("NN")),
        TranslationPolicy::default(),
    );
    for (word, tag) in [("cats", "NNS"), ("ran", "VBD"), ("zebra", "NN"), ("happier", "JJR")] {
        let token = Token::new(word, tag, 0);
        assert_eq!(session.resolve(&token), session.resolve(&token));
    }
}

#[test]
fn test_memory_afterDocument_shouldKeepEverySeenLexeme() {
    let mut session = common::small_session(
        common::animal_lexicon(),
        common::box_gateways(FixedTagger::new("NN")),
        TranslationPolicy::default(),
    );
    choices(&mut session, &[("cat", "NN"), ("dog", "NN"), ("cat", "NN"), ("zebra", "NN")]);

    let memory = session.memory();
    assert!(memory.is_seen("cat") && memory.is_seen("dog"));
    assert!(memory.is_changed("cat"));
    assert!(!memory.is_changed("dog"));
    assert!(!memory.is_seen("zebra"));
}

#[test]
fn test_pluralNoun_shouldAffixMarkerAfterSubtitle() {
    let policy = TranslationPolicy {
        sub_all: true,
        ..common::fast_policy(PartsOfSpeech::default())
    };
    let mut session = common::small_session(
        common::animal_lexicon(),
        common::box_gateways(FixedTagger::new("NN")),
        policy,
    );

    let rendition = session.render_tokens(&Token::sequence(&[("cat", "NN"), ("cats", "NNS")]));

    assert_eq!(
        rendition.outcomes[1].choice,
        GlyphChoice::Symbol {
            id: "cat.png".to_string(),
            subtitle: true,
            plural: true
        }
    );
    let placements = rendition.pages[0].placements();
    assert!(placements[1].width > placements[0].width);
}

#[test]
fn test_failingGateways_shouldStillProduceCompleteDocument() {
    let gateways = common::gateways_with_renderer(BoxRenderer::new())
        .with_tagger(Arc::new(FailingGateway))
        .with_morphology(Arc::new(FailingGateway))
        .with_synonyms(Arc::new(FailingGateway));
    let mut session = common::small_session(
        common::animal_lexicon(),
        gateways,
        common::fast_policy(PartsOfSpeech::default()),
    );

    let text = "The cats ran after the dog.\nThen the dog sat.";
    let tokens = session.tokenize(text);
    let rendition = session.render_tokens(&tokens);

    // Untagged tokens count as nouns; only direct lexicon hits survive
    let symbols: Vec<&str> = rendition
        .outcomes
        .iter()
        .filter(|o| o.choice.is_symbol())
        .map(|o| o.token.text.as_str())
        .collect();
    assert_eq!(symbols, vec!["dog", "dog"]);
    let document = session.translate(text, None);
    assert!(document.page_count() >= 2);
    assert_eq!(document.title, "The cats ran after t");
}

#[test]
fn test_failingMorphology_shouldKeepDirectMatches() {
    let gateways = common::box_gateways(FixedTagger::new("NN").with("cats", "NNS"))
        .with_morphology(Arc::new(FailingGateway));
    let mut session = common::small_session(
        common::animal_lexicon(),
        gateways,
        common::fast_policy(PartsOfSpeech::default()),
    );

    let rendition = session.render_tokens(&Token::sequence(&[("cat", "NN"), ("cats", "NNS")]));
    assert!(rendition.outcomes[0].choice.is_symbol());
    assert_eq!(rendition.outcomes[1].resolved, ResolvedLexeme::None);
    assert_eq!(rendition.outcomes[1].choice, GlyphChoice::Text);
}

#[test]
fn test_missingAsset_shouldFallBackToTextForThatWordOnly() {
    let gateways = common::gateways_with_renderer(BoxRenderer::new().with_missing("dog.png"));
    let mut session = common::small_session(
        common::animal_lexicon(),
        gateways,
        common::fast_policy(PartsOfSpeech::default()),
    );

    let got = choices(&mut session, &[("dog", "NN"), ("cat", "NN"), ("dog", "NN")]);
    assert_eq!(got, vec![GlyphChoice::Text, symbol("cat.png", true), GlyphChoice::Text]);
}

#[test]
fn test_translate_withLongText_shouldNumberPagesAfterTitle() {
    let settings = SessionSettings {
        layout: LayoutConfig::new(300, 200, 20),
        policy: common::fast_policy(PartsOfSpeech::default()),
        ..SessionSettings::default()
    };
    let gateways = common::box_gateways(FixedTagger::new("NN"));
    let mut session = TranslationSession::new(Arc::new(common::animal_lexicon()), gateways, settings).unwrap();

    let text = "cat dog ".repeat(40);
    let document = session.translate(&text, Some("Animals"));

    assert_eq!(document.title, "Animals");
    assert!(document.page_count() > 2);
    assert!(document.pages[0].placements().is_empty());
    assert!(document.pages[0].canvas().has_ink());
    assert!(!document.content_pages()[0].is_empty());
}

#[test]
fn test_session_withInvalidGeometry_shouldFailAtCreation() {
    let settings = SessionSettings {
        layout: LayoutConfig::new(300, 50, 20),
        ..SessionSettings::default()
    };
    let gateways = common::box_gateways(FixedTagger::new("NN"));
    assert!(TranslationSession::new(Arc::new(Lexicon::new()), gateways, settings).is_err());
}
