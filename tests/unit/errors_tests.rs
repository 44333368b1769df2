/*!
 * Tests for error types and conversions
 */

use pictoscribe::errors::{AppError, GatewayError, LayoutError, LexiconError, RenderError, SinkError};

#[test]
fn test_gatewayError_unsupported_shouldNameGatewayAndLanguage() {
    let error = GatewayError::Unsupported {
        gateway: "tagger",
        language: "spa".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("tagger"));
    assert!(display.contains("spa"));
}

#[test]
fn test_renderError_missingAsset_shouldDisplayId() {
    let error = RenderError::MissingAsset("cat.png".to_string());
    assert!(format!("{}", error).contains("cat.png"));
}

#[test]
fn test_appError_fromLayoutError_shouldWrap() {
    let error: AppError = LayoutError::InvalidGeometry("font size 0".to_string()).into();
    assert!(matches!(error, AppError::Layout(_)));
    assert!(format!("{}", error).contains("font size 0"));
}

#[test]
fn test_appError_fromIoErrors_shouldMapByOrigin() {
    let io = || std::io::Error::new(std::io::ErrorKind::NotFound, "gone");

    let app: AppError = io().into();
    assert!(matches!(app, AppError::File(_)));

    let lexicon: AppError = LexiconError::from(io()).into();
    assert!(matches!(lexicon, AppError::Lexicon(LexiconError::Io(_))));

    let sink: AppError = SinkError::from(io()).into();
    assert!(matches!(sink, AppError::Sink(SinkError::Io(_))));
}

#[test]
fn test_appError_fromAnyhow_shouldBecomeUnknown() {
    let error: AppError = anyhow::anyhow!("boom").into();
    assert!(matches!(error, AppError::Unknown(ref m) if m == "boom"));
}
