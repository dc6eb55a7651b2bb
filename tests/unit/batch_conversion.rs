use assert_matches::assert_matches;
use heicconv::conversion::{ConversionConfig, ConversionEngine, TargetFormat};
use heicconv::{ConversionErrorKind, InputFile};
use pretty_assertions::assert_eq;
use std::cell::RefCell;

/// Stub codec: fails on inputs whose payload starts with "bad", echoes the rest
fn stub_transcode(data: &[u8], target: TargetFormat) -> anyhow::Result<Vec<u8>> {
    if data.starts_with(b"bad") {
        anyhow::bail!("cannot decode");
    }
    let mut out = target.extension().as_bytes().to_vec();
    out.extend_from_slice(data);
    Ok(out)
}

fn engine(target: TargetFormat) -> ConversionEngine<fn(&[u8], TargetFormat) -> anyhow::Result<Vec<u8>>> {
    ConversionEngine::new(
        ConversionConfig::default().with_target_format(target),
        stub_transcode as fn(&[u8], TargetFormat) -> anyhow::Result<Vec<u8>>,
    )
}

#[test]
fn test_all_convertible_keeps_length_and_order() {
    let inputs: Vec<InputFile> = ["c.heic", "a.HEIC", "b.heic"]
        .iter()
        .map(|name| InputFile::new(*name, name.as_bytes().to_vec()))
        .collect();

    let result = engine(TargetFormat::Png).convert_batch(&inputs).unwrap();

    let names: Vec<&str> = result.outputs().iter().map(|o| o.name()).collect();
    assert_eq!(names, vec!["c.png", "a.png", "b.png"]);
    assert!(result.failures().is_empty());
    assert!(result.is_complete_success());
    assert_eq!(result.failure_message(), None);
    assert!(result.outputs().iter().all(|o| o.media_type() == "image/png"));
}

#[test]
fn test_failure_set_is_exactly_the_failing_subset() {
    let inputs = vec![
        InputFile::new("1.heic", b"ok".to_vec()),
        InputFile::new("2.heic", b"bad".to_vec()),
        InputFile::new("3.heic", b"ok".to_vec()),
        InputFile::new("4.heic", b"bad-too".to_vec()),
        InputFile::new("5.heic", b"ok".to_vec()),
    ];

    let result = engine(TargetFormat::Jpeg).convert_batch(&inputs).unwrap();

    assert_eq!(result.failed_names(), vec!["2.heic", "4.heic"]);
    let names: Vec<&str> = result.outputs().iter().map(|o| o.name()).collect();
    assert_eq!(names, vec!["1.jpeg", "3.jpeg", "5.jpeg"]);
    assert_eq!(
        result.outputs().len() + result.failures().len(),
        inputs.len()
    );
    assert_eq!(
        result.failure_message().unwrap(),
        "Errors occurred while converting the following files: 2.heic, 4.heic"
    );
}

#[test]
fn test_output_payload_comes_from_the_codec() {
    let inputs = vec![InputFile::new("x.heic", b"-data".to_vec())];
    let result = engine(TargetFormat::Png).convert_batch(&inputs).unwrap();
    assert_eq!(result.outputs()[0].data(), b"png-data");
}

#[test]
fn test_empty_batch_never_reaches_the_codec() {
    let seen = RefCell::new(Vec::<Vec<u8>>::new());
    let engine = ConversionEngine::new(
        ConversionConfig::default(),
        |data: &[u8], _: TargetFormat| -> anyhow::Result<Vec<u8>> {
            seen.borrow_mut().push(data.to_vec());
            Ok(Vec::new())
        },
    );

    let err = engine.convert_batch(&[]).unwrap_err();
    assert_matches!(err.kind(), Some(ConversionErrorKind::NoInputSelected));
    assert!(seen.borrow().is_empty());
}

#[test]
fn test_every_file_failing_is_not_an_error() {
    let inputs = vec![
        InputFile::new("a.heic", b"bad".to_vec()),
        InputFile::new("b.heic", b"bad".to_vec()),
    ];

    let result = engine(TargetFormat::Png).convert_batch(&inputs).unwrap();
    assert!(result.is_total_failure());
    assert!(!result.is_partial());
    assert_eq!(result.failed_names(), vec!["a.heic", "b.heic"]);
}

#[test]
fn test_failure_reason_is_kept() {
    let inputs = vec![InputFile::new("a.heic", b"bad".to_vec())];
    let result = engine(TargetFormat::Png).convert_batch(&inputs).unwrap();
    assert!(result.failures()[0].reason.contains("cannot decode"));
}
