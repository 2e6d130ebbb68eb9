use caption_edit::{
    DetectedFormat, Error, Result, Segment, SubtitleFormat, SubtitleParser, SubtitleWriter,
};
use tempfile::NamedTempFile;

fn timing_and_text(segments: &[Segment]) -> Vec<(i64, i64, String)> {
    segments
        .iter()
        .map(|s| (s.start, s.end, s.text.clone()))
        .collect()
}

fn sample_segments() -> Vec<Segment> {
    vec![
        Segment::new(0, 1500, "First line"),
        Segment::new(1500, 4250, "Two lines\nof dialogue"),
        Segment::new(5000, 5001, "tiny"),
        Segment::new(3_725_042, 3_730_000, "After an hour"),
        Segment::new(6000, 7000, ""),
    ]
}

#[test]
fn test_parse_single_cue() -> Result<()> {
    let segments = SubtitleParser::parse_str("1\n00:00:01,000 --> 00:00:03,500\nhello\n\n")?;

    assert_eq!(timing_and_text(&segments), vec![(1000, 3500, "hello".to_string())]);

    Ok(())
}

#[test]
fn test_round_trip_preserves_timing_and_text() -> Result<()> {
    let original = sample_segments();

    for format in [SubtitleFormat::Srt, SubtitleFormat::Vtt] {
        let text = SubtitleWriter::to_string(&original, format);
        assert_eq!(SubtitleParser::detect_format(&text), DetectedFormat::Known(format));

        let parsed = SubtitleParser::parse_str(&text)?;
        assert_eq!(timing_and_text(&parsed), timing_and_text(&original), "format {:?}", format);
    }

    Ok(())
}

#[test]
fn test_parse_assigns_fresh_ids() -> Result<()> {
    let original = sample_segments();
    let parsed = SubtitleParser::parse_str(&SubtitleWriter::to_string(&original, SubtitleFormat::Srt))?;

    for (before, after) in original.iter().zip(parsed.iter()) {
        assert_ne!(before.id, after.id);
    }

    Ok(())
}

#[test]
fn test_renumbers_on_serialize() -> Result<()> {
    let srt = "7\n00:00:01,000 --> 00:00:02,000\nA\n\n42\n00:00:03,000 --> 00:00:04,000\nB\n";
    let segments = SubtitleParser::parse_str(srt)?;
    let output = SubtitleWriter::to_string(&segments, SubtitleFormat::Srt);

    assert!(output.starts_with("1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n"));

    Ok(())
}

#[test]
fn test_parse_file() -> Result<()> {
    // Создаем временный файл с валидным VTT содержимым
    let temp_file = NamedTempFile::new().unwrap();

    let vtt_content = r#"WEBVTT - Some title

NOTE
This is a comment and should be ignored.

00:00:01.000 --> 00:00:05.000
Hello, world!

NOTE Another comment

00:00:06.000 --> 00:00:10.000 line:0 position:20%
This is a test.
"#;

    std::fs::write(temp_file.path(), vtt_content).unwrap();

    let segments = SubtitleParser::parse_file(temp_file.path())?;

    assert_eq!(
        timing_and_text(&segments),
        vec![
            (1000, 5000, "Hello, world!".to_string()),
            (6000, 10000, "This is a test.".to_string()),
        ]
    );

    Ok(())
}

#[test]
fn test_parse_missing_file_is_io_error() {
    let result = SubtitleParser::parse_file("definitely/not/here.srt");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_mixed_separator_is_format_error() {
    // Заголовок WebVTT, но временные метки в стиле SRT
    let vtt = "WEBVTT\n\n00:00:01,000 --> 00:00:02,000\nHello\n";

    match SubtitleParser::parse_str(vtt) {
        Err(Error::Format(msg)) => assert!(msg.contains("separator")),
        other => panic!("Expected Format error, got {:?}", other),
    }
}

#[test]
fn test_unknown_format_is_format_error() {
    assert!(matches!(
        SubtitleParser::parse_str("just some prose\nwithout any cues"),
        Err(Error::Format(_))
    ));
}

#[test]
fn test_cue_with_broken_arrow_is_format_error() {
    // Вторая реплика не должна молча пропадать
    let srt = "1\n00:00:01,000 --> 00:00:02,000\nA\n\n2\n00:00:03,000 -> 00:00:04,000\nB\n";

    assert!(matches!(SubtitleParser::parse_str(srt), Err(Error::Format(_))));
}
