use crate::error::Result;
use crate::logging::log_debug;
use crate::subtitle::models::{Segment, SubtitleFormat};
use crate::subtitle::timecode::format_timecode;
use std::io::Write;

/// Сериализатор сегментов в SRT и WebVTT.
///
/// Нумерация реплик всегда строится заново по порядку отображения.
pub struct SubtitleWriter;

impl SubtitleWriter {
    /// Сериализует сегменты в строку указанного формата
    pub fn to_string(segments: &[Segment], format: SubtitleFormat) -> String {
        let mut output = String::new();

        if format == SubtitleFormat::Vtt {
            output.push_str("WEBVTT\n\n");
        }

        for (index, segment) in segments.iter().enumerate() {
            if format == SubtitleFormat::Srt {
                output.push_str(&format!("{}\n", index + 1));
            }

            output.push_str(&format!(
                "{} --> {}\n",
                format_timecode(segment.start, format),
                format_timecode(segment.end, format)
            ));

            if !segment.text.is_empty() {
                output.push_str(&segment.text);
                output.push('\n');
            }
            output.push('\n');
        }

        log_debug(&format!("Сериализовано {} сегментов в формат {:?}", segments.len(), format));

        output
    }

    /// Записывает сегменты в любой приемник, реализующий Write
    pub fn write_to<W: Write>(mut writer: W, segments: &[Segment], format: SubtitleFormat) -> Result<()> {
        writer.write_all(Self::to_string(segments, format).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Segment> {
        vec![
            Segment::new(1000, 3500, "hello"),
            Segment::new(4000, 6000, "two\nlines"),
        ]
    }

    #[test]
    fn test_srt_output() {
        let srt = SubtitleWriter::to_string(&sample(), SubtitleFormat::Srt);
        assert_eq!(
            srt,
            "1\n00:00:01,000 --> 00:00:03,500\nhello\n\n2\n00:00:04,000 --> 00:00:06,000\ntwo\nlines\n\n"
        );
    }

    #[test]
    fn test_vtt_output() {
        let vtt = SubtitleWriter::to_string(&sample(), SubtitleFormat::Vtt);
        assert!(vtt.starts_with("WEBVTT\n\n00:00:01.000 --> 00:00:03.500\nhello\n\n"));
        assert!(!vtt.contains(','));
    }

    #[test]
    fn test_write_to_buffer() {
        let mut buffer = Vec::new();
        SubtitleWriter::write_to(&mut buffer, &sample(), SubtitleFormat::Srt).unwrap();
        assert!(String::from_utf8(buffer).unwrap().starts_with("1\n00:00:01,000"));
    }
}
