use crate::error::{Error, Result};
use crate::logging::{log_debug, log_trace};
use crate::subtitle::models::{DetectedFormat, Segment, SubtitleFormat};
use crate::subtitle::timecode::{first_fraction_separator, parse_timecode};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const VTT_MARKER: &str = "WEBVTT";
const TIMING_ARROW: &str = "-->";
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Блоки WebVTT, которые не являются репликами
const VTT_METADATA_BLOCKS: [&str; 3] = ["NOTE", "STYLE", "REGION"];

/// Парсер субтитров SRT и WebVTT
pub struct SubtitleParser;

impl SubtitleParser {
    /// Определяет формат по заголовку `WEBVTT` или по разделителю первой временной метки
    pub fn detect_format(content: &str) -> DetectedFormat {
        let content = content.trim_start_matches(BYTE_ORDER_MARK).trim_start();

        if content.starts_with(VTT_MARKER) {
            return DetectedFormat::Known(SubtitleFormat::Vtt);
        }

        match first_fraction_separator(content) {
            Some(',') => DetectedFormat::Known(SubtitleFormat::Srt),
            Some('.') => DetectedFormat::Known(SubtitleFormat::Vtt),
            _ => DetectedFormat::Unknown,
        }
    }

    /// Парсит файл субтитров и возвращает список сегментов
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<Segment>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Self::parse_reader(reader)
    }

    /// Парсит субтитры из любого источника, реализующего BufRead
    pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<Vec<Segment>> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse_str(&content)
    }

    /// Парсит субтитры из строки, каждому сегменту назначается новый идентификатор
    pub fn parse_str(content: &str) -> Result<Vec<Segment>> {
        let format = match Self::detect_format(content) {
            DetectedFormat::Known(format) => format,
            DetectedFormat::Unknown => {
                return Err(Error::Format(
                    "Unknown subtitle format: no WEBVTT header or timecode found".to_string(),
                ))
            }
        };

        let content = content.trim_start_matches(BYTE_ORDER_MARK);
        let mut segments = Vec::new();

        for block in Self::split_blocks(content) {
            if let Some(segment) = Self::parse_block(&block, format)? {
                segments.push(segment);
            }
        }

        if segments.is_empty() {
            return Err(Error::Format("No cue blocks found".to_string()));
        }

        log_debug(&format!("Разобрано {} сегментов формата {:?}", segments.len(), format));

        Ok(segments)
    }

    /// Делит текст на блоки, разделенные пустыми строками
    fn split_blocks(content: &str) -> Vec<Vec<&str>> {
        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for line in content.lines() {
            let line = line.trim_start();
            if line.trim().is_empty() {
                if !current.is_empty() {
                    blocks.push(std::mem::take(&mut current));
                }
            } else {
                current.push(line.trim_end());
            }
        }

        if !current.is_empty() {
            blocks.push(current);
        }

        blocks
    }

    /// Разбирает один блок; блоки без временной строки и без временных меток пропускаются
    fn parse_block(block: &[&str], format: SubtitleFormat) -> Result<Option<Segment>> {
        let first = block.first().copied().unwrap_or_default();
        let is_vtt_metadata = first.starts_with(VTT_MARKER)
            || VTT_METADATA_BLOCKS.iter().any(|marker| first.starts_with(marker));
        if format == SubtitleFormat::Vtt && is_vtt_metadata {
            log_trace(&format!("Пропущен блок метаданных: '{}'", first));
            return Ok(None);
        }

        let timing_index = match block.iter().position(|line| line.contains(TIMING_ARROW)) {
            Some(index) => index,
            None => {
                // Временная метка без стрелки - испорченная реплика, а не метаданные
                if block.iter().any(|line| first_fraction_separator(line).is_some()) {
                    return Err(Error::Format(format!(
                        "Cue timing line without '{}': {}",
                        TIMING_ARROW,
                        block.join(" | ")
                    )));
                }
                log_trace(&format!("Пропущен блок без временной строки: '{}'", first));
                return Ok(None);
            }
        };

        let (start, end) = Self::parse_timing_line(block[timing_index], format)?;
        let text = block[timing_index + 1..].join("\n");

        Ok(Some(Segment::new(start, end, text)))
    }

    /// Разбирает строку вида `start --> end [настройки]`
    fn parse_timing_line(line: &str, format: SubtitleFormat) -> Result<(i64, i64)> {
        let (start, rest) = line
            .split_once(TIMING_ARROW)
            .ok_or_else(|| Error::Format(format!("Expected 'start --> end' format: {}", line)))?;

        // После конечной метки в WebVTT могут идти настройки реплики
        let end = rest.split_whitespace().next().unwrap_or_default();

        let start = parse_timecode(start.trim(), format)?;
        let end = parse_timecode(end, format)?;

        Ok((start, end))
    }
}
