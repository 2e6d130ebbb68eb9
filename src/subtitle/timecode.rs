use crate::error::{Error, Result};
use crate::logging::log_warning;
use crate::subtitle::models::SubtitleFormat;
use once_cell::sync::Lazy;
use regex::Regex;

/// Временная метка фиксированной ширины: `HH:MM:SS<sep>mmm`
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2})([,.])(\d{3})$").expect("timecode regex is valid")
});

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Форматирует миллисекунды во временную метку указанного формата.
///
/// Отрицательные значения приводятся к нулю.
pub fn format_timecode(ms: i64, format: SubtitleFormat) -> String {
    let ms = if ms < 0 {
        log_warning(&format!("Отрицательное время {} мс заменено на 0 при форматировании", ms));
        0
    } else {
        ms
    };

    let hours = ms / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = ms % MS_PER_SECOND;

    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        hours,
        minutes,
        seconds,
        format.fraction_separator(),
        millis
    )
}

/// Разбирает временную метку указанного формата в миллисекунды
pub fn parse_timecode(timecode: &str, format: SubtitleFormat) -> Result<i64> {
    let captures = TIMECODE_REGEX
        .captures(timecode)
        .ok_or_else(|| Error::Format(format!("Invalid timecode: '{}'", timecode)))?;

    let separator = &captures[4];
    if !separator.starts_with(format.fraction_separator()) {
        return Err(Error::Format(format!(
            "Invalid timecode separator in '{}': expected '{}'",
            timecode,
            format.fraction_separator()
        )));
    }

    let field = |index: usize, name: &str| -> Result<i64> {
        captures[index]
            .parse::<i64>()
            .map_err(|_| Error::Format(format!("Invalid {} in timecode '{}'", name, timecode)))
    };

    let hours = field(1, "hours")?;
    let minutes = field(2, "minutes")?;
    let seconds = field(3, "seconds")?;
    let millis = field(5, "milliseconds")?;

    if minutes >= 60 || seconds >= 60 {
        return Err(Error::Format(format!("Timecode field out of range: '{}'", timecode)));
    }

    Ok(hours * MS_PER_HOUR + minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
}

/// Ищет первую временную метку в тексте и возвращает её разделитель долей секунды
pub(crate) fn first_fraction_separator(text: &str) -> Option<char> {
    static SEARCH_REGEX: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"\d{2}:\d{2}:\d{2}([,.])\d{3}").expect("timecode search regex is valid")
    });

    SEARCH_REGEX
        .captures(text)
        .and_then(|captures| captures[1].chars().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0, SubtitleFormat::Srt), "00:00:00,000");
        assert_eq!(format_timecode(3500, SubtitleFormat::Srt), "00:00:03,500");
        assert_eq!(format_timecode(5_445_500, SubtitleFormat::Vtt), "01:30:45.500");
    }

    #[test]
    fn test_format_negative_clamps_to_zero() {
        assert_eq!(format_timecode(-20, SubtitleFormat::Vtt), "00:00:00.000");
    }

    #[test]
    fn test_parse_timecode() {
        assert_eq!(parse_timecode("00:00:01,000", SubtitleFormat::Srt).unwrap(), 1000);
        assert_eq!(parse_timecode("01:30:45.500", SubtitleFormat::Vtt).unwrap(), 5_445_500);
    }

    #[test]
    fn test_parse_rejects_wrong_separator() {
        let result = parse_timecode("00:00:01.000", SubtitleFormat::Srt);
        match result {
            Err(Error::Format(msg)) => assert!(msg.contains("separator")),
            other => panic!("Expected Format error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_widths_and_digits() {
        assert!(parse_timecode("0:00:01,000", SubtitleFormat::Srt).is_err());
        assert!(parse_timecode("00:00:01,00", SubtitleFormat::Srt).is_err());
        assert!(parse_timecode("00:0a:01,000", SubtitleFormat::Srt).is_err());
        assert!(parse_timecode("00:61:01,000", SubtitleFormat::Srt).is_err());
    }

    #[test]
    fn test_first_fraction_separator() {
        assert_eq!(first_fraction_separator("1\n00:00:01,000 --> x"), Some(','));
        assert_eq!(first_fraction_separator("00:00:01.000 --> x"), Some('.'));
        assert_eq!(first_fraction_separator("no timecodes"), None);
    }
}
