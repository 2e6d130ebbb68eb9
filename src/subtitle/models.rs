use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Поддерживаемые форматы субтитров
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    /// SubRip (`00:00:01,000`)
    Srt,
    /// WebVTT (`WEBVTT`, `00:00:01.000`)
    Vtt,
}

impl SubtitleFormat {
    /// Разделитель долей секунды во временной метке
    pub fn fraction_separator(&self) -> char {
        match self {
            SubtitleFormat::Srt => ',',
            SubtitleFormat::Vtt => '.',
        }
    }

    /// Расширение файла без точки
    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::Vtt => "vtt",
        }
    }

    /// Определяет формат по расширению файла
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "srt" => Some(SubtitleFormat::Srt),
            "vtt" => Some(SubtitleFormat::Vtt),
            _ => None,
        }
    }
}

/// Результат определения формата
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedFormat {
    Known(SubtitleFormat),
    Unknown,
}

/// Генерирует новый идентификатор сегмента
pub fn new_segment_id() -> String {
    Uuid::new_v4().to_string()
}

/// Сегмент субтитров с временем в миллисекундах
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Идентификатор, назначаемый редактором
    pub id: String,
    /// Время начала в миллисекундах
    pub start: i64,
    /// Время окончания в миллисекундах
    pub end: i64,
    /// Текст сегмента, строки разделены `\n`
    pub text: String,
}

impl Segment {
    /// Создает сегмент с новым идентификатором
    pub fn new(start: i64, end: i64, text: impl Into<String>) -> Self {
        Self {
            id: new_segment_id(),
            start,
            end,
            text: text.into(),
        }
    }

    /// Длительность в миллисекундах (отрицательная при перевернутом времени)
    pub fn duration_ms(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }

    /// Количество символов без учета переводов строк
    pub fn char_count(&self) -> usize {
        self.text.chars().filter(|c| *c != '\n' && *c != '\r').count()
    }

    /// Количество отображаемых строк
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Символов в секунду; `None`, если длительность не положительна
    pub fn cps(&self) -> Option<f64> {
        let duration = self.duration_ms();
        if duration <= 0 {
            return None;
        }
        Some(self.char_count() as f64 / (duration as f64 / 1000.0))
    }

    /// Попадает ли момент времени в полуинтервал `[start, end)`
    pub fn contains(&self, time_ms: i64) -> bool {
        time_ms >= self.start && time_ms < self.end
    }
}

/// Черновик нового сегмента, идентификатор назначает хранилище
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentDraft {
    pub start: i64,
    pub end: i64,
    pub text: String,
}

impl SegmentDraft {
    pub fn new(start: i64, end: i64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Частичное обновление сегмента: заменяются только заданные поля
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SegmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SegmentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_end(mut self, end: i64) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Пустой ли патч
    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none() && self.text.is_none()
    }

    /// Применяет патч к копии сегмента, идентификатор не меняется
    pub fn apply(&self, segment: &Segment) -> Segment {
        Segment {
            id: segment.id.clone(),
            start: self.start.unwrap_or(segment.start),
            end: self.end.unwrap_or(segment.end),
            text: self.text.clone().unwrap_or_else(|| segment.text.clone()),
        }
    }
}
