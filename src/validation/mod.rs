//! Проверка субтитров на читаемость и корректность времени.
//!
//! Результаты проверки носят рекомендательный характер и никогда не
//! блокируют изменение коллекции.

pub mod config;
pub mod rules;

use crate::subtitle::Segment;
use serde::{Deserialize, Serialize};

pub use config::ValidationConfig;

/// Уровень серьезности замечания
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Вид замечания
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueKind {
    NegativeTime,
    InvalidTiming,
    EmptyText,
    TooShort { duration_ms: i64 },
    TooLong { duration_ms: i64 },
    TooManyLines { lines: usize },
    LineTooLong { line: usize, chars: usize },
    ReadingSpeedTooHigh { cps: f64 },
    ReadingSpeedHigh { cps: f64 },
    ReadingSpeedLow { cps: f64 },
    Overlap { next_id: String, overlap_ms: i64 },
    SmallGap { next_id: String, gap_ms: i64 },
}

/// Замечание к сегменту
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub segment_id: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn error(segment: &Segment, kind: IssueKind, message: String) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            segment_id: segment.id.clone(),
            message,
        }
    }

    pub fn warning(segment: &Segment, kind: IssueKind, message: String) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            segment_id: segment.id.clone(),
            message,
        }
    }
}

/// Результат проверки: валиден, если нет ни одной ошибки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let is_valid = !issues.iter().any(|issue| issue.severity == Severity::Error);
        Self { is_valid, issues }
    }

    fn messages(&self, severity: Severity) -> Vec<String> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .map(|issue| issue.message.clone())
            .collect()
    }

    /// Сообщения об ошибках
    pub fn errors(&self) -> Vec<String> {
        self.messages(Severity::Error)
    }

    /// Сообщения-предупреждения
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Severity::Warning)
    }
}

/// Результат проверки отдельного сегмента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentValidation {
    pub segment_id: String,
    pub result: ValidationResult,
}

/// Полный отчет по коллекции
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Валидна, если ни на одном уровне нет ошибок
    pub is_valid: bool,
    /// Результаты по сегментам в порядке отображения
    pub segments: Vec<SegmentValidation>,
    /// Результат проверки соседних пар
    pub timing: ValidationResult,
}

impl ValidationReport {
    /// Все замечания: сначала по сегментам, затем по парам
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.segments
            .iter()
            .flat_map(|segment| segment.result.issues.iter())
            .chain(self.timing.issues.iter())
    }

    pub fn error_count(&self) -> usize {
        self.issues().filter(|issue| issue.severity == Severity::Error).count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues().filter(|issue| issue.severity == Severity::Warning).count()
    }

    /// Результат для сегмента с указанным идентификатором
    pub fn for_segment(&self, id: &str) -> Option<&ValidationResult> {
        self.segments
            .iter()
            .find(|segment| segment.segment_id == id)
            .map(|segment| &segment.result)
    }
}

/// Проверяет один сегмент
pub fn validate_segment(segment: &Segment, config: &ValidationConfig) -> ValidationResult {
    ValidationResult::from_issues(rules::check_segment(segment, config))
}

/// Проверяет коллекцию: каждый сегмент и соседние пары в порядке отображения
pub fn validate_segments(segments: &[Segment], config: &ValidationConfig) -> ValidationReport {
    let per_segment: Vec<SegmentValidation> = segments
        .iter()
        .map(|segment| SegmentValidation {
            segment_id: segment.id.clone(),
            result: validate_segment(segment, config),
        })
        .collect();

    let timing = ValidationResult::from_issues(rules::check_adjacent(segments, config));
    let is_valid = timing.is_valid && per_segment.iter().all(|segment| segment.result.is_valid);

    ValidationReport {
        is_valid,
        segments: per_segment,
        timing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ValidationConfig {
        ValidationConfig::default()
    }

    fn kinds(result: &ValidationResult) -> Vec<&IssueKind> {
        result.issues.iter().map(|issue| &issue.kind).collect()
    }

    #[test]
    fn test_clean_segment_is_valid() {
        // 30 символов за 2 секунды = 15 CPS
        let segment = Segment::new(0, 2000, "This line is thirty chars long");
        let result = validate_segment(&segment, &config());

        assert!(result.is_valid);
        assert!(result.issues.is_empty(), "{:?}", result.issues);
    }

    #[test]
    fn test_zero_duration_is_timing_error() {
        let result = validate_segment(&Segment::new(1000, 1000, "hi"), &config());

        assert!(!result.is_valid);
        assert_eq!(kinds(&result), vec![&IssueKind::InvalidTiming]);
    }

    #[test]
    fn test_negative_time_is_error() {
        let result = validate_segment(&Segment::new(-100, 1500, "Short text here, ok"), &config());

        assert!(!result.is_valid);
        assert!(kinds(&result).contains(&&IssueKind::NegativeTime));
    }

    #[test]
    fn test_empty_text_warns_without_cps_checks() {
        let result = validate_segment(&Segment::new(0, 2000, "   "), &config());

        assert!(result.is_valid);
        assert_eq!(kinds(&result), vec![&IssueKind::EmptyText]);
        assert_eq!(result.warnings(), vec!["Text is empty".to_string()]);
    }

    #[test]
    fn test_duration_bounds() {
        let short = validate_segment(&Segment::new(0, 900, "Hi there"), &config());
        assert!(kinds(&short).contains(&&IssueKind::TooShort { duration_ms: 900 }));

        let long = validate_segment(&Segment::new(0, 6500, "A sentence that takes a while to read aloud, right"), &config());
        assert!(kinds(&long).contains(&&IssueKind::TooLong { duration_ms: 6500 }));
    }

    #[test]
    fn test_line_limits() {
        let text = format!("one\ntwo\n{}", "x".repeat(43));
        let result = validate_segment(&Segment::new(0, 6000, text), &config());

        assert!(!result.is_valid);
        assert!(kinds(&result).contains(&&IssueKind::TooManyLines { lines: 3 }));
        assert!(kinds(&result).contains(&&IssueKind::LineTooLong { line: 3, chars: 43 }));
    }

    #[test]
    fn test_cps_exactly_at_limit_is_not_error() {
        let result = validate_segment(&Segment::new(0, 1000, "x".repeat(21)), &config());

        assert!(result.is_valid);
        assert_eq!(kinds(&result), vec![&IssueKind::ReadingSpeedHigh { cps: 21.0 }]);
    }

    #[test]
    fn test_cps_above_limit_is_error() {
        let result = validate_segment(&Segment::new(0, 1000, "x".repeat(22)), &config());

        assert!(!result.is_valid);
        assert_eq!(kinds(&result), vec![&IssueKind::ReadingSpeedTooHigh { cps: 22.0 }]);
    }

    #[test]
    fn test_low_cps_only_for_longer_segments() {
        let slow = validate_segment(&Segment::new(0, 2000, "ab"), &config());
        assert_eq!(kinds(&slow), vec![&IssueKind::ReadingSpeedLow { cps: 1.0 }]);

        let one_second = validate_segment(&Segment::new(0, 1000, "ab"), &config());
        assert!(one_second.issues.is_empty());
    }

    #[test]
    fn test_overlap_in_display_order() {
        let segments = vec![Segment::new(0, 2000, "a"), Segment::new(1000, 3000, "b")];
        let report = validate_segments(&segments, &config());

        assert!(!report.is_valid);
        assert_eq!(report.timing.issues.len(), 1);
        assert_eq!(
            report.timing.issues[0].kind,
            IssueKind::Overlap {
                next_id: segments[1].id.clone(),
                overlap_ms: 1000
            }
        );
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn test_small_gap_warns() {
        let segments = vec![
            Segment::new(0, 2000, "This is a comfortable line"),
            Segment::new(2050, 4000, "And another one right here"),
        ];
        let report = validate_segments(&segments, &config());

        assert!(report.is_valid);
        assert_eq!(report.timing.warnings(), vec!["Gap to the next segment is 50 ms, minimum is 100 ms".to_string()]);
    }

    #[test]
    fn test_extreme_times_do_not_overflow() {
        let segments = vec![
            Segment::new(0, i64::MAX, "Runs until the end of time"),
            Segment::new(i64::MIN, 0, "Started before time began"),
        ];
        let report = validate_segments(&segments, &config());

        assert!(matches!(
            report.timing.issues[0].kind,
            IssueKind::Overlap { overlap_ms: i64::MAX, .. }
        ));
        assert!(!report.is_valid);

        // Промежуток от перевернутого сегмента тоже не переполняется
        let segments = vec![Segment::new(0, i64::MIN, "Inverted"), Segment::new(i64::MAX - 1, i64::MAX, "Last")];
        let report = validate_segments(&segments, &config());
        assert!(report.timing.issues.is_empty());
    }

    #[test]
    fn test_unsorted_pairs_are_checked_as_displayed() {
        // По времени сегменты не пересекаются, но в порядке отображения второй начинается раньше конца первого
        let segments = vec![
            Segment::new(5000, 7000, "Second half of the scene"),
            Segment::new(0, 2000, "First half of the scene!"),
        ];
        let report = validate_segments(&segments, &config());

        assert_eq!(report.timing.issues.len(), 1);
        assert!(matches!(
            report.timing.issues[0].kind,
            IssueKind::Overlap { overlap_ms: 7000, .. }
        ));
    }
}
