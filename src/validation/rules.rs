use crate::subtitle::Segment;
use crate::validation::config::ValidationConfig;
use crate::validation::{IssueKind, ValidationIssue};

/// Проверки одного сегмента
pub fn check_segment(segment: &Segment, config: &ValidationConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let duration = segment.duration_ms();

    if segment.start < 0 || segment.end < 0 {
        issues.push(ValidationIssue::error(
            segment,
            IssueKind::NegativeTime,
            format!("Negative time: {} --> {} ms", segment.start, segment.end),
        ));
    }

    if duration <= 0 {
        issues.push(ValidationIssue::error(
            segment,
            IssueKind::InvalidTiming,
            format!("Start ({} ms) is not before end ({} ms)", segment.start, segment.end),
        ));
    } else if duration < config.min_duration_ms {
        issues.push(ValidationIssue::warning(
            segment,
            IssueKind::TooShort { duration_ms: duration },
            format!("Duration {} ms is shorter than {} ms", duration, config.min_duration_ms),
        ));
    } else if duration > config.max_duration_ms {
        issues.push(ValidationIssue::warning(
            segment,
            IssueKind::TooLong { duration_ms: duration },
            format!("Duration {} ms is longer than {} ms", duration, config.max_duration_ms),
        ));
    }

    let is_blank = segment.text.trim().is_empty();
    if is_blank {
        issues.push(ValidationIssue::warning(segment, IssueKind::EmptyText, "Text is empty".to_string()));
    }

    let lines = segment.line_count();
    if lines > config.max_lines {
        issues.push(ValidationIssue::error(
            segment,
            IssueKind::TooManyLines { lines },
            format!("{} lines exceed the limit of {}", lines, config.max_lines),
        ));
    }

    for (index, line) in segment.text.lines().enumerate() {
        let chars = line.chars().count();
        if chars > config.max_line_chars {
            issues.push(ValidationIssue::warning(
                segment,
                IssueKind::LineTooLong { line: index + 1, chars },
                format!("Line {} has {} characters, limit is {}", index + 1, chars, config.max_line_chars),
            ));
        }
    }

    if let (Some(cps), false) = (segment.cps(), is_blank) {
        if cps > config.max_cps {
            issues.push(ValidationIssue::error(
                segment,
                IssueKind::ReadingSpeedTooHigh { cps },
                format!("Reading speed {:.1} CPS exceeds {:.1}", cps, config.max_cps),
            ));
        } else if cps > config.warn_cps {
            issues.push(ValidationIssue::warning(
                segment,
                IssueKind::ReadingSpeedHigh { cps },
                format!("Reading speed {:.1} CPS is above {:.1}", cps, config.warn_cps),
            ));
        } else if cps < config.min_cps && duration > config.min_duration_ms {
            issues.push(ValidationIssue::warning(
                segment,
                IssueKind::ReadingSpeedLow { cps },
                format!("Reading speed {:.1} CPS is below {:.1}", cps, config.min_cps),
            ));
        }
    }

    issues
}

/// Проверки соседних пар в порядке отображения
pub fn check_adjacent(segments: &[Segment], config: &ValidationConfig) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for pair in segments.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        if current.end > next.start {
            let overlap_ms = current.end.saturating_sub(next.start);
            issues.push(ValidationIssue::error(
                current,
                IssueKind::Overlap {
                    next_id: next.id.clone(),
                    overlap_ms,
                },
                format!("Overlaps the next segment by {} ms", overlap_ms),
            ));
        } else {
            let gap_ms = next.start.saturating_sub(current.end);
            if gap_ms < config.min_gap_ms {
                issues.push(ValidationIssue::warning(
                    current,
                    IssueKind::SmallGap {
                        next_id: next.id.clone(),
                        gap_ms,
                    },
                    format!("Gap to the next segment is {} ms, minimum is {} ms", gap_ms, config.min_gap_ms),
                ));
            }
        }
    }

    issues
}
