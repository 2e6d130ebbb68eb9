use crate::subtitle::Segment;
use serde::{Deserialize, Serialize};

/// Сводная статистика по коллекции сегментов
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Количество сегментов
    pub count: usize,
    /// Сумма длительностей сегментов, мс (перевернутые сегменты дают 0)
    pub total_duration: i64,
    /// Средняя длительность, мс
    pub average_duration: f64,
    /// Взвешенная по длительности скорость чтения: все символы / все секунды
    pub average_cps: f64,
    /// Наибольшее количество символов в сегменте
    pub longest: usize,
    /// Наименьшее количество символов в сегменте
    pub shortest: usize,
}

/// Вычисляет статистику; для пустой коллекции все значения нулевые
pub fn compute(segments: &[Segment]) -> Stats {
    if segments.is_empty() {
        return Stats::default();
    }

    let count = segments.len();
    let total_duration = segments
        .iter()
        .fold(0i64, |total, s| total.saturating_add(s.duration_ms().max(0)));
    let total_chars: usize = segments.iter().map(Segment::char_count).sum();

    let average_cps = if total_duration > 0 {
        total_chars as f64 / (total_duration as f64 / 1000.0)
    } else {
        0.0
    };

    Stats {
        count,
        total_duration,
        average_duration: total_duration as f64 / count as f64,
        average_cps,
        longest: segments.iter().map(Segment::char_count).max().unwrap_or(0),
        shortest: segments.iter().map(Segment::char_count).min().unwrap_or(0),
    }
}
