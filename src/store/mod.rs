//! Операции над упорядоченной коллекцией сегментов.
//!
//! Все функции чистые: входная коллекция не изменяется, возвращается новая.
//! Порядок коллекции - порядок отображения, сортировка по времени не выполняется.
//! Операции с отсутствующим идентификатором ничего не меняют.

use crate::logging::{log_trace, log_warning};
use crate::subtitle::{Segment, SegmentDraft, SegmentPatch};

/// Приводит отрицательное время к нулю
fn clamp_time(value: i64, field: &str) -> i64 {
    if value < 0 {
        log_warning(&format!("Отрицательное значение {} = {} мс заменено на 0", field, value));
        0
    } else {
        value
    }
}

/// Возвращает позицию сегмента с указанным идентификатором
pub fn find_index(segments: &[Segment], id: &str) -> Option<usize> {
    segments.iter().position(|segment| segment.id == id)
}

/// Вставляет новый сегмент в позицию `index`, ограниченную диапазоном `[0, len]`.
///
/// Возвращает новую коллекцию и идентификатор созданного сегмента.
/// Проверка времени не выполняется.
pub fn insert_at(segments: &[Segment], index: usize, draft: SegmentDraft) -> (Vec<Segment>, String) {
    let index = index.min(segments.len());
    let segment = Segment::new(
        clamp_time(draft.start, "start"),
        clamp_time(draft.end, "end"),
        draft.text,
    );
    let id = segment.id.clone();

    let mut next = segments.to_vec();
    next.insert(index, segment);

    log_trace(&format!("Сегмент {} вставлен в позицию {}", id, index));
    (next, id)
}

/// Применяет патч к сегменту с указанным идентификатором.
///
/// Патч, переворачивающий время (`start >= end`), сохраняется как есть.
pub fn update(segments: &[Segment], id: &str, patch: &SegmentPatch) -> Vec<Segment> {
    let patch = SegmentPatch {
        start: patch.start.map(|start| clamp_time(start, "start")),
        end: patch.end.map(|end| clamp_time(end, "end")),
        text: patch.text.clone(),
    };

    segments
        .iter()
        .map(|segment| {
            if segment.id == id {
                patch.apply(segment)
            } else {
                segment.clone()
            }
        })
        .collect()
}

/// Удаляет сегмент с указанным идентификатором
pub fn remove(segments: &[Segment], id: &str) -> Vec<Segment> {
    segments
        .iter()
        .filter(|segment| segment.id != id)
        .cloned()
        .collect()
}

/// Перемещает сегмент из позиции `from` в позицию `to` независимо от времени.
///
/// `to` ограничивается последней позицией; неверный `from` ничего не меняет.
pub fn move_segment(segments: &[Segment], from: usize, to: usize) -> Vec<Segment> {
    let mut next = segments.to_vec();
    if from >= next.len() {
        return next;
    }

    let segment = next.remove(from);
    let to = to.min(next.len());
    next.insert(to, segment);
    next
}

/// Сдвигает все сегменты на `offset_ms`, время начала и конца не опускается ниже нуля
pub fn shift(segments: &[Segment], offset_ms: i64) -> Vec<Segment> {
    segments
        .iter()
        .map(|segment| Segment {
            id: segment.id.clone(),
            start: segment.start.saturating_add(offset_ms).max(0),
            end: segment.end.saturating_add(offset_ms).max(0),
            text: segment.text.clone(),
        })
        .collect()
}
