use crate::subtitle::Segment;

/// Индекс первого в порядке отображения сегмента, содержащего момент `time_ms`.
///
/// Интервал сегмента `[start, end)`: момент ровно на конце сегмента ему не принадлежит.
pub fn locate(segments: &[Segment], time_ms: i64) -> Option<usize> {
    segments.iter().position(|segment| segment.contains(time_ms))
}

/// Сегмент, активный в момент `time_ms`
pub fn locate_segment(segments: &[Segment], time_ms: i64) -> Option<&Segment> {
    locate(segments, time_ms).map(|index| &segments[index])
}

/// Индекс первого в порядке отображения сегмента, начинающегося строго после `time_ms`
pub fn next_start_after(segments: &[Segment], time_ms: i64) -> Option<usize> {
    segments.iter().position(|segment| segment.start > time_ms)
}
