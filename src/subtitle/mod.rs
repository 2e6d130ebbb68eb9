pub mod models;
pub mod parser;
pub mod timecode;
pub mod writer;

pub use models::{new_segment_id, DetectedFormat, Segment, SegmentDraft, SegmentPatch, SubtitleFormat};
pub use parser::SubtitleParser;
pub use timecode::{format_timecode, parse_timecode};
pub use writer::SubtitleWriter;
