/// Fixed search depth in plies. This is the engine's only resource bound and
/// is process-wide; it is deliberately not configurable per call.
pub const SEARCH_DEPTH: usize = 3;
