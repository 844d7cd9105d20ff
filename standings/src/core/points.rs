//! Fixed position-to-points scoring table.

/// Points for positions 1 through 9.
///
/// There is deliberately no entry for 10th place, so 10th scores 0 even though
/// it is a points finish under current real-world rules. Candidate bug, kept
/// because standings produced so far depend on it.
pub const POINTS_AWARDED: [u32; 9] = [25, 18, 15, 12, 10, 8, 6, 4, 2];

/// Points awarded for a finishing position.
///
/// Positions past the end of [`POINTS_AWARDED`] score 0. Callers must reject
/// position 0 before calling; it is treated as a non-scoring position here.
pub fn points_for(position: u32) -> u32 {
    position
        .checked_sub(1)
        .and_then(|index| POINTS_AWARDED.get(index as usize))
        .copied()
        .unwrap_or(0)
}
