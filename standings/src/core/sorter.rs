//! Championship ordering.

use crate::core::types::{ConstructorStanding, DriverStanding};

/// Anything ranked by accumulated points.
pub trait Scored {
    fn points(&self) -> u32;
}

impl Scored for DriverStanding {
    fn points(&self) -> u32 {
        self.points
    }
}

impl Scored for ConstructorStanding {
    fn points(&self) -> u32 {
        self.points
    }
}

/// Sort descending by points. Stable: tied entries keep their prior order.
pub fn sort_by_points<T: Scored>(list: &mut [T]) {
    list.sort_by(|a, b| b.points().cmp(&a.points()));
}

/// True if `list` is in non-increasing points order.
pub fn is_sorted_by_points<T: Scored>(list: &[T]) -> bool {
    list.windows(2)
        .all(|pair| pair[0].points() >= pair[1].points())
}
