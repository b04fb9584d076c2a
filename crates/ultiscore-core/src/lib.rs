// Library root: stat aggregation, role scoring and draft pricing for
// ultimate-frisbee play-by-play game logs.

pub mod aggregate;
pub mod event;
pub mod pipeline;
pub mod pricing;
pub mod roster;
pub mod scoring;
pub mod squad;
pub mod tournament;
