//! Domain layer - pure proposal logic with no I/O.

pub mod proposal;
