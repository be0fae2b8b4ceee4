pub mod repulsion;
pub mod crossfade;
pub mod text;
pub mod marquee;
pub mod schedule;
