pub mod nearest;
pub mod number_format;
pub mod ticks;
