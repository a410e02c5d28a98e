pub mod frame;
pub mod gate;
pub mod parallax;
pub mod runtime;
pub mod sample;
pub mod source;
pub mod sync;
