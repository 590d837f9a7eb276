pub mod format;
pub mod signal;
pub mod timer;
