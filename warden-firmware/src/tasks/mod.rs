//! Embassy async tasks
//!
//! Only the tick runs as a task; the request loop is the foreground.

pub mod tick;

pub use tick::tick_task;
