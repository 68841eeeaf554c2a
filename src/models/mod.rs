pub mod log;
pub mod state;
pub mod task;
