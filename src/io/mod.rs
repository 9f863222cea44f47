pub mod config_io;
pub mod logging;
pub mod store;
pub mod task_io;
