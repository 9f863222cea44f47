pub mod app;
pub mod events;
pub mod input;
pub mod render;
pub mod surface;
pub mod theme;

pub use app::run;
