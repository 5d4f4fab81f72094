pub mod app;
pub mod confetti;
pub mod edit_line;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
