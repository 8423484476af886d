pub mod coordinate_system;
pub mod fall_timeline;
pub mod gesture;
pub mod render_settings;
pub mod scene;
