pub mod camera;
#[cfg(feature = "physics")]
pub mod physics;
pub mod scene;
pub mod time;
