//! Headless, tick-driven engine core for table games.
//!
//! The engine owns the entity scene, the Rapier2D world and the fixed
//! timestep; a game plugs in through the [`Game`] trait and is driven by a
//! runner (see the `pocket-web` crate).

pub mod api;
pub mod core;
pub mod components;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent, OverlayMessage};
pub use components::entity::Entity;
pub use core::camera::ScreenProjection;
pub use core::scene::Scene;
pub use core::time::{Countdown, FixedTimestep};
pub use input::pointer::PointerState;
pub use input::queue::{InputEvent, InputQueue};

#[cfg(feature = "physics")]
pub use core::physics::{
    PhysicsWorld, PhysicsBody, BodyDesc, BodyType,
    ColliderDesc, ColliderMaterial,
};
