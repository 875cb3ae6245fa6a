use crate::core::scene::Scene;
use crate::api::types::{EntityId, GameEvent, OverlayMessage};
use crate::input::queue::InputQueue;
#[cfg(feature = "physics")]
use crate::core::physics::{PhysicsWorld, BodyDesc, ColliderMaterial};
#[cfg(feature = "physics")]
use crate::components::entity::Entity;
use glam::Vec2;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
    /// Gravity vector for physics simulation. Default: zero (top-down table).
    pub gravity: Vec2,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_events: 32,
            gravity: Vec2::ZERO,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state, spawn entities, configure the scene.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed tick. Read input, run rules, apply impulses, emit events.
    /// Physics is stepped by the runner right after this returns.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// The host viewport changed size (screen pixels).
    fn resize(&mut self, _width: f32, _height: f32) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub events: Vec<GameEvent>,
    pub messages: Vec<OverlayMessage>,
    max_events: usize,
    next_id: u32,
    #[cfg(feature = "physics")]
    pub physics: PhysicsWorld,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    /// Create an EngineContext sized and configured for `config`.
    pub fn with_config(config: &GameConfig) -> Self {
        #[cfg(feature = "physics")]
        let physics = {
            let mut world = PhysicsWorld::new(config.gravity);
            world.set_dt(config.fixed_dt);
            world
        };
        Self {
            scene: Scene::new(),
            events: Vec::with_capacity(config.max_events),
            messages: Vec::new(),
            max_events: config.max_events,
            next_id: 1,
            #[cfg(feature = "physics")]
            physics,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to the host page.
    /// Events past the per-frame cap are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("game event dropped (cap {} reached): {:?}", self.max_events, event);
            return;
        }
        self.events.push(event);
    }

    /// Queue an on-screen text notice for the host page.
    pub fn display_message(&mut self, text: impl Into<String>, seconds: f32) {
        let text = text.into();
        log::debug!("Displaying {:?} for {} s", text, seconds);
        self.messages.push(OverlayMessage { text, seconds });
    }

    /// Clear per-frame transient data (events and messages).
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
        self.messages.clear();
    }

    // -- Physics convenience methods --

    /// Spawn an entity with a physics body. Returns the EntityId.
    #[cfg(feature = "physics")]
    pub fn spawn_with_body(
        &mut self,
        entity: Entity,
        desc: BodyDesc,
        material: ColliderMaterial,
    ) -> EntityId {
        let id = entity.id;
        let body = self.physics.create_body(id, &desc, material);
        let entity = entity.with_pos(desc.position).with_body(body);
        self.scene.spawn(entity);
        id
    }

    /// Despawn an entity, cleaning up its physics body if present.
    #[cfg(feature = "physics")]
    pub fn despawn(&mut self, id: EntityId) {
        if let Some(entity) = self.scene.despawn(id) {
            if let Some(body) = &entity.body {
                self.physics.remove_body(body);
            }
        }
    }

    /// Apply an instantaneous impulse to an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn apply_impulse(&mut self, id: EntityId, impulse: Vec2) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.apply_impulse(&body, impulse);
        }
    }

    /// Zero an entity's velocity and put its body to sleep.
    #[cfg(feature = "physics")]
    pub fn stop(&mut self, id: EntityId) {
        if let Some(body) = self.scene.get(id).and_then(|e| e.body) {
            self.physics.stop(&body);
        }
    }

    /// Get the linear velocity of an entity's physics body.
    #[cfg(feature = "physics")]
    pub fn velocity(&self, id: EntityId) -> Vec2 {
        self.scene
            .get(id)
            .and_then(|e| e.body.as_ref())
            .map(|body| self.physics.velocity(body))
            .unwrap_or(Vec2::ZERO)
    }

    /// Speed of an entity's physics body. `None` when the entity is gone or
    /// is not physically simulated.
    #[cfg(feature = "physics")]
    pub fn speed(&self, id: EntityId) -> Option<f32> {
        let body = self.scene.get(id)?.body?;
        self.physics.speed(&body)
    }

    /// Step the physics simulation and sync positions back to entities.
    /// Called by the game runner after `Game::update()`.
    #[cfg(feature = "physics")]
    pub fn step_physics(&mut self) {
        self.physics.step();

        for entity in self.scene.iter_mut() {
            if let Some(body) = &entity.body {
                let (pos, rot) = self.physics.body_position(body);
                entity.pos = pos;
                entity.rotation = rot;
            }
        }
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
