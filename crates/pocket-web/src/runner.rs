use pocket_engine::{
    Game, GameConfig, EngineContext, InputEvent, InputQueue, FixedTimestep,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner (see
/// `export_game!`) and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self {
            ctx: EngineContext::with_config(&config),
            timestep: FixedTimestep::new(config.fixed_dt),
            input: InputQueue::new(),
            game,
            config,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Forward a viewport size change to the game.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.game.resize(width, height);
    }

    /// Run one frame: zero or more fixed game ticks, each followed by a
    /// physics step.
    ///
    /// Pending input is handed to the first tick only, so a click is never
    /// seen twice. If the frame runs no tick, input waits for the next frame.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for step in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            if step == 0 {
                self.input.drain();
            }
            #[cfg(feature = "physics")]
            self.ctx.step_physics();
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Accessors for host reads ----

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn message_count(&self) -> u32 {
        self.ctx.messages.len() as u32
    }

    /// Text of the `index`-th overlay message this frame (empty if out of range).
    pub fn message_text(&self, index: u32) -> String {
        self.ctx
            .messages
            .get(index as usize)
            .map(|m| m.text.clone())
            .unwrap_or_default()
    }

    pub fn message_seconds(&self, index: u32) -> f32 {
        self.ctx
            .messages
            .get(index as usize)
            .map(|m| m.seconds)
            .unwrap_or(0.0)
    }

    pub fn world_width(&self) -> f32 {
        self.config.world_width
    }

    pub fn world_height(&self) -> f32 {
        self.config.world_height
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }
}
