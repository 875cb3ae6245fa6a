use glam::Vec2;

/// Maps host screen pixels onto the game world.
///
/// The world rectangle is fit inside the viewport preserving aspect ratio
/// (letterboxed) and centered. Both spaces are Y-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenProjection {
    /// World size in game units.
    world: Vec2,
    /// Viewport size in screen pixels.
    viewport: Vec2,
}

impl ScreenProjection {
    /// A projection where one pixel equals one world unit.
    pub fn new(world_width: f32, world_height: f32) -> Self {
        let world = Vec2::new(world_width, world_height);
        Self {
            world,
            viewport: world,
        }
    }

    /// Resize the viewport (e.g. on window resize).
    /// Zero or negative sizes are ignored.
    pub fn resize(&mut self, viewport_width: f32, viewport_height: f32) {
        if viewport_width <= 0.0 || viewport_height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(viewport_width, viewport_height);
    }

    /// Pixels per world unit.
    pub fn scale(&self) -> f32 {
        let horiz_ratio = self.viewport.x / self.world.x;
        let vert_ratio = self.viewport.y / self.world.y;
        horiz_ratio.min(vert_ratio)
    }

    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.viewport * 0.5) / self.scale() + self.world * 0.5
    }
}
