//! Drag-to-shoot cue: pointer gesture → pull-back → impulse on the cue ball.
//!
//! The player presses anywhere, drags, and releases. The aim always points
//! from the cue ball toward the pointer's world position; the drag length
//! (in screen pixels) only sets the power.

use glam::Vec2;
use pocket_engine::{Countdown, PointerState, ScreenProjection};

/// Smallest pull-back, so a click without a drag still shoots.
pub const MIN_DISPLACEMENT: f32 = 0.05;
/// Shot power per unit of pull-back.
pub const POWER_PER_DISPLACEMENT: f32 = 5.0;
/// Pull-back the cue returns to after a shot.
pub const REST_OFFSET: f32 = -0.05;
/// Fixed downward tilt of the cue, degrees.
pub const CUE_TILT_DEGREES: f32 = 2.75;

/// Pull-back for a drag of `distance` pixels.
///
/// Concave: `distance^(1/tension_power) / 100`, floored at
/// [`MIN_DISPLACEMENT`]. Small drags still give a usable pull, large drags
/// grow sub-linearly.
pub fn pull_displacement(distance: f32, tension_power: f32) -> f32 {
    let displacement = distance.abs().powf(1.0 / tension_power) / 100.0;
    displacement.max(MIN_DISPLACEMENT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueState {
    Idle,
    Dragging,
    Suppressed,
}

/// Where the cue points: yaw around the vertical axis plus the fixed tilt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuePose {
    pub yaw_degrees: f32,
    pub tilt_degrees: f32,
}

/// The impulse a released drag asks the host to apply to the cue ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotImpulse {
    /// Unit vector in the table plane (zero if the pointer sits on the anchor).
    pub direction: Vec2,
    pub magnitude: f32,
}

impl ShotImpulse {
    pub fn vector(&self) -> Vec2 {
        self.direction * self.magnitude
    }
}

pub struct CueController {
    tension_power: f32,
    /// Sticky lockout commanded by the rules and the menu.
    suppress_queue: bool,
    /// One-shot timed lockout.
    suppression_delay: Countdown,
    /// Rotation anchor, placed on the cue ball.
    anchor: Vec2,
    aim: Vec2,
    pose: CuePose,
    /// Screen position where the current drag started.
    drag_start: Option<Vec2>,
    impulse_power: f32,
    /// Visual pull-back along the cue's local axis (negative = backward).
    offset: f32,
    visible: bool,
}

impl CueController {
    pub fn new(tension_power: f32) -> Self {
        Self {
            tension_power,
            suppress_queue: false,
            suppression_delay: Countdown::expired(),
            anchor: Vec2::ZERO,
            aim: Vec2::ZERO,
            pose: CuePose {
                yaw_degrees: 0.0,
                tilt_degrees: CUE_TILT_DEGREES,
            },
            drag_start: None,
            impulse_power: 1.0,
            offset: REST_OFFSET,
            visible: true,
        }
    }

    pub fn set_tension_power(&mut self, tension_power: f32) {
        self.tension_power = tension_power;
    }

    pub fn state(&self) -> CueState {
        if self.is_suppressed() {
            CueState::Suppressed
        } else if self.drag_start.is_some() {
            CueState::Dragging
        } else {
            CueState::Idle
        }
    }

    /// Either lockout source is active.
    pub fn is_suppressed(&self) -> bool {
        self.suppress_queue || self.suppression_delay.is_running()
    }

    /// Assert or lift the sticky lockout.
    ///
    /// Lifting is refused while the menu is open, so a click on a menu
    /// button can never become a shot.
    pub fn set_suppress_queue(&mut self, suppress: bool, menu_open: bool) {
        if menu_open && !suppress {
            log::debug!("cue stays suppressed: menu is open");
            return;
        }
        self.suppress_queue = suppress;
    }

    /// Lock input for `seconds`, whatever the current state.
    pub fn suppress_for(&mut self, seconds: f32) {
        self.suppression_delay.arm(seconds);
    }

    /// Move the rotation anchor onto the cue ball.
    pub fn update_anchor(&mut self, cue_ball: Vec2) {
        self.anchor = cue_ball;
    }

    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn aim(&self) -> Vec2 {
        self.aim
    }

    pub fn pose(&self) -> CuePose {
        self.pose
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn impulse_power(&self) -> f32 {
        self.impulse_power
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Advance one tick. Returns the shot to apply when a drag is released.
    pub fn tick(
        &mut self,
        dt: f32,
        pointer: &PointerState,
        projection: &ScreenProjection,
    ) -> Option<ShotImpulse> {
        if self.is_suppressed() {
            self.visible = false;
            self.suppression_delay.tick(dt);
            if self.drag_start.take().is_some() {
                self.offset = REST_OFFSET;
                log::debug!("drag cancelled by suppression");
            }
            return None;
        }
        self.visible = true;

        let target = projection.screen_to_world(pointer.position);
        let direction = target - self.anchor;
        self.aim = direction.normalize_or_zero();
        self.pose.yaw_degrees = direction.x.atan2(direction.y).to_degrees();

        if pointer.pressed {
            self.drag_start = Some(pointer.position);
        }

        if let Some(start) = self.drag_start {
            let distance = start.distance(pointer.position);
            let displacement = pull_displacement(distance, self.tension_power);
            self.offset = -displacement;
            self.impulse_power = displacement * POWER_PER_DISPLACEMENT;
        }

        if pointer.released && self.drag_start.take().is_some() {
            self.offset = REST_OFFSET;
            log::debug!("Releasing cue with impulse power {}", self.impulse_power);
            return Some(ShotImpulse {
                direction: self.aim,
                magnitude: self.impulse_power,
            });
        }
        None
    }
}
