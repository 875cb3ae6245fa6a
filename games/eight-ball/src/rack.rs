//! Physical balls on the table: spawning, tracking and collection.

use glam::Vec2;
use pocket_engine::{BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity};

use crate::balls::{rack_positions, Ball};
use crate::error::TableError;
use crate::table::{self, BALL_RADIUS, FOOT_SPOT, HEAD_SPOT};

const LINEAR_DAMPING: f32 = 1.75;
const ANGULAR_DAMPING: f32 = 1.0;
const BALL_MATERIAL: ColliderMaterial = ColliderMaterial {
    restitution: 0.95,
    friction: 0.2,
    // Low density keeps impulse and resulting speed on the same scale
    density: 0.01,
};

/// How a ball left play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Pocket(usize),
    Escaped,
}

#[derive(Debug, Clone, Copy)]
struct Tracked {
    ball: Ball,
    prev_pos: Vec2,
}

/// The cue-ball set and the objective-ball set.
#[derive(Default)]
pub struct BallRack {
    cue_balls: Vec<Tracked>,
    objectives: Vec<Tracked>,
}

impl BallRack {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn(ctx: &mut EngineContext, number: u8, pos: Vec2) -> Tracked {
        let id = ctx.next_id();
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: BALL_RADIUS })
            .with_position(pos)
            .with_linear_damping(LINEAR_DAMPING)
            .with_angular_damping(ANGULAR_DAMPING)
            .with_ccd(true);
        ctx.spawn_with_body(Entity::new(id).with_tag(Ball::tag(number)), desc, BALL_MATERIAL);
        Tracked {
            ball: Ball::new(id, number),
            prev_pos: pos,
        }
    }

    /// Destroy every cue ball and place a fresh one on the head spot.
    pub fn respawn_cue_ball(&mut self, ctx: &mut EngineContext) -> Ball {
        for tracked in self.cue_balls.drain(..) {
            ctx.despawn(tracked.ball.id);
        }
        let tracked = Self::spawn(ctx, 0, HEAD_SPOT);
        self.cue_balls.push(tracked);
        log::info!("Cue ball spawned as {:?}", tracked.ball.id);
        tracked.ball
    }

    /// Destroy every objective ball and rack fifteen new ones.
    pub fn respawn_objective_balls(&mut self, ctx: &mut EngineContext) -> Vec<Ball> {
        for tracked in self.objectives.drain(..) {
            ctx.despawn(tracked.ball.id);
        }
        let positions = rack_positions(FOOT_SPOT, BALL_RADIUS);
        for (i, &pos) in positions.iter().enumerate() {
            let tracked = Self::spawn(ctx, i as u8 + 1, pos);
            self.objectives.push(tracked);
        }
        log::info!("Racked {} objective balls", self.objectives.len());
        self.objectives.iter().map(|t| t.ball).collect()
    }

    /// The cue ball shots are applied to.
    pub fn primary_cue_ball(&self) -> Result<Ball, TableError> {
        self.cue_balls
            .first()
            .map(|t| t.ball)
            .ok_or(TableError::MissingCueBall)
    }

    pub fn primary_cue_position(&self, ctx: &EngineContext) -> Result<Vec2, TableError> {
        let ball = self.primary_cue_ball()?;
        ctx.scene
            .get(ball.id)
            .map(|e| e.pos)
            .ok_or(TableError::MissingCueBall)
    }

    pub fn all_balls(&self) -> impl Iterator<Item = &Ball> {
        self.cue_balls.iter().chain(self.objectives.iter()).map(|t| &t.ball)
    }

    pub fn len(&self) -> usize {
        self.cue_balls.len() + self.objectives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Objective balls still on the table.
    pub fn objectives_remaining(&self) -> usize {
        self.objectives.len()
    }

    /// Despawn and forget every ball that dropped into a pocket or left
    /// the play area since the last call.
    pub fn collect_exited(&mut self, ctx: &mut EngineContext) -> Vec<(Ball, Exit)> {
        let mut exited = Vec::new();
        for set in [&mut self.cue_balls, &mut self.objectives] {
            set.retain_mut(|tracked| {
                let Some(pos) = ctx.scene.get(tracked.ball.id).map(|e| e.pos) else {
                    return true;
                };
                let exit = match table::pocket_hit(tracked.prev_pos, pos) {
                    Some(pocket) => Some(Exit::Pocket(pocket)),
                    None if table::escaped(pos) => Some(Exit::Escaped),
                    None => None,
                };
                tracked.prev_pos = pos;
                match exit {
                    Some(exit) => {
                        exited.push((tracked.ball, exit));
                        false
                    }
                    None => true,
                }
            });
        }

        for (ball, exit) in &exited {
            match exit {
                Exit::Pocket(pocket) => {
                    log::debug!("Ball {} dropped into pocket {}", ball.number, pocket)
                }
                Exit::Escaped => log::warn!("Ball {} escaped the table, counting it as pocketed", ball.number),
            }
            ctx.despawn(ball.id);
        }
        exited
    }

    /// Zero every ball's velocity.
    pub fn stop_all(&self, ctx: &mut EngineContext) {
        for ball in self.all_balls() {
            ctx.stop(ball.id);
        }
    }
}
