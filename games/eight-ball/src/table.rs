//! Table geometry: world size, cushions, pockets and the play area.

use glam::Vec2;
use pocket_engine::{BodyDesc, ColliderDesc, ColliderMaterial, EngineContext, Entity};

// Playing surface, including rails
pub const TABLE_W: f32 = 1000.0;
pub const TABLE_H: f32 = 500.0;

// Room around the table for the cue stick
pub const TABLE_MARGIN: f32 = 80.0;

pub const WORLD_W: f32 = TABLE_W + 2.0 * TABLE_MARGIN;
pub const WORLD_H: f32 = TABLE_H + 2.0 * TABLE_MARGIN;

pub const TABLE_X: f32 = TABLE_MARGIN;
pub const TABLE_Y: f32 = TABLE_MARGIN;

/// Rail thickness; the cushion colliders fill it.
pub const CUSHION: f32 = 35.0;
/// Opening left in the cushions at every pocket.
pub const POCKET_GAP: f32 = 40.0;

pub const BALL_RADIUS: f32 = 12.0;
pub const POCKET_RADIUS: f32 = 22.0;
const CORNER_POCKET_INSET: f32 = CUSHION * 0.7;
const SIDE_POCKET_INSET: f32 = CUSHION * 0.5;

/// Head spot, where the cue ball is placed.
pub const HEAD_SPOT: Vec2 = Vec2::new(TABLE_X + 250.0, TABLE_Y + TABLE_H / 2.0);
/// Foot spot, the apex of the rack.
pub const FOOT_SPOT: Vec2 = Vec2::new(TABLE_X + 700.0, TABLE_Y + TABLE_H / 2.0);

pub const CUSHION_TAG: &str = "cushion";

const CUSHION_MATERIAL: ColliderMaterial = ColliderMaterial {
    restitution: 0.95,
    friction: 0.2,
    density: 1.0,
};

/// Play area inside the cushions: (min, max) corners.
pub fn play_area() -> (Vec2, Vec2) {
    (
        Vec2::new(TABLE_X + CUSHION, TABLE_Y + CUSHION),
        Vec2::new(TABLE_X + TABLE_W - CUSHION, TABLE_Y + TABLE_H - CUSHION),
    )
}

pub fn pocket_positions() -> [Vec2; 6] {
    [
        // corners
        Vec2::new(TABLE_X + CORNER_POCKET_INSET, TABLE_Y + CORNER_POCKET_INSET),
        Vec2::new(TABLE_X + TABLE_W - CORNER_POCKET_INSET, TABLE_Y + CORNER_POCKET_INSET),
        Vec2::new(TABLE_X + CORNER_POCKET_INSET, TABLE_Y + TABLE_H - CORNER_POCKET_INSET),
        Vec2::new(TABLE_X + TABLE_W - CORNER_POCKET_INSET, TABLE_Y + TABLE_H - CORNER_POCKET_INSET),
        // sides
        Vec2::new(TABLE_X + TABLE_W / 2.0, TABLE_Y + SIDE_POCKET_INSET),
        Vec2::new(TABLE_X + TABLE_W / 2.0, TABLE_Y + TABLE_H - SIDE_POCKET_INSET),
    ]
}

/// Distance from `point` to the segment `p1`–`p2`.
pub fn segment_point_distance(p1: Vec2, p2: Vec2, point: Vec2) -> f32 {
    let line = p2 - p1;
    let len_sq = line.length_squared();
    if len_sq < 0.0001 {
        return p1.distance(point);
    }
    let t = ((point - p1).dot(line) / len_sq).clamp(0.0, 1.0);
    (p1 + line * t).distance(point)
}

/// Index of the pocket a ball dropped into while travelling `prev` → `current`.
///
/// Uses the swept path rather than the end position, so a fast ball that
/// crosses a pocket within one step is still caught.
pub fn pocket_hit(prev: Vec2, current: Vec2) -> Option<usize> {
    pocket_positions()
        .iter()
        .position(|&pocket| segment_point_distance(prev, current, pocket) < POCKET_RADIUS + BALL_RADIUS * 0.5)
}

/// Ball center outside the cushions: it tunnelled off the table.
pub fn escaped(pos: Vec2) -> bool {
    let (min, max) = play_area();
    pos.x < min.x || pos.x > max.x || pos.y < min.y || pos.y > max.y
}

/// Spawn the six cushion segments, leaving gaps at the pockets.
pub fn build_cushions(ctx: &mut EngineContext) {
    let (min, max) = play_area();
    let mid_x = TABLE_X + TABLE_W / 2.0;

    let rail_len = mid_x - min.x - POCKET_GAP - POCKET_GAP / 2.0;
    let side_len = max.y - min.y - 2.0 * POCKET_GAP;

    let top = TABLE_Y + CUSHION / 2.0;
    let bottom = TABLE_Y + TABLE_H - CUSHION / 2.0;
    let horizontal = Vec2::new(rail_len / 2.0, CUSHION / 2.0);
    let vertical = Vec2::new(CUSHION / 2.0, side_len / 2.0);

    let segments = [
        (Vec2::new(min.x + POCKET_GAP + rail_len / 2.0, top), horizontal),
        (Vec2::new(max.x - POCKET_GAP - rail_len / 2.0, top), horizontal),
        (Vec2::new(min.x + POCKET_GAP + rail_len / 2.0, bottom), horizontal),
        (Vec2::new(max.x - POCKET_GAP - rail_len / 2.0, bottom), horizontal),
        (Vec2::new(TABLE_X + CUSHION / 2.0, TABLE_Y + TABLE_H / 2.0), vertical),
        (Vec2::new(TABLE_X + TABLE_W - CUSHION / 2.0, TABLE_Y + TABLE_H / 2.0), vertical),
    ];

    for (center, half) in segments {
        let id = ctx.next_id();
        let desc = BodyDesc::fixed(ColliderDesc::Cuboid {
            half_width: half.x,
            half_height: half.y,
        })
        .with_position(center);
        ctx.spawn_with_body(Entity::new(id).with_tag(CUSHION_TAG), desc, CUSHION_MATERIAL);
    }
    log::debug!("Cushions built: rails {:.0}, sides {:.0}", rail_len, side_len);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spots_are_on_the_table() {
        assert!(!escaped(HEAD_SPOT));
        assert!(!escaped(FOOT_SPOT));
        assert!(escaped(Vec2::new(TABLE_X, TABLE_Y + TABLE_H / 2.0)));
        assert!(escaped(Vec2::new(WORLD_W / 2.0, WORLD_H)));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = segment_point_distance(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(5.0, 3.0));
        assert!((d - 3.0).abs() < 1e-6);
        let d = segment_point_distance(Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(13.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
        let d = segment_point_distance(Vec2::ONE, Vec2::ONE, Vec2::new(4.0, 5.0));
        assert!((d - 5.0).abs() < 1e-6, "degenerate segment is a point");
    }

    #[test]
    fn fast_ball_crossing_a_pocket_is_caught() {
        let corner = pocket_positions()[0];
        let prev = corner + Vec2::new(60.0, 60.0);
        let current = corner - Vec2::new(60.0, 60.0);
        assert_eq!(pocket_hit(prev, corner + Vec2::splat(100.0)), None);
        assert_eq!(pocket_hit(prev, current), Some(0));
    }

    #[test]
    fn side_pocket_index() {
        let side = pocket_positions()[5];
        assert_eq!(pocket_hit(side - Vec2::new(0.0, 20.0), side), Some(5));
    }

    #[test]
    fn cushions_spawn_six_fixed_bodies() {
        let mut ctx = EngineContext::new();
        build_cushions(&mut ctx);
        let ids = ctx.scene.ids_with_tag(CUSHION_TAG);
        assert_eq!(ids.len(), 6);
        assert_eq!(ctx.physics.body_count(), 6);
        assert!(ids.iter().all(|&id| ctx.speed(id) == Some(0.0)));
    }
}
