//! Reduces every ball's speed to one "table is at rest" answer.

use pocket_engine::EngineContext;

use crate::balls::Ball;

/// Sum the speed of every ball that reports one and compare with `epsilon`.
///
/// `None` readings (no physical body) are skipped. With `epsilon == 0.0`
/// the table is at rest only when the sum is exactly zero.
pub fn is_at_rest<I>(speeds: I, epsilon: f32) -> bool
where
    I: IntoIterator<Item = Option<f32>>,
{
    let total: f32 = speeds.into_iter().flatten().sum();
    total <= epsilon
}

/// [`is_at_rest`] over live balls, reading speeds from the physics world.
pub fn table_at_rest<'a>(
    balls: impl IntoIterator<Item = &'a Ball>,
    ctx: &EngineContext,
    epsilon: f32,
) -> bool {
    is_at_rest(balls.into_iter().map(|ball| ctx.speed(ball.id)), epsilon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_zero_is_rest() {
        assert!(is_at_rest([Some(0.0), Some(0.0)], 0.0));
        assert!(is_at_rest(Vec::<Option<f32>>::new(), 0.0), "empty table is at rest");
    }

    #[test]
    fn any_motion_breaks_strict_rest() {
        assert!(!is_at_rest([Some(0.0), Some(1e-6)], 0.0));
    }

    #[test]
    fn bodiless_balls_are_skipped() {
        assert!(is_at_rest([None, Some(0.0), None], 0.0));
        assert!(!is_at_rest([None, Some(3.0)], 0.0));
    }

    #[test]
    fn epsilon_tolerates_jitter() {
        assert!(is_at_rest([Some(0.004), Some(0.004)], 0.01));
        assert!(!is_at_rest([Some(0.006), Some(0.006)], 0.01));
    }
}
