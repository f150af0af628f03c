use crate::entity::{Ball, Paddle, BALL_SIZE, PADDLE_HEIGHT};

/// Per-tick cap on AI paddle movement. This is what keeps the AI beatable:
/// it tracks the ball but cannot teleport to it.
pub const PADDLE_SPEED: f32 = 6.0;
/// Converts paddle-contact offset into added vertical velocity.
pub const SPIN_FACTOR: f32 = 0.08;

/// A scoring event. The ball has already been relaunched by the time one of
/// these is returned from [`Game::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Point {
    Player,
    Cpu,
}

/// The whole simulation state: field dimensions fixed at startup, one ball,
/// one paddle per side.
pub struct Game {
    pub width: f32,
    pub height: f32,
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
}

impl Game {
    pub fn new(width: f32, height: f32) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            width,
            height,
            ball: Ball::serve(width, height, &mut rng),
            left_paddle: Paddle::left_side(height),
            right_paddle: Paddle::right_side(width, height),
        }
    }

    /// Center the player paddle on a surface-relative pointer position.
    /// Positions outside the surface clamp to the field edges.
    pub fn track_pointer(&mut self, pointer_y: f32) {
        self.left_paddle.y =
            (pointer_y - PADDLE_HEIGHT / 2.0).clamp(0.0, self.height - PADDLE_HEIGHT);
    }

    /// Advance the simulation one tick. Returns the point if the ball left
    /// the field this tick.
    pub fn update(&mut self) -> Option<Point> {
        let ball = &mut self.ball;

        ball.x += ball.vx;
        ball.y += ball.vy;

        // Top/bottom walls
        if ball.y <= 0.0 {
            ball.y = 0.0;
            ball.vy = -ball.vy;
        }
        if ball.y + BALL_SIZE >= self.height {
            ball.y = self.height - BALL_SIZE;
            ball.vy = -ball.vy;
        }

        // Player paddle: push the ball back out front, reverse it, and add
        // spin proportional to how far off-center the contact was.
        if ball.bounds().intersects(&self.left_paddle.rect()) {
            ball.x = self.left_paddle.rect().right();
            ball.vx = -ball.vx;
            let offset = ball.center_y() - self.left_paddle.center_y();
            ball.vy += offset * SPIN_FACTOR;
        }

        // AI paddle, mirrored
        if ball.bounds().intersects(&self.right_paddle.rect()) {
            ball.x = self.right_paddle.rect().left() - BALL_SIZE;
            ball.vx = -ball.vx;
            let offset = ball.center_y() - self.right_paddle.center_y();
            ball.vy += offset * SPIN_FACTOR;
        }

        // A point is scored once the ball is fully past a side
        let point = if ball.x + BALL_SIZE < 0.0 {
            Some(Point::Cpu)
        } else if ball.x > self.width {
            Some(Point::Player)
        } else {
            None
        };

        if point.is_some() {
            self.reset_ball();
        }

        self.ai_move();

        point
    }

    /// Re-center the ball with a fresh random launch velocity.
    pub fn reset_ball(&mut self) {
        self.ball = Ball::launch(self.width, self.height, &mut rand::thread_rng());
    }

    // The AI chases the ball's vertical center, capped per tick and clamped
    // to the field.
    fn ai_move(&mut self) {
        let target = self.ball.center_y() - PADDLE_HEIGHT / 2.0;
        let delta = target - self.right_paddle.y;
        self.right_paddle.y += delta.clamp(-PADDLE_SPEED, PADDLE_SPEED);
        self.right_paddle.y = self.right_paddle.y.clamp(0.0, self.height - PADDLE_HEIGHT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{LAUNCH_SPEED, PADDLE_OFFSET, PADDLE_WIDTH};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const W: f32 = 600.0;
    const H: f32 = 400.0;

    fn game() -> Game {
        Game::new(W, H)
    }

    fn place_ball(game: &mut Game, x: f32, y: f32, vx: f32, vy: f32) {
        game.ball = Ball { x, y, vx, vy };
    }

    fn assert_centered(ball: &Ball) {
        assert_eq!(ball.x, W / 2.0 - BALL_SIZE / 2.0);
        assert_eq!(ball.y, H / 2.0 - BALL_SIZE / 2.0);
    }

    #[test]
    fn test_top_wall_bounce_clamps_and_inverts() {
        let mut g = game();
        place_ball(&mut g, 300.0, 2.0, 0.0, -5.0);

        g.update();

        assert_eq!(g.ball.y, 0.0);
        assert_eq!(g.ball.vy, 5.0);
    }

    #[test]
    fn test_bottom_wall_bounce_clamps_and_inverts() {
        let mut g = game();
        place_ball(&mut g, 300.0, H - BALL_SIZE - 2.0, 0.0, 5.0);

        g.update();

        assert_eq!(g.ball.y, H - BALL_SIZE);
        assert_eq!(g.ball.vy, -5.0);
    }

    #[test]
    fn test_left_paddle_reflects_and_spins() {
        let mut g = game();
        // Default left paddle spans y 160..240, center 200
        place_ball(&mut g, 35.0, 190.0, -5.0, -2.0);

        g.update();

        // Snapped to the paddle's outer edge, horizontal reversed
        assert_eq!(g.ball.x, PADDLE_OFFSET + PADDLE_WIDTH);
        assert_eq!(g.ball.vx, 5.0);
        // Contact offset: ball center 195 vs paddle center 200
        let expected_vy = -2.0 + (195.0 - 200.0) * SPIN_FACTOR;
        assert!((g.ball.vy - expected_vy).abs() < 1e-4);
    }

    #[test]
    fn test_right_paddle_reflects_and_spins() {
        let mut g = game();
        place_ball(&mut g, 550.0, 180.0, 5.0, 0.0);

        g.update();

        assert_eq!(g.ball.x, W - PADDLE_OFFSET - PADDLE_WIDTH - BALL_SIZE);
        assert_eq!(g.ball.vx, -5.0);
        let expected_vy = 0.0 + (187.0 - 200.0) * SPIN_FACTOR;
        assert!((g.ball.vy - expected_vy).abs() < 1e-4);
    }

    #[test]
    fn test_center_hit_adds_no_spin() {
        let mut g = game();
        // After integration the ball center sits exactly on the paddle center
        place_ball(&mut g, 35.0, 193.0, -5.0, 0.0);

        g.update();

        assert_eq!(g.ball.vy, 0.0);
        assert_eq!(g.ball.vx, 5.0);
    }

    #[test]
    fn test_cpu_scores_when_ball_exits_left() {
        let mut g = game();
        place_ball(&mut g, -10.0, 200.0, -5.0, 0.0);

        let point = g.update();

        assert_eq!(point, Some(Point::Cpu));
        assert_centered(&g.ball);
        assert_eq!(g.ball.vx.abs(), LAUNCH_SPEED);
        assert!(g.ball.vy.abs() >= 2.0 && g.ball.vy.abs() < 6.0);
    }

    #[test]
    fn test_player_scores_when_ball_exits_right() {
        let mut g = game();
        place_ball(&mut g, 598.0, 200.0, 5.0, 0.0);

        let point = g.update();

        assert_eq!(point, Some(Point::Player));
        assert_centered(&g.ball);
        assert_eq!(g.ball.vx.abs(), LAUNCH_SPEED);
    }

    #[test]
    fn test_no_point_before_ball_fully_out() {
        let mut g = game();
        // Trailing edge still inside: -10 + 14 = 4 > 0 after integration
        place_ball(&mut g, -5.0, 200.0, -5.0, 0.0);

        assert_eq!(g.update(), None);
    }

    #[test]
    fn test_ai_moves_at_most_paddle_speed_toward_distant_ball() {
        let mut g = game();
        place_ball(&mut g, 300.0, 0.0, 0.0, 0.0);
        g.right_paddle.y = H - PADDLE_HEIGHT;

        g.update();

        assert_eq!(g.right_paddle.y, H - PADDLE_HEIGHT - PADDLE_SPEED);
    }

    #[test]
    fn test_ai_clamps_to_field_bottom() {
        let mut g = game();
        place_ball(&mut g, 300.0, H - BALL_SIZE, 0.0, 0.0);
        g.right_paddle.y = H - PADDLE_HEIGHT - 3.0;

        g.update();

        assert_eq!(g.right_paddle.y, H - PADDLE_HEIGHT);
    }

    #[test]
    fn test_ai_settles_on_near_target() {
        let mut g = game();
        // Ball center 200, target 160, paddle already at 158
        place_ball(&mut g, 300.0, 193.0, 0.0, 0.0);
        g.right_paddle.y = 158.0;

        g.update();

        assert_eq!(g.right_paddle.y, 160.0);
    }

    #[test]
    fn test_intercept_never_tunnels() {
        let mut g = game();
        place_ball(&mut g, W / 2.0 - BALL_SIZE / 2.0, 200.0, -5.0, 0.0);

        let mut flipped = false;
        for _ in 0..200 {
            g.track_pointer(g.ball.center_y());
            g.update();
            // The ball must never end a tick fully behind the paddle face
            assert!(g.ball.x + BALL_SIZE > g.left_paddle.rect().left());
            if g.ball.vx > 0.0 {
                assert_eq!(g.ball.x, g.left_paddle.rect().right());
                flipped = true;
                break;
            }
        }
        assert!(flipped, "paddle never intercepted the ball");
    }

    proptest! {
        #[test]
        fn prop_wall_bounce_restores_bounds(y in -200.0f32..600.0, vy in -8.0f32..8.0) {
            let mut g = game();
            place_ball(&mut g, 300.0, y, 0.0, vy);

            g.update();

            prop_assert!(g.ball.y >= 0.0);
            prop_assert!(g.ball.y + BALL_SIZE <= H);

            // Exactly one inversion when the integrated position was out of
            // range, none otherwise
            let integrated = y + vy;
            let expected_vy = if integrated <= 0.0 || integrated + BALL_SIZE >= H {
                -vy
            } else {
                vy
            };
            prop_assert_eq!(g.ball.vy, expected_vy);
        }

        #[test]
        fn prop_pointer_tracking_always_in_bounds(pointer in -1e4f32..1e4) {
            let mut g = game();

            g.track_pointer(pointer);

            prop_assert!(g.left_paddle.y >= 0.0);
            prop_assert!(g.left_paddle.y <= H - PADDLE_HEIGHT);

            // Idempotent: feeding the same pointer again changes nothing
            let once = g.left_paddle.y;
            g.track_pointer(pointer);
            prop_assert_eq!(g.left_paddle.y, once);
        }

        #[test]
        fn prop_ai_never_exceeds_speed_cap(
            ball_y in 0.0f32..(H - BALL_SIZE),
            paddle_y in 0.0f32..(H - PADDLE_HEIGHT),
        ) {
            let mut g = game();
            place_ball(&mut g, 300.0, ball_y, 0.0, 0.0);
            g.right_paddle.y = paddle_y;

            g.update();

            prop_assert!((g.right_paddle.y - paddle_y).abs() <= PADDLE_SPEED + 1e-3);
            prop_assert!(g.right_paddle.y >= 0.0);
            prop_assert!(g.right_paddle.y <= H - PADDLE_HEIGHT);
        }

        #[test]
        fn prop_launch_speed_is_fixed_horizontal_bounded_vertical(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);

            let ball = Ball::launch(W, H, &mut rng);

            prop_assert_eq!(ball.vx.abs(), LAUNCH_SPEED);
            prop_assert!(ball.vy.abs() >= 2.0 && ball.vy.abs() < 6.0);
            prop_assert_eq!(ball.x, W / 2.0 - BALL_SIZE / 2.0);
            prop_assert_eq!(ball.y, H / 2.0 - BALL_SIZE / 2.0);
        }

        #[test]
        fn prop_no_point_while_ball_mid_field(
            x in 60.0f32..530.0,
            y in 20.0f32..(H - BALL_SIZE - 20.0),
            vx in -5.0f32..5.0,
            vy in -5.0f32..5.0,
        ) {
            let mut g = game();
            place_ball(&mut g, x, y, vx, vy);

            prop_assert!(g.update().is_none());
        }
    }
}
