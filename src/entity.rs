use crate::geometry::Rect;
use rand::Rng;

// Paddle settings
pub const PADDLE_WIDTH: f32 = 12.0;
pub const PADDLE_HEIGHT: f32 = 80.0;
/// Horizontal inset of each paddle from its side of the field.
pub const PADDLE_OFFSET: f32 = 20.0;

// Ball settings
pub const BALL_SIZE: f32 = 14.0;
/// Horizontal launch speed, identical for serves and point resets.
pub const LAUNCH_SPEED: f32 = 5.0;
/// Vertical speed of the opening serve.
pub const SERVE_SPEED_Y: f32 = 4.0;

/// The ball: top-left corner of its bounding box plus a signed velocity.
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Ball {
    /// Opening serve: centered, fixed vertical speed, both directions random.
    pub fn serve(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Self {
            x: width / 2.0 - BALL_SIZE / 2.0,
            y: height / 2.0 - BALL_SIZE / 2.0,
            vx: LAUNCH_SPEED * random_sign(rng),
            vy: SERVE_SPEED_Y * random_sign(rng),
        }
    }

    /// Relaunch after a point: centered, vertical speed drawn from [2, 6),
    /// both directions random.
    pub fn launch(width: f32, height: f32, rng: &mut impl Rng) -> Self {
        Self {
            x: width / 2.0 - BALL_SIZE / 2.0,
            y: height / 2.0 - BALL_SIZE / 2.0,
            vx: LAUNCH_SPEED * random_sign(rng),
            vy: rng.gen_range(2.0..6.0) * random_sign(rng),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, BALL_SIZE, BALL_SIZE)
    }

    pub fn center_y(&self) -> f32 {
        self.y + BALL_SIZE / 2.0
    }
}

fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.gen_bool(0.5) {
        1.0
    } else {
        -1.0
    }
}

/// A paddle: fixed left edge per side, mutable top edge.
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
}

impl Paddle {
    pub fn left_side(height: f32) -> Self {
        Self {
            x: PADDLE_OFFSET,
            y: (height - PADDLE_HEIGHT) / 2.0,
        }
    }

    pub fn right_side(width: f32, height: f32) -> Self {
        Self {
            x: width - PADDLE_OFFSET - PADDLE_WIDTH,
            y: (height - PADDLE_HEIGHT) / 2.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    pub fn center_y(&self) -> f32 {
        self.y + PADDLE_HEIGHT / 2.0
    }
}
