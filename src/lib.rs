pub mod entity;
pub mod game;
pub mod geometry;
pub mod renderer;
pub mod session;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli_renderer;
#[cfg(target_arch = "wasm32")]
pub mod web_main;
#[cfg(target_arch = "wasm32")]
pub mod web_renderer;

pub use entity::{Ball, Paddle};
pub use game::{Game, Point};
pub use geometry::Rect;
pub use renderer::{Input, Renderer};
pub use session::{Phase, ScoreBoard, Scores, Session, Sound, SoundSink};

#[cfg(not(target_arch = "wasm32"))]
pub use cli_renderer::CliRenderer;
#[cfg(target_arch = "wasm32")]
pub use web_renderer::WebRenderer;
