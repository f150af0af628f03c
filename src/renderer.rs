use crate::game::Game;
use std::io;

/// Surface-level events delivered by a frontend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Pointer or touch moved to this surface-relative vertical position.
    PointerMove(f32),
    Start,
    End,
    Reset,
    Quit,
}

/// Trait that abstracts rendering implementation.
/// This allows for different rendering backends (CLI, Web, etc.)
pub trait Renderer {
    /// Initialize the renderer and wire up its input sources
    fn init(&mut self) -> io::Result<()>;

    /// Draw the current simulation state
    fn render(&mut self, game: &Game) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}
