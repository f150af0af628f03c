#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    native::run()
}

// The cdylib entry point for the web build lives in volley::web_main; this
// binary only exists for native targets.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use crossterm::terminal;
    use std::io;
    use std::time::{Duration, Instant};
    use volley::cli_renderer::{TerminalBell, CELL_SIZE};
    use volley::{CliRenderer, Game, Input, Renderer, Scores, Session};

    // Simulation tick rate; one tick is one frame of ball motion
    const TICK_RATE: Duration = Duration::from_millis(33);

    pub fn run() -> io::Result<()> {
        // Get terminal size and calculate field dimensions
        let (term_width, term_height) = terminal::size()?;

        // Account for:
        // - Each cell is 2 chars wide, so columns = term_width / 2
        // - Reserve 4 lines at bottom for the HUD
        // - Minimum size that keeps the paddles and ball playable
        let width = ((term_width / 2) as f32 * CELL_SIZE).max(400.0);
        let height = (term_height.saturating_sub(4) as f32 * CELL_SIZE).max(240.0);

        let mut session = Session::new(Game::new(width, height), Scores::default(), TerminalBell);
        let mut renderer = CliRenderer::new();

        renderer.init()?;

        // The field is visible before the first start
        renderer.render(&session.game)?;

        let mut last_tick = Instant::now();

        loop {
            if let Some(input) = renderer.poll_input()? {
                if input == Input::Quit {
                    break;
                }
                session.handle_input(input);
            }

            // Advance the simulation at a fixed rate
            if last_tick.elapsed() >= TICK_RATE {
                session.tick();
                last_tick = Instant::now();
            }

            // Let the renderer decide when to actually redraw
            renderer.render(&session.game)?;
            renderer.render_hud(&session.scores, session.phase())?;
        }

        renderer.cleanup()?;
        Ok(())
    }
}
