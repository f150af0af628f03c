use crate::game::Game;
use crate::geometry::Rect;
use crate::renderer::{Input, Renderer};
use crate::session::{Phase, Scores, Sound, SoundSink};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Field pixels covered by one two-character terminal cell.
pub const CELL_SIZE: f32 = 20.0;

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(10);

pub struct CliRenderer {
    last_render: Instant,
    target_frame_time: Duration,
    // Rows drawn by the last render; the HUD sits below them
    grid_rows: i32,
}

impl CliRenderer {
    pub fn new() -> Self {
        // Target 30 FPS for smooth rendering; backdate the last render so
        // the startup frame is never skipped
        let target_frame_time = Duration::from_millis(33);
        Self {
            last_render: Instant::now() - target_frame_time,
            target_frame_time,
            grid_rows: 0,
        }
    }

    fn cell_rect(col: i32, row: i32) -> Rect {
        Rect::new(
            col as f32 * CELL_SIZE,
            row as f32 * CELL_SIZE,
            CELL_SIZE,
            CELL_SIZE,
        )
    }

    /// Score line and controls drawn below the field.
    pub fn render_hud(&mut self, scores: &Scores, phase: Phase) -> io::Result<()> {
        let mut stdout = io::stdout();
        let hud_row = self.grid_rows as u16 + 1;

        queue!(
            stdout,
            cursor::MoveTo(0, hud_row),
            ResetColor,
            Print(format!(
                "Player: {}  CPU: {}  Level: {}   ",
                scores.player, scores.cpu, scores.level
            ))
        )?;

        queue!(
            stdout,
            cursor::MoveTo(0, hud_row + 1),
            Print("Controls: Mouse to move | S: Start | E: End | R: Reset | Q: Quit")
        )?;

        queue!(stdout, cursor::MoveTo(0, hud_row + 2))?;
        match phase {
            Phase::Idle => {
                queue!(
                    stdout,
                    SetForegroundColor(Color::Green),
                    Print("Press S to start"),
                    ResetColor
                )?;
            }
            Phase::Running => {
                queue!(stdout, Print("                "))?;
            }
        }

        stdout.flush()?;
        Ok(())
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            EnableMouseCapture
        )?;
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }
        self.last_render = Instant::now();

        let cols = (game.width / CELL_SIZE).ceil() as i32;
        let rows = (game.height / CELL_SIZE).ceil() as i32;
        self.grid_rows = rows;

        let ball = game.ball.bounds();
        let left = game.left_paddle.rect();
        let right = game.right_paddle.rect();
        let center_x = game.width / 2.0;

        let mut stdout = io::stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        for row in 0..rows {
            for col in 0..cols {
                let cell = Self::cell_rect(col, row);

                if cell.intersects(&ball) {
                    queue!(
                        stdout,
                        SetBackgroundColor(Color::Black),
                        SetForegroundColor(Color::White),
                        Print("()"),
                        ResetColor
                    )?;
                } else if cell.intersects(&left) {
                    queue!(stdout, SetBackgroundColor(Color::Yellow), Print("  "))?;
                } else if cell.intersects(&right) {
                    queue!(stdout, SetBackgroundColor(Color::Cyan), Print("  "))?;
                } else if cell.left() <= center_x && center_x < cell.right() && row % 2 == 0 {
                    // Dashed center line: every other row
                    queue!(
                        stdout,
                        SetBackgroundColor(Color::Black),
                        SetForegroundColor(Color::DarkGrey),
                        Print("| "),
                        ResetColor
                    )?;
                } else {
                    queue!(stdout, SetBackgroundColor(Color::Black), Print("  "))?;
                }
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if event::poll(INPUT_POLL_TIMEOUT)? {
            match event::read()? {
                Event::Key(KeyEvent { code, .. }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(Some(Input::Quit)),
                    KeyCode::Char('s') | KeyCode::Char('S') => return Ok(Some(Input::Start)),
                    KeyCode::Char('e') | KeyCode::Char('E') => return Ok(Some(Input::End)),
                    KeyCode::Char('r') | KeyCode::Char('R') => return Ok(Some(Input::Reset)),
                    _ => {}
                },
                Event::Mouse(MouseEvent { kind, row, .. }) => {
                    if matches!(kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
                        // Center of the hovered cell, in field pixels
                        let y = (row as f32 + 0.5) * CELL_SIZE;
                        return Ok(Some(Input::PointerMove(y)));
                    }
                }
                _ => {}
            }
        }
        Ok(None)
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Terminal bell as the sound sink; the terminal offers nothing richer.
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play(&mut self, _sound: Sound) {
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}
