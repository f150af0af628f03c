use crate::game::{Game, Point};
use crate::renderer::Input;

/// Fire-and-forget playback triggers exposed to the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Start,
    Success,
    Fail,
}

/// Score and level displays owned by the presentation layer. The core only
/// issues increments and resets; it never reads the counters back.
pub trait ScoreBoard {
    fn player_point(&mut self);
    fn cpu_point(&mut self);
    fn level_up(&mut self);
    fn reset(&mut self);
}

pub trait SoundSink {
    fn play(&mut self, sound: Sound);
}

/// Plain counters; the CLI frontend and tests use these directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct Scores {
    pub player: u32,
    pub cpu: u32,
    pub level: u32,
}

impl ScoreBoard for Scores {
    fn player_point(&mut self) {
        self.player += 1;
    }

    fn cpu_point(&mut self) {
        self.cpu += 1;
    }

    fn level_up(&mut self) {
        self.level += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
}

/// Ties the simulation to its presentation collaborators and gates ticking
/// on the start/end phase. Frontends decide *when* a tick happens (terminal
/// pacing, requestAnimationFrame); the session decides what one means.
pub struct Session<B: ScoreBoard, S: SoundSink> {
    pub game: Game,
    pub scores: B,
    pub sounds: S,
    phase: Phase,
}

impl<B: ScoreBoard, S: SoundSink> Session<B, S> {
    pub fn new(game: Game, scores: B, sounds: S) -> Self {
        Self {
            game,
            scores,
            sounds,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::PointerMove(y) => self.game.track_pointer(y),
            // Starting while already running must not stack a second loop
            Input::Start => {
                if self.phase == Phase::Idle {
                    self.sounds.play(Sound::Start);
                    self.phase = Phase::Running;
                }
            }
            Input::End => self.phase = Phase::Idle,
            Input::Reset => {
                self.scores.reset();
                self.game.reset_ball();
            }
            // Quit is a frontend concern
            Input::Quit => {}
        }
    }

    /// One tick: advance physics and route any point to the score board and
    /// sound sink. The level advances once per point, with no second update.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        match self.game.update() {
            Some(Point::Player) => {
                self.scores.player_point();
                self.sounds.play(Sound::Success);
                self.scores.level_up();
            }
            Some(Point::Cpu) => {
                self.scores.cpu_point();
                self.sounds.play(Sound::Fail);
                self.scores.level_up();
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Ball, BALL_SIZE};

    #[derive(Default)]
    struct SoundLog(Vec<Sound>);

    impl SoundSink for SoundLog {
        fn play(&mut self, sound: Sound) {
            self.0.push(sound);
        }
    }

    const W: f32 = 600.0;
    const H: f32 = 400.0;

    fn session() -> Session<Scores, SoundLog> {
        Session::new(Game::new(W, H), Scores::default(), SoundLog::default())
    }

    #[test]
    fn test_start_transitions_and_plays_sound_once() {
        let mut s = session();
        assert_eq!(s.phase(), Phase::Idle);

        s.handle_input(Input::Start);
        assert_eq!(s.phase(), Phase::Running);

        // Duplicate start is a no-op
        s.handle_input(Input::Start);
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.sounds.0, vec![Sound::Start]);
    }

    #[test]
    fn test_tick_is_a_noop_while_idle() {
        let mut s = session();
        let before = s.game.ball.x;

        s.tick();

        assert_eq!(s.game.ball.x, before);
    }

    #[test]
    fn test_end_freezes_the_simulation() {
        let mut s = session();
        s.handle_input(Input::Start);
        s.tick();

        s.handle_input(Input::End);
        let frozen = s.game.ball.x;
        s.tick();

        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.game.ball.x, frozen);
    }

    #[test]
    fn test_restart_after_end_resumes_ticking() {
        let mut s = session();
        s.handle_input(Input::Start);
        s.handle_input(Input::End);
        s.handle_input(Input::Start);

        let before = s.game.ball.x;
        s.tick();

        assert_ne!(s.game.ball.x, before);
        assert_eq!(s.sounds.0, vec![Sound::Start, Sound::Start]);
    }

    #[test]
    fn test_cpu_point_routes_score_sound_and_level() {
        let mut s = session();
        s.game.ball = Ball {
            x: -10.0,
            y: 200.0,
            vx: -5.0,
            vy: 0.0,
        };
        s.handle_input(Input::Start);

        s.tick();

        assert_eq!(s.scores.cpu, 1);
        assert_eq!(s.scores.player, 0);
        assert_eq!(s.scores.level, 1);
        assert_eq!(s.sounds.0, vec![Sound::Start, Sound::Fail]);
    }

    #[test]
    fn test_player_point_routes_score_sound_and_level() {
        let mut s = session();
        s.game.ball = Ball {
            x: W - 2.0,
            y: 200.0,
            vx: 5.0,
            vy: 0.0,
        };
        s.handle_input(Input::Start);

        s.tick();

        assert_eq!(s.scores.player, 1);
        assert_eq!(s.scores.cpu, 0);
        assert_eq!(s.scores.level, 1);
        assert_eq!(s.sounds.0, vec![Sound::Start, Sound::Success]);
    }

    #[test]
    fn test_reset_zeroes_scores_and_recenters_ball() {
        let mut s = session();
        s.scores = Scores {
            player: 3,
            cpu: 5,
            level: 8,
        };
        s.game.ball.x = 17.0;

        s.handle_input(Input::Reset);

        assert_eq!(s.scores.player, 0);
        assert_eq!(s.scores.cpu, 0);
        assert_eq!(s.scores.level, 0);
        assert_eq!(s.game.ball.x, W / 2.0 - BALL_SIZE / 2.0);
    }

    #[test]
    fn test_pointer_input_moves_player_paddle() {
        let mut s = session();

        s.handle_input(Input::PointerMove(100.0));

        assert_eq!(s.game.left_paddle.y, 60.0);
    }
}
