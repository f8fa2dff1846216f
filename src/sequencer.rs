use core::time::Duration;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;
use uom::si::f64::Frequency;
use uom::si::frequency::hertz;

use crate::command::Command;
use crate::moves::Move;
use crate::routine::Routine;

/// Cooperative shutdown flag, cloneable across the signal listener and the
/// sequencer.
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken(Arc<AtomicBool>);

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One sample/emit event: the command to publish and the liveness flag that
/// accompanies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub command: Command,
    pub alive: bool,
}

impl Tick {
    /// The terminal tick: neutral command, not alive.
    pub fn terminal() -> Self {
        Self {
            command: Command::zero(),
            alive: false,
        }
    }
}

/// Plays a routine back as a finite sequence of ticks.
///
/// Each move gets a local tick counter: tick k samples the move at
/// t = k / sample_rate, so a move emits ceil(duration * sample_rate) ticks
/// and no state carries over between moves. After the last move (or as soon
/// as shutdown is requested) exactly one terminal tick is emitted, then the
/// iterator is exhausted for good; replaying requires a fresh sequencer.
pub struct Sequencer {
    moves: Vec<Move>,
    rate_hz: f64,
    current: usize,
    ticks_into_move: u64,
    finished: bool,
    shutdown: ShutdownToken,
}

impl Sequencer {
    pub fn new(routine: Routine, sample_rate: Frequency, shutdown: ShutdownToken) -> Self {
        Self {
            moves: routine.into_moves(),
            rate_hz: sample_rate.get::<hertz>(),
            current: 0,
            ticks_into_move: 0,
            finished: false,
            shutdown,
        }
    }

    /// The fixed interval between ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.rate_hz)
    }

    fn local_time(&self) -> Duration {
        Duration::from_secs_f64(self.ticks_into_move as f64 / self.rate_hz)
    }
}

impl Iterator for Sequencer {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.finished {
            return None;
        }
        if !self.shutdown.is_requested() {
            while let Some(mv) = self.moves.get(self.current) {
                let t = self.local_time();
                if t < mv.duration {
                    if self.ticks_into_move == 0 {
                        info!("Dance move: {}", mv.label());
                    }
                    self.ticks_into_move += 1;
                    return Some(Tick {
                        command: mv.sample(t),
                        alive: true,
                    });
                }
                self.current += 1;
                self.ticks_into_move = 0;
            }
        }
        self.finished = true;
        Some(Tick::terminal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Direction;
    use core::f64::consts::TAU;

    const EPS: f64 = 1e-12;

    fn hz(rate: f64) -> Frequency {
        Frequency::new::<hertz>(rate)
    }

    fn secs(t: f64) -> Duration {
        Duration::from_secs_f64(t)
    }

    #[test]
    fn one_second_hop_at_ten_hertz_emits_ten_ticks() {
        let routine = Routine::new(vec![Move::vertical_hop(secs(1.0))]);
        let ticks: Vec<Tick> =
            Sequencer::new(routine, hz(10.0), ShutdownToken::new()).collect();

        assert_eq!(ticks.len(), 11);
        for (i, tick) in ticks[..10].iter().enumerate() {
            let t = i as f64 / 10.0;
            let expected = 0.06 * (TAU * 2.0 * t).sin().abs();
            assert!(tick.alive);
            assert!((tick.command.linear.z - expected).abs() < EPS, "tick {i}");
        }
        assert_eq!(ticks[10], Tick::terminal());
    }

    #[test]
    fn tick_count_is_ceil_of_duration_times_rate() {
        // 0.25 s at 10 Hz rounds up to 3 ticks per move
        let routine = Routine::new(vec![
            Move::body_nod(secs(0.25)),
            Move::body_twist(secs(0.25)),
        ]);
        let ticks: Vec<Tick> =
            Sequencer::new(routine, hz(10.0), ShutdownToken::new()).collect();
        assert_eq!(ticks.len(), 3 + 3 + 1);
        assert!(ticks[..6].iter().all(|tick| tick.alive));
    }

    #[test]
    fn zero_duration_move_emits_no_ticks() {
        let routine = Routine::new(vec![
            Move::body_shake(Duration::ZERO),
            Move::circle_move(secs(0.2)),
        ]);
        let ticks: Vec<Tick> =
            Sequencer::new(routine, hz(10.0), ShutdownToken::new()).collect();
        // only the circle move's 2 ticks plus the terminal one
        assert_eq!(ticks.len(), 3);
        assert_eq!(ticks[0].command.angular.z, 0.6);
    }

    #[test]
    fn each_move_restarts_from_its_own_time_origin() {
        let routine = Routine::new(vec![
            Move::forward_back(secs(0.3)),
            Move::side_step(secs(0.3), Direction::Left),
        ]);
        let ticks: Vec<Tick> =
            Sequencer::new(routine, hz(10.0), ShutdownToken::new()).collect();
        // first tick of the second move is sampled at its own t = 0
        assert!((ticks[3].command.linear.y - 0.0).abs() < EPS);
        assert_eq!(ticks[3].command.linear.x, 0.0);
    }

    #[test]
    fn empty_routine_emits_exactly_one_terminal_tick() {
        let ticks: Vec<Tick> =
            Sequencer::new(Routine::default(), hz(100.0), ShutdownToken::new()).collect();
        assert_eq!(ticks, vec![Tick::terminal()]);
    }

    #[test]
    fn shutdown_mid_move_cuts_straight_to_the_terminal_tick() {
        let token = ShutdownToken::new();
        let routine = Routine::new(vec![
            Move::body_sway(secs(1.0)),
            Move::running_hop(secs(1.0)),
        ]);
        let mut sequencer = Sequencer::new(routine, hz(10.0), token.clone());

        for _ in 0..4 {
            assert!(sequencer.next().unwrap().alive);
        }
        token.request();
        assert_eq!(sequencer.next(), Some(Tick::terminal()));
        assert_eq!(sequencer.next(), None);
    }

    #[test]
    fn shutdown_before_the_first_tick_still_returns_to_neutral() {
        let token = ShutdownToken::new();
        token.request();
        let routine = Routine::new(vec![Move::vertical_hop(secs(5.0))]);
        let ticks: Vec<Tick> = Sequencer::new(routine, hz(100.0), token).collect();
        assert_eq!(ticks, vec![Tick::terminal()]);
    }

    #[test]
    fn exhausted_sequencer_stays_exhausted() {
        let mut sequencer =
            Sequencer::new(Routine::default(), hz(100.0), ShutdownToken::new());
        assert!(sequencer.next().is_some());
        assert_eq!(sequencer.next(), None);
        assert_eq!(sequencer.next(), None);
    }
}
