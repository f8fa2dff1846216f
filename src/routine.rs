use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::moves::{Direction, Move};

/// An ordered list of moves, executed front to back with no branching.
///
/// Built once at startup, either from [`Routine::showtime`] or from JSON,
/// and consumed by a [`crate::sequencer::Sequencer`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Routine {
    moves: Vec<Move>,
}

impl Routine {
    pub fn new(moves: Vec<Move>) -> Self {
        Self { moves }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn total_duration(&self) -> Duration {
        self.moves.iter().map(|mv| mv.duration).sum()
    }

    /// Resolves an absolute offset into the whole routine to the responsible
    /// move's local time and samples it. `None` outside the routine.
    ///
    /// Preview/inspection API; live playback goes through the sequencer,
    /// which keeps a per-move tick counter instead.
    pub fn sample(&self, t: Duration) -> Option<Command> {
        if t > self.total_duration() {
            return None;
        }
        let mut accumulated = Duration::ZERO;
        self.moves
            .iter()
            .find(|mv| {
                if accumulated + mv.duration >= t {
                    true
                } else {
                    accumulated += mv.duration;
                    false
                }
            })
            .map(|mv| mv.sample(t - accumulated))
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The full show: warm-up, two sway/twist verses, a travelling bridge,
    /// and a running-hop finale.
    pub fn showtime() -> Self {
        let secs = Duration::from_secs;
        Self::new(vec![
            // Opening: light hops and nods
            Move::vertical_hop(secs(3)),
            Move::body_nod(secs(2)),
            // Build-up: sways and twists
            Move::body_sway(secs(4)),
            Move::body_twist(secs(4)),
            // First climax: fast shake and circling
            Move::body_shake(secs(3)),
            Move::circle_move(secs(4)),
            // Reprise
            Move::vertical_hop(secs(3)),
            Move::body_nod(secs(2)),
            Move::body_sway(secs(4)),
            Move::body_twist(secs(4)),
            // Travelling bridge
            Move::forward_back(secs(4)),
            Move::side_step(secs(3), Direction::Right),
            Move::side_step(secs(3), Direction::Left),
            // Second climax and finale
            Move::body_shake(secs(3)),
            Move::circle_move(secs(4)),
            Move::running_hop(secs(5)),
        ])
    }
}
