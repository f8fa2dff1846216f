//! Console implementations of the boundary seams, for running a routine
//! without the robot bridge: commands become JSON lines, liveness and mode
//! calls become log lines.

use std::io::{self, Write};

use tracing::{debug, info, warn};

use crate::command::Command;
use crate::runner::{CommandSink, LivenessSink, ModeService, ServiceError};

/// Writes one JSON line per command.
pub struct ConsoleCommandSink<W> {
    out: W,
}

impl ConsoleCommandSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleCommandSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandSink for ConsoleCommandSink<W> {
    fn publish(&mut self, command: &Command) {
        // The channel is at-least-once with no acknowledgment; a dropped
        // line is logged and forgotten.
        let result = serde_json::to_writer(&mut self.out, command)
            .map_err(io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(error) = result {
            warn!(%error, "dropped a command line");
        }
    }
}

/// Logs liveness transitions instead of echoing every tick.
#[derive(Default)]
pub struct ConsoleLivenessSink {
    last: Option<bool>,
}

impl LivenessSink for ConsoleLivenessSink {
    fn publish(&mut self, alive: bool) {
        if self.last != Some(alive) {
            debug!(alive, "liveness changed");
            self.last = Some(alive);
        }
    }
}

/// Announces mode/action requests and reports success.
#[derive(Default)]
pub struct ConsoleModeService;

impl ModeService for ConsoleModeService {
    fn set_mode(&mut self, mode: i32) -> Result<i32, ServiceError> {
        info!(mode, "robot_mode");
        Ok(0)
    }

    fn set_action(&mut self, action: i32) -> Result<i32, ServiceError> {
        info!(action, "robot_action");
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use core::time::Duration;

    #[test]
    fn command_sink_emits_one_parseable_line_per_tick() {
        let mut sink = ConsoleCommandSink::new(Vec::new());
        let hop = Move::vertical_hop(Duration::from_secs(1));
        sink.publish(&hop.sample(Duration::from_millis(125)));
        sink.publish(&Command::zero());

        let written = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: Command = serde_json::from_str(lines[0]).unwrap();
        assert!(first.linear.z > 0.0);
        let second: Command = serde_json::from_str(lines[1]).unwrap();
        assert!(second.is_zero());
    }

    #[test]
    fn mode_service_always_reports_success() {
        let mut service = ConsoleModeService;
        assert_eq!(service.set_mode(2).unwrap(), 0);
        assert_eq!(service.set_action(1).unwrap(), 0);
    }
}
