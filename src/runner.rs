use core::time::Duration;

use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};
use uom::si::f64::Frequency;

use crate::command::Command;
use crate::routine::Routine;
use crate::sequencer::{Sequencer, ShutdownToken};

/// `robot_action` code: stand up from the resting pose.
pub const ACTION_STAND_UP: i32 = 1;
/// `robot_action` code: return to the resting pose.
pub const ACTION_LIE_DOWN: i32 = 2;
/// `robot_mode` code: accept body pose/velocity commands.
pub const MODE_POSE_CONTROL: i32 = 2;

/// Pause after the setup calls so the robot settles before the first move.
const STABILIZATION_PAUSE: Duration = Duration::from_secs(2);
/// Pause after the neutral tick before asking the robot to lie down.
const SETTLE_PAUSE: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("service rejected the request (result {0})")]
    Rejected(i32),
}

/// Outbound channel for per-tick commands. At-least-once and order
/// preserving; the transport may drop under backpressure, so no
/// acknowledgment is surfaced here.
pub trait CommandSink {
    fn publish(&mut self, command: &Command);
}

/// Parallel boolean channel: `true` while a move is active, `false` once the
/// routine has returned to neutral.
pub trait LivenessSink {
    fn publish(&mut self, alive: bool);
}

/// Synchronous mode/action service on the robot platform.
pub trait ModeService {
    fn set_mode(&mut self, mode: i32) -> Result<i32, ServiceError>;
    fn set_action(&mut self, action: i32) -> Result<i32, ServiceError>;
}

/// Drives a routine against the injected boundary collaborators.
///
/// One cooperative task: stand up, settle, tick the sequencer at the sample
/// rate, then settle again and lie down. The teardown half runs on normal
/// completion and on shutdown alike, since the sequencer always ends with
/// the terminal neutral tick.
pub struct DanceRunner<C, L, M> {
    commands: C,
    liveness: L,
    mode: M,
    sample_rate: Frequency,
    shutdown: ShutdownToken,
}

impl<C, L, M> DanceRunner<C, L, M>
where
    C: CommandSink,
    L: LivenessSink,
    M: ModeService,
{
    pub fn new(
        commands: C,
        liveness: L,
        mode: M,
        sample_rate: Frequency,
        shutdown: ShutdownToken,
    ) -> Self {
        Self {
            commands,
            liveness,
            mode,
            sample_rate,
            shutdown,
        }
    }

    pub async fn run(mut self, routine: Routine) {
        self.set_action(ACTION_STAND_UP);
        self.set_mode(MODE_POSE_CONTROL);
        tokio::time::sleep(STABILIZATION_PAUSE).await;

        let mut sequencer =
            Sequencer::new(routine, self.sample_rate, self.shutdown.clone());
        let mut interval = tokio::time::interval(sequencer.tick_period());
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            let Some(tick) = sequencer.next() else { break };
            self.commands.publish(&tick.command);
            self.liveness.publish(tick.alive);
            if !tick.alive {
                break;
            }
        }
        info!("--- Dance Finished! ---");

        tokio::time::sleep(SETTLE_PAUSE).await;
        self.set_action(ACTION_LIE_DOWN);
    }

    // Service failures are logged and swallowed; the show and the final
    // lie-down call go ahead regardless.
    fn set_mode(&mut self, mode: i32) {
        if let Err(error) = self.mode.set_mode(mode) {
            warn!(%error, mode, "robot_mode call failed");
        }
    }

    fn set_action(&mut self, action: i32) {
        if let Err(error) = self.mode.set_action(action) {
            warn!(%error, action, "robot_action call failed");
        }
    }
}
