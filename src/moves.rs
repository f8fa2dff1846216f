use core::f64::consts::TAU;
use core::time::Duration;

use serde::{Deserialize, Serialize};
use uom::si::f64::Frequency;
use uom::si::frequency::hertz;

use crate::command::Command;

// Reference amplitudes (m or rad) and frequencies tuned on the robot.
const SHAKE_AMPLITUDE: f64 = 0.4;
const SHAKE_FREQUENCY_HZ: f64 = 4.0;
const HOP_AMPLITUDE: f64 = 0.06;
const HOP_FREQUENCY_HZ: f64 = 2.0;
const TWIST_AMPLITUDE: f64 = 0.5;
const TWIST_FREQUENCY_HZ: f64 = 0.5;
const FORWARD_BACK_AMPLITUDE: f64 = 0.05;
const FORWARD_BACK_FREQUENCY_HZ: f64 = 1.0;
const SIDE_STEP_AMPLITUDE: f64 = 0.04;
const SIDE_STEP_FREQUENCY_HZ: f64 = 1.0;
const RUN_BASE_SPEED: f64 = 0.08;
const RUN_HOP_AMPLITUDE: f64 = 0.06;
const RUN_HOP_FREQUENCY_HZ: f64 = 6.0;
const SWAY_AMPLITUDE_X: f64 = 0.04;
const SWAY_AMPLITUDE_Y: f64 = 0.03;
const SWAY_FREQUENCY_HZ: f64 = 1.0;
const NOD_AMPLITUDE: f64 = 0.35;
const NOD_FREQUENCY_HZ: f64 = 2.0;
const CIRCLE_YAW_RATE: f64 = 0.6;
const CIRCLE_SIDE_DRIFT: f64 = 0.02;

/// Lateral direction for moves that step sideways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Direction::Right => 1.0,
            Direction::Left => -1.0,
        }
    }
}

/// A dance move's waveform, carrying its own parameters.
///
/// Each kind drives a fixed subset of the command's six fields with a
/// closed-form function of the time since the move started. Hop-style kinds
/// rectify the sine so the body pushes up and settles back instead of
/// oscillating below neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Fast roll oscillation (angular.x).
    BodyShake { amplitude: f64, frequency: Frequency },
    /// Rectified bounce on the spot (linear.z).
    VerticalHop { amplitude: f64, frequency: Frequency },
    /// Slow yaw oscillation (angular.z).
    BodyTwist { amplitude: f64, frequency: Frequency },
    /// Fore/aft oscillation (linear.x).
    ForwardBack { amplitude: f64, frequency: Frequency },
    /// Lateral oscillation (linear.y), signed by `direction`.
    SideStep {
        amplitude: f64,
        frequency: Frequency,
        direction: Direction,
    },
    /// Constant forward speed with a rectified hop on top.
    RunningHop {
        base_speed: f64,
        hop_amplitude: f64,
        hop_frequency: Frequency,
    },
    /// Elliptical sway in the XY plane.
    BodySway {
        amplitude_x: f64,
        amplitude_y: f64,
        frequency: Frequency,
    },
    /// Pitch oscillation (angular.y).
    BodyNod { amplitude: f64, frequency: Frequency },
    /// Constant turn in place with a small side drift.
    CircleMove { yaw_rate: f64, side_drift: f64 },
}

fn phase(frequency: Frequency, t: Duration) -> f64 {
    TAU * frequency.get::<hertz>() * t.as_secs_f64()
}

impl MoveKind {
    /// Samples the waveform at `t` seconds into the move.
    ///
    /// Pure and total over t >= 0: the same `(kind, t)` always yields the
    /// same command, and every driven field stays within its amplitude.
    pub fn sample(&self, t: Duration) -> Command {
        let mut command = Command::zero();
        match *self {
            MoveKind::BodyShake {
                amplitude,
                frequency,
            } => {
                command.angular.x = amplitude * phase(frequency, t).sin();
            }
            MoveKind::VerticalHop {
                amplitude,
                frequency,
            } => {
                command.linear.z = amplitude * phase(frequency, t).sin().abs();
            }
            MoveKind::BodyTwist {
                amplitude,
                frequency,
            } => {
                command.angular.z = amplitude * phase(frequency, t).sin();
            }
            MoveKind::ForwardBack {
                amplitude,
                frequency,
            } => {
                command.linear.x = amplitude * phase(frequency, t).sin();
            }
            MoveKind::SideStep {
                amplitude,
                frequency,
                direction,
            } => {
                command.linear.y = direction.sign() * amplitude * phase(frequency, t).sin();
            }
            MoveKind::RunningHop {
                base_speed,
                hop_amplitude,
                hop_frequency,
            } => {
                command.linear.x = base_speed;
                command.linear.z = hop_amplitude * phase(hop_frequency, t).sin().abs();
            }
            MoveKind::BodySway {
                amplitude_x,
                amplitude_y,
                frequency,
            } => {
                command.linear.x = amplitude_x * phase(frequency, t).sin();
                command.linear.y = amplitude_y * phase(frequency, t).cos();
            }
            MoveKind::BodyNod {
                amplitude,
                frequency,
            } => {
                command.angular.y = amplitude * phase(frequency, t).sin();
            }
            MoveKind::CircleMove {
                yaw_rate,
                side_drift,
            } => {
                command.angular.z = yaw_rate;
                command.linear.y = side_drift;
            }
        }
        command
    }
}

/// One named, parameterized, fixed-duration motion pattern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub kind: MoveKind,
    pub duration: Duration,
}

impl Move {
    pub fn new(kind: MoveKind, duration: Duration) -> Self {
        Self { kind, duration }
    }

    pub fn body_shake(duration: Duration) -> Self {
        Self::new(
            MoveKind::BodyShake {
                amplitude: SHAKE_AMPLITUDE,
                frequency: Frequency::new::<hertz>(SHAKE_FREQUENCY_HZ),
            },
            duration,
        )
    }

    pub fn vertical_hop(duration: Duration) -> Self {
        Self::new(
            MoveKind::VerticalHop {
                amplitude: HOP_AMPLITUDE,
                frequency: Frequency::new::<hertz>(HOP_FREQUENCY_HZ),
            },
            duration,
        )
    }

    pub fn body_twist(duration: Duration) -> Self {
        Self::new(
            MoveKind::BodyTwist {
                amplitude: TWIST_AMPLITUDE,
                frequency: Frequency::new::<hertz>(TWIST_FREQUENCY_HZ),
            },
            duration,
        )
    }

    pub fn forward_back(duration: Duration) -> Self {
        Self::new(
            MoveKind::ForwardBack {
                amplitude: FORWARD_BACK_AMPLITUDE,
                frequency: Frequency::new::<hertz>(FORWARD_BACK_FREQUENCY_HZ),
            },
            duration,
        )
    }

    pub fn side_step(duration: Duration, direction: Direction) -> Self {
        Self::new(
            MoveKind::SideStep {
                amplitude: SIDE_STEP_AMPLITUDE,
                frequency: Frequency::new::<hertz>(SIDE_STEP_FREQUENCY_HZ),
                direction,
            },
            duration,
        )
    }

    pub fn running_hop(duration: Duration) -> Self {
        Self::new(
            MoveKind::RunningHop {
                base_speed: RUN_BASE_SPEED,
                hop_amplitude: RUN_HOP_AMPLITUDE,
                hop_frequency: Frequency::new::<hertz>(RUN_HOP_FREQUENCY_HZ),
            },
            duration,
        )
    }

    pub fn body_sway(duration: Duration) -> Self {
        Self::new(
            MoveKind::BodySway {
                amplitude_x: SWAY_AMPLITUDE_X,
                amplitude_y: SWAY_AMPLITUDE_Y,
                frequency: Frequency::new::<hertz>(SWAY_FREQUENCY_HZ),
            },
            duration,
        )
    }

    pub fn body_nod(duration: Duration) -> Self {
        Self::new(
            MoveKind::BodyNod {
                amplitude: NOD_AMPLITUDE,
                frequency: Frequency::new::<hertz>(NOD_FREQUENCY_HZ),
            },
            duration,
        )
    }

    pub fn circle_move(duration: Duration) -> Self {
        Self::new(
            MoveKind::CircleMove {
                yaw_rate: CIRCLE_YAW_RATE,
                side_drift: CIRCLE_SIDE_DRIFT,
            },
            duration,
        )
    }

    /// Samples this move `t` seconds after it started.
    pub fn sample(&self, t: Duration) -> Command {
        self.kind.sample(t)
    }

    /// Human-readable name, for the per-move log line.
    pub fn label(&self) -> &'static str {
        match self.kind {
            MoveKind::BodyShake { .. } => "Body Shake",
            MoveKind::VerticalHop { .. } => "Vertical Hop",
            MoveKind::BodyTwist { .. } => "Body Twist",
            MoveKind::ForwardBack { .. } => "Forward and Backward",
            MoveKind::SideStep {
                direction: Direction::Right,
                ..
            } => "Side Step Right",
            MoveKind::SideStep {
                direction: Direction::Left,
                ..
            } => "Side Step Left",
            MoveKind::RunningHop { .. } => "Running Hop",
            MoveKind::BodySway { .. } => "Body Sway",
            MoveKind::BodyNod { .. } => "Body Nod",
            MoveKind::CircleMove { .. } => "Circle Move",
        }
    }
}
