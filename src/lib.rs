//! Choreographed dance routines for the MORS quadruped.
//!
//! A [`Routine`] is an ordered list of fixed-duration [`Move`]s, each a pure
//! waveform over local elapsed time. A [`Sequencer`] plays a routine back as
//! a finite stream of [`Tick`]s at a fixed sample rate, always ending on a
//! neutral tick, and a [`DanceRunner`] drives that stream into the robot's
//! command and liveness channels bracketed by the stand-up and lie-down
//! service calls.

pub mod command;
pub mod console;
pub mod moves;
pub mod routine;
pub mod runner;
pub mod sequencer;

pub use command::Command;
pub use moves::{Direction, Move, MoveKind};
pub use routine::Routine;
pub use runner::{CommandSink, DanceRunner, LivenessSink, ModeService, ServiceError};
pub use sequencer::{Sequencer, ShutdownToken, Tick};
