//! Projection engine: turns a return series and a plan into a trajectory

mod state;
mod engine;
mod trajectory;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, ProjectionConfig};
pub use trajectory::{ProjectionSummary, Trajectory, TrajectoryRow};
