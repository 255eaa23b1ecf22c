//! # langton_engine
//!
//! The core engine for multi-agent [Langton's Ant](https://en.wikipedia.org/wiki/Langton%27s_ant)
//! simulations: agents follow per-color turning and painting rules on a
//! toroidal grid, stepped in a fixed order against a snapshot of the grid.

pub mod simulation;
pub use simulation::AgentConfig;
pub use simulation::AgentState;
pub use simulation::ConfigError;
pub use simulation::Simulation;
pub use simulation::SimulationState;
pub use simulation::DEFAULT_GRID_SIZE;
pub use simulation::DEFAULT_INTERVAL_MS;
pub use simulation::MAX_INTERVAL_MS;
pub use simulation::MIN_INTERVAL_MS;

mod agent;
mod grid;
mod trace;

pub use agent::Direction;
pub use agent::Rule;
pub use agent::RuleTable;
pub use agent::Turn;
pub use grid::CellColor;
pub use grid::Grid;
pub use grid::BACKGROUND;
