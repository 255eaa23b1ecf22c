use crate::agent::{agent_color, Agent, Direction, RuleTable, Turn};
use crate::grid::Grid;
use crate::trace::{create_trace_logger, TraceLogger};
use crossterm::style::Color;
use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use thiserror::Error;

/// Edge length of the default grid.
pub const DEFAULT_GRID_SIZE: usize = 50;
/// Fastest allowed spacing between scheduled ticks.
pub const MIN_INTERVAL_MS: u64 = 1;
/// Slowest allowed spacing between scheduled ticks.
pub const MAX_INTERVAL_MS: u64 = 1000;
/// Spacing a fresh simulation starts with.
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// A multi-agent Langton's Ant simulation.
/// Main entry point for constructing, stepping and controlling a run.
///
/// The engine owns the grid and the agents; an external driver owns the
/// clock. While [`Simulation::is_running`] the driver is expected to call
/// [`Simulation::tick`] roughly every [`Simulation::interval_ms`]
/// milliseconds, one call at a time, and to stop as soon as the flag drops.
pub struct Simulation {
    grid: Grid,
    agents: Vec<Agent>,
    configs: Vec<AgentConfig>,
    running: bool,
    interval_ms: u64,
    step_count: usize,
    trace_logger: Box<dyn TraceLogger>,
}

/// Initial placement, heading, rules and display attributes for one agent.
///
/// The display color belongs to the configuration, not to the engine: the
/// simulation never reads it, terminal views do.
#[derive(Clone, Debug)]
pub struct AgentConfig {
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
    pub rules: RuleTable,
    pub color: Color,
}

impl AgentConfig {
    /// The reference placement: one classic ant at three quarters of the
    /// grid in both axes, facing up.
    pub fn classic(grid_size: usize) -> AgentConfig {
        AgentConfig {
            x: grid_size * 3 / 4,
            y: grid_size * 3 / 4,
            direction: Direction::Up,
            rules: RuleTable::classic(),
            color: agent_color(0),
        }
    }

    /// Scatters `count` agents over the grid with random positions and
    /// headings drawn from a seeded generator, so the same seed always
    /// produces the same placements. All agents share the rule table
    /// expanded from `turns`.
    ///
    /// # Arguments
    /// * `count` - How many agents to place.
    /// * `grid_size` - The edge length of the grid being populated.
    /// * `turns` - The turn sequence expanded via [`RuleTable::from_turns`].
    /// * `seed` - The seed for the random number generator.
    pub fn scatter(count: usize, grid_size: usize, turns: &[Turn], seed: u64) -> Vec<AgentConfig> {
        let mut rng = StdRng::seed_from_u64(seed);

        (0..count)
            .map(|index| AgentConfig {
                x: rng.gen_range(0..grid_size),
                y: rng.gen_range(0..grid_size),
                direction: rng.gen(),
                rules: RuleTable::from_turns(turns),
                color: agent_color(index),
            })
            .collect()
    }
}

/// A configuration the engine refuses to build a simulation from.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be a positive number of cells")]
    ZeroGridSize,
    #[error("agent {index} starts at ({x}, {y}), outside the {size}x{size} grid")]
    AgentOutOfBounds {
        index: usize,
        x: usize,
        y: usize,
        size: usize,
    },
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}

/// Represents the state of the simulation as seen by a driver.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    /// How many ticks have been applied since construction or reset.
    pub step_count: usize,
    /// Whether a driver should currently be scheduling ticks.
    pub running: bool,
    /// The requested spacing between ticks, in milliseconds.
    pub interval_ms: u64,
    /// The agents in their fixed stepping order.
    pub agents: Vec<AgentState>,
}

/// Represents one agent in the simulation state.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentState {
    /// The unique identifier for the agent.
    pub id: String,
    pub x: usize,
    pub y: usize,
    pub direction: Direction,
}

impl Simulation {
    /// Creates a new simulation.
    ///
    /// Refuses misconfiguration before any state exists: a grid without
    /// cells or an agent placed outside the grid.
    ///
    /// # Arguments
    /// * `grid_size` - The edge length of the square grid.
    /// * `configs` - The agents in stepping order.
    /// * `trace_path` - The filename to save a JSON trace of the run to.
    ///   If `None`, no trace is recorded.
    pub fn new(
        grid_size: usize,
        configs: Vec<AgentConfig>,
        trace_path: Option<String>,
    ) -> Result<Simulation, ConfigError> {
        if grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }

        for (index, config) in configs.iter().enumerate() {
            if config.x >= grid_size || config.y >= grid_size {
                return Err(ConfigError::AgentOutOfBounds {
                    index,
                    x: config.x,
                    y: config.y,
                    size: grid_size,
                });
            }
        }

        let agents = configs
            .iter()
            .map(|config| Agent::new(config.x, config.y, config.direction, config.rules.clone()))
            .collect();

        Ok(Simulation {
            grid: Grid::new(grid_size),
            agents,
            configs,
            running: false,
            interval_ms: DEFAULT_INTERVAL_MS,
            step_count: 0,
            trace_logger: create_trace_logger(trace_path, grid_size),
        })
    }

    /// The default simulation: a 50x50 grid with a single classic ant.
    pub fn classic() -> Simulation {
        Simulation::new(
            DEFAULT_GRID_SIZE,
            vec![AgentConfig::classic(DEFAULT_GRID_SIZE)],
            None,
        )
        .expect("the classic configuration is always in bounds")
    }

    /// Creates a new simulation from the string representation of a
    /// scenario.
    ///
    /// A scenario names the grid size, optionally the tick interval, and
    /// one line per agent giving its position, heading and turn sequence:
    ///
    /// ```text
    /// size 50
    /// interval 100
    /// ant 37 37 up RL
    /// ant 12 5 left LLRR
    /// ```
    ///
    /// # Arguments
    /// * `contents` - The scenario as a string.
    /// * `trace_path` - As for [`Simulation::new`].
    pub fn parse(contents: &str, trace_path: Option<String>) -> Result<Simulation, ConfigError> {
        let size = Regex::new(r"size (\d+)")
            .unwrap()
            .captures(contents)
            .ok_or_else(|| ConfigError::InvalidScenario("missing size declaration".to_string()))?
            .get(1)
            .unwrap()
            .as_str()
            .parse()
            .map_err(|_| ConfigError::InvalidScenario("grid size is out of range".to_string()))?;

        let interval: Option<i64> = Regex::new(r"interval (\d+)")
            .unwrap()
            .captures(contents)
            .and_then(|captures| captures.get(1).unwrap().as_str().parse().ok());

        let mut configs = Vec::new();
        for (index, captures) in Regex::new(r"ant (\d+) (\d+) (up|right|down|left) ([LR]+)")
            .unwrap()
            .captures_iter(contents)
            .enumerate()
        {
            let x = captures.get(1).unwrap().as_str().parse().map_err(|_| {
                ConfigError::InvalidScenario(format!("agent {index} x is out of range"))
            })?;
            let y = captures.get(2).unwrap().as_str().parse().map_err(|_| {
                ConfigError::InvalidScenario(format!("agent {index} y is out of range"))
            })?;
            let direction = match captures.get(3).unwrap().as_str() {
                "up" => Direction::Up,
                "right" => Direction::Right,
                "down" => Direction::Down,
                _ => Direction::Left,
            };
            let turns: Vec<Turn> = captures
                .get(4)
                .unwrap()
                .as_str()
                .chars()
                .map(|turn| match turn {
                    'L' => Turn::Left,
                    _ => Turn::Right,
                })
                .collect();

            configs.push(AgentConfig {
                x,
                y,
                direction,
                rules: RuleTable::from_turns(&turns),
                color: agent_color(index),
            });
        }

        let mut simulation = Simulation::new(size, configs, trace_path)?;
        if let Some(interval) = interval {
            simulation.set_interval(interval);
        }

        Ok(simulation)
    }

    /// Applies one step of the transition to the whole aggregate state and
    /// returns the resulting [`SimulationState`].
    ///
    /// Every agent reads the color of its standing cell from a snapshot of
    /// the grid taken before any agent acted this tick, so decisions only
    /// depend on the state at the start of the tick. Paints accumulate in
    /// the working grid in stepping order: when agents share a cell, the
    /// last one with a matching rule wins the paint.
    ///
    /// Calling this while paused is allowed and performs a single manual
    /// step.
    pub fn tick(&mut self) -> SimulationState {
        let size = self.grid.size();
        let snapshot = self.grid.clone();
        let step = self.step_count + 1;

        for agent in &mut self.agents {
            let seen = snapshot.get(agent.x, agent.y);

            match agent.resolve(seen) {
                Some((direction, paint)) => {
                    self.grid.set(agent.x, agent.y, paint);
                    self.trace_logger
                        .log_paint(step, agent.id.clone(), (agent.x, agent.y), paint);
                    agent.direction = direction;
                }
                None => {
                    // No rule for this color: keep the heading, repaint
                    // nothing, and continue. Not an error.
                    warn!("agent {} has no rule for color {seen}", agent.id);
                    self.trace_logger
                        .log_missing_rule(step, agent.id.clone(), seen);
                }
            }

            let from = (agent.x, agent.y);
            agent.advance(size);
            self.trace_logger
                .log_move(step, agent.id.clone(), from, (agent.x, agent.y));
        }

        self.step_count = step;
        self.trace_logger.log_step(
            step,
            self.agents.iter().map(|agent| (agent.x, agent.y)).collect(),
        );

        self.state()
    }

    /// Marks the simulation as running. Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Marks the simulation as paused. Idempotent.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops the run and restores the freshly-constructed state: a
    /// background grid, every agent back at its initial position and
    /// heading, and a zero step count. Agents keep their ids.
    pub fn reset(&mut self) {
        self.running = false;
        self.grid = Grid::new(self.grid.size());

        for (agent, config) in self.agents.iter_mut().zip(&self.configs) {
            agent.x = config.x;
            agent.y = config.y;
            agent.direction = config.direction;
        }

        self.step_count = 0;
        self.trace_logger.clear();
    }

    /// Stores a new tick interval, clamped into
    /// [[`MIN_INTERVAL_MS`], [`MAX_INTERVAL_MS`]]. Never errors, and does
    /// not itself start or stop ticking.
    pub fn set_interval(&mut self, ms: i64) {
        self.interval_ms = ms.clamp(MIN_INTERVAL_MS as i64, MAX_INTERVAL_MS as i64) as u64;
    }

    /// A read-only view of the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The agent configurations in stepping order, for pairing the dynamic
    /// state with each agent's display attributes.
    pub fn configs(&self) -> &[AgentConfig] {
        &self.configs
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Computes the current [`SimulationState`].
    pub fn state(&self) -> SimulationState {
        SimulationState {
            step_count: self.step_count,
            running: self.running,
            interval_ms: self.interval_ms,
            agents: self
                .agents
                .iter()
                .map(|agent| AgentState {
                    id: agent.id.clone(),
                    x: agent.x,
                    y: agent.y,
                    direction: agent.direction,
                })
                .collect(),
        }
    }

    /// Draws the simulation to the console.
    pub fn draw(&self) {
        let markers: Vec<(usize, usize, char, Color)> = self
            .agents
            .iter()
            .zip(&self.configs)
            .map(|(agent, config)| (agent.x, agent.y, agent.direction.glyph(), config.color))
            .collect();

        self.grid.draw(self.step_count, &markers);
    }

    /// Saves the JSON trace of the run, if a trace path was configured.
    pub fn save_trace(&self) {
        self.trace_logger.save();
    }
}
