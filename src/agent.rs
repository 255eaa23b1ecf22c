use crate::grid::CellColor;
use crossterm::style::Color;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::collections::HashMap;
use uuid::Uuid;

/// Represents the direction an agent is heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The `(dx, dy)` of one step forward, in screen coordinates where `y`
    /// grows downwards.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// The heading after turning, following the cyclic order
    /// up, right, down, left.
    pub fn turned(self, turn: Turn) -> Direction {
        let shift = match turn {
            Turn::Right => 1,
            Turn::Left => 3,
        };
        Direction::from_index((self.index() + shift) % 4)
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    fn from_index(index: usize) -> Direction {
        match index % 4 {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            _ => Direction::Left,
        }
    }

    pub(crate) fn glyph(self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Left => '<',
        }
    }
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.gen_range(0..4) {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            _ => Direction::Left,
        }
    }
}

/// Which way an agent turns when a rule matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

/// What an agent does on a matching cell: turn, then repaint the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rule {
    pub turn: Turn,
    pub paint: CellColor,
}

/// Per-agent mapping from observed cell color to a [`Rule`].
///
/// Condition colors are pairwise distinct by representation. Tables may be
/// incomplete: an unmatched color is resolved by the caller as "no repaint,
/// keep heading".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleTable {
    rules: HashMap<CellColor, Rule>,
}

impl RuleTable {
    /// Creates an empty table.
    pub fn new() -> RuleTable {
        RuleTable {
            rules: HashMap::new(),
        }
    }

    /// The classic two-color Langton's Ant: turn right on background, left
    /// on painted, flipping the cell either way.
    pub fn classic() -> RuleTable {
        RuleTable::from_turns(&[Turn::Right, Turn::Left])
    }

    /// Expands a turn sequence into a table, the standard multi-color
    /// generalization: color `i` turns `turns[i]` and repaints the cell to
    /// `(i + 1) % turns.len()`. `&[Right, Left]` is the classic ant.
    pub fn from_turns(turns: &[Turn]) -> RuleTable {
        let rules = turns
            .iter()
            .enumerate()
            .map(|(color, turn)| {
                (
                    color as CellColor,
                    Rule {
                        turn: *turn,
                        paint: ((color + 1) % turns.len()) as CellColor,
                    },
                )
            })
            .collect();

        RuleTable { rules }
    }

    /// Inserts a rule, replacing any previous rule for the same color.
    pub fn insert(&mut self, condition: CellColor, rule: Rule) {
        self.rules.insert(condition, rule);
    }

    pub fn get(&self, condition: CellColor) -> Option<Rule> {
        self.rules.get(&condition).copied()
    }
}

/// One agent's dynamic state: a stable identity, where it stands, where it
/// is heading, and its immutable rule table.
pub(crate) struct Agent {
    pub(crate) id: String,
    pub(crate) x: usize,
    pub(crate) y: usize,
    pub(crate) direction: Direction,
    rules: RuleTable,
}

impl Agent {
    pub(crate) fn new(x: usize, y: usize, direction: Direction, rules: RuleTable) -> Agent {
        Agent {
            id: Uuid::new_v4().to_string(),
            x,
            y,
            direction,
            rules,
        }
    }

    /// Resolves what happens when this agent sees `color`: the post-turn
    /// heading and the paint to apply, or `None` when the table has no rule
    /// for that color.
    pub(crate) fn resolve(&self, color: CellColor) -> Option<(Direction, CellColor)> {
        self.rules
            .get(color)
            .map(|rule| (self.direction.turned(rule.turn), rule.paint))
    }

    /// Moves one cell forward in the current heading, wrapping around the
    /// grid edges.
    pub(crate) fn advance(&mut self, size: usize) {
        let (dx, dy) = self.direction.offset();
        self.x = (self.x as i64 + dx).rem_euclid(size as i64) as usize;
        self.y = (self.y as i64 + dy).rem_euclid(size as i64) as usize;
    }
}

pub(crate) fn agent_color(index: usize) -> Color {
    const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
    ];

    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_turning_right_the_directions_cycle_clockwise() {
        assert_eq!(Direction::Up.turned(Turn::Right), Direction::Right);
        assert_eq!(Direction::Right.turned(Turn::Right), Direction::Down);
        assert_eq!(Direction::Down.turned(Turn::Right), Direction::Left);
        assert_eq!(Direction::Left.turned(Turn::Right), Direction::Up);
    }

    #[test]
    fn when_turning_left_the_directions_cycle_counter_clockwise() {
        assert_eq!(Direction::Up.turned(Turn::Left), Direction::Left);
        assert_eq!(Direction::Left.turned(Turn::Left), Direction::Down);
        assert_eq!(Direction::Down.turned(Turn::Left), Direction::Right);
        assert_eq!(Direction::Right.turned(Turn::Left), Direction::Up);
    }

    #[test]
    fn when_building_a_table_from_turns_the_classic_ant_rules_are_produced() {
        let table = RuleTable::from_turns(&[Turn::Right, Turn::Left]);

        assert_eq!(
            table.get(0),
            Some(Rule {
                turn: Turn::Right,
                paint: 1
            })
        );
        assert_eq!(
            table.get(1),
            Some(Rule {
                turn: Turn::Left,
                paint: 0
            })
        );
        assert_eq!(table.get(2), None);
        assert_eq!(table, RuleTable::classic());
    }

    #[test]
    fn when_building_a_table_from_three_turns_the_paints_cycle_through_the_colors() {
        let table = RuleTable::from_turns(&[Turn::Left, Turn::Left, Turn::Right]);

        assert_eq!(
            table.get(1),
            Some(Rule {
                turn: Turn::Left,
                paint: 2
            })
        );
        assert_eq!(
            table.get(2),
            Some(Rule {
                turn: Turn::Right,
                paint: 0
            })
        );
    }

    #[test]
    fn when_building_a_table_from_no_turns_the_table_is_empty() {
        let table = RuleTable::from_turns(&[]);

        assert_eq!(table.get(0), None);
        assert_eq!(table, RuleTable::new());
    }

    #[test]
    fn when_inserting_a_rule_for_an_existing_color_the_rule_is_replaced() {
        let mut table = RuleTable::classic();
        table.insert(
            0,
            Rule {
                turn: Turn::Left,
                paint: 3,
            },
        );

        assert_eq!(
            table.get(0),
            Some(Rule {
                turn: Turn::Left,
                paint: 3
            })
        );
    }

    #[test]
    fn when_resolving_a_color_with_a_rule_the_post_turn_heading_and_paint_are_returned() {
        let agent = Agent::new(5, 5, Direction::Up, RuleTable::classic());

        assert_eq!(agent.resolve(0), Some((Direction::Right, 1)));
        assert_eq!(agent.resolve(1), Some((Direction::Left, 0)));
    }

    #[test]
    fn when_resolving_a_color_without_a_rule_nothing_is_returned() {
        let agent = Agent::new(5, 5, Direction::Up, RuleTable::new());

        assert_eq!(agent.resolve(0), None);
        assert_eq!(agent.resolve(7), None);
    }

    #[test]
    fn when_advancing_an_agent_it_moves_one_cell_in_its_heading() {
        let mut agent = Agent::new(2, 2, Direction::Up, RuleTable::new());
        agent.advance(5);

        assert_eq!((agent.x, agent.y), (2, 1));

        agent.direction = Direction::Right;
        agent.advance(5);

        assert_eq!((agent.x, agent.y), (3, 1));
    }

    #[test]
    fn when_an_agent_has_a_stable_id_it_is_a_uuid() {
        let agent = Agent::new(0, 0, Direction::Up, RuleTable::new());

        assert_eq!(agent.id.len(), 36);
    }
}
