use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};

/// The paint of a single cell, as a small integer tag.
pub type CellColor = u8;

/// The color every cell starts with.
pub const BACKGROUND: CellColor = 0;

/// A square matrix of cell colors, indexed by `(x, y)` with the origin in
/// the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellColor>,
}

impl Grid {
    pub(crate) fn new(size: usize) -> Grid {
        Grid {
            size,
            cells: vec![BACKGROUND; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> CellColor {
        self.cells[y * self.size + x]
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, color: CellColor) {
        self.cells[y * self.size + x] = color;
    }

    /// The cells in row-major order, for drivers that render the whole grid.
    pub fn cells(&self) -> &[CellColor] {
        &self.cells
    }

    pub(crate) fn draw(&self, step_count: usize, markers: &[(usize, usize, char, Color)]) {
        let mut stdout = stdout();

        // Display information about the simulation
        execute!(
            stdout,
            Clear(ClearType::All),
            Hide,
            Print("Size: "),
            Print(self.size.to_string()),
            Print("\nStep: "),
            Print(step_count.to_string()),
            Print("\n\n")
        )
        .unwrap();

        // Display the grid, with agents drawn over the cells they stand on
        for y in 0..self.size {
            for x in 0..self.size {
                let marker = markers.iter().find(|marker| marker.0 == x && marker.1 == y);
                match marker {
                    Some((_, _, glyph, color)) => execute!(
                        stdout,
                        SetForegroundColor(*color),
                        Print(*glyph),
                        SetForegroundColor(Color::Reset)
                    )
                    .unwrap(),
                    None => {
                        let cell = self.get(x, y);
                        execute!(
                            stdout,
                            SetForegroundColor(cell_to_color(cell)),
                            Print(if cell == BACKGROUND { '.' } else { '#' }),
                            SetForegroundColor(Color::Reset)
                        )
                        .unwrap()
                    }
                }
            }
            execute!(stdout, Print("\n")).unwrap();
        }

        stdout.flush().unwrap();
    }
}

pub(crate) fn cell_to_color(color: CellColor) -> Color {
    match color {
        BACKGROUND => Color::Reset,
        1 => Color::White,
        2 => Color::Red,
        3 => Color::Green,
        4 => Color::Yellow,
        5 => Color::Blue,
        6 => Color::Magenta,
        7 => Color::Cyan,
        8 => Color::DarkRed,
        9 => Color::DarkGreen,
        _ => Color::DarkGrey,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_creating_a_grid_all_cells_are_background() {
        let grid = Grid::new(4);

        assert_eq!(grid.size(), 4);
        assert_eq!(grid.cells().len(), 16);
        assert!(grid.cells().iter().all(|cell| *cell == BACKGROUND));
    }

    #[test]
    fn when_setting_a_cell_the_color_is_stored_at_the_right_coordinate() {
        let mut grid = Grid::new(3);
        grid.set(1, 0, 2);
        grid.set(0, 2, 1);

        assert_eq!(grid.get(1, 0), 2);
        assert_eq!(grid.get(0, 2), 1);
        // Row-major layout: (x, y) lives at y * size + x
        assert_eq!(grid.cells()[1], 2);
        assert_eq!(grid.cells()[6], 1);
    }

    #[test]
    fn when_cloning_a_grid_writes_to_the_original_do_not_affect_the_clone() {
        let mut grid = Grid::new(3);
        let snapshot = grid.clone();

        grid.set(1, 1, 1);

        assert_eq!(grid.get(1, 1), 1);
        assert_eq!(snapshot.get(1, 1), BACKGROUND);
    }
}
