// grid.rs - Grid types for the 80x8 LED banner

use std::fmt;

// Fixed matrix geometry
pub const WIDTH: usize = 80; // Columns on the banner
pub const HEIGHT: usize = 8; // Rows on the banner
pub const CELLS: usize = WIDTH * HEIGHT;

pub type TCells = [bool; CELLS];

/// One generation of the toroidal field, stored row-major (`y * WIDTH + x`).
///
/// The cells live behind a `Box` so that swapping two grids moves pointers
/// instead of copying the field.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Box<TCells>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An all-dead grid.
    pub fn new() -> Self {
        Self {
            cells: Box::new([false; CELLS]),
        }
    }

    /// Builds a grid with the given coordinates alive. Coordinates wrap.
    pub fn with_alive<I>(alive: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new();
        for (x, y) in alive {
            grid.set(x % WIDTH, y % HEIGHT, true);
        }
        grid
    }

    #[inline]
    pub fn index(x: usize, y: usize) -> usize {
        y * WIDTH + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[Self::index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        self.cells[Self::index(x, y)] = alive;
    }

    pub fn cells(&self) -> &TCells {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut TCells {
        &mut self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&alive| alive)
    }

    /// Counts the 8 neighbours of `(x, y)`, wrapping at both edges.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dy in [HEIGHT - 1, 0, 1] {
            for dx in [WIDTH - 1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x + dx) % WIDTH;
                let ny = (y + dy) % HEIGHT;
                if self.get(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Iterates `(x, y, alive)` in wire order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, bool)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &alive)| (i % WIDTH, i / WIDTH, alive))
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(WIDTH) {
            let line: String = row.iter().map(|&a| if a { '#' } else { '.' }).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
