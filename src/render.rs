use slimefinder_chunks::{ClassificationGrid, GridCell};

pub const MARKED: char = '#';
pub const UNMARKED: char = '.';
pub const CENTER: char = '@';

/// Draws the grid as text, north (negative z) up and west (negative x) left.
/// One line per chunk row, one character per chunk.
pub fn render_ascii(grid: &ClassificationGrid) -> String {
    let side = grid.side();
    // Cells are stored x-major, so each chunk of `side` cells is one column of the map.
    let columns: Vec<&[GridCell]> = grid.cells().chunks(side).collect();
    let mut out = String::with_capacity(side * (side + 1));

    for row in 0..side {
        for column in &columns {
            let symbol = match column.get(row) {
                Some(cell) if cell.is_marked => MARKED,
                Some(cell) if cell.chunk == grid.center() => CENTER,
                _ => UNMARKED,
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}
