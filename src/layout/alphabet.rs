/*!
 * Legend ("alphabet") of symbols and the words they stand for.
 *
 * Each word gets a square cell with the symbol above the cell's centre
 * line and the label below it. Cells flow left to right, `columns` per row.
 */

use super::glyph::Glyph;

/// Build one legend cell
pub fn alphabet_cell(symbol: &Glyph, label: &Glyph, cell_size: u32, gap: u32) -> Glyph {
    let mut cell = Glyph::blank(cell_size, cell_size);
    let centre_x = cell_size / 2;
    let midline = cell_size * 2 / 5;

    let symbol = symbol.fit_within(cell_size, midline.saturating_sub(gap).max(1));
    let label = label.fit_within(cell_size, cell_size - midline);

    cell.paste(
        &symbol,
        centre_x.saturating_sub(symbol.width() / 2) as i64,
        midline.saturating_sub(gap + symbol.height()) as i64,
    );
    cell.paste(
        &label,
        centre_x.saturating_sub(label.width() / 2) as i64,
        (midline + gap) as i64,
    );
    cell
}

/// Arrange cells in rows of at most `columns`
pub fn arrange_cells(cells: &[Glyph], cell_size: u32, columns: usize) -> Glyph {
    if cells.is_empty() {
        return Glyph::empty();
    }
    let columns = columns.clamp(1, cells.len());
    let rows = cells.len().div_ceil(columns);

    let mut sheet = Glyph::blank(columns as u32 * cell_size, rows as u32 * cell_size);
    for (i, cell) in cells.iter().enumerate() {
        let x = (i % columns) as u32 * cell_size;
        let y = (i / columns) as u32 * cell_size;
        sheet.paste(cell, x as i64, y as i64);
    }
    sheet
}
