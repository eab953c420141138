use crate::model::{Area, Cell, Element, GridConfig, Layout};

use super::occupancy::{fits, is_occupied};

// East, south, west, north, then the diagonals.
const PROBES: [(i64, i64); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Nearest in-bounds, unoccupied top-left cell for a span, searching rings
/// of growing Chebyshev distance around `target`.
///
/// Returns `target` unchanged when it is already valid or when nothing is
/// found; callers must re-validate before committing.
pub fn find_nearest_valid_position<'a, I>(
    config: &GridConfig,
    elements: I,
    target: Cell,
    column_span: u32,
    row_span: u32,
    exclude: Option<u64>,
) -> Cell
where
    I: IntoIterator<Item = &'a Element> + Clone,
{
    let valid = |col: i64, row: i64| {
        if col < 1 || row < 1 {
            return false;
        }
        let area = Area::new(col as u32, row as u32, column_span, row_span);
        fits(config, area) && !is_occupied(elements.clone(), area, exclude)
    };

    if valid(target.col as i64, target.row as i64) {
        return target;
    }

    let max_distance = config.columns.max(config.rows) as i64;
    for distance in 1..=max_distance {
        for (dx, dy) in PROBES {
            let col = target.col as i64 + dx * distance;
            let row = target.row as i64 + dy * distance;
            if valid(col, row) {
                return Cell::new(col as u32, row as u32);
            }
        }
    }
    target
}

/// Places a new element of the given spans at `target`, or at the nearest
/// free slot. Returns `None` when the grid has no room for it.
pub fn insert(layout: &mut Layout, target: Cell, column_span: u32, row_span: u32) -> Option<u64> {
    let cell = find_nearest_valid_position(
        &layout.config,
        &layout.elements,
        target,
        column_span,
        row_span,
        None,
    );
    let area = Area::new(cell.col, cell.row, column_span, row_span);
    if !fits(&layout.config, area) || is_occupied(&layout.elements, area, None) {
        tracing::debug!(col = target.col, row = target.row, "no free slot for new element");
        return None;
    }
    Some(layout.push_area(area))
}

/// Copies an element, payload included, into the free slot nearest to it.
pub fn duplicate(layout: &mut Layout, id: u64) -> Option<u64> {
    let source = layout.element(id)?.clone();
    let new_id = insert(layout, source.area().top_left(), source.column_span, source.row_span)?;
    if let Some(copy) = layout.element_mut(new_id) {
        copy.text = source.text;
        copy.color = source.color;
    }
    Some(new_id)
}
