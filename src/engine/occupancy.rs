use crate::model::{Area, Element, GridConfig, Layout};

use super::placement::find_nearest_valid_position;

/// True when `area` overlaps any element other than `exclude`.
pub fn is_occupied<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
    area: Area,
    exclude: Option<u64>,
) -> bool {
    elements
        .into_iter()
        .filter(|e| Some(e.id) != exclude)
        .any(|e| e.area().overlaps(area))
}

pub fn fits(config: &GridConfig, area: Area) -> bool {
    area.column >= 1
        && area.row >= 1
        && area.column_span >= 1
        && area.row_span >= 1
        && area.end_column() <= config.columns
        && area.end_row() <= config.rows
}

/// Moves the top-left corner left/up just enough for the spans to fit.
/// Spans are never reduced, so the result may still not fit.
pub fn shift_into(config: &GridConfig, area: Area) -> Area {
    let mut shifted = area;
    if area.end_column() > config.columns {
        shifted.column = (config.columns + 1).saturating_sub(area.column_span).max(1);
    }
    if area.end_row() > config.rows {
        shifted.row = (config.rows + 1).saturating_sub(area.row_span).max(1);
    }
    shifted
}

/// Restores the placement invariants after the grid dimensions changed.
///
/// Elements that still fit stay where they are. The rest are shifted back
/// inside the grid; a shifted element that lands on another one is moved to
/// the nearest free slot, and elements whose spans exceed the grid (or for
/// which no slot exists) are removed. Order is preserved. Returns the removed
/// elements.
pub fn reconcile(layout: &mut Layout) -> Vec<Element> {
    let config = layout.config;
    let mut slots: Vec<Option<Element>> = Vec::with_capacity(layout.elements.len());
    let mut pending = Vec::new();
    for (idx, element) in std::mem::take(&mut layout.elements).into_iter().enumerate() {
        if fits(&config, element.area()) {
            slots.push(Some(element));
        } else {
            slots.push(None);
            pending.push((idx, element));
        }
    }

    let mut removed = Vec::new();
    for (idx, mut element) in pending {
        if element.column_span > config.columns || element.row_span > config.rows {
            tracing::info!(id = element.id, "element no longer fits the grid, removing");
            removed.push(element);
            continue;
        }
        let shifted = shift_into(&config, element.area());
        let placed = slots.iter().flatten();
        let target = if is_occupied(placed.clone(), shifted, None) {
            let cell = find_nearest_valid_position(
                &config,
                placed.clone(),
                shifted.top_left(),
                shifted.column_span,
                shifted.row_span,
                None,
            );
            shifted.at(cell)
        } else {
            shifted
        };
        if fits(&config, target) && !is_occupied(placed, target, None) {
            tracing::debug!(
                id = element.id,
                column = target.column,
                row = target.row,
                "shifted element back inside the grid"
            );
            element.set_area(target);
            slots[idx] = Some(element);
        } else {
            tracing::info!(id = element.id, "no free slot after grid resize, removing");
            removed.push(element);
        }
    }

    layout.elements = slots.into_iter().flatten().collect();
    removed
}
