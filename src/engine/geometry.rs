use crate::model::{Area, Cell, GridConfig};
use eframe::egui;

/// Read access to rendered cell boxes, supplied by whoever draws the grid.
pub trait CellSurface {
    fn grid_bounds(&self) -> egui::Rect;
    fn cell_bounds(&self, cell: Cell) -> Option<egui::Rect>;
    /// Rendered space between tracks, in the same unit as the bounds.
    fn gap(&self) -> f32;
}

/// Screen placement of a grid: where it is drawn plus its track counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    pub bounds: egui::Rect,
    pub columns: u32,
    pub rows: u32,
    pub gap: f32,
}

impl GridMetrics {
    pub fn new(bounds: egui::Rect, config: &GridConfig) -> Self {
        Self {
            bounds,
            columns: config.columns.max(1),
            rows: config.rows.max(1),
            gap: config.gap.max(0.0),
        }
    }

    /// Metrics for whatever the surface has drawn, with track counts from `config`.
    pub fn of_surface(surface: &impl CellSurface, config: &GridConfig) -> Self {
        Self::new(surface.grid_bounds(), config).with_gap(surface.gap())
    }

    pub fn with_gap(self, gap: f32) -> Self {
        Self {
            gap: gap.max(0.0),
            ..self
        }
    }

    pub fn cell_size(&self) -> egui::Vec2 {
        let gaps_x = self.gap * (self.columns - 1) as f32;
        let gaps_y = self.gap * (self.rows - 1) as f32;
        egui::vec2(
            ((self.bounds.width() - gaps_x) / self.columns as f32).max(0.0),
            ((self.bounds.height() - gaps_y) / self.rows as f32).max(0.0),
        )
    }

    /// Distance between the left (top) edges of two adjacent cells.
    pub fn pitch(&self) -> egui::Vec2 {
        self.cell_size() + egui::vec2(self.gap, self.gap)
    }

    pub fn area_rect(&self, area: Area) -> egui::Rect {
        let cell = self.cell_size();
        let pitch = self.pitch();
        let min = self.bounds.min
            + egui::vec2(
                area.column.saturating_sub(1) as f32 * pitch.x,
                area.row.saturating_sub(1) as f32 * pitch.y,
            );
        let size = egui::vec2(
            area.column_span as f32 * cell.x + area.column_span.saturating_sub(1) as f32 * self.gap,
            area.row_span as f32 * cell.y + area.row_span.saturating_sub(1) as f32 * self.gap,
        );
        egui::Rect::from_min_size(min, size)
    }

    /// Top-left cell for an element of the given spans whose rendered corner
    /// is at `top_left`, kept inside the grid.
    pub fn snap_top_left(&self, top_left: egui::Pos2, column_span: u32, row_span: u32) -> Cell {
        let cell = cell_from_point(self, top_left);
        let max_col = (self.columns + 1).saturating_sub(column_span).max(1);
        let max_row = (self.rows + 1).saturating_sub(row_span).max(1);
        Cell::new(cell.col.clamp(1, max_col), cell.row.clamp(1, max_row))
    }

    /// Whole-cell change in span for a pointer displacement.
    pub fn span_delta(&self, delta: egui::Vec2) -> (i64, i64) {
        let pitch = self.pitch();
        let axis = |d: f32, p: f32| {
            if p > f32::EPSILON {
                (d / p).round() as i64
            } else {
                0
            }
        };
        (axis(delta.x, pitch.x), axis(delta.y, pitch.y))
    }
}

impl CellSurface for GridMetrics {
    fn grid_bounds(&self) -> egui::Rect {
        self.bounds
    }

    fn cell_bounds(&self, cell: Cell) -> Option<egui::Rect> {
        let in_range = (1..=self.columns).contains(&cell.col) && (1..=self.rows).contains(&cell.row);
        in_range.then(|| self.area_rect(Area::cell(cell)))
    }

    fn gap(&self) -> f32 {
        self.gap
    }
}

/// Hit-tests rendered cell boxes in row-major order. `None` when the point
/// lies outside every box, including inside a gap.
pub fn cell_at_point(
    surface: &impl CellSurface,
    columns: u32,
    rows: u32,
    point: egui::Pos2,
) -> Option<Cell> {
    for row in 1..=rows {
        for col in 1..=columns {
            let cell = Cell::new(col, row);
            if surface.cell_bounds(cell).is_some_and(|r| r.contains(point)) {
                return Some(cell);
            }
        }
    }
    None
}

/// Calculated mapping from metrics alone. Points are clamped into the grid
/// first, so this always yields a cell.
pub fn cell_from_point(metrics: &GridMetrics, point: egui::Pos2) -> Cell {
    let point = metrics.bounds.clamp(point);
    let rel = point - metrics.bounds.min;
    let cell = metrics.cell_size();
    Cell::new(
        track_at(rel.x, cell.x, metrics.gap, metrics.columns),
        track_at(rel.y, cell.y, metrics.gap, metrics.rows),
    )
}

// A gap belongs to the neighbour whose body is nearer; its exact midpoint
// goes to the later track.
fn track_at(offset: f32, cell: f32, gap: f32, count: u32) -> u32 {
    let pitch = cell + gap;
    for track in 1..count {
        let body_end = (track - 1) as f32 * pitch + cell;
        if offset < body_end + gap * 0.5 {
            return track;
        }
        if offset < body_end + gap {
            return track + 1;
        }
    }
    count.max(1)
}
