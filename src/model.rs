use serde::{Deserialize, Serialize};

use crate::engine::occupancy;

pub const MIN_TRACKS: u32 = 1;
pub const MAX_TRACKS: u32 = 24;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GapUnit {
    #[default]
    Px,
    Mm,
}

impl GapUnit {
    pub fn suffix(self) -> &'static str {
        match self {
            GapUnit::Px => "px",
            GapUnit::Mm => "mm",
        }
    }

    pub fn max_gap(self) -> f32 {
        match self {
            GapUnit::Px => 50.0,
            GapUnit::Mm => 10.0,
        }
    }

    pub fn step(self) -> f32 {
        match self {
            GapUnit::Px => 1.0,
            GapUnit::Mm => 0.2,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub columns: u32,
    pub rows: u32,
    pub gap: f32,
    pub unit: GapUnit,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 12,
            gap: 8.0,
            unit: GapUnit::Px,
        }
    }
}

impl GridConfig {
    /// Page preset for a 255×355 mm newspaper sheet with 15 mm margins.
    pub fn newspaper() -> Self {
        Self {
            columns: 6,
            rows: 16,
            gap: 2.4,
            unit: GapUnit::Mm,
        }
    }

    pub fn clamped(self) -> Self {
        let gap = if self.gap.is_finite() { self.gap } else { 0.0 };
        Self {
            columns: self.columns.clamp(MIN_TRACKS, MAX_TRACKS),
            rows: self.rows.clamp(MIN_TRACKS, MAX_TRACKS),
            gap: gap.clamp(0.0, self.unit.max_gap()),
            unit: self.unit,
        }
    }
}

/// 1-based grid cell address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: u32,
    pub row: u32,
}

impl Cell {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// A rectangle of cells: top-left corner plus spans, all 1-based and inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Area {
    pub column: u32,
    pub row: u32,
    pub column_span: u32,
    pub row_span: u32,
}

impl Area {
    pub fn new(column: u32, row: u32, column_span: u32, row_span: u32) -> Self {
        Self {
            column,
            row,
            column_span,
            row_span,
        }
    }

    pub fn cell(cell: Cell) -> Self {
        Self::new(cell.col, cell.row, 1, 1)
    }

    pub fn from_corners(a: Cell, b: Cell) -> Self {
        let min_col = a.col.min(b.col);
        let max_col = a.col.max(b.col);
        let min_row = a.row.min(b.row);
        let max_row = a.row.max(b.row);
        Self::new(min_col, min_row, max_col - min_col + 1, max_row - min_row + 1)
    }

    pub fn end_column(self) -> u32 {
        self.column.saturating_add(self.column_span).saturating_sub(1)
    }

    pub fn end_row(self) -> u32 {
        self.row.saturating_add(self.row_span).saturating_sub(1)
    }

    pub fn top_left(self) -> Cell {
        Cell::new(self.column, self.row)
    }

    /// Same spans, moved so the top-left corner sits on `cell`.
    pub fn at(self, cell: Cell) -> Self {
        Self {
            column: cell.col,
            row: cell.row,
            ..self
        }
    }

    pub fn overlaps(self, other: Area) -> bool {
        let cols = self.column <= other.end_column() && other.column <= self.end_column();
        let rows = self.row <= other.end_row() && other.row <= self.end_row();
        cols && rows
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: u64,
    pub column: u32,
    pub row: u32,
    pub column_span: u32,
    pub row_span: u32,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Element {
    pub fn new(id: u64, area: Area) -> Self {
        Self {
            id,
            column: area.column,
            row: area.row,
            column_span: area.column_span,
            row_span: area.row_span,
            text: String::new(),
            color: None,
        }
    }

    pub fn area(&self) -> Area {
        Area::new(self.column, self.row, self.column_span, self.row_span)
    }

    pub fn set_area(&mut self, area: Area) {
        self.column = area.column;
        self.row = area.row;
        self.column_span = area.column_span;
        self.row_span = area.row_span;
    }
}

/// Persisted layout: what the template store and layout files hold.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LayoutTemplate {
    pub columns: u32,
    pub rows: u32,
    pub gap: f32,
    #[serde(default)]
    pub unit: GapUnit,
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Grid configuration, ordered elements and the id counter.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub config: GridConfig,
    pub elements: Vec<Element>,
    next_id: u64,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl Layout {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config: config.clamped(),
            elements: Vec::new(),
            next_id: 1,
        }
    }

    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Appends a new element without validating the area.
    pub fn push_area(&mut self, area: Area) -> u64 {
        let id = self.allocate_id();
        self.elements.push(Element::new(id, area));
        id
    }

    pub fn element(&self, id: u64) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn element_mut(&mut self, id: u64) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn remove(&mut self, id: u64) -> Option<Element> {
        let idx = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(idx))
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Applies a new configuration and reconciles the elements against it.
    /// Returns the elements that no longer fit.
    pub fn set_config(&mut self, config: GridConfig) -> Vec<Element> {
        let config = config.clamped();
        let dimensions_changed =
            config.columns != self.config.columns || config.rows != self.config.rows;
        self.config = config;
        if dimensions_changed {
            occupancy::reconcile(self)
        } else {
            Vec::new()
        }
    }

    pub fn set_columns(&mut self, columns: u32) -> Vec<Element> {
        self.set_config(GridConfig {
            columns,
            ..self.config
        })
    }

    pub fn set_rows(&mut self, rows: u32) -> Vec<Element> {
        self.set_config(GridConfig { rows, ..self.config })
    }

    pub fn set_gap(&mut self, gap: f32) {
        self.config = GridConfig { gap, ..self.config }.clamped();
    }

    pub fn from_template(template: LayoutTemplate) -> Self {
        let config = GridConfig {
            columns: template.columns,
            rows: template.rows,
            gap: template.gap,
            unit: template.unit,
        }
        .clamped();
        let (elements, malformed): (Vec<Element>, Vec<Element>) =
            template.elements.into_iter().partition(|e| {
                e.column >= 1 && e.row >= 1 && e.column_span >= 1 && e.row_span >= 1
            });
        for element in &malformed {
            tracing::warn!(id = element.id, "dropping element with a zero position or span");
        }
        let next_id = elements
            .iter()
            .map(|e| e.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        Self {
            config,
            elements,
            next_id,
        }
    }

    pub fn to_template(&self) -> LayoutTemplate {
        LayoutTemplate {
            columns: self.config.columns,
            rows: self.config.rows,
            gap: self.config.gap,
            unit: self.config.unit,
            elements: self.elements.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_overlap_is_inclusive() {
        let a = Area::new(1, 1, 2, 2);
        assert!(a.overlaps(Area::new(2, 2, 1, 1)));
        assert!(!a.overlaps(Area::new(3, 1, 1, 2)));
        assert!(!a.overlaps(Area::new(1, 3, 2, 1)));
    }

    #[test]
    fn corners_normalize_in_any_direction() {
        let area = Area::from_corners(Cell::new(4, 5), Cell::new(2, 1));
        assert_eq!(area, Area::new(2, 1, 3, 5));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut layout = Layout::default();
        let a = layout.push_area(Area::new(1, 1, 1, 1));
        let b = layout.push_area(Area::new(2, 1, 1, 1));
        let c = layout.push_area(Area::new(3, 1, 1, 1));
        assert_eq!((a, b, c), (1, 2, 3));

        layout.remove(b);
        let ids: Vec<u64> = layout.elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(layout.push_area(Area::new(4, 1, 1, 1)), 4);
    }

    #[test]
    fn loading_template_reseeds_counter() {
        let json = r#"{
            "columns": 4, "rows": 3, "gap": 10,
            "elements": [
                {"id": 7, "column": 1, "row": 1, "columnSpan": 2, "rowSpan": 1},
                {"id": 3, "column": 3, "row": 2, "columnSpan": 1, "rowSpan": 2}
            ]
        }"#;
        let template: LayoutTemplate = serde_json::from_str(json).unwrap();
        let layout = Layout::from_template(template);
        assert_eq!(layout.next_id(), 8);
        assert_eq!(layout.config.unit, GapUnit::Px);
        assert_eq!(layout.elements[0].text, "");

        let empty = Layout::from_template(LayoutTemplate {
            columns: 3,
            rows: 3,
            gap: 0.0,
            unit: GapUnit::Px,
            elements: vec![],
        });
        assert_eq!(empty.next_id(), 1);
    }

    #[test]
    fn zero_positions_and_spans_are_dropped_on_load() {
        let json = r#"{
            "columns": 4, "rows": 3, "gap": 10,
            "elements": [
                {"id": 1, "column": 0, "row": 1, "columnSpan": 0, "rowSpan": 1},
                {"id": 2, "column": 2, "row": 0, "columnSpan": 1, "rowSpan": 1},
                {"id": 3, "column": 2, "row": 2, "columnSpan": 1, "rowSpan": 0},
                {"id": 4, "column": 1, "row": 1, "columnSpan": 1, "rowSpan": 1}
            ]
        }"#;
        let template: LayoutTemplate = serde_json::from_str(json).unwrap();
        let mut layout = Layout::from_template(template);
        assert!(occupancy::reconcile(&mut layout).is_empty());
        let ids: Vec<u64> = layout.elements.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4]);
        assert_eq!(layout.next_id(), 5);
    }

    #[test]
    fn degenerate_area_ends_do_not_underflow() {
        let area = Area::new(0, 0, 0, 0);
        assert_eq!((area.end_column(), area.end_row()), (0, 0));
        assert!(!occupancy::fits(&GridConfig::default(), area));
    }

    #[test]
    fn config_is_clamped_into_range() {
        let config = GridConfig {
            columns: 0,
            rows: 99,
            gap: -3.0,
            unit: GapUnit::Px,
        }
        .clamped();
        assert_eq!((config.columns, config.rows, config.gap), (1, 24, 0.0));
        assert_eq!(GridConfig::newspaper().clamped(), GridConfig::newspaper());
    }

    #[test]
    fn gap_change_keeps_elements() {
        let mut layout = Layout::default();
        layout.push_area(Area::new(5, 12, 1, 1));
        layout.set_gap(20.0);
        assert_eq!(layout.config.gap, 20.0);
        assert_eq!(layout.elements.len(), 1);
    }
}
