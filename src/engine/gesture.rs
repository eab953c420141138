use crate::model::{Area, Cell, Layout};
use eframe::egui;

use super::geometry::{CellSurface, GridMetrics, cell_at_point};
use super::occupancy::{fits, is_occupied};

/// Candidate placement shown while dragging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ghost {
    pub area: Area,
    pub blocked: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Selecting {
        start: Cell,
        end: Cell,
    },
    Dragging {
        element_id: u64,
        pointer_offset: egui::Vec2,
        origin: Area,
        ghost: Ghost,
    },
    Resizing {
        element_id: u64,
        anchor: egui::Pos2,
        start_span: (u32, u32),
    },
}

impl Gesture {
    pub fn name(&self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Selecting { .. } => "selecting",
            Gesture::Dragging { .. } => "dragging",
            Gesture::Resizing { .. } => "resizing",
        }
    }

    pub fn element_id(&self) -> Option<u64> {
        match self {
            Gesture::Dragging { element_id, .. } | Gesture::Resizing { element_id, .. } => {
                Some(*element_id)
            }
            _ => None,
        }
    }

    /// Normalised rectangle of an in-progress selection.
    pub fn selection(&self) -> Option<Area> {
        match self {
            Gesture::Selecting { start, end } => Some(Area::from_corners(*start, *end)),
            _ => None,
        }
    }

    pub fn ghost(&self) -> Option<Ghost> {
        match self {
            Gesture::Dragging { ghost, .. } => Some(*ghost),
            _ => None,
        }
    }

    /// Where the dragged element's top-left corner follows the pointer.
    pub fn drag_top_left(&self, pointer: egui::Pos2) -> Option<egui::Pos2> {
        match self {
            Gesture::Dragging { pointer_offset, .. } => Some(pointer - *pointer_offset),
            _ => None,
        }
    }
}

/// What the rendering side found under a pointer-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Grid,
    Element(u64),
    ResizeHandle(u64),
    DeleteControl(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Started,
    Updated,
    Created(u64),
    Moved { id: u64, from: Cell, to: Cell },
    Resized { id: u64, column_span: u32, row_span: u32 },
    /// A selection was dropped: occupied target or pointer left the grid.
    Discarded,
    /// A drag ended without moving the element.
    Reverted(u64),
    Deleted(u64),
    Ended,
}

/// Owns the live gesture and turns pointer events into layout mutations.
#[derive(Debug, Default)]
pub struct Interaction {
    gesture: Gesture,
    listening: bool,
}

impl Interaction {
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// True exactly while a gesture wants pointer move/up events.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn pointer_down(
        &mut self,
        layout: &mut Layout,
        surface: &impl CellSurface,
        target: PointerTarget,
        pointer: egui::Pos2,
    ) -> Outcome {
        if self.gesture != Gesture::Idle {
            return Outcome::Ignored;
        }
        match target {
            PointerTarget::DeleteControl(id) => self.delete(layout, id),
            PointerTarget::ResizeHandle(id) => self.start_resize(layout, id, pointer),
            PointerTarget::Element(id) => {
                let Some(element) = layout.element(id) else {
                    return Outcome::Ignored;
                };
                let area = element.area();
                let metrics = GridMetrics::of_surface(surface, &layout.config);
                let pointer_offset = pointer - metrics.area_rect(area).min;
                self.transition(Gesture::Dragging {
                    element_id: id,
                    pointer_offset,
                    origin: area,
                    ghost: Ghost {
                        area,
                        blocked: false,
                    },
                });
                Outcome::Started
            }
            PointerTarget::Grid => {
                let config = layout.config;
                let Some(cell) = cell_at_point(surface, config.columns, config.rows, pointer) else {
                    return Outcome::Ignored;
                };
                self.transition(Gesture::Selecting {
                    start: cell,
                    end: cell,
                });
                Outcome::Started
            }
        }
    }

    pub fn start_resize(&mut self, layout: &Layout, id: u64, pointer: egui::Pos2) -> Outcome {
        if self.gesture != Gesture::Idle {
            return Outcome::Ignored;
        }
        let Some(element) = layout.element(id) else {
            return Outcome::Ignored;
        };
        let start_span = (element.column_span, element.row_span);
        self.transition(Gesture::Resizing {
            element_id: id,
            anchor: pointer,
            start_span,
        });
        Outcome::Started
    }

    pub fn pointer_move(
        &mut self,
        layout: &mut Layout,
        surface: &impl CellSurface,
        pointer: egui::Pos2,
    ) -> Outcome {
        let config = layout.config;
        match &mut self.gesture {
            Gesture::Idle => Outcome::Ignored,
            Gesture::Selecting { end, .. } => {
                match cell_at_point(surface, config.columns, config.rows, pointer) {
                    Some(cell) if cell != *end => {
                        *end = cell;
                        Outcome::Updated
                    }
                    _ => Outcome::Ignored,
                }
            }
            Gesture::Dragging {
                element_id,
                pointer_offset,
                ghost,
                ..
            } => {
                let metrics = GridMetrics::of_surface(surface, &config);
                let span = ghost.area;
                let cell = metrics.snap_top_left(
                    pointer - *pointer_offset,
                    span.column_span,
                    span.row_span,
                );
                let area = span.at(cell);
                let blocked = is_occupied(&layout.elements, area, Some(*element_id));
                let next = Ghost { area, blocked };
                if next == *ghost {
                    return Outcome::Ignored;
                }
                *ghost = next;
                Outcome::Updated
            }
            Gesture::Resizing {
                element_id,
                anchor,
                start_span,
            } => {
                let id = *element_id;
                let metrics = GridMetrics::of_surface(surface, &config);
                let (col_change, row_change) = metrics.span_delta(pointer - *anchor);
                let Some(element) = layout.element(id) else {
                    return Outcome::Ignored;
                };
                let current = element.area();
                let max_cols = (config.columns + 1).saturating_sub(current.column).max(1);
                let max_rows = (config.rows + 1).saturating_sub(current.row).max(1);
                let column_span = clamp_span(start_span.0, col_change, max_cols);
                let row_span = clamp_span(start_span.1, row_change, max_rows);
                let candidate = Area {
                    column_span,
                    row_span,
                    ..current
                };
                if candidate == current {
                    return Outcome::Ignored;
                }
                if is_occupied(&layout.elements, candidate, Some(id)) {
                    tracing::trace!(id, column_span, row_span, "resize blocked by neighbour");
                    return Outcome::Ignored;
                }
                if let Some(element) = layout.element_mut(id) {
                    element.set_area(candidate);
                }
                Outcome::Resized {
                    id,
                    column_span,
                    row_span,
                }
            }
        }
    }

    pub fn pointer_up(&mut self, layout: &mut Layout) -> Outcome {
        match self.transition(Gesture::Idle) {
            Gesture::Idle => Outcome::Ignored,
            Gesture::Selecting { start, end } => {
                let area = Area::from_corners(start, end);
                if !fits(&layout.config, area) || is_occupied(&layout.elements, area, None) {
                    tracing::debug!(?area, "selection overlaps an element, discarding");
                    return Outcome::Discarded;
                }
                let id = layout.push_area(area);
                tracing::debug!(id, ?area, "created element");
                Outcome::Created(id)
            }
            Gesture::Dragging {
                element_id,
                origin,
                ghost,
                ..
            } => {
                if ghost.area == origin {
                    return Outcome::Reverted(element_id);
                }
                // The layout may have changed since the last move.
                if ghost.blocked
                    || !fits(&layout.config, ghost.area)
                    || is_occupied(&layout.elements, ghost.area, Some(element_id))
                {
                    tracing::debug!(id = element_id, "drop target occupied, reverting");
                    return Outcome::Reverted(element_id);
                }
                let Some(element) = layout.element_mut(element_id) else {
                    return Outcome::Ignored;
                };
                element.set_area(ghost.area);
                Outcome::Moved {
                    id: element_id,
                    from: origin.top_left(),
                    to: ghost.area.top_left(),
                }
            }
            Gesture::Resizing { .. } => Outcome::Ended,
        }
    }

    /// Pointer left the interactive surface. Nothing partial is committed.
    pub fn pointer_leave(&mut self) -> Outcome {
        match self.transition(Gesture::Idle) {
            Gesture::Idle => Outcome::Ignored,
            Gesture::Selecting { .. } => Outcome::Discarded,
            Gesture::Dragging { element_id, .. } => Outcome::Reverted(element_id),
            Gesture::Resizing { .. } => Outcome::Ended,
        }
    }

    pub fn cancel(&mut self) -> Outcome {
        self.pointer_leave()
    }

    pub fn delete(&mut self, layout: &mut Layout, id: u64) -> Outcome {
        if self.gesture.element_id() == Some(id) {
            self.transition(Gesture::Idle);
        }
        match layout.remove(id) {
            Some(_) => {
                tracing::debug!(id, "deleted element");
                Outcome::Deleted(id)
            }
            None => Outcome::Ignored,
        }
    }

    fn transition(&mut self, next: Gesture) -> Gesture {
        self.exit();
        let previous = std::mem::replace(&mut self.gesture, next);
        self.enter();
        previous
    }

    fn enter(&mut self) {
        self.listening = self.gesture != Gesture::Idle;
        if self.listening {
            tracing::trace!(gesture = self.gesture.name(), "gesture started");
        }
    }

    fn exit(&mut self) {
        if self.listening {
            tracing::trace!(gesture = self.gesture.name(), "gesture finished");
        }
        self.listening = false;
    }
}

fn clamp_span(start: u32, change: i64, max: u32) -> u32 {
    (start as i64 + change).clamp(1, max as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{occupancy, placement};
    use crate::model::{GapUnit, GridConfig};
    use proptest::prelude::*;

    // 100x100 cells with a 10 gap, origin at (0, 0).
    fn setup(columns: u32, rows: u32) -> (Layout, GridMetrics) {
        let config = GridConfig {
            columns,
            rows,
            gap: 10.0,
            unit: GapUnit::Px,
        };
        let size = egui::vec2(
            columns as f32 * 110.0 - 10.0,
            rows as f32 * 110.0 - 10.0,
        );
        let metrics = GridMetrics::new(egui::Rect::from_min_size(egui::Pos2::ZERO, size), &config);
        (Layout::new(config), metrics)
    }

    fn center(metrics: &GridMetrics, col: u32, row: u32) -> egui::Pos2 {
        metrics.area_rect(Area::cell(Cell::new(col, row))).center()
    }

    fn select(
        interaction: &mut Interaction,
        layout: &mut Layout,
        metrics: &GridMetrics,
        from: (u32, u32),
        to: (u32, u32),
    ) -> Outcome {
        let start = center(metrics, from.0, from.1);
        interaction.pointer_down(layout, metrics, PointerTarget::Grid, start);
        interaction.pointer_move(layout, metrics, center(metrics, to.0, to.1));
        interaction.pointer_up(layout)
    }

    #[test]
    fn click_creates_single_cell_element() {
        let (mut layout, metrics) = setup(5, 5);
        let mut it = Interaction::default();
        let down = it.pointer_down(&mut layout, &metrics, PointerTarget::Grid, center(&metrics, 2, 3));
        assert_eq!(down, Outcome::Started);
        assert!(it.is_listening());
        assert_eq!(it.pointer_up(&mut layout), Outcome::Created(1));
        assert!(!it.is_listening());
        assert_eq!(layout.elements[0].area(), Area::new(2, 3, 1, 1));
    }

    #[test]
    fn click_matches_one_by_one_drag_selection() {
        let (mut a, metrics) = setup(5, 5);
        let (mut b, _) = setup(5, 5);
        let mut it = Interaction::default();
        select(&mut it, &mut a, &metrics, (4, 4), (4, 4));
        it.pointer_down(&mut b, &metrics, PointerTarget::Grid, center(&metrics, 4, 4));
        it.pointer_up(&mut b);
        assert_eq!(a.elements, b.elements);
    }

    #[test]
    fn drag_selection_in_reverse_normalizes() {
        let (mut layout, metrics) = setup(5, 5);
        let mut it = Interaction::default();
        let out = select(&mut it, &mut layout, &metrics, (4, 3), (2, 1));
        assert_eq!(out, Outcome::Created(1));
        assert_eq!(layout.elements[0].area(), Area::new(2, 1, 3, 3));
    }

    #[test]
    fn selection_over_element_is_discarded() {
        let (mut layout, metrics) = setup(5, 5);
        layout.push_area(Area::new(3, 3, 1, 1));
        let mut it = Interaction::default();
        let out = select(&mut it, &mut layout, &metrics, (2, 2), (4, 4));
        assert_eq!(out, Outcome::Discarded);
        assert_eq!(layout.elements.len(), 1);
        assert_eq!(layout.next_id(), 2);
    }

    #[test]
    fn selection_ignores_gap_and_leave_cancels() {
        let (mut layout, metrics) = setup(5, 5);
        let mut it = Interaction::default();
        let gap_point = egui::pos2(105.0, 50.0);
        assert_eq!(
            it.pointer_down(&mut layout, &metrics, PointerTarget::Grid, gap_point),
            Outcome::Ignored
        );
        it.pointer_down(&mut layout, &metrics, PointerTarget::Grid, center(&metrics, 1, 1));
        assert_eq!(it.pointer_move(&mut layout, &metrics, gap_point), Outcome::Ignored);
        assert_eq!(it.pointer_leave(), Outcome::Discarded);
        assert!(layout.elements.is_empty());
        assert!(!it.is_listening());
    }

    #[test]
    fn drag_moves_element_by_whole_cells() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(1, 1, 2, 1));
        let mut it = Interaction::default();
        let grab = egui::pos2(30.0, 40.0);
        it.pointer_down(&mut layout, &metrics, PointerTarget::Element(id), grab);
        let out = it.pointer_move(&mut layout, &metrics, grab + egui::vec2(220.0, 110.0));
        assert_eq!(out, Outcome::Updated);
        assert_eq!(
            it.gesture().ghost(),
            Some(Ghost {
                area: Area::new(3, 2, 2, 1),
                blocked: false
            })
        );
        assert_eq!(
            it.pointer_up(&mut layout),
            Outcome::Moved {
                id,
                from: Cell::new(1, 1),
                to: Cell::new(3, 2)
            }
        );
        assert_eq!(layout.element(id).unwrap().area(), Area::new(3, 2, 2, 1));
    }

    #[test]
    fn drag_is_clamped_inside_grid() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(1, 1, 2, 2));
        let mut it = Interaction::default();
        it.pointer_down(&mut layout, &metrics, PointerTarget::Element(id), egui::pos2(5.0, 5.0));
        it.pointer_move(&mut layout, &metrics, egui::pos2(5000.0, 5000.0));
        assert_eq!(it.gesture().ghost().unwrap().area, Area::new(4, 4, 2, 2));
    }

    #[test]
    fn blocked_drop_leaves_element_in_place() {
        let (mut layout, metrics) = setup(5, 5);
        layout.push_area(Area::new(1, 1, 2, 2));
        let dragged = layout.push_area(Area::new(4, 4, 2, 2));
        let mut it = Interaction::default();
        let grab = center(&metrics, 4, 4);
        it.pointer_down(&mut layout, &metrics, PointerTarget::Element(dragged), grab);
        it.pointer_move(&mut layout, &metrics, grab - egui::vec2(330.0, 330.0));
        assert_eq!(
            it.gesture().ghost(),
            Some(Ghost {
                area: Area::new(1, 1, 2, 2),
                blocked: true
            })
        );
        assert_eq!(it.pointer_up(&mut layout), Outcome::Reverted(dragged));
        assert_eq!(layout.element(dragged).unwrap().area(), Area::new(4, 4, 2, 2));
    }

    #[test]
    fn drop_rechecks_cells_filled_during_drag() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(1, 1, 1, 1));
        let mut it = Interaction::default();
        let grab = center(&metrics, 1, 1);
        it.pointer_down(&mut layout, &metrics, PointerTarget::Element(id), grab);
        it.pointer_move(&mut layout, &metrics, grab + egui::vec2(110.0, 0.0));
        assert_eq!(
            it.gesture().ghost(),
            Some(Ghost {
                area: Area::new(2, 1, 1, 1),
                blocked: false
            })
        );
        let copy = placement::duplicate(&mut layout, id).unwrap();
        assert_eq!(layout.element(copy).unwrap().area(), Area::new(2, 1, 1, 1));
        assert_eq!(it.pointer_up(&mut layout), Outcome::Reverted(id));
        assert_eq!(layout.element(id).unwrap().area(), Area::new(1, 1, 1, 1));
        assert_invariants(&layout).unwrap();
    }

    #[test]
    fn drop_on_own_cell_is_not_a_move() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(2, 2, 1, 1));
        let mut it = Interaction::default();
        let grab = center(&metrics, 2, 2);
        it.pointer_down(&mut layout, &metrics, PointerTarget::Element(id), grab);
        it.pointer_move(&mut layout, &metrics, grab + egui::vec2(20.0, 15.0));
        assert_eq!(it.gesture().ghost().unwrap().area, Area::new(2, 2, 1, 1));
        assert_eq!(it.pointer_up(&mut layout), Outcome::Reverted(id));
        assert!(!it.is_listening());
    }

    #[test]
    fn leaving_during_drag_always_reverts() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(1, 1, 1, 1));
        let mut it = Interaction::default();
        let grab = center(&metrics, 1, 1);
        it.pointer_down(&mut layout, &metrics, PointerTarget::Element(id), grab);
        it.pointer_move(&mut layout, &metrics, grab + egui::vec2(220.0, 0.0));
        assert!(!it.gesture().ghost().unwrap().blocked);
        assert_eq!(it.pointer_leave(), Outcome::Reverted(id));
        assert_eq!(layout.element(id).unwrap().area(), Area::new(1, 1, 1, 1));
    }

    #[test]
    fn resize_grows_and_respects_neighbours() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(1, 1, 1, 1));
        layout.push_area(Area::new(4, 1, 1, 1));
        let mut it = Interaction::default();
        let handle = egui::pos2(100.0, 100.0);
        assert_eq!(
            it.pointer_down(&mut layout, &metrics, PointerTarget::ResizeHandle(id), handle),
            Outcome::Started
        );
        let out = it.pointer_move(&mut layout, &metrics, handle + egui::vec2(220.0, 110.0));
        assert_eq!(
            out,
            Outcome::Resized {
                id,
                column_span: 3,
                row_span: 2
            }
        );
        // Four columns would hit the element at column 4.
        let out = it.pointer_move(&mut layout, &metrics, handle + egui::vec2(330.0, 110.0));
        assert_eq!(out, Outcome::Ignored);
        assert_eq!(layout.element(id).unwrap().area(), Area::new(1, 1, 3, 2));
        assert_eq!(it.pointer_up(&mut layout), Outcome::Ended);
        assert_eq!(layout.element(id).unwrap().area(), Area::new(1, 1, 3, 2));
    }

    #[test]
    fn resize_span_is_clamped() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(4, 4, 2, 2));
        let mut it = Interaction::default();
        let handle = egui::pos2(540.0, 540.0);
        it.start_resize(&layout, id, handle);
        it.pointer_move(&mut layout, &metrics, handle + egui::vec2(900.0, -900.0));
        assert_eq!(layout.element(id).unwrap().area(), Area::new(4, 4, 2, 1));
        assert_eq!(it.pointer_leave(), Outcome::Ended);
    }

    #[test]
    fn delete_control_removes_directly() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(2, 2, 1, 1));
        let mut it = Interaction::default();
        let out = it.pointer_down(&mut layout, &metrics, PointerTarget::DeleteControl(id), egui::Pos2::ZERO);
        assert_eq!(out, Outcome::Deleted(id));
        assert!(layout.elements.is_empty());
        assert!(!it.is_listening());
    }

    #[test]
    fn deleting_dragged_element_ends_gesture() {
        let (mut layout, metrics) = setup(5, 5);
        let id = layout.push_area(Area::new(2, 2, 1, 1));
        let mut it = Interaction::default();
        it.pointer_down(&mut layout, &metrics, PointerTarget::Element(id), center(&metrics, 2, 2));
        assert_eq!(it.delete(&mut layout, id), Outcome::Deleted(id));
        assert_eq!(it.gesture(), &Gesture::Idle);
        assert_eq!(it.pointer_up(&mut layout), Outcome::Ignored);
    }

    #[test]
    fn second_pointer_down_is_ignored_mid_gesture() {
        let (mut layout, metrics) = setup(5, 5);
        let mut it = Interaction::default();
        it.pointer_down(&mut layout, &metrics, PointerTarget::Grid, center(&metrics, 1, 1));
        let again = it.pointer_down(&mut layout, &metrics, PointerTarget::Grid, center(&metrics, 3, 3));
        assert_eq!(again, Outcome::Ignored);
        assert_eq!(it.gesture().selection(), Some(Area::new(1, 1, 1, 1)));
    }

    #[derive(Clone, Debug)]
    enum Op {
        Select(u32, u32, u32, u32),
        Drag(u32, u32, i32, i32),
        Resize(u32, u32, i32, i32),
        Delete(u32),
        Leave,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (1u32..=6, 1u32..=6, 1u32..=6, 1u32..=6).prop_map(|(a, b, c, d)| Op::Select(a, b, c, d)),
            (0u32..8, 0u32..2, -4i32..=4, -4i32..=4).prop_map(|(i, h, x, y)| Op::Drag(i, h, x, y)),
            (0u32..8, 0u32..2, -4i32..=4, -4i32..=4).prop_map(|(i, h, x, y)| Op::Resize(i, h, x, y)),
            (0u32..8).prop_map(Op::Delete),
            Just(Op::Leave),
        ]
    }

    fn assert_invariants(layout: &Layout) -> Result<(), TestCaseError> {
        for (i, a) in layout.elements.iter().enumerate() {
            prop_assert!(occupancy::fits(&layout.config, a.area()), "out of bounds: {:?}", a);
            for b in &layout.elements[i + 1..] {
                prop_assert!(!a.area().overlaps(b.area()), "{:?} overlaps {:?}", a, b);
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn random_gestures_never_overlap(ops in prop::collection::vec(op(), 1..40)) {
            let (mut layout, metrics) = setup(6, 6);
            let mut it = Interaction::default();
            for op in ops {
                match op {
                    Op::Select(c0, r0, c1, r1) => {
                        select(&mut it, &mut layout, &metrics, (c0, r0), (c1, r1));
                    }
                    Op::Drag(pick, half, dx, dy) | Op::Resize(pick, half, dx, dy) => {
                        if layout.elements.is_empty() {
                            continue;
                        }
                        let element = &layout.elements[pick as usize % layout.elements.len()];
                        let id = element.id;
                        let rect = metrics.area_rect(element.area());
                        let step = egui::vec2(dx as f32, dy as f32) * 110.0
                            + egui::vec2(half as f32 * 40.0, half as f32 * 40.0);
                        let (target, grab) = if matches!(op, Op::Drag(..)) {
                            (PointerTarget::Element(id), rect.center())
                        } else {
                            (PointerTarget::ResizeHandle(id), rect.max)
                        };
                        it.pointer_down(&mut layout, &metrics, target, grab);
                        it.pointer_move(&mut layout, &metrics, grab + step * 0.5);
                        it.pointer_move(&mut layout, &metrics, grab + step);
                        it.pointer_up(&mut layout);
                    }
                    Op::Delete(pick) => {
                        if let Some(e) = layout.elements.get(pick as usize % layout.elements.len().max(1)) {
                            let id = e.id;
                            it.delete(&mut layout, id);
                        }
                    }
                    Op::Leave => {
                        it.pointer_down(&mut layout, &metrics, PointerTarget::Grid, center(&metrics, 1, 1));
                        it.pointer_leave();
                    }
                }
                prop_assert!(!it.is_listening());
                assert_invariants(&layout)?;
            }
        }

        #[test]
        fn grid_resizes_keep_invariants(
            cells in prop::collection::vec((1u32..=8, 1u32..=8, 1u32..=3, 1u32..=3), 0..12),
            columns in 1u32..=10,
            rows in 1u32..=10,
        ) {
            let (mut layout, _) = setup(8, 8);
            for (col, row, cs, rs) in cells {
                let area = Area::new(col, row, cs, rs);
                if occupancy::fits(&layout.config, area)
                    && !occupancy::is_occupied(&layout.elements, area, None)
                {
                    layout.push_area(area);
                }
            }
            let before = layout.elements.len();
            let removed = layout.set_config(GridConfig { columns, rows, ..layout.config });
            prop_assert_eq!(before, layout.elements.len() + removed.len());
            assert_invariants(&layout)?;
        }
    }
}
