use crate::engine::occupancy::is_occupied;
use crate::engine::{Gesture, GridMetrics, PointerTarget};
use crate::model::{self, GapUnit, GridConfig, MAX_TRACKS, MIN_TRACKS};
use eframe::egui;

/// CSS reference pixels per millimetre.
pub(super) const MM_TO_PX: f32 = 96.0 / 25.4;
const GRID_MARGIN: f32 = 16.0;
const CONTROL_SIZE: f32 = 16.0;
const HANDLE_SIZE: f32 = 12.0;
const ACCENT: egui::Color32 = egui::Color32::from_rgb(90, 160, 255);
const DEFAULT_FILL: egui::Color32 = egui::Color32::from_rgb(0x8b, 0x7e, 0x6a);

pub(super) const PALETTE: &[(&str, &str)] = &[
    ("White", "#ffffff"),
    ("Blue", "#dae8fc"),
    ("Green", "#d5e8d4"),
    ("Yellow", "#fff2cc"),
    ("Pink", "#f8cecc"),
];

pub(super) fn display_gap(config: &GridConfig) -> f32 {
    match config.unit {
        GapUnit::Px => config.gap,
        GapUnit::Mm => config.gap * MM_TO_PX,
    }
}

pub(super) fn grid_metrics(canvas: egui::Rect, config: &GridConfig) -> GridMetrics {
    GridMetrics::new(canvas.shrink(GRID_MARGIN), config).with_gap(display_gap(config))
}

pub(super) fn parse_hex_color(s: &str) -> Option<egui::Color32> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize, len: usize| {
        let v = u8::from_str_radix(hex.get(i..i + len)?, 16).ok()?;
        Some(if len == 1 { v * 17 } else { v })
    };
    match hex.len() {
        6 => Some(egui::Color32::from_rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
        3 => Some(egui::Color32::from_rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
        _ => None,
    }
}

pub(super) fn delete_control_rect(element: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(element.max.x - CONTROL_SIZE - 4.0, element.min.y + 4.0),
        egui::vec2(CONTROL_SIZE, CONTROL_SIZE),
    )
}

pub(super) fn resize_handle_rect(element: egui::Rect) -> egui::Rect {
    egui::Rect::from_min_max(element.max - egui::vec2(HANDLE_SIZE, HANDLE_SIZE), element.max)
}

/// Topmost thing under `pos`. Later elements are drawn over earlier ones.
pub(super) fn pointer_target(
    metrics: &GridMetrics,
    layout: &model::Layout,
    pos: egui::Pos2,
) -> PointerTarget {
    for element in layout.elements.iter().rev() {
        let rect = metrics.area_rect(element.area());
        if delete_control_rect(rect).contains(pos) {
            return PointerTarget::DeleteControl(element.id);
        }
        if resize_handle_rect(rect).contains(pos) {
            return PointerTarget::ResizeHandle(element.id);
        }
        if rect.contains(pos) {
            return PointerTarget::Element(element.id);
        }
    }
    PointerTarget::Grid
}

pub(super) fn stepper(ui: &mut egui::Ui, label: &str, value: u32) -> Option<u32> {
    let mut next = None;
    ui.label(label);
    if ui
        .add_enabled(value > MIN_TRACKS, egui::Button::new("−").small())
        .clicked()
    {
        next = Some(value - 1);
    }
    ui.monospace(format!("{value:>2}"));
    if ui
        .add_enabled(value < MAX_TRACKS, egui::Button::new("+").small())
        .clicked()
    {
        next = Some(value + 1);
    }
    next
}

/// Palette row. `Some(None)` means the colour was cleared.
pub(super) fn color_swatches(ui: &mut egui::Ui, current: Option<&str>) -> Option<Option<String>> {
    let mut picked = None;
    ui.horizontal(|ui| {
        for (name, hex) in PALETTE {
            let fill = parse_hex_color(hex).unwrap_or(egui::Color32::WHITE);
            let active = current.is_some_and(|c| c.eq_ignore_ascii_case(hex));
            let button = egui::Button::new("").fill(fill).selected(active);
            if ui.add_sized([20.0, 20.0], button).on_hover_text(*name).clicked() {
                picked = Some(Some(hex.to_string()));
            }
        }
        if ui
            .add_enabled(current.is_some(), egui::Button::new("None").small())
            .clicked()
        {
            picked = Some(None);
        }
    });
    picked
}

pub(super) fn draw_grid(painter: &egui::Painter, canvas: egui::Rect, metrics: &GridMetrics) {
    let visuals = painter.ctx().style().visuals.clone();
    painter.rect_filled(canvas, 0.0, visuals.extreme_bg_color);
    let cell_fill = visuals.faint_bg_color;
    let cell_stroke = egui::Stroke::new(1.0, visuals.widgets.noninteractive.bg_stroke.color);
    for row in 1..=metrics.rows {
        for col in 1..=metrics.columns {
            let rect = metrics.area_rect(model::Area::cell(model::Cell::new(col, row)));
            painter.rect_filled(rect, 4.0, cell_fill);
            painter.rect_stroke(rect, 4.0, cell_stroke, egui::StrokeKind::Inside);
        }
    }
}

/// Ghost and selection rectangles. Green when the gesture would commit, red
/// when it would be rejected.
pub(super) fn draw_overlays(
    painter: &egui::Painter,
    metrics: &GridMetrics,
    layout: &model::Layout,
    gesture: &Gesture,
) {
    if let Some(ghost) = gesture.ghost() {
        let (fill, stroke) = verdict_colors(ghost.blocked);
        let rect = metrics.area_rect(ghost.area);
        painter.rect_filled(rect, 6.0, fill);
        painter.rect_stroke(rect, 6.0, stroke, egui::StrokeKind::Inside);
    }
    if let Some(area) = gesture.selection() {
        let blocked = is_occupied(&layout.elements, area, None);
        let fill = if blocked {
            egui::Color32::from_rgba_unmultiplied(220, 60, 60, 50)
        } else {
            egui::Color32::from_rgba_unmultiplied(90, 160, 255, 50)
        };
        let stroke = egui::Stroke::new(
            2.0,
            if blocked {
                egui::Color32::from_rgb(220, 60, 60)
            } else {
                ACCENT
            },
        );
        let rect = metrics.area_rect(area);
        painter.rect_filled(rect, 6.0, fill);
        painter.rect_stroke(rect, 6.0, stroke, egui::StrokeKind::Inside);
    }
}

fn verdict_colors(blocked: bool) -> (egui::Color32, egui::Stroke) {
    if blocked {
        (
            egui::Color32::from_rgba_unmultiplied(220, 60, 60, 60),
            egui::Stroke::new(2.0, egui::Color32::from_rgb(220, 60, 60)),
        )
    } else {
        (
            egui::Color32::from_rgba_unmultiplied(60, 180, 90, 60),
            egui::Stroke::new(2.0, egui::Color32::from_rgb(60, 180, 90)),
        )
    }
}

pub(super) fn draw_elements(
    painter: &egui::Painter,
    metrics: &GridMetrics,
    layout: &model::Layout,
    gesture: &Gesture,
    selected: Option<u64>,
    pointer: Option<egui::Pos2>,
) {
    // The dragged element is drawn last so it floats over its neighbours.
    let dragged = match gesture {
        Gesture::Dragging { element_id, .. } => Some(*element_id),
        _ => None,
    };
    for element in layout.elements.iter().filter(|e| Some(e.id) != dragged) {
        let rect = metrics.area_rect(element.area());
        draw_element(painter, element, rect, selected == Some(element.id), false);
    }
    let Some(element) = dragged.and_then(|id| layout.element(id)) else {
        return;
    };
    let mut rect = metrics.area_rect(element.area());
    if let Some(top_left) = pointer.and_then(|p| gesture.drag_top_left(p)) {
        rect = egui::Rect::from_min_size(top_left, rect.size());
    }
    draw_element(painter, element, rect, selected == Some(element.id), true);
}

fn draw_element(
    painter: &egui::Painter,
    element: &model::Element,
    rect: egui::Rect,
    is_selected: bool,
    floating: bool,
) {
    let custom = element.color.as_deref().and_then(parse_hex_color);
    let mut fill = custom.unwrap_or(DEFAULT_FILL);
    if floating {
        fill = fill.gamma_multiply(0.75);
    }
    let text_color = if custom.is_some() {
        egui::Color32::from_gray(30)
    } else {
        egui::Color32::WHITE
    };
    let stroke = if is_selected {
        egui::Stroke::new(2.0, ACCENT)
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(70))
    };
    painter.rect_filled(rect, 8.0, fill);
    painter.rect_stroke(rect, 8.0, stroke, egui::StrokeKind::Inside);

    let label = element
        .text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Element {}", element.id));
    painter.with_clip_rect(rect.shrink(4.0)).text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        label,
        egui::FontId::proportional(14.0),
        text_color,
    );

    let close = delete_control_rect(rect);
    painter.circle_filled(close.center(), CONTROL_SIZE * 0.5, egui::Color32::from_black_alpha(90));
    painter.text(
        close.center(),
        egui::Align2::CENTER_CENTER,
        "×",
        egui::FontId::proportional(13.0),
        egui::Color32::WHITE,
    );

    let handle = resize_handle_rect(rect);
    painter.add(egui::Shape::convex_polygon(
        vec![
            egui::pos2(handle.max.x, handle.min.y),
            handle.max,
            egui::pos2(handle.min.x, handle.max.y),
        ],
        text_color.gamma_multiply(0.6),
        egui::Stroke::NONE,
    ));
}
