use crate::model::{Element, GridConfig};
use std::fmt::Write as _;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutMarkup {
    pub html: String,
    pub css: String,
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn element_label(element: &Element) -> String {
    let text = element.text.trim();
    if text.is_empty() {
        format!("Element {}", element.id)
    } else {
        escape_html(text)
    }
}

pub fn render(config: &GridConfig, elements: &[Element]) -> LayoutMarkup {
    LayoutMarkup {
        html: render_html(elements),
        css: render_css(config, elements),
    }
}

pub fn render_html(elements: &[Element]) -> String {
    let mut html = String::from("<div class=\"grid-container\">\n");
    for e in elements {
        let _ = writeln!(
            html,
            "  <div class=\"grid-item item-{}\">{}</div>",
            e.id,
            element_label(e)
        );
    }
    html.push_str("</div>");
    html
}

pub fn render_css(config: &GridConfig, elements: &[Element]) -> String {
    let mut css = String::from(".grid-container {\n  display: grid;\n");
    let _ = writeln!(css, "  grid-template-columns: repeat({}, 1fr);", config.columns);
    let _ = writeln!(css, "  grid-template-rows: repeat({}, 1fr);", config.rows);
    if config.gap > 0.0 {
        let _ = writeln!(css, "  gap: {}{};", config.gap, config.unit.suffix());
    }
    css.push_str("}\n\n");
    css.push_str(concat!(
        ".grid-item {\n",
        "  background: #8b7e6a;\n",
        "  padding: 20px;\n",
        "  border-radius: 10px;\n",
        "  color: white;\n",
        "  display: flex;\n",
        "  align-items: center;\n",
        "  justify-content: center;\n",
        "}\n",
    ));
    for e in elements {
        let _ = write!(
            css,
            "\n.item-{} {{\n  grid-column: {} / span {};\n  grid-row: {} / span {};\n",
            e.id, e.column, e.column_span, e.row, e.row_span
        );
        if let Some(color) = &e.color {
            let _ = writeln!(css, "  background-color: {};", color);
        }
        css.push_str("}\n");
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Area, GapUnit, Layout};

    fn sample() -> Layout {
        let mut layout = Layout::new(GridConfig {
            columns: 4,
            rows: 3,
            gap: 8.0,
            unit: GapUnit::Px,
        });
        layout.push_area(Area::new(1, 1, 4, 1));
        let id = layout.push_area(Area::new(2, 2, 1, 2));
        if let Some(e) = layout.element_mut(id) {
            e.text = "Side <nav>".to_string();
            e.color = Some("#d5e8d4".to_string());
        }
        layout
    }

    #[test]
    fn html_lists_elements_in_order() {
        let layout = sample();
        let html = render_html(&layout.elements);
        assert_eq!(
            html,
            "<div class=\"grid-container\">\n  \
             <div class=\"grid-item item-1\">Element 1</div>\n  \
             <div class=\"grid-item item-2\">Side &lt;nav&gt;</div>\n\
             </div>"
        );
    }

    #[test]
    fn css_declares_tracks_gap_and_placements() {
        let layout = sample();
        let css = render_css(&layout.config, &layout.elements);
        assert!(css.contains("grid-template-columns: repeat(4, 1fr);"));
        assert!(css.contains("grid-template-rows: repeat(3, 1fr);"));
        assert!(css.contains("  gap: 8px;\n"));
        assert!(css.contains(".item-1 {\n  grid-column: 1 / span 4;\n  grid-row: 1 / span 1;\n}\n"));
        assert!(css.contains(
            ".item-2 {\n  grid-column: 2 / span 1;\n  grid-row: 2 / span 2;\n  background-color: #d5e8d4;\n}\n"
        ));
    }

    #[test]
    fn zero_gap_is_omitted_and_millimetres_are_suffixed() {
        let mut config = GridConfig::default();
        config.gap = 0.0;
        assert!(!render_css(&config, &[]).contains("gap:"));
        let css = render_css(&GridConfig::newspaper(), &[]);
        assert!(css.contains("  gap: 2.4mm;\n"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let layout = sample();
        let first = render(&layout.config, &layout.elements);
        let second = render(&layout.config, &layout.elements);
        assert_eq!(first, second);
        assert_eq!(layout, sample());
    }
}
