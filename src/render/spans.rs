//! Inline span rendering: decorators and link annotations

use maud::{html, Markup};

use crate::content::{MarkDef, Span, TextBlock};
use crate::helpers::is_safe_href;

/// Render all spans of a text block
pub fn render_spans(block: &TextBlock) -> Markup {
    html! {
        @for span in &block.children {
            (render_span(span, &block.mark_defs))
        }
    }
}

fn render_span(span: &Span, defs: &[MarkDef]) -> Markup {
    let text = render_text(&span.text);
    // First mark ends up outermost.
    span.marks
        .iter()
        .rev()
        .fold(text, |inner, mark| apply_mark(inner, mark, defs))
}

/// Text with soft line breaks turned into `<br>`
fn render_text(text: &str) -> Markup {
    html! {
        @for (i, line) in text.split('\n').enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}

fn apply_mark(inner: Markup, mark: &str, defs: &[MarkDef]) -> Markup {
    match mark {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "code" => html! { code { (inner) } },
        "underline" => html! { u { (inner) } },
        "strike-through" => html! { s { (inner) } },
        key => match defs.iter().find(|d| d.key == key) {
            Some(def) if def.type_name == "link" => match def.href.as_deref() {
                Some(href) if is_safe_href(href) => {
                    let external = href.starts_with("http://") || href.starts_with("https://");
                    html! {
                        @if external {
                            a href=(href) rel="noopener noreferrer" target="_blank" { (inner) }
                        } @else {
                            a href=(href) { (inner) }
                        }
                    }
                }
                _ => inner,
            },
            _ => inner,
        },
    }
}
