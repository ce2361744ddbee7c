//! Built-in rendering rules, one per discriminant

use maud::{html, Markup, PreEscaped};

use super::spans::render_spans;
use super::RenderContext;
use crate::content::ContentBlock;

pub(super) fn paragraph(block: &ContentBlock, _ctx: &RenderContext<'_>) -> Option<Markup> {
    let text = block.as_text()?;
    Some(html! { p { (render_spans(text)) } })
}

pub(super) fn heading(
    level: u8,
) -> impl for<'a> Fn(&ContentBlock, &RenderContext<'a>) -> Option<Markup> + Send + Sync {
    move |block: &ContentBlock, _ctx: &RenderContext<'_>| {
        let text = block.as_text()?;
        let spans = render_spans(text);
        let class = format!("heading heading-{}", level);
        Some(match level {
            1 => html! { h1 class=(class) { (spans) } },
            2 => html! { h2 class=(class) { (spans) } },
            3 => html! { h3 class=(class) { (spans) } },
            _ => html! { h4 class=(class) { (spans) } },
        })
    }
}

pub(super) fn blockquote(block: &ContentBlock, _ctx: &RenderContext<'_>) -> Option<Markup> {
    let text = block.as_text()?;
    Some(html! { blockquote class="quote" { p { (render_spans(text)) } } })
}

pub(super) fn list_item(block: &ContentBlock, _ctx: &RenderContext<'_>) -> Option<Markup> {
    let text = block.as_text()?;
    Some(html! { li { (render_spans(text)) } })
}

pub(super) fn image(block: &ContentBlock, ctx: &RenderContext<'_>) -> Option<Markup> {
    let ContentBlock::Image(image) = block else {
        return None;
    };
    let src = ctx.images.url(image, ctx.image_width, None)?;
    let alt = image.alt.as_deref().unwrap_or_default();
    let caption = image.caption.as_deref().filter(|c| !c.trim().is_empty());

    Some(html! {
        figure class="body-image" {
            img src=(src) alt=(alt) width=(ctx.image_width) loading="lazy";
            @if let Some(caption) = caption {
                figcaption { (caption) }
            }
        }
    })
}

pub(super) fn code(block: &ContentBlock, ctx: &RenderContext<'_>) -> Option<Markup> {
    let ContentBlock::Code(code) = block else {
        return None;
    };
    let language = code
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());
    let filename = code.filename.as_deref().filter(|f| !f.trim().is_empty());
    let highlighted = match (ctx.highlighter, language) {
        (Some(h), Some(lang)) => h.highlight(&code.code, lang),
        _ => None,
    };

    Some(html! {
        figure class="code-block" data-language=[language] {
            @if let Some(filename) = filename {
                figcaption class="code-filename" { (filename) }
            }
            @if let Some(highlighted) = highlighted {
                (PreEscaped(highlighted))
            } @else {
                pre {
                    code class=[language.map(|l| format!("language-{}", l))] { (code.code) }
                }
            }
        }
    })
}
