//! Portable-content rendering.
//!
//! Blocks are dispatched by [`ContentBlock::discriminant`] through a
//! [`Rules`] map. Every rule is a pure function from a block to an optional
//! markup fragment; a block whose discriminant has no rule, or whose rule
//! returns `None`, is left out of the output.
//!
//! Text blocks with an unrecognised style, or whose style rule yields
//! nothing, fall back to the `normal` paragraph rule so their text is never
//! lost.

mod highlight;
mod rules;
mod spans;

use std::collections::HashMap;
use std::sync::Arc;

use maud::{Markup, PreEscaped};

use crate::config::SiteConfig;
use crate::content::ContentBlock;
use crate::image::ImageUrlBuilder;

pub use highlight::Highlighter;

/// A rendering rule for one discriminant
pub type Rule =
    Arc<dyn for<'a> Fn(&ContentBlock, &RenderContext<'a>) -> Option<Markup> + Send + Sync>;

/// Everything a rule may consult besides the block itself
pub struct RenderContext<'a> {
    pub images: &'a ImageUrlBuilder,
    /// Target width for inline images
    pub image_width: u32,
    pub highlighter: Option<&'a Highlighter>,
}

/// Mapping from discriminant to rendering rule
#[derive(Clone)]
pub struct Rules {
    rules: HashMap<String, Rule>,
}

impl Rules {
    /// A map with no rules at all
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add or replace the rule for `discriminant`
    pub fn with<F>(mut self, discriminant: &str, rule: F) -> Self
    where
        F: for<'a> Fn(&ContentBlock, &RenderContext<'a>) -> Option<Markup> + Send + Sync + 'static,
    {
        self.rules.insert(discriminant.to_string(), Arc::new(rule));
        self
    }

    /// Remove the rule for `discriminant`
    pub fn without(mut self, discriminant: &str) -> Self {
        self.rules.remove(discriminant);
        self
    }

    pub fn get(&self, discriminant: &str) -> Option<&Rule> {
        self.rules.get(discriminant)
    }

    pub fn contains(&self, discriminant: &str) -> bool {
        self.rules.contains_key(discriminant)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::empty()
            .with("normal", rules::paragraph)
            .with("h1", rules::heading(1))
            .with("h2", rules::heading(2))
            .with("h3", rules::heading(3))
            .with("h4", rules::heading(4))
            .with("blockquote", rules::blockquote)
            .with("list-item", rules::list_item)
            .with("image", rules::image)
            .with("code", rules::code)
    }
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.rules.keys().collect();
        keys.sort();
        f.debug_struct("Rules").field("discriminants", &keys).finish()
    }
}

/// Renders post bodies to HTML
#[derive(Debug)]
pub struct PortableRenderer {
    rules: Rules,
    images: ImageUrlBuilder,
    image_width: u32,
    highlighter: Option<Highlighter>,
}

impl PortableRenderer {
    /// Renderer with the default rules and no highlighting
    pub fn new(images: ImageUrlBuilder, image_width: u32) -> Self {
        Self {
            rules: Rules::default(),
            images,
            image_width,
            highlighter: None,
        }
    }

    /// Renderer configured from the site settings
    pub fn from_config(config: &SiteConfig) -> Self {
        let highlighter = if config.highlight.enable {
            Highlighter::new(&config.highlight.theme)
        } else {
            None
        };

        Self {
            rules: Rules::default(),
            images: ImageUrlBuilder::from_config(&config.cms),
            image_width: config.body_image_width,
            highlighter,
        }
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_highlighter(mut self, highlighter: Highlighter) -> Self {
        self.highlighter = Some(highlighter);
        self
    }

    pub fn images(&self) -> &ImageUrlBuilder {
        &self.images
    }

    fn context(&self) -> RenderContext<'_> {
        RenderContext {
            images: &self.images,
            image_width: self.image_width,
            highlighter: self.highlighter.as_ref(),
        }
    }

    /// Render a single block, or `None` if it is omitted
    pub fn render_block(&self, block: &ContentBlock) -> Option<Markup> {
        self.render_with(block, &self.context())
    }

    fn render_with(&self, block: &ContentBlock, ctx: &RenderContext<'_>) -> Option<Markup> {
        let discriminant = block.discriminant();
        let fragment = self.rules.get(discriminant).and_then(|rule| rule(block, ctx));
        let fragment = match (fragment, block) {
            (None, ContentBlock::Text(_)) if discriminant != "normal" => {
                self.rules.get("normal").and_then(|rule| rule(block, ctx))
            }
            (fragment, _) => fragment,
        };

        if fragment.is_none() {
            tracing::debug!(
                block_type = %discriminant,
                has_rule = self.rules.contains(discriminant),
                "content block omitted"
            );
        }
        fragment
    }

    /// Render blocks to fragments in input order, skipping omitted blocks
    pub fn render_blocks(&self, blocks: &[ContentBlock]) -> Vec<Markup> {
        let ctx = self.context();
        blocks
            .iter()
            .filter_map(|block| self.render_with(block, &ctx))
            .collect()
    }

    /// Render a whole body, wrapping runs of list items in `ul`/`ol`
    pub fn render_body(&self, blocks: &[ContentBlock]) -> Markup {
        let ctx = self.context();
        let mut out = String::new();
        let mut open_list: Option<bool> = None;

        for block in blocks {
            let numbered = match block {
                ContentBlock::Text(text) if text.list_item.is_some() => Some(text.is_numbered()),
                _ => None,
            };

            if open_list.is_some() && open_list != numbered {
                out.push_str(close_tag(open_list));
                open_list = None;
            }

            let Some(fragment) = self.render_with(block, &ctx) else {
                continue;
            };

            if open_list.is_none() {
                if let Some(n) = numbered {
                    out.push_str(if n { "<ol>" } else { "<ul>" });
                    open_list = Some(n);
                }
            }
            out.push_str(&fragment.into_string());
        }
        out.push_str(close_tag(open_list));

        PreEscaped(out)
    }
}

fn close_tag(open_list: Option<bool>) -> &'static str {
    match open_list {
        Some(true) => "</ol>",
        Some(false) => "</ul>",
        None => "",
    }
}
