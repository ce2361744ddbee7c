//! Portable-content blocks.
//!
//! A post body is an ordered array of typed nodes, discriminated by `_type`.
//! Text blocks further carry a `style` (paragraph, heading level, quote) and
//! optional list membership. Anything with an unrecognised `_type`, or a
//! known `_type` whose fields do not decode, becomes [`ContentBlock::Unknown`]
//! so that one odd node never fails the whole document.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::post::null_as_default;
use super::ImageRef;

/// One node of a rich-text body
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(TextBlock),
    Image(ImageRef),
    Code(CodeBlock),
    Unknown { type_name: String },
}

impl ContentBlock {
    /// Rendering discriminant: the text style for text blocks
    /// (`"normal"`, `"h1"`, `"blockquote"`, ...), `"list-item"` for list
    /// members, and the `_type` for everything else.
    pub fn discriminant(&self) -> &str {
        match self {
            Self::Text(block) if block.list_item.is_some() => "list-item",
            Self::Text(block) => block.style.as_deref().unwrap_or("normal"),
            Self::Image(_) => "image",
            Self::Code(_) => "code",
            Self::Unknown { type_name } => type_name,
        }
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            Self::Text(block) => Some(block),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ContentBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let type_name = value
            .get("_type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let decoded = match type_name.as_str() {
            "block" => serde_json::from_value(value).map(Self::Text),
            "image" => serde_json::from_value(value).map(Self::Image),
            "code" => serde_json::from_value(value).map(Self::Code),
            _ => return Ok(Self::Unknown { type_name }),
        };

        Ok(decoded.unwrap_or_else(|err| {
            tracing::debug!(block_type = %type_name, error = %err, "undecodable content block");
            Self::Unknown { type_name }
        }))
    }
}

impl Serialize for ContentBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::Error;

        let fields = match self {
            Self::Text(block) => serde_json::to_value(block),
            Self::Image(image) => serde_json::to_value(image),
            Self::Code(code) => serde_json::to_value(code),
            Self::Unknown { .. } => Ok(Value::Object(Default::default())),
        };
        let mut value = fields.map_err(S::Error::custom)?;
        let type_name = match self {
            Self::Text(_) => "block",
            other => other.discriminant(),
        };
        if let Value::Object(map) = &mut value {
            map.insert("_type".to_string(), Value::String(type_name.to_string()));
        }
        value.serialize(serializer)
    }
}

/// A paragraph, heading, quote or list item made of inline spans
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    #[serde(rename = "_key", default)]
    pub key: Option<String>,

    #[serde(default)]
    pub style: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<Span>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub mark_defs: Vec<MarkDef>,

    /// `bullet` or `number` when the block is a list member
    #[serde(default)]
    pub list_item: Option<String>,

    #[serde(default)]
    pub level: Option<u32>,
}

impl TextBlock {
    /// Concatenated text of all spans
    pub fn plain_text(&self) -> String {
        self.children.iter().map(|s| s.text.as_str()).collect()
    }

    pub fn is_numbered(&self) -> bool {
        self.list_item.as_deref() == Some("number")
    }
}

/// Inline run of text with decorator marks and annotation keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "_type", default)]
    pub type_name: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub marks: Vec<String>,
}

/// Annotation referenced from a span's marks by key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key", default)]
    pub key: String,

    #[serde(rename = "_type", default)]
    pub type_name: String,

    #[serde(default)]
    pub href: Option<String>,
}

/// Source code block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,

    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> ContentBlock {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_text_block_discriminants() {
        let heading = decode(json!({
            "_type": "block", "style": "h2",
            "children": [{"_type": "span", "text": "Title", "marks": []}]
        }));
        assert_eq!(heading.discriminant(), "h2");
        assert_eq!(heading.as_text().unwrap().plain_text(), "Title");

        let paragraph = decode(json!({"_type": "block", "children": []}));
        assert_eq!(paragraph.discriminant(), "normal");

        let item = decode(json!({
            "_type": "block", "style": "normal", "listItem": "number", "level": 1,
            "children": [{"_type": "span", "text": "one"}]
        }));
        assert_eq!(item.discriminant(), "list-item");
        assert!(item.as_text().unwrap().is_numbered());
    }

    #[test]
    fn test_image_and_code_blocks() {
        let image = decode(json!({
            "_type": "image", "asset": {"_ref": "image-a-1x1-png"}, "alt": "x", "caption": "cap"
        }));
        assert_eq!(image.discriminant(), "image");
        match image {
            ContentBlock::Image(img) => assert_eq!(img.caption.as_deref(), Some("cap")),
            other => panic!("expected image, got {other:?}"),
        }

        let code = decode(json!({
            "_type": "code", "code": "fn main() {}", "language": "rust", "filename": "main.rs"
        }));
        assert_eq!(code.discriminant(), "code");
        match code {
            ContentBlock::Code(c) => {
                assert_eq!(c.language.as_deref(), Some("rust"));
                assert_eq!(c.filename.as_deref(), Some("main.rs"));
            }
            other => panic!("expected code, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_and_malformed_blocks() {
        let video = decode(json!({"_type": "youtube", "url": "https://example.com"}));
        assert_eq!(
            video,
            ContentBlock::Unknown {
                type_name: "youtube".to_string()
            }
        );

        let broken = decode(json!({"_type": "code", "code": 42}));
        assert_eq!(broken.discriminant(), "code");
        assert!(matches!(broken, ContentBlock::Unknown { .. }));

        let untyped = decode(json!({"text": "?"}));
        assert_eq!(untyped.discriminant(), "");
    }

    #[test]
    fn test_mark_def_without_key_keeps_text() {
        let block = decode(json!({
            "_type": "block",
            "style": "normal",
            "markDefs": [{"_type": "link", "href": "https://example.com"}],
            "children": [{"_type": "span", "text": "Important paragraph", "marks": []}]
        }));
        let text = block.as_text().unwrap();
        assert_eq!(text.plain_text(), "Important paragraph");
        assert_eq!(text.mark_defs[0].key, "");
    }

    #[test]
    fn test_body_decodes_mixed_sequence() {
        let body: Vec<ContentBlock> = serde_json::from_value(json!([
            {"_type": "block", "style": "h1", "children": [{"_type": "span", "text": "Intro"}]},
            {"_type": "mystery"},
            {"_type": "code", "code": "x"}
        ]))
        .unwrap();
        let kinds: Vec<_> = body.iter().map(|b| b.discriminant()).collect();
        assert_eq!(kinds, ["h1", "mystery", "code"]);
    }

    #[test]
    fn test_serialize_keeps_type_tag() {
        let block = ContentBlock::Code(CodeBlock {
            code: "x".to_string(),
            ..Default::default()
        });
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["_type"], "code");
        let back: ContentBlock = serde_json::from_value(value).unwrap();
        assert_eq!(back, block);
    }
}
