#![allow(dead_code)]

use std::cmp::Ordering as CmpOrdering;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use cms_blog::cms::{ContentSource, Filter, GroqQuery, Slice};
use cms_blog::error::{BlogError, Result};
use cms_blog::{Blog, SiteConfig};

/// In-memory content source that evaluates the query builder's filters,
/// ordering and slicing over stored documents.
///
/// Documents are stored in backend shape (`slug: {current}`); results come
/// back flattened the way the page projections ask for them.
pub struct MemorySource {
    docs: Vec<Value>,
    failing: bool,
    calls: AtomicUsize,
}

impl MemorySource {
    pub fn new(docs: Vec<Value>) -> Self {
        Self {
            docs,
            failing: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every query fails like an unreachable backend
    pub fn failing() -> Self {
        Self {
            docs: Vec::new(),
            failing: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn matches(&self, doc: &Value, query: &GroqQuery) -> bool {
        query.filters().iter().all(|filter| match filter {
            Filter::Type(t) => doc["_type"].as_str() == Some(t.as_str()),
            Filter::Defined(field) => !lookup(doc, field).is_null(),
            Filter::Eq { field, param } => {
                let expected = query.params().get(param).cloned().unwrap_or(Value::Null);
                lookup(doc, field) == expected
            }
        })
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn fetch(&self, query: &GroqQuery, _max_staleness: Duration) -> Result<Arc<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(BlogError::Status {
                status: 503,
                body: "backend unavailable".to_string(),
            });
        }

        let mut hits: Vec<&Value> = self.docs.iter().filter(|d| self.matches(d, query)).collect();
        for order in query.ordering().iter().rev() {
            hits.sort_by(|a, b| {
                let ord = compare(&lookup(a, &order.field), &lookup(b, &order.field));
                if order.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let result = match query.slice() {
            Some(Slice::Index(i)) => hits.get(i).map(|d| project(d)).unwrap_or(Value::Null),
            Some(Slice::Range { start, end }) => Value::Array(
                hits.iter()
                    .skip(start)
                    .take(end.saturating_sub(start))
                    .map(|d| project(d))
                    .collect(),
            ),
            None => Value::Array(hits.iter().map(|d| project(d)).collect()),
        };
        Ok(Arc::new(result))
    }
}

/// Resolve a dotted path; a missing segment is `null`
fn lookup(doc: &Value, path: &str) -> Value {
    path.split('.')
        .try_fold(doc, |value, segment| value.get(segment))
        .cloned()
        .unwrap_or(Value::Null)
}

fn compare(a: &Value, b: &Value) -> CmpOrdering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Null, Value::Null) => CmpOrdering::Equal,
        (Value::Null, _) => CmpOrdering::Less,
        (_, Value::Null) => CmpOrdering::Greater,
        _ => CmpOrdering::Equal,
    }
}

/// Flatten `slug.current` the way the page projections do
fn project(doc: &Value) -> Value {
    let mut out = doc.clone();
    if let Some(current) = doc.get("slug").and_then(|s| s.get("current")).cloned() {
        out["slug"] = current;
    }
    out
}

/// A post document in backend shape
pub fn post_doc(slug: &str, title: &str, published_at: &str, status: &str) -> Value {
    json!({
        "_id": format!("post-{slug}"),
        "_type": "post",
        "title": title,
        "slug": {"current": slug},
        "publishedAt": published_at,
        "status": status,
        "excerpt": format!("About {title}"),
        "author": {"_id": "author-1", "name": "Ada Lovelace"},
        "categories": [{"_id": "cat-1", "title": "Engineering"}],
        "body": []
    })
}

pub fn config() -> SiteConfig {
    let mut config = SiteConfig::default();
    config.title = "Test Blog".to_string();
    config.cms.project_id = "proj1".to_string();
    config.cms.dataset = "production".to_string();
    config.highlight.enable = false;
    config
}

pub fn blog(source: Arc<MemorySource>) -> Blog {
    Blog::with_source(config(), source)
}
