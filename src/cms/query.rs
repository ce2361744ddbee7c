//! GROQ query builder.
//!
//! Only the subset the front-end needs: a document type filter, field
//! definedness, equality against a named parameter, descending/ascending
//! ordering, slicing, and a raw projection.

use std::collections::BTreeMap;

use serde_json::Value;

/// A single filter term, joined with `&&`
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `_type == "<name>"`
    Type(String),
    /// `defined(<field>)`
    Defined(String),
    /// `<field> == $<param>`
    Eq { field: String, param: String },
}

/// One `order(...)` term
#[derive(Debug, Clone, PartialEq)]
pub struct Ordering {
    pub field: String,
    pub descending: bool,
}

/// Result slicing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slice {
    /// `[i]`: a single document or `null`
    Index(usize),
    /// `[start...end]`: end-exclusive range
    Range { start: usize, end: usize },
}

/// A GROQ query plus its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct GroqQuery {
    filters: Vec<Filter>,
    order: Vec<Ordering>,
    slice: Option<Slice>,
    projection: Option<String>,
    params: BTreeMap<String, Value>,
}

impl GroqQuery {
    /// All documents of type `doc_type`
    pub fn documents(doc_type: &str) -> Self {
        Self {
            filters: vec![Filter::Type(doc_type.to_string())],
            order: Vec::new(),
            slice: None,
            projection: None,
            params: BTreeMap::new(),
        }
    }

    pub fn defined(mut self, field: &str) -> Self {
        self.filters.push(Filter::Defined(field.to_string()));
        self
    }

    /// `field == $param`, binding `param` to `value`
    pub fn eq(mut self, field: &str, param: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.to_string(),
            param: param.to_string(),
        });
        self.params.insert(param.to_string(), value.into());
        self
    }

    pub fn order_desc(mut self, field: &str) -> Self {
        self.order.push(Ordering {
            field: field.to_string(),
            descending: true,
        });
        self
    }

    pub fn order_asc(mut self, field: &str) -> Self {
        self.order.push(Ordering {
            field: field.to_string(),
            descending: false,
        });
        self
    }

    /// Keep the first `n` results
    pub fn limit(mut self, n: usize) -> Self {
        self.slice = Some(Slice::Range { start: 0, end: n });
        self
    }

    /// Select only the first result (`null` when there is none)
    pub fn first(mut self) -> Self {
        self.slice = Some(Slice::Index(0));
        self
    }

    /// Raw projection body, without the surrounding braces
    pub fn project(mut self, projection: &str) -> Self {
        self.projection = Some(projection.trim().to_string());
        self
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn ordering(&self) -> &[Ordering] {
        &self.order
    }

    pub fn slice(&self) -> Option<Slice> {
        self.slice
    }

    pub fn params(&self) -> &BTreeMap<String, Value> {
        &self.params
    }

    /// Whether the query yields a single document rather than a list
    pub fn is_single(&self) -> bool {
        matches!(self.slice, Some(Slice::Index(_)))
    }

    /// Render the GROQ text
    pub fn to_groq(&self) -> String {
        let filter = self
            .filters
            .iter()
            .map(|f| match f {
                Filter::Type(t) => format!("_type == {}", quote(t)),
                Filter::Defined(field) => format!("defined({})", field),
                Filter::Eq { field, param } => format!("{} == ${}", field, param),
            })
            .collect::<Vec<_>>()
            .join(" && ");

        let mut groq = format!("*[{}]", filter);

        if !self.order.is_empty() {
            let terms = self
                .order
                .iter()
                .map(|o| format!("{} {}", o.field, if o.descending { "desc" } else { "asc" }))
                .collect::<Vec<_>>()
                .join(", ");
            groq.push_str(&format!(" | order({})", terms));
        }

        match self.slice {
            Some(Slice::Index(i)) => groq.push_str(&format!(" [{}]", i)),
            Some(Slice::Range { start, end }) => groq.push_str(&format!(" [{}...{}]", start, end)),
            None => {}
        }

        if let Some(projection) = &self.projection {
            groq.push_str(&format!(" {{{}}}", projection));
        }

        groq
    }

    /// Query-string pairs: `query` plus one `$name=<json>` per parameter
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.params.len() + 1);
        pairs.push(("query".to_string(), self.to_groq()));
        for (name, value) in &self.params {
            pairs.push((format!("${}", name), value.to_string()));
        }
        pairs
    }

    /// Stable key identifying this query and its parameter values
    pub fn cache_key(&self) -> String {
        let mut key = self.to_groq();
        for (name, value) in &self.params {
            key.push_str(&format!("\n${}={}", name, value));
        }
        key
    }
}

/// GROQ string literal
fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_query() {
        let q = GroqQuery::documents("post")
            .defined("slug.current")
            .defined("publishedAt")
            .eq("status", "status", "published")
            .order_desc("publishedAt")
            .limit(12)
            .project("_id, title");

        assert_eq!(
            q.to_groq(),
            r#"*[_type == "post" && defined(slug.current) && defined(publishedAt) && status == $status] | order(publishedAt desc) [0...12] {_id, title}"#
        );
        assert!(!q.is_single());
        assert_eq!(q.params()["status"], json!("published"));
    }

    #[test]
    fn test_single_query() {
        let q = GroqQuery::documents("post")
            .eq("slug.current", "slug", "hello")
            .first();
        assert_eq!(
            q.to_groq(),
            r#"*[_type == "post" && slug.current == $slug] [0]"#
        );
        assert!(q.is_single());
    }

    #[test]
    fn test_query_pairs_json_encode_params() {
        let q = GroqQuery::documents("post").eq("slug.current", "slug", "say \"hi\"");
        let pairs = q.to_query_pairs();
        assert_eq!(pairs[0].0, "query");
        assert_eq!(pairs[1], ("$slug".to_string(), r#""say \"hi\"""#.to_string()));
    }

    #[test]
    fn test_cache_key_distinguishes_params() {
        let a = GroqQuery::documents("post").eq("slug.current", "slug", "a");
        let b = GroqQuery::documents("post").eq("slug.current", "slug", "b");
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), a.clone().cache_key());
    }

    #[test]
    fn test_ascending_order() {
        let q = GroqQuery::documents("category").order_asc("title");
        assert_eq!(q.to_groq(), r#"*[_type == "category"] | order(title asc)"#);
    }
}
