//! Per-item scopes for list rendering, and the scope-then-document
//! order every binding resolves through.

use serde_json::{Map, Value};

use crate::dotpath;

/// The values visible to bindings inside one cloned list item.
pub struct Scope(Value);

impl Scope {
    /// Mapping items expose their own members plus `index`; any other
    /// item value is exposed as `{value, index}`. `index` counts from 0.
    pub fn for_item(item: &Value, index: usize) -> Scope {
        let mut map = match item {
            Value::Object(members) => members.clone(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other.clone());
                map
            }
        };
        map.insert("index".to_string(), Value::from(index));
        Scope(Value::Object(map))
    }
}

/// Resolution context for one binding pass: an optional item scope in
/// front of the content document.
#[derive(Clone, Copy)]
pub struct Lookup<'a> {
    scope: Option<&'a Scope>,
    content: &'a Value,
}

impl<'a> Lookup<'a> {
    pub fn document(content: &'a Value) -> Lookup<'a> {
        Lookup { scope: None, content }
    }

    pub fn scoped(scope: &'a Scope, content: &'a Value) -> Lookup<'a> {
        Lookup { scope: Some(scope), content }
    }

    /// A path that exists in the scope shadows the document, a `null`
    /// found there included; only a path entirely absent from the scope
    /// falls through to the document.
    pub fn resolve(&self, path: &str) -> Option<&'a Value> {
        if let Some(scope) = self.scope {
            if let Some(value) = dotpath::resolve(&scope.0, path) {
                return Some(value);
            }
        }
        dotpath::resolve(self.content, path)
    }

    /// Resolve to a bindable string: strings as they are, numbers and
    /// booleans via their display form. Absent values, `null`, arrays
    /// and mappings do not bind.
    pub fn resolve_text(&self, path: &str) -> Option<String> {
        match self.resolve(path)? {
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn t_scope_for_mapping_item() {
        let item = json!({ "label": "One", "url": "/one" });
        let scope = Scope::for_item(&item, 2);
        let content = json!({});
        let lookup = Lookup::scoped(&scope, &content);
        assert_eq!(lookup.resolve_text("label"), Some("One".to_string()));
        assert_eq!(lookup.resolve_text("index"), Some("2".to_string()));
    }

    #[test]
    fn t_scope_for_primitive_item() {
        let item = json!("just text");
        let scope = Scope::for_item(&item, 0);
        let content = json!({});
        let lookup = Lookup::scoped(&scope, &content);
        assert_eq!(lookup.resolve_text("value"), Some("just text".to_string()));
        assert_eq!(lookup.resolve_text("index"), Some("0".to_string()));
    }

    #[test]
    fn t_scope_shadows_document() {
        let content = json!({ "label": "global", "only": "here" });
        let item = json!({ "label": "local" });
        let scope = Scope::for_item(&item, 0);
        let lookup = Lookup::scoped(&scope, &content);
        assert_eq!(lookup.resolve_text("label"), Some("local".to_string()));
        // absent from scope falls through
        assert_eq!(lookup.resolve_text("only"), Some("here".to_string()));
    }

    #[test]
    fn t_null_in_scope_still_shadows() {
        let content = json!({ "label": "global" });
        let item = json!({ "label": null });
        let scope = Scope::for_item(&item, 0);
        let lookup = Lookup::scoped(&scope, &content);
        assert_eq!(lookup.resolve("label"), Some(&Value::Null));
        assert_eq!(lookup.resolve_text("label"), None);
    }

    #[test]
    fn t_resolve_text_scalars_only() {
        let content = json!({ "s": "x", "n": 42, "f": 1.5, "b": true,
                              "arr": [1], "obj": {} });
        let lookup = Lookup::document(&content);
        assert_eq!(lookup.resolve_text("s"), Some("x".to_string()));
        assert_eq!(lookup.resolve_text("n"), Some("42".to_string()));
        assert_eq!(lookup.resolve_text("f"), Some("1.5".to_string()));
        assert_eq!(lookup.resolve_text("b"), Some("true".to_string()));
        assert_eq!(lookup.resolve_text("arr"), None);
        assert_eq!(lookup.resolve_text("obj"), None);
        assert_eq!(lookup.resolve_text("missing"), None);
    }
}
