//! Dot-path lookups into a configuration document.

use serde_json::Value;

/// Resolve a path like `"hero.headline"` or `"plans.0.label"` against
/// `root`. Mappings are walked by key, arrays by numeric segment; the
/// walk gives up as soon as a segment is missing or the value at hand
/// cannot contain one. The empty path resolves to nothing.
///
/// The value at the final segment is returned as found, `Value::Null`
/// included; whether a `null` is usable is the caller's business.
pub fn resolve<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    if path.is_empty() {
        return None;
    }
    let mut value = root;
    for segment in path.split('.') {
        value = match value {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn t_resolve_nested() {
        let doc = json!({
            "brand": { "name": "Acme" },
            "hero": { "headline": "Fast Sites", "cta": { "label": "Go" } },
        });
        fn t<'v>(doc: &'v Value, path: &str) -> Option<&'v Value> {
            resolve(doc, path)
        }
        assert_eq!(t(&doc, "brand.name"), Some(&json!("Acme")));
        assert_eq!(t(&doc, "hero.cta.label"), Some(&json!("Go")));
        assert_eq!(t(&doc, "hero"), Some(&json!({"headline": "Fast Sites",
                                                 "cta": {"label": "Go"}})));
        assert_eq!(t(&doc, "hero.missing"), None);
        assert_eq!(t(&doc, "missing.anything"), None);
    }

    #[test]
    fn t_resolve_stops_at_non_containers() {
        let doc = json!({ "a": "scalar", "n": null });
        assert_eq!(resolve(&doc, "a.b"), None);
        assert_eq!(resolve(&doc, "n.b"), None);
        assert_eq!(resolve(&doc, "a.b.c.d"), None);
    }

    #[test]
    fn t_resolve_null_is_found() {
        let doc = json!({ "a": { "b": null } });
        assert_eq!(resolve(&doc, "a.b"), Some(&Value::Null));
    }

    #[test]
    fn t_resolve_empty_path() {
        let doc = json!({ "": "odd" });
        assert_eq!(resolve(&doc, ""), None);
    }

    #[test]
    fn t_resolve_array_segments() {
        let doc = json!({ "items": ["a", {"label": "b"}] });
        assert_eq!(resolve(&doc, "items.0"), Some(&json!("a")));
        assert_eq!(resolve(&doc, "items.1.label"), Some(&json!("b")));
        assert_eq!(resolve(&doc, "items.2"), None);
        assert_eq!(resolve(&doc, "items.x"), None);
    }
}
