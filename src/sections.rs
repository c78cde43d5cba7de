//! Section gating: drop page sections that the config switches off,
//! along with in-page anchors pointing at them.

use adom::Dom;
use serde_json::Value;

use crate::markers::Markers;

/// A section is removed only when the config carries an entry for it
/// with `enabled` set to `false`. No entry, or any other value, keeps
/// the section in the page.
pub fn toggle_sections(dom: &mut Dom, markers: &Markers, content: &Value) {
    let sections = content.get("sections");
    let mut marked = Vec::new();
    for id in dom.elements_with_attr(&markers.section) {
        if let Some(key) = dom.attr_str(id, &markers.section) {
            if !key.is_empty() {
                marked.push((id, key.to_string()));
            }
        }
    }
    for (id, key) in marked {
        let enabled = sections
            .and_then(|sections| sections.get(&key))
            .and_then(|section| section.get("enabled"));
        if matches!(enabled, Some(Value::Bool(false))) {
            dom.remove(id);
            remove_anchors_to(dom, &key);
        }
    }
}

/// Drops every `<a>` whose `href` is exactly `#key`.
fn remove_anchors_to(dom: &mut Dom, key: &str) {
    let target = format!("#{}", key);
    for id in dom.elements_named("a") {
        if dom.attr_str(id, "href") == Some(&target) {
            dom.remove(id);
        }
    }
}
