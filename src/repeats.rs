//! List rendering: clone a template element once per array item and
//! bind each clone under its item scope.

use adom::Dom;
use serde_json::Value;

use crate::binder;
use crate::dotpath;
use crate::markers::Markers;
use crate::scope::{Lookup, Scope};

/// For each list container, in document order: resolve its dot-path to
/// an array, take the first template descendant, detach it, and append
/// one bound clone per item to the template's parent. Missing array,
/// non-array value or missing template leave the container alone.
/// Containers introduced by cloning are not picked up; the snapshot is
/// taken before any rendering.
pub fn render_repeats(dom: &mut Dom, markers: &Markers, content: &Value) {
    for container in dom.elements_with_attr(&markers.repeat) {
        let path = match dom.attr_str(container, &markers.repeat) {
            Some(path) => path.to_string(),
            None => continue,
        };
        let items = match dotpath::resolve(content, &path) {
            Some(Value::Array(items)) => items,
            _ => continue,
        };
        let template = match dom.elements_with_attr_under(container, &markers.repeat_item).first() {
            Some(&template) => template,
            None => continue,
        };
        let parent = dom.parent_of_in(container, template).unwrap_or(container);

        let mut clones = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let clone = dom.deep_clone(template);
            dom.remove_attr(clone, &markers.repeat_item);
            let scope = Scope::for_item(item, index);
            let lookup = Lookup::scoped(&scope, content);
            binder::bind_text(dom, Some(clone), markers, lookup);
            binder::bind_html(dom, Some(clone), markers, lookup);
            binder::bind_attributes(dom, Some(clone), markers, lookup);
            // optional elements are settled per item here; the marker
            // must not survive into a later document-wide pass
            for id in dom.elements_with_attr_at(clone, &markers.optional) {
                dom.remove_attr(id, &markers.optional);
            }
            clones.push(clone);
        }
        dom.remove(template);
        for clone in clones {
            dom.append_child(parent, clone);
        }
    }
}
