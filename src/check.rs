//! Page audit: which bindings declared on a page does the config not
//! satisfy. Backs the CLI `--check` mode.
//!
//! A binding counts as unresolved when its path is entirely absent; a
//! `null` or non-scalar value sitting at the path is a config author's
//! decision, not a broken path. List templates are audited under the
//! scope of the array's first item, the way they will render.

use std::collections::HashSet;

use adom::{Dom, NodeId};
use kstring::KString;
use serde_json::Value;

use crate::binder;
use crate::dotpath;
use crate::markers::Markers;
use crate::scope::{Lookup, Scope};

/// One binding on the page with nothing behind it in the config.
#[derive(Debug, PartialEq)]
pub struct UnresolvedBinding {
    /// The marker attribute that declares the binding.
    pub marker: KString,
    /// The path as written on the element.
    pub path: KString,
}

pub fn unresolved_bindings(dom: &Dom, markers: &Markers, content: &Value) -> Vec<UnresolvedBinding> {
    let mut unresolved = Vec::new();
    let repeats = repeat_templates(dom, markers);
    let mut in_templates = HashSet::new();
    for (_, template) in &repeats {
        if let Some(template) = template {
            in_templates.extend(dom.elements_at(*template));
        }
    }

    let lookup = Lookup::document(content);
    audit_bindings(dom, None, &in_templates, markers, lookup, &mut unresolved);

    let no_skip = HashSet::new();
    for (path, template) in &repeats {
        match dotpath::resolve(content, path) {
            Some(Value::Array(items)) => {
                if let (Some(template), Some(first)) = (template, items.first()) {
                    let scope = Scope::for_item(first, 0);
                    let lookup = Lookup::scoped(&scope, content);
                    audit_bindings(dom, Some(*template), &no_skip, markers, lookup,
                                   &mut unresolved);
                }
            }
            _ => unresolved.push(UnresolvedBinding {
                marker: markers.repeat.clone(),
                path: path.clone(),
            }),
        }
    }

    if !dom.elements_with_attr(&markers.whatsapp_link).is_empty() {
        let number = dotpath::resolve(content, "whatsapp.number");
        if !matches!(number, Some(Value::String(s)) if s.chars().any(|c| c.is_ascii_digit())) {
            unresolved.push(UnresolvedBinding {
                marker: markers.whatsapp_link.clone(),
                path: KString::from_static("whatsapp.number"),
            });
        }
    }
    unresolved
}

/// The text, HTML and attribute bindings at `root` (or the whole
/// document) that `lookup` cannot resolve, skipping elements known to
/// resolve under an item scope instead.
fn audit_bindings(dom: &Dom, root: Option<NodeId>, skip: &HashSet<NodeId>,
                  markers: &Markers, lookup: Lookup<'_>,
                  out: &mut Vec<UnresolvedBinding>) {
    for marker in [&markers.text, &markers.html] {
        for id in binder::targets(dom, root, marker) {
            if skip.contains(&id) {
                continue;
            }
            if let Some(path) = dom.attr_str(id, marker) {
                if lookup.resolve(path).is_none() {
                    out.push(UnresolvedBinding {
                        marker: marker.clone(),
                        path: KString::from_ref(path),
                    });
                }
            }
        }
    }
    for id in binder::targets(dom, root, &markers.attrs) {
        if skip.contains(&id) {
            continue;
        }
        let entries = match dom.attr_str(id, &markers.attrs) {
            Some(entries) => entries,
            None => continue,
        };
        for entry in entries.split(';') {
            let parts: Vec<&str> = entry.split(':').collect();
            if parts.len() != 2 {
                continue;
            }
            let (attr, path) = (parts[0].trim(), parts[1].trim());
            if attr.is_empty() || path.is_empty() {
                continue;
            }
            if lookup.resolve(path).is_none() {
                out.push(UnresolvedBinding {
                    marker: markers.attrs.clone(),
                    path: KString::from_ref(path),
                });
            }
        }
    }
}

fn repeat_templates(dom: &Dom, markers: &Markers) -> Vec<(KString, Option<NodeId>)> {
    let mut found = Vec::new();
    for container in dom.elements_with_attr(&markers.repeat) {
        if let Some(path) = dom.attr_str(container, &markers.repeat) {
            let template = dom
                .elements_with_attr_under(container, &markers.repeat_item)
                .first()
                .copied();
            found.push((KString::from_ref(path), template));
        }
    }
    found
}
