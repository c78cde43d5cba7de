//! The binding passes: text, HTML and attribute values resolved through
//! a [`Lookup`] and written into marked elements.
//!
//! A missing or `null` value never clears what the page already shows;
//! the only destructive case is an element that carries the optional
//! marker, which is removed when its value is missing. Passes run over
//! the whole document or over one subtree (a cloned list item), and the
//! subtree root itself participates when it carries a marker.
//!
//! Document-wide passes skip elements inside repeat templates; those
//! bind per item clone, under the scope where their paths resolve.

use std::collections::HashSet;

use adom::{Dom, NodeId};

use crate::links;
use crate::markers::Markers;
use crate::scope::Lookup;
use crate::warn;

pub(crate) fn targets(dom: &Dom, root: Option<NodeId>, attr: &str) -> Vec<NodeId> {
    match root {
        Some(root) => dom.elements_with_attr_at(root, attr),
        None => dom.elements_with_attr(attr),
    }
}

/// Every element sitting inside a repeat template, templates included.
/// Their paths resolve per item, so the document-wide passes must
/// leave them to the list renderer.
pub(crate) fn template_members(dom: &Dom, markers: &Markers) -> HashSet<NodeId> {
    let mut members = HashSet::new();
    for template in dom.elements_with_attr(&markers.repeat_item) {
        members.extend(dom.elements_at(template));
    }
    members
}

fn skipped(dom: &Dom, root: Option<NodeId>, markers: &Markers) -> HashSet<NodeId> {
    match root {
        Some(_) => HashSet::new(),
        None => template_members(dom, markers),
    }
}

fn remove_if_optional(dom: &mut Dom, id: NodeId, markers: &Markers) {
    if dom.attr_str(id, &markers.optional).is_some() {
        dom.remove(id);
    }
}

/// Replace the text content of every element carrying the text marker.
pub fn bind_text(dom: &mut Dom, root: Option<NodeId>, markers: &Markers, lookup: Lookup<'_>) {
    let skip = skipped(dom, root, markers);
    for id in targets(dom, root, &markers.text) {
        if skip.contains(&id) {
            continue;
        }
        let path = match dom.attr_str(id, &markers.text) {
            Some(path) => path.to_string(),
            None => continue,
        };
        match lookup.resolve_text(&path) {
            Some(text) => dom.set_text_content(id, &text),
            None => remove_if_optional(dom, id, markers),
        }
    }
}

/// Replace the children of every element carrying the HTML marker with
/// the bound value parsed as a fragment.
pub fn bind_html(dom: &mut Dom, root: Option<NodeId>, markers: &Markers, lookup: Lookup<'_>) {
    let skip = skipped(dom, root, markers);
    for id in targets(dom, root, &markers.html) {
        if skip.contains(&id) {
            continue;
        }
        let path = match dom.attr_str(id, &markers.html) {
            Some(path) => path.to_string(),
            None => continue,
        };
        match lookup.resolve_text(&path) {
            Some(html) => match dom.parse_fragment(&html) {
                Ok(children) => dom.set_children(id, children),
                Err(e) => warn!("skipping markup bound at {:?}: {}", path, e),
            },
            None => remove_if_optional(dom, id, markers),
        }
    }
}

/// Set attributes from `attr:path` entries; entries that do not split
/// into exactly two non-empty parts are skipped. Bound `href`s get
/// their deep-link scheme from the path name.
pub fn bind_attributes(dom: &mut Dom, root: Option<NodeId>, markers: &Markers, lookup: Lookup<'_>) {
    let skip = skipped(dom, root, markers);
    for id in targets(dom, root, &markers.attrs) {
        if skip.contains(&id) {
            continue;
        }
        let mapping = match dom.attr_str(id, &markers.attrs) {
            Some(mapping) => mapping.to_string(),
            None => continue,
        };
        let mut missing = false;
        for entry in mapping.split(';') {
            let parts: Vec<&str> = entry.split(':').collect();
            if parts.len() != 2 {
                continue;
            }
            let (attr, path) = (parts[0].trim(), parts[1].trim());
            if attr.is_empty() || path.is_empty() {
                continue;
            }
            match lookup.resolve_text(path) {
                Some(value) => {
                    let value = if attr == "href" {
                        links::href_for_path(path, &value)
                    } else {
                        value
                    };
                    dom.set_attr(id, attr, &value);
                }
                None => missing = true,
            }
        }
        if missing {
            remove_if_optional(dom, id, markers);
        }
    }
}
