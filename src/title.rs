//! Document title: an explicit `meta.title` wins, otherwise the title
//! is derived from brand name and hero headline.

use adom::Dom;
use serde_json::Value;

use crate::scope::Lookup;

pub fn update_title(dom: &mut Dom, content: &Value) {
    let lookup = Lookup::document(content);
    let title = match lookup.resolve_text("meta.title") {
        Some(title) if !title.is_empty() => title,
        _ => {
            let brand = lookup.resolve_text("brand.name");
            let headline = lookup.resolve_text("hero.headline");
            match (brand, headline) {
                (Some(brand), Some(headline)) if !brand.is_empty() && !headline.is_empty() => {
                    format!("{} | {}", brand, headline)
                }
                _ => return,
            }
        }
    };
    let head = match dom.first_element_named("head") {
        Some(head) => head,
        None => return,
    };
    match dom.first_element_named_in(head, "title") {
        Some(element) => dom.set_text_content(element, &title),
        None => {
            let element = dom.add_element("title");
            dom.set_text_content(element, &title);
            dom.append_child(head, element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn titled(body: &str, content: &Value) -> String {
        let mut dom = Dom::parse_document(body).unwrap();
        update_title(&mut dom, content);
        dom.to_html()
    }

    const PAGE: &str = "<html><head><title>static</title></head></html>";

    #[test]
    fn t_meta_title_wins() {
        let out = titled(PAGE, &json!({ "meta": { "title": "Explicit" },
                                        "brand": { "name": "Acme" },
                                        "hero": { "headline": "Fast Sites" } }));
        assert_eq!(out, "<html><head><title>Explicit</title></head></html>");
    }

    #[test]
    fn t_brand_and_headline_derive_title() {
        let out = titled(PAGE, &json!({ "brand": { "name": "Acme" },
                                        "hero": { "headline": "Fast Sites" } }));
        assert_eq!(out, "<html><head><title>Acme | Fast Sites</title></head></html>");
    }

    #[test]
    fn t_missing_half_keeps_existing_title() {
        assert_eq!(titled(PAGE, &json!({ "brand": { "name": "Acme" } })), PAGE);
        assert_eq!(titled(PAGE, &json!({ "hero": { "headline": "Fast Sites" } })), PAGE);
        assert_eq!(titled(PAGE, &json!({})), PAGE);
    }

    #[test]
    fn t_empty_meta_title_falls_through() {
        let out = titled(PAGE, &json!({ "meta": { "title": "" },
                                        "brand": { "name": "Acme" },
                                        "hero": { "headline": "Fast Sites" } }));
        assert_eq!(out, "<html><head><title>Acme | Fast Sites</title></head></html>");
    }

    #[test]
    fn t_title_element_created_when_absent() {
        let out = titled("<html><head><meta charset=\"utf-8\"></head></html>",
                         &json!({ "meta": { "title": "New" } }));
        assert_eq!(out,
                   "<html><head><meta charset=\"utf-8\"><title>New</title></head></html>");
    }

    #[test]
    fn t_no_head_is_a_no_op() {
        assert_eq!(titled("<p>x</p>", &json!({ "meta": { "title": "New" } })), "<p>x</p>");
    }
}
