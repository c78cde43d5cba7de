//! The hydration pipeline: every pass over a parsed page, in the order
//! the pages rely on. One pipeline serves all page families; marker
//! spellings are the only per-family difference.

use adom::Dom;
use chrono::{Datelike, Local};
use serde_json::Value;

use crate::binder;
use crate::config::Config;
use crate::links;
use crate::markers::Markers;
use crate::repeats;
use crate::scope::Lookup;
use crate::sections;
use crate::theme;
use crate::title;

pub struct Hydrator {
    markers: Markers,
}

impl Hydrator {
    pub fn new() -> Hydrator {
        Hydrator {
            markers: Markers::default(),
        }
    }

    pub fn with_markers(markers: Markers) -> Hydrator {
        Hydrator { markers }
    }

    /// Runs every pass. Theme and title go first, then the document
    /// binding passes, lists, section gating and the WhatsApp links.
    /// Without a config only the year stamp runs and the page stays as
    /// served.
    pub fn hydrate(&self, dom: &mut Dom, config: Option<&Config>) {
        if let Some(config) = config {
            let mut content = config.content.clone();
            derive_logo_text(&mut content);
            theme::apply_theme(dom, &config.theme);
            title::update_title(dom, &content);
            let lookup = Lookup::document(&content);
            binder::bind_text(dom, None, &self.markers, lookup);
            binder::bind_html(dom, None, &self.markers, lookup);
            binder::bind_attributes(dom, None, &self.markers, lookup);
            repeats::render_repeats(dom, &self.markers, &content);
            sections::toggle_sections(dom, &self.markers, &content);
            links::apply_whatsapp_links(dom, &self.markers, &content);
        }
        self.stamp_year(dom);
    }

    /// Elements marked for it show the current year, config or not.
    fn stamp_year(&self, dom: &mut Dom) {
        let year = Local::now().year().to_string();
        for id in dom.elements_with_attr(&self.markers.year) {
            dom.set_text_content(id, &year);
        }
    }
}

impl Default for Hydrator {
    fn default() -> Self {
        Hydrator::new()
    }
}

/// `brand.logoText` defaults to the brand initial followed by a dot; a
/// value present in the config wins.
fn derive_logo_text(content: &mut Value) {
    let brand = match content.get_mut("brand") {
        Some(Value::Object(brand)) => brand,
        _ => return,
    };
    let initial = match brand.get("name") {
        Some(Value::String(name)) => match name.chars().next() {
            Some(c) => c.to_uppercase().collect::<String>(),
            None => return,
        },
        _ => return,
    };
    if matches!(brand.get("logoText"), None | Some(Value::Null)) {
        brand.insert("logoText".to_string(), Value::String(format!("{initial}.")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAGE: &str = "<!DOCTYPE html><html><head><title>static</title></head><body>\
        <nav><a href=\"#pricing\">Pricing</a>\
        <span data-bind=\"brand.logoText\">L.</span></nav>\
        <h1 data-bind=\"hero.headline\">old</h1>\
        <p data-bind-html=\"hero.intro\">old</p>\
        <a data-bind-attr=\"href:cta.url\">Go</a>\
        <ul data-repeat=\"plans\"><li data-repeat-item data-bind=\"name\">t</li></ul>\
        <section data-section=\"pricing\">$</section>\
        <a data-whatsapp-link href=\"#contact\">chat</a>\
        <footer data-year>2000</footer>\
        </body></html>";

    fn config() -> Config {
        Config::from_json(
            r##"{ "content": {
                    "brand": { "name": "Acme" },
                    "hero": { "headline": "Fast Sites",
                              "intro": "say <strong>hi</strong>" },
                    "cta": { "url": "/signup" },
                    "plans": [ { "name": "Basic" }, { "name": "Pro" } ],
                    "sections": { "pricing": { "enabled": false } },
                    "whatsapp": { "number": "+1 23", "message": "Hi" }
                  },
                  "theme": { "palette": { "brand": { "primary": "#123" } } } }"##).unwrap()
    }

    #[test]
    fn t_full_page() {
        let mut dom = Dom::parse_document(PAGE).unwrap();
        Hydrator::new().hydrate(&mut dom, Some(&config()));
        let expected = format!(
            "<!DOCTYPE html><html style=\"--color-primary: #123\">\
             <head><title>Acme | Fast Sites</title></head><body>\
             <nav><span data-bind=\"brand.logoText\">A.</span></nav>\
             <h1 data-bind=\"hero.headline\">Fast Sites</h1>\
             <p data-bind-html=\"hero.intro\">say <strong>hi</strong></p>\
             <a data-bind-attr=\"href:cta.url\" href=\"/signup\">Go</a>\
             <ul data-repeat=\"plans\">\
             <li data-bind=\"name\">Basic</li>\
             <li data-bind=\"name\">Pro</li>\
             </ul>\
             <a data-whatsapp-link=\"\" href=\"https://wa.me/123?text=Hi\">chat</a>\
             <footer data-year=\"\">{}</footer>\
             </body></html>",
            Local::now().year());
        assert_eq!(dom.to_html(), expected);
    }

    #[test]
    fn t_hydrating_twice_changes_nothing() {
        let config = config();
        let hydrator = Hydrator::new();
        let mut dom = Dom::parse_document(PAGE).unwrap();
        hydrator.hydrate(&mut dom, Some(&config));
        let once = dom.to_html();
        hydrator.hydrate(&mut dom, Some(&config));
        assert_eq!(dom.to_html(), once);
    }

    #[test]
    fn t_scope_only_paths_survive_the_document_passes() {
        // the template root is optional and its path resolves only
        // under the item scope; the document passes must not touch it
        let page = "<ul data-repeat=\"plans\">\
                    <li data-repeat-item data-bind=\"label\" data-optional>t</li></ul>";
        let config = Config::from_json(
            r#"{ "content": { "plans": [ { "label": "A" }, { "label": "B" } ] } }"#).unwrap();
        let hydrator = Hydrator::new();
        let mut dom = Dom::parse_document(page).unwrap();
        hydrator.hydrate(&mut dom, Some(&config));
        let once = dom.to_html();
        assert_eq!(once,
                   "<ul data-repeat=\"plans\">\
                    <li data-bind=\"label\">A</li>\
                    <li data-bind=\"label\">B</li></ul>");
        hydrator.hydrate(&mut dom, Some(&config));
        assert_eq!(dom.to_html(), once);
    }

    #[test]
    fn t_without_config_only_the_year_runs() {
        let mut dom = Dom::parse_document(
            "<p data-bind=\"hero.headline\">kept</p><span data-year>2000</span>").unwrap();
        Hydrator::new().hydrate(&mut dom, None);
        assert_eq!(dom.to_html(),
                   format!("<p data-bind=\"hero.headline\">kept</p>\
                            <span data-year=\"\">{}</span>",
                           Local::now().year()));
    }

    #[test]
    fn t_custom_markers() {
        let markers = Markers {
            text: kstring::KString::from_static("data-text"),
            ..Markers::default()
        };
        let mut dom = Dom::parse_document(
            "<p data-text=\"hero.headline\">old</p><p data-bind=\"hero.headline\">old</p>")
            .unwrap();
        let config = Config::from_json(
            r#"{ "content": { "hero": { "headline": "New" } } }"#).unwrap();
        Hydrator::with_markers(markers).hydrate(&mut dom, Some(&config));
        assert_eq!(dom.to_html(),
                   "<p data-text=\"hero.headline\">New</p>\
                    <p data-bind=\"hero.headline\">old</p>");
    }

    #[test]
    fn t_logo_text_derived_only_when_absent() {
        fn t(content: Value) -> Value {
            let mut content = content;
            derive_logo_text(&mut content);
            content
        }
        assert_eq!(t(json!({ "brand": { "name": "acme" } })),
                   json!({ "brand": { "name": "acme", "logoText": "A." } }));
        assert_eq!(t(json!({ "brand": { "name": "Acme", "logoText": "AC" } })),
                   json!({ "brand": { "name": "Acme", "logoText": "AC" } }));
        assert_eq!(t(json!({ "brand": { "name": "Acme", "logoText": null } })),
                   json!({ "brand": { "name": "Acme", "logoText": "A." } }));
        assert_eq!(t(json!({ "brand": { "name": "" } })),
                   json!({ "brand": { "name": "" } }));
        assert_eq!(t(json!({})), json!({}));
    }
}
