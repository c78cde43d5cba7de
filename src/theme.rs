//! Theme application: copy palette values from the config onto the
//! document element as CSS custom properties.

use adom::Dom;
use itertools::Itertools;
use serde_json::Value;

use crate::scope::Lookup;

/// Theme path to CSS custom property, applied in this order.
static THEME_VARS: &[(&str, &str)] = &[
    ("palette.brand.primary", "--color-primary"),
    ("palette.brand.secondary", "--color-accent"),
    ("palette.neutral.bg", "--color-bg"),
    ("palette.neutral.text", "--color-text"),
    ("borders.default", "--color-border"),
    ("borders.strong", "--color-border-strong"),
    ("palette.neutral.surface1", "--surface"),
    ("palette.neutral.surface2", "--surface-2"),
    ("palette.neutral.muted", "--muted"),
    ("palette.neutral.ink", "--ink"),
    ("components.navBg", "--nav-bg"),
    ("components.footerBg", "--footer-bg"),
    ("components.buttonPrimaryText", "--button-primary-text"),
    ("components.buttonSecondaryText", "--button-secondary-text"),
    ("gradients.hero", "--hero-grad"),
    ("gradients.panel", "--panel-grad"),
    ("shadows.shadow1", "--shadow-1"),
    ("shadows.shadow2", "--shadow-2"),
    ("shadows.shadow3", "--shadow-3"),
    ("states.focusRing", "--focus-ring"),
    ("states.hoverLift", "--hover-lift"),
    ("fonts.base", "--font-base"),
];

/// Writes each mapped theme value into the `style` attribute of the
/// `<html>` element. A property already present in the attribute keeps
/// its position and gets the new value; unrelated declarations are
/// kept. Missing, null and empty theme values are skipped.
pub fn apply_theme(dom: &mut Dom, theme: &Value) {
    let root = match dom.document_element() {
        Some(root) => root,
        None => return,
    };
    let lookup = Lookup::document(theme);
    let mut style = parse_style(dom.attr_str(root, "style").unwrap_or(""));
    let mut changed = false;
    for (path, property) in THEME_VARS {
        if let Some(value) = lookup.resolve_text(path) {
            if !value.is_empty() {
                set_declaration(&mut style, property, value);
                changed = true;
            }
        }
    }
    if changed {
        let css = style
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .join("; ");
        dom.set_attr(root, "style", &css);
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    for declaration in style.split(';') {
        if let Some((property, value)) = declaration.split_once(':') {
            let (property, value) = (property.trim(), value.trim());
            if !property.is_empty() && !value.is_empty() {
                declarations.push((property.to_string(), value.to_string()));
            }
        }
    }
    declarations
}

fn set_declaration(style: &mut Vec<(String, String)>, property: &str, value: String) {
    match style.iter_mut().find(|(name, _)| name == property) {
        Some((_, existing)) => *existing = value,
        None => style.push((property.to_string(), value)),
    }
}
