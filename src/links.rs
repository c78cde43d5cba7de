//! Deep links: the WhatsApp URL derived from the configuration, and the
//! scheme prefixes the attribute pass adds to bound `href`s when the
//! path names a contact channel.

use adom::Dom;
use pct_str::{PctString, URIReserved};
use serde_json::Value;

use crate::dotpath;
use crate::markers::Markers;

/// `https://wa.me/<digits>?text=<encoded message>`. Every non-digit in
/// the phone is dropped; a phone without digits yields no link. The
/// message is trimmed and percent-encoded, an empty one leaves the
/// query string off.
pub fn build_whatsapp_link(phone: &str, message: Option<&str>) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    match message.map(str::trim) {
        Some(message) if !message.is_empty() => {
            let encoded = PctString::encode(message.chars(), URIReserved);
            Some(format!("https://wa.me/{digits}?text={encoded}"))
        }
        _ => Some(format!("https://wa.me/{digits}")),
    }
}

/// Set the `href` of every element carrying the WhatsApp marker from
/// `whatsapp.number` and `whatsapp.message`. String values only; when
/// no link can be built, existing `href`s stay as they are.
pub fn apply_whatsapp_links(dom: &mut Dom, markers: &Markers, content: &Value) {
    let number = match dotpath::resolve(content, "whatsapp.number") {
        Some(Value::String(s)) => s.clone(),
        _ => return,
    };
    let message = match dotpath::resolve(content, "whatsapp.message") {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    };
    let link = match build_whatsapp_link(&number, message.as_deref()) {
        Some(link) => link,
        None => return,
    };
    for id in dom.elements_with_attr(&markers.whatsapp_link) {
        dom.set_attr(id, "href", &link);
    }
}

/// The value an `href` binding stores for `path`. A final path segment
/// naming a contact channel turns the bare value into a deep link;
/// values that already carry a scheme are taken as they are.
pub fn href_for_path(path: &str, value: &str) -> String {
    let field = path.rsplit('.').next().unwrap_or(path);
    match field {
        "email" => email_href(value),
        "phone" => phone_href(value),
        "whatsapp" => whatsapp_href(value),
        _ => value.to_string(),
    }
}

fn email_href(s: &str) -> String {
    if s.starts_with("mailto:") || s.contains("://") {
        s.into()
    } else {
        format!("mailto:{s}")
    }
}

fn phone_href(s: &str) -> String {
    if s.starts_with("tel:") || s.contains("://") {
        return s.into();
    }
    let number: String = s.chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();
    if number.is_empty() {
        s.into()
    } else {
        format!("tel:{number}")
    }
}

fn whatsapp_href(s: &str) -> String {
    if s.contains("://") {
        return s.into();
    }
    match build_whatsapp_link(s, None) {
        Some(link) => link,
        None => s.into(),
    }
}
