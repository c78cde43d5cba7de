//! The attribute names the hydrator reads from a page. One pipeline
//! serves page families with different marker spellings; the defaults
//! are the current contract.

use kstring::KString;

#[derive(Clone, Debug)]
pub struct Markers {
    /// Text binding, value is a dot-path.
    pub text: KString,
    /// HTML binding, value is a dot-path to a markup string.
    pub html: KString,
    /// Attribute binding, value is `attr:path` entries joined with `;`.
    pub attrs: KString,
    /// List container, value is a dot-path to an array.
    pub repeat: KString,
    /// The template child inside a list container.
    pub repeat_item: KString,
    /// Section gate, value is a key under `sections`.
    pub section: KString,
    /// Bound elements carrying this are removed when their value is
    /// missing instead of being left as they are.
    pub optional: KString,
    /// Anchors that get the WhatsApp deep link.
    pub whatsapp_link: KString,
    /// Elements whose text becomes the current year.
    pub year: KString,
}

impl Default for Markers {
    fn default() -> Self {
        Markers {
            text: KString::from_static("data-bind"),
            html: KString::from_static("data-bind-html"),
            attrs: KString::from_static("data-bind-attr"),
            repeat: KString::from_static("data-repeat"),
            repeat_item: KString::from_static("data-repeat-item"),
            section: KString::from_static("data-section"),
            optional: KString::from_static("data-optional"),
            whatsapp_link: KString::from_static("data-whatsapp-link"),
            year: KString::from_static("data-year"),
        }
    }
}
