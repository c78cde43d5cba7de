//! Build a [`Dom`] from markup with the html5gum tokenizer and an
//! explicit stack of open elements.
//!
//! Pages out in the wild are not balanced, so the builder recovers
//! instead of rejecting: a stray end tag is dropped, an end tag that
//! skips over open elements closes them on the way, and whatever is
//! still open at end of input gets closed there. Tokenizer-level
//! complaints are ignored for the same reason.

use html5gum::{HtmlString, Token, Tokenizer};
use kstring::KString;
use thiserror::Error;

use crate::meta::is_void_element;
use crate::warn;
use crate::{Dom, Element, Node, NodeId};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid UTF-8 in markup: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid UTF-8 in tag name: {0}")]
    TagUtf8(#[from] std::str::Utf8Error),
}

fn kstring(s: HtmlString) -> Result<KString, ParseError> {
    Ok(KString::from_string(String::from_utf8(s.0)?))
}

/// One open element collecting children until its end tag shows up.
/// The bottom of the stack is a nameless base frame collecting the
/// document-level nodes.
struct Frame {
    element: Element,
}

fn close_top(dom: &mut Dom, stack: &mut Vec<Frame>) {
    if let Some(frame) = stack.pop() {
        let id = dom.add(Node::Element(frame.element));
        if let Some(parent) = stack.last_mut() {
            parent.element.children.push(id);
        }
    }
}

fn parse_into(
    dom: &mut Dom,
    input: &str,
    doctype: &mut Option<KString>,
) -> Result<Vec<NodeId>, ParseError> {
    let mut stack: Vec<Frame> = vec![Frame { element: Element::new("") }];

    for token in Tokenizer::new(input).infallible() {
        match token {
            Token::StartTag(starttag) => {
                let name = kstring(starttag.name)?;
                let mut element = Element::new(&name);
                for (k, v) in starttag.attributes {
                    element.attrs.push((kstring(k)?, kstring(v)?));
                }
                if is_void_element(&name) || starttag.self_closing {
                    let id = dom.add(Node::Element(element));
                    if let Some(frame) = stack.last_mut() {
                        frame.element.children.push(id);
                    }
                } else {
                    stack.push(Frame { element });
                }
            }
            Token::EndTag(endtag) => {
                let name: &str = std::str::from_utf8(&**endtag.name)?;
                if is_void_element(name) {
                    // </br> and friends; browsers drop these too
                    continue;
                }
                match stack.iter().rposition(|f| f.element.name.as_str() == name) {
                    Some(open) if open > 0 => {
                        while stack.len() > open {
                            close_top(dom, &mut stack);
                        }
                    }
                    _ => {
                        warn!("dropping end tag </{}> with nothing open", name);
                    }
                }
            }
            Token::String(s) => {
                let text = kstring(s)?;
                if !text.is_empty() {
                    let id = dom.add(Node::Text(text));
                    if let Some(frame) = stack.last_mut() {
                        frame.element.children.push(id);
                    }
                }
            }
            Token::Comment(s) => {
                let id = dom.add(Node::Comment(kstring(s)?));
                if let Some(frame) = stack.last_mut() {
                    frame.element.children.push(id);
                }
            }
            Token::Doctype(d) => {
                if doctype.is_none() {
                    *doctype = Some(kstring(d.name)?);
                }
            }
            Token::Error(_) => {
                // the tokenizer recovers on its own
            }
        }
    }

    while stack.len() > 1 {
        warn!("closing <{}> left open at end of input",
              stack.last().map(|f| f.element.name.as_str()).unwrap_or(""));
        close_top(dom, &mut stack);
    }
    Ok(stack.pop().map(|base| base.element.children).unwrap_or_default())
}

impl Dom {
    /// Parse a whole page. Doctype and comments are kept; text,
    /// whitespace included, comes through as the tokenizer delivered it.
    pub fn parse_document(input: &str) -> Result<Dom, ParseError> {
        let mut dom = Dom::new();
        let mut doctype = None;
        let top = parse_into(&mut dom, input, &mut doctype)?;
        dom.top = top;
        dom.doctype = doctype;
        Ok(dom)
    }

    /// Parse markup into this arena without touching the document
    /// structure; the returned ids are the fragment's top-level nodes,
    /// ready to be adopted somewhere.
    pub fn parse_fragment(&mut self, input: &str) -> Result<Vec<NodeId>, ParseError> {
        let mut doctype = None;
        parse_into(self, input, &mut doctype)
    }
}
