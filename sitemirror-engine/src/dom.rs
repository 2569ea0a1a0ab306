//! Parsed HTML document tree.
//!
//! Thin wrapper over an html5ever `RcDom`. Visitors only ever receive an
//! element's tag name and a mutable slice of its attributes: attribute values
//! can be changed in place but no node or attribute can be added or removed
//! while the tree is being walked.
//!
//! The tree is reference counted and not `Send`; it must be created, walked
//! and rendered without crossing an await point.

use crate::error::{MirrorError, Result};
use html5ever::serialize::{SerializeOpts, serialize};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{Attribute, ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

pub struct Document {
    dom: RcDom,
}

impl Document {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let dom = parse_document(RcDom::default(), ParseOpts::default())
            .from_utf8()
            .read_from(&mut &bytes[..])
            .map_err(|e| MirrorError::Parse(e.to_string()))?;
        Ok(Self { dom })
    }

    pub fn render(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let document: SerializableHandle = self.dom.document.clone().into();
        serialize(&mut out, &document, SerializeOpts::default())
            .map_err(|e| MirrorError::Parse(format!("serialization failed: {}", e)))?;
        Ok(out)
    }

    /// Visit every element in document order (pre-order, depth first).
    pub fn for_each_element<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &mut [Attribute]),
    {
        let mut stack: Vec<Handle> = vec![self.dom.document.clone()];

        while let Some(node) = stack.pop() {
            if let NodeData::Element { name, attrs, .. } = &node.data {
                let mut attrs = attrs.borrow_mut();
                visit(&name.local, &mut attrs[..]);
            }

            let children = node.children.borrow();
            stack.extend(children.iter().rev().cloned());
        }
    }
}

pub fn attr_name(attr: &Attribute) -> &str {
    &attr.name.local
}

pub fn set_attr_value(attr: &mut Attribute, value: &str) {
    attr.value = StrTendril::from_slice(value);
}
