//! Markup parsing and tree traversal
//!
//! html5ever recovers from any input, so parsing is total: an empty or
//! text-only body becomes a document skeleton with no marker elements.
//! Traversal is a pre-order, left-to-right walk over element nodes.

use scraper::{ElementRef, Html};

/// Receives every element of a document in pre-order
pub trait Visitor<'a> {
    fn visit_element(&mut self, element: ElementRef<'a>);
}

impl<'a, F> Visitor<'a> for F
where
    F: FnMut(ElementRef<'a>),
{
    fn visit_element(&mut self, element: ElementRef<'a>) {
        self(element)
    }
}

/// Parses a page body into a document tree
///
/// Malformed markup is repaired the way a browser would; text outside any
/// element ends up under `<body>`.
pub fn parse(raw: &str) -> Html {
    Html::parse_document(raw)
}

/// Visits `element`, then each of its element descendants in document order
pub fn walk<'a, V>(element: ElementRef<'a>, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    visitor.visit_element(element);
    for child in element.children() {
        if let Some(child) = ElementRef::wrap(child) {
            walk(child, visitor);
        }
    }
}

/// Walks a whole document starting from its root element
pub fn walk_document<'a, V>(document: &'a Html, visitor: &mut V)
where
    V: Visitor<'a> + ?Sized,
{
    walk(document.root_element(), visitor);
}
