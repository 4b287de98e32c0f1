use nom::bytes::complete::take;
use nom::number::complete::le_u8;
use nom::sequence::tuple;
use nom::IResult;

/// Size of the id and length bytes in front of every information element.
pub const ELEMENT_HEADER_LEN: usize = 2;

/// A single information element borrowed from a frame body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    pub id: u8,
    pub length: u8,
    pub body: &'a [u8],
    /// Position of the element's id byte, relative to the start of the walked span.
    pub offset: usize,
}

impl<'a> Element<'a> {
    /// Offset of the first byte after this element.
    pub fn end(&self) -> usize {
        self.offset + ELEMENT_HEADER_LEN + self.body.len()
    }
}

/// A single step of an [ElementCursor].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementStep<'a> {
    Item(Element<'a>),
    /// The span ended inside an element.
    /// `needed` is the size the element would have had, `available` what was left.
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

/// Walks a span of TLV encoded information elements.
///
/// Every step either yields a complete element or reports a truncation.
/// After a truncation the cursor is exhausted, elements before it stay valid.
/// No byte past the given span is ever looked at.
///
/// ```
/// use libwifi::parsers::{ElementCursor, ElementStep};
///
/// let bytes = [0, 2, 10, 20, 1, 3, 11];
/// let mut cursor = ElementCursor::new(&bytes);
///
/// assert!(matches!(cursor.next(), Some(ElementStep::Item(_))));
/// assert!(matches!(
///     cursor.next(),
///     Some(ElementStep::Truncated { offset: 4, needed: 5, available: 3 })
/// ));
/// assert_eq!(cursor.next(), None);
/// ```
#[derive(Clone, Debug)]
pub struct ElementCursor<'a> {
    remaining: &'a [u8],
    offset: usize,
    exhausted: bool,
}

fn parse_element_header(input: &[u8]) -> IResult<&[u8], (u8, u8)> {
    tuple((le_u8, le_u8))(input)
}

fn parse_element_body(input: &[u8], length: u8) -> IResult<&[u8], &[u8]> {
    take(length as usize)(input)
}

impl<'a> ElementCursor<'a> {
    pub fn new(span: &'a [u8]) -> Self {
        ElementCursor {
            remaining: span,
            offset: 0,
            exhausted: false,
        }
    }

    /// Bytes that haven't been consumed yet.
    pub fn remaining(&self) -> &'a [u8] {
        self.remaining
    }

    /// Only the complete elements, stopping silently at a truncation.
    pub fn elements(self) -> impl Iterator<Item = Element<'a>> {
        self.map_while(|step| match step {
            ElementStep::Item(element) => Some(element),
            ElementStep::Truncated { .. } => None,
        })
    }

    fn truncate(&mut self, needed: usize) -> ElementStep<'a> {
        let step = ElementStep::Truncated {
            offset: self.offset,
            needed,
            available: self.remaining.len(),
        };
        self.exhausted = true;
        self.remaining = &[];

        step
    }
}

impl<'a> Iterator for ElementCursor<'a> {
    type Item = ElementStep<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted || self.remaining.is_empty() {
            return None;
        }

        let Ok((rest, (id, length))) = parse_element_header(self.remaining) else {
            return Some(self.truncate(ELEMENT_HEADER_LEN));
        };

        let Ok((rest, body)) = parse_element_body(rest, length) else {
            return Some(self.truncate(ELEMENT_HEADER_LEN + length as usize));
        };

        let element = Element {
            id,
            length,
            body,
            offset: self.offset,
        };
        self.offset = element.end();
        self.remaining = rest;

        Some(ElementStep::Item(element))
    }
}

/// Collect all complete elements of a span.
pub fn parse_elements(span: &[u8]) -> Vec<Element<'_>> {
    ElementCursor::new(span).elements().collect()
}
