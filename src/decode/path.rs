use smallvec::SmallVec;

use crate::MalformedIndex;

/// One component of a key path, borrowed from the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Name(&'a str),
    Indexed { name: &'a str, index: usize },
}

pub type KeyPath<'a> = SmallVec<[Segment<'a>; 8]>;

/// A segment containing `[` whose bracket part is not `[<non-negative integer>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedSegment<'a> {
    pub raw: &'a str,
}

/// Classify a raw segment.
///
/// The name is everything before the first `[`; the index is the text between
/// that `[` and the first `]` after it. Anything following the `]` is ignored.
pub fn parse_segment(raw: &str) -> Result<Segment<'_>, MalformedSegment<'_>> {
    let Some(open) = raw.find('[') else {
        return Ok(Segment::Name(raw));
    };
    let name = &raw[..open];
    let after_open = &raw[open + 1..];
    let close = after_open.find(']').ok_or(MalformedSegment { raw })?;
    let digits = after_open[..close].trim();
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(MalformedSegment { raw });
    }
    let index = digits.parse().map_err(|_| MalformedSegment { raw })?;
    Ok(Segment::Indexed { name, index })
}

/// Split a key on `delimiter` and classify every piece.
///
/// Under [`MalformedIndex::Literal`] a malformed segment becomes a plain name
/// holding its raw text; under the other policies the first malformed segment
/// is returned as the error. `delimiter` must be non-empty.
pub fn tokenize<'a>(
    key: &'a str,
    delimiter: &str,
    policy: MalformedIndex,
) -> Result<KeyPath<'a>, MalformedSegment<'a>> {
    let mut path = KeyPath::new();
    for raw in key.split(delimiter) {
        let segment = match parse_segment(raw) {
            Ok(segment) => segment,
            Err(malformed) if policy == MalformedIndex::Literal => {
                tracing::debug!(segment = malformed.raw, "keeping malformed index as a literal name");
                Segment::Name(malformed.raw)
            }
            Err(malformed) => return Err(malformed),
        };
        path.push(segment);
    }
    Ok(path)
}
