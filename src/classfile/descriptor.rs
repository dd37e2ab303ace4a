//! Type-descriptor grammar validation.
//!
//! Descriptors are preserved verbatim in summaries and change records; this
//! module only checks well-formedness so that a corrupt constant pool entry
//! is caught at parse time instead of leaking into reports.
//!
//! Grammar: `V` void (method returns only), `B C D F I J S Z` primitives,
//! `Lpkg/Name;` reference types, `[` array dimensions, `(args)ret` methods.

/// Consume one field type starting at `pos`. Returns the position after the
/// type, or `None` if no well-formed type starts there.
fn consume_field_type(desc: &[u8], mut pos: usize) -> Option<usize> {
    // Array dimensions (the format caps these at 255)
    let mut dims = 0;
    while pos < desc.len() && desc[pos] == b'[' {
        dims += 1;
        if dims > 255 {
            return None;
        }
        pos += 1;
    }

    match desc.get(pos)? {
        b'B' | b'C' | b'D' | b'F' | b'I' | b'J' | b'S' | b'Z' => Some(pos + 1),
        b'L' => {
            let semi = desc[pos + 1..].iter().position(|&b| b == b';')?;
            // Class name must be non-empty
            if semi == 0 {
                return None;
            }
            Some(pos + 1 + semi + 1)
        }
        _ => None,
    }
}

/// Whether `desc` is exactly one well-formed field descriptor.
#[must_use]
pub fn is_valid_field_descriptor(desc: &str) -> bool {
    let bytes = desc.as_bytes();
    matches!(consume_field_type(bytes, 0), Some(end) if end == bytes.len())
}

/// Whether `desc` is a well-formed method descriptor: `(` parameter types
/// `)` then a return type or `V`.
#[must_use]
pub fn is_valid_method_descriptor(desc: &str) -> bool {
    let bytes = desc.as_bytes();
    if bytes.first() != Some(&b'(') {
        return false;
    }
    let mut pos = 1;
    while pos < bytes.len() && bytes[pos] != b')' {
        match consume_field_type(bytes, pos) {
            Some(next) => pos = next,
            None => return false,
        }
    }
    if bytes.get(pos) != Some(&b')') {
        return false;
    }
    pos += 1;
    if bytes.get(pos) == Some(&b'V') {
        return pos + 1 == bytes.len();
    }
    matches!(consume_field_type(bytes, pos), Some(end) if end == bytes.len())
}

/// Number of parameters a method descriptor declares, or `None` if the
/// descriptor is malformed.
#[must_use]
pub fn parameter_count(desc: &str) -> Option<usize> {
    let bytes = desc.as_bytes();
    if bytes.first() != Some(&b'(') {
        return None;
    }
    let mut pos = 1;
    let mut count = 0;
    while pos < bytes.len() && bytes[pos] != b')' {
        pos = consume_field_type(bytes, pos)?;
        count += 1;
    }
    if bytes.get(pos) != Some(&b')') {
        return None;
    }
    Some(count)
}
