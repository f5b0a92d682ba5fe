//! Octal unescaping of mountinfo path fields.

/// Undo the kernel's escaping of path-like mountinfo fields.
///
/// The kernel encodes the space, tab, newline, and backslash bytes as a
/// backslash followed by three octal digits (`\040` for space). This
/// function exactly inverts that encoding: a backslash followed by three
/// octal digits that form a valid byte value is replaced by that byte,
/// anything else is copied verbatim. Operating on bytes keeps path
/// contents that are not valid UTF-8 intact.
#[must_use]
pub fn unescape_octal(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'\\' && i + 3 < input.len() {
            if let Some(byte) = decode_octal_byte(&input[i + 1..i + 4]) {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(input[i]);
        i += 1;
    }
    out
}

/// Decode exactly three octal digits into a byte, if they form one.
fn decode_octal_byte(digits: &[u8]) -> Option<u8> {
    let mut value: u16 = 0;
    for &d in digits {
        if !d.is_ascii_digit() || d > b'7' {
            return None;
        }
        value = value * 8 + u16::from(d - b'0');
    }
    u8::try_from(value).ok()
}
