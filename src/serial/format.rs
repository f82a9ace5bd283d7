//! Number formatting shared by the serial print family.

/// Radix used when an unsupported base is requested.
pub const DEFAULT_RADIX: u32 = 10;

/// Enough room for `u32::MAX` in base 2.
pub const RADIX_BUFFER_LEN: usize = 32;

/// Render `value` in `base` into the tail of `buf` and return the digits.
///
/// Bases outside `2..=36` fall back to [`DEFAULT_RADIX`]. Digits above 9
/// are upper case, matching the reference platforms.
///
/// ```rust
/// use libplatform::serial::format_radix;
///
/// let mut buf = [0u8; 32];
/// assert_eq!(format_radix(255, 16, &mut buf), b"FF");
/// assert_eq!(format_radix(5, 2, &mut buf), b"101");
/// assert_eq!(format_radix(42, 1, &mut buf), b"42");
/// ```
pub fn format_radix(value: u32, base: u32, buf: &mut [u8; RADIX_BUFFER_LEN]) -> &[u8] {
    let base = if (2..=36).contains(&base) {
        base
    } else {
        DEFAULT_RADIX
    };

    let mut pos = buf.len();
    let mut rest = value;
    loop {
        pos -= 1;
        let digit = (rest % base) as u8;
        buf[pos] = if digit < 10 {
            b'0' + digit
        } else {
            b'A' + digit - 10
        };
        rest /= base;
        if rest == 0 {
            break;
        }
    }
    &buf[pos..]
}
