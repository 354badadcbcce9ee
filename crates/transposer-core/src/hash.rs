//! Stable parameter IDs.
//!
//! Hosts address parameters by `u32`. Plugins name them with short strings
//! (`"transpose"`), and the two are linked by hashing the string with
//! 32-bit FNV-1a. The same function runs inside the derive macro (for
//! collision checks) and at runtime, so both sides always agree.

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Compute the 32-bit FNV-1a hash of a string ID.
///
/// Usable in const context:
///
/// ```
/// use transposer_core::fnv1a_32;
///
/// const TRANSPOSE_ID: u32 = fnv1a_32("transpose");
/// assert_eq!(TRANSPOSE_ID, fnv1a_32("transpose"));
/// ```
#[inline]
pub const fn fnv1a_32(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_offset_basis() {
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
    }

    #[test]
    fn test_reference_vectors() {
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
        assert_eq!(fnv1a_32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_distinct_ids() {
        assert_ne!(fnv1a_32("transpose"), fnv1a_32("Transpose"));
    }
}
