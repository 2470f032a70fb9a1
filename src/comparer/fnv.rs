//! 32-bit FNV-1a. All arithmetic wraps.

pub(crate) const FNV_BASIS: i32 = 0x811C_9DC5_u32 as i32;
pub(crate) const FNV_PRIME: i32 = 0x0100_0193;

pub(crate) fn str_hash(s: &str) -> i32 {
    s.bytes().fold(FNV_BASIS, |hash, b| (hash ^ i32::from(b)).wrapping_mul(FNV_PRIME))
}

/// `None` hashes to 0.
pub(crate) fn opt_hash(s: Option<&str>) -> i32 {
    s.map_or(0, str_hash)
}
