const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Content hash used as the cache key for a flow's source text.
///
/// 64-bit FNV-1a over the UTF-8 bytes, as 16 lowercase hex digits. Stable
/// across processes and builds. Not collision resistant.
pub fn compute_hash(text: &str) -> String {
    let hash = text.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    });
    format!("{:016x}", hash)
}
