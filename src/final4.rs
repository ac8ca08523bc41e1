//! wyhash final version 4, the current reference algorithm.
//!
//! Unrelated to the legacy [`wyhash`](crate::wyhash) the bridge hashes with:
//! same name, different constants, different mixing, different results. Use
//! it only to interoperate with data hashed by the final reference.

use crate::wyhash::{mix, mum, read4, read8};

/// Default secret (`_wyp`) of the final reference implementation.
pub const FINAL4_SECRET: [u64; 4] = [
    0x2d358dccaa6c78a5,
    0x8bb84b93962eacc9,
    0x4b33a62ed433d4a3,
    0x4d5a2da51de1aa47,
];

/// Reads keys of 1 to 3 bytes; panics on an empty slice.
#[inline(always)]
fn read3(bytes: &[u8]) -> u64 {
    let len = bytes.len();
    ((bytes[0] as u64) << 16) | ((bytes[len >> 1] as u64) << 8) | bytes[len - 1] as u64
}

/// Hashes `bytes` with the given seed and the default secret.
///
/// # Examples
///
/// ```
/// use wyhash_ex::wyhash_final4;
///
/// assert_eq!(wyhash_final4(b"", 0), 0x93228a4de0eec5a2);
/// ```
#[inline]
pub fn wyhash_final4(bytes: &[u8], seed: u64) -> u64 {
    wyhash_final4_with_secret(bytes, seed, &FINAL4_SECRET)
}

/// Hashes `bytes` with the given seed and secret.
#[inline]
pub fn wyhash_final4_with_secret(bytes: &[u8], seed: u64, secret: &[u64; 4]) -> u64 {
    let len = bytes.len();
    let seed = seed ^ mix(seed ^ secret[0], secret[1]);
    let (a, b, seed) = if len <= 16 {
        let (a, b) = read_short(bytes);
        (a, b, seed)
    } else {
        unsafe {
            // SAFETY: we checked that the length is > 16 bytes.
            read_long(bytes, seed, secret)
        }
    };
    let (a, b) = mum(a ^ secret[1], b ^ seed);
    mix(a ^ secret[0] ^ len as u64, b ^ secret[1])
}

/// Reads the two words of a key of at most 16 bytes.
#[inline(always)]
fn read_short(bytes: &[u8]) -> (u64, u64) {
    let len = bytes.len();
    if len >= 4 {
        // 0 for keys shorter than 8 bytes, 4 or 8 otherwise.
        let skip = (len >> 3) << 2;
        unsafe {
            // SAFETY: 4 <= len <= 16 and skip <= len - 8 whenever skip > 0,
            // so every 4-byte load below ends at or before len.
            let a = (read4(bytes, 0) << 32) | read4(bytes, skip);
            let b = (read4(bytes, len - 4) << 32) | read4(bytes, len - 4 - skip);
            (a, b)
        }
    } else if len > 0 {
        (read3(bytes), 0)
    } else {
        (0, 0)
    }
}

/// Folds a key longer than 16 bytes into the seed and reads its last 16 bytes.
///
/// # Safety
/// bytes.len() must be > 16 bytes.
#[inline(never)]
unsafe fn read_long(bytes: &[u8], mut seed: u64, secret: &[u64; 4]) -> (u64, u64, u64) {
    let mut v = bytes;

    if v.len() >= 48 {
        let mut see1 = seed;
        let mut see2 = seed;
        loop {
            unsafe {
                // SAFETY: we checked the length is >= 48, we index at most v[..48].
                seed = mix(read8(v, 0) ^ secret[1], read8(v, 8) ^ seed);
                see1 = mix(read8(v, 16) ^ secret[2], read8(v, 24) ^ see1);
                see2 = mix(read8(v, 32) ^ secret[3], read8(v, 40) ^ see2);
            }
            v = &v[48..];
            if v.len() < 48 {
                break;
            }
        }
        seed ^= see1 ^ see2;
    }

    while v.len() > 16 {
        unsafe {
            // SAFETY: we checked the length is > 16, we index at most v[..16].
            seed = mix(read8(v, 0) ^ secret[1], read8(v, 8) ^ seed);
        }
        v = &v[16..];
    }

    // The last word pair may overlap bytes that were already folded in.
    let len = bytes.len();
    unsafe {
        // SAFETY: our precondition ensures the whole key is longer than 16 bytes.
        (read8(bytes, len - 16), read8(bytes, len - 8), seed)
    }
}
