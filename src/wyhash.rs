//! The legacy wyhash function, the three-argument `wyhash(key, len, seed)`
//! that predates the "final" releases of the reference algorithm.
//!
//! Every bridge hash ever produced comes from this version, so every constant
//! and mixing step below must stay exactly as it is. The later final version
//! lives in [`crate::final4`].

use std::hash::{BuildHasher, Hasher};

/// Mixing primes of the legacy reference algorithm.
pub const PRIMES: [u64; 6] = [
    0xa0761d6478bd642f,
    0xe7037ed1a0b428db,
    0x8ebc6af09c88c6e3,
    0x589965cc75374cc3,
    0x1d8e4e27c47d124f,
    0xeb44accab455d165,
];

const P0: u64 = PRIMES[0];
const P1: u64 = PRIMES[1];
const P2: u64 = PRIMES[2];
const P3: u64 = PRIMES[3];
const P4: u64 = PRIMES[4];
const P5: u64 = PRIMES[5];

/// Multiply two u64s into a u128 and return the low and high halves.
#[inline(always)]
pub(crate) fn mum(a: u64, b: u64) -> (u64, u64) {
    let r = (a as u128).wrapping_mul(b as u128);
    (r as u64, (r >> 64) as u64)
}

/// Folded multiply: multiply two u64s and XOR the high and low halves.
#[inline(always)]
pub(crate) fn mix(a: u64, b: u64) -> u64 {
    let (lo, hi) = mum(a, b);
    lo ^ hi
}

/// Load 8 little-endian bytes at the given offset.
///
/// # Safety
/// You must ensure that offset + 8 <= bytes.len().
#[inline(always)]
pub(crate) unsafe fn read8(bytes: &[u8], offset: usize) -> u64 {
    u64::from_le(unsafe { bytes.as_ptr().add(offset).cast::<u64>().read_unaligned() })
}

/// Load 4 little-endian bytes at the given offset, widened to u64.
///
/// # Safety
/// You must ensure that offset + 4 <= bytes.len().
#[inline(always)]
pub(crate) unsafe fn read4(bytes: &[u8], offset: usize) -> u64 {
    u32::from_le(unsafe { bytes.as_ptr().add(offset).cast::<u32>().read_unaligned() }) as u64
}

/// Two 4-byte words at the given offset, the first one in the high half.
///
/// # Safety
/// You must ensure that offset + 8 <= bytes.len().
#[inline(always)]
unsafe fn read8_swapped(bytes: &[u8], offset: usize) -> u64 {
    unsafe { (read4(bytes, offset) << 32) | read4(bytes, offset + 4) }
}

/// Packs the 1 to 8 trailing bytes of a key.
///
/// The byte order is irregular but fixed: changing it changes the hashes.
#[inline(always)]
fn read_tail(bytes: &[u8]) -> u64 {
    let b = |i: usize| bytes[i] as u64;
    let w = || b(0) | b(1) << 8 | b(2) << 16 | b(3) << 24;
    match bytes.len() {
        1 => b(0),
        2 => b(1) << 8 | b(0),
        3 => b(1) << 16 | b(0) << 8 | b(2),
        4 => w(),
        5 => w() << 8 | b(4),
        6 => w() << 16 | b(5) << 8 | b(4),
        7 => w() << 24 | b(5) << 16 | b(4) << 8 | b(6),
        _ => w() << 32 | b(7) << 24 | b(6) << 16 | b(5) << 8 | b(4),
    }
}

/// Folds `bytes` into `seed`: 32-byte blocks first, then the 1 to 31 byte tail.
#[inline]
fn fold(bytes: &[u8], mut seed: u64) -> u64 {
    let mut blocks = bytes.chunks_exact(32);
    for block in &mut blocks {
        unsafe {
            // SAFETY: every block is exactly 32 bytes, we index at most block[..32].
            seed = mix(
                seed ^ P0,
                mix(read8(block, 0) ^ P1, read8(block, 8) ^ P2)
                    ^ mix(read8(block, 16) ^ P3, read8(block, 24) ^ P4),
            );
        }
    }
    seed ^= P0;

    let tail = blocks.remainder();
    unsafe {
        // SAFETY: each arm reads whole words only below the tail length it matched.
        match tail.len() {
            0 => seed,
            1..=8 => mix(seed, read_tail(tail) ^ P1),
            9..=16 => mix(read8_swapped(tail, 0) ^ seed, read_tail(&tail[8..]) ^ P2),
            17..=24 => {
                mix(read8_swapped(tail, 0) ^ seed, read8_swapped(tail, 8) ^ P2)
                    ^ mix(seed, read_tail(&tail[16..]) ^ P3)
            }
            _ => {
                mix(read8_swapped(tail, 0) ^ seed, read8_swapped(tail, 8) ^ P2)
                    ^ mix(read8_swapped(tail, 16) ^ seed, read_tail(&tail[24..]) ^ P4)
            }
        }
    }
}

#[inline(always)]
fn finalize(len: u64, seed: u64) -> u64 {
    mix(seed, len ^ P5)
}

/// Hashes `bytes` with the given seed.
///
/// This is the legacy reference `wyhash(key, len, seed)`. It never fails,
/// including for the empty key.
///
/// # Examples
///
/// ```
/// use wyhash_ex::wyhash;
///
/// assert_eq!(wyhash(&[0, 1, 2], 3), 0xb0f941520b1ad95d);
/// assert_eq!(wyhash(b"abc", 1), 0xea6f08cfc8ca6d61);
/// ```
#[inline]
pub fn wyhash(bytes: &[u8], seed: u64) -> u64 {
    finalize(bytes.len() as u64, fold(bytes, seed))
}

/// Hasher folding every write into one state, finalized with the total length.
///
/// A single `write` matches the one-shot [`wyhash`] with the same seed.
/// Several writes are *not* the same as hashing their concatenation, since
/// each write folds its own tail.
#[derive(Debug, Clone, Copy)]
pub struct WyHasher {
    state: u64,
    len: u64,
}

impl WyHasher {
    #[inline]
    pub fn new() -> Self {
        Self::new_with_seed(0)
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            state: seed,
            len: 0,
        }
    }
}

impl Default for WyHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for WyHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.state = fold(bytes, self.state);
        self.len = self.len.wrapping_add(bytes.len() as u64);
    }

    #[inline]
    fn finish(&self) -> u64 {
        finalize(self.len, self.state)
    }
}

/// Seeded [`BuildHasher`] for [`WyHasher`], for use with `HashMap` and `HashSet`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use wyhash_ex::WyHashBuilder;
///
/// let mut map = HashMap::with_hasher(WyHashBuilder::with_seed(1));
/// map.insert("foo", 1);
/// assert_eq!(map.get("foo"), Some(&1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WyHashBuilder {
    seed: u64,
}

impl WyHashBuilder {
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl BuildHasher for WyHashBuilder {
    type Hasher = WyHasher;

    #[inline]
    fn build_hasher(&self) -> WyHasher {
        WyHasher::new_with_seed(self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn ascending(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    #[test]
    fn test_reference_vectors() {
        // Output of the legacy C implementation on 0, 1, 2, ... with seed = length.
        let expected: [(usize, u64); 15] = [
            (0, 0xf961f936e29c9345),
            (1, 0x83fcbe65126830a3),
            (2, 0xcaed38c4bfba7448),
            (3, 0xb0f941520b1ad95d),
            (4, 0x22fc0d05b5655593),
            (8, 0x276e8d0315af0b78),
            (16, 0x9510769567e2b9f5),
            (17, 0xe4c8addf5e52d332),
            (31, 0x855f219b5e0f78bf),
            (32, 0x39e624e60cf044f5),
            (33, 0x954b951660265062),
            (63, 0x20f7c7d18e52a7ad),
            (64, 0x56d5ee41b0b04b2c),
            (100, 0x20b2de3702e39858),
            (255, 0x0d5024d6272206ba),
        ];
        for (len, hash) in expected {
            assert_eq!(wyhash(&ascending(len), len as u64), hash, "length {}", len);
        }
    }

    #[test]
    fn test_seed_one_golden() {
        assert_eq!(wyhash(b"", 1), 0xeda6ac7daf4962eb);
        assert_eq!(wyhash(b"a", 1), 0x6dc395f88b363baa);
        assert_eq!(wyhash(b"abc", 1), 0xea6f08cfc8ca6d61);
        assert_eq!(wyhash(b"hello world", 1), 0x39a634eacfd69418);
        assert_eq!(wyhash(&[b'a'; 4095], 1), 0x2ad7948645b64358);
    }

    #[test]
    fn test_tail_classes() {
        // One length per tail arm, on both sides of each block boundary.
        let expected: [(usize, u64); 20] = [
            (1, 0x83fcbe65126830a3),
            (2, 0xf79ebb7494286a7a),
            (3, 0x09d1ad488c17a5ee),
            (4, 0x93616ae50ae48a8a),
            (5, 0x723a2c03a9c9a339),
            (6, 0xa147b3bb2f90b64b),
            (7, 0xdbc6c486d8c0001d),
            (8, 0xeaffec9e011104d6),
            (9, 0xb64a3e18116b4cba),
            (16, 0x70c2d4a6b009520d),
            (17, 0x8e1c064f3dfc45a3),
            (24, 0xdbe70ec212133c08),
            (25, 0xe731f9a20de57c87),
            (31, 0x06b24237ebe52e11),
            (32, 0x17f110d06583a350),
            (33, 0x0aa5e5b21e9c8e9d),
            (63, 0xce745385896fa0e2),
            (64, 0x637ebefca52a0d60),
            (65, 0x02f85fcaeab50103),
            (255, 0x5c408072e09e101b),
        ];
        for (len, hash) in expected {
            assert_eq!(wyhash(&ascending(len), 1), hash, "length {}", len);
        }
    }

    #[test]
    fn test_tail_byte_order() {
        assert_eq!(read_tail(&[1]), 0x01);
        assert_eq!(read_tail(&[1, 2, 3]), 0x02_0103);
        assert_eq!(read_tail(&[1, 2, 3, 4, 5, 6, 7]), 0x04_0302_0106_0507);
        assert_eq!(read_tail(&[1, 2, 3, 4, 5, 6, 7, 8]), 0x0403_0201_0807_0605);
    }

    #[test]
    fn test_matches_wyhash_crate() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut key = vec![0u8; 4095];
        rng.fill(&mut key[..]);
        for len in 0..key.len() {
            let seed = rng.random::<u64>();
            assert_eq!(
                wyhash(&key[..len], seed),
                wyhash_ref::wyhash(&key[..len], seed),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_seed_changes_hash() {
        assert_ne!(wyhash(b"abc", 0), wyhash(b"abc", 1));
        assert_ne!(wyhash(b"", 0), wyhash(b"", 1));
    }

    #[test]
    fn test_zero_keys_of_every_length_distinct() {
        let hashes: HashSet<_> = (0..130).map(|len| wyhash(&vec![0; len], 1)).collect();
        assert_eq!(hashes.len(), 130);
    }

    #[test]
    fn test_single_byte_flips_at_block_boundaries() {
        for len in [4, 8, 9, 16, 17, 24, 25, 31, 32, 33, 48, 49, 64, 65] {
            let key = ascending(len);
            for pos in [0, len / 2, len - 1] {
                let mut flipped = key.clone();
                flipped[pos] ^= 1;
                let diff = (wyhash(&key, 1) ^ wyhash(&flipped, 1)).count_ones();
                assert!(diff >= 16, "length {}, byte {}: {} bits differ", len, pos, diff);
            }
        }
    }

    #[test]
    fn test_random_keys_deterministic_and_distinct() {
        let mut rng = SmallRng::seed_from_u64(0);
        let mut seen = HashSet::new();
        for _ in 0..2_000 {
            let len = rng.random_range(0..4096);
            let mut key = vec![0u8; len];
            rng.fill(&mut key[..]);
            let hash = wyhash(&key, 1);
            assert_eq!(hash, wyhash(&key, 1));
            seen.insert((key, hash));
        }
        let keys: HashSet<_> = seen.iter().map(|(k, _)| k.clone()).collect();
        let hashes: HashSet<_> = seen.iter().map(|(_, h)| *h).collect();
        assert_eq!(keys.len(), hashes.len());
    }

    #[test]
    fn test_short_keys_distinct() {
        // Every key of at most two bytes
        let mut hashes = HashSet::new();
        hashes.insert(wyhash(&[], 1));
        for a in 0..=255u8 {
            hashes.insert(wyhash(&[a], 1));
            for b in 0..=255u8 {
                hashes.insert(wyhash(&[a, b], 1));
            }
        }
        assert_eq!(hashes.len(), 1 + 256 + 256 * 256);
    }

    #[test]
    fn test_single_write_matches_one_shot() {
        let mut hasher = WyHasher::new_with_seed(1);
        hasher.write(b"abc");
        assert_eq!(hasher.finish(), wyhash(b"abc", 1));

        let mut hasher = WyHasher::new();
        hasher.write(&[0]);
        assert_eq!(hasher.finish(), 0x8c73a8ab46596ae4);
    }

    #[test]
    fn test_writes_fold_into_one_state() {
        let mut hasher = WyHasher::new_with_seed(1);
        hasher.write(b"hello ");
        hasher.write(b"");
        hasher.write(b"world");
        assert_eq!(hasher.finish(), 0x03d4f9af850f5e5b);
        assert_ne!(hasher.finish(), wyhash(b"hello world", 1));

        let mut reference = wyhash_ref::WyHash::with_seed(1);
        reference.write(b"hello ");
        reference.write(b"");
        reference.write(b"world");
        assert_eq!(hasher.finish(), reference.finish());
    }

    #[test]
    fn test_builder_is_seeded() {
        let builder = WyHashBuilder::with_seed(1);
        assert_eq!(builder.seed(), 1);
        assert_eq!(builder.hash_one(42u64), builder.hash_one(42u64));
        assert_ne!(
            builder.hash_one(42u64),
            WyHashBuilder::default().hash_one(42u64)
        );
    }
}
