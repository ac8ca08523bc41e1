//! # wyhash_ex
//!
//! The wyhash non-cryptographic hash function, exposed to a host runtime
//! through a fixed-seed, bounded-buffer bridge.
//!
//! ## Features
//!
//! - `wyhash`: the legacy three-argument wyhash algorithm, bit-for-bit
//! - `wyhash_final4`: the later final version 4, kept apart under its own name
//! - `WyHasher` / `WyHashBuilder`: `std::hash` integration
//! - `hash`: the host entry point, hashing a Latin-1 charlist of at most 4095
//!   characters with the fixed seed `1`
//! - Deterministic: no random state, identical inputs always hash identically
//!
//! ## Hashing bytes
//!
//! ```
//! use wyhash_ex::wyhash;
//!
//! let hash = wyhash(b"hello world", 1);
//! assert_eq!(hash, wyhash(b"hello world", 1));
//! ```
//!
//! ## Hashing host values
//!
//! ```
//! use wyhash_ex::{hash, InvalidArgument, Term};
//!
//! // Returned as the host's native signed 64-bit integer
//! assert_eq!(hash(&Term::from("abc")), Ok(-1554013657899569823));
//!
//! // Only charlists are text
//! assert!(matches!(
//!     hash(&Term::Binary(b"abc".to_vec())),
//!     Err(InvalidArgument::NotText { .. })
//! ));
//! ```

pub mod bridge;
mod final4;
mod wyhash;

pub use bridge::{
    Bridge, Export, HashValue, InvalidArgument, KeyBuffer, MAX_BUF_LEN, SEED, Term, hash,
};
pub use final4::{FINAL4_SECRET, wyhash_final4, wyhash_final4_with_secret};
pub use wyhash::{PRIMES, WyHashBuilder, WyHasher, wyhash};
