//! Bridge between a host runtime's calling convention and [`wyhash`].
//!
//! The host passes one text value (a charlist of Latin-1 character codes).
//! The bridge copies it into a fixed stack buffer followed by a NUL
//! terminator, takes the key length by scanning for that terminator, hashes
//! the key with [`SEED`] and hands the result back as the host's native
//! 64-bit integer.
//!
//! Because the length comes from the terminator scan, a charlist containing
//! `0` hashes like its prefix up to that element. This matches every hash
//! produced so far; use [`Bridge::hash_exact`] to hash raw bytes instead.

use crate::wyhash;
use log::{debug, trace};

/// Capacity of the working buffer, terminator included.
pub const MAX_BUF_LEN: usize = 4096;

/// Seed of every hash computed through the bridge.
///
/// There is no reason for this particular value, but changing it changes
/// every hash ever produced.
pub const SEED: u64 = 1;

/// Host module the exports are registered under.
pub const MODULE: &str = "Elixir.WyhashEx";

/// A value received from the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// A list of character codes, the host's text representation.
    Charlist(Vec<i64>),
    Binary(Vec<u8>),
    Integer(i64),
    Atom(String),
}

impl Term {
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Charlist(_) => "charlist",
            Term::Binary(_) => "binary",
            Term::Integer(_) => "integer",
            Term::Atom(_) => "atom",
        }
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Term::Charlist(text.chars().map(|c| c as i64).collect())
    }
}

impl From<&[u8]> for Term {
    fn from(bytes: &[u8]) -> Self {
        Term::Charlist(bytes.iter().map(|&b| b as i64).collect())
    }
}

/// The host's invalid-argument signal, with its cause.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("badarg: expected a charlist, got {found}")]
    NotText { found: &'static str },
    #[error("badarg: element {index} ({value}) is not a Latin-1 character")]
    NotLatin1 { index: usize, value: i64 },
    #[error("badarg: key needs {needed} bytes, buffer holds {}", MAX_BUF_LEN)]
    TooLong { needed: usize },
    #[error("badarg: expected {expected} argument(s), got {found}")]
    Arity { expected: usize, found: usize },
}

/// Fixed working buffer a key is decoded into.
///
/// A fresh buffer holds the empty key.
pub struct KeyBuffer {
    buf: [u8; MAX_BUF_LEN],
}

impl KeyBuffer {
    #[inline]
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_BUF_LEN],
        }
    }

    /// Copies a charlist into the buffer and appends the terminator.
    ///
    /// Returns the number of bytes written, terminator included. Nothing is
    /// truncated: a charlist that does not fit, together with its terminator,
    /// is rejected. Every element is checked before anything is written, so a
    /// rejected charlist leaves the previous key in place.
    pub fn decode(&mut self, term: &Term) -> Result<usize, InvalidArgument> {
        let Term::Charlist(chars) = term else {
            return Err(InvalidArgument::NotText { found: term.kind() });
        };
        if chars.len() >= MAX_BUF_LEN {
            return Err(InvalidArgument::TooLong {
                needed: chars.len() + 1,
            });
        }
        if let Some((index, &value)) = chars
            .iter()
            .enumerate()
            .find(|&(_, &value)| u8::try_from(value).is_err())
        {
            return Err(InvalidArgument::NotLatin1 { index, value });
        }
        for (slot, &value) in self.buf.iter_mut().zip(chars) {
            *slot = value as u8;
        }
        self.buf[chars.len()] = 0;
        Ok(chars.len() + 1)
    }

    /// The key: the buffer contents up to, not including, the first NUL.
    pub fn key(&self) -> &[u8] {
        let len = self
            .buf
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(MAX_BUF_LEN);
        &self.buf[..len]
    }
}

impl Default for KeyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A 64-bit hash with explicit conversions to host integer representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashValue(u64);

impl HashValue {
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Two's-complement reinterpretation, the native integer of 64-bit hosts.
    pub const fn as_i64(self) -> i64 {
        self.0 as i64
    }

    /// High and low halves, for hosts whose native integers are narrower.
    pub const fn hi_lo(self) -> (u32, u32) {
        ((self.0 >> 32) as u32, self.0 as u32)
    }
}

impl From<HashValue> for u64 {
    fn from(value: HashValue) -> Self {
        value.0
    }
}

impl From<HashValue> for i64 {
    fn from(value: HashValue) -> Self {
        value.as_i64()
    }
}

/// Hashes host values with a fixed seed.
///
/// The default bridge uses [`SEED`]; overriding it produces hashes that are
/// incompatible with everything computed with the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    seed: u64,
}

impl Bridge {
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Decodes `term` into a stack buffer and hashes the terminated key.
    ///
    /// # Examples
    ///
    /// ```
    /// use wyhash_ex::{Bridge, Term};
    ///
    /// let bridge = Bridge::default();
    /// let hash = bridge.hash(&Term::from("abc")).unwrap();
    /// assert_eq!(hash.as_u64(), 0xea6f08cfc8ca6d61);
    /// assert!(bridge.hash(&Term::Integer(1)).is_err());
    /// ```
    pub fn hash(&self, term: &Term) -> Result<HashValue, InvalidArgument> {
        let mut buf = KeyBuffer::new();
        buf.decode(term)
            .inspect_err(|e| debug!("Rejected {} argument: {}", term.kind(), e))?;
        let key = buf.key();
        let value = HashValue(wyhash(key, self.seed));
        trace!("Hashed {} key bytes to {:#018x}", key.len(), value.0);
        Ok(value)
    }

    /// Hashes exactly `bytes`, embedded NULs included.
    ///
    /// Keys are bounded like [`Bridge::hash`]: at most `MAX_BUF_LEN - 1` bytes.
    pub fn hash_exact(&self, bytes: &[u8]) -> Result<HashValue, InvalidArgument> {
        if bytes.len() >= MAX_BUF_LEN {
            let e = InvalidArgument::TooLong {
                needed: bytes.len() + 1,
            };
            debug!("Rejected raw key: {}", e);
            return Err(e);
        }
        let value = HashValue(wyhash(bytes, self.seed));
        trace!("Hashed {} raw bytes to {:#018x}", bytes.len(), value.0);
        Ok(value)
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::with_seed(SEED)
    }
}

/// The `hash/1` entry point: hashes `term` with [`SEED`] and returns the
/// result as the host's native signed integer.
#[inline]
pub fn hash(term: &Term) -> Result<i64, InvalidArgument> {
    Bridge::default().hash(term).map(HashValue::as_i64)
}

/// A function registered with the host runtime.
#[derive(Debug, Clone, Copy)]
pub struct Export {
    pub name: &'static str,
    pub arity: usize,
    fun: fn(&[Term]) -> Result<i64, InvalidArgument>,
}

impl Export {
    /// Calls the function, rejecting a wrong number of arguments.
    pub fn invoke(&self, args: &[Term]) -> Result<i64, InvalidArgument> {
        if args.len() != self.arity {
            return Err(InvalidArgument::Arity {
                expected: self.arity,
                found: args.len(),
            });
        }
        (self.fun)(args)
    }
}

// Only reached through `Export::invoke`, which has checked the arity.
fn hash_export(args: &[Term]) -> Result<i64, InvalidArgument> {
    hash(&args[0])
}

/// Functions exported to the host under [`MODULE`].
pub static EXPORTS: [Export; 1] = [Export {
    name: "hash",
    arity: 1,
    fun: hash_export,
}];

/// Looks up an export by name and arity.
pub fn export(name: &str, arity: usize) -> Option<&'static Export> {
    EXPORTS
        .iter()
        .find(|e| e.name == name && e.arity == arity)
}
