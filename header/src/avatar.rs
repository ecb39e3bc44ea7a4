//! Avatar colour derivation.
//!
//! Accounts without a user-chosen colour get one derived from their
//! identifier. The derivation is a pure function of the identifier and the
//! palette length: SHA-256 over the identifier bytes, the first four digest
//! bytes read as a big-endian `u32`, reduced modulo the palette size. It does
//! not depend on process state, so the same account keeps its colour across
//! restarts and platforms.
//!
//! # Example
//!
//! ```
//! use wallet_header::avatar::{resolve_color, AVATAR_COLORS};
//!
//! let index = resolve_color("EQabc", AVATAR_COLORS.len(), None);
//! assert!(index < AVATAR_COLORS.len());
//!
//! // An explicit in-range preference always wins.
//! assert_eq!(resolve_color("EQabc", AVATAR_COLORS.len(), Some(2)), 2);
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

/// An sRGB colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Built-in avatar background palette.
pub const AVATAR_COLORS: &[Rgb] = &[
    Rgb::new(0x29, 0x4a, 0x7d),
    Rgb::new(0x5d, 0x3f, 0xd3),
    Rgb::new(0x1f, 0x8f, 0x7a),
    Rgb::new(0xc2, 0x4e, 0x2a),
    Rgb::new(0x8e, 0x24, 0xaa),
    Rgb::new(0x2e, 0x7d, 0x32),
    Rgb::new(0xd8, 0x1b, 0x60),
    Rgb::new(0x00, 0x83, 0x8f),
    Rgb::new(0xf5, 0x7c, 0x00),
    Rgb::new(0x45, 0x5a, 0x64),
    Rgb::new(0x39, 0x49, 0xab),
    Rgb::new(0x7c, 0xb3, 0x42),
    Rgb::new(0xad, 0x14, 0x57),
    Rgb::new(0x00, 0x89, 0x7b),
    Rgb::new(0x6d, 0x4c, 0x41),
    Rgb::new(0x1e, 0x88, 0xe5),
];

/// Hashes an account identifier into a palette index.
///
/// Returns `0` for an empty palette.
#[must_use]
pub fn avatar_hash(account_id: &str, palette_size: usize) -> usize {
    if palette_size == 0 {
        return 0;
    }

    let digest = Sha256::digest(account_id.as_bytes());
    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (prefix as usize) % palette_size
}

/// Resolves the palette index for an account.
///
/// An explicit index within `[0, palette_size)` is returned unchanged.
/// Anything else, including negative or too-large values, is treated as
/// absent and the hash-derived index is used instead.
#[must_use]
pub fn resolve_color(account_id: &str, palette_size: usize, explicit: Option<i64>) -> usize {
    match explicit.and_then(|index| usize::try_from(index).ok()) {
        Some(index) if index < palette_size => index,
        _ => avatar_hash(account_id, palette_size),
    }
}

/// Resolves the avatar colour against [`AVATAR_COLORS`].
#[must_use]
pub fn avatar_color(account_id: &str, explicit: Option<i64>) -> Rgb {
    AVATAR_COLORS[resolve_color(account_id, AVATAR_COLORS.len(), explicit)]
}
