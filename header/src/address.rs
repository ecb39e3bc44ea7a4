//! Account address parsing and formatting.
//!
//! Two textual forms are accepted:
//!
//! - **User-friendly**: 48 characters of base64 (standard or URL-safe) over
//!   36 bytes: `tag (1) | workchain (1) | hash (32) | crc16 (2)`. The tag
//!   encodes bounceability (`0x11` bounceable, `0x51` non-bounceable) and the
//!   test-only flag (`0x80`). The checksum is CRC-16/XMODEM over the first 34
//!   bytes, big-endian.
//! - **Raw**: `<workchain>:<64 hex digits>`. Carries no flags.
//!
//! # Example
//!
//! ```
//! use wallet_header::address::FriendlyAddress;
//!
//! let parsed: FriendlyAddress = "EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t"
//!     .parse()
//!     .unwrap();
//! assert!(parsed.bounceable);
//! assert!(!parsed.test_only);
//! assert_eq!(parsed.address.workchain, 0);
//! ```

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::Engine;
use crc::{Crc, CRC_16_XMODEM};
use serde::{Serialize, Serializer};
use thiserror::Error;

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);

/// Length of a user-friendly address string.
pub const FRIENDLY_LEN: usize = 48;

const FRIENDLY_BYTES: usize = 36;
const TAG_BOUNCEABLE: u8 = 0x11;
const TAG_NON_BOUNCEABLE: u8 = 0x51;
const FLAG_TEST_ONLY: u8 = 0x80;

/// Errors raised while parsing an address.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The string has the wrong length for either form.
    #[error("unexpected length {0}")]
    InvalidLength(usize),

    /// The friendly form is not valid base64.
    #[error("not valid base64")]
    InvalidBase64,

    /// The friendly form carries an unknown tag byte.
    #[error("unknown tag byte 0x{0:02x}")]
    InvalidTag(u8),

    /// The friendly form failed its CRC16 check.
    #[error("checksum mismatch")]
    ChecksumMismatch,

    /// The raw form has a bad workchain or hash.
    #[error("malformed raw address")]
    InvalidRaw,
}

/// A workchain-qualified account address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub workchain: i8,
    pub hash: [u8; 32],
}

impl Address {
    /// Parses the raw `workchain:hex` form.
    pub fn parse_raw(src: &str) -> Result<Self, AddressError> {
        let (workchain, digits) = src.split_once(':').ok_or(AddressError::InvalidRaw)?;
        let workchain = workchain
            .parse::<i8>()
            .map_err(|_| AddressError::InvalidRaw)?;
        let mut hash = [0u8; 32];
        hex::decode_to_slice(digits, &mut hash).map_err(|_| AddressError::InvalidRaw)?;

        Ok(Self { workchain, hash })
    }

    /// Renders the raw `workchain:hex` form.
    #[must_use]
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.hash))
    }

    /// Renders the user-friendly form.
    #[must_use]
    pub fn to_friendly(&self, test_only: bool, bounceable: bool, url_safe: bool) -> String {
        let mut bytes = [0u8; FRIENDLY_BYTES];
        let mut tag = if bounceable {
            TAG_BOUNCEABLE
        } else {
            TAG_NON_BOUNCEABLE
        };
        if test_only {
            tag |= FLAG_TEST_ONLY;
        }
        bytes[0] = tag;
        bytes[1] = self.workchain as u8;
        bytes[2..34].copy_from_slice(&self.hash);
        let crc = CRC16.checksum(&bytes[..34]);
        bytes[34..].copy_from_slice(&crc.to_be_bytes());

        if url_safe {
            URL_SAFE.encode(bytes)
        } else {
            STANDARD.encode(bytes)
        }
    }
}

/// An address together with the flags of its friendly rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FriendlyAddress {
    pub address: Address,
    pub test_only: bool,
    pub bounceable: bool,
}

impl FriendlyAddress {
    /// Parses a 48-character user-friendly address.
    pub fn parse(src: &str) -> Result<Self, AddressError> {
        if src.len() != FRIENDLY_LEN {
            return Err(AddressError::InvalidLength(src.len()));
        }

        let engine = if src.contains(['-', '_']) {
            &URL_SAFE
        } else {
            &STANDARD
        };
        let bytes = engine
            .decode(src)
            .map_err(|_| AddressError::InvalidBase64)?;
        if bytes.len() != FRIENDLY_BYTES {
            return Err(AddressError::InvalidLength(src.len()));
        }

        let expected = u16::from_be_bytes([bytes[34], bytes[35]]);
        if CRC16.checksum(&bytes[..34]) != expected {
            return Err(AddressError::ChecksumMismatch);
        }

        let tag = bytes[0];
        let test_only = tag & FLAG_TEST_ONLY != 0;
        let bounceable = match tag & !FLAG_TEST_ONLY {
            TAG_BOUNCEABLE => true,
            TAG_NON_BOUNCEABLE => false,
            _ => return Err(AddressError::InvalidTag(tag)),
        };

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&bytes[2..34]);

        Ok(Self {
            address: Address {
                workchain: bytes[1] as i8,
                hash,
            },
            test_only,
            bounceable,
        })
    }

    /// Parses either form. Raw addresses adopt the given test flag and are
    /// treated as bounceable.
    pub fn parse_any(src: &str, test_only: bool) -> Result<Self, AddressError> {
        if src.contains(':') {
            let address = Address::parse_raw(src)?;
            return Ok(Self {
                address,
                test_only,
                bounceable: true,
            });
        }
        Self::parse(src)
    }
}

impl FromStr for FriendlyAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FriendlyAddress {
    /// Renders the URL-safe friendly form with the stored flags.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address.to_friendly(self.test_only, self.bounceable, true))
    }
}

impl Serialize for FriendlyAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNCEABLE: &str = "EQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6_0t";
    const BOUNCEABLE_STD: &str = "EQD4FPq+PRDieyQKkizFTRtSDyucUIqrj0v/zXJmqaDp6/0t";
    const NON_BOUNCEABLE: &str = "UQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp66Do";
    const TEST_BOUNCEABLE: &str = "kQD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp60an";
    const TEST_NON_BOUNCEABLE: &str = "0QD4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6xti";
    const MASTERCHAIN: &str = "Ef_4FPq-PRDieyQKkizFTRtSDyucUIqrj0v_zXJmqaDp6wJl";
    const RAW: &str = "0:f814fabe3d10e27b240a922cc54d1b520f2b9c508aab8f4bffcd7266a9a0e9eb";

    #[test]
    fn parses_friendly_flags() {
        let cases = [
            (BOUNCEABLE, false, true),
            (NON_BOUNCEABLE, false, false),
            (TEST_BOUNCEABLE, true, true),
            (TEST_NON_BOUNCEABLE, true, false),
        ];
        for (src, test_only, bounceable) in cases {
            let parsed = FriendlyAddress::parse(src).unwrap();
            assert_eq!(parsed.test_only, test_only, "{src}");
            assert_eq!(parsed.bounceable, bounceable, "{src}");
            assert_eq!(parsed.address.to_raw(), RAW);
        }
    }

    #[test]
    fn standard_and_url_safe_decode_to_same_address() {
        let url = FriendlyAddress::parse(BOUNCEABLE).unwrap();
        let std = FriendlyAddress::parse(BOUNCEABLE_STD).unwrap();
        assert_eq!(url, std);
    }

    #[test]
    fn renders_back_to_friendly_forms() {
        let parsed = FriendlyAddress::parse(BOUNCEABLE).unwrap();
        assert_eq!(parsed.to_string(), BOUNCEABLE);
        assert_eq!(parsed.address.to_friendly(false, true, false), BOUNCEABLE_STD);
        assert_eq!(parsed.address.to_friendly(true, true, true), TEST_BOUNCEABLE);
        assert_eq!(parsed.address.to_friendly(false, false, true), NON_BOUNCEABLE);
    }

    #[test]
    fn parses_negative_workchain() {
        let parsed = FriendlyAddress::parse(MASTERCHAIN).unwrap();
        assert_eq!(parsed.address.workchain, -1);
        assert!(parsed.address.to_raw().starts_with("-1:f814"));
    }

    #[test]
    fn rejects_truncated_address() {
        let truncated = &BOUNCEABLE[..40];
        assert_eq!(
            FriendlyAddress::parse(truncated),
            Err(AddressError::InvalidLength(40))
        );
    }

    #[test]
    fn rejects_checksum_mismatch() {
        let mut corrupted = BOUNCEABLE.to_string();
        corrupted.replace_range(10..11, "A");
        assert_eq!(
            FriendlyAddress::parse(&corrupted),
            Err(AddressError::ChecksumMismatch)
        );
    }

    #[test]
    fn rejects_invalid_base64() {
        let garbage = "!".repeat(FRIENDLY_LEN);
        assert_eq!(
            FriendlyAddress::parse(&garbage),
            Err(AddressError::InvalidBase64)
        );
    }

    #[test]
    fn parses_raw_form() {
        let address = Address::parse_raw(RAW).unwrap();
        assert_eq!(address.workchain, 0);
        assert_eq!(address.hash[0], 0xf8);
        assert_eq!(address.to_raw(), RAW);
    }

    #[test]
    fn raw_form_accepts_uppercase_hex_and_renders_lowercase() {
        let address = Address::parse_raw(&RAW.to_ascii_uppercase()).unwrap();
        assert_eq!(address.to_raw(), RAW);
    }

    #[test]
    fn rejects_malformed_raw_form() {
        assert_eq!(Address::parse_raw("0:abc"), Err(AddressError::InvalidRaw));
        assert_eq!(
            Address::parse_raw(&RAW.replace("0:", "x:")),
            Err(AddressError::InvalidRaw)
        );
        assert_eq!(
            Address::parse_raw(&RAW.replace('f', "g")),
            Err(AddressError::InvalidRaw)
        );
        assert_eq!(Address::parse_raw("no-colon"), Err(AddressError::InvalidRaw));
        assert_eq!(
            Address::parse_raw(&format!("{RAW}00")),
            Err(AddressError::InvalidRaw)
        );
    }

    #[test]
    fn parse_any_adopts_flag_for_raw_form() {
        let parsed = FriendlyAddress::parse_any(RAW, true).unwrap();
        assert!(parsed.test_only);
        assert_eq!(parsed.to_string(), TEST_BOUNCEABLE);

        let parsed = FriendlyAddress::parse_any(TEST_BOUNCEABLE, false).unwrap();
        assert!(parsed.test_only, "friendly flags are not overridden");
    }

    #[test]
    fn serializes_as_friendly_string() {
        let parsed = FriendlyAddress::parse(BOUNCEABLE).unwrap();
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            format!("\"{BOUNCEABLE}\"")
        );
    }
}
