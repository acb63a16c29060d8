//! Arbitrary-alphabet base-N encoding.
//!
//! The input bytes are treated as one big-endian unsigned integer, so leading
//! zero bytes carry no magnitude and are dropped by [`Encoding::encode`]. Use
//! [`crate::primitives::base58check`] when leading zeros must survive.

use crate::{HdkError, Result};
use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::RngCore;

/// The Bitcoin Base58 alphabet (no `0`, `O`, `I` or `l`).
pub const BITCOIN_BASE58_ALPHABET: &[u8] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Base58 with the Bitcoin alphabet.
pub static BASE58: Encoding = Encoding::new(BITCOIN_BASE58_ALPHABET);

const NO_SYMBOL: u8 = 0xFF;

/// A base-N representation defined by an ordered alphabet of unique ASCII symbols.
#[derive(Debug, Clone)]
pub struct Encoding {
    alphabet: &'static [u8],
    index: [u8; 256],
}

impl Encoding {
    /// Creates a new encoding from the given alphabet.
    ///
    /// Panics if the alphabet has fewer than 2 or more than 255 symbols, contains
    /// non-ASCII bytes, or repeats a symbol.
    pub const fn new(alphabet: &'static [u8]) -> Self {
        assert!(
            alphabet.len() >= 2 && alphabet.len() < NO_SYMBOL as usize,
            "alphabet must have between 2 and 254 symbols"
        );
        let mut index = [NO_SYMBOL; 256];
        let mut i = 0;
        while i < alphabet.len() {
            let symbol = alphabet[i];
            assert!(symbol.is_ascii(), "multi-byte characters not supported");
            assert!(
                index[symbol as usize] == NO_SYMBOL,
                "alphabet contains non-unique characters"
            );
            index[symbol as usize] = i as u8;
            i += 1;
        }
        Encoding { alphabet, index }
    }

    /// The number base of the encoding.
    pub fn base(&self) -> usize {
        self.alphabet.len()
    }

    pub fn alphabet(&self) -> &'static [u8] {
        self.alphabet
    }

    /// The symbol that stands for digit zero.
    pub fn zero_symbol(&self) -> char {
        char::from(self.alphabet[0])
    }

    fn digit_of(&self, character: char) -> Option<u32> {
        if !character.is_ascii() {
            return None;
        }
        match self.index[character as usize] {
            NO_SYMBOL => None,
            digit => Some(digit as u32),
        }
    }

    /// Returns the base-encoded string representation of `bytes`.
    pub fn encode(&self, bytes: &[u8]) -> String {
        let base = self.base() as u32;
        let mut num = BigUint::from_bytes_be(bytes);
        let mut encoded = Vec::new();

        while !num.is_zero() {
            let remainder = &num % base;
            let digit = remainder.to_u32_digits().first().copied().unwrap_or(0);
            encoded.push(self.alphabet[digit as usize]);
            num /= base;
        }

        encoded.iter().rev().map(|&symbol| char::from(symbol)).collect()
    }

    /// Returns the bytes for the given base-encoded string.
    ///
    /// A string that evaluates to zero (empty, or only zero symbols) decodes to
    /// an empty vector.
    pub fn decode(&self, text: &str) -> Result<Vec<u8>> {
        let base = self.base() as u32;
        let mut num = BigUint::zero();

        for (position, character) in text.char_indices() {
            let digit = self
                .digit_of(character)
                .ok_or(HdkError::InvalidCharacter { character, position })?;
            num = num * base + digit;
        }

        if num.is_zero() {
            Ok(Vec::new())
        } else {
            Ok(num.to_bytes_be())
        }
    }

    /// Decodes to exactly `n` bytes, left-padding with zeros.
    pub fn decode_n(&self, text: &str, n: usize) -> Result<Vec<u8>> {
        let value = self.decode(text)?;
        if value.len() > n {
            return Err(HdkError::ValueTooLarge(n));
        }
        let mut padded = vec![0u8; n - value.len()];
        padded.extend_from_slice(&value);
        Ok(padded)
    }

    /// Returns the base-encoded representation of `n` bytes read from the OS CSPRNG.
    pub fn random(&self, n: usize) -> Result<String> {
        let mut buf = vec![0u8; n];
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| HdkError::Random(e.to_string()))?;
        Ok(self.encode(&buf))
    }
}
