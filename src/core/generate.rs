//! Random secret generation for `ensure`.
//!
//! Characters are drawn from the operating system CSPRNG. Each index into
//! the alphabet is picked by rejection sampling, so every character is
//! equally likely whatever the alphabet size.

use rand::rngs::OsRng;
use rand::{TryCryptoRng, TryRngCore};
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::{DEFAULT_SECRET_SIZE, DEFAULT_SYMBOLS, MAX_SECRET_SIZE};
use crate::error::GenerateError;

/// Symbol handling in class mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Symbols {
    /// The built-in symbol set
    #[default]
    Default,
    /// A caller-supplied symbol set
    Custom(String),
    /// No symbols at all
    Disabled,
}

/// Alphabet a secret is drawn from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Charset {
    /// Exactly these characters
    Custom(String),
    /// Union of the enabled character classes
    Classes {
        upper: bool,
        lower: bool,
        digits: bool,
        symbols: Symbols,
    },
}

impl Default for Charset {
    fn default() -> Self {
        Charset::Classes {
            upper: true,
            lower: true,
            digits: true,
            symbols: Symbols::Default,
        }
    }
}

impl Charset {
    /// Distinct characters of the alphabet, in first-seen order.
    pub fn alphabet(&self) -> Vec<char> {
        let mut chars: Vec<char> = Vec::new();
        let mut push = |s: &str| {
            for c in s.chars() {
                if !chars.contains(&c) {
                    chars.push(c);
                }
            }
        };

        match self {
            Charset::Custom(set) => push(set),
            Charset::Classes {
                upper,
                lower,
                digits,
                symbols,
            } => {
                if *upper {
                    push("ABCDEFGHIJKLMNOPQRSTUVWXYZ");
                }
                if *lower {
                    push("abcdefghijklmnopqrstuvwxyz");
                }
                if *digits {
                    push("0123456789");
                }
                match symbols {
                    Symbols::Default => push(DEFAULT_SYMBOLS),
                    Symbols::Custom(set) => push(set),
                    Symbols::Disabled => {}
                }
            }
        }
        chars
    }
}

/// Effective output length for a requested size; non-positive means default.
pub fn effective_size(size: i64) -> usize {
    if size <= 0 {
        DEFAULT_SECRET_SIZE
    } else {
        size as usize
    }
}

/// Generate a secret of `size` characters from the OS random source.
///
/// # Errors
///
/// Returns `GenerateError::TooLarge` above [`MAX_SECRET_SIZE`],
/// `GenerateError::EmptyCharset` if the alphabet is empty, or
/// `GenerateError::Rng` if the random source cannot be read.
pub fn generate(size: i64, charset: &Charset) -> Result<Zeroizing<String>, GenerateError> {
    generate_with(&mut OsRng, size, charset)
}

/// Generate a secret using a caller-provided cryptographic random source.
pub fn generate_with<R>(
    rng: &mut R,
    size: i64,
    charset: &Charset,
) -> Result<Zeroizing<String>, GenerateError>
where
    R: TryRngCore + TryCryptoRng,
{
    if size > MAX_SECRET_SIZE {
        return Err(GenerateError::TooLarge {
            size,
            max: MAX_SECRET_SIZE,
        });
    }

    let alphabet = charset.alphabet();
    if alphabet.is_empty() {
        return Err(GenerateError::EmptyCharset);
    }

    let size = effective_size(size);
    trace!(size, alphabet = alphabet.len(), "generating secret");

    let mut out = Zeroizing::new(String::with_capacity(size));
    for _ in 0..size {
        let idx = uniform_index(rng, alphabet.len())?;
        out.push(alphabet[idx]);
    }
    Ok(out)
}

/// Uniform index in `0..n` without modulo bias.
fn uniform_index<R: TryRngCore>(rng: &mut R, n: usize) -> Result<usize, GenerateError> {
    let n = u32::try_from(n).map_err(|_| GenerateError::Rng("alphabet too large".to_string()))?;
    // Largest multiple of n that fits; draws at or above it are rejected.
    let zone = u32::MAX - (u32::MAX % n);
    loop {
        let x = rng
            .try_next_u32()
            .map_err(|e| GenerateError::Rng(e.to_string()))?;
        if x < zone {
            return Ok((x % n) as usize);
        }
    }
}
