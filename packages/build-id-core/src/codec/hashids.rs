//! Legacy backend: salted hashids.
//!
//! Bit-compatible with the reference hashids algorithm using the default
//! alphabet, default separators and no minimum length.

use crate::codec::{Backend, IntArrayCodec};
use crate::error::{CodecError, Result};

const DEFAULT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";
const DEFAULT_SEPARATORS: &[u8] = b"cfhistuCFHISTU";
const SEPARATOR_DIV: f64 = 3.5;
const GUARD_DIV: usize = 12;

/// Salted hashids codec.
#[derive(Debug, Clone)]
pub struct HashidsCodec {
    salt: Vec<u8>,
    alphabet: Vec<u8>,
    separators: Vec<u8>,
    guards: Vec<u8>,
}

impl HashidsCodec {
    /// Creates a codec for `salt` over the default alphabet.
    pub fn new(salt: &str) -> Self {
        let salt = salt.as_bytes().to_vec();

        let mut separators: Vec<u8> = DEFAULT_SEPARATORS.to_vec();
        let mut alphabet: Vec<u8> = DEFAULT_ALPHABET
            .iter()
            .copied()
            .filter(|c| !separators.contains(c))
            .collect();
        consistent_shuffle(&mut separators, &salt);

        if separators.is_empty() || alphabet.len() as f64 / separators.len() as f64 > SEPARATOR_DIV
        {
            let mut wanted = (alphabet.len() as f64 / SEPARATOR_DIV).ceil() as usize;
            if wanted == 1 {
                wanted += 1;
            }
            if wanted > separators.len() {
                let diff = wanted - separators.len();
                separators.extend(alphabet.drain(..diff));
            } else {
                separators.truncate(wanted);
            }
        }

        consistent_shuffle(&mut alphabet, &salt);

        let guard_count = alphabet.len().div_ceil(GUARD_DIV);
        let guards = if alphabet.len() < 3 {
            separators.drain(..guard_count).collect()
        } else {
            alphabet.drain(..guard_count).collect()
        };

        Self {
            salt,
            alphabet,
            separators,
            guards,
        }
    }

    fn knows(&self, c: u8) -> bool {
        self.alphabet.contains(&c) || self.separators.contains(&c) || self.guards.contains(&c)
    }

    /// Shuffles `alphabet` for the next value, keyed by lottery and salt.
    fn reshuffle(&self, alphabet: &mut [u8], lottery: u8, buffer: &mut Vec<u8>) {
        buffer.clear();
        buffer.push(lottery);
        buffer.extend_from_slice(&self.salt);
        buffer.extend_from_slice(alphabet);
        buffer.truncate(alphabet.len());
        consistent_shuffle(alphabet, buffer);
    }

    fn encode_values(&self, values: &[u64]) -> String {
        if values.is_empty() {
            return String::new();
        }

        let mut alphabet = self.alphabet.clone();
        let values_id: u64 = values
            .iter()
            .enumerate()
            .map(|(i, value)| value % (i as u64 + 100))
            .sum();
        let lottery = alphabet[(values_id % alphabet.len() as u64) as usize];

        let mut out = vec![lottery];
        let mut buffer = Vec::with_capacity(1 + self.salt.len() + alphabet.len());
        for (i, &value) in values.iter().enumerate() {
            self.reshuffle(&mut alphabet, lottery, &mut buffer);
            let last = to_alphabet(value, &alphabet);
            out.extend_from_slice(&last);

            if i + 1 < values.len() {
                let reduced = value % (u64::from(last[0]) + i as u64);
                let separator = self.separators[(reduced % self.separators.len() as u64) as usize];
                out.push(separator);
            }
        }

        out.into_iter().map(char::from).collect()
    }
}

impl IntArrayCodec for HashidsCodec {
    fn backend(&self) -> Backend {
        Backend::Legacy
    }

    fn encode(&self, values: &[u64]) -> Result<String> {
        Ok(self.encode_values(values))
    }

    fn decode(&self, id: &str) -> Result<Vec<u64>> {
        if id.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(c) = id.chars().find(|c| !c.is_ascii() || !self.knows(*c as u8)) {
            return Err(CodecError::decode(
                Backend::Legacy,
                format!("character {:?} not in alphabet", c),
            ));
        }

        let breakdown: Vec<&[u8]> = id
            .as_bytes()
            .split(|c| self.guards.contains(c))
            .collect();
        let body = match breakdown.len() {
            2 | 3 => breakdown[1],
            _ => breakdown[0],
        };
        let (&lottery, rest) = body
            .split_first()
            .ok_or_else(|| CodecError::decode(Backend::Legacy, "missing lottery character"))?;

        let mut alphabet = self.alphabet.clone();
        let mut buffer = Vec::with_capacity(1 + self.salt.len() + alphabet.len());
        let mut values = Vec::new();
        for chunk in rest.split(|c| self.separators.contains(c)) {
            self.reshuffle(&mut alphabet, lottery, &mut buffer);
            let value = from_alphabet(chunk, &alphabet).ok_or_else(|| {
                CodecError::decode(Backend::Legacy, "value overflows or uses a guard character")
            })?;
            values.push(value);
        }

        if self.encode_values(&values) != id {
            return Err(CodecError::decode(
                Backend::Legacy,
                "not a canonical encoding",
            ));
        }
        Ok(values)
    }
}

/// Salt-keyed deterministic shuffle.
fn consistent_shuffle(alphabet: &mut [u8], salt: &[u8]) {
    if salt.is_empty() {
        return;
    }

    let mut v = 0usize;
    let mut p = 0usize;
    for i in (1..alphabet.len()).rev() {
        v %= salt.len();
        let integer = usize::from(salt[v]);
        p += integer;
        let j = (integer + v + p) % i;
        alphabet.swap(i, j);
        v += 1;
    }
}

fn to_alphabet(mut value: u64, alphabet: &[u8]) -> Vec<u8> {
    let base = alphabet.len() as u64;
    let mut out = Vec::new();
    loop {
        out.push(alphabet[(value % base) as usize]);
        value /= base;
        if value == 0 {
            break;
        }
    }
    out.reverse();
    out
}

fn from_alphabet(input: &[u8], alphabet: &[u8]) -> Option<u64> {
    let base = alphabet.len() as u64;
    input.iter().try_fold(0u64, |acc, c| {
        let digit = alphabet.iter().position(|a| a == c)? as u64;
        acc.checked_mul(base)?.checked_add(digit)
    })
}
