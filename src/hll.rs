//! The public `Hll` type: construction, mutation, estimation, and the wire format

use crate::error::{HllError, Result};
use crate::estimator;
use crate::hash::hash_and_split;
use crate::registers::{dense::DenseRegisters, sparse::SparseRegisters, RegisterSet, DENSE_BYTES};

const MAGIC: &[u8; 4] = b"HYLL";
const ENCODING_DENSE: u8 = 0;
const ENCODING_SPARSE: u8 = 1;
const HEADER_LEN: usize = 16;
const CACHE_INVALID_BIT: u64 = 1 << 63;

/// A wire-compatible HyperLogLog cardinality estimator
///
/// Holds 16384 registers behind either a dense or sparse physical
/// representation (see [`crate::registers`]) plus a cached estimate with a
/// validity flag. Equality compares logical register contents, not the
/// physical representation or the cache.
#[derive(Debug, Clone)]
pub struct Hll {
    registers: RegisterSet,
    cache: u64,
    valid: bool,
}

impl Hll {
    /// An empty HLL: sparse, a single XZERO(16384) opcode, cache 0 and valid
    pub fn empty() -> Self {
        Self {
            registers: RegisterSet::empty(),
            cache: 0,
            valid: true,
        }
    }

    /// Alias for [`Hll::empty`]
    pub fn new() -> Self {
        Self::empty()
    }

    /// Builds an HLL from an iterator of elements, as if constructed empty
    /// and then [`Hll::add`]-ed with the same elements
    ///
    /// Elements are hashed as raw bytes; this accepts `&str`, `String`, and
    /// `&[u8]` alike (an intentional extension over the string-only
    /// reference — see `DESIGN.md`).
    pub fn from_elements<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut hll = Self::empty();
        hll.add(elements);
        hll
    }

    /// Parses a serialized HLL, validating the header and payload eagerly
    ///
    /// Unlike the reference implementation, which can defer validation
    /// until the HLL is first used, every error this function can produce
    /// is surfaced here; no later call on a successfully parsed `Hll` can
    /// fail (see `SPEC_FULL.md` section 7 / `DESIGN.md`).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(HllError::Truncated {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }
        if &bytes[0..4] != MAGIC {
            return Err(HllError::InvalidSignature);
        }

        let encoding = bytes[4];
        let cache_raw = u64::from_le_bytes(bytes[8..16].try_into().unwrap());
        let valid = cache_raw & CACHE_INVALID_BIT == 0;
        let cache = cache_raw & !CACHE_INVALID_BIT;

        let payload = &bytes[HEADER_LEN..];
        let registers = match encoding {
            ENCODING_DENSE => {
                if payload.len() != DENSE_BYTES {
                    return Err(HllError::Truncated {
                        expected: HEADER_LEN + DENSE_BYTES,
                        actual: bytes.len(),
                    });
                }
                RegisterSet::Dense(DenseRegisters::from_bytes(payload))
            }
            ENCODING_SPARSE => RegisterSet::Sparse(SparseRegisters::from_bytes(payload)?),
            other => return Err(HllError::UnknownEncoding(other)),
        };

        Ok(Self {
            registers,
            cache,
            valid,
        })
    }

    /// Adds one or more elements, raising any register whose hashed count
    /// exceeds its current value
    ///
    /// Invalidates the cache if any register actually changed. Once the
    /// representation promotes to dense mid-call, later elements in the same
    /// call go through the dense path.
    pub fn add<I, S>(&mut self, elements: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut changed = false;
        for element in elements {
            let (index, value) = hash_and_split(element.as_ref());
            if self.registers.update_if_greater(index, value) {
                changed = true;
            }
        }
        if changed {
            self.valid = false;
        }
    }

    /// Merges `other` into `self`: register `i` becomes `max(self.R[i],
    /// other.R[i])` for every `i`
    ///
    /// Always invalidates the cache, even if every register was already
    /// `>=` its counterpart in `other`.
    pub fn merge(&mut self, other: &Hll) {
        for (i, value) in other.registers.iter_registers().enumerate() {
            if value > 0 {
                self.registers.update_if_greater(i, value);
            }
        }
        self.valid = false;
    }

    /// Returns the estimated cardinality, recomputing and caching it if the
    /// cache is stale
    pub fn count(&mut self) -> u64 {
        if !self.valid {
            self.cache = estimator::estimate(self.registers.iter_registers());
            self.valid = true;
        }
        self.cache
    }

    /// Serializes this HLL to the `HYLL` wire format: header, then payload
    ///
    /// Uses the cache and validity bit as currently stored; call
    /// [`Hll::count`] first if the serialized cache should reflect a fresh
    /// estimate.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.registers.payload_len());
        bytes.extend_from_slice(MAGIC);
        bytes.push(if self.registers.is_dense() {
            ENCODING_DENSE
        } else {
            ENCODING_SPARSE
        });
        bytes.extend_from_slice(&[0u8; 3]);

        let cache_field = if self.valid {
            self.cache
        } else {
            self.cache | CACHE_INVALID_BIT
        };
        bytes.extend_from_slice(&cache_field.to_le_bytes());

        match &self.registers {
            RegisterSet::Dense(d) => bytes.extend_from_slice(d.as_bytes()),
            RegisterSet::Sparse(s) => bytes.extend_from_slice(s.as_bytes()),
        }
        bytes
    }
}

impl Default for Hll {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for Hll {
    /// Compares logical register contents only, ignoring physical
    /// representation and the cache
    fn eq(&self, other: &Self) -> bool {
        self.registers
            .iter_registers()
            .eq(other.registers.iter_registers())
    }
}

impl Eq for Hll {}
