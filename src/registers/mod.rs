//! The two physical register encodings (dense, sparse) behind one logical view
//!
//! Both [`dense::DenseRegisters`] and [`sparse::SparseRegisters`] present the
//! same logical vector of 16384 registers, each holding a value in
//! `[0, 50]`. [`RegisterSet`] is the tagged variant that dispatches between
//! them and owns the sparse→dense promotion transition.

pub mod dense;
pub mod sparse;

pub use dense::DenseRegisters;
pub use sparse::SparseRegisters;

/// Precision: fixed at 14 by the spec (no alternative precisions supported)
pub const P: u32 = 14;

/// Number of logical registers: `2^P`
pub const M: usize = 1 << P;

/// Size of the dense payload: `M` registers packed at 6 bits each
pub const DENSE_BYTES: usize = (M * 6).div_ceil(8);

/// Largest opcode-stream length before a sparse HLL is promoted to dense
pub const SPARSE_MAX_BYTES: usize = 3000;

/// Largest register value the sparse VAL opcode can represent
pub const SPARSE_VAL_MAX: u8 = 32;

/// Largest register value the dense representation can hold logically
pub const DENSE_VAL_MAX: u8 = 50;

/// Outcome of attempting to raise a single register's value in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The existing value was already `>=` the proposed value
    Unchanged,
    /// The register was raised to the proposed value
    Updated,
    /// The proposed value can't be represented by this encoding; nothing was
    /// written. The caller must promote to dense and retry the update there
    NeedsPromotion,
    /// The register was raised to the proposed value, but doing so grew the
    /// opcode stream past [`SPARSE_MAX_BYTES`]. The caller should promote to
    /// dense; the update itself is already complete and need not be retried
    UpdatedAndOverflowed,
}

/// Physical register storage: either packed dense bytes or an opcode stream
///
/// This is the "two representations sharing one interface" design from
/// `SPEC_FULL.md` section 9: callers operate on `RegisterSet` without caring
/// which variant is live, except at the moment of promotion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterSet {
    Dense(DenseRegisters),
    Sparse(SparseRegisters),
}

impl RegisterSet {
    /// A fresh, empty register set: sparse, a single run covering all of `M`
    pub fn empty() -> Self {
        RegisterSet::Sparse(SparseRegisters::empty())
    }

    /// Reads register `i`'s current value
    pub fn get(&self, i: usize) -> u8 {
        match self {
            RegisterSet::Dense(d) => d.get(i),
            RegisterSet::Sparse(s) => s.get(i),
        }
    }

    /// Raises register `i` to `value` if `value` is greater than the current
    /// one, promoting sparse→dense in place when the sparse encoding can't
    /// hold the new value or has grown past the size threshold
    ///
    /// Returns whether any register actually changed.
    pub fn update_if_greater(&mut self, i: usize, value: u8) -> bool {
        loop {
            let outcome = match self {
                RegisterSet::Dense(d) => {
                    return d.update_if_greater(i, value);
                }
                RegisterSet::Sparse(s) => s.update_if_greater(i, value),
            };

            match outcome {
                UpdateOutcome::Unchanged => return false,
                UpdateOutcome::Updated => return true,
                UpdateOutcome::UpdatedAndOverflowed => {
                    self.promote();
                    return true;
                }
                UpdateOutcome::NeedsPromotion => self.promote(),
            }
        }
    }

    /// Iterates every logical register's value in index order
    pub fn iter_registers(&self) -> Box<dyn Iterator<Item = u8> + '_> {
        match self {
            RegisterSet::Dense(d) => Box::new(d.iter()),
            RegisterSet::Sparse(s) => Box::new(s.iter()),
        }
    }

    /// `true` once this set is in dense physical form
    pub fn is_dense(&self) -> bool {
        matches!(self, RegisterSet::Dense(_))
    }

    /// Byte length of the current representation's payload
    pub fn payload_len(&self) -> usize {
        match self {
            RegisterSet::Dense(d) => d.as_bytes().len(),
            RegisterSet::Sparse(s) => s.as_bytes().len(),
        }
    }

    /// Converts sparse storage to dense in place; a no-op if already dense
    pub fn promote(&mut self) {
        if let RegisterSet::Sparse(sparse) = self {
            *self = RegisterSet::Dense(sparse.to_dense());
        }
    }
}
