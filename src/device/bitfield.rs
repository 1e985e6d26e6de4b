//! Register bit-field codec.
//!
//! Every stream switch register is a 32-bit word built from a handful of
//! fields. A field is described by its least significant bit and a mask that
//! is already shifted into place, matching the `_LSB` / `_MASK` pairs in the
//! AM025 register reference.
//!
//! ```
//! use aie_stream_switch::device::BitField;
//!
//! let arbiter = BitField::new(0, 0x7);
//! let msel = BitField::new(4, 0x30);
//! let word = arbiter.pack(5) | msel.pack(2);
//! assert_eq!(word, 0x25);
//! assert_eq!(msel.unpack(word), 2);
//! ```

use std::fmt;

/// A register field: `lsb` plus a pre-shifted `mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitField {
    /// Bit position of the field's least significant bit
    pub lsb: u32,
    /// Field mask, already shifted to `lsb`
    pub mask: u32,
}

impl BitField {
    /// Create a field descriptor.
    pub const fn new(lsb: u32, mask: u32) -> Self {
        Self { lsb, mask }
    }

    /// Create a single-bit field at `bit`.
    pub const fn bit(bit: u32) -> Self {
        Self { lsb: bit, mask: 1 << bit }
    }

    /// Shift `value` into the field and clip it to the mask.
    ///
    /// Bits of `value` that do not fit are silently discarded; callers
    /// range-check before packing.
    #[inline]
    pub const fn pack(&self, value: u32) -> u32 {
        value.wrapping_shl(self.lsb) & self.mask
    }

    /// Extract the field from a register word.
    #[inline]
    pub const fn unpack(&self, word: u32) -> u32 {
        (word & self.mask) >> self.lsb
    }

    /// Width of the field in bits.
    pub const fn width(&self) -> u32 {
        self.mask.count_ones()
    }

    /// Largest value that fits in the field.
    pub const fn max_value(&self) -> u32 {
        self.mask >> self.lsb
    }

    /// Check whether two fields share any bits.
    pub const fn overlaps(&self, other: &BitField) -> bool {
        self.mask & other.mask != 0
    }
}

impl fmt::Display for BitField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msb = self.lsb + self.width().max(1) - 1;
        write!(f, "[{}:{}]", msb, self.lsb)
    }
}

/// Pack `value` into `field`. Equivalent to [`BitField::pack`].
#[inline]
pub const fn pack_field(value: u32, field: BitField) -> u32 {
    field.pack(value)
}

/// Unpack `field` from `word`. Equivalent to [`BitField::unpack`].
#[inline]
pub const fn unpack_field(word: u32, field: BitField) -> u32 {
    field.unpack(word)
}
