/// Sentinel bit pattern for a null `funcref`/`externref` stored in a [`Slot`].
///
/// Mirrors the `-1` convention used for empty table entries.
pub const NULL_REF: u64 = u64::MAX;

/// A single 64-bit cell of the operand stack.
///
/// Every Wasm value — `i32`, `i64`, `f32`, `f64`, `funcref`, `externref` —
/// occupies exactly one [`Slot`]. Integers and floats are stored by bit
/// pattern (sign/zero-extended to 64 bits); references are stored as an
/// index into the owning table's function array, with [`NULL_REF`] marking
/// `ref.null`. The validator guarantees that a handler only ever reads a
/// slot it itself (or a matching `*.const`/`local.get`) produced, so no
/// runtime type tag is carried.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[repr(transparent)]
pub struct Slot(u64);

impl Slot {
    pub const ZERO: Slot = Slot(0);
    pub const NULL: Slot = Slot(NULL_REF);

    #[inline]
    pub fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub fn to_bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn is_null_ref(self) -> bool {
        self.0 == NULL_REF
    }

    #[inline]
    pub fn as_ref_index(self) -> Option<u32> {
        if self.is_null_ref() {
            None
        } else {
            Some(self.0 as u32)
        }
    }

    #[inline]
    pub fn from_ref_index(index: Option<u32>) -> Self {
        match index {
            Some(i) => Self(u64::from(i)),
            None => Self::NULL,
        }
    }
}

macro_rules! impl_slot_conversions {
    ($( $ty:ty => $to:ident / $from:ident ),* $(,)?) => {
        $(
            impl Slot {
                #[inline]
                pub fn $to(self) -> $ty {
                    self.0 as $ty
                }

                #[inline]
                pub fn $from(value: $ty) -> Self {
                    Self(value as u64)
                }
            }
        )*
    };
}

impl_slot_conversions! {
    i32 => to_i32 / from_i32,
    i64 => to_i64 / from_i64,
    u32 => to_u32 / from_u32,
    u64 => to_u64 / from_u64,
}

impl Slot {
    #[inline]
    pub fn to_f32(self) -> f32 {
        f32::from_bits(self.0 as u32)
    }

    #[inline]
    pub fn from_f32(value: f32) -> Self {
        Self(u64::from(value.to_bits()))
    }

    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from_bits(self.0)
    }

    #[inline]
    pub fn from_f64(value: f64) -> Self {
        Self(value.to_bits())
    }

    #[inline]
    pub fn to_bool(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn from_bool(value: bool) -> Self {
        Self(u64::from(value))
    }
}

impl From<i32> for Slot {
    fn from(v: i32) -> Self {
        Self::from_i32(v)
    }
}

impl From<i64> for Slot {
    fn from(v: i64) -> Self {
        Self::from_i64(v)
    }
}

impl From<f32> for Slot {
    fn from(v: f32) -> Self {
        Self::from_f32(v)
    }
}

impl From<f64> for Slot {
    fn from(v: f64) -> Self {
        Self::from_f64(v)
    }
}
