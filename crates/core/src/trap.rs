use core::fmt;

/// The closed set of runtime trap kinds a compiled instruction can raise.
///
/// Numeric values match the `trap_code` wire values returned by `execute`
/// at the host boundary (`0` there means "no trap" and has no variant here).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TrapCode {
    Unreachable = 1,
    DivisionByZero = 2,
    IntegerOverflow = 3,
    InvalidConversionToInt = 4,
    MemoryOutOfBounds = 5,
    TableOutOfBounds = 6,
    IndirectCallTypeMismatch = 7,
    NullReference = 8,
    StackOverflow = 9,
    UninitializedElement = 10,
}

impl TrapCode {
    /// The wire code returned to the host by `execute`.
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for TrapCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unreachable => "unreachable instruction executed",
            Self::DivisionByZero => "integer division by zero",
            Self::IntegerOverflow => "integer overflow",
            Self::InvalidConversionToInt => "invalid conversion to integer",
            Self::MemoryOutOfBounds => "out of bounds memory access",
            Self::TableOutOfBounds => "out of bounds table access",
            Self::IndirectCallTypeMismatch => "indirect call type mismatch",
            Self::NullReference => "called a null reference",
            Self::StackOverflow => "call stack exhausted",
            Self::UninitializedElement => "uninitialized element",
        };
        f.write_str(s)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TrapCode {}
