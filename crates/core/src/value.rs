use core::fmt;

/// The type of a runtime value as tracked by the validator's type stack.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValType {
    I32,
    I64,
    F32,
    F64,
    FuncRef,
    ExternRef,
}

impl ValType {
    /// Returns `true` if `self` is one of the reference types.
    pub fn is_ref(self) -> bool {
        matches!(self, Self::FuncRef | Self::ExternRef)
    }

    /// A single byte discriminant used when hashing function signatures.
    ///
    /// Stable for the lifetime of a process; never persisted across builds.
    pub fn signature_byte(self) -> u8 {
        match self {
            Self::I32 => 0,
            Self::I64 => 1,
            Self::F32 => 2,
            Self::F64 => 3,
            Self::FuncRef => 4,
            Self::ExternRef => 5,
        }
    }

    pub fn ref_type(self) -> Option<RefType> {
        match self {
            Self::FuncRef => Some(RefType::Func),
            Self::ExternRef => Some(RefType::Extern),
            _ => None,
        }
    }
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::FuncRef => "funcref",
            Self::ExternRef => "externref",
        };
        f.write_str(s)
    }
}

/// The two reference types of the non-GC core: an opaque handle to a
/// function table entry, or an opaque handle owned by the host.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RefType {
    Func,
    Extern,
}

impl From<RefType> for ValType {
    fn from(rt: RefType) -> Self {
        match rt {
            RefType::Func => ValType::FuncRef,
            RefType::Extern => ValType::ExternRef,
        }
    }
}
