//! `errno` wire values for the WASI preview 1 ABI.
//!
//! The ABI represents an `errno` as a single byte on the wire, but every
//! preview-1 syscall actually returns it widened to `i32` on the Wasm
//! operand stack; [`Errno::as_u32`] gives the value to pack into that
//! return slot.

/// Subset of WASI preview 1 errno codes this host can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Errno {
    Success = 0,
    Acces = 2,
    Badf = 8,
    Exist = 20,
    Inval = 28,
    Io = 29,
    Isdir = 31,
    Nametoolong = 37,
    Nfile = 41,
    Noent = 44,
    Nospc = 51,
    Notdir = 54,
    Notempty = 55,
    Perm = 63,
    Rofs = 69,
    Spipe = 70,
}

impl Errno {
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl From<std::io::Error> for Errno {
    fn from(e: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match e.kind() {
            ErrorKind::NotFound => Errno::Noent,
            ErrorKind::PermissionDenied => Errno::Acces,
            ErrorKind::AlreadyExists => Errno::Exist,
            ErrorKind::InvalidInput | ErrorKind::InvalidData => Errno::Inval,
            ErrorKind::UnexpectedEof | ErrorKind::WriteZero => Errno::Io,
            _ => Errno::Io,
        }
    }
}
