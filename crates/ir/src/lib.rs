#![warn(clippy::missing_errors_doc)]

//! Instruction representations shared by the validator, compiler and
//! interpreter.
//!
//! [`Instruction`] is the tree-shaped form a function body is parsed into;
//! the validator walks it directly. [`Op`] is the flat opcode used once a
//! function has been compiled into the shared cell array — every `Op` cell
//! is followed by zero or more `u64` immediates, per the encoding table in
//! [`Op::immediate_count`].

mod block_type;
mod instr;
mod op;

pub use self::{
    block_type::BlockType,
    instr::{Instruction, MemArg},
    op::Op,
};

/// Index of a single 64-bit cell inside a [`CompiledModule`](op::Op)'s flat
/// code array. Used for function entry points and (already-resolved)
/// branch targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellIndex(pub u32);

impl CellIndex {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CellIndex {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
