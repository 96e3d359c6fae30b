/// The opcode occupying the first cell of every compiled instruction.
///
/// Each variant corresponds to exactly one interpreter handler. The cells
/// that follow an `Op` in the code array are its immediates, whose count
/// and meaning are fixed per-opcode (see the compiler's `emit_*` helpers
/// and the executor's handler table, which must agree).
///
/// Structured control (`block`/`loop`/`if`/`end`) has no direct `Op`: the
/// compiler lowers it to `Entry`, conditional branches and patched `Br`
/// targets before a function ever reaches the code array.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum Op {
    /// Function prologue. Immediates: `(num_locals, num_args)`.
    Entry,
    /// Function epilogue. Immediate: `num_results`.
    End,

    Unreachable,
    Nop,

    /// Immediate: absolute target cell index.
    Br,
    /// Pops `i32`; immediates: `(target_if_nonzero, target_if_zero)`.
    BrIf,
    /// Immediates: `(table_len, default_target, target_0, .., target_n-1)`.
    BrTable,
    Return,
    /// Immediates: `(func_idx, num_params, frame_offset)`. `frame_offset`
    /// is the callee's frame position relative to the caller's `fp`,
    /// computed by the compiler from the operand-stack height at the call
    /// site, so the callee's arguments already sit at its own slot `0` in
    /// the shared stack buffer without a copy.
    Call,
    /// Immediates: `(expected_sig_lo, expected_sig_hi, table_idx, num_params, frame_offset)`.
    CallIndirect,
    /// Immediates: `(func_idx, num_params)`.
    ReturnCall,
    /// Immediates: `(expected_sig_lo, expected_sig_hi, table_idx, num_params)`.
    ReturnCallIndirect,
    /// Immediates: `(import_idx, num_params)`.
    CallImport,

    /// Stack-shuffle cell emitted by a branch's resolution prelude.
    /// Immediates: `(dst_slot, src_slot)`.
    CopySlot,
    /// Stack-shuffle cell. Immediate: new `sp` offset from `fp`.
    SetSp,

    Drop,
    /// Pops `cond, val2, val1`; immediate unused (type is erased at runtime).
    Select,

    /// Immediate: slot index.
    LocalGet,
    LocalSet,
    LocalTee,
    /// Immediate: global index.
    GlobalGet,
    GlobalSet,

    /// Immediate: `1` for funcref, `0` for externref.
    RefNull,
    RefIsNull,
    /// Immediate: function index.
    RefFunc,

    /// Immediate: table index.
    TableGet,
    TableSet,
    TableSize,
    TableGrow,
    TableFill,
    /// Immediates: `(dst_table, src_table)`.
    TableCopy,
    /// Immediates: `(table_idx, elem_idx)`.
    TableInit,
    /// Immediate: element segment index.
    ElemDrop,

    /// Immediates: `(align, offset, mem_idx)`.
    I32Load,
    I64Load,
    F32Load,
    F64Load,
    I32Load8S,
    I32Load8U,
    I32Load16S,
    I32Load16U,
    I64Load8S,
    I64Load8U,
    I64Load16S,
    I64Load16U,
    I64Load32S,
    I64Load32U,
    I32Store,
    I64Store,
    F32Store,
    F64Store,
    I32Store8,
    I32Store16,
    I64Store8,
    I64Store16,
    I64Store32,
    MemorySize,
    MemoryGrow,
    MemoryFill,
    MemoryCopy,
    /// Immediate: data segment index.
    MemoryInit,
    DataDrop,

    /// Immediate: low 32 bits of the constant; sign/zero-extended as needed.
    I32Const,
    I64Const,
    F32Const,
    F64Const,

    I32Eqz,
    I32Eq,
    I32Ne,
    I32LtS,
    I32LtU,
    I32GtS,
    I32GtU,
    I32LeS,
    I32LeU,
    I32GeS,
    I32GeU,
    I64Eqz,
    I64Eq,
    I64Ne,
    I64LtS,
    I64LtU,
    I64GtS,
    I64GtU,
    I64LeS,
    I64LeU,
    I64GeS,
    I64GeU,
    F32Eq,
    F32Ne,
    F32Lt,
    F32Gt,
    F32Le,
    F32Ge,
    F64Eq,
    F64Ne,
    F64Lt,
    F64Gt,
    F64Le,
    F64Ge,

    I32Clz,
    I32Ctz,
    I32Popcnt,
    I32Add,
    I32Sub,
    I32Mul,
    I32DivS,
    I32DivU,
    I32RemS,
    I32RemU,
    I32And,
    I32Or,
    I32Xor,
    I32Shl,
    I32ShrS,
    I32ShrU,
    I32Rotl,
    I32Rotr,
    I64Clz,
    I64Ctz,
    I64Popcnt,
    I64Add,
    I64Sub,
    I64Mul,
    I64DivS,
    I64DivU,
    I64RemS,
    I64RemU,
    I64And,
    I64Or,
    I64Xor,
    I64Shl,
    I64ShrS,
    I64ShrU,
    I64Rotl,
    I64Rotr,

    F32Abs,
    F32Neg,
    F32Ceil,
    F32Floor,
    F32Trunc,
    F32Nearest,
    F32Sqrt,
    F32Add,
    F32Sub,
    F32Mul,
    F32Div,
    F32Min,
    F32Max,
    F32Copysign,
    F64Abs,
    F64Neg,
    F64Ceil,
    F64Floor,
    F64Trunc,
    F64Nearest,
    F64Sqrt,
    F64Add,
    F64Sub,
    F64Mul,
    F64Div,
    F64Min,
    F64Max,
    F64Copysign,

    I32WrapI64,
    I32TruncF32S,
    I32TruncF32U,
    I32TruncF64S,
    I32TruncF64U,
    I64ExtendI32S,
    I64ExtendI32U,
    I64TruncF32S,
    I64TruncF32U,
    I64TruncF64S,
    I64TruncF64U,
    F32ConvertI32S,
    F32ConvertI32U,
    F32ConvertI64S,
    F32ConvertI64U,
    F32DemoteF64,
    F64ConvertI32S,
    F64ConvertI32U,
    F64ConvertI64S,
    F64ConvertI64U,
    F64PromoteF32,
    I32ReinterpretF32,
    I64ReinterpretF64,
    F32ReinterpretI32,
    F64ReinterpretI64,

    I32Extend8S,
    I32Extend16S,
    I64Extend8S,
    I64Extend16S,
    I64Extend32S,

    I32TruncSatF32S,
    I32TruncSatF32U,
    I32TruncSatF64S,
    I32TruncSatF64U,
    I64TruncSatF32S,
    I64TruncSatF32U,
    I64TruncSatF64S,
    I64TruncSatF64U,
}

impl Op {
    /// Number of `u64` immediate cells that follow this opcode's cell.
    ///
    /// `BrTable`'s count is variable and not represented here; callers
    /// read its `table_len` immediate first and size the rest accordingly.
    pub fn fixed_immediate_count(self) -> Option<u32> {
        use Op::*;
        Some(match self {
            Entry => 2,
            End => 1,
            Br => 1,
            BrIf => 2,
            BrTable => u32::MAX, // variable-length; see BrTable handling
            ReturnCall | CallImport => 2,
            Call => 3,
            ReturnCallIndirect => 4,
            CallIndirect => 5,
            CopySlot => 2,
            SetSp => 1,
            LocalGet | LocalSet | LocalTee | GlobalGet | GlobalSet => 1,
            RefNull | RefFunc => 1,
            TableGet | TableSet | TableSize | TableGrow | TableFill | ElemDrop => 1,
            TableCopy | TableInit => 2,
            I32Load | I64Load | F32Load | F64Load | I32Load8S | I32Load8U | I32Load16S
            | I32Load16U | I64Load8S | I64Load8U | I64Load16S | I64Load16U | I64Load32S
            | I64Load32U | I32Store | I64Store | F32Store | F64Store | I32Store8
            | I32Store16 | I64Store8 | I64Store16 | I64Store32 => 3,
            MemoryInit | DataDrop => 1,
            I32Const | F32Const => 1,
            I64Const | F64Const => 1,
            _ => 0,
        })
    }
}
