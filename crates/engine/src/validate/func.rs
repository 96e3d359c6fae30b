use crate::{
    alloc::vec::Vec,
    error::{ValidationError, ValidationErrorKind as Kind},
    module::{FuncDecl, Module},
};
use wasm5_core::ValType;
use wasm5_ir::{BlockType, Instruction, MemArg};

type VResult<T> = Result<T, ValidationError>;

fn err(kind: Kind, detail: &str) -> ValidationError {
    ValidationError::new(kind, detail)
}

/// One entry of the control stack (§3 "Validation context").
///
/// `label_types` is what a `br`/`br_if`/`br_table` targeting this frame
/// must find on top of the stack; it equals `results` for `block`/`if` and
/// `params` for `loop` (a branch to a loop re-enters at its start).
struct Frame {
    label_types: Vec<ValType>,
    end_types: Vec<ValType>,
    start_height: usize,
    polymorphic: bool,
}

/// Per-function validation state: the type stack plus the control-frame
/// stack, reused across the whole body. Exposed to [`crate::compile`] as
/// [`super::FuncValidation`] isn't currently needed by the compiler (which
/// re-derives stack shape during translation) but is kept `pub(crate)` so
/// a future incremental compiler could share the pass.
pub(crate) struct FuncValidation<'m> {
    module: &'m Module,
    locals: Vec<ValType>,
    stack: Vec<ValType>,
    frames: Vec<Frame>,
}

pub fn validate_func(module: &Module, func: &FuncDecl) -> VResult<()> {
    let func_type = module
        .types
        .get(func.type_idx as usize)
        .ok_or_else(|| err(Kind::UnknownType, "unknown function type"))?;

    let mut locals = func_type.params().to_vec();
    locals.extend_from_slice(&func.locals);

    let mut v = FuncValidation {
        module,
        locals,
        stack: Vec::new(),
        frames: Vec::new(),
    };

    let results = func_type.results().to_vec();
    v.frames.push(Frame {
        label_types: results.clone(),
        end_types: results,
        start_height: 0,
        polymorphic: false,
    });

    v.validate_body(&func.body)?;

    let frame = v.frames.pop().expect("outer frame always present");
    v.check_end_types(&frame)?;
    if !v.frames.is_empty() {
        return Err(err(Kind::TypeMismatch, "unbalanced control stack"));
    }
    Ok(())
}

impl<'m> FuncValidation<'m> {
    fn push(&mut self, ty: ValType) {
        self.stack.push(ty);
    }

    fn cur_start_height(&self) -> usize {
        self.frames.last().expect("frame stack non-empty").start_height
    }

    fn is_polymorphic(&self) -> bool {
        self.frames.last().expect("frame stack non-empty").polymorphic
    }

    fn mark_polymorphic(&mut self) {
        let height = self.cur_start_height();
        self.stack.truncate(height);
        self.frames.last_mut().expect("frame stack non-empty").polymorphic = true;
    }

    /// Pops one value, checking it against `expected` if given. In
    /// polymorphic mode, popping below the current frame's `start_height`
    /// synthesizes a value of the requested type rather than failing —
    /// this is what lets validation survive unreachable code.
    fn pop(&mut self, expected: Option<ValType>) -> VResult<ValType> {
        let height = self.cur_start_height();
        if self.stack.len() > height {
            let actual = self.stack.pop().expect("checked len above");
            if let Some(expected) = expected {
                if actual != expected {
                    return Err(err(Kind::TypeMismatch, "operand type mismatch"));
                }
            }
            Ok(actual)
        } else if self.is_polymorphic() {
            Ok(expected.unwrap_or(ValType::I32))
        } else {
            Err(err(Kind::TypeMismatch, "type stack underflow"))
        }
    }

    fn pop_expect(&mut self, ty: ValType) -> VResult<()> {
        self.pop(Some(ty)).map(|_| ())
    }

    fn pop_ref(&mut self) -> VResult<ValType> {
        let ty = self.pop(None)?;
        if !ty.is_ref() {
            return Err(err(Kind::TypeMismatch, "expected a reference type"));
        }
        Ok(ty)
    }

    /// Checks that the operand stack above `frame.start_height` exactly
    /// matches `frame.end_types`, consuming it. Does not touch the frame
    /// stack or push results — callers decide what happens to the result
    /// values (pushed to the new top frame for a normal `end`, discarded
    /// and the stack rewound for an `if`-arm boundary).
    fn check_end_types(&mut self, frame: &Frame) -> VResult<()> {
        for ty in frame.end_types.iter().rev() {
            self.pop_expect(*ty)?;
        }
        if self.stack.len() != frame.start_height && !frame.polymorphic {
            return Err(err(Kind::TypeMismatch, "extra values left on the stack"));
        }
        self.stack.truncate(frame.start_height);
        Ok(())
    }

    fn label_types(&self, label: u32) -> VResult<Vec<ValType>> {
        let idx = self
            .frames
            .len()
            .checked_sub(1 + label as usize)
            .ok_or_else(|| err(Kind::UnknownLabel, "branch depth exceeds control stack"))?;
        Ok(self.frames[idx].label_types.clone())
    }

    fn validate_body(&mut self, body: &[Instruction]) -> VResult<()> {
        for instr in body {
            self.validate_instr(instr)?;
        }
        Ok(())
    }

    fn local_type(&self, idx: u32) -> VResult<ValType> {
        self.locals
            .get(idx as usize)
            .copied()
            .ok_or_else(|| err(Kind::UnknownLocal, "unknown local"))
    }

    fn global_type(&self, idx: u32) -> VResult<(ValType, bool)> {
        let global = self
            .module
            .globals
            .get(idx as usize)
            .ok_or_else(|| err(Kind::UnknownGlobal, "unknown global"))?;
        Ok((global.val_type, global.mutable))
    }

    fn mem_bounds_check(&self, arg: &MemArg, width: u32) -> VResult<()> {
        if arg.mem_idx >= self.module.num_memories() {
            return Err(err(Kind::UnknownMemory, "unknown memory"));
        }
        if (1u32 << arg.align) > width {
            return Err(err(Kind::AlignmentTooLarge, "declared alignment exceeds access width"));
        }
        Ok(())
    }

    fn enter_block(&mut self, bt: &BlockType, is_loop: bool) -> VResult<()> {
        for ty in bt.params().iter().rev() {
            self.pop_expect(*ty)?;
        }
        let start_height = self.stack.len();
        for ty in bt.params() {
            self.push(*ty);
        }
        let label_types = if is_loop { bt.params().to_vec() } else { bt.results().to_vec() };
        self.frames.push(Frame {
            label_types,
            end_types: bt.results().to_vec(),
            start_height,
            polymorphic: false,
        });
        Ok(())
    }

    fn validate_instr(&mut self, instr: &Instruction) -> VResult<()> {
        use Instruction as I;
        match instr {
            I::Unreachable => self.mark_polymorphic(),
            I::Nop => {}

            I::Block(bt, body) => {
                self.enter_block(bt, false)?;
                self.validate_body(body)?;
                let frame = self.frames.pop().expect("just pushed");
                self.check_end_types(&frame)?;
                for ty in &frame.end_types {
                    self.push(*ty);
                }
            }
            I::Loop(bt, body) => {
                self.enter_block(bt, true)?;
                self.validate_body(body)?;
                let frame = self.frames.pop().expect("just pushed");
                self.check_end_types(&frame)?;
                for ty in &frame.end_types {
                    self.push(*ty);
                }
            }
            I::If(bt, then_body, else_body) => {
                self.pop_expect(ValType::I32)?;
                if else_body.is_empty() && bt.params() != bt.results() {
                    return Err(err(
                        Kind::TypeMismatch,
                        "`if` without `else` must not change the operand stack signature",
                    ));
                }
                self.enter_block(bt, false)?;
                let start_height = self.frames.last().unwrap().start_height;
                self.validate_body(then_body)?;
                {
                    let frame = self.frames.last().unwrap();
                    let snapshot = Frame {
                        label_types: frame.label_types.clone(),
                        end_types: frame.end_types.clone(),
                        start_height: frame.start_height,
                        polymorphic: frame.polymorphic,
                    };
                    self.check_end_types(&snapshot)?;
                }
                // Reset for the else-arm: same params back on the stack,
                // reachability independent of how the then-arm ended.
                for ty in bt.params() {
                    self.push(*ty);
                }
                {
                    let frame = self.frames.last_mut().unwrap();
                    frame.polymorphic = false;
                    frame.start_height = start_height;
                }
                self.validate_body(else_body)?;
                let frame = self.frames.pop().expect("pushed by enter_block");
                self.check_end_types(&frame)?;
                for ty in &frame.end_types {
                    self.push(*ty);
                }
            }

            I::Br(label) => {
                let types = self.label_types(*label)?;
                for ty in types.iter().rev() {
                    self.pop_expect(*ty)?;
                }
                self.mark_polymorphic();
            }
            I::BrIf(label) => {
                self.pop_expect(ValType::I32)?;
                let types = self.label_types(*label)?;
                // Values for the fallthrough path must remain on the
                // stack, so check without consuming them.
                let height = self.stack.len();
                for ty in types.iter().rev() {
                    self.pop_expect(*ty)?;
                }
                for ty in &types {
                    self.push(*ty);
                }
                debug_assert_eq!(self.stack.len(), height);
            }
            I::BrTable(labels, default) => {
                self.pop_expect(ValType::I32)?;
                let default_types = self.label_types(*default)?;
                for label in labels {
                    let types = self.label_types(*label)?;
                    if types.len() != default_types.len() {
                        return Err(err(Kind::TypeMismatch, "br_table arms have mismatched arity"));
                    }
                }
                for ty in default_types.iter().rev() {
                    self.pop_expect(*ty)?;
                }
                self.mark_polymorphic();
            }
            I::Return => {
                let types = self.frames[0].end_types.clone();
                for ty in types.iter().rev() {
                    self.pop_expect(*ty)?;
                }
                self.mark_polymorphic();
            }
            I::Call(idx) => {
                let ty = self
                    .module
                    .func_type(*idx)
                    .ok_or_else(|| err(Kind::UnknownFunction, "unknown function"))?
                    .clone();
                for ty in ty.params().iter().rev() {
                    self.pop_expect(*ty)?;
                }
                for ty in ty.results() {
                    self.push(*ty);
                }
            }
            I::CallIndirect(type_idx, table_idx) => {
                if *table_idx >= self.module.num_tables() {
                    return Err(err(Kind::UnknownTable, "unknown table"));
                }
                let ty = self
                    .module
                    .types
                    .get(*type_idx as usize)
                    .ok_or_else(|| err(Kind::UnknownType, "unknown type"))?
                    .clone();
                self.pop_expect(ValType::I32)?;
                for ty in ty.params().iter().rev() {
                    self.pop_expect(*ty)?;
                }
                for ty in ty.results() {
                    self.push(*ty);
                }
            }
            I::ReturnCall(idx) => {
                let callee = self
                    .module
                    .func_type(*idx)
                    .ok_or_else(|| err(Kind::UnknownFunction, "unknown function"))?
                    .clone();
                if callee.results() != self.frames[0].end_types.as_slice() {
                    return Err(err(Kind::TypeMismatch, "return_call result arity mismatch"));
                }
                for ty in callee.params().iter().rev() {
                    self.pop_expect(*ty)?;
                }
                self.mark_polymorphic();
            }
            I::ReturnCallIndirect(type_idx, table_idx) => {
                if *table_idx >= self.module.num_tables() {
                    return Err(err(Kind::UnknownTable, "unknown table"));
                }
                let ty = self
                    .module
                    .types
                    .get(*type_idx as usize)
                    .ok_or_else(|| err(Kind::UnknownType, "unknown type"))?
                    .clone();
                if ty.results() != self.frames[0].end_types.as_slice() {
                    return Err(err(Kind::TypeMismatch, "return_call_indirect result arity mismatch"));
                }
                self.pop_expect(ValType::I32)?;
                for ty in ty.params().iter().rev() {
                    self.pop_expect(*ty)?;
                }
                self.mark_polymorphic();
            }

            I::Drop => {
                self.pop(None)?;
            }
            I::Select(declared) => {
                self.pop_expect(ValType::I32)?;
                match declared {
                    Some(ty) => {
                        self.pop_expect(*ty)?;
                        self.pop_expect(*ty)?;
                        self.push(*ty);
                    }
                    None => {
                        let a = self.pop(None)?;
                        if a.is_ref() {
                            return Err(err(
                                Kind::TypeMismatch,
                                "untyped select cannot be used with reference types",
                            ));
                        }
                        self.pop_expect(a)?;
                        self.push(a);
                    }
                }
            }

            I::LocalGet(idx) => {
                let ty = self.local_type(*idx)?;
                self.push(ty);
            }
            I::LocalSet(idx) => {
                let ty = self.local_type(*idx)?;
                self.pop_expect(ty)?;
            }
            I::LocalTee(idx) => {
                let ty = self.local_type(*idx)?;
                self.pop_expect(ty)?;
                self.push(ty);
            }
            I::GlobalGet(idx) => {
                let (ty, _) = self.global_type(*idx)?;
                self.push(ty);
            }
            I::GlobalSet(idx) => {
                let (ty, mutable) = self.global_type(*idx)?;
                if !mutable {
                    return Err(err(Kind::TypeMismatch, "cannot set an immutable global"));
                }
                self.pop_expect(ty)?;
            }

            I::RefNull(ty) => self.push(*ty),
            I::RefIsNull => {
                self.pop_ref()?;
                self.push(ValType::I32);
            }
            I::RefFunc(idx) => {
                if *idx >= self.module.num_funcs() {
                    return Err(err(Kind::UnknownFunction, "unknown function"));
                }
                self.push(ValType::FuncRef);
            }

            I::TableGet(idx) => {
                let table = self.table(*idx)?;
                self.pop_expect(ValType::I32)?;
                self.push(ValType::from(table));
            }
            I::TableSet(idx) => {
                let table = self.table(*idx)?;
                self.pop_expect(ValType::from(table))?;
                self.pop_expect(ValType::I32)?;
            }
            I::TableSize(idx) => {
                self.table(*idx)?;
                self.push(ValType::I32);
            }
            I::TableGrow(idx) => {
                let table = self.table(*idx)?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::from(table))?;
                self.push(ValType::I32);
            }
            I::TableFill(idx) => {
                let table = self.table(*idx)?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::from(table))?;
                self.pop_expect(ValType::I32)?;
            }
            I::TableCopy { dst, src } => {
                self.table(*dst)?;
                self.table(*src)?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
            }
            I::TableInit { table, elem } => {
                self.table(*table)?;
                if *elem >= self.module.elements.len() as u32 {
                    return Err(err(Kind::UnknownElement, "unknown element segment"));
                }
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
            }
            I::ElemDrop(idx) => {
                if *idx >= self.module.elements.len() as u32 {
                    return Err(err(Kind::UnknownElement, "unknown element segment"));
                }
            }

            I::I32Load(a) | I::I32Load8S(a) | I::I32Load8U(a) | I::I32Load16S(a) | I::I32Load16U(a) => {
                self.mem_bounds_check(a, load_width(instr))?;
                self.pop_expect(ValType::I32)?;
                self.push(ValType::I32);
            }
            I::I64Load(a)
            | I::I64Load8S(a)
            | I::I64Load8U(a)
            | I::I64Load16S(a)
            | I::I64Load16U(a)
            | I::I64Load32S(a)
            | I::I64Load32U(a) => {
                self.mem_bounds_check(a, load_width(instr))?;
                self.pop_expect(ValType::I32)?;
                self.push(ValType::I64);
            }
            I::F32Load(a) => {
                self.mem_bounds_check(a, 4)?;
                self.pop_expect(ValType::I32)?;
                self.push(ValType::F32);
            }
            I::F64Load(a) => {
                self.mem_bounds_check(a, 8)?;
                self.pop_expect(ValType::I32)?;
                self.push(ValType::F64);
            }
            I::I32Store(a) | I::I32Store8(a) | I::I32Store16(a) => {
                self.mem_bounds_check(a, store_width(instr))?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
            }
            I::I64Store(a) | I::I64Store8(a) | I::I64Store16(a) | I::I64Store32(a) => {
                self.mem_bounds_check(a, store_width(instr))?;
                self.pop_expect(ValType::I64)?;
                self.pop_expect(ValType::I32)?;
            }
            I::F32Store(a) => {
                self.mem_bounds_check(a, 4)?;
                self.pop_expect(ValType::F32)?;
                self.pop_expect(ValType::I32)?;
            }
            I::F64Store(a) => {
                self.mem_bounds_check(a, 8)?;
                self.pop_expect(ValType::F64)?;
                self.pop_expect(ValType::I32)?;
            }
            I::MemorySize => {
                self.require_memory()?;
                self.push(ValType::I32);
            }
            I::MemoryGrow => {
                self.require_memory()?;
                self.pop_expect(ValType::I32)?;
                self.push(ValType::I32);
            }
            I::MemoryFill => {
                self.require_memory()?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
            }
            I::MemoryCopy => {
                self.require_memory()?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
            }
            I::MemoryInit(data_idx) => {
                self.require_memory()?;
                if *data_idx >= self.module.data.len() as u32 {
                    return Err(err(Kind::UnknownData, "unknown data segment"));
                }
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
                self.pop_expect(ValType::I32)?;
            }
            I::DataDrop(idx) => {
                if *idx >= self.module.data.len() as u32 {
                    return Err(err(Kind::UnknownData, "unknown data segment"));
                }
            }

            I::I32Const(_) => self.push(ValType::I32),
            I::I64Const(_) => self.push(ValType::I64),
            I::F32Const(_) => self.push(ValType::F32),
            I::F64Const(_) => self.push(ValType::F64),

            I::I32Eqz => self.unop(ValType::I32, ValType::I32)?,
            I::I64Eqz => self.unop(ValType::I64, ValType::I32)?,
            I::I32Eq | I::I32Ne | I::I32LtS | I::I32LtU | I::I32GtS | I::I32GtU | I::I32LeS
            | I::I32LeU | I::I32GeS | I::I32GeU => self.binop(ValType::I32, ValType::I32)?,
            I::I64Eq | I::I64Ne | I::I64LtS | I::I64LtU | I::I64GtS | I::I64GtU | I::I64LeS
            | I::I64LeU | I::I64GeS | I::I64GeU => self.binop(ValType::I64, ValType::I32)?,
            I::F32Eq | I::F32Ne | I::F32Lt | I::F32Gt | I::F32Le | I::F32Ge => {
                self.binop(ValType::F32, ValType::I32)?
            }
            I::F64Eq | I::F64Ne | I::F64Lt | I::F64Gt | I::F64Le | I::F64Ge => {
                self.binop(ValType::F64, ValType::I32)?
            }

            I::I32Clz | I::I32Ctz | I::I32Popcnt | I::I32Extend8S | I::I32Extend16S => {
                self.unop(ValType::I32, ValType::I32)?
            }
            I::I32Add | I::I32Sub | I::I32Mul | I::I32DivS | I::I32DivU | I::I32RemS
            | I::I32RemU | I::I32And | I::I32Or | I::I32Xor | I::I32Shl | I::I32ShrS
            | I::I32ShrU | I::I32Rotl | I::I32Rotr => self.binop(ValType::I32, ValType::I32)?,

            I::I64Clz | I::I64Ctz | I::I64Popcnt | I::I64Extend8S | I::I64Extend16S
            | I::I64Extend32S => self.unop(ValType::I64, ValType::I64)?,
            I::I64Add | I::I64Sub | I::I64Mul | I::I64DivS | I::I64DivU | I::I64RemS
            | I::I64RemU | I::I64And | I::I64Or | I::I64Xor | I::I64Shl | I::I64ShrS
            | I::I64ShrU | I::I64Rotl | I::I64Rotr => self.binop(ValType::I64, ValType::I64)?,

            I::F32Abs | I::F32Neg | I::F32Ceil | I::F32Floor | I::F32Trunc | I::F32Nearest
            | I::F32Sqrt => self.unop(ValType::F32, ValType::F32)?,
            I::F32Add | I::F32Sub | I::F32Mul | I::F32Div | I::F32Min | I::F32Max
            | I::F32Copysign => self.binop(ValType::F32, ValType::F32)?,
            I::F64Abs | I::F64Neg | I::F64Ceil | I::F64Floor | I::F64Trunc | I::F64Nearest
            | I::F64Sqrt => self.unop(ValType::F64, ValType::F64)?,
            I::F64Add | I::F64Sub | I::F64Mul | I::F64Div | I::F64Min | I::F64Max
            | I::F64Copysign => self.binop(ValType::F64, ValType::F64)?,

            I::I32WrapI64 => self.unop(ValType::I64, ValType::I32)?,
            I::I32TruncF32S | I::I32TruncF32U | I::I32TruncSatF32S | I::I32TruncSatF32U => {
                self.unop(ValType::F32, ValType::I32)?
            }
            I::I32TruncF64S | I::I32TruncF64U | I::I32TruncSatF64S | I::I32TruncSatF64U => {
                self.unop(ValType::F64, ValType::I32)?
            }
            I::I64ExtendI32S | I::I64ExtendI32U => self.unop(ValType::I32, ValType::I64)?,
            I::I64TruncF32S | I::I64TruncF32U | I::I64TruncSatF32S | I::I64TruncSatF32U => {
                self.unop(ValType::F32, ValType::I64)?
            }
            I::I64TruncF64S | I::I64TruncF64U | I::I64TruncSatF64S | I::I64TruncSatF64U => {
                self.unop(ValType::F64, ValType::I64)?
            }
            I::F32ConvertI32S | I::F32ConvertI32U => self.unop(ValType::I32, ValType::F32)?,
            I::F32ConvertI64S | I::F32ConvertI64U => self.unop(ValType::I64, ValType::F32)?,
            I::F32DemoteF64 => self.unop(ValType::F64, ValType::F32)?,
            I::F64ConvertI32S | I::F64ConvertI32U => self.unop(ValType::I32, ValType::F64)?,
            I::F64ConvertI64S | I::F64ConvertI64U => self.unop(ValType::I64, ValType::F64)?,
            I::F64PromoteF32 => self.unop(ValType::F32, ValType::F64)?,
            I::I32ReinterpretF32 => self.unop(ValType::F32, ValType::I32)?,
            I::I64ReinterpretF64 => self.unop(ValType::F64, ValType::I64)?,
            I::F32ReinterpretI32 => self.unop(ValType::I32, ValType::F32)?,
            I::F64ReinterpretI64 => self.unop(ValType::I64, ValType::F64)?,
        }
        Ok(())
    }

    fn unop(&mut self, input: ValType, output: ValType) -> VResult<()> {
        self.pop_expect(input)?;
        self.push(output);
        Ok(())
    }

    fn binop(&mut self, input: ValType, output: ValType) -> VResult<()> {
        self.pop_expect(input)?;
        self.pop_expect(input)?;
        self.push(output);
        Ok(())
    }

    fn table(&self, idx: u32) -> VResult<wasm5_core::RefType> {
        let table = self
            .module
            .tables
            .get(idx as usize)
            .ok_or_else(|| err(Kind::UnknownTable, "unknown table"))?;
        Ok(table.elem)
    }

    fn require_memory(&self) -> VResult<()> {
        if self.module.num_memories() == 0 {
            Err(err(Kind::UnknownMemory, "module has no memory"))
        } else {
            Ok(())
        }
    }
}

fn load_width(instr: &Instruction) -> u32 {
    use Instruction as I;
    match instr {
        I::I32Load8S(_) | I::I32Load8U(_) | I::I64Load8S(_) | I::I64Load8U(_) => 1,
        I::I32Load16S(_) | I::I32Load16U(_) | I::I64Load16S(_) | I::I64Load16U(_) => 2,
        I::I32Load(_) | I::I64Load32S(_) | I::I64Load32U(_) => 4,
        I::I64Load(_) => 8,
        _ => unreachable!("load_width called with non-load instruction"),
    }
}

fn store_width(instr: &Instruction) -> u32 {
    use Instruction as I;
    match instr {
        I::I32Store8(_) | I::I64Store8(_) => 1,
        I::I32Store16(_) | I::I64Store16(_) => 2,
        I::I32Store(_) | I::I64Store32(_) => 4,
        I::I64Store(_) => 8,
        _ => unreachable!("store_width called with non-store instruction"),
    }
}
