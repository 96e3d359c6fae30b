use super::CompiledFunc;
use crate::{alloc::vec::Vec, module::{FuncDecl, Module}};
use wasm5_core::{FuncType, ValType};
use wasm5_ir::{BlockType, CellIndex, Instruction, Op};

/// Where a branch to a given control frame lands.
///
/// A `loop` label is resolved the instant the loop is opened — branching
/// to it always re-enters at the same cell. Every other label (`block`,
/// `if`, and the implicit function-level label `return` targets) is only
/// known once its `end` is reached, so branches to it collect their
/// immediate's cell position here and get patched in one pass at frame-pop
/// time.
enum Target {
    Resolved(u32),
    Pending(Vec<usize>),
}

struct Frame {
    /// Operand-stack height (in slots above the locals area) when this
    /// frame was entered, after its block-type params were popped back off.
    start_height: u32,
    /// Value count a branch to this label carries: `results.len()` for
    /// `block`/`if`/the function frame, `params.len()` for `loop` (a branch
    /// to a loop re-enters with its params, not its results).
    label_arity: u32,
    /// Value count live on the stack once this frame's `end` is reached —
    /// used to restore `height` after popping the frame, independent of
    /// whether the body was compiled as dead code partway through.
    end_arity: u32,
    target: Target,
}

pub(crate) fn compile_func(
    module: &Module,
    decl: &FuncDecl,
    sig: &FuncType,
    code: &mut Vec<u64>,
) -> CompiledFunc {
    let mut c = FuncCompiler {
        module,
        code,
        height: 0,
        max_height: 0,
        dead: false,
        frames: Vec::new(),
    };

    let entry = CellIndex(c.code.len() as u32);
    let num_params = sig.params().len() as u32;
    let num_locals = decl.locals.len() as u32;
    emit(c.code, Op::Entry);
    c.code.push(u64::from(num_locals));
    c.code.push(u64::from(num_params));

    c.frames.push(Frame {
        start_height: 0,
        label_arity: sig.results().len() as u32,
        end_arity: sig.results().len() as u32,
        target: Target::Pending(Vec::new()),
    });

    c.compile_body(&decl.body);

    let frame = c.frames.pop().expect("function frame always present");
    c.patch_target(&frame.target);
    c.height = frame.end_arity;

    emit(c.code, Op::End);
    c.code.push(u64::from(sig.results().len() as u32));

    CompiledFunc {
        entry,
        num_params,
        num_locals,
        num_results: sig.results().len() as u32,
        max_stack: c.max_height,
        frame_size: num_params + num_locals + c.max_height,
        sig: sig.clone(),
    }
}

struct FuncCompiler<'m, 'c> {
    module: &'m Module,
    code: &'c mut Vec<u64>,
    /// Current operand-stack height, in slots above the locals area.
    height: u32,
    max_height: u32,
    /// Set once the current straight-line instruction sequence has hit an
    /// instruction that unconditionally transfers control elsewhere
    /// (`unreachable`, `br`, `br_table`, `return`, `return_call*`).
    /// Everything after it in the same `Vec<Instruction>` is unreachable by
    /// construction — the validator already proved it type-checks however
    /// it's shaped, so it's safe to simply stop emitting for it.
    dead: bool,
    frames: Vec<Frame>,
}

fn emit(code: &mut Vec<u64>, op: Op) {
    code.push(op as u64);
}

impl<'m, 'c> FuncCompiler<'m, 'c> {
    fn push(&mut self, n: u32) {
        self.height += n;
        self.max_height = self.max_height.max(self.height);
    }

    fn pop(&mut self, n: u32) {
        self.height = self.height.saturating_sub(n);
    }

    fn here(&self) -> u32 {
        self.code.len() as u32
    }

    fn patch_target(&mut self, target: &Target) {
        if let Target::Pending(fixups) = target {
            let here = self.here() as u64;
            for &pos in fixups {
                self.code[pos] = here;
            }
        }
    }

    fn frame_index(&self, label: u32) -> usize {
        self.frames.len() - 1 - label as usize
    }

    /// Emits the value shuffle and jump for a branch to `frame_index`,
    /// without touching `self.height` or `self.dead` — callers decide
    /// whether the branch they're emitting is unconditional (and thus
    /// deadens the rest of the block) or one arm of a conditional.
    fn emit_branch_sequence(&mut self, frame_index: usize) {
        let (start_height, arity) = {
            let f = &self.frames[frame_index];
            (f.start_height, f.label_arity)
        };
        let src_base = self.height.saturating_sub(arity);
        for i in 0..arity {
            let (dst, src) = (start_height + i, src_base + i);
            if dst != src {
                emit(self.code, Op::CopySlot);
                self.code.push(u64::from(dst));
                self.code.push(u64::from(src));
            }
        }
        let new_height = start_height + arity;
        if new_height != self.height {
            emit(self.code, Op::SetSp);
            self.code.push(u64::from(new_height));
        }
        emit(self.code, Op::Br);
        match &mut self.frames[frame_index].target {
            Target::Resolved(cell) => self.code.push(u64::from(*cell)),
            Target::Pending(fixups) => {
                fixups.push(self.code.len());
                self.code.push(0);
            }
        }
    }

    fn compile_body(&mut self, body: &[Instruction]) {
        for instr in body {
            if self.dead {
                break;
            }
            self.compile_instr(instr);
        }
    }

    fn enter_block(&mut self, bt: &BlockType, target: Target, is_loop: bool) {
        self.pop(bt.params().len() as u32);
        let start_height = self.height;
        self.push(bt.params().len() as u32);
        let label_arity = if is_loop { bt.params().len() } else { bt.results().len() } as u32;
        self.frames.push(Frame {
            start_height,
            label_arity,
            end_arity: bt.results().len() as u32,
            target,
        });
    }

    fn exit_block(&mut self) {
        let frame = self.frames.pop().expect("matching enter_block");
        self.patch_target(&frame.target);
        self.height = frame.start_height + frame.end_arity;
        self.dead = false;
    }

    fn compile_instr(&mut self, instr: &Instruction) {
        use Instruction as I;
        match instr {
            I::Unreachable => {
                emit(self.code, Op::Unreachable);
                self.dead = true;
            }
            I::Nop => emit(self.code, Op::Nop),

            I::Block(bt, inner) => {
                self.enter_block(bt, Target::Pending(Vec::new()), false);
                self.compile_body(inner);
                self.exit_block();
            }
            I::Loop(bt, inner) => {
                let loop_start = self.here();
                self.enter_block(bt, Target::Resolved(loop_start), true);
                self.compile_body(inner);
                self.exit_block();
            }
            I::If(bt, then_body, else_body) => {
                self.pop(1); // condition
                emit(self.code, Op::BrIf);
                let p_nonzero = self.code.len();
                self.code.push(0);
                let p_zero = self.code.len();
                self.code.push(0);

                self.code[p_nonzero] = u64::from(self.here());
                self.enter_block(bt, Target::Pending(Vec::new()), false);
                self.compile_body(then_body);

                if else_body.is_empty() {
                    self.code[p_zero] = u64::from(self.here());
                    self.exit_block();
                } else {
                    let frame_idx = self.frames.len() - 1;
                    if !self.dead {
                        self.emit_branch_sequence(frame_idx);
                    }
                    self.dead = false;
                    self.height = self.frames[frame_idx].start_height + block_params_len(bt);
                    self.code[p_zero] = u64::from(self.here());
                    self.compile_body(else_body);
                    self.exit_block();
                }
            }

            I::Br(label) => {
                let idx = self.frame_index(*label);
                self.emit_branch_sequence(idx);
                self.dead = true;
            }
            I::BrIf(label) => {
                self.pop(1);
                let idx = self.frame_index(*label);
                emit(self.code, Op::BrIf);
                let p_nonzero = self.code.len();
                self.code.push(0);
                let p_zero = self.code.len();
                self.code.push(0);

                self.code[p_nonzero] = u64::from(self.here());
                self.emit_branch_sequence(idx);
                self.code[p_zero] = u64::from(self.here());
            }
            I::BrTable(labels, default) => {
                self.pop(1);
                emit(self.code, Op::BrTable);
                self.code.push(labels.len() as u64);
                let mut slots = Vec::with_capacity(1 + labels.len());
                slots.push(self.code.len());
                self.code.push(0);
                for _ in labels {
                    slots.push(self.code.len());
                    self.code.push(0);
                }
                let all = core::iter::once(default).chain(labels.iter());
                for (slot, label) in slots.into_iter().zip(all) {
                    self.code[slot] = u64::from(self.here());
                    let idx = self.frame_index(*label);
                    self.emit_branch_sequence(idx);
                }
                self.dead = true;
            }
            I::Return => {
                self.emit_branch_sequence(0);
                self.dead = true;
            }
            I::Call(idx) => {
                let ty = self.module.func_type(*idx).expect("validated").clone();
                let num_params = ty.params().len() as u32;
                // The args for this call already sit at the top of the
                // current frame's operand stack; `frame_offset` is their
                // position relative to this frame's base, which becomes the
                // callee's frame base with no copy required.
                let frame_offset = self.height - num_params;
                self.pop(num_params);
                if *idx < self.module.num_imported_funcs {
                    emit(self.code, Op::CallImport);
                    self.code.push(u64::from(*idx));
                    self.code.push(u64::from(num_params));
                } else {
                    emit(self.code, Op::Call);
                    self.code.push(u64::from(*idx - self.module.num_imported_funcs));
                    self.code.push(u64::from(num_params));
                    self.code.push(u64::from(frame_offset));
                }
                self.push(ty.results().len() as u32);
            }
            I::CallIndirect(type_idx, table_idx) => {
                let ty = self.module.types[*type_idx as usize].clone();
                let num_params = ty.params().len() as u32;
                let frame_offset = self.height - 1 - num_params;
                self.pop(1); // table index operand
                self.pop(num_params);
                let (sig_lo, sig_hi) = ty.signature_hash();
                emit(self.code, Op::CallIndirect);
                self.code.push(sig_lo);
                self.code.push(sig_hi);
                self.code.push(u64::from(*table_idx));
                self.code.push(u64::from(num_params));
                self.code.push(u64::from(frame_offset));
                self.push(ty.results().len() as u32);
            }
            I::ReturnCall(idx) => {
                let ty = self.module.func_type(*idx).expect("validated").clone();
                let num_params = ty.params().len() as u32;
                self.pop(num_params);
                if *idx < self.module.num_imported_funcs {
                    // A host import has no Wasm frame to elide; a tail call
                    // into one is just a call immediately followed by return.
                    emit(self.code, Op::CallImport);
                    self.code.push(u64::from(*idx));
                    self.code.push(u64::from(num_params));
                    self.push(ty.results().len() as u32);
                    self.emit_branch_sequence(0);
                } else {
                    emit(self.code, Op::ReturnCall);
                    self.code.push(u64::from(*idx - self.module.num_imported_funcs));
                    self.code.push(u64::from(num_params));
                }
                self.dead = true;
            }
            I::ReturnCallIndirect(type_idx, table_idx) => {
                let ty = self.module.types[*type_idx as usize].clone();
                self.pop(1);
                self.pop(ty.params().len() as u32);
                let (sig_lo, sig_hi) = ty.signature_hash();
                emit(self.code, Op::ReturnCallIndirect);
                self.code.push(sig_lo);
                self.code.push(sig_hi);
                self.code.push(u64::from(*table_idx));
                self.code.push(u64::from(ty.params().len() as u32));
                self.dead = true;
            }

            I::Drop => {
                emit(self.code, Op::Drop);
                self.pop(1);
            }
            I::Select(_) => {
                emit(self.code, Op::Select);
                self.pop(3);
                self.push(1);
            }

            I::LocalGet(idx) => {
                emit(self.code, Op::LocalGet);
                self.code.push(u64::from(*idx));
                self.push(1);
            }
            I::LocalSet(idx) => {
                emit(self.code, Op::LocalSet);
                self.code.push(u64::from(*idx));
                self.pop(1);
            }
            I::LocalTee(idx) => {
                emit(self.code, Op::LocalTee);
                self.code.push(u64::from(*idx));
            }
            I::GlobalGet(idx) => {
                emit(self.code, Op::GlobalGet);
                self.code.push(u64::from(*idx));
                self.push(1);
            }
            I::GlobalSet(idx) => {
                emit(self.code, Op::GlobalSet);
                self.code.push(u64::from(*idx));
                self.pop(1);
            }

            I::RefNull(ty) => {
                emit(self.code, Op::RefNull);
                self.code.push(if *ty == ValType::FuncRef { 1 } else { 0 });
                self.push(1);
            }
            I::RefIsNull => {
                emit(self.code, Op::RefIsNull);
            }
            I::RefFunc(idx) => {
                emit(self.code, Op::RefFunc);
                self.code.push(u64::from(*idx));
                self.push(1);
            }

            I::TableGet(idx) => {
                emit(self.code, Op::TableGet);
                self.code.push(u64::from(*idx));
            }
            I::TableSet(idx) => {
                emit(self.code, Op::TableSet);
                self.code.push(u64::from(*idx));
                self.pop(2);
            }
            I::TableSize(idx) => {
                emit(self.code, Op::TableSize);
                self.code.push(u64::from(*idx));
                self.push(1);
            }
            I::TableGrow(idx) => {
                emit(self.code, Op::TableGrow);
                self.code.push(u64::from(*idx));
                self.pop(1);
            }
            I::TableFill(idx) => {
                emit(self.code, Op::TableFill);
                self.code.push(u64::from(*idx));
                self.pop(3);
            }
            I::TableCopy { dst, src } => {
                emit(self.code, Op::TableCopy);
                self.code.push(u64::from(*dst));
                self.code.push(u64::from(*src));
                self.pop(3);
            }
            I::TableInit { table, elem } => {
                emit(self.code, Op::TableInit);
                self.code.push(u64::from(*table));
                self.code.push(u64::from(*elem));
                self.pop(3);
            }
            I::ElemDrop(idx) => {
                emit(self.code, Op::ElemDrop);
                self.code.push(u64::from(*idx));
            }

            I::I32Load(a) => self.mem_load(Op::I32Load, a),
            I::I64Load(a) => self.mem_load(Op::I64Load, a),
            I::F32Load(a) => self.mem_load(Op::F32Load, a),
            I::F64Load(a) => self.mem_load(Op::F64Load, a),
            I::I32Load8S(a) => self.mem_load(Op::I32Load8S, a),
            I::I32Load8U(a) => self.mem_load(Op::I32Load8U, a),
            I::I32Load16S(a) => self.mem_load(Op::I32Load16S, a),
            I::I32Load16U(a) => self.mem_load(Op::I32Load16U, a),
            I::I64Load8S(a) => self.mem_load(Op::I64Load8S, a),
            I::I64Load8U(a) => self.mem_load(Op::I64Load8U, a),
            I::I64Load16S(a) => self.mem_load(Op::I64Load16S, a),
            I::I64Load16U(a) => self.mem_load(Op::I64Load16U, a),
            I::I64Load32S(a) => self.mem_load(Op::I64Load32S, a),
            I::I64Load32U(a) => self.mem_load(Op::I64Load32U, a),
            I::I32Store(a) => self.mem_store(Op::I32Store, a),
            I::I64Store(a) => self.mem_store(Op::I64Store, a),
            I::F32Store(a) => self.mem_store(Op::F32Store, a),
            I::F64Store(a) => self.mem_store(Op::F64Store, a),
            I::I32Store8(a) => self.mem_store(Op::I32Store8, a),
            I::I32Store16(a) => self.mem_store(Op::I32Store16, a),
            I::I64Store8(a) => self.mem_store(Op::I64Store8, a),
            I::I64Store16(a) => self.mem_store(Op::I64Store16, a),
            I::I64Store32(a) => self.mem_store(Op::I64Store32, a),
            I::MemorySize => {
                emit(self.code, Op::MemorySize);
                self.push(1);
            }
            I::MemoryGrow => {
                emit(self.code, Op::MemoryGrow);
            }
            I::MemoryFill => {
                emit(self.code, Op::MemoryFill);
                self.pop(3);
            }
            I::MemoryCopy => {
                emit(self.code, Op::MemoryCopy);
                self.pop(3);
            }
            I::MemoryInit(idx) => {
                emit(self.code, Op::MemoryInit);
                self.code.push(u64::from(*idx));
                self.pop(3);
            }
            I::DataDrop(idx) => {
                emit(self.code, Op::DataDrop);
                self.code.push(u64::from(*idx));
            }

            I::I32Const(v) => {
                emit(self.code, Op::I32Const);
                self.code.push(u64::from(*v as u32));
                self.push(1);
            }
            I::I64Const(v) => {
                emit(self.code, Op::I64Const);
                self.code.push(*v as u64);
                self.push(1);
            }
            I::F32Const(v) => {
                emit(self.code, Op::F32Const);
                self.code.push(u64::from(v.to_bits()));
                self.push(1);
            }
            I::F64Const(v) => {
                emit(self.code, Op::F64Const);
                self.code.push(v.to_bits());
                self.push(1);
            }

            // Comparisons: binary ops collapse arity 2->1; `eqz` is unary.
            I::I32Eqz | I::I64Eqz => self.simple(instr, 1, 1),
            I::I32Eq | I::I32Ne | I::I32LtS | I::I32LtU | I::I32GtS | I::I32GtU | I::I32LeS
            | I::I32LeU | I::I32GeS | I::I32GeU | I::I64Eq | I::I64Ne | I::I64LtS | I::I64LtU
            | I::I64GtS | I::I64GtU | I::I64LeS | I::I64LeU | I::I64GeS | I::I64GeU
            | I::F32Eq | I::F32Ne | I::F32Lt | I::F32Gt | I::F32Le | I::F32Ge | I::F64Eq
            | I::F64Ne | I::F64Lt | I::F64Gt | I::F64Le | I::F64Ge => self.simple(instr, 2, 1),

            I::I32Clz | I::I32Ctz | I::I32Popcnt | I::I64Clz | I::I64Ctz | I::I64Popcnt
            | I::F32Abs | I::F32Neg | I::F32Ceil | I::F32Floor | I::F32Trunc | I::F32Nearest
            | I::F32Sqrt | I::F64Abs | I::F64Neg | I::F64Ceil | I::F64Floor | I::F64Trunc
            | I::F64Nearest | I::F64Sqrt => self.simple(instr, 1, 1),

            I::I32Add | I::I32Sub | I::I32Mul | I::I32DivS | I::I32DivU | I::I32RemS
            | I::I32RemU | I::I32And | I::I32Or | I::I32Xor | I::I32Shl | I::I32ShrS
            | I::I32ShrU | I::I32Rotl | I::I32Rotr | I::I64Add | I::I64Sub | I::I64Mul
            | I::I64DivS | I::I64DivU | I::I64RemS | I::I64RemU | I::I64And | I::I64Or
            | I::I64Xor | I::I64Shl | I::I64ShrS | I::I64ShrU | I::I64Rotl | I::I64Rotr
            | I::F32Add | I::F32Sub | I::F32Mul | I::F32Div | I::F32Min | I::F32Max
            | I::F32Copysign | I::F64Add | I::F64Sub | I::F64Mul | I::F64Div | I::F64Min
            | I::F64Max | I::F64Copysign => self.simple(instr, 2, 1),

            I::I32WrapI64 | I::I32TruncF32S | I::I32TruncF32U | I::I32TruncF64S
            | I::I32TruncF64U | I::I64ExtendI32S | I::I64ExtendI32U | I::I64TruncF32S
            | I::I64TruncF32U | I::I64TruncF64S | I::I64TruncF64U | I::F32ConvertI32S
            | I::F32ConvertI32U | I::F32ConvertI64S | I::F32ConvertI64U | I::F32DemoteF64
            | I::F64ConvertI32S | I::F64ConvertI32U | I::F64ConvertI64S | I::F64ConvertI64U
            | I::F64PromoteF32 | I::I32ReinterpretF32 | I::I64ReinterpretF64
            | I::F32ReinterpretI32 | I::F64ReinterpretI64 | I::I32Extend8S | I::I32Extend16S
            | I::I64Extend8S | I::I64Extend16S | I::I64Extend32S | I::I32TruncSatF32S
            | I::I32TruncSatF32U | I::I32TruncSatF64S | I::I32TruncSatF64U | I::I64TruncSatF32S
            | I::I64TruncSatF32U | I::I64TruncSatF64S | I::I64TruncSatF64U => {
                self.simple(instr, 1, 1)
            }
        }
    }

    fn mem_load(&mut self, op: Op, arg: &wasm5_ir::MemArg) {
        emit(self.code, op);
        self.code.push(u64::from(arg.align));
        self.code.push(arg.offset);
        self.code.push(u64::from(arg.mem_idx));
    }

    fn mem_store(&mut self, op: Op, arg: &wasm5_ir::MemArg) {
        emit(self.code, op);
        self.code.push(u64::from(arg.align));
        self.code.push(arg.offset);
        self.code.push(u64::from(arg.mem_idx));
        self.pop(2);
    }

    /// Most numeric instructions have no immediates and a fixed,
    /// statically-known arity; `instr_to_op` maps the tree form to its
    /// flat opcode and this helper does the height bookkeeping uniformly.
    fn simple(&mut self, instr: &Instruction, pops: u32, pushes: u32) {
        emit(self.code, instr_to_op(instr));
        self.pop(pops);
        self.push(pushes);
    }
}

fn block_params_len(bt: &BlockType) -> u32 {
    bt.params().len() as u32
}

fn instr_to_op(instr: &Instruction) -> Op {
    use Instruction as I;
    match instr {
        I::I32Eqz => Op::I32Eqz,
        I::I32Eq => Op::I32Eq,
        I::I32Ne => Op::I32Ne,
        I::I32LtS => Op::I32LtS,
        I::I32LtU => Op::I32LtU,
        I::I32GtS => Op::I32GtS,
        I::I32GtU => Op::I32GtU,
        I::I32LeS => Op::I32LeS,
        I::I32LeU => Op::I32LeU,
        I::I32GeS => Op::I32GeS,
        I::I32GeU => Op::I32GeU,
        I::I64Eqz => Op::I64Eqz,
        I::I64Eq => Op::I64Eq,
        I::I64Ne => Op::I64Ne,
        I::I64LtS => Op::I64LtS,
        I::I64LtU => Op::I64LtU,
        I::I64GtS => Op::I64GtS,
        I::I64GtU => Op::I64GtU,
        I::I64LeS => Op::I64LeS,
        I::I64LeU => Op::I64LeU,
        I::I64GeS => Op::I64GeS,
        I::I64GeU => Op::I64GeU,
        I::F32Eq => Op::F32Eq,
        I::F32Ne => Op::F32Ne,
        I::F32Lt => Op::F32Lt,
        I::F32Gt => Op::F32Gt,
        I::F32Le => Op::F32Le,
        I::F32Ge => Op::F32Ge,
        I::F64Eq => Op::F64Eq,
        I::F64Ne => Op::F64Ne,
        I::F64Lt => Op::F64Lt,
        I::F64Gt => Op::F64Gt,
        I::F64Le => Op::F64Le,
        I::F64Ge => Op::F64Ge,
        I::I32Clz => Op::I32Clz,
        I::I32Ctz => Op::I32Ctz,
        I::I32Popcnt => Op::I32Popcnt,
        I::I32Add => Op::I32Add,
        I::I32Sub => Op::I32Sub,
        I::I32Mul => Op::I32Mul,
        I::I32DivS => Op::I32DivS,
        I::I32DivU => Op::I32DivU,
        I::I32RemS => Op::I32RemS,
        I::I32RemU => Op::I32RemU,
        I::I32And => Op::I32And,
        I::I32Or => Op::I32Or,
        I::I32Xor => Op::I32Xor,
        I::I32Shl => Op::I32Shl,
        I::I32ShrS => Op::I32ShrS,
        I::I32ShrU => Op::I32ShrU,
        I::I32Rotl => Op::I32Rotl,
        I::I32Rotr => Op::I32Rotr,
        I::I64Clz => Op::I64Clz,
        I::I64Ctz => Op::I64Ctz,
        I::I64Popcnt => Op::I64Popcnt,
        I::I64Add => Op::I64Add,
        I::I64Sub => Op::I64Sub,
        I::I64Mul => Op::I64Mul,
        I::I64DivS => Op::I64DivS,
        I::I64DivU => Op::I64DivU,
        I::I64RemS => Op::I64RemS,
        I::I64RemU => Op::I64RemU,
        I::I64And => Op::I64And,
        I::I64Or => Op::I64Or,
        I::I64Xor => Op::I64Xor,
        I::I64Shl => Op::I64Shl,
        I::I64ShrS => Op::I64ShrS,
        I::I64ShrU => Op::I64ShrU,
        I::I64Rotl => Op::I64Rotl,
        I::I64Rotr => Op::I64Rotr,
        I::F32Abs => Op::F32Abs,
        I::F32Neg => Op::F32Neg,
        I::F32Ceil => Op::F32Ceil,
        I::F32Floor => Op::F32Floor,
        I::F32Trunc => Op::F32Trunc,
        I::F32Nearest => Op::F32Nearest,
        I::F32Sqrt => Op::F32Sqrt,
        I::F32Add => Op::F32Add,
        I::F32Sub => Op::F32Sub,
        I::F32Mul => Op::F32Mul,
        I::F32Div => Op::F32Div,
        I::F32Min => Op::F32Min,
        I::F32Max => Op::F32Max,
        I::F32Copysign => Op::F32Copysign,
        I::F64Abs => Op::F64Abs,
        I::F64Neg => Op::F64Neg,
        I::F64Ceil => Op::F64Ceil,
        I::F64Floor => Op::F64Floor,
        I::F64Trunc => Op::F64Trunc,
        I::F64Nearest => Op::F64Nearest,
        I::F64Sqrt => Op::F64Sqrt,
        I::F64Add => Op::F64Add,
        I::F64Sub => Op::F64Sub,
        I::F64Mul => Op::F64Mul,
        I::F64Div => Op::F64Div,
        I::F64Min => Op::F64Min,
        I::F64Max => Op::F64Max,
        I::F64Copysign => Op::F64Copysign,
        I::I32WrapI64 => Op::I32WrapI64,
        I::I32TruncF32S => Op::I32TruncF32S,
        I::I32TruncF32U => Op::I32TruncF32U,
        I::I32TruncF64S => Op::I32TruncF64S,
        I::I32TruncF64U => Op::I32TruncF64U,
        I::I64ExtendI32S => Op::I64ExtendI32S,
        I::I64ExtendI32U => Op::I64ExtendI32U,
        I::I64TruncF32S => Op::I64TruncF32S,
        I::I64TruncF32U => Op::I64TruncF32U,
        I::I64TruncF64S => Op::I64TruncF64S,
        I::I64TruncF64U => Op::I64TruncF64U,
        I::F32ConvertI32S => Op::F32ConvertI32S,
        I::F32ConvertI32U => Op::F32ConvertI32U,
        I::F32ConvertI64S => Op::F32ConvertI64S,
        I::F32ConvertI64U => Op::F32ConvertI64U,
        I::F32DemoteF64 => Op::F32DemoteF64,
        I::F64ConvertI32S => Op::F64ConvertI32S,
        I::F64ConvertI32U => Op::F64ConvertI32U,
        I::F64ConvertI64S => Op::F64ConvertI64S,
        I::F64ConvertI64U => Op::F64ConvertI64U,
        I::F64PromoteF32 => Op::F64PromoteF32,
        I::I32ReinterpretF32 => Op::I32ReinterpretF32,
        I::I64ReinterpretF64 => Op::I64ReinterpretF64,
        I::F32ReinterpretI32 => Op::F32ReinterpretI32,
        I::F64ReinterpretI64 => Op::F64ReinterpretI64,
        I::I32Extend8S => Op::I32Extend8S,
        I::I32Extend16S => Op::I32Extend16S,
        I::I64Extend8S => Op::I64Extend8S,
        I::I64Extend16S => Op::I64Extend16S,
        I::I64Extend32S => Op::I64Extend32S,
        I::I32TruncSatF32S => Op::I32TruncSatF32S,
        I::I32TruncSatF32U => Op::I32TruncSatF32U,
        I::I32TruncSatF64S => Op::I32TruncSatF64S,
        I::I32TruncSatF64U => Op::I32TruncSatF64U,
        I::I64TruncSatF32S => Op::I64TruncSatF32S,
        I::I64TruncSatF32U => Op::I64TruncSatF32U,
        I::I64TruncSatF64S => Op::I64TruncSatF64S,
        I::I64TruncSatF64U => Op::I64TruncSatF64U,
        other => unreachable!("instr_to_op called on a structured or immediate-carrying instruction: {other:?}"),
    }
}
