use super::{call, MAX_CALL_DEPTH};
use crate::{
    alloc::{sync::Arc, vec::Vec},
    instance::Instance,
};
use wasm5_core::{wasm, Slot, TrapCode};
use wasm5_ir::Op;

/// Invokes a defined (non-imported) function by its local index into
/// [`crate::compile::CompiledModule::funcs`], as a fresh top-level
/// activation (a call entering from outside the interpreter: an exported
/// function invoked by the host, or a call crossing back in from a host
/// import or a different instance via [`super::call`]).
///
/// This is the one place a new stack buffer is allocated. Everything this
/// call transitively calls within the same instance grows the very same
/// buffer in place via [`run`]'s `fp`/`frame_offset` bookkeeping, so a deep
/// call chain costs `resize`/`truncate` on one `Vec`, not one allocation
/// per frame.
pub(crate) fn call_local(
    instance: &mut Instance,
    local_idx: u32,
    args: &[Slot],
    depth: u32,
) -> Result<Vec<Slot>, TrapCode> {
    if depth >= MAX_CALL_DEPTH {
        return Err(TrapCode::StackOverflow);
    }
    let f = instance.compiled().funcs[local_idx as usize].clone();
    let mut stack: Vec<Slot> = Vec::with_capacity(f.frame_size as usize);
    stack.extend_from_slice(args);
    stack.resize((f.num_params + f.num_locals) as usize, Slot::ZERO);

    run(instance, &mut stack, 0, f.entry.as_usize(), depth)?;
    Ok(stack)
}

/// Runs from `pc` until the function's `end` produces its result values
/// (left in `stack` at `fp..fp+num_results`, with `stack` truncated there)
/// or a trap aborts execution.
///
/// `fp` is the absolute index in `stack` where this frame's locals area
/// begins; every `CopySlot`/`SetSp` immediate the compiler emitted, and
/// every local index, is relative to it. A nested `Call` grows `stack` to
/// host the callee's frame immediately above the caller's and recurses into
/// `run` with the new `fp` — the shared buffer never shrinks back until the
/// callee returns, so sibling calls within the same function reuse the same
/// backing allocation instead of requesting a new one.
fn run(
    instance: &mut Instance,
    stack: &mut Vec<Slot>,
    fp: usize,
    pc_start: usize,
    depth: u32,
) -> Result<(), TrapCode> {
    let mut pc = pc_start;
    loop {
        let op = read_op(instance, pc);
        pc += 1;
        match op {
            Op::Entry => {
                pc += 2; // (num_locals, num_args): informational, already applied by the caller.
            }
            Op::End => {
                let num_results = read_u64(instance, pc) as usize;
                let start = stack.len() - num_results;
                for i in 0..num_results {
                    stack[fp + i] = stack[start + i];
                }
                stack.truncate(fp + num_results);
                return Ok(());
            }
            Op::Unreachable => return Err(TrapCode::Unreachable),
            Op::Nop => {}

            Op::Br => {
                pc = read_u64(instance, pc) as usize;
            }
            Op::BrIf => {
                let cond = stack.pop().unwrap().to_bool();
                let nonzero = read_u64(instance, pc) as usize;
                let zero = read_u64(instance, pc + 1) as usize;
                pc = if cond { nonzero } else { zero };
            }
            Op::BrTable => {
                let len = read_u64(instance, pc) as usize;
                let idx = stack.pop().unwrap().to_u32() as usize;
                let slot = if idx < len { idx + 1 } else { 0 };
                pc = read_u64(instance, pc + 1 + slot) as usize;
            }
            Op::Return => {
                unreachable!("`return` lowers to a branch-to-outer-frame sequence, never a bare Op::Return")
            }

            Op::Call => {
                let func_idx = read_u64(instance, pc) as u32;
                let num_params = read_u64(instance, pc + 1) as u32;
                let frame_offset = read_u64(instance, pc + 2) as usize;
                pc += 3;
                if depth + 1 >= MAX_CALL_DEPTH {
                    return Err(TrapCode::StackOverflow);
                }
                let _ = num_params; // args are already in place at `new_fp`; nothing left to move.
                let callee = instance.compiled().funcs[func_idx as usize].clone();
                let new_fp = fp + frame_offset;
                stack.resize(new_fp + (callee.num_params + callee.num_locals) as usize, Slot::ZERO);
                run(instance, stack, new_fp, callee.entry.as_usize(), depth + 1)?;
            }
            Op::CallImport => {
                let import_idx = read_u64(instance, pc) as u32;
                let num_params = read_u64(instance, pc + 1) as u32;
                pc += 2;
                let args_start = stack.len() - num_params as usize;
                let args: Vec<Slot> = stack.split_off(args_start);
                let results = call(instance, import_idx, &args, depth + 1)?;
                stack.extend_from_slice(&results);
            }
            Op::CallIndirect => {
                let sig_lo = read_u64(instance, pc);
                let sig_hi = read_u64(instance, pc + 1);
                let table_idx = read_u64(instance, pc + 2) as usize;
                let num_params = read_u64(instance, pc + 3) as u32;
                let frame_offset = read_u64(instance, pc + 4) as usize;
                pc += 5;
                let elem_idx = stack.pop().unwrap().to_u32();
                let func_idx = resolve_indirect(instance, table_idx, elem_idx, sig_lo, sig_hi)?;
                let num_imported = instance.module().num_imported_funcs;
                if func_idx < num_imported {
                    let args_start = stack.len() - num_params as usize;
                    let args: Vec<Slot> = stack.split_off(args_start);
                    let results = call(instance, func_idx, &args, depth + 1)?;
                    stack.extend_from_slice(&results);
                } else {
                    if depth + 1 >= MAX_CALL_DEPTH {
                        return Err(TrapCode::StackOverflow);
                    }
                    let callee = instance.compiled().funcs[(func_idx - num_imported) as usize].clone();
                    let new_fp = fp + frame_offset;
                    stack.resize(new_fp + (callee.num_params + callee.num_locals) as usize, Slot::ZERO);
                    run(instance, stack, new_fp, callee.entry.as_usize(), depth + 1)?;
                }
            }
            Op::ReturnCall => {
                // A tail call reuses the current frame in place instead of
                // recursing: the args slide down to `fp` and `pc` jumps to
                // the callee's entry, so a tail-recursive Wasm function
                // never grows the host call stack.
                let func_idx = read_u64(instance, pc) as u32;
                let num_params = read_u64(instance, pc + 1) as u32;
                let args_start = stack.len() - num_params as usize;
                for i in 0..num_params as usize {
                    stack[fp + i] = stack[args_start + i];
                }
                let callee = instance.compiled().funcs[func_idx as usize].clone();
                stack.resize(fp + (callee.num_params + callee.num_locals) as usize, Slot::ZERO);
                pc = callee.entry.as_usize();
            }
            Op::ReturnCallIndirect => {
                let sig_lo = read_u64(instance, pc);
                let sig_hi = read_u64(instance, pc + 1);
                let table_idx = read_u64(instance, pc + 2) as usize;
                let num_params = read_u64(instance, pc + 3) as u32;
                let elem_idx = stack.pop().unwrap().to_u32();
                let func_idx = resolve_indirect(instance, table_idx, elem_idx, sig_lo, sig_hi)?;
                let num_imported = instance.module().num_imported_funcs;
                let args_start = stack.len() - num_params as usize;
                if func_idx < num_imported {
                    let args: Vec<Slot> = stack[args_start..].to_vec();
                    let results = call(instance, func_idx, &args, depth + 1)?;
                    stack.truncate(fp);
                    stack.extend_from_slice(&results);
                    return Ok(());
                }
                for i in 0..num_params as usize {
                    stack[fp + i] = stack[args_start + i];
                }
                let callee = instance.compiled().funcs[(func_idx - num_imported) as usize].clone();
                stack.resize(fp + (callee.num_params + callee.num_locals) as usize, Slot::ZERO);
                pc = callee.entry.as_usize();
            }

            Op::CopySlot => {
                let dst = fp + read_u64(instance, pc) as usize;
                let src = fp + read_u64(instance, pc + 1) as usize;
                pc += 2;
                stack[dst] = stack[src];
            }
            Op::SetSp => {
                let new_len = fp + read_u64(instance, pc) as usize;
                pc += 1;
                stack.truncate(new_len);
            }

            Op::Drop => {
                stack.pop();
            }
            Op::Select => {
                let cond = stack.pop().unwrap().to_bool();
                let v2 = stack.pop().unwrap();
                let v1 = stack.pop().unwrap();
                stack.push(if cond { v1 } else { v2 });
            }

            Op::LocalGet => {
                let idx = fp + read_u64(instance, pc) as usize;
                pc += 1;
                stack.push(stack[idx]);
            }
            Op::LocalSet => {
                let idx = fp + read_u64(instance, pc) as usize;
                pc += 1;
                stack[idx] = stack.pop().unwrap();
            }
            Op::LocalTee => {
                let idx = fp + read_u64(instance, pc) as usize;
                pc += 1;
                stack[idx] = *stack.last().unwrap();
            }
            Op::GlobalGet => {
                let idx = read_u64(instance, pc) as usize;
                pc += 1;
                stack.push(instance.globals[idx].get());
            }
            Op::GlobalSet => {
                let idx = read_u64(instance, pc) as usize;
                pc += 1;
                let v = stack.pop().unwrap();
                instance.globals[idx].set(v);
            }

            Op::RefNull => {
                pc += 1;
                stack.push(Slot::NULL);
            }
            Op::RefIsNull => {
                let v = stack.pop().unwrap();
                stack.push(Slot::from_bool(v.is_null_ref()));
            }
            Op::RefFunc => {
                let idx = read_u64(instance, pc) as u32;
                pc += 1;
                stack.push(Slot::from_ref_index(Some(idx)));
            }

            Op::TableGet => {
                let t = read_u64(instance, pc) as usize;
                pc += 1;
                let idx = stack.pop().unwrap().to_u32();
                let v = instance.tables[t].get(idx)?;
                stack.push(Slot::from_ref_index(v));
            }
            Op::TableSet => {
                let t = read_u64(instance, pc) as usize;
                pc += 1;
                let v = stack.pop().unwrap().as_ref_index();
                let idx = stack.pop().unwrap().to_u32();
                instance.tables[t].set(idx, v)?;
            }
            Op::TableSize => {
                let t = read_u64(instance, pc) as usize;
                pc += 1;
                stack.push(Slot::from_u32(instance.tables[t].size()));
            }
            Op::TableGrow => {
                let t = read_u64(instance, pc) as usize;
                pc += 1;
                let delta = stack.pop().unwrap().to_u32();
                let init = stack.pop().unwrap().as_ref_index();
                let result = instance.tables[t].grow(delta, init).map_or(u32::MAX, |old| old);
                stack.push(Slot::from_u32(result));
            }
            Op::TableFill => {
                let t = read_u64(instance, pc) as usize;
                pc += 1;
                let len = stack.pop().unwrap().to_u32();
                let value = stack.pop().unwrap().as_ref_index();
                let idx = stack.pop().unwrap().to_u32();
                instance.tables[t].fill(idx, value, len)?;
            }
            Op::TableCopy => {
                let dst_t = read_u64(instance, pc) as usize;
                let src_t = read_u64(instance, pc + 1) as usize;
                pc += 2;
                let len = stack.pop().unwrap().to_u32();
                let src = stack.pop().unwrap().to_u32();
                let dst = stack.pop().unwrap().to_u32();
                if dst_t == src_t {
                    instance.tables[dst_t].copy_within(dst, src, len)?;
                } else {
                    let (lo, hi) = if dst_t < src_t { (dst_t, src_t) } else { (src_t, dst_t) };
                    let (left, right) = instance.tables.split_at_mut(hi);
                    let (a, b) = (&mut left[lo], &mut right[0]);
                    if dst_t < src_t {
                        crate::table::Table::copy_between(a, dst, b, src, len)?;
                    } else {
                        crate::table::Table::copy_between(b, dst, a, src, len)?;
                    }
                }
            }
            Op::TableInit => {
                let t = read_u64(instance, pc) as usize;
                let e = read_u64(instance, pc + 1) as usize;
                pc += 2;
                let len = stack.pop().unwrap().to_u32();
                let src = stack.pop().unwrap().to_u32();
                let dst = stack.pop().unwrap().to_u32();
                if len == 0 {
                    // A vacuous init never touches the segment, so a
                    // declarative or already-dropped segment doesn't trap —
                    // `dst` itself is still bounds-checked.
                    instance.tables[t].init_from(dst, &[], 0, 0)?;
                } else {
                    let items = instance.elements[e].clone().ok_or(TrapCode::UninitializedElement)?;
                    instance.tables[t].init_from(dst, &items, src, len)?;
                }
            }
            Op::ElemDrop => {
                let e = read_u64(instance, pc) as usize;
                pc += 1;
                // Same reasoning as `DataDrop`: keep the slot present but
                // empty so a later zero-length `table.init` is a no-op.
                instance.elements[e] = Some(Vec::new());
            }

            Op::I32Load => load(instance, stack, &mut pc, 4, |b| Slot::from_i32(i32::from_le_bytes(b.try_into().unwrap())))?,
            Op::I64Load => load(instance, stack, &mut pc, 8, |b| Slot::from_i64(i64::from_le_bytes(b.try_into().unwrap())))?,
            Op::F32Load => load(instance, stack, &mut pc, 4, |b| Slot::from_f32(f32::from_le_bytes(b.try_into().unwrap())))?,
            Op::F64Load => load(instance, stack, &mut pc, 8, |b| Slot::from_f64(f64::from_le_bytes(b.try_into().unwrap())))?,
            Op::I32Load8S => load(instance, stack, &mut pc, 1, |b| Slot::from_i32(b[0] as i8 as i32))?,
            Op::I32Load8U => load(instance, stack, &mut pc, 1, |b| Slot::from_i32(b[0] as i32))?,
            Op::I32Load16S => load(instance, stack, &mut pc, 2, |b| Slot::from_i32(i16::from_le_bytes(b.try_into().unwrap()) as i32))?,
            Op::I32Load16U => load(instance, stack, &mut pc, 2, |b| Slot::from_i32(u16::from_le_bytes(b.try_into().unwrap()) as i32))?,
            Op::I64Load8S => load(instance, stack, &mut pc, 1, |b| Slot::from_i64(b[0] as i8 as i64))?,
            Op::I64Load8U => load(instance, stack, &mut pc, 1, |b| Slot::from_i64(b[0] as i64))?,
            Op::I64Load16S => load(instance, stack, &mut pc, 2, |b| Slot::from_i64(i16::from_le_bytes(b.try_into().unwrap()) as i64))?,
            Op::I64Load16U => load(instance, stack, &mut pc, 2, |b| Slot::from_i64(u16::from_le_bytes(b.try_into().unwrap()) as i64))?,
            Op::I64Load32S => load(instance, stack, &mut pc, 4, |b| Slot::from_i64(i32::from_le_bytes(b.try_into().unwrap()) as i64))?,
            Op::I64Load32U => load(instance, stack, &mut pc, 4, |b| Slot::from_i64(u32::from_le_bytes(b.try_into().unwrap()) as i64))?,

            Op::I32Store => store(instance, stack, &mut pc, |v| v.to_i32().to_le_bytes().to_vec())?,
            Op::I64Store => store(instance, stack, &mut pc, |v| v.to_i64().to_le_bytes().to_vec())?,
            Op::F32Store => store(instance, stack, &mut pc, |v| v.to_f32().to_le_bytes().to_vec())?,
            Op::F64Store => store(instance, stack, &mut pc, |v| v.to_f64().to_le_bytes().to_vec())?,
            Op::I32Store8 => store(instance, stack, &mut pc, |v| alloc::vec![v.to_i32() as u8])?,
            Op::I32Store16 => store(instance, stack, &mut pc, |v| (v.to_i32() as u16).to_le_bytes().to_vec())?,
            Op::I64Store8 => store(instance, stack, &mut pc, |v| alloc::vec![v.to_i64() as u8])?,
            Op::I64Store16 => store(instance, stack, &mut pc, |v| (v.to_i64() as u16).to_le_bytes().to_vec())?,
            Op::I64Store32 => store(instance, stack, &mut pc, |v| (v.to_i64() as u32).to_le_bytes().to_vec())?,

            Op::MemorySize => stack.push(Slot::from_u32(instance.memories[0].size_pages())),
            Op::MemoryGrow => {
                let delta = stack.pop().unwrap().to_u32();
                let result = instance.memories[0].grow(delta).map_or(u32::MAX, |old| old);
                stack.push(Slot::from_u32(result));
            }
            Op::MemoryFill => {
                let len = stack.pop().unwrap().to_u32() as usize;
                let value = stack.pop().unwrap().to_i32() as u8;
                let addr = stack.pop().unwrap().to_u32() as u64;
                instance.memories[0].fill(addr, value, len)?;
            }
            Op::MemoryCopy => {
                let len = stack.pop().unwrap().to_u32() as usize;
                let src = stack.pop().unwrap().to_u32() as u64;
                let dst = stack.pop().unwrap().to_u32() as u64;
                instance.memories[0].copy_within(dst, src, len)?;
            }
            Op::MemoryInit => {
                let d = read_u64(instance, pc) as usize;
                pc += 1;
                let len = stack.pop().unwrap().to_u32() as usize;
                let src = stack.pop().unwrap().to_u32() as usize;
                let dst = stack.pop().unwrap().to_u32() as u64;
                if len == 0 {
                    // A vacuous init never touches the segment, so a
                    // dropped segment doesn't trap — `dst` itself is still
                    // bounds-checked.
                    instance.memories[0].write(dst, &[])?;
                } else {
                    let bytes = instance.data[d].clone().ok_or(TrapCode::MemoryOutOfBounds)?;
                    let slice = bytes.get(src..src + len).ok_or(TrapCode::MemoryOutOfBounds)?;
                    instance.memories[0].write(dst, slice)?;
                }
            }
            Op::DataDrop => {
                let d = read_u64(instance, pc) as usize;
                pc += 1;
                // Replace with an empty segment rather than clearing the
                // slot: the segment count stays stable and a later
                // zero-length `memory.init` of it is a no-op, not a trap.
                instance.data[d] = Some(Arc::from(&[][..]));
            }

            Op::I32Const => {
                let v = read_u64(instance, pc) as u32 as i32;
                pc += 1;
                stack.push(Slot::from_i32(v));
            }
            Op::I64Const => {
                let v = read_u64(instance, pc) as i64;
                pc += 1;
                stack.push(Slot::from_i64(v));
            }
            Op::F32Const => {
                let bits = read_u64(instance, pc) as u32;
                pc += 1;
                stack.push(Slot::from_f32(f32::from_bits(bits)));
            }
            Op::F64Const => {
                let bits = read_u64(instance, pc);
                pc += 1;
                stack.push(Slot::from_f64(f64::from_bits(bits)));
            }

            other => numeric(other, stack)?,
        }
    }
}

fn read_op(instance: &Instance, pc: usize) -> Op {
    // SAFETY-free by construction: `pc` only ever comes from the compiler's
    // own emitted offsets or from backpatched branch targets, both always
    // in range for a successfully compiled module.
    let cell = instance.compiled().code[pc];
    op_from_u64(cell)
}

fn read_u64(instance: &Instance, pc: usize) -> u64 {
    instance.compiled().code[pc]
}

fn op_from_u64(v: u64) -> Op {
    // `Op` is `#[repr(u32)]` with no gaps in the compiler's emitted range;
    // transmuting a value that didn't come from `Op as u64` is the one way
    // to violate this, and nothing in this crate does.
    unsafe { core::mem::transmute::<u32, Op>(v as u32) }
}

fn resolve_indirect(
    instance: &Instance,
    table_idx: usize,
    elem_idx: u32,
    sig_lo: u64,
    sig_hi: u64,
) -> Result<u32, TrapCode> {
    let func_idx = instance.tables[table_idx].get(elem_idx)?.ok_or(TrapCode::NullReference)?;
    let (actual_lo, actual_hi) = signature_of(instance, func_idx);
    if (actual_lo, actual_hi) != (sig_lo, sig_hi) {
        return Err(TrapCode::IndirectCallTypeMismatch);
    }
    Ok(func_idx)
}

fn signature_of(instance: &Instance, func_idx: u32) -> (u64, u64) {
    let num_imported = instance.module().num_imported_funcs;
    if func_idx < num_imported {
        instance.imported_funcs[func_idx as usize].0.signature_hash()
    } else {
        instance.compiled().funcs[(func_idx - num_imported) as usize].sig.signature_hash()
    }
}

fn load(
    instance: &mut Instance,
    stack: &mut Vec<Slot>,
    pc: &mut usize,
    width: usize,
    decode: impl Fn(&[u8]) -> Slot,
) -> Result<(), TrapCode> {
    let _align = read_u64(instance, *pc);
    let offset = read_u64(instance, *pc + 1);
    let mem_idx = read_u64(instance, *pc + 2) as usize;
    *pc += 3;
    let addr = stack.pop().unwrap().to_u32() as u64;
    let effective = addr.checked_add(offset).ok_or(TrapCode::MemoryOutOfBounds)?;
    let bytes = instance.memories[mem_idx].read(effective, width)?;
    stack.push(decode(bytes));
    Ok(())
}

fn store(
    instance: &mut Instance,
    stack: &mut Vec<Slot>,
    pc: &mut usize,
    encode: impl Fn(Slot) -> Vec<u8>,
) -> Result<(), TrapCode> {
    let _align = read_u64(instance, *pc);
    let offset = read_u64(instance, *pc + 1);
    let mem_idx = read_u64(instance, *pc + 2) as usize;
    *pc += 3;
    let value = stack.pop().unwrap();
    let addr = stack.pop().unwrap().to_u32() as u64;
    let effective = addr.checked_add(offset).ok_or(TrapCode::MemoryOutOfBounds)?;
    let bytes = encode(value);
    instance.memories[mem_idx].write(effective, &bytes)
}

/// Dispatches the pure-arithmetic opcodes (no immediates, fixed pop/push
/// arity) straight into [`wasm5_core::wasm`].
fn numeric(op: Op, stack: &mut Vec<Slot>) -> Result<(), TrapCode> {
    macro_rules! unop_i32 {
        ($f:path) => {{
            let v = stack.pop().unwrap().to_i32();
            stack.push(Slot::from_i32($f(v)));
        }};
    }
    macro_rules! unop_i64 {
        ($f:path) => {{
            let v = stack.pop().unwrap().to_i64();
            stack.push(Slot::from_i64($f(v)));
        }};
    }
    macro_rules! unop_f32 {
        ($f:path) => {{
            let v = stack.pop().unwrap().to_f32();
            stack.push(Slot::from_f32($f(v)));
        }};
    }
    macro_rules! unop_f64 {
        ($f:path) => {{
            let v = stack.pop().unwrap().to_f64();
            stack.push(Slot::from_f64($f(v)));
        }};
    }
    macro_rules! binop_i32 {
        ($f:path) => {{
            let rhs = stack.pop().unwrap().to_i32();
            let lhs = stack.pop().unwrap().to_i32();
            stack.push(Slot::from_i32($f(lhs, rhs)));
        }};
    }
    macro_rules! binop_i64 {
        ($f:path) => {{
            let rhs = stack.pop().unwrap().to_i64();
            let lhs = stack.pop().unwrap().to_i64();
            stack.push(Slot::from_i64($f(lhs, rhs)));
        }};
    }
    macro_rules! binop_f32 {
        ($f:path) => {{
            let rhs = stack.pop().unwrap().to_f32();
            let lhs = stack.pop().unwrap().to_f32();
            stack.push(Slot::from_f32($f(lhs, rhs)));
        }};
    }
    macro_rules! binop_f64 {
        ($f:path) => {{
            let rhs = stack.pop().unwrap().to_f64();
            let lhs = stack.pop().unwrap().to_f64();
            stack.push(Slot::from_f64($f(lhs, rhs)));
        }};
    }
    macro_rules! cmp_i32 {
        ($op:tt, $cast:ty) => {{
            let rhs = stack.pop().unwrap().to_i32() as $cast;
            let lhs = stack.pop().unwrap().to_i32() as $cast;
            stack.push(Slot::from_bool(lhs $op rhs));
        }};
    }
    macro_rules! cmp_i64 {
        ($op:tt, $cast:ty) => {{
            let rhs = stack.pop().unwrap().to_i64() as $cast;
            let lhs = stack.pop().unwrap().to_i64() as $cast;
            stack.push(Slot::from_bool(lhs $op rhs));
        }};
    }
    macro_rules! cmp_f32 {
        ($op:tt) => {{
            let rhs = stack.pop().unwrap().to_f32();
            let lhs = stack.pop().unwrap().to_f32();
            stack.push(Slot::from_bool(lhs $op rhs));
        }};
    }
    macro_rules! cmp_f64 {
        ($op:tt) => {{
            let rhs = stack.pop().unwrap().to_f64();
            let lhs = stack.pop().unwrap().to_f64();
            stack.push(Slot::from_bool(lhs $op rhs));
        }};
    }
    macro_rules! try_unop {
        ($to:ident, $from:ident, $f:path) => {{
            let v = stack.pop().unwrap().$to();
            stack.push(Slot::$from($f(v)?));
        }};
    }

    match op {
        Op::I32Eqz => {
            let v = stack.pop().unwrap().to_i32();
            stack.push(Slot::from_bool(v == 0));
        }
        Op::I64Eqz => {
            let v = stack.pop().unwrap().to_i64();
            stack.push(Slot::from_bool(v == 0));
        }
        Op::I32Eq => cmp_i32!(==, i32),
        Op::I32Ne => cmp_i32!(!=, i32),
        Op::I32LtS => cmp_i32!(<, i32),
        Op::I32LtU => cmp_i32!(<, u32),
        Op::I32GtS => cmp_i32!(>, i32),
        Op::I32GtU => cmp_i32!(>, u32),
        Op::I32LeS => cmp_i32!(<=, i32),
        Op::I32LeU => cmp_i32!(<=, u32),
        Op::I32GeS => cmp_i32!(>=, i32),
        Op::I32GeU => cmp_i32!(>=, u32),
        Op::I64Eq => cmp_i64!(==, i64),
        Op::I64Ne => cmp_i64!(!=, i64),
        Op::I64LtS => cmp_i64!(<, i64),
        Op::I64LtU => cmp_i64!(<, u64),
        Op::I64GtS => cmp_i64!(>, i64),
        Op::I64GtU => cmp_i64!(>, u64),
        Op::I64LeS => cmp_i64!(<=, i64),
        Op::I64LeU => cmp_i64!(<=, u64),
        Op::I64GeS => cmp_i64!(>=, i64),
        Op::I64GeU => cmp_i64!(>=, u64),
        Op::F32Eq => cmp_f32!(==),
        Op::F32Ne => cmp_f32!(!=),
        Op::F32Lt => cmp_f32!(<),
        Op::F32Gt => cmp_f32!(>),
        Op::F32Le => cmp_f32!(<=),
        Op::F32Ge => cmp_f32!(>=),
        Op::F64Eq => cmp_f64!(==),
        Op::F64Ne => cmp_f64!(!=),
        Op::F64Lt => cmp_f64!(<),
        Op::F64Gt => cmp_f64!(>),
        Op::F64Le => cmp_f64!(<=),
        Op::F64Ge => cmp_f64!(>=),

        Op::I32Clz => unop_i32!(wasm::i32_clz),
        Op::I32Ctz => unop_i32!(wasm::i32_ctz),
        Op::I32Popcnt => unop_i32!(wasm::i32_popcnt),
        Op::I32Add => binop_i32!(wasm::i32_add),
        Op::I32Sub => binop_i32!(wasm::i32_sub),
        Op::I32Mul => binop_i32!(wasm::i32_mul),
        Op::I32DivS => try_unop_bin_i32(stack, wasm::i32_div_s)?,
        Op::I32DivU => try_unop_bin_i32(stack, wasm::i32_div_u)?,
        Op::I32RemS => try_unop_bin_i32(stack, wasm::i32_rem_s)?,
        Op::I32RemU => try_unop_bin_i32(stack, wasm::i32_rem_u)?,
        Op::I32And => binop_i32!(wasm::i32_and),
        Op::I32Or => binop_i32!(wasm::i32_or),
        Op::I32Xor => binop_i32!(wasm::i32_xor),
        Op::I32Shl => binop_i32!(wasm::i32_shl),
        Op::I32ShrS => binop_i32!(wasm::i32_shr_s),
        Op::I32ShrU => binop_i32!(wasm::i32_shr_u),
        Op::I32Rotl => binop_i32!(wasm::i32_rotl),
        Op::I32Rotr => binop_i32!(wasm::i32_rotr),

        Op::I64Clz => unop_i64!(wasm::i64_clz),
        Op::I64Ctz => unop_i64!(wasm::i64_ctz),
        Op::I64Popcnt => unop_i64!(wasm::i64_popcnt),
        Op::I64Add => binop_i64!(wasm::i64_add),
        Op::I64Sub => binop_i64!(wasm::i64_sub),
        Op::I64Mul => binop_i64!(wasm::i64_mul),
        Op::I64DivS => try_unop_bin_i64(stack, wasm::i64_div_s)?,
        Op::I64DivU => try_unop_bin_i64(stack, wasm::i64_div_u)?,
        Op::I64RemS => try_unop_bin_i64(stack, wasm::i64_rem_s)?,
        Op::I64RemU => try_unop_bin_i64(stack, wasm::i64_rem_u)?,
        Op::I64And => binop_i64!(wasm::i64_and),
        Op::I64Or => binop_i64!(wasm::i64_or),
        Op::I64Xor => binop_i64!(wasm::i64_xor),
        Op::I64Shl => binop_i64!(wasm::i64_shl),
        Op::I64ShrS => binop_i64!(wasm::i64_shr_s),
        Op::I64ShrU => binop_i64!(wasm::i64_shr_u),
        Op::I64Rotl => binop_i64!(wasm::i64_rotl),
        Op::I64Rotr => binop_i64!(wasm::i64_rotr),

        Op::F32Abs => unop_f32!(wasm::f32_abs),
        Op::F32Neg => unop_f32!(wasm::f32_neg),
        Op::F32Ceil => unop_f32!(wasm::f32_ceil),
        Op::F32Floor => unop_f32!(wasm::f32_floor),
        Op::F32Trunc => unop_f32!(wasm::f32_trunc),
        Op::F32Nearest => unop_f32!(wasm::f32_nearest),
        Op::F32Sqrt => unop_f32!(wasm::f32_sqrt),
        Op::F32Add => binop_f32!(wasm::f32_add),
        Op::F32Sub => binop_f32!(wasm::f32_sub),
        Op::F32Mul => binop_f32!(wasm::f32_mul),
        Op::F32Div => binop_f32!(wasm::f32_div),
        Op::F32Min => binop_f32!(wasm::f32_min),
        Op::F32Max => binop_f32!(wasm::f32_max),
        Op::F32Copysign => binop_f32!(wasm::f32_copysign),

        Op::F64Abs => unop_f64!(wasm::f64_abs),
        Op::F64Neg => unop_f64!(wasm::f64_neg),
        Op::F64Ceil => unop_f64!(wasm::f64_ceil),
        Op::F64Floor => unop_f64!(wasm::f64_floor),
        Op::F64Trunc => unop_f64!(wasm::f64_trunc),
        Op::F64Nearest => unop_f64!(wasm::f64_nearest),
        Op::F64Sqrt => unop_f64!(wasm::f64_sqrt),
        Op::F64Add => binop_f64!(wasm::f64_add),
        Op::F64Sub => binop_f64!(wasm::f64_sub),
        Op::F64Mul => binop_f64!(wasm::f64_mul),
        Op::F64Div => binop_f64!(wasm::f64_div),
        Op::F64Min => binop_f64!(wasm::f64_min),
        Op::F64Max => binop_f64!(wasm::f64_max),
        Op::F64Copysign => binop_f64!(wasm::f64_copysign),

        Op::I32WrapI64 => {
            let v = stack.pop().unwrap().to_i64();
            stack.push(Slot::from_i32(v as i32));
        }
        Op::I32TruncF32S => try_unop!(to_f32, from_i32, wasm::i32_trunc_f32_s),
        Op::I32TruncF32U => try_unop!(to_f32, from_i32, wasm::i32_trunc_f32_u),
        Op::I32TruncF64S => try_unop!(to_f64, from_i32, wasm::i32_trunc_f64_s),
        Op::I32TruncF64U => try_unop!(to_f64, from_i32, wasm::i32_trunc_f64_u),
        Op::I64ExtendI32S => unop_i32_to_i64(stack, wasm::i64_extend_i32_s),
        Op::I64ExtendI32U => unop_i32_to_i64(stack, wasm::i64_extend_i32_u),
        Op::I64TruncF32S => try_unop!(to_f32, from_i64, wasm::i64_trunc_f32_s),
        Op::I64TruncF32U => try_unop!(to_f32, from_i64, wasm::i64_trunc_f32_u),
        Op::I64TruncF64S => try_unop!(to_f64, from_i64, wasm::i64_trunc_f64_s),
        Op::I64TruncF64U => try_unop!(to_f64, from_i64, wasm::i64_trunc_f64_u),
        Op::F32ConvertI32S => convert(stack, wasm::f32_convert_i32_s, Slot::to_i32, Slot::from_f32),
        Op::F32ConvertI32U => convert(stack, wasm::f32_convert_i32_u, Slot::to_i32, Slot::from_f32),
        Op::F32ConvertI64S => convert(stack, wasm::f32_convert_i64_s, Slot::to_i64, Slot::from_f32),
        Op::F32ConvertI64U => convert(stack, wasm::f32_convert_i64_u, Slot::to_i64, Slot::from_f32),
        Op::F32DemoteF64 => convert(stack, wasm::f32_demote_f64, Slot::to_f64, Slot::from_f32),
        Op::F64ConvertI32S => convert(stack, wasm::f64_convert_i32_s, Slot::to_i32, Slot::from_f64),
        Op::F64ConvertI32U => convert(stack, wasm::f64_convert_i32_u, Slot::to_i32, Slot::from_f64),
        Op::F64ConvertI64S => convert(stack, wasm::f64_convert_i64_s, Slot::to_i64, Slot::from_f64),
        Op::F64ConvertI64U => convert(stack, wasm::f64_convert_i64_u, Slot::to_i64, Slot::from_f64),
        Op::F64PromoteF32 => convert(stack, wasm::f64_promote_f32, Slot::to_f32, Slot::from_f64),
        Op::I32ReinterpretF32 => {
            let v = stack.pop().unwrap().to_f32();
            stack.push(Slot::from_i32(v.to_bits() as i32));
        }
        Op::I64ReinterpretF64 => {
            let v = stack.pop().unwrap().to_f64();
            stack.push(Slot::from_i64(v.to_bits() as i64));
        }
        Op::F32ReinterpretI32 => {
            let v = stack.pop().unwrap().to_i32();
            stack.push(Slot::from_f32(f32::from_bits(v as u32)));
        }
        Op::F64ReinterpretI64 => {
            let v = stack.pop().unwrap().to_i64();
            stack.push(Slot::from_f64(f64::from_bits(v as u64)));
        }
        Op::I32Extend8S => unop_i32!(wasm::i32_extend8_s),
        Op::I32Extend16S => unop_i32!(wasm::i32_extend16_s),
        Op::I64Extend8S => unop_i64!(wasm::i64_extend8_s),
        Op::I64Extend16S => unop_i64!(wasm::i64_extend16_s),
        Op::I64Extend32S => unop_i64!(wasm::i64_extend32_s),
        Op::I32TruncSatF32S => convert(stack, wasm::i32_trunc_sat_f32_s, Slot::to_f32, Slot::from_i32),
        Op::I32TruncSatF32U => convert(stack, wasm::i32_trunc_sat_f32_u, Slot::to_f32, Slot::from_i32),
        Op::I32TruncSatF64S => convert(stack, wasm::i32_trunc_sat_f64_s, Slot::to_f64, Slot::from_i32),
        Op::I32TruncSatF64U => convert(stack, wasm::i32_trunc_sat_f64_u, Slot::to_f64, Slot::from_i32),
        Op::I64TruncSatF32S => convert(stack, wasm::i64_trunc_sat_f32_s, Slot::to_f32, Slot::from_i64),
        Op::I64TruncSatF32U => convert(stack, wasm::i64_trunc_sat_f32_u, Slot::to_f32, Slot::from_i64),
        Op::I64TruncSatF64S => convert(stack, wasm::i64_trunc_sat_f64_s, Slot::to_f64, Slot::from_i64),
        Op::I64TruncSatF64U => convert(stack, wasm::i64_trunc_sat_f64_u, Slot::to_f64, Slot::from_i64),

        _ => unreachable!("opcode with immediates dispatched through the numeric fallback"),
    }
    Ok(())
}

fn try_unop_bin_i32(stack: &mut Vec<Slot>, f: impl Fn(i32, i32) -> Result<i32, TrapCode>) -> Result<(), TrapCode> {
    let rhs = stack.pop().unwrap().to_i32();
    let lhs = stack.pop().unwrap().to_i32();
    stack.push(Slot::from_i32(f(lhs, rhs)?));
    Ok(())
}

fn try_unop_bin_i64(stack: &mut Vec<Slot>, f: impl Fn(i64, i64) -> Result<i64, TrapCode>) -> Result<(), TrapCode> {
    let rhs = stack.pop().unwrap().to_i64();
    let lhs = stack.pop().unwrap().to_i64();
    stack.push(Slot::from_i64(f(lhs, rhs)?));
    Ok(())
}

fn unop_i32_to_i64(stack: &mut Vec<Slot>, f: impl Fn(i32) -> i64) {
    let v = stack.pop().unwrap().to_i32();
    stack.push(Slot::from_i64(f(v)));
}

fn convert<T, U>(stack: &mut Vec<Slot>, f: impl Fn(T) -> U, from: impl Fn(Slot) -> T, to: impl Fn(U) -> Slot) {
    let v = from(stack.pop().unwrap());
    stack.push(to(f(v)));
}
