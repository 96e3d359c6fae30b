//! The executor: a loop-switch dispatcher over the compiled cell array.
//!
//! Rust gives no guaranteed tail-call optimization, so unlike a
//! threaded-code interpreter in a language with computed `goto`, each
//! function invocation here runs in its own `match`-dispatched loop over a
//! `pc` into the shared code array, and every Wasm call becomes a genuine
//! recursive call into [`call`] — the host's own call stack mirrors the
//! Wasm call stack, bounded by [`MAX_CALL_DEPTH`].

mod executor;

use crate::{alloc::vec::Vec, instance::Instance};
use wasm5_core::{Slot, TrapCode};

/// Recursion guard: a wasm call stack this deep almost certainly means a
/// runaway recursive function rather than legitimate deep nesting.
pub(crate) const MAX_CALL_DEPTH: u32 = 4096;

/// Calls any function in the instance's combined index space — imported or
/// defined — by its module-global function index.
pub(crate) fn call(
    instance: &mut Instance,
    func_idx: u32,
    args: &[Slot],
    depth: u32,
) -> Result<Vec<Slot>, TrapCode> {
    if depth >= MAX_CALL_DEPTH {
        return Err(TrapCode::StackOverflow);
    }
    let num_imported = instance.module().num_imported_funcs;
    if func_idx < num_imported {
        call_import(instance, func_idx, args)
    } else {
        executor::call_local(instance, func_idx - num_imported, args, depth)
    }
}

fn call_import(instance: &mut Instance, import_idx: u32, args: &[Slot]) -> Result<Vec<Slot>, TrapCode> {
    let (_, host) = instance.imported_funcs[import_idx as usize].clone();
    host(args, instance.memories.get_mut(0))
}
