//! The compiler: validated tree IR in, one flat array of 64-bit cells out.
//!
//! [`compile`] lowers every function body independently into the shared
//! [`CompiledModule::code`] array via [`func::compile_func`]. Structured
//! control flow (`block`/`loop`/`if`) disappears entirely during lowering:
//! what remains is a sequence of [`wasm5_ir::Op`] cells addressed by
//! absolute [`wasm5_ir::CellIndex`], with every branch target resolved or
//! patched before `compile` returns.
//!
//! Compilation never fails: by the time a [`Module`] reaches this stage it
//! has already passed [`crate::validate::validate`], and a well-typed
//! module has no compile-time failure mode left to hit.

mod func;

use crate::{alloc::vec::Vec, module::Module};
use wasm5_core::FuncType;
use wasm5_ir::CellIndex;

/// One defined function's home in the shared [`CompiledModule::code`] array.
#[derive(Debug, Clone)]
pub struct CompiledFunc {
    pub entry: CellIndex,
    pub num_params: u32,
    pub num_locals: u32,
    pub num_results: u32,
    /// Upper bound on the operand-stack depth this function's frame needs,
    /// in slots, not counting params/locals. Used to size the interpreter's
    /// stack reservation so a call never needs to reallocate mid-frame.
    pub max_stack: u32,
    /// Total slots this function's frame occupies in the shared interpreter
    /// stack: `num_params + num_locals + max_stack`. A caller's `frame_offset`
    /// plus this value never exceeds the buffer length it needs to grow to.
    pub frame_size: u32,
    pub sig: FuncType,
}

/// The output of compilation: one shared cell array plus per-function
/// metadata to locate and call into it.
///
/// Global initializers, element segments and data segments are left in
/// their original [`crate::module::ConstExpr`] form — evaluating them
/// requires the host-bound import values a [`crate::Linker`] supplies,
/// which aren't available until instantiation, so [`crate::instance::Instance::new`]
/// evaluates them directly against the source [`Module`].
#[derive(Debug, Clone, Default)]
pub struct CompiledModule {
    pub code: Vec<u64>,
    pub funcs: Vec<CompiledFunc>,
}

pub fn compile(module: &Module) -> Result<CompiledModule, crate::Error> {
    let mut code = Vec::new();
    let mut funcs = Vec::with_capacity(module.funcs.len());

    for decl in &module.funcs {
        let sig = module
            .types
            .get(decl.type_idx as usize)
            .expect("validated module: type index in range")
            .clone();
        let compiled = func::compile_func(module, decl, &sig, &mut code);
        funcs.push(compiled);
    }

    Ok(CompiledModule { code, funcs })
}
