#![warn(
    clippy::cast_lossless,
    clippy::missing_errors_doc,
    clippy::redundant_closure_for_method_calls
)]

//! `wasm5`: a standalone WebAssembly virtual machine.
//!
//! The engine triad lives in three decoupled modules, matching the data
//! flow `bytes -> parser -> Module -> validate -> compile -> execute`:
//!
//! - [`validate`] type-checks a parsed [`module::Module`] on a per-function
//!   type stack with a polymorphic-unreachable mode.
//! - [`compile`] translates a validated module into a [`compile::CompiledModule`]:
//!   one flat array of 64-bit cells shared by every function.
//! - [`interp`] executes that cell array with a threaded-code dispatch loop
//!   over a slot stack.
//!
//! [`Linker`] and [`instance::Instance`] glue a compiled module to host
//! state (linear memory, tables, globals, imported functions).

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std as alloc;

mod error;
mod global;
mod instance;
mod linker;
mod memory;
mod module;
mod parser;
mod table;

pub mod compile;
pub mod interp;
pub mod validate;

pub use self::{
    error::{Error, LoadError, LoadErrorKind, ValidationError, ValidationErrorKind},
    global::Global,
    instance::Instance,
    linker::{HostFunc, Linker},
    memory::Memory,
    module::{
        ConstExpr, DataSegment, ElementMode, ElementSegment, Export, ExternVal, FuncDecl, GlobalDecl,
        Import, MemoryType, Module, TableType,
    },
    table::Table,
};
pub use wasm5_core::{FuncType, Pages, RefType, Slot, TrapCode, ValType};
pub use wasm5_ir::{BlockType, Instruction};

/// Parses a WebAssembly binary into a [`Module`] tree.
///
/// This is the external "module parser" collaborator described by the
/// engine's scope: it does not validate or compile, it only decodes the
/// binary format (magic, sections, LEB128, instruction trees) into the
/// in-memory shape the validator and compiler consume.
pub fn parse(bytes: &[u8]) -> Result<Module, LoadError> {
    parser::parse(bytes)
}

/// Validates, compiles and instantiates a module against the given
/// [`Linker`] in one call — the common case for a CLI or embedder that
/// does not need the intermediate `CompiledModule` for caching.
pub fn instantiate(bytes: &[u8], linker: &Linker) -> Result<Instance, Error> {
    let module = parse(bytes).map_err(Error::Load)?;
    validate::validate(&module).map_err(Error::Validation)?;
    let compiled = compile::compile(&module)?;
    Instance::new(module, compiled, linker)
}
