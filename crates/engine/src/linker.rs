use crate::{
    alloc::{string::String, sync::Arc, vec::Vec},
    global::Global,
    memory::Memory,
    table::Table,
};
use wasm5_core::{FuncType, Slot, TrapCode};

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::BTreeMap;

/// A host function bound into a [`Linker`].
///
/// Takes the caller-supplied arguments (already arity- and type-checked
/// against the import's declared [`FuncType`] by the validator), plus the
/// calling instance's linear memory if it has one (`None` for a
/// memory-less module), and returns either the declared number of results
/// or a trap. The memory parameter exists because imports like WASI's
/// `fd_write` address guest memory directly by pointer and length rather
/// than exchanging values on the operand stack.
pub type HostFunc = Arc<dyn Fn(&[Slot], Option<&mut Memory>) -> Result<Vec<Slot>, TrapCode> + Send + Sync>;

#[derive(Clone)]
pub(crate) enum Extern {
    Func(FuncType, HostFunc),
    Memory(Memory),
    Table(Table),
    Global(Global),
}

/// Host-side bindings for a module's imports, keyed by `(module, name)`.
///
/// Mirrors the embedder-API pattern of binding named imports ahead of
/// instantiation rather than threading a fixed-order import list by hand.
#[derive(Default, Clone)]
pub struct Linker {
    pub(crate) externs: BTreeMap<(String, String), Extern>,
}

impl Linker {
    pub fn new() -> Self {
        Self { externs: BTreeMap::new() }
    }

    pub fn define_func(
        &mut self,
        module: impl Into<String>,
        name: impl Into<String>,
        ty: FuncType,
        f: impl Fn(&[Slot], Option<&mut Memory>) -> Result<Vec<Slot>, TrapCode> + Send + Sync + 'static,
    ) {
        self.externs.insert((module.into(), name.into()), Extern::Func(ty, Arc::new(f)));
    }

    pub fn define_memory(&mut self, module: impl Into<String>, name: impl Into<String>, memory: Memory) {
        self.externs.insert((module.into(), name.into()), Extern::Memory(memory));
    }

    pub fn define_table(&mut self, module: impl Into<String>, name: impl Into<String>, table: Table) {
        self.externs.insert((module.into(), name.into()), Extern::Table(table));
    }

    pub fn define_global(&mut self, module: impl Into<String>, name: impl Into<String>, global: Global) {
        self.externs.insert((module.into(), name.into()), Extern::Global(global));
    }

    pub(crate) fn get(&self, module: &str, name: &str) -> Option<&Extern> {
        self.externs.get(&(String::from(module), String::from(name)))
    }
}
