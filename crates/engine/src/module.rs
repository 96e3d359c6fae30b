use crate::alloc::{string::String, sync::Arc, vec::Vec};
use wasm5_core::{FuncType, RefType, ValType};
use wasm5_ir::Instruction;

/// Memory limits in pages (each [`wasm5_core::Pages`] is 64 KiB).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MemoryType {
    pub min: u32,
    pub max: Option<u32>,
}

/// Table limits and element type.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableType {
    pub elem: RefType,
    pub min: u32,
    pub max: Option<u32>,
}

/// A constant-expression initializer: the small subset of instructions
/// legal in global initializers and segment offsets, kept in tree form so
/// [`crate::compile::const_eval`] can interpret it directly.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstExpr {
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    RefNull(RefType),
    RefFunc(u32),
    GlobalGet(u32),
}

#[derive(Debug, Clone)]
pub struct GlobalDecl {
    pub val_type: ValType,
    pub mutable: bool,
    pub init: ConstExpr,
}

#[derive(Debug, Clone)]
pub struct FuncDecl {
    pub type_idx: u32,
    pub locals: Vec<ValType>,
    pub body: Vec<Instruction>,
}

#[derive(Debug, Clone)]
pub enum ElementMode {
    Active { table_idx: u32, offset: ConstExpr },
    Passive,
    Declarative,
}

#[derive(Debug, Clone)]
pub struct ElementSegment {
    pub ty: RefType,
    pub mode: ElementMode,
    /// Resolved function indices (or `None` for a `ref.null` entry) — the
    /// element section only ever contains `ref.func`/`ref.null` items in
    /// the core (non-GC) profile this engine targets.
    pub items: Vec<Option<u32>>,
}

#[derive(Debug, Clone)]
pub enum DataMode {
    Active { mem_idx: u32, offset: ConstExpr },
    Passive,
}

#[derive(Debug, Clone)]
pub struct DataSegment {
    pub mode: DataMode,
    pub bytes: Arc<[u8]>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExternVal {
    Func(u32),
    Table(u32),
    Memory(u32),
    Global(u32),
}

#[derive(Debug, Clone)]
pub struct Import {
    pub module: String,
    pub name: String,
    pub desc: ExternVal,
}

#[derive(Debug, Clone)]
pub struct Export {
    pub name: String,
    pub desc: ExternVal,
}

/// The immutable, in-memory record of a parsed Wasm binary.
///
/// Frozen once parsing completes. Function indices, global indices, etc.
/// range over imports followed by locally-defined items, matching the
/// binary format's index space convention: e.g. `funcs[0..num_imported_funcs]`
/// are (conceptually) the imported functions and the rest are [`FuncDecl`]s
/// with a body, though imported funcs are tracked separately in `imports`
/// and only defined functions occupy `Module::funcs`.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub types: Vec<FuncType>,
    pub imports: Vec<Import>,
    /// Type index for every function in the combined (imports-first) index
    /// space; length equals `num_imported_funcs + funcs.len()`.
    pub func_types: Vec<u32>,
    pub funcs: Vec<FuncDecl>,
    pub tables: Vec<TableType>,
    pub memories: Vec<MemoryType>,
    pub globals: Vec<GlobalDecl>,
    pub elements: Vec<ElementSegment>,
    pub data: Vec<DataSegment>,
    pub exports: Vec<Export>,
    pub start: Option<u32>,
    pub num_imported_funcs: u32,
    pub num_imported_tables: u32,
    pub num_imported_memories: u32,
    pub num_imported_globals: u32,
}

impl Module {
    pub fn num_funcs(&self) -> u32 {
        self.num_imported_funcs + self.funcs.len() as u32
    }

    pub fn num_tables(&self) -> u32 {
        self.num_imported_tables + self.tables.len() as u32
    }

    pub fn num_memories(&self) -> u32 {
        self.num_imported_memories + self.memories.len() as u32
    }

    pub fn num_globals(&self) -> u32 {
        self.num_imported_globals + self.globals.len() as u32
    }

    pub fn func_type(&self, func_idx: u32) -> Option<&FuncType> {
        let type_idx = *self.func_types.get(func_idx as usize)?;
        self.types.get(type_idx as usize)
    }

    /// `true` if `func_idx` names a function declared (or implicitly
    /// referenced) only via the declarative-element/ref.func surface —
    /// used by the constant-expression validator to decide which
    /// `ref.func` targets are legal outside of a `start`-reachable body.
    pub fn is_imported_func(&self, func_idx: u32) -> bool {
        func_idx < self.num_imported_funcs
    }
}
