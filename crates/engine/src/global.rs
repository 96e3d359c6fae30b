use wasm5_core::{Slot, ValType};

/// An instance's global variable: one [`Slot`] plus its declared
/// mutability, checked once at instantiation and trusted afterward (the
/// validator already rejects any `global.set` of an immutable global).
#[derive(Debug, Clone, Copy)]
pub struct Global {
    value: Slot,
    val_type: ValType,
    mutable: bool,
}

impl Global {
    pub fn new(val_type: ValType, mutable: bool, value: Slot) -> Self {
        Self { value, val_type, mutable }
    }

    pub fn get(&self) -> Slot {
        self.value
    }

    pub fn set(&mut self, value: Slot) {
        debug_assert!(self.mutable, "validator must reject sets to immutable globals");
        self.value = value;
    }

    pub fn val_type(&self) -> ValType {
        self.val_type
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }
}
