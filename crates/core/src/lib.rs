#![cfg_attr(not(feature = "std"), no_std)]
#![warn(
    clippy::cast_lossless,
    clippy::missing_errors_doc,
    clippy::used_underscore_binding,
    clippy::redundant_closure_for_method_calls
)]

//! Core value representation and numeric semantics shared by the
//! validator, compiler and interpreter crates of `wasm5`.
//!
//! Every runtime value fits into one [`Slot`], a 64-bit cell that stores
//! `i32`/`i64`/`f32`/`f64` by bit pattern and `funcref`/`externref` as a
//! tagged index. This mirrors the single-width operand stack described by
//! the engine's frame layout.

#[cfg(not(feature = "std"))]
extern crate alloc;

mod func_type;
mod limits;
mod slot;
mod trap;
mod value;
pub mod wasm;

pub use self::{
    func_type::FuncType,
    limits::{Pages, PAGE_SIZE},
    slot::Slot,
    trap::TrapCode,
    value::{RefType, ValType},
};
