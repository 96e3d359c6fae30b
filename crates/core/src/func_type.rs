use crate::value::ValType;
#[cfg(not(feature = "std"))]
use alloc::{sync::Arc, vec::Vec};
#[cfg(feature = "std")]
use std::sync::Arc;

/// A function signature: an ordered list of parameter types and an ordered
/// list of result types. Cloning is cheap; the parameter/result lists are
/// reference-counted and shared between the type section and every call
/// site that references it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType {
    params: Arc<[ValType]>,
    results: Arc<[ValType]>,
}

impl FuncType {
    pub fn new<P, R>(params: P, results: R) -> Self
    where
        P: IntoIterator<Item = ValType>,
        R: IntoIterator<Item = ValType>,
    {
        Self {
            params: params.into_iter().collect(),
            results: results.into_iter().collect(),
        }
    }

    pub fn params(&self) -> &[ValType] {
        &self.params
    }

    pub fn results(&self) -> &[ValType] {
        &self.results
    }

    /// Two compact 64-bit hashes of this signature, combining parameter and
    /// result arities with the ordered sequence of concrete value types.
    ///
    /// `call_indirect` compares a target's pair against the expected pair
    /// with two integer equalities instead of walking both type lists.
    pub fn signature_hash(&self) -> (u64, u64) {
        (
            hash_side(&self.params),
            hash_side(&self.results),
        )
    }
}

fn hash_side(types: &[ValType]) -> u64 {
    // FNV-1a over (len, then each type's signature byte). Good enough
    // collision resistance for a same-process identity check; this is
    // never persisted or compared across binaries.
    const OFFSET: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;
    let mut hash = OFFSET;
    hash = (hash ^ types.len() as u64).wrapping_mul(PRIME);
    for ty in types {
        hash = (hash ^ u64::from(ty.signature_byte())).wrapping_mul(PRIME);
    }
    hash
}
