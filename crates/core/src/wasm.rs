//! Pure numeric semantics for Wasm instructions.
//!
//! Handlers in the interpreter crate decode operands out of [`crate::Slot`]s
//! and call straight into these functions; keeping the arithmetic here,
//! free of stack/frame concerns, makes it straightforward to unit test the
//! corner cases (division traps, saturating conversions, NaN propagation)
//! without standing up an executor.

use crate::TrapCode;

macro_rules! int_binop {
    ($name:ident, $ty:ty, $op:ident) => {
        #[inline]
        pub fn $name(lhs: $ty, rhs: $ty) -> $ty {
            lhs.$op(rhs)
        }
    };
}

int_binop!(i32_add, i32, wrapping_add);
int_binop!(i32_sub, i32, wrapping_sub);
int_binop!(i32_mul, i32, wrapping_mul);
int_binop!(i64_add, i64, wrapping_add);
int_binop!(i64_sub, i64, wrapping_sub);
int_binop!(i64_mul, i64, wrapping_mul);

macro_rules! bitop {
    ($name:ident, $ty:ty, $op:tt) => {
        #[inline]
        pub fn $name(lhs: $ty, rhs: $ty) -> $ty {
            lhs $op rhs
        }
    };
}

bitop!(i32_and, i32, &);
bitop!(i32_or, i32, |);
bitop!(i32_xor, i32, ^);
bitop!(i64_and, i64, &);
bitop!(i64_or, i64, |);
bitop!(i64_xor, i64, ^);

macro_rules! int_shift {
    ($name:ident, $ty:ty, $mask:expr, $op:ident) => {
        #[inline]
        pub fn $name(lhs: $ty, rhs: $ty) -> $ty {
            lhs.$op((rhs as u32) & $mask)
        }
    };
}

int_shift!(i32_shl, i32, 31, wrapping_shl);
int_shift!(i32_shr_s, i32, 31, wrapping_shr);
int_shift!(i32_rotl, i32, 31, rotate_left);
int_shift!(i32_rotr, i32, 31, rotate_right);
int_shift!(i64_shl, i64, 63, wrapping_shl);
int_shift!(i64_shr_s, i64, 63, wrapping_shr);
int_shift!(i64_rotl, i64, 63, rotate_left);
int_shift!(i64_rotr, i64, 63, rotate_right);

pub fn i32_shr_u(lhs: i32, rhs: i32) -> i32 {
    ((lhs as u32).wrapping_shr((rhs as u32) & 31)) as i32
}
pub fn i64_shr_u(lhs: i64, rhs: i64) -> i64 {
    ((lhs as u64).wrapping_shr((rhs as u32) & 63)) as i64
}

pub fn i32_clz(value: i32) -> i32 {
    value.leading_zeros() as i32
}
pub fn i32_ctz(value: i32) -> i32 {
    value.trailing_zeros() as i32
}
pub fn i32_popcnt(value: i32) -> i32 {
    value.count_ones() as i32
}
pub fn i64_clz(value: i64) -> i64 {
    value.leading_zeros() as i64
}
pub fn i64_ctz(value: i64) -> i64 {
    value.trailing_zeros() as i64
}
pub fn i64_popcnt(value: i64) -> i64 {
    value.count_ones() as i64
}

pub fn i32_div_s(lhs: i32, rhs: i32) -> Result<i32, TrapCode> {
    if rhs == 0 {
        return Err(TrapCode::DivisionByZero);
    }
    lhs.checked_div(rhs).ok_or(TrapCode::IntegerOverflow)
}
pub fn i32_div_u(lhs: i32, rhs: i32) -> Result<i32, TrapCode> {
    if rhs == 0 {
        return Err(TrapCode::DivisionByZero);
    }
    Ok(((lhs as u32) / (rhs as u32)) as i32)
}
pub fn i32_rem_s(lhs: i32, rhs: i32) -> Result<i32, TrapCode> {
    if rhs == 0 {
        return Err(TrapCode::DivisionByZero);
    }
    Ok(lhs.checked_rem(rhs).unwrap_or(0))
}
pub fn i32_rem_u(lhs: i32, rhs: i32) -> Result<i32, TrapCode> {
    if rhs == 0 {
        return Err(TrapCode::DivisionByZero);
    }
    Ok(((lhs as u32) % (rhs as u32)) as i32)
}

pub fn i64_div_s(lhs: i64, rhs: i64) -> Result<i64, TrapCode> {
    if rhs == 0 {
        return Err(TrapCode::DivisionByZero);
    }
    lhs.checked_div(rhs).ok_or(TrapCode::IntegerOverflow)
}
pub fn i64_div_u(lhs: i64, rhs: i64) -> Result<i64, TrapCode> {
    if rhs == 0 {
        return Err(TrapCode::DivisionByZero);
    }
    Ok(((lhs as u64) / (rhs as u64)) as i64)
}
pub fn i64_rem_s(lhs: i64, rhs: i64) -> Result<i64, TrapCode> {
    if rhs == 0 {
        return Err(TrapCode::DivisionByZero);
    }
    Ok(lhs.checked_rem(rhs).unwrap_or(0))
}
pub fn i64_rem_u(lhs: i64, rhs: i64) -> Result<i64, TrapCode> {
    if rhs == 0 {
        return Err(TrapCode::DivisionByZero);
    }
    Ok(((lhs as u64) % (rhs as u64)) as i64)
}

pub fn i32_extend8_s(value: i32) -> i32 {
    value as i8 as i32
}
pub fn i32_extend16_s(value: i32) -> i32 {
    value as i16 as i32
}
pub fn i64_extend8_s(value: i64) -> i64 {
    value as i8 as i64
}
pub fn i64_extend16_s(value: i64) -> i64 {
    value as i16 as i64
}
pub fn i64_extend32_s(value: i64) -> i64 {
    value as i32 as i64
}
pub fn i64_extend_i32_s(value: i32) -> i64 {
    value as i64
}
pub fn i64_extend_i32_u(value: i32) -> i64 {
    value as u32 as i64
}

macro_rules! float_binop {
    ($name:ident, $ty:ty, $op:tt) => {
        #[inline]
        pub fn $name(lhs: $ty, rhs: $ty) -> $ty {
            lhs $op rhs
        }
    };
}

float_binop!(f32_add, f32, +);
float_binop!(f32_sub, f32, -);
float_binop!(f32_mul, f32, *);
float_binop!(f32_div, f32, /);
float_binop!(f64_add, f64, +);
float_binop!(f64_sub, f64, -);
float_binop!(f64_mul, f64, *);
float_binop!(f64_div, f64, /);

pub fn f32_min(lhs: f32, rhs: f32) -> f32 {
    if lhs.is_nan() || rhs.is_nan() {
        f32::NAN
    } else {
        lhs.min(rhs)
    }
}
pub fn f32_max(lhs: f32, rhs: f32) -> f32 {
    if lhs.is_nan() || rhs.is_nan() {
        f32::NAN
    } else {
        lhs.max(rhs)
    }
}
pub fn f64_min(lhs: f64, rhs: f64) -> f64 {
    if lhs.is_nan() || rhs.is_nan() {
        f64::NAN
    } else {
        lhs.min(rhs)
    }
}
pub fn f64_max(lhs: f64, rhs: f64) -> f64 {
    if lhs.is_nan() || rhs.is_nan() {
        f64::NAN
    } else {
        lhs.max(rhs)
    }
}
// `core::f32`/`f64` expose no transcendental or rounding methods of their
// own (`abs`, `ceil`, `floor`, `trunc`, `round`, `sqrt`, `copysign` are all
// `std`-only); under `no_std` these are routed through `libm` instead. Every
// call site below goes through this module rather than the inherent method
// so the choice is made in exactly one place.
#[cfg(feature = "std")]
mod fmath {
    pub mod f32 {
        pub fn abs(v: f32) -> f32 {
            v.abs()
        }
        pub fn ceil(v: f32) -> f32 {
            v.ceil()
        }
        pub fn floor(v: f32) -> f32 {
            v.floor()
        }
        pub fn trunc(v: f32) -> f32 {
            v.trunc()
        }
        pub fn round(v: f32) -> f32 {
            v.round()
        }
        pub fn sqrt(v: f32) -> f32 {
            v.sqrt()
        }
        pub fn copysign(v: f32, sign: f32) -> f32 {
            v.copysign(sign)
        }
    }
    pub mod f64 {
        pub fn abs(v: f64) -> f64 {
            v.abs()
        }
        pub fn ceil(v: f64) -> f64 {
            v.ceil()
        }
        pub fn floor(v: f64) -> f64 {
            v.floor()
        }
        pub fn trunc(v: f64) -> f64 {
            v.trunc()
        }
        pub fn round(v: f64) -> f64 {
            v.round()
        }
        pub fn sqrt(v: f64) -> f64 {
            v.sqrt()
        }
        pub fn copysign(v: f64, sign: f64) -> f64 {
            v.copysign(sign)
        }
    }
}

#[cfg(not(feature = "std"))]
mod fmath {
    pub mod f32 {
        pub fn abs(v: f32) -> f32 {
            libm::fabsf(v)
        }
        pub fn ceil(v: f32) -> f32 {
            libm::ceilf(v)
        }
        pub fn floor(v: f32) -> f32 {
            libm::floorf(v)
        }
        pub fn trunc(v: f32) -> f32 {
            libm::truncf(v)
        }
        pub fn round(v: f32) -> f32 {
            libm::roundf(v)
        }
        pub fn sqrt(v: f32) -> f32 {
            libm::sqrtf(v)
        }
        pub fn copysign(v: f32, sign: f32) -> f32 {
            libm::copysignf(v, sign)
        }
    }
    pub mod f64 {
        pub fn abs(v: f64) -> f64 {
            libm::fabs(v)
        }
        pub fn ceil(v: f64) -> f64 {
            libm::ceil(v)
        }
        pub fn floor(v: f64) -> f64 {
            libm::floor(v)
        }
        pub fn trunc(v: f64) -> f64 {
            libm::trunc(v)
        }
        pub fn round(v: f64) -> f64 {
            libm::round(v)
        }
        pub fn sqrt(v: f64) -> f64 {
            libm::sqrt(v)
        }
        pub fn copysign(v: f64, sign: f64) -> f64 {
            libm::copysign(v, sign)
        }
    }
}

pub fn f32_copysign(lhs: f32, rhs: f32) -> f32 {
    fmath::f32::copysign(lhs, rhs)
}
pub fn f64_copysign(lhs: f64, rhs: f64) -> f64 {
    fmath::f64::copysign(lhs, rhs)
}

pub fn f32_abs(v: f32) -> f32 {
    fmath::f32::abs(v)
}
pub fn f32_neg(v: f32) -> f32 {
    -v
}
pub fn f32_ceil(v: f32) -> f32 {
    fmath::f32::ceil(v)
}
pub fn f32_floor(v: f32) -> f32 {
    fmath::f32::floor(v)
}
pub fn f32_trunc(v: f32) -> f32 {
    fmath::f32::trunc(v)
}
pub fn f32_nearest(v: f32) -> f32 {
    round_ties_even_f32(v)
}
pub fn f32_sqrt(v: f32) -> f32 {
    fmath::f32::sqrt(v)
}
pub fn f64_abs(v: f64) -> f64 {
    fmath::f64::abs(v)
}
pub fn f64_neg(v: f64) -> f64 {
    -v
}
pub fn f64_ceil(v: f64) -> f64 {
    fmath::f64::ceil(v)
}
pub fn f64_floor(v: f64) -> f64 {
    fmath::f64::floor(v)
}
pub fn f64_trunc(v: f64) -> f64 {
    fmath::f64::trunc(v)
}
pub fn f64_nearest(v: f64) -> f64 {
    round_ties_even_f64(v)
}
pub fn f64_sqrt(v: f64) -> f64 {
    fmath::f64::sqrt(v)
}

fn round_ties_even_f32(v: f32) -> f32 {
    let rounded = fmath::f32::round(v);
    if fmath::f32::abs(v - fmath::f32::trunc(v)) == 0.5 && (rounded as i64) % 2 != 0 {
        rounded - fmath::f32::copysign(1.0, v)
    } else {
        rounded
    }
}
fn round_ties_even_f64(v: f64) -> f64 {
    let rounded = fmath::f64::round(v);
    if fmath::f64::abs(v - fmath::f64::trunc(v)) == 0.5 && (rounded as i64) % 2 != 0 {
        rounded - fmath::f64::copysign(1.0, v)
    } else {
        rounded
    }
}

/// `trunc_sat` saturating conversions (the `nontrapping-float-to-int` proposal).
pub fn i32_trunc_sat_f32_s(v: f32) -> i32 {
    if v.is_nan() {
        0
    } else {
        f32_trunc(v).clamp(i32::MIN as f32, i32::MAX as f32) as i32
    }
}
pub fn i32_trunc_sat_f32_u(v: f32) -> i32 {
    if v.is_nan() || v < 0.0 {
        0
    } else {
        f32_trunc(v).min(u32::MAX as f32) as u32 as i32
    }
}
pub fn i32_trunc_sat_f64_s(v: f64) -> i32 {
    if v.is_nan() {
        0
    } else {
        f64_trunc(v).clamp(i32::MIN as f64, i32::MAX as f64) as i32
    }
}
pub fn i32_trunc_sat_f64_u(v: f64) -> i32 {
    if v.is_nan() || v < 0.0 {
        0
    } else {
        f64_trunc(v).min(u32::MAX as f64) as u32 as i32
    }
}
pub fn i64_trunc_sat_f32_s(v: f32) -> i64 {
    if v.is_nan() {
        0
    } else {
        f32_trunc(v).clamp(i64::MIN as f32, i64::MAX as f32) as i64
    }
}
pub fn i64_trunc_sat_f32_u(v: f32) -> i64 {
    if v.is_nan() || v < 0.0 {
        0
    } else {
        f32_trunc(v).min(u64::MAX as f32) as u64 as i64
    }
}
pub fn i64_trunc_sat_f64_s(v: f64) -> i64 {
    if v.is_nan() {
        0
    } else {
        f64_trunc(v).clamp(i64::MIN as f64, i64::MAX as f64) as i64
    }
}
pub fn i64_trunc_sat_f64_u(v: f64) -> i64 {
    if v.is_nan() || v < 0.0 {
        0
    } else {
        f64_trunc(v).min(u64::MAX as f64) as u64 as i64
    }
}

/// Trapping `trunc` conversions (the base spec's `i32.trunc_f32_s` family).
pub fn i32_trunc_f32_s(v: f32) -> Result<i32, TrapCode> {
    trunc_range_check(v as f64, i32::MIN as f64, i32::MAX as f64)?;
    Ok(f32_trunc(v) as i32)
}
pub fn i32_trunc_f32_u(v: f32) -> Result<i32, TrapCode> {
    trunc_range_check(v as f64, 0.0, u32::MAX as f64)?;
    Ok(f32_trunc(v) as u32 as i32)
}
pub fn i32_trunc_f64_s(v: f64) -> Result<i32, TrapCode> {
    trunc_range_check(v, i32::MIN as f64, i32::MAX as f64)?;
    Ok(f64_trunc(v) as i32)
}
pub fn i32_trunc_f64_u(v: f64) -> Result<i32, TrapCode> {
    trunc_range_check(v, 0.0, u32::MAX as f64)?;
    Ok(f64_trunc(v) as u32 as i32)
}
pub fn i64_trunc_f32_s(v: f32) -> Result<i64, TrapCode> {
    trunc_range_check(v as f64, i64::MIN as f64, i64::MAX as f64)?;
    Ok(f32_trunc(v) as i64)
}
pub fn i64_trunc_f32_u(v: f32) -> Result<i64, TrapCode> {
    trunc_range_check(v as f64, 0.0, u64::MAX as f64)?;
    Ok(f32_trunc(v) as u64 as i64)
}
pub fn i64_trunc_f64_s(v: f64) -> Result<i64, TrapCode> {
    trunc_range_check(v, i64::MIN as f64, i64::MAX as f64)?;
    Ok(f64_trunc(v) as i64)
}
pub fn i64_trunc_f64_u(v: f64) -> Result<i64, TrapCode> {
    trunc_range_check(v, 0.0, u64::MAX as f64)?;
    Ok(f64_trunc(v) as u64 as i64)
}

fn trunc_range_check(v: f64, lo: f64, hi: f64) -> Result<(), TrapCode> {
    if v.is_nan() {
        return Err(TrapCode::InvalidConversionToInt);
    }
    if f64_trunc(v) < lo || f64_trunc(v) > hi {
        return Err(TrapCode::IntegerOverflow);
    }
    Ok(())
}

pub fn f32_convert_i32_s(v: i32) -> f32 {
    v as f32
}
pub fn f32_convert_i32_u(v: i32) -> f32 {
    v as u32 as f32
}
pub fn f32_convert_i64_s(v: i64) -> f32 {
    v as f32
}
pub fn f32_convert_i64_u(v: i64) -> f32 {
    v as u64 as f32
}
pub fn f64_convert_i32_s(v: i32) -> f64 {
    v as f64
}
pub fn f64_convert_i32_u(v: i32) -> f64 {
    v as u32 as f64
}
pub fn f64_convert_i64_s(v: i64) -> f64 {
    v as f64
}
pub fn f64_convert_i64_u(v: i64) -> f64 {
    v as u64 as f64
}
pub fn f32_demote_f64(v: f64) -> f32 {
    v as f32
}
pub fn f64_promote_f32(v: f32) -> f64 {
    v as f64
}
