//! Random program generation.
//!
//! Lengths follow a log-scaled curve so short programs dominate. Operands
//! and jump exponents use a power-law draw that favors small values, and
//! only a minority of instructions get a non-sequential successor.

use rand::Rng;

use super::program::{Instruction, Op, Program, VAL_RANGE};

/// Bias exponent for operand draws.
const VAL_BIAS: f64 = 0.1;
/// Bias exponent for jump-distance exponents.
const JUMP_BIAS: f64 = 0.6;
/// Jump offsets are `2^k` with `k` drawn from `[0, JUMP_EXP_RANGE)`.
const JUMP_EXP_RANGE: u16 = 15;
/// Probability that `zero_redirect` jumps instead of falling through.
const ZERO_REDIRECT_JUMP_P: f64 = 0.2;
/// Probability that `redirect` jumps instead of falling through.
const REDIRECT_JUMP_P: f64 = 0.1;

/// Power-law draw over `[lo, hi)`: `lo + (1 - u^bias) * (hi - lo)` for
/// uniform `u`, truncated toward `lo`.
pub fn biased<R: Rng + ?Sized>(rng: &mut R, lo: u16, hi: u16, bias: f64) -> u16 {
    debug_assert!(lo < hi);
    let u: f64 = rng.gen();
    let weight = 1.0 - u.powf(bias);
    let drawn = lo.saturating_add((weight * f64::from(hi - lo)) as u16);
    // u == 0 lands exactly on `hi`.
    drawn.min(hi - 1)
}

/// Draw a program length in `[1, length_limit + 1]`, clamped to 65535.
pub fn draw_length<R: Rng + ?Sized>(rng: &mut R, length_limit: u16) -> u16 {
    let draw: u16 = rng.gen();
    let log_max = (f64::from(length_limit) + 1.0).ln();
    let scaled = (f64::from(draw) * log_max / f64::from(u16::MAX)).exp() - 1.0;
    let length = (scaled.max(0.0) as u32).saturating_add(1);
    length.clamp(1, u32::from(u16::MAX)) as u16
}

/// Generate a random program no longer than `length_limit + 1`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, length_limit: u16) -> Program {
    let len = draw_length(rng, length_limit);
    let instructions = (0..len)
        .map(|index| {
            let op = Op::ALL[rng.gen_range(0..Op::ALL.len())];
            let val = biased(rng, 0, u16::from(VAL_RANGE), VAL_BIAS) as u8;
            let zero_redirect = successor(rng, index, len, ZERO_REDIRECT_JUMP_P);
            let redirect = successor(rng, index, len, REDIRECT_JUMP_P);
            Instruction {
                op,
                val,
                zero_redirect,
                redirect,
            }
        })
        .collect();
    Program::from_generated(instructions)
}

/// `index + 1`, or with probability `jump_p` a target `2^k` away from it
/// in either direction. Both are reduced modulo the program length.
fn successor<R: Rng + ?Sized>(rng: &mut R, index: u16, len: u16, jump_p: f64) -> u16 {
    let next = index.wrapping_add(1);
    if rng.gen::<f64>() >= jump_p {
        return next % len;
    }
    let forward: bool = rng.gen();
    let offset = 1u16 << biased(rng, 0, JUMP_EXP_RANGE, JUMP_BIAS);
    let target = if forward {
        next.wrapping_add(offset)
    } else {
        next.wrapping_sub(offset)
    };
    target % len
}
