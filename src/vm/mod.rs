//! Multi-tape virtual machine.
//!
//! A program is a flat list of instructions, each an `(op, val)` pair
//! plus two successor indices: `zero_redirect` is taken when the cell
//! the instruction touched holds zero afterwards, `redirect` otherwise.
//! There is no halt instruction. The code pointer wraps back to zero
//! when it runs past the end, so execution is always bounded by a step
//! budget chosen by the caller.

mod generate;
mod machine;
mod program;

pub use generate::{biased, draw_length, generate};
pub use machine::{Addressing, Machine, TAPE_COUNT};
pub use program::{Instruction, Op, Program, MAX_PROGRAM_LEN, VAL_RANGE};
