use rkyv::{Archive, Deserialize, Serialize};

/// Operand values lie in `[0, VAL_RANGE)`.
pub const VAL_RANGE: u8 = 32;
/// Largest program a 16-bit instruction count can describe.
pub const MAX_PROGRAM_LEN: usize = u16::MAX as usize;

/// Instruction behavior.
#[derive(Archive, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[rkyv(derive(Debug))]
pub enum Op {
    /// `cell += val`, wrapping.
    Add,
    /// `cell -= val`, wrapping.
    Sub,
    /// Move the active tape's pointer right by `val`.
    Right,
    /// Move the active tape's pointer left by `val`.
    Left,
    /// Select tape `val / 4`.
    Tape,
    /// Append the current cell to the output.
    Output,
}

impl Op {
    pub const ALL: [Op; 6] = [Op::Add, Op::Sub, Op::Right, Op::Left, Op::Tape, Op::Output];

    /// Numeric op code in `[0, 6)`.
    pub fn code(self) -> u8 {
        match self {
            Op::Add => 0,
            Op::Sub => 1,
            Op::Right => 2,
            Op::Left => 3,
            Op::Tape => 4,
            Op::Output => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Op> {
        Op::ALL.get(usize::from(code)).copied()
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Right => "right",
            Op::Left => "left",
            Op::Tape => "tape",
            Op::Output => "out",
        }
    }
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[derive(Archive, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[rkyv(derive(Debug))]
pub struct Instruction {
    pub op: Op,
    pub val: u8,
    /// Successor when the touched cell is zero after the op.
    pub zero_redirect: u16,
    /// Successor otherwise.
    pub redirect: u16,
}

impl Instruction {
    /// An instruction that falls through to `index + 1` on both branches.
    pub fn fall_through(index: u16, op: Op, val: u8) -> Self {
        let next = index.wrapping_add(1);
        Self {
            op,
            val,
            zero_redirect: next,
            redirect: next,
        }
    }

    /// An instruction whose branches both go to `target`.
    pub fn jump(op: Op, val: u8, target: u16) -> Self {
        Self {
            op,
            val,
            zero_redirect: target,
            redirect: target,
        }
    }
}

/// An immutable candidate program of 1 to 65535 instructions.
#[derive(Archive, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[rkyv(derive(Debug))]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Build a program, rejecting empty or oversized instruction lists
    /// and operands outside `[0, VAL_RANGE)`.
    pub fn new(instructions: Vec<Instruction>) -> Option<Self> {
        let valid = !instructions.is_empty()
            && instructions.len() <= MAX_PROGRAM_LEN
            && instructions.iter().all(|i| i.val < VAL_RANGE);
        valid.then_some(Self { instructions })
    }

    /// Generated programs are valid by construction.
    pub(super) fn from_generated(instructions: Vec<Instruction>) -> Self {
        debug_assert!(!instructions.is_empty() && instructions.len() <= MAX_PROGRAM_LEN);
        Self { instructions }
    }

    /// Instruction count; always in `[1, 65535]`.
    pub fn len(&self) -> u16 {
        self.instructions.len() as u16
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Fetch the instruction at `index`, which must be below `len()`.
    pub fn fetch(&self, index: u16) -> Instruction {
        self.instructions[usize::from(index)]
    }

    /// Content hash over every instruction field.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        for ins in &self.instructions {
            hasher.update(&[ins.op.code(), ins.val]);
            hasher.update(&ins.zero_redirect.to_le_bytes());
            hasher.update(&ins.redirect.to_le_bytes());
        }
        hasher.finalize()
    }
}
