//! Execution engine: one program stepping over eight 16-bit tapes.

use rkyv::{Archive, Deserialize, Serialize};

use super::program::{Op, Program, VAL_RANGE};

/// Number of independent memory tapes.
pub const TAPE_COUNT: usize = 8;

/// Modulus used when moving a tape pointer.
#[derive(Archive, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[rkyv(derive(Debug))]
pub enum Addressing {
    /// Pointers wrap modulo the program length. Tapes are allocated with
    /// at least that many cells so every reachable index is backed.
    #[default]
    ProgramLength,
    /// Pointers wrap modulo the configured tape length.
    TapeLength,
}

impl std::str::FromStr for Addressing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "program" => Ok(Addressing::ProgramLength),
            "tape" => Ok(Addressing::TapeLength),
            other => Err(format!(
                "unknown addressing mode '{}' (expected 'program' or 'tape')",
                other
            )),
        }
    }
}

impl std::fmt::Display for Addressing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Addressing::ProgramLength => write!(f, "program"),
            Addressing::TapeLength => write!(f, "tape"),
        }
    }
}

/// Execution state of a single candidate.
///
/// Owns its program, tapes and output. Created fresh per roll and
/// resumed unchanged when a winning candidate is extended.
#[derive(Clone, Debug)]
pub struct Machine {
    program: Program,
    tapes: [Vec<u16>; TAPE_COUNT],
    pointers: [u16; TAPE_COUNT],
    /// Pointer modulus, fixed at construction by the addressing mode.
    modulus: u16,
    tape: u8,
    code_pointer: u16,
    output: Vec<u16>,
    steps: u64,
}

impl Machine {
    pub fn new(program: Program, tape_length: u16, addressing: Addressing) -> Self {
        let (cells, modulus) = match addressing {
            Addressing::ProgramLength => (tape_length.max(program.len()), program.len()),
            Addressing::TapeLength => (tape_length.max(1), tape_length.max(1)),
        };
        Self {
            program,
            tapes: std::array::from_fn(|_| vec![0; usize::from(cells)]),
            pointers: [0; TAPE_COUNT],
            modulus,
            tape: 0,
            code_pointer: 0,
            output: Vec::new(),
            steps: 0,
        }
    }

    /// Execute exactly one instruction.
    pub fn step(&mut self) {
        if self.code_pointer >= self.program.len() {
            self.code_pointer = 0;
        }

        let ins = self.program.fetch(self.code_pointer);
        let tape = usize::from(self.tape);
        let cell = usize::from(self.pointers[tape]);

        match ins.op {
            Op::Add => {
                self.tapes[tape][cell] = self.tapes[tape][cell].wrapping_add(u16::from(ins.val));
            }
            Op::Sub => {
                self.tapes[tape][cell] = self.tapes[tape][cell].wrapping_sub(u16::from(ins.val));
            }
            Op::Right => {
                self.pointers[tape] =
                    self.pointers[tape].wrapping_add(u16::from(ins.val)) % self.modulus;
            }
            Op::Left => {
                self.pointers[tape] =
                    self.pointers[tape].wrapping_sub(u16::from(ins.val)) % self.modulus;
            }
            Op::Tape => {
                self.tape = ins.val / (VAL_RANGE / TAPE_COUNT as u8);
            }
            Op::Output => self.output.push(self.tapes[tape][cell]),
        }

        // The branch reads the cell resolved before the op, even if the op
        // moved the pointer or switched tapes.
        let next = if self.tapes[tape][cell] == 0 {
            ins.zero_redirect
        } else {
            ins.redirect
        };
        // Successors already name the next instruction; the extra increment
        // skips one more.
        self.code_pointer = next.wrapping_add(1);
        self.steps += 1;
    }

    /// Step until `budget` steps have run or the output holds at least
    /// `stop_at` values. Returns the number of steps executed.
    pub fn run(&mut self, budget: u32, stop_at: usize) -> u32 {
        let mut executed = 0;
        while executed < budget && self.output.len() < stop_at {
            self.step();
            executed += 1;
        }
        executed
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn output(&self) -> &[u16] {
        &self.output
    }

    pub fn tapes(&self) -> &[Vec<u16>; TAPE_COUNT] {
        &self.tapes
    }

    pub fn pointers(&self) -> &[u16; TAPE_COUNT] {
        &self.pointers
    }

    /// Index of the active tape, in `[0, 8)`.
    pub fn active_tape(&self) -> u8 {
        self.tape
    }

    /// Raw code pointer. May equal or exceed the program length between
    /// steps; `step` folds it back to zero before fetching.
    pub fn code_pointer(&self) -> u16 {
        self.code_pointer
    }

    /// Total steps executed since construction.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}
