#![macro_use]

use crate::asm::{assemble, brk};
use crate::core_table::CoreSet;
use crate::cpu_state::{CpuState, Register};
use crate::memory::{DataMemory, MEM_SIZE};

/// Expected flag values for the assertion macros, combined in the style
/// `C | Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub c: bool,
    pub z: bool,
}

/// The power-on flags: both clear.
pub const P: Flags = Flags { c: false, z: false };
/// Carry set.
pub const C: Flags = Flags { c: true, z: false };
/// Zero set.
pub const Z: Flags = Flags { c: false, z: true };

impl std::ops::BitOr for Flags {
    type Output = Flags;
    fn bitor(self, other: Flags) -> Flags {
        Flags {
            c: self.c || other.c,
            z: self.z || other.z,
        }
    }
}

/// Run a program on a fresh single-core machine with zeroed memory until
/// it reaches the BRK appended after its last word.
pub fn run_program(program: &[u16]) -> (CpuState, [u8; MEM_SIZE]) {
    run_program_with_memory(program, [0; MEM_SIZE])
}

/// Same as [`run_program`], with the data memory seeded first.
pub fn run_program_with_memory(
    program: &[u16],
    contents: [u8; MEM_SIZE],
) -> (CpuState, [u8; MEM_SIZE]) {
    let mut words = program.to_vec();
    words.push(brk());
    let code = assemble(&words);
    let data = DataMemory::with_contents(contents);
    let cores = CoreSet::new();
    let state = cores.step(&code, &data, usize::MAX, 0);
    (state, data.snapshot())
}

pub fn assert_flags(state: &CpuState, flags: Flags) {
    if state.c != flags.c || state.z != flags.z {
        panic!(
            "\nExpected the flags C = {}, Z = {} but the cpu had C = {}, Z = {}",
            flags.c as u8, flags.z as u8, state.c as u8, state.z as u8
        );
    }
}

pub fn assert_register(program: &[u16], register: Register, value: u8, flags: Flags) {
    let (state, _) = run_program(program);
    let actual = state.get(register);
    if actual != value {
        panic!(
            "\nExpected register {:?} to be {:#x} ({:#b}) but it was {:#x} ({:#b})",
            register, value, value, actual, actual
        );
    }
    assert_flags(&state, flags);
}

pub fn assert_memory(program: &[u16], address: u8, value: u8) {
    let (_, memory) = run_program(program);
    let actual = memory[address as usize];
    if actual != value {
        panic!(
            "\nExpected the byte at {:#x} to be {:#x} ({:#b}) but it was {:#x} ({:#b})",
            address, value, value, actual, actual
        );
    }
}

#[macro_export]
macro_rules! register_a {
    ($name:ident, $a:expr, $flags:expr, $program:expr) => {
        #[test]
        fn $name() {
            assert_register(&$program, Register::A, $a, $flags);
        }
    };
}

#[macro_export]
macro_rules! register_d {
    ($name:ident, $d:expr, $flags:expr, $program:expr) => {
        #[test]
        fn $name() {
            assert_register(&$program, Register::D, $d, $flags);
        }
    };
}

#[macro_export]
macro_rules! register_x {
    ($name:ident, $x:expr, $flags:expr, $program:expr) => {
        #[test]
        fn $name() {
            assert_register(&$program, Register::X, $x, $flags);
        }
    };
}

#[macro_export]
macro_rules! register_y {
    ($name:ident, $y:expr, $flags:expr, $program:expr) => {
        #[test]
        fn $name() {
            assert_register(&$program, Register::Y, $y, $flags);
        }
    };
}

#[macro_export]
macro_rules! memory {
    ($name:ident, [$address:expr, $expected:expr], $program:expr) => {
        #[test]
        fn $name() {
            assert_memory(&$program, $address, $expected);
        }
    };
}

#[macro_export]
macro_rules! status {
    ($name:ident, $flags:expr, $program:expr) => {
        #[test]
        fn $name() {
            let (state, _) = run_program(&$program);
            assert_flags(&state, $flags);
        }
    };
}
