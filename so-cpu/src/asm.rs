//! Word encoders for building programs in source. There is no textual
//! assembler; a program is a slice of words built from these functions,
//! which keeps demo and test listings readable without inventing a file
//! format.
//!
//! ```
//! use so_cpu::asm::*;
//! use so_cpu::opcodes::Arg::*;
//!
//! let program = [
//!     movi(X, 0x11),
//!     movi(A, 1),
//!     mov(AtX, A),
//!     brk(),
//! ];
//! let image = assemble(&program);
//! assert_eq!(image[2], 0x0400);
//! ```

use crate::memory::{CodeImage, MEM_SIZE};
use crate::opcodes::Arg;

fn register_form(operation: u16, dst: Arg, src: Arg) -> u16 {
    operation | (dst.selector() as u16) << 8 | (src.selector() as u16) << 11
}

fn immediate_form(group: u16, dst: Arg, imm: u8) -> u16 {
    group | (dst.selector() as u16) << 8 | imm as u16
}

fn branch_form(group: u16, offset: i8) -> u16 {
    group | offset as u8 as u16
}

pub fn mov(dst: Arg, src: Arg) -> u16 {
    register_form(0x0000, dst, src)
}

pub fn or(dst: Arg, src: Arg) -> u16 {
    register_form(0x0002, dst, src)
}

pub fn add(dst: Arg, src: Arg) -> u16 {
    register_form(0x0004, dst, src)
}

pub fn sub(dst: Arg, src: Arg) -> u16 {
    register_form(0x0005, dst, src)
}

pub fn adc(dst: Arg, src: Arg) -> u16 {
    register_form(0x0006, dst, src)
}

pub fn sbb(dst: Arg, src: Arg) -> u16 {
    register_form(0x0007, dst, src)
}

pub fn xchg(lhs: Arg, rhs: Arg) -> u16 {
    register_form(0x0008, lhs, rhs)
}

pub fn movi(dst: Arg, imm: u8) -> u16 {
    immediate_form(0x4000, dst, imm)
}

pub fn xori(dst: Arg, imm: u8) -> u16 {
    immediate_form(0x5800, dst, imm)
}

pub fn addi(dst: Arg, imm: u8) -> u16 {
    immediate_form(0x6000, dst, imm)
}

pub fn cmpi(lhs: Arg, imm: u8) -> u16 {
    immediate_form(0x6800, lhs, imm)
}

pub fn rcr(dst: Arg) -> u16 {
    immediate_form(0x7000, dst, 0x01)
}

pub fn clc() -> u16 {
    0x8000
}

pub fn stc() -> u16 {
    0x8100
}

pub fn jmp(offset: i8) -> u16 {
    branch_form(0xC000, offset)
}

pub fn jnc(offset: i8) -> u16 {
    branch_form(0xC200, offset)
}

pub fn jc(offset: i8) -> u16 {
    branch_form(0xC300, offset)
}

pub fn jnz(offset: i8) -> u16 {
    branch_form(0xC400, offset)
}

pub fn jz(offset: i8) -> u16 {
    branch_form(0xC500, offset)
}

pub fn brk() -> u16 {
    0xFFFF
}

/// Pad a program out to a full code image. The remaining words are zero,
/// which decodes to `MOV A, A`.
///
/// Panics if the program is longer than the 256-word code space.
pub fn assemble(program: &[u16]) -> CodeImage {
    assert!(
        program.len() <= MEM_SIZE,
        "program of {} words does not fit the {}-word code space",
        program.len(),
        MEM_SIZE
    );
    let mut image = [0; MEM_SIZE];
    image[..program.len()].copy_from_slice(program);
    image
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::opcodes::{decode, Arg::*, Operation};

    /// Hand-assembled words pin every encoder down bit for bit.
    #[test]
    fn encoders_produce_the_documented_words() {
        assert_eq!(movi(A, 1), 0x4000 + 0x100 * 0 + 1);
        assert_eq!(movi(AtXD, 0x07), 0x4000 + 0x100 * 6 + 0x07);
        assert_eq!(mov(AtYD, AtXD), 0x0000 + 0x100 * 7 + 0x0800 * 6);
        assert_eq!(add(D, A), 0x0004 + 0x100 * 1 + 0x0800 * 0);
        assert_eq!(adc(AtY, A), 0x0006 + 0x100 * 5 + 0x0800 * 0);
        assert_eq!(sbb(AtYD, A), 0x0007 + 0x100 * 7 + 0x0800 * 0);
        assert_eq!(xchg(X, AtX), 0x0008 + 0x100 * 2 + 0x0800 * 4);
        assert_eq!(rcr(AtX), 0x7001 + 0x100 * 4);
        assert_eq!(addi(D, 0xFF), 0x6000 + 0x100 * 1 + 255);
        assert_eq!(jnc(2), 0xC200 + 2);
        assert_eq!(jnz(-7), 0xC400 + 0xF9);
        assert_eq!(brk(), 0xFFFF);
    }

    #[test]
    fn the_padding_word_is_a_register_move() {
        let image = assemble(&[clc()]);
        assert_eq!(image[0], 0x8000);
        assert_eq!(
            decode(image[1]),
            Operation::Mov { dst: A, src: A }
        );
    }
}
