use crate::opcodes::Arg;
use crate::so_cpu::{Operand, SoCpu};

/// The shared 9-bit addition. Works in u16 space so the carry-out bit
/// stays observable for multi-byte chains.
fn add_impl(cpu: &mut SoCpu, dst: Operand, operand: u8, carry_in: u8) {
    let result_u16 = cpu.load(dst) as u16 + operand as u16 + carry_in as u16;
    let result = result_u16 as u8;
    cpu.store(dst, result);
    cpu.state.c = result_u16 > 0xFF;
    cpu.set_zero(result);
}

/// The shared subtraction. Returns the result so CMPI can discard it;
/// the borrow lands in the carry flag.
fn sub_impl(cpu: &mut SoCpu, dst: Operand, operand: u8, borrow_in: u8) -> u8 {
    let minuend = cpu.load(dst) as u16;
    let subtrahend = operand as u16 + borrow_in as u16;
    let result = minuend.wrapping_sub(subtrahend) as u8;
    cpu.state.c = minuend < subtrahend;
    cpu.set_zero(result);
    result
}

/// Bitwise or of the two operands.
/// Function: {a1}:={a1} or {a2}
/// Flags: Z
pub fn or(cpu: &mut SoCpu, dst: Arg, src: Arg) {
    let (dst, src) = cpu.operands(dst, src);
    let result = cpu.load(dst) | cpu.load(src);
    cpu.store(dst, result);
    cpu.set_zero(result);
}

/// Bitwise exclusive or with an immediate.
/// Function: {a1}:={a1} xor imm8
/// Flags: Z
pub fn xori(cpu: &mut SoCpu, dst: Arg, imm: u8) {
    let dst = cpu.resolve(dst);
    let result = cpu.load(dst) ^ imm;
    cpu.store(dst, result);
    cpu.set_zero(result);
}

/// Add the source to the destination.
/// Function: {a1}:={a1}+{a2}
/// Flags: C Z
pub fn add(cpu: &mut SoCpu, dst: Arg, src: Arg) {
    let (dst, src) = cpu.operands(dst, src);
    let operand = cpu.load(src);
    add_impl(cpu, dst, operand, 0);
}

/// Add with carry: the ninth bit of a previous ADD/ADC carries in.
/// Function: {a1}:={a1}+{a2}+C
/// Flags: C Z
pub fn adc(cpu: &mut SoCpu, dst: Arg, src: Arg) {
    let (dst, src) = cpu.operands(dst, src);
    let operand = cpu.load(src);
    let carry_in = cpu.state.c as u8;
    add_impl(cpu, dst, operand, carry_in);
}

/// Add an immediate to the destination. Unlike ADD the carry flag is left
/// alone: decrement-and-branch loops sit inside ADC/SBB carry chains and
/// must not disturb them.
/// Function: {a1}:={a1}+imm8
/// Flags: Z
pub fn addi(cpu: &mut SoCpu, dst: Arg, imm: u8) {
    let dst = cpu.resolve(dst);
    let result = cpu.load(dst).wrapping_add(imm);
    cpu.store(dst, result);
    cpu.set_zero(result);
}

/// Subtract the source from the destination.
/// Function: {a1}:={a1}-{a2}
/// Flags: C Z
pub fn sub(cpu: &mut SoCpu, dst: Arg, src: Arg) {
    let (dst, src) = cpu.operands(dst, src);
    let operand = cpu.load(src);
    let result = sub_impl(cpu, dst, operand, 0);
    cpu.store(dst, result);
}

/// Subtract with borrow: the borrow of a previous SUB/SBB carries in.
/// Function: {a1}:={a1}-{a2}-C
/// Flags: C Z
pub fn sbb(cpu: &mut SoCpu, dst: Arg, src: Arg) {
    let (dst, src) = cpu.operands(dst, src);
    let operand = cpu.load(src);
    let borrow_in = cpu.state.c as u8;
    let result = sub_impl(cpu, dst, operand, borrow_in);
    cpu.store(dst, result);
}

/// Compare against an immediate: a subtraction that only writes flags.
/// Function: {a1}-imm8
/// Flags: C Z
pub fn cmpi(cpu: &mut SoCpu, lhs: Arg, imm: u8) {
    let lhs = cpu.resolve(lhs);
    sub_impl(cpu, lhs, imm, 0);
}

/// Rotate the 9-bit value (C, {a1}) right by one: the old carry becomes
/// the top bit, the old bottom bit becomes the carry.
/// Function: {a1}:={a1}>>1 or C<<7, C:={a1} bit 0
/// Flags: C Z
pub fn rcr(cpu: &mut SoCpu, dst: Arg) {
    let dst = cpu.resolve(dst);
    let value = cpu.load(dst);
    let result = (value >> 1) | ((cpu.state.c as u8) << 7);
    cpu.store(dst, result);
    cpu.state.c = value & 1 != 0;
    cpu.set_zero(result);
}
