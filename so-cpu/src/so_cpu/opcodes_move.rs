use crate::opcodes::Arg;
use crate::so_cpu::{Operand, SoCpu};

/// Copy the source operand into the destination.
/// Function: {a1}:={a2}
/// Flags: Z
pub fn mov(cpu: &mut SoCpu, dst: Arg, src: Arg) {
    let (dst, src) = cpu.operands(dst, src);
    let value = cpu.load(src);
    cpu.store(dst, value);
    cpu.set_zero(value);
}

/// Load an immediate into the destination.
/// Function: {a1}:=imm8
/// Flags: Z
pub fn movi(cpu: &mut SoCpu, dst: Arg, imm: u8) {
    let dst = cpu.resolve(dst);
    cpu.store(dst, imm);
    cpu.set_zero(imm);
}

/// Exchange the two operands.
///
/// With a memory operand this is the machine's only atomic
/// read-modify-write: the swap of the memory byte is a single global
/// linearization point, which is what makes the spinlock convention of the
/// demo programs work. Both operand addresses come from the pre-swap
/// register values, so `XCHG X, [X]` with X = 5 swaps X with the byte at
/// address 5, not address 0.
///
/// The memory-to-memory form is two independent atomic accesses, not one:
/// nothing in the instruction set needs it to be a single point, and
/// serializing it would cost every register/memory swap a global lock.
/// Function: {a1}:<->:{a2}
/// Flags:
pub fn xchg(cpu: &mut SoCpu, lhs: Arg, rhs: Arg) {
    match cpu.operands(lhs, rhs) {
        (Operand::Reg(lhs), Operand::Reg(rhs)) => {
            let value = cpu.state.get(lhs);
            let other = cpu.state.get(rhs);
            cpu.state.set(lhs, other);
            cpu.state.set(rhs, value);
        }
        (Operand::Reg(register), Operand::Mem(address))
        | (Operand::Mem(address), Operand::Reg(register)) => {
            let previous = cpu.data.swap(address, cpu.state.get(register));
            cpu.state.set(register, previous);
        }
        (Operand::Mem(lhs), Operand::Mem(rhs)) => {
            let value = cpu.data.read(lhs);
            let other = cpu.data.swap(rhs, value);
            cpu.data.write(lhs, other);
        }
    }
}
