use crate::so_cpu::SoCpu;

/// The program counter has already advanced past the branch word; a taken
/// branch adds the signed offset to it, mod 256.
fn branch(cpu: &mut SoCpu, offset: i8, taken: bool) {
    if taken {
        cpu.state.pc = cpu.state.pc.wrapping_add(offset as u8);
    }
}

/// Jump unconditionally.
/// Function: PC:=PC+1+imm8
/// Flags:
pub fn jmp(cpu: &mut SoCpu, offset: i8) {
    branch(cpu, offset, true);
}

/// Jump if the carry flag is clear.
/// Function: branch on C=0
/// Flags:
pub fn jnc(cpu: &mut SoCpu, offset: i8) {
    branch(cpu, offset, !cpu.state.c);
}

/// Jump if the carry flag is set.
/// Function: branch on C=1
/// Flags:
pub fn jc(cpu: &mut SoCpu, offset: i8) {
    branch(cpu, offset, cpu.state.c);
}

/// Jump if the zero flag is clear.
/// Function: branch on Z=0
/// Flags:
pub fn jnz(cpu: &mut SoCpu, offset: i8) {
    branch(cpu, offset, !cpu.state.z);
}

/// Jump if the zero flag is set.
/// Function: branch on Z=1
/// Flags:
pub fn jz(cpu: &mut SoCpu, offset: i8) {
    branch(cpu, offset, cpu.state.z);
}

/// Clear the carry flag.
/// Function: C:=0
/// Flags: C
pub fn clc(cpu: &mut SoCpu) {
    cpu.state.c = false;
}

/// Set the carry flag.
/// Function: C:=1
/// Flags: C
pub fn stc(cpu: &mut SoCpu) {
    cpu.state.c = true;
}
