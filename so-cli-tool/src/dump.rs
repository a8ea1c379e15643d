//! Plain-text renderers for register files and memory, in the dump format
//! the emulator's consumers parse. Color stays out of these strings; the
//! subcommands add it around them.

use std::fmt::Write;

use so_cpu::cpu_state::CpuState;
use so_cpu::memory::MEM_SIZE;

/// One line per core: registers, flags, and the four dereferencable
/// memory bytes, all in two-digit lowercase hex.
pub fn dump_cpu_state(core: usize, state: CpuState, memory: &[u8; MEM_SIZE]) -> String {
    let at = |address: u8| memory[address as usize];
    format!(
        "core {}: A = {:02x}, D = {:02x}, X = {:02x}, Y = {:02x}, PC = {:02x}, \
         C = {}, Z = {}, [X] = {:02x}, [Y] = {:02x}, [X + D] = {:02x}, [Y + D] = {:02x}",
        core,
        state.a,
        state.d,
        state.x,
        state.y,
        state.pc,
        state.c as u8,
        state.z as u8,
        at(state.x),
        at(state.y),
        at(state.x.wrapping_add(state.d)),
        at(state.y.wrapping_add(state.d)),
    )
}

/// Sixteen bytes per row, a double space after column 7.
pub fn dump_memory(memory: &[u8; MEM_SIZE]) -> String {
    let mut out = String::new();
    for (index, byte) in memory.iter().enumerate() {
        let _ = write!(out, "{:02x}", byte);
        match index & 0xF {
            7 => out.push_str("  "),
            15 => out.push('\n'),
            _ => out.push(' '),
        }
    }
    out
}

#[cfg(test)]
mod test {
    use so_cpu::core_table::CoreSet;
    use so_cpu::memory::DataMemory;

    use super::*;

    #[test]
    fn the_cpu_state_line_lists_registers_flags_and_memory() {
        let code = crate::programs::code_mov();
        let data = DataMemory::new();
        let cores = CoreSet::new();

        let state = cores.step(&code, &data, 7, 0);
        insta::assert_snapshot!(
            dump_cpu_state(0, state, &data.snapshot()),
            @"core 0: A = 01, D = 03, X = 11, Y = 21, PC = 07, C = 0, Z = 0, [X] = 01, [Y] = 03, [X + D] = 07, [Y + D] = 00"
        );
    }

    #[test]
    fn the_memory_dump_is_sixteen_spaced_rows() {
        let mut memory = [0; MEM_SIZE];
        memory[0] = 0xDE;
        memory[7] = 0xAD;
        memory[8] = 0xBE;
        memory[255] = 0xEF;

        let text = dump_memory(&memory);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "de 00 00 00 00 00 00 ad  be 00 00 00 00 00 00 00");
        assert!(lines[15].ends_with("ef"));
    }
}
