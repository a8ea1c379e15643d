//! The demo programs, written with the `asm` encoders so each listing
//! reads like assembly. The encoder tests pin every word's bit pattern.

use so_cpu::asm::*;
use so_cpu::memory::{CodeImage, DataMemory};
use so_cpu::opcodes::Arg::*;

/// Register loads and every memory addressing form, single core.
pub fn code_mov() -> CodeImage {
    assemble(&[
        movi(A, 1),
        movi(D, 3),
        movi(X, 0x11),
        movi(Y, 0x21),
        mov(AtX, A),
        mov(AtY, D),
        movi(AtXD, 0x07),
        add(D, A),
        movi(AtXD, 0x08),
        mov(AtYD, AtXD),
        mov(A, A), // idle
    ])
}

/// The word after the multiply's JNZ loop; the harness single-steps until
/// the program counter lands here.
pub const CODE_MUL_DONE: u8 = 13;

/// Shift-and-add multiply of the bytes at addresses 0 and 1, leaving the
/// 16-bit product big-endian in the same two bytes.
///
/// The product register is the pair (data[0], data[1]) shifting right once
/// per round: RCR [X] feeds the next multiplier bit to JNC, ADC [Y] adds
/// the multiplicand into the high half when that bit was set, and the two
/// rotates push the carry-out down through both bytes. ADDI leaving the
/// carry alone is what lets the D countdown live inside that chain.
pub fn code_mul() -> CodeImage {
    assemble(&[
        movi(X, 1),
        movi(Y, 0),
        mov(A, AtY),
        movi(AtY, 0),
        movi(D, 8),
        rcr(AtX),
        jnc(2),
        clc(),
        adc(AtY, A),
        rcr(AtY),
        rcr(AtX),
        addi(D, 0xFF),
        jnz(-7),
        jmp(0), // idle
    ])
}

/// The multi-core counter demo: every core runs this image with its own
/// counter base patched into the first word.
///
/// Per round a core takes the XCHG spinlock at address 5, adds 1 to the
/// 32-bit shared counter (big-endian at addresses 0..=3, least significant
/// byte first via `[X + D]` with X = 255), releases the lock with the 0 the
/// winning swap handed back, subtracts 1 from its own 32-bit counter at
/// `base..base+4`, and loops until that counter ORs to zero.
pub fn code_inc(core: usize) -> CodeImage {
    let counter_base = (4 * core as u8).wrapping_add(7);
    assemble(&[
        movi(Y, counter_base),
        jmp(18),
        // Spin until the swap hands back an unlocked byte.
        movi(A, 1),
        movi(X, 5),
        xchg(AtX, A),
        cmpi(A, 0),
        jnz(-3),
        // Carry a 1 up through the four shared counter bytes.
        movi(X, 255),
        movi(D, 4),
        stc(),
        adc(AtXD, A),
        addi(D, 0xFF),
        jnz(-3),
        // Release the lock; A still holds the 0 the swap returned.
        movi(X, 5),
        mov(AtX, A),
        // Borrow a 1 down through this core's own counter bytes.
        movi(D, 4),
        stc(),
        sbb(AtYD, A),
        addi(D, 0xFF),
        jnz(-3),
        // OR the counter bytes together to test for zero.
        movi(D, 4),
        mov(A, AtYD),
        addi(D, 0xFF),
        or(A, AtYD),
        addi(D, 0xFF),
        jnz(-3),
        cmpi(A, 0),
        jnz(-26),
        brk(),
    ])
}

/// Seed one big-endian 32-bit iteration counter per core, the first at
/// address 8 and each next one 4 bytes later.
pub fn seed_counters(data: &DataMemory, cores: usize, count: u32) {
    for core in 0..cores {
        data.write_all(8 + 4 * core as u8, &count.to_be_bytes());
    }
}

#[cfg(test)]
mod test {
    use std::sync::Barrier;
    use std::thread;

    use so_cpu::core_table::CoreSet;
    use so_cpu::memory::DataMemory;

    use super::*;

    #[test]
    fn the_mov_demo_writes_through_every_addressing_form() {
        let code = code_mov();
        let data = DataMemory::new();
        let cores = CoreSet::new();

        let state = cores.step(&code, &data, 7, 0);
        assert_eq!((state.a, state.d, state.x, state.y), (1, 3, 0x11, 0x21));
        assert_eq!(state.pc, 7);
        let memory = data.snapshot();
        assert_eq!(memory[0x11], 1);
        assert_eq!(memory[0x21], 3);
        assert_eq!(memory[0x14], 7);

        // Four more steps finish the listing: D picks up A, and the write
        // through [X + D] lands one byte further along.
        let state = cores.step(&code, &data, 4, 0);
        assert_eq!(state.pc, 11);
        assert_eq!(state.d, 4);
        let memory = data.snapshot();
        assert_eq!(memory[0x15], 8);
        assert_eq!(memory[0x25], 8);
    }

    fn multiply(a: u8, b: u8) -> (u8, u8) {
        let code = code_mul();
        let data = DataMemory::new();
        data.write(0, a);
        data.write(1, b);
        let cores = CoreSet::new();

        let mut state = cores.step(&code, &data, 0, 0);
        let mut executed = 0;
        while state.pc != CODE_MUL_DONE {
            state = cores.step(&code, &data, 1, 0);
            executed += 1;
            assert!(executed < 4096, "the multiply never reached its exit");
        }
        (data.read(0), data.read(1))
    }

    #[test]
    fn the_multiply_demo_produces_big_endian_products() {
        // 61 * 18 = 1098 = 0x044A
        assert_eq!(multiply(61, 18), (0x04, 0x4A));
        assert_eq!(multiply(7, 9), (0x00, 0x3F));
        assert_eq!(multiply(255, 255), (0xFE, 0x01));
        assert_eq!(multiply(0, 200), (0x00, 0x00));
    }

    #[test]
    fn four_cores_increment_without_losing_updates() {
        const CORES: usize = 4;
        const COUNT: u32 = 1000;

        let data = DataMemory::new();
        seed_counters(&data, CORES, COUNT);
        let cores = CoreSet::new();
        let barrier = Barrier::new(CORES);

        thread::scope(|scope| {
            for core in 0..CORES {
                let (data, cores, barrier) = (&data, &cores, &barrier);
                scope.spawn(move || {
                    let code = code_inc(core);
                    barrier.wait();
                    cores.step(&code, data, usize::MAX, core)
                });
            }
        });

        let memory = data.snapshot();
        let total = u32::from_be_bytes([memory[0], memory[1], memory[2], memory[3]]);
        assert_eq!(total, CORES as u32 * COUNT, "no update may be lost");
        assert_eq!(memory[5], 0, "the lock ends released");
        for core in 0..CORES {
            let base = 8 + 4 * core;
            assert_eq!(&memory[base..base + 4], &[0, 0, 0, 0]);
        }
    }
}
