use std::sync::Mutex;

use crate::cpu_state::CpuState;
use crate::memory::{CodeImage, DataMemory};
use crate::so_cpu::SoCpu;

/// Upper bound on core ids. The table is sized for the largest supported
/// machine up front; a fresh slot costs 8 bytes of state.
pub const MAX_CORES: usize = 62;

/// The per-core register files of one machine.
///
/// Each core id owns one slot. A slot's mutex is held only for the duration
/// of that core's own `step` call, so distinct cores never contend; it
/// exists so that a caller misusing one core id from two threads corrupts
/// nothing. Sharing of data between cores happens exclusively through
/// [`DataMemory`].
pub struct CoreSet {
    slots: [Mutex<CpuState>; MAX_CORES],
}

impl CoreSet {
    /// A machine with every core in the power-on state.
    pub const fn new() -> CoreSet {
        const SLOT: Mutex<CpuState> = Mutex::new(CpuState::power_on());
        CoreSet {
            slots: [SLOT; MAX_CORES],
        }
    }

    /// Execute up to `steps` instructions on `core`, reading instructions
    /// from `code` and sharing `data` with every other core.
    ///
    /// The register file persists in the table between calls; a budget of 0
    /// reads the state without executing. Hitting BRK ends the call early
    /// and leaves the program counter on the BRK word, so subsequent calls
    /// halt again immediately. Returns the register file by value.
    ///
    /// Panics if `core` is not below [`MAX_CORES`].
    pub fn step(
        &self,
        code: &CodeImage,
        data: &DataMemory,
        steps: usize,
        core: usize,
    ) -> CpuState {
        let mut slot = self.slots[core]
            .lock()
            .expect("a core slot mutex was poisoned");
        let mut cpu = SoCpu::new(*slot, code, data);
        cpu.run(steps);
        *slot = cpu.state;
        *slot
    }
}

impl Default for CoreSet {
    fn default() -> CoreSet {
        CoreSet::new()
    }
}

static CORES: CoreSet = CoreSet::new();

/// Step a core of the process-wide machine. This is the drop-in entry
/// point for harnesses that treat the emulator as a device: all callers in
/// the process share one core table, and each thread must use its own
/// core id. Embedders that want isolated machines hold their own
/// [`CoreSet`] instead.
pub fn step(code: &CodeImage, data: &DataMemory, steps: usize, core: usize) -> CpuState {
    CORES.step(code, data, steps, core)
}
