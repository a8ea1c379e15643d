use std::sync::Barrier;
use std::thread;

use clap::{Parser, Subcommand};
use colored::*;

use so_cpu::core_table::{CoreSet, MAX_CORES};
use so_cpu::cpu_state::CpuState;
use so_cpu::memory::DataMemory;
use so_cpu::opcodes::decode;

mod dump;
mod programs;

#[derive(Parser)]
#[command(author, version, about = "Demo harnesses for the SO ISA emulator", long_about = None, disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the single-core register and memory move demo
    Mov,
    /// Multiply two bytes on a single core, product read back from memory
    Mul { a: u8, b: u8 },
    /// Drive a shared 32-bit counter from several cores under the XCHG
    /// spinlock
    Inc {
        /// Iterations per core
        count: u32,
        /// Number of cores, one native thread each
        #[arg(long, default_value_t = 4)]
        cores: usize,
    },
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Mov => run_mov(),
        Commands::Mul { a, b } => run_mul(a, b),
        Commands::Inc { count, cores } => run_inc(count, cores),
    }
}

fn banner(title: &str) {
    println!("{}", format!("┣━━━━┫ {} ┣━━━━┫", title).cyan());
}

fn run_mov() -> Result<(), String> {
    banner("mov demo");
    let code = programs::code_mov();
    let data = DataMemory::new();
    let cores = CoreSet::new();

    let state = cores.step(&code, &data, 4, 0);
    println!("{}", dump::dump_cpu_state(0, state, &data.snapshot()));
    let state = cores.step(&code, &data, 7, 0);
    println!("{}", dump::dump_cpu_state(0, state, &data.snapshot()));
    print!("{}", dump::dump_memory(&data.snapshot()));
    Ok(())
}

fn run_mul(a: u8, b: u8) -> Result<(), String> {
    banner("mul demo");
    let code = programs::code_mul();
    let data = DataMemory::new();
    data.write(0, a);
    data.write(1, b);
    let cores = CoreSet::new();

    print!("{}", dump::dump_memory(&data.snapshot()));
    let mut state = cores.step(&code, &data, 0, 0);
    println!("{}", dump::dump_cpu_state(0, state, &data.snapshot()));

    let mut executed = 0;
    while state.pc != programs::CODE_MUL_DONE {
        let word = code[state.pc as usize];
        state = cores.step(&code, &data, 1, 0);
        println!(
            "{}  {}",
            dump::dump_cpu_state(0, state, &data.snapshot()),
            format!("; {}", decode(word)).dimmed()
        );
        executed += 1;
        if executed > 4096 {
            return Err("the multiply loop never reached its exit".to_string());
        }
    }

    print!("{}", dump::dump_memory(&data.snapshot()));
    let product = u16::from_be_bytes([data.read(0), data.read(1)]);
    println!("{} x {} = {}", a, b, product);
    Ok(())
}

fn run_inc(count: u32, core_count: usize) -> Result<(), String> {
    if core_count == 0 || core_count > MAX_CORES {
        return Err(format!("core count must be between 1 and {}", MAX_CORES));
    }

    banner("inc demo");
    let data = DataMemory::new();
    programs::seed_counters(&data, core_count, count);
    print!("{}", dump::dump_memory(&data.snapshot()));

    let cores = CoreSet::new();
    let barrier = Barrier::new(core_count);

    let states: Vec<CpuState> = thread::scope(|scope| {
        let handles: Vec<_> = (0..core_count)
            .map(|core| {
                let (data, cores, barrier) = (&data, &cores, &barrier);
                scope.spawn(move || {
                    let code = programs::code_inc(core);
                    // Every core starts at the same instant.
                    barrier.wait();
                    cores.step(&code, data, usize::MAX, core)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("a core thread panicked"))
            .collect()
    });

    let snapshot = data.snapshot();
    for (core, state) in states.iter().enumerate() {
        println!("{}", dump::dump_cpu_state(core, *state, &snapshot));
    }
    print!("{}", dump::dump_memory(&snapshot));

    let total = u32::from_be_bytes([snapshot[0], snapshot[1], snapshot[2], snapshot[3]]);
    println!(
        "shared counter = {} ({} cores x {} iterations)",
        total, core_count, count
    );
    Ok(())
}
