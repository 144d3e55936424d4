//! VM benchmark binary.
//!
//! Measures evaluation throughput of the Bitcoin Cash instruction set over
//! push-heavy scripts.
//! Run with: `cargo run --release --bin bench`

use std::time::{Duration, Instant};

use authvm::instruction_sets::bitcoin_cash::{
    BitcoinCashConfig, BitcoinCashInstructionSet, BitcoinCashProgramState, create_virtual_machine,
};
use authvm::instruction_sets::opcodes::Opcode;
use authvm::virtual_machine::isa::InstructionSet;
use authvm::virtual_machine::vm::VirtualMachine;

// ---------------------------------------------------------------------------
// Benchmark harness
// ---------------------------------------------------------------------------

struct BenchResult {
    name: &'static str,
    iterations: u64,
    total: Duration,
    /// Operators executed per run.
    steps: u64,
}

impl BenchResult {
    fn avg(&self) -> Duration {
        self.total / self.iterations as u32
    }

    fn print(&self) {
        let ns_per_op = self.avg().as_nanos();
        let ns_per_step = if self.steps > 0 {
            format!("{:>8.1}", ns_per_op as f64 / self.steps as f64)
        } else {
            "       -".to_string()
        };
        println!(
            "  {:<30} {:>7} iters {:>10.3} us/iter {:>8} steps  {} ns/step",
            self.name,
            self.iterations,
            ns_per_op as f64 / 1000.0,
            self.steps,
            ns_per_step,
        );
    }
}

/// Runs `f` for at least `min_duration`, returning aggregated results.
fn bench<F>(name: &'static str, min_duration: Duration, mut f: F) -> BenchResult
where
    F: FnMut() -> u64,
{
    // Warmup
    for _ in 0..5 {
        f();
    }

    let mut iterations = 0u64;
    let mut steps = 0u64;
    let start = Instant::now();
    while start.elapsed() < min_duration {
        steps = f();
        iterations += 1;
    }
    let total = start.elapsed();

    BenchResult {
        name,
        iterations,
        total,
        steps,
    }
}

// ---------------------------------------------------------------------------
// Benchmark scripts
// ---------------------------------------------------------------------------

/// `count` repetitions of `OP_1`.
fn push_numbers(count: usize) -> Vec<u8> {
    vec![Opcode::Op1.byte(); count]
}

/// `count` 20-byte constant pushes.
fn push_hashes(count: usize) -> Vec<u8> {
    let mut script = Vec::with_capacity(count * 21);
    for i in 0..count {
        script.push(Opcode::OpData20.byte());
        script.extend(std::iter::repeat_n(i as u8, 20));
    }
    script
}

/// `count` 300-byte `OP_PUSHDATA2` pushes.
fn push_large(count: usize) -> Vec<u8> {
    let mut script = Vec::with_capacity(count * 303);
    for _ in 0..count {
        script.push(Opcode::OpPushData2.byte());
        script.extend_from_slice(&300u16.to_le_bytes());
        script.extend(std::iter::repeat_n(0xab, 300));
    }
    script
}

fn evaluate_steps(vm: &VirtualMachine<BitcoinCashInstructionSet>, state: &BitcoinCashProgramState) -> u64 {
    vm.evaluate(state).stack.len() as u64
}

fn step_mutate_steps(
    vm: &VirtualMachine<BitcoinCashInstructionSet>,
    state: &BitcoinCashProgramState,
) -> u64 {
    let mut state = state.clone();
    let mut steps = 0;
    while vm.instruction_set().continue_execution(&state) {
        vm.step_mutate(&mut state);
        steps += 1;
    }
    steps
}

fn debug_steps(vm: &VirtualMachine<BitcoinCashInstructionSet>, state: &BitcoinCashProgramState) -> u64 {
    vm.debug(state).len() as u64 - 1
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let min = Duration::from_secs(2);

    println!("VM Benchmarks (each runs for >= 2s)\n");
    println!(
        "  {:<30} {:>7}       {:>14} {:>14}  {:>10}",
        "benchmark", "iters", "avg time", "steps/run", "ns/step"
    );
    println!("  {}", "-".repeat(82));

    let start = Instant::now();
    let vm = create_virtual_machine(BitcoinCashConfig::default());
    println!("  dispatch table built in {:?}\n", start.elapsed());

    let numbers = BitcoinCashProgramState::new(push_numbers(10_000));
    let hashes = BitcoinCashProgramState::new(push_hashes(1_000));
    let large = BitcoinCashProgramState::new(push_large(100));

    // 1. evaluate
    bench("evaluate push_numbers(10K)", min, || evaluate_steps(&vm, &numbers)).print();
    bench("evaluate push_hashes(1K)", min, || evaluate_steps(&vm, &hashes)).print();
    bench("evaluate push_large(100)", min, || evaluate_steps(&vm, &large)).print();

    // 2. step_mutate driven by the caller
    bench("step_mutate push_numbers(10K)", min, || {
        step_mutate_steps(&vm, &numbers)
    })
    .print();

    // 3. debug (one state copy per step)
    bench("debug push_numbers(10K)", min, || debug_steps(&vm, &numbers)).print();
    bench("debug push_hashes(1K)", min, || debug_steps(&vm, &hashes)).print();

    println!();
}
