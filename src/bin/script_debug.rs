//! Script trace CLI.
//!
//! Evaluates a hex-encoded script with the Bitcoin Cash instruction set and
//! prints every intermediate state.
//!
//! # Usage
//! ```text
//! script_debug <unlocking_hex> [locking_hex] [OPTIONS]
//! ```
//!
//! # Arguments
//! - `unlocking_hex`: Script to evaluate, or the unlocking half when a locking
//!   script is also given
//! - `locking_hex`: Locking script, joined after `OP_CODESEPARATOR`
//!
//! # Options
//! - `-e, --evaluate`: Print only the final state
//! - `--enable-pushdata4`: Let `OP_PUSHDATA4` push data
//!
//! # Examples
//! ```text
//! script_debug 5152
//! script_debug 5152 --evaluate
//! script_debug 0151 76a914404371705fa9bd789a2fcd52d2c580b65d35549d88ac
//! ```

use authvm::instruction_sets::bitcoin_cash::{
    BitcoinCashConfig, BitcoinCashProgramState, create_virtual_machine,
};
use authvm::instruction_sets::opcodes::mnemonic_for;
use authvm::virtual_machine::script::{bin_to_hex, hex_to_bin};
use authvm::virtual_machine::vm::DebugStep;
use authvm::{error, info, warn};
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let mut scripts: Vec<&str> = Vec::new();
    let mut evaluate = false;
    let mut config = BitcoinCashConfig::default();

    for arg in &args[1..] {
        match arg.as_str() {
            "--evaluate" | "-e" => evaluate = true,
            "--enable-pushdata4" => config.enable_pushdata4 = true,
            other if other.starts_with('-') => {
                error!("Unexpected argument: {}\n", other);
                print_usage(&args[0]);
                process::exit(1);
            }
            script if scripts.len() < 2 => scripts.push(script),
            extra => {
                error!("Unexpected extra script: {}", extra);
                process::exit(1);
            }
        }
    }

    let Some(unlocking) = scripts.first().map(|hex| decode(hex)) else {
        error!("Missing script to evaluate");
        print_usage(&args[0]);
        process::exit(1);
    };

    let state = match scripts.get(1) {
        Some(hex) => BitcoinCashProgramState::from_scripts(&unlocking, &decode(hex)),
        None => BitcoinCashProgramState::new(unlocking),
    };

    info!(
        "Evaluating {} bytes: {}",
        state.script.len(),
        bin_to_hex(&state.script)
    );

    let vm = create_virtual_machine(config);
    let last = if evaluate {
        vm.evaluate(&state)
    } else {
        let trace = vm.debug(&state);
        print_trace(&trace);
        match trace.into_iter().last() {
            Some(step) => step.state,
            None => state,
        }
    };

    print_state("result", &last);

    match &last.error {
        Some(e) => {
            let opcode = last
                .ip
                .checked_sub(1)
                .and_then(|i| last.script.get(i))
                .map(|&byte| mnemonic_for(byte))
                .unwrap_or_default();
            error!("Evaluation failed at ip {} ({}): {}", last.ip, opcode, e);
            process::exit(1);
        }
        None if last.stack.is_empty() => warn!("Evaluation finished with an empty stack"),
        None => info!("Evaluation finished with {} stack items", last.stack.len()),
    }
}

fn decode(hex: &str) -> Vec<u8> {
    hex_to_bin(hex).unwrap_or_else(|e| {
        error!("Invalid script '{}': {}", hex, e);
        process::exit(1)
    })
}

fn print_trace(trace: &[DebugStep<BitcoinCashProgramState>]) {
    for (index, step) in trace.iter().enumerate() {
        match &step.info {
            Some(info) => {
                println!("#{index:<4} {:<20} {}", info.asm, info.description);
                print_state("", &step.state);
            }
            None => print_state("initial", &step.state),
        }
    }
}

fn print_state(label: &str, state: &BitcoinCashProgramState) {
    println!("      {:<8} ip: {:>4}  stack: {}", label, state.ip, state.stack.len());
    for (depth, item) in state.stack.iter().rev().enumerate() {
        println!("        [{depth}] {:<6} {}", item.type_name(), item);
    }
    if let Some(e) = &state.error {
        println!("        error: {e}");
    }
}

const USAGE: &str = "\
Script Trace

USAGE:
    {program} <unlocking_hex> [locking_hex] [OPTIONS]

ARGS:
    <unlocking_hex>    Script to evaluate (unlocking script when a locking script follows)
    [locking_hex]      Locking script, joined after OP_CODESEPARATOR

OPTIONS:
    -e, --evaluate          Print only the final state
        --enable-pushdata4  Let OP_PUSHDATA4 push data instead of failing
    -h, --help              Print this help message

ENVIRONMENT:
    AUTHVM_LOG              Minimum log level: debug, info, warn, error (default info)
    AUTHVM_LOG_TIMESTAMP    Set to 0 to hide the elapsed-time prefix

EXAMPLES:
    # Trace a script
    {program} 5152

    # Evaluate an unlocking and a locking script
    {program} 0151 76a914404371705fa9bd789a2fcd52d2c580b65d35549d88ac --evaluate
";

fn print_usage(program: &str) {
    info!("{}", USAGE.replace("{program}", program));
}
