//! ToyC Compiler Driver
//!
//! Reads ToyC source from a file or stdin, runs the full pipeline
//! (parse → semantic analysis → IR lowering → assembly emission), and
//! writes RISC-V assembly to a file or stdout. Exits 0 on success and 1
//! on the first diagnosed error.

use anyhow::Result;
use clap::Parser;
use std::fs;
use std::io::Read;
use std::path::PathBuf;
use toycc_codegen::generate_assembly;
use toycc_frontend::Frontend;
use toycc_ir::lower_unit;

#[derive(Parser, Debug)]
#[command(name = "toycc", version, about = "ToyC to RISC-V compiler")]
struct Args {
    /// Input ToyC source file (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Output assembly file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the AST as JSON after parsing
    #[arg(long)]
    print_ast: bool,

    /// Print the IR after lowering
    #[arg(long)]
    print_ir: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::init();
    }

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let source = read_source(args.input.as_deref())?;

    let unit = Frontend::analyze_source(&source)?;

    if args.print_ast {
        println!("{}", serde_json::to_string_pretty(&unit)?);
    }

    let program = lower_unit(&unit)?;

    if args.print_ir {
        print!("{program}");
    }

    let asm = generate_assembly(&program)?;

    match &args.output {
        Some(path) => fs::write(path, asm)?,
        None => print!("{asm}"),
    }

    Ok(())
}

fn read_source(input: Option<&std::path::Path>) -> Result<String> {
    match input {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}
