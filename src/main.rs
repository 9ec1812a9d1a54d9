// https://www.sigbus.info/compilerbook

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use clap_stdin::MaybeStdin;

use mincc::compile;

/// mincc compiles a flat arithmetic/statement language to x86-64 assembly.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source program, or "-" to read it from stdin.
    source: MaybeStdin<String>,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    match compile(&args.source) {
        Ok(asm) => {
            print!("{asm}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.render(&args.source));
            ExitCode::FAILURE
        }
    }
}
