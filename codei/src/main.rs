mod cli;
mod rlpl;
mod rppl;

use std::{io::Write, path::PathBuf};

use clap::Parser;
use cli::{print_checked, print_checking, print_finished, print_running};
use code_core::{
    eval::prelude::ProgramIO,
    interpret::prelude::{check_file, run_file},
};

#[derive(Parser)]
enum Command {
    /// Checks and runs a program
    Run {
        /// Path of source file
        path: PathBuf,
        /// Abort after this many evaluated statements
        #[arg(long)]
        fuel: Option<u64>,
    },
    /// Checks a program without running it
    Check {
        /// Path of source file
        path: PathBuf,
        /// Do not print parsed source code
        #[arg(short, long, default_value_t = false)]
        no_output: bool,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl,
}

fn main() {
    let code = match Command::parse() {
        Command::Run { path, fuel } => run(path, fuel),
        Command::Check { path, no_output, print_ast } => check(path, no_output, print_ast),
        Command::Rlpl => match rlpl::start() {
            Ok(()) => 0,
            Err(_) => 1,
        },
        Command::Rppl => match rppl::start() {
            Ok(()) => 0,
            Err(_) => 1,
        },
    };

    std::process::exit(code);
}

fn run(path: PathBuf, fuel: Option<u64>) -> i32 {
    ctrlc::set_handler(|| std::process::exit(130)).expect("setting Ctrl-C handler");

    print_running(path.to_str().unwrap_or_default());
    let start = std::time::Instant::now();

    let mut io = ConsoleIO;
    let result = run_file(&path, &mut io, fuel);

    match result {
        Ok(()) => {
            print_finished(std::time::Instant::now() - start);
            0
        },
        Err(err) => {
            let buf_writer = crate::cli::stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            err.pretty(&mut buf);
            buf_writer.print(&buf).expect("Writing error to stderr");
            1
        },
    }
}

fn check(path: PathBuf, no_output: bool, print_ast: bool) -> i32 {
    print_checking(path.to_str().unwrap_or_default());
    let start = std::time::Instant::now();

    match check_file(&path) {
        Ok(program) => {
            if !no_output {
                if print_ast {
                    println!("{program:#?}");
                } else {
                    println!("{program}");
                }
            }

            print_checked(std::time::Instant::now() - start);
            0
        },
        Err(err) => {
            let buf_writer = crate::cli::stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            err.pretty(&mut buf);
            buf_writer.print(&buf).expect("Writing error to stderr");
            1
        },
    }
}

/// Terminal-backed program IO: DISPLAY goes to stdout, SCAN reads a line
/// from stdin.
pub struct ConsoleIO;

impl ProgramIO for ConsoleIO {
    fn display(&mut self, text: &str) -> std::io::Result<()> {
        let mut stdout = std::io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }

    fn request_line(&mut self) -> std::io::Result<String> {
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if let Some('\n') = input.chars().next_back() {
            input.pop();
        }
        if let Some('\r') = input.chars().next_back() {
            input.pop();
        }

        Ok(input)
    }
}
