pub mod error;

pub mod prelude {
    pub use super::{
        error::*, check_file, check_src, check_structure, read_source, run_file, run_src,
    };
}

#[cfg(test)]
mod tests;

use std::path::Path;

use utf8_chars::BufReadCharsExt;

use crate::{
    eval::prelude::{Evaluator, ProgramIO},
    lexer::prelude::{Lexer, Token},
    parser::prelude::{parse_program, Program},
    utils::prelude::{Error, SrcSpan},
};

use self::error::{StructureError, StructureErrorType};

/// Reads, checks and evaluates the program at `path`.
pub fn run_file(
    path: &Path,
    io: &mut dyn ProgramIO,
    fuel: Option<u64>,
) -> Result<(), Error> {
    let src = read_source(path)?;

    run_src(&src, path, io, fuel)
}

pub fn run_src(
    src: &str,
    path: &Path,
    io: &mut dyn ProgramIO,
    fuel: Option<u64>,
) -> Result<(), Error> {
    let program = check_src(src, path)?;

    let mut evaluator = match fuel {
        Some(fuel) => Evaluator::with_fuel(io, fuel),
        None => Evaluator::new(io),
    };

    evaluator.run(&program).map_err(|error| Error::Runtime {
        path: path.to_path_buf(),
        src: src.to_string(),
        error,
    })
}

/// Checks the program at `path` without running it.
pub fn check_file(path: &Path) -> Result<Program, Error> {
    let src = read_source(path)?;

    check_src(&src, path)
}

pub fn check_src(src: &str, path: &Path) -> Result<Program, Error> {
    check_structure(src).map_err(|error| Error::Structure {
        path: path.to_path_buf(),
        src: src.to_string(),
        error,
    })?;

    parse_program(src).map_err(|error| Error::Parse {
        path: path.to_path_buf(),
        src: src.to_string(),
        error,
    })
}

pub fn read_source(path: &Path) -> Result<String, Error> {
    let file = match std::fs::File::open(path) {
        Ok(file) => file,
        Err(err) => return Err(Error::StdIo { err: err.kind() }),
    };

    let mut reader = std::io::BufReader::new(file);

    reader
        .chars()
        .collect::<std::io::Result<String>>()
        .map_err(|err| Error::StdIo { err: err.kind() })
}

/// Verifies the program frame before parsing: exactly one `BEGIN CODE`
/// opener, exactly one `END CODE` closer, and nothing after the closer.
///
/// The `END` keyword lexes as an end-of-input token with a non-empty span;
/// the synthetic one the lexer appends is empty. That difference is what
/// tells a closer apart from running out of input.
pub fn check_structure(src: &str) -> Result<(), StructureError> {
    let lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));

    // Lexical errors are skipped here and surface through the parser.
    let tokens = lexer
        .filter_map(|result| result.ok())
        .collect::<Vec<(u32, Token, u32)>>();

    let limit = src.len() as u32;

    let begins = tokens
        .iter()
        .enumerate()
        .filter(|(_, (_, token, _))| *token == Token::Begin)
        .map(|(i, _)| i)
        .collect::<Vec<usize>>();

    let ends = tokens
        .iter()
        .enumerate()
        .filter(|(_, (start, token, end))| *token == Token::Eof && start < end)
        .map(|(i, _)| i)
        .collect::<Vec<usize>>();

    let opener = match begins.as_slice() {
        [] => {
            return Err(StructureError {
                error: StructureErrorType::MissingBegin,
                location: SrcSpan { start: 0, end: 0 },
            })
        },
        [opener] => *opener,
        [_, second, ..] => {
            let (start, _, end) = tokens[*second];
            return Err(StructureError {
                error: StructureErrorType::MultipleBegin,
                location: SrcSpan { start, end },
            });
        },
    };

    if !matches!(tokens.get(opener + 1), Some((_, Token::Code, _))) {
        let (start, _, end) = tokens[opener];
        return Err(StructureError {
            error: StructureErrorType::MissingOpenerCode,
            location: SrcSpan { start, end },
        });
    }

    let closer = match ends.as_slice() {
        [] => {
            return Err(StructureError {
                error: StructureErrorType::MissingEnd,
                location: SrcSpan { start: limit, end: limit },
            })
        },
        [closer] => *closer,
        [_, second, ..] => {
            let (start, _, end) = tokens[*second];
            return Err(StructureError {
                error: StructureErrorType::MultipleEnd,
                location: SrcSpan { start, end },
            });
        },
    };

    if !matches!(tokens.get(closer + 1), Some((_, Token::Code, _))) {
        let (start, _, end) = tokens[closer];
        return Err(StructureError {
            error: StructureErrorType::MissingCloserCode,
            location: SrcSpan { start, end },
        });
    }

    for (start, token, end) in &tokens[closer + 2..] {
        match token {
            Token::Newline => {},
            Token::Eof if start == end => {},
            _ => {
                return Err(StructureError {
                    error: StructureErrorType::TrailingContent,
                    location: SrcSpan { start: *start, end: *end },
                })
            },
        }
    }

    Ok(())
}
