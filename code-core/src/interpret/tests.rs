use std::path::PathBuf;

use crate::eval::prelude::ScriptedIO;
use crate::utils::prelude::Error;

use super::prelude::*;

fn run(src: &str) -> (Result<(), Error>, String) {
    let mut io = ScriptedIO::new();
    let result = run_src(src, &PathBuf::from("test.code"), &mut io, None);

    (result, io.output)
}

#[test]
fn well_formed_program_runs() {
    let (result, output) = run(r#"BEGIN CODE
INT x = 2 * 3
DISPLAY: x
END CODE"#);

    assert!(result.is_ok());
    assert_eq!(output, "6");
}

#[test]
fn leading_and_trailing_blank_lines_are_allowed() {
    let (result, _) = run("\n\nBEGIN CODE\nINT x\nEND CODE\n\n");

    assert!(result.is_ok());
}

#[test]
fn missing_begin_is_a_structure_error() {
    assert_eq!(
        check_structure("INT x\nEND CODE"),
        Err(StructureError {
            error: StructureErrorType::MissingBegin,
            location: crate::utils::prelude::SrcSpan { start: 0, end: 0 },
        }),
    );
}

#[test]
fn missing_end_is_a_structure_error() {
    let result = check_structure("BEGIN CODE\nINT x\n");

    assert!(matches!(
        result,
        Err(StructureError { error: StructureErrorType::MissingEnd, .. }),
    ));
}

#[test]
fn second_opener_is_a_structure_error() {
    let result = check_structure("BEGIN CODE\nBEGIN CODE\nEND CODE");

    assert!(matches!(
        result,
        Err(StructureError { error: StructureErrorType::MultipleBegin, .. }),
    ));
}

#[test]
fn second_closer_is_a_structure_error() {
    let result = check_structure("BEGIN CODE\nEND CODE\nEND CODE");

    assert!(matches!(
        result,
        Err(StructureError { error: StructureErrorType::MultipleEnd, .. }),
    ));
}

#[test]
fn content_after_the_closer_is_rejected() {
    let result = check_structure("BEGIN CODE\nEND CODE\nINT x");

    assert!(matches!(
        result,
        Err(StructureError { error: StructureErrorType::TrailingContent, .. }),
    ));
}

#[test]
fn comments_after_the_closer_are_allowed() {
    assert_eq!(check_structure("BEGIN CODE\nEND CODE\n# done\n"), Ok(()));
}

#[test]
fn bare_end_without_code_is_rejected() {
    let result = check_structure("BEGIN CODE\nEND\n");

    assert!(matches!(
        result,
        Err(StructureError { error: StructureErrorType::MissingCloserCode, .. }),
    ));
}

#[test]
fn parse_failures_carry_the_source() {
    let (result, _) = run("BEGIN CODE\nINT = 5\nEND CODE");

    match result {
        Err(Error::Parse { src, .. }) => assert_eq!(src, "BEGIN CODE\nINT = 5\nEND CODE"),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn runtime_failures_carry_the_source() {
    let (result, _) = run("BEGIN CODE\nINT x = 1 / 0\nEND CODE");

    assert!(matches!(result, Err(Error::Runtime { .. })));
}

#[test]
fn missing_file_is_a_std_io_error() {
    let result = check_file(&PathBuf::from("does-not-exist.code"));

    assert!(matches!(result, Err(Error::StdIo { .. })));
}
