use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureErrorType {
    MissingBegin,
    MultipleBegin,
    MissingOpenerCode,
    MissingEnd,
    MultipleEnd,
    MissingCloserCode,
    TrailingContent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureError {
    pub error: StructureErrorType,
    pub location: SrcSpan,
}

impl StructureError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            StructureErrorType::MissingBegin => (
                "The program must open with `BEGIN CODE`",
                vec![],
            ),
            StructureErrorType::MultipleBegin => (
                "The program can only open once",
                vec!["A second `BEGIN CODE` was found here.".to_string()],
            ),
            StructureErrorType::MissingOpenerCode => (
                "`BEGIN` must be followed by `CODE`",
                vec![],
            ),
            StructureErrorType::MissingEnd => (
                "The program must close with `END CODE`",
                vec![],
            ),
            StructureErrorType::MultipleEnd => (
                "The program can only close once",
                vec!["A second `END CODE` was found here.".to_string()],
            ),
            StructureErrorType::MissingCloserCode => (
                "`END` must be followed by `CODE`",
                vec![],
            ),
            StructureErrorType::TrailingContent => (
                "Nothing may follow `END CODE`",
                vec![],
            ),
        }
    }
}
