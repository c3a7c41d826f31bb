use crate::parser::ParseError;
use crate::span::Span;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum QuillError {
    #[error("Parse Error: {message}")]
    #[diagnostic(code(quill::parser::error))]
    Parse {
        message: String,
        #[label("{message}")]
        span: SourceSpan,
    },
}

impl QuillError {
    pub fn new_parse(message: String, span: Span) -> Self {
        QuillError::Parse {
            message,
            span: span.into(),
        }
    }
}

impl From<ParseError> for QuillError {
    fn from(error: ParseError) -> Self {
        QuillError::new_parse(error.message, error.span)
    }
}
