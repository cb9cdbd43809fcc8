//! Compile or syntax-check a JSON++ document

use super::CliError;
use crate::{CompileOptions, DEFAULT_MAX_DEPTH, Parser, compile_with, lexer::tokenize};

/// Options for the check command
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// JSON++ source text
    pub source: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
    /// Maximum nesting depth
    pub max_depth: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        CheckOptions {
            source: None,
            pretty: false,
            syntax_only: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Document compiled successfully to this JSON text
    Success(String),
}

/// Execute a jsonpp check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let source = options.source.as_deref().ok_or(CliError::NoInput)?;

    if options.syntax_only {
        let tokens = tokenize(source).map_err(crate::CompileError::from)?;
        Parser::new(tokens)
            .with_max_depth(options.max_depth)
            .parse()
            .map_err(crate::CompileError::from)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let compile_options = CompileOptions {
        max_depth: options.max_depth,
        pretty: options.pretty,
    };
    let json = compile_with(source, &compile_options)?;
    Ok(CheckResult::Success(json))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(source: &str) -> CheckOptions {
        CheckOptions {
            source: Some(source.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn compiles_source() {
        let result = execute_check(&options("[1 + 1]")).unwrap();
        assert_eq!(result, CheckResult::Success("[2]".to_string()));
    }

    #[test]
    fn syntax_only_skips_evaluation() {
        let mut opts = options(r#"1 / 0 + "x""#);
        opts.syntax_only = true;
        assert_eq!(execute_check(&opts).unwrap(), CheckResult::SyntaxValid);
    }

    #[test]
    fn syntax_only_reports_parse_errors() {
        let mut opts = options("[1, 2");
        opts.syntax_only = true;
        let err = execute_check(&opts).unwrap_err();
        assert!(err.to_string().contains("Expected ']'"), "{}", err);
    }

    #[test]
    fn missing_source_is_reported() {
        let err = execute_check(&CheckOptions::default()).unwrap_err();
        assert!(matches!(err, CliError::NoInput));
    }
}
