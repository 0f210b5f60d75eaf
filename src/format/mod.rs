//! Rendering expression trees as Python-style source text.
//!
//! [PythonFormatter] is the public entry point. It projects an expression
//! tree into a transient [TextualForm](form::TextualForm), then either joins
//! it on a single line or runs the width-aware layout pass.

mod form;
mod layout;

use crate::expression::Expression;
use form::TextualForm;
use once_cell::sync::OnceCell;

/// An error raised by an invalid formatting configuration, or by a second
/// attempt to register the process-wide default format.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("max_width must be positive")]
    InvalidMaxWidth,
    #[error("a default format is already registered")]
    DefaultAlreadyRegistered,
}

/// The parameters to use for formatting an expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormattingConfig {
    max_width: usize,
    indent_width: usize,
    single_line: bool,
}

impl FormattingConfig {
    /// Construct a configuration. `max_width` must be positive.
    pub fn new(
        max_width: usize,
        indent_width: usize,
        single_line: bool,
    ) -> Result<FormattingConfig, FormatError> {
        if max_width == 0 {
            return Err(FormatError::InvalidMaxWidth);
        }
        Ok(FormattingConfig {
            max_width,
            indent_width,
            single_line,
        })
    }

    /// The maximum line width. Ignored when `single_line` is set.
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// The number of spaces per indentation level.
    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// If true, always produce a single line regardless of width.
    pub fn single_line(&self) -> bool {
        self.single_line
    }

    /// A copy of this configuration with `single_line` replaced.
    pub fn with_single_line(mut self, single_line: bool) -> FormattingConfig {
        self.single_line = single_line;
        self
    }
}

impl Default for FormattingConfig {
    /// Maximum width 80, indent width 4, multi-line.
    fn default() -> FormattingConfig {
        FormattingConfig {
            max_width: 80,
            indent_width: 4,
            single_line: false,
        }
    }
}

/// An expression formatter produces text representations of expressions.
pub trait ExpressionFormatter {
    /// Construct a text representation of the given expression.
    fn to_text(&self, expression: &Expression) -> String;
}

/// Formats expressions as Python source text, in line with the `black`
/// style: as few lines as will fit, trailing commas hugging their values,
/// infix symbols leading continuation lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct PythonFormatter {
    config: FormattingConfig,
}

impl PythonFormatter {
    pub fn new(config: FormattingConfig) -> PythonFormatter {
        PythonFormatter { config }
    }
}

impl ExpressionFormatter for PythonFormatter {
    fn to_text(&self, expression: &Expression) -> String {
        let form = TextualForm::from_expression(expression);

        // A bare infix chain at top level gets multi-line-only parentheses;
        // the single-line path never shows them.
        let needs_encapsulation = form.needs_multi_line_encapsulation();
        let form = form.encapsulate(needs_encapsulation, false);

        form.to_text(&self.config)
    }
}

static DEFAULT_FORMAT: OnceCell<FormattingConfig> = OnceCell::new();

/// Register the process-wide default format used by `Display`. May be called
/// at most once; a second registration fails loudly instead of silently
/// overwriting.
pub fn register_default_format(config: FormattingConfig) -> Result<(), FormatError> {
    DEFAULT_FORMAT
        .set(config)
        .map_err(|_| FormatError::DefaultAlreadyRegistered)
}

/// The process-wide default format: the registered configuration, or the
/// built-in default if none was registered.
pub fn default_format() -> FormattingConfig {
    DEFAULT_FORMAT.get().copied().unwrap_or_default()
}

/// Render an expression with the default format. `{}` forces the
/// single-line path; `{:#}` keeps the registered configuration.
pub(crate) fn display_text(expression: &Expression, multi_line: bool) -> String {
    let config = default_format();
    let config = if multi_line {
        config
    } else {
        config.with_single_line(true)
    };
    PythonFormatter::new(config).to_text(expression)
}
