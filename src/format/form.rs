//! The textual form: a transient, per-format projection of an expression
//! tree.
//!
//! Every complex form caches the exact display width of its single-line
//! rendering, computed bottom-up once at construction. The fit/no-fit
//! decision in the layout pass is therefore O(1) per node instead of
//! re-rendering subtrees.

use crate::expression::{BracketPair, Expression, Operation};
use crate::operator::BinaryOperator;
use unicode_width::UnicodeWidthStr;

/// A hierarchical textual representation of an expression.
#[derive(Debug)]
pub(crate) enum TextualForm {
    /// The empty expression. Renders as nothing, on zero lines.
    Empty,
    /// An unsplittable token: a literal or identifier.
    Atomic(AtomicForm),
    /// A form surrounded by brackets.
    Bracketed(BracketedForm),
    /// A prefix, a separator, and a body.
    Prefix(PrefixForm),
    /// Two or more forms joined by an infix symbol.
    Infix(InfixForm),
}

#[derive(Debug)]
pub(crate) struct AtomicForm {
    pub(super) text: String,
    pub(super) width: usize,
}

#[derive(Debug)]
pub(crate) struct BracketedForm {
    pub(super) brackets: BracketPair,
    pub(super) subform: Box<TextualForm>,
    /// If false, the brackets appear only in multi-line output. Used for
    /// encapsulation that exists to disambiguate boundaries across line
    /// breaks, not for precedence.
    pub(super) visible_in_single_line: bool,
    width: usize,
}

#[derive(Debug)]
pub(crate) struct PrefixForm {
    pub(super) prefix: Box<TextualForm>,
    pub(super) separator: String,
    pub(super) separator_width: usize,
    pub(super) body: Box<TextualForm>,
    width: usize,
}

/// How an infix symbol is padded with spaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum InfixPadding {
    /// No spaces: `a.b`.
    None,
    /// A trailing space only: `a, b`.
    Right,
    /// Spaces on both sides: `a + b`.
    Both,
}

impl InfixPadding {
    fn spaces(self) -> usize {
        match self {
            InfixPadding::None => 0,
            InfixPadding::Right => 1,
            InfixPadding::Both => 2,
        }
    }
}

#[derive(Debug)]
pub(crate) struct InfixForm {
    pub(super) infix: &'static str,
    pub(super) padding: InfixPadding,
    pub(super) subforms: Vec<TextualForm>,
    width: usize,
}

impl TextualForm {
    /// Generate the textual form of the given expression.
    pub(crate) fn from_expression(expression: &Expression) -> TextualForm {
        match expression {
            Expression::Epsilon => TextualForm::Empty,
            Expression::Lit(literal) => TextualForm::atomic(literal.text()),
            Expression::Id(identifier) => TextualForm::atomic(identifier.name().to_owned()),
            Expression::Collection(collection) => TextualForm::Bracketed(BracketedForm::new(
                collection.brackets(),
                TextualForm::from_expression(&collection.interior()),
                true,
            )),
            Expression::Operation(operation) => TextualForm::from_operation(operation),
            Expression::Alias(alias) => TextualForm::from_expression(&alias.expression()),
            prefix => TextualForm::from_prefix(prefix),
        }
    }

    fn atomic(text: String) -> TextualForm {
        let width = text.width();
        TextualForm::Atomic(AtomicForm { text, width })
    }

    fn from_prefix(expression: &Expression) -> TextualForm {
        let parts = expression
            .prefix_parts()
            .expect("non-prefix node kinds are matched before from_prefix");

        let prefix_form = TextualForm::from_expression(&parts.prefix)
            .encapsulate(parts.prefix.precedence() < parts.precedence, true);

        let encapsulate_body = parts.body.precedence() < parts.precedence;
        let body_form = TextualForm::from_expression(&parts.body);
        let body_needs_multi_line = body_form.needs_multi_line_encapsulation();
        let body_form = body_form.encapsulate(
            encapsulate_body || body_needs_multi_line,
            encapsulate_body,
        );

        // A wordy separator needs a space toward any non-empty neighbor:
        // `not x`, `lambda x: y`.
        let mut separator = parts.separator;
        if prefix_form.width() > 0 && separator.chars().next().map_or(false, char::is_alphabetic) {
            separator.insert(0, ' ');
        }
        if body_form.width() > 0
            && separator
                .chars()
                .next_back()
                .map_or(false, char::is_alphabetic)
        {
            separator.push(' ');
        }

        TextualForm::Prefix(PrefixForm::new(prefix_form, separator, body_form))
    }

    fn from_operation(operation: &Operation) -> TextualForm {
        let operands: Vec<&Expression> = operation.operand_refs().collect();
        if operands.len() == 1 {
            return TextualForm::from_expression(operands[0]);
        }

        let precedence = operation.precedence();
        let last = operands.len() - 1;
        let subforms = operands
            .iter()
            .enumerate()
            .map(|(pos, operand)| {
                let needs_parens = if pos == 0 {
                    // Strict for the first operand: an equal-precedence chain
                    // was either flattened or deliberately left-grouped.
                    operand.precedence() < precedence
                } else {
                    operand.precedence() <= precedence
                        // A trailing prefix expression with an empty prefix
                        // (e.g. a unary operation) is unambiguous without
                        // parentheses.
                        && (pos < last || !operand.is_prefix_with_empty_prefix())
                };
                TextualForm::from_expression(operand).encapsulate(needs_parens, true)
            })
            .collect();

        let padding = match operation.operator() {
            BinaryOperator::Comma | BinaryOperator::Colon => InfixPadding::Right,
            BinaryOperator::Dot | BinaryOperator::Slice | BinaryOperator::Empty => {
                InfixPadding::None
            }
            _ => InfixPadding::Both,
        };

        TextualForm::Infix(InfixForm::new(
            operation.operator().symbol(),
            padding,
            subforms,
        ))
    }

    /// The display width of this form's single-line rendering. O(1).
    pub(crate) fn width(&self) -> usize {
        match self {
            TextualForm::Empty => 0,
            TextualForm::Atomic(form) => form.width,
            TextualForm::Bracketed(form) => form.width,
            TextualForm::Prefix(form) => form.width,
            TextualForm::Infix(form) => form.width,
        }
    }

    /// Render this form as a single line, with no width checks.
    pub(crate) fn to_single_line(&self) -> String {
        match self {
            TextualForm::Empty => String::new(),
            TextualForm::Atomic(form) => form.text.clone(),
            TextualForm::Bracketed(form) => {
                let interior = form.subform.to_single_line();
                if form.visible_in_single_line {
                    format!("{}{}{}", form.brackets.opening, interior, form.brackets.closing)
                } else {
                    interior
                }
            }
            TextualForm::Prefix(form) => format!(
                "{}{}{}",
                form.prefix.to_single_line(),
                form.separator,
                form.body.to_single_line()
            ),
            TextualForm::Infix(form) => {
                let infix = match form.padding {
                    InfixPadding::None => form.infix.to_owned(),
                    InfixPadding::Right => format!("{} ", form.infix),
                    InfixPadding::Both => format!(" {} ", form.infix),
                };
                form.subforms
                    .iter()
                    .map(TextualForm::to_single_line)
                    .collect::<Vec<_>>()
                    .join(&infix)
            }
        }
    }

    /// Whether this form must be wrapped in brackets when rendered across
    /// multiple lines: a bare infix chain inside another construct would
    /// have ambiguous boundaries once broken.
    pub(crate) fn needs_multi_line_encapsulation(&self) -> bool {
        match self {
            TextualForm::Infix(_) => true,
            TextualForm::Prefix(form) => form.prefix.needs_multi_line_encapsulation(),
            _ => false,
        }
    }

    /// Wrap this form in round parentheses if `condition` holds. If
    /// `single_line` is false, the parentheses appear only in multi-line
    /// output.
    pub(crate) fn encapsulate(self, condition: bool, single_line: bool) -> TextualForm {
        if condition {
            TextualForm::Bracketed(BracketedForm::new(BracketPair::ROUND, self, single_line))
        } else {
            self
        }
    }
}

impl BracketedForm {
    fn new(
        brackets: BracketPair,
        subform: TextualForm,
        visible_in_single_line: bool,
    ) -> BracketedForm {
        let bracket_width = if visible_in_single_line {
            brackets.opening.width() + brackets.closing.width()
        } else {
            0
        };
        BracketedForm {
            width: bracket_width + subform.width(),
            brackets,
            subform: Box::new(subform),
            visible_in_single_line,
        }
    }
}

impl PrefixForm {
    fn new(prefix: TextualForm, separator: String, body: TextualForm) -> PrefixForm {
        let separator_width = separator.width();
        PrefixForm {
            width: prefix.width() + separator_width + body.width(),
            prefix: Box::new(prefix),
            separator,
            separator_width,
            body: Box::new(body),
        }
    }
}

impl InfixForm {
    fn new(infix: &'static str, padding: InfixPadding, subforms: Vec<TextualForm>) -> InfixForm {
        // Under a pad-right infix, a bare infix subform gets multi-line-only
        // parentheses; its boundary would otherwise blur with the chain's
        // when broken across lines.
        let subforms: Vec<TextualForm> = if padding == InfixPadding::Right {
            subforms
                .into_iter()
                .map(|subform| {
                    let is_infix = matches!(subform, TextualForm::Infix(_));
                    subform.encapsulate(is_infix, false)
                })
                .collect()
        } else {
            subforms
        };

        let joint_width = infix.width() + padding.spaces();
        let width = subforms.iter().map(TextualForm::width).sum::<usize>()
            + subforms.len().saturating_sub(1) * joint_width;

        InfixForm {
            infix,
            padding,
            subforms,
            width,
        }
    }
}
