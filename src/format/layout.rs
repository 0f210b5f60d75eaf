//! The fit/no-fit layout pass: renders a textual form as indented lines,
//! deciding per subtree whether it fits on one line or must be broken.
//!
//! The decision at each node is a single comparison against the cached
//! single-line width, with `leading` and `trailing` budgets threaded through
//! recursive calls: the space already committed on the current line by
//! siblings before and after this form.

use super::form::{InfixPadding, TextualForm};
use super::FormattingConfig;
use unicode_width::UnicodeWidthStr;

/// A line of output with its indentation level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct IndentedLine {
    pub(crate) indent: usize,
    pub(crate) text: String,
}

impl IndentedLine {
    fn new(indent: usize, text: impl Into<String>) -> IndentedLine {
        IndentedLine {
            indent,
            text: text.into(),
        }
    }

    fn prepend(self, text: &str) -> IndentedLine {
        IndentedLine {
            indent: self.indent,
            text: format!("{}{}", text, self.text),
        }
    }

    fn append(mut self, text: &str) -> IndentedLine {
        self.text.push_str(text);
        self
    }
}

impl TextualForm {
    /// Render this form as a string under the given configuration.
    pub(crate) fn to_text(&self, config: &FormattingConfig) -> String {
        if config.single_line() {
            self.to_single_line()
        } else {
            let lines = self.to_lines(config, 0, 0, 0);
            let mut text = String::new();
            for (i, line) in lines.iter().enumerate() {
                if i > 0 {
                    text.push('\n');
                }
                for _ in 0..config.indent_width() * line.indent {
                    text.push(' ');
                }
                text.push_str(&line.text);
            }
            text
        }
    }

    /// Generate indented lines from this form. `leading` and `trailing` are
    /// the character budgets already committed on the first and last line by
    /// siblings.
    pub(crate) fn to_lines(
        &self,
        config: &FormattingConfig,
        indent: usize,
        leading: usize,
        trailing: usize,
    ) -> Vec<IndentedLine> {
        match self {
            TextualForm::Empty => vec![],
            // Atomic tokens are unsplittable: emit them even when they alone
            // exceed the width.
            TextualForm::Atomic(form) => vec![IndentedLine::new(indent, form.text.clone())],
            _ => {
                let exceeds = leading + self.width() + indent * config.indent_width() + trailing
                    > config.max_width();
                if exceeds {
                    self.to_multiple_lines(config, indent, leading, trailing)
                } else {
                    vec![IndentedLine::new(indent, self.to_single_line())]
                }
            }
        }
    }

    fn to_multiple_lines(
        &self,
        config: &FormattingConfig,
        indent: usize,
        leading: usize,
        trailing: usize,
    ) -> Vec<IndentedLine> {
        match self {
            TextualForm::Empty | TextualForm::Atomic(_) => {
                unreachable!("atomic forms are never split")
            }
            TextualForm::Bracketed(form) => {
                let mut lines = vec![IndentedLine::new(indent, form.brackets.opening)];
                lines.extend(form.subform.to_lines(config, indent + 1, 0, 0));
                lines.push(IndentedLine::new(indent, form.brackets.closing));
                lines
            }
            TextualForm::Prefix(form) => {
                let mut prefix_lines = form.prefix.to_lines(config, indent, leading, 0);

                let body_leading = prefix_lines
                    .last()
                    .map_or(0, |line| line.text.width())
                    + form.separator_width;
                let mut body_lines = form.body.to_lines(config, indent, body_leading, trailing);
                if body_lines.is_empty() {
                    body_lines.push(IndentedLine::new(indent, ""));
                }

                // The separator is glued to the end of the prefix's last
                // line and the start of the body's first line.
                let first_body = body_lines.remove(0);
                let merged = match prefix_lines.pop() {
                    Some(last_prefix) => last_prefix.append(&form.separator).append(&first_body.text),
                    None => first_body.prepend(&form.separator),
                };

                let mut lines = prefix_lines;
                lines.push(merged);
                lines.extend(body_lines);
                lines
            }
            TextualForm::Infix(form) => {
                // A degenerate single-operand chain simply recurses.
                if form.subforms.len() == 1 {
                    return form.subforms[0].to_lines(config, indent, leading, trailing);
                }

                let last_idx = form.subforms.len() - 1;
                let mut result = Vec::new();

                if form.padding == InfixPadding::Right {
                    // Right-glue: the symbol hugs the end of each operand's
                    // last line, except after the final operand.
                    let infix_width = form.infix.width();
                    for (idx, subform) in form.subforms.iter().enumerate() {
                        let mut lines = subform.to_lines(
                            config,
                            indent,
                            if idx == 0 { leading } else { 0 },
                            if idx < last_idx { infix_width } else { trailing },
                        );
                        if idx != last_idx {
                            match lines.pop() {
                                Some(line) => lines.push(line.append(form.infix)),
                                None => lines.push(IndentedLine::new(indent, form.infix)),
                            }
                        }
                        result.extend(lines);
                    }
                } else {
                    // Left-glue: the symbol starts each operand's first
                    // line, except before the first operand.
                    let infix = match form.padding {
                        InfixPadding::Both => format!("{} ", form.infix),
                        _ => form.infix.to_owned(),
                    };
                    let infix_width = infix.width();
                    for (idx, subform) in form.subforms.iter().enumerate() {
                        let mut lines = subform.to_lines(
                            config,
                            indent,
                            if idx == 0 { leading } else { infix_width },
                            if idx == last_idx { trailing } else { 0 },
                        );
                        if idx != 0 {
                            if lines.is_empty() {
                                lines.push(IndentedLine::new(indent, infix.clone()));
                            } else {
                                let first = lines.remove(0);
                                lines.insert(0, first.prepend(&infix));
                            }
                        }
                        result.extend(lines);
                    }
                }

                result
            }
        }
    }
}
