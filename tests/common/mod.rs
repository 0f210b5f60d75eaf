#![allow(unused)]

use pretty_expr::constructors::id;
use pretty_expr::{Expression, ExpressionFormatter, FormattingConfig, PythonFormatter};

/// An identifier expression, for tests that know the name is valid.
pub fn var(name: &str) -> Expression {
    id(name).expect("valid identifier")
}

/// Format with the default width on the single-line path.
pub fn single_line(expression: &Expression) -> String {
    let config = FormattingConfig::default().with_single_line(true);
    PythonFormatter::new(config).to_text(expression)
}

/// Format width-aware with the given maximum width and indent width 4.
pub fn multi_line(expression: &Expression, max_width: usize) -> String {
    let config = FormattingConfig::new(max_width, 4, false).expect("valid config");
    PythonFormatter::new(config).to_text(expression)
}

fn compare_lines(message: &str, actual: &str, expected: &[&str]) {
    let actual_lines: Vec<&str> = actual.split('\n').collect();
    if actual_lines != expected {
        eprintln!(
            "{}\nEXPECTED:\n{}\nACTUAL:\n{}\n=========",
            message,
            expected.join("\n"),
            actual,
        );
        assert_eq!(actual_lines, expected);
    }
}

#[track_caller]
pub fn assert_single(expression: &Expression, expected: &str) {
    assert_eq!(single_line(expression), expected);
}

#[track_caller]
pub fn assert_multi(expression: &Expression, max_width: usize, expected: &[&str]) {
    compare_lines(
        &format!("IN FORMATTING AT WIDTH {}", max_width),
        &multi_line(expression, max_width),
        expected,
    );
}
