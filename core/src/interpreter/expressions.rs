//! Expression evaluation
//!
//! Evaluates the payload of `PLEASE CALC :10.`:
//! 1. Datasub names are substituted textually (whole words only); each
//!    value must be a numeral, optionally negative
//! 2. A literal `/ 0` is rejected before evaluation
//! 3. The remaining text is parsed by the `calculation` grammar rule and
//!    folded into an `f64`
//!
//! Only `+ - * /`, unary signs, parentheses and decimal numerals are
//! understood. Anything else is a math error.

use pest::iterators::Pair;
use pest::Parser;

use super::databer::Databer;
use super::errors::EvalError;
use super::parser::{GrammarParser, Rule};

/* ===================== Public API ===================== */

/// Substitute `names` into `expression` and evaluate it
///
/// Every name must exist in the Databer and hold a numeral. Returns the
/// result in its shortest decimal form.
pub fn evaluate(expression: &str, names: &[&str], databer: &Databer) -> Result<String, EvalError> {
    let mut text = expression.to_string();
    for name in names {
        let value = databer
            .read_named(name)
            .ok_or_else(|| EvalError::UnknownName(name.to_string()))?;
        if !is_numeral(value) {
            return Err(EvalError::Math(expression.to_string()));
        }
        text = substitute(&text, name, value);
    }

    if divides_by_literal_zero(&text) {
        return Err(EvalError::DivisionByZero(expression.to_string()));
    }

    match calculate(&text) {
        Some(result) if result.is_finite() => Ok(format_number(result)),
        _ => Err(EvalError::Math(expression.to_string())),
    }
}

/// Identifier tokens of an expression, in order of first appearance
///
/// A token is a maximal run of word characters that does not start with
/// a digit.
pub fn identifiers(expression: &str) -> Vec<&str> {
    let mut found: Vec<&str> = Vec::new();
    for token in expression.split(|c: char| !is_word_char(c)) {
        let is_ident = token
            .chars()
            .next()
            .is_some_and(|c| !c.is_ascii_digit());
        if is_ident && !found.contains(&token) {
            found.push(token);
        }
    }
    found
}

/// Parse and evaluate plain arithmetic text
///
/// Returns `None` when the text is not a well-formed expression.
pub fn calculate(text: &str) -> Option<f64> {
    let calculation = GrammarParser::parse(Rule::calculation, text).ok()?.next()?;
    let expr = calculation.into_inner().next()?;
    eval_pair(expr)
}

/// Whether `value` is a decimal numeral with an optional leading `-`
pub fn is_numeral(value: &str) -> bool {
    GrammarParser::parse(Rule::numeral, value).is_ok()
}

/* ===================== Substitution ===================== */

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Replace whole-word occurrences of `name` with `value`
fn substitute(text: &str, name: &str, value: &str) -> String {
    if name.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut prev: Option<char> = None;

    while let Some(pos) = rest.find(name) {
        let before = rest[..pos].chars().next_back().or(prev);
        let after = rest[pos + name.len()..].chars().next();

        out.push_str(&rest[..pos]);
        if before.is_some_and(is_word_char) || after.is_some_and(is_word_char) {
            out.push_str(name);
        } else {
            out.push_str(value);
        }

        prev = name.chars().next_back();
        rest = &rest[pos + name.len()..];
    }

    out.push_str(rest);
    out
}

/// `/` followed by optional whitespace, then a `0` that is not part of a
/// longer numeral
fn divides_by_literal_zero(text: &str) -> bool {
    text.match_indices('/').any(|(i, _)| {
        text[i + 1..]
            .trim_start()
            .strip_prefix('0')
            .is_some_and(|after| !after.starts_with(|c: char| c.is_ascii_digit() || c == '.'))
    })
}

/* ===================== Evaluation ===================== */

fn eval_pair(pair: Pair<'_, Rule>) -> Option<f64> {
    match pair.as_rule() {
        Rule::expr | Rule::term => {
            let mut inner = pair.into_inner();
            let mut acc = eval_pair(inner.next()?)?;
            while let Some(op) = inner.next() {
                let rhs = eval_pair(inner.next()?)?;
                acc = match op.as_rule() {
                    Rule::add => acc + rhs,
                    Rule::sub => acc - rhs,
                    Rule::mul => acc * rhs,
                    Rule::div => acc / rhs,
                    _ => return None,
                };
            }
            Some(acc)
        }

        Rule::factor => {
            let mut sign = 1.0;
            for part in pair.into_inner() {
                match part.as_rule() {
                    Rule::neg => sign = -sign,
                    Rule::pos => {}
                    _ => return eval_pair(part).map(|v| sign * v),
                }
            }
            None
        }

        Rule::number => pair.as_str().parse().ok(),

        _ => None,
    }
}

fn format_number(value: f64) -> String {
    // -0 prints as "-0"
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
