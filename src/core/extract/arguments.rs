//! Splits a call's argument list into top-level argument groups.

use std::ops::Range;

use crate::core::lexer::{Operator, Token, TokenKind};

/// Split the arguments of a call whose opening parenthesis sits just before
/// `start`.
///
/// Each returned range indexes into `tokens` and spans one positional
/// argument, without the separating commas. Parentheses, brackets and braces
/// all nest, so commas inside nested calls, array literals or closures never
/// split the outer list.
///
/// Returns `None` when the input ends before the call is closed.
pub fn split_arguments(tokens: &[Token<'_>], start: usize) -> Option<Vec<Range<usize>>> {
    let mut groups = Vec::new();
    let mut depth = 1usize;
    let mut group_start = start;

    for (index, token) in tokens.iter().enumerate().skip(start) {
        let TokenKind::Operator(op) = token.kind else {
            continue;
        };
        match op {
            Operator::OpenParen | Operator::OpenBracket | Operator::OpenBrace => depth += 1,
            Operator::CloseParen | Operator::CloseBracket | Operator::CloseBrace => {
                depth -= 1;
                if depth == 0 {
                    if index > group_start || !groups.is_empty() {
                        groups.push(group_start..index);
                    }
                    return Some(groups);
                }
            }
            Operator::Comma if depth == 1 => {
                groups.push(group_start..index);
                group_start = index + 1;
            }
            _ => {}
        }
    }

    None
}
