//! Call-site scanning.
//!
//! Walks one file's token stream looking for `name(` shapes whose name is in
//! the [`Registry`], resolves the arguments each role points at, applies the
//! domain filter and yields one [`ExtractedMessage`] per successful call.
//!
//! Failures here are routine and silent: a call with a dynamic argument or an
//! unsupported shape simply produces nothing.

pub mod arguments;
pub mod comments;
pub mod literal;


use crate::core::{
    catalog::MessageKey,
    lexer::{Operator, Token, TokenKind, next_significant, previous_significant, tokenize},
    registry::{ArgumentRoles, Registry},
};

use arguments::split_arguments;
use comments::CommentTracker;
use literal::resolve_literal;

/// A message found in one file, before it is merged into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub key: MessageKey,
    /// Line of the called name.
    pub line: usize,
    /// Normalized translator hint, if one immediately preceded the call.
    pub comment: Option<String>,
}

/// Extracts messages for one text domain from PHP source text.
pub struct FileExtractor<'a> {
    registry: &'a Registry,
    domain: &'a str,
}

impl<'a> FileExtractor<'a> {
    pub fn new(registry: &'a Registry, domain: &'a str) -> Self {
        Self { registry, domain }
    }

    /// Extract every message in `source`, in source order.
    pub fn extract(&self, source: &str) -> Vec<ExtractedMessage> {
        let tokens = tokenize(source);
        let mut comments = CommentTracker::default();
        let mut messages = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Whitespace => {}
                TokenKind::Comment => comments.observe(token.text),
                _ => match self.extract_call(&tokens, index) {
                    Some(key) => messages.push(ExtractedMessage {
                        key,
                        line: token.line,
                        comment: comments.take(),
                    }),
                    None => comments.clear(),
                },
            }
        }

        messages
    }

    /// Try to extract a message from a call starting at `tokens[index]`.
    ///
    /// Scanning continues token by token afterwards, so registered calls
    /// nested inside another call's arguments are still found.
    fn extract_call(&self, tokens: &[Token<'_>], index: usize) -> Option<MessageKey> {
        let name = &tokens[index];
        if name.kind != TokenKind::Identifier {
            return None;
        }
        let roles = self.registry.lookup(name.text)?;

        let open = next_significant(tokens, index + 1)?;
        if tokens[open].kind != TokenKind::Operator(Operator::OpenParen) {
            return None;
        }

        if !roles.method_tolerant && is_member_call(tokens, index) {
            return None;
        }

        let arguments = split_arguments(tokens, open + 1)?;
        let resolve = |position: usize| {
            arguments
                .get(position)
                .and_then(|range| resolve_literal(&tokens[range.clone()]))
        };

        let singular = resolve(0).filter(|text| !text.is_empty())?;
        let plural = optional_role(roles.plural, resolve)?;
        let context = optional_role(roles.context, resolve)?;

        if !self.domain_matches(&roles, resolve) {
            return None;
        }

        Some(MessageKey {
            context,
            singular,
            plural,
        })
    }

    /// A domain argument that is missing or not a literal counts as a match.
    fn domain_matches(
        &self,
        roles: &ArgumentRoles,
        resolve: impl Fn(usize) -> Option<String>,
    ) -> bool {
        match roles.domain.and_then(resolve) {
            Some(domain) => domain == self.domain,
            None => true,
        }
    }
}

/// Resolve a role that may be absent from the signature.
///
/// The outer `Option` is `None` when the role exists but its argument doesn't
/// resolve, which fails the whole call.
fn optional_role(
    position: Option<usize>,
    resolve: impl Fn(usize) -> Option<String>,
) -> Option<Option<String>> {
    match position {
        Some(position) => resolve(position).map(Some),
        None => Some(None),
    }
}

fn is_member_call(tokens: &[Token<'_>], index: usize) -> bool {
    previous_significant(tokens, index).is_some_and(|prev| {
        matches!(
            tokens[prev].kind,
            TokenKind::Operator(Operator::MemberAccess | Operator::StaticAccess)
        )
    })
}
