//! Extraction function signatures.
//!
//! Maps each recognized function name to the positional roles of its
//! arguments. Argument 0 is always the singular message; the other roles are
//! optional zero-based indices into the call's argument list.

use std::collections::HashMap;

/// Which message fields a call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageShape {
    Single,
    Context,
    Plural,
    PluralContext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentRoles {
    pub shape: MessageShape,
    pub plural: Option<usize>,
    pub context: Option<usize>,
    /// `None` for functions without a domain concept; those always match.
    pub domain: Option<usize>,
    /// Also extracted when invoked as `$obj->name()` or `Class::name()`.
    pub method_tolerant: bool,
}

impl ArgumentRoles {
    const fn single(domain: usize) -> Self {
        Self {
            shape: MessageShape::Single,
            plural: None,
            context: None,
            domain: Some(domain),
            method_tolerant: false,
        }
    }

    const fn context(context: usize, domain: usize) -> Self {
        Self {
            shape: MessageShape::Context,
            plural: None,
            context: Some(context),
            domain: Some(domain),
            method_tolerant: false,
        }
    }

    const fn plural(plural: usize, domain: usize) -> Self {
        Self {
            shape: MessageShape::Plural,
            plural: Some(plural),
            context: None,
            domain: Some(domain),
            method_tolerant: false,
        }
    }

    const fn plural_context(plural: usize, context: usize, domain: usize) -> Self {
        Self {
            shape: MessageShape::PluralContext,
            plural: Some(plural),
            context: Some(context),
            domain: Some(domain),
            method_tolerant: false,
        }
    }

    const fn bare() -> Self {
        Self {
            shape: MessageShape::Single,
            plural: None,
            context: None,
            domain: None,
            method_tolerant: true,
        }
    }
}

const DEFAULT_SIGNATURES: &[(&str, ArgumentRoles)] = &[
    ("__", ArgumentRoles::single(1)),
    ("_e", ArgumentRoles::single(1)),
    ("esc_html__", ArgumentRoles::single(1)),
    ("esc_html_e", ArgumentRoles::single(1)),
    ("esc_attr__", ArgumentRoles::single(1)),
    ("esc_attr_e", ArgumentRoles::single(1)),
    ("translate", ArgumentRoles::single(1)),
    ("_x", ArgumentRoles::context(1, 2)),
    ("_ex", ArgumentRoles::context(1, 2)),
    ("esc_html_x", ArgumentRoles::context(1, 2)),
    ("esc_attr_x", ArgumentRoles::context(1, 2)),
    ("_n", ArgumentRoles::plural(1, 3)),
    ("_n_noop", ArgumentRoles::plural(1, 2)),
    ("_nx", ArgumentRoles::plural_context(1, 2, 4)),
    ("_nx_noop", ArgumentRoles::plural_context(1, 2, 3)),
    // The only entry that is also extracted from method and static calls.
    ("t", ArgumentRoles::bare()),
];

/// Immutable lookup from function name to [`ArgumentRoles`].
///
/// Built once per run and borrowed by every file extractor.
#[derive(Debug, Clone)]
pub struct Registry {
    signatures: HashMap<&'static str, ArgumentRoles>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            signatures: DEFAULT_SIGNATURES.iter().copied().collect(),
        }
    }
}

impl Registry {
    /// Look up a called name. A leading namespace separator (`\__`) refers
    /// to the global function; any other namespaced name is not registered.
    pub fn lookup(&self, name: &str) -> Option<ArgumentRoles> {
        let name = name.strip_prefix('\\').unwrap_or(name);
        self.signatures.get(name).copied()
    }
}
