//! Grammar arena: literals, abbreviations, match nodes and rules
//!
//! Everything is addressed by index so recursive and mutually recursive rules
//! are ordinary `RuleId` references rather than ownership cycles.

use super::literal::Literal;
use std::collections::HashMap;
use std::fmt;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub(crate) usize);

        impl $name {
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(
    /// Index of a [`Literal`] in its grammar
    LiteralId
);
arena_id!(
    /// Index of an [`Abbrev`] in its grammar
    AbbrevId
);
arena_id!(
    /// Index of a [`Match`] node in its grammar
    MatchId
);
arena_id!(
    /// Index of a [`Rule`] in its grammar
    RuleId
);

/// Repetition policy of a quantifiable node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quantifier {
    #[default]
    Once,
    /// zero or one
    Maybe,
    /// zero or more
    Star,
    /// one or more
    Plus,
}

impl Quantifier {
    /// Whether zero occurrences still count as a match
    pub fn allows_zero(self) -> bool {
        matches!(self, Quantifier::Maybe | Quantifier::Star)
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self {
            Quantifier::Once => "",
            Quantifier::Maybe => "?",
            Quantifier::Star => "*",
            Quantifier::Plus => "+",
        };
        f.write_str(suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    Literal(LiteralId),
    /// The grammar's any-token literal
    Any,
    /// A labelled node inside `owner`'s body, looked up when matched
    Field { owner: RuleId, name: String },
    Alternative {
        children: Vec<MatchId>,
        quant: Quantifier,
    },
    Sequence {
        children: Vec<MatchId>,
        quant: Quantifier,
    },
    RuleRef { rule: RuleId, quant: Quantifier },
    AbbrevRef(AbbrevId),
}

/// One node of a rule body
#[derive(Debug, Clone)]
pub struct Match {
    pub(crate) kind: MatchKind,
    pub(crate) label: Option<String>,
    pub(crate) first: Vec<LiteralId>,
    pub(crate) nullable: bool,
}

impl Match {
    pub(crate) fn new(kind: MatchKind) -> Self {
        Self {
            kind,
            label: None,
            first: Vec::new(),
            nullable: false,
        }
    }

    pub fn kind(&self) -> &MatchKind {
        &self.kind
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Literals that can start this node, sorted by id
    pub fn first(&self) -> &[LiteralId] {
        &self.first
    }

    /// Whether this node can match without consuming input
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn quantifier(&self) -> Option<Quantifier> {
        match &self.kind {
            MatchKind::Alternative { quant, .. }
            | MatchKind::Sequence { quant, .. }
            | MatchKind::RuleRef { quant, .. } => Some(*quant),
            _ => None,
        }
    }

    pub fn children(&self) -> &[MatchId] {
        match &self.kind {
            MatchKind::Alternative { children, .. } | MatchKind::Sequence { children, .. } => {
                children
            }
            _ => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub(crate) name: String,
    pub(crate) body: MatchId,
}

impl Rule {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> MatchId {
        self.body
    }
}

/// A named literal macro
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abbrev {
    pub(crate) name: String,
    pub(crate) literal: LiteralId,
}

impl Abbrev {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn literal(&self) -> LiteralId {
        self.literal
    }
}

/// An immutable, compiled grammar.
///
/// Built once by [`GrammarBuilder`](super::GrammarBuilder) and shared freely
/// between match attempts (and threads); matching only reads it.
#[derive(Debug)]
pub struct Grammar {
    pub(crate) literals: Vec<Literal>,
    pub(crate) abbrevs: Vec<Abbrev>,
    pub(crate) matches: Vec<Match>,
    pub(crate) rules: Vec<Rule>,
    pub(crate) rule_index: HashMap<String, RuleId>,
    pub(crate) abbrev_index: HashMap<String, AbbrevId>,
    pub(crate) start: RuleId,
    pub(crate) any: LiteralId,
}

impl Grammar {
    pub fn start(&self) -> RuleId {
        self.start
    }

    pub fn any_literal(&self) -> LiteralId {
        self.any
    }

    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.0)
    }

    pub fn rule_named(&self, name: &str) -> Option<RuleId> {
        self.rule_index.get(name).copied()
    }

    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| (RuleId(index), rule))
    }

    pub fn node(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id.0)
    }

    pub fn literal(&self, id: LiteralId) -> Option<&Literal> {
        self.literals.get(id.0)
    }

    pub fn abbrev(&self, id: AbbrevId) -> Option<&Abbrev> {
        self.abbrevs.get(id.0)
    }

    pub fn abbrev_named(&self, name: &str) -> Option<AbbrevId> {
        self.abbrev_index.get(name).copied()
    }

    /// Find the node labelled `name` in `owner`'s body.
    ///
    /// The search walks alternatives and sequences in declaration order and
    /// does not follow rule references into other rules.
    pub fn find_field(&self, owner: RuleId, name: &str) -> Option<MatchId> {
        let mut stack = vec![self.rule(owner)?.body];
        while let Some(id) = stack.pop() {
            let node = self.node(id)?;
            if node.label() == Some(name) {
                return Some(id);
            }
            stack.extend(node.children().iter().rev());
        }
        None
    }
}
