//! Programmatic grammar construction
//!
//! A grammar compiler (or a test) describes rules as [`Expr`] trees that
//! refer to rules and abbreviations by name. [`GrammarBuilder::build`]
//! resolves the names to arena indices, validates every reference, and
//! precomputes first-sets.
//!
//! ```rust,ignore
//! let mut b = GrammarBuilder::new();
//! let key = b.regex("[A-Za-z]+")?;
//! let eq = b.text("=");
//! let ws = b.regex("[ \t]*")?;
//! b.abbrev("ws", ws)?;
//! b.rule("entry", seq([lit(key), abbrev("ws"), lit(eq)]))?;
//! let grammar = b.build()?;
//! ```

use super::analysis::compute_first_sets;
use super::literal::Literal;
use super::model::{
    Abbrev, AbbrevId, Grammar, LiteralId, Match, MatchId, MatchKind, Quantifier, Rule, RuleId,
};
use crate::error::BuildError;
use std::collections::HashMap;

/// Unresolved rule body as written by a grammar author
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(LiteralId),
    Any,
    Field { rule: String, name: String },
    Alternative(Vec<Expr>, Quantifier),
    Sequence(Vec<Expr>, Quantifier),
    Rule(String, Quantifier),
    Abbrev(String),
    Labelled(String, Box<Expr>),
}

pub fn lit(id: LiteralId) -> Expr {
    Expr::Literal(id)
}

pub fn any() -> Expr {
    Expr::Any
}

pub fn seq(children: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Sequence(children.into_iter().collect(), Quantifier::Once)
}

pub fn alt(children: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Alternative(children.into_iter().collect(), Quantifier::Once)
}

pub fn rule(name: &str) -> Expr {
    Expr::Rule(name.to_string(), Quantifier::Once)
}

pub fn abbrev(name: &str) -> Expr {
    Expr::Abbrev(name.to_string())
}

/// Reference to the node labelled `name` inside rule `rule`
pub fn field(rule: &str, name: &str) -> Expr {
    Expr::Field {
        rule: rule.to_string(),
        name: name.to_string(),
    }
}

impl Expr {
    /// Apply a repetition policy.
    ///
    /// Alternatives, sequences and rule references carry the quantifier
    /// themselves. Anything else, or a node that is already quantified, is
    /// wrapped in a one-element sequence.
    pub fn quantify(self, quant: Quantifier) -> Expr {
        match self {
            Expr::Alternative(children, Quantifier::Once) => Expr::Alternative(children, quant),
            Expr::Sequence(children, Quantifier::Once) => Expr::Sequence(children, quant),
            Expr::Rule(name, Quantifier::Once) => Expr::Rule(name, quant),
            other if quant == Quantifier::Once => other,
            other => Expr::Sequence(vec![other], quant),
        }
    }

    pub fn maybe(self) -> Expr {
        self.quantify(Quantifier::Maybe)
    }

    pub fn star(self) -> Expr {
        self.quantify(Quantifier::Star)
    }

    pub fn plus(self) -> Expr {
        self.quantify(Quantifier::Plus)
    }

    /// Label this node so [`field`] references can find it
    pub fn named(self, label: &str) -> Expr {
        Expr::Labelled(label.to_string(), Box::new(self))
    }
}

pub struct GrammarBuilder {
    literals: Vec<Literal>,
    any: LiteralId,
    abbrevs: Vec<Abbrev>,
    abbrev_index: HashMap<String, AbbrevId>,
    rules: Vec<(String, Expr)>,
    start: Option<String>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self {
            literals: vec![Literal::any()],
            any: LiteralId(0),
            abbrevs: Vec::new(),
            abbrev_index: HashMap::new(),
            rules: Vec::new(),
            start: None,
        }
    }

    /// Register a literal and return its id
    pub fn literal(&mut self, literal: Literal) -> LiteralId {
        self.literals.push(literal);
        LiteralId(self.literals.len() - 1)
    }

    pub fn regex(&mut self, pattern: &str) -> Result<LiteralId, BuildError> {
        let literal = Literal::regex(pattern).map_err(|source| BuildError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.literal(literal))
    }

    pub fn text(&mut self, text: &str) -> LiteralId {
        self.literal(Literal::text(text))
    }

    pub fn abbrev(&mut self, name: &str, literal: LiteralId) -> Result<&mut Self, BuildError> {
        if self.abbrev_index.contains_key(name) {
            return Err(BuildError::DuplicateAbbrev(name.to_string()));
        }
        self.abbrevs.push(Abbrev {
            name: name.to_string(),
            literal,
        });
        self.abbrev_index
            .insert(name.to_string(), AbbrevId(self.abbrevs.len() - 1));
        Ok(self)
    }

    /// Register a rule. The first rule registered is the start rule unless
    /// [`start`](Self::start) says otherwise.
    pub fn rule(&mut self, name: &str, body: Expr) -> Result<&mut Self, BuildError> {
        if self.rules.iter().any(|(existing, _)| existing == name) {
            return Err(BuildError::DuplicateRule(name.to_string()));
        }
        self.rules.push((name.to_string(), body));
        Ok(self)
    }

    pub fn start(&mut self, name: &str) -> &mut Self {
        self.start = Some(name.to_string());
        self
    }

    pub fn build(self) -> Result<Grammar, BuildError> {
        if self.rules.is_empty() {
            return Err(BuildError::NoRules);
        }

        let rule_index: HashMap<String, RuleId> = self
            .rules
            .iter()
            .enumerate()
            .map(|(index, (name, _))| (name.clone(), RuleId(index)))
            .collect();

        let start = match &self.start {
            Some(name) => *rule_index
                .get(name)
                .ok_or_else(|| BuildError::UnknownStart(name.clone()))?,
            None => RuleId(0),
        };

        let mut lowering = Lowering {
            rule_index: &rule_index,
            abbrev_index: &self.abbrev_index,
            matches: Vec::new(),
        };
        let mut rules = Vec::with_capacity(self.rules.len());
        for (name, body) in &self.rules {
            let body = lowering.lower(body, name)?;
            rules.push(Rule {
                name: name.clone(),
                body,
            });
        }
        let matches = lowering.matches;

        let mut grammar = Grammar {
            literals: self.literals,
            abbrevs: self.abbrevs,
            matches,
            rules,
            rule_index,
            abbrev_index: self.abbrev_index,
            start,
            any: self.any,
        };

        validate_fields(&grammar)?;
        compute_first_sets(&mut grammar);
        Ok(grammar)
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns `Expr` trees into arena nodes, children before parents
struct Lowering<'a> {
    rule_index: &'a HashMap<String, RuleId>,
    abbrev_index: &'a HashMap<String, AbbrevId>,
    matches: Vec<Match>,
}

impl Lowering<'_> {
    fn lower(&mut self, expr: &Expr, rule_name: &str) -> Result<MatchId, BuildError> {
        let kind = match expr {
            Expr::Literal(id) => MatchKind::Literal(*id),
            Expr::Any => MatchKind::Any,
            Expr::Field { rule, name } => MatchKind::Field {
                owner: self.resolve_rule(rule, rule_name)?,
                name: name.clone(),
            },
            Expr::Alternative(children, quant) => MatchKind::Alternative {
                children: self.lower_all(children, rule_name)?,
                quant: *quant,
            },
            Expr::Sequence(children, quant) => MatchKind::Sequence {
                children: self.lower_all(children, rule_name)?,
                quant: *quant,
            },
            Expr::Rule(name, quant) => MatchKind::RuleRef {
                rule: self.resolve_rule(name, rule_name)?,
                quant: *quant,
            },
            Expr::Abbrev(name) => {
                let id = self.abbrev_index.get(name).copied().ok_or_else(|| {
                    BuildError::UnknownAbbrev {
                        name: name.clone(),
                        referenced_from: rule_name.to_string(),
                    }
                })?;
                MatchKind::AbbrevRef(id)
            }
            Expr::Labelled(label, inner) => {
                let id = self.lower(inner, rule_name)?;
                self.matches[id.0].label = Some(label.clone());
                return Ok(id);
            }
        };
        self.matches.push(Match::new(kind));
        Ok(MatchId(self.matches.len() - 1))
    }

    fn lower_all(&mut self, exprs: &[Expr], rule_name: &str) -> Result<Vec<MatchId>, BuildError> {
        exprs
            .iter()
            .map(|expr| self.lower(expr, rule_name))
            .collect()
    }

    fn resolve_rule(&self, name: &str, referenced_from: &str) -> Result<RuleId, BuildError> {
        self.rule_index
            .get(name)
            .copied()
            .ok_or_else(|| BuildError::UnknownRule {
                name: name.to_string(),
                referenced_from: referenced_from.to_string(),
            })
    }
}

fn validate_fields(grammar: &Grammar) -> Result<(), BuildError> {
    for node in &grammar.matches {
        if let MatchKind::Field { owner, name } = &node.kind {
            if grammar.find_field(*owner, name).is_none() {
                let rule = grammar
                    .rule(*owner)
                    .map(|rule| rule.name.clone())
                    .unwrap_or_default();
                return Err(BuildError::UnresolvedField {
                    rule,
                    field: name.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_rule_is_start_by_default() {
        let mut b = GrammarBuilder::new();
        let a = b.text("a");
        b.rule("file", seq([rule("line")])).unwrap();
        b.rule("line", lit(a)).unwrap();
        let g = b.build().unwrap();
        assert_eq!(g.rule(g.start()).unwrap().name(), "file");
    }

    #[test]
    fn test_explicit_start() {
        let mut b = GrammarBuilder::new();
        let a = b.text("a");
        b.rule("file", seq([rule("line")])).unwrap();
        b.rule("line", lit(a)).unwrap();
        b.start("line");
        let g = b.build().unwrap();
        assert_eq!(g.rule(g.start()).unwrap().name(), "line");
    }

    #[test]
    fn test_rejects_empty_grammar() {
        assert!(matches!(
            GrammarBuilder::new().build(),
            Err(BuildError::NoRules)
        ));
    }

    #[test]
    fn test_rejects_unknown_start() {
        let mut b = GrammarBuilder::new();
        b.rule("file", any()).unwrap();
        b.start("missing");
        assert!(matches!(b.build(), Err(BuildError::UnknownStart(name)) if name == "missing"));
    }

    #[test]
    fn test_rejects_duplicate_rule() {
        let mut b = GrammarBuilder::new();
        b.rule("file", any()).unwrap();
        assert!(matches!(
            b.rule("file", any()),
            Err(BuildError::DuplicateRule(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_rule_reference() {
        let mut b = GrammarBuilder::new();
        b.rule("file", seq([rule("entry")])).unwrap();
        match b.build() {
            Err(BuildError::UnknownRule {
                name,
                referenced_from,
            }) => {
                assert_eq!(name, "entry");
                assert_eq!(referenced_from, "file");
            }
            other => panic!("expected UnknownRule, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_abbrev() {
        let mut b = GrammarBuilder::new();
        b.rule("file", abbrev("ws")).unwrap();
        assert!(matches!(b.build(), Err(BuildError::UnknownAbbrev { .. })));
    }

    #[test]
    fn test_rejects_duplicate_abbrev() {
        let mut b = GrammarBuilder::new();
        let ws = b.regex("[ \t]+").unwrap();
        b.abbrev("ws", ws).unwrap();
        assert!(matches!(
            b.abbrev("ws", ws),
            Err(BuildError::DuplicateAbbrev(_))
        ));
    }

    #[test]
    fn test_abbrev_lookup_by_name() {
        let mut b = GrammarBuilder::new();
        let ws = b.regex("[ \t]+").unwrap();
        b.abbrev("ws", ws).unwrap();
        b.rule("file", abbrev("ws")).unwrap();
        let g = b.build().unwrap();

        let id = g.abbrev_named("ws").unwrap();
        assert_eq!(g.abbrev(id).unwrap().literal(), ws);
        assert_eq!(g.abbrev(id).unwrap().name(), "ws");
        assert_eq!(g.abbrev_named("eol"), None);
    }

    #[test]
    fn test_rejects_unresolved_field() {
        let mut b = GrammarBuilder::new();
        let a = b.text("a");
        b.rule("file", seq([lit(a).named("key"), field("file", "value")]))
            .unwrap();
        assert!(matches!(
            b.build(),
            Err(BuildError::UnresolvedField { rule, field }) if rule == "file" && field == "value"
        ));
    }

    #[test]
    fn test_rejects_invalid_regex() {
        let mut b = GrammarBuilder::new();
        assert!(matches!(
            b.regex("[a-"),
            Err(BuildError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_quantify_wraps_leaves() {
        let mut b = GrammarBuilder::new();
        let a = b.text("a");
        assert_eq!(
            lit(a).star(),
            Expr::Sequence(vec![Expr::Literal(a)], Quantifier::Star)
        );
        assert_eq!(
            rule("entry").plus(),
            Expr::Rule("entry".into(), Quantifier::Plus)
        );
        // an already quantified node gets a fresh wrapper
        assert_eq!(
            rule("entry").plus().maybe(),
            Expr::Sequence(
                vec![Expr::Rule("entry".into(), Quantifier::Plus)],
                Quantifier::Maybe
            )
        );
    }

    #[test]
    fn test_labels_land_on_lowered_node() {
        let mut b = GrammarBuilder::new();
        let key = b.regex("[a-z]+").unwrap();
        b.rule("entry", seq([lit(key).named("key")])).unwrap();
        let g = b.build().unwrap();
        let entry = g.rule_named("entry").unwrap();
        let found = g.find_field(entry, "key").unwrap();
        assert_eq!(g.node(found).unwrap().kind(), &MatchKind::Literal(key));
        assert_eq!(g.find_field(entry, "value"), None);
    }
}
