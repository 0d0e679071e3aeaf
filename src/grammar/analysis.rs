//! First-set and nullability analysis
//!
//! Rules may reference each other in cycles, so both properties are computed
//! as a fixpoint over the whole arena: sets only grow and nullability only
//! flips from false to true, which bounds the number of passes.

use super::model::{Grammar, LiteralId, MatchId, MatchKind};

pub(crate) fn compute_first_sets(grammar: &mut Grammar) {
    loop {
        let mut changed = false;
        for index in 0..grammar.matches.len() {
            let (first, nullable) = summarize(grammar, MatchId(index));
            let node = &mut grammar.matches[index];
            if node.first != first || node.nullable != nullable {
                node.first = first;
                node.nullable = nullable;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Recompute one node from the current values of the nodes it depends on
fn summarize(grammar: &Grammar, id: MatchId) -> (Vec<LiteralId>, bool) {
    let node = &grammar.matches[id.0];
    match &node.kind {
        MatchKind::Literal(literal) => (vec![*literal], false),
        MatchKind::Any => (vec![grammar.any], false),
        MatchKind::AbbrevRef(abbrev) => match grammar.abbrev(*abbrev) {
            Some(abbrev) => (vec![abbrev.literal], false),
            None => (Vec::new(), false),
        },
        MatchKind::Field { owner, name } => grammar
            .find_field(*owner, name)
            .and_then(|target| grammar.node(target))
            .map(|target| (target.first.clone(), target.nullable))
            .unwrap_or_default(),
        MatchKind::Alternative { children, quant } => {
            let mut first = Vec::new();
            let mut nullable = quant.allows_zero();
            for child in children.iter().filter_map(|c| grammar.node(*c)) {
                first.extend_from_slice(&child.first);
                nullable |= child.nullable;
            }
            (normalize(first), nullable)
        }
        MatchKind::Sequence { children, quant } => {
            let mut first = Vec::new();
            let mut all_nullable = true;
            for child in children.iter().filter_map(|c| grammar.node(*c)) {
                first.extend_from_slice(&child.first);
                if !child.nullable {
                    all_nullable = false;
                    break;
                }
            }
            (normalize(first), all_nullable || quant.allows_zero())
        }
        MatchKind::RuleRef { rule, quant } => {
            let body = grammar
                .rule(*rule)
                .and_then(|rule| grammar.node(rule.body));
            match body {
                Some(body) => (body.first.clone(), body.nullable || quant.allows_zero()),
                None => (Vec::new(), quant.allows_zero()),
            }
        }
    }
}

fn normalize(mut first: Vec<LiteralId>) -> Vec<LiteralId> {
    first.sort_unstable();
    first.dedup();
    first
}
