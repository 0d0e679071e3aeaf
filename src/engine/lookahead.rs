//! One-token lookahead over precomputed first-sets

use super::matcher::Matcher;
use crate::error::MatchError;
use crate::grammar::MatchId;

impl Matcher<'_, '_, '_> {
    /// Whether `id` could start at the cursor.
    ///
    /// Only the node's first-set is tested, and only a non-empty match counts.
    /// Nothing deeper is checked, so a node can pass lookahead and still fail.
    /// Follow-sets are not considered either, which matters for alternatives
    /// with nullable branches. The cursor and the applied flag are untouched.
    pub fn applies(&mut self, id: MatchId) -> Result<bool, MatchError> {
        let node = self.node(id)?;
        for &literal in node.first() {
            if self.lex(literal)?.is_some_and(|len| len > 0) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
