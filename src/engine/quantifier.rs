//! Repetition policies for alternatives, sequences and rule references
//!
//! The outcome of a quantified node is about the node, not about its last
//! repetition: a `+` that matched twice and then failed a third attempt has
//! applied, and so has a `*` or `?` that matched nothing.

use super::matcher::{Matcher, Outcome};
use crate::error::MatchError;
use crate::grammar::{MatchId, Quantifier};

impl Matcher<'_, '_, '_> {
    /// Run `once` (one application of node `id`) according to `quant`.
    pub(crate) fn quantified<F>(
        &mut self,
        id: MatchId,
        quant: Quantifier,
        mut once: F,
    ) -> Result<Outcome, MatchError>
    where
        F: FnMut(&mut Self) -> Result<Outcome, MatchError>,
    {
        match quant {
            Quantifier::Once => once(self),
            Quantifier::Maybe => {
                if self.applies(id)? {
                    once(self)?;
                }
                Ok(Outcome::Applied)
            }
            Quantifier::Plus => {
                if !once(self)?.applied() {
                    let err = MatchError::MissingRepetition {
                        filename: self.cursor.filename().to_string(),
                        line: self.cursor.line(),
                    };
                    log::warn!("{}", err);
                    return Err(err);
                }
                loop {
                    let before = self.cursor.offset();
                    // an iteration that consumed nothing would repeat forever
                    if !once(self)?.applied() || self.cursor.offset() == before {
                        break;
                    }
                }
                Ok(Outcome::Applied)
            }
            Quantifier::Star => {
                while self.applies(id)? {
                    let before = self.cursor.offset();
                    once(self)?;
                    if self.cursor.offset() == before {
                        break;
                    }
                }
                Ok(Outcome::Applied)
            }
        }
    }
}
