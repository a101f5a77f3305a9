//! Forward-only cursor over the pair stream

use super::tokenizer::{CodePair, Tokenizer};

/// One-pair lookahead over a [`Tokenizer`].
///
/// Section and entity readers peek at the next pair to decide whether it
/// belongs to them, and only consume it if it does. The cursor never
/// rewinds, so a whole file is tokenized exactly once.
pub struct PairCursor<'a> {
    tokenizer: Tokenizer<'a>,
    peeked: Option<CodePair<'a>>,
    position: usize,
}

impl<'a> PairCursor<'a> {
    /// Create a cursor at the start of `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            tokenizer: Tokenizer::new(text),
            peeked: None,
            position: 0,
        }
    }

    /// Next pair without consuming it
    pub fn peek(&mut self) -> Option<CodePair<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.tokenizer.next();
        }
        self.peeked
    }

    /// Consume the next pair
    pub fn next_pair(&mut self) -> Option<CodePair<'a>> {
        let pair = match self.peeked.take() {
            Some(pair) => pair,
            None => self.tokenizer.next()?,
        };
        self.position += 1;
        Some(pair)
    }

    /// Consume the next pair only if it satisfies `pred`
    pub fn next_if(&mut self, pred: impl FnOnce(&CodePair<'a>) -> bool) -> Option<CodePair<'a>> {
        match self.peek() {
            Some(pair) if pred(&pair) => self.next_pair(),
            _ => None,
        }
    }

    /// Consume pairs up to (not including) the next record tag
    pub fn skip_record_body(&mut self) -> usize {
        let mut skipped = 0;
        while self.next_if(|p| p.code != 0).is_some() {
            skipped += 1;
        }
        skipped
    }

    /// True when the next pair is a section boundary, or there is none
    pub fn at_section_end(&mut self) -> bool {
        self.peek().map_or(true, |p| p.is_section_boundary())
    }

    /// Number of pairs consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Pairs the tokenizer has dropped so far
    pub fn skipped_pairs(&self) -> usize {
        self.tokenizer.skipped()
    }
}
