// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

/// The outcome of submitting a move to a `Game`.
///
/// Errors mean the move was rejected and the game did not advance. Warnings
/// (checkmate, stalemate) accompany a move that was applied. A result is only
/// a success when it carries neither.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl MoveResult {
    pub fn success() -> MoveResult {
        MoveResult::default()
    }

    pub fn error<S: Into<String>>(message: S) -> MoveResult {
        let mut result = MoveResult::default();
        result.add_error(message);
        result
    }

    pub fn warning<S: Into<String>>(message: S) -> MoveResult {
        let mut result = MoveResult::default();
        result.add_warning(message);
        result
    }

    pub fn add_error<S: Into<String>>(&mut self, message: S) {
        self.errors.push(message.into());
    }

    pub fn add_warning<S: Into<String>>(&mut self, message: S) {
        self.warnings.push(message.into());
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

impl fmt::Display for MoveResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_success() {
            return write!(f, "ok");
        }

        let messages = self
            .errors
            .iter()
            .map(|e| ("error", e))
            .chain(self.warnings.iter().map(|w| ("warning", w)));
        for (i, (label, message)) in messages.enumerate() {
            if i != 0 {
                write!(f, "; ")?;
            }

            write!(f, "{}: {}", label, message)?;
        }

        Ok(())
    }
}
