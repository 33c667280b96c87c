// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The legality filter. A pseudo-legal move is legal if, once played, the
//! mover's king is not attacked. Each candidate is tried on a scratch copy of
//! the board that is reset from the real board before every trial.
use crate::attacks;
use crate::movegen::MoveVec;
use crate::moves::Move;
use crate::position::Position;

/// Removes every move from `moves` that would leave its mover in check.
/// `scratch` is clobbered.
pub fn filter_illegal_moves(moves: &mut MoveVec, pos: &Position, scratch: &mut Position) {
    moves.retain(|mov| !leaves_king_in_check(*mov, pos, scratch));
}

/// Plays `mov` on `scratch` (after resetting it to `pos`) and reports whether
/// the mover's king is attacked afterwards. A move that cannot be played on
/// `pos` at all is treated as illegal.
pub fn leaves_king_in_check(mov: Move, pos: &Position, scratch: &mut Position) -> bool {
    scratch.replace_with(pos);
    if let Err(err) = mov.apply(scratch) {
        trace!("discarding {}: {}", mov, err);
        return true;
    }

    let in_check = attacks::is_check(mov.color(), scratch);
    if in_check {
        trace!("discarding {}: king left in check", mov);
    }

    in_check
}
