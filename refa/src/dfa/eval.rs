//! Step-by-step evaluation of a [`Dfa`], the building block the matcher's
//! ensemble of runners is made of.

use crate::dfa::{Dfa, DfaState};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    rev_map: HashMap<u8, usize>,
    current_state: usize,
    unknown_elem_seen: bool,
}

impl<'a> DfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_state().is_some_and(DfaState::is_accepting)
    }

    pub fn current_state(&self) -> Option<&DfaState> {
        if self.unknown_elem_seen {
            None
        } else {
            Some(&self.dfa.states[self.current_state])
        }
    }

    pub fn current_state_idx(&self) -> Option<usize> {
        (!self.unknown_elem_seen).then_some(self.current_state)
    }

    /// Whether this evaluator has reached the DFA's recorded sink state, if
    /// any is known, or an out-of-alphabet byte.
    pub fn is_dead(&self) -> bool {
        self.unknown_elem_seen || self.dfa.sink == Some(self.current_state)
    }

    pub fn step(&mut self, elem: u8) -> Option<&DfaState> {
        if self.unknown_elem_seen {
            return None;
        }
        match self.rev_map.get(&elem) {
            None => {
                self.unknown_elem_seen = true;
                None
            }
            Some(&idx) => {
                self.current_state = self.dfa.states[self.current_state].transitions[idx];
                Some(&self.dfa.states[self.current_state])
            }
        }
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        let rev_map = value
            .alphabet
            .iter()
            .enumerate()
            .map(|(idx, &b)| (b, idx))
            .collect();
        Self {
            dfa: value,
            rev_map,
            current_state: value.initial_state,
            unknown_elem_seen: false,
        }
    }
}
