//! Step-by-step evaluation of an ε-free [`Nfa`], used by the DFA builder's
//! subset construction.

use crate::nfa::{Nfa, NfaState};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug)]
pub struct NfaEvaluator<'a> {
    nfa: &'a Nfa,
    rev_map: HashMap<u8, usize>,
    current_states: HashSet<usize>,
}

impl<'a> NfaEvaluator<'a> {
    pub fn is_accepting(&self) -> bool {
        self.current_states().iter().any(|s| s.is_accepting())
    }

    pub fn current_states(&self) -> Vec<&NfaState> {
        self.current_states
            .iter()
            .map(|&s| &self.nfa.states[s])
            .collect()
    }

    pub fn current_states_idx(&self) -> &HashSet<usize> {
        &self.current_states
    }

    /// Builds one successor evaluator per alphabet symbol, in alphabet order.
    pub fn step_all(&self) -> Vec<NfaEvaluator<'a>> {
        self.nfa
            .alphabet
            .iter()
            .map(|&elem| {
                let mut next = self.clone();
                next.step(elem);
                next
            })
            .collect()
    }

    pub fn step(&mut self, elem: u8) -> Option<()> {
        let &idx = self.rev_map.get(&elem)?;
        self.current_states = self
            .current_states
            .iter()
            .flat_map(|&state| self.nfa.states[state].transitions[idx].iter().copied())
            .collect();
        Some(())
    }

    pub fn step_multiple(&mut self, elems: &[u8]) -> Option<()> {
        elems.iter().try_for_each(|&e| self.step(e))
    }
}

impl<'a> From<&'a Nfa> for NfaEvaluator<'a> {
    fn from(value: &'a Nfa) -> Self {
        let rev_map = value
            .alphabet
            .iter()
            .enumerate()
            .map(|(idx, &b)| (b, idx))
            .collect();
        let mut current_states = HashSet::new();
        current_states.insert(value.initial_state);
        NfaEvaluator {
            nfa: value,
            rev_map,
            current_states,
        }
    }
}
