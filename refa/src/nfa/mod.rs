//! ε-free NFA: the result of eliminating ε-moves from an [`EpsilonNfa`].

pub mod eval;

use crate::enfa::EpsilonNfa;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone)]
pub struct NfaState {
    pub(crate) accepting: bool,
    /// Parallel to the owning [`Nfa`]'s alphabet; each entry is the sorted,
    /// deduplicated set of target states reachable on that symbol.
    pub(crate) transitions: Vec<Vec<usize>>,
}

#[derive(Debug, Clone)]
pub struct Nfa {
    pub(crate) alphabet: Vec<u8>,
    pub(crate) states: Vec<NfaState>,
    pub(crate) initial_state: usize,
}

impl Nfa {
    /// Computes the ε-closure of `start` by DFS over ε-edges.
    fn closure(enfa: &EpsilonNfa, start: usize) -> HashSet<usize> {
        let mut seen = HashSet::new();
        let mut stack = vec![start];
        seen.insert(start);
        while let Some(q) = stack.pop() {
            for &next in &enfa.states[q].epsilon {
                if seen.insert(next) {
                    stack.push(next);
                }
            }
        }
        seen
    }

    /// Eliminates ε-moves: computes closures, inlines them into the
    /// transition relation, then prunes states unreachable from the start.
    pub fn from_epsilon_nfa(enfa: &EpsilonNfa) -> Nfa {
        let n = enfa.states.len();
        let closures: Vec<HashSet<usize>> = (0..n).map(|q| Self::closure(enfa, q)).collect();

        let mut alphabet: Vec<u8> = enfa
            .states
            .iter()
            .flat_map(|s| s.transitions.iter().map(|(b, _)| *b))
            .collect();
        alphabet.sort_unstable();
        alphabet.dedup();

        let accepting: Vec<bool> = (0..n).map(|q| closures[q].contains(&enfa.accept)).collect();

        let mut transitions: Vec<Vec<Vec<usize>>> = Vec::with_capacity(n);
        for q in 0..n {
            let mut row = Vec::with_capacity(alphabet.len());
            for &a in &alphabet {
                let mut targets: HashSet<usize> = HashSet::new();
                for &p in &closures[q] {
                    for &(sym, r) in &enfa.states[p].transitions {
                        if sym == a {
                            targets.extend(closures[r].iter().copied());
                        }
                    }
                }
                let mut targets: Vec<usize> = targets.into_iter().collect();
                targets.sort_unstable();
                row.push(targets);
            }
            transitions.push(row);
        }

        let (reachable, remap) = reachable_remap(enfa.start, &transitions);

        let alphabet_len = alphabet.len();
        let mut states = Vec::with_capacity(reachable.len());
        for &old in &reachable {
            let mut row = Vec::with_capacity(alphabet_len);
            for col in 0..alphabet_len {
                let mut mapped: Vec<usize> = transitions[old][col]
                    .iter()
                    .filter_map(|t| remap.get(t).copied())
                    .collect();
                mapped.sort_unstable();
                mapped.dedup();
                row.push(mapped);
            }
            states.push(NfaState {
                accepting: accepting[old],
                transitions: row,
            });
        }

        Nfa {
            alphabet,
            states,
            initial_state: *remap.get(&enfa.start).expect("start is reachable from itself"),
        }
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn states(&self) -> &[NfaState] {
        &self.states
    }

    pub fn initial_state(&self) -> usize {
        self.initial_state
    }

    pub fn evaluator(&self) -> eval::NfaEvaluator<'_> {
        self.into()
    }
}

impl NfaState {
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn transitions(&self) -> &[Vec<usize>] {
        &self.transitions
    }
}

/// BFS from `start` over the not-yet-pruned transition table; returns the
/// reachable old indices in ascending order (for a deterministic remap) and
/// the old->new index map.
fn reachable_remap(
    start: usize,
    transitions: &[Vec<Vec<usize>>],
) -> (Vec<usize>, std::collections::HashMap<usize, usize>) {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(start);
    queue.push_back(start);
    while let Some(q) = queue.pop_front() {
        for col in &transitions[q] {
            for &next in col {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    let mut reachable: Vec<usize> = seen.into_iter().collect();
    reachable.sort_unstable();
    let remap = reachable
        .iter()
        .enumerate()
        .map(|(new, &old)| (old, new))
        .collect();
    (reachable, remap)
}
