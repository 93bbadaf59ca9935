//! Deterministic finite automaton: the result of subset-constructing an
//! [`Nfa`](crate::nfa::Nfa), then minimizing and marking a sink state.

pub mod eval;

use crate::nfa::Nfa;
use eval::DfaEvaluator;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaState {
    pub(crate) accepting: bool,
    /// Parallel to the owning [`Dfa`]'s alphabet.
    pub(crate) transitions: Vec<usize>,
}

impl DfaState {
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    pub fn transitions(&self) -> &[usize] {
        &self.transitions
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dfa {
    pub(crate) alphabet: Vec<u8>,
    pub(crate) states: Vec<DfaState>,
    pub(crate) initial_state: usize,
    pub(crate) sink: Option<usize>,
}

impl Dfa {
    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }

    pub fn sink(&self) -> Option<usize> {
        self.sink
    }

    pub fn evaluator(&self) -> DfaEvaluator<'_> {
        self.into()
    }

    /// Subset construction (§4.5): macro-states are explored in strict FIFO
    /// discovery order and numbered sequentially as they're first seen, with
    /// the initial macro-state `{q0}` guaranteed index 0. The transition
    /// function built here is already total on the NFA's alphabet: an empty
    /// macro-state becomes an ordinary state whose every transition targets
    /// itself.
    pub fn from_nfa(nfa: &Nfa) -> Dfa {
        let alphabet = nfa.alphabet().to_vec();

        let mut index_of: HashMap<Vec<usize>, usize> = HashMap::new();
        let mut keys: Vec<Vec<usize>> = Vec::new();
        let mut rows: Vec<Vec<usize>> = Vec::new();
        let mut accepting: Vec<bool> = Vec::new();
        let mut frontier: VecDeque<usize> = VecDeque::new();

        let initial_key = set_key(std::iter::once(nfa.initial_state()));
        index_of.insert(initial_key.clone(), 0);
        accepting.push(is_accepting_set(nfa, &initial_key));
        keys.push(initial_key);
        rows.push(Vec::new());
        frontier.push_back(0);

        // Reserve the empty macro-state an index lazily, the first time some
        // transition actually needs it; this keeps it out of the table when
        // every transition happens to be total already (rare, but cheap to
        // support uniformly).
        let mut empty_state_idx: Option<usize> = None;

        while let Some(current) = frontier.pop_front() {
            let current_key = keys[current].clone();
            let mut row = Vec::with_capacity(alphabet.len());
            for &symbol in &alphabet {
                let mut target_set: Vec<usize> = current_key
                    .iter()
                    .flat_map(|&nfa_state| {
                        let col = nfa
                            .alphabet()
                            .iter()
                            .position(|&s| s == symbol)
                            .expect("symbol drawn from this NFA's alphabet");
                        nfa.states()[nfa_state].transitions()[col].iter().copied()
                    })
                    .collect();
                target_set.sort_unstable();
                target_set.dedup();

                let target_idx = if target_set.is_empty() {
                    *empty_state_idx.get_or_insert_with(|| {
                        let idx = rows.len();
                        index_of.insert(Vec::new(), idx);
                        keys.push(Vec::new());
                        accepting.push(false);
                        rows.push(Vec::new());
                        idx
                    })
                } else {
                    let key = target_set;
                    if let Some(&idx) = index_of.get(&key) {
                        idx
                    } else {
                        let idx = rows.len();
                        accepting.push(is_accepting_set(nfa, &key));
                        index_of.insert(key.clone(), idx);
                        keys.push(key);
                        rows.push(Vec::new());
                        frontier.push_back(idx);
                        idx
                    }
                };
                row.push(target_idx);
            }
            rows[current] = row;
        }

        // The lazily-created empty/sink macro-state needs its own total
        // self-loop row, which the exploration loop above never visits.
        if let Some(idx) = empty_state_idx {
            if rows[idx].is_empty() {
                rows[idx] = vec![idx; alphabet.len()];
            }
        }

        let states = rows
            .into_iter()
            .zip(accepting)
            .map(|(transitions, accepting)| DfaState {
                accepting,
                transitions,
            })
            .collect();

        let mut dfa = Dfa {
            alphabet,
            states,
            initial_state: 0,
            sink: None,
        };
        dfa.detect_sink();
        dfa
    }

    /// Scans non-accepting states in ascending index order for the first
    /// state whose every transition targets itself (§4.7).
    pub fn detect_sink(&mut self) {
        self.sink = (0..self.states.len()).find(|&idx| {
            let state = &self.states[idx];
            !state.accepting && state.transitions.iter().all(|&t| t == idx)
        });
    }

    /// Partition-refinement minimization (§4.6), Hopcroft-style. Output
    /// blocks are ordered by the smallest original state index they contain.
    pub fn minimize(&mut self) {
        let classes = self.state_equivalence_classes_idx();

        let mut class_of = vec![0usize; self.states.len()];
        let mut ordered: Vec<(usize, HashSet<usize>)> = classes
            .into_iter()
            .map(|set| (*set.iter().min().expect("non-empty class"), set))
            .collect();
        ordered.sort_by_key(|(min, _)| *min);

        for (new_idx, (_, set)) in ordered.iter().enumerate() {
            for &old in set {
                class_of[old] = new_idx;
            }
        }

        let new_states = ordered
            .iter()
            .map(|(_, set)| {
                let rep = *set.iter().min().expect("non-empty class");
                let transitions = self.states[rep]
                    .transitions
                    .iter()
                    .map(|&t| class_of[t])
                    .collect();
                DfaState {
                    accepting: self.states[rep].accepting,
                    transitions,
                }
            })
            .collect();

        self.initial_state = class_of[self.initial_state];
        self.states = new_states;
        self.detect_sink();
    }

    fn state_equivalence_classes_idx(&self) -> Vec<HashSet<usize>> {
        let (finals, nonfinals): (HashSet<usize>, HashSet<usize>) =
            (0..self.states.len()).partition(|&idx| self.states[idx].accepting);
        if finals.is_empty() {
            return vec![nonfinals];
        } else if nonfinals.is_empty() {
            return vec![finals];
        }
        let mut p = vec![finals, nonfinals];
        let mut w = p.clone();

        while let Some(a) = w.pop() {
            for c in 0..self.alphabet.len() {
                let x: HashSet<usize> = (0..self.states.len())
                    .filter(|&i| a.contains(&self.states[i].transitions[c]))
                    .collect();
                p = p
                    .into_iter()
                    .flat_map(|y| {
                        let inters: HashSet<usize> = x.intersection(&y).copied().collect();
                        let diff: HashSet<usize> = y.difference(&x).copied().collect();
                        if !inters.is_empty() && !diff.is_empty() {
                            if let Some(pos) = w.iter().position(|hs| hs == &y) {
                                w.swap_remove(pos);
                                w.push(inters.clone());
                                w.push(diff.clone());
                            } else if inters.len() <= diff.len() {
                                w.push(inters.clone());
                            } else {
                                w.push(diff.clone());
                            }
                            vec![inters, diff]
                        } else {
                            vec![y]
                        }
                    })
                    .collect();
            }
        }
        p
    }
}

fn set_key(states: impl IntoIterator<Item = usize>) -> Vec<usize> {
    let mut v: Vec<usize> = states.into_iter().collect();
    v.sort_unstable();
    v.dedup();
    v
}

fn is_accepting_set(nfa: &Nfa, set: &[usize]) -> bool {
    set.iter().any(|&s| nfa.states()[s].is_accepting())
}
