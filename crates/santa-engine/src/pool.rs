use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;
use santa_core::{Participant, Roster};

/// Working multiset of givee candidates for a single attempt.
///
/// Candidates are drawn from the back and deferred to the front, so a
/// deferred candidate is only seen again once everything ahead of it has
/// been drawn or deferred too.
#[derive(Debug, Clone)]
pub struct GiveePool<'a> {
    queue: VecDeque<&'a Participant>,
}

impl<'a> GiveePool<'a> {
    /// Fills the pool with every participant repeated `gifts` times.
    pub fn new(roster: &'a Roster, gifts: usize) -> Self {
        let mut queue = VecDeque::with_capacity(roster.len().saturating_mul(gifts));
        for _ in 0..gifts {
            queue.extend(roster.iter());
        }
        Self { queue }
    }

    /// Permutes the pool uniformly at random.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.queue.make_contiguous().shuffle(rng);
    }

    /// Takes the next candidate from the back.
    pub fn draw(&mut self) -> Option<&'a Participant> {
        self.queue.pop_back()
    }

    /// Puts a rejected candidate at the front.
    pub fn defer(&mut self, candidate: &'a Participant) {
        self.queue.push_front(candidate);
    }

    /// Number of candidates left.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the pool is exhausted.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Iterates from the front of the pool to the back.
    pub fn iter(&self) -> impl Iterator<Item = &'a Participant> + '_ {
        self.queue.iter().copied()
    }
}
