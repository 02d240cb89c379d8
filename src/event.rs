//! Events as membership masks over a finite universe.
//!
//! An [`Event`] is a pure value: every operation returns a new event and
//! equality is structural. Masks are packed into `u64` blocks with the
//! unused high bits of the last block kept at zero, so the packed form is
//! canonical and `Eq`, `Hash` and `Ord` compare sets directly.
//!
//! # Universe sizes
//!
//! An event remembers the universe size it was built for. Binary
//! operations on events of different sizes return
//! [`SpaceError::SizeMismatch`] instead of truncating.

use std::fmt;
use std::ops::Not;

use crate::error::{Result, SpaceError};
use crate::outcome::OutcomeId;

const BLOCK_BITS: usize = u64::BITS as usize;

fn block_count(n: usize) -> usize {
    n.div_ceil(BLOCK_BITS)
}

/// Mask of the valid bits in the last block of an `n`-bit mask.
fn tail_mask(n: usize) -> u64 {
    match n % BLOCK_BITS {
        0 => u64::MAX,
        r => (1u64 << r) - 1,
    }
}

/// Subset of an outcome universe.
///
/// # Examples
/// ```
/// use u_probspace::Event;
///
/// let a = Event::from_mask(vec![true, false, true]);
/// let b = Event::from_mask(vec![false, false, true]);
/// let u = Event::unite(&a, &b).unwrap();
/// assert_eq!(u, a);
/// assert!(Event::complement(&a).contains(1));
/// assert!(!a.contains(99)); // out of range is simply "not a member"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Event {
    len: usize,
    blocks: Vec<u64>,
}

impl Event {
    /// The empty event over `n` outcomes.
    pub fn empty(n: usize) -> Self {
        Self {
            len: n,
            blocks: vec![0; block_count(n)],
        }
    }

    /// The full event over `n` outcomes.
    pub fn full(n: usize) -> Self {
        let mut blocks = vec![u64::MAX; block_count(n)];
        if let Some(last) = blocks.last_mut() {
            *last &= tail_mask(n);
        }
        Self { len: n, blocks }
    }

    /// Builds an event from a boolean membership mask.
    pub fn from_mask(mask: impl AsRef<[bool]>) -> Self {
        let mask = mask.as_ref();
        let mut event = Self::empty(mask.len());
        for (id, &member) in mask.iter().enumerate() {
            if member {
                event.blocks[id / BLOCK_BITS] |= 1u64 << (id % BLOCK_BITS);
            }
        }
        event
    }

    /// Builds the event `{ids...}` over `n` outcomes.
    ///
    /// # Errors
    /// [`SpaceError::OutOfRange`] if any id is `>= n`.
    pub fn from_outcomes(n: usize, ids: impl IntoIterator<Item = OutcomeId>) -> Result<Self> {
        let mut event = Self::empty(n);
        for id in ids {
            if id >= n {
                return Err(SpaceError::OutOfRange { id, size: n });
            }
            event.blocks[id / BLOCK_BITS] |= 1u64 << (id % BLOCK_BITS);
        }
        Ok(event)
    }

    /// The one-outcome event `{id}` over `n` outcomes.
    pub fn singleton(n: usize, id: OutcomeId) -> Result<Self> {
        Self::from_outcomes(n, [id])
    }

    /// Complement relative to the event's own universe.
    pub fn complement(e: &Event) -> Event {
        let mut blocks: Vec<u64> = e.blocks.iter().map(|b| !b).collect();
        if let Some(last) = blocks.last_mut() {
            *last &= tail_mask(e.len);
        }
        Event { len: e.len, blocks }
    }

    /// `a ∪ b`.
    ///
    /// # Errors
    /// [`SpaceError::SizeMismatch`] if the events belong to universes of
    /// different sizes.
    pub fn unite(a: &Event, b: &Event) -> Result<Event> {
        Self::zip_blocks(a, b, |x, y| x | y)
    }

    /// `a ∩ b`.
    ///
    /// # Errors
    /// [`SpaceError::SizeMismatch`] on differing universe sizes.
    pub fn intersect(a: &Event, b: &Event) -> Result<Event> {
        Self::zip_blocks(a, b, |x, y| x & y)
    }

    /// `a \ b`, i.e. `a ∩ bᶜ`.
    pub fn difference(a: &Event, b: &Event) -> Result<Event> {
        Self::zip_blocks(a, b, |x, y| x & !y)
    }

    fn zip_blocks(a: &Event, b: &Event, op: impl Fn(u64, u64) -> u64) -> Result<Event> {
        a.check_same_universe(b)?;
        let blocks = a
            .blocks
            .iter()
            .zip(&b.blocks)
            .map(|(&x, &y)| op(x, y))
            .collect();
        Ok(Event { len: a.len, blocks })
    }

    pub(crate) fn check_same_universe(&self, other: &Event) -> Result<()> {
        if self.len != other.len {
            return Err(SpaceError::SizeMismatch {
                expected: self.len,
                actual: other.len,
            });
        }
        Ok(())
    }

    /// `true` iff `id` is inside the universe and a member of the event.
    pub fn contains(&self, id: OutcomeId) -> bool {
        id < self.len && self.blocks[id / BLOCK_BITS] & (1u64 << (id % BLOCK_BITS)) != 0
    }

    /// Size of the universe this event was built for.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` if the universe itself has no outcomes.
    ///
    /// See [`is_empty_set`](Self::is_empty_set) for the empty event.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of member outcomes.
    pub fn count(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// `true` if no outcome is a member.
    pub fn is_empty_set(&self) -> bool {
        self.blocks.iter().all(|&b| b == 0)
    }

    /// `true` if every outcome of the universe is a member.
    pub fn is_full_set(&self) -> bool {
        self.count() == self.len
    }

    /// `true` if every member of `self` is a member of `other`.
    ///
    /// Events over different universes are never subsets of each other.
    pub fn is_subset(&self, other: &Event) -> bool {
        self.len == other.len
            && self
                .blocks
                .iter()
                .zip(&other.blocks)
                .all(|(&x, &y)| x & !y == 0)
    }

    /// `true` if the events share no member. `false` across universes.
    pub fn is_disjoint(&self, other: &Event) -> bool {
        self.len == other.len
            && self
                .blocks
                .iter()
                .zip(&other.blocks)
                .all(|(&x, &y)| x & y == 0)
    }

    /// Member identities in increasing order.
    pub fn outcomes(&self) -> impl Iterator<Item = OutcomeId> + '_ {
        (0..self.len).filter(move |&id| self.contains(id))
    }

    /// Unpacked boolean membership mask.
    pub fn mask(&self) -> Vec<bool> {
        (0..self.len).map(|id| self.contains(id)).collect()
    }
}

impl From<Vec<bool>> for Event {
    fn from(mask: Vec<bool>) -> Self {
        Self::from_mask(mask)
    }
}

impl Not for &Event {
    type Output = Event;

    fn not(self) -> Event {
        Event::complement(self)
    }
}

impl Not for Event {
    type Output = Event;

    fn not(self) -> Event {
        Event::complement(&self)
    }
}

impl fmt::Display for Event {
    /// Formats as a set of outcome identities, e.g. `{0, 2}`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, id) in self.outcomes().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{id}")?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_full() {
        let e = Event::empty(3);
        let f = Event::full(3);
        for id in 0..3 {
            assert!(!e.contains(id));
            assert!(f.contains(id));
        }
        assert!(e.is_empty_set());
        assert!(f.is_full_set());
        assert_eq!(e.len(), 3);
        assert_eq!(f.count(), 3);
    }

    #[test]
    fn test_complement_of_full_is_empty() {
        let full = Event::full(3);
        let comp = Event::complement(&full);
        assert_eq!(comp, Event::empty(3));
        assert!(!comp.contains(0) && !comp.contains(1) && !comp.contains(2));
    }

    #[test]
    fn test_complement_clears_tail_bits() {
        // 70 outcomes spans two blocks with 6 valid bits in the second.
        let e = Event::singleton(70, 3).unwrap();
        let comp = !&e;
        assert_eq!(comp.count(), 69);
        assert_eq!(!comp, e);
        assert_eq!(!Event::empty(70), Event::full(70));
    }

    #[test]
    fn test_contains_out_of_range_is_false() {
        let f = Event::full(2);
        assert!(!f.contains(2));
        assert!(!f.contains(usize::MAX));
    }

    #[test]
    fn test_unite_and_intersect() {
        let a = Event::from_mask([true, true, false, false]);
        let b = Event::from_mask([false, true, true, false]);
        assert_eq!(
            Event::unite(&a, &b).unwrap(),
            Event::from_mask([true, true, true, false])
        );
        assert_eq!(
            Event::intersect(&a, &b).unwrap(),
            Event::from_mask([false, true, false, false])
        );
        assert_eq!(
            Event::difference(&a, &b).unwrap(),
            Event::from_mask([true, false, false, false])
        );
    }

    #[test]
    fn test_size_mismatch_is_rejected() {
        let a = Event::full(3);
        let b = Event::full(4);
        assert_eq!(
            Event::unite(&a, &b),
            Err(SpaceError::SizeMismatch {
                expected: 3,
                actual: 4
            })
        );
        assert!(Event::intersect(&a, &b).is_err());
        assert!(!a.is_subset(&b));
        assert!(!a.is_disjoint(&b));
    }

    #[test]
    fn test_from_outcomes() {
        let e = Event::from_outcomes(5, [0, 4]).unwrap();
        assert_eq!(e.outcomes().collect::<Vec<_>>(), vec![0, 4]);
        assert_eq!(e.mask(), vec![true, false, false, false, true]);
        assert_eq!(
            Event::from_outcomes(5, [5]),
            Err(SpaceError::OutOfRange { id: 5, size: 5 })
        );
    }

    #[test]
    fn test_structural_equality() {
        let a = Event::from_mask(vec![true, false]);
        let b = Event::singleton(2, 0).unwrap();
        assert_eq!(a, b);
        assert_ne!(Event::empty(2), Event::empty(3));
    }

    #[test]
    fn test_subset_and_disjoint() {
        let small = Event::from_mask([true, false, false]);
        let big = Event::from_mask([true, true, false]);
        let other = Event::from_mask([false, false, true]);
        assert!(small.is_subset(&big));
        assert!(!big.is_subset(&small));
        assert!(big.is_disjoint(&other));
        assert!(Event::empty(3).is_subset(&small));
    }

    #[test]
    fn test_zero_length_universe() {
        let e = Event::empty(0);
        assert!(e.is_empty());
        assert!(e.is_empty_set());
        assert!(e.is_full_set());
        assert_eq!(Event::full(0), e);
        assert_eq!(Event::complement(&e), e);
    }

    #[test]
    fn test_display() {
        let e = Event::from_mask([true, false, true]);
        assert_eq!(e.to_string(), "{0, 2}");
        assert_eq!(Event::empty(2).to_string(), "{}");
    }
}
