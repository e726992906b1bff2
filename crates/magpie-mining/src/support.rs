//! Support sets: the selectors a pattern occurs in.

use magpie_css::SelectorId;

/// A set of selectors, kept sorted and free of duplicates.
///
/// Sorted storage makes intersection a linear merge and makes equal sets
/// compare and hash equal, so a support can key a map directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Support(Vec<SelectorId>);

impl Support {
    /// The empty support.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// The support of the empty itemset: every selector of a stylesheet
    /// with `selector_count` selectors.
    #[must_use]
    pub fn universe(selector_count: usize) -> Self {
        Self((0..selector_count).map(SelectorId).collect())
    }

    /// Number of selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no selector is in the set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check if `selector` is in the set.
    #[must_use]
    pub fn contains(&self, selector: SelectorId) -> bool {
        self.0.binary_search(&selector).is_ok()
    }

    /// Add a selector. Returns `false` if it was already present.
    pub fn insert(&mut self, selector: SelectorId) -> bool {
        match self.0.binary_search(&selector) {
            Ok(_) => false,
            Err(at) => {
                self.0.insert(at, selector);
                true
            }
        }
    }

    /// The selectors in both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.0.iter().peekable(), other.0.iter().peekable());
        let mut out = Vec::with_capacity(self.len().min(other.len()));
        while let (Some(&&x), Some(&&y)) = (a.peek(), b.peek()) {
            match x.cmp(&y) {
                core::cmp::Ordering::Less => {
                    let _ = a.next();
                }
                core::cmp::Ordering::Greater => {
                    let _ = b.next();
                }
                core::cmp::Ordering::Equal => {
                    out.push(x);
                    let _ = a.next();
                    let _ = b.next();
                }
            }
        }
        Self(out)
    }

    /// Check if every selector of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.0.iter().all(|s| other.contains(*s))
    }

    /// Iterate over the selectors in id order.
    pub fn iter(&self) -> core::iter::Copied<core::slice::Iter<'_, SelectorId>> {
        self.0.iter().copied()
    }

    /// The selectors in id order.
    #[must_use]
    pub fn as_slice(&self) -> &[SelectorId] {
        &self.0
    }
}

impl FromIterator<SelectorId> for Support {
    fn from_iter<I: IntoIterator<Item = SelectorId>>(iter: I) -> Self {
        let mut selectors: Vec<SelectorId> = iter.into_iter().collect();
        selectors.sort_unstable();
        selectors.dedup();
        Self(selectors)
    }
}

impl<'a> IntoIterator for &'a Support {
    type Item = SelectorId;
    type IntoIter = core::iter::Copied<core::slice::Iter<'a, SelectorId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn support(ids: &[usize]) -> Support {
        ids.iter().copied().map(SelectorId).collect()
    }

    #[test]
    fn test_from_iter_sorts_and_dedups() {
        assert_eq!(support(&[3, 1, 3, 2]).as_slice(), support(&[1, 2, 3]).as_slice());
    }

    #[test]
    fn test_intersect() {
        let a = support(&[1, 2, 4, 7]);
        let b = support(&[2, 3, 4, 8]);
        assert_eq!(a.intersect(&b), support(&[2, 4]));
        assert!(a.intersect(&Support::new()).is_empty());
    }

    #[test]
    fn test_subset_and_insert() {
        let mut a = support(&[1, 5]);
        assert!(a.is_subset(&support(&[0, 1, 5])));
        assert!(a.insert(SelectorId(3)));
        assert!(!a.insert(SelectorId(3)));
        assert_eq!(a, support(&[1, 3, 5]));
        assert_eq!(Support::universe(3), support(&[0, 1, 2]));
    }
}
