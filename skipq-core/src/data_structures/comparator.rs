//! Total orders used to position elements in the skip list.
//!
//! Every comparison the list performs goes through a [`Comparator`]. The
//! default, [`NaturalOrder`], defers to `Ord`; closures can be used through
//! [`FnComparator`].

use std::cmp::Ordering;

pub trait Comparator<T> {
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders elements by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts another comparator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<C>(pub C);

impl<T, C: Comparator<T>> Comparator<T> for Reverse<C> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Adapts a closure into a [`Comparator`].
///
/// The closure must describe a total order; the list's ordering invariants
/// are only as sound as the order it is given.
#[derive(Clone, Copy)]
pub struct FnComparator<F>(pub F);

impl<T, F> Comparator<T> for FnComparator<F>
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

impl<F> std::fmt::Debug for FnComparator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnComparator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_and_reverse() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(Reverse(NaturalOrder).compare(&1, &2), Ordering::Greater);
        assert_eq!(Reverse(NaturalOrder).compare(&2, &2), Ordering::Equal);
    }

    #[test]
    fn test_fn_comparator_by_key() {
        let by_len = FnComparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
        assert_eq!(by_len.compare(&"abc", &"z"), Ordering::Greater);
        assert_eq!(by_len.compare(&"ab", &"yz"), Ordering::Equal);
    }
}
