//! Cyclic categorical assignment.
//!
//! The i-th value handed out is `values[i mod len]`. Every categorical
//! field owns its own `RoundRobin`, created fresh for one generation call,
//! so fields never share a phase and runs never share state.
//!
//! For n draws over k values each value appears floor(n/k) or ceil(n/k)
//! times, and the extra draws land on the first `n mod k` values in
//! declared order.

/// Pure form of the assignment: the value for record `index`.
/// Returns `None` only for an empty enumeration.
pub fn cyclic<T>(values: &[T], index: usize) -> Option<&T> {
    if values.is_empty() {
        return None;
    }
    values.get(index % values.len())
}

/// Counter-carrying iterator over a fixed enumeration.
///
/// Never ends for a non-empty enumeration; yields nothing for an empty one.
#[derive(Debug, Clone)]
pub struct RoundRobin<T: 'static> {
    values: &'static [T],
    counter: usize,
}

impl<T: Copy + 'static> RoundRobin<T> {
    pub fn new(values: &'static [T]) -> Self {
        Self { values, counter: 0 }
    }
}

impl<T: Copy + 'static> Iterator for RoundRobin<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = cyclic(self.values, self.counter).copied()?;
        self.counter += 1;
        Some(value)
    }
}

/// Expected per-value counts for `count` draws over `k` values.
/// Empty for `k == 0`.
pub fn expected_counts(count: usize, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    let base = count / k;
    let remainder = count % k;
    (0..k).map(|i| if i < remainder { base + 1 } else { base }).collect()
}

/// Strict alternation: even record positions are `true`.
pub fn alternating(index: usize) -> bool {
    index % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUSES: &[&str] = &["Completed", "Pending", "Failed", "Passed"];

    #[test]
    fn cycles_in_declared_order() {
        let drawn: Vec<&str> = RoundRobin::new(STATUSES).take(6).collect();
        assert_eq!(
            drawn,
            vec!["Completed", "Pending", "Failed", "Passed", "Completed", "Pending"]
        );
    }

    #[test]
    fn empty_enumeration_yields_nothing() {
        const NONE: &[&str] = &[];
        let mut rr = RoundRobin::new(NONE);
        assert_eq!(rr.next(), None);
        assert_eq!(rr.next(), None);
        assert_eq!(cyclic(NONE, 3), None);
    }

    #[test]
    fn independent_counters_do_not_share_phase() {
        let mut a = RoundRobin::new(STATUSES);
        let mut b = RoundRobin::new(STATUSES);
        a.next();
        a.next();
        assert_eq!(b.next(), Some("Completed"));
        assert_eq!(a.next(), Some("Failed"));
    }

    #[test]
    fn expected_counts_puts_remainder_first() {
        assert_eq!(expected_counts(5, 4), vec![2, 1, 1, 1]);
        assert_eq!(expected_counts(0, 4), vec![0, 0, 0, 0]);
        assert!(expected_counts(10, 0).is_empty());
    }

    #[test]
    fn alternation_is_even_true() {
        let flags: Vec<bool> = (0..5).map(alternating).collect();
        assert_eq!(flags, vec![true, false, true, false, true]);
    }
}
