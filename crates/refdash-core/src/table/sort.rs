use super::order::Order;
use super::value::{Row, SortValue};
use std::cmp::Ordering;

/// Returns a new vector holding `rows` ordered by `key`.
///
/// Rows are decorated with their input position; equal keys (including
/// incomparable ones) fall back to that position, earlier first, in both
/// directions. The input slice is left untouched.
///
/// The comparator is not a total order when incomparable values are
/// involved, so ordering is done by a merge sort that never inspects more
/// than one pair at a time and always yields a permutation of the input.
pub fn stable_sort<R: Row + Clone>(rows: &[R], key: &str, order: Order) -> Vec<R> {
    let decorated: Vec<(usize, SortValue)> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (index, row.sort_value(key)))
        .collect();

    merge_sort(decorated, &|a, b| compare_decorated(a, b, order))
        .into_iter()
        .map(|(index, _)| rows[index].clone())
        .collect()
}

fn compare_decorated(a: &(usize, SortValue), b: &(usize, SortValue), order: Order) -> Ordering {
    let by_value = match order {
        Order::Ascending => a.1.compare(&b.1),
        Order::Descending => b.1.compare(&a.1),
    };
    by_value.then(a.0.cmp(&b.0))
}

fn merge_sort<T, F>(mut items: Vec<T>, cmp: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, cmp);
    let right = merge_sort(right, cmp);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        // Take from the right run only when strictly smaller.
        let take_right = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => cmp(r, l) == Ordering::Less,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            (None, None) => break,
        };
        merged.extend(if take_right { right.next() } else { left.next() });
    }
    merged
}
