use ordered_float::OrderedFloat;

/// Stable ascending argsort. NaN keys sort last.
#[must_use]
pub fn argsort(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by_key(|&index| OrderedFloat(keys[index]));
    order
}

/// Stable descending argsort; equal keys keep their input order.
#[must_use]
pub fn argsort_descending(keys: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by_key(|&index| std::cmp::Reverse(OrderedFloat(keys[index])));
    order
}

/// Moves `items` into the order given by a permutation of their indices.
#[must_use]
pub fn apply_order<T>(items: Vec<T>, order: &[usize]) -> Vec<T> {
    debug_assert_eq!(items.len(), order.len());
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&index| slots.get_mut(index).and_then(Option::take))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{apply_order, argsort, argsort_descending};

    #[test]
    fn argsort_is_stable_for_ties() {
        assert_eq!(argsort(&[2.0, 1.0, 2.0, 0.5]), vec![3, 1, 0, 2]);
        assert_eq!(argsort_descending(&[2.0, 1.0, 2.0, 0.5]), vec![0, 2, 1, 3]);
    }

    #[test]
    fn apply_order_reorders_owned_items() {
        let items = vec!["a", "b", "c"];
        assert_eq!(apply_order(items, &[2, 0, 1]), vec!["c", "a", "b"]);
    }
}
