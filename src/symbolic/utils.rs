// the collection of utility functions mainly for bracket checking and grids

/// Position (byte offset) of the first bracket that has no pair: either a `)`
/// closing nothing, or the outermost `(` left open at the end of the input.
pub fn find_unbalanced_bracket(input: &str) -> Option<usize> {
    let mut stack = Vec::new();
    for (i, c) in input.char_indices() {
        match c {
            '(' => stack.push(i),
            ')' => {
                if stack.pop().is_none() {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    stack.first().copied()
}

/// `num_values` evenly spaced points from `start` to `end` inclusive, computed by index
#[cfg(test)]
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    if num_values == 1 {
        return vec![start];
    }
    let step = (end - start) / (num_values as f64 - 1.0);
    (0..num_values).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_unbalanced_bracket() {
        assert_eq!(find_unbalanced_bracket("(x+1)*(x-1)"), None);
        assert_eq!(find_unbalanced_bracket("x+1)"), Some(3));
        assert_eq!(find_unbalanced_bracket("((x+1)"), Some(0));
        assert_eq!(find_unbalanced_bracket("x + ("), Some(4));
    }

    #[test]
    fn test_linspace() {
        let grid = linspace(0.0, 1.0, 5);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }
}
