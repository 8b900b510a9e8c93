use std::collections::HashMap;

use super::MAX_PREDICTIONS;

/// Local ranking engine: orders history values by occurrence count, most
/// frequent first, ties broken by ascending value.
#[derive(Debug, Default, Clone)]
pub struct FrequencyPredictor;

impl FrequencyPredictor {
    pub fn new() -> Self {
        Self
    }

    pub fn rank(&self, history: &[u32], wrong: &[u32]) -> Vec<u32> {
        self.table(history)
            .into_iter()
            .map(|(value, _)| value)
            .filter(|value| !wrong.contains(value))
            .take(MAX_PREDICTIONS)
            .collect()
    }

    /// Full (value, count) listing under the same ordering, for display.
    pub fn table(&self, history: &[u32]) -> Vec<(u32, usize)> {
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for value in history {
            *counts.entry(*value).or_insert(0) += 1;
        }
        let mut rows: Vec<(u32, usize)> = counts.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_by_count_then_ascending_value() {
        let predictor = FrequencyPredictor::new();
        assert_eq!(predictor.rank(&[1, 2, 2, 3], &[]), vec![2, 1, 3]);
    }

    #[test]
    fn excludes_flagged_values() {
        let predictor = FrequencyPredictor::new();
        assert_eq!(predictor.rank(&[1, 2, 2, 3], &[2]), vec![1, 3]);
    }

    #[test]
    fn caps_output_at_seven() {
        let predictor = FrequencyPredictor::new();
        let history: Vec<u32> = (1..=12).collect();
        let ranked = predictor.rank(&history, &[]);
        assert_eq!(ranked.len(), 7);
        assert_eq!(ranked, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn output_disjoint_from_wrong_set() {
        let predictor = FrequencyPredictor::new();
        let history = vec![4, 4, 4, 9, 9, 1, 7, 7, 7, 7];
        let wrong = vec![7, 1];
        let ranked = predictor.rank(&history, &wrong);
        assert!(ranked.iter().all(|value| !wrong.contains(value)));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let predictor = FrequencyPredictor::new();
        let history = vec![5, 3, 5, 3, 8, 8, 1];
        assert_eq!(
            predictor.rank(&history, &[1]),
            predictor.rank(&history, &[1])
        );
    }

    #[test]
    fn empty_history_yields_empty_output() {
        let predictor = FrequencyPredictor::new();
        assert!(predictor.rank(&[], &[]).is_empty());
        assert!(predictor.table(&[]).is_empty());
    }

    #[test]
    fn table_lists_every_distinct_value() {
        let predictor = FrequencyPredictor::new();
        assert_eq!(
            predictor.table(&[1, 2, 2, 3]),
            vec![(2, 2), (1, 1), (3, 1)]
        );
    }
}
