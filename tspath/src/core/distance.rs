//! Comparison of a resolved path against a gold-standard path.
//!
//! Paths are compared as step lists: the first point followed by the
//! difference between each point and its predecessor. Two paths that differ
//! by a single misplaced chord then disagree in a single step.

use serde::{Deserialize, Serialize};

use crate::core::coordinate::Coordinate;
use crate::core::path::TonalPath;

/// First point of `path`, then successive differences.
pub fn steps<const N: usize>(path: &TonalPath<N>) -> Vec<Coordinate<N>> {
    let mut steps = Vec::with_capacity(path.len());
    let mut previous = Coordinate::origin();
    for point in path {
        steps.push(*point - previous);
        previous = *point;
    }
    steps
}

/// Unit-cost Levenshtein distance.
pub fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, left) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, right) in b.iter().enumerate() {
            let substitution = diagonal + usize::from(left != right);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[b.len()]
}

/// Edit operations of one optimal alignment of a predicted sequence against
/// a gold sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub matches: usize,
    pub substitutions: usize,
    /// Gold items missing from the prediction.
    pub insertions: usize,
    /// Predicted items absent from the gold sequence.
    pub deletions: usize,
}

impl Alignment {
    pub fn cost(&self) -> usize {
        self.substitutions + self.insertions + self.deletions
    }
}

/// Optimal unit-cost alignment, recovered by tracing back through the full
/// cost table. Ties prefer match/substitution, then deletion, then insertion.
pub fn align<T: PartialEq>(predicted: &[T], gold: &[T]) -> Alignment {
    let (n, m) = (predicted.len(), gold.len());
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in table[0].iter_mut().enumerate() {
        *cell = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let substitution = table[i - 1][j - 1] + usize::from(predicted[i - 1] != gold[j - 1]);
            table[i][j] = substitution
                .min(table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1);
        }
    }

    let mut alignment = Alignment::default();
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let differs = predicted[i - 1] != gold[j - 1];
            if table[i][j] == table[i - 1][j - 1] + usize::from(differs) {
                if differs {
                    alignment.substitutions += 1;
                } else {
                    alignment.matches += 1;
                }
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && table[i][j] == table[i - 1][j] + 1 {
            alignment.deletions += 1;
            i -= 1;
        } else {
            alignment.insertions += 1;
            j -= 1;
        }
    }
    alignment
}

/// Precision, recall and F-score of matched steps.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathScore {
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
    pub alignment: Alignment,
}

/// Score `path` against `gold` by aligning their step lists.
///
/// Two empty paths score perfectly; an empty path against a non-empty one
/// scores zero.
pub fn score<const N: usize>(path: &TonalPath<N>, gold: &TonalPath<N>) -> PathScore {
    let predicted = steps(path);
    let expected = steps(gold);
    let alignment = align(&predicted, &expected);
    if predicted.is_empty() && expected.is_empty() {
        return PathScore {
            precision: 1.0,
            recall: 1.0,
            f_score: 1.0,
            alignment,
        };
    }
    let precision = ratio(alignment.matches, predicted.len());
    let recall = ratio(alignment.matches, expected.len());
    let f_score = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };
    PathScore {
        precision,
        recall,
        f_score,
        alignment,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(i64, i64)]) -> TonalPath {
        points
            .iter()
            .map(|(x, y)| Coordinate::new([*x, *y]))
            .collect()
    }

    #[test]
    fn steps_are_successive_differences() {
        let steps = steps(&path(&[(-1, 0), (0, 0), (-1, 0)]));
        assert_eq!(
            steps,
            vec![
                Coordinate::new([-1, 0]),
                Coordinate::new([1, 0]),
                Coordinate::new([-1, 0]),
            ]
        );
    }

    #[test]
    fn translation_changes_only_the_first_step() {
        let a = steps(&path(&[(0, 0), (1, 0), (1, 1)]));
        let b = steps(&path(&[(4, -1), (5, -1), (5, 0)]));
        assert_eq!(a[1..], b[1..]);
        assert_eq!(edit_distance(&a, &b), 1);
    }

    #[test]
    fn edit_distance_counts_unit_operations() {
        let kitten: Vec<char> = "kitten".chars().collect();
        let sitting: Vec<char> = "sitting".chars().collect();
        assert_eq!(edit_distance(&kitten, &sitting), 3);
        assert_eq!(edit_distance::<char>(&[], &sitting), 7);
        assert_eq!(edit_distance(&kitten, &kitten), 0);
    }

    #[test]
    fn alignment_cost_equals_edit_distance() {
        let a: Vec<char> = "flaw".chars().collect();
        let b: Vec<char> = "lawn".chars().collect();
        let alignment = align(&a, &b);
        assert_eq!(alignment.cost(), edit_distance(&a, &b));
        assert_eq!(alignment.matches, 3);
        assert_eq!(alignment.deletions, 1);
        assert_eq!(alignment.insertions, 1);
    }

    #[test]
    fn missing_gold_step_is_an_insertion() {
        let score = score(&path(&[(0, 0), (1, 0)]), &path(&[(0, 0), (1, 0), (2, 0)]));
        assert_eq!(
            score.alignment,
            Alignment {
                matches: 2,
                substitutions: 0,
                insertions: 1,
                deletions: 0,
            }
        );
        assert_eq!(score.precision, 1.0);
        assert!((score.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((score.f_score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn empty_paths() {
        let empty = TonalPath::empty();
        assert_eq!(score(&empty, &empty).f_score, 1.0);
        let one_sided = score(&empty, &path(&[(0, 0)]));
        assert_eq!(one_sided.f_score, 0.0);
        assert_eq!(one_sided.alignment.insertions, 1);
    }
}
