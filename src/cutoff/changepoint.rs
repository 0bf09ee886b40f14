//! Binary segmentation for changes in mean
//!
//! Values are assumed normal with unit variance, so a segment's cost is its
//! sum of squared deviations from the segment mean. Splits are added
//! greedily, one per round, and the number kept is chosen by penalized cost.

/// Prefix sums giving O(1) segment costs
struct SegmentCost {
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
}

impl SegmentCost {
    fn new(values: &[f64]) -> Self {
        let mut sum = Vec::with_capacity(values.len() + 1);
        let mut sum_sq = Vec::with_capacity(values.len() + 1);
        sum.push(0.0);
        sum_sq.push(0.0);
        for &v in values {
            sum.push(sum[sum.len() - 1] + v);
            sum_sq.push(sum_sq[sum_sq.len() - 1] + v * v);
        }
        Self { sum, sum_sq }
    }

    /// Cost of `values[start..end]`
    fn cost(&self, start: usize, end: usize) -> f64 {
        let len = (end - start) as f64;
        if len == 0.0 {
            return 0.0;
        }
        let s = self.sum[end] - self.sum[start];
        let ss = self.sum_sq[end] - self.sum_sq[start];
        (ss - s * s / len).max(0.0)
    }
}

/// Best single split of `[start, end)`: `(split, gain)` where the left
/// segment is `[start, split)`
///
/// The earliest split wins ties.
fn best_split(costs: &SegmentCost, start: usize, end: usize) -> Option<(usize, f64)> {
    if end - start < 2 {
        return None;
    }
    let whole = costs.cost(start, end);
    let mut best: Option<(usize, f64)> = None;
    for split in (start + 1)..end {
        let gain = whole - costs.cost(start, split) - costs.cost(split, end);
        if best.map_or(true, |(_, g)| gain > g) {
            best = Some((split, gain));
        }
    }
    best
}

/// Penalty per changepoint for `n` observations
pub fn penalty(n: usize) -> f64 {
    2.0 * (n as f64).ln()
}

/// Changepoint positions in `values`, ascending
///
/// Each position is the last index of the segment before a change. At most
/// `max_changepoints` are returned.
pub fn binary_segmentation(values: &[f64], max_changepoints: usize) -> Vec<usize> {
    let n = values.len();
    if n < 2 || max_changepoints == 0 {
        return Vec::new();
    }

    let costs = SegmentCost::new(values);
    let mut segments = vec![(0usize, n)];
    // (split, gain) in the order they were found
    let mut splits: Vec<(usize, f64)> = Vec::new();

    for _ in 0..max_changepoints {
        let candidate = segments
            .iter()
            .enumerate()
            .filter_map(|(i, &(s, e))| best_split(&costs, s, e).map(|(k, g)| (i, k, g)))
            .fold(None, |best: Option<(usize, usize, f64)>, cur| match best {
                Some(b) if b.2 >= cur.2 => Some(b),
                _ => Some(cur),
            });
        let Some((segment, split, gain)) = candidate else {
            break;
        };

        let (start, end) = segments[segment];
        segments[segment] = (start, split);
        segments.insert(segment + 1, (split, end));
        splits.push((split, gain));
    }

    // Total cost after k splits is the full cost minus the first k gains
    let pen = penalty(n);
    let mut best_k = 0;
    let mut best_score = costs.cost(0, n);
    let mut running = best_score;
    for (k, &(_, gain)) in splits.iter().enumerate() {
        running -= gain;
        let score = running + (k + 1) as f64 * pen;
        if score < best_score {
            best_score = score;
            best_k = k + 1;
        }
    }

    let mut positions: Vec<usize> = splits[..best_k].iter().map(|&(k, _)| k - 1).collect();
    positions.sort_unstable();
    positions
}
