// ============================================================
// Layer 5 - Boosted Regression Tree
// ============================================================
// One tree of the gradient-boosted ensemble, grown on the
// first and second derivatives of the log loss:
//
//   split gain = ½ [ G_L²/(H_L+λ) + G_R²/(H_R+λ) − G²/(H+λ) ] − γ
//   leaf value = −η · G / (H + λ)
//
// where G/H are the gradient/hessian sums of the rows in a
// node, λ the L2 penalty, γ the minimum gain and η the
// learning rate. Growth is depth-first up to `max_depth`, and a
// child must carry at least `min_child_weight` hessian.
//
// Split search is histogram based. Every feature's values are
// bucketed once into at most `max_bins` ascending cut points,
// and a split "bin ≤ b" becomes the threshold test
// "value ≤ cuts[b]" at prediction time. Bag-of-words rows are
// mostly zeros, so only non-zero cells are stored; the zero
// bin of each feature is filled by subtraction from the node
// totals.
//
// Reference: Chen & Guestrin (2016) XGBoost, §2.2 and §3.1

use serde::{Deserialize, Serialize};

/// Splits gaining less than this are not worth a node
const MIN_SPLIT_GAIN: f64 = 1e-6;

/// Per-tree growth settings, derived from GbmParams
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth:        usize,
    pub learning_rate:    f64,
    pub reg_lambda:       f64,
    pub gamma:            f64,
    pub min_child_weight: f64,
}

// ─── Binned feature matrix ────────────────────────────────────────────────────

/// Training rows quantised into per-feature bins.
#[derive(Debug, Clone)]
pub struct BinnedMatrix {
    n_rows:    usize,
    /// Ascending cut points per feature, ending at the feature maximum.
    /// Zero is one of them unless downsampling dropped it.
    cuts:      Vec<Vec<f64>>,
    /// Start of each feature's bins inside a flat histogram
    offsets:   Vec<usize>,
    /// Bin that the implicit zero value falls into: the first cut ≥ 0
    zero_bins: Vec<usize>,
    /// Per row: (feature, bin) for every non-zero cell, by feature
    entries:   Vec<Vec<(usize, usize)>>,
}

impl BinnedMatrix {
    pub fn new(rows: &[Vec<f64>], n_features: usize, max_bins: usize) -> Self {
        let max_bins = max_bins.max(2);

        let mut values: Vec<Vec<f64>> = vec![vec![0.0]; n_features];
        for row in rows {
            for (f, &v) in row.iter().enumerate().take(n_features) {
                if v != 0.0 {
                    values[f].push(v);
                }
            }
        }

        let cuts: Vec<Vec<f64>> = values
            .into_iter()
            .map(|mut vs| {
                vs.sort_by(f64::total_cmp);
                vs.dedup();
                downsample(vs, max_bins)
            })
            .collect();

        let mut offsets = Vec::with_capacity(n_features);
        let mut total   = 0;
        for c in &cuts {
            offsets.push(total);
            total += c.len();
        }

        let zero_bins = cuts.iter().map(|c| bin_of(c, 0.0)).collect();

        let entries = rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .take(n_features)
                    .filter(|(_, &v)| v != 0.0)
                    .map(|(f, &v)| (f, bin_of(&cuts[f], v)))
                    .collect()
            })
            .collect();

        Self { n_rows: rows.len(), cuts, offsets, zero_bins, entries }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_features(&self) -> usize {
        self.cuts.len()
    }

    fn total_bins(&self) -> usize {
        self.cuts.iter().map(Vec::len).sum()
    }

    /// Bin of one cell
    fn row_bin(&self, row: usize, feature: usize) -> usize {
        let entries = &self.entries[row];
        match entries.binary_search_by_key(&feature, |&(f, _)| f) {
            Ok(i) => entries[i].1,
            Err(_) => self.zero_bins[feature],
        }
    }
}

/// Index of the first cut ≥ v (values above every cut land in the last bin)
fn bin_of(cuts: &[f64], v: f64) -> usize {
    cuts.partition_point(|&c| c < v).min(cuts.len().saturating_sub(1))
}

/// Keep at most `max_bins` evenly spaced quantiles, always the maximum
fn downsample(sorted: Vec<f64>, max_bins: usize) -> Vec<f64> {
    let len = sorted.len();
    if len <= max_bins {
        return sorted;
    }
    (1..=max_bins).map(|i| sorted[i * len / max_bins - 1]).collect()
}

// ─── Gradient statistics ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
struct GradStats {
    g: f64,
    h: f64,
}

impl GradStats {
    fn add(&mut self, other: GradStats) {
        self.g += other.g;
        self.h += other.h;
    }

    fn minus(self, other: GradStats) -> GradStats {
        GradStats { g: self.g - other.g, h: self.h - other.h }
    }

    /// Structure score G² / (H + λ)
    fn score(self, lambda: f64) -> f64 {
        self.g * self.g / (self.h + lambda)
    }
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    bin:     usize,
}

// ─── Tree ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature:   usize,
        threshold: f64,
        left:      usize,
        right:     usize,
    },
}

/// A fitted tree; node 0 is the root
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Grow one tree against per-row gradients and hessians
    pub fn fit(data: &BinnedMatrix, grad: &[f64], hess: &[f64], params: &TreeParams) -> Self {
        let mut builder = TreeBuilder { data, grad, hess, params, nodes: Vec::new() };
        builder.grow((0..data.n_rows()).collect(), 0);
        Self { nodes: builder.nodes }
    }

    /// Leaf value reached by a raw feature row
    pub fn predict(&self, row: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes.get(idx) {
                Some(Node::Leaf { value }) => return *value,
                Some(Node::Split { feature, threshold, left, right }) => {
                    let v = row.get(*feature).copied().unwrap_or(0.0);
                    idx = if v <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// Features used by split nodes, once per split
    pub fn split_features(&self) -> impl Iterator<Item = usize> + '_ {
        self.nodes.iter().filter_map(|n| match n {
            Node::Split { feature, .. } => Some(*feature),
            Node::Leaf { .. } => None,
        })
    }
}

struct TreeBuilder<'a> {
    data:   &'a BinnedMatrix,
    grad:   &'a [f64],
    hess:   &'a [f64],
    params: &'a TreeParams,
    nodes:  Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    /// Grow the subtree over `rows`; returns its node index
    fn grow(&mut self, rows: Vec<usize>, depth: usize) -> usize {
        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { value: 0.0 });

        let (hist, total) = self.histogram(&rows);

        if depth < self.params.max_depth {
            if let Some(split) = self.best_split(&hist, total) {
                let data = self.data;
                let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
                    .into_iter()
                    .partition(|&r| data.row_bin(r, split.feature) <= split.bin);

                let left  = self.grow(left_rows, depth + 1);
                let right = self.grow(right_rows, depth + 1);

                self.nodes[id] = Node::Split {
                    feature:   split.feature,
                    threshold: data.cuts[split.feature][split.bin],
                    left,
                    right,
                };
                return id;
            }
        }

        let value = -self.params.learning_rate * total.g / (total.h + self.params.reg_lambda);
        self.nodes[id] = Node::Leaf { value };
        id
    }

    /// Per-bin gradient sums for the rows of one node, plus the node total
    fn histogram(&self, rows: &[usize]) -> (Vec<GradStats>, GradStats) {
        let data = self.data;
        let mut hist    = vec![GradStats::default(); data.total_bins()];
        let mut nonzero = vec![GradStats::default(); data.n_features()];
        let mut total   = GradStats::default();

        for &r in rows {
            let s = GradStats { g: self.grad[r], h: self.hess[r] };
            total.add(s);
            for &(f, b) in &data.entries[r] {
                hist[data.offsets[f] + b].add(s);
                nonzero[f].add(s);
            }
        }

        // Rows not listed for a feature hold zero there
        for f in 0..data.n_features() {
            hist[data.offsets[f] + data.zero_bins[f]].add(total.minus(nonzero[f]));
        }

        (hist, total)
    }

    /// Highest-gain split over all features, if any beats MIN_SPLIT_GAIN.
    /// Ties keep the earlier feature and bin.
    fn best_split(&self, hist: &[GradStats], total: GradStats) -> Option<Split> {
        let p       = self.params;
        let parent  = total.score(p.reg_lambda);
        let mut best      = None;
        let mut best_gain = MIN_SPLIT_GAIN;

        for f in 0..self.data.n_features() {
            let start = self.data.offsets[f];
            let bins  = &hist[start..start + self.data.cuts[f].len()];

            let mut left = GradStats::default();
            for (b, stats) in bins.iter().enumerate().take(bins.len().saturating_sub(1)) {
                left.add(*stats);
                let right = total.minus(left);
                if left.h < p.min_child_weight || right.h < p.min_child_weight {
                    continue;
                }

                let gain = 0.5
                    * (left.score(p.reg_lambda) + right.score(p.reg_lambda) - parent)
                    - p.gamma;
                if gain > best_gain {
                    best_gain = gain;
                    best = Some(Split { feature: f, bin: b });
                }
            }
        }

        best
    }
}
