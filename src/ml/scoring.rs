// ============================================================
// Layer 5 - Classification Scoring
// ============================================================
// Standard binary classification metrics against {0, 1}
// labels, with 1 as the positive class:
//
//   accuracy  = (TP + TN) / N
//   precision = TP / (TP + FP)     (0 when nothing predicted 1)
//   recall    = TP / (TP + FN)     (0 when no true 1s)
//   ROC AUC   = P(score of a random positive > random negative)
//               via the Mann-Whitney rank statistic, ties
//               counted as one half
//
// ClassificationReport renders the familiar per-class table
// (precision, recall, f1-score, support) with accuracy, macro
// and weighted averages.

use std::fmt;

use crate::domain::record::{NEGATIVE, POSITIVE};

/// Counts of the four prediction outcomes for one positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub fp: usize,
    pub tn: usize,
    pub fn_: usize,
}

impl ConfusionMatrix {
    /// Tally outcomes treating `positive` as the class of interest
    pub fn for_class(y_true: &[u8], y_pred: &[u8], positive: u8) -> Self {
        let mut m = Self::default();
        for (&t, &p) in y_true.iter().zip(y_pred) {
            match (t == positive, p == positive) {
                (true, true)   => m.tp += 1,
                (false, true)  => m.fp += 1,
                (false, false) => m.tn += 1,
                (true, false)  => m.fn_ += 1,
            }
        }
        m
    }

    pub fn total(&self) -> usize {
        self.tp + self.fp + self.tn + self.fn_
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.tp + self.tn, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.tp, self.tp + self.fp)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.tp, self.tp + self.fn_)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// Number of true members of the class
    pub fn support(&self) -> usize {
        self.tp + self.fn_
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

pub fn accuracy(y_true: &[u8], y_pred: &[u8]) -> f64 {
    ConfusionMatrix::for_class(y_true, y_pred, POSITIVE).accuracy()
}

pub fn precision(y_true: &[u8], y_pred: &[u8]) -> f64 {
    ConfusionMatrix::for_class(y_true, y_pred, POSITIVE).precision()
}

pub fn recall(y_true: &[u8], y_pred: &[u8]) -> f64 {
    ConfusionMatrix::for_class(y_true, y_pred, POSITIVE).recall()
}

/// Area under the ROC curve from positive-class scores.
/// `None` when only one class is present (the curve is undefined).
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> Option<f64> {
    let n_pos = y_true.iter().filter(|&&t| t == POSITIVE).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    // 1-based ranks of the scores, tied groups share their mean rank
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let mean_rank = (i + j) as f64 / 2.0 + 1.0;
        for &k in &order[i..=j] {
            ranks[k] = mean_rank;
        }
        i = j + 1;
    }

    let pos_rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|(&t, _)| t == POSITIVE)
        .map(|(_, &r)| r)
        .sum();

    let n_pos = n_pos as f64;
    let n_neg = n_neg as f64;
    Some((pos_rank_sum - n_pos * (n_pos + 1.0) / 2.0) / (n_pos * n_neg))
}

// ─── Classification report ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ClassRow {
    pub name:      String,
    pub precision: f64,
    pub recall:    f64,
    pub f1:        f64,
    pub support:   usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub classes:      Vec<ClassRow>,
    pub accuracy:     f64,
    pub macro_avg:    ClassRow,
    pub weighted_avg: ClassRow,
}

impl ClassificationReport {
    pub fn new(y_true: &[u8], y_pred: &[u8]) -> Self {
        let classes: Vec<ClassRow> = [NEGATIVE, POSITIVE]
            .iter()
            .map(|&c| {
                let m = ConfusionMatrix::for_class(y_true, y_pred, c);
                ClassRow {
                    name:      c.to_string(),
                    precision: m.precision(),
                    recall:    m.recall(),
                    f1:        m.f1(),
                    support:   m.support(),
                }
            })
            .collect();

        let total = y_true.len();
        let k     = classes.len() as f64;
        let mean  = |f: fn(&ClassRow) -> f64| classes.iter().map(f).sum::<f64>() / k;
        let wmean = |f: fn(&ClassRow) -> f64| {
            classes.iter().map(|c| f(c) * c.support as f64).sum::<f64>() / total.max(1) as f64
        };

        let macro_avg = ClassRow {
            name:      "macro avg".to_string(),
            precision: mean(|c| c.precision),
            recall:    mean(|c| c.recall),
            f1:        mean(|c| c.f1),
            support:   total,
        };
        let weighted_avg = ClassRow {
            name:      "weighted avg".to_string(),
            precision: wmean(|c| c.precision),
            recall:    wmean(|c| c.recall),
            f1:        wmean(|c| c.f1),
            support:   total,
        };

        Self {
            accuracy: accuracy(y_true, y_pred),
            classes,
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>12}  {:>9} {:>9} {:>9} {:>9}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for c in &self.classes {
            write_row(f, c)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>12}  {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        write_row(f, &self.macro_avg)?;
        write_row(f, &self.weighted_avg)
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, r: &ClassRow) -> fmt::Result {
    writeln!(
        f,
        "{:>12}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
        r.name, r.precision, r.recall, r.f1, r.support
    )
}
