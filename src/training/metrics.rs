//! Classification metrics and the text evaluation report

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Heading of the widest summary row, which sets the minimum label width
const WEIGHTED_AVG: &str = "weighted avg";

/// Metrics for a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub support: usize,
}

/// Averaged metrics over all classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Per-class precision/recall/F1 with accuracy and averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
    pub total_support: usize,
    /// Decimal places used when rendering
    pub digits: usize,
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

impl ClassificationReport {
    /// Compute the report. Labels are the sorted union of true and predicted
    /// labels; undefined ratios (zero denominators) count as 0.
    pub fn compute(y_true: &[String], y_pred: &[String]) -> Self {
        let labels: BTreeSet<&str> = y_true
            .iter()
            .chain(y_pred.iter())
            .map(String::as_str)
            .collect();

        let classes: Vec<ClassMetrics> = labels
            .iter()
            .map(|&label| {
                let mut tp = 0usize;
                let mut predicted = 0usize;
                let mut actual = 0usize;
                for (t, p) in y_true.iter().zip(y_pred) {
                    let is_true = t == label;
                    let is_pred = p == label;
                    if is_true && is_pred {
                        tp += 1;
                    }
                    if is_pred {
                        predicted += 1;
                    }
                    if is_true {
                        actual += 1;
                    }
                }

                let precision = ratio(tp, predicted);
                let recall = ratio(tp, actual);
                ClassMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1_score: f1(precision, recall),
                    support: actual,
                }
            })
            .collect();

        let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
        let total_support = y_true.len();

        let n_classes = classes.len().max(1) as f64;
        let macro_avg = AverageMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n_classes,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n_classes,
            f1_score: classes.iter().map(|c| c.f1_score).sum::<f64>() / n_classes,
        };

        let weighted = |metric: fn(&ClassMetrics) -> f64| {
            if total_support == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|c| metric(c) * c.support as f64)
                    .sum::<f64>()
                    / total_support as f64
            }
        };
        let weighted_avg = AverageMetrics {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1_score: weighted(|c| c.f1_score),
        };

        Self {
            accuracy: ratio(correct, total_support),
            classes,
            macro_avg,
            weighted_avg,
            total_support,
            digits: 2,
        }
    }

    fn label_width(&self) -> usize {
        self.classes
            .iter()
            .map(|c| c.label.chars().count())
            .chain([WEIGHTED_AVG.len(), self.digits])
            .max()
            .unwrap_or(WEIGHTED_AVG.len())
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.label_width();
        let digits = self.digits;

        write!(f, "{:>width$} ", "", width = width)?;
        for header in ["precision", "recall", "f1-score", "support"] {
            write!(f, " {:>9}", header)?;
        }
        writeln!(f)?;
        writeln!(f)?;

        let row = |f: &mut fmt::Formatter<'_>, heading: &str, p: f64, r: f64, f1: f64, support: usize| {
            writeln!(
                f,
                "{:>width$}  {:>9.digits$} {:>9.digits$} {:>9.digits$} {:>9}",
                heading,
                p,
                r,
                f1,
                support,
                width = width,
                digits = digits
            )
        };

        for class in &self.classes {
            row(f, &class.label, class.precision, class.recall, class.f1_score, class.support)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.digits$} {:>9}",
            "accuracy",
            "",
            "",
            self.accuracy,
            self.total_support,
            width = width,
            digits = digits
        )?;

        let m = &self.macro_avg;
        row(f, "macro avg", m.precision, m.recall, m.f1_score, self.total_support)?;
        let w = &self.weighted_avg;
        row(f, WEIGHTED_AVG, w.precision, w.recall, w.f1_score, self.total_support)
    }
}

/// Render the text classification report for a set of predictions
pub fn classification_report(y_true: &[String], y_pred: &[String]) -> String {
    ClassificationReport::compute(y_true, y_pred).to_string()
}
