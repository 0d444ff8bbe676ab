// ============================================================
// Layer 5 - ML / Model Layer
// ============================================================
// Everything that learns from or scores feature tables lives
// here. Other layers only see FeatureTable in and
// GbmClassifier / metrics out.
//
//   tree.rs       - histogram-binned regression tree grown on
//                   gradient/hessian statistics
//
//   gbm.rs        - gradient-boosted ensemble of those trees
//                   with logistic loss; serde-serialisable
//
//   trainer.rs    - fit/holdout split + training run
//
//   inferencer.rs - loads a saved model, checks column
//                   alignment, scores a table
//
//   scoring.rs    - accuracy, precision, recall, ROC AUC and
//                   the per-class classification report
//
// Reference: Friedman (2001) Greedy Function Approximation
//            Chen & Guestrin (2016) XGBoost

/// Histogram-based regression tree
pub mod tree;

/// Boosted tree classifier
pub mod gbm;

/// Training run with holdout evaluation
pub mod trainer;

/// Loads a model and scores feature tables
pub mod inferencer;

/// Binary classification metrics
pub mod scoring;
