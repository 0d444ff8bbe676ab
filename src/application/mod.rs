// ============================================================
// Layer 2 - Application / Use Cases
// ============================================================
// One use case per pipeline stage, plus the Pipeline that
// builds their configs from params.yaml and chains them.
//
// Rules for this layer:
//   - No ML math or text processing here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination: read inputs, call the
//     lower layers, write outputs
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Stage 1: raw CSV → filtered, encoded train/test split
pub mod ingest_use_case;

// Stage 2: text normalisation
pub mod preprocess_use_case;

// Stage 3: bag-of-words features
pub mod feature_use_case;

// Stage 4: gradient-boosted tree training
pub mod train_use_case;

// Stage 5: test-set metrics
pub mod evaluate_use_case;

// Stage wiring and the full run
pub mod pipeline;
