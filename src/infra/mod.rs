// ============================================================
// Layer 6 - Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by several stages:
//
//   params.rs     - params.yaml parsing, defaults and
//                   validation
//
//   layout.rs     - where every artifact lives below the
//                   pipeline root
//
//   checkpoint.rs - saving and loading the trained model
//
//   metrics.rs    - evaluation metrics JSON
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// params.yaml loading and validation
pub mod params;

/// Artifact paths relative to the pipeline root
pub mod layout;

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Evaluation metrics JSON writer
pub mod metrics;
