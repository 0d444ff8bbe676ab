// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs and traits that describe what flows
// between the pipeline stages:
//
//   Frame         - an ordered, row-addressable CSV table
//   Record        - one (content, label) text sample
//   LabelMapping  - which two sentiment classes survive and
//                   how they are encoded as {0, 1}
//   FeatureTable  - vectorized rows plus a trailing label
//
// Rules for this layer:
//   - NO file or network I/O
//   - NO model code
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Ordered CSV-shaped table used by ingestion and preprocessing
pub mod frame;

// Text records and the binary label encoding
pub mod record;

// Bag-of-words feature matrix with labels
pub mod feature_table;

// Core abstractions (traits) that other layers implement
pub mod traits;
