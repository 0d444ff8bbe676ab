// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, loads params.yaml and hands each
// subcommand to the Pipeline (Layer 2). Results meant for a
// human are printed here and nowhere else.
//
//   sentiment-pipeline [--root DIR] [--params FILE] <command>
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use commands::Commands;
use crate::application::pipeline::Pipeline;
use crate::infra::{layout::PipelineLayout, params::Params};

#[derive(Parser, Debug)]
#[command(
    name = "sentiment-pipeline",
    version,
    about = "Offline sentiment pipeline: ingest, preprocess, featurize, train, evaluate."
)]
pub struct Cli {
    /// Pipeline root; every artifact path is relative to it
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Parameter file (default: <root>/params.yaml)
    #[arg(long, global = true)]
    pub params: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let layout      = PipelineLayout::new(&self.root);
        let params_path = match &self.params {
            Some(p) => p.clone(),
            None    => layout.resolve(&PathBuf::from("params.yaml")),
        };
        let mut params = Params::load(&params_path)?;

        match self.command {
            Commands::Ingest(args) => {
                args.apply(&mut params);
                let summary = Pipeline::new(params, layout).ingest()?;
                println!(
                    "Ingestion complete: {} train rows, {} test rows ({} dropped).",
                    summary.n_train, summary.n_test, summary.balance.dropped
                );
            }
            Commands::Preprocess => {
                let (n_train, n_test) = Pipeline::new(params, layout).preprocess()?;
                println!("Preprocessing complete: {} train rows, {} test rows.", n_train, n_test);
            }
            Commands::Featurize => {
                let n_terms = Pipeline::new(params, layout).featurize()?;
                println!("Feature engineering complete: {} vocabulary terms.", n_terms);
            }
            Commands::Train => {
                let report = Pipeline::new(params, layout).train()?;
                println!("Evaluation Accuracy: {}", report.holdout_accuracy);
            }
            Commands::Evaluate => {
                let outcome = Pipeline::new(params, layout).evaluate()?;
                println!("{}", outcome.report);
                print_metrics(&outcome.metrics);
            }
            Commands::Run(args) => {
                args.apply(&mut params);
                let report = Pipeline::new(params, layout).run_all()?;
                println!(
                    "Ingestion: {} train rows, {} test rows ({} dropped).",
                    report.ingest.n_train, report.ingest.n_test, report.ingest.balance.dropped
                );
                println!("Vocabulary: {} terms.", report.n_features);
                println!("Evaluation Accuracy: {}", report.train.holdout_accuracy);
                println!("{}", report.evaluation.report);
                print_metrics(&report.evaluation.metrics);
            }
        }
        Ok(())
    }
}

fn print_metrics(m: &crate::infra::metrics::EvaluationMetrics) {
    println!("Test Accuracy:  {:.4}", m.accuracy);
    println!("Test Precision: {:.4}", m.precision);
    println!("Test Recall:    {:.4}", m.recall);
    println!("Test ROC AUC:   {:.4}", m.roc_auc);
}
