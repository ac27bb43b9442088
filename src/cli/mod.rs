pub mod orchestration;

pub use orchestration::{run_import, ImportOutcome};
