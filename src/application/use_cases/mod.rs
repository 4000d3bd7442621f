//! Application use cases.

mod preload_use_case;

pub use preload_use_case::{PreloadOutcome, PreloadReport, PreloadUseCase};
