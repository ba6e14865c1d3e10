pub mod input;
pub mod normalizer;
pub mod fingerprint;
pub mod ngram;
pub mod processor;

pub use input::InputConfig;
pub use normalizer::NormalizerConfig;
pub use fingerprint::FingerprintConfig;
pub use ngram::NGramConfig;
pub use processor::ProcessorConfig;
