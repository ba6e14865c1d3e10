pub mod standard;

pub trait TextNormalizer: Sync + Send {
    /// Normalize a raw column value before key building
    fn normalize(&self, text: &str) -> String;
}

pub use self::standard::StandardNormalizer;
