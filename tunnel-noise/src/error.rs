#[derive(Debug, thiserror::Error)]
pub enum NoiseError {
    #[error("pregenerated noise table must hold at least one value")]
    EmptyTable,

    #[error("no entropy available to seed the noise table: {0}")]
    Entropy(String),
}
