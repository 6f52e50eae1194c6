#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("a messaging client instance is required")]
    MissingClient,
    #[error("invalid value `{value}` for {key}")]
    InvalidConfig { key: &'static str, value: String },
}
