use thiserror::Error;
use vt_core::CoreError;

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("sampler configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("sampler has terminated; build a new one to record again")]
    Terminated,
}

pub type SamplerResult<T> = Result<T, SamplerError>;
