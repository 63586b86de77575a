/// Errors raised while assembling an APU
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ApuError {
    /// The DMC channel has nothing to fetch samples from
    #[error("no DMC sample reader was configured")]
    MissingSampleReader,
}

pub type Result<T> = std::result::Result<T, ApuError>;
