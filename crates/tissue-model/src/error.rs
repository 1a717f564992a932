use thiserror::Error;

use crate::record::TissueId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("tissue id {id} is out of range (max id {max})")]
    InvalidId { id: usize, max: TissueId },
    #[error("the background record cannot be removed")]
    BackgroundRemoval,
    #[error("catalog capacity exceeded: {requested} tissues requested, limit is {limit}")]
    CapacityExceeded { requested: usize, limit: usize },
}

pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    pub fn invalid_id(id: impl Into<usize>, max: TissueId) -> Self {
        Self::InvalidId { id: id.into(), max }
    }
}
