use thiserror::Error;

use crate::card::CardId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("card {0} is not part of this carousel")]
    UnknownCard(CardId),
}

pub type Result<T> = std::result::Result<T, CarouselError>;
