mod max_size;

pub use max_size::{GetMaxSizeQuery, GetMaxSizeUseCase, MaxSizeError};
