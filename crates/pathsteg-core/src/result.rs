use crate::StegError;

pub type Result<T> = std::result::Result<T, StegError>;
