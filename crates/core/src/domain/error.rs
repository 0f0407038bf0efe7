// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Field '{0}' must not be blank")]
    BlankField(&'static str),

    #[error("Project name at position {0} must not be blank")]
    BlankProjectName(usize),
}

pub type Result<T> = std::result::Result<T, DomainError>;
