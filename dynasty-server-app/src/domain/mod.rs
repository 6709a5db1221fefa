pub mod account;
pub mod coach;
pub mod dynasty;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccountId(pub uuid::Uuid);

impl AccountId {
    pub fn new() -> Self {
        AccountId(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DynastyId(pub uuid::Uuid);

impl DynastyId {
    pub fn new() -> Self {
        DynastyId(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for DynastyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CoachId(pub uuid::Uuid);

impl CoachId {
    pub fn new() -> Self {
        CoachId(uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for CoachId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[derive(Debug)]
pub enum RepoError {
    StorageError(String),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum RepoRetrieveError {
    NotFound,
    StorageError(String),
}

impl std::fmt::Display for RepoRetrieveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoRetrieveError::NotFound => write!(f, "Resource not found"),
            RepoRetrieveError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum RepoCreateError {
    Conflict,
    StorageError(String),
}

impl std::fmt::Display for RepoCreateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoCreateError::Conflict => write!(f, "Resource conflict"),
            RepoCreateError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}

#[derive(Debug)]
pub enum RepoUpdateError {
    NotFound,
    Conflict,
    StorageError(String),
}

impl std::fmt::Display for RepoUpdateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoUpdateError::NotFound => write!(f, "Resource not found"),
            RepoUpdateError::Conflict => write!(f, "Resource conflict"),
            RepoUpdateError::StorageError(e) => write!(f, "Storage error: {}", e),
        }
    }
}
