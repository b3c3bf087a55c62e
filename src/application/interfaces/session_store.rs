use crate::domain::{DomainError, Session};

/// Persistence for the session between invocations. Replaces the ambient
/// browser-local-storage access with an explicit read/write scope.
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, DomainError>;

    fn save(&self, session: &Session) -> Result<(), DomainError>;

    fn clear(&self) -> Result<(), DomainError>;
}
