//! Driving port used by readiness probes.

use async_trait::async_trait;

use crate::domain::EmployeeError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreHealth: Send + Sync {
    /// Confirm the record store answers.
    ///
    /// # Errors
    ///
    /// [`EmployeeError::StoreUnavailable`] when the store cannot be reached.
    async fn check_store(&self) -> Result<(), EmployeeError>;
}
