use async_trait::async_trait;
use prismhook_core::{ChallengeAction, ChallengeRequest};

use crate::error::SolverError;

/// Strongly-typed DNS-01 solver trait with native `async fn`.
///
/// This trait is **not** object-safe because it uses native `async fn` methods
/// (which desugar to opaque `impl Future` return types). If you need dynamic
/// dispatch, use [`DynSolver`] instead -- every `Solver` automatically
/// implements `DynSolver` via a blanket implementation.
pub trait Solver: Send + Sync {
    /// Returns the name the solver is referenced by on the issuer resource.
    ///
    /// Must be unique within a single webhook deployment.
    fn name(&self) -> &str;

    /// Publish the challenge record described by `request`.
    ///
    /// May be called more than once for the same record.
    fn present(
        &self,
        request: &ChallengeRequest,
    ) -> impl std::future::Future<Output = Result<(), SolverError>> + Send;

    /// Remove the challenge record described by `request`.
    ///
    /// Only the record matching `request.key` should be removed.
    fn clean_up(
        &self,
        request: &ChallengeRequest,
    ) -> impl std::future::Future<Output = Result<(), SolverError>> + Send;

    /// Called once when the webhook host starts, before any request is served.
    ///
    /// The default implementation does nothing.
    fn initialize(&self) -> impl std::future::Future<Output = Result<(), SolverError>> + Send {
        async { Ok(()) }
    }

    /// Dispatch `request` to [`present`](Self::present) or
    /// [`clean_up`](Self::clean_up) according to its action.
    fn solve(
        &self,
        request: &ChallengeRequest,
    ) -> impl std::future::Future<Output = Result<(), SolverError>> + Send {
        async move {
            match request.action {
                ChallengeAction::Present => self.present(request).await,
                ChallengeAction::CleanUp => self.clean_up(request).await,
            }
        }
    }
}

/// Object-safe solver trait for use behind `Arc<dyn DynSolver>`.
///
/// Uses [`macro@async_trait`] to enable dynamic dispatch of async methods.
/// You generally should not implement this trait directly -- instead implement
/// [`Solver`] and rely on the blanket implementation.
#[async_trait]
pub trait DynSolver: Send + Sync {
    /// Returns the name of this solver.
    fn name(&self) -> &str;

    /// Publish the challenge record.
    async fn present(&self, request: &ChallengeRequest) -> Result<(), SolverError>;

    /// Remove the challenge record.
    async fn clean_up(&self, request: &ChallengeRequest) -> Result<(), SolverError>;

    /// One-time startup hook.
    async fn initialize(&self) -> Result<(), SolverError> {
        Ok(())
    }

    /// Dispatch by action.
    async fn solve(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        match request.action {
            ChallengeAction::Present => self.present(request).await,
            ChallengeAction::CleanUp => self.clean_up(request).await,
        }
    }
}

/// Blanket implementation: any type that implements [`Solver`] also
/// implements [`DynSolver`], bridging the static and dynamic dispatch worlds.
#[async_trait]
impl<T: Solver + Sync> DynSolver for T {
    fn name(&self) -> &str {
        Solver::name(self)
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        Solver::present(self, request).await
    }

    async fn clean_up(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        Solver::clean_up(self, request).await
    }

    async fn initialize(&self) -> Result<(), SolverError> {
        Solver::initialize(self).await
    }

    async fn solve(&self, request: &ChallengeRequest) -> Result<(), SolverError> {
        Solver::solve(self, request).await
    }
}
