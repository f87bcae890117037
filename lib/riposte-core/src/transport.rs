//! Transport contract.
//!
//! [`Transport`] is the seam between the envelope layer and whatever actually
//! moves bytes. Implementations perform one exchange and hand back a
//! [`Response`] whose body is already materialized in the shape dictated by
//! the [`BodyHandling`] strategy.

use std::future::Future;

use crate::{BodyHandling, Request, Response, Result};

/// A client able to perform one HTTP exchange.
///
/// Implementations must report every environmental failure (connection,
/// TLS, timeout) as an `Err`; nothing may panic past this boundary.
pub trait Transport: Send + Sync {
    /// Execute an HTTP request and materialize the response body per
    /// `handling`.
    ///
    /// # Errors
    ///
    /// Returns an error if the exchange fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    /// - Invalid request
    fn execute(
        &self,
        request: Request,
        handling: BodyHandling,
    ) -> impl Future<Output = Result<Response>> + Send;
}
