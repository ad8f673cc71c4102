//! Request binding and dispatch
//!
//! For each request the supplied query pairs are validated against the
//! route's parameters, bound to positional [`Arguments`], and passed to the
//! exported function. Every outcome becomes exactly one [`Envelope`] with an
//! [`ErrorKind`] that the HTTP layer turns into a status code.
//!
//! [`Arguments`]: crate::exports::Arguments

mod binder;
mod envelope;

pub use binder::{bind, BindError};
pub use envelope::{Envelope, ErrorKind, Outcome};

use crate::routes::RouteEntry;
use crate::InvocationError;

/// Binds `query` to `entry`'s function, invokes it and shapes the result
///
/// # Arguments
///
/// * `entry` - The route being served
/// * `query` - Decoded query pairs in the order they appeared
///
/// # Returns
///
/// The outcome to send: a success envelope with the function's payload, or a
/// failure envelope classified by [`ErrorKind`].
pub async fn dispatch(entry: &RouteEntry, query: &[(String, String)]) -> Outcome {
    let args = match bind(entry, query) {
        Ok(args) => args,
        Err(e) => {
            tracing::debug!(path = %entry.path, "Rejected request: {}", e);
            return Outcome::failure(ErrorKind::InvalidParameters, e.to_string());
        }
    };

    tracing::debug!(
        path = %entry.path,
        supplied = args.supplied(),
        "Invoking {}",
        entry.function.name()
    );

    match entry.function.call(args).await {
        Ok(payload) => Outcome::success(payload),
        Err(e) => {
            let kind = match e {
                InvocationError::InvalidInput(_) => ErrorKind::InvalidInput,
                InvocationError::Failed(_) => ErrorKind::InvocationFailed,
                InvocationError::Internal(_) => ErrorKind::Internal,
            };
            tracing::warn!(
                path = %entry.path,
                kind = ?kind,
                "{} failed: {}",
                entry.function.name(),
                e
            );
            Outcome::failure(kind, e.to_string())
        }
    }
}
