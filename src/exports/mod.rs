//! Exported function descriptors
//!
//! A crawler library exposes its public surface as a list of
//! [`ExportedFunction`]s. Each one carries its identifier, the ordered names of
//! its declared parameters, and an async callable that receives the positional
//! [`Arguments`] bound from a request.

mod arguments;
mod descriptor;
pub mod introspect;

pub use arguments::Arguments;
pub use descriptor::{Callable, ExportedFunction};

use crate::IntrospectError;

/// A library whose exported functions can be served as routes
pub trait CrawlerLibrary {
    /// Returns every exported function, in the order the library declares them
    ///
    /// Fails if one of the library's declarations is malformed.
    fn exports(&self) -> Result<Vec<ExportedFunction>, IntrospectError>;
}

impl CrawlerLibrary for Vec<ExportedFunction> {
    fn exports(&self) -> Result<Vec<ExportedFunction>, IntrospectError> {
        Ok(self.clone())
    }
}
