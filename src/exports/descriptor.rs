use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;

use super::introspect::{declared_params, parse_signature, validate_identifier};
use super::Arguments;
use crate::{IntrospectError, InvocationError};

/// Type-erased async function exported by a crawler library
pub type Callable =
    Arc<dyn Fn(Arguments) -> BoxFuture<'static, Result<Value, InvocationError>> + Send + Sync>;

/// One function on a crawler library's public surface
#[derive(Clone)]
pub struct ExportedFunction {
    name: String,
    params: Vec<String>,
    callable: Callable,
}

impl ExportedFunction {
    /// Exports `function` under `name` with an explicit parameter list
    ///
    /// The function's output is serialized to JSON when it resolves. A
    /// serialization failure is reported as [`InvocationError::Internal`].
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_gateway::exports::{Arguments, ExportedFunction};
    /// use sumi_gateway::InvocationError;
    ///
    /// let echo = ExportedFunction::new("echo", &["text"], |args: Arguments| async move {
    ///     Ok::<_, InvocationError>(args.get(0).map(str::to_string))
    /// })
    /// .unwrap();
    /// assert_eq!(echo.params(), ["text"]);
    /// ```
    pub fn new<S, F, Fut, T>(name: &str, params: &[S], function: F) -> Result<Self, IntrospectError>
    where
        S: AsRef<str>,
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, InvocationError>> + Send + 'static,
        T: Serialize + 'static,
    {
        validate_identifier(name)?;
        let params = declared_params(params)?;
        Ok(Self {
            name: name.to_string(),
            params,
            callable: erase(function),
        })
    }

    /// Exports `function` using a signature string such as `searchManga(query, pageNumber)`
    ///
    /// The name is the text before `(`, the parameters are parsed with
    /// [`parse_signature`].
    pub fn from_signature<F, Fut, T>(signature: &str, function: F) -> Result<Self, IntrospectError>
    where
        F: Fn(Arguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, InvocationError>> + Send + 'static,
        T: Serialize + 'static,
    {
        let params = parse_signature(signature)?;
        let name = signature
            .split('(')
            .next()
            .unwrap_or_default()
            .trim();
        Self::new(name, &params, function)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter names in positional order
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Invokes the function with already-bound positional arguments
    pub async fn call(&self, args: Arguments) -> Result<Value, InvocationError> {
        (self.callable)(args).await
    }
}

impl fmt::Debug for ExportedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedFunction")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

fn erase<F, Fut, T>(function: F) -> Callable
where
    F: Fn(Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, InvocationError>> + Send + 'static,
    T: Serialize + 'static,
{
    Arc::new(move |args| {
        function(args)
            .map(|result| {
                result.and_then(|value| {
                    serde_json::to_value(value)
                        .map_err(|e| InvocationError::Internal(format!("Unserializable result: {}", e)))
                })
            })
            .boxed()
    })
}
