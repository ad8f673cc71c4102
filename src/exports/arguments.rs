use crate::InvocationError;

/// Positional arguments bound from a request's query string
///
/// The vector is sized to the function's declared parameter count. A position
/// is `None` when the client did not supply that parameter; an empty query
/// value (`?page=`) is `Some("")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<Option<String>>,
}

impl Arguments {
    /// Creates an argument list with `len` unset positions
    pub fn with_len(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    /// Creates an argument list from explicit positional values
    pub fn from_values(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Sets the value at `position`, replacing any earlier value
    ///
    /// Positions past the end are ignored.
    pub fn set(&mut self, position: usize, value: String) {
        if let Some(slot) = self.values.get_mut(position) {
            *slot = Some(value);
        }
    }

    /// Returns the value at `position`, if one was supplied
    pub fn get(&self, position: usize) -> Option<&str> {
        self.values.get(position).and_then(|v| v.as_deref())
    }

    /// Returns the value at `position` or an invalid-input error naming `name`
    pub fn required(&self, position: usize, name: &str) -> Result<&str, InvocationError> {
        self.get(position)
            .ok_or_else(|| InvocationError::InvalidInput(format!("Missing required argument {}", name)))
    }

    /// Number of declared positions
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of positions that were actually supplied
    pub fn supplied(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn into_values(self) -> Vec<Option<String>> {
        self.values
    }
}
