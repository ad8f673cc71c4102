//! Declared parameter lists
//!
//! Parameter names are supplied explicitly when a function is exported, either
//! as a list or as a signature string such as `searchManga(query, pageNumber)`.
//! Both forms are validated here so a malformed declaration fails at startup.

use crate::IntrospectError;

/// Parses the parameter names out of a signature string
///
/// The text between the first `(` and the first `)` after it is split on
/// commas and trimmed. An empty list `()` yields no parameters.
///
/// Only plain identifier lists are accepted: defaults, destructuring and
/// rest parameters are rejected rather than mis-split.
///
/// # Examples
///
/// ```
/// use sumi_gateway::exports::introspect::parse_signature;
///
/// let params = parse_signature("searchManga(query, pageNumber)").unwrap();
/// assert_eq!(params, vec!["query", "pageNumber"]);
/// assert!(parse_signature("latest()").unwrap().is_empty());
/// ```
pub fn parse_signature(signature: &str) -> Result<Vec<String>, IntrospectError> {
    let open = signature
        .find('(')
        .ok_or_else(|| IntrospectError::MissingParens(signature.to_string()))?;
    let close = signature[open..]
        .find(')')
        .map(|i| open + i)
        .ok_or_else(|| IntrospectError::MissingParens(signature.to_string()))?;

    let inner = signature[open + 1..close].trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }

    let mut params = Vec::new();
    for raw in inner.split(',') {
        let param = raw.trim();
        if param.is_empty() {
            return Err(IntrospectError::EmptyParameter(signature.to_string()));
        }
        if param.starts_with("...") || param.contains(|c: char| matches!(c, '=' | '{' | '}' | '[' | ']')) {
            return Err(IntrospectError::UnsupportedSyntax(param.to_string()));
        }
        params.push(param.to_string());
    }

    declared_params(&params)
}

/// Validates an explicit, ordered parameter list
///
/// Every name must be an identifier and no name may repeat.
pub fn declared_params<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>, IntrospectError> {
    let mut params: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        validate_identifier(name)?;
        if params.iter().any(|p| p == name) {
            return Err(IntrospectError::DuplicateParameter(name.to_string()));
        }
        params.push(name.to_string());
    }
    Ok(params)
}

/// Checks that `name` is an ASCII identifier
///
/// The first character must be a letter, `_` or `$`; the rest may also be digits.
pub fn validate_identifier(name: &str) -> Result<(), IntrospectError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(IntrospectError::InvalidIdentifier(name.to_string()))
    }
}
