/// Middleware modules for the API server
///
/// Session authentication lives in the shared crate as the `CurrentUser`
/// extractor; this module holds the remaining HTTP-level middleware.

pub mod security;
