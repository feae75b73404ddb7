//! Result type aliases for Shopkit.

use crate::ShopkitError;

/// A specialized `Result` type for Shopkit operations.
pub type ShopkitResult<T> = Result<T, ShopkitError>;

/// A boxed future returning a `ShopkitResult`.
pub type BoxFuture<'a, T> = std::pin::Pin<Box<dyn std::future::Future<Output = ShopkitResult<T>> + Send + 'a>>;
