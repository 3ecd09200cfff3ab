//! The capability contract between the pool and the pooled resource type

use crate::config::PoolConfiguration;

/// Create/validate/destroy operations for a pooled resource type.
///
/// The pool treats resources as opaque and drives their whole lifecycle
/// through this trait; what a resource actually is belongs to the handler
/// author. Only [`make_object`](ResourceHandler::make_object) is required;
/// the remaining operations default to "always valid", "drop to dispose",
/// "accept the configuration as-is", and "nothing to do on shutdown".
///
/// # Examples
///
/// ```
/// use std::convert::Infallible;
/// use warmpool::ResourceHandler;
///
/// struct Session {
///     id: u64,
/// }
///
/// struct SessionHandler;
///
/// impl ResourceHandler for SessionHandler {
///     type Resource = Session;
///     type Error = Infallible;
///
///     fn make_object(&self) -> Result<Session, Infallible> {
///         Ok(Session { id: 7 })
///     }
/// }
/// ```
pub trait ResourceHandler: Send + Sync {
    /// The pooled resource type.
    type Resource: Send;

    /// Error produced by resource creation and validation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a new resource. A failure here propagates to the borrower.
    fn make_object(&self) -> Result<Self::Resource, Self::Error>;

    /// Check that a resource is still usable.
    ///
    /// Called on every borrow: for an idle resource a failure disposes it
    /// and the borrow transparently moves on to another candidate; for a
    /// freshly created resource a failure propagates to the borrower.
    fn test_object(&self, resource: &Self::Resource) -> Result<(), Self::Error> {
        let _ = resource;
        Ok(())
    }

    /// Release a resource for good.
    ///
    /// Best-effort: the pool logs and swallows any error so cleanup never
    /// fails an unrelated borrow, return, or shutdown.
    fn dispose_object(&self, resource: Self::Resource) -> Result<(), Self::Error> {
        drop(resource);
        Ok(())
    }

    /// Clamp or reject a configuration before the pool starts serving.
    fn validate(&self, config: PoolConfiguration) -> Result<PoolConfiguration, Self::Error> {
        Ok(config)
    }

    /// Called exactly once when the pool shuts down, after every idle
    /// resource has been disposed.
    fn shutdown(&self) {}
}
