//! The fail-soft contract shared by every container.

use crate::error::Fault;

/// A container whose failures are stored instead of returned.
///
/// While [`fault`](FailSoft::fault) is `Some`, every operation on the
/// container is a no-op returning a default value.
pub trait FailSoft {
    /// The stored fault, `None` when healthy.
    fn fault(&self) -> Option<Fault>;

    /// Clear any stored fault except [`Fault::Invalid`].
    fn repair(&mut self);

    /// Whether this instance is a construction-failure placeholder.
    fn is_placeholder(&self) -> bool {
        self.fault() == Some(Fault::Invalid)
    }

    /// Whether operations are currently suppressed.
    fn is_faulted(&self) -> bool {
        self.fault().is_some()
    }
}
