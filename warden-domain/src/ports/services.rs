use crate::entities::KickRequest;

/// Fire-and-forget kick dispatch against the remote console.
///
/// `dispatch_kick` must return immediately; the attempt runs as a detached
/// unit of work and its outcome is observable only through logs. Callers
/// never wait on it, and multiple dispatches may be in flight at once.
pub trait KickService: Send + Sync {
    fn dispatch_kick(&self, request: KickRequest);
}
