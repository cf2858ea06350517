// engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::io::Snapshot;

use super::expert::Decision;

/// Policy chooses an action for the current snapshot.
///
/// Implementations own whatever cross-step state they need. Object-safe so it
/// can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn decide(&mut self, snapshot: &Snapshot) -> Decision;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn decide(&mut self, snapshot: &Snapshot) -> Decision {
        (**self).decide(snapshot)
    }
}
