//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, the abstraction every node
//! implements. The trait is generic over a context type `C`, which carries
//! the mutable state a node may read and change while it is evaluated.

use crate::Status;

/// A node that can be evaluated against a context.
pub trait Behavior<C> {
    /// Evaluate this node against the given context.
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the node fired
    /// - `Status::Failure` if it did nothing
    fn tick(&self, ctx: &mut C) -> Status;
}

/// Borrowed nodes behave like the node itself, so composites can hold
/// `&T` children built from plain data.
impl<C, B> Behavior<C> for &B
where
    B: Behavior<C> + ?Sized,
{
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}

/// Boxed nodes allow heterogeneous child collections.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }
}
