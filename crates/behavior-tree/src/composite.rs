//! Composite behavior nodes.
//!
//! Composite nodes control which children are evaluated in one pass:
//! [`Selector`] stops at the first child that fires (OR logic), [`Every`]
//! evaluates all children regardless of earlier results.

use crate::{Behavior, Status};

/// Evaluates children in order until one fires.
///
/// # Semantics
///
/// - If a child returns `Success`, the selector **stops immediately** and returns `Success`
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If no child fires (or there are no children), the selector returns `Failure`
///
/// The visiting order defaults to slice order. [`Selector::with_order`]
/// supplies an explicit permutation instead, which is how randomized groups
/// are expressed without mutating the children.
pub struct Selector<'a, B> {
    children: &'a [B],
    order: Option<Vec<usize>>,
}

impl<'a, B> Selector<'a, B> {
    /// Creates a selector over the given children, visited in slice order.
    pub fn new(children: &'a [B]) -> Self {
        Self {
            children,
            order: None,
        }
    }

    /// Creates a selector that visits children in the given order.
    ///
    /// Indices outside `children` are ignored.
    pub fn with_order(children: &'a [B], order: Vec<usize>) -> Self {
        Self {
            children,
            order: Some(order),
        }
    }
}

impl<C, B> Behavior<C> for Selector<'_, B>
where
    B: Behavior<C>,
{
    fn tick(&self, ctx: &mut C) -> Status {
        match &self.order {
            None => {
                for child in self.children {
                    if child.tick(ctx).is_success() {
                        return Status::Success; // Short-circuit
                    }
                }
            }
            Some(order) => {
                for child in order.iter().filter_map(|&index| self.children.get(index)) {
                    if child.tick(ctx).is_success() {
                        return Status::Success;
                    }
                }
            }
        }
        Status::Failure
    }
}

/// Evaluates every child, in order, regardless of earlier results.
///
/// # Semantics
///
/// - All children are ticked exactly once
/// - Returns `Success` if at least one child fired, `Failure` otherwise
pub struct Every<'a, B> {
    children: &'a [B],
}

impl<'a, B> Every<'a, B> {
    /// Creates a node that evaluates all of the given children.
    pub fn new(children: &'a [B]) -> Self {
        Self { children }
    }
}

impl<C, B> Behavior<C> for Every<'_, B>
where
    B: Behavior<C>,
{
    fn tick(&self, ctx: &mut C) -> Status {
        self.children
            .iter()
            .fold(Status::Failure, |status, child| status.or(child.tick(ctx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct TestContext {
        visited: Vec<u32>,
    }

    /// Records its label and fires when `fires` is set.
    struct Probe {
        label: u32,
        fires: bool,
    }

    impl Behavior<TestContext> for Probe {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.visited.push(self.label);
            Status::from_bool(self.fires)
        }
    }

    fn probes(fires: &[bool]) -> Vec<Probe> {
        fires
            .iter()
            .enumerate()
            .map(|(label, &fires)| Probe {
                label: label as u32,
                fires,
            })
            .collect()
    }

    #[test]
    fn selector_stops_at_first_success() {
        let children = probes(&[false, true, true]);
        let mut ctx = TestContext::default();

        assert_eq!(Selector::new(&children).tick(&mut ctx), Status::Success);
        assert_eq!(ctx.visited, vec![0, 1]);
    }

    #[test]
    fn selector_fails_when_nothing_fires() {
        let children = probes(&[false, false]);
        let mut ctx = TestContext::default();

        assert_eq!(Selector::new(&children).tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.visited, vec![0, 1]);
    }

    #[test]
    fn selector_with_empty_children_fails() {
        let children: Vec<Probe> = Vec::new();
        let mut ctx = TestContext::default();

        assert_eq!(Selector::new(&children).tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn selector_honours_explicit_order() {
        let children = probes(&[true, false, true]);
        let mut ctx = TestContext::default();

        let selector = Selector::with_order(&children, vec![1, 2, 0]);
        assert_eq!(selector.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.visited, vec![1, 2]);
    }

    #[test]
    fn selector_skips_out_of_range_indices() {
        let children = probes(&[false]);
        let mut ctx = TestContext::default();

        let selector = Selector::with_order(&children, vec![7, 0]);
        assert_eq!(selector.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.visited, vec![0]);
    }

    #[test]
    fn every_visits_all_children() {
        let children = probes(&[true, false, true]);
        let mut ctx = TestContext::default();

        assert_eq!(Every::new(&children).tick(&mut ctx), Status::Success);
        assert_eq!(ctx.visited, vec![0, 1, 2]);
    }

    #[test]
    fn every_fails_when_nothing_fires() {
        let children = probes(&[false, false]);
        let mut ctx = TestContext::default();

        assert_eq!(Every::new(&children).tick(&mut ctx), Status::Failure);
    }
}
