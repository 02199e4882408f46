//! Decorator behavior nodes.
//!
//! Decorators wrap a single child and change how often it runs.

use crate::{Behavior, Status};

/// Runs its child a fixed number of times.
///
/// # Semantics
///
/// - The child is ticked `times` times, even after it fires
/// - Returns `Success` if any iteration fired
/// - `times == 0` never ticks the child and returns `Failure`
pub struct Repeat<B> {
    child: B,
    times: u32,
}

impl<B> Repeat<B> {
    /// Creates a decorator that ticks `child` `times` times.
    pub fn new(child: B, times: u32) -> Self {
        Self { child, times }
    }
}

impl<C, B> Behavior<C> for Repeat<B>
where
    B: Behavior<C>,
{
    fn tick(&self, ctx: &mut C) -> Status {
        (0..self.times).fold(Status::Failure, |status, _| status.or(self.child.tick(ctx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    struct Increment;
    impl Behavior<TestContext> for Increment {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.value += 1;
            Status::Success
        }
    }

    /// Fires only while the counter is below the limit.
    struct IncrementBelow(i32);
    impl Behavior<TestContext> for IncrementBelow {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            if ctx.value < self.0 {
                ctx.value += 1;
                Status::Success
            } else {
                Status::Failure
            }
        }
    }

    #[test]
    fn repeat_runs_child_n_times() {
        let repeat = Repeat::new(Increment, 3);

        let mut ctx = TestContext { value: 0 };
        assert_eq!(repeat.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 3);
    }

    #[test]
    fn repeat_zero_times_does_nothing() {
        let repeat = Repeat::new(Increment, 0);

        let mut ctx = TestContext { value: 0 };
        assert_eq!(repeat.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.value, 0);
    }

    #[test]
    fn repeat_keeps_going_after_child_stops_firing() {
        let repeat = Repeat::new(IncrementBelow(2), 5);

        let mut ctx = TestContext { value: 0 };
        assert_eq!(repeat.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.value, 2);
    }
}
