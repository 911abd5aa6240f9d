/// A type that collects the steps of a reduction.
///
/// Every expression snapshot is pushed to the collector as soon as it is recorded, starting with
/// the initial expression. This lets a caller display progress while a slow collaborator is still
/// working on the next step.
///
/// [`StepCollector`] is also implemented for the unit type `()`. This is useful when you only
/// care about the finished [`Reduction`](crate::reduce::Reduction), which records the same
/// snapshots.
pub trait StepCollector<S> {
    /// Adds a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

/// Adapts a closure into a [`StepCollector`].
#[derive(Debug, Clone)]
pub struct FnCollector<F>(pub F);

impl<S, F: FnMut(S)> StepCollector<S> for FnCollector<F> {
    #[inline]
    fn push(&mut self, step: S) {
        (self.0)(step);
    }
}
