use std::thread;

pub mod cache;
pub mod error;
pub mod evaluator;

pub use cache::{Cache, CacheStats};
pub use error::{Error, Result};
pub use evaluator::{f, f_with_cache, Evaluator, Strategy};

#[cfg(test)]
mod tests;

/// What a suspended frame wants next.
#[derive(Debug, PartialEq)]
pub enum Step<Yield, Return> {
    /// The frame needs the result for this argument before it can continue.
    Yielded(Yield),
    /// The frame is done.
    Complete(Return),
}

/// A hand-written continuation of one recursive call.
///
/// Each call to `resume` receives the result of the argument the frame last
/// yielded (or `Res::default()` on the first resume) together with the state
/// shared by the whole call tree.
pub trait Frame<Res, St> {
    type Yield;
    type Return;

    fn resume(&mut self, res: Res, st: &mut St) -> Step<Self::Yield, Self::Return>;
}

/// Turns a frame constructor into a function that evaluates the recursion on
/// an explicit heap stack instead of the thread's call stack.
pub fn recurse_st<Arg, Res, St, F>(f: impl Fn(Arg) -> F) -> impl Fn(Arg, &mut St) -> Res
where
    Res: Default,
    F: Frame<Res, St, Yield = Arg, Return = Res>,
{
    move |arg: Arg, st: &mut St| {
        let mut stack = vec![f(arg)];
        let mut res = Res::default();

        while let Some(mut frame) = stack.pop() {
            match frame.resume(res, st) {
                Step::Yielded(arg) => {
                    stack.push(frame);
                    stack.push(f(arg));
                    res = Res::default();
                }
                Step::Complete(res1) => {
                    res = res1;
                }
            }
        }

        res
    }
}

/// Runs `f` on a fresh thread with a stack of `size` bytes and waits for it.
pub fn with_stack_size<R, F>(size: usize, f: F) -> Result<R>
where
    R: Send + 'static,
    F: FnOnce() -> R + Send + 'static,
{
    let handle = thread::Builder::new().stack_size(size).spawn(f)?;
    handle.join().map_err(|_| Error::Panicked)
}
