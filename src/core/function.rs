//! core/function.rs
//! `WorkerFn<Args>`: "a function of any arity, called with a tuple".
//!
//! `invoke` always takes the argument list as one tuple (the request
//! message body), so `|x: i32, y: i32| x + y` is called as `invoke((2, 3))`.
//! Zero-argument functions take `()`, one-argument functions take `(x,)`.

/// A function the runner can move onto a worker thread and apply to a
/// tuple of arguments.
pub trait WorkerFn<Args>: Send + Sync + 'static {
    type Output;

    fn apply(&self, args: Args) -> Self::Output;
}

macro_rules! impl_worker_fn {
    ($($arg:ident),*) => {
        impl<Func, Out, $($arg,)*> WorkerFn<($($arg,)*)> for Func
        where
            Func: Fn($($arg),*) -> Out + Send + Sync + 'static,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn apply(&self, ($($arg,)*): ($($arg,)*)) -> Out {
                (self)($($arg),*)
            }
        }
    };
}

impl_worker_fn!();
impl_worker_fn!(A);
impl_worker_fn!(A, B);
impl_worker_fn!(A, B, C);
impl_worker_fn!(A, B, C, D);
impl_worker_fn!(A, B, C, D, E);
impl_worker_fn!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;

    fn apply<F, Args>(f: &F, args: Args) -> F::Output
    where
        F: WorkerFn<Args>,
    {
        f.apply(args)
    }

    #[test]
    fn arities() {
        assert_eq!(apply(&|| 7, ()), 7);
        assert_eq!(apply(&|x: u8| x * 2, (4,)), 8);
        assert_eq!(apply(&|x: i32, y: i32| x + y, (2, 3)), 5);
        assert_eq!(
            apply(&|a: &'static str, b: String, n: usize| format!("{a}{b}{n}"), ("a", "b".to_string(), 1)),
            "ab1"
        );
    }

    fn add(x: u64, y: u64) -> u64 {
        x + y
    }

    #[test]
    fn plain_fn_items() {
        assert_eq!(apply(&add, (40, 2)), 42);
    }

    #[test]
    fn tuple_as_single_argument() {
        // A function that itself takes a tuple is a one-argument function.
        let f = |pair: (i32, i32)| pair.0 * pair.1;
        assert_eq!(apply(&f, ((6, 7),)), 42);
    }
}
