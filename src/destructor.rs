//! Value teardown strategies injected into `ChainedHashMap` at construction.

/// Receives every value the table gives up on its own: the old value on an
/// overwriting insert and every live value when the table is dropped.
/// Values returned by `remove` are handed to the caller instead.
pub trait ValueDestructor<V> {
    fn destroy(&mut self, value: V);
}

/// Drops values without further action; the caller owns whatever they refer to.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDestructor;

impl<V> ValueDestructor<V> for NoDestructor {
    #[inline]
    fn destroy(&mut self, _value: V) {}
}

impl<V, F> ValueDestructor<V> for F
where
    F: FnMut(V),
{
    #[inline]
    fn destroy(&mut self, value: V) {
        self(value)
    }
}
