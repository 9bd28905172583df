//! Generic chain walking over `std::error::Error::source`.
//!
//! [`CodedError`] supplies two hooks: `source()` for unwrapping and
//! [`Coded::matches_sentinel`] for direct equivalence. Everything recursive
//! lives here, so a single [`is`] query succeeds either because a link is a
//! `CodedError` with a compatible code, or because the walk reaches the
//! literal cause object being searched for.
//!
//! Identity compares the whole trait-object pointer: data address AND
//! vtable. Address alone is not enough, since distinct zero-sized errors
//! share a dangling address and a struct shares its address with its first
//! field. A cause attached with [`CodedError::with_shared_internal`] keeps
//! both halves of its `Arc` pointer, so `&*handle` is a valid target.

use crate::coded::{Coded, CodedError};
use std::error::Error;
use std::iter::FusedIterator;
use std::ptr;

/// Iterator over an error and its successive sources.
///
/// Yields the starting error first.
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

impl FusedIterator for Chain<'_> {}

/// Walk `err` and everything beneath it.
#[inline]
pub fn chain<'a>(err: &'a (dyn Error + 'static)) -> Chain<'a> {
    Chain { next: Some(err) }
}

/// One step down the chain.
#[inline]
pub fn unwrap<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a (dyn Error + 'static)> {
    err.source()
}

/// Report whether any link of `err` matches `target`.
///
/// A link matches when it is the same object as `target`, or when it is a
/// [`CodedError`] whose [`Coded::matches_sentinel`] accepts `target`.
/// A `None` target never matches.
///
/// ```rust
/// use coded_errors::{chain, CodedError};
/// use std::sync::Arc;
///
/// let cause: coded_errors::Cause = Arc::new(std::io::Error::other("timed out"));
/// let err = CodedError::new()
///     .with_code("InternalServerError")
///     .with_shared_internal(Arc::clone(&cause));
///
/// assert!(chain::is(&err, Some(&*cause)));
/// assert!(!chain::is(&err, Some(&std::io::Error::other("timed out"))));
/// assert!(!chain::is(&err, None));
/// ```
pub fn is(err: &(dyn Error + 'static), target: Option<&(dyn Error + 'static)>) -> bool {
    let Some(target) = target else {
        return false;
    };

    chain(err).any(|link| {
        if same_object(link, target) {
            return true;
        }
        match link.downcast_ref::<CodedError>() {
            Some(coded) => coded.matches_sentinel(Some(target)),
            None => false,
        }
    })
}

/// Same address and same vtable, so same concrete type.
#[inline]
fn same_object(a: &(dyn Error + 'static), b: &(dyn Error + 'static)) -> bool {
    ptr::eq(a as *const dyn Error, b as *const dyn Error)
}

/// Typed extraction: the first link whose concrete type is `T`.
#[inline]
pub fn find<'a, T>(err: &'a (dyn Error + 'static)) -> Option<&'a T>
where
    T: Error + 'static,
{
    chain(err).find_map(|link| link.downcast_ref::<T>())
}

/// Shorthand for `find::<CodedError>`.
#[inline]
pub fn find_coded<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a CodedError> {
    find::<CodedError>(err)
}
