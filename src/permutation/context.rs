//! Per-thread current permutation
//!
//! Code that needs to know which variant is being built (dependency or
//! detection decisions) reads [`PermutationContext::current`]. The value is
//! scoped by an RAII guard and never shared between threads, so workers
//! building different permutations in parallel each see their own.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::sync::Arc;

use super::combination::Permutation;

thread_local! {
    static CURRENT: RefCell<Option<Arc<Permutation>>> = const { RefCell::new(None) };
}

/// Guard that keeps a permutation current until dropped.
#[must_use = "the permutation is only current while the guard is alive"]
pub struct PermutationContext {
    previous: Option<Arc<Permutation>>,
    // 守卫必须在创建它的线程上释放
    _not_send: PhantomData<*const ()>,
}

impl PermutationContext {
    /// Make `permutation` current on this thread. Nested guards restore the
    /// outer permutation when dropped.
    pub fn enter(permutation: Arc<Permutation>) -> PermutationContext {
        let previous = CURRENT.with(|slot| slot.replace(Some(permutation)));
        PermutationContext {
            previous,
            _not_send: PhantomData,
        }
    }

    /// The permutation current on this thread, if any.
    pub fn current() -> Option<Arc<Permutation>> {
        CURRENT.with(|slot| slot.borrow().clone())
    }
}

impl Drop for PermutationContext {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| {
            *slot.borrow_mut() = previous;
        });
    }
}
