//! The request currently being handled on this thread.
//!
//! A web integration enters the request when handling starts and the guard
//! clears it when handling ends. Providers read it while a report is being
//! captured. Outside a guard there is no current request and request-derived
//! report fields are left absent.

use crate::HttpRequest;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

thread_local! {
    static CURRENT: RefCell<Option<Rc<dyn HttpRequest>>> = const { RefCell::new(None) };
}

/// Make `request` the current request until the guard is dropped.
///
/// Guards nest; dropping one restores whatever was current before it.
pub fn enter<R: HttpRequest + 'static>(request: R) -> RequestGuard {
    let request: Rc<dyn HttpRequest> = Rc::new(request);
    let previous = CURRENT.with(|slot| slot.borrow_mut().replace(request));
    RequestGuard {
        previous,
        _not_send: PhantomData,
    }
}

/// Run `f` with the current request, if any.
pub fn with_current<T>(f: impl FnOnce(Option<&dyn HttpRequest>) -> T) -> T {
    // Clone out of the slot so `f` may enter a nested request.
    let current = CURRENT.with(|slot| slot.borrow().clone());
    f(current.as_deref())
}

/// Whether a request is current on this thread.
pub fn is_active() -> bool {
    CURRENT.with(|slot| slot.borrow().is_some())
}

/// Clears the current request on drop.
#[must_use = "the request is only current while the guard is alive"]
pub struct RequestGuard {
    previous: Option<Rc<dyn HttpRequest>>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for RequestGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| *slot.borrow_mut() = previous);
    }
}
