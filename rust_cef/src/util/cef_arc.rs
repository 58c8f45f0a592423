use std::{ops::Deref, ptr::NonNull, sync::atomic::AtomicUsize};

use super::starts_with::{StartsWith, StartsWithExt as _};
use cef_wrapper::cef_capi_sys::cef_base_ref_counted_t;

/// A reference counted wrapper for CEF types.
///
/// Cloning calls `add_ref` and dropping calls `release` on the wrapped struct,
/// whether the struct was allocated by the runtime or by [`CefArc::new`].
#[repr(transparent)]
pub struct CefArc<T: StartsWith<cef_base_ref_counted_t>> {
    pub(crate) ptr: NonNull<T>,
}

unsafe impl<T: StartsWith<cef_base_ref_counted_t>> Send for CefArc<T> {}
unsafe impl<T: StartsWith<cef_base_ref_counted_t>> Sync for CefArc<T> {}

impl<T: StartsWith<cef_base_ref_counted_t>> Drop for CefArc<T> {
    fn drop(&mut self) {
        let base = self.base_ptr();
        unsafe {
            if let Some(release) = (*base).release {
                release(base);
            }
        }
    }
}

impl<T: StartsWith<cef_base_ref_counted_t>> Clone for CefArc<T> {
    fn clone(&self) -> Self {
        let base = self.base_ptr();
        unsafe {
            if let Some(add_ref) = (*base).add_ref {
                add_ref(base);
            }
        }
        Self { ptr: self.ptr }
    }
}

impl<T: StartsWith<cef_base_ref_counted_t>> Deref for CefArc<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { self.ptr.as_ref() }
    }
}

impl<T: StartsWith<cef_base_ref_counted_t>> std::fmt::Debug for CefArc<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CefArc").field(&self.ptr).finish()
    }
}

/// A rust value prepared to be handed to cef.
///
/// It contains the capi vtable, the reference count, and the user defined rust
/// type. The vtable comes first so a pointer to this struct is also a pointer
/// to the vtable. Because the vtable carries the release function, the rust
/// type can be erased and still dropped properly.
#[repr(C)]
pub struct CefArcFromRust<VTable, RustImpl> {
    pub(crate) capi_v_table: VTable,
    pub(crate) ref_count: AtomicUsize,
    pub rust_impl: RustImpl,
}

unsafe impl<V, R> StartsWith<V> for CefArcFromRust<V, R> {}
unsafe impl<V: StartsWith<cef_base_ref_counted_t>, R> StartsWith<cef_base_ref_counted_t>
    for CefArcFromRust<V, R>
{
}

impl<V: StartsWith<cef_base_ref_counted_t>, R> CefArcFromRust<V, R> {
    /// capi_v_table is the partially completed vtable.
    /// the values in the base will be populated by this function.
    pub(crate) fn new(mut capi_v_table: V, rust_impl: R) -> Self {
        let base = capi_v_table.get_start_mut();
        base.size = std::mem::size_of::<CefArcFromRust<V, R>>();
        base.add_ref = Some(c_callbacks::add_ref_ptr::<V, R>);
        base.release = Some(c_callbacks::release_ptr::<V, R>);
        base.has_one_ref = Some(c_callbacks::has_one_ref_ptr::<V, R>);
        base.has_at_least_one_ref = Some(c_callbacks::has_at_least_one_ref_ptr::<V, R>);

        Self {
            capi_v_table,
            ref_count: AtomicUsize::new(1),
            rust_impl,
        }
    }

    /// # Safety
    ///
    /// `ptr` must point at a live `CefArcFromRust<V, R>`, and the returned
    /// reference must not outlive the reference the caller holds on it.
    pub(crate) unsafe fn rust_impl_from_ptr<'a>(ptr: *mut cef_base_ref_counted_t) -> &'a R {
        unsafe { &(*ptr.cast::<CefArcFromRust<V, R>>()).rust_impl }
    }
}

mod c_callbacks {
    use std::sync::atomic::{Ordering, fence};

    use cef_wrapper::cef_capi_sys::cef_base_ref_counted_t;

    use crate::util::wrap_boolean::wrap_boolean;

    use super::CefArcFromRust;

    pub unsafe extern "C" fn add_ref_ptr<V, R>(ptr: *mut cef_base_ref_counted_t) {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        rust_type.ref_count.fetch_add(1, Ordering::Relaxed);
    }

    pub unsafe extern "C" fn release_ptr<V, R>(ptr: *mut cef_base_ref_counted_t) -> i32 {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        if rust_type.ref_count.fetch_sub(1, Ordering::Release) != 1 {
            return 0;
        }

        // pairs with the release decrements of every other owner, as in std's Arc.
        fence(Ordering::Acquire);

        // we know this box came from rust_cef, so it is a CefArcFromRust<V, R>.
        drop(unsafe { Box::from_raw(ptr.cast::<CefArcFromRust<V, R>>()) });

        1
    }

    pub unsafe extern "C" fn has_one_ref_ptr<V, R>(ptr: *mut cef_base_ref_counted_t) -> i32 {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        wrap_boolean(rust_type.ref_count.load(Ordering::Acquire) == 1)
    }

    pub unsafe extern "C" fn has_at_least_one_ref_ptr<V, R>(
        ptr: *mut cef_base_ref_counted_t,
    ) -> i32 {
        let rust_type = unsafe { &*ptr.cast::<CefArcFromRust<V, R>>() };
        wrap_boolean(rust_type.ref_count.load(Ordering::Acquire) >= 1)
    }
}

pub(crate) fn uninit_arc_vtable() -> cef_base_ref_counted_t {
    cef_base_ref_counted_t {
        size: 0,
        add_ref: None,
        release: None,
        has_one_ref: None,
        has_at_least_one_ref: None,
    }
}

impl<T: StartsWith<cef_base_ref_counted_t>> CefArc<T> {
    pub(crate) fn type_erase<U>(self) -> CefArc<U>
    where
        U: StartsWith<cef_base_ref_counted_t>,
        T: StartsWith<U>,
    {
        CefArc {
            ptr: std::mem::ManuallyDrop::new(self).ptr.cast(),
        }
    }

    /// Gives up this reference without releasing it.
    pub(crate) fn into_raw(self) -> *mut T {
        std::mem::ManuallyDrop::new(self).ptr.as_ptr()
    }

    pub(crate) fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Adopts a reference the caller already owns.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null and carry a reference that is not released elsewhere.
    pub(crate) unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr: unsafe { NonNull::new_unchecked(ptr) },
        }
    }

    /// Like [`CefArc::from_raw`], but maps a null pointer to `None`.
    ///
    /// # Safety
    ///
    /// A non-null `ptr` must carry a reference that is not released elsewhere.
    pub(crate) unsafe fn try_from_raw(ptr: *mut T) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    /// Whether this is the only reference to the underlying object.
    pub fn has_one_ref(&self) -> bool {
        let base = self.base_ptr();
        unsafe {
            match (*base).has_one_ref {
                Some(has_one_ref) => has_one_ref(base) != 0,
                None => false,
            }
        }
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }

    fn base_ptr(&self) -> *mut cef_base_ref_counted_t {
        let base: &cef_base_ref_counted_t = unsafe { self.ptr.as_ref() }.get_start();
        base as *const _ as *mut _
    }
}

impl<V: StartsWith<cef_base_ref_counted_t>, R> CefArc<CefArcFromRust<V, R>> {
    pub(crate) fn new(capi_v_table: V, rust_impl: R) -> Self {
        let inner = CefArcFromRust::new(capi_v_table, rust_impl);
        let inner = Box::into_raw(Box::new(inner));
        let ptr = unsafe { NonNull::new_unchecked(inner) };

        Self { ptr }
    }
}

#[cfg(test)]
mod test;
