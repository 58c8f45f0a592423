/// # Safety
/// `T` must be the first field of `Self`, and `Self` must use repr(C) or repr(transparent).
pub unsafe trait StartsWith<T> {}

pub trait StartsWithExt<T>: StartsWith<T> {
    fn get_start(&self) -> &T {
        let self_ptr = self as *const Self;
        unsafe { &*self_ptr.cast::<T>() }
    }

    fn get_start_mut(&mut self) -> &mut T {
        let self_ptr = self as *mut Self;
        unsafe { &mut *self_ptr.cast::<T>() }
    }
}

impl<T, U> StartsWithExt<T> for U where U: StartsWith<T> {}
