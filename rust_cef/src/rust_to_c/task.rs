use cef_wrapper::cef_capi_sys::{cef_base_ref_counted_t, cef_task_t};
use parking_lot::Mutex;

use crate::util::{
    cef_arc::{CefArc, CefArcFromRust, uninit_arc_vtable},
    starts_with::StartsWith,
};

/// A unit of work posted to one of the runtime's threads.
#[repr(transparent)]
pub struct Task(pub(crate) cef_task_t);

unsafe impl StartsWith<cef_task_t> for Task {}
unsafe impl StartsWith<cef_base_ref_counted_t> for Task {}
unsafe impl StartsWith<cef_base_ref_counted_t> for cef_task_t {}

impl Task {
    pub fn new<C: TaskConfig>(config: C) -> CefArc<Self> {
        let v_table = Task(cef_task_t {
            base: uninit_arc_vtable(),
            execute: Some(C::execute_raw),
        });
        CefArc::new(v_table, config).type_erase()
    }

    /// A task that runs `f` the first time it executes and does nothing after.
    pub fn once<F>(f: F) -> CefArc<Self>
    where
        F: FnOnce() + Send + 'static,
    {
        Self::new(OnceTask(Mutex::new(Some(f))))
    }
}

pub trait TaskConfig: Sized + Send + Sync {
    fn execute(&self);
}

struct OnceTask<F>(Mutex<Option<F>>);

impl<F: FnOnce() + Send + 'static> TaskConfig for OnceTask<F> {
    fn execute(&self) {
        // take before calling so `f` may post further tasks.
        let f = self.0.lock().take();
        if let Some(f) = f {
            f();
        }
    }
}

pub(crate) trait TaskConfigExt: TaskConfig {
    unsafe extern "C" fn execute_raw(ptr: *mut cef_task_t) {
        let rust_impl = unsafe { CefArcFromRust::<Task, Self>::rust_impl_from_ptr(ptr.cast()) };
        rust_impl.execute();
    }
}

impl<T: TaskConfig> TaskConfigExt for T {}

#[cfg(test)]
mod test {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    fn execute(task: &CefArc<Task>) {
        let execute = task.0.execute.expect("execute is installed");
        unsafe { execute(task.as_ptr().cast()) };
    }

    #[test]
    fn once_task_runs_a_single_time() {
        let runs = Arc::new(AtomicUsize::new(0));
        let task = Task::once({
            let runs = runs.clone();
            move || {
                runs.fetch_add(1, Ordering::SeqCst);
            }
        });

        execute(&task);
        execute(&task);

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_an_unrun_task_drops_the_closure() {
        let payload = Arc::new(());
        let task = Task::once({
            let payload = payload.clone();
            move || drop(payload)
        });
        assert_eq!(Arc::strong_count(&payload), 2);

        drop(task);

        assert_eq!(Arc::strong_count(&payload), 1);
    }
}
