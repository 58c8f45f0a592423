use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use cef_wrapper::cef_capi_sys::cef_base_ref_counted_t;

use super::{CefArc, CefArcFromRust, uninit_arc_vtable};
use crate::util::starts_with::{StartsWith, StartsWithExt};

#[repr(C)]
struct Plain {
    base: cef_base_ref_counted_t,
}

unsafe impl StartsWith<cef_base_ref_counted_t> for Plain {}

struct DropCounter(Arc<AtomicUsize>);

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

fn counted() -> (CefArc<CefArcFromRust<Plain, DropCounter>>, Arc<AtomicUsize>) {
    let drops = Arc::new(AtomicUsize::new(0));
    let arc = CefArc::new(
        Plain {
            base: uninit_arc_vtable(),
        },
        DropCounter(drops.clone()),
    );
    (arc, drops)
}

#[test]
fn base_is_populated() {
    let (arc, _) = counted();
    let base = StartsWithExt::<cef_base_ref_counted_t>::get_start(&*arc);

    assert_eq!(
        base.size,
        std::mem::size_of::<CefArcFromRust<Plain, DropCounter>>()
    );
    assert!(base.add_ref.is_some());
    assert!(base.release.is_some());
    assert!(base.has_one_ref.is_some());
    assert!(base.has_at_least_one_ref.is_some());
}

#[test]
fn last_release_frees_the_rust_value() {
    let (arc, drops) = counted();
    assert!(arc.has_one_ref());

    let second = arc.clone();
    assert!(!arc.has_one_ref());

    drop(second);
    assert!(arc.has_one_ref());
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    drop(arc);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn raw_round_trip_keeps_the_reference() {
    let (arc, drops) = counted();
    let erased: CefArc<Plain> = arc.type_erase();

    let raw = erased.into_raw();
    assert_eq!(drops.load(Ordering::SeqCst), 0);

    let adopted = unsafe { CefArc::from_raw(raw) };
    assert!(adopted.has_one_ref());

    drop(adopted);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn null_is_not_adopted() {
    let adopted = unsafe { CefArc::<Plain>::try_from_raw(std::ptr::null_mut()) };
    assert!(adopted.is_none());
}
