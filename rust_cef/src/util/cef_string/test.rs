use super::*;

#[test]
fn owned_string_keeps_utf16_units() {
    let string = CefString::new("héllo ✓");

    assert_eq!(string.as_utf16(), "héllo ✓".encode_utf16().collect::<Vec<_>>());
    assert_eq!(string.to_string(), "héllo ✓");
    assert_eq!(
        unsafe { cef_string_to_string(string.as_raw()) }.as_deref(),
        Some("héllo ✓")
    );
}

#[test]
fn view_has_no_destructor() {
    let string = CefString::new("abc");
    let view = string.view();

    assert!(view.dtor.is_none());
    assert_eq!(view.length, 3);
    assert_eq!(unsafe { cef_string_to_string(&view) }.as_deref(), Some("abc"));
}

#[test]
fn transferred_string_frees_through_its_destructor() {
    let raw = CefString::new("owned elsewhere").into_raw();
    assert_eq!(
        unsafe { cef_string_to_string(&raw) }.as_deref(),
        Some("owned elsewhere")
    );

    let dtor = raw.dtor.expect("owned strings carry a destructor");
    unsafe { dtor(raw.str_) };
}

#[test]
fn empty_and_null_strings() {
    let empty = CefString::new("");
    assert_eq!(unsafe { cef_string_to_string(empty.as_raw()) }.as_deref(), Some(""));

    let unset = empty_cef_string();
    assert_eq!(unsafe { cef_string_to_string(&unset) }.as_deref(), Some(""));

    assert_eq!(unsafe { cef_string_to_string(std::ptr::null()) }, None);
}

#[test]
fn set_replaces_previous_value() {
    let mut target = CefString::new("first").into_raw();

    unsafe { cef_string_set(&mut target, "second") };
    assert_eq!(unsafe { cef_string_to_string(&target) }.as_deref(), Some("second"));

    if let Some(dtor) = target.dtor {
        unsafe { dtor(target.str_) };
    }
}

#[test]
fn arena_views_outlive_growth() {
    let mut arena = StringArena::default();
    let views = (0..32)
        .map(|i| arena.view(&format!("value {i}")))
        .collect::<Vec<_>>();

    for (i, view) in views.iter().enumerate() {
        assert_eq!(
            unsafe { cef_string_to_string(view) },
            Some(format!("value {i}"))
        );
    }
    assert!(arena.view_opt(None).str_.is_null());
}
