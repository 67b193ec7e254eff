use super::*;

#[test]
fn push_assigns_increasing_ids() {
    let mut toasts = ToastState::default();
    let a = toasts.success("saved");
    let b = toasts.error("failed");
    assert!(b > a);
    assert_eq!(toasts.items.len(), 2);
    assert_eq!(toasts.items[1].kind, ToastKind::Error);
}

#[test]
fn push_evicts_oldest_beyond_limit() {
    let mut toasts = ToastState::default();
    for i in 0..(TOAST_LIMIT + 2) {
        toasts.push(ToastKind::Info, format!("m{i}"));
    }
    assert_eq!(toasts.items.len(), TOAST_LIMIT);
    assert_eq!(toasts.items.front().unwrap().message, "m2");
}

#[test]
fn dismiss_removes_only_matching_id() {
    let mut toasts = ToastState::default();
    let a = toasts.success("a");
    toasts.success("b");
    toasts.dismiss(a);
    assert_eq!(toasts.items.len(), 1);
    assert_eq!(toasts.items[0].message, "b");
    toasts.dismiss(999);
    assert_eq!(toasts.items.len(), 1);
}
