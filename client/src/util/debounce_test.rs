use super::*;

#[test]
fn settles_after_quiet_period() {
    let mut d = Debouncer::new(300);
    let t = d.input("rust".to_owned(), 1_000);
    assert_eq!(d.settle(t, 1_299), None);
    assert_eq!(d.settle(t, 1_300), Some("rust".to_owned()));
    assert!(!d.is_pending());
}

#[test]
fn newer_input_supersedes_older_ticket() {
    let mut d = Debouncer::new(300);
    let first = d.input("ru".to_owned(), 0);
    let second = d.input("rust".to_owned(), 100);
    assert_eq!(d.settle(first, 1_000), None);
    assert_eq!(d.settle(second, 1_000), Some("rust".to_owned()));
}

#[test]
fn settles_only_once() {
    let mut d = Debouncer::new(SEARCH_DEBOUNCE_MS);
    let t = d.input(5_u32, 0);
    assert_eq!(d.settle(t, SEARCH_DEBOUNCE_MS), Some(5));
    assert_eq!(d.settle(t, SEARCH_DEBOUNCE_MS * 2), None);
}
