use super::*;

#[test]
fn salary_range_groups_thousands() {
    assert_eq!(format_salary(Some(80_000), Some(120_000)).as_deref(), Some("$80,000 - $120,000"));
}

#[test]
fn salary_single_bound() {
    assert_eq!(format_salary(Some(50_000), None).as_deref(), Some("From $50,000"));
    assert_eq!(format_salary(None, Some(999)).as_deref(), Some("Up to $999"));
    assert_eq!(format_salary(Some(1_000_000), Some(1_000_000)).as_deref(), Some("$1,000,000"));
}

#[test]
fn salary_unknown_is_none() {
    assert_eq!(format_salary(None, None), None);
}
