use super::*;

#[test]
fn suspended_accounts_can_be_reactivated() {
    assert_eq!(status_toggle(UserStatus::Suspended), (UserStatus::Active, "Reactivate"));
}

#[test]
fn other_accounts_can_be_suspended() {
    for status in [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending] {
        assert_eq!(status_toggle(status).0, UserStatus::Suspended);
    }
}

#[test]
fn tiles_follow_summary_fields() {
    let summary = AnalyticsSummary {
        total_users: 10,
        total_jobs: 4,
        total_applications: 25,
        active_jobs: 3,
        pending_moderation: 1,
    };
    let tiles = summary_tiles(&summary);
    assert_eq!(tiles[0], ("Users", 10));
    assert_eq!(tiles[2], ("Active jobs", 3));
    assert_eq!(tiles[4], ("Awaiting review", 1));
}

#[test]
fn status_labels_are_capitalized() {
    assert_eq!(status_label(UserStatus::Pending), "Pending");
    assert_eq!(status_label(UserStatus::Suspended), "Suspended");
}
