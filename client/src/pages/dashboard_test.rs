use super::*;

fn application(id: &str, status: ApplicationStatus) -> Application {
    Application {
        id: id.to_owned(),
        job_id: "j-1".to_owned(),
        job_title: Some("Backend Engineer".to_owned()),
        applicant_id: "u-1".to_owned(),
        applicant_name: None,
        resume_id: None,
        cover_letter: None,
        status,
        created_at: None,
    }
}

fn resume(id: &str, is_default: bool) -> Resume {
    Resume { id: id.to_owned(), title: id.to_uppercase(), file_url: format!("https://cdn/{id}.pdf"), is_default }
}

#[test]
fn withdraw_marks_only_the_target() {
    let mut list = vec![application("a-1", ApplicationStatus::Pending), application("a-2", ApplicationStatus::Reviewed)];
    mark_withdrawn(&mut list, "a-2");
    assert_eq!(list[0].status, ApplicationStatus::Pending);
    assert_eq!(list[1].status, ApplicationStatus::Withdrawn);
}

#[test]
fn optimistic_withdraw_through_cache() {
    let mut cache = QueryCache::default();
    let key = endpoints::applications::mine_key();
    let ticket = cache.begin_fetch(&key).unwrap();
    cache.finish_ok(&key, ticket, &vec![application("a-1", ApplicationStatus::Pending)]);

    assert!(cache.patch::<Vec<Application>, _>(&key, |list| mark_withdrawn(list, "a-1")));
    let cached = cache.data::<Vec<Application>>(&key).unwrap();
    assert_eq!(cached[0].status, ApplicationStatus::Withdrawn);
    assert!(!cached[0].status.is_open());
}

#[test]
fn default_resume_is_exclusive() {
    let mut list = vec![resume("r-1", true), resume("r-2", false), resume("r-3", false)];
    mark_default(&mut list, "r-3");
    let defaults: Vec<_> = list.iter().filter(|r| r.is_default).map(|r| r.id.as_str()).collect();
    assert_eq!(defaults, vec!["r-3"]);
}

#[test]
fn resume_input_requires_title_and_link() {
    assert_eq!(
        validate_resume_input(" CV ", " https://cdn.example.com/cv.pdf "),
        Ok(("CV".to_owned(), "https://cdn.example.com/cv.pdf".to_owned()))
    );
    assert_eq!(validate_resume_input("", "https://x.y/cv.pdf"), Err("Give the resume a title."));
    assert_eq!(validate_resume_input("CV", "cv.pdf"), Err("Enter a link to the resume file."));
}
