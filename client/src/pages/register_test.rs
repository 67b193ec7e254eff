use super::*;

fn filled() -> RegisterForm {
    RegisterForm {
        full_name: "  Sam Rivera ".to_owned(),
        email: " sam@example.com ".to_owned(),
        password: "correct-horse".to_owned(),
        confirm: "correct-horse".to_owned(),
        role: Some(Role::Employer),
    }
}

#[test]
fn valid_form_builds_trimmed_request() {
    let req = validate_register_input(&filled()).unwrap();
    assert_eq!(req.full_name, "Sam Rivera");
    assert_eq!(req.email, "sam@example.com");
    assert_eq!(req.password, "correct-horse");
    assert_eq!(req.role, Role::Employer);
}

#[test]
fn name_and_email_are_required() {
    let mut form = filled();
    form.full_name = "  ".to_owned();
    assert_eq!(validate_register_input(&form), Err("Enter your full name."));

    let mut form = filled();
    form.email = "sam".to_owned();
    assert_eq!(validate_register_input(&form), Err("Enter a valid email address."));
}

#[test]
fn password_rules() {
    let mut form = filled();
    form.password = "short".to_owned();
    form.confirm = "short".to_owned();
    assert_eq!(validate_register_input(&form), Err("Password must be at least 8 characters."));

    let mut form = filled();
    form.confirm = "different-horse".to_owned();
    assert_eq!(validate_register_input(&form), Err("Passwords do not match."));
}

#[test]
fn admin_role_cannot_self_register() {
    let mut form = filled();
    form.role = Some(Role::Admin);
    assert!(validate_register_input(&form).is_err());
    form.role = None;
    assert!(validate_register_input(&form).is_err());
}
