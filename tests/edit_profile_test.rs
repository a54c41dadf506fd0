//! Edit-profile flow tests

mod common;

use common::*;
use glaze::app::pages::edit_profile::{NO_CHANGES, PROFILE_UPDATED};
use glaze::app::pages::{EditProfilePage, SubmitOutcome};
use glaze::app::ImageUpload;
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_me(api: &TestApi) {
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(1, Some("testuser"), Some("me.png"))))
        .mount(&api.server)
        .await;
}

#[tokio::test]
async fn test_unchanged_form_makes_no_update_call() {
    let mut api = TestApi::signed_in("tok").await;
    mount_me(&api).await;
    Mock::given(method("PUT"))
        .and(path("/api/users/me/profile"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api.server)
        .await;
    api.session.initialize().await;

    let mut page = EditProfilePage::new();
    page.load(&api.services.users).await;
    assert!(page.state().is_ready());

    let outcome = page.submit(&api.services.users, &mut api.session).await;
    assert_eq!(outcome, SubmitOutcome::NoChanges);
    assert_eq!(page.success(), Some(NO_CHANGES));
    api.server.verify().await;
}

#[tokio::test]
async fn test_changed_fields_update_session_user() {
    let mut api = TestApi::signed_in("tok").await;
    mount_me(&api).await;
    Mock::given(method("PUT"))
        .and(path("/api/users/me/profile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(profile_json(1, Some("updateduser"), Some("new.jpg"))),
        )
        .expect(1)
        .mount(&api.server)
        .await;
    api.session.initialize().await;

    let mut page = EditProfilePage::new();
    page.load(&api.services.users).await;
    {
        let form = page.form_mut().expect("form seeded");
        form.name = "updateduser".to_string();
        form.select_photo(ImageUpload::new("new.jpg", vec![0xFF, 0xD8, 0xFF]));
    }

    let outcome = page.submit(&api.services.users, &mut api.session).await;
    assert!(matches!(outcome, SubmitOutcome::Send(..)));
    assert_eq!(page.success(), Some(PROFILE_UPDATED));

    let user = api.session.session().user().expect("signed in");
    assert_eq!(user.name.as_deref(), Some("updateduser"));
    assert_eq!(
        user.display_photo_url.as_deref(),
        Some("http://localhost:8000/uploads/profile_pics/new.jpg")
    );

    let bodies = api.bodies_for("PUT", "/api/users/me/profile").await;
    assert_contains!(bodies[0], "name=\"name\"");
    assert_contains!(bodies[0], "updateduser");
    assert_contains!(bodies[0], "filename=\"new.jpg\"");
    assert!(!bodies[0].contains("name=\"bio\""));
    assert!(!bodies[0].contains("clear_profile_photo"));
}

#[tokio::test]
async fn test_clear_photo_is_sent_as_flag() {
    let mut api = TestApi::signed_in("tok").await;
    mount_me(&api).await;
    Mock::given(method("PUT"))
        .and(path("/api/users/me/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(1, Some("testuser"), None)))
        .expect(1)
        .mount(&api.server)
        .await;
    api.session.initialize().await;

    let mut page = EditProfilePage::new();
    page.load(&api.services.users).await;
    page.set_clear_photo(true);
    page.submit(&api.services.users, &mut api.session).await;

    let bodies = api.bodies_for("PUT", "/api/users/me/profile").await;
    assert_contains!(bodies[0], "name=\"clear_profile_photo\"");
    assert!(!bodies[0].contains("name=\"name\""));
    assert_eq!(
        api.session.session().user().and_then(|u| u.display_photo_url.clone()),
        None
    );
}
