use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};

use blogly_core::domain::{NewPost, NewTag, NewUser, Post, User};

use super::{configure_routes, not_found};
use crate::flash::FLASH_COOKIE;
use crate::state::AppState;

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes)
                .default_service(web::to(not_found)),
        )
        .await
    };
}

fn form_post(uri: &str, body: impl Into<web::Bytes>) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .insert_header((header::CONTENT_TYPE, "application/x-www-form-urlencoded"))
        .set_payload(body)
}

fn location(resp: &ServiceResponse) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

async fn body_text(resp: ServiceResponse) -> String {
    let bytes = test::read_body(resp).await;
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn seed_user(state: &AppState, first: &str, last: &str) -> User {
    state
        .users
        .create(NewUser::new(first.into(), last.into(), None))
        .await
        .unwrap()
}

async fn seed_tag(state: &AppState, name: &str) -> i32 {
    state
        .tags
        .create(NewTag { name: name.into() })
        .await
        .unwrap()
        .id
}

async fn seed_post(state: &AppState, user_id: i32, title: &str, tag_ids: Vec<i32>) -> Post {
    state
        .posts
        .create(NewPost {
            user_id,
            title: title.into(),
            content: "Some content".into(),
            tag_ids,
        })
        .await
        .unwrap()
}

#[actix_web::test]
async fn test_list_users() {
    let state = AppState::in_memory();
    seed_user(&state, "Slim", "Pickens").await;
    let app = app!(state);

    for uri in ["/", "/users"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("Slim Pickens"));
    }
}

#[actix_web::test]
async fn test_add_user_then_list_shows_name_once() {
    let state = AppState::in_memory();
    let app = app!(state.clone());

    let resp = test::call_service(
        &app,
        form_post("/users/new", "first-name=New&last-name=User&image-url=").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
    let html = body_text(resp).await;
    assert_eq!(html.matches("New User").count(), 1);

    let users = state.users.find_all().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].first_name, "New");
    assert_eq!(users[0].image_url, blogly_core::domain::DEFAULT_IMAGE_URL);
}

#[actix_web::test]
async fn test_add_user_missing_field_is_bad_request() {
    let state = AppState::in_memory();
    let app = app!(state.clone());

    let resp =
        test::call_service(&app, form_post("/users/new", "first-name=New").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(state.users.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_show_user() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    seed_post(&state, user.id, "First Post", vec![]).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Slim Pickens"));
    assert!(html.contains("First Post"));
}

#[actix_web::test]
async fn test_missing_rows_are_not_found() {
    let app = app!(AppState::in_memory());

    for uri in [
        "/users/999",
        "/users/999/edit",
        "/users/999/posts/new",
        "/posts/999",
        "/posts/999/edit",
        "/tags/999",
        "/tags/999/edit",
        "/users/abc",
        "/no/such/page",
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "GET {uri}");
    }

    for uri in ["/users/999/delete", "/posts/999/delete", "/tags/999/delete"] {
        let resp = test::call_service(&app, test::TestRequest::post().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "POST {uri}");
    }
}

#[actix_web::test]
async fn test_edit_user() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/edit", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("value=\"Pickens\""));

    let resp = test::call_service(
        &app,
        form_post(
            &format!("/users/{}/edit", user.id),
            "first-name=Major&last-name=Kong&image-url=https%3A%2F%2Fexample.com%2Fkong.png",
        )
        .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users");

    let updated = state.user_or_404(user.id).await.unwrap();
    assert_eq!(updated.full_name(), "Major Kong");
    assert_eq!(updated.image_url, "https://example.com/kong.png");
}

#[actix_web::test]
async fn test_delete_user_cascades_posts() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let other = seed_user(&state, "Other", "Person").await;
    let tag = seed_tag(&state, "news").await;
    let doomed = seed_post(&state, user.id, "Doomed", vec![tag]).await;
    let kept = seed_post(&state, other.id, "Kept", vec![tag]).await;
    let app = app!(state.clone());

    let req = test::TestRequest::post()
        .uri(&format!("/users/{}/delete", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users");
    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .expect("flash cookie");
    assert_eq!(flash.value(), "User deleted.");

    assert!(state.users.find_by_id(user.id).await.unwrap().is_none());
    assert!(state.posts.find_by_id(doomed.id).await.unwrap().is_none());
    assert!(state.posts.find_by_user(user.id).await.unwrap().is_empty());
    assert!(state.posts.find_by_id(kept.id).await.unwrap().is_some());
    let tagged = state.posts.find_by_tag(tag).await.unwrap();
    assert_eq!(tagged, vec![kept]);

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_delete_user_via_get_is_not_allowed() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/delete", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_client_error());
    assert!(state.users.find_by_id(user.id).await.unwrap().is_some());
}

#[actix_web::test]
async fn test_flash_message_is_shown_once() {
    let app = app!(AppState::in_memory());

    let req = test::TestRequest::get()
        .uri("/users")
        .cookie(Cookie::new(FLASH_COOKIE, "User deleted."))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cleared = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .expect("removal cookie");
    assert_eq!(cleared.value(), "");
    assert!(body_text(resp).await.contains("User deleted."));
}

#[actix_web::test]
async fn test_create_post_with_selected_tags() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let rust = seed_tag(&state, "rust").await;
    let web_tag = seed_tag(&state, "web").await;
    let unused = seed_tag(&state, "unused").await;
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri(&format!("/users/{}/posts/new", user.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("unused"));

    let body = format!("title=Hello&content=World&tags={rust}&tags={web_tag}");
    let resp = test::call_service(
        &app,
        form_post(&format!("/users/{}/posts/new", user.id), body).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/users/{}", user.id));

    let posts = state.posts.find_by_user(user.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Hello");
    assert_eq!(posts[0].user_id, user.id);

    let tag_ids: Vec<i32> = state
        .tags
        .find_by_post(posts[0].id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(tag_ids, vec![rust, web_tag]);
    assert!(state.posts.find_by_tag(unused).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_create_post_for_missing_user_is_not_found() {
    let state = AppState::in_memory();
    let app = app!(state.clone());

    let resp = test::call_service(
        &app,
        form_post("/users/42/posts/new", "title=Hello&content=World").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(state.posts.find_all().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_show_post_with_owner_and_tags() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let tag = seed_tag(&state, "cowboys").await;
    let post = seed_post(&state, user.id, "Riding the Bomb", vec![tag]).await;
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Riding the Bomb"));
    assert!(html.contains("Slim Pickens"));
    assert!(html.contains("cowboys"));
}

#[actix_web::test]
async fn test_edit_post_replaces_tag_set() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let old_a = seed_tag(&state, "old-a").await;
    let old_b = seed_tag(&state, "old-b").await;
    let new_tag = seed_tag(&state, "new").await;
    let post = seed_post(&state, user.id, "Before", vec![old_a, old_b]).await;
    let app = app!(state.clone());

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{}/edit", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await.matches(" checked").count(), 2);

    let body = format!("title=After&content=Changed&tags={new_tag}");
    let resp = test::call_service(
        &app,
        form_post(&format!("/posts/{}/edit", post.id), body).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/posts/{}", post.id));

    let updated = state.post_or_404(post.id).await.unwrap();
    assert_eq!(updated.title, "After");
    assert_eq!(updated.content, "Changed");
    assert_eq!(updated.created_at, post.created_at);

    let tags = state.tags.find_by_post(post.id).await.unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].id, new_tag);
    assert!(state.posts.find_by_tag(old_a).await.unwrap().is_empty());
    assert!(state.posts.find_by_tag(old_b).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_edit_post_clearing_all_tags() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let tag = seed_tag(&state, "gone").await;
    let post = seed_post(&state, user.id, "Tagged", vec![tag]).await;
    let app = app!(state.clone());

    let resp = test::call_service(
        &app,
        form_post(&format!("/posts/{}/edit", post.id), "title=Tagged&content=x").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(state.tags.find_by_post(post.id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_unknown_tag_ids_are_dropped() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let rust = seed_tag(&state, "rust").await;
    let app = app!(state.clone());

    let body = format!("title=Mixed&content=x&tags={rust}&tags=999");
    let resp = test::call_service(
        &app,
        form_post(&format!("/users/{}/posts/new", user.id), body).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let posts = state.posts.find_by_user(user.id).await.unwrap();
    assert_eq!(posts.len(), 1);
    let linked: Vec<i32> = state
        .tags
        .find_by_post(posts[0].id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(linked, vec![rust]);

    let body = "title=Mixed&content=x&tags=999".to_owned();
    let resp = test::call_service(
        &app,
        form_post(&format!("/posts/{}/edit", posts[0].id), body).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert!(state.tags.find_by_post(posts[0].id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_delete_post_redirects_to_owner() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let tag = seed_tag(&state, "news").await;
    let post = seed_post(&state, user.id, "Farewell", vec![tag]).await;
    let app = app!(state.clone());

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{}/delete", post.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), format!("/users/{}", user.id));
    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .expect("flash cookie");
    assert_eq!(flash.value(), "Post Farewell deleted.");

    assert!(state.posts.find_by_id(post.id).await.unwrap().is_none());
    assert!(state.posts.find_by_tag(tag).await.unwrap().is_empty());
    assert!(state.tags.find_by_id(tag).await.unwrap().is_some());
}

#[actix_web::test]
async fn test_flash_survives_titles_with_separators() {
    for title in ["Tips; tricks", "line\nbreak", "a=b, \"quoted\""] {
        let state = AppState::in_memory();
        let user = seed_user(&state, "Slim", "Pickens").await;
        let post = seed_post(&state, user.id, title, vec![]).await;
        let app = app!(state.clone());

        let req = test::TestRequest::post()
            .uri(&format!("/posts/{}/delete", post.id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "title {title:?}");

        let expected = format!("Post {title} deleted.");
        let flash = resp
            .response()
            .cookies()
            .find(|c| c.name() == FLASH_COOKIE)
            .expect("flash cookie");
        assert_eq!(flash.value(), expected);

        // Send the pair back the way a browser does: everything before the first `;`.
        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_owned();
        let pair = set_cookie.split(';').next().unwrap().to_owned();

        let req = test::TestRequest::get()
            .uri(&format!("/users/{}", user.id))
            .insert_header((header::COOKIE, pair))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        let shown = if title.contains('"') {
            "a=b, &quot;quoted&quot;".to_owned()
        } else {
            title.to_owned()
        };
        assert!(body.contains(&shown), "title {title:?} missing from page");
    }
}

#[actix_web::test]
async fn test_tag_crud() {
    let state = AppState::in_memory();
    let app = app!(state.clone());

    let resp = test::call_service(&app, form_post("/tags/new", "name=Fun").to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/tags");

    let tags = state.tags.find_all().await.unwrap();
    assert_eq!(tags.len(), 1);
    let id = tags[0].id;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/tags").to_request()).await;
    assert!(body_text(resp).await.contains("Fun"));

    let resp = test::call_service(
        &app,
        form_post(&format!("/tags/{id}/edit"), "name=Serious").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(state.tag_or_404(id).await.unwrap().name, "Serious");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/tags/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("Serious"));
}

#[actix_web::test]
async fn test_duplicate_tag_name_conflicts() {
    let state = AppState::in_memory();
    seed_tag(&state, "rust").await;
    let app = app!(state.clone());

    let resp = test::call_service(&app, form_post("/tags/new", "name=rust").to_request()).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(state.tags.find_all().await.unwrap().len(), 1);
}

#[actix_web::test]
async fn test_delete_tag_keeps_posts() {
    let state = AppState::in_memory();
    let user = seed_user(&state, "Slim", "Pickens").await;
    let tag = seed_tag(&state, "ephemeral").await;
    let post = seed_post(&state, user.id, "Survivor", vec![tag]).await;
    let app = app!(state.clone());

    let req = test::TestRequest::post()
        .uri(&format!("/tags/{tag}/delete"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/tags");
    let flash = resp
        .response()
        .cookies()
        .find(|c| c.name() == FLASH_COOKIE)
        .expect("flash cookie");
    assert_eq!(flash.value(), "Tag ephemeral deleted.");

    assert!(state.tags.find_by_id(tag).await.unwrap().is_none());
    assert!(state.posts.find_by_id(post.id).await.unwrap().is_some());
    assert!(state.tags.find_by_post(post.id).await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_health_check() {
    let app = app!(AppState::in_memory());

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("\"status\":\"ok\""));
}
