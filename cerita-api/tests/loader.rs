use cerita_api::model::post::PostId;
use cerita_api::{PostSource, Site, StaticDir, API};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POSTS: &str = r#"[
    {"ID": 1, "title": "Pertama", "content": "<p>satu</p>"},
    {"ID": "2", "title": "Kedua", "content": "<p>dua</p>"}
]"#;

#[tokio::test]
async fn fetches_collection_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(POSTS, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let api = API::try_with_base_url(&server.uri()).expect("valid base url");
    let posts = api.fetch_posts().await.expect("fetch succeeds");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, PostId::from(1i64));
    assert_eq!(posts[1].id, PostId::from("2"));
    assert_eq!(posts[1].title, "Kedua");
}

#[tokio::test]
async fn honours_sub_path_and_custom_posts_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/miniapp/feed/all.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let site = Site::from_base(&format!("{}/miniapp", server.uri()), "feed/all.json")
        .expect("valid base url");
    let posts = site.fetch_posts().await.expect("fetch succeeds");
    assert!(posts.is_empty());
}

#[tokio::test]
async fn every_fetch_hits_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(POSTS, "application/json"))
        .expect(2)
        .mount(&server)
        .await;

    let api = API::try_with_base_url(&server.uri()).expect("valid base url");
    api.fetch_posts().await.expect("first fetch");
    api.fetch_posts().await.expect("second fetch");
}

#[tokio::test]
async fn odd_records_do_not_hide_the_rest() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"[
                {"ID": 1, "title": "Pertama"},
                {"ID": 7.0, "title": null},
                "bukan objek",
                {"title": "Tanpa ID", "content": "<p>?</p>"},
                {"ID": 18446744073709551615, "title": "Besar"}
            ]"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let api = API::try_with_base_url(&server.uri()).expect("valid base url");
    let posts = api.fetch_posts().await.expect("fetch succeeds");

    let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Pertama", "", "Tanpa ID", "Besar"]);
    assert!(posts[1].id.matches("7"));
    assert!(posts[3].id.matches("18446744073709551615"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/posts.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = API::try_with_base_url(&server.uri()).expect("valid base url");
    let err = api.fetch_posts().await.expect_err("404 must fail");
    assert!(err.to_string().contains("404"), "unexpected error: {err}");
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"oops\":", "application/json"))
        .mount(&server)
        .await;

    let api = API::try_with_base_url(&server.uri()).expect("valid base url");
    assert!(api.fetch_posts().await.is_err());
}

#[tokio::test]
async fn reads_collection_from_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::create_dir_all(dir.path().join("data")).expect("data dir");
    std::fs::write(dir.path().join("data/posts.json"), POSTS).expect("write posts");

    let posts = StaticDir::new(dir.path())
        .fetch_posts()
        .await
        .expect("read succeeds");
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title, "Pertama");
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = StaticDir::new(dir.path())
        .fetch_posts()
        .await
        .expect_err("no posts.json");
    assert!(err.to_string().contains("posts.json"), "unexpected error: {err}");
}
