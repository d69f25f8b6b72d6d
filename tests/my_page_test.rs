use chrono::NaiveDate;
use httpmock::prelude::*;
use snuintern_applicant::app::commands::{show_bookmarks, show_me};
use snuintern_applicant::{ClientConfig, Deadline, HttpProfileService, MyPage, MyPageTab};

fn client(server: &MockServer) -> HttpProfileService {
    let config = ClientConfig {
        base_url: server.base_url(),
        token: None,
        timeout_seconds: 5,
    };
    HttpProfileService::new(&config)
}

fn bookmarks_mock(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/api/post/bookmarks");
        then.status(200).json_body(serde_json::json!({
            "posts": [
                {"id": "1", "companyName": "Alpha", "positionTitle": "Backend", "employmentEndDate": "2024-04-20"},
                {"id": "2", "companyName": "Beta", "positionTitle": "Frontend", "employmentEndDate": "2024-05-01"},
                {"id": "3", "companyName": "Gamma", "positionTitle": "ML", "employmentEndDate": "2024-05-08"},
                {"id": "4", "companyName": "Delta", "positionTitle": "Design", "employmentEndDate": "상시"},
                {"id": "5", "companyName": "Epsilon", "positionTitle": "PM", "employmentEndDate": null}
            ]
        }));
    })
}

#[tokio::test]
async fn test_bookmark_deadlines() {
    let server = MockServer::start();
    let api_mock = bookmarks_mock(&server);
    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

    let mut page = MyPage::new();
    page.select_tab(MyPageTab::Bookmarks, &client(&server)).await;
    api_mock.assert();

    let deadlines: Vec<Deadline> = page
        .bookmark_cards(today)
        .into_iter()
        .map(|card| card.deadline)
        .collect();
    assert_eq!(
        deadlines,
        vec![
            Deadline::Closed,
            Deadline::Today,
            Deadline::DaysLeft(7),
            Deadline::AlwaysOpen,
            Deadline::AlwaysOpen,
        ]
    );

    let rendered = show_bookmarks(&client(&server), today).await;
    assert!(rendered.contains("Gamma"));
    assert!(rendered.contains("D-7"));
}

#[tokio::test]
async fn test_bookmark_failure_keeps_page_usable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/post/bookmarks");
        then.status(500);
    });

    let mut page = MyPage::new();
    page.select_tab(MyPageTab::Bookmarks, &client(&server)).await;
    assert!(page
        .bookmark_cards(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        .is_empty());
}

#[tokio::test]
async fn test_info_tab_with_profile() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/applicant/me");
        then.status(200).json_body(serde_json::json!({
            "name": "Park",
            "email": "park@snu.ac.kr",
            "enrollYear": 2023,
            "department": "Computer Science",
            "cvKey": "static/private/CV/t_20240101/cv.pdf"
        }));
    });

    let mut page = MyPage::new();
    page.select_tab(MyPageTab::Info, &client(&server)).await;
    assert!(page.profile_exists());
    assert!(page.can_edit_profile());
    assert_eq!(page.summary_line().as_deref(), Some("Computer Science 23학번"));

    let rendered = show_me(&client(&server)).await;
    assert!(rendered.contains("Park"));
    assert!(rendered.contains("park@snu.ac.kr"));
}

#[tokio::test]
async fn test_info_tab_without_profile() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/applicant/me");
        then.status(404)
            .json_body(serde_json::json!({"code": "APPLICANT_002", "message": "none"}));
    });

    let mut page = MyPage::new();
    page.select_tab(MyPageTab::Info, &client(&server)).await;
    assert!(!page.profile_exists());
    assert!(!page.can_edit_profile());

    let rendered = show_me(&client(&server)).await;
    assert!(rendered.contains("아직 프로필이 등록되지 않았어요!"));
}

#[tokio::test]
async fn test_switching_back_to_bookmarks_hides_edit_link() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/applicant/me");
        then.status(200).json_body(serde_json::json!({
            "enrollYear": 2020, "department": "Math", "cvKey": "k/cv.pdf"
        }));
    });
    bookmarks_mock(&server);

    let service = client(&server);
    let mut page = MyPage::new();
    page.select_tab(MyPageTab::Info, &service).await;
    assert!(page.can_edit_profile());
    page.select_tab(MyPageTab::Bookmarks, &service).await;
    assert!(!page.can_edit_profile());
    assert!(page.profile_exists());
}
