use super::*;
use crate::testing::{MemoryStore, MockHttpClient, TestApi, api, appointment, ok, page_json};
use ramyro_shared::AppointmentStatus;
use std::cell::RefCell;
use std::rc::Rc;

type TestBoard = AppointmentBoard<RoleAppointments<Rc<MockHttpClient>, Rc<MemoryStore>>, RefCell<AppointmentFeed>>;

fn board(http: &Rc<MockHttpClient>, role: Role, page_size: u32) -> TestBoard {
    let api: TestApi = api(http, &MemoryStore::with(&[("token", "t")]));
    AppointmentBoard::new(
        RoleAppointments::new(api, role),
        RefCell::new(AppointmentFeed::new(page_size)),
    )
}

fn ids(feed: &AppointmentFeed) -> Vec<i64> {
    feed.items().iter().map(|a| a.id).collect()
}

// =========================================================
// 状态机
// =========================================================

#[test]
fn partitions_by_status() {
    let mut feed = AppointmentFeed::new(10);
    let ticket = feed.begin_refresh();
    feed.apply(
        ticket,
        vec![
            appointment(1, AppointmentStatus::Scheduled),
            appointment(2, AppointmentStatus::Completed),
            appointment(3, AppointmentStatus::Cancelled),
            appointment(4, AppointmentStatus::Other("NoShow".into())),
            appointment(5, AppointmentStatus::Scheduled),
        ],
    );

    let upcoming: Vec<i64> = feed.upcoming().map(|a| a.id).collect();
    let past: Vec<i64> = feed.past().map(|a| a.id).collect();
    assert_eq!(upcoming, vec![1, 5]);
    assert_eq!(past, vec![2, 3, 4]);
    assert_eq!(upcoming.len() + past.len(), feed.items().len());
}

#[test]
fn newer_ticket_supersedes_older() {
    let mut feed = AppointmentFeed::new(10);
    let first = feed.begin_refresh();
    let second = feed.begin_refresh();

    assert_eq!(
        feed.apply(second, vec![appointment(2, AppointmentStatus::Scheduled)]),
        FeedChange::Applied
    );
    assert_eq!(
        feed.apply(first, vec![appointment(1, AppointmentStatus::Scheduled)]),
        FeedChange::Stale
    );
    assert_eq!(ids(&feed), vec![2]);
    assert!(!feed.is_loading());
}

#[test]
fn load_more_waits_for_pending_request() {
    let mut feed = AppointmentFeed::new(10);
    let ticket = feed.begin_refresh();
    assert_eq!(feed.begin_load_more(), None);

    feed.apply(ticket, vec![appointment(1, AppointmentStatus::Scheduled)]);
    let next = feed.begin_load_more().unwrap();
    assert_eq!(next.page(), 2);
}

#[test]
fn failure_keeps_items() {
    let mut feed = AppointmentFeed::new(10);
    let ticket = feed.begin_refresh();
    feed.apply(ticket, vec![appointment(1, AppointmentStatus::Scheduled)]);

    let ticket = feed.begin_refresh();
    feed.fail(ticket);
    assert_eq!(ids(&feed), vec![1]);
    assert!(!feed.is_loading());
}

// =========================================================
// 驱动
// =========================================================

#[tokio::test]
async fn refresh_replaces_list_and_resets_paging() {
    let http = MockHttpClient::new();
    http.reply(200, page_json(&[appointment(1, AppointmentStatus::Scheduled)]));
    http.reply(200, page_json(&[appointment(2, AppointmentStatus::Scheduled)]));
    http.reply(200, page_json(&[appointment(3, AppointmentStatus::Completed)]));

    let board = board(&http, Role::Doctor, 1);
    board.refresh().await.unwrap();
    board.load_more().await.unwrap();
    assert_eq!(board.snapshot().unwrap().page(), 2);

    board.refresh().await.unwrap();
    let feed = board.snapshot().unwrap();
    assert_eq!(ids(&feed), vec![3]);
    assert_eq!(feed.page(), 1);
    assert!(feed.has_more());

    let urls = http.urls();
    assert!(urls[0].ends_with("/doctors/appointments/all?page=1&pageSize=1"));
    assert!(urls[1].ends_with("/doctors/appointments/all?page=2&pageSize=1"));
    assert!(urls[2].ends_with("/doctors/appointments/all?page=1&pageSize=1"));
}

#[tokio::test]
async fn empty_page_stops_load_more() {
    let http = MockHttpClient::new();
    http.reply(200, page_json(&[appointment(1, AppointmentStatus::Scheduled)]));
    http.reply(200, "[]");

    let board = board(&http, Role::Patient, 10);
    board.refresh().await.unwrap();
    assert_eq!(board.load_more().await, Ok(FeedChange::Applied));

    let feed = board.snapshot().unwrap();
    assert!(!feed.has_more());
    assert_eq!(ids(&feed), vec![1]);
    assert_eq!(feed.page(), 1);

    assert_eq!(board.load_more().await, Ok(FeedChange::Skipped));
    assert_eq!(http.request_count(), 2);
}

#[tokio::test]
async fn cancel_triggers_full_refresh() {
    let http = MockHttpClient::new();
    http.reply(200, page_json(&[appointment(42, AppointmentStatus::Scheduled)]));
    http.reply(204, "");
    http.reply(200, page_json(&[appointment(42, AppointmentStatus::Cancelled)]));

    let board = board(&http, Role::Patient, 10);
    board.refresh().await.unwrap();

    let outcome = board.cancel(42).await.unwrap();
    assert_eq!(outcome.refresh, Ok(FeedChange::Applied));

    let requests = http.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests[1].url.ends_with("/appointments/42"));
    assert!(requests[2].url.ends_with("/patients/appointments/all?page=1&pageSize=10"));

    let feed = board.snapshot().unwrap();
    assert_eq!(feed.upcoming().count(), 0);
    assert_eq!(feed.past().count(), 1);
}

#[tokio::test]
async fn forbidden_cancel_leaves_list_unchanged() {
    let http = MockHttpClient::new();
    http.reply(200, page_json(&[appointment(42, AppointmentStatus::Scheduled)]));
    http.reply(403, "");

    let board = board(&http, Role::Patient, 10);
    board.refresh().await.unwrap();
    let before = board.snapshot().unwrap();

    let err = board.cancel(42).await.unwrap_err();
    assert_eq!(err, ApiError::Forbidden(None));
    assert_eq!(board.snapshot().unwrap(), before);
    // 失败后不刷新
    assert_eq!(http.request_count(), 2);
}

#[tokio::test]
async fn refresh_failure_after_cancel_is_reported() {
    let http = MockHttpClient::new();
    http.reply(204, "");
    http.reply(500, "");

    let board = board(&http, Role::Doctor, 10);
    let outcome = board.cancel(7).await.unwrap();
    assert_eq!(outcome.refresh, Err(ApiError::Server));
}

#[tokio::test]
async fn late_response_from_older_request_is_discarded() {
    let http = MockHttpClient::new();
    let slow = http.defer();
    http.reply(200, page_json(&[appointment(2, AppointmentStatus::Scheduled)]));

    let board = board(&http, Role::Patient, 10);
    let (first, second, _) = futures::join!(board.refresh(), board.refresh(), async move {
        slow.send(ok(page_json(&[appointment(1, AppointmentStatus::Scheduled)])))
            .unwrap();
    });

    assert_eq!(first, Ok(FeedChange::Stale));
    assert_eq!(second, Ok(FeedChange::Applied));
    assert_eq!(ids(&board.snapshot().unwrap()), vec![2]);
}

#[tokio::test]
async fn disposed_feed_discards_results() {
    struct Disposed;

    impl StateCell<AppointmentFeed> for Disposed {
        fn modify<R>(&self, _: impl FnOnce(&mut AppointmentFeed) -> R) -> Option<R> {
            None
        }

        fn read<R>(&self, _: impl FnOnce(&AppointmentFeed) -> R) -> Option<R> {
            None
        }
    }

    let http = MockHttpClient::new();
    let api: TestApi = api(&http, &MemoryStore::new());
    let board = AppointmentBoard::new(RoleAppointments::new(api, Role::Patient), Disposed);

    assert_eq!(board.refresh().await, Ok(FeedChange::Stale));
    assert_eq!(board.load_more().await, Ok(FeedChange::Skipped));
    assert_eq!(http.request_count(), 0);
}
