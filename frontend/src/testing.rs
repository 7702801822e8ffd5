//! 测试用的内存存储与脚本化 HTTP 客户端

use crate::api::RamyroApi;
use crate::request::{HttpClient, HttpError, HttpRequest, HttpResponse};
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use futures::channel::oneshot;
use ramyro_shared::{Appointment, AppointmentStatus};
use serde::Serialize;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

pub const BASE_URL: &str = "http://api.test";

// =========================================================
// MemoryStore
// =========================================================

#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
    /// 模拟存储配额已满：写入一律失败
    reject_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with(entries: &[(&str, &str)]) -> Rc<Self> {
        let store = Self::default();
        for (k, v) in entries {
            store.set(k, v);
        }
        Rc::new(store)
    }

    pub fn rejecting_writes() -> Rc<Self> {
        let store = Self::default();
        store.reject_writes.set(true);
        Rc::new(store)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if self.reject_writes.get() {
            return false;
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.items.borrow_mut().remove(key);
        true
    }
}

// =========================================================
// MockHttpClient
// =========================================================

type Reply = Result<HttpResponse, HttpError>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// 按入队顺序返回预设响应，并记录收到的全部请求
#[derive(Default)]
pub struct MockHttpClient {
    replies: RefCell<VecDeque<Scripted>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl MockHttpClient {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: impl Into<String>) {
        self.replies
            .borrow_mut()
            .push_back(Scripted::Ready(Ok(HttpResponse {
                status,
                body: body.into(),
            })));
    }

    pub fn reply_json<T: Serialize>(&self, status: u16, value: &T) {
        self.reply(status, serde_json::to_string(value).unwrap());
    }

    pub fn fail(&self, err: HttpError) {
        self.replies.borrow_mut().push_back(Scripted::Ready(Err(err)));
    }

    /// 预留一个稍后才完成的响应，用于模拟乱序返回
    pub fn defer(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

#[async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.requests.borrow_mut().push(req);
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(HttpError::NetworkError("reply dropped".into()))),
            None => Err(HttpError::NetworkError("no scripted reply".into())),
        }
    }
}

// =========================================================
// Fixtures
// =========================================================

pub type TestApi = RamyroApi<Rc<MockHttpClient>, Rc<MemoryStore>>;

pub fn api(http: &Rc<MockHttpClient>, store: &Rc<MemoryStore>) -> TestApi {
    RamyroApi::new(BASE_URL, http.clone(), store.clone())
}

pub fn ok(body: impl Into<String>) -> Reply {
    Ok(HttpResponse {
        status: 200,
        body: body.into(),
    })
}

pub fn appointment(id: i64, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        doctor_id: 7,
        doctor_name: "Gregory House".into(),
        patient_id: 3,
        patient_name: "Jane Roe".into(),
        appointment_date: "2026-11-02T09:30:00".into(),
        reason: format!("visit #{}", id),
        status,
    }
}

pub fn page_json(appointments: &[Appointment]) -> String {
    serde_json::to_string(appointments).unwrap()
}
