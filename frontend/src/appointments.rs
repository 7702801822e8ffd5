//! 预约列表数据流
//!
//! `AppointmentFeed` 是纯状态机：分页、追加、刷新、按状态划分。
//! `AppointmentBoard` 把它与 `AppointmentSource`（患者或医生的列表接口）连接起来。
//!
//! 每次请求都会领取一个单调递增的票据，只有最新票据对应的响应会被应用，
//! 先发后至的旧响应被确定性地丢弃。

use crate::api::RamyroApi;
use crate::request::HttpClient;
use crate::state::StateCell;
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use ramyro_shared::{ApiError, ApiResult, Appointment, Role};
use tracing::{debug, warn};

// =========================================================
// 状态机 (Feed State Machine)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Refresh,
    LoadMore,
}

/// 一次列表请求的票据
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    page: u32,
    kind: FetchKind,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// 应用响应后的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedChange {
    /// 响应已写入列表
    Applied,
    /// 已有更新的请求发出，或所属视图已卸载，响应被丢弃
    Stale,
    /// 没有发出请求（没有更多数据，或已有请求在进行中）
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentFeed {
    items: Vec<Appointment>,
    page: u32,
    page_size: u32,
    has_more: bool,
    latest: u64,
    loading: bool,
}

impl AppointmentFeed {
    pub fn new(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            page_size: page_size.max(1),
            has_more: true,
            latest: 0,
            loading: false,
        }
    }

    pub fn items(&self) -> &[Appointment] {
        &self.items
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 待进行的预约（状态为 Scheduled）
    pub fn upcoming(&self) -> impl Iterator<Item = &Appointment> {
        self.items.iter().filter(|a| a.status.is_scheduled())
    }

    /// 历史预约（其余所有状态，包括未知状态）
    pub fn past(&self) -> impl Iterator<Item = &Appointment> {
        self.items.iter().filter(|a| !a.status.is_scheduled())
    }

    fn issue(&mut self, page: u32, kind: FetchKind) -> FetchTicket {
        self.latest += 1;
        self.loading = true;
        FetchTicket {
            seq: self.latest,
            page,
            kind,
        }
    }

    /// 开始刷新：总是请求第一页，并使之前发出的请求全部失效
    pub fn begin_refresh(&mut self) -> FetchTicket {
        self.issue(1, FetchKind::Refresh)
    }

    /// 开始加载下一页；没有更多数据或已有请求在进行中时返回 None
    pub fn begin_load_more(&mut self) -> Option<FetchTicket> {
        if !self.has_more || self.loading {
            return None;
        }
        Some(self.issue(self.page + 1, FetchKind::LoadMore))
    }

    pub fn apply(&mut self, ticket: FetchTicket, page: Vec<Appointment>) -> FeedChange {
        if ticket.seq != self.latest {
            return FeedChange::Stale;
        }
        self.loading = false;

        match ticket.kind {
            FetchKind::Refresh => {
                self.items = page;
                self.page = 1;
                self.has_more = true;
            }
            FetchKind::LoadMore if page.is_empty() => {
                self.has_more = false;
            }
            FetchKind::LoadMore => {
                self.items.extend(page);
                self.page = ticket.page;
            }
        }
        FeedChange::Applied
    }

    /// 请求失败：列表保持不变
    pub fn fail(&mut self, ticket: FetchTicket) -> FeedChange {
        if ticket.seq != self.latest {
            return FeedChange::Stale;
        }
        self.loading = false;
        FeedChange::Applied
    }
}

// =========================================================
// 数据源 (Appointment Source)
// =========================================================

#[async_trait(?Send)]
pub trait AppointmentSource {
    async fn fetch_page(&self, page: u32, page_size: u32) -> ApiResult<Vec<Appointment>>;
    async fn cancel(&self, id: i64) -> ApiResult<()>;
}

/// 按角色选择列表接口的数据源
#[derive(Clone)]
pub struct RoleAppointments<C, S> {
    api: RamyroApi<C, S>,
    role: Role,
}

impl<C, S> RoleAppointments<C, S> {
    pub fn new(api: RamyroApi<C, S>, role: Role) -> Self {
        Self { api, role }
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

#[async_trait(?Send)]
impl<C: HttpClient, S: KeyValueStore> AppointmentSource for RoleAppointments<C, S> {
    async fn fetch_page(&self, page: u32, page_size: u32) -> ApiResult<Vec<Appointment>> {
        self.api.list_appointments(self.role, page, page_size).await
    }

    async fn cancel(&self, id: i64) -> ApiResult<()> {
        self.api.cancel_appointment(id).await
    }
}

// =========================================================
// 驱动 (Async Drivers)
// =========================================================

/// 取消成功后的结果：取消本身已生效，随后的刷新可能成功也可能失败
#[derive(Debug, Clone, PartialEq)]
pub struct Cancelled {
    pub refresh: ApiResult<FeedChange>,
}

#[derive(Clone)]
pub struct AppointmentBoard<Src, Cell> {
    source: Src,
    feed: Cell,
}

impl<Src, Cell> AppointmentBoard<Src, Cell>
where
    Src: AppointmentSource,
    Cell: StateCell<AppointmentFeed>,
{
    pub fn new(source: Src, feed: Cell) -> Self {
        Self { source, feed }
    }

    pub fn feed(&self) -> &Cell {
        &self.feed
    }

    pub fn snapshot(&self) -> Option<AppointmentFeed> {
        self.feed.read(|f| f.clone())
    }

    async fn run(&self, ticket: FetchTicket, page_size: u32) -> ApiResult<FeedChange> {
        debug!(page = ticket.page, "fetching appointments");
        match self.source.fetch_page(ticket.page, page_size).await {
            Ok(items) => Ok(self
                .feed
                .modify(|f| f.apply(ticket, items))
                .unwrap_or(FeedChange::Stale)),
            Err(e) => {
                warn!(page = ticket.page, error = ?e, "failed to fetch appointments");
                self.feed.modify(|f| f.fail(ticket));
                Err(e)
            }
        }
    }

    /// 重新加载第一页，替换整个列表
    pub async fn refresh(&self) -> ApiResult<FeedChange> {
        let Some((ticket, size)) = self.feed.modify(|f| (f.begin_refresh(), f.page_size())) else {
            return Ok(FeedChange::Stale);
        };
        self.run(ticket, size).await
    }

    /// 加载下一页并追加
    pub async fn load_more(&self) -> ApiResult<FeedChange> {
        let next = self
            .feed
            .modify(|f| f.begin_load_more().map(|t| (t, f.page_size())))
            .flatten();
        match next {
            Some((ticket, size)) => self.run(ticket, size).await,
            None => Ok(FeedChange::Skipped),
        }
    }

    /// 取消预约；成功后执行一次完整刷新（分页进度被丢弃）
    ///
    /// 取消失败时列表不变。
    pub async fn cancel(&self, id: i64) -> Result<Cancelled, ApiError> {
        self.source.cancel(id).await.map_err(|e| {
            warn!(id, error = ?e, "failed to cancel appointment");
            e
        })?;
        debug!(id, "appointment cancelled, refreshing");
        Ok(Cancelled {
            refresh: self.refresh().await,
        })
    }
}

#[cfg(test)]
mod tests;
