//! 状态容器抽象
//!
//! 核心逻辑（会话、预约列表）只通过 `StateCell` 读写状态：
//! 应用中由响应式信号承载，测试中由 `RefCell` 承载，核心因此可以脱离渲染环境测试。

use leptos::prelude::{RwSignal, Update, WithUntracked};
use std::cell::RefCell;

pub trait StateCell<T> {
    /// 修改状态；状态已失效（所属视图已卸载）时返回 None
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;

    /// 读取状态；状态已失效时返回 None
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
}

impl<T> StateCell<T> for RefCell<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<T> {
    fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Update::try_update(self, f)
    }

    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        WithUntracked::try_with_untracked(self, f)
    }
}
