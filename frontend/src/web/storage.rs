//! LocalStorage 封装模块
//!
//! 通过 `gloo-storage` 取得原始 `web_sys::Storage`，按字符串原样读写，
//! 不做 JSON 编码：`token` / `userRole` 存的就是裸字符串。

use crate::storage::KeyValueStore;
use gloo_storage::{LocalStorage, Storage};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        LocalStorage::raw().set_item(key, value).is_ok()
    }

    fn delete(&self, key: &str) -> bool {
        LocalStorage::raw().remove_item(key).is_ok()
    }
}
