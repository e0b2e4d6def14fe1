//! Host runtime seam: the active tab and cross-context messaging.
//!
//! The popup never touches a document directly. It asks the [`Browser`] for
//! the active tab and sends it a [`RuntimeMessage`]; the page side answers
//! through [`page::handle_message`].

pub mod native;
pub mod page;

pub use native::{NativeTab, PageSource};

use async_trait::async_trait;
use sendarr_common::{PageResponse, Result, RuntimeMessage};

/// A browser tab as seen by the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: u32,
    pub url: Option<String>,
}

#[async_trait]
pub trait Browser: Send + Sync {
    /// The focused tab of the current window, if any.
    async fn active_tab(&self) -> Result<Option<Tab>>;

    /// Deliver `message` to the page loaded in `tab_id` and wait for its
    /// answer. Delivery failures surface as messaging errors.
    async fn send_to_tab(&self, tab_id: u32, message: RuntimeMessage) -> Result<PageResponse>;
}
