#![warn(missing_docs)]

//! # tasklist-widget
//!
//! A paginated task-list widget for [bubbletea-rs](https://github.com/joshka/bubbletea-rs):
//! it fetches server-rendered HTML fragments over HTTP and swaps them into
//! a view region, re-wiring a page-size selector after every swap.
//!
//! ## Overview
//!
//! The widget is the client half of a server-rendered list. The server
//! owns querying and templating; the widget owns when to fetch and where
//! the result goes:
//!
//! - [`router`] recognizes the empty path and `index` (wire up, no fetch)
//!   and `tasklist/:id` (fetch page `id`) against an explicit ordered
//!   route table.
//! - [`controller`] resolves its view target once, keeps exactly one
//!   page-size listener bound, and turns routes and change events into
//!   fetch commands.
//! - [`fetch`] POSTs `tasks_page_nb` / `tasks_per_page` as a form body
//!   against `?action=tasks_html` and delivers the outcome as a message.
//! - [`page`], [`page_size`], and [`error`] are the widget's rendition of
//!   its host-page collaborators: the replaceable view region, the
//!   items-per-page select, and the shared error banner.
//! - [`app`] assembles everything behind an explicit context object and a
//!   once-guarded start.
//!
//! Every component follows the Elm Architecture: state in a `Model`,
//! messages consumed by `update`, output rendered by `view`, and async
//! work expressed as `Cmd` futures the host runtime resolves. The only
//! suspension point is the list fetch; overlapping refreshes are not
//! coordinated, and the last response to arrive wins the view target.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tasklist_widget::prelude::*;
//!
//! let mut widget = App::new(TaskListClient::new("http://localhost/tasks"));
//!
//! // Begin route tracking; "tasklist/3" fetches page 3 straight away.
//! let cmd = widget.start("tasklist/3");
//! // Hand `cmd` to the bubbletea-rs runtime and feed messages back
//! // through `widget.update(&msg)`.
//! ```
//!
//! ## Failure semantics
//!
//! A fetch gets exactly one attempt. On failure the widget surfaces one
//! fixed, localized message through the shared error display and leaves
//! the view target untouched; nothing is retried or logged.

pub mod app;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod key;
pub mod page;
pub mod page_size;
pub mod router;

/// Convenient re-exports of the widget's main types.
pub mod prelude {
    pub use crate::app::{App, AppContext};
    pub use crate::controller::{Model as Controller, FETCH_ERROR_MESSAGE, VIEW_TARGET_SELECTOR};
    pub use crate::error::Display as ErrorDisplay;
    pub use crate::fetch::{
        FetchError, PageRequest, TaskListClient, TasksFetchFailedMsg, TasksHtmlMsg,
    };
    pub use crate::key::Binding;
    pub use crate::page::{Page, RegionHandle};
    pub use crate::page_size::{
        ChangedMsg as PageSizeChangedMsg, Model as PageSizeControl, Subscription,
    };
    pub use crate::router::{Route, RouteTable};
}
