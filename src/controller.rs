//! The widget's controller.
//!
//! The controller owns the refresh contract: it resolves its view target
//! once, keeps exactly one page-size listener bound, turns route entries
//! into fetches, and swaps server-rendered markup into the view target
//! when a fetch lands. It never blocks; a refresh hands back a
//! [`bubbletea_rs::Cmd`] and the outcome arrives later through
//! [`update`](Model::update).
//!
//! Failure handling is deliberately blunt: any fetch failure surfaces one
//! fixed, localized message through the shared error display, and that
//! refresh is over. No retry, no escalation, no distinction between a
//! dead network and a 500.
//!
//! # Examples
//!
//! ```rust
//! use tasklist_widget::app::AppContext;
//! use tasklist_widget::controller::Model;
//! use tasklist_widget::fetch::TaskListClient;
//!
//! let mut ctx = AppContext::standard();
//! let mut controller = Model::new(TaskListClient::new("http://localhost/tasks"));
//!
//! // The empty route: wire up, fetch nothing.
//! controller.index(&mut ctx);
//! assert!(controller.initialized());
//! ```

use crate::app::AppContext;
use crate::fetch::{PageRequest, TaskListClient, TasksFetchFailedMsg, TasksHtmlMsg};
use crate::page::RegionHandle;
use crate::page_size::{ChangedMsg, Subscription};
use bubbletea_rs::{Cmd, Msg};

/// Selector of the region the task list is rendered into.
pub const VIEW_TARGET_SELECTOR: &str = "tasklist_container";

/// The message surfaced to the user when a list fetch fails.
pub const FETCH_ERROR_MESSAGE: &str =
    "Une erreur a été rencontrée lors de la récupération des dernières activités";

/// The task-list controller.
#[derive(Debug)]
pub struct Model {
    initialized: bool,
    selector: String,
    view_target: Option<RegionHandle>,
    page_size_listener: Option<Subscription>,
    client: TaskListClient,
}

impl Model {
    /// Creates a controller fetching through `client`, targeting the
    /// standard [`VIEW_TARGET_SELECTOR`] region.
    pub fn new(client: TaskListClient) -> Self {
        Self {
            initialized: false,
            selector: VIEW_TARGET_SELECTOR.to_string(),
            view_target: None,
            page_size_listener: None,
            client,
        }
    }

    /// Overrides the view-target selector (builder pattern).
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    /// Whether [`initialize`](Self::initialize) has run.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    /// Idempotent setup: resolves and caches the view-target handle.
    ///
    /// Only the first call resolves; later calls are no-ops and leave
    /// the cached handle untouched. A selector with no matching region
    /// caches nothing, and content swaps become silent no-ops.
    pub fn initialize(&mut self, ctx: &mut AppContext) {
        if self.initialized {
            return;
        }
        self.view_target = ctx.page.resolve(&self.selector);
        self.initialized = true;
    }

    /// (Re)binds the page-size change listener.
    ///
    /// Any previous registration is cancelled first, so at most one
    /// listener is live no matter how often markup swaps force a rebind.
    pub fn bind_page_size_listener(&mut self, ctx: &mut AppContext) {
        if let Some(subscription) = self.page_size_listener.take() {
            ctx.page_size.unsubscribe(subscription);
        }
        self.page_size_listener = Some(ctx.page_size.subscribe());
    }

    /// Entry point for the empty and `index` routes.
    ///
    /// Wires the widget up without fetching anything; the server has
    /// already rendered the first page into the document.
    pub fn index(&mut self, ctx: &mut AppContext) {
        self.initialize(ctx);
        self.bind_page_size_listener(ctx);
    }

    /// Entry point for the `tasklist/:id` route.
    ///
    /// The route's `id` segment is the page number and is forwarded
    /// untouched into the refresh.
    pub fn get_tasks(&mut self, id: u64, ctx: &mut AppContext) -> Cmd {
        self.initialize(ctx);
        self.refresh_list(id, ctx)
    }

    /// Builds the request parameters for a refresh of `page_num`.
    ///
    /// The per-page value is read from the page-size control at call
    /// time, as-is.
    pub fn page_request(&self, page_num: u64, ctx: &AppContext) -> PageRequest {
        PageRequest::new(page_num, ctx.page_size.value())
    }

    /// Issues one fetch for `page_num`.
    ///
    /// Returns immediately; the response arrives as a [`TasksHtmlMsg`] or
    /// [`TasksFetchFailedMsg`] through [`update`](Self::update). Nothing
    /// coordinates overlapping refreshes: if two are in flight, the last
    /// response to arrive wins the view target.
    pub fn refresh_list(&mut self, page_num: u64, ctx: &mut AppContext) -> Cmd {
        let request = self.page_request(page_num, ctx);
        self.client.fetch(request)
    }

    /// Swaps `html` into the view target verbatim and rebinds the
    /// page-size listener.
    ///
    /// The rebind matters: the injected markup may carry a fresh
    /// page-size control of its own, and the old registration must not
    /// linger next to a new one.
    pub fn display_list(&mut self, html: impl Into<String>, ctx: &mut AppContext) {
        if let Some(handle) = &self.view_target {
            ctx.page.replace_html(handle, html);
        }
        self.bind_page_size_listener(ctx);
    }

    /// Routes the messages this controller reacts to.
    ///
    /// - [`TasksHtmlMsg`]: swap the markup in, rebind the listener.
    /// - [`TasksFetchFailedMsg`]: surface [`FETCH_ERROR_MESSAGE`]; the
    ///   view target keeps whatever it was showing.
    /// - [`ChangedMsg`] carrying the live subscription id: refresh back
    ///   to page 1. Notifications from a cancelled registration are
    ///   ignored.
    pub fn update(&mut self, msg: &Msg, ctx: &mut AppContext) -> Option<Cmd> {
        if let Some(html_msg) = msg.downcast_ref::<TasksHtmlMsg>() {
            self.display_list(html_msg.html.clone(), ctx);
            return None;
        }
        if msg.downcast_ref::<TasksFetchFailedMsg>().is_some() {
            ctx.errors.display_server_error(FETCH_ERROR_MESSAGE);
            return None;
        }
        if let Some(changed) = msg.downcast_ref::<ChangedMsg>() {
            let live = self.page_size_listener.as_ref().map(Subscription::id);
            if live == Some(changed.subscription) {
                // A new page size always restarts from the first page.
                return Some(self.get_tasks(1, ctx));
            }
        }
        None
    }

    /// Renders the view target's current content.
    pub fn view(&self, ctx: &AppContext) -> String {
        match &self.view_target {
            Some(handle) => ctx.page.html(handle).to_string(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;

    fn controller() -> Model {
        Model::new(TaskListClient::new("http://127.0.0.1:9/tasks"))
    }

    fn boxed<M: Send + 'static>(msg: M) -> Msg {
        Box::new(msg)
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut ctx = AppContext::standard();
        let mut c = controller();

        c.initialize(&mut ctx);
        assert!(c.initialized());
        assert_eq!(ctx.page.resolution_count(), 1);

        c.initialize(&mut ctx);
        assert!(c.initialized());
        // The second call must not re-resolve the view target.
        assert_eq!(ctx.page.resolution_count(), 1);
    }

    #[test]
    fn test_index_binds_listener_without_fetching() {
        let mut ctx = AppContext::standard();
        let mut c = controller();

        c.index(&mut ctx);
        assert!(c.initialized());
        assert_eq!(ctx.page_size.subscriber_count(), 1);
    }

    #[test]
    fn test_rebinding_keeps_a_single_listener() {
        let mut ctx = AppContext::standard();
        let mut c = controller();

        for _ in 0..4 {
            c.bind_page_size_listener(&mut ctx);
        }
        assert_eq!(ctx.page_size.subscriber_count(), 1);
        assert_eq!(ctx.page_size.fire_change().len(), 1);
    }

    #[test]
    fn test_page_request_reads_control_value_at_call_time() {
        let mut ctx = AppContext::standard();
        ctx.page_size.set_value("20");
        let c = controller();

        assert_eq!(c.page_request(3, &ctx), PageRequest::new(3, "20"));
    }

    #[test]
    fn test_successful_fetch_swaps_markup_and_rebinds() {
        let mut ctx = AppContext::standard();
        let mut c = controller();
        c.index(&mut ctx);
        let old_id = ctx.page_size.fire_change()[0].subscription;

        let cmd = c.update(&boxed(TasksHtmlMsg {
            html: "<ul><li>A</li></ul>".to_string(),
        }), &mut ctx);
        assert!(cmd.is_none());
        assert_eq!(c.view(&ctx), "<ul><li>A</li></ul>");

        // The listener was rebound: still exactly one, with a new id.
        let fired = ctx.page_size.fire_change();
        assert_eq!(fired.len(), 1);
        assert_ne!(fired[0].subscription, old_id);
    }

    #[test]
    fn test_failed_fetch_reports_and_leaves_view_alone() {
        let mut ctx = AppContext::standard();
        let mut c = controller();
        c.index(&mut ctx);
        c.display_list("<p>previous</p>", &mut ctx);

        let cmd = c.update(&boxed(TasksFetchFailedMsg {
            error: FetchError::Status(reqwest::StatusCode::BAD_GATEWAY),
        }), &mut ctx);
        assert!(cmd.is_none());
        assert_eq!(c.view(&ctx), "<p>previous</p>");
        assert_eq!(ctx.errors.last_message(), Some(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn test_live_change_notification_refreshes_to_page_one() {
        let mut ctx = AppContext::standard();
        let mut c = controller();
        c.index(&mut ctx);

        let fired = {
            ctx.page_size.set_value("50");
            ctx.page_size.fire_change()
        };
        let cmd = c.update(&boxed(fired.into_iter().next().unwrap()), &mut ctx);
        assert!(cmd.is_some());
    }

    #[test]
    fn test_stale_change_notification_is_ignored() {
        let mut ctx = AppContext::standard();
        let mut c = controller();
        c.index(&mut ctx);

        // Capture a notification, then rebind so its id goes stale.
        let stale = ctx.page_size.fire_change().remove(0);
        c.bind_page_size_listener(&mut ctx);

        let cmd = c.update(&boxed(stale), &mut ctx);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_unresolvable_selector_swaps_silently() {
        let mut ctx = AppContext::standard();
        let mut c = controller().with_selector("missing_region");
        c.index(&mut ctx);

        c.display_list("<p>lost</p>", &mut ctx);
        assert_eq!(c.view(&ctx), "");
        assert!(ctx.errors.last_message().is_none());
    }
}
