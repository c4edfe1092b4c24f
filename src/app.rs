//! The application shell.
//!
//! [`AppContext`] is the widget's explicit replacement for a process-wide
//! application object: every collaborator — host page, page-size control,
//! error display — lives in one context constructed at startup and passed
//! down, never reached through a global.
//!
//! [`App`] ties the pieces together: a once-guarded [`start`](App::start)
//! begins route tracking and dispatches the route matching the current
//! path, after which the router drives the controller.
//!
//! # Examples
//!
//! Embedding in a bubbletea-rs host model:
//!
//! ```rust,no_run
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use tasklist_widget::app::App;
//! use tasklist_widget::fetch::TaskListClient;
//!
//! struct Host {
//!     tasklist: App,
//! }
//!
//! impl BubbleTeaModel for Host {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut tasklist = App::new(TaskListClient::new("http://localhost/tasks"));
//!         let cmd = tasklist.start("tasklist/1");
//!         (Self { tasklist }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.tasklist.update(&msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.tasklist.view()
//!     }
//! }
//! ```

use crate::controller::{self, VIEW_TARGET_SELECTOR};
use crate::error;
use crate::fetch::TaskListClient;
use crate::page::Page;
use crate::page_size;
use crate::router::{Route, RouteTable};
use bubbletea_rs::{Cmd, Msg};

/// The collaborators the widget works against.
///
/// Constructed once at startup and handed to the controller with every
/// call; there is no hidden shared state beyond this struct.
#[derive(Debug)]
pub struct AppContext {
    /// The host surface with the widget's regions.
    pub page: Page,
    /// The page-size selector control.
    pub page_size: page_size::Model,
    /// The shared error display.
    pub errors: error::Display,
}

impl AppContext {
    /// Builds a context from explicit parts.
    pub fn new(page: Page, page_size: page_size::Model, errors: error::Display) -> Self {
        Self {
            page,
            page_size,
            errors,
        }
    }

    /// The standard context: one view-target region under
    /// [`VIEW_TARGET_SELECTOR`], default control, empty error display.
    pub fn standard() -> Self {
        Self::new(
            Page::new().with_region(VIEW_TARGET_SELECTOR),
            page_size::Model::new(),
            error::Display::new(),
        )
    }
}

/// The assembled widget: context, controller, and route table.
#[derive(Debug)]
pub struct App {
    ctx: AppContext,
    controller: controller::Model,
    router: RouteTable,
    started: bool,
}

impl App {
    /// Assembles the widget with the standard context and route table.
    pub fn new(client: TaskListClient) -> Self {
        Self {
            ctx: AppContext::standard(),
            controller: controller::Model::new(client),
            router: RouteTable::standard(),
            started: false,
        }
    }

    /// Replaces the context (builder pattern), for hosts whose layout
    /// differs from the standard one.
    pub fn with_context(mut self, ctx: AppContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Whether route tracking has been started.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Starts route tracking and dispatches the route matching `path`.
    ///
    /// Guarded: the first call starts, any later call is a no-op.
    pub fn start(&mut self, path: &str) -> Option<Cmd> {
        if self.started {
            return None;
        }
        self.started = true;
        self.navigate(path)
    }

    /// Dispatches the route matching `path`, if any.
    ///
    /// The index routes wire the widget up without fetching; the
    /// `tasklist/:id` route returns the fetch command for page `id`.
    pub fn navigate(&mut self, path: &str) -> Option<Cmd> {
        match self.router.recognize(path)? {
            Route::Index => {
                self.controller.index(&mut self.ctx);
                None
            }
            Route::TaskList { page } => Some(self.controller.get_tasks(page, &mut self.ctx)),
        }
    }

    /// Feeds one event-loop message through the widget.
    ///
    /// Key presses go to the page-size control first; any change
    /// notifications it fires are dispatched synchronously to the
    /// controller, exactly like a change event bubbling to its listener.
    /// Everything else goes straight to the controller.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        for changed in self.ctx.page_size.update(msg) {
            let notification: Msg = Box::new(changed);
            if let Some(cmd) = self.controller.update(&notification, &mut self.ctx) {
                return Some(cmd);
            }
        }
        self.controller.update(msg, &mut self.ctx)
    }

    /// Renders the widget: the view target's markup, the page-size row,
    /// and the error banner when one is surfaced.
    pub fn view(&self) -> String {
        let mut out = self.controller.view(&self.ctx);
        out.push('\n');
        out.push_str(&self.ctx.page_size.view());
        let banner = self.ctx.errors.view();
        if !banner.is_empty() {
            out.push('\n');
            out.push_str(&banner);
        }
        out
    }

    /// The widget's collaborators.
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Mutable access to the collaborators, for host-driven changes such
    /// as seeding a server-rendered first page.
    pub fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::FETCH_ERROR_MESSAGE;
    use crate::fetch::{FetchError, TasksFetchFailedMsg, TasksHtmlMsg};
    use bubbletea_rs::KeyMsg;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        App::new(TaskListClient::new("http://127.0.0.1:9/tasks"))
    }

    fn press(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::empty(),
        })
    }

    #[test]
    fn test_start_is_guarded() {
        let mut app = app();
        assert!(app.start("").is_none());
        assert!(app.started());
        assert_eq!(app.context().page.resolution_count(), 1);

        // Second start must not re-dispatch.
        assert!(app.start("tasklist/2").is_none());
        assert_eq!(app.context().page.resolution_count(), 1);
    }

    #[test]
    fn test_start_on_tasklist_route_fetches() {
        let mut app = app();
        let cmd = app.start("tasklist/2");
        assert!(cmd.is_some());
    }

    #[test]
    fn test_navigate_unknown_path_is_noop() {
        let mut app = app();
        app.start("");
        assert!(app.navigate("settings").is_none());
    }

    #[test]
    fn test_success_message_reaches_the_view() {
        let mut app = app();
        app.start("");

        let msg: Msg = Box::new(TasksHtmlMsg {
            html: "<ul><li>A</li></ul>".to_string(),
        });
        assert!(app.update(&msg).is_none());
        assert!(app.view().starts_with("<ul><li>A</li></ul>\n"));
    }

    #[test]
    fn test_failure_message_surfaces_banner() {
        let mut app = app();
        app.start("");

        let msg: Msg = Box::new(TasksFetchFailedMsg {
            error: FetchError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE),
        });
        app.update(&msg);
        assert_eq!(
            app.context().errors.last_message(),
            Some(FETCH_ERROR_MESSAGE)
        );
        assert!(app.view().contains(FETCH_ERROR_MESSAGE));
    }

    #[test]
    fn test_page_size_key_triggers_refresh() {
        let mut app = app();
        app.start("");

        // '+' cycles the control, whose change event reaches the bound
        // listener and produces a fetch of page 1.
        let cmd = app.update(&press(KeyCode::Char('+')));
        assert!(cmd.is_some());
        assert_eq!(app.context().page_size.value(), "20");
    }

    #[tokio::test]
    async fn test_change_event_requests_page_one_after_later_page() {
        use crate::fetch::test_server::serve_once;
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let mut app = App::new(TaskListClient::new(format!("http://{}", addr)));
        // Enter on a later page. The initial fetch command is dropped
        // unpolled, so the only request on the wire is the one the
        // change event produces.
        let _ = app.start("tasklist/7");
        let markup: Msg = Box::new(TasksHtmlMsg {
            html: "<ul><li>page 7</li></ul>".to_string(),
        });
        app.update(&markup);

        let server =
            tokio::spawn(async move { serve_once(listener, "200 OK", "<ul><li>A</li></ul>").await });

        // '+' moves the value to "20" and the refresh must start over
        // from page 1, not re-request page 7.
        let cmd = app
            .update(&press(KeyCode::Char('+')))
            .expect("change event should trigger a refresh");
        let reply = cmd.await.unwrap();
        assert!(reply.downcast_ref::<TasksHtmlMsg>().is_some());

        let (_head, body) = server.await.unwrap();
        assert_eq!(body, "tasks_page_nb=1&tasks_per_page=20");
    }

    #[test]
    fn test_key_without_listener_does_not_refresh() {
        let mut app = app();
        // Not started: nothing subscribed yet.
        let cmd = app.update(&press(KeyCode::Char('+')));
        assert!(cmd.is_none());
    }
}
