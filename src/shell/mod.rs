//! Router and terminal shell
//!
//! The shell owns the current page, turns commands into view calls, and
//! follows the routes views hand back. Pages are only mounted once the
//! session has finished loading.

mod command;
mod console;
mod context;
mod header;
mod router;

pub use command::{Command, CommandError, Field, HELP};
pub use console::{read_line, stdin_lines, ConsoleConfirm, InputLines};
pub use context::AppContext;
pub use header::render_header;
pub use router::Route;

use crate::services::messages;
use crate::views::{LoginView, Mount, PostForm, PostIndex, PostShow, RegisterView, SubmitOutcome};

/// Redirect hops followed by one navigation before giving up
const MAX_REDIRECTS: usize = 4;

/// The mounted page
pub enum Page {
    Loading,
    Index(PostIndex),
    Show(PostShow),
    Form(PostForm),
    Login(LoginView),
    Register(RegisterView),
}

/// What the command loop does next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Help,
    Quit,
}

pub struct Shell {
    ctx: AppContext,
    route: Route,
    page: Page,
}

impl Shell {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            route: Route::default(),
            page: Page::Loading,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Load the session once, then open the first page
    pub async fn start(&mut self, route: Route) -> Route {
        self.ctx.session.initialize().await;
        self.open(route).await
    }

    /// Navigate, following redirects; returns the route that ended up open
    pub async fn open(&mut self, route: Route) -> Route {
        self.ctx.session.initialize().await;
        self.ctx.session.wait_until_loaded().await;

        if let Page::Form(form) = &self.page {
            form.unmount();
        }
        self.page = Page::Loading;

        let mut target = route;
        for _ in 0..=MAX_REDIRECTS {
            match self.mount(target).await {
                Ok(page) => {
                    tracing::debug!(route = %target, "page mounted");
                    self.route = target;
                    self.page = page;
                    return target;
                }
                Err(next) => {
                    tracing::debug!(from = %target, to = %next, "redirect");
                    target = next;
                }
            }
        }

        tracing::warn!(route = %route, "too many redirects, showing post index");
        self.route = Route::PostIndex;
        self.page = match PostIndex::mount(self.ctx.clone()).await {
            Mount::Ready(view) => Page::Index(view),
            Mount::Redirect(_) => Page::Loading,
        };
        self.route
    }

    async fn mount(&self, route: Route) -> Result<Page, Route> {
        if route.requires_login() && !self.ctx.session.current().is_authenticated() {
            self.ctx.notifier.error(messages::LOGIN_REQUIRED);
            return Err(Route::UserLogin);
        }

        let ctx = self.ctx.clone();
        let page = match route {
            Route::PostIndex => mounted(PostIndex::mount(ctx).await, Page::Index)?,
            Route::PostShow(id) => mounted(PostShow::mount(ctx, id).await, Page::Show)?,
            Route::PostNew => mounted(PostForm::mount_new(ctx).await, Page::Form)?,
            Route::PostEdit(id) => mounted(PostForm::mount_edit(ctx, id).await, Page::Form)?,
            Route::UserLogin => mounted(LoginView::mount(ctx).await, Page::Login)?,
            Route::UserRegister => mounted(RegisterView::mount(ctx).await, Page::Register)?,
        };
        Ok(page)
    }

    async fn follow(&mut self, next: Option<Route>) {
        if let Some(route) = next {
            self.open(route).await;
        }
    }

    async fn after_submit(&mut self, outcome: SubmitOutcome) {
        if let SubmitOutcome::Navigate(route) = outcome {
            self.open(route).await;
        }
    }

    fn unavailable(&self, message: &str) {
        self.ctx.notifier.error(message);
    }

    /// Run one command against the current page
    pub async fn execute(&mut self, command: Command) -> Flow {
        match command {
            Command::Open(route) => {
                self.open(route).await;
            }
            Command::Show(id) => {
                let next = match &self.page {
                    Page::Index(view) => view.show(id).unwrap_or(Route::PostShow(id)),
                    _ => Route::PostShow(id),
                };
                self.open(next).await;
            }
            Command::Edit(id) => {
                let next = match &self.page {
                    Page::Index(view) => view.edit(id),
                    Page::Show(view) if view.post().id == id => view.edit(),
                    _ => Some(Route::PostEdit(id)),
                };
                self.follow(next).await;
            }
            Command::Delete(id) => match &self.page {
                Page::Index(view) => {
                    if view.delete(id).await.is_none() {
                        self.ctx.notifier.error(messages::POST_NOT_FOUND);
                    }
                }
                Page::Show(view) if view.post().id == id => {
                    let (_, next) = view.delete().await;
                    self.follow(next).await;
                }
                _ => self.unavailable(messages::NO_ACTION_ON_PAGE),
            },
            Command::New => {
                self.open(Route::PostNew).await;
            }
            Command::Set(field, value) => self.set(field, value),
            Command::Image => match &self.page {
                Page::Form(form) => {
                    form.reroll_image().await;
                }
                _ => self.unavailable(messages::NO_ACTION_ON_PAGE),
            },
            Command::Submit => {
                let outcome = match &self.page {
                    Page::Form(form) => form.submit().await,
                    Page::Login(view) => view.submit().await,
                    Page::Register(view) => view.submit().await,
                    _ => {
                        self.unavailable(messages::NO_ACTION_ON_PAGE);
                        return Flow::Continue;
                    }
                };
                self.after_submit(outcome).await;
            }
            Command::Refresh => match &self.page {
                Page::Index(view) => view.refresh().await,
                _ => {
                    self.open(self.route).await;
                }
            },
            Command::Logout => {
                if self.ctx.session.logout().await {
                    self.open(Route::PostIndex).await;
                }
            }
            Command::Help => return Flow::Help,
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn set(&self, field: Field, value: String) {
        let applied = match (&self.page, field) {
            (Page::Form(form), Field::Title) => Some(form.set_title(value)),
            (Page::Form(form), Field::Content) => Some(form.set_content(value)),
            (Page::Form(form), Field::Age) => Some(form.set_age(value.parse().ok())),
            (Page::Login(view), Field::Email) => {
                view.set_email(value);
                Some(true)
            }
            (Page::Login(view), Field::Password) => {
                view.set_password(value);
                Some(true)
            }
            (Page::Register(view), Field::UserName) => {
                view.set_user_name(value);
                Some(true)
            }
            (Page::Register(view), Field::Email) => {
                view.set_email(value);
                Some(true)
            }
            (Page::Register(view), Field::Password) => {
                view.set_password(value);
                Some(true)
            }
            _ => None,
        };

        match applied {
            None => self.unavailable(messages::NO_FORM_ON_PAGE),
            Some(false) => tracing::debug!(?field, "form busy, edit ignored"),
            Some(true) => {}
        }
    }

    /// Header plus the current page; a neutral placeholder while loading
    pub fn render(&self) -> String {
        let session = self.ctx.session.current();
        let body = if session.is_loading() {
            "Loading...\n".to_string()
        } else {
            match &self.page {
                Page::Loading => "Loading...\n".to_string(),
                Page::Index(view) => view.render(),
                Page::Show(view) => view.render(),
                Page::Form(form) => form.render(),
                Page::Login(view) => view.render(),
                Page::Register(view) => view.render(),
            }
        };
        format!("{}\n{}\n{}", render_header(&session), self.route.path(), body)
    }
}

fn mounted<T>(mount: Mount<T>, page: fn(T) -> Page) -> Result<Page, Route> {
    match mount {
        Mount::Ready(view) => Ok(page(view)),
        Mount::Redirect(route) => Err(route),
    }
}
