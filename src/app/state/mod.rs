//! Central application state shared across egui views.
//!
//! Requests run on the state's tokio runtime. Each finished request is sent
//! back as an [`AppEvent`] and applied on the UI thread by
//! [`AppState::poll_events`], once per frame.

use std::future::Future;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::app::config::Config;
use crate::app::forms::{LoginForm, PostForm, RegisterForm};
use crate::app::pages::{EditProfilePage, HomePage, SubmitOutcome, UserPage, UserPageData};
use crate::app::routes::{guard, Navigation, Route};
use crate::app::sequencer::Ticket;
use crate::app::services::Services;
use crate::app::session::{Session, SessionStore};
use crate::app::token_store::TokenStore;
use crate::app::upload::ImageUpload;
use crate::shared::error::ApiError;
use crate::shared::models::{Post, PostId, TokenResponse, User, UserProfile, UserRef};

/// Which form a picked image file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTarget {
    NewPost,
    ProfilePhoto,
}

/// A finished background request.
#[derive(Debug)]
pub enum AppEvent {
    SessionRestored(Result<UserProfile, ApiError>),
    TokenIssued(Result<TokenResponse, ApiError>),
    LoginResolved(Result<UserProfile, ApiError>),
    Registered(Result<User, ApiError>),
    HomeLoaded(Ticket, Result<Vec<Post>, ApiError>),
    UserPageLoaded(Ticket, Result<UserPageData, ApiError>),
    PostDeleted(PostId, Result<(), ApiError>),
    ShowcaseToggled(Ticket, Result<Post, ApiError>),
    PostCreated(Result<Post, ApiError>),
    ProfileLoaded(Ticket, Result<UserProfile, ApiError>),
    ProfileUpdated(Ticket, Result<UserProfile, ApiError>),
    ImageRead(ImageTarget, Result<ImageUpload, String>),
}

pub struct AppState {
    pub config: Config,
    runtime: Runtime,
    services: Services,
    session: SessionStore,
    route: Route,
    /// Protected route waiting for the session to resolve
    pending_route: Option<Route>,
    pub home: HomePage,
    pub user_page: Option<UserPage>,
    pub edit_profile: EditProfilePage,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub post_form: PostForm,
    pub post_image_path: String,
    pub profile_image_path: String,
    pub image_error: Option<String>,
    events_tx: Sender<AppEvent>,
    events_rx: Receiver<AppEvent>,
}

impl AppState {
    pub fn new(config: Config, tokens: Arc<dyn TokenStore>) -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("glaze-io")
            .enable_all()
            .build()?;
        let (services, session) = Services::connect(config.clone(), tokens);
        let (events_tx, events_rx) = channel();

        let mut state = Self {
            home: HomePage::new(config.homepage_limit()),
            config,
            runtime,
            services,
            session,
            route: Route::Home,
            pending_route: None,
            user_page: None,
            edit_profile: EditProfilePage::new(),
            login_form: LoginForm::new(),
            register_form: RegisterForm::new(),
            post_form: PostForm::new(),
            post_image_path: String::new(),
            profile_image_path: String::new(),
            image_error: None,
            events_tx,
            events_rx,
        };
        state.restore_session();
        state.navigate(Route::Home);
        Ok(state)
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// The route shown while the session is still resolving, if any.
    pub fn pending_route(&self) -> Option<Route> {
        self.pending_route
    }

    pub fn session(&self) -> &Session {
        self.session.session()
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = AppEvent> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(task.await);
        });
    }

    fn restore_session(&mut self) {
        if self.session.begin_restore() {
            let users = self.services.users.clone();
            self.spawn(async move { AppEvent::SessionRestored(users.get_current_profile().await) });
        }
    }

    /// Guard and enter a route. Protected routes wait while the session is
    /// still resolving.
    pub fn navigate(&mut self, route: Route) {
        match guard(route, self.session.session()) {
            Navigation::Render(route) => {
                self.pending_route = None;
                self.enter(route);
            }
            Navigation::Redirect(target) => {
                self.pending_route = None;
                self.enter(target);
            }
            Navigation::Pending => {
                self.pending_route = Some(route);
            }
        }
    }

    fn enter(&mut self, route: Route) {
        tracing::debug!("Entering {}", route.path());
        self.route = route;
        match route {
            Route::Home => self.load_home(),
            Route::User(user) => self.load_user_page(user),
            Route::EditProfile => self.load_edit_profile(),
            Route::CreatePost => {
                self.post_form = PostForm::new();
                self.post_image_path.clear();
                self.image_error = None;
            }
            Route::Login | Route::Register => {}
        }
    }

    pub fn load_home(&mut self) {
        let ticket = self.home.begin_load();
        let posts = self.services.posts.clone();
        let limit = self.home.limit();
        self.spawn(async move { AppEvent::HomeLoaded(ticket, posts.list_homepage(limit).await) });
    }

    pub fn load_user_page(&mut self, user: UserRef) {
        let mut page = UserPage::new(user, self.session.session().user());
        if let Some((ticket, user_id)) = page.begin_load() {
            let users = self.services.users.clone();
            let posts = self.services.posts.clone();
            self.spawn(async move {
                let result = UserPage::fetch(&users, &posts, user_id).await;
                AppEvent::UserPageLoaded(ticket, result)
            });
        }
        self.user_page = Some(page);
    }

    fn load_edit_profile(&mut self) {
        self.edit_profile = EditProfilePage::new();
        self.profile_image_path.clear();
        self.image_error = None;
        let ticket = self.edit_profile.begin_load();
        let users = self.services.users.clone();
        self.spawn(async move { AppEvent::ProfileLoaded(ticket, users.get_current_profile().await) });
    }

    pub fn submit_login(&mut self) {
        if let Some((email, password)) = self.login_form.begin_submit() {
            let auth = self.services.auth.clone();
            self.spawn(async move { AppEvent::TokenIssued(auth.login(&email, &password).await) });
        }
    }

    pub fn submit_register(&mut self) {
        if let Some((email, password)) = self.register_form.begin_submit() {
            let auth = self.services.auth.clone();
            self.spawn(async move { AppEvent::Registered(auth.register(&email, &password).await) });
        }
    }

    pub fn submit_post(&mut self) {
        if let Some(new_post) = self.post_form.begin_submit() {
            let posts = self.services.posts.clone();
            self.spawn(async move { AppEvent::PostCreated(posts.create(new_post).await) });
        }
    }

    pub fn submit_profile(&mut self) {
        if let SubmitOutcome::Send(ticket, update) = self.edit_profile.begin_submit() {
            let users = self.services.users.clone();
            self.spawn(async move { AppEvent::ProfileUpdated(ticket, users.update_profile(update).await) });
        }
    }

    /// Read an image file from disk for one of the forms.
    pub fn pick_image(&mut self, target: ImageTarget, path: String) {
        self.image_error = None;
        if path.trim().is_empty() {
            return;
        }
        self.spawn(async move {
            let result = ImageUpload::from_path(path.trim())
                .await
                .map_err(|e| format!("Could not read {}: {}", path.trim(), e));
            AppEvent::ImageRead(target, result)
        });
    }

    pub fn confirm_delete(&mut self) {
        let Some(post_id) = self.user_page.as_mut().and_then(UserPage::confirm_delete) else {
            return;
        };
        let posts = self.services.posts.clone();
        self.spawn(async move { AppEvent::PostDeleted(post_id, posts.remove(post_id).await) });
    }

    pub fn toggle_showcase(&mut self, post_id: PostId) {
        let Some(request) = self
            .user_page
            .as_mut()
            .and_then(|page| page.begin_toggle_showcase(post_id))
        else {
            return;
        };
        let posts = self.services.posts.clone();
        self.spawn(async move {
            let result = request.send(&posts).await;
            AppEvent::ShowcaseToggled(request.ticket, result)
        });
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.login_form = LoginForm::new();
        self.user_page = None;
        self.edit_profile = EditProfilePage::new();
        self.navigate(Route::Login);
    }

    /// Apply every finished request. Called once per frame.
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::SessionRestored(result) => {
                self.session.finish_restore(result);
                match (self.pending_route.take(), self.route) {
                    (Some(route), _) => self.navigate(route),
                    // ownership controls depend on who is signed in
                    (None, Route::User(user)) => self.load_user_page(user),
                    (None, _) => {}
                }
            }
            AppEvent::TokenIssued(Ok(token)) => match self.session.begin_login(&token.access_token) {
                Ok(()) => {
                    let users = self.services.users.clone();
                    self.spawn(async move { AppEvent::LoginResolved(users.get_current_profile().await) });
                }
                Err(e) => {
                    self.login_form.finish_submit(Err(e));
                }
            },
            AppEvent::TokenIssued(Err(e)) => {
                self.login_form.finish_submit(Err(e.into()));
            }
            AppEvent::LoginResolved(result) => {
                let outcome = self.session.finish_login(result);
                if let Some(route) = self.login_form.finish_submit(outcome) {
                    self.navigate(route);
                }
            }
            AppEvent::Registered(result) => {
                self.register_form.finish_submit(result);
            }
            AppEvent::HomeLoaded(ticket, result) => self.home.finish_load(&ticket, result),
            AppEvent::UserPageLoaded(ticket, result) => {
                if let Some(page) = self.user_page.as_mut() {
                    page.finish_load(&ticket, result);
                }
            }
            AppEvent::PostDeleted(post_id, result) => {
                if result.is_ok() {
                    self.home.remove_post(post_id);
                }
                if let Some(page) = self.user_page.as_mut() {
                    page.finish_delete(post_id, result);
                }
            }
            AppEvent::ShowcaseToggled(ticket, result) => {
                let applied = self
                    .user_page
                    .as_mut()
                    .and_then(|page| page.finish_toggle_showcase(&ticket, result));
                if let Some(post) = applied {
                    self.home.replace_post(&post);
                }
            }
            AppEvent::PostCreated(result) => {
                if self.post_form.finish_submit(result).is_some() {
                    self.post_image_path.clear();
                }
            }
            AppEvent::ProfileLoaded(ticket, result) => self.edit_profile.finish_load(&ticket, result),
            AppEvent::ProfileUpdated(ticket, result) => {
                if let Some(profile) = self.edit_profile.finish_submit(&ticket, result) {
                    self.session.set_user(profile);
                    self.profile_image_path.clear();
                }
            }
            AppEvent::ImageRead(target, Ok(upload)) => match target {
                ImageTarget::NewPost => self.post_form.set_image(Some(upload)),
                ImageTarget::ProfilePhoto => {
                    if let Some(form) = self.edit_profile.form_mut() {
                        form.select_photo(upload);
                    }
                }
            },
            AppEvent::ImageRead(_, Err(message)) => {
                tracing::warn!("{}", message);
                self.image_error = Some(message);
            }
        }
    }
}
