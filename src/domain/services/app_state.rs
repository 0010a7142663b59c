#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;
use syntect::highlighting::Theme;
use tui_textarea::TextArea as TuiTextArea;

use super::AnalyzerView;
use super::AuthForm;
use super::BubbleList;
use super::ChatPhase;
use super::ChatView;
use super::Menu;
use super::NavTarget;
use super::Navbar;
use super::RouteGuard;
use super::Scroll;
use super::SessionStore;
use super::Sidebar;
use crate::domain::models::Action;
use crate::domain::models::AuthKind;
use crate::domain::models::Event;
use crate::domain::models::Route;
use crate::domain::models::Session;
use crate::domain::models::TextArea;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatFocus {
    Input,
    Sidebar,
}

/// Everything the UI loop owns. Events go in, actions for the worker come
/// out.
pub struct AppState {
    pub analyzer: AnalyzerView,
    pub bubble_list: BubbleList,
    pub chat: ChatView,
    pub chat_focus: ChatFocus,
    pub chat_input: TuiTextArea<'static>,
    pub dashboard: Menu,
    pub home: Menu,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub login: AuthForm,
    pub register: AuthForm,
    pub route: Route,
    pub scroll: Scroll,
    pub session_store: SessionStore,
    pub should_quit: bool,
    pub sidebar: Sidebar,
}

impl AppState {
    pub fn new(session_store: SessionStore, theme: Theme) -> AppState {
        return AppState {
            analyzer: AnalyzerView::default(),
            bubble_list: BubbleList::new(theme),
            chat: ChatView::default(),
            chat_focus: ChatFocus::Input,
            chat_input: TextArea::default(),
            dashboard: Menu::dashboard(),
            home: Menu::home(),
            last_known_height: 0,
            last_known_width: 0,
            login: AuthForm::login(),
            register: AuthForm::register(),
            route: Route::Home,
            scroll: Scroll::default(),
            session_store,
            should_quit: false,
            sidebar: Sidebar::default(),
        };
    }

    pub fn session(&self) -> &Session {
        return self.session_store.session();
    }

    /// Moves to `route` through the guard and returns the requests the new
    /// screen needs.
    pub fn navigate(&mut self, route: Route) -> Vec<Action> {
        let resolved = RouteGuard::resolve(route, self.session_store.session());
        tracing::debug!(route = %resolved, "Navigating");
        self.route = resolved.clone();

        let mut actions = vec![];
        if let Route::Chat(conversation_id) = resolved {
            self.chat_focus = ChatFocus::Input;
            self.chat_input = TextArea::default();
            if let Some(action) = self
                .chat
                .enter(conversation_id, self.session_store.session())
            {
                actions.push(action);
            }

            self.bubble_list.clear();
            self.scroll.reset();
            self.sync_chat();

            if let Some(action) = self.sidebar.refresh(self.session_store.session()) {
                actions.push(action);
            }
        } else if self.chat.phase() != ChatPhase::Idle {
            self.chat.leave();
            self.bubble_list.clear();
            self.scroll.reset();
        }

        return actions;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_chat();
    }

    fn sync_chat(&mut self) {
        self.bubble_list
            .set_messages(&self.chat.messages, self.last_known_width as usize);
        self.scroll
            .set_state(self.bubble_list.len() as u16, self.last_known_height);
    }

    fn form_for(&mut self, kind: AuthKind) -> &mut AuthForm {
        match kind {
            AuthKind::Register => return &mut self.register,
            AuthKind::Login | AuthKind::Guest => return &mut self.login,
        }
    }

    async fn logout(&mut self) -> Vec<Action> {
        if let Err(err) = self.session_store.logout().await {
            tracing::error!(error = ?err, "Failed to persist logout");
        }

        self.chat.leave();
        self.sidebar.reset();
        self.analyzer.reset();
        self.bubble_list.clear();

        return self.navigate(Route::Login);
    }

    async fn follow(&mut self, target: NavTarget) -> Vec<Action> {
        match target {
            NavTarget::Go(route) => return self.navigate(route),
            NavTarget::Logout => return self.logout().await,
        }
    }

    pub async fn handle_event(&mut self, event: Event) -> Vec<Action> {
        match event {
            Event::AuthSucceeded(kind, token) => {
                if let Err(err) = self.session_store.set_token(Some(token)).await {
                    tracing::error!(error = ?err, "Failed to persist session");
                }

                if !self.session_store.session().is_authenticated() {
                    self.form_for(kind)
                        .failed(kind.fallback_message().to_string());
                    return vec![];
                }

                self.form_for(kind).succeeded();
                return self.navigate(Route::Dashboard);
            }
            Event::AuthFailed(kind, msg) => {
                self.form_for(kind).failed(msg);
            }
            Event::ConversationsLoaded(ticket, conversations) => {
                self.sidebar
                    .loaded(ticket, conversations, self.chat.conversation_id());
            }
            Event::ConversationsFailed(ticket) => {
                self.sidebar.failed(ticket);
            }
            Event::HistoryLoaded(ticket, conversation_id, history) => {
                if self.chat.history_loaded(ticket, &conversation_id, &history) {
                    self.sync_chat();
                    self.scroll.last();
                }
            }
            Event::HistoryFailed(ticket, _) => {
                if self.chat.history_failed(ticket) {
                    return self.navigate(Route::Chat(None));
                }
            }
            Event::ReplyReceived(ticket, res) => {
                let mut actions = vec![];
                if let Some(route) = self.chat.reply_received(ticket, res) {
                    self.route = RouteGuard::resolve(route, self.session_store.session());
                    if let Some(action) = self.sidebar.refresh(self.session_store.session()) {
                        actions.push(action);
                    }
                }

                self.sync_chat();
                self.scroll.last();
                return actions;
            }
            Event::ReplyFailed(ticket) => {
                self.chat.reply_failed(ticket);
                self.sync_chat();
                self.scroll.last();
            }
            Event::AnalysisCompleted(ticket, result) => {
                self.analyzer.completed(ticket, result);
            }
            Event::AnalysisFailed(ticket, msg) => {
                self.analyzer.failed(ticket, msg);
            }
            Event::KeyboardCTRLC() => {
                self.should_quit = true;
            }
            Event::KeyboardFunction(key) => {
                if let Some(link) = Navbar::link_for_key(self.session_store.session(), key) {
                    return self.follow(link.target).await;
                }
            }
            Event::UIResize() | Event::UITick() => {}
            event => {
                return self.handle_screen_event(event).await;
            }
        }

        return vec![];
    }

    async fn handle_screen_event(&mut self, event: Event) -> Vec<Action> {
        match self.route {
            Route::Home | Route::Dashboard => {
                return self.handle_menu_event(event).await;
            }
            Route::Login | Route::Register => {
                return self.handle_auth_event(event);
            }
            Route::Analyzer => {
                return self.handle_analyzer_event(event);
            }
            Route::Chat(_) => {
                return self.handle_chat_event(event);
            }
        }
    }

    async fn handle_menu_event(&mut self, event: Event) -> Vec<Action> {
        let mut menu = &mut self.home;
        if self.route == Route::Dashboard {
            menu = &mut self.dashboard;
        }

        match event {
            Event::UIScrollUp() => menu.prev(),
            Event::UIScrollDown() | Event::KeyboardTab() => menu.next(),
            Event::KeyboardEnter() => {
                if let Some(target) = menu.selected_target() {
                    return self.follow(target).await;
                }
            }
            _ => {}
        }

        return vec![];
    }

    fn handle_auth_event(&mut self, event: Event) -> Vec<Action> {
        let is_login = self.route == Route::Login;
        let mut form = &mut self.register;
        if is_login {
            form = &mut self.login;
        }

        match event {
            Event::KeyboardTab() | Event::UIScrollDown() => form.focus_next(),
            Event::UIScrollUp() => form.focus_prev(),
            Event::KeyboardCTRLR() => form.toggle_password(),
            Event::KeyboardCTRLG() => {
                if let Some(action) = form.guest() {
                    return vec![action];
                }
            }
            Event::KeyboardEnter() => {
                if let Some(action) = form.submit() {
                    return vec![action];
                }
            }
            Event::KeyboardPaste(text) => form.paste(&text),
            Event::KeyboardCharInput(input) => form.input(input),
            _ => {}
        }

        return vec![];
    }

    fn handle_analyzer_event(&mut self, event: Event) -> Vec<Action> {
        match event {
            Event::KeyboardTab() => self.analyzer.focus_next(),
            Event::KeyboardEnter() => self.analyzer.newline(),
            Event::KeyboardCTRLS() => {
                if let Some(action) = self.analyzer.submit(self.session_store.session()) {
                    return vec![action];
                }
            }
            Event::KeyboardPaste(text) => self.analyzer.paste(&text),
            Event::KeyboardCharInput(input) => self.analyzer.input(input),
            Event::UIScrollUp() => {
                self.analyzer.scroll = self.analyzer.scroll.saturating_sub(1);
            }
            Event::UIScrollDown() => {
                self.analyzer.scroll = self.analyzer.scroll.saturating_add(1);
            }
            Event::UIScrollPageUp() => {
                self.analyzer.scroll = self.analyzer.scroll.saturating_sub(10);
            }
            Event::UIScrollPageDown() => {
                self.analyzer.scroll = self.analyzer.scroll.saturating_add(10);
            }
            _ => {}
        }

        return vec![];
    }

    fn handle_chat_event(&mut self, event: Event) -> Vec<Action> {
        match event {
            Event::KeyboardTab() => {
                self.chat_focus = match self.chat_focus {
                    ChatFocus::Input => ChatFocus::Sidebar,
                    ChatFocus::Sidebar => ChatFocus::Input,
                };
                if self.chat_focus == ChatFocus::Sidebar {
                    self.sidebar.select_open(self.chat.conversation_id());
                }
            }
            Event::KeyboardCTRLN() => {
                return self.navigate(Route::Chat(None));
            }
            Event::KeyboardCTRLR() => {
                if let Some(action) = self.sidebar.refresh(self.session_store.session()) {
                    return vec![action];
                }
            }
            Event::UIScrollPageUp() => self.scroll.up_page(),
            Event::UIScrollPageDown() => self.scroll.down_page(),
            event if self.chat_focus == ChatFocus::Sidebar => match event {
                Event::UIScrollUp() => self.sidebar.up(),
                Event::UIScrollDown() => self.sidebar.down(),
                Event::KeyboardEnter() => {
                    let route = self.sidebar.selected_route();
                    return self.navigate(route);
                }
                _ => {}
            },
            Event::UIScrollUp() => self.scroll.up(),
            Event::UIScrollDown() => self.scroll.down(),
            Event::KeyboardEnter() => {
                let text = TextArea::content(&self.chat_input);
                if let Some(action) = self.chat.submit(&text, self.session_store.session()) {
                    self.chat_input = TextArea::default();
                    self.sync_chat();
                    self.scroll.last();
                    return vec![action];
                }
            }
            Event::KeyboardPaste(text) => {
                if self.chat.accepts_input() {
                    TextArea::paste(&mut self.chat_input, &text);
                }
            }
            Event::KeyboardCharInput(input) => {
                if self.chat.accepts_input() {
                    self.chat_input.input(input);
                }
            }
            _ => {}
        }

        return vec![];
    }
}
