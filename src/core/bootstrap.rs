use log::{error, info};

use crate::view::View;

use super::session::{Session, SessionStore, SessionValidator, ValidationOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Spends,
    Contact,
    Register,
    Debug,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Spends,
        Page::Contact,
        Page::Register,
        Page::Debug,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Spends => "/spends",
            Page::Contact => "/contact",
            Page::Register => "/register",
            Page::Debug => "/debug",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Spends => "Spends",
            Page::Contact => "Contact",
            Page::Register => "Register",
            Page::Debug => "Debug",
        }
    }
}

/// Navigation state derived from the current page and the stored session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    page: Page,
    session: Session,
}

impl Navigation {
    pub fn new(page: Page, session: Session) -> Self {
        Self { page, session }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn show_login_form(&self) -> bool {
        !self.session.is_logged()
    }

    pub fn is_visible(&self, page: Page) -> bool {
        match page {
            Page::Register => !self.session.is_logged(),
            Page::Spends => self.session.is_logged(),
            _ => true,
        }
    }

    /// Visible items in menu order, flagged when selected.
    pub fn items(&self) -> Vec<(Page, bool)> {
        Page::ALL
            .iter()
            .filter(|p| self.is_visible(**p))
            .map(|p| (*p, *p == self.page))
            .collect()
    }
}

/// Runs the page load sequence: draw the navigation for the stored session, then re-validate the
/// session with the server when the throttle allows it.
pub async fn bootstrap(
    page: Page,
    store: &SessionStore,
    validator: &SessionValidator<'_>,
    view: &dyn View,
) -> ValidationOutcome {
    info!("loading page {}", page.path());

    match store.get().await {
        Ok(session) => view.render_navigation(&Navigation::new(page, session)),
        Err(e) => error!("cannot read stored session: {e}"),
    }

    validator.check(view).await
}
