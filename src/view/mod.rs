use mockall::automock;

use crate::{
    core::{
        api::models::{Spend, SpendKind, UserProfile},
        bootstrap::Navigation,
    },
    features::spends::table::SpendTable,
};

pub mod console;
pub use console::ConsoleView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient message shown to the user after an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, message)
    }

    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Output regions the features draw into.
#[automock]
pub trait View: Send + Sync {
    fn notify(&self, notice: &Notice);
    fn render_navigation(&self, navigation: &Navigation);
    fn render_spend_kinds(&self, kinds: &[SpendKind]);
    fn render_spends(&self, table: &SpendTable);
    fn render_spend(&self, spend: &Spend);
    fn render_profile(&self, profile: &UserProfile);
    fn render_users(&self, dump: &str);
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::{Notice, NoticeLevel, View};
    use crate::{
        core::{
            api::models::{Spend, SpendKind, UserProfile},
            bootstrap::Navigation,
        },
        features::spends::table::SpendTable,
    };

    /// Keeps everything drawn so tests can assert on it.
    #[derive(Default)]
    pub struct RecordingView {
        pub notices: Mutex<Vec<Notice>>,
        pub navigations: Mutex<Vec<Navigation>>,
        pub kinds: Mutex<Vec<Vec<SpendKind>>>,
        pub tables: Mutex<Vec<SpendTable>>,
        pub spends: Mutex<Vec<Spend>>,
        pub profiles: Mutex<Vec<UserProfile>>,
        pub users: Mutex<Vec<String>>,
    }

    impl RecordingView {
        pub fn notices_of(&self, level: NoticeLevel) -> Vec<Notice> {
            self.notices
                .lock()
                .unwrap()
                .iter()
                .filter(|n| n.level == level)
                .cloned()
                .collect()
        }
    }

    impl View for RecordingView {
        fn notify(&self, notice: &Notice) {
            self.notices.lock().unwrap().push(notice.clone());
        }

        fn render_navigation(&self, navigation: &Navigation) {
            self.navigations.lock().unwrap().push(navigation.clone());
        }

        fn render_spend_kinds(&self, kinds: &[SpendKind]) {
            self.kinds.lock().unwrap().push(kinds.to_vec());
        }

        fn render_spends(&self, table: &SpendTable) {
            self.tables.lock().unwrap().push(table.clone());
        }

        fn render_spend(&self, spend: &Spend) {
            self.spends.lock().unwrap().push(spend.clone());
        }

        fn render_profile(&self, profile: &UserProfile) {
            self.profiles.lock().unwrap().push(profile.clone());
        }

        fn render_users(&self, dump: &str) {
            self.users.lock().unwrap().push(dump.to_string());
        }
    }
}
