use crate::{
    core::{
        api::models::{Spend, SpendKind, UserProfile},
        bootstrap::Navigation,
    },
    features::spends::table::SpendTable,
};

use super::{Notice, NoticeLevel, View};

/// Draws every region on the terminal, notices of the error level go to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleView;

impl ConsoleView {
    pub fn new() -> Self {
        Self
    }
}

impl View for ConsoleView {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success => println!("[ok] {}: {}", notice.title, notice.message),
            NoticeLevel::Info => println!("[info] {}: {}", notice.title, notice.message),
            NoticeLevel::Error => eprintln!("[error] {}: {}", notice.title, notice.message),
        }
    }

    fn render_navigation(&self, navigation: &Navigation) {
        let items = navigation
            .items()
            .iter()
            .map(|(page, selected)| match selected {
                true => format!("[{}]", page.title()),
                false => page.title().to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | ");

        println!("{items}");

        match navigation.show_login_form() {
            true => println!("-> not logged in, use `ispend login`"),
            false => println!("-> {}", navigation.session().username),
        }

        println!("== {} ==", navigation.page().title());
    }

    fn render_spend_kinds(&self, kinds: &[SpendKind]) {
        println!("{:<6} Kind", "Id");
        for kind in kinds {
            println!("{:<6} {}", kind.id, kind.name);
        }
    }

    fn render_spends(&self, table: &SpendTable) {
        if table.is_empty() {
            println!("no spends");
            return;
        }

        println!("{:<12} {:<24} Kind", "Id", "Amount [currency]");
        for row in table.rows() {
            println!("{:<12} {:<24} {}", row.id, row.label(), row.kind_name);
        }
    }

    fn render_spend(&self, spend: &Spend) {
        println!("id:       {}", spend.id);
        println!("amount:   {} {}", spend.amount, spend.currency);
        println!("kind:     {}", spend.kind_name());
        if let Some(timestamp) = spend.timestamp {
            println!("recorded: {}", timestamp.to_rfc3339());
        }
    }

    fn render_profile(&self, profile: &UserProfile) {
        println!("username: {}", profile.username);
        println!("email:    {}", profile.email);
        println!(
            "spends:   {}",
            profile.spends.as_ref().map(|s| s.len()).unwrap_or(0)
        );
        let kinds = profile
            .spend_kinds
            .as_ref()
            .map(|k| {
                k.iter()
                    .map(|kind| kind.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
        println!("kinds:    {kinds}");
    }

    fn render_users(&self, dump: &str) {
        println!("{dump}");
    }
}
