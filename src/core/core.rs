use std::sync::Arc;

use chrono::TimeDelta;
use log::{info, warn};

use crate::{
    features::{
        login, profile, registration,
        spends::{SpendInput, SpendsPage},
        users,
    },
    view::{Notice, View},
};

use super::{
    api::{models::Credentials, ApiClient},
    bootstrap::{self, Navigation, Page},
    cli::{Command, SpendsCommand},
    configuration::Configuration,
    session::{
        session_storage::SessionStorage, FileSystemStorage, SessionStore, SessionValidator,
        ValidationOutcome,
    },
};

#[cfg(test)]
mod tests;

/// Everything a page needs: the API client, the session context and the view it draws into.
pub struct Context {
    page: Page,
    api: ApiClient,
    store: SessionStore,
    view: Arc<dyn View>,
    check_interval: TimeDelta,
}

impl Context {
    pub fn new(conf: &Configuration, page: Page, view: Arc<dyn View>) -> Self {
        Self::with_storage(
            page,
            ApiClient::new(conf.api_url()),
            Box::new(FileSystemStorage::new(conf.data_directory())),
            view,
            conf.session_check_interval(),
        )
    }

    /// Wires the session store so that every refresh redraws the navigation of `page`.
    pub fn with_storage(
        page: Page,
        api: ApiClient,
        storage: Box<dyn SessionStorage>,
        view: Arc<dyn View>,
        check_interval: TimeDelta,
    ) -> Self {
        info!("using api url: {}", api.api_url());

        let hook_view = view.clone();
        let store = SessionStore::new(storage).with_refresh(Box::new(move |session| {
            hook_view.render_navigation(&Navigation::new(page, session.clone()));
        }));

        Self {
            page,
            api,
            store,
            view,
            check_interval,
        }
    }

    /// Page load: navigation for the stored session, then the throttled session check.
    pub async fn load(&self) -> ValidationOutcome {
        let validator =
            SessionValidator::new(&self.store, &self.api).with_interval(self.check_interval);

        bootstrap::bootstrap(self.page, &self.store, &validator, self.view.as_ref()).await
    }
}

fn page_of(command: &Command) -> Page {
    match command {
        Command::Register { .. } => Page::Register,
        Command::Kinds | Command::Spends { .. } => Page::Spends,
        Command::Users => Page::Debug,
        Command::Login { .. } | Command::Logout | Command::Status | Command::Me => Page::Home,
    }
}

/// Runs one command as one page load followed by the requested action.
pub async fn run(
    conf: Configuration,
    command: Command,
    view: Arc<dyn View>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let ctx = Context::new(&conf, page_of(&command), view);

    execute(&ctx, command).await
}

async fn execute(
    ctx: &Context,
    command: Command,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let outcome = ctx.load().await;
    info!("session check outcome: {outcome:?}");

    let view = ctx.view.as_ref();

    match command {
        Command::Register {
            username,
            password,
            email,
        } => {
            registration::register(&ctx.api, view, &username, &password, email.as_deref()).await?
        }
        Command::Login { username, password } => {
            login::login(&ctx.api, &ctx.store, view, Credentials { username, password }).await?;
        }
        Command::Logout => login::logout(&ctx.api, &ctx.store, view).await?,
        Command::Status => status(ctx, outcome).await?,
        Command::Me => {
            profile::show_profile(&ctx.api, &ctx.store, view).await?;
        }
        Command::Kinds => {
            SpendsPage::new(&ctx.api, &ctx.store, view)
                .load_kinds()
                .await?
        }
        Command::Spends { command } => spends(ctx, command).await?,
        Command::Users => users::dump_users(&ctx.api, &ctx.store, view).await?,
    }

    Ok(())
}

async fn status(
    ctx: &Context,
    outcome: ValidationOutcome,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let session = ctx.store.get().await?;
    let title = "Session";

    let notice = match outcome {
        ValidationOutcome::Valid => Notice::success(title, format!("{} is logged in", session.username)),
        ValidationOutcome::Throttled if session.is_logged() => Notice::info(
            title,
            format!(
                "{} is logged in, checked less than {}s ago",
                session.username,
                ctx.check_interval.num_seconds()
            ),
        ),
        ValidationOutcome::Unconfirmed => Notice::info(
            title,
            format!("{} is logged in, server could not confirm it", session.username),
        ),
        ValidationOutcome::Invalidated => return Ok(()),
        ValidationOutcome::NotLogged | ValidationOutcome::Throttled => {
            Notice::info(title, "not logged in")
        }
    };

    ctx.view.notify(&notice);

    Ok(())
}

async fn spends(
    ctx: &Context,
    command: SpendsCommand,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut page = SpendsPage::new(&ctx.api, &ctx.store, ctx.view.as_ref());

    match command {
        SpendsCommand::List => page.load().await?,
        SpendsCommand::Add {
            amount,
            currency,
            kind,
        } => {
            if let Err(e) = page.load().await {
                warn!("spends listing failed before adding: {e}");
            }
            page.add(SpendInput {
                amount,
                currency,
                kind,
            })
            .await?;
        }
        SpendsCommand::Show { id } => {
            page.show(&id).await?;
        }
        SpendsCommand::Delete { id } => {
            if ctx.store.get().await?.is_logged() {
                if let Err(e) = page.load().await {
                    warn!("spends listing failed before deleting: {e}");
                }
            }
            page.delete(&id).await?;
        }
    }

    Ok(())
}
