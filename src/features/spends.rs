use log::{debug, error, info, warn};

use crate::{
    core::{
        api::{
            models::{NewSpend, Spend, SpendKind},
            ApiClient,
        },
        common::completion::with_completion,
        session::{Session, SessionStore},
    },
    view::{Notice, View},
};

use super::FeatureError;

pub mod table;

use table::{SpendRow, SpendTable};

/// Values typed by the user for a new spending, `kind` is a kind id or name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpendInput {
    pub amount: String,
    pub currency: String,
    pub kind: String,
}

/// The spends page: kind selection plus spends table, both rebuilt from the last fetch.
pub struct SpendsPage<'a> {
    api: &'a ApiClient,
    store: &'a SessionStore,
    view: &'a dyn View,
    kinds: Vec<SpendKind>,
    table: SpendTable,
}

impl<'a> SpendsPage<'a> {
    pub fn new(api: &'a ApiClient, store: &'a SessionStore, view: &'a dyn View) -> Self {
        Self {
            api,
            store,
            view,
            kinds: vec![],
            table: SpendTable::default(),
        }
    }

    /// Fetches kinds and spends as two independent requests issued together.
    ///
    /// Each half is applied and drawn on its own, a failed half keeps what was shown before and
    /// its error is returned once both are done.
    pub async fn load(&mut self) -> Result<(), FeatureError> {
        let session = self.session().await?;

        let (kinds, spends) = tokio::join!(
            self.request_kinds(&session),
            self.request_spends(&session)
        );

        let kinds_res = kinds.map(|k| {
            self.kinds = k;
        });
        self.view.render_spend_kinds(&self.kinds);

        let spends_res = spends.map(|s| {
            self.table.replace(&s);
            debug!("{} spends shown", self.table.len());
        });
        self.view.render_spends(&self.table);

        kinds_res.and(spends_res)
    }

    /// Fetches only the kinds, for the kind selection.
    pub async fn load_kinds(&mut self) -> Result<(), FeatureError> {
        let session = self.session().await?;

        let kinds = self.request_kinds(&session).await?;
        self.kinds = kinds;
        self.view.render_spend_kinds(&self.kinds);

        Ok(())
    }

    /// Posts a new spending and appends its row once the server confirmed it.
    pub async fn add(&mut self, input: SpendInput) -> Result<SpendRow, FeatureError> {
        let title = "Add new spending";

        let amount = input.amount.trim();
        let currency = input.currency.trim();
        let kind = match self.resolve_kind(input.kind.trim()) {
            Some(k) if !amount.is_empty() && !currency.is_empty() => k.clone(),
            _ => {
                let err = FeatureError::Validation("Error, please check parameters.".to_string());
                self.view.notify(&Notice::error(title, err.user_message()));
                return Err(err);
            }
        };

        let session = self.session().await?;

        let spend = NewSpend {
            username: session.username.clone(),
            currency: currency.to_string(),
            amount: amount.to_string(),
            kind_id: kind.id.clone(),
        };

        let res = with_completion(self.api.create_spend(&session, &spend), || {
            debug!("new spending request complete");
        })
        .await;

        let envelope = match res {
            Ok(r) => r,
            Err(e) => {
                error!("add new spending error: {e}");
                self.view
                    .notify(&Notice::error(title, "Spending was not added!"));
                return Err(e.into());
            }
        };

        let id = match envelope.into_result() {
            Ok(Some(data)) => match data {
                serde_json::Value::String(s) if !s.is_empty() => s,
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    error!("add new spending, unexpected id: {other}");
                    self.view
                        .notify(&Notice::error(title, "Spending was not added!"));
                    return Err(FeatureError::Rejected(
                        "server did not return the new spending id".to_string(),
                    ));
                }
            },
            Ok(None) => {
                self.view
                    .notify(&Notice::error(title, "Spending was not added!"));
                return Err(FeatureError::Rejected(
                    "server did not return the new spending id".to_string(),
                ));
            }
            Err(e) => {
                error!("add new spending error: {}", e.reason);
                self.view
                    .notify(&Notice::error(title, "Spending was not added!"));
                return Err(FeatureError::Rejected(e.reason));
            }
        };

        let row = SpendRow {
            id,
            amount: spend.amount,
            currency: spend.currency,
            kind_name: kind.name,
        };

        info!("spending {} added", row.id);

        self.table.append(row.clone());
        self.view.notify(&Notice::success(title, "Spending added!"));
        self.view.render_spends(&self.table);

        Ok(row)
    }

    /// Deletes one spending, its row is only removed after the server confirmed the deletion.
    pub async fn delete(&mut self, id: &str) -> Result<Option<SpendRow>, FeatureError> {
        let title = "Delete spending";

        let session = self.store.get().await?;

        if !session.is_logged() {
            error!("not logged in");
            self.view.notify(&Notice::error(title, "not logged in"));
            return Err(FeatureError::NotLogged);
        }

        let res = with_completion(self.api.delete_spend(&session, id), || {
            debug!("delete spending request complete");
        })
        .await;

        let envelope = match res {
            Ok(r) => r,
            Err(e) => {
                error!("delete spending error: {e}");
                self.view.notify(&Notice::error(title, e.to_string()));
                return Err(e.into());
            }
        };

        if let Err(e) = envelope.into_result() {
            self.view.notify(&Notice::error(title, e.reason.as_str()));
            return Err(FeatureError::Rejected(e.reason));
        }

        let removed = self.table.remove(id);
        if removed.is_none() {
            debug!("spending {id} was not shown, nothing to remove");
        }

        info!("spending {id} deleted");
        self.view
            .notify(&Notice::success(title, format!("Spending [{id}] deleted")));
        self.view.render_spends(&self.table);

        Ok(removed)
    }

    pub async fn show(&self, id: &str) -> Result<Spend, FeatureError> {
        let session = self.session().await?;

        let envelope = self.api.spend(&session, id).await.map_err(|e| {
            self.view.notify(&Notice::error("Get spending", e.to_string()));
            FeatureError::from(e)
        })?;

        match envelope.into_result() {
            Ok(Some(spend)) => {
                self.view.render_spend(&spend);
                Ok(spend)
            }
            Ok(None) => {
                self.view.notify(&Notice::error("Get spending", "not found"));
                Err(FeatureError::Rejected("not found".to_string()))
            }
            Err(e) => {
                self.view.notify(&Notice::error("Get spending", e.reason.as_str()));
                Err(FeatureError::Rejected(e.reason))
            }
        }
    }

    async fn session(&self) -> Result<Session, FeatureError> {
        let session = self.store.get().await?;
        if !session.is_logged() {
            warn!("not logged in");
        }
        Ok(session)
    }

    fn resolve_kind(&self, kind: &str) -> Option<&SpendKind> {
        if kind.is_empty() {
            return None;
        }

        self.kinds
            .iter()
            .find(|k| k.id == kind)
            .or_else(|| self.kinds.iter().find(|k| k.name.eq_ignore_ascii_case(kind)))
    }

    async fn request_kinds(&self, session: &Session) -> Result<Vec<SpendKind>, FeatureError> {
        let title = "Get spend kinds error";

        let res = with_completion(self.api.spend_kinds(session), || {
            debug!("get spend kinds request complete");
        })
        .await;

        match res {
            Ok(envelope) => match envelope.into_result() {
                Ok(kinds) => {
                    info!("get spend kinds [{}] success", session.username);
                    Ok(kinds.unwrap_or_default())
                }
                Err(e) => {
                    self.view.notify(&Notice::error(title, e.reason.as_str()));
                    Err(FeatureError::Rejected(e.reason))
                }
            },
            Err(e) => {
                error!("get spend kinds error: {e}");
                self.view.notify(&Notice::error(title, e.to_string()));
                Err(e.into())
            }
        }
    }

    async fn request_spends(&self, session: &Session) -> Result<Vec<Spend>, FeatureError> {
        let title = "Get spends error";

        let res = with_completion(self.api.spends(session), || {
            debug!("get spends request complete");
        })
        .await;

        match res {
            Ok(envelope) => match envelope.into_result() {
                Ok(spends) => {
                    info!("get spends [{}] success", session.username);
                    Ok(spends.unwrap_or_default())
                }
                Err(e) => {
                    self.view.notify(&Notice::error(title, e.reason.as_str()));
                    Err(FeatureError::Rejected(e.reason))
                }
            },
            Err(e) => {
                error!("get spends error: {e}");
                self.view.notify(&Notice::error(title, e.to_string()));
                Err(e.into())
            }
        }
    }
}
