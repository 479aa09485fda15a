use crate::core::api::models::Spend;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpendRow {
    pub id: String,
    pub amount: String,
    pub currency: String,
    pub kind_name: String,
}

impl SpendRow {
    pub fn label(&self) -> String {
        format!("{} {}", self.amount, self.currency)
    }
}

impl From<&Spend> for SpendRow {
    fn from(spend: &Spend) -> Self {
        Self {
            id: spend.id.clone(),
            amount: spend.amount.to_string(),
            currency: spend.currency.clone(),
            kind_name: spend.kind_name().to_string(),
        }
    }
}

/// Rows of the spends table, in server order, rows appended locally go last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpendTable {
    rows: Vec<SpendRow>,
}

impl SpendTable {
    pub fn replace(&mut self, spends: &[Spend]) {
        self.rows = spends.iter().map(SpendRow::from).collect();
    }

    pub fn append(&mut self, row: SpendRow) {
        self.rows.push(row);
    }

    /// Removes the row with the given id, other rows keep their order.
    pub fn remove(&mut self, id: &str) -> Option<SpendRow> {
        let index = self.rows.iter().position(|r| r.id == id)?;
        Some(self.rows.remove(index))
    }

    pub fn rows(&self) -> &[SpendRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{SpendRow, SpendTable};

    fn row(id: &str) -> SpendRow {
        SpendRow {
            id: id.to_string(),
            amount: "1".to_string(),
            currency: "EUR".to_string(),
            kind_name: "Food".to_string(),
        }
    }

    #[test]
    fn remove_takes_exactly_one_row() {
        let mut table = SpendTable::default();
        table.append(row("1"));
        table.append(row("2"));
        table.append(row("3"));

        assert_eq!(Some(row("2")), table.remove("2"));
        assert_eq!(None, table.remove("2"));
        assert_eq!(
            vec!["1", "3"],
            table.rows().iter().map(|r| r.id.as_str()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn label_joins_amount_and_currency() {
        let row = SpendRow {
            id: "77".to_string(),
            amount: "12.5".to_string(),
            currency: "USD".to_string(),
            kind_name: "Food".to_string(),
        };

        assert_eq!("12.5 USD", row.label());
    }
}
