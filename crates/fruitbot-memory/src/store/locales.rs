//! Supported-locale reference data.

use super::Store;
use fruitbot_core::{error::FruitbotError, locale::SupportedLocale};

type LocaleRow = (String, String, String);

fn into_locale((code, name, flag): LocaleRow) -> SupportedLocale {
    SupportedLocale {
        code,
        display_name: name,
        display_flag: flag,
    }
}

impl Store {
    /// All supported locales in insertion order.
    pub async fn supported_locales(&self) -> Result<Vec<SupportedLocale>, FruitbotError> {
        let rows: Vec<LocaleRow> =
            sqlx::query_as("SELECT code, name, flag FROM locales ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| FruitbotError::StoreUnavailable(format!("query failed: {e}")))?;

        Ok(rows.into_iter().map(into_locale).collect())
    }

    /// A single supported locale by code.
    pub async fn get_locale(&self, code: &str) -> Result<Option<SupportedLocale>, FruitbotError> {
        let row: Option<LocaleRow> =
            sqlx::query_as("SELECT code, name, flag FROM locales WHERE code = ?")
                .bind(code)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| FruitbotError::StoreUnavailable(format!("query failed: {e}")))?;

        Ok(row.map(into_locale))
    }
}
