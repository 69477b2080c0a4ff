use api_types::records::{Record, Where};

use crate::{
    Category, CategoryChanges, EngineError, NewCategory, ResultEngine, categories,
};

use super::{Engine, Notify};

const NOT_DELETABLE: &str = "Category not found or cannot be deleted";

impl Engine {
    pub async fn list_categories(&self) -> ResultEngine<Vec<Category>> {
        self.fetch_all(Vec::new(), Vec::new(), Notify::Yes).await
    }

    pub async fn category(&self, id: i64) -> ResultEngine<Option<Category>> {
        self.fetch_by_id(id).await
    }

    /// First category whose name matches exactly.
    pub async fn category_by_name(&self, name: &str) -> ResultEngine<Option<Category>> {
        let matches: Vec<Category> = self
            .fetch_all(
                vec![Where::equal_to(categories::NAME, name)],
                Vec::new(),
                Notify::No,
            )
            .await?;
        Ok(matches.into_iter().next())
    }

    pub async fn create_category(&self, new: &NewCategory) -> ResultEngine<Category> {
        if new.name.trim().is_empty() {
            return Err(EngineError::InvalidRecord(
                "category name must not be empty".to_string(),
            ));
        }
        self.create_one(Record::from(new)).await
    }

    pub async fn update_category(
        &self,
        id: i64,
        changes: &CategoryChanges,
    ) -> ResultEngine<Category> {
        self.update_one(changes.to_record(id)).await
    }

    /// Deletes a custom category.
    ///
    /// Built-in categories are refused with [`EngineError::Forbidden`] before
    /// anything is sent to the store; an unknown id is
    /// [`EngineError::KeyNotFound`]. Both are notified, as is a failed
    /// lookup.
    pub async fn delete_category(&self, id: i64) -> ResultEngine<()> {
        let found = match self.category(id).await {
            Ok(found) => found,
            Err(err) => {
                self.notifier.error(NOT_DELETABLE);
                return Err(err);
            }
        };
        let category = match found {
            Some(category) if category.is_custom => category,
            Some(category) => {
                self.notifier.error(NOT_DELETABLE);
                return Err(EngineError::Forbidden(format!(
                    "category '{}' is built in",
                    category.name
                )));
            }
            None => {
                self.notifier.error(NOT_DELETABLE);
                return Err(EngineError::KeyNotFound(format!("category {id}")));
            }
        };

        tracing::debug!("deleting custom category {}", category.name);
        self.delete_one::<Category>(category.id).await
    }
}
