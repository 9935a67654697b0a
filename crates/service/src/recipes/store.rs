use std::{path::PathBuf, sync::Arc};

use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::recipes::domain::{Recipe, RecipeFields, RecipeInput, RecipeReplace};
use crate::recipes::repository::RecipeRepository;
use crate::recipes::seed;
use crate::storage::JsonListStore;

/// Owns the recipe collection. Handed to request handlers through router
/// state; there is no process-wide instance.
#[derive(Clone)]
pub struct RecipeStore {
    store: Arc<JsonListStore<Recipe>>,
}

impl RecipeStore {
    /// Collection kept only in memory.
    pub fn in_memory() -> Arc<Self> {
        Arc::new(Self { store: JsonListStore::in_memory() })
    }

    /// Collection persisted as a JSON array at `path`; created empty if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonListStore::<Recipe>::open(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// All recipes in insertion order.
    pub async fn list(&self) -> Vec<Recipe> {
        self.store.list().await
    }

    pub async fn get(&self, id: Uuid) -> Option<Recipe> {
        self.store.get(&id).await
    }

    /// Validate and append a new recipe under a fresh id.
    pub async fn create(&self, input: RecipeInput) -> Result<Recipe, ServiceError> {
        let fields = input.validate()?;
        let rec = self.store.update_list(|items| Ok(push_fresh(items, fields))).await?;
        debug!(recipe_id = %rec.id, "recipe stored");
        Ok(rec)
    }

    /// Overwrite name and ingredients of an existing recipe, keeping its position.
    pub async fn replace(&self, id: Uuid, input: RecipeReplace) -> Result<Recipe, ServiceError> {
        let fields = input.validate(id)?;
        self.store
            .update(&id, |rec| fields.apply_to(rec))
            .await?
            .ok_or_else(|| ServiceError::not_found("recipe"))
    }

    /// Remove a recipe; unknown ids are `NotFound`.
    pub async fn delete(&self, id: Uuid) -> Result<Recipe, ServiceError> {
        self.store
            .remove(&id)
            .await?
            .ok_or_else(|| ServiceError::not_found("recipe"))
    }

    /// Insert the default recipes if, and only if, the collection is empty.
    /// Returns how many were inserted.
    pub async fn seed_defaults(&self) -> Result<usize, ServiceError> {
        let defaults = seed::default_recipes()
            .into_iter()
            .map(RecipeInput::validate)
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = self
            .store
            .update_list(|items| {
                if !items.is_empty() {
                    return Ok(0);
                }
                let n = defaults.len();
                for fields in defaults {
                    push_fresh(items, fields);
                }
                Ok(n)
            })
            .await?;
        if inserted > 0 {
            info!(count = inserted, "seeded default recipes");
        }
        Ok(inserted)
    }
}

/// Append under an id no other record holds.
fn push_fresh(items: &mut Vec<Recipe>, fields: RecipeFields) -> Recipe {
    let mut id = Uuid::new_v4();
    while items.iter().any(|r| r.id == id) {
        id = Uuid::new_v4();
    }
    let rec = fields.into_recipe(id);
    items.push(rec.clone());
    rec
}

#[async_trait::async_trait]
impl RecipeRepository for RecipeStore {
    async fn list(&self) -> Vec<Recipe> { self.list().await }
    async fn get(&self, id: Uuid) -> Option<Recipe> { self.get(id).await }
    async fn create(&self, input: RecipeInput) -> Result<Recipe, ServiceError> { self.create(input).await }
    async fn replace(&self, id: Uuid, input: RecipeReplace) -> Result<Recipe, ServiceError> { self.replace(id, input).await }
    async fn delete(&self, id: Uuid) -> Result<Recipe, ServiceError> { self.delete(id).await }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn coffee() -> RecipeInput {
        RecipeInput::new("coffee", &["ground coffee", "hot water"])
    }

    #[tokio::test]
    async fn recipe_store_crud() -> Result<(), anyhow::Error> {
        let store = RecipeStore::in_memory();
        assert!(store.list().await.is_empty());

        let created = store.create(coffee()).await?;
        assert_eq!(created.name, "coffee");
        assert_eq!(created.ingredients, vec!["ground coffee", "hot water"]);
        assert_eq!(store.get(created.id).await, Some(created.clone()));

        let updated = store
            .replace(
                created.id,
                RecipeReplace {
                    id: Some(created.id),
                    name: Some("foo".into()),
                    ingredients: Some(vec!["bizz".into(), "bang".into()]),
                },
            )
            .await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(store.list().await, vec![updated.clone()]);

        let removed = store.delete(created.id).await?;
        assert_eq!(removed, updated);
        assert!(store.get(created.id).await.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn identical_payloads_get_distinct_ids() -> Result<(), anyhow::Error> {
        let store = RecipeStore::in_memory();
        let mut ids = HashSet::new();
        for _ in 0..25 {
            ids.insert(store.create(coffee()).await?.id);
        }
        assert_eq!(ids.len(), 25);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let store = RecipeStore::in_memory();
        let id = Uuid::new_v4();
        assert!(matches!(store.replace(id, coffee().into()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(store.delete(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn validation_runs_before_lookup() -> Result<(), anyhow::Error> {
        let store = RecipeStore::in_memory();
        assert!(matches!(store.create(RecipeInput::default()).await, Err(ServiceError::Validation(_))));

        let created = store.create(coffee()).await?;
        let mismatched = RecipeReplace { id: Some(Uuid::new_v4()), ..RecipeReplace::from(coffee()) };
        assert!(matches!(store.replace(created.id, mismatched).await, Err(ServiceError::Validation(_))));
        assert_eq!(store.get(created.id).await, Some(created));
        Ok(())
    }

    #[tokio::test]
    async fn replace_keeps_list_position() -> Result<(), anyhow::Error> {
        let store = RecipeStore::in_memory();
        let a = store.create(RecipeInput::new("a", &[])).await?;
        let b = store.create(RecipeInput::new("b", &[])).await?;
        store.replace(a.id, RecipeInput::new("a2", &["x"]).into()).await?;
        let names: Vec<String> = store.list().await.into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["a2", "b"]);
        assert_eq!(store.list().await[1].id, b.id);
        Ok(())
    }

    #[tokio::test]
    async fn seeding_only_fills_empty_store() -> Result<(), anyhow::Error> {
        let store = RecipeStore::in_memory();
        let n = store.seed_defaults().await?;
        assert_eq!(n, seed::default_recipes().len());
        assert_eq!(store.seed_defaults().await?, 0);
        assert_eq!(store.list().await.len(), n);
        assert!(store.list().await.iter().any(|r| r.name == "milkshake"));
        Ok(())
    }

    #[tokio::test]
    async fn file_backed_recipes_survive_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("recipes_{}.json", Uuid::new_v4()));
        let store = RecipeStore::open(&tmp).await?;
        let first = store.create(coffee()).await?;
        let second = store.create(RecipeInput::new("tea", &["leaves"])).await?;
        store.delete(first.id).await?;

        let reopened = RecipeStore::open(&tmp).await?;
        assert_eq!(reopened.list().await, vec![second]);
        assert_eq!(reopened.seed_defaults().await?, 0);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn works_behind_trait_object() -> Result<(), anyhow::Error> {
        let repo: Arc<dyn RecipeRepository> = RecipeStore::in_memory();
        let created = repo.create(coffee()).await?;
        assert_eq!(repo.list().await.len(), 1);
        assert!(repo.get(created.id).await.is_some());
        repo.delete(created.id).await?;
        assert!(repo.list().await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_is_not_listed_when_save_fails() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("recipes_unwritable_{}.json", Uuid::new_v4()));
        let store = RecipeStore::open(&tmp).await?;
        tokio::fs::remove_file(&tmp).await?;
        tokio::fs::create_dir(&tmp).await?;

        assert!(matches!(store.create(coffee()).await, Err(ServiceError::Storage(_))));
        assert!(store.list().await.is_empty());

        let _ = tokio::fs::remove_dir(&tmp).await;
        Ok(())
    }
}
