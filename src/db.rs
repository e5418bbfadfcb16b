use futures::future::BoxFuture;

use crate::category::RecipeCategory;
use crate::errors::BotError;
use crate::persistence::{Id, RecipeEntity, RecipeSummary};

pub trait Db {
    fn count_recipes(&self) -> BoxFuture<Result<i64, BotError>>;

    /// Deletes an author and, by cascade, all of their recipes.
    /// Returns the number of recipes removed.
    fn delete_author(&self, discord_id: u64) -> BoxFuture<Result<u64, BotError>>;

    fn delete_recipe(&self, id: Id) -> BoxFuture<Result<(), BotError>>;

    fn recipes_by_author(&self, discord_id: u64) -> BoxFuture<Result<Vec<RecipeSummary>, BotError>>;

    fn recipes_by_category(
        &self,
        category: RecipeCategory,
    ) -> BoxFuture<Result<Vec<RecipeSummary>, BotError>>;

    fn recipes_by_tag(&self, tag: &str) -> BoxFuture<Result<Vec<RecipeSummary>, BotError>>;

    fn retrieve_recipe(&self, id: Id) -> BoxFuture<Result<Option<RecipeEntity>, BotError>>;

    /// Saves a new recipe, creating or refreshing its author. Returns
    /// the ID of the new recipe.
    fn save_recipe(&self, recipe: RecipeEntity) -> BoxFuture<Result<Id, BotError>>;
}

pub use self::sqlite::*;

mod sqlite {
    use std::str::FromStr;

    use futures::future::BoxFuture;
    use futures::FutureExt;
    use sqlx::{
        self,
        sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
    };

    use crate::category::{persistent, RecipeCategory};
    use crate::errors::{map_sqlx_error, BotError};
    use crate::normalization::normalize_tag;
    use crate::persistence::{
        AuthorEntity, Id, RecipeEntity, RecipeFieldEntity, RecipeSummary, RecipeTagEntity,
    };

    pub struct SqliteDb {
        pool: SqlitePool,
    }

    impl SqliteDb {
        pub fn new(pool: SqlitePool) -> Self {
            SqliteDb { pool }
        }

        /// Opens the database at `connection_string`, creating it if
        /// necessary, and applies any pending migrations.
        pub async fn connect(connection_string: &str) -> Result<Self, BotError> {
            let options = SqliteConnectOptions::from_str(connection_string)
                .map_err(map_sqlx_error)?
                .create_if_missing(true)
                .foreign_keys(true);

            let pool = SqlitePoolOptions::new()
                .connect_with(options)
                .await
                .map_err(map_sqlx_error)?;

            let db = Self::new(pool);
            db.migrate().await?;

            Ok(db)
        }

        /// Opens a fresh, migrated in-memory database. Every call gets
        /// its own database.
        pub async fn in_memory() -> Result<Self, BotError> {
            let options = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(map_sqlx_error)?
                .foreign_keys(true);

            // each connection to `:memory:` is a separate database, so
            // keep exactly one alive
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await
                .map_err(map_sqlx_error)?;

            let db = Self::new(pool);
            db.migrate().await?;

            Ok(db)
        }

        pub async fn migrate(&self) -> Result<(), BotError> {
            sqlx::migrate!("./migrations")
                .run(&self.pool)
                .await
                .map_err(|source| BotError::Migration { source })
        }
    }

    // these can be simplified once async functions in traits are usable
    // behind `dyn`
    impl super::Db for SqliteDb {
        fn count_recipes(&self) -> BoxFuture<Result<i64, BotError>> {
            async move {
                let query = sqlx::query_as::<_, (i64,)>(include_str!("queries/count.sql"));

                let (count,) = query.fetch_one(&self.pool).await.map_err(map_sqlx_error)?;

                Ok(count)
            }
            .boxed()
        }

        fn delete_author(&self, author: u64) -> BoxFuture<Result<u64, BotError>> {
            let discord_id = author.to_string();

            async move {
                let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

                let (recipes,): (i64,) = sqlx::query_as(include_str!("queries/count_author_recipes.sql"))
                    .bind(&discord_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_sqlx_error)?;

                let count = sqlx::query(include_str!("queries/delete_author.sql"))
                    .bind(&discord_id)
                    .execute(&mut *tx)
                    .await
                    .map_err(map_sqlx_error)?
                    .rows_affected();

                if count == 0 {
                    return Err(BotError::NonExistentAuthor(author));
                }

                tx.commit().await.map_err(map_sqlx_error)?;

                Ok(recipes as u64)
            }
            .boxed()
        }

        fn delete_recipe(&self, id: Id) -> BoxFuture<Result<(), BotError>> {
            async move {
                let query = sqlx::query(include_str!("queries/delete_recipe.sql"));

                let count = query
                    .bind(id)
                    .execute(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?
                    .rows_affected();

                if count == 0 {
                    Err(BotError::NonExistentRecipe(id))
                } else {
                    Ok(())
                }
            }
            .boxed()
        }

        fn recipes_by_author(&self, discord_id: u64) -> BoxFuture<Result<Vec<RecipeSummary>, BotError>> {
            let discord_id = discord_id.to_string();

            async move {
                let query = sqlx::query(include_str!("queries/recipes_by_author.sql"));

                query
                    .bind(discord_id)
                    .try_map(|row: SqliteRow| new_summary(&row))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)
            }
            .boxed()
        }

        fn recipes_by_category(
            &self,
            category: RecipeCategory,
        ) -> BoxFuture<Result<Vec<RecipeSummary>, BotError>> {
            let code = persistent::to_code(category);

            async move {
                let query = sqlx::query(include_str!("queries/recipes_by_category.sql"));

                query
                    .bind(code)
                    .try_map(|row: SqliteRow| new_summary(&row))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)
            }
            .boxed()
        }

        fn recipes_by_tag(&self, tag: &str) -> BoxFuture<Result<Vec<RecipeSummary>, BotError>> {
            let normalized = normalize_tag(tag);

            async move {
                let query = sqlx::query(include_str!("queries/recipes_by_tag.sql"));

                query
                    .bind(normalized)
                    .try_map(|row: SqliteRow| new_summary(&row))
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)
            }
            .boxed()
        }

        fn retrieve_recipe(&self, id: Id) -> BoxFuture<Result<Option<RecipeEntity>, BotError>> {
            async move {
                let query = sqlx::query(include_str!("queries/retrieve_recipe.sql"));

                let recipe: Option<RecipeEntity> = query
                    .bind(id)
                    .try_map(|row: SqliteRow| new_recipe(&row))
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                let mut recipe = match recipe {
                    Some(recipe) => recipe,
                    None => return Ok(None),
                };

                recipe.fields = sqlx::query_as::<_, RecipeFieldEntity>(include_str!("queries/retrieve_fields.sql"))
                    .bind(id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                recipe.tags = sqlx::query_as::<_, RecipeTagEntity>(include_str!("queries/retrieve_tags.sql"))
                    .bind(id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

                Ok(Some(recipe))
            }
            .boxed()
        }

        fn save_recipe(&self, recipe: RecipeEntity) -> BoxFuture<Result<Id, BotError>> {
            async move {
                let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

                let (author_id,): (Id,) = sqlx::query_as(include_str!("queries/upsert_author.sql"))
                    .bind(&recipe.author.discord_id)
                    .bind(&recipe.author.name)
                    .bind(&recipe.author.image_url)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_sqlx_error)?;

                let (id,): (Id,) = sqlx::query_as(include_str!("queries/create_recipe.sql"))
                    .bind(author_id)
                    .bind(&recipe.title)
                    .bind(recipe.category)
                    .bind(&recipe.image_url)
                    .bind(recipe.created_at)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(map_sqlx_error)?;

                for field in &recipe.fields {
                    sqlx::query(include_str!("queries/create_field.sql"))
                        .bind(id)
                        .bind(&field.name)
                        .bind(&field.value)
                        .bind(field.sort_order)
                        .execute(&mut *tx)
                        .await
                        .map_err(map_sqlx_error)?;
                }

                for tag in &recipe.tags {
                    sqlx::query(include_str!("queries/create_tag.sql"))
                        .bind(id)
                        .bind(&tag.tag)
                        .bind(&tag.normalized)
                        .bind(tag.sort_order)
                        .execute(&mut *tx)
                        .await
                        .map_err(map_sqlx_error)?;
                }

                tx.commit().await.map_err(map_sqlx_error)?;

                Ok(id)
            }
            .boxed()
        }
    }

    fn new_summary(row: &SqliteRow) -> Result<RecipeSummary, sqlx::Error> {
        Ok(RecipeSummary {
            id: try_get(row, "id")?,
            title: try_get(row, "title")?,
            category: decode_category(try_get(row, "category")?)?,
            author_name: try_get(row, "author_name")?,
        })
    }

    fn new_recipe(row: &SqliteRow) -> Result<RecipeEntity, sqlx::Error> {
        let author = AuthorEntity {
            id: Some(try_get(row, "author_id")?),
            discord_id: try_get(row, "discord_id")?,
            name: try_get(row, "author_name")?,
            image_url: try_get(row, "author_image_url")?,
        };

        Ok(RecipeEntity {
            id: Some(try_get(row, "id")?),
            author,
            title: try_get(row, "title")?,
            category: try_get(row, "category")?,
            image_url: try_get(row, "image_url")?,
            created_at: try_get(row, "created_at")?,
            fields: vec![],
            tags: vec![],
        })
    }

    fn decode_category(code: i64) -> Result<RecipeCategory, sqlx::Error> {
        persistent::from_code(code).map_err(|e| sqlx::Error::Decode(Box::new(e)))
    }

    fn try_get<'a, T: sqlx::Type<sqlx::Sqlite> + sqlx::decode::Decode<'a, sqlx::Sqlite>>(
        row: &'a SqliteRow,
        column: &str,
    ) -> Result<T, sqlx::Error> {
        use sqlx::prelude::*;

        row.try_get(column)
    }
}

#[cfg(test)]
mod tests {
    use super::{Db, SqliteDb};
    use crate::category::RecipeCategory;
    use crate::errors::BotError;
    use crate::limits::Limits;
    use crate::persistence::{create_author_entity, create_recipe_entity, read_recipe_data, RecipeEntity};
    use crate::recipe::{AuthorData, AuthorModel, RecipeDataBuilder, RecipeModelFactory};

    fn entity(author_id: u64, name: &str, category: RecipeCategory, title: &str, tags: &str) -> RecipeEntity {
        let limits = Limits::default();
        let data = RecipeDataBuilder::new(author_id, category, title, "Flour\nWater", "Mix\nBake")
            .unwrap()
            .with_notes(Some("Rest overnight"))
            .with_tags(Some(tags))
            .build();
        let model = RecipeModelFactory::new(&limits).create(data).unwrap();
        let author = AuthorModel::new(
            AuthorData::new(name, "https://cdn.discordapp.com/embed/avatars/0.png").unwrap(),
            &limits,
        )
        .unwrap();

        create_recipe_entity(&model, create_author_entity(author_id, &author), 1_700_000_000)
    }

    #[tokio::test]
    async fn saved_recipes_read_back_in_order() {
        let db = SqliteDb::in_memory().await.unwrap();
        let id = db
            .save_recipe(entity(u64::MAX, "Alex", RecipeCategory::Pastry, "Bread", "sourdough, slow"))
            .await
            .unwrap();

        let stored = db.retrieve_recipe(id).await.unwrap().unwrap();
        let data = read_recipe_data(&stored).unwrap();

        assert_eq!(data.author_id(), u64::MAX);
        assert_eq!(data.title(), "Bread");
        assert_eq!(data.category(), RecipeCategory::Pastry);
        assert_eq!(
            data.fields().iter().map(|f| (f.field_name(), f.field_data())).collect::<Vec<_>>(),
            vec![
                ("Ingredients", "Flour\nWater"),
                ("Cooking Steps", "Mix\nBake"),
                ("Additional Notes", "Rest overnight")
            ]
        );
        assert_eq!(
            data.tags().unwrap().split(", ").collect::<Vec<_>>(),
            vec!["sourdough", "slow"]
        );
        assert_eq!(stored.created_at, 1_700_000_000);
    }

    #[tokio::test]
    async fn missing_recipes_are_none() {
        let db = SqliteDb::in_memory().await.unwrap();

        assert!(db.retrieve_recipe(1).await.unwrap().is_none());
        assert!(matches!(db.delete_recipe(1).await, Err(BotError::NonExistentRecipe(1))));
    }

    #[tokio::test]
    async fn queries_filter_recipes() {
        let db = SqliteDb::in_memory().await.unwrap();
        let bread = db
            .save_recipe(entity(1, "Alex", RecipeCategory::Pastry, "Bread", "Baking"))
            .await
            .unwrap();
        let cake = db
            .save_recipe(entity(2, "Sam", RecipeCategory::Dessert, "Cake", "baking, sweet"))
            .await
            .unwrap();
        let soup = db
            .save_recipe(entity(1, "Alex", RecipeCategory::Vegan, "Soup", "quick"))
            .await
            .unwrap();

        let ids = |summaries: Vec<crate::persistence::RecipeSummary>| {
            summaries.into_iter().map(|s| s.id).collect::<Vec<_>>()
        };

        assert_eq!(ids(db.recipes_by_tag(" BAKING ").await.unwrap()), vec![bread, cake]);
        assert_eq!(ids(db.recipes_by_author(1).await.unwrap()), vec![bread, soup]);
        assert_eq!(ids(db.recipes_by_category(RecipeCategory::Dessert).await.unwrap()), vec![cake]);
        assert!(db.recipes_by_category(RecipeCategory::Meat).await.unwrap().is_empty());
        assert_eq!(db.count_recipes().await.unwrap(), 3);

        let summary = &db.recipes_by_category(RecipeCategory::Vegan).await.unwrap()[0];
        assert_eq!(summary.title, "Soup");
        assert_eq!(summary.author_name, "Alex");
    }

    #[tokio::test]
    async fn authors_are_refreshed_on_save() {
        let db = SqliteDb::in_memory().await.unwrap();
        db.save_recipe(entity(1, "Alex", RecipeCategory::Fish, "Tacos", ""))
            .await
            .unwrap();
        let id = db
            .save_recipe(entity(1, "Alexandra", RecipeCategory::Fish, "Curry", ""))
            .await
            .unwrap();

        let stored = db.retrieve_recipe(id).await.unwrap().unwrap();

        assert_eq!(stored.author.name, "Alexandra");
        assert!(db
            .recipes_by_author(1)
            .await
            .unwrap()
            .iter()
            .all(|s| s.author_name == "Alexandra"));
    }

    #[tokio::test]
    async fn deleting_cascades() {
        let db = SqliteDb::in_memory().await.unwrap();
        let first = db
            .save_recipe(entity(1, "Alex", RecipeCategory::Fish, "Tacos", "quick"))
            .await
            .unwrap();
        db.save_recipe(entity(1, "Alex", RecipeCategory::Fish, "Curry", "spicy"))
            .await
            .unwrap();
        let other = db
            .save_recipe(entity(2, "Sam", RecipeCategory::Fish, "Pie", "quick"))
            .await
            .unwrap();

        db.delete_recipe(first).await.unwrap();
        assert!(db.retrieve_recipe(first).await.unwrap().is_none());
        assert_eq!(db.recipes_by_tag("quick").await.unwrap().len(), 1);

        assert_eq!(db.delete_author(1).await.unwrap(), 1);
        assert!(db.recipes_by_author(1).await.unwrap().is_empty());
        assert!(matches!(db.delete_author(1).await, Err(BotError::NonExistentAuthor(1))));

        assert!(db.retrieve_recipe(other).await.unwrap().is_some());
        assert_eq!(db.count_recipes().await.unwrap(), 1);
    }
}
