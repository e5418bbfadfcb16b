//! Relational rows for recipes and the mapping between them and the
//! recipe pipeline.

use url::Url;

use crate::category::{persistent, RecipeCategory};
use crate::errors::{ArgumentError, BotError};
use crate::normalization::normalize_tag;
use crate::recipe::{AuthorData, AuthorModel, RecipeData, RecipeFieldData, RecipeModel};

/// An ID in the database.
pub type Id = i64;

/// A row of the `authors` table.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthorEntity {
    pub id: Option<Id>,

    /// The platform user ID, stored as text since SQLite has no
    /// unsigned 64-bit integers.
    pub discord_id: String,

    /// The display name at the time of the last submission.
    pub name: String,

    /// The avatar URL at the time of the last submission.
    pub image_url: String,
}

/// A row of the `recipes` table together with its fields and tags.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeEntity {
    pub id: Option<Id>,
    pub author: AuthorEntity,
    pub title: String,

    /// The stored category code.
    pub category: i64,

    pub image_url: Option<String>,

    /// Seconds since the Unix epoch.
    pub created_at: i64,

    pub fields: Vec<RecipeFieldEntity>,
    pub tags: Vec<RecipeTagEntity>,
}

/// A row of the `recipe_fields` table.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct RecipeFieldEntity {
    pub name: String,
    pub value: String,
    pub sort_order: i64,
}

/// A row of the `recipe_tags` table.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct RecipeTagEntity {
    pub tag: String,

    /// The tag as matched by tag searches.
    pub normalized: String,

    pub sort_order: i64,
}

/// A minimal view of a stored recipe, for listings.
#[derive(Clone, Debug, PartialEq)]
pub struct RecipeSummary {
    pub id: Id,
    pub title: String,
    pub category: RecipeCategory,
    pub author_name: String,
}

/// Creates the author row for a validated author.
pub fn create_author_entity(discord_id: u64, author: &AuthorModel) -> AuthorEntity {
    AuthorEntity {
        id: None,
        discord_id: discord_id.to_string(),
        name: author.name().to_owned(),
        image_url: author.image_url().to_string(),
    }
}

/// Creates a new recipe row from a validated model, numbering fields
/// and tags by position.
pub fn create_recipe_entity(model: &RecipeModel, author: AuthorEntity, created_at: i64) -> RecipeEntity {
    let fields = model
        .fields()
        .iter()
        .zip(0..)
        .map(|(field, sort_order)| RecipeFieldEntity {
            name: field.name().to_owned(),
            value: field.value().to_owned(),
            sort_order,
        })
        .collect();

    let tags = model
        .tags()
        .tags()
        .iter()
        .zip(0..)
        .map(|(tag, sort_order)| RecipeTagEntity {
            tag: tag.clone(),
            normalized: normalize_tag(tag),
            sort_order,
        })
        .collect();

    RecipeEntity {
        id: None,
        author,
        title: model.title().to_owned(),
        category: persistent::to_code(model.category()),
        image_url: model.image_url().map(Url::to_string),
        created_at,
        fields,
        tags,
    }
}

/// Reconstructs the recipe data of a stored recipe. Fields and tags
/// are read in their stored order whatever order the rows came in.
pub fn read_recipe_data(entity: &RecipeEntity) -> Result<RecipeData, BotError> {
    let author_id = parse_discord_id(&entity.author.discord_id)?;
    let category = persistent::from_code(entity.category)?;

    let mut fields: Vec<&RecipeFieldEntity> = entity.fields.iter().collect();
    fields.sort_by_key(|f| f.sort_order);
    let fields = fields
        .into_iter()
        .map(|f| RecipeFieldData::new(f.name.clone(), f.value.clone()))
        .collect();

    let mut tags: Vec<&RecipeTagEntity> = entity.tags.iter().collect();
    tags.sort_by_key(|t| t.sort_order);
    let tags = if tags.is_empty() {
        None
    } else {
        Some(tags.iter().map(|t| t.tag.as_str()).collect::<Vec<_>>().join(", "))
    };

    // stored URLs were validated on the way in, so a bad one is dropped
    // rather than making the recipe unreadable
    let image_url = entity.image_url.as_deref().and_then(|u| Url::parse(u).ok());

    Ok(RecipeData::new(author_id, category, entity.title.clone(), fields)
        .with_tags(tags)
        .with_image_url(image_url))
}

/// Reconstructs the author block of a stored recipe.
pub fn read_author_data(entity: &AuthorEntity) -> Result<AuthorData, ArgumentError> {
    AuthorData::new(entity.name.clone(), &entity.image_url)
}

pub(crate) fn parse_discord_id(id: &str) -> Result<u64, BotError> {
    id.parse()
        .map_err(|_| BotError::MalformedAuthorId(id.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::{create_author_entity, create_recipe_entity, read_recipe_data, RecipeFieldEntity};
    use crate::category::{persistent, RecipeCategory};
    use crate::errors::BotError;
    use crate::limits::Limits;
    use crate::recipe::{AuthorData, AuthorModel, RecipeDataBuilder, RecipeModel, RecipeModelFactory};

    fn model() -> RecipeModel {
        let limits = Limits::default();
        let data = RecipeDataBuilder::new(314, RecipeCategory::Dessert, "Pie", "Apples", "Bake")
            .unwrap()
            .with_notes(Some("Cool first"))
            .with_tags(Some("autumn, Baking ,"))
            .build();

        RecipeModelFactory::new(&limits).create(data).unwrap()
    }

    fn author() -> AuthorModel {
        let data = AuthorData::new("Sam", "https://cdn.discordapp.com/embed/avatars/2.png").unwrap();

        AuthorModel::new(data, &Limits::default()).unwrap()
    }

    #[test]
    fn entity_numbers_fields_and_tags() {
        let entity = create_recipe_entity(&model(), create_author_entity(314, &author()), 1000);

        assert_eq!(entity.author.discord_id, "314");
        assert_eq!(entity.category, persistent::to_code(RecipeCategory::Dessert));
        assert_eq!(
            entity.fields.iter().map(|f| (f.name.as_str(), f.sort_order)).collect::<Vec<_>>(),
            vec![("Ingredients", 0), ("Cooking Steps", 1), ("Additional Notes", 2)]
        );
        assert_eq!(
            entity.tags.iter().map(|t| (t.tag.as_str(), t.normalized.as_str(), t.sort_order)).collect::<Vec<_>>(),
            vec![("autumn", "autumn", 0), ("Baking", "baking", 1)]
        );
    }

    #[test]
    fn reading_respects_stored_order() {
        let mut entity = create_recipe_entity(&model(), create_author_entity(314, &author()), 1000);
        entity.fields.reverse();
        entity.tags.reverse();

        let data = read_recipe_data(&entity).unwrap();

        assert_eq!(data.author_id(), 314);
        assert_eq!(data.category(), RecipeCategory::Dessert);
        assert_eq!(
            data.fields().iter().map(|f| f.field_name()).collect::<Vec<_>>(),
            vec!["Ingredients", "Cooking Steps", "Additional Notes"]
        );
        assert_eq!(data.tags(), Some("autumn, Baking"));
    }

    #[test]
    fn recipes_without_tags_read_back_without_tags() {
        let limits = Limits::default();
        let data = RecipeDataBuilder::new(1, RecipeCategory::Snack, "Toast", "Bread", "Toast it")
            .unwrap()
            .build();
        let model = RecipeModelFactory::new(&limits).create(data).unwrap();
        let entity = create_recipe_entity(&model, create_author_entity(1, &author()), 0);

        assert_eq!(read_recipe_data(&entity).unwrap().tags(), None);
    }

    #[test]
    fn corrupt_rows_are_reported() {
        let mut entity = create_recipe_entity(&model(), create_author_entity(314, &author()), 0);
        entity.category = 12345;
        assert!(matches!(read_recipe_data(&entity), Err(BotError::UnknownCategoryCode(12345))));

        let mut entity = create_recipe_entity(&model(), create_author_entity(314, &author()), 0);
        entity.author.discord_id = "-1".to_owned();
        assert!(matches!(read_recipe_data(&entity), Err(BotError::MalformedAuthorId(_))));
    }

    #[test]
    fn stored_data_validates_again() {
        let limits = Limits::default();
        let mut entity = create_recipe_entity(&model(), create_author_entity(314, &author()), 0);
        entity.fields.push(RecipeFieldEntity {
            name: "Serving".to_owned(),
            value: "Warm".to_owned(),
            sort_order: 3,
        });

        let model = RecipeModelFactory::new(&limits).create(read_recipe_data(&entity).unwrap()).unwrap();

        assert_eq!(model.fields().len(), 4);
        assert_eq!(model.tags().to_string(), "Dessert, autumn, Baking");
    }
}
