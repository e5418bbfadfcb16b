use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use log::{info, Logger};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{invoker, unsupported, Bot};
use crate::category::{choice, RecipeCategory};
use crate::db::Db;
use crate::embed::recipe_embed;
use crate::errors::{ArgumentError, BotError};
use crate::guard::{ensure_not_blank, is_image};
use crate::limits::{CharacterLimits, Limits};
use crate::pending::PendingAttachments;
use crate::persistence::{
    create_author_entity, create_recipe_entity, parse_discord_id, read_author_data,
    read_recipe_data, Id, RecipeSummary,
};
use crate::platform::{
    Interaction, InteractionKind, InteractionResponse, Modal, TextInput, TextInputStyle,
};
use crate::recipe::{AuthorData, AuthorModel, RecipeDataBuilder, RecipeModelFactory};

const MODAL_PREFIX: &str = "recipe";
const NO_ATTACHMENT: &str = "-";

const TITLE_INPUT: &str = "title";
const INGREDIENTS_INPUT: &str = "ingredients";
const STEPS_INPUT: &str = "steps";
const NOTES_INPUT: &str = "notes";
const TAGS_INPUT: &str = "tags";

/// Discord refuses text inputs longer than this.
const MAX_TEXT_INPUT_LENGTH: usize = 4000;

/// Discord's limit on plain message content.
const MAX_CONTENT_LENGTH: usize = 2000;

/// Listing headings carry user input such as tags and names.
const MAX_HEADING_LENGTH: usize = 200;

/// Collects, validates, renders and stores recipes.
#[derive(Clone)]
pub struct RecipeBot {
    db: Arc<dyn Db + Send + Sync>,
    limits: Limits,
    pending: Arc<PendingAttachments>,
}

impl Bot for RecipeBot {
    const NAME: &'static str = "recipe-bot";

    fn handle<'a>(
        &'a self,
        logger: &'a Logger,
        interaction: &'a Interaction,
    ) -> BoxFuture<'a, Result<InteractionResponse, BotError>> {
        async move {
            match (interaction.kind(), interaction.command_name()) {
                (Some(InteractionKind::ApplicationCommand), Some(name)) => match name {
                    "recipe" => self.open_form(interaction),
                    "recipes" => self.list_by_category(interaction).await,
                    "recipes-by-tag" => self.list_by_tag(interaction).await,
                    "recipes-by-user" => self.list_by_user(interaction).await,
                    "my-recipes" => self.list_own(interaction).await,
                    "show-recipe" => self.show(interaction).await,
                    "delete-recipe" => self.delete(logger, interaction).await,
                    "forget-me" => self.forget(logger, interaction).await,
                    _ => Err(unsupported(interaction)),
                },
                (Some(InteractionKind::ModalSubmit), _) => self.submit(logger, interaction).await,
                _ => Err(unsupported(interaction)),
            }
        }
        .boxed()
    }

    fn stored_recipes(&self) -> BoxFuture<'_, Result<Option<i64>, BotError>> {
        async move { Ok(Some(self.db.count_recipes().await?)) }.boxed()
    }
}

impl RecipeBot {
    pub fn new(db: Arc<dyn Db + Send + Sync>, limits: Limits, pending: Arc<PendingAttachments>) -> Self {
        Self { db, limits, pending }
    }

    /// `/recipe category [image]`: remembers the image and opens the
    /// recipe form.
    fn open_form(&self, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let category = choice::from_choice(interaction.required_string_option("category")?)?;
        let user_id = invoker(interaction)?.numeric_id()?;

        let key = match interaction.attachment_option("image")? {
            Some(attachment) if !is_image(attachment.content_type.as_deref()) => {
                return Err(ArgumentError::NotAnImage {
                    filename: attachment.filename.clone(),
                    content_type: attachment.content_type.clone(),
                }
                .into())
            }
            Some(attachment) => Some(self.pending.insert(user_id, attachment.clone())),
            None => None,
        };

        Ok(InteractionResponse::modal(recipe_form(category, key, &self.limits)))
    }

    /// Handles the submitted recipe form.
    async fn submit(&self, logger: &Logger, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let custom_id = interaction.custom_id().unwrap_or_default();
        let (category, key) = parse_form_id(custom_id).ok_or_else(|| ArgumentError::InvalidEnum {
            kind: "recipe form",
            value: custom_id.to_owned(),
        })?;

        let user = invoker(interaction)?;
        let user_id = user.numeric_id()?;

        let attachment = match key {
            Some(key) => Some(self.pending.take(&key, user_id)?),
            None => None,
        };

        let input = |id| interaction.text_input(id).unwrap_or_default();
        let mut builder = RecipeDataBuilder::new(
            user_id,
            category,
            input(TITLE_INPUT),
            input(INGREDIENTS_INPUT),
            input(STEPS_INPUT),
        )?
        .with_notes(interaction.text_input(NOTES_INPUT))
        .with_tags(interaction.text_input(TAGS_INPUT));

        if let Some(attachment) = &attachment {
            builder = builder.with_image(attachment)?;
        }

        let recipe = RecipeModelFactory::new(&self.limits).create(builder.build())?;

        let name = interaction.invoker_display_name().unwrap_or_else(|| user.display_name());
        let author = AuthorModel::new(AuthorData::new(name, user.avatar_url())?, &self.limits)?;

        let embed = recipe_embed(&recipe, &author)?;

        let entity = create_recipe_entity(
            &recipe,
            create_author_entity(user_id, &author),
            OffsetDateTime::now_utc().unix_timestamp(),
        );
        let id = self.db.save_recipe(entity).await?;

        info!(logger, "Saved recipe"; "id" => id, "category" => %category, "length" => recipe.total_length());

        Ok(InteractionResponse::embed(embed))
    }

    async fn list_by_category(&self, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let category = choice::from_choice(interaction.required_string_option("category")?)?;
        let recipes = self.db.recipes_by_category(category).await?;

        Ok(InteractionResponse::message(format_listing(
            &format!("{} recipes", category),
            &recipes,
        )))
    }

    async fn list_by_tag(&self, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let tag = ensure_not_blank("tag", interaction.required_string_option("tag")?)?;
        let recipes = self.db.recipes_by_tag(&tag).await?;

        Ok(InteractionResponse::message(format_listing(
            &format!("Recipes tagged {:?}", tag.trim()),
            &recipes,
        )))
    }

    async fn list_by_user(&self, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let user = interaction.required_user_option("user")?;
        let recipes = self.db.recipes_by_author(user.numeric_id()?).await?;

        Ok(InteractionResponse::message(format_listing(
            &format!("Recipes by {}", user.display_name()),
            &recipes,
        )))
    }

    async fn list_own(&self, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let user_id = invoker(interaction)?.numeric_id()?;
        let recipes = self.db.recipes_by_author(user_id).await?;

        Ok(InteractionResponse::ephemeral(format_listing("Your recipes", &recipes)))
    }

    /// `/show-recipe id`: validates and renders a stored recipe again.
    async fn show(&self, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let id: Id = interaction.required_integer_option("id")?;
        let entity = self
            .db
            .retrieve_recipe(id)
            .await?
            .ok_or(BotError::NonExistentRecipe(id))?;

        let recipe = RecipeModelFactory::new(&self.limits).create(read_recipe_data(&entity)?)?;
        let author = AuthorModel::new(read_author_data(&entity.author)?, &self.limits)?;

        Ok(InteractionResponse::embed(recipe_embed(&recipe, &author)?))
    }

    /// `/delete-recipe id`: only the author may delete a recipe.
    async fn delete(&self, logger: &Logger, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let id: Id = interaction.required_integer_option("id")?;
        let user_id = invoker(interaction)?.numeric_id()?;

        let entity = self
            .db
            .retrieve_recipe(id)
            .await?
            .ok_or(BotError::NonExistentRecipe(id))?;

        if parse_discord_id(&entity.author.discord_id)? != user_id {
            return Err(BotError::NotRecipeAuthor(id));
        }

        self.db.delete_recipe(id).await?;

        info!(logger, "Deleted recipe"; "id" => id);

        Ok(InteractionResponse::ephemeral(format!(
            "Deleted recipe #{} ({}).",
            id, entity.title
        )))
    }

    /// `/forget-me`: removes the invoking user and all their recipes.
    async fn forget(&self, logger: &Logger, interaction: &Interaction) -> Result<InteractionResponse, BotError> {
        let user_id = invoker(interaction)?.numeric_id()?;
        let count = self.db.delete_author(user_id).await?;

        info!(logger, "Forgot author"; "recipes" => count);

        Ok(InteractionResponse::ephemeral(format!(
            "Forgot you and deleted {} {}.",
            count,
            if count == 1 { "recipe" } else { "recipes" }
        )))
    }
}

fn recipe_form(category: RecipeCategory, key: Option<Uuid>, limits: &Limits) -> Modal {
    let key = key.map_or_else(|| NO_ATTACHMENT.to_owned(), |k| k.to_string());
    let custom_id = format!("{}:{}:{}", MODAL_PREFIX, choice::to_choice(category), key);
    let cap = |max: usize| max.clamp(1, MAX_TEXT_INPUT_LENGTH);

    Modal::new(custom_id, format!("New {} recipe", category))
        .input(TextInput::new(TITLE_INPUT, "Title", TextInputStyle::Short, cap(limits.max_title_length())))
        .input(TextInput::new(
            INGREDIENTS_INPUT,
            "Ingredients",
            TextInputStyle::Paragraph,
            cap(limits.max_field_value_length()),
        ))
        .input(TextInput::new(
            STEPS_INPUT,
            "Cooking steps",
            TextInputStyle::Paragraph,
            cap(limits.max_field_value_length()),
        ))
        .input(
            TextInput::new(
                NOTES_INPUT,
                "Additional notes",
                TextInputStyle::Paragraph,
                cap(limits.max_field_value_length()),
            )
            .optional(),
        )
        .input(
            TextInput::new(TAGS_INPUT, "Tags", TextInputStyle::Short, cap(limits.max_footer_length()))
                .optional()
                .placeholder("quick, easy, spicy"),
        )
}

/// Splits `recipe:<category>:<key>` back into its parts.
fn parse_form_id(custom_id: &str) -> Option<(RecipeCategory, Option<Uuid>)> {
    let mut parts = custom_id.splitn(3, ':');

    if parts.next()? != MODAL_PREFIX {
        return None;
    }

    let category = choice::from_choice(parts.next()?).ok()?;
    let key = match parts.next()? {
        NO_ATTACHMENT => None,
        key => Some(Uuid::parse_str(key).ok()?),
    };

    Some((category, key))
}

/// Formats recipe summaries as one line each, stopping before the
/// message would grow past what Discord accepts. Headings longer than
/// `MAX_HEADING_LENGTH` are cut short.
fn format_listing(heading: &str, recipes: &[RecipeSummary]) -> String {
    let heading = shorten(heading, MAX_HEADING_LENGTH);

    if recipes.is_empty() {
        return format!("**{}**\nNo recipes found.", heading);
    }

    let mut listing = format!("**{}**", heading);
    let mut length = listing.chars().count();

    for (shown, recipe) in recipes.iter().enumerate() {
        let line = format!(
            "\n#{} {} ({}) by {}",
            recipe.id, recipe.title, recipe.category, recipe.author_name
        );
        let more = format!("\n…and {} more", recipes.len() - shown);

        // the last line needs no room for the remainder note
        let reserved = if shown + 1 < recipes.len() {
            more.chars().count()
        } else {
            0
        };
        let line_length = line.chars().count();

        if length + line_length + reserved > MAX_CONTENT_LENGTH {
            listing.push_str(&more);
            break;
        }

        listing.push_str(&line);
        length += line_length;
    }

    listing
}

/// Cuts `text` to at most `max` characters, ending with an ellipsis when
/// anything was dropped.
fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }

    let mut shortened: String = text.chars().take(max.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::{
        format_listing, parse_form_id, recipe_form, shorten, MAX_CONTENT_LENGTH, MAX_HEADING_LENGTH,
    };
    use crate::category::RecipeCategory;
    use crate::limits::Limits;
    use crate::persistence::RecipeSummary;

    #[test]
    fn form_ids_round_trip() {
        let key = Uuid::new_v4();
        let modal = recipe_form(RecipeCategory::Vegan, Some(key), &Limits::default());

        assert_eq!(parse_form_id(&modal.custom_id), Some((RecipeCategory::Vegan, Some(key))));

        let modal = recipe_form(RecipeCategory::Meat, None, &Limits::default());
        assert_eq!(parse_form_id(&modal.custom_id), Some((RecipeCategory::Meat, None)));
    }

    #[test]
    fn foreign_form_ids_are_refused() {
        assert_eq!(parse_form_id("other:meat:-"), None);
        assert_eq!(parse_form_id("recipe:pizza:-"), None);
        assert_eq!(parse_form_id("recipe:meat:not-a-key"), None);
        assert_eq!(parse_form_id("recipe:meat"), None);
    }

    #[test]
    fn form_inputs_follow_the_limits() {
        let limits = Limits {
            title: 100,
            field_value: 9000,
            ..Limits::default()
        };
        let modal = recipe_form(RecipeCategory::Vegetarian, None, &limits);
        let inputs: Vec<_> = modal.inputs().collect();

        assert!(modal.title.chars().count() <= 45);
        assert_eq!(inputs.len(), 5);
        assert_eq!(inputs[0].max_length, 100);
        assert_eq!(inputs[1].max_length, 4000);
        assert!(inputs[0].required && !inputs[3].required && !inputs[4].required);
    }

    fn summary(id: i64) -> RecipeSummary {
        RecipeSummary {
            id,
            title: "Long enough title for a listing line".to_owned(),
            category: RecipeCategory::Snack,
            author_name: "Alex".to_owned(),
        }
    }

    #[test]
    fn listings_name_each_recipe() {
        let listing = format_listing("Snack recipes", &[summary(1), summary(2)]);

        assert_eq!(listing.lines().count(), 3);
        assert!(listing.contains("#2 Long enough title for a listing line (Snack) by Alex"));
        assert_eq!(format_listing("Mine", &[]), "**Mine**\nNo recipes found.");
    }

    #[test]
    fn long_listings_are_truncated() {
        let recipes: Vec<_> = (1..=200).map(summary).collect();
        let listing = format_listing("Everything", &recipes);

        assert!(listing.chars().count() <= MAX_CONTENT_LENGTH);
        assert!(listing.ends_with("more"));
    }

    #[test]
    fn long_headings_are_shortened() {
        let heading = format!("Recipes tagged {:?}", "x".repeat(2500));

        let empty = format_listing(&heading, &[]);
        assert!(empty.chars().count() <= MAX_CONTENT_LENGTH);
        assert!(empty.ends_with("No recipes found."));

        let recipes: Vec<_> = (1..=200).map(summary).collect();
        let listing = format_listing(&heading, &recipes);
        assert!(listing.chars().count() <= MAX_CONTENT_LENGTH);
        assert!(listing.starts_with("**Recipes tagged \"xxx"));
        assert!(listing.ends_with("more"));
    }

    #[test]
    fn shortened_text_keeps_the_limit() {
        assert_eq!(shorten("Soup", 4), "Soup");
        assert_eq!(shorten("Soups", 4), "Sou…");
        assert_eq!(shorten(&"é".repeat(500), MAX_HEADING_LENGTH).chars().count(), MAX_HEADING_LENGTH);
    }

    #[test]
    fn a_last_line_that_fits_exactly_is_shown() {
        let prefix = "\n#1  (Snack) by Alex".chars().count();
        let room = MAX_CONTENT_LENGTH - "**H**".chars().count() - prefix;
        let recipe = RecipeSummary {
            title: "t".repeat(room),
            ..summary(1)
        };

        let listing = format_listing("H", &[recipe.clone()]);
        assert_eq!(listing.chars().count(), MAX_CONTENT_LENGTH);
        assert!(listing.contains("#1 "));
        assert!(!listing.contains("more"));

        let listing = format_listing("H", &[recipe, summary(2)]);
        assert!(listing.chars().count() <= MAX_CONTENT_LENGTH);
        assert!(listing.ends_with("…and 2 more"));
    }
}
