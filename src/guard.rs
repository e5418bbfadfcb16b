//! Precondition checks shared by the builders and the command handlers.

use url::Url;

use crate::errors::ArgumentError;

/// Returns the value unchanged, or an error if it is empty or only
/// whitespace.
pub fn ensure_not_blank(name: &'static str, value: impl Into<String>) -> Result<String, ArgumentError> {
    let value = value.into();

    if value.trim().is_empty() {
        Err(ArgumentError::Blank { name })
    } else {
        Ok(value)
    }
}

/// Parses the value as an absolute URL.
pub fn ensure_url(name: &'static str, value: impl AsRef<str>) -> Result<Url, ArgumentError> {
    let value = value.as_ref();

    if value.trim().is_empty() {
        return Err(ArgumentError::Blank { name });
    }

    Url::parse(value).map_err(|source| ArgumentError::InvalidUrl {
        name,
        value: value.to_owned(),
        source,
    })
}

/// Whether an attachment with this content type is an image. The
/// comparison is case-sensitive and the subtype may be empty.
///
/// ```
/// use recipebot::guard::is_image;
/// assert!(is_image(Some("image/png")));
/// assert!(is_image(Some("image/")));
/// assert!(!is_image(Some("Image/png")));
/// assert!(!is_image(None));
/// ```
pub fn is_image(content_type: Option<&str>) -> bool {
    match content_type {
        Some(content_type) => content_type
            .strip_prefix(mime::IMAGE.as_str())
            .map_or(false, |rest| rest.starts_with('/')),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{ensure_not_blank, ensure_url, is_image};
    use crate::errors::ArgumentError;

    #[test]
    fn blank_values_are_rejected() {
        for value in &["", " ", "\t\n", "\u{2003}"] {
            match ensure_not_blank("title", *value) {
                Err(ArgumentError::Blank { name }) => assert_eq!(name, "title"),
                other => panic!("expected blank error for {:?}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn values_are_not_trimmed() {
        assert_eq!(ensure_not_blank("title", " Soup ").unwrap(), " Soup ");
    }

    #[test]
    fn urls_must_be_absolute() {
        assert!(ensure_url("image", "https://cdn.discordapp.com/a.png").is_ok());
        assert!(matches!(
            ensure_url("image", "a.png"),
            Err(ArgumentError::InvalidUrl { .. })
        ));
        assert!(matches!(ensure_url("image", " "), Err(ArgumentError::Blank { .. })));
    }

    #[test]
    fn other_media_types_are_not_images() {
        assert!(!is_image(Some("video/mp4")));
        assert!(!is_image(Some("imagex/png")));
        assert!(!is_image(Some("image")));
        assert!(!is_image(Some("")));
        assert!(!is_image(Some(" image/png")));
    }

    proptest! {
        #[test]
        fn image_prefix_decides(subtype in ".*") {
            let image = format!("image/{}", subtype);
            let upper = format!("IMAGE/{}", subtype);
            let text = format!("text/{}", subtype);

            prop_assert!(is_image(Some(&image)), "{:?} is an image", image);
            prop_assert!(!is_image(Some(&upper)), "{:?} is not an image", upper);
            prop_assert!(!is_image(Some(&text)), "{:?} is not an image", text);
        }
    }
}
