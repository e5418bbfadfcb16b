use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuccessResponse<'a> {
    Healthz {
        bot: &'a str,
        revision: Option<&'a str>,
        timestamp: Option<&'a str>,
        version: &'a str,

        #[serde(skip_serializing_if = "Option::is_none")]
        recipes: Option<i64>,
    },
}
