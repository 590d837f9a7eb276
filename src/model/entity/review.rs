use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct Review {
    id: u32,
    author: String,
    avatar: String,
    rating: u8,
    date: String,
    comment: String,
}

impl Review {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn rating(&self) -> u8 {
        self.rating
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}
