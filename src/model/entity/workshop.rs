use serde::{Deserialize, Serialize};

use crate::model::repo::{ResourceType, ResourceTyped};

#[derive(Debug, Clone, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct Workshop {
    id: u32,
    title: String,
    instructor: String,
    date: String,
    time: String,
    spots_left: u32,
    price: u64,
    is_live: bool,
    thumbnail: String,
}

impl ResourceTyped for Workshop {
    fn get_resource_type() -> ResourceType {
        ResourceType::Workshop
    }
}

impl Workshop {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    pub fn spots_left(&self) -> u32 {
        self.spots_left
    }

    pub fn is_live(&self) -> bool {
        self.is_live
    }
}
