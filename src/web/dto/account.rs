use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AccountResponse {
    pub authenticated: bool,
    pub loyalty_points: u32,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub enum MentorshipTopic {
    #[default]
    #[serde(rename = "Career Advice")]
    CareerAdvice,
    #[serde(rename = "Portfolio Review")]
    PortfolioReview,
    #[serde(rename = "Technical Skills")]
    TechnicalSkills,
    #[serde(rename = "Business Strategy")]
    BusinessStrategy,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct MentorshipRequest {
    #[serde(default)]
    pub topic: MentorshipTopic,
    pub goals: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MentorshipResponse {
    pub submitted: bool,
    pub message: String,
}
