use super::CampaignRequest;

pub fn render_prompt(request: &CampaignRequest) -> String {
    format!(
        "Generate two high-converting ad copy variants for {}.\n\nProduct: {}\nAudience: {}\nPast Data: {}",
        request.platform,
        request.product,
        request.audience,
        request.past_data.as_deref().unwrap_or(""),
    )
}
