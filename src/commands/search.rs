use crate::cli::SearchArgs;
use crate::commands::{emit, CommandError};
use crate::core::display::render_search_results;
use crate::core::input::{non_empty, parse_list};
use crate::models::{SearchQuery, SearchRequest};
use crate::services::AgentApiClient;
use std::io::Write;
use validator::Validate;

/// Search for agents matching the requester and show them ranked
pub async fn run<W: Write>(
    client: &AgentApiClient,
    args: SearchArgs,
    out: &mut W,
) -> Result<(), CommandError> {
    let request = build_request(&args);
    request.validate()?;

    let results = client.search(&request).await?;
    tracing::info!(
        "Search for requester {} returned {} matches",
        request.requester_id,
        results.data.matches.len()
    );
    emit(out, args.json, &results.body, || render_search_results(&results.data))
}

pub fn build_request(args: &SearchArgs) -> SearchRequest {
    let query = SearchQuery {
        tags: parse_list(args.tags.as_deref()).unwrap_or_default(),
        skills: parse_list(args.skills.as_deref()).unwrap_or_default(),
        interests: parse_list(args.interests.as_deref()).unwrap_or_default(),
        location: non_empty(args.location.clone()),
        language: non_empty(args.language.clone()),
    };

    SearchRequest {
        requester_id: args.requester_id,
        min_score: args.min_score,
        limit: args.limit,
        query: query.non_empty(),
    }
}
