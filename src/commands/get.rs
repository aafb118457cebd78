use crate::cli::GetArgs;
use crate::commands::{emit, CommandError};
use crate::core::display::{render_agent, render_agent_list};
use crate::models::ListAgentsParams;
use crate::services::AgentApiClient;
use std::io::Write;
use validator::Validate;

/// Fetch one agent, or list agents when `--list` is set
pub async fn run<W: Write>(
    client: &AgentApiClient,
    args: GetArgs,
    out: &mut W,
) -> Result<(), CommandError> {
    if args.list {
        let params = list_params(&args);
        params.validate()?;

        let list = client.list_agents(&params).await?;
        tracing::info!("Listed {} of {} agents", list.data.items.len(), list.data.total);
        return emit(out, args.json, &list.body, || render_agent_list(&list.data));
    }

    let agent_id = args.agent_id.ok_or_else(|| {
        CommandError::Validation("--agent-id is required (or use --list)".to_string())
    })?;

    let agent = client.get_agent(agent_id).await?;
    emit(out, args.json, &agent.body, || render_agent(&agent.data))
}

pub fn list_params(args: &GetArgs) -> ListAgentsParams {
    ListAgentsParams {
        skip: args.skip,
        limit: args.limit,
        is_active: args.is_active,
        is_public: args.is_public,
    }
}
