// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Agent, AgentId, AgentMatch, ExpertiseLevel, ScoreDetails};
pub use requests::{
    describe_validation_errors, ListAgentsParams, RegisterAgentRequest, SearchQuery, SearchRequest,
    UpdateAgentRequest,
};
pub use responses::{
    AgentList, Decoded, OpenApiInfo, ProbeCheck, ProbeOutcome, ProbeReport, SearchResponse,
};
