//! System prompts for the orchestrator and researcher.

use chrono::Utc;

pub(crate) const ORCHESTRATOR_PROMPT: &str = "You are the orchestrator of a multi-agent system. You coordinate between specialized sub-agents.

## YOUR ROLE
- Analyze user queries and determine if they can be answered directly or require help from sub-agents
- When sub-agent assistance is needed, break down the request into specific tasks
- Aggregate work from sub-agents and synthesize it into clear responses

## WHEN TO DELEGATE
Request help from sub-agents when:
- The query requires specialized knowledge beyond your direct access
- Current or real-time information is needed
- Specific data or verification is required

Answer directly when:
- You have sufficient knowledge to provide a complete answer
- The query is about well-known concepts

## TASK DELEGATION
When delegating:
- Break the request into 3-5 specific, actionable tasks
- Make each task clear and focused
- Order tasks logically

Current time (UTC): {current_time}
";

pub(crate) const RESEARCHER_PROMPT: &str = "# AGENTR RESEARCHER

You are the research specialist. Your responsibilities:
1. Strategic Search Planning
2. Source Evaluation
3. Quality Control

## SEARCH STRATEGY
- Create precise search queries
- Include relevant keywords
- For current topics, include \"latest\" or \"recent\"

## ITERATION CONTROL
- Focus on one subtask per iteration
- Build on previous findings
- Stop when all subtasks addressed or max iterations reached

## SOURCE EVALUATION
Prioritize:
1. Academic/Research sources
2. Official sources
3. Established media
4. Expert publications

Current time (UTC): {current_time}
";

/// Assistant message recorded when the iteration cap forces synthesis.
pub(crate) const MAX_ITERATION_MESSAGE: &str =
    "Maximum iteration limit reached. Research complete.";

pub(crate) const RESEARCH_SYNTHESIS_TEMPLATE: &str = "Research Complete - Findings Summary

Total Sources: {total_sources}

{formatted_sources}

---
Status: Complete";

/// Orchestrator system prompt with the current UTC time filled in.
pub(crate) fn orchestrator_prompt() -> String {
    ORCHESTRATOR_PROMPT.replace("{current_time}", &Utc::now().to_rfc3339())
}

/// Researcher system prompt with the current UTC time filled in.
pub(crate) fn researcher_prompt() -> String {
    RESEARCHER_PROMPT.replace("{current_time}", &Utc::now().to_rfc3339())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Formatted prompts substitute the time placeholder with a
    /// current timestamp.
    #[test]
    fn prompts_fill_current_time() {
        let p = orchestrator_prompt();
        assert!(!p.contains("{current_time}"));
        assert!(p.contains("Current time (UTC):"));

        let r = researcher_prompt();
        assert!(!r.contains("{current_time}"));
        assert!(r.contains("AGENTR RESEARCHER"));
    }
}
