//! Prompt templates for the research agent.

use crate::tools::ToolRegistry;

/// Build the system prompt with tool definitions.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list()
        .iter()
        .map(|t| format!("- **{}**: {}", t.name(), t.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an autonomous research agent.

## Your Capabilities

You have access to the following tools:
{tool_descriptions}

## Rules and Guidelines

1. **Always use tools** - Don't answer from memory alone. Search, crawl, and check the news before synthesizing.

2. **Read before citing** - Crawl a page before quoting or summarizing it; search snippets are not sources.

3. **Iterate on errors** - A tool result may itself be an error message. Analyze it, adjust your invocation, and try again.

4. **Attribute everything** - Keep track of every URL you draw on; it belongs in the final resource list.

## Response Format

When your research is complete, respond with a single JSON object with exactly two fields:
- "research_data": the full research report as a string
- "resource_links": an array of the source URLs used

If you need to use a tool, respond with a tool call. The system will execute it and return the result."#,
        tool_descriptions = tool_descriptions
    )
}

/// Build the research task document for a query.
///
/// The rendered document walks the agent through a systematic methodology
/// (search, extraction, news analysis, synthesis) and pins down the output
/// contract. An empty query is valid: the document then instructs the agent
/// to answer with the "No Topic Mentioned" sentinel instead of inventing a
/// topic.
pub fn build_research_prompt(query: &str) -> String {
    let query = query.trim();

    format!(
        r#"Act as an advanced research agent investigating '{query}'.

## OBJECTIVE:
Produce comprehensive, factually accurate, and well-structured research data on the topic.
If no research topic was given above, respond with 'No Topic Mentioned' as the research data and stop; do not fabricate content.

## RESEARCH METHODOLOGY:
1. INITIAL SEARCH:
   - Conduct systematic web searches to identify authoritative sources
   - Locate precise URLs of relevant web pages (minimum 3-5 high-quality sources)
   - Prioritize academic, governmental, established news, and expert resources
   - Document all sources with complete citation information

2. DATA EXTRACTION PROCESS:
   - Extract primary content from each URL via the web crawler
   - Document key data points, statistics, and factual information
   - Preserve chronology and context of events/developments
   - Note contradictions or disagreements between sources

3. NEWS ANALYSIS:
   - Extract recent news (within 6 months when applicable)
   - Differentiate between reporting and opinion/editorial content
   - Compare coverage across multiple news sources to identify consensus and divergence
   - Track timeline of developments to establish causal relationships

4. SYNTHESIS AND ANALYSIS:
   - Organize findings into coherent thematic sections
   - Construct detailed paragraphs (minimum 8-10) that explore each aspect thoroughly
   - Identify patterns, trends, and significant relationships between data points
   - Address counterarguments and alternative perspectives
   - Distinguish between established facts, emerging research, and speculative content

## OUTPUT REQUIREMENTS:
- Begin with an executive summary (250-300 words)
- Include section headings that create a logical information hierarchy
- Provide in-depth analysis with minimum 2000 words total content
- Maintain neutral, objective tone throughout
- Conclude with a 'Research Limitations' section identifying potential gaps
- Append a complete bibliography with all sources in Chicago or APA format
- Deliver the final answer as a JSON object with "research_data" (the report) and "resource_links" (the source URLs)

## QUALITY CONTROL:
- Verify all statistical claims against original sources
- Cross-reference key facts across multiple sources
- Flag information gaps or areas requiring additional research
- Ensure all claims are properly attributed
- Ensure all responses are matched to the research topic"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::WebSearchTool;

    #[test]
    fn research_prompt_embeds_query() {
        let prompt = build_research_prompt("rust async runtimes");
        assert!(prompt.contains("investigating 'rust async runtimes'"));
    }

    #[test]
    fn research_prompt_carries_methodology_contract() {
        let prompt = build_research_prompt("quantum computing");
        assert!(prompt.contains("minimum 3-5 high-quality sources"));
        assert!(prompt.contains("web crawler"));
        assert!(prompt.contains("recent news (within 6 months"));
        assert!(prompt.contains("executive summary (250-300 words)"));
        assert!(prompt.contains("Research Limitations"));
        assert!(prompt.contains("bibliography"));
        assert!(prompt.contains("\"research_data\""));
        assert!(prompt.contains("\"resource_links\""));
    }

    #[test]
    fn empty_query_instructs_no_topic_sentinel() {
        for degenerate in ["", "   ", "\n\t"] {
            let prompt = build_research_prompt(degenerate);
            assert!(prompt.contains("investigating ''"));
            assert!(prompt.contains("'No Topic Mentioned'"));
        }
    }

    #[test]
    fn system_prompt_lists_registered_tools() {
        let mut tools = crate::tools::ToolRegistry::new();
        tools.register(WebSearchTool::new("key".to_string()));

        let prompt = build_system_prompt(&tools);
        assert!(prompt.contains("**web_search**"));
        assert!(prompt.contains("\"research_data\""));
        assert!(prompt.contains("\"resource_links\""));
    }
}
