//! Python/LangChain program synthesis.
//!
//! The generated program has three parts: a fixed import preamble, one
//! [`ToolWrapper`] per resolved tool, and an epilogue that registers the
//! tools and builds a ReAct agent around them.

pub mod python;
pub mod wrapper;

use std::fmt;

use crate::config::ConverterConfig;
use crate::converter::{analyze, Conversion};
use crate::parser::SkillDocument;

pub use wrapper::ToolWrapper;

/// A generated agent program, kept as its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedCode {
    pub preamble: String,
    /// One rendered wrapper per tool, in resolution order.
    pub tools: Vec<String>,
    pub epilogue: String,
}

impl GeneratedCode {
    #[must_use]
    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// The full program text.
    #[must_use]
    pub fn source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GeneratedCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preamble)?;
        for tool in &self.tools {
            write!(f, "\n\n{tool}")?;
        }
        write!(f, "\n\n{}", self.epilogue)
    }
}

/// Convert a loaded skill document into a program.
#[must_use]
pub fn generate(document: &SkillDocument, config: &ConverterConfig) -> GeneratedCode {
    render(&analyze(&document.content, config), config)
}

/// Render an analyzed skill.
#[must_use]
pub fn render(conversion: &Conversion, config: &ConverterConfig) -> GeneratedCode {
    let tools = conversion
        .tools
        .iter()
        .map(|spec| {
            ToolWrapper::new(spec)
                .quote_arguments(config.quote_arguments)
                .render()
        })
        .collect();

    GeneratedCode {
        preamble: preamble(config.quote_arguments),
        tools,
        epilogue: epilogue(
            &conversion.tool_names(),
            &conversion.description,
            &config.example_query,
        ),
    }
}

/// Import block shared by every generated program.
#[must_use]
pub fn preamble(quote_arguments: bool) -> String {
    let mut out = String::from(
        "from langchain.agents import tool, AgentExecutor, create_react_agent\n\
         from langchain.prompts import PromptTemplate\n\
         from langchain_openai import ChatOpenAI\n",
    );
    if quote_arguments {
        out.push_str("import shlex\n");
    }
    out.push_str("import subprocess\n");
    out
}

/// Tool registry, agent prompt, executor and example entry point.
///
/// The prompt keeps `{tools}`, `{tool_names}`, `{input}` and
/// `{agent_scratchpad}` for the agent framework to fill in.
#[must_use]
pub fn epilogue(tool_names: &[&str], description: &str, example_query: &str) -> String {
    let mut capability = python::template_text(description.trim()).to_lowercase();
    if !capability.ends_with(['.', '!', '?']) {
        capability.push('.');
    }
    let multi_tool_hint = if tool_names.len() > 1 {
        "You have access to multiple tools for different operations.\n\n"
    } else {
        ""
    };
    let tools_list = tool_names.join(", ");
    let invoke_arg = format!(
        "{{\"input\": {}}}",
        python::string_literal(example_query)
    );

    format!(
        "# Initialize LLM\n\
         llm = ChatOpenAI(temperature=0)\n\
         \n\
         # Define tools\n\
         tools = [{tools_list}]\n\
         \n\
         # Create agent prompt\n\
         prompt = PromptTemplate.from_template(\"\"\"\n\
         You are a helpful assistant that can {capability}\n\
         \n\
         {multi_tool_hint}\
         Available tools: {{tools}}\n\
         Tool names: {{tool_names}}\n\
         \n\
         Question: {{input}}\n\
         Thought: {{agent_scratchpad}}\n\
         \"\"\")\n\
         \n\
         # Create agent\n\
         agent = create_react_agent(llm, tools, prompt)\n\
         agent_executor = AgentExecutor(agent=agent, tools=tools, verbose=True)\n\
         \n\
         # Example usage\n\
         if __name__ == \"__main__\":\n    \
             result = agent_executor.invoke({invoke_arg})\n    \
             print(result)\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER: &str = "---\n\
        name: weather\n\
        description: Get current weather\n\
        ---\n\
        \n\
        ```bash\n\
        curl -s \"wttr.in/London?format=3\"\n\
        ```\n";

    fn weather() -> GeneratedCode {
        let doc = SkillDocument::from_text("weather/SKILL.md", WEATHER);
        generate(&doc, &ConverterConfig::default())
    }

    #[test]
    fn weather_has_exactly_one_tool() {
        let code = weather();
        assert_eq!(code.tool_count(), 1);
        let source = code.source();
        assert_eq!(source.matches("@tool").count(), 1);
        assert!(source.contains("def weather_curl() -> str:"));
    }

    #[test]
    fn weather_registry_lists_the_tool() {
        let source = weather().source();
        assert!(source.contains("tools = [weather_curl]\n"));
    }

    #[test]
    fn weather_prompt_uses_lowercase_description() {
        let source = weather().source();
        assert!(source.contains("You are a helpful assistant that can get current weather.\n"));
        assert!(!source.contains("multiple tools"));
    }

    #[test]
    fn prompt_leaves_framework_slots_single_braced() {
        let source = weather().source();
        assert!(source.contains("Available tools: {tools}\n"));
        assert!(source.contains("Tool names: {tool_names}\n"));
        assert!(source.contains("Question: {input}\n"));
        assert!(source.contains("Thought: {agent_scratchpad}\n"));
    }

    #[test]
    fn parts_are_joined_in_order() {
        let code = weather();
        let source = code.source();
        let preamble_at = source.find("import subprocess").unwrap();
        let tool_at = source.find("@tool").unwrap();
        let registry_at = source.find("tools = [").unwrap();
        assert!(preamble_at < tool_at && tool_at < registry_at);
        assert!(source.starts_with(&code.preamble));
        assert!(source.ends_with(&code.epilogue));
    }

    #[test]
    fn no_tools_still_builds_program() {
        let doc = SkillDocument::from_text("SKILL.md", "# Nothing here\n");
        let code = generate(&doc, &ConverterConfig::default());
        assert_eq!(code.tool_count(), 0);
        assert!(code.source().contains("tools = []\n"));
        assert!(code.source().contains("can no description."));
    }

    #[test]
    fn multi_tool_programs_get_hint() {
        let text = "---\nname: github\ndescription: GitHub helper\n---\n```bash\ngh issue list\ngh pr list\n```\n";
        let source = crate::convert_text(text, &ConverterConfig::default()).source();
        assert!(source.contains("tools = [github_issue_list, github_pr_list]\n"));
        assert!(source.contains("You have access to multiple tools"));
    }

    #[test]
    fn epilogue_escapes_description_and_query() {
        let epilogue = epilogue(&["t"], "Render {json} output.", "Say \"hi\"");
        assert!(epilogue.contains("can render {{json}} output.\n"));
        assert!(epilogue.contains(r#"agent_executor.invoke({"input": "Say \"hi\""})"#));
    }

    #[test]
    fn description_keeps_its_own_punctuation() {
        let text = epilogue(&["t"], "Wait...", "q");
        assert!(text.contains("can wait...\n"), "{text}");
        let text = epilogue(&["t"], "Is it raining?", "q");
        assert!(text.contains("can is it raining?\n"));
        let text = epilogue(&["t"], "Check the sky", "q");
        assert!(text.contains("can check the sky.\n"));
    }

    #[test]
    fn preamble_imports_shlex_only_when_quoting() {
        assert!(!preamble(false).contains("shlex"));
        assert!(preamble(true).contains("import shlex\n"));
        assert!(preamble(true).contains("from langchain.agents import tool"));
    }

    #[test]
    fn main_block_is_indented() {
        let epilogue = epilogue(&[], "x", "q");
        assert!(epilogue.contains(
            "if __name__ == \"__main__\":\n    result = agent_executor.invoke({\"input\": \"q\"})\n    print(result)\n"
        ));
    }
}
