use std::path::PathBuf;

use skillconv::{Conversion, ConverterConfig, SkillDocument};

pub(crate) fn run(skill_dir: PathBuf, format: super::Format, config: ConverterConfig) {
    let document = SkillDocument::load(&skill_dir).unwrap_or_else(|e| {
        eprintln!("skillconv inspect: {e}");
        std::process::exit(1);
    });
    let conversion = skillconv::analyze(&document.content, &config);

    match format {
        super::Format::Text => print!("{}", format_text(&conversion)),
        super::Format::Json => {
            let json = serde_json::to_string_pretty(&conversion).unwrap();
            println!("{json}");
        }
    }
}

fn format_text(conv: &Conversion) -> String {
    let mut out = String::new();
    out.push_str(&format!("name:        {}\n", conv.skill_name));
    out.push_str(&format!("description: {}\n", conv.description));

    let extra: Vec<_> = conv
        .metadata
        .iter()
        .filter(|(k, _)| *k != "name" && *k != "description")
        .collect();
    for (key, value) in extra {
        out.push_str(&format!("{key}: {value}\n"));
    }

    out.push_str(&format!(
        "pattern:     {} (primary tool: {}, requires input: {})\n",
        conv.pattern.kind,
        conv.pattern.primary_tool.as_deref().unwrap_or("none"),
        if conv.pattern.requires_input { "yes" } else { "no" },
    ));

    out.push_str(&format!("\ncommands ({}):\n", conv.commands.len()));
    for command in &conv.commands {
        out.push_str(&format!("  {command}\n"));
    }

    out.push_str(&format!("\ntools ({}):\n", conv.tools.len()));
    for tool in &conv.tools {
        let params: Vec<&str> = tool.parameters.iter().map(|p| p.name.as_str()).collect();
        out.push_str(&format!("  {}({})\n", tool.name, params.join(", ")));
        out.push_str(&format!("    {}\n", tool.command));
    }
    out
}
