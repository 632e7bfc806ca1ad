pub(crate) fn run(command: &str, format: super::Format) {
    let params = skillconv::extract_parameters(command);

    match format {
        super::Format::Text => {
            if params.is_empty() {
                eprintln!("no parameters");
            }
            for p in &params {
                println!("{}: {} (required)", p.name, p.param_type);
            }
        }
        super::Format::Json => {
            let json = serde_json::to_string_pretty(&params).unwrap();
            println!("{json}");
        }
    }
}
