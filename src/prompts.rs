pub const BRIEF_PREFIX: &str = include_str!("../data/prompts/brief_prefix.txt");
pub const FRAME_SYSTEM: &str = include_str!("../data/prompts/frame_system.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}
