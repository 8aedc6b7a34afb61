pub const QUOTE_USER: &str = include_str!("../data/prompts/quote_user.txt");
pub const IMAGE: &str = include_str!("../data/prompts/image.txt");

pub const QUOTE_FIELD_DESCRIPTION: &str =
    "A profound 1-2 sentence quote about the holiday season.";
pub const CAPTION_FIELD_DESCRIPTION: &str =
    "A short, modern social media caption (max 20 words).";

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{{a}} and {{b}}", &[("a", "cats")]), "cats and {{b}}");
    }

    #[test]
    fn test_prompts_have_mood_placeholder() {
        assert!(QUOTE_USER.contains("{{mood}}"));
        assert!(IMAGE.contains("{{mood}}"));
    }

    #[test]
    fn test_rendered_image_prompt_forbids_text() {
        let prompt = render(IMAGE, &[("mood", "Snowy Silence")]);
        assert!(prompt.contains("Theme: Snowy Silence."));
        assert!(prompt.contains("No text, no watermarks."));
    }
}
