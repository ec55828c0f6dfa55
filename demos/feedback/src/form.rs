//! The feedback form.

use form_args::{FieldDefault, FieldInput, FieldSpec, FormSpec, InputRequired, ValidationError, Value};

/// Highest accepted star rating.
pub const MAX_STARS: i64 = 5;

fn rating(input: &FieldInput<'_>) -> Result<(), ValidationError> {
    match input.data {
        Some(Value::Int(stars)) if !(1..=MAX_STARS).contains(stars) => Err(
            ValidationError::Invalid(format!("Number must be between 1 and {MAX_STARS}.")),
        ),
        _ => Ok(()),
    }
}

/// Builds the feedback form:
///
/// ```text
/// --stars, -s           integer rating, 1 to 5
/// --comment-author      who wrote the comment
/// --comment-message   required comment text
/// --tags, -t            any of bug, idea, praise
/// --links               repeatable reference URLs
/// --submitted           date, defaults to today
/// ```
#[must_use]
pub fn feedback_form() -> FormSpec {
    let comment = FormSpec::new()
        .field("author", FieldSpec::string().description("who wrote the comment"))
        .field(
            "message",
            FieldSpec::string()
                .description("the comment itself")
                .validator(InputRequired::new()),
        );
    FormSpec::new()
        .short_arguments([('s', "stars"), ('t', "tags")])
        .field(
            "stars",
            FieldSpec::integer()
                .description("rating out of five")
                .default(MAX_STARS)
                .validator(rating),
        )
        .field("comment", FieldSpec::form(comment))
        .field(
            "tags",
            FieldSpec::select_multiple(["bug", "idea", "praise"]).description("what kind of feedback"),
        )
        .field(
            "links",
            FieldSpec::list(FieldSpec::string()).description("related links"),
        )
        .field(
            "submitted",
            FieldSpec::date()
                .description("when the feedback was given")
                .default(FieldDefault::today()),
        )
}

#[cfg(test)]
mod tests {
    use form_args::{ArgumentSpec, CompileOptions, Form};
    use rstest::rstest;

    use super::feedback_form;

    fn arguments() -> Vec<ArgumentSpec> {
        let form = Form::new(&feedback_form());
        let mut arguments = Vec::new();
        form.configure_parser_with(&mut arguments, &CompileOptions::new())
            .expect("feedback form compiles");
        arguments
    }

    #[rstest]
    #[case("stars", Some('s'))]
    #[case("comment-message", None)]
    #[case("comment-author", None)]
    #[case("tags", Some('t'))]
    #[case("links", None)]
    #[case("submitted", None)]
    fn registers_flags(#[case] long: &str, #[case] short: Option<char>) {
        let arguments = arguments();
        let argument = arguments
            .iter()
            .find(|argument| argument.long == long)
            .expect("registered flag");
        assert_eq!(argument.short, short);
    }

    #[test]
    fn submitted_defaults_to_today() {
        let arguments = arguments();
        let submitted = arguments
            .iter()
            .find(|argument| argument.long == "submitted")
            .expect("submitted flag");
        assert!(submitted.help.contains("(default: today)"));
        assert_eq!(submitted.default, None);
    }
}
