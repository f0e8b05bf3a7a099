//! User-facing text catalog.
//!
//! Every message the engine prints or puts into an error goes through a
//! [`Catalog`]. The default method bodies are the English texts; a locale
//! overrides the methods it translates. The catalog is owned by the
//! [`Cli`](crate::cli::Cli) engine and passed down explicitly.

/// Text of a range boundary, naming the open ends.
pub fn range_boundary(value: i64) -> String {
    match value {
        i64::MIN => "i64::MIN".to_string(),
        i64::MAX => "i64::MAX".to_string(),
        v => v.to_string(),
    }
}

pub trait Catalog {
    // Parse errors

    fn must_be_provided(&self, argument: &str) -> String {
        format!("The argument \"{}\" must be provided", argument)
    }

    fn must_be_provided_at(&self, argument: &str, position: usize) -> String {
        format!("The argument \"{}\" with index \"{}\" must be provided", argument, position)
    }

    fn cannot_convert(&self, value: &str, type_name: &str) -> String {
        format!("Could not cast string \"{}\" to the target type \"{}\"", value, type_name)
    }

    fn cannot_convert_element(&self, element: usize, value: &str, type_name: &str) -> String {
        format!(
            "Could not cast element number \"{}\" with value = \"{}\" to the target type \"{}\"",
            element, value, type_name
        )
    }

    fn range_not_integer(&self, value: &str) -> String {
        format!("Could not cast argument value \"{}\" to an integer for range validation", value)
    }

    fn element_range_not_integer(&self, argument: &str, element: usize, value: &str) -> String {
        format!(
            "The argument \"{}\" validation error, could not parse array element number {} with value = \"{}\" to an integer",
            argument, element, value
        )
    }

    fn out_of_range(&self, value: i64, argument: &str, min: i64, max: i64) -> String {
        format!(
            "The value {} of argument \"{}\" must be in range between {} and {} ",
            value,
            argument,
            range_boundary(min),
            range_boundary(max)
        )
    }

    fn element_out_of_range(&self, argument: &str, value: i64, element: usize, min: i64, max: i64) -> String {
        format!(
            "The argument \"{}\" validation error, value {} of array element number {} must be in range between {} and {} ",
            argument,
            value,
            element,
            range_boundary(min),
            range_boundary(max)
        )
    }

    fn pattern_mismatch(&self, value: &str, argument: &str, pattern: &str) -> String {
        format!(
            "The value \"{}\" of argument \"{}\" does not match the pattern \"{}\" ",
            value, argument, pattern
        )
    }

    fn element_pattern_mismatch(&self, argument: &str, value: &str, element: usize, pattern: &str) -> String {
        format!(
            "The argument \"{}\" validation error, value \"{}\" of array element number {} does not match the regex pattern \"{}\" ",
            argument, value, element, pattern
        )
    }

    fn invalid_pattern(&self, argument: &str, pattern: &str) -> String {
        format!(
            "The argument \"{}\" validation error, validation pattern \"{}\" could not be compiled",
            argument, pattern
        )
    }

    fn unknown_short_name(&self, short: char) -> String {
        format!("Could not find named parameter by name \"-{}\", it might be too much arguments?", short)
    }

    fn unknown_long_name(&self, long: &str) -> String {
        format!("Could not find named parameter by name \"--{}\", it might be too much arguments?", long)
    }

    fn malformed_token(&self, token: &str, index: usize) -> String {
        format!(
            "Could not find named parameter '{}' to assign the argument value at the argument position '{}'",
            token, index
        )
    }

    fn unknown_position(&self, position: usize) -> String {
        format!("Could not find positional parameter by index {}, it might be too much arguments?", position)
    }

    fn missing_option_value(&self, token: &str) -> String {
        format!("The named parameter '{}' must have an argument", token)
    }

    fn unknown_field(&self, field: &str) -> String {
        format!("Could not find field by name \"{}\", it might be something went wrong?", field)
    }

    fn unknown_command(&self, command: &str) -> String {
        format!("Could not find the command: {}", command)
    }

    fn missing_reference(&self, key: &str) -> String {
        format!("Could not find referenced key \"{}\" in appSettings section of app.config", key)
    }

    fn reference_too_deep(&self, key: &str, limit: usize) -> String {
        format!(
            "The value of key \"{}\" still has references after {} substitutions, it might be a reference cycle?",
            key, limit
        )
    }

    fn settings_parse_failed(&self, argument: &str, message: &str) -> String {
        format!(
            "Error during parsing parameter {} in \"appSettings\" section of app.config: {}",
            argument, message
        )
    }

    fn env_parse_failed(&self, var: &str, message: &str) -> String {
        format!("Could not parse value of environment variable {}: {}", var, message)
    }

    fn not_interactive(&self, field: &str) -> String {
        format!("The field \"{}\" does not support interactive input!", field)
    }

    fn must_not_be_empty(&self, argument: &str) -> String {
        format!("The argument \"{}\" must not be null or empty string", argument)
    }

    // Interactive input

    fn press_enter_for_default(&self) -> String {
        "   - just press enter to use default value".to_string()
    }

    fn press_ctrl_c(&self) -> String {
        "   - press Ctrl-C to interrupt".to_string()
    }

    fn please_retry(&self) -> String {
        "Please retry...".to_string()
    }

    fn input_interrupted(&self) -> String {
        "Input has been interrupted by user".to_string()
    }

    fn user_discontinued(&self) -> String {
        "User decided to discontinue the process".to_string()
    }

    fn continue_question(&self) -> String {
        "Would you like to continue?".to_string()
    }

    fn yes(&self) -> String {
        "Yes".to_string()
    }

    fn no(&self) -> String {
        "No".to_string()
    }

    // Usage and help

    fn usage_program(&self, prompt: &str, program: &str) -> String {
        format!(
            "Usage: {} {} [-h|--help] | [-v|--version] | [--print-app-settings] | [args] ",
            prompt, program
        )
    }

    fn usage_program_with_commands(&self, prompt: &str, program: &str) -> String {
        format!(
            "Usage: {} {} [-h|--help] | [-v|--version] | [--print-app-settings] | <command-name> [args] ",
            prompt, program
        )
    }

    fn usage_command(&self, prompt: &str, program: &str, command: &str) -> String {
        format!("Usage: {} {} {} [-h|--help] | ", prompt, program, command)
    }

    fn available_commands(&self) -> String {
        "Available commands: ".to_string()
    }

    fn data_type(&self, type_name: &str) -> String {
        format!("   - the data type is [{}] ", type_name.to_lowercase())
    }

    fn enum_type(&self, type_name: &str, variants: &str) -> String {
        format!("   - the data type is enum [{}], possible values: {}", type_name, variants)
    }

    fn enum_array_type(&self, type_name: &str, variants: &str) -> String {
        format!("   - the array of enums [{}], possible values: {}", type_name.to_lowercase(), variants)
    }

    fn allowed_range(&self, min: i64, max: i64) -> String {
        format!(
            "   - allowed value range is between {} and {}",
            range_boundary(min),
            range_boundary(max)
        )
    }

    fn allowed_pattern(&self, pattern: &str) -> String {
        format!("   - allowed regex pattern is \"{}\"", pattern)
    }

    fn required_line(&self) -> String {
        "   - is required to provide".to_string()
    }

    fn default_line(&self, value: &str) -> String {
        format!("   - optional, default value is {}", value)
    }

    fn sample_line(&self, value: &str) -> String {
        format!("   - sample value is {}", value)
    }

    fn rest_line(&self) -> String {
        "   - includes rest of commandline arguments".to_string()
    }

    fn env_line(&self, var: &str) -> String {
        format!("   - could be passed via environment variable ${}", var)
    }

    fn secret_line(&self) -> String {
        "   - the value is a secret".to_string()
    }

    fn sample_prefix(&self) -> String {
        "Sample: ".to_string()
    }

    fn all_environment_variables(&self) -> String {
        "All allowed environment variables:".to_string()
    }

    fn running_with_arguments(&self) -> String {
        "Running with arguments:".to_string()
    }

    fn command_line_provided(&self) -> String {
        "Command line provided:".to_string()
    }

    fn command_settings(&self, command: &str) -> String {
        format!("{} command settings", command)
    }

    fn program_settings(&self) -> String {
        "program settings".to_string()
    }

    // Locale-specific date/time input formats, tried after the ISO forms

    fn datetime_formats(&self) -> &[&'static str] {
        &["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %I:%M:%S %p", "%m/%d/%Y %H:%M"]
    }

    fn date_formats(&self) -> &[&'static str] {
        &["%m/%d/%Y"]
    }
}

/// English text, the catalog used unless another one is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Catalog for English {}
