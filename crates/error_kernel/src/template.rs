//! Positional message templates
//!
//! Error messages are written as templates with `{}` markers and an ordered
//! list of parameters, so that the static part of a message stays stable in
//! the logs while the variable part travels separately.
//!
//! Rendering is permissive on purpose: a count mismatch between markers and
//! parameters never fails. Surplus markers stay literal and surplus
//! parameters are dropped.

/// Placeholder marker consumed by one parameter
pub const PLACEHOLDER: &str = "{}";

const ESCAPE: u8 = b'\\';

/// Renders a template with its ordered parameters
///
/// # Arguments
///
/// * `template` - The message template, if any
/// * `parameters` - The ordered parameter values, if any
///
/// # Returns
///
/// * `None` when there is no template
/// * the template unchanged when there are no parameters
/// * the substituted message otherwise
///
/// # Example
///
/// ```rust
/// use error_kernel::template::render;
///
/// let parameters = vec!["lastname".to_string(), "1".to_string(), "30".to_string()];
/// let rendered = render(Some("{} must be between {} and {}"), Some(parameters.as_slice()));
/// assert_eq!(rendered.as_deref(), Some("lastname must be between 1 and 30"));
/// ```
pub fn render(template: Option<&str>, parameters: Option<&[String]>) -> Option<String> {
    let template = template?;
    match parameters {
        None => Some(template.to_string()),
        Some(parameters) => Some(substitute(template, parameters)),
    }
}

/// Counts the markers that would consume a parameter
///
/// An escaped marker (`\{}`) is not counted, a double-escaped one (`\\{}`) is.
pub fn count_placeholders(template: &str) -> usize {
    let bytes = template.as_bytes();
    let mut count = 0;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find(PLACEHOLDER) {
        let at = cursor + offset;
        if is_escaped(bytes, at) && !is_double_escaped(bytes, at) {
            cursor = at + 1;
        } else {
            count += 1;
            cursor = at + PLACEHOLDER.len();
        }
    }

    count
}

fn substitute(template: &str, parameters: &[String]) -> String {
    let bytes = template.as_bytes();
    let capacity = template.len() + parameters.iter().map(String::len).sum::<usize>();
    let mut rendered = String::with_capacity(capacity);
    let mut cursor = 0;
    let mut next = 0;

    while next < parameters.len() {
        let Some(offset) = template[cursor..].find(PLACEHOLDER) else {
            break;
        };
        let at = cursor + offset;

        if is_escaped(bytes, at) {
            // Drop the escape character in both cases
            rendered.push_str(&template[cursor..at - 1]);
            if is_double_escaped(bytes, at) {
                rendered.push_str(&parameters[next]);
                next += 1;
                cursor = at + PLACEHOLDER.len();
            } else {
                rendered.push('{');
                cursor = at + 1;
            }
        } else {
            rendered.push_str(&template[cursor..at]);
            rendered.push_str(&parameters[next]);
            next += 1;
            cursor = at + PLACEHOLDER.len();
        }
    }

    rendered.push_str(&template[cursor..]);
    rendered
}

fn is_escaped(bytes: &[u8], at: usize) -> bool {
    at >= 1 && bytes[at - 1] == ESCAPE
}

fn is_double_escaped(bytes: &[u8], at: usize) -> bool {
    at >= 2 && bytes[at - 2] == ESCAPE
}
