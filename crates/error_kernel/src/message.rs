//! Parameterized error messages and cause chaining
//!
//! Shared by functional and technical errors. The message is rendered once,
//! when the error is built, and never recomputed.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::template;

/// Chained prior error
///
/// The new error holds a shared reference. The cause itself stays immutable.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// Builds an ordered parameter list from heterogeneous values
///
/// Each value is captured through its `Display` implementation.
///
/// ```rust
/// use error_kernel::params;
///
/// let parameters = params!["lastname", 1, 30];
/// assert_eq!(parameters, vec!["lastname", "1", "30"]);
/// ```
#[macro_export]
macro_rules! params {
    ($($parameter:expr),* $(,)?) => {{
        let parameters: ::std::vec::Vec<::std::string::String> =
            ::std::vec![$(::std::string::ToString::to_string(&$parameter)),*];
        parameters
    }};
}

/// Message template, its parameters and the rendered message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMessage {
    template: Option<String>,
    parameters: Option<Vec<String>>,
    rendered: Option<String>,
}

impl ErrorMessage {
    /// Renders the template with its parameters
    ///
    /// An empty parameter list is stored as no parameters at all.
    pub fn new<P: ToString>(
        template: Option<String>,
        parameters: impl IntoIterator<Item = P>,
    ) -> Self {
        let parameters: Vec<String> = parameters.into_iter().map(|p| p.to_string()).collect();
        let parameters = (!parameters.is_empty()).then_some(parameters);
        let rendered = template::render(template.as_deref(), parameters.as_deref());

        Self {
            template,
            parameters,
            rendered,
        }
    }

    /// A message with neither template nor parameters
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the raw template
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Returns the ordered parameters
    pub fn parameters(&self) -> Option<&[String]> {
        self.parameters.as_deref()
    }

    /// Returns the rendered message
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    /// Writes the `message=` and `parameters=` diagnostic fields
    ///
    /// `message=` carries the raw template and the parameters follow in their
    /// own field. Each present field is written as `<separator><name>=<value>`,
    /// and the separator is then switched to `", "`.
    pub(crate) fn write_fields(
        &self,
        f: &mut fmt::Formatter<'_>,
        separator: &mut &'static str,
    ) -> fmt::Result {
        if let Some(template) = &self.template {
            write!(f, "{}message={}", separator, template)?;
            *separator = ", ";
        }
        if let Some(parameters) = &self.parameters {
            write!(f, "{}parameters=[{}]", separator, parameters.join(", "))?;
            *separator = ", ";
        }
        Ok(())
    }
}

/// Converts anything error-like into a shared cause
pub(crate) fn into_cause(cause: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Cause {
    Arc::from(cause.into())
}

/// Exposes a stored cause through `Error::source`
pub(crate) fn source_of(cause: &Option<Cause>) -> Option<&(dyn Error + 'static)> {
    cause.as_deref().map(|cause| cause as &(dyn Error + 'static))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_template_means_no_message() {
        let message = ErrorMessage::new(None, params!["ignored"]);
        assert_eq!(message.rendered(), None);
        assert_eq!(message.parameters(), Some(&["ignored".to_string()][..]));
    }

    #[test]
    fn test_empty_parameters_leave_template_untouched() {
        let message = ErrorMessage::new(Some("value {} rejected".to_string()), params![]);
        assert_eq!(message.parameters(), None);
        assert_eq!(message.rendered(), Some("value {} rejected"));
    }

    #[test]
    fn test_rendered_once() {
        let message = ErrorMessage::new(Some("{} items".to_string()), params![3]);
        assert_eq!(message.template(), Some("{} items"));
        assert_eq!(message.rendered(), Some("3 items"));
    }

    struct Fields<'a>(&'a ErrorMessage);

    impl fmt::Display for Fields<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            self.0.write_fields(f, &mut "")
        }
    }

    #[test]
    fn test_diagnostic_fields_keep_raw_template() {
        let message = ErrorMessage::new(Some("{} items".to_string()), params![3]);
        assert_eq!(Fields(&message).to_string(), "message={} items, parameters=[3]");
    }
}
