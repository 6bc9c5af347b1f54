//! Server-rendered result pages and the embedded static assets.

use minijinja::{context, Environment};

pub const INDEX_HTML: &str = include_str!("../../static/index.html");
pub const SUGGESTIONS_HTML: &str = include_str!("../../static/suggestions.html");
pub const SCRIPT_JS: &str = include_str!("../../static/script.js");
pub const STYLE_CSS: &str = include_str!("../../static/style.css");

/// The `.html` name turns on minijinja's HTML auto-escaping for every interpolated value.
const RESULT_TEMPLATE_NAME: &str = "result.html";
const RESULT_TEMPLATE: &str = include_str!("../../templates/result.html");

/// What the result page shows: an error, or the review of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisView {
    Failure {
        message: String,
    },
    Feedback {
        original_name: String,
        feedback: String,
    },
}

impl AnalysisView {
    pub fn render(&self) -> Result<String, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template(RESULT_TEMPLATE_NAME, RESULT_TEMPLATE)?;
        let template = env.get_template(RESULT_TEMPLATE_NAME)?;

        match self {
            AnalysisView::Failure { message } => template.render(context! { error => message }),
            AnalysisView::Feedback {
                original_name,
                feedback,
            } => template.render(context! {
                original_name => original_name,
                feedback => feedback,
            }),
        }
    }
}
