//! HTML pages for the quiz. Every dynamic value goes through `escape`.

use crate::display::DisplayRecord;
use crate::ml::ModelMetadata;
use crate::models::Cause;
use crate::quiz::QuizOutcome;
use axum::http::StatusCode;
use std::fmt::Write;
use strum::IntoEnumIterator;
use uuid::Uuid;

const STYLE: &str = "body{font-family:sans-serif;max-width:40em;margin:2em auto;color:#222}\
table{border-collapse:collapse;width:100%}td{padding:.3em .6em;border-bottom:1px solid #ddd}\
td.value{text-align:right;font-weight:bold}.verdict{font-size:1.2em}.error{color:#a00}";

/// Escape text for an HTML body or a double-quoted attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

/// Selection page: the incident's features and the guess form
pub fn render_index(record: &DisplayRecord, token: &Uuid) -> String {
    let mut body = String::new();
    body.push_str("<h1>Human error, or just bad luck?</h1>\n");
    body.push_str("<p>Here is an aircraft from an NTSB investigation. What caused its accident?</p>\n");

    body.push_str("<table>\n");
    for feature in &record.features {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td class=\"value\">{}</td></tr>",
            escape(feature.label),
            escape(&feature.value)
        );
    }
    body.push_str("</table>\n");

    body.push_str("<form action=\"/results\" method=\"get\">\n");
    let _ = writeln!(
        body,
        "<input type=\"hidden\" name=\"incident\" value=\"{}\">",
        token
    );
    body.push_str("<select name=\"select\">\n");
    for cause in Cause::iter() {
        let label = escape(&cause.to_string());
        let _ = writeln!(body, "<option value=\"{0}\">{0}</option>", label);
    }
    body.push_str("</select>\n<button type=\"submit\">Guess</button>\n</form>\n");

    page("Incident quiz", &body)
}

/// Results page: guess, prediction, truth and the report link
pub fn render_results(outcome: &QuizOutcome, model: &ModelMetadata) -> String {
    let mut body = String::new();
    body.push_str("<h1>Results</h1>\n<table>\n");
    let rows = [
        ("Your guess", outcome.guess.to_string()),
        ("Model prediction", outcome.prediction.to_string()),
        ("Model confidence", outcome.confidence.to_string()),
        ("What actually happened", outcome.reality.to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td class=\"value\">{}</td></tr>",
            label,
            escape(&value)
        );
    }
    body.push_str("</table>\n");

    let verdict = match (outcome.guess_correct(), outcome.model_correct()) {
        (true, true) => "You and the model both got it right.",
        (true, false) => "You beat the model!",
        (false, true) => "The model beat you this time.",
        (false, false) => "Neither you nor the model got this one.",
    };
    let _ = writeln!(body, "<p class=\"verdict\">{}</p>", verdict);

    let _ = writeln!(
        body,
        "<p><a href=\"{}\" target=\"_blank\" rel=\"noopener\">Read the NTSB report</a></p>",
        escape(&outcome.report_url)
    );
    body.push_str("<p><a href=\"/\">Try another incident</a></p>\n");

    let _ = writeln!(
        body,
        "<footer><small>Predictions by {} ({})</small></footer>",
        escape(&model.name),
        model.model_type
    );

    page("Incident quiz results", &body)
}

/// Error page for any failed request
pub fn render_error(status: StatusCode, error_code: &str, message: &str) -> String {
    let body = format!(
        "<h1 class=\"error\">{} {}</h1>\n<p>{}</p>\n<p><small>{}</small></p>\n\
         <p><a href=\"/\">Back to the quiz</a></p>\n",
        status.as_u16(),
        escape(status.canonical_reason().unwrap_or("Error")),
        escape(message),
        escape(error_code)
    );
    page("Incident quiz error", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::format_record;
    use crate::ml::{Confidence, ModelType};
    use crate::models::{feature_index, IncidentKey, IncidentRecord, FEATURE_COUNT};

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape("Class 1"), "Class 1");
    }

    #[test]
    fn test_index_page() {
        let mut values = [0.0; FEATURE_COUNT];
        values[feature_index("cert_level").unwrap()] = 3.0;
        let display = format_record(&IncidentRecord::new(IncidentKey::new("E1", "1"), values));
        let token = Uuid::new_v4();

        let html = render_index(&display, &token);
        assert!(html.contains("Class 3"));
        assert!(html.contains(&token.to_string()));
        assert!(html.contains("<option value=\"Human error\">"));
        assert!(html.contains("<option value=\"Just bad luck\">"));
        assert_eq!(html.matches("<tr>").count(), FEATURE_COUNT);
    }

    #[test]
    fn test_results_page() {
        let outcome = QuizOutcome {
            guess: Cause::BadLuck,
            prediction: Cause::HumanError,
            confidence: Confidence::from_probability(0.81).unwrap(),
            reality: Cause::BadLuck,
            report_url: IncidentKey::new("E1", "2").report_url(),
        };
        let model = ModelMetadata {
            name: "lr".to_string(),
            model_type: ModelType::LogisticRegression,
            trained_at: None,
            n_features: 18,
            format_version: 1,
        };

        let html = render_results(&outcome, &model);
        assert!(html.contains("81%"));
        assert!(html.contains("You beat the model!"));
        assert!(html.contains("EventID=E1&amp;AKey=2&amp;RType=HTML&amp;IType=LA"));
    }

    #[test]
    fn test_error_page_escapes_message() {
        let html = render_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "bad <script>");
        assert!(html.contains("400 Bad Request"));
        assert!(html.contains("bad &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
