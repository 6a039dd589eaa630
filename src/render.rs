//! HTML rendering
//!
//! Pure string assembly. Every user-supplied value passes through `escape`.

use std::fmt::Write;

use axum::http::StatusCode;

use crate::authenticate::AuthError;
use crate::models::{ClassificationResult, Feature, NoteForm, Verdict};

const TITLE: &str = "Bank Note Authenticator";

/// Message shown under the form
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Verdict(ClassificationResult),
    Warning(String),
    Error(String),
}

impl Notice {
    /// Notice for a user-correctable rejection
    pub fn from_rejection(err: &AuthError) -> Self {
        match err {
            AuthError::MissingInput { fields } => {
                let names: Vec<&str> = fields.iter().map(Feature::label).collect();
                Notice::Warning(format!(
                    "⚠ Please fill in all fields before predicting. Missing: {}.",
                    names.join(", ")
                ))
            }
            AuthError::InvalidNumeric { field, .. } => Notice::Error(format!(
                "❌ Please enter valid numeric values for all fields. {} is not a number.",
                field.label()
            )),
            AuthError::UnexpectedOutput(_) => Notice::Error(err.to_string()),
        }
    }
}

/// Full form page
pub fn page(form: &NoteForm, notice: Option<&Notice>, show_about: bool) -> String {
    let mut body = String::new();

    body.push_str("<h1>🏦 Bank Note Authenticator</h1>\n");
    body.push_str(
        "<p>This app predicts whether a bank note is <b>authentic</b> or <b>fake</b> \
         using a Machine Learning model trained on statistical features.</p>\n",
    );

    body.push_str("<form method=\"post\" action=\"/predict\">\n");
    for feature in Feature::ALL {
        let _ = write!(
            body,
            "<label for=\"{name}\">{icon} {label}</label>\n\
             <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\" \
             placeholder=\"Enter {lower} value\">\n",
            name = feature.as_str(),
            icon = icon(feature),
            label = feature.label(),
            value = escape(form.get(feature)),
            lower = feature.as_str(),
        );
    }
    body.push_str(
        "<div class=\"actions\">\n\
         <button type=\"submit\">🔍 Predict</button>\n\
         <button type=\"submit\" class=\"secondary\" formaction=\"/about\">ℹ About</button>\n\
         </div>\n</form>\n",
    );

    if let Some(notice) = notice {
        body.push_str(&render_notice(notice));
    }

    if show_about {
        body.push_str(ABOUT_HTML);
    }

    body.push_str("<div class=\"footer\">© 2025 Bank Note Authenticator | Engineered by SweetPoison</div>\n");

    layout(&body)
}

/// Standalone page for failures that replace the form
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>🏦 Bank Note Authenticator</h1>\n\
         <div class=\"error\">{} {}<br>{}</div>\n\
         <p><a href=\"/\">Back to the form</a></p>\n",
        status.as_u16(),
        escape(status.canonical_reason().unwrap_or("Error")),
        escape(message),
    );
    layout(&body)
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Verdict(result) => {
            let mark = match result.verdict {
                Verdict::Genuine => "✅",
                Verdict::Fake => "❌",
            };
            format!(
                "<div class=\"prediction-box\">{} Prediction: <b>{}</b> ({})</div>\n",
                mark,
                result.label(),
                result.code()
            )
        }
        Notice::Warning(msg) => format!("<div class=\"warning\">{}</div>\n", escape(msg)),
        Notice::Error(msg) => format!("<div class=\"error\">{}</div>\n", escape(msg)),
    }
}

fn icon(feature: Feature) -> &'static str {
    match feature {
        Feature::Variance => "📊",
        Feature::Skewness => "📈",
        Feature::Curtosis => "📉",
        Feature::Entropy => "♾",
    }
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n\
         <body>\n<main class=\"main\">\n{}</main>\n</body>\n</html>\n",
        TITLE, STYLE, body
    )
}

/// Escape text for HTML element content and quoted attributes
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

const STYLE: &str = r#"
body { background-color: #f0f4f8; font-family: 'Segoe UI', sans-serif; }
.main { max-width: 640px; margin: 40px auto; background: linear-gradient(135deg, #ffffff, #e6ecff);
        padding: 25px; border-radius: 15px; box-shadow: 0px 4px 15px rgba(0,0,0,0.1); }
h1, h2, h3, h4 { text-align: center; color: #002b5c; }
label { display: block; margin-top: 12px; color: #002b5c; }
input { width: 100%; box-sizing: border-box; border: 2px solid #b3c7e6; border-radius: 8px; padding: 8px; }
.actions { margin-top: 16px; display: flex; gap: 12px; }
button { background-color: #002b5c; color: white; font-size: 16px; border-radius: 10px;
         padding: 10px 20px; border: none; cursor: pointer; }
button:hover { background-color: #004080; }
button.secondary { background-color: #4d6f99; }
.prediction-box { background-color: #e6f7ff; border-left: 5px solid #0099cc; padding: 15px;
                  border-radius: 8px; font-size: 16px; color: #00334d; margin-top: 15px; }
.warning { background-color: #fff8e1; border-left: 5px solid #f0b400; padding: 15px; border-radius: 8px; margin-top: 15px; }
.error { background-color: #ffebee; border-left: 5px solid #d32f2f; padding: 15px; border-radius: 8px; margin-top: 15px; }
.about { margin-top: 20px; }
.footer { text-align: center; font-size: 13px; margin-top: 20px; color: #666; }
"#;

const ABOUT_HTML: &str = r#"<section class="about">
<h3>ℹ About This App</h3>
<p>This <b>Bank Note Authentication App</b> uses a Machine Learning model to determine whether a given banknote is <b>authentic</b> or <b>fake</b>.</p>
<h4>🔍 How It Works:</h4>
<ol>
<li>You provide four numbers about the bank note:
<ul>
<li><b>Variance</b> 📊 How much the image data varies from the average. Large differences can signal unusual patterns.</li>
<li><b>Skewness</b> 📈 Tells if the data is tilted to one side. Counterfeit notes often show abnormal tilting patterns.</li>
<li><b>Curtosis</b> 📉 Measures how sharp or flat the data curve is. Fake notes can have curves that are too sharp or too flat compared to real ones.</li>
<li><b>Entropy</b> ♾ Shows how complex or "messy" the image is. Real notes have a certain level of natural complexity that fakes may lack.</li>
</ul>
</li>
<li>The model processes these inputs and makes a prediction.</li>
<li>The output will be:
<ul>
<li><b>0 → Fake Note</b> (Likely counterfeit)</li>
<li><b>1 → Genuine Note</b> (Likely authentic)</li>
</ul>
</li>
</ol>
<h4>🛡 Why Bank Note Authentication?</h4>
<p>Counterfeit currency is a major issue worldwide. This project demonstrates how AI can help quickly and reliably identify fake notes, reducing fraud risks.</p>
<h4>📦 Technology Stack:</h4>
<ul>
<li><b>Rust</b></li>
<li><b>axum</b> for the web server</li>
<li><b>serde</b> JSON for the model artifact (logistic regression or random forest)</li>
<li><b>tracing</b> for structured logs</li>
</ul>
<h4>👨‍💻 Developer:</h4>
<ul>
<li><b>BISWAJIT SOW</b></li>
</ul>
</section>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureVector;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<b a="x">&'"#), "&lt;b a=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_form_values_preserved_and_escaped() {
        let form = NoteForm::new("1.5", "\"><script>", "", "2");
        let html = page(&form, None, false);

        assert!(html.contains(r#"name="variance" value="1.5""#));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("About This App"));
    }

    #[test]
    fn test_verdict_box() {
        let result = ClassificationResult {
            features: FeatureVector::new(0.0, 0.0, 0.0, 0.0),
            verdict: Verdict::Genuine,
        };
        let html = page(&NoteForm::default(), Some(&Notice::Verdict(result)), false);
        assert!(html.contains("Prediction: <b>Genuine Note</b> (1)"));
    }

    #[test]
    fn test_rejection_notices() {
        let missing = Notice::from_rejection(&AuthError::MissingInput {
            fields: vec![Feature::Entropy],
        });
        assert!(matches!(missing, Notice::Warning(ref m) if m.contains("Missing: Entropy")));

        let invalid = Notice::from_rejection(&AuthError::InvalidNumeric {
            field: Feature::Skewness,
            value: "abc".to_string(),
        });
        assert!(matches!(invalid, Notice::Error(ref m) if m.contains("Skewness is not a number")));
    }

    #[test]
    fn test_about_section() {
        let html = page(&NoteForm::default(), None, true);
        assert!(html.contains("About This App"));
        assert!(html.contains("0 → Fake Note"));
        assert!(html.contains("Technology Stack"));
        assert!(html.contains("Developer"));
    }

    #[test]
    fn test_error_page() {
        let html = error_page(StatusCode::INTERNAL_SERVER_ERROR, "code <7>");
        assert!(html.contains("500 Internal Server Error"));
        assert!(html.contains("code &lt;7&gt;"));
    }
}
