//! Form page handlers

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::authenticate::authenticate;
use crate::models::NoteForm;
use crate::render::{self, Notice};
use crate::{AppResult, AppState};

/// Empty form
pub async fn index() -> Html<String> {
    Html(render::page(&NoteForm::default(), None, false))
}

/// Empty form with the help text open
pub async fn about_page() -> Html<String> {
    Html(render::page(&NoteForm::default(), None, true))
}

/// Help text requested from a filled-in form. Typed values are kept; no inference runs.
pub async fn about(form: Result<Form<NoteForm>, FormRejection>) -> AppResult<Html<String>> {
    let Form(form) = form?;
    Ok(Html(render::page(&form, None, true)))
}

/// Validate the submission and classify it
pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<NoteForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(form) = form?;

    match authenticate(&form, &*state.gateway) {
        Ok(result) => {
            tracing::info!(
                variance = result.features.variance(),
                skewness = result.features.skewness(),
                curtosis = result.features.curtosis(),
                entropy = result.features.entropy(),
                code = result.code(),
                verdict = result.label(),
                "Note classified"
            );
            let html = render::page(&form, Some(&Notice::Verdict(result)), false);
            Ok(Html(html).into_response())
        }
        Err(err) if err.is_rejection() => {
            tracing::info!("Submission rejected: {}", err);
            let notice = Notice::from_rejection(&err);
            let html = render::page(&form, Some(&notice), false);
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
