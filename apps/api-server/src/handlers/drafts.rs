//! Draft endpoints - save, list, load and soft-delete.

use actix_web::{HttpResponse, web};

use manuscript_core::domain::DraftInput;
use manuscript_shared::dto::{DraftDataDto, DraftSummaryDto, SaveDraftRequest};
use manuscript_shared::response::{DataResponse, StatusResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/drafts
pub async fn save_or_update(
    state: web::Data<AppState>,
    body: web::Json<SaveDraftRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let input = DraftInput {
        id: req.id,
        title: req.title,
        class_label: req.class_label,
        author_name: req.author_name,
        content: req.content,
    };

    let saved = state.drafts.save_or_update(input).await?;

    let message = if saved.created {
        "Draft saved"
    } else {
        "Draft updated"
    };
    Ok(HttpResponse::Ok().json(StatusResponse::success_with_id(message, saved.id)))
}

/// GET /api/drafts
pub async fn list(state: web::Data<AppState>) -> HttpResponse {
    let entries: Vec<DraftSummaryDto> = state
        .drafts
        .get_draft_list()
        .await
        .into_iter()
        .map(|summary| DraftSummaryDto {
            id: summary.id,
            title: summary.title,
            name: summary.author_name,
            updated_at: summary.updated_at,
        })
        .collect();

    HttpResponse::Ok().json(entries)
}

/// GET /api/drafts/{id}
pub async fn load(state: web::Data<AppState>, path: web::Path<String>) -> AppResult<HttpResponse> {
    let draft = state.drafts.load_draft(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(DataResponse::ok(DraftDataDto {
        id: draft.id,
        title: draft.title,
        class_label: draft.class_label,
        author_name: draft.author_name,
        content: draft.content,
    })))
}

/// DELETE /api/drafts/{id}
pub async fn delete(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    state.drafts.delete_draft(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(StatusResponse::success("Draft archived")))
}
