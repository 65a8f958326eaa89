use actix_web::{web, HttpResponse, Responder};
use bson::oid::ObjectId;
use serde_json::Value;

use crate::db::{GradeStore, LIST_LIMIT};
use crate::error::ApiError;
use crate::student_id;
use crate::types::{
    document_to_json, payload_to_document, GradePayload, HealthResponse, InsertAck,
};

pub async fn health() -> impl Responder {
    web::Json(HealthResponse { status: "ok" })
}

pub async fn create_grade(
    body: web::Json<GradePayload>,
    store: web::Data<dyn GradeStore>,
) -> Result<impl Responder, ApiError> {
    let payload = body.into_inner();
    tracing::debug!("Creating grade: {:?}", payload);

    let inserted_id = store.insert(payload_to_document(payload)).await?;

    Ok(HttpResponse::Created().json(InsertAck::new(inserted_id)))
}

pub async fn list_grades(store: web::Data<dyn GradeStore>) -> Result<impl Responder, ApiError> {
    let grades = store.list(LIST_LIMIT).await?;

    Ok(web::Json(
        grades.into_iter().map(document_to_json).collect::<Vec<Value>>(),
    ))
}

pub async fn get_grade(
    path: web::Path<String>,
    store: web::Data<dyn GradeStore>,
) -> Result<impl Responder, ApiError> {
    let id = path.into_inner();

    let oid = ObjectId::parse_str(&id).map_err(|_| ApiError::InvalidIdentifier(id.clone()))?;

    let grade = store
        .find_by_id(oid)
        .await?
        .ok_or_else(|| ApiError::NotFound(id))?;

    Ok(web::Json(document_to_json(grade)))
}

/// Zero matches is a successful query and answers 200 with `[]`.
pub async fn get_student_grades(
    path: web::Path<String>,
    store: web::Data<dyn GradeStore>,
) -> Result<impl Responder, ApiError> {
    let raw = path.into_inner();
    let student_id = student_id::coerce(&raw);
    tracing::debug!("Querying grades for student_id={} (raw {:?})", student_id, raw);

    // NaN equals nothing, so skip the round-trip.
    if student_id.is_nan() {
        return Ok(web::Json(Vec::<Value>::new()));
    }

    let grades = store.find_by_student(student_id).await?;

    Ok(web::Json(
        grades.into_iter().map(document_to_json).collect::<Vec<Value>>(),
    ))
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .route("/health", web::get().to(health))
            .service(
                web::scope("/grades")
                    .route("", web::post().to(create_grade))
                    .route("/", web::post().to(create_grade))
                    .route("", web::get().to(list_grades))
                    .route("/", web::get().to(list_grades))
                    .route("/student/{student_id}", web::get().to(get_student_grades))
                    .route("/{id}", web::get().to(get_grade)),
            ),
    );
}
