use crate::{
    ApiError, CompanyDto, CompanyPayload, FullNameParams, RepresentativeDto,
    RepresentativePayload, RpcState, TransferParams,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use repdesk_directory::Directory;
use repdesk_types::{Company, CompanyId, RepresentativeId};
use validator::Validate;

/// Helper to run payload validation before touching the directory
fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    payload.validate().map_err(ApiError::from_validation)?;
    Ok(payload)
}

/// Helper to resolve a company's member set into the response view
fn company_dto(directory: &Directory, company: Company) -> Result<CompanyDto, ApiError> {
    let members = directory.resolve_members(&company)?;
    Ok(CompanyDto::from_parts(company, members))
}

/// Health check handler
pub async fn health() -> &'static str {
    "OK"
}

// ============================================================================
// Company endpoints
// ============================================================================

/// Create company handler
pub async fn create_company(
    State(state): State<RpcState>,
    Json(payload): Json<CompanyPayload>,
) -> Result<(StatusCode, Json<CompanyDto>), ApiError> {
    let payload = validated(payload)?;

    let mut directory = state.directory.write().await;
    let company = directory.create_company(&payload.name, payload.representative_ids())?;

    if let Some(metrics) = &state.metrics {
        metrics.record_created("company");
    }

    let dto = company_dto(&directory, company)?;
    Ok((StatusCode::CREATED, Json(dto)))
}

/// Get company handler
pub async fn get_company(
    State(state): State<RpcState>,
    Path(id): Path<CompanyId>,
) -> Result<Json<CompanyDto>, ApiError> {
    let directory = state.directory.read().await;
    let company = directory.get_company(id)?;
    company_dto(&directory, company).map(Json)
}

/// Find companies by name handler
pub async fn get_companies_by_name(
    State(state): State<RpcState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<CompanyDto>>, ApiError> {
    let directory = state.directory.read().await;
    let companies = directory.find_companies_by_name(&name)?;

    companies
        .into_iter()
        .map(|company| company_dto(&directory, company))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// Companies without representatives handler
pub async fn get_companies_without_representative(
    State(state): State<RpcState>,
) -> Result<Json<Vec<CompanyDto>>, ApiError> {
    let directory = state.directory.read().await;
    let companies = directory.companies_without_representatives()?;

    companies
        .into_iter()
        .map(|company| company_dto(&directory, company))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// List all companies handler
pub async fn list_companies(
    State(state): State<RpcState>,
) -> Result<Json<Vec<CompanyDto>>, ApiError> {
    let directory = state.directory.read().await;
    let companies = directory.list_companies()?;

    companies
        .into_iter()
        .map(|company| company_dto(&directory, company))
        .collect::<Result<Vec<_>, _>>()
        .map(Json)
}

/// Update company handler
pub async fn update_company(
    State(state): State<RpcState>,
    Path(id): Path<CompanyId>,
    Json(payload): Json<CompanyPayload>,
) -> Result<Json<CompanyDto>, ApiError> {
    let payload = validated(payload)?;

    let mut directory = state.directory.write().await;
    let company = directory.update_company(id, &payload.name, payload.representative_ids())?;
    company_dto(&directory, company).map(Json)
}

/// Delete company handler
pub async fn delete_company(
    State(state): State<RpcState>,
    Path(id): Path<CompanyId>,
) -> Result<StatusCode, ApiError> {
    let mut directory = state.directory.write().await;
    directory.delete_company(id)?;

    if let Some(metrics) = &state.metrics {
        metrics.record_deleted("company");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Assign representative handler
pub async fn assign_representative(
    State(state): State<RpcState>,
    Path((company_id, representative_id)): Path<(CompanyId, RepresentativeId)>,
) -> Result<Json<CompanyDto>, ApiError> {
    let mut directory = state.directory.write().await;
    let company = directory.assign_representative(company_id, representative_id)?;

    if let Some(metrics) = &state.metrics {
        metrics.record_association_op("assign");
    }
    company_dto(&directory, company).map(Json)
}

/// Unassign representative handler
pub async fn unassign_representative(
    State(state): State<RpcState>,
    Path((company_id, representative_id)): Path<(CompanyId, RepresentativeId)>,
) -> Result<StatusCode, ApiError> {
    let mut directory = state.directory.write().await;
    directory.unassign_representative(company_id, representative_id)?;

    if let Some(metrics) = &state.metrics {
        metrics.record_association_op("unassign");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// List a company's representatives handler
pub async fn list_company_representatives(
    State(state): State<RpcState>,
    Path(company_id): Path<CompanyId>,
) -> Result<Json<Vec<RepresentativeDto>>, ApiError> {
    let directory = state.directory.read().await;
    let members = directory.representatives_for_company(company_id)?;
    Ok(Json(members.into_iter().map(Into::into).collect()))
}

/// Transfer representative handler
pub async fn transfer_representative(
    State(state): State<RpcState>,
    Query(params): Query<TransferParams>,
) -> Result<StatusCode, ApiError> {
    let mut directory = state.directory.write().await;
    directory.transfer_representative(
        params.current_company_id,
        params.new_company_id,
        params.representative_id,
    )?;

    if let Some(metrics) = &state.metrics {
        metrics.record_association_op("transfer");
    }
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Representative endpoints
// ============================================================================

/// Create representative handler
pub async fn create_representative(
    State(state): State<RpcState>,
    Json(payload): Json<RepresentativePayload>,
) -> Result<(StatusCode, Json<RepresentativeDto>), ApiError> {
    let payload = validated(payload)?;

    let mut directory = state.directory.write().await;
    let representative =
        directory.create_representative(&payload.first_name, &payload.last_name)?;

    if let Some(metrics) = &state.metrics {
        metrics.record_created("representative");
    }
    Ok((StatusCode::CREATED, Json(representative.into())))
}

/// Get representative handler
pub async fn get_representative(
    State(state): State<RpcState>,
    Path(id): Path<RepresentativeId>,
) -> Result<Json<RepresentativeDto>, ApiError> {
    let directory = state.directory.read().await;
    let representative = directory.get_representative(id)?;
    Ok(Json(representative.into()))
}

/// Find representatives by full name handler
pub async fn find_representatives_by_name(
    State(state): State<RpcState>,
    Query(params): Query<FullNameParams>,
) -> Result<Json<Vec<RepresentativeDto>>, ApiError> {
    let directory = state.directory.read().await;
    let representatives =
        directory.find_representatives_by_full_name(&params.first_name, &params.last_name)?;
    Ok(Json(representatives.into_iter().map(Into::into).collect()))
}

/// List all representatives handler
pub async fn list_representatives(
    State(state): State<RpcState>,
) -> Result<Json<Vec<RepresentativeDto>>, ApiError> {
    let directory = state.directory.read().await;
    let representatives = directory.list_representatives()?;
    Ok(Json(representatives.into_iter().map(Into::into).collect()))
}

/// Update representative handler
pub async fn update_representative(
    State(state): State<RpcState>,
    Path(id): Path<RepresentativeId>,
    Json(payload): Json<RepresentativePayload>,
) -> Result<Json<RepresentativeDto>, ApiError> {
    let payload = validated(payload)?;

    let mut directory = state.directory.write().await;
    let representative =
        directory.update_representative(id, &payload.first_name, &payload.last_name)?;
    Ok(Json(representative.into()))
}

/// Delete representative handler
pub async fn delete_representative(
    State(state): State<RpcState>,
    Path(id): Path<RepresentativeId>,
) -> Result<StatusCode, ApiError> {
    let mut directory = state.directory.write().await;
    directory.delete_representative(id)?;

    if let Some(metrics) = &state.metrics {
        metrics.record_deleted("representative");
    }
    Ok(StatusCode::NO_CONTENT)
}
