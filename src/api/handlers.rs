use crate::{
    api::models::*,
    auth::jwt::Claims,
    core::{
        errors::WhoOwesError,
        models::{Group, GroupSummary, MemberBalance, Settlement},
        services::{AccessToken, WhoOwesService},
    },
    infrastructure::storage::in_memory::InMemoryStorage,
};
use axum::{
    Extension, Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::IntoResponse,
    routing::{delete, get, post},
};
use http::header;

use std::sync::Arc;

pub type AppState = Arc<WhoOwesService<InMemoryStorage>>;

// Middleware to validate JWT
async fn auth_middleware(
    State(service): State<AppState>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<impl IntoResponse, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| WhoOwesError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| WhoOwesError::Unauthorized("Invalid Authorization header".to_string()))?;

    let claims = service.validate_token(token)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

// Define API routes
pub fn api_routes(service: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/groups", post(create_group).get(get_all_groups))
        .route("/groups/{group_id}", get(get_group_details).delete(delete_group))
        .route("/groups/{group_id}/members", post(add_member))
        .route("/groups/{group_id}/members/{member_id}", delete(remove_member))
        .route("/groups/{group_id}/payments", post(add_payment))
        .route("/groups/{group_id}/payments/{payment_id}", delete(remove_payment))
        .route("/groups/{group_id}/debts", get(get_group_debts))
        .route("/groups/{group_id}/balances", get(get_group_balances))
        .route_layer(middleware::from_fn_with_state(service.clone(), auth_middleware));

    Router::new()
        .route("/auth/signup", post(sign_up))
        .route("/auth/login", post(login))
        .merge(protected_routes)
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "User registered", body = SignUpResponse),
        (status = 400, description = "Email or password missing", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn sign_up(
    State(service): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), ApiError> {
    let user = service.sign_up(&req.email, &req.password).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            user_id: user.id,
            email: user.email,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AccessToken),
        (status = 400, description = "Email or password missing", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn login(State(service): State<AppState>, Json(req): Json<LoginRequest>) -> Result<Json<AccessToken>, ApiError> {
    let token = service.login(&req.email, &req.password).await?;
    Ok(Json(token))
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 201, description = "Group created", body = CreateGroupResponse),
        (status = 400, description = "Title missing", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn create_group(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<CreateGroupResponse>), ApiError> {
    let group = service.create_group(&claims.sub, &req.title).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateGroupResponse {
            group_id: group.id,
            title: group.title,
            creator_user_id: group.creator_user_id,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/api/groups",
    responses(
        (status = 200, description = "Groups created by the caller", body = [GroupSummary]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_all_groups(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<GroupSummary>>, ApiError> {
    let groups = service.get_all_groups(&claims.sub).await?;
    Ok(Json(groups))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Group with members and payments", body = Group),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the group creator", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_group_details(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<Group>, ApiError> {
    let group = service.get_group_details(&claims.sub, &group_id).await?;
    Ok(Json(group))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group to delete")
    ),
    responses(
        (status = 204, description = "Group deleted"),
        (status = 400, description = "Group still has payments", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the group creator", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn delete_group(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    service.delete_group(&claims.sub, &group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/members",
    request_body = AddMemberRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 201, description = "Member added", body = AddMemberResponse),
        (status = 400, description = "Name missing or reserved", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the group creator", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse),
        (status = 409, description = "Name already used in the group", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn add_member(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<AddMemberRequest>,
) -> Result<(StatusCode, Json<AddMemberResponse>), ApiError> {
    let member = service.add_member(&claims.sub, &group_id, &req.name).await?;
    Ok((
        StatusCode::CREATED,
        Json(AddMemberResponse {
            member_id: member.id,
            name: member.name,
        }),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}/members/{member_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ("member_id" = String, Path, description = "ID of the member to remove")
    ),
    responses(
        (status = 204, description = "Member removed"),
        (status = 400, description = "Member is the caller or has payments", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the group creator", body = ErrorResponse),
        (status = 404, description = "Group or member not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn remove_member(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((group_id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    service.remove_member(&claims.sub, &group_id, &member_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/payments",
    request_body = AddPaymentRequest,
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 201, description = "Payment recorded", body = crate::core::models::Payment),
        (status = 400, description = "Invalid amount, description or payer", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the group creator", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn add_payment(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
    Json(req): Json<AddPaymentRequest>,
) -> Result<(StatusCode, Json<crate::core::models::Payment>), ApiError> {
    let payment = service
        .add_payment(
            &claims.sub,
            &group_id,
            &req.member_id,
            req.amount,
            req.payment_date,
            &req.description,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    delete,
    path = "/api/groups/{group_id}/payments/{payment_id}",
    params(
        ("group_id" = String, Path, description = "ID of the group"),
        ("payment_id" = String, Path, description = "ID of the payment to remove")
    ),
    responses(
        (status = 204, description = "Payment removed"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the group creator", body = ErrorResponse),
        (status = 404, description = "Group or payment not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn remove_payment(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((group_id, payment_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    service.remove_payment(&claims.sub, &group_id, &payment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/debts",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Transfers that settle the group", body = [Settlement]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the group creator", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_group_debts(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<Settlement>>, ApiError> {
    let debts = service.get_group_debts(&claims.sub, &group_id).await?;
    Ok(Json(debts))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/balances",
    params(
        ("group_id" = String, Path, description = "ID of the group")
    ),
    responses(
        (status = 200, description = "Net balance of each member", body = [MemberBalance]),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Not the group creator", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    ),
    security(("Bearer" = []))
)]
async fn get_group_balances(
    State(service): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_id): Path<String>,
) -> Result<Json<Vec<MemberBalance>>, ApiError> {
    let balances = service.get_group_balances(&claims.sub, &group_id).await?;
    Ok(Json(balances))
}
