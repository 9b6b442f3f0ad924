use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::{
    api::models::{
        AddMemberRequest, AddMemberResponse, AddPaymentRequest, CreateGroupRequest, CreateGroupResponse,
        ErrorResponse, LoginRequest, SignUpRequest, SignUpResponse,
    },
    core::{
        models::{Group, GroupSummary, Member, MemberBalance, Payment, Settlement},
        services::AccessToken,
    },
};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "Bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::sign_up,
        super::handlers::login,
        super::handlers::create_group,
        super::handlers::get_all_groups,
        super::handlers::get_group_details,
        super::handlers::delete_group,
        super::handlers::add_member,
        super::handlers::remove_member,
        super::handlers::add_payment,
        super::handlers::remove_payment,
        super::handlers::get_group_debts,
        super::handlers::get_group_balances
    ),
    components(schemas(
        SignUpRequest,
        SignUpResponse,
        LoginRequest,
        AccessToken,
        CreateGroupRequest,
        CreateGroupResponse,
        AddMemberRequest,
        AddMemberResponse,
        AddPaymentRequest,
        ErrorResponse,
        Group,
        GroupSummary,
        Member,
        Payment,
        Settlement,
        MemberBalance
    )),
    modifiers(&BearerAuth),
    info(
        title = "WhoOwesWho API",
        description = "API for tracking shared expenses in a group and settling who owes whom",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
