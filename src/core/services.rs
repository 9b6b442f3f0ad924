use crate::auth::jwt::{Claims, JwtService};
use crate::core::errors::{FieldError, WhoOwesError};
use crate::core::models::{AppUser, Group, GroupSummary, Member, MemberBalance, Payment, Settlement};
use crate::core::models::member::RESERVED_MEMBER_NAME;
use crate::core::models::payment::MAX_PAYMENT_AMOUNT;
use crate::core::settlement::{compute_settlements, net_balances};
use crate::infrastructure::storage::Storage;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, ToSchema, Clone)]
pub struct AccessToken {
    pub access_token: String,
    #[schema(value_type = String, example = "2024-06-01T12:34:56Z")]
    pub expires_at: DateTime<Utc>,
    pub user_id: String,
    pub email: String,
}

pub struct WhoOwesService<S: Storage> {
    storage: S,
    jwt_service: JwtService,
    bcrypt_cost: u32,
}

impl<S: Storage> WhoOwesService<S> {
    pub fn new(storage: S, jwt_service: JwtService, bcrypt_cost: u32) -> Self {
        WhoOwesService {
            storage,
            jwt_service,
            bcrypt_cost,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, WhoOwesError> {
        self.jwt_service.validate_token(token)
    }

    async fn load_group(&self, user_id: &str, group_id: &str) -> Result<Group, WhoOwesError> {
        let group = self
            .storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| WhoOwesError::GroupNotFound(group_id.to_string()))?;
        ensure_creator(&group, user_id)?;
        Ok(group)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AppUser, WhoOwesError> {
        let email = require_text("email", email)?;
        if password.trim().is_empty() {
            return Err(WhoOwesError::InvalidInput(
                "password".to_string(),
                FieldError::new("password", "Invalid password", "password cannot be empty"),
            ));
        }

        if self.storage.email_exists(&email).await? {
            return Err(WhoOwesError::EmailAlreadyRegistered(email));
        }

        let password_hash = bcrypt::hash(password, self.bcrypt_cost)
            .map_err(|e| WhoOwesError::InternalServerError(format!("Password hashing error: {}", e)))?;

        let user = self
            .storage
            .create_user(AppUser {
                id: Uuid::new_v4().to_string(),
                email,
                password_hash,
                created_at: Utc::now(),
            })
            .await?;

        info!(user_id = %user.id, "user signed up");
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AccessToken, WhoOwesError> {
        let email = require_text("email", email)?;
        if password.trim().is_empty() {
            return Err(WhoOwesError::InvalidInput(
                "password".to_string(),
                FieldError::new("password", "Invalid password", "password cannot be empty"),
            ));
        }

        let Some(user) = self.storage.get_user_by_email(&email).await? else {
            warn!("login rejected for unknown email");
            return Err(WhoOwesError::InvalidCredentials);
        };

        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| WhoOwesError::InternalServerError(format!("Password verification error: {}", e)))?;
        if !verified {
            warn!(user_id = %user.id, "login rejected, wrong password");
            return Err(WhoOwesError::InvalidCredentials);
        }

        let (access_token, expires_at) = self.jwt_service.generate_token(&user.id, &user.email)?;
        Ok(AccessToken {
            access_token,
            expires_at,
            user_id: user.id,
            email: user.email,
        })
    }

    pub async fn create_group(&self, user_id: &str, title: &str) -> Result<Group, WhoOwesError> {
        let title = require_text("title", title)?;

        let group = Group {
            id: Uuid::new_v4().to_string(),
            creator_user_id: user_id.to_string(),
            title,
            members: vec![Member::new(RESERVED_MEMBER_NAME)],
            payments: Vec::new(),
        };
        let group = self.storage.add_group(group).await?;

        info!(group_id = %group.id, user_id, "group created");
        Ok(group)
    }

    pub async fn get_all_groups(&self, user_id: &str) -> Result<Vec<GroupSummary>, WhoOwesError> {
        let mut summaries: Vec<GroupSummary> = self
            .storage
            .get_groups_by_creator(user_id)
            .await?
            .iter()
            .map(Group::summary)
            .collect();
        summaries.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }

    pub async fn get_group_details(&self, user_id: &str, group_id: &str) -> Result<Group, WhoOwesError> {
        self.load_group(user_id, group_id).await
    }

    pub async fn delete_group(&self, user_id: &str, group_id: &str) -> Result<(), WhoOwesError> {
        self.storage
            .delete_group(group_id, |group| {
                ensure_creator(group, user_id)?;
                if !group.payments.is_empty() {
                    return Err(WhoOwesError::GroupHasPayments(group_id.to_string()));
                }
                Ok(())
            })
            .await?;

        info!(group_id, user_id, "group deleted");
        Ok(())
    }

    pub async fn add_member(&self, user_id: &str, group_id: &str, name: &str) -> Result<Member, WhoOwesError> {
        let member = self
            .storage
            .modify_group(group_id, |group| {
                ensure_creator(group, user_id)?;
                let member = Member::new(require_text("name", name)?);
                if member.is_reserved() {
                    return Err(WhoOwesError::ReservedMemberName(RESERVED_MEMBER_NAME.to_string()));
                }
                if group.members.iter().any(|m| m.has_name(&member.name)) {
                    return Err(WhoOwesError::DuplicateMemberName(member.name));
                }
                group.members.push(member.clone());
                Ok(member)
            })
            .await?;

        info!(group_id, member_id = %member.id, "member added");
        Ok(member)
    }

    pub async fn remove_member(&self, user_id: &str, group_id: &str, member_id: &str) -> Result<(), WhoOwesError> {
        self.storage
            .modify_group(group_id, |group| {
                ensure_creator(group, user_id)?;
                let member = group
                    .member(member_id)
                    .ok_or_else(|| WhoOwesError::MemberNotFound(member_id.to_string()))?;
                if member.is_reserved() {
                    return Err(WhoOwesError::CannotRemoveSelf);
                }
                if group.has_payments_from(member_id) {
                    return Err(WhoOwesError::MemberHasPayments(member_id.to_string()));
                }
                group.members.retain(|m| m.id != member_id);
                Ok(())
            })
            .await?;

        info!(group_id, member_id, "member removed");
        Ok(())
    }

    pub async fn add_payment(
        &self,
        user_id: &str,
        group_id: &str,
        member_id: &str,
        amount: Decimal,
        payment_date: DateTime<Utc>,
        description: &str,
    ) -> Result<Payment, WhoOwesError> {
        let payment = self
            .storage
            .modify_group(group_id, |group| {
                ensure_creator(group, user_id)?;
                validate_amount(amount)?;
                let description = require_text("description", description)?;
                let payer = group
                    .member(member_id)
                    .ok_or_else(|| WhoOwesError::UnknownPaymentMember(member_id.to_string()))?;

                let payment = Payment {
                    id: Uuid::new_v4().to_string(),
                    member_id: payer.id.clone(),
                    member_name: payer.name.clone(),
                    amount,
                    payment_date,
                    description,
                };
                group.payments.push(payment.clone());
                Ok(payment)
            })
            .await?;

        info!(group_id, payment_id = %payment.id, amount = %payment.amount, "payment added");
        Ok(payment)
    }

    pub async fn remove_payment(&self, user_id: &str, group_id: &str, payment_id: &str) -> Result<(), WhoOwesError> {
        self.storage
            .modify_group(group_id, |group| {
                ensure_creator(group, user_id)?;
                if !group.payments.iter().any(|p| p.id == payment_id) {
                    return Err(WhoOwesError::PaymentNotFound(payment_id.to_string()));
                }
                group.payments.retain(|p| p.id != payment_id);
                Ok(())
            })
            .await?;

        info!(group_id, payment_id, "payment removed");
        Ok(())
    }

    pub async fn get_group_debts(&self, user_id: &str, group_id: &str) -> Result<Vec<Settlement>, WhoOwesError> {
        let group = self.load_group(user_id, group_id).await?;
        let settlements = compute_settlements(&group.members, &group.payments);
        debug!(
            group_id,
            members = group.members.len(),
            payments = group.payments.len(),
            settlements = settlements.len(),
            "debts computed"
        );
        Ok(settlements)
    }

    pub async fn get_group_balances(&self, user_id: &str, group_id: &str) -> Result<Vec<MemberBalance>, WhoOwesError> {
        let group = self.load_group(user_id, group_id).await?;
        Ok(net_balances(&group.members, &group.payments))
    }
}

fn ensure_creator(group: &Group, user_id: &str) -> Result<(), WhoOwesError> {
    if group.creator_user_id != user_id {
        return Err(WhoOwesError::NotGroupCreator(user_id.to_string()));
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<String, WhoOwesError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WhoOwesError::InvalidInput(
            field.to_string(),
            FieldError::new(field, &format!("Invalid {}", field), format!("{} cannot be empty", field)),
        ));
    }
    Ok(trimmed.to_string())
}

fn validate_amount(amount: Decimal) -> Result<(), WhoOwesError> {
    if amount <= Decimal::ZERO {
        return Err(WhoOwesError::InvalidInput(
            "amount".to_string(),
            FieldError::new("amount", "Invalid Amount", "Amount must be greater than 0"),
        ));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(WhoOwesError::InvalidInput(
            "amount".to_string(),
            FieldError::new(
                "amount",
                "Invalid Amount",
                format!("Amount cannot exceed {}", MAX_PAYMENT_AMOUNT),
            ),
        ));
    }
    Ok(())
}
